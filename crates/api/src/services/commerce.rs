//! Buying audio items and gating their download.

use rubric_core::access::Principal;
use rubric_core::error::CoreError;
use rubric_core::types::DbId;
use rubric_db::models::audio::Audio;
use rubric_db::models::purchase::{CreatePurchase, PurchaseOutcome};
use rubric_db::repositories::{AudioRepo, PurchaseRepo};
use rubric_db::DbPool;

use crate::error::AppResult;

/// Notice shown when a download is attempted without a purchase.
pub const PURCHASE_REQUIRED_NOTICE: &str = "You need to purchase this audio before downloading.";

/// Notice shown when an idempotency key is resubmitted for another item.
pub const KEY_REUSED_NOTICE: &str = "Idempotency key already used for a different item";

/// Longest accepted idempotency key.
const MAX_IDEMPOTENCY_KEY_LEN: usize = 128;

/// Record a purchase of `audio_id` by `buyer`.
///
/// One Payment and one Purchase row are written together at the audio's
/// current price. A repeated `idempotency_key` from the same buyer returns
/// the original purchase instead of charging again, provided it was for the
/// same audio item; reusing a key for another item is a
/// [`CoreError::Conflict`]. Without a key every call records a new pair.
pub async fn purchase<P: Principal + ?Sized>(
    pool: &DbPool,
    buyer: &P,
    audio_id: DbId,
    idempotency_key: Option<String>,
) -> AppResult<PurchaseOutcome> {
    let idempotency_key = idempotency_key
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    if let Some(key) = &idempotency_key {
        if key.len() > MAX_IDEMPOTENCY_KEY_LEN {
            return Err(CoreError::Validation(format!(
                "Idempotency key must be at most {MAX_IDEMPOTENCY_KEY_LEN} characters"
            ))
            .into());
        }
    }

    let input = CreatePurchase {
        user_id: buyer.user_id(),
        audio_id,
        idempotency_key,
    };
    let outcome = PurchaseRepo::create_with_payment(pool, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Audio",
            id: audio_id,
        })?;

    match &outcome {
        PurchaseOutcome::Recorded { payment, purchase } => {
            tracing::info!(
                user_id = input.user_id,
                audio_id,
                payment_id = payment.id,
                purchase_id = purchase.id,
                amount_cents = purchase.amount_cents,
                "Recorded purchase"
            );
        }
        PurchaseOutcome::Replayed(_) => {}
        PurchaseOutcome::KeyReused(_) => {
            return Err(CoreError::Conflict(KEY_REUSED_NOTICE.into()).into());
        }
    }
    Ok(outcome)
}

/// Check that `user` may download `audio_id` and return the audio row.
///
/// Fails with [`CoreError::NotFound`] if the audio does not exist and with
/// [`CoreError::PaymentRequired`] unless a purchase exists for this exact
/// user and audio.
pub async fn authorize_download<P: Principal + ?Sized>(
    pool: &DbPool,
    user: &P,
    audio_id: DbId,
) -> AppResult<Audio> {
    let audio = AudioRepo::find_by_id(pool, audio_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Audio",
            id: audio_id,
        })?;

    if !PurchaseRepo::exists_for(pool, user.user_id(), audio_id).await? {
        tracing::debug!(user_id = user.user_id(), audio_id, "Download refused without purchase");
        return Err(CoreError::PaymentRequired(PURCHASE_REQUIRED_NOTICE.into()).into());
    }

    Ok(audio)
}
