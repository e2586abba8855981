//! Repository for the `purchases` table and the Payment + Purchase buy transaction.

use rubric_core::types::DbId;
use sqlx::PgPool;

use crate::models::payment::Payment;
use crate::models::purchase::{CreatePurchase, Purchase, PurchaseOutcome, PurchaseSummary};
use crate::repositories::payment_repo;

const COLUMNS: &str = "id, amount_cents, purchased_at, user_id, audio_id, payment_id, \
                        idempotency_key, created_at, updated_at";

/// Purchases are append-only: created by [`PurchaseRepo::create_with_payment`],
/// never updated or deleted.
pub struct PurchaseRepo;

impl PurchaseRepo {
    /// Record a buy action: one Payment row and one Purchase row, both priced
    /// at the audio's current price, committed in a single transaction.
    ///
    /// The price is read inside the transaction, so the recorded amount always
    /// matches the price at the moment of purchase.
    ///
    /// Returns `None` if the audio does not exist (nothing is written).
    ///
    /// When `idempotency_key` is set and this user already completed a purchase
    /// with the same key, the new Payment is rolled back and the original
    /// Purchase is returned as [`PurchaseOutcome::Replayed`]. If that original
    /// Purchase was for another audio item, nothing is written and it is
    /// returned as [`PurchaseOutcome::KeyReused`]. Without a key, repeated
    /// submissions create repeated pairs.
    pub async fn create_with_payment(
        pool: &PgPool,
        input: &CreatePurchase,
    ) -> Result<Option<PurchaseOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let payment_query = format!(
            "INSERT INTO payments (user_id, amount_cents)
             SELECT $1, price_cents FROM audios WHERE id = $2
             RETURNING {}",
            payment_repo::COLUMNS
        );
        let Some(payment) = sqlx::query_as::<_, Payment>(&payment_query)
            .bind(input.user_id)
            .bind(input.audio_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        let purchase_query = format!(
            "INSERT INTO purchases (amount_cents, user_id, audio_id, payment_id, idempotency_key)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (user_id, idempotency_key) WHERE idempotency_key IS NOT NULL
             DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Purchase>(&purchase_query)
            .bind(payment.amount_cents)
            .bind(input.user_id)
            .bind(input.audio_id)
            .bind(payment.id)
            .bind(&input.idempotency_key)
            .fetch_optional(&mut *tx)
            .await?;

        match inserted {
            Some(purchase) => {
                tx.commit().await?;
                Ok(Some(PurchaseOutcome::Recorded { payment, purchase }))
            }
            None => {
                // Only reachable with a key: the conflict target ignores NULL keys.
                tx.rollback().await?;
                let key = input.idempotency_key.as_deref().unwrap_or_default();
                let existing = Self::find_by_idempotency_key(pool, input.user_id, key)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?;
                if existing.audio_id != input.audio_id {
                    tracing::warn!(
                        user_id = input.user_id,
                        purchase_id = existing.id,
                        audio_id = input.audio_id,
                        original_audio_id = existing.audio_id,
                        "Idempotency key reused for a different audio item"
                    );
                    return Ok(Some(PurchaseOutcome::KeyReused(existing)));
                }
                tracing::info!(
                    user_id = input.user_id,
                    purchase_id = existing.id,
                    "Replayed purchase for repeated idempotency key"
                );
                Ok(Some(PurchaseOutcome::Replayed(existing)))
            }
        }
    }

    pub async fn find_by_idempotency_key(
        pool: &PgPool,
        user_id: DbId,
        key: &str,
    ) -> Result<Option<Purchase>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM purchases WHERE user_id = $1 AND idempotency_key = $2"
        );
        sqlx::query_as::<_, Purchase>(&query)
            .bind(user_id)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// True iff a purchase exists for this exact (user, audio) pair.
    ///
    /// This is the single predicate gating downloads.
    pub async fn exists_for(
        pool: &PgPool,
        user_id: DbId,
        audio_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM purchases WHERE user_id = $1 AND audio_id = $2)",
        )
        .bind(user_id)
        .bind(audio_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// List a user's purchases, most recent first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Purchase>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM purchases WHERE user_id = $1 ORDER BY purchased_at DESC, id DESC"
        );
        sqlx::query_as::<_, Purchase>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Every purchase with buyer and item names, most recent first.
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<PurchaseSummary>, sqlx::Error> {
        sqlx::query_as::<_, PurchaseSummary>(
            "SELECT p.id, p.amount_cents, p.purchased_at, p.user_id, u.username,
                    p.audio_id, a.title AS audio_title
             FROM purchases p
             JOIN users u ON u.id = p.user_id
             JOIN audios a ON a.id = p.audio_id
             ORDER BY p.purchased_at DESC, p.id DESC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM purchases")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
