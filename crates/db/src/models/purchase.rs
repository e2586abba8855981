//! Purchase entity model and the outcome of a buy action.

use serde::Serialize;
use sqlx::FromRow;
use rubric_core::types::{DbId, Timestamp};

use crate::models::payment::Payment;

/// A row from the `purchases` table. Proof that a user paid for an audio item.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Purchase {
    pub id: DbId,
    pub amount_cents: i64,
    pub purchased_at: Timestamp,
    pub user_id: DbId,
    pub audio_id: DbId,
    pub payment_id: DbId,
    pub idempotency_key: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Purchase joined with buyer and item names, for the admin dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PurchaseSummary {
    pub id: DbId,
    pub amount_cents: i64,
    pub purchased_at: Timestamp,
    pub user_id: DbId,
    pub username: String,
    pub audio_id: DbId,
    pub audio_title: String,
}

/// DTO for a buy action.
#[derive(Debug, Clone)]
pub struct CreatePurchase {
    pub user_id: DbId,
    pub audio_id: DbId,
    /// Client-supplied key; a repeat with the same key returns the original purchase.
    pub idempotency_key: Option<String>,
}

/// Result of [`PurchaseRepo::create_with_payment`](crate::repositories::PurchaseRepo::create_with_payment).
#[derive(Debug, Clone)]
pub enum PurchaseOutcome {
    /// A new Payment + Purchase pair was committed.
    Recorded { payment: Payment, purchase: Purchase },
    /// The idempotency key was already used by this user for the same
    /// audio item; nothing was written.
    Replayed(Purchase),
    /// The idempotency key was already used by this user for a different
    /// audio item; nothing was written. Holds that earlier purchase.
    KeyReused(Purchase),
}

impl PurchaseOutcome {
    pub fn purchase(&self) -> &Purchase {
        match self {
            PurchaseOutcome::Recorded { purchase, .. } => purchase,
            PurchaseOutcome::Replayed(purchase) | PurchaseOutcome::KeyReused(purchase) => {
                purchase
            }
        }
    }
}
