//! Read access to the `payments` table.
//!
//! Payments are only ever inserted by
//! [`PurchaseRepo::create_with_payment`](super::PurchaseRepo::create_with_payment).

use rubric_core::types::DbId;
use sqlx::PgPool;

use crate::models::payment::Payment;

pub(crate) const COLUMNS: &str = "id, user_id, amount_cents, paid_at, created_at, updated_at";

pub struct PaymentRepo;

impl PaymentRepo {
    /// List a user's payments, most recent first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments WHERE user_id = $1 ORDER BY paid_at DESC, id DESC"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Sum of every recorded payment, in cents.
    pub async fn total_amount_cents(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM payments")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
