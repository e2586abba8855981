//! Audio item entity model and DTOs.
//!
//! Audio rows are created by admin ingestion and never updated in place.

use serde::Serialize;
use sqlx::FromRow;
use rubric_core::level::Level;
use rubric_core::price::Price;
use rubric_core::types::{DbId, Timestamp};

/// A row from the `audios` table.
#[derive(Debug, Clone, FromRow)]
pub struct Audio {
    pub id: DbId,
    pub title: String,
    pub price_cents: i64,
    pub filename: String,
    pub uploaded_at: Timestamp,
    pub course_id: DbId,
    pub level: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Audio {
    /// Price as a domain value. The `price_cents >= 0` CHECK constraint
    /// guarantees this never fails for a stored row.
    pub fn price(&self) -> Price {
        Price::from_cents(self.price_cents).unwrap_or(Price::ZERO)
    }
}

/// External-facing representation of an audio item.
#[derive(Debug, Clone, Serialize)]
pub struct AudioResponse {
    pub id: DbId,
    pub title: String,
    pub price: Price,
    pub price_cents: i64,
    pub filename: String,
    pub uploaded_at: Timestamp,
    pub course_id: DbId,
    pub level: i16,
}

impl From<&Audio> for AudioResponse {
    fn from(audio: &Audio) -> Self {
        Self {
            id: audio.id,
            title: audio.title.clone(),
            price: audio.price(),
            price_cents: audio.price_cents,
            filename: audio.filename.clone(),
            uploaded_at: audio.uploaded_at,
            course_id: audio.course_id,
            level: audio.level,
        }
    }
}

/// DTO for inserting a newly ingested audio file.
#[derive(Debug, Clone)]
pub struct CreateAudio {
    pub title: String,
    pub price: Price,
    pub filename: String,
    pub course_id: DbId,
    pub level: Level,
}
