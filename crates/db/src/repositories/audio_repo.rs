//! Repository for the `audios` table.

use rubric_core::types::DbId;
use sqlx::PgPool;

use crate::models::audio::{Audio, CreateAudio};

const COLUMNS: &str = "id, title, price_cents, filename, uploaded_at, course_id, level, \
                        created_at, updated_at";

/// Audio rows are insert-only; there is no update or delete.
pub struct AudioRepo;

impl AudioRepo {
    /// Insert a newly ingested audio item.
    pub async fn create(pool: &PgPool, input: &CreateAudio) -> Result<Audio, sqlx::Error> {
        let query = format!(
            "INSERT INTO audios (title, price_cents, filename, course_id, level)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Audio>(&query)
            .bind(&input.title)
            .bind(input.price.cents())
            .bind(&input.filename)
            .bind(input.course_id)
            .bind(input.level.as_i16())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Audio>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM audios WHERE id = $1");
        sqlx::query_as::<_, Audio>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the audio items of a course, oldest upload first.
    pub async fn list_by_course(pool: &PgPool, course_id: DbId) -> Result<Vec<Audio>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audios WHERE course_id = $1 ORDER BY uploaded_at, id"
        );
        sqlx::query_as::<_, Audio>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// List every audio item, most recent upload first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Audio>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM audios ORDER BY uploaded_at DESC, id DESC");
        sqlx::query_as::<_, Audio>(&query).fetch_all(pool).await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM audios")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
