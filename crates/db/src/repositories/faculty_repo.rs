//! Repository for the `faculties` table.

use rubric_core::level::Level;
use rubric_core::types::DbId;
use sqlx::PgPool;

use crate::models::faculty::{CreateFaculty, Faculty};

const COLUMNS: &str = "id, name, department, created_at, updated_at";

/// Read access to faculties plus the inserts used by seeding.
pub struct FacultyRepo;

impl FacultyRepo {
    /// Insert a faculty, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFaculty) -> Result<Faculty, sqlx::Error> {
        let query = format!(
            "INSERT INTO faculties (name, department)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Faculty>(&query)
            .bind(&input.name)
            .bind(&input.department)
            .fetch_one(pool)
            .await
    }

    /// Insert a faculty unless one with the same name exists.
    ///
    /// Returns the row and whether it was newly inserted.
    pub async fn create_if_absent(
        pool: &PgPool,
        input: &CreateFaculty,
    ) -> Result<(Faculty, bool), sqlx::Error> {
        let insert = format!(
            "INSERT INTO faculties (name, department)
             VALUES ($1, $2)
             ON CONFLICT (name) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Faculty>(&insert)
            .bind(&input.name)
            .bind(&input.department)
            .fetch_optional(pool)
            .await?;

        if let Some(faculty) = inserted {
            return Ok((faculty, true));
        }

        let select = format!("SELECT {COLUMNS} FROM faculties WHERE name = $1");
        let existing = sqlx::query_as::<_, Faculty>(&select)
            .bind(&input.name)
            .fetch_one(pool)
            .await?;
        Ok((existing, false))
    }

    /// Find a faculty by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Faculty>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faculties WHERE id = $1");
        sqlx::query_as::<_, Faculty>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every faculty ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Faculty>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faculties ORDER BY name, id");
        sqlx::query_as::<_, Faculty>(&query).fetch_all(pool).await
    }

    /// List faculties offering at least one course that has at least one
    /// audio item tagged with `level`.
    pub async fn list_by_level(pool: &PgPool, level: Level) -> Result<Vec<Faculty>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM faculties f
             WHERE EXISTS (
                 SELECT 1 FROM courses c
                 JOIN audios a ON a.course_id = c.id
                 WHERE c.faculty_id = f.id AND a.level = $1
             )
             ORDER BY f.name, f.id"
        );
        sqlx::query_as::<_, Faculty>(&query)
            .bind(level.as_i16())
            .fetch_all(pool)
            .await
    }
}
