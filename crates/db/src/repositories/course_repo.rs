//! Repository for the `courses` table.

use rubric_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CreateCourse};

const COLUMNS: &str = "id, name, faculty_id, created_at, updated_at";

pub struct CourseRepo;

impl CourseRepo {
    /// Insert a course. Fails with a foreign key violation if the faculty is missing.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (name, faculty_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.name)
            .bind(input.faculty_id)
            .fetch_one(pool)
            .await
    }

    /// Insert a course unless the faculty already has one with that name.
    ///
    /// Returns `true` if a row was inserted.
    pub async fn create_if_absent(pool: &PgPool, input: &CreateCourse) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO courses (name, faculty_id)
             VALUES ($1, $2)
             ON CONFLICT (faculty_id, name) DO NOTHING",
        )
        .bind(&input.name)
        .bind(input.faculty_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the courses of a faculty ordered by name.
    pub async fn list_by_faculty(
        pool: &PgPool,
        faculty_id: DbId,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses WHERE faculty_id = $1 ORDER BY name, id"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(faculty_id)
            .fetch_all(pool)
            .await
    }
}
