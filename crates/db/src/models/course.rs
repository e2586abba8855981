//! Course entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use rubric_core::types::{DbId, Timestamp};

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub name: String,
    pub faculty_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateCourse {
    pub name: String,
    pub faculty_id: DbId,
}
