//! Faculty entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use rubric_core::types::{DbId, Timestamp};

/// A row from the `faculties` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Faculty {
    pub id: DbId,
    pub name: String,
    pub department: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateFaculty {
    pub name: String,
    pub department: String,
}
