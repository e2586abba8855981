//! Handlers for browsing the catalog by level.

use axum::extract::{Path, State};
use axum_extra::extract::cookie::CookieJar;
use rubric_core::level::Level;
use rubric_core::types::DbId;
use rubric_db::models::audio::AudioResponse;
use rubric_db::models::course::Course;
use rubric_db::models::faculty::Faculty;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::{page, Page};
use crate::services::catalog;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct LevelView {
    pub level: Level,
    pub faculties: Vec<Faculty>,
}

#[derive(Debug, Serialize)]
pub struct FacultyView {
    pub level: Level,
    pub faculty: Faculty,
    pub courses: Vec<Course>,
}

#[derive(Debug, Serialize)]
pub struct CourseView {
    pub level: Level,
    pub faculty_id: DbId,
    pub course: Course,
    pub audios: Vec<AudioResponse>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /levels/{level}
///
/// Faculties with at least one audio item at this level.
pub async fn level_faculties(
    State(state): State<AppState>,
    _user: AuthUser,
    jar: CookieJar,
    Path(level): Path<i32>,
) -> AppResult<Page<LevelView>> {
    let level = catalog::level_from_path(level)?;
    let faculties = catalog::faculties_at_level(&state.pool, level).await?;
    Ok(page(jar, LevelView { level, faculties }))
}

/// GET /levels/{level}/faculty/{faculty_id}
pub async fn faculty_courses(
    State(state): State<AppState>,
    _user: AuthUser,
    jar: CookieJar,
    Path((level, faculty_id)): Path<(i32, DbId)>,
) -> AppResult<Page<FacultyView>> {
    let level = catalog::level_from_path(level)?;
    let (faculty, courses) = catalog::faculty_courses(&state.pool, faculty_id).await?;
    Ok(page(
        jar,
        FacultyView {
            level,
            faculty,
            courses,
        },
    ))
}

/// GET /levels/{level}/faculty/{faculty_id}/courses/{course_id}
pub async fn course_audios(
    State(state): State<AppState>,
    _user: AuthUser,
    jar: CookieJar,
    Path((level, faculty_id, course_id)): Path<(i32, DbId, DbId)>,
) -> AppResult<Page<CourseView>> {
    let level = catalog::level_from_path(level)?;
    let (course, audios) = catalog::course_audios(&state.pool, course_id).await?;
    Ok(page(
        jar,
        CourseView {
            level,
            faculty_id,
            course,
            audios: audios.iter().map(AudioResponse::from).collect(),
        },
    ))
}
