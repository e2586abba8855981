//! Handlers for the admin dashboard and audio uploads.
//!
//! Every handler takes [`RequireAdmin`], so non-admins are rejected before
//! any handler code runs.

use axum::extract::{Multipart, Path, State};
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use rubric_core::level::Level;
use rubric_core::price::Price;
use rubric_core::types::DbId;
use rubric_db::models::audio::AudioResponse;
use rubric_db::models::course::Course;
use rubric_db::models::faculty::Faculty;
use rubric_db::models::purchase::PurchaseSummary;
use rubric_db::repositories::{AudioRepo, FacultyRepo, PaymentRepo, PurchaseRepo};
use serde::Serialize;

use crate::error::{AppResult, RedirectOnError};
use crate::handlers::catalog::FacultyView;
use crate::handlers::multipart::MultipartForm;
use crate::middleware::flash::{redirect_with_notice, Notice};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{page, Page};
use crate::services::catalog;
use crate::services::ingestion::{ingest_audio, AudioUploadForm};
use crate::state::AppState;

const UPLOAD_SUCCESS_NOTICE: &str = "Audio uploaded successfully!";

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub audios: Vec<AudioResponse>,
    pub purchases: Vec<PurchaseSummary>,
    /// Sum of all recorded payments.
    pub total_amount: Price,
    pub total_purchases: i64,
}

#[derive(Debug, Serialize)]
pub struct AdminLevelView {
    pub level: Level,
    pub faculties: Vec<Faculty>,
}

#[derive(Debug, Serialize)]
pub struct UploadFormView {
    pub level: Level,
    pub faculty_id: DbId,
    pub course: Course,
    pub audios: Vec<AudioResponse>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /admin
///
/// All audio items, all purchases, the total paid and the purchase count.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    jar: CookieJar,
) -> AppResult<Page<AdminDashboard>> {
    let audios = AudioRepo::list(&state.pool).await?;
    let purchases = PurchaseRepo::list_summaries(&state.pool).await?;
    let total_amount = Price::from_cents(PaymentRepo::total_amount_cents(&state.pool).await?)?;
    let total_purchases = PurchaseRepo::count(&state.pool).await?;

    Ok(page(
        jar,
        AdminDashboard {
            audios: audios.iter().map(AudioResponse::from).collect(),
            purchases,
            total_amount,
            total_purchases,
        },
    ))
}

/// GET /admin/levels/{level}
///
/// Every faculty, for upload navigation.
pub async fn level_faculties(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    jar: CookieJar,
    Path(level): Path<i32>,
) -> AppResult<Page<AdminLevelView>> {
    let level = catalog::level_from_path(level)?;
    let faculties = FacultyRepo::list(&state.pool).await?;
    Ok(page(jar, AdminLevelView { level, faculties }))
}

/// GET /admin/levels/{level}/faculty/{faculty_id}
pub async fn faculty_courses(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
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

/// GET /admin/levels/{level}/faculty/{faculty_id}/courses/{course_id}
///
/// Upload form for a course, with the audio already attached to it.
pub async fn course_upload_form(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    jar: CookieJar,
    Path((level, faculty_id, course_id)): Path<(i32, DbId, DbId)>,
) -> AppResult<Page<UploadFormView>> {
    let level = catalog::level_from_path(level)?;
    let (course, audios) = catalog::course_audios(&state.pool, course_id).await?;
    catalog::ensure_course_in_faculty(&course, faculty_id)?;
    Ok(page(
        jar,
        UploadFormView {
            level,
            faculty_id,
            course,
            audios: audios.iter().map(AudioResponse::from).collect(),
        },
    ))
}

/// POST /admin/levels/{level}/faculty/{faculty_id}/courses/{course_id}/upload
///
/// Multipart fields: `title`, `price`, `file`. Level and course come from
/// the path; a course outside the path's faculty is not found. Returns to
/// the course upload form.
pub async fn upload_to_course(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    jar: CookieJar,
    Path((level, faculty_id, course_id)): Path<(i32, DbId, DbId)>,
    multipart: Multipart,
) -> AppResult<Response> {
    let back = format!("/admin/levels/{level}/faculty/{faculty_id}/courses/{course_id}");
    catalog::course_of_faculty(&state.pool, faculty_id, course_id).await?;

    let mut parts = MultipartForm::read(multipart).await?;
    let form = AudioUploadForm {
        title: parts.take_text("title"),
        price: parts.take_text("price"),
        course_id: Some(course_id.to_string()),
        level: Some(level.to_string()),
        file: parts.take_file("file"),
    };

    ingest_audio(
        &state.pool,
        state.store.as_ref(),
        &state.config.uploads,
        &admin,
        form,
    )
    .await
    .or_redirect(&back)?;

    Ok(redirect_with_notice(jar, &back, Notice::success(UPLOAD_SUCCESS_NOTICE)))
}

/// POST /admin/upload and POST /admin/upload_audio
///
/// Multipart fields: `title`, `price`, `course_id`, `level`, `file`.
/// Returns to the dashboard.
pub async fn upload_audio(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    jar: CookieJar,
    multipart: Multipart,
) -> AppResult<Response> {
    let mut parts = MultipartForm::read(multipart).await?;
    let form = AudioUploadForm {
        title: parts.take_text("title"),
        price: parts.take_text("price"),
        course_id: parts.take_text("course_id"),
        level: parts.take_text("level"),
        file: parts.take_file("file"),
    };

    ingest_audio(
        &state.pool,
        state.store.as_ref(),
        &state.config.uploads,
        &admin,
        form,
    )
    .await
    .or_redirect("/admin")?;

    Ok(redirect_with_notice(jar, "/admin", Notice::success(UPLOAD_SUCCESS_NOTICE)))
}
