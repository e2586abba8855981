//! Admin-only routes. Every handler requires the admin flag.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// ```text
/// GET  /admin                                                          -> dashboard
/// GET  /admin/levels/{level}                                           -> level_faculties
/// GET  /admin/levels/{level}/faculty/{faculty_id}                      -> faculty_courses
/// GET  /admin/levels/{level}/faculty/{faculty_id}/courses/{course_id}  -> course_upload_form
/// POST /admin/levels/{level}/faculty/{faculty_id}/courses/{course_id}/upload
///                                                                      -> upload_to_course
/// POST /admin/upload                                                   -> upload_audio
/// POST /admin/upload_audio                                             -> upload_audio
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    let uploads = Router::new()
        .route(
            "/admin/levels/{level}/faculty/{faculty_id}/courses/{course_id}/upload",
            post(admin::upload_to_course),
        )
        .route("/admin/upload", post(admin::upload_audio))
        .route("/admin/upload_audio", post(admin::upload_audio))
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/admin/levels/{level}", get(admin::level_faculties))
        .route(
            "/admin/levels/{level}/faculty/{faculty_id}",
            get(admin::faculty_courses),
        )
        .route(
            "/admin/levels/{level}/faculty/{faculty_id}/courses/{course_id}",
            get(admin::course_upload_form),
        )
        .merge(uploads)
}
