//! Routes for browsing the catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// ```text
/// GET /levels/{level}                                             -> level_faculties
/// GET /levels/{level}/faculty/{faculty_id}                        -> faculty_courses
/// GET /levels/{level}/faculty/{faculty_id}/courses/{course_id}    -> course_audios
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/levels/{level}", get(catalog::level_faculties))
        .route(
            "/levels/{level}/faculty/{faculty_id}",
            get(catalog::faculty_courses),
        )
        .route(
            "/levels/{level}/faculty/{faculty_id}/courses/{course_id}",
            get(catalog::course_audios),
        )
}
