pub mod admin;
pub mod auth;
pub mod catalog;
pub mod commerce;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the page and form route tree.
///
/// Route hierarchy:
///
/// ```text
/// /, /index                                         home (public)
/// /login, /logout, /signup                          session lifecycle (public)
/// /profile                                          view, edit (requires login)
///
/// /levels/{level}                                   faculties at level
/// /levels/{level}/faculty/{faculty_id}              courses of faculty
/// /levels/{level}/faculty/{fid}/courses/{cid}       audio of course
///
/// /purchase/{audio_id}                              confirm, buy
/// /download/{audio_id}                              gated file stream
///
/// /admin                                            dashboard (admin only)
/// /admin/levels/...                                 upload navigation
/// /admin/levels/.../courses/{cid}/upload            upload into course
/// /admin/upload, /admin/upload_audio                upload with course in form
/// ```
///
/// `max_upload_bytes` bounds the body of multipart routes.
pub fn app_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(auth::router(max_upload_bytes))
        .merge(catalog::router())
        .merge(commerce::router())
        .merge(admin::router(max_upload_bytes))
}
