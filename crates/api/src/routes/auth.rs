//! Routes for the session lifecycle, home page and profile.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::{auth, home, profile};
use crate::state::AppState;

/// ```text
/// GET        /           -> index
/// GET        /index      -> index
/// GET, POST  /login      -> login_page, login
/// GET        /logout     -> logout
/// GET, POST  /signup     -> signup_page, signup
/// GET, POST  /profile    -> profile_page, update_profile (multipart)
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/index", get(home::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route(
            "/profile",
            get(profile::profile_page)
                .post(profile::update_profile)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}
