//! Routes for purchases and downloads.

use axum::routing::get;
use axum::Router;

use crate::handlers::commerce;
use crate::state::AppState;

/// ```text
/// GET, POST  /purchase/{audio_id}   -> purchase_page, purchase
/// GET        /download/{audio_id}   -> download
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/purchase/{audio_id}",
            get(commerce::purchase_page).post(commerce::purchase),
        )
        .route("/download/{audio_id}", get(commerce::download))
}
