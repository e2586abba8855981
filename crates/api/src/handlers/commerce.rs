//! Handlers for buying and downloading audio items.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use rubric_core::error::CoreError;
use rubric_core::types::DbId;
use rubric_core::uploads::content_type_for;
use rubric_db::models::audio::AudioResponse;
use rubric_db::repositories::{AudioRepo, PurchaseRepo};
use serde::{Deserialize, Serialize};
use tokio_util::io::ReaderStream;

use crate::error::{AppError, AppResult, RedirectOnError};
use crate::middleware::auth::AuthUser;
use crate::middleware::flash::{redirect_with_notice, Notice};
use crate::response::{page, Page};
use crate::services::commerce;
use crate::services::ingestion::storage_error;
use crate::state::AppState;

/// Form body for `POST /purchase/{audio_id}`.
#[derive(Debug, Default, Deserialize)]
pub struct PurchaseForm {
    /// Client-chosen token; resubmitting it does not buy twice.
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PurchaseView {
    pub audio: AudioResponse,
    pub already_purchased: bool,
}

/// GET /purchase/{audio_id}
///
/// Confirmation page for buying an audio item.
pub async fn purchase_page(
    State(state): State<AppState>,
    user: AuthUser,
    jar: CookieJar,
    Path(audio_id): Path<DbId>,
) -> AppResult<Page<PurchaseView>> {
    let audio = AudioRepo::find_by_id(&state.pool, audio_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Audio",
            id: audio_id,
        })?;
    let already_purchased = PurchaseRepo::exists_for(&state.pool, user.user_id, audio_id).await?;

    Ok(page(
        jar,
        PurchaseView {
            audio: AudioResponse::from(&audio),
            already_purchased,
        },
    ))
}

/// POST /purchase/{audio_id}
///
/// Record the payment and purchase, then continue to the download.
pub async fn purchase(
    State(state): State<AppState>,
    user: AuthUser,
    jar: CookieJar,
    Path(audio_id): Path<DbId>,
    Form(input): Form<PurchaseForm>,
) -> AppResult<Response> {
    let outcome = commerce::purchase(&state.pool, &user, audio_id, input.idempotency_key)
        .await
        .or_redirect(&format!("/purchase/{audio_id}"))?;

    let target = format!("/download/{}", outcome.purchase().audio_id);
    Ok(redirect_with_notice(
        jar,
        &target,
        Notice::success("Purchase successful!"),
    ))
}

/// GET /download/{audio_id}
///
/// Stream a purchased file as an attachment. Without a purchase the user
/// is sent home with a notice.
pub async fn download(
    State(state): State<AppState>,
    user: AuthUser,
    Path(audio_id): Path<DbId>,
) -> AppResult<Response> {
    let audio = commerce::authorize_download(&state.pool, &user, audio_id)
        .await
        .or_redirect("/")?;

    let blob = state.store.open(&audio.filename).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            tracing::error!(audio_id, filename = %audio.filename, "Audio file missing from storage");
            AppError::Core(CoreError::NotFound {
                entity: "AudioFile",
                id: audio_id,
            })
        } else {
            storage_error(e)
        }
    })?;

    tracing::info!(user_id = user.user_id, audio_id, bytes = blob.len, "Serving download");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&audio.filename))
        .header(header::CONTENT_LENGTH, blob.len.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", audio.filename),
        )
        .body(Body::from_stream(ReaderStream::new(blob.reader)))
        .map_err(|e| AppError::InternalError(e.to_string()))
}
