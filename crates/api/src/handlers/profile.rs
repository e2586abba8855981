//! Handlers for the current user's profile.

use axum::extract::{Multipart, State};
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use rubric_db::models::user::UserResponse;

use crate::error::{AppResult, RedirectOnError};
use crate::handlers::multipart::MultipartForm;
use crate::middleware::auth::AuthUser;
use crate::middleware::flash::{redirect_with_notice, Notice};
use crate::response::{page, Page};
use crate::services::profile::{update_profile as apply_profile_update, ProfileForm};
use crate::state::AppState;

/// GET /profile
pub async fn profile_page(user: AuthUser, jar: CookieJar) -> Page<UserResponse> {
    page(jar, UserResponse::from(&user.user))
}

/// POST /profile
///
/// Multipart fields: `username`, `email`, `bio`, optional `profile_picture`.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    jar: CookieJar,
    multipart: Multipart,
) -> AppResult<Response> {
    let mut parts = MultipartForm::read(multipart).await?;
    let form = ProfileForm {
        username: parts.take_text("username").unwrap_or_default(),
        email: parts.take_text("email").unwrap_or_default(),
        bio: parts.take_text("bio").unwrap_or_default(),
        picture: parts.take_file("profile_picture"),
    };

    let update = apply_profile_update(
        &state.pool,
        state.store.as_ref(),
        &state.config.uploads,
        &user.user,
        form,
    )
    .await
    .or_redirect("/profile")?;

    let message = match &update.saved_picture {
        Some(name) => format!("Profile picture saved as {name}. Your changes have been saved."),
        None => "Your changes have been saved.".to_string(),
    };
    Ok(redirect_with_notice(jar, "/profile", Notice::success(message)))
}
