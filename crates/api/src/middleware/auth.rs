//! Session-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use rubric_core::access::Principal;
use rubric_core::error::CoreError;
use rubric_core::types::DbId;
use rubric_db::models::user::User;
use rubric_db::repositories::UserRepo;

use crate::auth::session::{validate_token, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// The logged-in user, resolved from the session cookie or a Bearer token.
///
/// The user row is reloaded on every request, so profile edits and admin
/// flag changes apply immediately.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The current user row.
    pub user: User,
}

impl Principal for AuthUser {
    fn user_id(&self) -> DbId {
        self.user_id
    }

    fn is_admin(&self) -> bool {
        self.user.is_admin
    }
}

/// Pull the session token from the cookie, falling back to the
/// `Authorization: Bearer` header.
fn session_token(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts)
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Not logged in".into())))?;

        let claims = validate_token(&token, &state.config.session).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Session user no longer exists".into()))
            })?;

        Ok(AuthUser {
            user_id: user.id,
            user,
        })
    }
}

/// The logged-in user if there is one.
///
/// Pages that behave differently for visitors (home, login, signup) use
/// this instead of [`AuthUser`]. Database failures still reject.
pub struct MaybeUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(MaybeUser(Some(user))),
            Err(AppError::Core(CoreError::Unauthorized(_))) => Ok(MaybeUser(None)),
            Err(e) => Err(e),
        }
    }
}
