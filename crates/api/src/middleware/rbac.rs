//! Access-control extractors.
//!
//! Each extractor wraps [`AuthUser`] and runs its capability check before
//! the handler body, so a rejected request never reaches a side effect.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use rubric_core::access::ensure_admin;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an admin user. Visitors are redirected to the login page;
/// logged-in non-admins get 403 Forbidden.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if let Err(e) = ensure_admin(&user) {
            tracing::warn!(
                user_id = user.user_id,
                path = %parts.uri.path(),
                "Non-admin user denied admin route"
            );
            return Err(e.into());
        }
        Ok(RequireAdmin(user))
    }
}
