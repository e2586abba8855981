//! Handlers for login, logout and signup.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::auth::session::{issue_token, removal_cookie, session_cookie};
use crate::error::{AppError, AppResult, RedirectOnError};
use crate::middleware::auth::MaybeUser;
use crate::middleware::flash::{redirect_with_notice, Notice};
use crate::response::page;
use crate::services::auth::{authenticate, register, SignupForm};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / view types
// ---------------------------------------------------------------------------

/// Form body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Checkbox value; any of `y`, `on`, `true`, `1` means checked.
    #[serde(default)]
    pub remember: Option<String>,
}

impl LoginForm {
    fn remember(&self) -> bool {
        matches!(
            self.remember.as_deref().map(str::trim),
            Some("y" | "on" | "true" | "1")
        )
    }
}

#[derive(Debug, Serialize)]
pub struct FormView {
    pub title: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /login
///
/// Logged-in users are sent home.
pub async fn login_page(MaybeUser(user): MaybeUser, jar: CookieJar) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    page(jar, FormView { title: "Sign In" }).into_response()
}

/// POST /login
///
/// Check credentials, set the session cookie and go home. Bad credentials
/// go back to the login page with a notice.
pub async fn login(
    State(state): State<AppState>,
    MaybeUser(current): MaybeUser,
    jar: CookieJar,
    Form(input): Form<LoginForm>,
) -> AppResult<Response> {
    if current.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let user = authenticate(&state.pool, &input.email, &input.password)
        .await
        .or_redirect("/login")?;

    let remember = input.remember();
    let token = issue_token(user.id, remember, &state.config.session)
        .map_err(|e| AppError::InternalError(format!("Session token error: {e}")))?;

    tracing::info!(user_id = user.id, remember, "User logged in");
    let jar = jar.add(session_cookie(token, remember, &state.config.session));
    Ok((jar, Redirect::to("/")).into_response())
}

/// GET /logout
///
/// Clear the session cookie and go home.
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.remove(removal_cookie()), Redirect::to("/"))
}

/// GET /signup
pub async fn signup_page(MaybeUser(user): MaybeUser, jar: CookieJar) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    page(jar, FormView { title: "Register" }).into_response()
}

/// POST /signup
///
/// Create the account and send the visitor to the login page.
pub async fn signup(
    State(state): State<AppState>,
    MaybeUser(current): MaybeUser,
    jar: CookieJar,
    Form(input): Form<SignupForm>,
) -> AppResult<Response> {
    if current.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    register(&state.pool, &input).await.or_redirect("/signup")?;

    Ok(redirect_with_notice(
        jar,
        "/login",
        Notice::success("Congratulations, you are now a registered user!"),
    ))
}
