use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use rubric_core::error::CoreError;
use serde_json::json;

use crate::middleware::flash::{redirect_with_notice, Notice};

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// Notice shown after bouncing an unauthenticated visitor to the login page.
pub const LOGIN_REQUIRED_NOTICE: &str = "Please log in to access this page.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses,
/// except for [`AppError::Redirect`] and unauthenticated access, which
/// answer with a redirect and a flash notice.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `rubric_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),

    /// A user-correctable failure on a form endpoint: redirect to `to` and
    /// show `notice` there.
    #[error("Redirect to {to}: {}", .notice.message)]
    Redirect { to: String, notice: Notice },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Convert a user-correctable error into a redirect to `to` with a
    /// danger notice. Anything else is returned unchanged.
    ///
    /// Not-found, authorization and infrastructure failures keep their own
    /// responses.
    pub fn redirect_to(self, to: &str) -> AppError {
        let message = match &self {
            AppError::Core(
                CoreError::InvalidCredentials
                | CoreError::PaymentRequired(_)
                | CoreError::InvalidFormat(_)
                | CoreError::Validation(_)
                | CoreError::Conflict(_),
            ) => notice_text(&self),
            AppError::BadRequest(msg) => msg.clone(),
            _ => return self,
        };
        AppError::Redirect {
            to: to.to_string(),
            notice: Notice::danger(message),
        }
    }
}

/// The user-facing message for a notice-worthy error, without the
/// `Display` prefix of the variant.
fn notice_text(err: &AppError) -> String {
    match err {
        AppError::Core(CoreError::InvalidCredentials) => CoreError::InvalidCredentials.to_string(),
        AppError::Core(
            CoreError::PaymentRequired(msg)
            | CoreError::InvalidFormat(msg)
            | CoreError::Validation(msg)
            | CoreError::Conflict(msg),
        ) => msg.clone(),
        other => other.to_string(),
    }
}

/// Extension for handler results that should redirect on user error.
pub trait RedirectOnError<T> {
    /// See [`AppError::redirect_to`].
    fn or_redirect(self, to: &str) -> AppResult<T>;
}

impl<T, E: Into<AppError>> RedirectOnError<T> for Result<T, E> {
    fn or_redirect(self, to: &str) -> AppResult<T> {
        self.map_err(|e| e.into().redirect_to(to))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- Redirects ---
            AppError::Redirect { to, notice } => {
                return redirect_with_notice(CookieJar::new(), to, notice.clone());
            }
            AppError::Core(CoreError::Unauthorized(msg)) => {
                tracing::debug!(reason = %msg, "Unauthenticated request, redirecting to login");
                return redirect_with_notice(
                    CookieJar::new(),
                    LOGIN_PATH,
                    Notice::info(LOGIN_REQUIRED_NOTICE),
                );
            }

            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_CREDENTIALS",
                    core.to_string(),
                ),
                CoreError::PaymentRequired(msg) => {
                    (StatusCode::PAYMENT_REQUIRED, "PAYMENT_REQUIRED", msg.clone())
                }
                CoreError::InvalidFormat(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_FORMAT", msg.clone())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
