//! Credential checks and account registration.

use rubric_core::error::CoreError;
use rubric_db::models::user::{CreateUser, User};
use rubric_db::repositories::UserRepo;
use rubric_db::DbPool;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::services::validation_error;

/// Submitted signup form.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SignupForm {
    #[validate(length(min = 1, max = 64, message = "Username must be 1 to 64 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords must match"))]
    pub confirm_password: String,
}

/// Check an email/password pair.
///
/// An unknown email and a wrong password fail identically with
/// [`CoreError::InvalidCredentials`].
pub async fn authenticate(pool: &DbPool, email: &str, password: &str) -> AppResult<User> {
    let Some(user) = UserRepo::find_by_email(pool, email.trim()).await? else {
        tracing::debug!("Login attempt for unknown email");
        return Err(CoreError::InvalidCredentials.into());
    };

    let matches = verify_password(password, &user.password_hash).map_err(|e| {
        AppError::InternalError(format!("Stored password hash is unreadable: {e}"))
    })?;
    if !matches {
        tracing::debug!(user_id = user.id, "Login attempt with wrong password");
        return Err(CoreError::InvalidCredentials.into());
    }

    Ok(user)
}

/// Create an account from a signup form.
///
/// Usernames and emails are unique; a taken value fails with
/// [`CoreError::Conflict`] naming the field to change.
pub async fn register(pool: &DbPool, form: &SignupForm) -> AppResult<User> {
    form.validate().map_err(|e| validation_error(&e))?;
    validate_password_strength(&form.password, MIN_PASSWORD_LENGTH)
        .map_err(CoreError::Validation)?;

    let username = form.username.trim();
    let email = form.email.trim();

    if UserRepo::find_by_username(pool, username).await?.is_some() {
        return Err(CoreError::Conflict("Please use a different username.".into()).into());
    }
    if UserRepo::find_by_email(pool, email).await?.is_some() {
        return Err(CoreError::Conflict("Please use a different email address.".into()).into());
    }

    let password_hash = hash_password(&form.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        },
    )
    .await
    .map_err(unique_violation_to_conflict)?;

    tracing::info!(user_id = user.id, username = %user.username, "Registered user");
    Ok(user)
}

/// Map a lost uniqueness race on `users` to the same conflict the
/// pre-checks report.
pub(crate) fn unique_violation_to_conflict(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.constraint() {
            Some("uq_users_username") => {
                return CoreError::Conflict("Please use a different username.".into()).into();
            }
            Some("uq_users_email") => {
                return CoreError::Conflict("Please use a different email address.".into()).into();
            }
            _ => {}
        }
    }
    err.into()
}
