//! Self-service profile edits.

use rubric_core::error::CoreError;
use rubric_core::uploads::{ensure_allowed_extension, secure_filename};
use rubric_db::models::user::{UpdateProfile, User};
use rubric_db::repositories::UserRepo;
use rubric_db::DbPool;
use validator::Validate;

use crate::config::UploadConfig;
use crate::error::AppResult;
use crate::services::auth::unique_violation_to_conflict;
use crate::services::ingestion::{storage_error, UploadedFile};
use crate::services::validation_error;
use crate::storage::BlobStore;

/// Submitted profile form. The picture is optional.
#[derive(Debug, Clone, Default, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, max = 64, message = "Username must be 1 to 64 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(max = 140, message = "Bio must be at most 140 characters"))]
    pub bio: String,
    pub picture: Option<UploadedFile>,
}

/// Result of a profile edit.
#[derive(Debug)]
pub struct ProfileUpdate {
    pub user: User,
    /// Stored name of the new profile picture, if one was uploaded.
    pub saved_picture: Option<String>,
}

/// Apply a profile edit for `user`, storing a new picture if one was sent.
///
/// A username or email already held by another account fails with
/// [`CoreError::Conflict`].
pub async fn update_profile(
    pool: &DbPool,
    store: &dyn BlobStore,
    config: &UploadConfig,
    user: &User,
    form: ProfileForm,
) -> AppResult<ProfileUpdate> {
    form.validate().map_err(|e| validation_error(&e))?;

    let username = form.username.trim();
    let email = form.email.trim();

    if username != user.username {
        if let Some(other) = UserRepo::find_by_username(pool, username).await? {
            if other.id != user.id {
                return Err(CoreError::Conflict("Please use a different username.".into()).into());
            }
        }
    }
    if email != user.email {
        if let Some(other) = UserRepo::find_by_email(pool, email).await? {
            if other.id != user.id {
                return Err(
                    CoreError::Conflict("Please use a different email address.".into()).into(),
                );
            }
        }
    }

    let saved_picture = match form.picture.filter(|p| !p.file_name.is_empty()) {
        Some(picture) => {
            ensure_allowed_extension(&picture.file_name, &config.allowed_image_extensions)?;
            let filename = secure_filename(&picture.file_name)?;
            store
                .put(&filename, &picture.data)
                .await
                .map_err(storage_error)?;
            Some(filename)
        }
        None => None,
    };

    let input = UpdateProfile {
        username: Some(username.to_string()),
        email: Some(email.to_string()),
        bio: Some(form.bio),
        profile_image: saved_picture.clone(),
    };
    let updated = UserRepo::update_profile(pool, user.id, &input)
        .await
        .map_err(unique_violation_to_conflict)?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user.id,
        })?;

    tracing::info!(user_id = updated.id, picture = ?saved_picture, "Updated profile");
    Ok(ProfileUpdate {
        user: updated,
        saved_picture,
    })
}
