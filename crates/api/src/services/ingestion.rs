//! Admin upload of audio files into the catalog.
//!
//! Steps run in a fixed order: admin check, extension allow-list, price,
//! level, title, course lookup, filename sanitising, file write, row insert.
//! Nothing touches storage until every check has passed.
//!
//! The file write and the row insert are not atomic. If the insert fails
//! and the file was new, it is deleted again. If the upload replaced an
//! existing file of the same name, the old contents are gone and only a
//! warning is logged.

use std::future::Future;

use rubric_core::access::{ensure_admin, Principal};
use rubric_core::error::CoreError;
use rubric_core::level::Level;
use rubric_core::price::Price;
use rubric_core::types::DbId;
use rubric_core::uploads::{ensure_allowed_extension, secure_filename};
use rubric_db::models::audio::{Audio, CreateAudio};
use rubric_db::repositories::{AudioRepo, CourseRepo};
use rubric_db::DbPool;

use crate::config::UploadConfig;
use crate::error::{AppError, AppResult};
use crate::storage::BlobStore;

/// A file received in a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name, unsanitised.
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Raw admin upload form. Values are validated by [`ingest_audio`].
#[derive(Debug, Clone, Default)]
pub struct AudioUploadForm {
    pub title: Option<String>,
    pub price: Option<String>,
    pub course_id: Option<String>,
    pub level: Option<String>,
    pub file: Option<UploadedFile>,
}

/// Store an uploaded audio file and create its catalog row.
pub async fn ingest_audio<P: Principal + ?Sized>(
    pool: &DbPool,
    store: &dyn BlobStore,
    config: &UploadConfig,
    actor: &P,
    form: AudioUploadForm,
) -> AppResult<Audio> {
    ensure_admin(actor)?;

    let file = match form.file {
        Some(file) if !file.file_name.is_empty() => file,
        _ => return Err(CoreError::InvalidFormat("Invalid file format.".into()).into()),
    };
    ensure_allowed_extension(&file.file_name, &config.allowed_extensions)?;

    let price = Price::parse(form.price.as_deref().unwrap_or_default())?;
    let level = Level::parse(form.level.as_deref().unwrap_or_default())?;

    let title = form.title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(CoreError::Validation("Title is required".into()).into());
    }

    let course_id = parse_course_id(form.course_id.as_deref().unwrap_or_default())?;
    if CourseRepo::find_by_id(pool, course_id).await?.is_none() {
        return Err(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }
        .into());
    }

    let filename = secure_filename(&file.file_name)?;
    let input = CreateAudio {
        title: title.to_string(),
        price,
        filename: filename.clone(),
        course_id,
        level,
    };

    let audio = store_then_insert(store, &filename, &file.data, || {
        AudioRepo::create(pool, &input)
    })
    .await?;

    tracing::info!(
        audio_id = audio.id,
        course_id,
        level = %level,
        filename = %audio.filename,
        admin_id = actor.user_id(),
        "Ingested audio"
    );
    Ok(audio)
}

fn parse_course_id(raw: &str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| CoreError::InvalidFormat(format!("Invalid course id '{raw}'")))
}

/// Write `data` under `name`, then run `insert`.
///
/// When `insert` fails the new file is removed again, unless it replaced a
/// file that already existed.
pub async fn store_then_insert<T, F, Fut>(
    store: &dyn BlobStore,
    name: &str,
    data: &[u8],
    insert: F,
) -> AppResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let existed = store.exists(name).await.map_err(storage_error)?;
    if existed {
        tracing::warn!(filename = name, "Upload replaces an existing file of the same name");
    }

    store.put(name, data).await.map_err(storage_error)?;

    match insert().await {
        Ok(row) => Ok(row),
        Err(err) => {
            if existed {
                tracing::warn!(
                    filename = name,
                    error = %err,
                    "Insert failed after overwriting a file; previous contents are lost"
                );
            } else if let Err(rm_err) = store.remove(name).await {
                tracing::error!(
                    filename = name,
                    error = %rm_err,
                    "Failed to remove file after insert failure"
                );
            } else {
                tracing::info!(filename = name, "Removed file after insert failure");
            }
            Err(err.into())
        }
    }
}

pub(crate) fn storage_error(err: std::io::Error) -> AppError {
    AppError::InternalError(format!("Storage error: {err}"))
}
