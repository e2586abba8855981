//! Operations behind the HTTP handlers.
//!
//! Each service takes its collaborators (pool, blob store, config, acting
//! user) as arguments, so handlers stay thin and tests can call the
//! operations directly.

pub mod auth;
pub mod catalog;
pub mod commerce;
pub mod ingestion;
pub mod profile;

use rubric_core::error::CoreError;
use validator::ValidationErrors;

/// Flatten validator output into a single user-facing message.
///
/// Fields are reported in name order so the message is stable.
pub(crate) fn validation_error(errors: &ValidationErrors) -> CoreError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let message = fields
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect::<Vec<_>>()
        .join("; ");
    CoreError::Validation(message)
}
