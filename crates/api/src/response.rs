//! Shared response envelope types for page handlers.
//!
//! Page responses use a `{ "data": ..., "notice": ... }` envelope, where
//! `notice` is the pending flash message (if any). Use [`page`] so the flash
//! cookie is consumed in the same response.

use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use crate::middleware::flash::{take_notice, Notice};

/// Standard page envelope.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: T,
    pub notice: Option<Notice>,
}

/// Return type of page handlers: the updated jar plus the JSON body.
pub type Page<T> = (CookieJar, Json<PageResponse<T>>);

/// Wrap `data` in the page envelope, consuming the pending notice from `jar`.
///
/// ```ignore
/// Ok(page(jar, view))
/// ```
pub fn page<T: Serialize>(jar: CookieJar, data: T) -> Page<T> {
    let (jar, notice) = take_notice(jar);
    (jar, Json(PageResponse { data, notice }))
}
