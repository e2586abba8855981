//! One-shot flash notices carried in a cookie across a redirect.
//!
//! A form handler answers with [`redirect_with_notice`]; the next page
//! handler calls [`take_notice`] to read the message and clear the cookie.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

/// Name of the cookie holding the pending notice.
pub const FLASH_COOKIE: &str = "flash";

/// Visual category of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Danger,
}

impl NoticeLevel {
    fn as_str(self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Danger => "danger",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "success" => Some(NoticeLevel::Success),
            "info" => Some(NoticeLevel::Info),
            "danger" => Some(NoticeLevel::Danger),
            _ => None,
        }
    }
}

/// A message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Danger,
            message: message.into(),
        }
    }

    fn encode(&self) -> String {
        format!("{}:{}", self.level.as_str(), self.message)
    }

    fn decode(raw: &str) -> Option<Self> {
        let (level, message) = raw.split_once(':')?;
        Some(Self {
            level: NoticeLevel::parse(level)?,
            message: message.to_string(),
        })
    }
}

fn flash_cookie(notice: &Notice) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, notice.encode()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Store `notice` in `jar` and answer with `303 See Other` to `to`.
pub fn redirect_with_notice(jar: CookieJar, to: &str, notice: Notice) -> Response {
    (jar.add(flash_cookie(&notice)), Redirect::to(to)).into_response()
}

/// Read and clear the pending notice, if any.
///
/// The returned jar must be part of the response for the removal to stick.
pub fn take_notice(jar: CookieJar) -> (CookieJar, Option<Notice>) {
    let Some(notice) = jar.get(FLASH_COOKIE).and_then(|c| Notice::decode(c.value())) else {
        return (jar, None);
    };
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, Some(notice))
}

#[cfg(test)]
mod tests {
    use axum::http::header::{LOCATION, SET_COOKIE};
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn notice_survives_encoding() {
        let notice = Notice::danger("You need to purchase this audio: now.");
        assert_eq!(Notice::decode(&notice.encode()), Some(notice));
    }

    #[test]
    fn unknown_level_is_dropped() {
        assert_eq!(Notice::decode("shouting:hello"), None);
        assert_eq!(Notice::decode("no separator"), None);
    }

    #[test]
    fn redirect_sets_cookie_and_location() {
        let response = redirect_with_notice(CookieJar::new(), "/login", Notice::info("Hi"));
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/login");
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("flash="));
    }

    #[test]
    fn take_notice_reads_and_clears() {
        let jar = CookieJar::new().add(flash_cookie(&Notice::success("Saved")));
        let (jar, notice) = take_notice(jar);
        assert_eq!(notice, Some(Notice::success("Saved")));
        assert!(jar.get(FLASH_COOKIE).is_none());
    }
}
