//! Session tokens and the session cookie.
//!
//! A session is an HS256-signed JWT carrying a [`Claims`] payload. Browsers
//! receive it in an `HttpOnly` cookie named [`SESSION_COOKIE`]; API clients
//! may send the same token as `Authorization: Bearer <token>`.

use axum_extra::extract::cookie::{Cookie, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rubric_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "session";

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for session tokens and cookies.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Lifetime of a browser-session login, in hours (default: 24).
    pub session_expiry_hours: i64,
    /// Lifetime of a "remember me" login, in days (default: 30).
    pub remember_me_expiry_days: i64,
    /// Whether the cookie carries the `Secure` attribute (default: false).
    pub cookie_secure: bool,
}

const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 24;
const DEFAULT_REMEMBER_ME_EXPIRY_DAYS: i64 = 30;

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `SESSION_SECRET`           | **yes**  | --      |
    /// | `SESSION_EXPIRY_HOURS`     | no       | `24`    |
    /// | `REMEMBER_ME_EXPIRY_DAYS`  | no       | `30`    |
    /// | `SESSION_COOKIE_SECURE`    | no       | `false` |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("SESSION_SECRET")
            .expect("SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");

        let session_expiry_hours: i64 = std::env::var("SESSION_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_SESSION_EXPIRY_HOURS.to_string())
            .parse()
            .expect("SESSION_EXPIRY_HOURS must be a valid i64");

        let remember_me_expiry_days: i64 = std::env::var("REMEMBER_ME_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REMEMBER_ME_EXPIRY_DAYS.to_string())
            .parse()
            .expect("REMEMBER_ME_EXPIRY_DAYS must be a valid i64");

        let cookie_secure: bool = std::env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("SESSION_COOKIE_SECURE must be true or false");

        Self {
            secret,
            session_expiry_hours,
            remember_me_expiry_days,
            cookie_secure,
        }
    }

    /// Token lifetime in seconds for a login with or without "remember me".
    pub fn lifetime_secs(&self, remember: bool) -> i64 {
        if remember {
            self.remember_me_expiry_days * 24 * 60 * 60
        } else {
            self.session_expiry_hours * 60 * 60
        }
    }
}

/// Issue a session token for the given user.
pub fn issue_token(
    user_id: DbId,
    remember: bool,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: now + config.lifetime_secs(remember),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token, returning the embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &SessionConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// Build the session cookie for a freshly issued token.
///
/// With `remember` the cookie persists for the remember-me lifetime;
/// otherwise it is a browser-session cookie.
pub fn session_cookie(token: String, remember: bool, config: &SessionConfig) -> Cookie<'static> {
    let mut builder = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure);
    if remember {
        builder = builder.max_age(time::Duration::seconds(config.lifetime_secs(true)));
    }
    builder.build()
}

/// A cookie that, when removed from the jar, clears the session.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SessionConfig {
        SessionConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            session_expiry_hours: 24,
            remember_me_expiry_days: 30,
            cookie_secure: false,
        }
    }

    #[test]
    fn test_issue_and_validate_token() {
        let config = test_config();
        let token = issue_token(42, false, &config).expect("token issue should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_remember_me_extends_lifetime() {
        let config = test_config();
        let token = issue_token(7, true, &config).unwrap();
        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();
        // Well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = test_config();
        let config_b = SessionConfig {
            secret: "another-secret".to_string(),
            ..test_config()
        };

        let token = issue_token(1, false, &config_a).unwrap();
        assert!(validate_token(&token, &config_b).is_err());
    }

    #[test]
    fn test_cookie_attributes() {
        let config = test_config();
        let cookie = session_cookie("tok".into(), false, &config);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.max_age().is_none(), "browser-session cookie");

        let remembered = session_cookie("tok".into(), true, &config);
        assert_eq!(
            remembered.max_age(),
            Some(time::Duration::days(30)),
            "remember-me cookie persists"
        );
    }
}
