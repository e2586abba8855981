#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use rubric_api::auth::password::hash_password;
use rubric_api::auth::session::{issue_token, SessionConfig};
use rubric_api::config::{ServerConfig, UploadConfig};
use rubric_api::router::build_app_router;
use rubric_api::state::AppState;
use rubric_api::storage::LocalBlobStore;
use rubric_core::level::Level;
use rubric_core::price::Price;
use rubric_db::models::audio::{Audio, CreateAudio};
use rubric_db::models::course::{Course, CreateCourse};
use rubric_db::models::faculty::{CreateFaculty, Faculty};
use rubric_db::models::user::{CreateUser, User};
use rubric_db::repositories::{AudioRepo, CourseRepo, FacultyRepo, UserRepo};

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// A router plus the temporary upload directory it writes into.
pub struct TestApp {
    pub router: Router,
    pub config: ServerConfig,
    upload_dir: TempDir,
}

impl TestApp {
    /// A fresh handle to the router (each request consumes one).
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn upload_path(&self, name: &str) -> PathBuf {
        self.upload_dir.path().join(name)
    }

    /// `Cookie` header value carrying a valid session for `user_id`.
    pub fn session_for(&self, user_id: i64) -> String {
        let token = issue_token(user_id, false, &self.config.session).unwrap();
        format!("session={token}")
    }
}

/// Build a test `ServerConfig` writing uploads into `upload_dir`.
pub fn test_config(upload_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session: SessionConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            session_expiry_hours: 24,
            remember_me_expiry_days: 30,
            cookie_secure: false,
        },
        uploads: UploadConfig {
            upload_dir,
            allowed_extensions: vec!["mp3".into(), "wav".into(), "ogg".into()],
            allowed_image_extensions: vec!["jpg".into(), "png".into()],
            max_upload_bytes: 10 * 1024 * 1024,
        },
    }
}

/// Build the full application router, with the production middleware
/// stack, over `pool` and a fresh temporary upload directory.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let upload_dir = tempfile::tempdir().unwrap();
    let config = test_config(upload_dir.path().to_path_buf());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        store: Arc::new(LocalBlobStore::new(upload_dir.path())),
    };

    TestApp {
        router: build_app_router(state, &config),
        config,
        upload_dir,
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, username: &str, is_admin: bool) -> User {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
        },
    )
    .await
    .unwrap();

    if is_admin {
        UserRepo::set_admin_by_email(pool, &user.email, true)
            .await
            .unwrap();
    }
    UserRepo::find_by_id(pool, user.id).await.unwrap().unwrap()
}

pub async fn create_faculty_with_course(
    pool: &PgPool,
    faculty: &str,
    course: &str,
) -> (Faculty, Course) {
    let faculty = FacultyRepo::create(
        pool,
        &CreateFaculty {
            name: faculty.to_string(),
            department: faculty.to_string(),
        },
    )
    .await
    .unwrap();
    let course = CourseRepo::create(
        pool,
        &CreateCourse {
            name: course.to_string(),
            faculty_id: faculty.id,
        },
    )
    .await
    .unwrap();
    (faculty, course)
}

pub async fn create_audio(
    pool: &PgPool,
    course_id: i64,
    title: &str,
    price: &str,
    filename: &str,
) -> Audio {
    AudioRepo::create(
        pool,
        &CreateAudio {
            title: title.to_string(),
            price: Price::parse(price).unwrap(),
            filename: filename.to_string(),
            course_id,
            level: Level::L100,
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    get_with_cookie(app, uri, None).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn post_form(app: Router, uri: &str, body: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

/// One part of a multipart body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        data: &'a [u8],
    },
}

const BOUNDARY: &str = "rubric-test-boundary";

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(
    app: Router,
    uri: &str,
    parts: &[Part<'_>],
    cookie: Option<&str>,
) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    send(app, builder.body(Body::from(multipart_body(parts))).unwrap()).await
}

// ---------------------------------------------------------------------------
// Response inspection
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn location(response: &Response) -> &str {
    response.headers()[LOCATION].to_str().unwrap()
}

/// The `name=value` pair of the cookie `name` set by `response`, ready to
/// send back in a `Cookie` header.
pub fn set_cookie_pair(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{name}=")))
        .map(str::to_string)
}

/// Follow the flash cookie of a redirect to the home page and return the
/// notice message shown there.
pub async fn flashed_message(app: Router, response: &Response) -> Option<String> {
    let cookie = set_cookie_pair(response, "flash")?;
    let page = body_json(get_with_cookie(app, "/", Some(&cookie)).await).await;
    page["notice"]["message"].as_str().map(str::to_string)
}
