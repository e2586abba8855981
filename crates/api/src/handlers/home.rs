//! Handler for the landing page.

use axum_extra::extract::cookie::CookieJar;
use rubric_core::level::Level;
use rubric_db::models::user::UserResponse;
use serde::Serialize;

use crate::middleware::auth::MaybeUser;
use crate::response::{page, Page};

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub levels: Vec<Level>,
    /// The logged-in user, if any.
    pub user: Option<UserResponse>,
}

/// GET / and GET /index
///
/// The four academic levels and, when logged in, the current user.
pub async fn index(MaybeUser(user): MaybeUser, jar: CookieJar) -> Page<HomeView> {
    page(
        jar,
        HomeView {
            levels: Level::ALL.to_vec(),
            user: user.as_ref().map(|u| UserResponse::from(&u.user)),
        },
    )
}
