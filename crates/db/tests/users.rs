//! Integration tests for the `users` repository.

use rubric_db::models::user::{CreateUser, UpdateProfile};
use rubric_db::repositories::UserRepo;
use sqlx::PgPool;

fn new_user(username: &str, email: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "hash".to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_user_defaults(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("ada", "ada@test.com")).await.unwrap();

    assert!(!user.is_admin);
    assert_eq!(user.profile_image, "default.jpg");
    assert!(user.bio.is_none());

    let by_email = UserRepo::find_by_email(&pool, "ada@test.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_and_username_rejected(pool: PgPool) {
    UserRepo::create(&pool, &new_user("ada", "ada@test.com")).await.unwrap();

    let dup_email = UserRepo::create(&pool, &new_user("other", "ada@test.com")).await;
    let err = dup_email.expect_err("duplicate email must fail");
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_users_email"));

    let dup_name = UserRepo::create(&pool, &new_user("ada", "other@test.com")).await;
    let err = dup_name.expect_err("duplicate username must fail");
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_users_username"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile_only_touches_given_fields(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("ada", "ada@test.com")).await.unwrap();

    let updated = UserRepo::update_profile(
        &pool,
        user.id,
        &UpdateProfile {
            bio: Some("Second-year law".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.username, "ada");
    assert_eq!(updated.email, "ada@test.com");
    assert_eq!(updated.bio.as_deref(), Some("Second-year law"));

    let missing = UserRepo::update_profile(&pool, 99999, &UpdateProfile::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_admin_by_email(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("ada", "ada@test.com")).await.unwrap();

    assert!(UserRepo::set_admin_by_email(&pool, "ada@test.com", true).await.unwrap());
    assert!(!UserRepo::set_admin_by_email(&pool, "ghost@test.com", true).await.unwrap());

    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(reloaded.is_admin);
}
