//! Account registration and username/password login.
//!
//! Passwords are compared as stored; credential hashing and session tokens
//! are outside this service's scope.

use rocket::State;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket_db_pools::sqlx;
use rocket_okapi::openapi;

use crate::error::ApiError;
use crate::models::{Credentials, LoginResponse, MessageResponse, Role, User};

fn validated(credentials: &Credentials) -> Result<(&str, &str), ApiError> {
    let username = credentials.username.trim();
    if username.is_empty() || credentials.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }
    Ok((username, credentials.password.as_str()))
}

/// Create a regular user account.
#[openapi(tag = "Users")]
#[post("/register", data = "<payload>")]
pub async fn register(
    pool: &State<sqlx::PgPool>,
    payload: Json<Credentials>,
) -> Result<status::Created<Json<MessageResponse>>, ApiError> {
    let (username, password) = validated(&payload)?;

    let inserted: Option<i32> = sqlx::query_scalar(
        r#"INSERT INTO users (username, password, role)
           VALUES ($1, $2, $3)
           ON CONFLICT (username) DO NOTHING
           RETURNING id"#,
    )
    .bind(username)
    .bind(password)
    .bind(Role::User.as_str())
    .fetch_optional(pool.inner())
    .await?;

    let Some(user_id) = inserted else {
        return Err(ApiError::Conflict("Username already taken".to_string()));
    };

    log::info!("registered user '{}' with id {}", username, user_id);
    Ok(status::Created::new(format!("/api/v1/users/{user_id}"))
        .body(Json(MessageResponse::new("User created successfully"))))
}

/// Check a username/password pair.
#[openapi(tag = "Users")]
#[post("/login", data = "<payload>")]
pub async fn login(
    pool: &State<sqlx::PgPool>,
    payload: Json<Credentials>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (username, password) = validated(&payload)?;

    let user = sqlx::query_as::<_, User>(
        r#"SELECT id, username, password, role, created_at
           FROM users
           WHERE username = $1 AND password = $2"#,
    )
    .bind(username)
    .bind(password)
    .fetch_optional(pool.inner())
    .await?
    .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user: user.into(),
    }))
}
