//! Liveness and readiness probes.

use rocket::State;
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket_db_pools::sqlx;
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
    /// `ok` when the probe passed, `unavailable` otherwise.
    pub status: String,
}

impl HealthResponse {
    fn with_status(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

/// Process liveness; never touches the database.
#[openapi(tag = "Health")]
#[get("/health")]
pub fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::with_status("ok"))
}

/// Readiness: the database answers a trivial query.
#[openapi(tag = "Health")]
#[get("/health/ready")]
pub async fn readiness(pool: &State<sqlx::PgPool>) -> status::Custom<Json<HealthResponse>> {
    match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool.inner())
        .await
    {
        Ok(_) => status::Custom(Status::Ok, Json(HealthResponse::with_status("ok"))),
        Err(err) => {
            log::warn!("readiness probe failed: {}", err);
            status::Custom(
                Status::ServiceUnavailable,
                Json(HealthResponse::with_status("unavailable")),
            )
        }
    }
}
