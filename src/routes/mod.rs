//! HTTP route handlers grouped by resource.
//!
//! Each submodule exposes typed Rocket handlers annotated with `#[openapi]`
//! so `rocket_okapi` can derive the OpenAPI document.

pub mod contacts;
pub mod health;
pub mod issues;
pub mod users;
