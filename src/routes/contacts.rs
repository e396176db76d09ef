//! Contact import and lookup endpoints.

use rocket::State;
use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::serde::json::Json;
use rocket_db_pools::sqlx;
use rocket_okapi::openapi;
use tokio::io::AsyncReadExt;

use crate::config::AppConfig;
use crate::contacts::{ContactImporter, PgContactStore, read_rows};
use crate::error::ApiError;
use crate::models::{Contact, EmailLoginRequest, EmailLoginResponse, ImportResponse};

/// Multipart body of a CSV upload.
#[derive(FromForm)]
pub struct CsvUpload<'r> {
    #[field(name = "csvFile")]
    pub csv_file: TempFile<'r>,
}

/// Upload a CSV of contacts and import every new, well-formed row.
///
/// The import is all-or-nothing: any storage failure leaves the contact
/// table untouched.
#[openapi(skip)]
#[post("/upload-csv", data = "<upload>")]
pub async fn upload_csv(
    pool: &State<sqlx::PgPool>,
    config: &State<AppConfig>,
    upload: Form<CsvUpload<'_>>,
) -> Result<Json<ImportResponse>, ApiError> {
    let file = &upload.csv_file;
    if file.len() > config.csv_upload_limit_bytes {
        return Err(ApiError::BadRequest(format!(
            "CSV file exceeds the {} byte limit",
            config.csv_upload_limit_bytes
        )));
    }

    let retrieval_failed =
        |e: std::io::Error| ApiError::BadRequest(format!("Error retrieving file: {e}"));
    let mut reader = Box::pin(file.open().await.map_err(retrieval_failed)?);
    let mut content = Vec::with_capacity(file.len() as usize);
    reader
        .read_to_end(&mut content)
        .await
        .map_err(retrieval_failed)?;

    let rows = read_rows(&content)?;
    log::info!(
        "importing contacts from {} ({} rows)",
        file.name().unwrap_or("upload"),
        rows.len()
    );

    let store = PgContactStore::new(pool.inner().clone());
    let summary = ContactImporter::new(&store)
        .with_storage_timeout(config.import_timeout)
        .import(&rows)
        .await?;

    Ok(Json(ImportResponse {
        message: "CSV file uploaded and data saved to database".to_string(),
        summary,
    }))
}

/// Confirm that a contact with the given email has been imported.
#[openapi(tag = "Contacts")]
#[post("/login-by-email", data = "<payload>")]
pub async fn login_by_email(
    pool: &State<sqlx::PgPool>,
    payload: Json<EmailLoginRequest>,
) -> Result<Json<EmailLoginResponse>, ApiError> {
    let email: Option<String> = sqlx::query_scalar("SELECT email FROM contacts WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(pool.inner())
        .await?;

    let email = email.ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    Ok(Json(EmailLoginResponse {
        message: "Login successful".to_string(),
        email,
    }))
}

/// Fetch a single contact by exact email address.
#[openapi(tag = "Contacts")]
#[get("/contacts/<email>")]
pub async fn get_contact(
    email: String,
    pool: &State<sqlx::PgPool>,
) -> Result<Json<Contact>, ApiError> {
    let contact = sqlx::query_as::<_, Contact>(
        r#"SELECT email, full_name, timestamp, twitter_profile, linkedin_profile, created_at
           FROM contacts
           WHERE email = $1"#,
    )
    .bind(&email)
    .fetch_one(pool.inner())
    .await
    .map_err(|err| match err {
        sqlx::Error::RowNotFound => ApiError::NotFound(format!("Contact '{email}' not found")),
        other => ApiError::from(other),
    })?;

    Ok(Json(contact))
}
