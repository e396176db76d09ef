//! Issue reporting.

use rocket::State;
use rocket::serde::json::Json;
use rocket_db_pools::sqlx;
use rocket_okapi::openapi;

use crate::error::ApiError;
use crate::models::{Issue, IssueCreatedResponse, NewIssue};

/// File a new issue report.
#[openapi(tag = "Issues")]
#[post("/report-issue", data = "<payload>")]
pub async fn report_issue(
    pool: &State<sqlx::PgPool>,
    payload: Json<NewIssue>,
) -> Result<Json<IssueCreatedResponse>, ApiError> {
    let issue = payload.into_inner();

    let id: i32 = sqlx::query_scalar(
        r#"INSERT INTO issues
               (title, details, priority, status, issue_type, image_url, reported_by, reported_at)
           VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, NOW()))
           RETURNING id"#,
    )
    .bind(&issue.title)
    .bind(&issue.details)
    .bind(issue.priority)
    .bind(issue.status)
    .bind(issue.issue_type)
    .bind(&issue.image_url)
    .bind(&issue.reported_by)
    .bind(issue.reported_at)
    .fetch_one(pool.inner())
    .await?;

    log::info!(
        "issue {} reported by '{}' (priority {})",
        id,
        issue.reported_by,
        issue.priority
    );

    Ok(Json(IssueCreatedResponse {
        message: "Issue reported successfully".to_string(),
        id,
    }))
}

/// Retrieve an issue by numeric id. Ids that are not a valid issue number
/// are simply not found.
#[openapi(tag = "Issues")]
#[get("/issues/<id>")]
pub async fn get_issue(id: &str, pool: &State<sqlx::PgPool>) -> Result<Json<Issue>, ApiError> {
    let not_found = || ApiError::NotFound(format!("Issue {id} not found"));
    let issue_id = parse_issue_id(id).ok_or_else(not_found)?;

    let issue = sqlx::query_as::<_, Issue>(
        r#"SELECT id, title, details, priority, status, issue_type, image_url,
                  reported_by, reported_at, created_at, updated_at
           FROM issues
           WHERE id = $1"#,
    )
    .bind(issue_id)
    .fetch_optional(pool.inner())
    .await?
    .ok_or_else(not_found)?;

    Ok(Json(issue))
}

/// Digits only; no sign, no whitespace, must fit an `INTEGER` column.
fn parse_issue_id(raw: &str) -> Option<i32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_issue_id;

    #[test]
    fn issue_ids_are_plain_digits() {
        assert_eq!(parse_issue_id("42"), Some(42));
        assert_eq!(parse_issue_id("007"), Some(7));
        assert_eq!(parse_issue_id("abc"), None);
        assert_eq!(parse_issue_id("-1"), None);
        assert_eq!(parse_issue_id("+1"), None);
        assert_eq!(parse_issue_id(""), None);
        assert_eq!(parse_issue_id("99999999999"), None);
    }
}
