use chrono::{DateTime, Utc};
use rocket_db_pools::sqlx::FromRow;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::contacts::ImportSummary;

// ===== Users =====

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn from_str(role: &str) -> Self {
        match role {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user; the stored password never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub role: Role,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: Role::from_str(&user.role),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserSummary,
}

// ===== Contacts =====

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub email: String,
    pub full_name: String,
    pub timestamp: String,
    pub twitter_profile: String,
    pub linkedin_profile: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmailLoginRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmailLoginResponse {
    pub message: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ImportResponse {
    pub message: String,
    pub summary: ImportSummary,
}

// ===== Issues =====

/// Issue report as submitted by a client.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewIssue {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub status: bool,
    #[serde(rename = "type", default)]
    pub issue_type: bool,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
    #[serde(default)]
    pub reported_by: String,
    /// Defaults to the time of submission.
    #[serde(default)]
    pub reported_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: i32,
    pub title: String,
    pub details: String,
    pub priority: i32,
    pub status: bool,
    #[serde(rename = "type")]
    pub issue_type: bool,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    pub reported_by: String,
    pub reported_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct IssueCreatedResponse {
    pub message: String,
    pub id: i32,
}

// ===== Shared =====

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_issue_accepts_client_field_names() {
        let issue: NewIssue = serde_json::from_value(json!({
            "title": "Broken upload",
            "details": "500 on submit",
            "priority": 2,
            "status": true,
            "type": true,
            "imageURL": "/uploads/shot.png",
            "reportedBy": "alice"
        }))
        .expect("valid issue payload");

        assert_eq!(issue.priority, 2);
        assert!(issue.issue_type);
        assert_eq!(issue.image_url, "/uploads/shot.png");
        assert_eq!(issue.reported_by, "alice");
        assert!(issue.reported_at.is_none());
    }

    #[test]
    fn user_summary_hides_password() {
        let user = User {
            id: 7,
            username: "bob".into(),
            password: "hunter2".into(),
            role: "admin".into(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(UserSummary::from(user)).expect("serializes");
        assert_eq!(value, json!({"id": 7, "username": "bob", "role": "admin"}));
    }

    #[test]
    fn unknown_roles_fall_back_to_user() {
        assert_eq!(Role::from_str("superuser"), Role::User);
        assert_eq!(Role::Admin.as_str(), "admin");
    }
}
