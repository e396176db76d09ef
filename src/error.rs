use okapi::openapi3::{RefOr, Response as OpenApiResponse, Responses};
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::{Request, Response};
use rocket_okapi::r#gen::OpenApiGenerator;
use rocket_okapi::response::OpenApiResponderInner;
use serde::{Deserialize, Serialize};
use std::io::Cursor;

use crate::contacts::{CsvError, ImportError};

#[derive(Debug)]
pub enum ApiError {
    DatabaseError(sqlx::Error),
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Conflict(String),
    InternalError(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => Status::InternalServerError,
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::BadRequest(_) => Status::BadRequest,
            ApiError::Unauthorized(_) => Status::Unauthorized,
            ApiError::Conflict(_) => Status::Conflict,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        let (error_type, message) = match self {
            ApiError::DatabaseError(e) => {
                log::error!("database error: {}", e);
                ("DatabaseError", "Database operation failed".to_string())
            }
            ApiError::NotFound(msg) => {
                log::debug!("not found: {}", msg);
                ("NotFound", msg)
            }
            ApiError::BadRequest(msg) => {
                log::debug!("bad request: {}", msg);
                ("BadRequest", msg)
            }
            ApiError::Unauthorized(msg) => {
                log::debug!("unauthorized: {}", msg);
                ("Unauthorized", msg)
            }
            ApiError::Conflict(msg) => {
                log::debug!("conflict: {}", msg);
                ("Conflict", msg)
            }
            ApiError::InternalError(msg) => {
                log::error!("internal error: {}", msg);
                ("InternalError", msg)
            }
        };

        let error_response = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        let json = serde_json::to_string(&error_response).unwrap_or_else(|_| {
            r#"{"error":"SerializationError","message":"Failed to serialize error"}"#.to_string()
        });

        Response::build()
            .status(status)
            .header(rocket::http::ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}

impl OpenApiResponderInner for ApiError {
    fn responses(_generator: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        let mut responses = Responses::default();
        for (code, description) in [
            ("400", "The request body or upload is malformed."),
            ("401", "The supplied credentials were not accepted."),
            ("404", "The requested resource does not exist."),
            ("409", "The resource already exists."),
            ("500", "A storage or server failure occurred."),
        ] {
            responses.responses.insert(
                code.to_string(),
                RefOr::Object(OpenApiResponse {
                    description: description.to_string(),
                    ..Default::default()
                }),
            );
        }
        Ok(responses)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            _ => ApiError::DatabaseError(err),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Schema { .. } => ApiError::BadRequest(err.to_string()),
            ImportError::Storage(_) => {
                log::error!("{}", err);
                ApiError::InternalError("Contact import failed; no rows were saved".to_string())
            }
        }
    }
}

impl From<CsvError> for ApiError {
    fn from(err: CsvError) -> Self {
        ApiError::BadRequest(format!("Error reading CSV file: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::StorageError;

    #[test]
    fn missing_rows_map_to_not_found() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), Status::NotFound);
    }

    #[test]
    fn schema_errors_are_client_errors() {
        let err = ApiError::from(ImportError::Schema {
            missing: vec!["Email Address"],
        });
        assert_eq!(err.status(), Status::BadRequest);
        match err {
            ApiError::BadRequest(msg) => assert!(msg.contains("Email Address")),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn storage_errors_are_server_errors() {
        let err = ApiError::from(ImportError::Storage(StorageError::Timeout(
            std::time::Duration::from_secs(1),
        )));
        assert_eq!(err.status(), Status::InternalServerError);
    }

    #[test]
    fn storage_error_detail_stays_in_the_logs() {
        let err = ApiError::from(ImportError::Storage(StorageError::Database(
            sqlx::Error::Protocol("duplicate key violates \"contacts_pkey\"".to_string()),
        )));
        match err {
            ApiError::InternalError(msg) => {
                assert_eq!(msg, "Contact import failed; no rows were saved");
                assert!(!msg.contains("contacts_pkey"));
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
