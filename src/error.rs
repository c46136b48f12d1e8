//! API error taxonomy.
//!
//! Every failure surfaced to a caller becomes a JSON body of the shape
//! `{ "error": "<message>" }` with a 4xx/5xx status. Persistence errors are
//! logged with full detail server-side and reach the caller as a generic 500.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("not authorized")]
    Unauthorized,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Collapse a validator report into one message naming the bad fields.
    pub fn from_validation(errors: ValidationErrors) -> Self {
        let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
        fields.sort_unstable();
        ApiError::Validation(format!("missing or invalid fields: {}", fields.join(", ")))
    }

    /// Status and caller-facing message for this error.
    ///
    /// Constraint rejections (UNIQUE, FOREIGN KEY) are the one class of
    /// database error a client can act on, so they map to 409 instead of the
    /// generic 500.
    fn public(&self) -> (StatusCode, String) {
        match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Database(err) => match constraint_kind(err) {
                Some(kind) => (StatusCode::CONFLICT, kind.to_string()),
                None => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                ),
            },
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        }
    }
}

fn constraint_kind(err: &sqlx::Error) -> Option<&'static str> {
    let db_err = match err {
        sqlx::Error::Database(db_err) => db_err,
        _ => return None,
    };
    let message = db_err.message();
    if message.contains("UNIQUE constraint failed") {
        Some("duplicate value violates a uniqueness constraint")
    } else if message.contains("FOREIGN KEY constraint failed") {
        Some("referenced record does not exist")
    } else {
        None
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.public().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, message) = self.public();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("request failed: {self:?}");
        }
        HttpResponse::build(status).json(json!({ "error": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_report_names_fields() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 1))]
            nombres: String,
            #[validate(length(min = 1))]
            apellidos: String,
        }

        let probe = Probe {
            nombres: String::new(),
            apellidos: String::new(),
        };
        let err = ApiError::from_validation(probe.validate().unwrap_err());
        match err {
            ApiError::Validation(msg) => {
                assert!(msg.contains("apellidos, nombres"), "got: {msg}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(
            ApiError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
