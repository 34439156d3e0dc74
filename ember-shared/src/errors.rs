use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::types::ApiErrorResponse;

/// Application error codes following the pattern E{area}{sequence}
///
/// Ranges:
/// - E0xxx: Shared/infrastructure errors
/// - E1xxx: User errors
/// - E2xxx: Matching errors
/// - E3xxx: Messaging errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Shared (E0xxx)
    InternalError,
    ValidationError,
    NotFound,
    Forbidden,
    ServiceUnavailable,
    BadRequest,

    // Users (E1xxx)
    UserNotFound,
    DisplayNameTaken,
    InvalidDisplayName,

    // Matching (E2xxx)
    SelfSwipe,
    MatchNotFound,

    // Messaging (E3xxx)
    NotMatchParticipant,
    EmptyMessage,
}

impl ErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            // Shared
            Self::InternalError => "E0001",
            Self::ValidationError => "E0002",
            Self::NotFound => "E0003",
            Self::Forbidden => "E0004",
            Self::ServiceUnavailable => "E0005",
            Self::BadRequest => "E0006",

            // Users
            Self::UserNotFound => "E1001",
            Self::DisplayNameTaken => "E1002",
            Self::InvalidDisplayName => "E1003",

            // Matching
            Self::SelfSwipe => "E2001",
            Self::MatchNotFound => "E2002",

            // Messaging
            Self::NotMatchParticipant => "E3001",
            Self::EmptyMessage => "E3002",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InternalError | Self::ServiceUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ValidationError | Self::BadRequest | Self::InvalidDisplayName
            | Self::SelfSwipe | Self::EmptyMessage => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::UserNotFound | Self::MatchNotFound => StatusCode::NOT_FOUND,
            Self::Forbidden | Self::NotMatchParticipant => StatusCode::FORBIDDEN,
            Self::DisplayNameTaken => StatusCode::CONFLICT,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Known {
        code: ErrorCode,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Known {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(code: ErrorCode, message: impl Into<String>, details: serde_json::Value) -> Self {
        Self::Known {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Known { code, .. } => *code,
            Self::Internal(_) => ErrorCode::InternalError,
            Self::Database(diesel::result::Error::NotFound) => ErrorCode::NotFound,
            Self::Database(_) => ErrorCode::InternalError,
            Self::Validation(_) => ErrorCode::ValidationError,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            AppError::Known { code, message, details } => {
                let status = code.status_code();
                let mut resp = ApiErrorResponse::new(code.code(), message);
                if let Some(d) = details {
                    resp = resp.with_details(d.clone());
                }
                (status, resp)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorResponse::new("E0001", "internal server error"),
                )
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "database error");
                match err {
                    diesel::result::Error::NotFound => (
                        StatusCode::NOT_FOUND,
                        ApiErrorResponse::new("E0003", "resource not found"),
                    ),
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiErrorResponse::new("E0001", "database error"),
                    ),
                }
            }
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ApiErrorResponse::new("E0002", msg),
            ),
        };

        (status, Json(error_response)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ErrorCode::SelfSwipe.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotMatchParticipant.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::MatchNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::DisplayNameTaken.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn database_not_found_maps_to_404() {
        let err = AppError::Database(diesel::result::Error::NotFound);
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
