//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// PostgreSQL SQLSTATE for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// PostgreSQL SQLSTATE for unique violations.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidVar { var: &'static str, value: String },
    #[error("invalid schema name: '{0}'")]
    InvalidSchema(String),
}

/// One violated constraint on a request field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Violations collected by a validation pass, in rule order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    /// Groups messages by field for the response `details` object.
    pub fn by_field(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut out: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for e in &self.0 {
            out.entry(e.field.as_str()).or_default().push(e.message.as_str());
        }
        out
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.iter().map(|e| e.field.as_str()).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl From<FieldError> for FieldErrors {
    fn from(e: FieldError) -> Self {
        FieldErrors(vec![e])
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("validation: {0}")]
    Validation(FieldErrors),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        AppError::NotFound { entity, id }
    }

    /// True when the response will be a 500; constraint violations and request errors are not.
    pub fn is_server_error(&self) -> bool {
        match self {
            AppError::Config(_) => true,
            AppError::Db(e) => constraint_violation(e).is_none(),
            AppError::NotFound { .. } | AppError::Validation(_) | AppError::BadRequest(_) => false,
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(e: FieldErrors) -> Self {
        AppError::Validation(e)
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::Config(e) => {
                tracing::error!(error = %e, "configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "config_error",
                    "an internal error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found", self.to_string(), None),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                self.to_string(),
                serde_json::to_value(errors.by_field()).ok(),
            ),
            AppError::Db(e) => classify_db_error(e),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request", self.to_string(), None),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}

/// SQLSTATE and constraint name of a foreign key or unique violation.
fn constraint_violation(e: &sqlx::Error) -> Option<(&'static str, String)> {
    let sqlx::Error::Database(db) = e else {
        return None;
    };
    let code = match db.code().as_deref() {
        Some(FOREIGN_KEY_VIOLATION) => FOREIGN_KEY_VIOLATION,
        Some(UNIQUE_VIOLATION) => UNIQUE_VIOLATION,
        _ => return None,
    };
    Some((code, db.constraint().unwrap_or("unknown").to_string()))
}

/// FK and unique violations are client conflicts; everything else is a sanitized 500.
fn classify_db_error(e: &sqlx::Error) -> (StatusCode, &'static str, String, Option<serde_json::Value>) {
    match constraint_violation(e) {
        Some((FOREIGN_KEY_VIOLATION, constraint)) => (
            StatusCode::CONFLICT,
            "conflict",
            format!("operation violates foreign key constraint {}", constraint),
            None,
        ),
        Some((_, constraint)) => (
            StatusCode::CONFLICT,
            "conflict",
            format!("duplicate value violates unique constraint {}", constraint),
            None,
        ),
        None => {
            tracing::error!(error = %e, "database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                "an internal error occurred".to_string(),
                None,
            )
        }
    }
}
