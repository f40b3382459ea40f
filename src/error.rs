use std::collections::BTreeMap;
use std::fmt;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, warn};

use crate::store::StoreError;

pub const MUST_EXIST: &str = "must exist";
pub const BLANK: &str = "can't be blank";
pub const TAKEN: &str = "has already been taken";
pub const INVALID: &str = "is invalid";

/// Field name -> messages, serialized as a JSON object.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.to_owned());
    }

    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "{field} {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Carries the entity name, e.g. `"user"`.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("invalid credentials")]
    Authentication,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid(field: &str, message: &str) -> Self {
        Self::Validation(ValidationErrors::single(field, message))
    }
}

/// Constraint names follow Postgres' defaults for the tables in `migrations/`.
fn field_for_constraint(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(c) if c.contains("email") => "email",
        Some(c) if c.contains("form_id") => "form",
        Some(c) if c.contains("user_id") => "user",
        _ => "base",
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UniqueViolation { constraint } => {
                warn!(?constraint, "unique constraint rejected write");
                Self::invalid(field_for_constraint(constraint.as_deref()), TAKEN)
            }
            StoreError::ForeignKeyViolation { constraint } => {
                warn!(?constraint, "foreign key rejected write");
                Self::invalid(field_for_constraint(constraint.as_deref()), MUST_EXIST)
            }
            StoreError::Backend(e) => Self::Internal(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid("body", &rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid("query", &rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Authentication => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = match self {
            AppError::Validation(errors) => json!({ "errors": errors }),
            AppError::Internal(e) => {
                error!(error = %e, "request failed");
                json!({ "error": "internal server error" })
            }
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
