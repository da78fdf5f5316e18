//! Typed error handling for the hotel-booking services
//!
//! Every service operation returns [`ServiceError`] so HTTP handlers can map
//! failures to status codes without string matching.
//!
//! # Error Categories
//!
//! - [`ServiceError::Validation`]: missing or malformed fields on create/update
//! - [`ServiceError::InvalidFilter`]: malformed browse filter
//! - [`ServiceError::NotFound`]: referenced hotel, room or customer does not exist
//! - [`ServiceError::NotOwned`]: a room belongs to another hotel
//! - [`ServiceError::AlreadyExists`]: username already registered
//! - [`ServiceError::InvalidCredentials`]: login rejected
//! - [`ServiceError::PasswordHash`]: argon2 could not hash a password
//! - [`ServiceError::Storage`]: the document store failed; never retried here
//!
//! # Example
//!
//! ```rust,ignore
//! match hotel_service.remove_room_from_hotel(&hotel, 7).await {
//!     Ok(()) => {}
//!     Err(ServiceError::NotOwned { room_code, .. }) => {
//!         println!("room {} belongs elsewhere", room_code);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// Result alias used by every service
pub type ServiceResult<T> = Result<T, ServiceError>;

/// The main error type returned by services
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Missing or malformed required field(s)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Malformed filter value passed to a browse operation
    #[error("Invalid filter '{field}': {message}")]
    InvalidFilter { field: String, message: String },

    /// Referenced entity does not exist
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    /// Room exists but is attached to a different hotel
    #[error("Room '{room_code}' does not belong to hotel '{hotel_code}'")]
    NotOwned { room_code: i64, hotel_code: i64 },

    /// Unique key already taken
    #[error("{entity} '{key}' already exists")]
    AlreadyExists { entity: &'static str, key: String },

    /// Username/password pair did not match
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password could not be hashed
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// Document store failure, propagated unchanged
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ServiceError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        ServiceError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn invalid_filter(field: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::InvalidFilter {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::InvalidFilter { .. } => StatusCode::BAD_REQUEST,
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::NotOwned { .. } => StatusCode::BAD_REQUEST,
            ServiceError::AlreadyExists { .. } => StatusCode::CONFLICT,
            ServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ServiceError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::InvalidFilter { .. } => "INVALID_FILTER",
            ServiceError::NotFound { .. } => "NOT_FOUND",
            ServiceError::NotOwned { .. } => "NOT_OWNED",
            ServiceError::AlreadyExists { .. } => "ALREADY_EXISTS",
            ServiceError::InvalidCredentials => "INVALID_CREDENTIALS",
            ServiceError::PasswordHash(_) => "PASSWORD_HASH_FAILED",
            ServiceError::Storage(_) => "STORAGE_UNAVAILABLE",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ServiceError::Validation(e) => Some(serde_json::json!({ "fields": e.fields() })),
            ServiceError::InvalidFilter { field, .. } => {
                Some(serde_json::json!({ "field": field }))
            }
            ServiceError::NotFound { entity, key } => Some(serde_json::json!({
                "entity": entity,
                "key": key
            })),
            ServiceError::NotOwned {
                room_code,
                hotel_code,
            } => Some(serde_json::json!({
                "roomCode": room_code,
                "hotelCode": hotel_code
            })),
            _ => None,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match &self {
            ServiceError::Storage(e) => tracing::error!(error = %e, "document store failure"),
            ServiceError::PasswordHash(e) => tracing::error!(error = %e, "password hashing failure"),
            _ => {}
        }
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

/// One or more fields failed validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationError {
    fields: Vec<FieldValidationError>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for one field
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.push(FieldValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn fields(&self) -> &[FieldValidationError] {
        &self.fields
    }

    /// Names of the failing fields, in the order they were checked
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|e| e.field.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .fields
            .iter()
            .map(|e| format!("{} ({})", e.field, e.message))
            .collect();
        write!(f, "Invalid or missing field(s): {}", msgs.join(", "))
    }
}

impl std::error::Error for ValidationError {}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let mut result = ValidationError::new();
        for (field, errors) in fields {
            for error in errors {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string());
                result.push(field.to_string(), message);
            }
        }
        result
    }
}
