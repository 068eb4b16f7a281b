//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in MilenaShop                             │
//! │                                                                         │
//! │  Front end                   Rust Backend                               │
//! │  ─────────                   ────────────                               │
//! │                                                                         │
//! │  save_product()                                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Client check? ─── CoreError::NoImages ─────────────┐           │  │
//! │  │         │                                           │           │  │
//! │  │         ▼                                           ▼           │  │
//! │  │  Remote call? ─── RemoteError (logged) ───────── ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  e.code    = "NO_IMAGES"                                                │
//! │  e.message = "Debes tener al menos una imagen (existente o nueva)."     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Remote failures are logged with their full detail and surfaced with a
//! short generic message chosen by the command.

use serde::Serialize;

use milena_core::{CoreError, PRODUCTS_BUCKET};
use milena_remote::RemoteError;

use crate::config::ConfigError;
use crate::session::SessionError;

/// API error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_CREDENTIALS",
///   "message": "Credenciales incorrectas"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or category not in the loaded list
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Image ceiling exceeded
    TooManyImages,

    /// Submit without any image
    NoImages,

    /// Login mismatch
    InvalidCredentials,

    /// Admin command while logged out
    Unauthorized,

    /// A submit is already in flight
    Busy,

    /// A staged image failed to upload
    UploadFailed,

    /// Hosted backend call failed
    RemoteError,

    /// Local session storage failed
    SessionError,

    /// Configuration could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

/// Generic message for a failed read.
pub const LOAD_FAILED: &str = "Error cargando datos";
/// Generic message for a failed product delete.
pub const DELETE_PRODUCT_FAILED: &str = "Error al eliminar";
/// Generic message for a failed product insert or update.
pub const SAVE_PRODUCT_FAILED: &str = "Error guardando producto";
/// Generic message for a failed category insert or rename.
pub const SAVE_CATEGORY_FAILED: &str = "Error al guardar categoría";
/// Generic message for a failed category delete, foreign-key conflicts included.
pub const DELETE_CATEGORY_FAILED: &str =
    "Error al eliminar categoría (posiblemente tenga productos asociados)";

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: i64) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} {} no encontrado", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Logs a remote failure and hides it behind `message`.
    pub fn remote(message: &str, err: RemoteError) -> Self {
        if err.is_foreign_key_violation() {
            tracing::error!(error = %err, "Remote write rejected by a foreign key");
        } else {
            tracing::error!(error = %err, status = ?err.status(), "Remote call failed");
        }
        ApiError::new(ErrorCode::RemoteError, message)
    }

    /// Failure of one staged upload; names the file and the bucket.
    pub fn upload_failed(file_name: &str) -> Self {
        ApiError::new(
            ErrorCode::UploadFailed,
            format!(
                "Error al subir la imagen {}. Verifica que el bucket '{}' exista y sea público.",
                file_name, PRODUCTS_BUCKET
            ),
        )
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::TooManyImages { max, .. } => ApiError::new(
                ErrorCode::TooManyImages,
                format!("Máximo {} imágenes permitidas por producto.", max),
            ),
            CoreError::NoImages => ApiError::new(
                ErrorCode::NoImages,
                "Debes tener al menos una imagen (existente o nueva).",
            ),
            CoreError::InvalidCredentials => {
                ApiError::new(ErrorCode::InvalidCredentials, "Credenciales incorrectas")
            }
            CoreError::NotLoggedIn => {
                ApiError::new(ErrorCode::Unauthorized, "Debes iniciar sesión")
            }
            CoreError::Busy => ApiError::new(ErrorCode::Busy, "Guardando..."),
            CoreError::FormClosed => ApiError::validation("No hay ningún producto en edición"),
            CoreError::NotFound { entity, id } => ApiError::not_found(entity, id),
            CoreError::IndexOutOfRange { .. } => ApiError::validation(err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Remote errors with no command-specific message.
impl From<RemoteError> for ApiError {
    fn from(err: RemoteError) -> Self {
        ApiError::remote(LOAD_FAILED, err)
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        tracing::error!(error = %err, "Session storage failed");
        ApiError::new(ErrorCode::SessionError, "No se pudo guardar la sesión")
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use milena_core::ValidationError;

    #[test]
    fn test_image_ceiling_message() {
        let err = ApiError::from(CoreError::TooManyImages {
            max: 5,
            requested: 6,
        });
        assert_eq!(err.code, ErrorCode::TooManyImages);
        assert_eq!(err.message, "Máximo 5 imágenes permitidas por producto.");
    }

    #[test]
    fn test_upload_failed_message_names_file() {
        let err = ApiError::upload_failed("jarron.jpg");
        assert_eq!(
            err.message,
            "Error al subir la imagen jarron.jpg. Verifica que el bucket 'products' exista y sea público."
        );
    }

    #[test]
    fn test_remote_error_is_generic() {
        let err = ApiError::remote(
            DELETE_CATEGORY_FAILED,
            RemoteError::ForeignKeyViolation {
                message: "still referenced".to_string(),
            },
        );
        assert_eq!(err.code, ErrorCode::RemoteError);
        assert!(!err.message.contains("referenced"));
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::from(CoreError::Validation(ValidationError::required("name")));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "name is required");
    }
}
