use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::fmt;

/// Generic message returned for faults whose details must stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

/// Application-specific error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Bad request error (invalid input).
    BadRequest(String),
    /// The request body is not valid JSON.
    MalformedJson,
    /// The request did not declare a JSON content type.
    UnsupportedContentType,
    /// The request body exceeds the configured size limit.
    PayloadTooLarge,
    /// Resource not found error.
    NotFound(String),
    /// Known route, wrong HTTP method.
    MethodNotAllowed,
    /// Certificate or private key could not be read.
    CredentialError(String),
    /// Error interacting with the Finkok API.
    ExternalApiError(String),
    /// Finkok answered with its own error payload, returned to the caller as-is.
    UpstreamRejected(Value),
    /// The Finkok payload could not be reshaped.
    ProcessingError(String),
    /// Internal server error.
    InternalError(String),
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::MalformedJson
            | AppError::UnsupportedContentType => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::CredentialError(_)
            | AppError::ExternalApiError(_)
            | AppError::UpstreamRejected(_)
            | AppError::ProcessingError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body sent to the caller.
    ///
    /// Batch queries embed this body as the per-item result, so it must be
    /// usable without the status code.
    pub fn body(&self) -> Value {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => json!({ "error": msg }),
            AppError::MalformedJson => json!({ "error": "JSON malformado" }),
            AppError::UnsupportedContentType => {
                json!({ "error": "Content-Type debe ser application/json" })
            }
            AppError::PayloadTooLarge => {
                json!({ "error": "El cuerpo de la petición excede el tamaño máximo" })
            }
            AppError::MethodNotAllowed => json!({ "error": "Método no permitido" }),
            AppError::CredentialError(_) => json!({ "error": "Error cargando certificados" }),
            AppError::ExternalApiError(msg) | AppError::ProcessingError(msg) => {
                json!({ "error": msg })
            }
            AppError::UpstreamRejected(payload) => payload.clone(),
            AppError::InternalError(_) => json!({ "error": INTERNAL_ERROR_MESSAGE }),
        }
    }

    /// Logs the error at a level matching its severity.
    ///
    /// Client input errors are not system faults and stay at debug level.
    pub fn log(&self) {
        match self {
            AppError::BadRequest(_)
            | AppError::MalformedJson
            | AppError::UnsupportedContentType
            | AppError::PayloadTooLarge
            | AppError::NotFound(_)
            | AppError::MethodNotAllowed => tracing::debug!("Client error: {}", self),
            AppError::UpstreamRejected(_) => tracing::warn!("{}", self),
            AppError::CredentialError(_)
            | AppError::ExternalApiError(_)
            | AppError::ProcessingError(_)
            | AppError::InternalError(_) => tracing::error!("{}", self),
        }
    }
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::MalformedJson => write!(f, "Bad request: malformed JSON body"),
            AppError::UnsupportedContentType => {
                write!(f, "Bad request: expected application/json content type")
            }
            AppError::PayloadTooLarge => write!(f, "Payload too large"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::MethodNotAllowed => write!(f, "Method not allowed"),
            AppError::CredentialError(msg) => write!(f, "Credential error: {}", msg),
            AppError::ExternalApiError(msg) => write!(f, "External API error: {}", msg),
            AppError::UpstreamRejected(payload) => {
                write!(f, "Finkok returned an error payload: {}", payload)
            }
            AppError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response with a JSON body.
    fn into_response(self) -> Response {
        self.log();
        (self.status_code(), Json(self.body())).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalApiError(format!("Error de conexión: {}", err))
    }
}

impl From<JsonRejection> for AppError {
    /// Maps axum's JSON extractor rejections onto the 4xx responses clients expect.
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge;
        }

        match rejection {
            JsonRejection::MissingJsonContentType(_) => AppError::UnsupportedContentType,
            JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
                AppError::MalformedJson
            }
            other => AppError::BadRequest(format!("Petición incorrecta: {}", other.body_text())),
        }
    }
}
