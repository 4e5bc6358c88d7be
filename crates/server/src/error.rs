//! Uniform JSON error responses for request handlers.
//!
//! Each handler defines its own error enum and implements [`RequestError`]
//! for it. The blanket `From` impl lets handlers return
//! `Result<_, BoxRequestError>` and use `?` on any of them, and the
//! [`IntoResponse`] impl renders every failure as the same JSON shape:
//!
//! ```json
//! {"error_code": "INVALID_BASE64", "error_message": "..."}
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt::Display;

/// A request-scoped error that knows its HTTP status and a stable
/// machine-readable code.
pub trait RequestError: Display + Send + Sync + 'static {
    /// Stable identifier for this error kind, e.g. `"MISSING_FIELD"`.
    fn error_code(&self) -> &'static str;

    /// HTTP status to respond with.
    fn status_code(&self) -> StatusCode;
}

/// Boxed request error, the error side of every handler signature.
pub type BoxRequestError = Box<dyn RequestError>;

impl IntoResponse for BoxRequestError {
    fn into_response(self) -> Response {
        let body = json!({
            "error_code": self.error_code(),
            "error_message": self.to_string(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}

impl<E: RequestError> From<E> for BoxRequestError {
    fn from(err: E) -> Self {
        Box::new(err)
    }
}
