//! Request error module
//!
//! Every way a movie request can fail, mapped to its HTTP status.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::http;

pub type ApiResult = Result<Response<Full<Bytes>>, ApiError>;

/// Terminal request failure. None of these leave a partial effect on the store.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed { allow: &'static str },

    #[error("Bad request: {0}")]
    BadRequest(&'static str),

    #[error("Not found")]
    NotFound,

    #[error("413 Payload Too Large")]
    PayloadTooLarge,
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Plain-text response carrying the error message
    pub fn into_response(self) -> Response<Full<Bytes>> {
        match self {
            Self::MethodNotAllowed { allow } => http::build_405_response(allow),
            Self::PayloadTooLarge => http::build_413_response(),
            other => http::build_text_response(other.status(), &other.to_string()),
        }
    }
}
