// ABOUTME: Classified error types for bearer token resolution failures
// ABOUTME: Carries RFC 6750 error codes, HTTP status mapping, and serializable error bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Error handling for token resolution.
//!
//! Resolution failures are classified and final: a malformed token and a
//! multi-source conflict each carry a fixed human-readable message that the
//! HTTP layer surfaces in its bearer challenge. Setup-time configuration
//! problems use a separate type so they can never be confused with
//! per-request rejections.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RFC 6750 error codes attached to resolution rejections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BearerErrorCode {
    /// The request presentation itself is invalid (ambiguous token sources)
    #[serde(rename = "invalid_request")]
    InvalidRequest,
    /// The presented token violates the bearer token grammar
    #[serde(rename = "invalid_token")]
    InvalidToken,
}

impl BearerErrorCode {
    /// RFC 6750 registry name for this code
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::InvalidToken => "invalid_token",
        }
    }
}

/// Classified bearer token resolution failure
///
/// The `Display` text of each variant is the exact message the HTTP layer is
/// expected to surface in its `WWW-Authenticate: Bearer` challenge; downstream
/// code matches on the variant, not on the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerTokenError {
    /// A `Bearer`-scheme header value violated the token grammar
    #[error("Bearer token is malformed")]
    Malformed,
    /// More than one candidate source presented a token simultaneously
    #[error("Found multiple bearer tokens in the request")]
    MultipleTokens,
}

impl BearerTokenError {
    /// RFC 6750 error code for this rejection
    #[must_use]
    pub const fn error_code(self) -> BearerErrorCode {
        match self {
            Self::Malformed => BearerErrorCode::InvalidToken,
            Self::MultipleTokens => BearerErrorCode::InvalidRequest,
        }
    }

    /// HTTP status this rejection maps to
    ///
    /// Both rejection classes surface as 401 so the HTTP layer answers with a
    /// `WWW-Authenticate: Bearer` challenge rather than a plain client error.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::Malformed | Self::MultipleTokens => 401,
        }
    }
}

/// Setup-time configuration failure, never raised during resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The configured bearer token header name is not a valid HTTP header name
    #[error("Invalid bearer token header name: {name}")]
    InvalidHeaderName {
        /// Name that failed header-name parsing
        name: String,
    },
}

/// Serializable RFC 6750 error body for HTTP layers
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// RFC 6750 error code
    pub error: BearerErrorCode,
    /// Fixed human-readable rejection message
    pub error_description: String,
}

impl From<BearerTokenError> for ErrorResponse {
    fn from(error: BearerTokenError) -> Self {
        Self {
            error: error.error_code(),
            error_description: error.to_string(),
        }
    }
}

#[cfg(feature = "http-response")]
mod http_response {
    use super::{BearerTokenError, ErrorResponse};
    use axum::http::header::WWW_AUTHENTICATE;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    impl IntoResponse for BearerTokenError {
        fn into_response(self) -> Response {
            let challenge = format!("Bearer error=\"{}\"", self.error_code().as_str());
            (
                StatusCode::UNAUTHORIZED,
                [(WWW_AUTHENTICATE, challenge)],
                Json(ErrorResponse::from(self)),
            )
                .into_response()
        }
    }
}
