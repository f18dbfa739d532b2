// ABOUTME: RFC 6750 bearer token resolution across header, query, and form sources
// ABOUTME: Applies token grammar validation and multi-source conflict detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Token extraction core.
//!
//! Three candidate sources are evaluated independently: the configured header
//! (default `Authorization`), the `access_token` URI query parameter (GET
//! only, opt-in), and the `access_token` form parameter (form-encoded POST
//! only, opt-in). The combination rule is strict: zero candidates resolve to
//! no token, exactly one valid candidate resolves to that token, and any
//! other combination is a classified rejection. A malformed header candidate
//! still counts toward the conflict total, so a request presenting tokens
//! through two channels is never silently resolved using one of them.

use crate::errors::{BearerTokenError, ConfigError};
use crate::request::RequestView;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, Method};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Fixed parameter name for the query and form sources
const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Scheme prefix a header value must carry to be a bearer candidate
/// (case-sensitive keyword, single space)
const BEARER_PREFIX: &str = "Bearer ";

/// Media type gating the form-body source
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// RFC 6750 `b64token` class extended with JWT-common separators, plus
/// optional trailing `=` padding
const TOKEN_GRAMMAR: &str = r"^[A-Za-z0-9\-._~+/]+=*$";

/// Cached token grammar pattern
///
/// `None` only if the pattern fails to compile, in which case every candidate
/// is rejected as malformed rather than waved through unchecked.
fn token_grammar() -> Option<&'static Regex> {
    static TOKEN_GRAMMAR_RE: OnceLock<Option<Regex>> = OnceLock::new();
    TOKEN_GRAMMAR_RE
        .get_or_init(|| Regex::new(TOKEN_GRAMMAR).ok())
        .as_ref()
}

/// Candidate yielded by the header source
enum HeaderCandidate {
    /// No `Bearer`-scheme value on the configured header
    Absent,
    /// A single well-formed bearer value
    Token(String),
    /// A `Bearer`-scheme value violating the token grammar; still counts
    /// toward the conflict total
    Malformed,
}

impl HeaderCandidate {
    const fn count(&self) -> usize {
        match self {
            Self::Absent => 0,
            Self::Token(_) | Self::Malformed => 1,
        }
    }
}

/// Serde mirror of the resolver settings for configuration layers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Header inspected for the `Bearer` scheme
    pub header_name: String,
    /// Honor the `access_token` URI query parameter on GET requests
    pub allow_uri_query_parameter: bool,
    /// Honor the `access_token` form parameter on form-encoded POST requests
    pub allow_form_encoded_body_parameter: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            header_name: AUTHORIZATION.as_str().to_owned(),
            allow_uri_query_parameter: false,
            allow_form_encoded_body_parameter: false,
        }
    }
}

/// Locates and validates the bearer token among the request locations it may
/// legally appear in
///
/// A resolver holds configuration only. It is constructed once, configured
/// before first use, and safe for concurrent reuse across requests.
#[derive(Debug, Clone)]
pub struct BearerTokenResolver {
    header_name: HeaderName,
    allow_uri_query_parameter: bool,
    allow_form_encoded_body_parameter: bool,
}

impl Default for BearerTokenResolver {
    fn default() -> Self {
        Self {
            header_name: AUTHORIZATION,
            allow_uri_query_parameter: false,
            allow_form_encoded_body_parameter: false,
        }
    }
}

impl BearerTokenResolver {
    /// Create a resolver with the default configuration: header source only,
    /// standard `Authorization` header
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a resolver from a deserialized [`ResolverConfig`]
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidHeaderName`] if the configured header
    /// name is not a valid HTTP header name.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, ConfigError> {
        let header_name =
            config
                .header_name
                .parse::<HeaderName>()
                .map_err(|_| ConfigError::InvalidHeaderName {
                    name: config.header_name.clone(),
                })?;
        Ok(Self {
            header_name,
            allow_uri_query_parameter: config.allow_uri_query_parameter,
            allow_form_encoded_body_parameter: config.allow_form_encoded_body_parameter,
        })
    }

    /// Read the bearer token from a custom header instead of `Authorization`
    #[must_use]
    pub fn with_header_name(mut self, header_name: HeaderName) -> Self {
        self.header_name = header_name;
        self
    }

    /// Honor the `access_token` URI query parameter on GET requests
    #[must_use]
    pub fn with_uri_query_parameter(mut self, allow: bool) -> Self {
        self.allow_uri_query_parameter = allow;
        self
    }

    /// Honor the `access_token` form parameter on form-encoded POST requests
    #[must_use]
    pub fn with_form_encoded_body_parameter(mut self, allow: bool) -> Self {
        self.allow_form_encoded_body_parameter = allow;
        self
    }

    /// Resolve the bearer token for a request
    ///
    /// Evaluates the header, query-parameter, and form-parameter sources
    /// independently, then applies the combination rule. `Ok(None)` means no
    /// credential was offered.
    ///
    /// # Errors
    /// Returns [`BearerTokenError::Malformed`] when the configured header
    /// carries a `Bearer` value violating the token grammar, and
    /// [`BearerTokenError::MultipleTokens`] when more than one source
    /// presents a candidate, whether or not any of them is valid.
    pub fn resolve<R>(&self, request: &R) -> Result<Option<String>, BearerTokenError>
    where
        R: RequestView + ?Sized,
    {
        let header = self.resolve_from_header(request.headers())?;
        let query = self.resolve_from_query(request);
        let form = self.resolve_from_form(request);

        let candidates =
            header.count() + usize::from(query.is_some()) + usize::from(form.is_some());
        if candidates > 1 {
            tracing::warn!(
                header = %self.header_name,
                "rejecting request presenting bearer tokens through multiple sources"
            );
            return Err(BearerTokenError::MultipleTokens);
        }

        match header {
            HeaderCandidate::Malformed => {
                tracing::warn!(header = %self.header_name, "rejecting malformed bearer token");
                Err(BearerTokenError::Malformed)
            }
            HeaderCandidate::Token(token) => {
                tracing::debug!(header = %self.header_name, "resolved bearer token from header");
                Ok(Some(token))
            }
            HeaderCandidate::Absent => {
                if let Some(token) = query {
                    tracing::debug!("resolved bearer token from uri query parameter");
                    return Ok(Some(token));
                }
                if let Some(token) = form {
                    tracing::debug!("resolved bearer token from form body parameter");
                    return Ok(Some(token));
                }
                Ok(None)
            }
        }
    }

    /// Evaluate the header source
    ///
    /// Values of the configured header that do not carry the `Bearer ` prefix
    /// are invisible here; other schemes may legally share the header. Two or
    /// more `Bearer`-prefixed values on the same header are already multiple
    /// tokens, never resolved by picking one.
    fn resolve_from_header(
        &self,
        headers: &HeaderMap,
    ) -> Result<HeaderCandidate, BearerTokenError> {
        let mut bearer_values = headers
            .get_all(&self.header_name)
            .iter()
            .filter(|value| value.as_bytes().starts_with(BEARER_PREFIX.as_bytes()));

        let Some(value) = bearer_values.next() else {
            return Ok(HeaderCandidate::Absent);
        };
        if bearer_values.next().is_some() {
            return Err(BearerTokenError::MultipleTokens);
        }

        let Ok(value) = value.to_str() else {
            // Prefixed with the bearer scheme but not visible ASCII
            return Ok(HeaderCandidate::Malformed);
        };
        let token = value.get(BEARER_PREFIX.len()..).unwrap_or_default();
        let well_formed = token_grammar().is_some_and(|grammar| grammar.is_match(token));
        if well_formed {
            Ok(HeaderCandidate::Token(token.to_owned()))
        } else {
            Ok(HeaderCandidate::Malformed)
        }
    }

    /// Evaluate the query-parameter source (GET only, opt-in)
    fn resolve_from_query<R>(&self, request: &R) -> Option<String>
    where
        R: RequestView + ?Sized,
    {
        if !self.allow_uri_query_parameter || *request.method() != Method::GET {
            return None;
        }
        request
            .query_param(ACCESS_TOKEN_PARAM)
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
    }

    /// Evaluate the form-parameter source (form-encoded POST only, opt-in)
    fn resolve_from_form<R>(&self, request: &R) -> Option<String>
    where
        R: RequestView + ?Sized,
    {
        if !self.allow_form_encoded_body_parameter
            || *request.method() != Method::POST
            || !has_form_content_type(request.headers())
        {
            return None;
        }
        request
            .form_param(ACCESS_TOKEN_PARAM)
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
    }
}

/// Media type comparison by essence; parameters such as `charset=` are ignored
fn has_form_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(FORM_URLENCODED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn matches_grammar(token: &str) -> bool {
        token_grammar().is_some_and(|grammar| grammar.is_match(token))
    }

    #[test]
    fn test_token_grammar_accepts_jwt_shapes() {
        assert!(matches_grammar("mF_9.B5f-4.1JqM"));
        assert!(matches_grammar("abc123"));
        assert!(matches_grammar("a+b/c~d=="));
    }

    #[test]
    fn test_token_grammar_rejects_illegal_characters() {
        assert!(!matches_grammar(""));
        assert!(!matches_grammar("an\"invalid\"token"));
        assert!(!matches_grammar("two tokens"));
        assert!(!matches_grammar("pad=ding=inside"));
    }

    #[test]
    fn test_form_content_type_essence() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        assert!(has_form_content_type(&headers));

        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
        );
        assert!(has_form_content_type(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(!has_form_content_type(&headers));
    }
}
