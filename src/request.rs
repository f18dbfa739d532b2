// ABOUTME: Request-view abstraction decoupling token resolution from any HTTP server
// ABOUTME: Provides the RequestView trait and the RequestParts value type for parsed requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Request-view interface consumed by the resolver.
//!
//! The resolver never touches a server framework directly; it reads requests
//! through [`RequestView`], which exposes only the method, the headers, and
//! zero-or-one-valued query and form parameter lookups. [`RequestParts`] is a
//! plain owned implementation for tests and for HTTP layers that have already
//! parsed the request.

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use url::form_urlencoded;

/// Read-only view of an incoming request's token-bearing surfaces
///
/// Implementations are expected to be cheap accessors over an
/// already-received request; the resolver performs no I/O through this trait.
pub trait RequestView {
    /// HTTP method of the request
    fn method(&self) -> &Method;

    /// All request headers (name lookup is case-insensitive)
    fn headers(&self) -> &HeaderMap;

    /// Zero-or-one valued lookup of a URI query parameter
    fn query_param(&self, name: &str) -> Option<&str>;

    /// Zero-or-one valued lookup of a form-encoded body parameter
    ///
    /// Callers only materialize form parameters when the request body was
    /// actually form-urlencoded; the resolver additionally gates this source
    /// on method and content type.
    fn form_param(&self, name: &str) -> Option<&str>;
}

/// Owned request metadata implementing [`RequestView`]
///
/// Built up with the `with_*` methods. Repeated header names accumulate as in
/// HTTP; parameter lookups return the first value for a name.
#[derive(Debug, Clone)]
pub struct RequestParts {
    method: Method,
    headers: HeaderMap,
    query: Vec<(String, String)>,
    form: Vec<(String, String)>,
}

impl RequestParts {
    /// Create an empty view with the given method
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            query: Vec::new(),
            form: Vec::new(),
        }
    }

    /// Append a header value
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Add a URI query parameter
    #[must_use]
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Add a form-encoded body parameter
    #[must_use]
    pub fn with_form_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((name.into(), value.into()));
        self
    }

    /// Ingest a raw query string (without the leading `?`)
    #[must_use]
    pub fn with_raw_query(mut self, raw: &str) -> Self {
        self.query.extend(
            form_urlencoded::parse(raw.as_bytes())
                .map(|(name, value)| (name.into_owned(), value.into_owned())),
        );
        self
    }

    /// Ingest a raw `application/x-www-form-urlencoded` body
    ///
    /// Only populates the form parameters; the content-type header stays the
    /// caller's responsibility, mirroring how an HTTP layer hands over a
    /// request it has already parsed.
    #[must_use]
    pub fn with_form_body(mut self, raw: &str) -> Self {
        self.form.extend(
            form_urlencoded::parse(raw.as_bytes())
                .map(|(name, value)| (name.into_owned(), value.into_owned())),
        );
        self
    }
}

impl RequestView for RequestParts {
    fn method(&self) -> &Method {
        &self.method
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, value)| value.as_str())
    }

    fn form_param(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, value)| value.as_str())
    }
}
