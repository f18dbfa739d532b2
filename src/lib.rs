// ABOUTME: Library entry point for the bearer-resolver crate
// ABOUTME: RFC 6750 bearer token resolution and authentication request construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Bearer Resolver
//!
//! RFC 6750 bearer token resolution for resource servers. A caller may present
//! an access token through the `Authorization` header, a custom header, the
//! `access_token` URI query parameter, or the `access_token` form-encoded body
//! parameter. Exactly one presentation method is accepted per request:
//! ambiguous or malformed presentations are rejected deterministically before
//! any authentication attempt runs.
//!
//! Token verification (signatures, expiry, scopes) is out of scope; the crate
//! resolves the credential and hands it to the downstream authentication
//! provider untouched.
//!
//! ## Example
//!
//! ```rust
//! use bearer_resolver::request::RequestParts;
//! use bearer_resolver::resolver::BearerTokenResolver;
//! use http::{header, HeaderValue, Method};
//!
//! let resolver = BearerTokenResolver::new();
//! let request = RequestParts::new(Method::GET).with_header(
//!     header::AUTHORIZATION,
//!     HeaderValue::from_static("Bearer mF_9.B5f-4.1JqM"),
//! );
//!
//! let token = resolver.resolve(&request).ok().flatten();
//! assert_eq!(token.as_deref(), Some("mF_9.B5f-4.1JqM"));
//! ```
//!
//! ## Architecture
//!
//! - **request**: the request-view interface the resolver reads through
//! - **resolver**: source evaluation, token grammar, conflict detection
//! - **converter**: wraps a resolution outcome into an authentication request
//! - **errors**: classified rejections with fixed challenge messages

/// Classified resolution rejections, configuration errors, and HTTP error bodies
pub mod errors;

/// Request-view abstraction decoupling resolution from any HTTP server
pub mod request;

/// Token extraction across header, query-parameter, and form-parameter sources
pub mod resolver;

/// Conversion of resolution outcomes into authentication request values
pub mod converter;
