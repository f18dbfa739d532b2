// ABOUTME: Conversion of resolution outcomes into authentication request values
// ABOUTME: Produces the contract consumed by the downstream authentication pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Authentication request construction on top of the resolver.
//!
//! The converter is the seam between token resolution and the authentication
//! pipeline: an absent token yields `Ok(None)` so the chain can proceed
//! unauthenticated, a resolved token is wrapped unverified, and a rejection
//! propagates unchanged for the HTTP layer to surface as a 401 challenge.

use crate::errors::BearerTokenError;
use crate::request::RequestView;
use crate::resolver::BearerTokenResolver;
use std::fmt;

/// Authentication request carrying an unverified bearer token
///
/// Verification belongs to the downstream authentication provider; this value
/// only transports the credential. `Debug` redacts the token so request dumps
/// cannot leak it.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerAuthenticationRequest {
    token: String,
}

impl BearerAuthenticationRequest {
    /// Wrap a resolved token
    #[must_use]
    pub fn new(token: String) -> Self {
        Self { token }
    }

    /// The raw token string, unverified
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Consume the request and yield the raw token
    #[must_use]
    pub fn into_token(self) -> String {
        self.token
    }
}

impl fmt::Debug for BearerAuthenticationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuthenticationRequest")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Builds authentication requests from incoming requests
#[derive(Debug, Clone, Default)]
pub struct BearerTokenAuthenticationConverter {
    resolver: BearerTokenResolver,
}

impl BearerTokenAuthenticationConverter {
    /// Create a converter over a default resolver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter over a configured resolver
    #[must_use]
    pub fn with_resolver(resolver: BearerTokenResolver) -> Self {
        Self { resolver }
    }

    /// The underlying resolver
    #[must_use]
    pub fn resolver(&self) -> &BearerTokenResolver {
        &self.resolver
    }

    /// Convert a request into an authentication request
    ///
    /// `Ok(None)` means no credential was offered; no authentication attempt
    /// is made and the downstream chain proceeds unauthenticated.
    ///
    /// # Errors
    /// Propagates the resolver's classified rejections unchanged; the error's
    /// `Display` text is exactly the message the HTTP layer surfaces in its
    /// `WWW-Authenticate: Bearer` challenge.
    pub fn convert<R>(
        &self,
        request: &R,
    ) -> Result<Option<BearerAuthenticationRequest>, BearerTokenError>
    where
        R: RequestView + ?Sized,
    {
        Ok(self
            .resolver
            .resolve(request)?
            .map(BearerAuthenticationRequest::new))
    }
}
