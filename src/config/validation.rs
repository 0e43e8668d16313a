//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, prefix shape and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GuardConfig → Result<(), Vec<ValidationError>>
//! - An empty allow-list is legal; the admin area is then unreachable

use std::net::SocketAddr;

use axum::http::HeaderName;
use thiserror::Error;

use crate::config::schema::GuardConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("upstream.address '{0}' is not a socket address")]
    InvalidUpstreamAddress(String),

    #[error("admin.prefix must not be empty")]
    EmptyPrefix,

    #[error("admin.prefix '{0}' must not start with '/'")]
    PrefixLeadingSlash(String),

    #[error("admin.forwarded_header '{0}' is not a valid header name")]
    InvalidForwardedHeader(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
}

/// Check a parsed configuration, collecting every error.
pub fn validate_config(config: &GuardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.upstream.address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidUpstreamAddress(
            config.upstream.address.clone(),
        ));
    }

    let prefix = &config.admin.prefix;
    if prefix.is_empty() {
        // "/" would match every path
        errors.push(ValidationError::EmptyPrefix);
    } else if prefix.starts_with('/') {
        errors.push(ValidationError::PrefixLeadingSlash(prefix.clone()));
    }

    if HeaderName::from_bytes(config.admin.forwarded_header.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidForwardedHeader(
            config.admin.forwarded_header.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
