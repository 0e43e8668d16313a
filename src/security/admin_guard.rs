//! IP restriction for the admin area.
//!
//! Requests whose path starts with `/{prefix}` must come from an address
//! inside one of the allowed subnets. Everything else passes untouched.

use std::net::{IpAddr, Ipv4Addr};

use axum::http::{header::InvalidHeaderName, HeaderMap, HeaderName};
use ipnet::Ipv4Net;
use thiserror::Error;

use crate::config::AdminAreaConfig;
use crate::security::client_ip::{resolve_client_address, AddressParseError};

/// Outcome of an access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Why a request to the admin area was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DenyReason {
    #[error("invalid client address: {0}")]
    InvalidAddress(#[from] AddressParseError),

    #[error("disallowed IP address: {0}")]
    AddressNotAllowed(Ipv4Addr),
}

/// Returns true if `path` falls under `/{prefix}`.
///
/// Plain string prefix test: case-sensitive, and `/administrator` is
/// protected under prefix `admin`.
pub fn is_protected_path(path: &str, prefix: &str) -> bool {
    path.strip_prefix('/')
        .is_some_and(|rest| rest.starts_with(prefix))
}

/// The request path the way the upstream will route it.
///
/// Percent-decoded once, empty and `.` segments dropped, `..` applied.
/// A trailing slash is kept. Returns `None` when the decoded bytes are
/// not UTF-8.
pub fn canonical_path(raw: &str) -> Option<String> {
    let decoded = urlencoding::decode(raw).ok()?;

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut path = format!("/{}", segments.join("/"));
    if !segments.is_empty() && decoded.ends_with('/') {
        path.push('/');
    }
    Some(path)
}

/// Decide whether a request may proceed.
///
/// `path` is the raw request path; it is canonicalized before the prefix
/// test and an undecodable path is treated as protected.
pub fn check_access(
    path: &str,
    headers: &HeaderMap,
    remote_address: Option<IpAddr>,
    allow_list: &[Ipv4Net],
    forwarded_header: &HeaderName,
    prefix: &str,
) -> Decision {
    let protected = canonical_path(path).map_or(true, |p| is_protected_path(&p, prefix));
    if !protected {
        return Decision::Allow;
    }

    check_client(headers, remote_address, allow_list, forwarded_header)
}

fn check_client(
    headers: &HeaderMap,
    remote_address: Option<IpAddr>,
    allow_list: &[Ipv4Net],
    forwarded_header: &HeaderName,
) -> Decision {
    let client = match resolve_client_address(headers, forwarded_header, remote_address) {
        Ok(ip) => ip,
        Err(e) => return Decision::Deny(e.into()),
    };

    if allow_list.iter().any(|net| net.contains(&client)) {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::AddressNotAllowed(client))
    }
}

/// Access guard built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    /// `"/" + prefix`
    protected_prefix: String,
    allow_list: Vec<Ipv4Net>,
    forwarded_header: HeaderName,
}

impl AccessGuard {
    pub fn new(prefix: &str, allow_list: Vec<Ipv4Net>, forwarded_header: HeaderName) -> Self {
        Self {
            protected_prefix: format!("/{prefix}"),
            allow_list,
            forwarded_header,
        }
    }

    /// Build from the admin section of the config.
    pub fn from_config(config: &AdminAreaConfig) -> Result<Self, InvalidHeaderName> {
        let forwarded_header = HeaderName::from_bytes(config.forwarded_header.as_bytes())?;
        Ok(Self::new(
            &config.prefix,
            config.allowed_subnets.clone(),
            forwarded_header,
        ))
    }

    /// The configured prefix, without the leading slash.
    pub fn prefix(&self) -> &str {
        &self.protected_prefix[1..]
    }

    pub fn allow_list(&self) -> &[Ipv4Net] {
        &self.allow_list
    }

    pub fn check(&self, path: &str, headers: &HeaderMap, remote_address: Option<IpAddr>) -> Decision {
        let protected = canonical_path(path).map_or(true, |p| p.starts_with(&self.protected_prefix));
        if !protected {
            return Decision::Allow;
        }

        check_client(headers, remote_address, &self.allow_list, &self.forwarded_header)
    }
}
