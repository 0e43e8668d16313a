//! Client address resolution behind a reverse proxy.
//!
//! Priority: last entry of the forwarding header (appended by the edge
//! proxy directly in front of us) -> transport peer address.
//! Earlier forwarding entries are client supplied and ignored.

use std::net::{IpAddr, Ipv4Addr};

use axum::http::{HeaderMap, HeaderName};
use thiserror::Error;

/// Default forwarding header.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// The resolved address string was not a dotted-quad IPv4 address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid IPv4 address")]
pub struct AddressParseError {
    pub value: String,
}

/// Resolve the client address of a request.
///
/// `remote_address` is the direct TCP peer, which may itself be a proxy.
/// IPv6 peers and IPv6 forwarding entries are rejected.
pub fn resolve_client_address(
    headers: &HeaderMap,
    forwarded_header: &HeaderName,
    remote_address: Option<IpAddr>,
) -> Result<Ipv4Addr, AddressParseError> {
    let candidate = match forwarded_entry(headers, forwarded_header) {
        Some(entry) => entry,
        None => remote_address.map(|ip| ip.to_string()).unwrap_or_default(),
    };

    candidate
        .parse::<Ipv4Addr>()
        .map_err(|_| AddressParseError { value: candidate })
}

/// Last entry of a non-empty forwarding header, trimmed.
fn forwarded_entry(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    let value = headers.get(name)?;
    if value.is_empty() {
        return None;
    }

    // Opaque bytes still count as a present header; they just won't parse.
    let raw = String::from_utf8_lossy(value.as_bytes());
    let last = raw.rsplit(',').next().unwrap_or_default().trim();
    Some(last.to_string())
}
