//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the guard.
//! All types derive Serde traits for deserialization from config files.

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

use crate::security::X_FORWARDED_FOR;

/// Root configuration for the admin guard.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GuardConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Application that receives allowed traffic.
    pub upstream: UpstreamConfig,

    /// Protected area and its allow-list.
    pub admin: AdminAreaConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Upstream address (e.g., "127.0.0.1:3000").
    pub address: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Admin area restriction.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminAreaConfig {
    /// Path prefix without the leading slash (e.g., "admin").
    pub prefix: String,

    /// Subnets allowed to reach the admin area, in CIDR notation.
    pub allowed_subnets: Vec<Ipv4Net>,

    /// Header carrying the proxy chain. The last entry is trusted.
    pub forwarded_header: String,
}

impl Default for AdminAreaConfig {
    fn default() -> Self {
        Self {
            prefix: "admin".to_string(),
            // Empty means nobody reaches the admin area.
            allowed_subnets: Vec::new(),
            forwarded_header: X_FORWARDED_FOR.to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
