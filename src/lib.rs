//! Admin Area IP Guard Library
//!
//! Restricts an administrative path prefix to a set of IPv4 subnets and
//! forwards everything else to an upstream application.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod security;

pub use config::GuardConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use security::{AccessGuard, Decision, DenyReason};
