//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → admin_guard.rs (decode the path; is it under the admin prefix?)
//!     → client_ip.rs (last forwarded entry, else peer address)
//!     → admin_guard.rs (is the address in an allowed subnet?)
//!     → Decision handed back to the HTTP layer
//! ```
//!
//! # Design Decisions
//! - Fail closed: unparseable or non-IPv4 addresses are denied
//! - Pure functions over immutable config; no locks, no I/O

pub mod admin_guard;
pub mod client_ip;

pub use admin_guard::{canonical_path, check_access, is_protected_path, AccessGuard, Decision, DenyReason};
pub use client_ip::{resolve_client_address, AddressParseError, X_FORWARDED_FOR};
