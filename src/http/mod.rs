//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, connect info)
//!     → middleware/admin_guard.rs (allow or 400)
//!     → server.rs (forward to upstream)
//!     → Send response to client
//! ```

pub mod middleware;
pub mod server;

pub use server::{HttpServer, ServerError};
