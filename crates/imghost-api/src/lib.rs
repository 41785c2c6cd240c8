//! HTTP surface for the image hosting service.
//!
//! Exposed as a library so integration tests can build the router
//! without spawning the binary.

pub mod error;
pub mod handlers;
pub mod respond;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
