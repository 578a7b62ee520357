//! HTTP surface of the GreenPulse backend.
//!
//! The binary in `main.rs` wires configuration and logging, then hands a
//! [`greenpulse_core::Monitor`] to [`server::serve`].

pub mod server;
