//! Integration test utilities for the console
//!
//! This crate runs an in-process fake engine over real HTTP and WebSocket
//! and records every request it sees, so tests can assert exactly what the
//! console sent (or that it sent nothing at all).


pub use fake_engine::*;
pub use fixtures::*;
