//! Engine HTTP gateway

mod client;

pub use client::{error_from_body, join_url, ApiClient, API_KEY_HEADER};
