//! gyandarshak-client: HTTP access to the counselling API.
//!
//! Implements the `CounsellingApi` trait over reqwest, plus an in-memory
//! mock for tests and the client configuration loader.

pub mod config;
mod error;
pub mod http;
pub mod mock;

pub use config::{load_config_from, ClientConfig};
pub use http::HttpClient;
pub use mock::MockApi;
