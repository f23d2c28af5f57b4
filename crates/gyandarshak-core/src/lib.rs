//! gyandarshak-core: data model, API trait, and test-attempt flow.
//!
//! This crate holds everything the Gyandarshak client knows independently of
//! the transport: the catalog and account types, the online-test types, the
//! `CounsellingApi` trait, and the state machine behind taking a test.

pub mod answers;
pub mod assessment;
pub mod error;
pub mod flow;
pub mod model;
pub mod traits;

pub use error::{ApiError, FlowError};
pub use traits::{CounsellingApi, Credential};
