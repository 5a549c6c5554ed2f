#![deny(missing_docs)]
//! Netmet API contains the shared types and the error type used by the
//! netmet RIPE Atlas client and orchestration crates.
//!
//! The wire formats defined here mirror what the RIPE Atlas v2 REST API
//! actually sends and accepts. Unknown properties on platform objects are
//! preserved via flattened maps so that persisted datasets round-trip
//! without loss.

mod error;
pub use error::*;

mod probe;
pub use probe::*;

mod measurement;
pub use measurement::*;

mod credentials;
pub use credentials::*;
