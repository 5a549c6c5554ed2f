#![deny(missing_docs)]
//! Netmet core drives the RIPE Atlas measurement platform: it fetches
//! probe inventories (vantage points and targets), selects a random
//! probe/target pair, submits one-off traceroute measurements, and
//! retrieves, prints and persists their results.
//!
//! Everything is sequential and blocking. The single fallback path in
//! the whole tool is the probe selector's wholesale switch from the
//! primary datasets to the correction datasets; every other failure
//! propagates to the caller as an [netmet_api::NmError].

mod config;
pub use config::*;

mod dataset;
pub use dataset::*;

mod select;
pub use select::*;

mod inventory;
pub use inventory::*;

mod submit;
pub use submit::*;

mod read;
pub use read::*;
