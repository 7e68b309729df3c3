//! # portr common
//!
//! Shared data model of the port scanner: scan requests, probe results, reports
//! and the errors that can end a scan early.

pub mod config;
pub mod error;
pub mod network;
pub mod scan;

pub use error::{Result, ScanError};
