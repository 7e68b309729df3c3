//! # portr core
//!
//! The concurrent TCP connect scan engine.
//!
//! * **[`network`]**: the probes that touch the network.
//! * **[`scanner`]**: fan-out of probes over a port range and aggregation of their
//!   results into a report.

pub mod network;
pub mod scanner;
