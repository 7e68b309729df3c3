//! Values that flow through a scan, from request to final report.

pub mod report;
pub mod request;
pub mod result;
