//! Core data types — discovered binaries and the scan report.

mod binary;
mod report;

pub use binary::{Binary, UNMANAGED_SOURCE};
pub use report::ScanReport;
