//! Build-log scanning: extracts the failing rule and its missing classes
//! from `bazel build` output.
//!
//! The scanner is deliberately narrow. It recognizes a handful of line
//! shapes and ignores everything else, so it stays useful against the
//! variable noise a real build prints. A trigger line whose expected shape
//! does not hold is a fatal error: that means the log format itself changed
//! and no partial output should be trusted.

mod scan;

pub use scan::{LogScan, ScanError, scan_lines, scan_reader};
