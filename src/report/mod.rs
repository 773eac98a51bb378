//! Per-university report artifacts.

pub mod format;
pub mod writer;

pub use format::{header, render, sanitize_filename};
pub use writer::{ReportError, ReportWriter, WrittenReport};
