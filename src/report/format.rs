//! Report text layout.
//!
//! ```text
//! --- UNIVERSITY_START ---
//! NAME: {name}
//! DOMAIN: {domain}
//! REPORT_DATE: {YYYY-MM-DD HH:MM:SS}
//! {report text | STATUS: FAILED - {reason}}
//! ```

use chrono::{DateTime, Local};

use crate::resilience::{CallOutcome, Subject};

pub const UNIVERSITY_TAG: &str = "--- UNIVERSITY_START ---";
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replace characters that are invalid in file names with `_` and trim.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if INVALID_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Metadata header shared by successful reports and failure stubs.
pub fn header(subject: &Subject, generated_at: &DateTime<Local>) -> String {
    format!(
        "{UNIVERSITY_TAG}\nNAME: {}\nDOMAIN: {}\nREPORT_DATE: {}",
        subject.name,
        subject.domain,
        generated_at.format(REPORT_DATE_FORMAT)
    )
}

/// Render the file contents for a finished call.
pub fn render(subject: &Subject, generated_at: &DateTime<Local>, outcome: &CallOutcome) -> String {
    let header = header(subject, generated_at);
    match outcome {
        CallOutcome::Extracted { text, .. } => format!("{}\n{}\n", header, text),
        CallOutcome::Failed { reason, .. } => {
            let reason = reason.split_whitespace().collect::<Vec<_>>().join(" ");
            format!("{}\nSTATUS: FAILED - {}\n", header, reason)
        }
    }
}
