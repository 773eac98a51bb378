//! Pulls the report text out of a `generateContent` response.

use serde_json::Value;

use crate::resilience::ExtractionError;

/// JSON pointer of the first candidate's first text part.
pub const REPORT_TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";

/// Extract `candidates[0].content.parts[0].text`.
pub fn extract_report_text(payload: &Value) -> Result<String, ExtractionError> {
    payload
        .pointer(REPORT_TEXT_POINTER)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ExtractionError::MissingField(REPORT_TEXT_POINTER.to_string()))
}
