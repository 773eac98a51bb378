//! Gemini `generateContent` integration.
//!
//! # Data Flow
//! ```text
//! Subject (name, domain)
//!     → prompt.rs (system instruction + user query)
//!     → request.rs (GenerateContentRequest with the google_search tool)
//!     → client.rs (RequestSpec + API key credential → executor)
//!     → response.rs (candidates[0].content.parts[0].text)
//! ```

pub mod client;
pub mod prompt;
pub mod request;
pub mod response;

pub use client::{ReportClient, API_KEY_HEADER};
pub use request::GenerateContentRequest;
pub use response::extract_report_text;
