//! University records as they appear in the input file.

use serde::{Deserialize, Serialize};

use crate::resilience::Subject;

/// One entry of the input JSON array. Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RawUniversity {
    pub college_name: String,
    pub url: String,
}

/// A validated university with its search domain resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniversityRecord {
    pub name: String,
    pub url: String,
    pub domain: String,
}

impl UniversityRecord {
    pub fn subject(&self) -> Subject {
        Subject::new(self.name.clone(), self.domain.clone())
    }
}

/// Host (and port, when present) of `raw`.
///
/// Scheme-less values such as `www.ucla.edu/admissions` are read as https.
pub fn domain_from_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    let parsed = url::Url::parse(trimmed)
        .ok()
        .filter(|u| u.has_host())
        .or_else(|| url::Url::parse(&format!("https://{}", trimmed)).ok());

    let url = parsed.ok_or_else(|| format!("'{}' is not a URL", raw))?;
    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| format!("'{}' has no host", raw))?;

    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
