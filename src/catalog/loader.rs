//! Loading the university list from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::record::{domain_from_url, RawUniversity, UniversityRecord};

/// Error type for catalog loading. Any of these stops the run before it starts.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("university data file not found at: {}", .0.display())]
    NotFound(PathBuf),

    #[error("error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing JSON file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} contains no universities", .0.display())]
    Empty(PathBuf),

    #[error("record {index} ({name}): {reason}")]
    InvalidRecord {
        index: usize,
        name: String,
        reason: String,
    },
}

/// Load and resolve every university in `path`.
pub fn load_universities(path: &Path) -> Result<Vec<UniversityRecord>, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: Vec<RawUniversity> =
        serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if raw.is_empty() {
        return Err(CatalogError::Empty(path.to_path_buf()));
    }

    let records = resolve(raw)?;
    tracing::debug!(path = %path.display(), count = records.len(), "University catalog loaded");
    Ok(records)
}

/// Resolve domains, failing on the first record without a usable URL.
pub fn resolve(raw: Vec<RawUniversity>) -> Result<Vec<UniversityRecord>, CatalogError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, uni)| {
            let domain = domain_from_url(&uni.url).map_err(|reason| CatalogError::InvalidRecord {
                index,
                name: uni.college_name.clone(),
                reason,
            })?;
            Ok(UniversityRecord {
                name: uni.college_name,
                url: uni.url,
                domain,
            })
        })
        .collect()
}
