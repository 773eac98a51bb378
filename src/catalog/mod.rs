//! University catalog.
//!
//! ```text
//! universities JSON ([{college_name, url, ...}])
//!     → loader.rs (read, parse, reject empty lists)
//!     → record.rs (resolve the search domain from each url)
//!     → Vec<UniversityRecord>
//! ```

pub mod loader;
pub mod record;

pub use loader::{load_universities, CatalogError};
pub use record::{domain_from_url, RawUniversity, UniversityRecord};
