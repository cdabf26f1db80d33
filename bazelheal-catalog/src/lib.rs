//! Dependency catalog: which classes each known provider makes available.
//!
//! Two independent producers feed one flat list: dependencies inferred from
//! the source tree layout, and external jars declared in the workspace. The
//! combined list is persisted once per refresh and read back verbatim on
//! resolution runs; the resolver treats it as read-only.

mod cache;
mod error;
mod external;
mod jar;
mod source;

pub use cache::{read_cache, write_cache};
pub use error::CatalogError;
pub use external::external_dependencies;
pub use jar::list_classes;
pub use source::{DEFAULT_EXTENSION, DEFAULT_LAYOUT, source_dependencies};
