//! Flat on-disk snapshot of the dependency catalog.
//!
//! The format is implementation-internal: a bincode dump of the whole
//! list, replaced wholesale on refresh. No versioning, no partial merge.

use crate::error::CatalogError;
use bazelheal_types::Dependency;
use camino::Utf8Path;
use fs_err as fs;
use tracing::info;

pub fn read_cache(path: &Utf8Path) -> Result<Vec<Dependency>, CatalogError> {
    let bytes = fs::read(path).map_err(|source| CatalogError::CacheIo {
        path: path.to_path_buf(),
        source,
    })?;
    bincode::deserialize(&bytes).map_err(|source| CatalogError::CacheDecode {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_cache(path: &Utf8Path, deps: &[Dependency]) -> Result<(), CatalogError> {
    let bytes =
        bincode::serialize(deps).map_err(|source| CatalogError::CacheEncode { source })?;
    fs::write(path, bytes).map_err(|source| CatalogError::CacheIo {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path, count = deps.len(), "catalog cache updated");
    Ok(())
}
