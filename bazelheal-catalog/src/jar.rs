//! Lists the classes contained in a compiled-classes jar.

use crate::error::CatalogError;
use camino::Utf8Path;
use fs_err as fs;
use std::io::BufReader;
use zip::ZipArchive;

const CLASS_SUFFIX: &str = ".class";

/// Fully-qualified class names of every `.class` entry in the archive.
/// Non-class entries (manifests, resources, directories) are ignored.
pub fn list_classes(path: &Utf8Path) -> Result<Vec<String>, CatalogError> {
    let file = fs::File::open(path).map_err(|source| CatalogError::ArchiveIo {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|source| CatalogError::ArchiveFormat {
            path: path.to_path_buf(),
            source,
        })?;

    let mut classes = Vec::new();
    for idx in 0..archive.len() {
        let entry = archive
            .by_index(idx)
            .map_err(|source| CatalogError::ArchiveFormat {
                path: path.to_path_buf(),
                source,
            })?;
        if !entry.is_file() {
            continue;
        }
        // Jar entries are '/'-separated regardless of platform.
        if let Some(stripped) = entry.name().strip_suffix(CLASS_SUFFIX) {
            classes.push(stripped.replace('/', "."));
        }
    }
    Ok(classes)
}
