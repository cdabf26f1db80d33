//! Derives dependencies from a Maven-layout source tree.

use crate::error::CatalogError;
use bazelheal_types::Dependency;
use camino::Utf8Path;
use std::collections::BTreeMap;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Layout marker separating a module path from the class path inside it.
pub const DEFAULT_LAYOUT: &str = "/src/main/java/";

/// Source file extension matched during the scan.
pub const DEFAULT_EXTENSION: &str = ".java";

/// Scans `root` recursively and folds every source file under the layout
/// marker into one [`Dependency`] per module directory.
///
/// The rule name is the module path with separators flattened to
/// underscores, a 1:1 mapping as long as no two modules share a flattened
/// name. Resource order within a module follows discovery order, which the
/// rendered glob pattern depends on.
pub fn source_dependencies(
    root: &Utf8Path,
    extension: &str,
    layout: &str,
) -> Result<Vec<Dependency>, CatalogError> {
    info!(root = %root, extension = %extension, "scanning source tree");

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| CatalogError::SourceWalk {
            root: root.to_path_buf(),
            source,
        })?;
        let path = entry.path().to_string_lossy().into_owned();
        if path.ends_with(extension) {
            files.push(path);
        }
    }
    debug!(count = files.len(), "source files found");

    // Module directory -> class names, discovery order within each module.
    let mut modules: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for file in files {
        // Split at the rightmost marker, mirroring a greedy prefix match.
        let Some((module, class_path)) = file.rsplit_once(layout) else {
            debug!(file = %file, layout = %layout, "skipping file outside the source layout");
            continue;
        };
        let class = class_path
            .strip_suffix(extension)
            .unwrap_or(class_path)
            .replace('/', ".");
        modules.entry(module.to_string()).or_default().push(class);
    }

    Ok(modules
        .into_iter()
        .map(|(module, resources)| Dependency {
            name: rule_name(&module),
            external_reference: format!("{module}{layout}"),
            resources,
        })
        .collect())
}

/// 1:1 mapping from a module directory to a suggested rule name.
fn rule_name(module: &str) -> String {
    module.replace('/', "_")
}
