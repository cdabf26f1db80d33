//! Enumerates declared external dependencies and their jar contents.

use crate::error::CatalogError;
use crate::jar;
use bazelheal_types::Dependency;
use bazelheal_workspace::{BazelWorkspace, EXTERNAL_PREFIX};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use tracing::{debug, info};

const SOURCES_SUFFIX: &str = "-sources.jar";
const JAR_SUFFIX: &str = ".jar";

/// Builds one [`Dependency`] per declared external dependency whose jar has
/// been materialized under the workspace output base. Declared-but-unused
/// dependencies have no materialized directory and are skipped.
pub fn external_dependencies(
    workspace: &dyn BazelWorkspace,
) -> Result<Vec<Dependency>, CatalogError> {
    let base = workspace.output_base()?;
    let mut deps = Vec::new();
    for label in workspace.external_dependencies()? {
        debug!(label = %label, "processing external dependency");
        let dir = base
            .join("external")
            .join(label.strip_prefix(EXTERNAL_PREFIX).unwrap_or(&label))
            .join("jar");
        if !dir.exists() {
            info!(label = %label, "skipping dependency without a materialized jar");
            continue;
        }
        let jar_path = one_jar_from(&dir)?;
        let resources = jar::list_classes(&jar_path)?;
        deps.push(Dependency {
            name: label,
            external_reference: jar_path.into_string(),
            resources,
        });
    }
    Ok(deps)
}

/// The one jar expected in a materialized dependency directory, ignoring
/// the `-sources` classifier.
fn one_jar_from(dir: &Utf8Path) -> Result<Utf8PathBuf, CatalogError> {
    let entries = fs::read_dir(dir).map_err(|source| CatalogError::DirList {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut jars = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CatalogError::DirList {
            dir: dir.to_path_buf(),
            source,
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(SOURCES_SUFFIX) {
            continue;
        }
        if name.ends_with(JAR_SUFFIX) {
            jars.push(name);
        }
    }
    jars.sort();

    match jars.as_slice() {
        [one] => Ok(dir.join(one)),
        _ => Err(CatalogError::AmbiguousJarDir {
            dir: dir.to_path_buf(),
            candidates: jars,
        }),
    }
}
