use super::{Provider, Strategy};
use bazelheal_types::{Dependency, JavaClass};
use bazelheal_workspace::{BazelWorkspace, EXTERNAL_PREFIX, QueryError};
use tracing::debug;

/// Scans the dependency catalog for a provider, first match wins.
pub struct CatalogLookup;

impl Strategy for CatalogLookup {
    fn name(&self) -> &'static str {
        "catalog-lookup"
    }

    fn attempt(
        &self,
        class: &JavaClass,
        catalog: &[Dependency],
        workspace: &dyn BazelWorkspace,
    ) -> Result<Option<Provider>, QueryError> {
        let Some(dep) = catalog.iter().find(|d| d.provides(&class.name)) else {
            return Ok(None);
        };
        debug!(class = %class.name, dependency = %dep.name, "provided by catalog entry");

        // External labels attach under their bare rule name.
        let rule = dep.name.strip_prefix(EXTERNAL_PREFIX).unwrap_or(&dep.name);
        if workspace.rule_exists(rule)? {
            Ok(Some(Provider::ExistingRule(rule.to_string())))
        } else {
            Ok(Some(Provider::NewLibrary {
                name: dep.name.clone(),
                source_root: dep.external_reference.clone(),
            }))
        }
    }
}
