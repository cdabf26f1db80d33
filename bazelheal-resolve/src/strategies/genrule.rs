use super::{Provider, Strategy};
use bazelheal_types::{Dependency, JavaClass};
use bazelheal_workspace::{BazelWorkspace, QueryError};

/// Finds a generated-code rule by its 1:1 name derived from the class's
/// Java package.
pub struct GeneratedCodeRule;

impl Strategy for GeneratedCodeRule {
    fn name(&self) -> &'static str {
        "generated-code-rule"
    }

    fn attempt(
        &self,
        class: &JavaClass,
        _catalog: &[Dependency],
        workspace: &dyn BazelWorkspace,
    ) -> Result<Option<Provider>, QueryError> {
        // Classes in the default package have no derivable rule name.
        let Some(package) = class.package() else {
            return Ok(None);
        };
        let candidate = package.replace('.', "_");
        Ok(workspace
            .find_genrule(&candidate)?
            .map(Provider::ExistingRule))
    }
}
