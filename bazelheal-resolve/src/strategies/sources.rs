use super::{Provider, Strategy};
use bazelheal_types::{Dependency, JavaClass};
use bazelheal_workspace::{BazelWorkspace, QueryError};

/// Finds an existing rule whose declared sources already contain the
/// missing class.
pub struct ExistingRuleSources;

impl Strategy for ExistingRuleSources {
    fn name(&self) -> &'static str {
        "existing-rule-sources"
    }

    fn attempt(
        &self,
        class: &JavaClass,
        _catalog: &[Dependency],
        workspace: &dyn BazelWorkspace,
    ) -> Result<Option<Provider>, QueryError> {
        Ok(workspace
            .find_rule_with_source(&class.name)?
            .map(Provider::ExistingRule))
    }
}
