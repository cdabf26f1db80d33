use bazelheal_types::{Dependency, JavaClass};
use bazelheal_workspace::{BazelWorkspace, QueryError};

mod catalog;
mod genrule;
mod sources;

/// A provider found for a missing class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    /// A rule that already exists and can be attached directly.
    ExistingRule(String),

    /// No rule exists yet; declare a new library over `source_root` first.
    NewLibrary { name: String, source_root: String },
}

/// One way of finding a provider for a missing class.
///
/// Strategies are attempted in the order returned by
/// [`builtin_strategies`]; the first to produce a provider wins.
pub trait Strategy {
    fn name(&self) -> &'static str;

    fn attempt(
        &self,
        class: &JavaClass,
        catalog: &[Dependency],
        workspace: &dyn BazelWorkspace,
    ) -> Result<Option<Provider>, QueryError>;
}

/// Cheapest and most specific signal first: already-built sources, then
/// generated code, then the broad catalog scan.
pub fn builtin_strategies() -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(sources::ExistingRuleSources),
        Box::new(genrule::GeneratedCodeRule),
        Box::new(catalog::CatalogLookup),
    ]
}
