use crate::strategies::{Provider, Strategy, builtin_strategies};
use bazelheal_types::{BuildProblems, Dependency, RepairCommand};
use bazelheal_workspace::BazelWorkspace;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The log reported missing classes without any "Building ..." line
    /// identifying the rule to repair.
    #[error("log reported missing classes but no failing rule")]
    NoFailingRule,

    #[error(transparent)]
    Query(#[from] bazelheal_workspace::QueryError),
}

/// Resolves missing classes against the catalog and the live workspace.
pub struct Resolver {
    strategies: Vec<Box<dyn Strategy>>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            strategies: builtin_strategies(),
        }
    }

    pub fn with_strategies(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    /// Emits one repair command per first-successful strategy, in the
    /// classes' encounter order. A class that no strategy can place is
    /// logged and skipped; it never aborts the run.
    pub fn resolve(
        &self,
        problems: &BuildProblems,
        catalog: &[Dependency],
        workspace: &dyn BazelWorkspace,
    ) -> Result<Vec<RepairCommand>, ResolveError> {
        if problems.missing_class.is_empty() {
            return Ok(Vec::new());
        }
        let rule = problems
            .bazel_rule
            .as_deref()
            .ok_or(ResolveError::NoFailingRule)?;

        // One fix per Java package is assumed sufficient: a single added
        // dependency typically supplies every class in that package. When
        // the assumption is wrong the run under-fixes and the next rebuild
        // surfaces the remainder.
        let mut resolved_packages: BTreeSet<String> = BTreeSet::new();
        let mut commands = Vec::new();

        'classes: for class in &problems.missing_class {
            if let Some(package) = class.package()
                && resolved_packages.contains(package)
            {
                debug!(
                    class = %class.name,
                    package = %package,
                    "skipping class in an already resolved package"
                );
                continue;
            }
            info!(class = %class.name, "resolving missing dependency");

            for strategy in &self.strategies {
                match strategy.attempt(class, catalog, workspace)? {
                    Some(provider) => {
                        debug!(class = %class.name, strategy = strategy.name(), "resolved");
                        commands.push(command_for(rule, provider));
                        if let Some(package) = class.package() {
                            resolved_packages.insert(package.to_string());
                        }
                        continue 'classes;
                    }
                    None => {
                        debug!(class = %class.name, strategy = strategy.name(), "no provider");
                    }
                }
            }
            warn!(class = %class.name, "no strategy could resolve this class");
        }

        Ok(commands)
    }
}

fn command_for(rule: &str, provider: Provider) -> RepairCommand {
    match provider {
        Provider::ExistingRule(dep) => RepairCommand::AddDeps {
            rule: rule.to_string(),
            deps: vec![dep],
        },
        Provider::NewLibrary { name, source_root } => {
            RepairCommand::NewJavaLibrary { name, source_root }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazelheal_workspace::StaticWorkspace;

    fn problems(rule: &str, classes: &[&str]) -> BuildProblems {
        let mut p = BuildProblems {
            bazel_rule: Some(rule.to_string()),
            missing_class: Vec::new(),
        };
        for class in classes {
            p.record_missing(*class);
        }
        p
    }

    fn dep(name: &str, reference: &str, resources: &[&str]) -> Dependency {
        Dependency {
            name: name.to_string(),
            external_reference: reference.to_string(),
            resources: resources.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn no_missing_classes_no_commands() {
        let ws = StaticWorkspace::new();
        let commands = Resolver::new()
            .resolve(&BuildProblems::default(), &[], &ws)
            .expect("resolve");
        assert!(commands.is_empty());
        assert_eq!(ws.queries_issued(), 0);
    }

    #[test]
    fn missing_classes_without_a_rule_are_fatal() {
        let mut p = BuildProblems::default();
        p.record_missing("com.x.Y");
        let err = Resolver::new()
            .resolve(&p, &[], &StaticWorkspace::new())
            .unwrap_err();
        assert!(matches!(err, ResolveError::NoFailingRule));
    }

    #[test]
    fn existing_rule_sources_wins_first() {
        let ws = StaticWorkspace::new()
            .with_rule_source("com.shop.money.Amount", "//:money")
            // A genrule that would also match must never be consulted.
            .with_genrule("com_shop_money");
        let p = problems("//:shipping", &["com.shop.money.Amount"]);

        let commands = Resolver::new().resolve(&p, &[], &ws).expect("resolve");
        assert_eq!(
            commands,
            vec![RepairCommand::AddDeps {
                rule: "//:shipping".to_string(),
                deps: vec!["//:money".to_string()],
            }]
        );
    }

    #[test]
    fn genrule_is_matched_by_package_derived_name() {
        let ws = StaticWorkspace::new().with_genrule("com_shop_partners");
        let p = problems("//:shipping", &["com.shop.partners.CarrierApi"]);

        let commands = Resolver::new().resolve(&p, &[], &ws).expect("resolve");
        assert_eq!(
            commands,
            vec![RepairCommand::AddDeps {
                rule: "//:shipping".to_string(),
                deps: vec!["com_shop_partners".to_string()],
            }]
        );
    }

    #[test]
    fn catalog_hit_with_existing_rule_attaches_it() {
        let ws = StaticWorkspace::new().with_rule("junit_junit");
        let catalog = vec![dep(
            "//external:junit_junit",
            "/out/external/junit_junit/jar/junit-4.10.jar",
            &["org.junit.Assert"],
        )];
        let p = problems("//:shipping", &["org.junit.Assert"]);

        let commands = Resolver::new().resolve(&p, &catalog, &ws).expect("resolve");
        assert_eq!(
            commands,
            vec![RepairCommand::AddDeps {
                rule: "//:shipping".to_string(),
                deps: vec!["junit_junit".to_string()],
            }]
        );
    }

    #[test]
    fn catalog_hit_without_rule_creates_a_library() {
        let ws = StaticWorkspace::new();
        let catalog = vec![dep(
            "core_money",
            "core/money/src/main/java/",
            &["com.shop.money.Amount"],
        )];
        let p = problems("//:shipping", &["com.shop.money.Amount"]);

        let commands = Resolver::new().resolve(&p, &catalog, &ws).expect("resolve");
        assert_eq!(
            commands,
            vec![RepairCommand::NewJavaLibrary {
                name: "core_money".to_string(),
                source_root: "core/money/src/main/java/".to_string(),
            }]
        );
    }

    #[test]
    fn first_catalog_match_wins() {
        let ws = StaticWorkspace::new();
        let catalog = vec![
            dep("first", "a/src/main/java/", &["com.x.Y"]),
            dep("second", "b/src/main/java/", &["com.x.Y"]),
        ];
        let p = problems("//:app", &["com.x.Y"]);

        let commands = Resolver::new().resolve(&p, &catalog, &ws).expect("resolve");
        assert_eq!(
            commands,
            vec![RepairCommand::NewJavaLibrary {
                name: "first".to_string(),
                source_root: "a/src/main/java/".to_string(),
            }]
        );
    }

    #[test]
    fn second_class_in_resolved_package_issues_no_queries() {
        let ws = StaticWorkspace::new()
            .with_rule_source("com.shop.money.Amount", "//:money")
            .with_rule_source("com.shop.money.Currency", "//:money");
        let p = problems(
            "//:shipping",
            &["com.shop.money.Amount", "com.shop.money.Currency"],
        );

        let commands = Resolver::new().resolve(&p, &[], &ws).expect("resolve");
        assert_eq!(commands.len(), 1);
        // Exactly one sources query for the first class; the second class
        // was skipped before reaching the workspace.
        assert_eq!(ws.queries_issued(), 1);
    }

    #[test]
    fn unresolvable_class_is_skipped_and_the_run_continues() {
        let ws = StaticWorkspace::new().with_rule_source("com.shop.money.Amount", "//:money");
        let p = problems(
            "//:shipping",
            &["com.unknown.Thing", "com.shop.money.Amount"],
        );

        let commands = Resolver::new().resolve(&p, &[], &ws).expect("resolve");
        assert_eq!(
            commands,
            vec![RepairCommand::AddDeps {
                rule: "//:shipping".to_string(),
                deps: vec!["//:money".to_string()],
            }]
        );
    }

    #[test]
    fn default_package_classes_are_not_memoized() {
        let ws = StaticWorkspace::new()
            .with_rule_source("Standalone", "//:standalone")
            .with_rule_source("Other", "//:other");
        let p = problems("//:app", &["Standalone", "Other"]);

        let commands = Resolver::new().resolve(&p, &[], &ws).expect("resolve");
        assert_eq!(commands.len(), 2);
    }
}
