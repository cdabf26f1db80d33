//! The workspace query port and its error contract.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Exit code `bazel query` uses for "no such target".
pub const QUERY_NOT_FOUND: i32 = 7;

/// Label prefix under which external dependencies are declared.
pub const EXTERNAL_PREFIX: &str = "//external:";

#[derive(Debug, Error)]
pub enum QueryError {
    /// The query tool could not be started at all.
    #[error("spawn {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// The query tool failed for a reason other than the well-known
    /// "not found" answer.
    #[error("{command} failed with exit code {code:?}: {output}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    /// The query succeeded but its output did not have the expected shape.
    #[error("{command}: expected exactly one output line but got {lines:?}")]
    UnexpectedOutput {
        command: String,
        lines: Vec<String>,
    },
}

/// The five query operations the resolution engine needs.
///
/// All operations are blocking; the build-fix workflow is inherently
/// serial. Implementations fold the tool's "not found" answer into the
/// `Ok` shape (`false` / `None`) and reserve `Err` for broken assumptions.
pub trait BazelWorkspace {
    /// The workspace output base, under which external dependencies
    /// materialize.
    fn output_base(&self) -> Result<Utf8PathBuf, QueryError>;

    /// Labels of all declared external (maven_jar) dependencies.
    fn external_dependencies(&self) -> Result<Vec<String>, QueryError>;

    /// Whether a rule with exactly this name exists.
    fn rule_exists(&self, rule: &str) -> Result<bool, QueryError>;

    /// The genrule with exactly this name, if one exists.
    fn find_genrule(&self, rule: &str) -> Result<Option<String>, QueryError>;

    /// The single rule whose `srcs` attribute matches `pattern`, if any.
    /// Query failures of any kind count as a plain negative here.
    fn find_rule_with_source(&self, pattern: &str) -> Result<Option<String>, QueryError>;
}
