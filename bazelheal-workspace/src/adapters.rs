//! Default subprocess-backed port implementation, plus an in-memory one.

use crate::ports::{BazelWorkspace, QUERY_NOT_FOUND, QueryError};
use camino::Utf8PathBuf;
use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};
use std::process::{Command, Output};
use tracing::debug;

/// [`BazelWorkspace`] backed by the `bazel` command line tool.
///
/// Queries are blocking subprocess calls with no timeout; a hang in the
/// external tool hangs the whole run.
#[derive(Debug, Clone)]
pub struct ShellWorkspace {
    workdir: Utf8PathBuf,
}

impl ShellWorkspace {
    pub fn new(workdir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<Output, QueryError> {
        let command = display_command(args);
        debug!(command = %command, workdir = %self.workdir, "executing workspace query");
        Command::new("bazel")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|source| QueryError::Spawn { command, source })
    }

    fn run_lines(&self, args: &[&str]) -> Result<Vec<String>, QueryError> {
        let out = self.run(args)?;
        if !out.status.success() {
            return Err(command_failed(args, &out));
        }
        Ok(stdout_lines(&out))
    }
}

impl BazelWorkspace for ShellWorkspace {
    fn output_base(&self) -> Result<Utf8PathBuf, QueryError> {
        let args = ["info", "output_base"];
        let lines = self.run_lines(&args)?;
        match lines.as_slice() {
            [line] => Ok(Utf8PathBuf::from(line)),
            _ => Err(QueryError::UnexpectedOutput {
                command: display_command(&args),
                lines,
            }),
        }
    }

    fn external_dependencies(&self) -> Result<Vec<String>, QueryError> {
        // May trigger dependency resolution on first use.
        self.run_lines(&["query", "kind(maven_jar, //external:all)"])
    }

    fn rule_exists(&self, rule: &str) -> Result<bool, QueryError> {
        let args = ["query", rule];
        let out = self.run(&args)?;
        if out.status.success() {
            return Ok(true);
        }
        if out.status.code() == Some(QUERY_NOT_FOUND) {
            return Ok(false);
        }
        Err(command_failed(&args, &out))
    }

    fn find_genrule(&self, rule: &str) -> Result<Option<String>, QueryError> {
        let args = ["query", rule, "--output=label_kind"];
        let out = self.run(&args)?;
        if !out.status.success() {
            if out.status.code() == Some(QUERY_NOT_FOUND) {
                return Ok(None);
            }
            return Err(command_failed(&args, &out));
        }
        let lines = stdout_lines(&out);
        let want = format!("genrule rule //:{rule}");
        if let [line] = lines.as_slice()
            && line == &want
        {
            return Ok(Some(rule.to_string()));
        }
        Ok(None)
    }

    fn find_rule_with_source(&self, pattern: &str) -> Result<Option<String>, QueryError> {
        // The dots in a fully-qualified class name double as regex
        // wildcards against the path separators in srcs entries.
        let query = format!("attr('srcs', {pattern}, :all)");
        let args = ["query", query.as_str()];
        let out = self.run(&args)?;
        if !out.status.success() {
            return Ok(None);
        }
        let lines = stdout_lines(&out);
        match lines.as_slice() {
            [line] if line.starts_with("//:") => Ok(Some(line.clone())),
            _ => Ok(None),
        }
    }
}

fn display_command(args: &[&str]) -> String {
    format!("bazel {}", args.join(" "))
}

fn stdout_lines(out: &Output) -> Vec<String> {
    String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn command_failed(args: &[&str], out: &Output) -> QueryError {
    QueryError::CommandFailed {
        command: display_command(args),
        code: out.status.code(),
        output: String::from_utf8_lossy(&out.stderr).into_owned(),
    }
}

/// In-memory [`BazelWorkspace`] for embedding and testing.
///
/// Counts issued queries so callers can assert that resolution
/// short-circuits where it promises to.
#[derive(Debug, Default)]
pub struct StaticWorkspace {
    output_base: Option<Utf8PathBuf>,
    external: Vec<String>,
    rules: BTreeSet<String>,
    genrules: BTreeSet<String>,
    /// srcs pattern -> rule label.
    sources: BTreeMap<String, String>,
    queries: Cell<usize>,
}

impl StaticWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_base(mut self, base: impl Into<Utf8PathBuf>) -> Self {
        self.output_base = Some(base.into());
        self
    }

    pub fn with_external_dependency(mut self, label: impl Into<String>) -> Self {
        self.external.push(label.into());
        self
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rules.insert(rule.into());
        self
    }

    pub fn with_genrule(mut self, rule: impl Into<String>) -> Self {
        self.genrules.insert(rule.into());
        self
    }

    /// Declares that the rule `label` lists sources matching `pattern`.
    pub fn with_rule_source(mut self, pattern: impl Into<String>, label: impl Into<String>) -> Self {
        self.sources.insert(pattern.into(), label.into());
        self
    }

    /// Number of queries issued against this workspace so far.
    pub fn queries_issued(&self) -> usize {
        self.queries.get()
    }

    fn count(&self) {
        self.queries.set(self.queries.get() + 1);
    }
}

impl BazelWorkspace for StaticWorkspace {
    fn output_base(&self) -> Result<Utf8PathBuf, QueryError> {
        self.count();
        self.output_base
            .clone()
            .ok_or_else(|| QueryError::UnexpectedOutput {
                command: "bazel info output_base".to_string(),
                lines: Vec::new(),
            })
    }

    fn external_dependencies(&self) -> Result<Vec<String>, QueryError> {
        self.count();
        Ok(self.external.clone())
    }

    fn rule_exists(&self, rule: &str) -> Result<bool, QueryError> {
        self.count();
        Ok(self.rules.contains(rule))
    }

    fn find_genrule(&self, rule: &str) -> Result<Option<String>, QueryError> {
        self.count();
        Ok(self.genrules.contains(rule).then(|| rule.to_string()))
    }

    fn find_rule_with_source(&self, pattern: &str) -> Result<Option<String>, QueryError> {
        self.count();
        Ok(self.sources.get(pattern).cloned())
    }
}
