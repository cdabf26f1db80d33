use bazelheal_types::{BuildProblems, strip_last_segment};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::BufRead;
use thiserror::Error;
use tracing::debug;

/// Lines bazel prints when it already knows the fix; relayed verbatim.
const BUILDOZER_PREFIX: &str = "buildozer ";

const BUILDING: &str = "Building";
const COMPILING_HEADERS: &str = "Compiling Java headers";
const NO_SYMBOL: &str = "error: cannot find symbol";

static RE_BUILDING: Lazy<Regex> = Lazy::new(|| Regex::new(r"Building lib(.*?)\.jar ").unwrap());
static RE_COMPILING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Compiling Java headers lib(.*?)-hjar\.jar ").unwrap());
static RE_NO_PACKAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"package (.*) does not exist").unwrap());
static RE_IMPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"import (.*);").unwrap());
static RE_IMPORT_STATIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"import static (.*);").unwrap());

#[derive(Debug, Error)]
pub enum ScanError {
    /// A rule trigger line did not carry the expected jar token.
    #[error("expected a rule name but got: {line}")]
    MalformedRuleLine { line: String },

    #[error("read log: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of scanning one build log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogScan {
    /// The log already contained a ready-made buildozer command. Nothing
    /// after it is relevant.
    Passthrough(String),

    /// Structured report of the failing rule and its missing classes.
    Problems(BuildProblems),
}

/// Scans log lines in order, strictly forward.
///
/// A matched trigger line may consume the following line as its detail
/// line; a trigger at the end of input records nothing.
pub fn scan_lines<I>(lines: I) -> Result<LogScan, ScanError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut problems = BuildProblems::default();
    let mut lines = lines.into_iter();

    while let Some(line) = lines.next() {
        let line = line.as_ref();
        if line.starts_with(BUILDOZER_PREFIX) {
            // The build tool already suggested the fix; the rest of the log
            // will not contain anything else worth scanning.
            return Ok(LogScan::Passthrough(line.to_string()));
        } else if line.contains(BUILDING) {
            let rule = capture_rule(&RE_BUILDING, line)?;
            debug!(rule = %rule, "using rule from build line");
            problems.bazel_rule = Some(rule);
        } else if line.contains(COMPILING_HEADERS) {
            let rule = capture_rule(&RE_COMPILING, line)?;
            debug!(rule = %rule, "using rule from header-compile line");
            problems.bazel_rule = Some(rule);
        } else if RE_NO_PACKAGE.is_match(line) {
            // The next line holds the offending import statement.
            let Some(detail) = lines.next() else { break };
            let detail = detail.as_ref();
            if let Some(caps) = RE_IMPORT_STATIC.captures(detail) {
                // A static import names a member; the owning class is one
                // segment up.
                if let Some(owner) = strip_last_segment(&caps[1]) {
                    problems.record_missing(owner);
                }
            } else if let Some(caps) = RE_IMPORT.captures(detail) {
                problems.record_missing(&caps[1]);
            }
        } else if line.contains(NO_SYMBOL) {
            let Some(detail) = lines.next() else { break };
            if let Some(caps) = RE_IMPORT.captures(detail.as_ref()) {
                problems.record_missing(&caps[1]);
            }
        }
    }

    Ok(LogScan::Problems(problems))
}

/// Scans a line-oriented reader, commonly stdin.
pub fn scan_reader<R: BufRead>(reader: R) -> Result<LogScan, ScanError> {
    let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
    scan_lines(lines)
}

fn capture_rule(re: &Regex, line: &str) -> Result<String, ScanError> {
    match re.captures(line) {
        Some(caps) => Ok(caps[1].to_string()),
        None => Err(ScanError::MalformedRuleLine {
            line: line.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problems(scan: LogScan) -> BuildProblems {
        match scan {
            LogScan::Problems(p) => p,
            LogScan::Passthrough(line) => panic!("unexpected passthrough: {line}"),
        }
    }

    #[test]
    fn empty_log_yields_empty_problems() {
        let p = problems(scan_lines(Vec::<String>::new()).unwrap());
        assert_eq!(p.bazel_rule, None);
        assert!(p.is_empty());
    }

    #[test]
    fn building_line_sets_rule() {
        let p = problems(
            scan_lines(["Building lib//:foo.jar (3 source files) [for host]"]).unwrap(),
        );
        assert_eq!(p.bazel_rule.as_deref(), Some("//:foo"));
    }

    #[test]
    fn header_compile_line_sets_rule() {
        let p = problems(
            scan_lines(["Compiling Java headers lib//:bar-hjar.jar (2 source files)"]).unwrap(),
        );
        assert_eq!(p.bazel_rule.as_deref(), Some("//:bar"));
    }

    #[test]
    fn malformed_building_line_is_fatal() {
        let err = scan_lines(["Building something unexpected"]).unwrap_err();
        assert!(matches!(err, ScanError::MalformedRuleLine { .. }));
    }

    #[test]
    fn missing_package_records_imported_class() {
        let p = problems(
            scan_lines([
                "src/Main.java:3: error: package com.x does not exist",
                "import com.x.Y;",
            ])
            .unwrap(),
        );
        assert_eq!(p.missing_class.len(), 1);
        assert_eq!(p.missing_class[0].name, "com.x.Y");
    }

    #[test]
    fn static_import_records_owning_class() {
        let p = problems(
            scan_lines([
                "src/Main.java:4: error: package org.junit does not exist",
                "import static org.junit.Assert.assertEquals;",
            ])
            .unwrap(),
        );
        assert_eq!(p.missing_class.len(), 1);
        assert_eq!(p.missing_class[0].name, "org.junit.Assert");
    }

    #[test]
    fn cannot_find_symbol_records_imported_class() {
        let p = problems(
            scan_lines([
                "src/Main.java:7: error: cannot find symbol",
                "import com.x.Helper;",
            ])
            .unwrap(),
        );
        assert_eq!(p.missing_class.len(), 1);
        assert_eq!(p.missing_class[0].name, "com.x.Helper");
    }

    #[test]
    fn trigger_at_end_of_input_records_nothing() {
        let p = problems(
            scan_lines(["src/Main.java:3: error: package com.x does not exist"]).unwrap(),
        );
        assert!(p.is_empty());
    }

    #[test]
    fn detail_line_without_import_records_nothing() {
        let p = problems(
            scan_lines([
                "src/Main.java:9: error: cannot find symbol",
                "        symbol: class Helper",
            ])
            .unwrap(),
        );
        assert!(p.is_empty());
    }

    #[test]
    fn buildozer_line_short_circuits() {
        let scan = scan_lines([
            "buildozer 'add deps //:util' //:app",
            "Building something unexpected",
        ])
        .unwrap();
        assert_eq!(
            scan,
            LogScan::Passthrough("buildozer 'add deps //:util' //:app".to_string())
        );
    }

    #[test]
    fn duplicates_are_preserved() {
        let p = problems(
            scan_lines([
                "src/A.java:1: error: package com.x does not exist",
                "import com.x.Y;",
                "src/B.java:1: error: package com.x does not exist",
                "import com.x.Y;",
            ])
            .unwrap(),
        );
        assert_eq!(p.missing_class.len(), 2);
    }
}
