use crate::class::JavaClass;

/// Structured report extracted from one build log.
///
/// Built incrementally while scanning; immutable once scanning ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildProblems {
    /// The rule under construction when the failure was reported. `None`
    /// until a "Building"/"Compiling Java headers" line is seen.
    pub bazel_rule: Option<String>,

    /// Missing classes in encounter order. Duplicates are preserved; the
    /// resolver deduplicates by package for performance, not correctness.
    pub missing_class: Vec<JavaClass>,
}

impl BuildProblems {
    /// Records a class the compiler could not find. The scanner only knows
    /// names; module and layout stay unknown.
    pub fn record_missing(&mut self, class_name: impl Into<String>) {
        self.missing_class.push(JavaClass::named(class_name));
    }

    pub fn is_empty(&self) -> bool {
        self.missing_class.is_empty()
    }
}
