/// A dependency-graph repair instruction for buildozer to apply.
///
/// bazelheal never edits BUILD files itself; commands are rendered to text
/// and handed to the external graph editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairCommand {
    /// Attach `deps` to the failing `rule`.
    AddDeps { rule: String, deps: Vec<String> },

    /// Declare a new java_library named `name`, its sources globbed from
    /// `source_root`. The new rule becomes attachable on a later run.
    NewJavaLibrary { name: String, source_root: String },
}
