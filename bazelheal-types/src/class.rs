/// A fully-qualified Java class name, optionally annotated with the module
/// layout it was discovered under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JavaClass {
    /// Relative module path (e.g. `ui/web`), when known.
    pub module: Option<String>,

    /// Source layout inside the module (e.g. `src/main/java`), when known.
    pub layout: Option<String>,

    /// Dot-separated fully-qualified name (`a.b.C`). Never empty.
    pub name: String,
}

impl JavaClass {
    /// A class known only by name, as the log scanner produces them.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            module: None,
            layout: None,
            name: name.into(),
        }
    }

    /// The Java package portion of the name: everything before the final
    /// dot segment. `None` for classes in the default package.
    pub fn package(&self) -> Option<&str> {
        strip_last_segment(&self.name)
    }
}

/// Strips the final dot segment from a dot-separated reference.
///
/// Turns a static-member reference (`a.b.C.member`) into its owning class
/// (`a.b.C`), and a class name into its package. `None` when there is no
/// dot to strip at.
pub fn strip_last_segment(reference: &str) -> Option<&str> {
    reference.rsplit_once('.').map(|(head, _)| head)
}
