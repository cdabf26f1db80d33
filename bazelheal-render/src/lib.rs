//! Renders repair commands as buildozer command lines.

use bazelheal_types::RepairCommand;

const BUILDOZER: &str = "buildozer";

/// One output line per buildozer invocation. The new-library shape always
/// expands to two lines: the rule declaration, then its srcs glob.
pub fn render_commands(commands: &[RepairCommand]) -> Vec<String> {
    let mut out = Vec::new();
    for command in commands {
        match command {
            RepairCommand::AddDeps { rule, deps } => {
                out.push(format!(
                    "{BUILDOZER} 'add deps {}' {}",
                    deps.join(" "),
                    rule
                ));
            }
            RepairCommand::NewJavaLibrary { name, source_root } => {
                out.push(format!("{BUILDOZER} 'new java_library {name}' __pkg__"));
                out.push(format!(
                    r#"{BUILDOZER} 'set srcs glob(["{source_root}**/*.java"])' {name}"#
                ));
            }
        }
    }
    out
}
