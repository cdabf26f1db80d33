//! Scans a log, resolves it against a catalog and workspace, and checks
//! the rendered buildozer output.

use bazelheal_logscan::{LogScan, scan_lines};
use bazelheal_render::render_commands;
use bazelheal_resolve::Resolver;
use bazelheal_types::Dependency;
use bazelheal_workspace::StaticWorkspace;
use pretty_assertions::assert_eq;

#[test]
fn catalog_only_hit_creates_a_new_library() {
    let scan = scan_lines([
        "Building lib//:foo.jar (1 source file)",
        "src/Main.java:1: package com.x does not exist",
        "import com.x.Y;",
    ])
    .expect("scan log");
    let LogScan::Problems(problems) = scan else {
        panic!("expected problems, got {scan:?}");
    };
    assert_eq!(problems.bazel_rule.as_deref(), Some("//:foo"));
    assert_eq!(problems.missing_class.len(), 1);
    assert_eq!(problems.missing_class[0].name, "com.x.Y");

    // No existing rule sources, no genrule, no rule named ext_x.
    let workspace = StaticWorkspace::new();
    let catalog = vec![Dependency {
        name: "ext_x".to_string(),
        external_reference: "ext/x/src/main/java/".to_string(),
        resources: vec!["com.x.Y".to_string()],
    }];

    let commands = Resolver::new()
        .resolve(&problems, &catalog, &workspace)
        .expect("resolve");
    let lines = render_commands(&commands);
    assert_eq!(
        lines,
        vec![
            "buildozer 'new java_library ext_x' __pkg__",
            r#"buildozer 'set srcs glob(["ext/x/src/main/java/**/*.java"])' ext_x"#,
        ]
    );
}

#[test]
fn genrule_hit_attaches_the_generated_rule() {
    let scan = scan_lines([
        "Building lib//:portal.jar (4 source files)",
        "src/Client.java:2: package com.partner.soap does not exist",
        "import com.partner.soap.PortType;",
    ])
    .expect("scan log");
    let LogScan::Problems(problems) = scan else {
        panic!("expected problems, got {scan:?}");
    };

    let workspace = StaticWorkspace::new().with_genrule("com_partner_soap");
    let commands = Resolver::new()
        .resolve(&problems, &[], &workspace)
        .expect("resolve");
    assert_eq!(
        render_commands(&commands),
        vec!["buildozer 'add deps com_partner_soap' //:portal"]
    );
}
