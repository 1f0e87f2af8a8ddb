//! Tests for `epikit preload`.

use crate::support::*;

const ANNOTATED: &str = "import React from 'react';\n\
@PreLoad(\"./components\",\"PreLoad\",\"app/components/\")\n\
export default {};\n";

fn annotated_project() -> Test {
    let t = Test::new();
    t.write("src/index.tsx", ANNOTATED);
    t.write("src/components/Header.tsx", "export default null;");
    t.write("src/components/blocks/Teaser.tsx", "export default null;");
    t.write("src/components/notes.md", "ignored");
    t
}

#[test]
fn test_preload_prints_rewritten_source() {
    let t = annotated_project();

    let output = t.cmd().args(["preload", "src/index.tsx"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "declare var PreLoad: any;");
    assert_stdout_contains(&output, "import Header from 'app/components/Header';");
    assert_stdout_contains(&output, "import blocksTeaser from 'app/components/blocks/Teaser';");
    assert!(!stdout(&output).contains("@PreLoad("));
    assert_eq!(t.read("src/index.tsx"), ANNOTATED);
}

#[test]
fn test_preload_write_updates_file() {
    let t = annotated_project();

    let output = t
        .cmd()
        .args(["preload", "--write", "src/index.tsx"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "injected 2 module(s)");

    let rewritten = t.read("src/index.tsx");
    assert!(rewritten.starts_with("import React from 'react';\n"));
    assert!(rewritten.contains("// Start: Injected PreLoad script"));
    assert!(rewritten.ends_with("export default {};\n"));
}

#[test]
fn test_preload_without_annotation() {
    let t = Test::new();
    t.write("index.tsx", "export default {};\n");

    let output = t.cmd().args(["preload", "index.tsx"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "no @PreLoad annotation");
}

#[test]
fn test_preload_missing_file() {
    let t = Test::new();

    let output = t.cmd().args(["preload", "missing.tsx"]).output().unwrap();
    assert_exit_code(&output, 1);
}
