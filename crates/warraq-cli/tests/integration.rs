//! Integration tests for the warraq CLI

use std::fs;

use warraq_cli::run;

fn write_input(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_render_writes_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "notes.txt",
        "<h1>Demo</h1>\n- point one\n- point two; point three",
    );
    let output = dir.path().join("out.pdf");

    run([
        "warraq",
        "render",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--title",
        "Demo",
    ])
    .expect("render must succeed");

    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_render_dual_template() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "dual.txt",
        "[ENG]A cohort study tracks incidence.[/ENG][ARB]الدراسة الأترابية تتبع الحدوث.[/ARB]",
    );
    let output = dir.path().join("dual.pdf");

    run([
        "warraq",
        "render",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--template",
        "dual",
    ])
    .expect("dual render must succeed");

    assert!(fs::read(&output).unwrap().starts_with(b"%PDF"));
}

#[test]
fn test_segments_and_nodes_commands() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "segments.txt",
        "[HEAD_EN]Advantages[/HEAD_EN][ENG]fast[/ENG][ARB]سريع[/ARB]",
    );

    run(["warraq", "segments", input.to_str().unwrap()]).expect("segments must succeed");
    run(["warraq", "nodes", input.to_str().unwrap()]).expect("nodes must succeed");
}

#[test]
fn test_glossary_command() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "gloss.txt", "Bias affects any cohort study design.");

    run(["warraq", "glossary", input.to_str().unwrap()]).expect("glossary must succeed");
}

#[test]
fn test_missing_input_fails() {
    let result = run(["warraq", "render", "/nonexistent/input.txt"]);
    assert!(result.is_err());
}
