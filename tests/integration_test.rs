use hack_asm::{AsmError, assemble, assemble_file, output_path};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn test_file(name: &str) {
    let asm_path = fixture(&format!("{}.asm", name));
    let hack_path = fixture(&format!("{}.hack", name));

    let source = fs::read_to_string(&asm_path)
        .unwrap_or_else(|_| panic!("Failed to read {}", asm_path.display()));

    let expected = fs::read_to_string(&hack_path)
        .unwrap_or_else(|_| panic!("Failed to read {}", hack_path.display()));

    let result = assemble(&source).unwrap_or_else(|e| panic!("Failed to assemble {}: {}", name, e));

    assert_eq!(result, expected, "Output mismatch for {}", name);
}

#[test]
fn test_add() {
    test_file("Add");
}

#[test]
fn test_max() {
    test_file("Max");
}

#[test]
fn test_rect() {
    test_file("Rect");
}

#[test]
fn test_mult() {
    test_file("Mult");
}

#[test]
fn test_fill() {
    test_file("Fill");
}

#[test]
fn test_output_path() {
    assert_eq!(output_path(Path::new("Max.asm")), PathBuf::from("Max.hack"));
    assert_eq!(
        output_path(Path::new("progs/pong/Pong.asm")),
        PathBuf::from("progs/pong/Pong.hack")
    );
    assert_eq!(output_path(Path::new("Prog")), PathBuf::from("Prog.hack"));
}

#[test]
fn test_assemble_file_writes_hack() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Max.asm");
    fs::copy(fixture("Max.asm"), &input).unwrap();

    let output = output_path(&input);
    let program = assemble_file(&input, &output).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    let expected = fs::read_to_string(fixture("Max.hack")).unwrap();
    assert_eq!(written, expected);
    assert_eq!(program.words.len(), 16);
    assert_eq!(
        program.user_symbols(),
        vec![("OUTPUT_FIRST", 10), ("OUTPUT_D", 12), ("INFINITE_LOOP", 14)]
    );
}

#[test]
fn test_assemble_file_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Bad.asm");
    fs::write(&input, "@1\nD=D*A\n").unwrap();

    let output = output_path(&input);
    let result = assemble_file(&input, &output);

    assert!(matches!(result, Err(AsmError::UnknownMnemonic { .. })));
    assert!(!output.exists());
}

#[test]
fn test_assemble_file_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Missing.asm");

    match assemble_file(&input, &output_path(&input)) {
        Err(AsmError::Io { path, .. }) => assert_eq!(path, input),
        other => panic!("Expected Io error, got {:?}", other),
    }
}
