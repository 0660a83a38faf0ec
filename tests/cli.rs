//! CLI integration tests for text-codec
//!
//! Tests the binary as a user would interact with it.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn text_codec() -> Command {
    let mut cmd = Command::cargo_bin("text-codec").unwrap();
    // Plain stderr and flag-driven log levels
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Basic Commands
// ============================================================================

#[test]
fn test_help() {
    text_codec()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reversible text encoders"));
}

#[test]
fn test_version() {
    text_codec()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("text-codec"));
}

#[test]
fn test_config_list() {
    text_codec()
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base64"))
        .stdout(predicate::str::contains("run_length"))
        .stdout(predicate::str::contains("huffman"));
}

#[test]
fn test_config_list_json() {
    let output = text_codec()
        .args(["config", "list", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let algorithms = value["algorithms"].as_array().unwrap();
    assert_eq!(algorithms.len(), 9);
    assert_eq!(algorithms[8]["name"], "frequency");
    assert_eq!(algorithms[8]["kind"], "compressor");
}

#[test]
fn test_config_show_with_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("codecs.toml");
    fs::write(&config_path, "[dictionary]\nwindow = 64\n").unwrap();

    text_codec()
        .arg("--config")
        .arg(&config_path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("window = 64"))
        .stdout(predicate::str::contains("default_algorithm = \"base64\""));
}

#[test]
fn test_invalid_config_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("codecs.toml");
    fs::write(&config_path, "[dictionary]\nmin_match = 0\n").unwrap();

    text_codec()
        .arg("--config")
        .arg(&config_path)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("min_match"));
}

// ============================================================================
// Encode/Decode
// ============================================================================

#[test]
fn test_encode_base64() {
    text_codec()
        .args(["encode", "base64"])
        .write_stdin("hello")
        .assert()
        .success()
        .stdout("aGVsbG8=\n");
}

#[test]
fn test_decode_base64_strips_one_newline() {
    text_codec()
        .args(["decode", "base64"])
        .write_stdin("aGVsbG8=\n")
        .assert()
        .success()
        .stdout("hello");
}

#[test]
fn test_compress_alias_and_rle() {
    text_codec()
        .args(["compress", "rle"])
        .write_stdin("aaabccccd")
        .assert()
        .success()
        .stdout("3ab4cd\n");

    text_codec()
        .args(["decompress", "run-length"])
        .write_stdin("3ab4cd")
        .assert()
        .success()
        .stdout("aaabccccd");
}

#[test]
fn test_roundtrip_every_algorithm() {
    let input = "Grüße <b>\"x\" & 'y'</b> aaaa 1234 ~~ 🦀";
    for algorithm in [
        "base64",
        "percent",
        "html_entity",
        "hex",
        "binary",
        "ascii_code",
        "run_length",
        "dictionary",
        "frequency",
    ] {
        let encoded = text_codec()
            .args(["encode", algorithm])
            .write_stdin(input)
            .output()
            .unwrap();
        assert!(encoded.status.success(), "{} encode failed", algorithm);

        text_codec()
            .args(["decode", algorithm])
            .write_stdin(encoded.stdout)
            .assert()
            .success()
            .stdout(input);
    }
}

#[test]
fn test_default_algorithm_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("codecs.toml");
    fs::write(&config_path, "[settings]\ndefault_algorithm = \"hex\"\n").unwrap();

    text_codec()
        .arg("--config")
        .arg(&config_path)
        .arg("encode")
        .write_stdin("hi")
        .assert()
        .success()
        .stdout("6869\n");
}

#[test]
fn test_file_input_and_output() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("input.txt");
    let output_path = dir.path().join("output.txt");
    fs::write(&input_path, "<tag>").unwrap();

    text_codec()
        .args(["encode", "html"])
        .arg(&input_path)
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stdout("");

    assert_eq!(fs::read_to_string(&output_path).unwrap(), "&lt;tag&gt;\n");
}

#[test]
fn test_output_file_roundtrip_keeps_trailing_newline() {
    let dir = tempfile::tempdir().unwrap();
    let encoded_path = dir.path().join("encoded.txt");
    let decoded_path = dir.path().join("decoded.txt");

    for algorithm in ["html_entity", "run_length", "dictionary", "base64"] {
        text_codec()
            .args(["encode", algorithm, "-o"])
            .arg(&encoded_path)
            .write_stdin("line\n")
            .assert()
            .success();

        text_codec()
            .args(["decode", algorithm])
            .arg(&encoded_path)
            .assert()
            .success()
            .stdout("line\n");

        text_codec()
            .args(["decode", algorithm])
            .arg(&encoded_path)
            .arg("-o")
            .arg(&decoded_path)
            .assert()
            .success();
        assert_eq!(fs::read_to_string(&decoded_path).unwrap(), "line\n", "{}", algorithm);
    }
}

#[test]
fn test_json_output() {
    let output = text_codec()
        .args(["encode", "hex", "--json"])
        .write_stdin("A")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["algorithm"], "hex");
    assert_eq!(value["direction"], "encode");
    assert_eq!(value["output"], "41");
    assert_eq!(value["input_chars"], 1);
}

#[test]
fn test_stats_on_stderr() {
    text_codec()
        .args(["compress", "rle", "--stats"])
        .write_stdin("aaaa")
        .assert()
        .success()
        .stdout("4a\n")
        .stderr(predicate::str::contains("4 chars in, 2 chars out"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unknown_algorithm_suggests() {
    text_codec()
        .args(["encode", "huffmann"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown algorithm 'huffmann'"))
        .stderr(predicate::str::contains("did you mean 'huffman'?"));
}

#[test]
fn test_malformed_percent() {
    text_codec()
        .args(["decode", "percent"])
        .write_stdin("%Z9")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: malformed input"));
}

#[test]
fn test_truncated_rle() {
    text_codec()
        .args(["decode", "rle"])
        .write_stdin("3")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("run count is not followed by a character"));
}

#[test]
fn test_json_reports_failure() {
    text_codec()
        .args(["decode", "hex", "--json"])
        .write_stdin("abZ")
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"error\""));
}

#[test]
fn test_invalid_utf8_input() {
    text_codec()
        .args(["encode", "base64"])
        .write_stdin(vec![0x66, 0xFF, 0x6F])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid UTF-8"));
}

#[test]
fn test_max_size_stdin() {
    text_codec()
        .args(["--max-size", "4", "encode", "hex"])
        .write_stdin("too long")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds maximum"));
}

#[test]
fn test_max_size_file_with_force() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("big.txt");
    fs::write(&input_path, "abcdefgh").unwrap();

    text_codec()
        .args(["--max-size", "4", "encode", "hex"])
        .arg(&input_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Use --force"));

    text_codec()
        .args(["--max-size", "4", "--force", "encode", "hex"])
        .arg(&input_path)
        .assert()
        .success()
        .stdout("6162636465666768\n")
        .stderr(predicate::str::contains("processing large file"));
}

// ============================================================================
// History
// ============================================================================

#[test]
fn test_history_records_and_lists() {
    let dir = tempfile::tempdir().unwrap();
    let history_path = dir.path().join("history.jsonl");

    for input in ["one", "two", "three"] {
        text_codec()
            .args(["encode", "base64", "--history"])
            .arg(&history_path)
            .write_stdin(input)
            .assert()
            .success();
    }

    let content = fs::read_to_string(&history_path).unwrap();
    assert_eq!(content.lines().count(), 3);

    text_codec()
        .arg("history")
        .arg(&history_path)
        .args(["--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"two\""))
        .stdout(predicate::str::contains("\"three\""))
        .stdout(predicate::str::contains("\"one\"").not());
}

#[test]
fn test_history_skips_failures() {
    let dir = tempfile::tempdir().unwrap();
    let history_path = dir.path().join("history.jsonl");

    text_codec()
        .args(["decode", "hex", "--history"])
        .arg(&history_path)
        .write_stdin("zz")
        .assert()
        .failure();

    assert!(!history_path.exists());
}

#[test]
fn test_history_json() {
    let dir = tempfile::tempdir().unwrap();
    let history_path = dir.path().join("history.jsonl");

    text_codec()
        .args(["compress", "dictionary", "--history"])
        .arg(&history_path)
        .write_stdin("abcabcabc")
        .assert()
        .success();

    let output = text_codec()
        .arg("history")
        .arg(&history_path)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["algorithm"], "dictionary");
    assert_eq!(entries[0]["input"], "abcabcabc");
    assert_eq!(entries[0]["output"], "abc~3,6;");
}
