use assert_cmd::Command;
use regex::Regex;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    table_path: PathBuf,
    words_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let table_path = dir.path().join("blocks.txt");
        let words_path = dir.path().join("words.txt");

        let mut table = File::create(&table_path).unwrap();
        writeln!(table, "a 10").unwrap();
        writeln!(table, "ab 3").unwrap();
        writeln!(table, "b 7").unwrap();

        // Every single letter is a word, so any one-letter ciphertext solves at once.
        let mut words = File::create(&words_path).unwrap();
        for c in 'a'..='z' {
            writeln!(words, "{}", c).unwrap();
        }

        Self {
            dir,
            table_path,
            words_path,
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("cipherforge").unwrap();
        cmd.arg("--table")
            .arg(&self.table_path)
            .arg("--words")
            .arg(&self.words_path);
        cmd
    }
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_encrypt_with_known_key() {
    let ctx = TestContext::new();
    let out = stdout_of(
        ctx.cmd()
            .args(["encrypt", "--key", "bcdefghijklmnopqrstuvwxyza"])
            .args(["--text", "Abc, Zoo!"]),
    );
    assert!(out.contains("Ciphertext: bcd app"), "{}", out);
    assert!(out.contains("Decryption key: zabcdefghijklmnopqrstuvwxy"), "{}", out);
}

#[test]
fn test_score_reports_fitness_and_unknown_words() {
    let ctx = TestContext::new();
    let out = stdout_of(
        ctx.cmd()
            .args(["score", "--key", "abcdefghijklmnopqrstuvwxyz"])
            .args(["--text", "ab a"]),
    );
    let re = Regex::new(r"Fitness\s*\|\s*8\.23").unwrap();
    assert!(re.is_match(&out), "{}", out);
    assert!(out.contains("ab"), "{}", out);
}

#[test]
fn test_train_solves_and_writes_json() {
    let ctx = TestContext::new();
    let output_path = ctx.dir.path().join("outcome.json");
    let out = stdout_of(
        ctx.cmd()
            .args(["train", "--text", "q", "--seed", "3", "--max-cycles", "5"])
            .args(["--elites", "1", "--children", "4", "--randoms", "1"])
            .arg("--output")
            .arg(&output_path),
    );

    let re = Regex::new(r"Result\s*\|\s*solved").unwrap();
    assert!(re.is_match(&out), "{}", out);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(json["reason"], "solved");
    assert_eq!(json["cycles"], 0);
    assert_eq!(json["key"].as_str().unwrap().len(), 26);
}

#[test]
fn test_train_config_file_is_overridden_by_flags() {
    let ctx = TestContext::new();
    let config_path = ctx.dir.path().join("config.json");
    fs::write(
        &config_path,
        r#"{"search": {"elites": 1, "children": 2, "randoms": 1, "max_cycles": 1000}}"#,
    )
    .unwrap();

    let out = stdout_of(
        ctx.cmd()
            .arg("--config")
            .arg(&config_path)
            .args(["train", "--text", "q", "--max-cycles", "2"]),
    );
    assert!(out.contains("population 4"), "{}", out);
    assert!(out.contains("max 2 cycles"), "{}", out);
}

#[test]
fn test_train_without_text_fails() {
    let ctx = TestContext::new();
    let output = ctx.cmd().arg("train").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_inconsistent_probabilities_fail() {
    let ctx = TestContext::new();
    let output = ctx
        .cmd()
        .args(["train", "--text", "q", "--crossover-probability", "0.9"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_missing_table_fails() {
    let ctx = TestContext::new();
    let output = Command::cargo_bin("cipherforge")
        .unwrap()
        .arg("--table")
        .arg(ctx.dir.path().join("missing.txt"))
        .arg("--words")
        .arg(&ctx.words_path)
        .args(["score", "--key", "abcdefghijklmnopqrstuvwxyz", "--text", "a"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_build_table_writes_sorted_counts() {
    let ctx = TestContext::new();
    let corpus = ctx.dir.path().join("corpus.txt");
    let table = ctx.dir.path().join("out.txt");
    fs::write(&corpus, "Ab, a!").unwrap();

    let out = stdout_of(
        Command::cargo_bin("cipherforge")
            .unwrap()
            .arg("build-table")
            .arg("--corpus")
            .arg(&corpus)
            .arg("--output")
            .arg(&table),
    );
    assert!(out.contains("Wrote 3 blocks"), "{}", out);
    assert_eq!(fs::read_to_string(&table).unwrap(), "a 2\nab 1\nb 1\n");
}
