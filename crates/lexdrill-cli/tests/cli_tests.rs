//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const VOCAB: &str = r#"[
  {
    "simplified": "爱",
    "pinyin": ["ài", "ai4"],
    "english_concise": "love",
    "english_descriptive": "to love",
    "example_cn": "我爱你。",
    "example_pinyin": "Wǒ ài nǐ.",
    "example_en": "I love you."
  },
  {
    "simplified": "书",
    "pinyin": "shu1",
    "english_concise": "book",
    "measure_word": {"character": "本", "pinyin": "běn"}
  }
]"#;

fn lexdrill() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("lexdrill").unwrap();
    cmd.env_remove("LEXDRILL_VOCAB_DIR")
        .env_remove("LEXDRILL_PROGRESS_DIR")
        .env_remove("RUST_LOG");
    cmd
}

/// A workspace with a config file, one level-1 list and no progress.
fn workspace() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let vocab_dir = dir.path().join("json");
    std::fs::create_dir_all(&vocab_dir).unwrap();
    std::fs::write(vocab_dir.join("hsk1.json"), VOCAB).unwrap();

    let config = dir.path().join("lexdrill.toml");
    std::fs::write(
        &config,
        format!(
            "vocab_dir = {:?}\nprogress_dir = {:?}\n",
            vocab_dir.display().to_string(),
            dir.path().join("progress").display().to_string(),
        ),
    )
    .unwrap();
    (dir, config)
}

fn progress_file(dir: &Path) -> PathBuf {
    dir.join("progress").join("hsk1-progress.json")
}

fn read_progress(dir: &Path) -> Vec<serde_json::Value> {
    let content = std::fs::read_to_string(progress_file(dir)).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn help_output() {
    lexdrill()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Adaptive vocabulary drill"));
}

#[test]
fn version_output() {
    lexdrill()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lexdrill"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    lexdrill()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created lexdrill.toml"))
        .stdout(predicate::str::contains("Created json/hsk1.json"));

    assert!(dir.path().join("lexdrill.toml").exists());
    assert!(dir.path().join("progress").is_dir());

    // the starter files are usable as written
    lexdrill()
        .current_dir(dir.path())
        .args(["validate", "--level", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 items"))
        .stdout(predicate::str::contains("Vocabulary valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    lexdrill().current_dir(dir.path()).arg("init").assert().success();

    lexdrill()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"[{"simplified": "书", "pinyin": "shu1", "english_concise": "book"},
            {"simplified": "书", "pinyin": "shu1", "english_concise": "book"},
            {"pinyin": "ta1"}]"#,
    )
    .unwrap();

    lexdrill()
        .arg("validate")
        .arg("--file")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("duplicate word '书'"))
        .stdout(predicate::str::contains("missing written form"))
        .stdout(predicate::str::contains("missing concise translation"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    lexdrill()
        .args(["validate", "--file", "nonexistent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn missing_explicit_config_is_an_error() {
    lexdrill()
        .args(["stats", "--config", "no/such/lexdrill.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn level_out_of_range_is_rejected() {
    let (_dir, config) = workspace();
    lexdrill()
        .args(["stats", "--level", "9", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid level 9"));
}

#[test]
fn stats_json_without_progress() {
    let (_dir, config) = workspace();
    let output = lexdrill()
        .args(["stats", "--format", "json", "--config"])
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["level"], 1);
    assert_eq!(report["total_words"], 2);
    assert_eq!(report["words_seen"], 0);
    assert_eq!(report["proficiency_percent"], 0.0);
    assert!(report["generated_at"].is_string());
}

#[test]
fn stats_rejects_unknown_format() {
    let (_dir, config) = workspace();
    lexdrill()
        .args(["stats", "--format", "yaml", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn scripted_quiz_saves_progress() {
    let (dir, config) = workspace();

    lexdrill()
        .args(["quiz", "--sequential", "--config"])
        .arg(&config)
        .write_stdin("ai4\n-s\n-h\n-q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("Skipped. The answer was: 书"))
        .stdout(predicate::str::contains("Hint: 我爱你。"))
        .stdout(predicate::str::contains("Session Summary (hsk1)"))
        .stdout(predicate::str::contains("1 / 2"));

    let records = read_progress(dir.path());
    assert_eq!(records.len(), 2);

    // the quit turn after the hint left 爱 as the first answer made it
    assert_eq!(records[0]["word"], "爱");
    assert_eq!(records[0]["weight"], 8.75);
    assert_eq!(records[0]["streak"], 1);
    assert_eq!(records[0]["correct"], 1);
    assert_eq!(records[0]["attempts"], 1);

    assert_eq!(records[1]["word"], "书");
    assert_eq!(records[1]["weight"], 10.0);
    assert_eq!(records[1]["attempts"], 1);
    assert_eq!(records[1]["correct"], 0);
}

#[test]
fn quiz_restores_previous_progress() {
    let (dir, config) = workspace();

    lexdrill()
        .args(["quiz", "--sequential", "--config"])
        .arg(&config)
        .write_stdin("ai4\nwrong\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Incorrect."))
        .stdout(predicate::str::contains("书 | shu1 (本 běn)"));

    lexdrill()
        .args(["quiz", "--sequential", "--no-metadata", "--config"])
        .arg(&config)
        .write_stdin("ai4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored progress for 2/2 words"))
        .stdout(predicate::str::contains("Streak").not());

    let records = read_progress(dir.path());
    assert_eq!(records[0]["attempts"], 2);
    assert_eq!(records[0]["correct"], 2);
    assert_eq!(records[0]["streak"], 2);
    assert_eq!(records[1]["attempts"], 1);
    assert_eq!(records[1]["correct"], 0);
}

#[test]
fn reverse_quiz_accepts_part_of_translation() {
    let (dir, config) = workspace();

    lexdrill()
        .args(["quiz", "--reverse", "--sequential", "--config"])
        .arg(&config)
        .write_stdin("LOV\nbook\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("〘 爱 (ài / ai4) 〙"))
        .stdout(predicate::str::contains("Word -> Translation"));

    let records = read_progress(dir.path());
    assert_eq!(records[0]["correct"], 1);
    assert_eq!(records[1]["correct"], 1);
}

#[test]
fn corrupt_progress_starts_fresh() {
    let (dir, config) = workspace();
    std::fs::create_dir_all(dir.path().join("progress")).unwrap();
    std::fs::write(progress_file(dir.path()), "{ not json").unwrap();

    lexdrill()
        .args(["quiz", "--sequential", "--config"])
        .arg(&config)
        .write_stdin("-q\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("failed to parse").count(1))
        .stderr(predicate::str::contains("\x1b[").not());

    // rewritten as a valid store with defaults
    let records = read_progress(dir.path());
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["attempts"], 0);
}

#[test]
fn unreadable_input_ends_the_session_cleanly() {
    let (dir, config) = workspace();

    lexdrill()
        .args(["quiz", "--sequential", "--config"])
        .arg(&config)
        .write_stdin(b"ai4\n\xff\xfe\n".to_vec())
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("Session Summary (hsk1)"))
        .stderr(predicate::str::contains("failed to read input"))
        .stderr(predicate::str::contains("without finishing").not());

    let records = read_progress(dir.path());
    assert_eq!(records[0]["correct"], 1);
    assert_eq!(records[1]["attempts"], 0);
}

#[test]
fn reset_requires_confirmation() {
    let (dir, config) = workspace();
    lexdrill()
        .args(["quiz", "--sequential", "--config"])
        .arg(&config)
        .write_stdin("ai4\n")
        .assert()
        .success();
    assert!(progress_file(dir.path()).exists());

    lexdrill()
        .args(["reset", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    assert!(progress_file(dir.path()).exists());

    lexdrill()
        .args(["reset", "--yes", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));
    assert!(!progress_file(dir.path()).exists());

    lexdrill()
        .args(["reset", "--yes", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to reset"));
}
