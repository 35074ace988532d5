//! Integration tests for the ratelex command-line front end

use ratelex_cli::{commands, ClassifyArgs, WeightsArgs};
use ratelex_classifiers::Strategy;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CORPUS: &str = r#"{
    "scale": 10,
    "ratings": {
        "1": { "length": 1000, "reviews": 10 },
        "2": { "length": 1000, "reviews": 10 },
        "3": { "length": 1000, "reviews": 10 },
        "4": { "length": 1000, "reviews": 10 },
        "5": { "length": 1000, "reviews": 10 },
        "6": { "length": 1000, "reviews": 10 },
        "7": { "length": 1000, "reviews": 10 },
        "8": { "length": 1000, "reviews": 10 },
        "9": { "length": 1000, "reviews": 10 },
        "10": { "length": 1000, "reviews": 10 }
    }
}"#;

const TERMS: &str = r#"[
    { "term": "superb", "counts": { "8": 1, "9": 5, "10": 4 }, "documents": [1, 2, 3, 4] },
    { "term": "mixed", "counts": { "3": 10, "4": 10, "7": 10, "8": 10 }, "documents": [5, 6] },
    { "term": "hapax", "counts": { "2": 1 }, "documents": [9] }
]"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn classify_args(dir: &TempDir, config: Option<&Path>) -> ClassifyArgs {
    ClassifyArgs {
        config: config.map(Path::to_path_buf),
        corpus: write(dir, "corpus.json", CORPUS),
        terms: write(dir, "terms.json", TERMS),
        strategy: None,
        workers: Some(2),
        metrics: false,
    }
}

fn lines(buffer: Vec<u8>) -> Vec<Value> {
    String::from_utf8(buffer)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_classify_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let args = classify_args(&dir, None);

    let mut buffer = Vec::new();
    let snapshot = commands::classify(&args, &mut buffer).await.unwrap();
    let outcomes = lines(buffer);

    assert_eq!(outcomes.len(), 3);
    assert_eq!(snapshot.classified, 2);
    assert_eq!(snapshot.skipped, 1);

    assert_eq!(outcomes[0]["term"], "superb");
    assert_eq!(outcomes[0]["status"], "classified");
    assert_eq!(outcomes[0]["result"]["subjectivity"], "subjective");

    assert_eq!(outcomes[1]["term"], "mixed");
    assert_eq!(outcomes[1]["status"], "classified");

    assert_eq!(outcomes[2]["term"], "hapax");
    assert_eq!(outcomes[2]["status"], "skipped");
    assert_eq!(outcomes[2]["reason"]["kind"], "too_few_observations");
}

#[tokio::test]
async fn test_classify_window_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(
        &dir,
        "ratelex.yaml",
        "default_strategy: window\ngating:\n  min_observations: 1\n  min_documents: 1\n",
    );
    let args = classify_args(&dir, Some(&config));

    let mut buffer = Vec::new();
    let snapshot = commands::classify(&args, &mut buffer).await.unwrap();
    let outcomes = lines(buffer);

    assert_eq!(snapshot.skipped, 0);
    assert_eq!(outcomes[0]["result"]["strategy"], "window");
    assert_eq!(outcomes[0]["result"]["components"].as_array().unwrap().len(), 1);
    assert_eq!(outcomes[2]["status"], "classified");
}

#[tokio::test]
async fn test_strategy_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(&dir, "ratelex.yaml", "default_strategy: window\n");
    let mut args = classify_args(&dir, Some(&config));
    args.strategy = Some(Strategy::Threshold);

    let mut buffer = Vec::new();
    commands::classify(&args, &mut buffer).await.unwrap();
    let outcomes = lines(buffer);

    assert_eq!(outcomes[0]["result"]["strategy"], "threshold");
}

#[tokio::test]
async fn test_scale_mismatch_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(&dir, "ratelex.yaml", "scale: 4\n");
    let args = classify_args(&dir, Some(&config));

    let mut buffer = Vec::new();
    assert!(commands::classify(&args, &mut buffer).await.is_err());
    assert!(buffer.is_empty());
}

#[test]
fn test_weights_table() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write(
        &dir,
        "corpus.json",
        r#"{ "scale": 4, "ratings": { "1": { "length": 10, "reviews": 1 }, "4": { "length": 30, "reviews": 2 } } }"#,
    );
    let config = write(&dir, "ratelex.yaml", "scale: 4\n");
    let args = WeightsArgs {
        config: Some(config),
        corpus,
    };

    let mut buffer = Vec::new();
    let rows = commands::weights(&args, &mut buffer).unwrap();

    let weights: Vec<f64> = rows.iter().map(|row| row.weight).collect();
    assert_eq!(weights, vec![4.0, 0.0, 0.0, 4.0 / 3.0]);
    assert_eq!(lines(buffer).len(), 4);
}

#[test]
fn test_missing_corpus_file() {
    let dir = tempfile::tempdir().unwrap();
    let args = WeightsArgs {
        config: None,
        corpus: dir.path().join("absent.json"),
    };

    let error = commands::weights(&args, &mut Vec::new()).unwrap_err();
    assert!(error.to_string().contains("reading corpus file"));
}
