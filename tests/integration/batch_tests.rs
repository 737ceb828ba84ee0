//! Batch integration tests
//!
//! Several build variants configured in one config file, classified
//! sequentially and in parallel.

use assert_cmd::Command;
use depmisuse::analysis::DependencyClassifier;
use depmisuse::batch::{BatchRunner, ProjectError};
use depmisuse::config::Config;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Set up a project root with a `debug` variant copied from the fixtures, a
/// `release` variant with its own inputs, and a config listing both.
fn setup_project(root: &Path, extra_projects: &str) {
    let app = fixtures_path().join("app");
    let debug = root.join("build/debug");
    let release = root.join("build/release");
    fs::create_dir_all(&debug).unwrap();
    fs::create_dir_all(&release).unwrap();

    fs::copy(app.join("declared-dependencies.json"), debug.join("declared.json")).unwrap();
    fs::copy(app.join("used-classes.txt"), debug.join("used.txt")).unwrap();

    fs::write(
        release.join("declared.json"),
        r#"[{"identifier":"com.squareup.okio:okio","isTransitive":false,"classes":["okio.Buffer"]}]"#,
    )
    .unwrap();
    fs::write(release.join("used.txt"), "okio.Buffer\n").unwrap();

    fs::write(
        root.join("depmisuse.yml"),
        format!(
            r#"
shadowing: complete
projects:
  - name: debug
    declared_dependencies: build/debug/declared.json
    used_classes: build/debug/used.txt
    unused_output: build/reports/debug/unused.txt
    transitives_output: build/reports/debug/transitives.json
  - name: release
    declared_dependencies: build/release/declared.json
    used_classes: build/release/used.txt
    unused_output: build/reports/release/unused.txt
{}"#,
            extra_projects
        ),
    )
    .unwrap();
}

#[test]
fn test_batch_from_config() {
    let temp_dir = TempDir::new().unwrap();
    setup_project(temp_dir.path(), "");

    let config = Config::from_default_locations(temp_dir.path()).unwrap();
    let projects = config.resolved_projects(temp_dir.path());
    let classifier = DependencyClassifier::with_options(config.classifier_options());

    let sequential = BatchRunner::new(classifier.clone()).run(&projects);
    let parallel = BatchRunner::new(classifier).with_parallel(true).run(&projects);

    for outcomes in [&sequential, &parallel] {
        assert_eq!(outcomes.len(), 2);
        let debug = outcomes[0].result.as_ref().unwrap();
        let release = outcomes[1].result.as_ref().unwrap();

        assert_eq!(debug.unused_direct.len(), 2);
        assert_eq!(debug.used_transitives.len(), 2);
        assert!(release.is_clean());
    }

    let reports = temp_dir.path().join("build/reports");
    assert_eq!(
        fs::read_to_string(reports.join("release/unused.txt")).unwrap(),
        ""
    );
    assert!(reports.join("debug/transitives.json").exists());
    assert!(!reports.join("release/transitives.json").exists());
}

#[test]
fn test_batch_reports_missing_inputs_per_project() {
    let temp_dir = TempDir::new().unwrap();
    setup_project(
        temp_dir.path(),
        r#"  - name: staging
    declared_dependencies: build/staging/declared.json
    used_classes: build/staging/used.txt
"#,
    );

    let config = Config::from_default_locations(temp_dir.path()).unwrap();
    let outcomes = BatchRunner::new(DependencyClassifier::new())
        .run(&config.resolved_projects(temp_dir.path()));

    assert!(outcomes[0].is_ok());
    assert!(outcomes[1].is_ok());
    assert!(matches!(outcomes[2].result, Err(ProjectError::Input(_))));
}

#[test]
fn test_cli_batch_run() {
    let temp_dir = TempDir::new().unwrap();
    setup_project(temp_dir.path(), "");

    Command::cargo_bin("depmisuse")
        .unwrap()
        .env("NO_COLOR", "1")
        .arg(temp_dir.path())
        .arg("--parallel")
        .assert()
        .success()
        .stdout(predicate::str::contains("debug"))
        .stdout(predicate::str::contains("release"))
        .stdout(predicate::str::contains("Summary: 2 unused direct, 2 used transitive"));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("build/reports/debug/unused.txt")).unwrap(),
        "androidx.constraintlayout:constraintlayout\ncom.squareup.okio:okio"
    );
}

#[test]
fn test_cli_batch_with_failing_project() {
    let temp_dir = TempDir::new().unwrap();
    setup_project(
        temp_dir.path(),
        r#"  - name: staging
    declared_dependencies: build/staging/declared.json
    used_classes: build/staging/used.txt
"#,
    );

    Command::cargo_bin("depmisuse")
        .unwrap()
        .env("NO_COLOR", "1")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("staging"))
        .stderr(predicate::str::contains("1 of 3 projects could not be classified"));
}
