//! Classifier integration tests
//!
//! These tests exercise the classification rules through the public API,
//! including the fixture project under tests/fixtures/app.

use depmisuse::analysis::{Classification, DependencyClassifier, ShadowingMode};
use depmisuse::input::{load_components, load_used_classes};
use depmisuse::model::{Component, UsedClasses};
use std::path::PathBuf;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn used(classes: &[&str]) -> UsedClasses {
    classes.iter().copied().collect()
}

fn classify(components: &[Component], used: &UsedClasses) -> Classification {
    DependencyClassifier::new()
        .classify(components, used)
        .expect("classification should succeed")
}

fn transitive_ids(classification: &Classification) -> Vec<&str> {
    classification
        .used_transitives
        .iter()
        .map(|t| t.identifier.as_str())
        .collect()
}

// ============================================================================
// End-to-end examples
// ============================================================================

#[test]
fn test_direct_dependency_without_usage_is_unused() {
    let components = vec![Component::direct("lib:a", ["a.X", "a.Y"])];
    let result = classify(&components, &UsedClasses::new());

    assert_eq!(result.unused_direct, vec!["lib:a"]);
    assert!(result.used_transitives.is_empty());
}

#[test]
fn test_used_direct_class_is_not_a_transitive_trigger() {
    let components = vec![
        Component::direct("lib:a", ["a.X"]),
        Component::transitive("lib:b", ["a.X", "b.Z"]),
    ];
    let result = classify(&components, &used(&["a.X", "b.Z"]));

    assert!(result.unused_direct.is_empty());
    assert_eq!(transitive_ids(&result), vec!["lib:b"]);
    assert_eq!(
        result.used_transitives[0]
            .triggering_classes
            .iter()
            .collect::<Vec<_>>(),
        vec!["b.Z"]
    );
}

#[test]
fn test_platform_class_contributes_nothing() {
    let components = vec![Component::transitive("lib:support", ["android.app.Activity"])];
    let result = classify(&components, &used(&["android.app.Activity"]));

    assert!(result.is_clean());
}

#[test]
fn test_empty_component_list() {
    let result = classify(&[], &used(&["a.X"]));

    assert!(result.unused_direct.is_empty());
    assert!(result.used_transitives.is_empty());
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_classification_is_idempotent() {
    let components = vec![
        Component::direct("lib:a", ["a.X"]),
        Component::direct("lib:c", ["c.X"]),
        Component::transitive("lib:b", ["a.X", "b.Z", "b.Y"]),
    ];
    let used = used(&["a.X", "b.Z", "b.Y"]);
    let classifier = DependencyClassifier::new();

    let first = classifier.classify(&components, &used).unwrap();
    let second = classifier.classify(&components, &used).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_components_without_classes_never_reported() {
    let components = vec![
        Component::direct("androidx.legacy:legacy-support-v4", Vec::<String>::new()),
        Component::transitive("lib:empty", Vec::<String>::new()),
        Component::direct("lib:a", ["a.X"]),
    ];
    let result = classify(&components, &UsedClasses::new());

    assert_eq!(result.unused_direct, vec!["lib:a"]);
    assert!(result.used_transitives.is_empty());
    assert_eq!(result.analyzed, 1);
    assert_eq!(result.skipped_empty, 2);
}

#[test]
fn test_excluded_dependency_never_reported() {
    let components = vec![
        Component::direct("org.jetbrains.kotlin:kotlin-stdlib", ["kotlin.Unit"]),
        Component::transitive("org.jetbrains.kotlin:kotlin-stdlib", ["kotlin.Pair"]),
    ];
    // Same identifier twice would be rejected, so check each role separately
    let direct = classify(&components[..1], &UsedClasses::new());
    assert!(direct.unused_direct.is_empty());

    let transitive = classify(&components[1..], &used(&["kotlin.Pair"]));
    assert!(transitive.used_transitives.is_empty());
}

#[test]
fn test_excluded_dependency_variants() {
    let components = vec![
        Component::direct("org.jetbrains.kotlin:kotlin-stdlib-jdk8", ["kotlin.jdk8.X"]),
        Component::transitive("org.jetbrains.kotlin:kotlin-stdlib-jdk7", ["kotlin.jdk7.Y"]),
    ];
    let result = classify(&components, &used(&["kotlin.jdk7.Y"]));

    // Prefix match for unused, exact match for transitive usage
    assert!(result.unused_direct.is_empty());
    assert_eq!(
        transitive_ids(&result),
        vec!["org.jetbrains.kotlin:kotlin-stdlib-jdk7"]
    );
}

#[test]
fn test_custom_exclusions() {
    let components = vec![
        Component::direct("org.jetbrains.kotlin:kotlin-stdlib", ["kotlin.Unit"]),
        Component::transitive("com.example:platform", ["java.lang.Thread", "com.example.Api"]),
    ];
    let result = DependencyClassifier::new()
        .with_excluded_dependency(Some("com.example:platform".to_string()))
        .with_ambient_prefix(Some("java.".to_string()))
        .classify(&components, &used(&["java.lang.Thread", "com.example.Api"]))
        .unwrap();

    assert_eq!(result.unused_direct, vec!["org.jetbrains.kotlin:kotlin-stdlib"]);
    assert!(result.used_transitives.is_empty());
}

#[test]
fn test_ambient_prefix_only_filters_matching_classes() {
    let components = vec![Component::transitive(
        "androidx.core:core",
        ["android.support.v4.os.ResultReceiver", "androidx.core.view.ViewCompat"],
    )];
    let result = classify(
        &components,
        &used(&["android.support.v4.os.ResultReceiver", "androidx.core.view.ViewCompat"]),
    );

    assert_eq!(
        result.used_transitives[0]
            .triggering_classes
            .iter()
            .collect::<Vec<_>>(),
        vec!["androidx.core.view.ViewCompat"]
    );
}

#[test]
fn test_triggering_classes_strictly_increasing() {
    let components = vec![Component::transitive(
        "lib:b",
        ["b.Zeta", "b.Alpha", "b.Mid", "b.Alpha"],
    )];
    let result = classify(&components, &used(&["b.Zeta", "b.Alpha", "b.Mid"]));

    let classes: Vec<_> = result.used_transitives[0]
        .triggering_classes
        .iter()
        .collect();
    assert_eq!(classes, vec!["b.Alpha", "b.Mid", "b.Zeta"]);
    assert!(classes.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_one_used_class_keeps_direct_dependency() {
    let components = vec![
        Component::direct("lib:a", ["a.X", "a.Y", "a.Z"]),
        Component::direct("lib:b", ["b.X"]),
    ];
    let result = classify(&components, &used(&["a.Y"]));

    assert_eq!(result.unused_direct, vec!["lib:b"]);
}

#[test]
fn test_unused_follows_input_order() {
    let components = vec![
        Component::direct("lib:z", ["z.X"]),
        Component::direct("lib:a", ["a.X"]),
        Component::direct("lib:m", ["m.X"]),
    ];
    let result = classify(&components, &UsedClasses::new());

    assert_eq!(result.unused_direct, vec!["lib:z", "lib:a", "lib:m"]);
}

#[test]
fn test_empty_usage_reports_no_transitives() {
    let components = vec![
        Component::direct("lib:a", ["a.X"]),
        Component::transitive("lib:b", ["b.X"]),
    ];
    let result = classify(&components, &UsedClasses::new());

    assert_eq!(result.unused_direct, vec!["lib:a"]);
    assert!(result.used_transitives.is_empty());
}

// ============================================================================
// Shadowing
// ============================================================================

#[test]
fn test_complete_shadowing_is_order_independent() {
    let mut components = vec![
        Component::transitive("lib:b", ["a.X", "b.Z"]),
        Component::direct("lib:a", ["a.X"]),
        Component::transitive("lib:c", ["c.Y"]),
    ];
    let used = used(&["a.X", "b.Z", "c.Y"]);

    let forward = classify(&components, &used);
    components.reverse();
    let reversed = classify(&components, &used);

    let mut forward_entries = forward.used_transitives.clone();
    let mut reversed_entries = reversed.used_transitives.clone();
    forward_entries.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    reversed_entries.sort_by(|a, b| a.identifier.cmp(&b.identifier));

    assert_eq!(forward_entries, reversed_entries);
    assert!(forward_entries[0].triggering_classes.iter().all(|c| c != "a.X"));
}

#[test]
fn test_sequential_shadowing_matches_legacy_order_dependence() {
    let components = vec![
        Component::transitive("lib:early", ["a.X"]),
        Component::direct("lib:a", ["a.X"]),
        Component::transitive("lib:late", ["a.X"]),
    ];
    let result = DependencyClassifier::new()
        .with_shadowing(ShadowingMode::Sequential)
        .classify(&components, &used(&["a.X"]))
        .unwrap();

    // Only the transitive listed before the direct dependency sees a.X as unshadowed
    assert_eq!(transitive_ids(&result), vec!["lib:early"]);
}

// ============================================================================
// Fixture project
// ============================================================================

#[test]
fn test_fixture_project() {
    let app = fixtures_path().join("app");
    let components = load_components(&app.join("declared-dependencies.json")).unwrap();
    let used = load_used_classes(&app.join("used-classes.txt")).unwrap();

    let result = classify(&components, &used);

    assert_eq!(
        result.unused_direct,
        vec![
            "androidx.constraintlayout:constraintlayout",
            "com.squareup.okio:okio"
        ]
    );
    assert_eq!(
        transitive_ids(&result),
        vec!["androidx.core:core", "javax.inject:javax.inject"]
    );
    assert_eq!(
        result.used_transitives[0]
            .triggering_classes
            .iter()
            .collect::<Vec<_>>(),
        vec![
            "androidx.core.app.ActivityCompat",
            "androidx.core.content.ContextCompat"
        ]
    );
    assert_eq!(result.skipped_empty, 1);
}
