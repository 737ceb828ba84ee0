//! depmisuse - Dependency misuse detection for JVM/Android builds
//!
//! Reports two kinds of dependency-graph problems from static class usage:
//! declared dependencies whose classes are never referenced, and transitive
//! dependencies whose classes are referenced without being declared.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! 1. **Input** - Load declared dependencies (JSON) and used classes (text)
//! 2. **Classification** - Split dependencies into unused direct and used transitive
//! 3. **Artifacts** - Write the two report files consumed by the build
//! 4. **Reporting** - Output results as terminal text, JSON or SARIF
//!
//! Independent projects can be processed as a batch, optionally in parallel.

pub mod analysis;
pub mod batch;
pub mod config;
pub mod input;
pub mod model;
pub mod report;

pub use analysis::{
    Classification, ClassifierOptions, ClassifyError, DependencyClassifier, FindingKind,
    ShadowingMode,
};
pub use batch::{run_project, BatchRunner, ProjectError, ProjectOutcome};
pub use config::{Config, ProjectConfig};
pub use model::{Component, UsedClasses, UsedTransitiveDependency};
pub use report::{ArtifactWriter, ProjectReport, ReportFormat, Reporter};
