// Batch runner using rayon
//
// Each configured project is a full, independent classification: load both
// inputs, classify, write both report files. Projects share nothing, so they
// can run on separate workers.

use crate::analysis::{Classification, ClassifyError, DependencyClassifier};
use crate::config::ProjectConfig;
use crate::input::{load_components, load_used_classes, InputError};
use crate::report::{ArtifactError, ArtifactWriter};
use rayon::prelude::*;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Failure of a single project run
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("Invalid declared dependencies: {0}")]
    Classify(#[from] ClassifyError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Outcome of one project in a batch
#[derive(Debug)]
pub struct ProjectOutcome {
    pub name: String,
    pub declared_dependencies: PathBuf,
    pub result: Result<Classification, ProjectError>,
}

impl ProjectOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Classify one project and write its report files.
///
/// Previous report files are removed first, so a failed run never leaves
/// stale output behind.
pub fn run_project(
    classifier: &DependencyClassifier,
    project: &ProjectConfig,
) -> Result<Classification, ProjectError> {
    let writer = ArtifactWriter::new(
        project.unused_output.clone(),
        project.transitives_output.clone(),
    );
    writer.clear()?;

    let components = load_components(&project.declared_dependencies)?;
    let used = load_used_classes(&project.used_classes)?;

    debug!(
        "{}: {} declared dependencies, {} used classes",
        project.name,
        components.len(),
        used.len()
    );

    let classification = classifier.classify(&components, &used)?;
    writer.write(&classification)?;

    Ok(classification)
}

/// Runs many independent projects, optionally in parallel
pub struct BatchRunner {
    classifier: DependencyClassifier,
    parallel: bool,
}

impl BatchRunner {
    pub fn new(classifier: DependencyClassifier) -> Self {
        Self {
            classifier,
            parallel: false,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run all projects; outcomes are returned in project order
    pub fn run(&self, projects: &[ProjectConfig]) -> Vec<ProjectOutcome> {
        self.run_with(projects, |_| {})
    }

    /// Run all projects, calling `on_complete` as each one finishes
    pub fn run_with<F>(&self, projects: &[ProjectConfig], on_complete: F) -> Vec<ProjectOutcome>
    where
        F: Fn(&ProjectOutcome) + Sync,
    {
        let run_one = |project: &ProjectConfig| {
            let outcome = ProjectOutcome {
                name: project.name.clone(),
                declared_dependencies: project.declared_dependencies.clone(),
                result: run_project(&self.classifier, project),
            };
            if let Err(e) = &outcome.result {
                warn!("{}: {}", outcome.name, e);
            }
            on_complete(&outcome);
            outcome
        };

        if self.parallel {
            info!("Classifying {} projects in parallel...", projects.len());
            projects.par_iter().map(run_one).collect()
        } else {
            projects.iter().map(run_one).collect()
        }
    }
}
