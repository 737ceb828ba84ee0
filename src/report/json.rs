use super::ProjectReport;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, projects: &[ProjectReport<'_>]) -> Result<()> {
        let json = self.render(projects)?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }

    pub fn render(&self, projects: &[ProjectReport<'_>]) -> Result<String> {
        let report = JsonReport::from_projects(projects);
        serde_json::to_string_pretty(&report).into_diagnostic()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    projects: Vec<JsonProject<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonProject<'a> {
    name: &'a str,
    declared_dependencies: String,
    unused_dependencies: &'a [String],
    used_transitive_dependencies: Vec<JsonUsedTransitive<'a>>,
    analyzed: usize,
    skipped_empty: usize,
}

#[derive(Serialize)]
struct JsonUsedTransitive<'a> {
    identifier: &'a str,
    classes: Vec<&'a str>,
}

#[derive(Serialize)]
struct JsonSummary {
    projects: usize,
    unused_dependencies: usize,
    used_transitive_dependencies: usize,
}

impl<'a> JsonReport<'a> {
    fn from_projects(projects: &[ProjectReport<'a>]) -> Self {
        let projects: Vec<JsonProject<'a>> = projects
            .iter()
            .map(|project| {
                let classification = project.classification;
                JsonProject {
                    name: project.name,
                    declared_dependencies: project
                        .declared_dependencies
                        .to_string_lossy()
                        .to_string(),
                    unused_dependencies: &classification.unused_direct,
                    used_transitive_dependencies: classification
                        .used_transitives
                        .iter()
                        .map(|dep| JsonUsedTransitive {
                            identifier: &dep.identifier,
                            classes: dep.triggering_classes.iter().map(String::as_str).collect(),
                        })
                        .collect(),
                    analyzed: classification.analyzed,
                    skipped_empty: classification.skipped_empty,
                }
            })
            .collect();

        let summary = JsonSummary {
            projects: projects.len(),
            unused_dependencies: projects.iter().map(|p| p.unused_dependencies.len()).sum(),
            used_transitive_dependencies: projects
                .iter()
                .map(|p| p.used_transitive_dependencies.len())
                .sum(),
        };

        Self {
            version: "1.0",
            projects,
            summary,
        }
    }
}
