use super::ProjectReport;
use crate::analysis::FindingKind;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

/// SARIF reporter for CI/CD integration (GitHub, Azure DevOps, etc.)
pub struct SarifReporter {
    output_path: Option<PathBuf>,
}

impl SarifReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, projects: &[ProjectReport<'_>]) -> Result<()> {
        let json = self.render(projects)?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("SARIF report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }

    pub fn render(&self, projects: &[ProjectReport<'_>]) -> Result<String> {
        let sarif = SarifReport::from_projects(projects);
        serde_json::to_string_pretty(&sarif).into_diagnostic()
    }
}

/// SARIF 2.1.0 format
#[derive(Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<SarifRun>,
}

#[derive(Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize)]
struct SarifDriver {
    name: &'static str,
    version: &'static str,
    rules: Vec<SarifRule>,
}

#[derive(Serialize)]
struct SarifRule {
    id: &'static str,
    name: &'static str,
    #[serde(rename = "shortDescription")]
    short_description: SarifMessage,
    #[serde(rename = "defaultConfiguration")]
    default_configuration: SarifConfiguration,
}

#[derive(Serialize)]
struct SarifConfiguration {
    level: &'static str,
}

#[derive(Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: &'static str,
    level: &'static str,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
}

#[derive(Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

impl SarifRule {
    fn for_kind(kind: FindingKind) -> Self {
        SarifRule {
            id: kind.code(),
            name: kind.rule_name(),
            short_description: SarifMessage {
                text: kind.description().to_string(),
            },
            default_configuration: SarifConfiguration { level: "warning" },
        }
    }
}

impl SarifResult {
    fn new(kind: FindingKind, text: String, uri: &str) -> Self {
        SarifResult {
            rule_id: kind.code(),
            level: "warning",
            message: SarifMessage { text },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifactLocation {
                        uri: uri.to_string(),
                    },
                },
            }],
        }
    }
}

impl SarifReport {
    fn from_projects(projects: &[ProjectReport<'_>]) -> Self {
        let rules = vec![
            SarifRule::for_kind(FindingKind::UnusedDirect),
            SarifRule::for_kind(FindingKind::UsedTransitive),
        ];

        let mut results = Vec::new();
        for project in projects {
            let uri = project.declared_dependencies.to_string_lossy();
            let classification = project.classification;

            for identifier in &classification.unused_direct {
                results.push(SarifResult::new(
                    FindingKind::UnusedDirect,
                    format!("[{}] Dependency '{}' is declared but never used", project.name, identifier),
                    &uri,
                ));
            }

            for dependency in &classification.used_transitives {
                let classes: Vec<&str> = dependency
                    .triggering_classes
                    .iter()
                    .map(String::as_str)
                    .collect();
                results.push(SarifResult::new(
                    FindingKind::UsedTransitive,
                    format!(
                        "[{}] Transitive dependency '{}' is used directly ({})",
                        project.name,
                        dependency.identifier,
                        classes.join(", ")
                    ),
                    &uri,
                ));
            }
        }

        SarifReport {
            schema: "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json",
            version: "2.1.0",
            runs: vec![SarifRun {
                tool: SarifTool {
                    driver: SarifDriver {
                        name: "depmisuse",
                        version: env!("CARGO_PKG_VERSION"),
                        rules,
                    },
                },
                results,
            }],
        }
    }
}
