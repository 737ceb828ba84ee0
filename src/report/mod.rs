mod artifacts;
mod json;
mod sarif;
mod terminal;

pub use artifacts::{render_unused, render_used_transitives, ArtifactError, ArtifactWriter};
pub use json::JsonReporter;
pub use sarif::SarifReporter;
pub use terminal::TerminalReporter;

use crate::analysis::Classification;
use miette::Result;
use std::path::{Path, PathBuf};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
    Sarif,
}

impl ReportFormat {
    /// Parse a config value, falling back to terminal output
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "json" => ReportFormat::Json,
            "sarif" => ReportFormat::Sarif,
            _ => ReportFormat::Terminal,
        }
    }
}

/// Classification of one project, ready to be reported
#[derive(Debug, Clone, Copy)]
pub struct ProjectReport<'a> {
    pub name: &'a str,
    pub declared_dependencies: &'a Path,
    pub classification: &'a Classification,
}

/// Reporter for outputting classification results
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self { format, output_path }
    }

    pub fn report(&self, projects: &[ProjectReport<'_>]) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => {
                let reporter = TerminalReporter::new();
                reporter.report(projects)
            }
            ReportFormat::Json => {
                let reporter = JsonReporter::new(self.output_path.clone());
                reporter.report(projects)
            }
            ReportFormat::Sarif => {
                let reporter = SarifReporter::new(self.output_path.clone());
                reporter.report(projects)
            }
        }
    }
}
