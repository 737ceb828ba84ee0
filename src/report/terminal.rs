use super::ProjectReport;
use crate::analysis::{Classification, FindingKind};
use colored::Colorize;
use miette::Result;

/// Terminal reporter with colored output
pub struct TerminalReporter {
    /// Print the triggering classes under each used transitive dependency
    show_classes: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { show_classes: true }
    }

    pub fn with_classes(mut self, show: bool) -> Self {
        self.show_classes = show;
        self
    }

    pub fn report(&self, projects: &[ProjectReport<'_>]) -> Result<()> {
        print!("{}", self.render(projects));
        Ok(())
    }

    /// Render all projects as colored text
    pub fn render(&self, projects: &[ProjectReport<'_>]) -> String {
        let mut out = String::new();

        for project in projects {
            if projects.len() > 1 {
                out.push_str(&format!("{}\n", project.name.cyan().bold()));
            }
            self.render_classification(project.classification, &mut out);
            out.push('\n');
        }

        self.render_summary(projects, &mut out);
        out
    }

    fn render_classification(&self, classification: &Classification, out: &mut String) {
        if classification.is_clean() {
            out.push_str(&format!("{}\n", "No dependency misuse found!".green().bold()));
            return;
        }

        if !classification.unused_direct.is_empty() {
            out.push_str(&format!(
                "{} {}\n",
                "Unused dependencies:".yellow().bold(),
                format!("[{}]", FindingKind::UnusedDirect.code()).dimmed()
            ));
            for identifier in &classification.unused_direct {
                out.push_str(&format!("- {}\n", identifier));
            }
        }

        if !classification.used_transitives.is_empty() {
            out.push_str(&format!(
                "{} {}\n",
                "Used transitive dependencies:".yellow().bold(),
                format!("[{}]", FindingKind::UsedTransitive.code()).dimmed()
            ));
            for dependency in &classification.used_transitives {
                out.push_str(&format!("- {}\n", dependency.identifier));
                if self.show_classes {
                    for class in &dependency.triggering_classes {
                        out.push_str(&format!("    {} {}\n", "→".dimmed(), class.dimmed()));
                    }
                }
            }
        }
    }

    fn render_summary(&self, projects: &[ProjectReport<'_>], out: &mut String) {
        let unused: usize = projects
            .iter()
            .map(|p| p.classification.unused_direct.len())
            .sum();
        let transitives: usize = projects
            .iter()
            .map(|p| p.classification.used_transitives.len())
            .sum();

        if unused == 0 && transitives == 0 {
            return;
        }

        out.push_str(&format!("{}\n", "─".repeat(60).dimmed()));
        out.push_str(&format!(
            "Summary: {}, {}\n",
            format!("{} unused direct", unused).yellow(),
            format!("{} used transitive", transitives).yellow()
        ));
        if unused > 0 {
            out.push_str(&format!(
                "{}\n",
                "Tip: Classes referenced only from layout XML are not seen; check before removing"
                    .dimmed()
            ));
        }
        if transitives > 0 {
            out.push_str(&format!(
                "{}\n",
                "Tip: Declare used transitive dependencies directly in the build file".dimmed()
            ));
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
