// Dependency misuse analysis

mod classifier;

pub use classifier::{
    ClassifierOptions, ClassifyError, DependencyClassifier, ShadowingMode,
    DEFAULT_AMBIENT_PREFIX, DEFAULT_EXCLUDED_DEPENDENCY,
};

use crate::model::UsedTransitiveDependency;

/// Kinds of dependency misuse findings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    /// Declared directly but none of its classes are used
    UnusedDirect,

    /// Only available transitively but its classes are used
    UsedTransitive,
}

impl FindingKind {
    pub fn code(&self) -> &'static str {
        match self {
            FindingKind::UnusedDirect => "DM001",
            FindingKind::UsedTransitive => "DM002",
        }
    }

    pub fn rule_name(&self) -> &'static str {
        match self {
            FindingKind::UnusedDirect => "unused-direct-dependency",
            FindingKind::UsedTransitive => "used-transitive-dependency",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FindingKind::UnusedDirect => "Dependency is declared but none of its classes are used",
            FindingKind::UsedTransitive => {
                "Classes of a transitive dependency are used without declaring it"
            }
        }
    }
}

/// Result of one classification pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Identifiers of unused direct dependencies, in input order
    pub unused_direct: Vec<String>,

    /// Used transitive dependencies, in input order
    pub used_transitives: Vec<UsedTransitiveDependency>,

    /// Components that took part in the analysis
    pub analyzed: usize,

    /// Components skipped because they provide no classes
    pub skipped_empty: usize,
}

impl Classification {
    /// No unused direct and no used transitive dependencies
    pub fn is_clean(&self) -> bool {
        self.unused_direct.is_empty() && self.used_transitives.is_empty()
    }

    pub fn finding_count(&self) -> usize {
        self.unused_direct.len() + self.used_transitives.len()
    }

    pub fn stats(&self) -> ClassificationStats {
        ClassificationStats {
            analyzed: self.analyzed,
            skipped_empty: self.skipped_empty,
            unused_direct: self.unused_direct.len(),
            used_transitives: self.used_transitives.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationStats {
    pub analyzed: usize,
    pub skipped_empty: usize,
    pub unused_direct: usize,
    pub used_transitives: usize,
}

impl std::fmt::Display for ClassificationStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} components analyzed ({} without classes skipped): {} unused direct, {} used transitive",
            self.analyzed, self.skipped_empty, self.unused_direct, self.used_transitives
        )
    }
}
