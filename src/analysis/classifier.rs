// Dependency classifier
//
// Splits the declared dependencies of a project into unused direct
// dependencies and used transitive dependencies, based on the set of class
// names the project's compiled output references.

use super::Classification;
use crate::model::{Component, UsedClasses, UsedTransitiveDependency};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;
use tracing::{debug, trace};

/// Dependency whose presence is assumed everywhere (never reported)
pub const DEFAULT_EXCLUDED_DEPENDENCY: &str = "org.jetbrains.kotlin:kotlin-stdlib";

/// Namespace of the host platform's runtime classes (android.jar)
pub const DEFAULT_AMBIENT_PREFIX: &str = "android.";

/// Malformed classifier input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("Component at position {index} has an empty identifier")]
    EmptyIdentifier { index: usize },
    #[error("Duplicate component identifier: {identifier}")]
    DuplicateIdentifier { identifier: String },
    #[error("Component {identifier} declares an empty class name")]
    EmptyClassName { identifier: String },
}

/// Which used direct classes hide a transitive dependency's classes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowingMode {
    /// Every used class of every direct dependency, regardless of order
    #[default]
    Complete,

    /// Only used classes of direct dependencies listed earlier in the input.
    /// Matches the legacy single-pass build task.
    Sequential,
}

impl ShadowingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShadowingMode::Complete => "complete",
            ShadowingMode::Sequential => "sequential",
        }
    }
}

impl std::fmt::Display for ShadowingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierOptions {
    /// Coordinate never reported. Matched exactly for transitive usage and as
    /// a prefix for unused direct dependencies (covers `-jdk7`/`-jdk8`).
    pub excluded_dependency: Option<String>,

    /// Class name prefix that never counts as transitive usage
    pub ambient_prefix: Option<String>,

    pub shadowing: ShadowingMode,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            excluded_dependency: Some(DEFAULT_EXCLUDED_DEPENDENCY.to_string()),
            ambient_prefix: Some(DEFAULT_AMBIENT_PREFIX.to_string()),
            shadowing: ShadowingMode::Complete,
        }
    }
}

/// Classifies declared dependencies by how the project uses their classes
#[derive(Debug, Clone, Default)]
pub struct DependencyClassifier {
    options: ClassifierOptions,
}

impl DependencyClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ClassifierOptions) -> Self {
        Self { options }
    }

    pub fn with_excluded_dependency(mut self, identifier: Option<String>) -> Self {
        self.options.excluded_dependency = identifier;
        self
    }

    pub fn with_ambient_prefix(mut self, prefix: Option<String>) -> Self {
        self.options.ambient_prefix = prefix;
        self
    }

    pub fn with_shadowing(mut self, shadowing: ShadowingMode) -> Self {
        self.options.shadowing = shadowing;
        self
    }

    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    /// Classify `components` against the classes the project uses.
    ///
    /// Components without classes are ignored. Unused direct dependencies and
    /// used transitive dependencies are both reported in input order.
    pub fn classify(
        &self,
        components: &[Component],
        used: &UsedClasses,
    ) -> Result<Classification, ClassifyError> {
        validate(components)?;

        let (analyzed, skipped): (Vec<&Component>, Vec<&Component>) =
            components.iter().partition(|c| c.has_classes());

        for component in &skipped {
            debug!("Skipping {} (no classes)", component.identifier);
        }

        let mut shadowed = match self.options.shadowing {
            ShadowingMode::Complete => used_direct_classes(&analyzed, used),
            ShadowingMode::Sequential => HashSet::new(),
        };

        let mut classification = Classification {
            analyzed: analyzed.len(),
            skipped_empty: skipped.len(),
            ..Classification::default()
        };

        for lib in analyzed {
            if lib.is_transitive {
                let triggered = self.triggering_classes(lib, used, &shadowed);
                if !triggered.is_empty() {
                    trace!(
                        "{} used transitively through {} classes",
                        lib.identifier,
                        triggered.len()
                    );
                    classification
                        .used_transitives
                        .push(UsedTransitiveDependency::new(&lib.identifier, triggered));
                }
                continue;
            }

            let used_here: Vec<&str> = lib
                .classes
                .iter()
                .map(String::as_str)
                .filter(|class| used.contains(class))
                .collect();

            if used_here.is_empty() && !self.is_excluded_from_unused(&lib.identifier) {
                trace!("{} declared but unused", lib.identifier);
                classification.unused_direct.push(lib.identifier.clone());
            }

            if self.options.shadowing == ShadowingMode::Sequential {
                shadowed.extend(used_here);
            }
        }

        debug!("Classification: {}", classification.stats());

        Ok(classification)
    }

    fn triggering_classes(
        &self,
        lib: &Component,
        used: &UsedClasses,
        shadowed: &HashSet<&str>,
    ) -> BTreeSet<String> {
        if self.is_excluded_dependency(&lib.identifier) {
            return BTreeSet::new();
        }

        lib.classes
            .iter()
            .filter(|class| used.contains(class.as_str()))
            .filter(|class| !self.is_ambient(class))
            .filter(|class| !shadowed.contains(class.as_str()))
            .cloned()
            .collect()
    }

    fn is_excluded_dependency(&self, identifier: &str) -> bool {
        match self.options.excluded_dependency.as_deref() {
            Some(excluded) if !excluded.is_empty() => identifier == excluded,
            _ => false,
        }
    }

    fn is_excluded_from_unused(&self, identifier: &str) -> bool {
        match self.options.excluded_dependency.as_deref() {
            Some(excluded) if !excluded.is_empty() => identifier.starts_with(excluded),
            _ => false,
        }
    }

    fn is_ambient(&self, class_name: &str) -> bool {
        match self.options.ambient_prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => class_name.starts_with(prefix),
            _ => false,
        }
    }
}

/// Used classes of all direct dependencies
fn used_direct_classes<'a>(components: &[&'a Component], used: &UsedClasses) -> HashSet<&'a str> {
    components
        .iter()
        .copied()
        .filter(|c| c.is_direct())
        .flat_map(|c| c.classes.iter())
        .map(String::as_str)
        .filter(|class| used.contains(class))
        .collect()
}

fn validate(components: &[Component]) -> Result<(), ClassifyError> {
    let mut seen = HashSet::with_capacity(components.len());

    for (index, component) in components.iter().enumerate() {
        if component.identifier.trim().is_empty() {
            return Err(ClassifyError::EmptyIdentifier { index });
        }
        if !seen.insert(component.identifier.as_str()) {
            return Err(ClassifyError::DuplicateIdentifier {
                identifier: component.identifier.clone(),
            });
        }
        if component.classes.iter().any(|c| c.trim().is_empty()) {
            return Err(ClassifyError::EmptyClassName {
                identifier: component.identifier.clone(),
            });
        }
    }

    Ok(())
}
