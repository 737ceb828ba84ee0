use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A declared dependency of the project, as produced by dependency resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Stable coordinate, e.g. `androidx.core:core`
    pub identifier: String,

    /// Whether the dependency is only pulled in transitively
    pub is_transitive: bool,

    /// Fully qualified class names provided by the dependency
    pub classes: BTreeSet<String>,
}

impl Component {
    pub fn new<I, S>(identifier: impl Into<String>, is_transitive: bool, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifier: identifier.into(),
            is_transitive,
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    /// Shorthand for a dependency declared directly by the project
    pub fn direct<I, S>(identifier: impl Into<String>, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(identifier, false, classes)
    }

    /// Shorthand for a dependency only reachable through other dependencies
    pub fn transitive<I, S>(identifier: impl Into<String>, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(identifier, true, classes)
    }

    pub fn is_direct(&self) -> bool {
        !self.is_transitive
    }

    /// Components without classes (e.g. `androidx.legacy:legacy-support-v4`)
    /// carry no usage signal.
    pub fn has_classes(&self) -> bool {
        !self.classes.is_empty()
    }
}

/// A transitive dependency whose classes the project uses directly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedTransitiveDependency {
    pub identifier: String,

    /// Sorted, duplicate-free class names that triggered the finding
    #[serde(rename = "usedTransitiveClasses")]
    pub triggering_classes: BTreeSet<String>,
}

impl UsedTransitiveDependency {
    pub fn new(identifier: impl Into<String>, triggering_classes: BTreeSet<String>) -> Self {
        Self {
            identifier: identifier.into(),
            triggering_classes,
        }
    }
}

impl std::fmt::Display for UsedTransitiveDependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier)?;
        for class in &self.triggering_classes {
            write!(f, "\n  - {}", class)?;
        }
        Ok(())
    }
}
