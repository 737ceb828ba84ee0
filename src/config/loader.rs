use crate::analysis::{
    ClassifierOptions, ShadowingMode, DEFAULT_AMBIENT_PREFIX, DEFAULT_EXCLUDED_DEPENDENCY,
};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for depmisuse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dependencies and classes that are never reported
    pub exclusions: ExclusionConfig,

    /// How used direct classes hide transitive ones
    pub shadowing: ShadowingMode,

    /// Report configuration
    pub report: ReportConfig,

    /// Projects (or build variants) analyzed in a batch run
    pub projects: Vec<ProjectConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionConfig {
    /// Dependency coordinate never reported; `null` disables
    pub dependency: Option<String>,

    /// Platform class prefix ignored for transitive usage; `null` disables
    pub ambient_prefix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: terminal, json, sarif
    pub format: String,
}

/// Inputs and outputs of one classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,

    /// JSON list of declared dependencies
    pub declared_dependencies: PathBuf,

    /// Text file of used class names
    pub used_classes: PathBuf,

    /// Where to write the unused dependencies list
    #[serde(default)]
    pub unused_output: Option<PathBuf>,

    /// Where to write the used transitive dependencies JSON
    #[serde(default)]
    pub transitives_output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclusions: ExclusionConfig::default(),
            shadowing: ShadowingMode::Complete,
            report: ReportConfig::default(),
            projects: vec![],
        }
    }
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            dependency: Some(DEFAULT_EXCLUDED_DEPENDENCY.to_string()),
            ambient_prefix: Some(DEFAULT_AMBIENT_PREFIX.to_string()),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "terminal".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".depmisuse.yml",
            ".depmisuse.yaml",
            ".depmisuse.toml",
            "depmisuse.yml",
            "depmisuse.yaml",
            "depmisuse.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }

    pub fn classifier_options(&self) -> ClassifierOptions {
        ClassifierOptions {
            excluded_dependency: self.exclusions.dependency.clone(),
            ambient_prefix: self.exclusions.ambient_prefix.clone(),
            shadowing: self.shadowing,
        }
    }

    /// Projects with relative paths resolved against `project_root`
    pub fn resolved_projects(&self, project_root: &Path) -> Vec<ProjectConfig> {
        self.projects
            .iter()
            .map(|project| project.resolve(project_root))
            .collect()
    }
}

impl ProjectConfig {
    pub fn resolve(&self, project_root: &Path) -> Self {
        let resolve = |path: &Path| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                project_root.join(path)
            }
        };

        Self {
            name: self.name.clone(),
            declared_dependencies: resolve(&self.declared_dependencies),
            used_classes: resolve(&self.used_classes),
            unused_output: self.unused_output.as_deref().map(resolve),
            transitives_output: self.transitives_output.as_deref().map(resolve),
        }
    }
}
