// Report files consumed by the build
//
// - unused dependencies: identifiers joined by newlines
// - used transitive dependencies: JSON array of
//   {"identifier", "usedTransitiveClasses"}

use crate::analysis::Classification;
use crate::model::UsedTransitiveDependency;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to remove previous report {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize used transitive dependencies: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes the unused and used-transitive report files
#[derive(Debug, Clone, Default)]
pub struct ArtifactWriter {
    unused_output: Option<PathBuf>,
    transitives_output: Option<PathBuf>,
}

impl ArtifactWriter {
    pub fn new(unused_output: Option<PathBuf>, transitives_output: Option<PathBuf>) -> Self {
        Self {
            unused_output,
            transitives_output,
        }
    }

    /// Remove reports left over from a previous run
    pub fn clear(&self) -> Result<(), ArtifactError> {
        for path in self.outputs() {
            match fs::remove_file(path) {
                Ok(()) => debug!("Removed previous report {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(ArtifactError::Remove {
                        path: path.to_path_buf(),
                        source,
                    })
                }
            }
        }
        Ok(())
    }

    pub fn write(&self, classification: &Classification) -> Result<(), ArtifactError> {
        // Serialize first so a failure leaves neither file behind
        let transitives = render_used_transitives(&classification.used_transitives)?;

        if let Some(path) = &self.unused_output {
            write_file(path, &render_unused(&classification.unused_direct))?;
            info!("Unused dependencies report: {}", path.display());
        }

        if let Some(path) = &self.transitives_output {
            write_file(path, &transitives)?;
            info!("Used transitive dependencies report: {}", path.display());
        }

        Ok(())
    }

    fn outputs(&self) -> impl Iterator<Item = &Path> {
        self.unused_output
            .iter()
            .chain(self.transitives_output.iter())
            .map(PathBuf::as_path)
    }
}

pub fn render_unused(unused: &[String]) -> String {
    unused.join("\n")
}

pub fn render_used_transitives(
    used_transitives: &[UsedTransitiveDependency],
) -> Result<String, serde_json::Error> {
    serde_json::to_string(used_transitives)
}

fn write_file(path: &Path, contents: &str) -> Result<(), ArtifactError> {
    let to_error = |source| ArtifactError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(to_error)?;
        }
    }
    fs::write(path, contents).map_err(to_error)
}
