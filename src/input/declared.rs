use super::InputError;
use crate::model::Component;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load the declared dependencies of a project
pub fn load_components(path: &Path) -> Result<Vec<Component>, InputError> {
    let content = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let components = parse_components(&content).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        "Loaded {} declared dependencies from {}",
        components.len(),
        path.display()
    );

    Ok(components)
}

pub fn parse_components(content: &str) -> Result<Vec<Component>, serde_json::Error> {
    serde_json::from_str(content)
}
