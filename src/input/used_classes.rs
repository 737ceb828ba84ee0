use super::InputError;
use crate::model::UsedClasses;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load the classes referenced by the project's compiled output
pub fn load_used_classes(path: &Path) -> Result<UsedClasses, InputError> {
    let content = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let used = parse_used_classes(&content);
    debug!("Loaded {} used classes from {}", used.len(), path.display());

    Ok(used)
}

/// One class name per line. Blank lines are ignored.
pub fn parse_used_classes(content: &str) -> UsedClasses {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
