//! Loaders for the two classifier inputs
//!
//! - declared dependencies: JSON array of components written by dependency
//!   resolution
//! - used classes: plain text, one fully qualified class name per line,
//!   written by the bytecode scanner

mod declared;
mod used_classes;

pub use declared::{load_components, parse_components};
pub use used_classes::{load_used_classes, parse_used_classes};

use std::path::PathBuf;
use thiserror::Error;

/// Errors reading classifier inputs
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse declared dependencies in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
