mod loader;

pub use loader::{Config, ExclusionConfig, ProjectConfig, ReportConfig};
