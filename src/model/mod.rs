//! Data model shared by the loaders, the classifier and the reporters.

mod component;
mod used_classes;

pub use component::{Component, UsedTransitiveDependency};
pub use used_classes::UsedClasses;
