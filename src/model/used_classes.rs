use std::collections::HashSet;

/// Fully qualified class names referenced by the project's compiled output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedClasses {
    classes: HashSet<String>,
}

impl UsedClasses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class_name: impl Into<String>) -> bool {
        self.classes.insert(class_name.into())
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains(class_name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for UsedClasses {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            classes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for UsedClasses {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.classes.extend(iter.into_iter().map(Into::into));
    }
}
