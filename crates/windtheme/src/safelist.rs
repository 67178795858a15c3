//! Class names force-included in generated output.

use std::collections::HashSet;

use serde::{Serialize, Serializer};

/// A deduplicated set of class-name literals.
///
/// Entries are opaque strings; nothing is inferred from their shape.
/// Equality has set semantics, while iteration yields entries in the order
/// they were first seen so rendered output stays stable.
#[derive(Debug, Clone, Default)]
pub struct Safelist {
    ordered: Vec<String>,
    members: HashSet<String>,
}

impl Safelist {
    /// Creates an empty safelist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class name. Returns `false` if it was already present.
    pub fn insert(&mut self, class: impl Into<String>) -> bool {
        let class = class.into();
        if self.members.contains(&class) {
            return false;
        }
        self.members.insert(class.clone());
        self.ordered.push(class);
        true
    }

    pub fn contains(&self, class: &str) -> bool {
        self.members.contains(class)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Iterates entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }
}

impl PartialEq for Safelist {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for Safelist {}

impl<S: Into<String>> FromIterator<S> for Safelist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Safelist::new();
        for class in iter {
            list.insert(class);
        }
        list
    }
}

impl Serialize for Safelist {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
