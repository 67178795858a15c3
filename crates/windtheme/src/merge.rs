//! Deep merge of theme extensions over defaults.
//!
//! Mappings merge key by key and recurse into colliding values. Leaves
//! (strings, colors, font lists) are replaced whole, so a font family given
//! by the user supersedes the default list instead of being appended to it.

use std::collections::BTreeMap;

use crate::color::HexColor;

/// Values that can absorb an overriding value of the same type.
pub trait DeepMerge {
    /// Merges `other` into `self`; `other` wins on collisions.
    fn merge_from(&mut self, other: Self);
}

impl<K: Ord, V: DeepMerge> DeepMerge for BTreeMap<K, V> {
    fn merge_from(&mut self, other: Self) {
        for (key, value) in other {
            match self.get_mut(&key) {
                Some(existing) => existing.merge_from(value),
                None => {
                    self.insert(key, value);
                }
            }
        }
    }
}

macro_rules! replace_on_merge {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DeepMerge for $ty {
                fn merge_from(&mut self, other: Self) {
                    *self = other;
                }
            }
        )*
    };
}

replace_on_merge!(String, HexColor, Vec<String>);
