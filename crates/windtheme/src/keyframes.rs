//! Keyframe step selectors.
//!
//! A keyframe group maps selectors to property blocks:
//!
//! ```yaml
//! slideUp:
//!   "0%":   { transform: translateY(10px), opacity: "0" }
//!   "100%": { transform: translateY(0), opacity: "1" }
//! ```
//!
//! Selectors are `N%` with an integer `N` from 0 to 100, or the keywords
//! `from` and `to`. The keywords are aliases for `0%` and `100%`, so a
//! [`KeyframeKey`] stores only the position and steps sort by it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// CSS property name to value for one keyframe step.
pub type KeyframeStep = BTreeMap<String, String>;

/// Keyframe steps of one group, ordered by position.
pub type KeyframeGroup = BTreeMap<KeyframeKey, KeyframeStep>;

/// A validated keyframe selector, normalized to a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyframeKey(u8);

impl KeyframeKey {
    /// The `from` / `0%` selector.
    pub const FROM: KeyframeKey = KeyframeKey(0);
    /// The `to` / `100%` selector.
    pub const TO: KeyframeKey = KeyframeKey(100);

    /// Returns the selector for `percent`, if it is within `0..=100`.
    pub fn percent(percent: u8) -> Option<Self> {
        (percent <= 100).then_some(KeyframeKey(percent))
    }

    /// Parses `from`, `to`, or an integer percentage such as `50%`.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "from" => return Ok(Self::FROM),
            "to" => return Ok(Self::TO),
            _ => {}
        }

        let digits = s
            .strip_suffix('%')
            .ok_or_else(|| format!("keyframe key '{}' must be a percentage or from/to", s))?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("keyframe key '{}' is not an integer percentage", s));
        }

        digits
            .parse::<u8>()
            .ok()
            .and_then(Self::percent)
            .ok_or_else(|| format!("keyframe key '{}' is outside 0%..100%", s))
    }

    /// Position of this step as a percentage.
    pub fn position(&self) -> u8 {
        self.0
    }
}

impl FromStr for KeyframeKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyframeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Serialize for KeyframeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
