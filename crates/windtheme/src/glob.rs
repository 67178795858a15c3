//! Content globs: the source files scanned for class usage.

use std::fmt;
use std::path::Path;

use globset::{Glob, GlobMatcher};
use serde::{Serialize, Serializer};

/// A syntactically valid glob pattern such as `./src/**/*.{js,jsx,ts,tsx}`.
///
/// The pattern text is kept verbatim; two globs are equal when their text is.
#[derive(Debug, Clone)]
pub struct ContentGlob {
    pattern: String,
    matcher: GlobMatcher,
}

impl ContentGlob {
    /// Validates `pattern` and builds its matcher.
    ///
    /// Rejects empty patterns, unclosed alternations (`{a,b`) and unclosed
    /// character classes (`[ab`).
    pub fn parse(pattern: &str) -> Result<Self, String> {
        if pattern.is_empty() {
            return Err("glob pattern is empty".to_string());
        }
        let glob = Glob::new(pattern).map_err(|e| e.kind().to_string())?;
        Ok(Self {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Whether `path` is selected by this glob.
    pub fn is_match<P: AsRef<Path>>(&self, path: P) -> bool {
        self.matcher.is_match(path)
    }
}

impl PartialEq for ContentGlob {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for ContentGlob {}

impl fmt::Display for ContentGlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl Serialize for ContentGlob {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_brace_alternation() {
        let glob = ContentGlob::parse("./src/**/*.{js,jsx,ts,tsx}").unwrap();
        assert_eq!(glob.as_str(), "./src/**/*.{js,jsx,ts,tsx}");
        assert!(glob.is_match("./src/components/App.tsx"));
        assert!(glob.is_match("./src/pages/home/index.js"));
        assert!(!glob.is_match("./src/styles/main.css"));
    }

    #[test]
    fn test_parse_literal_path() {
        let glob = ContentGlob::parse("./public/index.html").unwrap();
        assert!(glob.is_match("./public/index.html"));
        assert!(!glob.is_match("./public/about.html"));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(ContentGlob::parse("").is_err());
    }

    #[test]
    fn test_rejects_unclosed_alternation() {
        assert!(ContentGlob::parse("src/**/*.{js,ts").is_err());
    }

    #[test]
    fn test_rejects_unclosed_class() {
        assert!(ContentGlob::parse("src/[ab").is_err());
    }

    #[test]
    fn test_equality_uses_pattern_text() {
        let a = ContentGlob::parse("src/**/*.rs").unwrap();
        let b = ContentGlob::parse("src/**/*.rs").unwrap();
        let c = ContentGlob::parse("src/*.rs").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
