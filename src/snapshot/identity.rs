//! Stable keys for baseline/candidate pairs.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Identity {
    /// Derived from a test-case display name, normalized to a file stem.
    Named(String),
    /// Tick-indexed snapshot inside a sampled run.
    Tick(u64),
}

impl Identity {
    pub fn from_case_name(name: &str) -> Self {
        Identity::Named(canonical_stem(name))
    }

    pub fn tick(index: u64) -> Self {
        Identity::Tick(index)
    }

    pub fn file_stem(&self) -> String {
        match self {
            Identity::Named(stem) => stem.clone(),
            Identity::Tick(index) => index.to_string(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Named(stem) => f.write_str(stem),
            Identity::Tick(index) => write!(f, "{index}"),
        }
    }
}

/// Normalize a display name to a file stem: each whitespace-delimited word is
/// capitalized (first upper, rest lower) and the words concatenated.
/// Pure string transform, no I/O.
pub fn canonical_stem(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for word in name.split_whitespace() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            for c in chars {
                out.extend(c.to_lowercase());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_each_word() {
        assert_eq!(canonical_stem("renders all pixels in B&W"), "RendersAllPixelsInB&w");
        assert_eq!(canonical_stem("ALL CAPS title"), "AllCapsTitle");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(canonical_stem("  spaced \t out\nname "), "SpacedOutName");
    }

    #[test]
    fn empty_input_yields_empty_stem() {
        assert_eq!(canonical_stem(""), "");
        assert_eq!(canonical_stem("   "), "");
    }

    #[test]
    fn tick_identity_formats_as_number() {
        assert_eq!(Identity::tick(24).file_stem(), "24");
        assert_eq!(Identity::from_case_name("my test").to_string(), "MyTest");
    }
}
