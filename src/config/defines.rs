//! Preprocessor definitions

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Ordered mapping from define name to value
///
/// An empty value means the name is defined without a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreprocessorDefineSet {
    defines: IndexMap<SmolStr, String>,
}

impl PreprocessorDefineSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a define, keeping its original position when it already exists
    pub fn set(&mut self, name: impl Into<SmolStr>, value: impl Into<String>) {
        self.defines.insert(name.into(), value.into());
    }

    /// Builder-style `set`
    #[must_use]
    pub fn with(mut self, name: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Look up a define's value
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.defines.get(name).map(String::as_str)
    }

    /// Iterate defines in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.defines.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of defines
    #[must_use]
    pub fn len(&self) -> usize {
        self.defines.len()
    }

    /// Check if empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defines.is_empty()
    }

    /// Merge `overrides` on top of this set, leaving both untouched
    ///
    /// Values from `overrides` win on collision. Keys keep this set's order,
    /// followed by override-only keys in override order.
    #[must_use]
    pub fn merged(&self, overrides: &Self) -> Self {
        let mut result = self.clone();
        for (name, value) in &overrides.defines {
            result.defines.insert(name.clone(), value.clone());
        }
        result
    }

    /// Render as GCC-style ` -D "NAME=VALUE"` switches
    ///
    /// Each switch carries its own leading space. A definition that already
    /// ends in a quote is emitted without extra quoting.
    #[must_use]
    pub fn to_gcc_flags(&self) -> String {
        let mut flags = String::new();
        for (name, value) in self.iter() {
            let mut def = name.to_string();
            if !value.is_empty() {
                def.push('=');
                def.push_str(value);
            }
            if !def.ends_with('"') {
                def = format!("\"{def}\"");
            }
            flags.push_str(" -D ");
            flags.push_str(&def);
        }
        flags
    }
}

impl<K, V> FromIterator<(K, V)> for PreprocessorDefineSet
where
    K: Into<SmolStr>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.set(name, value);
        }
        set
    }
}

/// Merge `overrides` on top of `base` without mutating either
#[must_use]
pub fn merge_defines(
    base: &PreprocessorDefineSet,
    overrides: &PreprocessorDefineSet,
) -> PreprocessorDefineSet {
    base.merged(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(set: &PreprocessorDefineSet) -> Vec<&str> {
        set.iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let base = PreprocessorDefineSet::from_iter([("A", "1"), ("B", "")]);
        let merged = merge_defines(&base, &PreprocessorDefineSet::new());

        assert_eq!(merged, base);
    }

    #[test]
    fn test_merge_override_wins() {
        let base = PreprocessorDefineSet::from_iter([("A", "1"), ("B", "2")]);
        let overrides = PreprocessorDefineSet::from_iter([("B", "20"), ("C", "3")]);

        let merged = merge_defines(&base, &overrides);

        assert_eq!(merged.get("A"), Some("1"));
        assert_eq!(merged.get("B"), Some("20"));
        assert_eq!(merged.get("C"), Some("3"));
        assert_eq!(keys(&merged), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let base = PreprocessorDefineSet::from_iter([("NDEBUG", "1")]);
        let first = PreprocessorDefineSet::from_iter([("NDEBUG", "0"), ("X", "1")]);
        let second = PreprocessorDefineSet::from_iter([("Y", "1")]);

        let _ = merge_defines(&base, &first);
        let merged = merge_defines(&base, &second);

        assert_eq!(base.len(), 1);
        assert_eq!(first.len(), 2);
        assert_eq!(keys(&merged), vec!["NDEBUG", "Y"]);
        assert_eq!(merged.get("NDEBUG"), Some("1"));
    }

    #[test]
    fn test_override_only_keys_keep_override_order() {
        let base = PreprocessorDefineSet::from_iter([("A", "1")]);
        let overrides = PreprocessorDefineSet::from_iter([("Z", "1"), ("M", "1"), ("A", "2")]);

        assert_eq!(keys(&base.merged(&overrides)), vec!["A", "Z", "M"]);
    }

    #[test]
    fn test_gcc_flags() {
        let set = PreprocessorDefineSet::new()
            .with("DEBUG", "1")
            .with("STANDALONE", "")
            .with("APP_NAME", "\"Demo\"");

        assert_eq!(
            set.to_gcc_flags(),
            " -D \"DEBUG=1\" -D \"STANDALONE\" -D APP_NAME=\"Demo\""
        );
    }

    #[test]
    fn test_gcc_flags_empty() {
        assert_eq!(PreprocessorDefineSet::new().to_gcc_flags(), "");
    }

    #[test]
    fn test_deserialize_keeps_order() {
        #[derive(Deserialize)]
        struct Wrapper {
            defines: PreprocessorDefineSet,
        }

        let wrapper: Wrapper = toml::from_str(
            r#"
                defines = { ZETA = "1", ALPHA = "", MID = "x" }
            "#,
        )
        .unwrap();

        assert_eq!(keys(&wrapper.defines), vec!["ZETA", "ALPHA", "MID"]);
    }
}
