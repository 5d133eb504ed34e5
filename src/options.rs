//! Compilation options.

#[cfg(feature = "cli")]
use std::path::Path;

use crate::error::{Error, Result};

/// Options for transforming one module.
///
/// Under the `cli` feature the struct deserializes from JSON with
/// camelCase keys; missing keys take their defaults:
///
/// ```json
/// { "dev": true, "classNamePrefix": "s", "importSources": ["stylex"] }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(default, rename_all = "camelCase"))]
pub struct TransformOptions {
    /// Emit runtime registrations and debug keys instead of a stylesheet.
    pub dev: bool,
    /// Stable module identifier, usually the path relative to the project
    /// root. Names themes and, in development, the debug keys.
    pub file_id: String,
    /// First character(s) of every generated class name.
    pub class_name_prefix: String,
    /// Module specifiers whose imports bind the stylex runtime.
    pub import_sources: Vec<String>,
    /// Stop validating at the first diagnostic.
    pub fail_fast: bool,
    /// In development, insert `inject` registrations next to each call.
    pub inject_runtime: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            dev: false,
            file_id: String::new(),
            class_name_prefix: "x".to_string(),
            import_sources: vec!["stylex".to_string(), "@stylexjs/stylex".to_string()],
            fail_fast: false,
            inject_runtime: true,
        }
    }
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dev(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }

    pub fn with_file_id(mut self, file_id: impl Into<String>) -> Self {
        self.file_id = file_id.into();
        self
    }

    pub fn with_class_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_name_prefix = prefix.into();
        self
    }

    pub fn with_import_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.import_sources = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn with_inject_runtime(mut self, inject: bool) -> Self {
        self.inject_runtime = inject;
        self
    }

    /// File name up to its first dot: `src/Button.react.js` → `Button`.
    pub fn file_stem(&self) -> &str {
        let name = self
            .file_id
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default();
        match name.split('.').next() {
            Some(stem) if !stem.is_empty() => stem,
            _ => "unknown",
        }
    }

    /// Check invariants the compiler relies on.
    pub fn validate(&self) -> Result<()> {
        let prefix_ok = self
            .class_name_prefix
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && self
                .class_name_prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !prefix_ok {
            return Err(Error::Config(format!(
                "class name prefix {:?} is not a valid CSS identifier start",
                self.class_name_prefix
            )));
        }
        if self.import_sources.is_empty() {
            return Err(Error::Config("importSources must not be empty".to_string()));
        }
        Ok(())
    }

    /// Load options from a JSON file.
    #[cfg(feature = "cli")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let options: Self = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem() {
        let options = TransformOptions::new().with_file_id("src/components/Button.react.js");
        assert_eq!(options.file_stem(), "Button");
        assert_eq!(TransformOptions::new().with_file_id("index.js").file_stem(), "index");
        assert_eq!(TransformOptions::new().file_stem(), "unknown");
        assert_eq!(TransformOptions::new().with_file_id(".eslintrc").file_stem(), "unknown");
    }

    #[test]
    fn test_validate_prefix() {
        assert!(TransformOptions::new().validate().is_ok());
        assert!(TransformOptions::new().with_class_name_prefix("9x").validate().is_err());
        assert!(TransformOptions::new().with_class_name_prefix("").validate().is_err());
        assert!(
            TransformOptions::new()
                .with_import_sources(Vec::<String>::new())
                .validate()
                .is_err()
        );
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_deserialize_camel_case() {
        let options: TransformOptions =
            serde_json::from_str(r#"{"dev": true, "classNamePrefix": "s", "failFast": true}"#).unwrap();
        assert!(options.dev);
        assert!(options.fail_fast);
        assert_eq!(options.class_name_prefix, "s");
        assert_eq!(options.import_sources, TransformOptions::default().import_sources);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stylex.json");
        std::fs::write(&path, r#"{"importSources": ["@acme/styles"]}"#).unwrap();
        let options = TransformOptions::from_json_file(&path).unwrap();
        assert_eq!(options.import_sources, vec!["@acme/styles".to_string()]);

        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            TransformOptions::from_json_file(&path),
            Err(Error::Config(_))
        ));
    }
}
