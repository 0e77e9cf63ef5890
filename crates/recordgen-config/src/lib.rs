//! Generator configuration, loaded from TOML and threaded explicitly into generation.

use derive_more::Display;
use recordgen_core::Strictness;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// DateMode
///
/// Date codec family used for date, timestamp and time columns.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Serialize)]
pub enum DateMode {
    /// Second-precision date strings and `java.util.Date` instants.
    #[default]
    #[display("legacy")]
    Legacy,

    /// Millisecond-precision date strings and immutable date-time instants.
    #[display("date_time")]
    DateTime,
}

///
/// GenConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenConfig {
    pub date_time_support: bool,
    pub use_inner_enums: bool,
    pub use_legacy_test_framework: bool,
    pub injection_support: bool,
    pub write_tests: bool,
    pub strictness: StrictnessConfig,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            date_time_support: false,
            use_inner_enums: true,
            use_legacy_test_framework: false,
            injection_support: false,
            write_tests: true,
            strictness: StrictnessConfig::default(),
        }
    }
}

impl GenConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load a config file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    #[must_use]
    pub const fn date_mode(&self) -> DateMode {
        if self.date_time_support {
            DateMode::DateTime
        } else {
            DateMode::Legacy
        }
    }
}

///
/// StrictnessConfig
///
/// Whether suppressed failures stay suppressed.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrictnessConfig {
    /// Unmapped column types: placeholder text, or a generation error.
    pub unmapped_types: Strictness,

    /// Failed deletes during orphan cleanup: absorbed, or surfaced.
    pub orphan_cleanup: Strictness,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let config = GenConfig::from_toml_str("").expect("empty config is valid");

        assert_eq!(config, GenConfig::default());
        assert!(config.use_inner_enums);
        assert!(config.write_tests);
        assert_eq!(config.date_mode(), DateMode::Legacy);
    }

    #[test]
    fn parses_every_option() {
        let config = GenConfig::from_toml_str(
            r#"
date_time_support = true
use_inner_enums = false
use_legacy_test_framework = true
injection_support = true
write_tests = false

[strictness]
unmapped_types = "strict"
"#,
        )
        .expect("config should parse");

        assert_eq!(config.date_mode(), DateMode::DateTime);
        assert!(!config.use_inner_enums);
        assert!(config.use_legacy_test_framework);
        assert!(config.injection_support);
        assert!(!config.write_tests);
        assert_eq!(config.strictness.unmapped_types, Strictness::Strict);
        assert_eq!(
            config.strictness.orphan_cleanup,
            Strictness::Lenient,
            "unset strictness stays lenient"
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = GenConfig::from_toml_str("dateTimeSupport = true\n")
            .expect_err("camelCase keys are not accepted");

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "use_inner_enums = false").expect("write config");

        let config = GenConfig::load(file.path()).expect("load config");
        assert!(!config.use_inner_enums);

        let err = GenConfig::load(file.path().with_extension("missing"))
            .expect_err("missing file must fail");
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
