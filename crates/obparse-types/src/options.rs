//! Caller-supplied parse configuration.
//!
//! Every key defaults to a dialect-appropriate value; a TOML document may
//! override any subset of them.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::DialectMode;

/// Identifier length limit for MySQL-compatible mode.
pub const MYSQL_MAX_IDENTIFIER_LENGTH: usize = 64;
/// Identifier length limit for Oracle-compatible mode.
pub const ORACLE_MAX_IDENTIFIER_LENGTH: usize = 128;
pub const DEFAULT_MAX_PARSE_NODES: usize = 1_000_000;
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 256;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid parse options: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("cannot read parse options from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid parse option `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// When false, unquoted identifiers are case-folded (lower case in MySQL
    /// mode, upper case in Oracle mode). Quoted identifiers are never folded.
    pub case_sensitive_identifiers: bool,
    /// Longest identifier, in characters, the lexer accepts.
    pub max_identifier_length: usize,
    /// Report unknown hint directive names as warnings.
    pub strict_hint_syntax: bool,
    pub max_parse_nodes: usize,
    pub max_recursion_depth: usize,
    /// Wall-clock budget for one parse call, in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Resynchronize after lexical and syntax errors instead of stopping at
    /// the first one.
    pub error_recovery: bool,
}

impl ParseOptions {
    #[must_use]
    pub const fn for_dialect(mode: DialectMode) -> Self {
        let max_identifier_length = match mode {
            DialectMode::MySqlCompatible => MYSQL_MAX_IDENTIFIER_LENGTH,
            DialectMode::OracleCompatible => ORACLE_MAX_IDENTIFIER_LENGTH,
        };
        Self {
            case_sensitive_identifiers: false,
            max_identifier_length,
            strict_hint_syntax: false,
            max_parse_nodes: DEFAULT_MAX_PARSE_NODES,
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            timeout_ms: None,
            error_recovery: true,
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Overlay a (possibly partial) TOML document on the dialect defaults.
    ///
    /// ```toml
    /// strict_hint_syntax = true
    /// max_recursion_depth = 128
    /// ```
    pub fn from_toml(mode: DialectMode, text: &str) -> Result<Self, ConfigError> {
        let file: OptionsFile = toml::from_str(text)?;
        let mut options = Self::for_dialect(mode);
        file.apply(&mut options);
        options.validate()?;
        Ok(options)
    }

    pub fn from_toml_file(mode: DialectMode, path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(mode, &text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_identifier_length == 0 {
            return Err(ConfigError::Invalid {
                key: "max_identifier_length",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.max_parse_nodes == 0 {
            return Err(ConfigError::Invalid {
                key: "max_parse_nodes",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.max_recursion_depth < 8 {
            return Err(ConfigError::Invalid {
                key: "max_recursion_depth",
                reason: format!("{} is too small to parse any statement", self.max_recursion_depth),
            });
        }
        Ok(())
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::for_dialect(DialectMode::MySqlCompatible)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionsFile {
    case_sensitive_identifiers: Option<bool>,
    max_identifier_length: Option<usize>,
    strict_hint_syntax: Option<bool>,
    max_parse_nodes: Option<usize>,
    max_recursion_depth: Option<usize>,
    timeout_ms: Option<u64>,
    error_recovery: Option<bool>,
}

impl OptionsFile {
    fn apply(self, options: &mut ParseOptions) {
        if let Some(v) = self.case_sensitive_identifiers {
            options.case_sensitive_identifiers = v;
        }
        if let Some(v) = self.max_identifier_length {
            options.max_identifier_length = v;
        }
        if let Some(v) = self.strict_hint_syntax {
            options.strict_hint_syntax = v;
        }
        if let Some(v) = self.max_parse_nodes {
            options.max_parse_nodes = v;
        }
        if let Some(v) = self.max_recursion_depth {
            options.max_recursion_depth = v;
        }
        if self.timeout_ms.is_some() {
            options.timeout_ms = self.timeout_ms;
        }
        if let Some(v) = self.error_recovery {
            options.error_recovery = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn dialect_defaults_differ_in_identifier_length() {
        let my = ParseOptions::for_dialect(DialectMode::MySqlCompatible);
        let ora = ParseOptions::for_dialect(DialectMode::OracleCompatible);
        assert_eq!(my.max_identifier_length, 64);
        assert_eq!(ora.max_identifier_length, 128);
        assert!(my.error_recovery && ora.error_recovery);
        assert!(!my.strict_hint_syntax);
    }

    #[test]
    fn toml_overlay_keeps_unset_defaults() {
        let opts = ParseOptions::from_toml(
            DialectMode::OracleCompatible,
            "strict_hint_syntax = true\nmax_recursion_depth = 64\n",
        )
        .unwrap();
        assert!(opts.strict_hint_syntax);
        assert_eq!(opts.max_recursion_depth, 64);
        assert_eq!(opts.max_identifier_length, 128);
        assert_eq!(opts.timeout(), None);
    }

    #[test]
    fn toml_rejects_unknown_keys() {
        let err = ParseOptions::from_toml(DialectMode::MySqlCompatible, "max_tokens = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn toml_rejects_zero_identifier_length() {
        let err = ParseOptions::from_toml(DialectMode::MySqlCompatible, "max_identifier_length = 0")
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid { key: "max_identifier_length", .. }),
            "{err}"
        );
    }

    #[test]
    fn toml_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_ms = 250").unwrap();
        writeln!(file, "case_sensitive_identifiers = true").unwrap();
        let opts = ParseOptions::from_toml_file(DialectMode::MySqlCompatible, file.path()).unwrap();
        assert_eq!(opts.timeout(), Some(Duration::from_millis(250)));
        assert!(opts.case_sensitive_identifiers);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ParseOptions::from_toml_file(
            DialectMode::MySqlCompatible,
            Path::new("/nonexistent/obparse.toml"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/obparse.toml"));
    }

    #[test]
    fn options_serialize_as_flat_json() {
        let json = serde_json::to_value(ParseOptions::for_dialect(DialectMode::OracleCompatible))
            .unwrap();
        assert_eq!(json["max_identifier_length"], 128);
        assert_eq!(json["timeout_ms"], serde_json::Value::Null);
    }
}
