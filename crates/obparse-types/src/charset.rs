//! Character-set configuration consulted by the lexer.
//!
//! The source text itself is always UTF-8 in memory. The charset only decides
//! how string literals are tagged and which `_charset'...'` introducers the
//! lexer accepts.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Charset {
    Utf8mb4,
    Utf8,
    Utf16,
    Gbk,
    Gb18030,
    Latin1,
    Binary,
    Ascii,
}

impl Charset {
    pub const ALL: [Self; 8] = [
        Self::Utf8mb4,
        Self::Utf8,
        Self::Utf16,
        Self::Gbk,
        Self::Gb18030,
        Self::Latin1,
        Self::Binary,
        Self::Ascii,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Utf8mb4 => "utf8mb4",
            Self::Utf8 => "utf8",
            Self::Utf16 => "utf16",
            Self::Gbk => "gbk",
            Self::Gb18030 => "gb18030",
            Self::Latin1 => "latin1",
            Self::Binary => "binary",
            Self::Ascii => "ascii",
        }
    }

    /// Case-insensitive lookup; `utf8mb3` is an alias of `utf8`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("utf8mb3") {
            return Some(Self::Utf8);
        }
        Self::ALL
            .into_iter()
            .find(|cs| cs.as_str().eq_ignore_ascii_case(name))
    }

    /// Default collation name reported for literals in this charset.
    #[must_use]
    pub const fn default_collation(self) -> &'static str {
        match self {
            Self::Utf8mb4 => "utf8mb4_general_ci",
            Self::Utf8 => "utf8_general_ci",
            Self::Utf16 => "utf16_general_ci",
            Self::Gbk => "gbk_chinese_ci",
            Self::Gb18030 => "gb18030_chinese_ci",
            Self::Latin1 => "latin1_swedish_ci",
            Self::Binary => "binary",
            Self::Ascii => "ascii_general_ci",
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection charset plus optional collation override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharsetConfig {
    pub charset: Charset,
    pub collation: Option<String>,
}

impl CharsetConfig {
    #[must_use]
    pub const fn new(charset: Charset) -> Self {
        Self {
            charset,
            collation: None,
        }
    }

    #[must_use]
    pub fn with_collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Effective collation: the override, else the charset default.
    #[must_use]
    pub fn collation(&self) -> &str {
        self.collation
            .as_deref()
            .unwrap_or_else(|| self.charset.default_collation())
    }
}

impl Default for CharsetConfig {
    fn default() -> Self {
        Self::new(Charset::Utf8mb4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_lookup_is_case_insensitive() {
        assert_eq!(Charset::from_name("UTF8MB4"), Some(Charset::Utf8mb4));
        assert_eq!(Charset::from_name("Gbk"), Some(Charset::Gbk));
        assert_eq!(Charset::from_name("utf8mb3"), Some(Charset::Utf8));
        assert_eq!(Charset::from_name("klingon"), None);
    }

    #[test]
    fn collation_falls_back_to_charset_default() {
        let cfg = CharsetConfig::new(Charset::Latin1);
        assert_eq!(cfg.collation(), "latin1_swedish_ci");
        let cfg = cfg.with_collation("latin1_bin");
        assert_eq!(cfg.collation(), "latin1_bin");
    }
}
