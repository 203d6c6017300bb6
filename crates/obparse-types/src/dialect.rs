use std::fmt;

use serde::{Deserialize, Serialize};

/// Which keyword and syntax rule set a parse call runs under.
///
/// Fixed for the whole call; every token records the mode it was classified
/// under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialectMode {
    MySqlCompatible,
    OracleCompatible,
}

impl DialectMode {
    pub const ALL: [Self; 2] = [Self::MySqlCompatible, Self::OracleCompatible];

    /// Stable label used in logs and metrics dimensions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MySqlCompatible => "mysql",
            Self::OracleCompatible => "oracle",
        }
    }

    #[must_use]
    pub const fn is_mysql(self) -> bool {
        matches!(self, Self::MySqlCompatible)
    }

    #[must_use]
    pub const fn is_oracle(self) -> bool {
        matches!(self, Self::OracleCompatible)
    }
}

impl fmt::Display for DialectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
