//! Per-dialect keyword classification and grammar profiles.
//!
//! Each dialect gets one `DialectGrammar`, built on first use and shared
//! read-only by every parse call afterwards. Classification depends only on
//! the dialect and the word, never on the surrounding tokens: a word is
//! reserved, non-reserved, or not a keyword at all.

use std::sync::OnceLock;

use bitflags::bitflags;
use hashbrown::HashMap;
use obparse_ast::Keyword;
use obparse_types::DialectMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordClass {
    /// Never usable as an unquoted identifier.
    Reserved,
    /// A keyword that may still name a column, table, or alias.
    NonReserved,
}

impl KeywordClass {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::NonReserved => "non_reserved",
        }
    }
}

/// Word classification table for one dialect.
#[derive(Debug)]
pub struct KeywordTable {
    mode: DialectMode,
    words: HashMap<Keyword, KeywordClass>,
}

impl KeywordTable {
    fn build(mode: DialectMode, reserved: &[Keyword], non_reserved: &[Keyword]) -> Self {
        let mut words = HashMap::with_capacity(reserved.len() + non_reserved.len());
        for &kw in non_reserved {
            words.insert(kw, KeywordClass::NonReserved);
        }
        // Reserved wins if a word ever lands in both lists.
        for &kw in reserved {
            words.insert(kw, KeywordClass::Reserved);
        }
        Self { mode, words }
    }

    #[must_use]
    pub const fn mode(&self) -> DialectMode {
        self.mode
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn class_of(&self, kw: Keyword) -> Option<KeywordClass> {
        self.words.get(&kw).copied()
    }

    /// Classify a bare word; `None` means it is an ordinary identifier here.
    #[must_use]
    pub fn classify(&self, word: &str) -> Option<(Keyword, KeywordClass)> {
        let kw = Keyword::from_word(word)?;
        self.class_of(kw).map(|class| (kw, class))
    }

    #[must_use]
    pub fn is_reserved(&self, kw: Keyword) -> bool {
        self.class_of(kw) == Some(KeywordClass::Reserved)
    }

    /// Every keyword of `class`, alphabetically.
    #[must_use]
    pub fn words(&self, class: KeywordClass) -> Vec<Keyword> {
        let mut out: Vec<Keyword> = self
            .words
            .iter()
            .filter(|&(_, &c)| c == class)
            .map(|(&kw, _)| kw)
            .collect();
        out.sort_unstable();
        out
    }
}

bitflags! {
    /// Lexical and syntactic features that differ between the dialects.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DialectFeatures: u32 {
        /// `` `ident` ``
        const BACKTICK_IDENT = 1 << 0;
        /// `"ident"`
        const DOUBLE_QUOTE_IDENT = 1 << 1;
        /// `"string"`
        const DOUBLE_QUOTE_STRING = 1 << 2;
        /// `\n`, `\'` and friends inside string literals.
        const BACKSLASH_ESCAPES = 1 << 3;
        /// `# comment` and `/*! executable comment */`.
        const HASH_AND_EXEC_COMMENTS = 1 << 4;
        /// `--` must be followed by whitespace to start a comment.
        const DASH_COMMENT_NEEDS_SPACE = 1 << 5;
        /// `@@system` variables, `:=`, `<=>`, `&&`, `!`, shifts, JSON arrows.
        const MYSQL_OPERATORS = 1 << 6;
        /// `_charset'...'` string introducers.
        const CHARSET_INTRODUCERS = 1 << 7;
        /// `:name` bind variables, `=>`, `^=`, `~=`.
        const ORACLE_OPERATORS = 1 << 8;
        /// `q'[...]'` alternative quoting.
        const Q_QUOTE = 1 << 9;
        /// `1.5f` / `1.5d` binary float literals.
        const BINARY_FLOAT_SUFFIX = 1 << 10;
        /// `$` and `#` inside unquoted identifiers.
        const DOLLAR_HASH_IN_IDENT = 1 << 11;
        /// `||` concatenates instead of meaning OR.
        const PIPES_CONCAT = 1 << 12;
        /// `LIMIT n [OFFSET m]`, `ON DUPLICATE KEY UPDATE`, multi-table DML, `LOAD DATA`.
        const MYSQL_CLAUSES = 1 << 13;
        /// `START WITH` / `CONNECT BY`, `(+)`, `MINUS`, `MERGE`, `RETURNING`, multi-table insert.
        const ORACLE_CLAUSES = 1 << 14;
        /// `OFFSET n ROWS FETCH FIRST n ROWS ONLY`.
        const FETCH_CLAUSE = 1 << 15;
        /// `INTERSECT` binds tighter than `UNION` and `EXCEPT`.
        const INTERSECT_BINDS_TIGHTER = 1 << 16;
        /// `TRUE` / `FALSE` literals and `XOR`.
        const BOOLEAN_LITERALS = 1 << 17;
        /// Adjacent string literals concatenate.
        const ADJACENT_STRINGS = 1 << 18;
        /// Digits may start an identifier (`1abc`).
        const DIGIT_LEADING_IDENT = 1 << 19;
    }
}

/// How unquoted identifiers are normalized when not case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierCase {
    Lower,
    Upper,
}

impl IdentifierCase {
    #[must_use]
    pub fn fold(self, raw: &str) -> String {
        match self {
            Self::Lower => raw.to_lowercase(),
            Self::Upper => raw.to_uppercase(),
        }
    }
}

/// Everything dialect-specific that the lexer and parser consult.
#[derive(Debug)]
pub struct DialectGrammar {
    pub mode: DialectMode,
    pub keywords: KeywordTable,
    pub features: DialectFeatures,
    pub identifier_case: IdentifierCase,
}

impl DialectGrammar {
    fn mysql() -> Self {
        Self {
            mode: DialectMode::MySqlCompatible,
            keywords: KeywordTable::build(
                DialectMode::MySqlCompatible,
                MYSQL_RESERVED,
                MYSQL_NON_RESERVED,
            ),
            features: DialectFeatures::BACKTICK_IDENT
                | DialectFeatures::DOUBLE_QUOTE_STRING
                | DialectFeatures::BACKSLASH_ESCAPES
                | DialectFeatures::HASH_AND_EXEC_COMMENTS
                | DialectFeatures::DASH_COMMENT_NEEDS_SPACE
                | DialectFeatures::MYSQL_OPERATORS
                | DialectFeatures::CHARSET_INTRODUCERS
                | DialectFeatures::MYSQL_CLAUSES
                | DialectFeatures::INTERSECT_BINDS_TIGHTER
                | DialectFeatures::BOOLEAN_LITERALS
                | DialectFeatures::ADJACENT_STRINGS
                | DialectFeatures::DIGIT_LEADING_IDENT,
            identifier_case: IdentifierCase::Lower,
        }
    }

    fn oracle() -> Self {
        Self {
            mode: DialectMode::OracleCompatible,
            keywords: KeywordTable::build(
                DialectMode::OracleCompatible,
                ORACLE_RESERVED,
                ORACLE_NON_RESERVED,
            ),
            features: DialectFeatures::DOUBLE_QUOTE_IDENT
                | DialectFeatures::ORACLE_OPERATORS
                | DialectFeatures::Q_QUOTE
                | DialectFeatures::BINARY_FLOAT_SUFFIX
                | DialectFeatures::DOLLAR_HASH_IN_IDENT
                | DialectFeatures::PIPES_CONCAT
                | DialectFeatures::ORACLE_CLAUSES
                | DialectFeatures::FETCH_CLAUSE,
            identifier_case: IdentifierCase::Upper,
        }
    }

    #[must_use]
    pub const fn has(&self, feature: DialectFeatures) -> bool {
        self.features.contains(feature)
    }

    #[must_use]
    pub const fn is_mysql(&self) -> bool {
        self.mode.is_mysql()
    }

    #[must_use]
    pub const fn is_oracle(&self) -> bool {
        self.mode.is_oracle()
    }
}

/// The shared grammar profile for `mode`, built on first use.
#[must_use]
pub fn grammar(mode: DialectMode) -> &'static DialectGrammar {
    static MYSQL: OnceLock<DialectGrammar> = OnceLock::new();
    static ORACLE: OnceLock<DialectGrammar> = OnceLock::new();
    match mode {
        DialectMode::MySqlCompatible => MYSQL.get_or_init(DialectGrammar::mysql),
        DialectMode::OracleCompatible => ORACLE.get_or_init(DialectGrammar::oracle),
    }
}

/// Classify `word` under `mode`.
#[must_use]
pub fn classify(mode: DialectMode, word: &str) -> Option<KeywordClass> {
    grammar(mode).keywords.classify(word).map(|(_, class)| class)
}

// ---------------------------------------------------------------------------
// Word lists
// ---------------------------------------------------------------------------

/// Words that can never be an unquoted identifier in MySQL-compatible mode.
pub(crate) const MYSQL_RESERVED: &[Keyword] = &[
    Keyword::Accessible,
    Keyword::Add,
    Keyword::All,
    Keyword::Alter,
    Keyword::Analyze,
    Keyword::And,
    Keyword::As,
    Keyword::Asc,
    Keyword::Asensitive,
    Keyword::Before,
    Keyword::Between,
    Keyword::Bigint,
    Keyword::Binary,
    Keyword::Blob,
    Keyword::Both,
    Keyword::By,
    Keyword::Call,
    Keyword::Cascade,
    Keyword::Case,
    Keyword::Change,
    Keyword::Char,
    Keyword::Character,
    Keyword::Check,
    Keyword::Collate,
    Keyword::Column,
    Keyword::Condition,
    Keyword::Constraint,
    Keyword::Continue,
    Keyword::Convert,
    Keyword::Create,
    Keyword::Cross,
    Keyword::Cube,
    Keyword::CumeDist,
    Keyword::CurrentDate,
    Keyword::CurrentTime,
    Keyword::CurrentTimestamp,
    Keyword::CurrentUser,
    Keyword::Cursor,
    Keyword::Database,
    Keyword::Databases,
    Keyword::DayHour,
    Keyword::DayMicrosecond,
    Keyword::DayMinute,
    Keyword::DaySecond,
    Keyword::Dec,
    Keyword::Decimal,
    Keyword::Declare,
    Keyword::Default,
    Keyword::Delayed,
    Keyword::Delete,
    Keyword::DenseRank,
    Keyword::Desc,
    Keyword::Describe,
    Keyword::Deterministic,
    Keyword::Distinct,
    Keyword::Distinctrow,
    Keyword::Div,
    Keyword::Double,
    Keyword::Drop,
    Keyword::Dual,
    Keyword::Each,
    Keyword::Else,
    Keyword::Elseif,
    Keyword::Empty,
    Keyword::Enclosed,
    Keyword::Escaped,
    Keyword::Except,
    Keyword::Exists,
    Keyword::Exit,
    Keyword::Explain,
    Keyword::False,
    Keyword::Fetch,
    Keyword::FirstValue,
    Keyword::Float,
    Keyword::Float4,
    Keyword::Float8,
    Keyword::For,
    Keyword::Force,
    Keyword::Foreign,
    Keyword::From,
    Keyword::Fulltext,
    Keyword::Function,
    Keyword::Generated,
    Keyword::Get,
    Keyword::Grant,
    Keyword::Group,
    Keyword::Grouping,
    Keyword::Groups,
    Keyword::Having,
    Keyword::HighPriority,
    Keyword::HourMicrosecond,
    Keyword::HourMinute,
    Keyword::HourSecond,
    Keyword::If,
    Keyword::Ignore,
    Keyword::In,
    Keyword::Index,
    Keyword::Infile,
    Keyword::Inner,
    Keyword::Inout,
    Keyword::Insensitive,
    Keyword::Insert,
    Keyword::Int,
    Keyword::Int1,
    Keyword::Int2,
    Keyword::Int3,
    Keyword::Int4,
    Keyword::Int8,
    Keyword::Integer,
    Keyword::Intersect,
    Keyword::Interval,
    Keyword::Into,
    Keyword::IoAfterGtids,
    Keyword::IoBeforeGtids,
    Keyword::Is,
    Keyword::Iterate,
    Keyword::Join,
    Keyword::JsonTable,
    Keyword::Key,
    Keyword::Keys,
    Keyword::Kill,
    Keyword::Lag,
    Keyword::LastValue,
    Keyword::Lateral,
    Keyword::Lead,
    Keyword::Leading,
    Keyword::Leave,
    Keyword::Left,
    Keyword::Like,
    Keyword::Limit,
    Keyword::Linear,
    Keyword::Lines,
    Keyword::Load,
    Keyword::Localtime,
    Keyword::Localtimestamp,
    Keyword::Lock,
    Keyword::Long,
    Keyword::Longblob,
    Keyword::Longtext,
    Keyword::Loop,
    Keyword::LowPriority,
    Keyword::MasterBind,
    Keyword::MasterSslVerifyServerCert,
    Keyword::Match,
    Keyword::Maxvalue,
    Keyword::Mediumblob,
    Keyword::Mediumint,
    Keyword::Mediumtext,
    Keyword::Middleint,
    Keyword::MinuteMicrosecond,
    Keyword::MinuteSecond,
    Keyword::Mod,
    Keyword::Modifies,
    Keyword::Natural,
    Keyword::Not,
    Keyword::NoWriteToBinlog,
    Keyword::NthValue,
    Keyword::Ntile,
    Keyword::Null,
    Keyword::Numeric,
    Keyword::Of,
    Keyword::On,
    Keyword::Optimize,
    Keyword::OptimizerCosts,
    Keyword::Option,
    Keyword::Optionally,
    Keyword::Or,
    Keyword::Order,
    Keyword::Out,
    Keyword::Outer,
    Keyword::Outfile,
    Keyword::Over,
    Keyword::Partition,
    Keyword::PercentRank,
    Keyword::Precision,
    Keyword::Primary,
    Keyword::Procedure,
    Keyword::Purge,
    Keyword::Range,
    Keyword::Rank,
    Keyword::Read,
    Keyword::Reads,
    Keyword::ReadWrite,
    Keyword::Real,
    Keyword::Recursive,
    Keyword::References,
    Keyword::Regexp,
    Keyword::Release,
    Keyword::Rename,
    Keyword::Repeat,
    Keyword::Replace,
    Keyword::Require,
    Keyword::Resignal,
    Keyword::Restrict,
    Keyword::Return,
    Keyword::Revoke,
    Keyword::Right,
    Keyword::Rlike,
    Keyword::Row,
    Keyword::Rows,
    Keyword::RowNumber,
    Keyword::Schema,
    Keyword::Schemas,
    Keyword::SecondMicrosecond,
    Keyword::Select,
    Keyword::Sensitive,
    Keyword::Separator,
    Keyword::Set,
    Keyword::Show,
    Keyword::Signal,
    Keyword::Smallint,
    Keyword::Spatial,
    Keyword::Specific,
    Keyword::Sql,
    Keyword::Sqlexception,
    Keyword::Sqlstate,
    Keyword::Sqlwarning,
    Keyword::SqlBigResult,
    Keyword::SqlCalcFoundRows,
    Keyword::SqlSmallResult,
    Keyword::Ssl,
    Keyword::Starting,
    Keyword::Stored,
    Keyword::StraightJoin,
    Keyword::System,
    Keyword::Table,
    Keyword::Terminated,
    Keyword::Then,
    Keyword::Tinyblob,
    Keyword::Tinyint,
    Keyword::Tinytext,
    Keyword::To,
    Keyword::Trailing,
    Keyword::Trigger,
    Keyword::True,
    Keyword::Undo,
    Keyword::Union,
    Keyword::Unique,
    Keyword::Unlock,
    Keyword::Unsigned,
    Keyword::Update,
    Keyword::Usage,
    Keyword::Use,
    Keyword::Using,
    Keyword::UtcDate,
    Keyword::UtcTime,
    Keyword::UtcTimestamp,
    Keyword::Values,
    Keyword::Varbinary,
    Keyword::Varchar,
    Keyword::Varcharacter,
    Keyword::Varying,
    Keyword::Virtual,
    Keyword::When,
    Keyword::Where,
    Keyword::While,
    Keyword::Window,
    Keyword::With,
    Keyword::Write,
    Keyword::Xor,
    Keyword::YearMonth,
    Keyword::Zerofill,
];

/// Keywords usable as ordinary identifiers in MySQL-compatible mode.
pub(crate) const MYSQL_NON_RESERVED: &[Keyword] = &[
    Keyword::Action,
    Keyword::Admin,
    Keyword::After,
    Keyword::Algorithm,
    Keyword::Always,
    Keyword::Begin,
    Keyword::Byte,
    Keyword::Cache,
    Keyword::Cascaded,
    Keyword::Cast,
    Keyword::Chain,
    Keyword::Charset,
    Keyword::Collation,
    Keyword::Columns,
    Keyword::Comment,
    Keyword::Commit,
    Keyword::Committed,
    Keyword::Consistent,
    Keyword::Constraints,
    Keyword::Current,
    Keyword::Cycle,
    Keyword::Data,
    Keyword::Datetime,
    Keyword::Day,
    Keyword::Deallocate,
    Keyword::Definer,
    Keyword::Disable,
    Keyword::Duplicate,
    Keyword::Enable,
    Keyword::End,
    Keyword::Enforced,
    Keyword::Engines,
    Keyword::Errors,
    Keyword::Escape,
    Keyword::Execute,
    Keyword::Extract,
    Keyword::Fields,
    Keyword::First,
    Keyword::Flashback,
    Keyword::Following,
    Keyword::Format,
    Keyword::Full,
    Keyword::Global,
    Keyword::Grants,
    Keyword::Hash,
    Keyword::Help,
    Keyword::Hour,
    Keyword::Identified,
    Keyword::Identity,
    Keyword::Indexes,
    Keyword::Invisible,
    Keyword::Isolation,
    Keyword::Last,
    Keyword::Less,
    Keyword::Level,
    Keyword::List,
    Keyword::Local,
    Keyword::Locked,
    Keyword::Merge,
    Keyword::Minute,
    Keyword::Minvalue,
    Keyword::Mode,
    Keyword::Modify,
    Keyword::Month,
    Keyword::Names,
    Keyword::Next,
    Keyword::No,
    Keyword::Nocache,
    Keyword::Nocycle,
    Keyword::Nomaxvalue,
    Keyword::Nominvalue,
    Keyword::Noorder,
    Keyword::Nowait,
    Keyword::Nulls,
    Keyword::Offline,
    Keyword::Offset,
    Keyword::Online,
    Keyword::Only,
    Keyword::Parameters,
    Keyword::Partitions,
    Keyword::Password,
    Keyword::Percent,
    Keyword::Plan,
    Keyword::Position,
    Keyword::Preceding,
    Keyword::Prepare,
    Keyword::Preserve,
    Keyword::Privileges,
    Keyword::Processlist,
    Keyword::Public,
    Keyword::Query,
    Keyword::Quick,
    Keyword::Recyclebin,
    Keyword::Repeatable,
    Keyword::Returning,
    Keyword::Role,
    Keyword::Rollback,
    Keyword::Rollup,
    Keyword::Savepoint,
    Keyword::Second,
    Keyword::Security,
    Keyword::Sequence,
    Keyword::Serializable,
    Keyword::Session,
    Keyword::Sets,
    Keyword::Share,
    Keyword::Signed,
    Keyword::Skip,
    Keyword::Snapshot,
    Keyword::Some,
    Keyword::Sounds,
    Keyword::Start,
    Keyword::Statistics,
    Keyword::Status,
    Keyword::Subpartition,
    Keyword::Subpartitions,
    Keyword::Substring,
    Keyword::Synonym,
    Keyword::Tablegroup,
    Keyword::Tables,
    Keyword::Template,
    Keyword::Temporary,
    Keyword::Than,
    Keyword::Ties,
    Keyword::Time,
    Keyword::Timestamp,
    Keyword::Trace,
    Keyword::Transaction,
    Keyword::Trim,
    Keyword::Truncate,
    Keyword::Unbounded,
    Keyword::Uncommitted,
    Keyword::Unknown,
    Keyword::User,
    Keyword::Value,
    Keyword::Variables,
    Keyword::View,
    Keyword::Visible,
    Keyword::Wait,
    Keyword::Warnings,
    Keyword::Work,
    Keyword::Xa,
    Keyword::Year,
    Keyword::Zone,
];

/// Words that can never be an unquoted identifier in Oracle-compatible mode.
pub(crate) const ORACLE_RESERVED: &[Keyword] = &[
    Keyword::Access,
    Keyword::Add,
    Keyword::All,
    Keyword::Alter,
    Keyword::And,
    Keyword::Any,
    Keyword::As,
    Keyword::Asc,
    Keyword::Audit,
    Keyword::Between,
    Keyword::By,
    Keyword::Char,
    Keyword::Check,
    Keyword::Cluster,
    Keyword::Column,
    Keyword::ColumnValue,
    Keyword::Comment,
    Keyword::Compress,
    Keyword::Connect,
    Keyword::Create,
    Keyword::Current,
    Keyword::Date,
    Keyword::Decimal,
    Keyword::Default,
    Keyword::Delete,
    Keyword::Desc,
    Keyword::Distinct,
    Keyword::Drop,
    Keyword::Else,
    Keyword::Exclusive,
    Keyword::Exists,
    Keyword::File,
    Keyword::Float,
    Keyword::For,
    Keyword::From,
    Keyword::Grant,
    Keyword::Group,
    Keyword::Having,
    Keyword::Identified,
    Keyword::Immediate,
    Keyword::In,
    Keyword::Increment,
    Keyword::Index,
    Keyword::Initial,
    Keyword::Insert,
    Keyword::Integer,
    Keyword::Intersect,
    Keyword::Into,
    Keyword::Is,
    Keyword::Level,
    Keyword::Like,
    Keyword::Lock,
    Keyword::Long,
    Keyword::Maxextents,
    Keyword::Minus,
    Keyword::Mlslabel,
    Keyword::Mode,
    Keyword::Modify,
    Keyword::NestedTableId,
    Keyword::Noaudit,
    Keyword::Nocompress,
    Keyword::Not,
    Keyword::Nowait,
    Keyword::Null,
    Keyword::Number,
    Keyword::Of,
    Keyword::Offline,
    Keyword::On,
    Keyword::Online,
    Keyword::Option,
    Keyword::Or,
    Keyword::Order,
    Keyword::Pctfree,
    Keyword::Prior,
    Keyword::Public,
    Keyword::Raw,
    Keyword::Rename,
    Keyword::Resource,
    Keyword::Revoke,
    Keyword::Row,
    Keyword::Rowid,
    Keyword::Rownum,
    Keyword::Rows,
    Keyword::Select,
    Keyword::Session,
    Keyword::Set,
    Keyword::Share,
    Keyword::Size,
    Keyword::Smallint,
    Keyword::Start,
    Keyword::Successful,
    Keyword::Synonym,
    Keyword::Sysdate,
    Keyword::Table,
    Keyword::Then,
    Keyword::To,
    Keyword::Trigger,
    Keyword::Uid,
    Keyword::Union,
    Keyword::Unique,
    Keyword::Update,
    Keyword::User,
    Keyword::Validate,
    Keyword::Values,
    Keyword::Varchar,
    Keyword::Varchar2,
    Keyword::View,
    Keyword::Whenever,
    Keyword::Where,
    Keyword::With,
];

/// Keywords usable as ordinary identifiers in Oracle-compatible mode.
pub(crate) const ORACLE_NON_RESERVED: &[Keyword] = &[
    Keyword::Action,
    Keyword::Admin,
    Keyword::After,
    Keyword::Algorithm,
    Keyword::Always,
    Keyword::Analyze,
    Keyword::Begin,
    Keyword::Binary,
    Keyword::Byte,
    Keyword::Cache,
    Keyword::Cascade,
    Keyword::Cascaded,
    Keyword::Case,
    Keyword::Cast,
    Keyword::Chain,
    Keyword::Change,
    Keyword::Character,
    Keyword::Charset,
    Keyword::Collation,
    Keyword::Columns,
    Keyword::Commit,
    Keyword::Committed,
    Keyword::Compute,
    Keyword::ConnectByRoot,
    Keyword::Consistent,
    Keyword::Constraint,
    Keyword::Constraints,
    Keyword::Cross,
    Keyword::Cube,
    Keyword::CurrentDate,
    Keyword::CurrentTimestamp,
    Keyword::Cycle,
    Keyword::Data,
    Keyword::Database,
    Keyword::Datetime,
    Keyword::Day,
    Keyword::Deallocate,
    Keyword::Definer,
    Keyword::Describe,
    Keyword::Disable,
    Keyword::Duplicate,
    Keyword::Enable,
    Keyword::End,
    Keyword::Enforced,
    Keyword::Engines,
    Keyword::Errors,
    Keyword::Escape,
    Keyword::Except,
    Keyword::Execute,
    Keyword::Explain,
    Keyword::Extract,
    Keyword::Fetch,
    Keyword::Fields,
    Keyword::First,
    Keyword::Flashback,
    Keyword::Following,
    Keyword::Force,
    Keyword::Foreign,
    Keyword::Format,
    Keyword::Full,
    Keyword::Function,
    Keyword::Generated,
    Keyword::Global,
    Keyword::Grants,
    Keyword::Grouping,
    Keyword::Hash,
    Keyword::Help,
    Keyword::Hour,
    Keyword::Identity,
    Keyword::If,
    Keyword::Ignore,
    Keyword::Indexes,
    Keyword::Inner,
    Keyword::Interval,
    Keyword::Invisible,
    Keyword::Isolation,
    Keyword::Join,
    Keyword::Key,
    Keyword::Kill,
    Keyword::Last,
    Keyword::Leading,
    Keyword::Left,
    Keyword::Less,
    Keyword::List,
    Keyword::Local,
    Keyword::Localtimestamp,
    Keyword::Locked,
    Keyword::Matched,
    Keyword::Merge,
    Keyword::Minute,
    Keyword::Minvalue,
    Keyword::Month,
    Keyword::Names,
    Keyword::Natural,
    Keyword::Next,
    Keyword::No,
    Keyword::Nocache,
    Keyword::Nocycle,
    Keyword::Nomaxvalue,
    Keyword::Nominvalue,
    Keyword::Noorder,
    Keyword::Nulls,
    Keyword::Offset,
    Keyword::Only,
    Keyword::Outer,
    Keyword::Over,
    Keyword::Parameters,
    Keyword::Partition,
    Keyword::Partitions,
    Keyword::Password,
    Keyword::Percent,
    Keyword::Plan,
    Keyword::Position,
    Keyword::Preceding,
    Keyword::Prepare,
    Keyword::Preserve,
    Keyword::Primary,
    Keyword::Privileges,
    Keyword::Procedure,
    Keyword::Processlist,
    Keyword::Purge,
    Keyword::Query,
    Keyword::Quick,
    Keyword::Range,
    Keyword::Read,
    Keyword::Recyclebin,
    Keyword::References,
    Keyword::Release,
    Keyword::Repeatable,
    Keyword::Replace,
    Keyword::Restrict,
    Keyword::Return,
    Keyword::Returning,
    Keyword::Right,
    Keyword::Role,
    Keyword::Rollback,
    Keyword::Rollup,
    Keyword::Savepoint,
    Keyword::Schema,
    Keyword::Second,
    Keyword::Security,
    Keyword::Sequence,
    Keyword::Serializable,
    Keyword::Sets,
    Keyword::Show,
    Keyword::Siblings,
    Keyword::Signed,
    Keyword::Skip,
    Keyword::Snapshot,
    Keyword::Some,
    Keyword::Sounds,
    Keyword::Statistics,
    Keyword::Status,
    Keyword::Subpartition,
    Keyword::Subpartitions,
    Keyword::Substring,
    Keyword::System,
    Keyword::Tablegroup,
    Keyword::Tables,
    Keyword::Template,
    Keyword::Temporary,
    Keyword::Than,
    Keyword::Ties,
    Keyword::Time,
    Keyword::Timestamp,
    Keyword::Trace,
    Keyword::Trailing,
    Keyword::Transaction,
    Keyword::Trim,
    Keyword::Truncate,
    Keyword::Unbounded,
    Keyword::Uncommitted,
    Keyword::Unknown,
    Keyword::Use,
    Keyword::Using,
    Keyword::Value,
    Keyword::Variables,
    Keyword::Virtual,
    Keyword::Visible,
    Keyword::Wait,
    Keyword::Warnings,
    Keyword::When,
    Keyword::Work,
    Keyword::Write,
    Keyword::Xa,
    Keyword::Year,
    Keyword::Zone,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_are_sorted_and_disjoint() {
        for (reserved, non_reserved) in [
            (MYSQL_RESERVED, MYSQL_NON_RESERVED),
            (ORACLE_RESERVED, ORACLE_NON_RESERVED),
        ] {
            assert!(reserved.windows(2).all(|w| w[0] < w[1]));
            assert!(non_reserved.windows(2).all(|w| w[0] < w[1]));
            for kw in non_reserved {
                assert!(!reserved.contains(kw), "{kw} is in both lists");
            }
        }
    }

    #[test]
    fn dialects_disagree_where_they_should() {
        assert_eq!(
            classify(DialectMode::MySqlCompatible, "limit"),
            Some(KeywordClass::Reserved)
        );
        assert_eq!(classify(DialectMode::OracleCompatible, "limit"), None);
        assert_eq!(
            classify(DialectMode::OracleCompatible, "LEVEL"),
            Some(KeywordClass::Reserved)
        );
        assert_eq!(
            classify(DialectMode::MySqlCompatible, "level"),
            Some(KeywordClass::NonReserved)
        );
        assert_eq!(classify(DialectMode::MySqlCompatible, "minus"), None);
        assert_eq!(
            classify(DialectMode::OracleCompatible, "Minus"),
            Some(KeywordClass::Reserved)
        );
        assert_eq!(classify(DialectMode::MySqlCompatible, "customer"), None);
    }

    #[test]
    fn grammar_is_built_once_per_mode() {
        let a = grammar(DialectMode::OracleCompatible);
        let b = grammar(DialectMode::OracleCompatible);
        assert!(std::ptr::eq(a, b));
        assert!(a.has(DialectFeatures::PIPES_CONCAT));
        assert!(!grammar(DialectMode::MySqlCompatible).has(DialectFeatures::PIPES_CONCAT));
        assert_eq!(a.keywords.mode(), DialectMode::OracleCompatible);
    }

    #[test]
    fn words_lists_match_tables() {
        let table = &grammar(DialectMode::MySqlCompatible).keywords;
        assert_eq!(table.words(KeywordClass::Reserved), MYSQL_RESERVED.to_vec());
        assert_eq!(table.len(), MYSQL_RESERVED.len() + MYSQL_NON_RESERVED.len());
    }

    #[test]
    fn identifier_folding() {
        assert_eq!(IdentifierCase::Lower.fold("MyTable"), "mytable");
        assert_eq!(IdentifierCase::Upper.fold("MyTable"), "MYTABLE");
    }
}
