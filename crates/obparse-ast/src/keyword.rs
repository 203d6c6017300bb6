//! SQL keyword vocabulary shared by both dialect modes.
//!
//! The enum is the union of every word either dialect treats as a keyword.
//! Whether a word is reserved, non-reserved, or an ordinary identifier is a
//! per-dialect decision made by the keyword tables in `obparse-parser`.

use std::fmt;

use serde::Serialize;

macro_rules! keywords {
    ($($variant:ident => $text:literal,)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(into = "&'static str")]
        pub enum Keyword {
            $($variant,)*
        }

        impl Keyword {
            /// Every keyword, in alphabetical order of its text.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Canonical upper-case spelling.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }
    };
}

keywords! {
    Access => "ACCESS",
    Accessible => "ACCESSIBLE",
    Action => "ACTION",
    Add => "ADD",
    Admin => "ADMIN",
    After => "AFTER",
    Algorithm => "ALGORITHM",
    All => "ALL",
    Alter => "ALTER",
    Always => "ALWAYS",
    Analyze => "ANALYZE",
    And => "AND",
    Any => "ANY",
    As => "AS",
    Asc => "ASC",
    Asensitive => "ASENSITIVE",
    Audit => "AUDIT",
    Before => "BEFORE",
    Begin => "BEGIN",
    Between => "BETWEEN",
    Bigint => "BIGINT",
    Binary => "BINARY",
    Blob => "BLOB",
    Both => "BOTH",
    By => "BY",
    Byte => "BYTE",
    Cache => "CACHE",
    Call => "CALL",
    Cascade => "CASCADE",
    Cascaded => "CASCADED",
    Case => "CASE",
    Cast => "CAST",
    Chain => "CHAIN",
    Change => "CHANGE",
    Char => "CHAR",
    Character => "CHARACTER",
    Charset => "CHARSET",
    Check => "CHECK",
    Cluster => "CLUSTER",
    Collate => "COLLATE",
    Collation => "COLLATION",
    Column => "COLUMN",
    Columns => "COLUMNS",
    ColumnValue => "COLUMN_VALUE",
    Comment => "COMMENT",
    Commit => "COMMIT",
    Committed => "COMMITTED",
    Compress => "COMPRESS",
    Compute => "COMPUTE",
    Condition => "CONDITION",
    Connect => "CONNECT",
    ConnectByRoot => "CONNECT_BY_ROOT",
    Consistent => "CONSISTENT",
    Constraint => "CONSTRAINT",
    Constraints => "CONSTRAINTS",
    Continue => "CONTINUE",
    Convert => "CONVERT",
    Create => "CREATE",
    Cross => "CROSS",
    Cube => "CUBE",
    CumeDist => "CUME_DIST",
    Current => "CURRENT",
    CurrentDate => "CURRENT_DATE",
    CurrentTime => "CURRENT_TIME",
    CurrentTimestamp => "CURRENT_TIMESTAMP",
    CurrentUser => "CURRENT_USER",
    Cursor => "CURSOR",
    Cycle => "CYCLE",
    Data => "DATA",
    Database => "DATABASE",
    Databases => "DATABASES",
    Date => "DATE",
    Datetime => "DATETIME",
    Day => "DAY",
    DayHour => "DAY_HOUR",
    DayMicrosecond => "DAY_MICROSECOND",
    DayMinute => "DAY_MINUTE",
    DaySecond => "DAY_SECOND",
    Deallocate => "DEALLOCATE",
    Dec => "DEC",
    Decimal => "DECIMAL",
    Declare => "DECLARE",
    Default => "DEFAULT",
    Definer => "DEFINER",
    Delayed => "DELAYED",
    Delete => "DELETE",
    DenseRank => "DENSE_RANK",
    Desc => "DESC",
    Describe => "DESCRIBE",
    Deterministic => "DETERMINISTIC",
    Disable => "DISABLE",
    Distinct => "DISTINCT",
    Distinctrow => "DISTINCTROW",
    Div => "DIV",
    Double => "DOUBLE",
    Drop => "DROP",
    Dual => "DUAL",
    Duplicate => "DUPLICATE",
    Each => "EACH",
    Else => "ELSE",
    Elseif => "ELSEIF",
    Empty => "EMPTY",
    Enable => "ENABLE",
    Enclosed => "ENCLOSED",
    End => "END",
    Enforced => "ENFORCED",
    Engines => "ENGINES",
    Errors => "ERRORS",
    Escape => "ESCAPE",
    Escaped => "ESCAPED",
    Except => "EXCEPT",
    Exclusive => "EXCLUSIVE",
    Execute => "EXECUTE",
    Exists => "EXISTS",
    Exit => "EXIT",
    Explain => "EXPLAIN",
    Extract => "EXTRACT",
    False => "FALSE",
    Fetch => "FETCH",
    Fields => "FIELDS",
    File => "FILE",
    First => "FIRST",
    FirstValue => "FIRST_VALUE",
    Flashback => "FLASHBACK",
    Float => "FLOAT",
    Float4 => "FLOAT4",
    Float8 => "FLOAT8",
    Following => "FOLLOWING",
    For => "FOR",
    Force => "FORCE",
    Foreign => "FOREIGN",
    Format => "FORMAT",
    From => "FROM",
    Full => "FULL",
    Fulltext => "FULLTEXT",
    Function => "FUNCTION",
    Generated => "GENERATED",
    Get => "GET",
    Global => "GLOBAL",
    Grant => "GRANT",
    Grants => "GRANTS",
    Group => "GROUP",
    Grouping => "GROUPING",
    Groups => "GROUPS",
    Hash => "HASH",
    Having => "HAVING",
    Help => "HELP",
    HighPriority => "HIGH_PRIORITY",
    Hour => "HOUR",
    HourMicrosecond => "HOUR_MICROSECOND",
    HourMinute => "HOUR_MINUTE",
    HourSecond => "HOUR_SECOND",
    Identified => "IDENTIFIED",
    Identity => "IDENTITY",
    If => "IF",
    Ignore => "IGNORE",
    Immediate => "IMMEDIATE",
    In => "IN",
    Increment => "INCREMENT",
    Index => "INDEX",
    Indexes => "INDEXES",
    Infile => "INFILE",
    Initial => "INITIAL",
    Inner => "INNER",
    Inout => "INOUT",
    Insensitive => "INSENSITIVE",
    Insert => "INSERT",
    Int => "INT",
    Int1 => "INT1",
    Int2 => "INT2",
    Int3 => "INT3",
    Int4 => "INT4",
    Int8 => "INT8",
    Integer => "INTEGER",
    Intersect => "INTERSECT",
    Interval => "INTERVAL",
    Into => "INTO",
    Invisible => "INVISIBLE",
    IoAfterGtids => "IO_AFTER_GTIDS",
    IoBeforeGtids => "IO_BEFORE_GTIDS",
    Is => "IS",
    Isolation => "ISOLATION",
    Iterate => "ITERATE",
    Join => "JOIN",
    JsonTable => "JSON_TABLE",
    Key => "KEY",
    Keys => "KEYS",
    Kill => "KILL",
    Lag => "LAG",
    Last => "LAST",
    LastValue => "LAST_VALUE",
    Lateral => "LATERAL",
    Lead => "LEAD",
    Leading => "LEADING",
    Leave => "LEAVE",
    Left => "LEFT",
    Less => "LESS",
    Level => "LEVEL",
    Like => "LIKE",
    Limit => "LIMIT",
    Linear => "LINEAR",
    Lines => "LINES",
    List => "LIST",
    Load => "LOAD",
    Local => "LOCAL",
    Localtime => "LOCALTIME",
    Localtimestamp => "LOCALTIMESTAMP",
    Lock => "LOCK",
    Locked => "LOCKED",
    Long => "LONG",
    Longblob => "LONGBLOB",
    Longtext => "LONGTEXT",
    Loop => "LOOP",
    LowPriority => "LOW_PRIORITY",
    MasterBind => "MASTER_BIND",
    MasterSslVerifyServerCert => "MASTER_SSL_VERIFY_SERVER_CERT",
    Match => "MATCH",
    Matched => "MATCHED",
    Maxextents => "MAXEXTENTS",
    Maxvalue => "MAXVALUE",
    Mediumblob => "MEDIUMBLOB",
    Mediumint => "MEDIUMINT",
    Mediumtext => "MEDIUMTEXT",
    Merge => "MERGE",
    Middleint => "MIDDLEINT",
    Minus => "MINUS",
    Minute => "MINUTE",
    MinuteMicrosecond => "MINUTE_MICROSECOND",
    MinuteSecond => "MINUTE_SECOND",
    Minvalue => "MINVALUE",
    Mlslabel => "MLSLABEL",
    Mod => "MOD",
    Mode => "MODE",
    Modifies => "MODIFIES",
    Modify => "MODIFY",
    Month => "MONTH",
    Names => "NAMES",
    Natural => "NATURAL",
    NestedTableId => "NESTED_TABLE_ID",
    Next => "NEXT",
    No => "NO",
    Noaudit => "NOAUDIT",
    Nocache => "NOCACHE",
    Nocompress => "NOCOMPRESS",
    Nocycle => "NOCYCLE",
    Nomaxvalue => "NOMAXVALUE",
    Nominvalue => "NOMINVALUE",
    Noorder => "NOORDER",
    Not => "NOT",
    Nowait => "NOWAIT",
    NoWriteToBinlog => "NO_WRITE_TO_BINLOG",
    NthValue => "NTH_VALUE",
    Ntile => "NTILE",
    Null => "NULL",
    Nulls => "NULLS",
    Number => "NUMBER",
    Numeric => "NUMERIC",
    Of => "OF",
    Offline => "OFFLINE",
    Offset => "OFFSET",
    On => "ON",
    Online => "ONLINE",
    Only => "ONLY",
    Optimize => "OPTIMIZE",
    OptimizerCosts => "OPTIMIZER_COSTS",
    Option => "OPTION",
    Optionally => "OPTIONALLY",
    Or => "OR",
    Order => "ORDER",
    Out => "OUT",
    Outer => "OUTER",
    Outfile => "OUTFILE",
    Over => "OVER",
    Parameters => "PARAMETERS",
    Partition => "PARTITION",
    Partitions => "PARTITIONS",
    Password => "PASSWORD",
    Pctfree => "PCTFREE",
    Percent => "PERCENT",
    PercentRank => "PERCENT_RANK",
    Plan => "PLAN",
    Position => "POSITION",
    Preceding => "PRECEDING",
    Precision => "PRECISION",
    Prepare => "PREPARE",
    Preserve => "PRESERVE",
    Primary => "PRIMARY",
    Prior => "PRIOR",
    Privileges => "PRIVILEGES",
    Procedure => "PROCEDURE",
    Processlist => "PROCESSLIST",
    Public => "PUBLIC",
    Purge => "PURGE",
    Query => "QUERY",
    Quick => "QUICK",
    Range => "RANGE",
    Rank => "RANK",
    Raw => "RAW",
    Read => "READ",
    Reads => "READS",
    ReadWrite => "READ_WRITE",
    Real => "REAL",
    Recursive => "RECURSIVE",
    Recyclebin => "RECYCLEBIN",
    References => "REFERENCES",
    Regexp => "REGEXP",
    Release => "RELEASE",
    Rename => "RENAME",
    Repeat => "REPEAT",
    Repeatable => "REPEATABLE",
    Replace => "REPLACE",
    Require => "REQUIRE",
    Resignal => "RESIGNAL",
    Resource => "RESOURCE",
    Restrict => "RESTRICT",
    Return => "RETURN",
    Returning => "RETURNING",
    Revoke => "REVOKE",
    Right => "RIGHT",
    Rlike => "RLIKE",
    Role => "ROLE",
    Rollback => "ROLLBACK",
    Rollup => "ROLLUP",
    Row => "ROW",
    Rowid => "ROWID",
    Rownum => "ROWNUM",
    Rows => "ROWS",
    RowNumber => "ROW_NUMBER",
    Savepoint => "SAVEPOINT",
    Schema => "SCHEMA",
    Schemas => "SCHEMAS",
    Second => "SECOND",
    SecondMicrosecond => "SECOND_MICROSECOND",
    Security => "SECURITY",
    Select => "SELECT",
    Sensitive => "SENSITIVE",
    Separator => "SEPARATOR",
    Sequence => "SEQUENCE",
    Serializable => "SERIALIZABLE",
    Session => "SESSION",
    Set => "SET",
    Sets => "SETS",
    Share => "SHARE",
    Show => "SHOW",
    Siblings => "SIBLINGS",
    Signal => "SIGNAL",
    Signed => "SIGNED",
    Size => "SIZE",
    Skip => "SKIP",
    Smallint => "SMALLINT",
    Snapshot => "SNAPSHOT",
    Some => "SOME",
    Sounds => "SOUNDS",
    Spatial => "SPATIAL",
    Specific => "SPECIFIC",
    Sql => "SQL",
    Sqlexception => "SQLEXCEPTION",
    Sqlstate => "SQLSTATE",
    Sqlwarning => "SQLWARNING",
    SqlBigResult => "SQL_BIG_RESULT",
    SqlCalcFoundRows => "SQL_CALC_FOUND_ROWS",
    SqlSmallResult => "SQL_SMALL_RESULT",
    Ssl => "SSL",
    Start => "START",
    Starting => "STARTING",
    Statistics => "STATISTICS",
    Status => "STATUS",
    Stored => "STORED",
    StraightJoin => "STRAIGHT_JOIN",
    Subpartition => "SUBPARTITION",
    Subpartitions => "SUBPARTITIONS",
    Substring => "SUBSTRING",
    Successful => "SUCCESSFUL",
    Synonym => "SYNONYM",
    Sysdate => "SYSDATE",
    System => "SYSTEM",
    Table => "TABLE",
    Tablegroup => "TABLEGROUP",
    Tables => "TABLES",
    Template => "TEMPLATE",
    Temporary => "TEMPORARY",
    Terminated => "TERMINATED",
    Than => "THAN",
    Then => "THEN",
    Ties => "TIES",
    Time => "TIME",
    Timestamp => "TIMESTAMP",
    Tinyblob => "TINYBLOB",
    Tinyint => "TINYINT",
    Tinytext => "TINYTEXT",
    To => "TO",
    Trace => "TRACE",
    Trailing => "TRAILING",
    Transaction => "TRANSACTION",
    Trigger => "TRIGGER",
    Trim => "TRIM",
    True => "TRUE",
    Truncate => "TRUNCATE",
    Uid => "UID",
    Unbounded => "UNBOUNDED",
    Uncommitted => "UNCOMMITTED",
    Undo => "UNDO",
    Union => "UNION",
    Unique => "UNIQUE",
    Unknown => "UNKNOWN",
    Unlock => "UNLOCK",
    Unsigned => "UNSIGNED",
    Update => "UPDATE",
    Usage => "USAGE",
    Use => "USE",
    User => "USER",
    Using => "USING",
    UtcDate => "UTC_DATE",
    UtcTime => "UTC_TIME",
    UtcTimestamp => "UTC_TIMESTAMP",
    Validate => "VALIDATE",
    Value => "VALUE",
    Values => "VALUES",
    Varbinary => "VARBINARY",
    Varchar => "VARCHAR",
    Varchar2 => "VARCHAR2",
    Varcharacter => "VARCHARACTER",
    Variables => "VARIABLES",
    Varying => "VARYING",
    View => "VIEW",
    Virtual => "VIRTUAL",
    Visible => "VISIBLE",
    Wait => "WAIT",
    Warnings => "WARNINGS",
    When => "WHEN",
    Whenever => "WHENEVER",
    Where => "WHERE",
    While => "WHILE",
    Window => "WINDOW",
    With => "WITH",
    Work => "WORK",
    Write => "WRITE",
    Xa => "XA",
    Xor => "XOR",
    Year => "YEAR",
    YearMonth => "YEAR_MONTH",
    Zerofill => "ZEROFILL",
    Zone => "ZONE",
}

impl Keyword {
    /// Case-insensitive lookup of a bare word.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        if word.is_empty() || word.len() > 40 {
            return None;
        }
        let upper = word.to_ascii_uppercase();
        Self::ALL
            .binary_search_by(|kw| kw.as_str().cmp(upper.as_str()))
            .ok()
            .map(|idx| Self::ALL[idx])
    }
}

impl From<Keyword> for &'static str {
    fn from(kw: Keyword) -> Self {
        kw.as_str()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_sorted_and_unique() {
        for pair in Keyword::ALL.windows(2) {
            assert!(
                pair[0].as_str() < pair[1].as_str(),
                "{} must sort before {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(Keyword::from_word("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_word("Current_Timestamp"), Some(Keyword::CurrentTimestamp));
        assert_eq!(Keyword::from_word("varchar2"), Some(Keyword::Varchar2));
        assert_eq!(Keyword::from_word("not_a_keyword"), None);
        assert_eq!(Keyword::from_word(""), None);
    }

    #[test]
    fn every_keyword_round_trips_through_its_text() {
        for &kw in Keyword::ALL {
            assert_eq!(Keyword::from_word(kw.as_str()), Some(kw));
        }
    }
}
