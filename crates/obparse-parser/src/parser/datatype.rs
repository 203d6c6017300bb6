//! Column and cast data types.

use obparse_ast::{Keyword, NodeValue, ParseNode, RuleKind, TokenKind};

use super::{NodeBuilder, PResult, Parser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Integer,
    Fixed,
    Float,
    Bit,
    Plain,
    Fractional,
    Year,
    Char,
    VarChar,
    Binary,
    Lob,
    Text,
    Enumeration,
    Number,
    Timestamp,
    Interval,
    Raw,
    Long,
}

/// Canonical name and family of a MySQL type word.
fn mysql_type(word: &str) -> Option<(&'static str, Family)> {
    use Family::*;
    Some(match word {
        "TINYINT" | "INT1" => ("TINYINT", Integer),
        "SMALLINT" | "INT2" => ("SMALLINT", Integer),
        "MEDIUMINT" | "INT3" | "MIDDLEINT" => ("MEDIUMINT", Integer),
        "INT" | "INTEGER" | "INT4" => ("INT", Integer),
        "BIGINT" | "INT8" => ("BIGINT", Integer),
        "SERIAL" => ("SERIAL", Plain),
        "DECIMAL" | "DEC" | "NUMERIC" | "FIXED" => ("DECIMAL", Fixed),
        "FLOAT" | "FLOAT4" => ("FLOAT", Float),
        "DOUBLE" | "FLOAT8" => ("DOUBLE", Float),
        "REAL" => ("REAL", Float),
        "BIT" => ("BIT", Bit),
        "BOOL" | "BOOLEAN" => ("BOOLEAN", Plain),
        "DATE" => ("DATE", Plain),
        "TIME" => ("TIME", Fractional),
        "DATETIME" => ("DATETIME", Fractional),
        "TIMESTAMP" => ("TIMESTAMP", Fractional),
        "YEAR" => ("YEAR", Year),
        "CHAR" | "CHARACTER" => ("CHAR", Char),
        "NCHAR" => ("NCHAR", Char),
        "VARCHAR" | "VARCHARACTER" => ("VARCHAR", VarChar),
        "NVARCHAR" => ("NVARCHAR", VarChar),
        "BINARY" => ("BINARY", Binary),
        "VARBINARY" => ("VARBINARY", Binary),
        "BLOB" => ("BLOB", Lob),
        "TINYBLOB" => ("TINYBLOB", Plain),
        "MEDIUMBLOB" => ("MEDIUMBLOB", Plain),
        "LONGBLOB" => ("LONGBLOB", Plain),
        "TEXT" => ("TEXT", Text),
        "TINYTEXT" => ("TINYTEXT", Text),
        "MEDIUMTEXT" => ("MEDIUMTEXT", Text),
        "LONGTEXT" => ("LONGTEXT", Text),
        "LONG" => ("MEDIUMTEXT", Long),
        "ENUM" => ("ENUM", Enumeration),
        "SET" => ("SET", Enumeration),
        "JSON" => ("JSON", Plain),
        "GEOMETRY" => ("GEOMETRY", Plain),
        "POINT" => ("POINT", Plain),
        "LINESTRING" => ("LINESTRING", Plain),
        "POLYGON" => ("POLYGON", Plain),
        "MULTIPOINT" => ("MULTIPOINT", Plain),
        "MULTILINESTRING" => ("MULTILINESTRING", Plain),
        "MULTIPOLYGON" => ("MULTIPOLYGON", Plain),
        "GEOMETRYCOLLECTION" => ("GEOMETRYCOLLECTION", Plain),
        _ => return None,
    })
}

/// Canonical name and family of an Oracle type word.
fn oracle_type(word: &str) -> Option<(&'static str, Family)> {
    use Family::*;
    Some(match word {
        "NUMBER" => ("NUMBER", Number),
        "DECIMAL" | "DEC" | "NUMERIC" => ("NUMBER", Fixed),
        "INT" | "INTEGER" | "SMALLINT" => ("INTEGER", Plain),
        "FLOAT" => ("FLOAT", Bit),
        "REAL" => ("REAL", Plain),
        "DOUBLE" => ("DOUBLE PRECISION", Plain),
        "BINARY_FLOAT" => ("BINARY_FLOAT", Plain),
        "BINARY_DOUBLE" => ("BINARY_DOUBLE", Plain),
        "CHAR" | "CHARACTER" => ("CHAR", Char),
        "NCHAR" => ("NCHAR", Char),
        "VARCHAR2" | "VARCHAR" => ("VARCHAR2", VarChar),
        "NVARCHAR2" => ("NVARCHAR2", VarChar),
        "DATE" => ("DATE", Plain),
        "TIMESTAMP" => ("TIMESTAMP", Timestamp),
        "INTERVAL" => ("INTERVAL", Interval),
        "RAW" => ("RAW", Raw),
        "LONG" => ("LONG", Long),
        "BLOB" => ("BLOB", Plain),
        "CLOB" => ("CLOB", Plain),
        "NCLOB" => ("NCLOB", Plain),
        "BFILE" => ("BFILE", Plain),
        "ROWID" => ("ROWID", Plain),
        "UROWID" => ("UROWID", Bit),
        "JSON" => ("JSON", Plain),
        _ => return None,
    })
}

impl Parser<'_> {
    /// A column data type with its length, precision, and modifiers.
    pub(crate) fn parse_data_type(&mut self) -> PResult<ParseNode> {
        let word = self.current().text.to_ascii_uppercase();
        let known = if !self.peek().is_word() {
            None
        } else if self.is_mysql() {
            mysql_type(&word)
        } else {
            oracle_type(&word)
        };
        let Some((name, family)) = known else {
            return Err(self.err_expected("data type"));
        };
        let mut b = self.begin(RuleKind::DataType)?;
        self.take(&mut b);
        let name = if self.is_mysql() {
            self.parse_mysql_type_rest(&mut b, name, family)?
        } else {
            self.parse_oracle_type_rest(&mut b, name, family)?
        };
        b.set_value(NodeValue::TypeName(name));
        self.finish(b)
    }

    /// Target of CAST and CONVERT. MySQL adds `SIGNED` and `UNSIGNED [INTEGER]`.
    pub(crate) fn parse_cast_type(&mut self) -> PResult<ParseNode> {
        if self.is_mysql() && (self.check_kw(Keyword::Signed) || self.check_kw(Keyword::Unsigned)) {
            let mut b = self.begin(RuleKind::DataType)?;
            let name = self.current().text.to_ascii_uppercase();
            self.take(&mut b);
            self.eat_one_of(&mut b, &["INT", "INTEGER"]);
            b.set_value(NodeValue::TypeName(name));
            return self.finish(b);
        }
        self.parse_data_type()
    }

    fn parse_mysql_type_rest(
        &mut self,
        b: &mut NodeBuilder,
        name: &'static str,
        family: Family,
    ) -> PResult<String> {
        let mut name = name.to_owned();
        match family {
            Family::Integer | Family::Bit | Family::Year => {
                self.parse_type_args(b, 1, false)?;
            }
            Family::Fixed => {
                self.parse_type_args(b, 2, false)?;
            }
            Family::Float => {
                if name == "DOUBLE" {
                    self.eat_kw(b, Keyword::Precision);
                }
                self.parse_type_args(b, 2, false)?;
            }
            Family::Fractional | Family::Lob => {
                self.parse_type_args(b, 1, false)?;
            }
            Family::Char => {
                if name == "NCHAR" && self.eat_kw(b, Keyword::Varchar) {
                    name = "NVARCHAR".to_owned();
                    self.parse_required_length(b)?;
                } else if self.eat_kw(b, Keyword::Varying) {
                    name = "VARCHAR".to_owned();
                    self.parse_required_length(b)?;
                } else {
                    self.parse_type_args(b, 1, false)?;
                }
                self.parse_string_type_modifiers(b)?;
            }
            Family::VarChar => {
                self.parse_required_length(b)?;
                self.parse_string_type_modifiers(b)?;
            }
            Family::Binary => {
                if name == "VARBINARY" {
                    self.parse_required_length(b)?;
                } else {
                    self.parse_type_args(b, 1, false)?;
                }
            }
            Family::Text => {
                if name == "TEXT" {
                    self.parse_type_args(b, 1, false)?;
                }
                self.parse_string_type_modifiers(b)?;
            }
            Family::Long => {
                if self.eat_kw(b, Keyword::Varbinary) {
                    name = "MEDIUMBLOB".to_owned();
                } else {
                    self.eat_one_of(b, &["VARCHAR", "VARCHARACTER"]);
                    self.parse_string_type_modifiers(b)?;
                }
            }
            Family::Enumeration => {
                self.expect(b, TokenKind::LeftParen)?;
                loop {
                    self.expect(b, TokenKind::String)?;
                    if !self.eat(b, TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(b, TokenKind::RightParen)?;
                self.parse_string_type_modifiers(b)?;
            }
            _ => {}
        }
        if matches!(family, Family::Integer | Family::Fixed | Family::Float) {
            while self.eat_one_of(b, &["UNSIGNED", "SIGNED", "ZEROFILL"]).is_some() {}
        }
        Ok(name)
    }

    fn parse_oracle_type_rest(
        &mut self,
        b: &mut NodeBuilder,
        name: &'static str,
        family: Family,
    ) -> PResult<String> {
        let mut name = name.to_owned();
        match family {
            Family::Number => self.parse_type_args(b, 2, true)?,
            Family::Fixed => self.parse_type_args(b, 2, false)?,
            Family::Bit => self.parse_type_args(b, 1, false)?,
            Family::Plain => {
                if name == "DOUBLE PRECISION" {
                    self.expect_kw(b, Keyword::Precision)?;
                }
            }
            Family::Char => {
                if self.eat_kw(b, Keyword::Varying) {
                    name = "VARCHAR2".to_owned();
                    self.parse_oracle_length(b, true)?;
                } else {
                    self.parse_oracle_length(b, false)?;
                }
            }
            Family::VarChar => self.parse_oracle_length(b, true)?,
            Family::Timestamp => {
                self.parse_type_args(b, 1, false)?;
                if self.eat_kw(b, Keyword::With) {
                    if self.eat_kw(b, Keyword::Local) {
                        name = "TIMESTAMP WITH LOCAL TIME ZONE".to_owned();
                    } else {
                        name = "TIMESTAMP WITH TIME ZONE".to_owned();
                    }
                    self.expect_kw(b, Keyword::Time)?;
                    self.expect_kw(b, Keyword::Zone)?;
                }
            }
            Family::Interval => {
                if self.eat_kw(b, Keyword::Year) {
                    self.parse_type_args(b, 1, false)?;
                    self.expect_kw(b, Keyword::To)?;
                    self.expect_kw(b, Keyword::Month)?;
                    name = "INTERVAL YEAR TO MONTH".to_owned();
                } else {
                    self.expect_kw(b, Keyword::Day)?;
                    self.parse_type_args(b, 1, false)?;
                    self.expect_kw(b, Keyword::To)?;
                    self.expect_kw(b, Keyword::Second)?;
                    self.parse_type_args(b, 1, false)?;
                    name = "INTERVAL DAY TO SECOND".to_owned();
                }
            }
            Family::Raw => self.parse_required_length(b)?,
            Family::Long => {
                if self.eat_kw(b, Keyword::Raw) {
                    name = "LONG RAW".to_owned();
                }
            }
            _ => {}
        }
        Ok(name)
    }

    /// `[(n [, m])]` with up to `max` integer arguments. `star` allows `*` first.
    fn parse_type_args(&mut self, b: &mut NodeBuilder, max: usize, star: bool) -> PResult<()> {
        if !self.eat(b, TokenKind::LeftParen) {
            return Ok(());
        }
        if !(star && self.eat(b, TokenKind::Star)) {
            self.expect_integer(b)?;
        }
        let mut count = 1;
        while count < max && self.eat(b, TokenKind::Comma) {
            if !self.eat(b, TokenKind::Minus) {
                self.eat(b, TokenKind::Plus);
            }
            self.expect_integer(b)?;
            count += 1;
        }
        self.expect(b, TokenKind::RightParen)
    }

    fn parse_required_length(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        if self.peek() != TokenKind::LeftParen {
            return Err(self.err_expected("'('"));
        }
        self.parse_type_args(b, 1, false)
    }

    /// Oracle `(n [BYTE | CHAR])`.
    fn parse_oracle_length(&mut self, b: &mut NodeBuilder, required: bool) -> PResult<()> {
        if !self.eat(b, TokenKind::LeftParen) {
            if required {
                return Err(self.err_expected("'('"));
            }
            return Ok(());
        }
        self.expect_integer(b)?;
        self.eat_one_of(b, &["BYTE", "CHAR"]);
        self.expect(b, TokenKind::RightParen)
    }

    /// MySQL `BINARY`, `ASCII`, `UNICODE`, `CHARACTER SET x`, `CHARSET x`.
    fn parse_string_type_modifiers(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        loop {
            if self.eat_one_of(b, &["BINARY", "ASCII", "UNICODE"]).is_some() {
                continue;
            }
            if self.eat_words(b, &["CHARACTER", "SET"]) || self.eat_kw(b, Keyword::Charset) {
                self.parse_collation_name(b)?;
                continue;
            }
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonyms_share_a_canonical_name() {
        assert_eq!(mysql_type("INTEGER").map(|t| t.0), Some("INT"));
        assert_eq!(mysql_type("NUMERIC").map(|t| t.0), Some("DECIMAL"));
        assert_eq!(mysql_type("BOOL").map(|t| t.0), Some("BOOLEAN"));
        assert_eq!(oracle_type("VARCHAR").map(|t| t.0), Some("VARCHAR2"));
        assert_eq!(oracle_type("INTEGER").map(|t| t.0), Some("INTEGER"));
    }

    #[test]
    fn dialect_specific_types() {
        assert!(mysql_type("VARCHAR2").is_none());
        assert!(oracle_type("TINYINT").is_none());
        assert!(oracle_type("BINARY_DOUBLE").is_some());
        assert!(mysql_type("ENUM").is_some());
    }
}
