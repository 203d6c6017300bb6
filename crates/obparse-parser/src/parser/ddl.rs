//! CREATE, ALTER, DROP, and the other schema statements.

use obparse_ast::{
    ColumnAttributeKind, ConstraintKind, Keyword, NodeValue, ParseNode, PartitionMethod, RuleKind,
    TokenKind,
};

use super::{NodeBuilder, PResult, Parser};

/// `NAME [=] value` table options. Multi-word names are listed before any
/// shorter name they start with.
const MYSQL_TABLE_OPTIONS: &[&str] = &[
    "DEFAULT CHARACTER SET",
    "DEFAULT CHARSET",
    "DEFAULT COLLATE",
    "CHARACTER SET",
    "CHARSET",
    "COLLATE",
    "ENGINE",
    "AUTO_INCREMENT",
    "COMMENT",
    "ROW_FORMAT",
    "KEY_BLOCK_SIZE",
    "COMPRESSION",
    "BLOCK_SIZE",
    "REPLICA_NUM",
    "TABLEGROUP",
    "PCTFREE",
    "TABLET_SIZE",
    "PRIMARY_ZONE",
    "LOCALITY",
    "AVG_ROW_LENGTH",
    "CHECKSUM",
    "MAX_ROWS",
    "MIN_ROWS",
    "PACK_KEYS",
    "STATS_PERSISTENT",
    "STATS_AUTO_RECALC",
    "STATS_SAMPLE_PAGES",
    "TABLESPACE",
    "PROGRESSIVE_MERGE_NUM",
    "USE_BLOOM_FILTER",
    "EXPIRE_INFO",
    "DUPLICATE_SCOPE",
];

const ORACLE_TABLE_OPTIONS: &[&str] = &[
    "TABLESPACE",
    "PCTFREE",
    "PCTUSED",
    "INITRANS",
    "MAXTRANS",
    "TABLEGROUP",
    "PARALLEL",
    "STORAGE",
    "COMMENT",
];

const ORACLE_TABLE_FLAGS: &[&str] = &[
    "ENABLE ROW MOVEMENT",
    "DISABLE ROW MOVEMENT",
    "NOCOMPRESS",
    "COMPRESS",
    "LOGGING",
    "NOLOGGING",
    "CACHE",
    "NOCACHE",
    "NOPARALLEL",
];

const INDEX_OPTIONS: &[&str] = &[
    "KEY_BLOCK_SIZE",
    "USING",
    "COMMENT",
    "WITH PARSER",
    "BLOCK_SIZE",
    "TABLESPACE",
    "PCTFREE",
    "INITRANS",
    "MAXTRANS",
    "PARALLEL",
    "STORAGE",
];

const INDEX_FLAGS: &[&str] = &[
    "VISIBLE",
    "INVISIBLE",
    "GLOBAL",
    "LOCAL",
    "REVERSE",
    "COMPRESS",
    "NOCOMPRESS",
    "LOGGING",
    "NOLOGGING",
    "NOPARALLEL",
    "ONLINE",
];

const DATABASE_OPTIONS: &[&str] = &[
    "DEFAULT CHARACTER SET",
    "DEFAULT CHARSET",
    "DEFAULT COLLATE",
    "DEFAULT TABLEGROUP",
    "CHARACTER SET",
    "CHARSET",
    "COLLATE",
    "REPLICA_NUM",
    "PRIMARY_ZONE",
    "COMMENT",
];

const PARTITION_ATTRIBUTES: &[&str] = &[
    "ENGINE",
    "STORAGE ENGINE",
    "COMMENT",
    "TABLESPACE",
    "DATA DIRECTORY",
    "INDEX DIRECTORY",
    "MAX_ROWS",
    "MIN_ROWS",
    "ID",
    "PCTFREE",
    "STORAGE",
];

const TABLEGROUP_OPTIONS: &[&str] = &["PRIMARY_ZONE", "LOCALITY", "BINDING", "SHARDING"];

const SEQUENCE_VALUE_OPTIONS: &[&str] = &[
    "START WITH",
    "INCREMENT BY",
    "MAXVALUE",
    "MINVALUE",
    "CACHE",
    "RESTART WITH",
];

const SEQUENCE_FLAGS: &[&str] = &[
    "NOMAXVALUE",
    "NOMINVALUE",
    "CYCLE",
    "NOCYCLE",
    "NOCACHE",
    "ORDER",
    "NOORDER",
    "RESTART",
];

impl Parser<'_> {
    // -----------------------------------------------------------------------
    // Shared option helpers
    // -----------------------------------------------------------------------

    /// `NAME [=] value` for the first of `names` present, as a node of `kind`.
    pub(crate) fn parse_named_option(
        &mut self,
        kind: RuleKind,
        names: &[&'static str],
    ) -> PResult<Option<ParseNode>> {
        let Some(len) = names.iter().map(|n| self.phrase_ahead(n)).find(|&n| n > 0) else {
            return Ok(None);
        };
        let mut b = self.begin(kind)?;
        for _ in 0..len {
            self.take(&mut b);
        }
        self.eat(&mut b, TokenKind::Eq);
        self.parse_option_value(&mut b)?;
        self.finish(b).map(Some)
    }

    /// A bare flag word or phrase from `flags`, as a node of `kind`.
    fn parse_flag_option(
        &mut self,
        kind: RuleKind,
        flags: &[&'static str],
    ) -> PResult<Option<ParseNode>> {
        let Some(len) = flags.iter().map(|n| self.phrase_ahead(n)).find(|&n| n > 0) else {
            return Ok(None);
        };
        let mut b = self.begin(kind)?;
        for _ in 0..len {
            self.take(&mut b);
        }
        self.finish(b).map(Some)
    }

    fn parse_option_value(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        match self.peek() {
            TokenKind::LeftParen => self.take_balanced(b),
            TokenKind::Minus | TokenKind::Plus => {
                self.take(b);
                self.expect_integer(b)
            }
            TokenKind::QuotedIdent => {
                self.take(b);
                Ok(())
            }
            k if k.is_literal() || k.is_word() => {
                self.take(b);
                Ok(())
            }
            _ => Err(self.err_expected("option value")),
        }
    }

    /// A parenthesised token run, kept verbatim.
    fn take_balanced(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        self.expect(b, TokenKind::LeftParen)?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.peek() {
                TokenKind::Eof | TokenKind::Semicolon | TokenKind::Invalid => {
                    return Err(self.err_expected("')'"));
                }
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                _ => {}
            }
            self.take(b);
        }
        Ok(())
    }

    fn eat_if_not_exists(&mut self, b: &mut NodeBuilder) -> bool {
        self.is_mysql() && self.eat_words(b, &["IF", "NOT", "EXISTS"])
    }

    fn eat_if_exists(&mut self, b: &mut NodeBuilder) -> bool {
        self.is_mysql() && self.eat_words(b, &["IF", "EXISTS"])
    }

    fn parse_table_options(&mut self, b: &mut NodeBuilder) -> PResult<usize> {
        self.parse_repeated(
            b,
            |p| {
                if p.is_mysql() {
                    p.parse_named_option(RuleKind::TableOption, MYSQL_TABLE_OPTIONS)
                } else if let Some(opt) = p.parse_named_option(RuleKind::TableOption, ORACLE_TABLE_OPTIONS)? {
                    Ok(Some(opt))
                } else {
                    p.parse_flag_option(RuleKind::TableOption, ORACLE_TABLE_FLAGS)
                }
            },
            Some(TokenKind::Comma),
        )
    }

    fn parse_index_options(&mut self, b: &mut NodeBuilder) -> PResult<usize> {
        self.parse_repeated(
            b,
            |p| {
                if let Some(opt) = p.parse_named_option(RuleKind::IndexOption, INDEX_OPTIONS)? {
                    Ok(Some(opt))
                } else {
                    p.parse_flag_option(RuleKind::IndexOption, INDEX_FLAGS)
                }
            },
            None,
        )
    }

    // -----------------------------------------------------------------------
    // CREATE
    // -----------------------------------------------------------------------

    pub(crate) fn parse_create(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::CreateTableStmt)?;
        self.expect_kw(&mut b, Keyword::Create)?;
        let or_replace = self.eat_words(&mut b, &["OR", "REPLACE"]);
        let mut index_kind = false;
        loop {
            if self.is_mysql() && self.eat_kw(&mut b, Keyword::Temporary) {
                continue;
            }
            if self.is_oracle() && self.eat_words(&mut b, &["GLOBAL", "TEMPORARY"]) {
                continue;
            }
            if self.eat_one_of(&mut b, &["UNIQUE", "FULLTEXT", "SPATIAL", "BITMAP"]).is_some() {
                index_kind = true;
                continue;
            }
            if self.is_oracle() && self.eat_one_of(&mut b, &["FORCE", "NOFORCE", "PUBLIC"]).is_some() {
                continue;
            }
            if self.is_mysql() {
                if let Some(opt) = self.parse_view_option()? {
                    b.push_node(opt);
                    continue;
                }
            }
            break;
        }
        let word = self.current().text.to_ascii_uppercase();
        match word.as_str() {
            "TABLE" if !index_kind && !or_replace => self.parse_create_table_rest(&mut b)?,
            "INDEX" => {
                b.retag(RuleKind::CreateIndexStmt);
                self.parse_create_index_rest(&mut b)?;
            }
            "VIEW" if !index_kind => {
                b.retag(RuleKind::CreateViewStmt);
                self.parse_create_view_rest(&mut b)?;
            }
            "DATABASE" | "SCHEMA" if !index_kind && !or_replace => {
                b.retag(RuleKind::CreateDatabaseStmt);
                self.take(&mut b);
                self.eat_if_not_exists(&mut b);
                let name = self.parse_identifier()?;
                b.push_node(name);
                self.parse_repeated(
                    &mut b,
                    |p| p.parse_named_option(RuleKind::DatabaseOption, DATABASE_OPTIONS),
                    Some(TokenKind::Comma),
                )?;
            }
            "SEQUENCE" if !index_kind && !or_replace => {
                b.retag(RuleKind::CreateSequenceStmt);
                self.take(&mut b);
                self.eat_if_not_exists(&mut b);
                let name = self.parse_object_name(RuleKind::RelationFactor)?;
                b.push_node(name);
                self.parse_sequence_options(&mut b)?;
            }
            "USER" if !index_kind && !or_replace => {
                b.retag(RuleKind::CreateUserStmt);
                self.take(&mut b);
                self.eat_if_not_exists(&mut b);
                self.parse_comma_sep(&mut b, Self::parse_user_spec)?;
                self.parse_user_options(&mut b)?;
            }
            "ROLE" if !index_kind && !or_replace => {
                b.retag(RuleKind::CreateRoleStmt);
                self.take(&mut b);
                self.eat_if_not_exists(&mut b);
                if self.is_mysql() {
                    self.parse_comma_sep(&mut b, Self::parse_user_name)?;
                } else {
                    let name = self.parse_user_name()?;
                    b.push_node(name);
                    if !self.eat_words(&mut b, &["NOT", "IDENTIFIED"]) && self.eat_kw(&mut b, Keyword::Identified) {
                        self.expect_kw(&mut b, Keyword::By)?;
                        self.parse_password(&mut b)?;
                    }
                }
            }
            "SYNONYM" if !index_kind => {
                b.retag(RuleKind::CreateSynonymStmt);
                self.take(&mut b);
                let name = self.parse_object_name(RuleKind::RelationFactor)?;
                b.push_node(name);
                self.expect_kw(&mut b, Keyword::For)?;
                let target = self.parse_object_name(RuleKind::RelationFactor)?;
                b.push_node(target);
            }
            "TABLEGROUP" if !index_kind && !or_replace => {
                b.retag(RuleKind::CreateTablegroupStmt);
                self.take(&mut b);
                self.eat_if_not_exists(&mut b);
                let name = self.parse_identifier()?;
                b.push_node(name);
                self.parse_repeated(
                    &mut b,
                    |p| p.parse_named_option(RuleKind::TableOption, TABLEGROUP_OPTIONS),
                    Some(TokenKind::Comma),
                )?;
                if self.check_kw(Keyword::Partition) {
                    let part = self.parse_partition_option()?;
                    b.push_node(part);
                }
            }
            _ => return Err(self.err_expected("TABLE")),
        }
        self.finish(b)
    }

    /// MySQL `ALGORITHM = x`, `DEFINER = user`, `SQL SECURITY DEFINER|INVOKER`.
    fn parse_view_option(&mut self) -> PResult<Option<ParseNode>> {
        if self.check_kw(Keyword::Algorithm) || self.check_kw(Keyword::Definer) {
            let mut b = self.begin(RuleKind::ViewOption)?;
            let definer = self.current().is_word("DEFINER");
            self.take(&mut b);
            self.expect(&mut b, TokenKind::Eq)?;
            if definer {
                if self.check_kw(Keyword::CurrentUser) {
                    self.take(&mut b);
                    if self.peek() == TokenKind::LeftParen {
                        self.take(&mut b);
                        self.expect(&mut b, TokenKind::RightParen)?;
                    }
                } else {
                    let user = self.parse_user_name()?;
                    b.push_node(user);
                }
            } else {
                self.expect_one_of(&mut b, &["UNDEFINED", "MERGE", "TEMPTABLE"])?;
            }
            return self.finish(b).map(Some);
        }
        if self.word_at(0, "SQL") && self.word_at(1, "SECURITY") {
            let mut b = self.begin(RuleKind::ViewOption)?;
            self.take(&mut b);
            self.take(&mut b);
            self.expect_one_of(&mut b, &["DEFINER", "INVOKER"])?;
            return self.finish(b).map(Some);
        }
        Ok(None)
    }

    fn parse_create_table_rest(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        self.expect_kw(b, Keyword::Table)?;
        self.eat_if_not_exists(b);
        let name = self.parse_relation()?;
        b.push_node(name);
        if self.check_kw(Keyword::Like) {
            b.retag(RuleKind::CreateTableLikeStmt);
            self.take(b);
            let source = self.parse_relation()?;
            b.push_node(source);
            return Ok(());
        }
        if self.peek() == TokenKind::LeftParen && self.word_at(1, "LIKE") {
            b.retag(RuleKind::CreateTableLikeStmt);
            self.take(b);
            self.take(b);
            let source = self.parse_relation()?;
            b.push_node(source);
            return self.expect(b, TokenKind::RightParen);
        }
        if self.peek() == TokenKind::LeftParen && !self.starts_query_at(1) {
            let elements = self.parse_table_element_list()?;
            b.push_node(elements);
        }
        self.parse_table_options(b)?;
        if self.check_kw(Keyword::Partition) {
            let part = self.parse_partition_option()?;
            b.push_node(part);
            self.parse_table_options(b)?;
        }
        if self.is_oracle() && self.eat_words(b, &["ON", "COMMIT"]) {
            self.expect_one_of(b, &["DELETE", "PRESERVE"])?;
            self.expect_kw(b, Keyword::Rows)?;
        }
        if self.is_mysql() {
            self.eat_one_of(b, &["IGNORE", "REPLACE"]);
        }
        let explicit_as = self.eat_kw(b, Keyword::As);
        if explicit_as
            || self.check_kw(Keyword::Select)
            || self.check_kw(Keyword::With)
            || self.peek() == TokenKind::LeftParen
        {
            let query = self.parse_select_stmt()?;
            b.push_node(query);
        }
        Ok(())
    }

    fn parse_table_element_list(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::TableElementList)?;
        self.parse_paren_sep(&mut b, Self::parse_table_element)?;
        self.finish(b)
    }

    fn parse_table_element(&mut self) -> PResult<ParseNode> {
        let tok = self.current();
        let constraint = ["CONSTRAINT", "PRIMARY", "UNIQUE", "FOREIGN", "CHECK"]
            .iter()
            .any(|w| tok.is_word(w));
        let index = self.is_mysql() && ["INDEX", "KEY", "FULLTEXT", "SPATIAL"].iter().any(|w| tok.is_word(w));
        if constraint {
            self.parse_out_of_line_constraint()
        } else if index {
            self.parse_out_of_line_index()
        } else {
            self.parse_column_definition()
        }
    }

    /// `name type attribute*`
    pub(crate) fn parse_column_definition(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::ColumnDefinition)?;
        let name = self.parse_identifier()?;
        b.push_node(name);
        let computed = self.check_kw(Keyword::Generated) || (self.is_oracle() && self.check_kw(Keyword::As));
        if !computed {
            let ty = self.parse_data_type()?;
            b.push_node(ty);
        }
        while let Some(attr) = self.parse_column_attribute()? {
            b.push_node(attr);
        }
        self.finish(b)
    }

    fn parse_column_attribute(&mut self) -> PResult<Option<ParseNode>> {
        let starts = [
            "CONSTRAINT", "NOT", "NULL", "DEFAULT", "AUTO_INCREMENT", "PRIMARY", "KEY", "UNIQUE",
            "COMMENT", "ON", "COLLATE", "CHARACTER", "CHARSET", "CHECK", "REFERENCES", "GENERATED",
            "AS", "VISIBLE", "INVISIBLE", "SRID", "ENABLE", "DISABLE",
        ];
        if !starts.iter().any(|w| self.check_word(*w)) {
            return Ok(None);
        }
        // MySQL-only attributes are left for the caller to reject in Oracle mode.
        let mysql_only = ["AUTO_INCREMENT", "KEY", "COMMENT", "ON", "CHARACTER", "CHARSET", "SRID"];
        if self.is_oracle() && mysql_only.iter().any(|w| self.word_at(0, w)) {
            return Ok(None);
        }
        if self.is_mysql() && (self.word_at(0, "ENABLE") || self.word_at(0, "DISABLE")) {
            return Ok(None);
        }
        if self.word_at(0, "ON") && !self.word_at(1, "UPDATE") {
            return Ok(None);
        }
        let mut b = self.begin(RuleKind::ColumnAttribute)?;
        if self.eat_kw(&mut b, Keyword::Constraint) {
            if !["PRIMARY", "UNIQUE", "CHECK", "REFERENCES", "NOT", "NULL"]
                .iter()
                .any(|w| self.word_at(0, w))
            {
                let name = self.parse_identifier()?;
                b.push_node(name);
            }
        }
        let kind = self.parse_column_attribute_body(&mut b)?;
        if self.is_oracle() {
            self.eat_one_of(&mut b, &["ENABLE", "DISABLE"]);
        }
        b.set_value(NodeValue::ColumnAttribute(kind));
        self.finish(b).map(Some)
    }

    fn parse_column_attribute_body(&mut self, b: &mut NodeBuilder) -> PResult<ColumnAttributeKind> {
        let word = self.current().text.to_ascii_uppercase();
        let kind = match word.as_str() {
            "NOT" => {
                self.take(b);
                self.expect_kw(b, Keyword::Null)?;
                ColumnAttributeKind::NotNull
            }
            "NULL" => {
                self.take(b);
                ColumnAttributeKind::Null
            }
            "DEFAULT" => {
                self.take(b);
                if self.is_oracle() {
                    self.eat_words(b, &["ON", "NULL"]);
                }
                let value = self.parse_bit_expr()?;
                b.push_node(value);
                ColumnAttributeKind::Default
            }
            "AUTO_INCREMENT" => {
                self.take(b);
                ColumnAttributeKind::AutoIncrement
            }
            "PRIMARY" | "KEY" => {
                self.eat_kw(b, Keyword::Primary);
                self.expect_kw(b, Keyword::Key)?;
                ColumnAttributeKind::PrimaryKey
            }
            "UNIQUE" => {
                self.take(b);
                if self.is_mysql() {
                    self.eat_kw(b, Keyword::Key);
                }
                ColumnAttributeKind::Unique
            }
            "COMMENT" => {
                self.take(b);
                self.expect(b, TokenKind::String)?;
                ColumnAttributeKind::Comment
            }
            "ON" => {
                self.take(b);
                self.take(b);
                let value = self.parse_bit_expr()?;
                b.push_node(value);
                ColumnAttributeKind::OnUpdate
            }
            "COLLATE" => {
                self.take(b);
                self.parse_collation_name(b)?;
                ColumnAttributeKind::Collate
            }
            "CHARACTER" | "CHARSET" => {
                if self.eat_kw(b, Keyword::Character) {
                    self.expect_kw(b, Keyword::Set)?;
                } else {
                    self.take(b);
                }
                self.parse_collation_name(b)?;
                ColumnAttributeKind::Charset
            }
            "CHECK" => {
                self.take(b);
                self.expect(b, TokenKind::LeftParen)?;
                let cond = self.parse_expr()?;
                b.push_node(cond);
                self.expect(b, TokenKind::RightParen)?;
                if self.is_mysql() {
                    self.eat_words(b, &["NOT", "ENFORCED"]);
                    self.eat_kw(b, Keyword::Enforced);
                }
                ColumnAttributeKind::Check
            }
            "REFERENCES" => {
                let refs = self.parse_references_clause()?;
                b.push_node(refs);
                ColumnAttributeKind::References
            }
            "GENERATED" | "AS" => self.parse_generated_column(b)?,
            "VISIBLE" => {
                self.take(b);
                ColumnAttributeKind::Visible
            }
            "INVISIBLE" => {
                self.take(b);
                ColumnAttributeKind::Invisible
            }
            "SRID" => {
                self.take(b);
                self.expect_integer(b)?;
                ColumnAttributeKind::Srid
            }
            "ENABLE" => {
                self.take(b);
                ColumnAttributeKind::Enable
            }
            "DISABLE" => {
                self.take(b);
                ColumnAttributeKind::Disable
            }
            _ => return Err(self.err_expected("column attribute")),
        };
        Ok(kind)
    }

    /// `[GENERATED ALWAYS] AS (expr) [VIRTUAL|STORED]` and Oracle
    /// `GENERATED [ALWAYS | BY DEFAULT [ON NULL]] AS IDENTITY [(options)]`.
    fn parse_generated_column(&mut self, b: &mut NodeBuilder) -> PResult<ColumnAttributeKind> {
        if self.eat_kw(b, Keyword::Generated) && !self.eat_kw(b, Keyword::Always) && self.is_oracle() {
            self.expect_kw(b, Keyword::By)?;
            self.expect_kw(b, Keyword::Default)?;
            self.eat_words(b, &["ON", "NULL"]);
        }
        self.expect_kw(b, Keyword::As)?;
        if self.is_oracle() && self.eat_kw(b, Keyword::Identity) {
            if self.eat(b, TokenKind::LeftParen) {
                self.parse_sequence_options(b)?;
                self.expect(b, TokenKind::RightParen)?;
            }
            return Ok(ColumnAttributeKind::Identity);
        }
        self.expect(b, TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;
        b.push_node(expr);
        self.expect(b, TokenKind::RightParen)?;
        self.eat_one_of(b, &["VIRTUAL", "STORED"]);
        Ok(ColumnAttributeKind::Generated)
    }

    /// `REFERENCES t [(cols)] [MATCH ..] [ON DELETE|UPDATE action]*`
    fn parse_references_clause(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::ReferencesClause)?;
        self.expect_kw(&mut b, Keyword::References)?;
        let table = self.parse_relation()?;
        b.push_node(table);
        if self.peek() == TokenKind::LeftParen {
            let cols = self.parse_column_list()?;
            b.push_node(cols);
        }
        if self.is_mysql() && self.eat_kw(&mut b, Keyword::Match) {
            self.expect_one_of(&mut b, &["FULL", "PARTIAL", "SIMPLE"])?;
        }
        while self.word_at(0, "ON") && (self.word_at(1, "DELETE") || self.word_at(1, "UPDATE")) {
            let mut action = self.begin(RuleKind::ReferentialAction)?;
            self.take(&mut action);
            self.take(&mut action);
            if self.eat_kw(&mut action, Keyword::Set) {
                self.expect_one_of(&mut action, &["NULL", "DEFAULT"])?;
            } else if self.eat_kw(&mut action, Keyword::No) {
                self.expect_kw(&mut action, Keyword::Action)?;
            } else {
                self.expect_one_of(&mut action, &["CASCADE", "RESTRICT"])?;
            }
            self.attach(&mut b, action)?;
        }
        self.finish(b)
    }

    /// `[CONSTRAINT [name]] PRIMARY KEY | UNIQUE | FOREIGN KEY | CHECK ...`
    fn parse_out_of_line_constraint(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::OutOfLineConstraint)?;
        if self.eat_kw(&mut b, Keyword::Constraint)
            && !["PRIMARY", "UNIQUE", "FOREIGN", "CHECK"].iter().any(|w| self.word_at(0, w))
        {
            let name = self.parse_identifier()?;
            b.push_node(name);
        }
        let kind = match self.eat_one_of(&mut b, &["PRIMARY", "UNIQUE", "FOREIGN", "CHECK"]) {
            Some("PRIMARY") => {
                self.expect_kw(&mut b, Keyword::Key)?;
                ConstraintKind::PrimaryKey
            }
            Some("UNIQUE") => {
                if self.is_mysql() {
                    self.eat_one_of(&mut b, &["KEY", "INDEX"]);
                }
                ConstraintKind::Unique
            }
            Some("FOREIGN") => {
                self.expect_kw(&mut b, Keyword::Key)?;
                ConstraintKind::ForeignKey
            }
            Some(_) => ConstraintKind::Check,
            None => return Err(self.err_expected("PRIMARY")),
        };
        match kind {
            ConstraintKind::Check => {
                self.expect(&mut b, TokenKind::LeftParen)?;
                let cond = self.parse_expr()?;
                b.push_node(cond);
                self.expect(&mut b, TokenKind::RightParen)?;
                if self.is_mysql() {
                    self.eat_words(&mut b, &["NOT", "ENFORCED"]);
                    self.eat_kw(&mut b, Keyword::Enforced);
                }
            }
            _ => {
                if self.is_mysql() && self.check_ident() && !self.check_kw(Keyword::Using) {
                    let index_name = self.parse_identifier()?;
                    b.push_node(index_name);
                }
                if self.is_mysql() && self.check_kw(Keyword::Using) {
                    let opt = self.parse_named_option(RuleKind::IndexOption, &["USING"])?;
                    if let Some(opt) = opt {
                        b.push_node(opt);
                    }
                }
                self.parse_index_columns(&mut b)?;
                if kind == ConstraintKind::ForeignKey {
                    let refs = self.parse_references_clause()?;
                    b.push_node(refs);
                } else {
                    self.parse_index_options(&mut b)?;
                }
            }
        }
        if self.is_oracle() {
            if self.word_at(0, "USING") && self.word_at(1, "INDEX") {
                self.take(&mut b);
                self.take(&mut b);
                self.parse_index_options(&mut b)?;
            }
            self.eat_one_of(&mut b, &["ENABLE", "DISABLE"]);
        }
        b.set_value(NodeValue::Constraint(kind));
        self.finish(b)
    }

    /// MySQL `[FULLTEXT|SPATIAL] INDEX|KEY [name] [USING ..] (cols) [options]`
    fn parse_out_of_line_index(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::OutOfLineIndex)?;
        self.eat_one_of(&mut b, &["FULLTEXT", "SPATIAL"]);
        self.expect_one_of(&mut b, &["INDEX", "KEY"])?;
        if self.check_ident() && !self.check_kw(Keyword::Using) {
            let name = self.parse_identifier()?;
            b.push_node(name);
        }
        if let Some(opt) = self.parse_named_option(RuleKind::IndexOption, &["USING"])? {
            b.push_node(opt);
        }
        self.parse_index_columns(&mut b)?;
        self.parse_index_options(&mut b)?;
        self.finish(b)
    }

    fn parse_index_columns(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        self.parse_paren_sep(b, Self::parse_index_column)
    }

    /// MySQL `col [(len)] [ASC|DESC]` or `(expr)`; Oracle any expression.
    fn parse_index_column(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::IndexColumn)?;
        if self.is_mysql() && self.peek() != TokenKind::LeftParen {
            let name = self.parse_identifier()?;
            b.push_node(name);
            if self.eat(&mut b, TokenKind::LeftParen) {
                self.expect_integer(&mut b)?;
                self.expect(&mut b, TokenKind::RightParen)?;
            }
        } else {
            let expr = self.parse_expr()?;
            b.push_node(expr);
        }
        self.eat_one_of(&mut b, &["ASC", "DESC"]);
        self.finish(b)
    }

    fn parse_create_index_rest(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        self.expect_kw(b, Keyword::Index)?;
        self.eat_if_not_exists(b);
        let name = self.parse_object_name(RuleKind::RelationFactor)?;
        b.push_node(name);
        if let Some(opt) = self.parse_named_option(RuleKind::IndexOption, &["USING"])? {
            b.push_node(opt);
        }
        self.expect_kw(b, Keyword::On)?;
        let table = self.parse_relation()?;
        b.push_node(table);
        self.parse_index_columns(b)?;
        self.parse_index_options(b)?;
        if self.check_kw(Keyword::Partition) {
            let part = self.parse_partition_option()?;
            b.push_node(part);
        }
        Ok(())
    }

    fn parse_create_view_rest(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        self.expect_kw(b, Keyword::View)?;
        let name = self.parse_relation()?;
        b.push_node(name);
        if self.peek() == TokenKind::LeftParen {
            let cols = self.parse_column_list()?;
            b.push_node(cols);
        }
        self.expect_kw(b, Keyword::As)?;
        let query = self.parse_select_stmt()?;
        b.push_node(query);
        if self.check_kw(Keyword::With) {
            let mut check = self.begin(RuleKind::CheckOptionClause)?;
            self.take(&mut check);
            if self.is_oracle() && self.eat_kw(&mut check, Keyword::Read) {
                self.expect_kw(&mut check, Keyword::Only)?;
            } else {
                if self.is_mysql() {
                    self.eat_one_of(&mut check, &["CASCADED", "LOCAL"]);
                }
                self.expect_kw(&mut check, Keyword::Check)?;
                self.expect_kw(&mut check, Keyword::Option)?;
            }
            self.attach(b, check)?;
        }
        Ok(())
    }

    fn parse_sequence_options(&mut self, b: &mut NodeBuilder) -> PResult<usize> {
        self.parse_repeated(
            b,
            |p| {
                if let Some(len) = SEQUENCE_VALUE_OPTIONS
                    .iter()
                    .map(|n| p.phrase_ahead(n))
                    .find(|&n| n > 0)
                {
                    let mut opt = p.begin(RuleKind::SequenceOption)?;
                    for _ in 0..len {
                        p.take(&mut opt);
                    }
                    p.eat(&mut opt, TokenKind::Eq);
                    let value = p.parse_bit_expr()?;
                    opt.push_node(value);
                    return p.finish(opt).map(Some);
                }
                p.parse_flag_option(RuleKind::SequenceOption, SEQUENCE_FLAGS)
            },
            Some(TokenKind::Comma),
        )
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    /// `name[@host]` where either part may be quoted.
    pub(crate) fn parse_user_name(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::UserName)?;
        match self.peek() {
            TokenKind::String | TokenKind::QuotedIdent => self.take(&mut b),
            k if k.is_word() => self.take(&mut b),
            _ => return Err(self.err_expected("user name")),
        }
        if self.is_mysql() && self.peek() == TokenKind::UserVariable {
            self.take(&mut b);
        }
        self.finish(b)
    }

    /// `user [IDENTIFIED BY [PASSWORD] 'pw' | IDENTIFIED WITH plugin [BY|AS 'pw']]`
    pub(crate) fn parse_user_spec(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::UserSpec)?;
        let name = self.parse_user_name()?;
        b.push_node(name);
        if self.eat_kw(&mut b, Keyword::Identified) {
            if self.is_mysql() && self.eat_kw(&mut b, Keyword::With) {
                if !self.peek().is_word() && self.peek() != TokenKind::String {
                    return Err(self.err_expected("authentication plugin"));
                }
                self.take(&mut b);
                if self.eat_one_of(&mut b, &["BY", "AS"]).is_some() {
                    self.expect(&mut b, TokenKind::String)?;
                }
            } else {
                self.expect_kw(&mut b, Keyword::By)?;
                if self.is_mysql() {
                    self.eat_kw(&mut b, Keyword::Password);
                }
                self.parse_password(&mut b)?;
            }
        }
        self.finish(b)
    }

    fn parse_password(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        match self.peek() {
            TokenKind::String | TokenKind::QuotedIdent => self.take(b),
            k if k.is_word() && self.is_oracle() => self.take(b),
            _ => return Err(self.err_expected("password")),
        }
        Ok(())
    }

    /// Account options after the user list.
    fn parse_user_options(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        loop {
            if self.is_mysql() && self.eat_kw(b, Keyword::Require) {
                self.expect_one_of(b, &["NONE", "SSL", "X509"])?;
            } else if self.eat_words(b, &["PASSWORD", "EXPIRE"]) {
                if self.eat_kw(b, Keyword::Interval) {
                    self.expect_integer(b)?;
                    self.expect_kw(b, Keyword::Day)?;
                } else {
                    self.eat_one_of(b, &["DEFAULT", "NEVER"]);
                }
            } else if self.eat_word(b, "ACCOUNT") {
                self.expect_one_of(b, &["LOCK", "UNLOCK"])?;
            } else if self.is_oracle()
                && (self.eat_words(b, &["DEFAULT", "TABLESPACE"]) || self.eat_words(b, &["TEMPORARY", "TABLESPACE"]))
            {
                let ts = self.parse_identifier()?;
                b.push_node(ts);
            } else if self.is_oracle() && self.eat_word(b, "PROFILE") {
                let profile = self.parse_any_word()?;
                b.push_node(profile);
            } else if self.is_mysql() && self.eat_words(b, &["WITH", "MAX_USER_CONNECTIONS"]) {
                self.expect_integer(b)?;
            } else {
                return Ok(());
            }
        }
    }

    // -----------------------------------------------------------------------
    // Partitioning
    // -----------------------------------------------------------------------

    /// `PARTITION BY method (..) [PARTITIONS n] [SUBPARTITION BY ..] [(definitions)]`
    fn parse_partition_option(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::PartitionOption)?;
        self.expect_kw(&mut b, Keyword::Partition)?;
        self.expect_kw(&mut b, Keyword::By)?;
        let method = self.parse_partition_method(&mut b)?;
        if self.eat_kw(&mut b, Keyword::Partitions) {
            self.expect_integer(&mut b)?;
        }
        if self.check_kw(Keyword::Subpartition) {
            let sub = self.parse_subpartition_option()?;
            b.push_node(sub);
        }
        if self.peek() == TokenKind::LeftParen {
            self.parse_paren_sep(&mut b, Self::parse_partition_definition)?;
        }
        b.set_value(NodeValue::Partition(method));
        self.finish(b)
    }

    fn parse_subpartition_option(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::SubpartitionOption)?;
        self.expect_kw(&mut b, Keyword::Subpartition)?;
        self.expect_kw(&mut b, Keyword::By)?;
        let method = self.parse_partition_method(&mut b)?;
        if self.eat_kw(&mut b, Keyword::Subpartitions) {
            self.expect_integer(&mut b)?;
        } else if self.eat_words(&mut b, &["SUBPARTITION", "TEMPLATE"]) {
            self.parse_paren_sep(&mut b, Self::parse_subpartition_definition)?;
        }
        b.set_value(NodeValue::Partition(method));
        self.finish(b)
    }

    /// `[LINEAR] HASH (expr)`, `[LINEAR] KEY (cols)`, `RANGE|LIST [COLUMNS] (..)`.
    fn parse_partition_method(&mut self, b: &mut NodeBuilder) -> PResult<PartitionMethod> {
        if self.is_mysql() {
            self.eat_word(b, "LINEAR");
        }
        let method = match self.expect_one_of(b, &["HASH", "KEY", "RANGE", "LIST"])? {
            "HASH" => PartitionMethod::Hash,
            "KEY" => PartitionMethod::Key,
            "RANGE" if self.eat_kw(b, Keyword::Columns) => PartitionMethod::RangeColumns,
            "RANGE" => PartitionMethod::Range,
            _ if self.eat_kw(b, Keyword::Columns) => PartitionMethod::ListColumns,
            _ => PartitionMethod::List,
        };
        match method {
            PartitionMethod::Key | PartitionMethod::RangeColumns | PartitionMethod::ListColumns => {
                self.expect(b, TokenKind::LeftParen)?;
                if !(method == PartitionMethod::Key && self.peek() == TokenKind::RightParen) {
                    self.parse_comma_sep(b, Self::parse_identifier)?;
                }
                self.expect(b, TokenKind::RightParen)?;
            }
            _ => self.parse_paren_sep(b, Self::parse_expr)?,
        }
        Ok(method)
    }

    fn parse_partition_definition(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::PartitionDefinition)?;
        self.expect_kw(&mut b, Keyword::Partition)?;
        self.parse_partition_definition_rest(&mut b)?;
        if self.peek() == TokenKind::LeftParen {
            self.parse_paren_sep(&mut b, Self::parse_subpartition_definition)?;
        }
        self.finish(b)
    }

    fn parse_subpartition_definition(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::SubpartitionDefinition)?;
        self.expect_kw(&mut b, Keyword::Subpartition)?;
        self.parse_partition_definition_rest(&mut b)?;
        self.finish(b)
    }

    fn parse_partition_definition_rest(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        let name = self.parse_identifier()?;
        b.push_node(name);
        if self.check_kw(Keyword::Values) {
            let values = self.parse_partition_values()?;
            b.push_node(values);
        }
        self.parse_repeated(
            b,
            |p| p.parse_named_option(RuleKind::TableOption, PARTITION_ATTRIBUTES),
            None,
        )?;
        Ok(())
    }

    /// `VALUES LESS THAN (..|MAXVALUE)`, `VALUES IN (..)`, Oracle `VALUES (..|DEFAULT)`.
    fn parse_partition_values(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::PartitionValues)?;
        self.expect_kw(&mut b, Keyword::Values)?;
        if self.eat_kw(&mut b, Keyword::Less) {
            self.expect_kw(&mut b, Keyword::Than)?;
            if self.eat_kw(&mut b, Keyword::Maxvalue) {
                return self.finish(b);
            }
        } else if self.is_mysql() {
            self.expect_kw(&mut b, Keyword::In)?;
        }
        self.expect(&mut b, TokenKind::LeftParen)?;
        loop {
            if !self.eat_kw(&mut b, Keyword::Maxvalue) && !self.eat_kw(&mut b, Keyword::Default) {
                let value = self.parse_expr()?;
                b.push_node(value);
            }
            if !self.eat(&mut b, TokenKind::Comma) {
                break;
            }
        }
        self.expect(&mut b, TokenKind::RightParen)?;
        self.finish(b)
    }

    // -----------------------------------------------------------------------
    // ALTER
    // -----------------------------------------------------------------------

    pub(crate) fn parse_alter(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::AlterTableStmt)?;
        self.expect_kw(&mut b, Keyword::Alter)?;
        let word = self.current().text.to_ascii_uppercase();
        match word.as_str() {
            "TABLE" => {
                self.take(&mut b);
                let table = self.parse_relation()?;
                b.push_node(table);
                self.parse_comma_sep(&mut b, Self::parse_alter_table_action)?;
            }
            "INDEX" => {
                b.retag(RuleKind::AlterIndexStmt);
                self.take(&mut b);
                let name = self.parse_object_name(RuleKind::RelationFactor)?;
                b.push_node(name);
                self.parse_alter_index_action(&mut b)?;
            }
            "DATABASE" | "SCHEMA" => {
                b.retag(RuleKind::AlterDatabaseStmt);
                self.take(&mut b);
                if self.check_ident()
                    && !DATABASE_OPTIONS.iter().any(|n| self.phrase_ahead(n) > 0)
                {
                    let name = self.parse_identifier()?;
                    b.push_node(name);
                }
                let count = self.parse_repeated(
                    &mut b,
                    |p| p.parse_named_option(RuleKind::DatabaseOption, DATABASE_OPTIONS),
                    Some(TokenKind::Comma),
                )?;
                if count == 0 {
                    return Err(self.err_expected("CHARACTER"));
                }
            }
            "SEQUENCE" => {
                b.retag(RuleKind::AlterSequenceStmt);
                self.take(&mut b);
                let name = self.parse_object_name(RuleKind::RelationFactor)?;
                b.push_node(name);
                if self.parse_sequence_options(&mut b)? == 0 {
                    return Err(self.err_expected("INCREMENT"));
                }
            }
            "USER" => {
                b.retag(RuleKind::AlterUserStmt);
                self.take(&mut b);
                self.eat_if_exists(&mut b);
                self.parse_comma_sep(&mut b, Self::parse_user_spec)?;
                self.parse_user_options(&mut b)?;
            }
            "SYSTEM" => {
                b.retag(RuleKind::AlterSystemStmt);
                self.take(&mut b);
                self.parse_alter_parameters(&mut b)?;
            }
            "SESSION" => {
                b.retag(RuleKind::AlterSessionStmt);
                self.take(&mut b);
                self.parse_alter_parameters(&mut b)?;
            }
            _ => return Err(self.err_expected("TABLE")),
        }
        self.finish(b)
    }

    /// `SET name = value [, ..] [scope]`; other ALTER SYSTEM/SESSION verbs are kept verbatim.
    fn parse_alter_parameters(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        if self.eat_kw(b, Keyword::Set) {
            self.parse_comma_sep(b, |p| {
                let mut assign = p.begin(RuleKind::VarAssignment)?;
                let name = p.parse_any_word()?;
                assign.push_node(name);
                p.expect(&mut assign, TokenKind::Eq)?;
                let value = p.parse_bit_expr()?;
                assign.push_node(value);
                p.finish(assign)
            })?;
            if self.eat_word(b, "SCOPE") {
                self.expect(b, TokenKind::Eq)?;
                self.expect_one_of(b, &["MEMORY", "SPFILE", "BOTH"])?;
            }
            for scope in ["TENANT", "SERVER", "ZONE"] {
                if self.word_at(0, scope) && self.peek_nth(1) == TokenKind::Eq {
                    self.take(b);
                    self.take(b);
                    self.parse_option_value(b)?;
                }
            }
            return Ok(());
        }
        if !self.peek().is_word() {
            return Err(self.err_expected("SET"));
        }
        self.parse_rest_of_statement(b)
    }

    fn parse_alter_index_action(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        if self.eat_kw(b, Keyword::Rename) {
            self.expect_kw(b, Keyword::To)?;
            let name = self.parse_identifier()?;
            b.push_node(name);
            return Ok(());
        }
        if self.eat_word(b, "REBUILD") {
            self.parse_index_options(b)?;
            return Ok(());
        }
        if self.eat_one_of(b, &["VISIBLE", "INVISIBLE", "UNUSABLE", "NOPARALLEL"]).is_some() {
            return Ok(());
        }
        if self.eat_word(b, "PARALLEL") {
            return self.expect_integer(b);
        }
        Err(self.err_expected("RENAME"))
    }

    fn parse_alter_table_action(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::AlterTableAction)?;
        let word = self.current().text.to_ascii_uppercase();
        match word.as_str() {
            "ADD" => {
                self.take(&mut b);
                self.parse_add_action(&mut b)?;
            }
            "DROP" => {
                self.take(&mut b);
                self.parse_drop_action(&mut b)?;
            }
            "MODIFY" => {
                self.take(&mut b);
                if self.is_oracle() && self.peek() == TokenKind::LeftParen {
                    self.parse_paren_sep(&mut b, Self::parse_column_definition)?;
                } else if self.is_oracle() && self.check_kw(Keyword::Partition) {
                    self.take(&mut b);
                    let name = self.parse_identifier()?;
                    b.push_node(name);
                    self.parse_rest_of_action(&mut b)?;
                } else {
                    self.eat_kw(&mut b, Keyword::Column);
                    let col = self.parse_column_definition()?;
                    b.push_node(col);
                    self.parse_column_position(&mut b)?;
                }
            }
            "CHANGE" if self.is_mysql() => {
                self.take(&mut b);
                self.eat_kw(&mut b, Keyword::Column);
                let old = self.parse_identifier()?;
                b.push_node(old);
                let col = self.parse_column_definition()?;
                b.push_node(col);
                self.parse_column_position(&mut b)?;
            }
            "RENAME" => {
                self.take(&mut b);
                if self.eat_kw(&mut b, Keyword::Column)
                    || (self.is_mysql() && self.eat_one_of(&mut b, &["INDEX", "KEY"]).is_some())
                {
                    let old = self.parse_identifier()?;
                    b.push_node(old);
                    self.expect_kw(&mut b, Keyword::To)?;
                    let new = self.parse_identifier()?;
                    b.push_node(new);
                } else {
                    if !self.eat_kw(&mut b, Keyword::To) && self.is_mysql() {
                        self.eat_kw(&mut b, Keyword::As);
                    }
                    let new = self.parse_relation()?;
                    b.push_node(new);
                }
            }
            "ALTER" if self.is_mysql() => {
                self.take(&mut b);
                if self.eat_kw(&mut b, Keyword::Index) {
                    let name = self.parse_identifier()?;
                    b.push_node(name);
                    self.expect_one_of(&mut b, &["VISIBLE", "INVISIBLE"])?;
                } else {
                    self.eat_kw(&mut b, Keyword::Column);
                    let col = self.parse_identifier()?;
                    b.push_node(col);
                    if self.eat_kw(&mut b, Keyword::Set) {
                        if self.eat_kw(&mut b, Keyword::Default) {
                            let value = self.parse_bit_expr()?;
                            b.push_node(value);
                        } else {
                            self.expect_one_of(&mut b, &["VISIBLE", "INVISIBLE"])?;
                        }
                    } else {
                        self.expect_kw(&mut b, Keyword::Drop)?;
                        self.expect_kw(&mut b, Keyword::Default)?;
                    }
                }
            }
            "TRUNCATE" => {
                self.take(&mut b);
                self.expect_one_of(&mut b, &["PARTITION", "SUBPARTITION"])?;
                self.parse_comma_sep(&mut b, Self::parse_identifier)?;
            }
            "PARTITION" => {
                let part = self.parse_partition_option()?;
                b.push_node(part);
            }
            _ => {
                if self.parse_table_options(&mut b)? == 0 {
                    return Err(self.err_expected("ADD"));
                }
            }
        }
        self.finish(b)
    }

    /// Oracle partition maintenance verbs after `MODIFY PARTITION p`.
    fn parse_rest_of_action(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        while self.peek() != TokenKind::Comma && self.peek() != TokenKind::Semicolon && !self.at_eof() {
            if self.peek() == TokenKind::LeftParen {
                self.take_balanced(b)?;
            } else if self.peek() == TokenKind::Invalid || self.peek() == TokenKind::RightParen {
                return Err(self.err_expected("','"));
            } else {
                self.take(b);
            }
        }
        Ok(())
    }

    fn parse_add_action(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        let tok = self.current();
        let constraint = ["CONSTRAINT", "PRIMARY", "UNIQUE", "FOREIGN", "CHECK"].iter().any(|w| tok.is_word(w));
        let index = ["INDEX", "KEY", "FULLTEXT", "SPATIAL"].iter().any(|w| tok.is_word(w));
        if constraint {
            let cons = self.parse_out_of_line_constraint()?;
            b.push_node(cons);
            return Ok(());
        }
        if self.is_mysql() && index {
            let index = self.parse_out_of_line_index()?;
            b.push_node(index);
            return Ok(());
        }
        if self.check_kw(Keyword::Partition) {
            self.take(b);
            if self.peek() == TokenKind::LeftParen {
                self.parse_paren_sep(b, Self::parse_partition_definition)?;
            } else {
                self.parse_partition_definition_rest(b)?;
            }
            return Ok(());
        }
        self.eat_kw(b, Keyword::Column);
        if self.peek() == TokenKind::LeftParen {
            self.parse_paren_sep(b, Self::parse_column_definition)?;
        } else {
            let col = self.parse_column_definition()?;
            b.push_node(col);
            self.parse_column_position(b)?;
        }
        Ok(())
    }

    fn parse_drop_action(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        if self.eat_words(b, &["PRIMARY", "KEY"]) {
            return Ok(());
        }
        if self.is_mysql() && self.eat_one_of(b, &["INDEX", "KEY", "CHECK"]).is_some() {
            let name = self.parse_identifier()?;
            b.push_node(name);
            return Ok(());
        }
        if self.eat_words(b, &["FOREIGN", "KEY"]) || self.eat_kw(b, Keyword::Constraint) {
            let name = self.parse_identifier()?;
            b.push_node(name);
            if self.is_oracle() {
                self.eat_kw(b, Keyword::Cascade);
            }
            return Ok(());
        }
        if self.eat_one_of(b, &["PARTITION", "SUBPARTITION"]).is_some() {
            self.parse_comma_sep(b, Self::parse_identifier)?;
            return Ok(());
        }
        self.eat_kw(b, Keyword::Column);
        if self.is_oracle() && self.peek() == TokenKind::LeftParen {
            self.parse_paren_sep(b, Self::parse_identifier)?;
        } else {
            let col = self.parse_identifier()?;
            b.push_node(col);
        }
        if self.is_mysql() {
            self.eat_one_of(b, &["CASCADE", "RESTRICT"]);
        }
        Ok(())
    }

    /// MySQL `FIRST` or `AFTER col`.
    fn parse_column_position(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        if !self.is_mysql() || !(self.check_kw(Keyword::First) || self.check_kw(Keyword::After)) {
            return Ok(());
        }
        let mut pos = self.begin(RuleKind::ColumnPosition)?;
        if !self.eat_kw(&mut pos, Keyword::First) {
            self.take(&mut pos);
            let col = self.parse_identifier()?;
            pos.push_node(col);
        }
        self.attach(b, pos)
    }

    // -----------------------------------------------------------------------
    // DROP
    // -----------------------------------------------------------------------

    pub(crate) fn parse_drop(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::DropTableStmt)?;
        self.expect_kw(&mut b, Keyword::Drop)?;
        let temporary = self.is_mysql() && self.eat_kw(&mut b, Keyword::Temporary);
        let public = self.is_oracle() && self.eat_kw(&mut b, Keyword::Public);
        let word = self.current().text.to_ascii_uppercase();
        match word.as_str() {
            "TABLE" | "TABLES" if !public => {
                self.take(&mut b);
                self.eat_if_exists(&mut b);
                self.parse_comma_sep(&mut b, Self::parse_relation)?;
                self.parse_drop_behavior(&mut b)?;
            }
            "VIEW" if !temporary && !public => {
                b.retag(RuleKind::DropViewStmt);
                self.take(&mut b);
                self.eat_if_exists(&mut b);
                self.parse_comma_sep(&mut b, Self::parse_relation)?;
                self.parse_drop_behavior(&mut b)?;
            }
            "INDEX" if !temporary && !public => {
                b.retag(RuleKind::DropIndexStmt);
                self.take(&mut b);
                self.eat_if_exists(&mut b);
                let name = self.parse_object_name(RuleKind::RelationFactor)?;
                b.push_node(name);
                if self.eat_kw(&mut b, Keyword::On) {
                    let table = self.parse_relation()?;
                    b.push_node(table);
                }
            }
            "DATABASE" | "SCHEMA" if !temporary && !public => {
                b.retag(RuleKind::DropDatabaseStmt);
                self.take(&mut b);
                self.eat_if_exists(&mut b);
                let name = self.parse_identifier()?;
                b.push_node(name);
            }
            "SEQUENCE" if !temporary && !public => {
                b.retag(RuleKind::DropSequenceStmt);
                self.take(&mut b);
                self.eat_if_exists(&mut b);
                let name = self.parse_object_name(RuleKind::RelationFactor)?;
                b.push_node(name);
            }
            "USER" if !temporary && !public => {
                b.retag(RuleKind::DropUserStmt);
                self.take(&mut b);
                self.eat_if_exists(&mut b);
                self.parse_comma_sep(&mut b, Self::parse_user_name)?;
                if self.is_oracle() {
                    self.eat_kw(&mut b, Keyword::Cascade);
                }
            }
            "ROLE" if !temporary && !public => {
                b.retag(RuleKind::DropRoleStmt);
                self.take(&mut b);
                self.eat_if_exists(&mut b);
                self.parse_comma_sep(&mut b, Self::parse_user_name)?;
            }
            "SYNONYM" if !temporary => {
                b.retag(RuleKind::DropSynonymStmt);
                self.take(&mut b);
                let name = self.parse_object_name(RuleKind::RelationFactor)?;
                b.push_node(name);
                self.eat_kw(&mut b, Keyword::Force);
            }
            "TABLEGROUP" if !temporary && !public => {
                b.retag(RuleKind::DropTablegroupStmt);
                self.take(&mut b);
                self.eat_if_exists(&mut b);
                let name = self.parse_identifier()?;
                b.push_node(name);
            }
            "PREPARE" if self.is_mysql() && !temporary => {
                b.retag(RuleKind::DeallocatePrepareStmt);
                self.take(&mut b);
                let name = self.parse_identifier()?;
                b.push_node(name);
            }
            "FUNCTION" | "PROCEDURE" | "TRIGGER" | "PACKAGE" if !temporary && !public => {
                b.retag(RuleKind::DropRoutineStmt);
                self.take(&mut b);
                if word == "PACKAGE" {
                    self.eat_word(&mut b, "BODY");
                }
                self.eat_if_exists(&mut b);
                let name = self.parse_object_name(RuleKind::RelationFactor)?;
                b.push_node(name);
            }
            _ => return Err(self.err_expected("TABLE")),
        }
        self.finish(b)
    }

    /// `CASCADE | RESTRICT`, Oracle `CASCADE CONSTRAINTS` and `PURGE`.
    fn parse_drop_behavior(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        if self.is_mysql() {
            self.eat_one_of(b, &["CASCADE", "RESTRICT"]);
            return Ok(());
        }
        if self.eat_kw(b, Keyword::Cascade) {
            self.expect_kw(b, Keyword::Constraints)?;
        }
        self.eat_kw(b, Keyword::Purge);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Other schema statements
    // -----------------------------------------------------------------------

    pub(crate) fn parse_truncate(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::TruncateTableStmt)?;
        self.expect_kw(&mut b, Keyword::Truncate)?;
        if self.is_mysql() {
            self.eat_kw(&mut b, Keyword::Table);
        } else {
            self.expect_kw(&mut b, Keyword::Table)?;
        }
        let table = self.parse_relation()?;
        b.push_node(table);
        self.finish(b)
    }

    /// MySQL `RENAME TABLE a TO b, ..`; Oracle `RENAME a TO b`.
    pub(crate) fn parse_rename(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::RenameTableStmt)?;
        self.expect_kw(&mut b, Keyword::Rename)?;
        if self.is_mysql() {
            self.expect_kw(&mut b, Keyword::Table)?;
            loop {
                let from = self.parse_relation()?;
                b.push_node(from);
                self.expect_kw(&mut b, Keyword::To)?;
                let to = self.parse_relation()?;
                b.push_node(to);
                if !self.eat(&mut b, TokenKind::Comma) {
                    break;
                }
            }
        } else {
            let from = self.parse_relation()?;
            b.push_node(from);
            self.expect_kw(&mut b, Keyword::To)?;
            let to = self.parse_relation()?;
            b.push_node(to);
        }
        self.finish(b)
    }

    /// `COMMENT ON TABLE t IS '..'`, `COMMENT ON COLUMN t.c IS '..'`.
    pub(crate) fn parse_comment_on(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::CommentStmt)?;
        self.expect_kw(&mut b, Keyword::Comment)?;
        self.expect_kw(&mut b, Keyword::On)?;
        match self.expect_one_of(&mut b, &["TABLE", "COLUMN"])? {
            "TABLE" => {
                let table = self.parse_relation()?;
                b.push_node(table);
            }
            _ => {
                let col = self.parse_object_name(RuleKind::ColumnRef)?;
                b.push_node(col);
            }
        }
        self.expect_kw(&mut b, Keyword::Is)?;
        self.expect(&mut b, TokenKind::String)?;
        self.finish(b)
    }

    /// `FLASHBACK TABLE t TO BEFORE DROP [RENAME TO x]` or `TO SCN|TIMESTAMP expr`.
    pub(crate) fn parse_flashback(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::FlashbackStmt)?;
        self.expect_kw(&mut b, Keyword::Flashback)?;
        self.expect_kw(&mut b, Keyword::Table)?;
        self.parse_comma_sep(&mut b, Self::parse_relation)?;
        self.expect_kw(&mut b, Keyword::To)?;
        if self.eat_words(&mut b, &["BEFORE", "DROP"]) {
            if self.eat_kw(&mut b, Keyword::Rename) {
                self.expect_kw(&mut b, Keyword::To)?;
                let name = self.parse_relation()?;
                b.push_node(name);
            }
        } else if self.is_oracle() {
            self.expect_one_of(&mut b, &["SCN", "TIMESTAMP"])?;
            let point = self.parse_expr()?;
            b.push_node(point);
        } else {
            return Err(self.err_expected("BEFORE"));
        }
        self.finish(b)
    }

    /// `PURGE TABLE t`, `PURGE INDEX i`, `PURGE RECYCLEBIN`, `PURGE DATABASE d`.
    pub(crate) fn parse_purge(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::PurgeStmt)?;
        self.expect_kw(&mut b, Keyword::Purge)?;
        match self.expect_one_of(&mut b, &["TABLE", "INDEX", "RECYCLEBIN", "DATABASE"])? {
            "RECYCLEBIN" => {}
            "DATABASE" => {
                let name = self.parse_identifier()?;
                b.push_node(name);
            }
            _ => {
                let name = self.parse_relation()?;
                b.push_node(name);
            }
        }
        self.finish(b)
    }

    /// MySQL `ANALYZE TABLE t, .. [UPDATE|DROP HISTOGRAM ON cols ..]`;
    /// Oracle `ANALYZE TABLE|INDEX name COMPUTE|ESTIMATE|DELETE STATISTICS ..`.
    pub(crate) fn parse_analyze(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::AnalyzeStmt)?;
        self.expect_kw(&mut b, Keyword::Analyze)?;
        if self.is_mysql() {
            self.eat_one_of(&mut b, &["NO_WRITE_TO_BINLOG", "LOCAL"]);
            self.expect_kw(&mut b, Keyword::Table)?;
            self.parse_comma_sep(&mut b, Self::parse_relation)?;
            if self.eat_one_of(&mut b, &["UPDATE", "DROP"]).is_some() {
                self.expect_word(&mut b, "HISTOGRAM")?;
                self.expect_kw(&mut b, Keyword::On)?;
                self.parse_comma_sep(&mut b, Self::parse_identifier)?;
                if self.eat_kw(&mut b, Keyword::With) {
                    self.expect_integer(&mut b)?;
                    self.expect_word(&mut b, "BUCKETS")?;
                }
            }
            return self.finish(b);
        }
        self.expect_one_of(&mut b, &["TABLE", "INDEX"])?;
        let name = self.parse_relation()?;
        b.push_node(name);
        if self.check_kw(Keyword::Partition) {
            self.take(&mut b);
            self.parse_paren_sep(&mut b, Self::parse_identifier)?;
        }
        self.expect_one_of(&mut b, &["COMPUTE", "ESTIMATE", "DELETE", "VALIDATE"])?;
        self.parse_rest_of_statement(&mut b)?;
        self.finish(b)
    }
}
