//! Transaction control and administrative statements.

use obparse_ast::{Keyword, ParseNode, RuleKind, TokenKind};

use super::{NodeBuilder, PResult, Parser};

const ISOLATION_LEVELS: &[&str] = &[
    "READ UNCOMMITTED",
    "READ COMMITTED",
    "REPEATABLE READ",
    "SERIALIZABLE",
];

/// Oracle `LOCK TABLE .. IN mode MODE`, longest phrase first.
const LOCK_MODES: &[&str] = &[
    "SHARE ROW EXCLUSIVE",
    "ROW SHARE",
    "ROW EXCLUSIVE",
    "SHARE UPDATE",
    "SHARE",
    "EXCLUSIVE",
];

/// What may follow `SHOW [FULL]`, longest phrase first.
const SHOW_TARGETS: &[&str] = &[
    "TABLE STATUS",
    "CHARACTER SET",
    "STORAGE ENGINES",
    "PROCEDURE STATUS",
    "FUNCTION STATUS",
    "CHARSET",
    "COLLATION",
    "DATABASES",
    "SCHEMAS",
    "TABLES",
    "COLUMNS",
    "FIELDS",
    "INDEXES",
    "INDEX",
    "KEYS",
    "VARIABLES",
    "STATUS",
    "WARNINGS",
    "ERRORS",
    "PROCESSLIST",
    "GRANTS",
    "ENGINES",
    "PARAMETERS",
    "PRIVILEGES",
    "TRACE",
    "TABLEGROUPS",
    "RECYCLEBIN",
    "TRIGGERS",
    "EVENTS",
    "PLUGINS",
];

const SHOW_CREATE_TARGETS: &[&str] = &[
    "TABLE",
    "VIEW",
    "DATABASE",
    "SCHEMA",
    "PROCEDURE",
    "FUNCTION",
    "TRIGGER",
    "TABLEGROUP",
];

const EXPLAIN_FLAGS: &[&str] = &[
    "EXTENDED_NOADDR",
    "EXTENDED",
    "PARTITIONS",
    "BASIC",
    "OUTLINE",
    "ANALYZE",
];

impl Parser<'_> {
    // -----------------------------------------------------------------------
    // Transactions
    // -----------------------------------------------------------------------

    /// `BEGIN [WORK]` or `START TRANSACTION [characteristic, ..]`.
    pub(crate) fn parse_begin(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::BeginStmt)?;
        if self.eat_kw(&mut b, Keyword::Begin) {
            self.eat_word(&mut b, "WORK");
            return self.finish(b);
        }
        self.expect_word(&mut b, "START")?;
        self.expect_word(&mut b, "TRANSACTION")?;
        self.parse_repeated(
            &mut b,
            |p| p.parse_transaction_characteristic(true),
            Some(TokenKind::Comma),
        )?;
        self.finish(b)
    }

    fn parse_transaction_characteristic(&mut self, at_start: bool) -> PResult<Option<ParseNode>> {
        let opens = self.word_at(0, "ISOLATION")
            || (self.word_at(0, "READ") && (self.word_at(1, "ONLY") || self.word_at(1, "WRITE")))
            || (at_start && self.word_at(0, "WITH") && self.word_at(1, "CONSISTENT"))
            || (!at_start && self.is_oracle() && self.word_at(0, "NAME"));
        if !opens {
            return Ok(None);
        }
        let mut b = self.begin(RuleKind::TransactionCharacteristic)?;
        if self.eat_words(&mut b, &["ISOLATION", "LEVEL"]) {
            if self.eat_phrase(&mut b, ISOLATION_LEVELS).is_none() {
                return Err(self.err_expected("isolation level"));
            }
        } else if self.eat_word(&mut b, "NAME") {
            self.expect(&mut b, TokenKind::String)?;
        } else if self.eat_kw(&mut b, Keyword::Read) {
            self.expect_one_of(&mut b, &["ONLY", "WRITE"])?;
        } else {
            self.expect_kw(&mut b, Keyword::With)?;
            self.expect_word(&mut b, "CONSISTENT")?;
            self.expect_word(&mut b, "SNAPSHOT")?;
        }
        self.finish(b).map(Some)
    }

    /// `COMMIT [WORK]`, MySQL `[AND [NO] CHAIN] [[NO] RELEASE]`, Oracle `[COMMENT '..']`.
    pub(crate) fn parse_commit(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::CommitStmt)?;
        self.expect_kw(&mut b, Keyword::Commit)?;
        self.eat_word(&mut b, "WORK");
        if self.is_mysql() {
            self.parse_completion_type(&mut b)?;
        } else if self.eat_kw(&mut b, Keyword::Comment) {
            self.expect(&mut b, TokenKind::String)?;
        }
        self.finish(b)
    }

    fn parse_completion_type(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        if self.eat_word(b, "AND") {
            self.eat_kw(b, Keyword::No);
            self.expect_word(b, "CHAIN")?;
        }
        if !self.eat_words(b, &["NO", "RELEASE"]) {
            self.eat_word(b, "RELEASE");
        }
        Ok(())
    }

    /// `ROLLBACK [WORK] [TO [SAVEPOINT] sp]`
    pub(crate) fn parse_rollback(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::RollbackStmt)?;
        self.expect_word(&mut b, "ROLLBACK")?;
        self.eat_word(&mut b, "WORK");
        if self.eat_kw(&mut b, Keyword::To) {
            self.eat_word(&mut b, "SAVEPOINT");
            let name = self.parse_identifier()?;
            b.push_node(name);
        } else if self.is_mysql() {
            self.parse_completion_type(&mut b)?;
        }
        self.finish(b)
    }

    pub(crate) fn parse_savepoint(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::SavepointStmt)?;
        self.expect_word(&mut b, "SAVEPOINT")?;
        let name = self.parse_identifier()?;
        b.push_node(name);
        self.finish(b)
    }

    pub(crate) fn parse_release_savepoint(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::ReleaseSavepointStmt)?;
        self.expect_word(&mut b, "RELEASE")?;
        self.expect_word(&mut b, "SAVEPOINT")?;
        let name = self.parse_identifier()?;
        b.push_node(name);
        self.finish(b)
    }

    /// `XA START|BEGIN|END|PREPARE|COMMIT|ROLLBACK xid ..` and `XA RECOVER`.
    pub(crate) fn parse_xa(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::XaStmt)?;
        self.expect_word(&mut b, "XA")?;
        let verb = self.expect_one_of(
            &mut b,
            &["START", "BEGIN", "END", "PREPARE", "COMMIT", "ROLLBACK", "RECOVER"],
        )?;
        if verb == "RECOVER" {
            self.eat_words(&mut b, &["CONVERT", "XID"]);
            return self.finish(b);
        }
        let xid = self.parse_xid()?;
        b.push_node(xid);
        match verb {
            "START" | "BEGIN" => {
                self.eat_one_of(&mut b, &["JOIN", "RESUME"]);
            }
            "END" => {
                if self.eat_word(&mut b, "SUSPEND") {
                    self.eat_words(&mut b, &["FOR", "MIGRATE"]);
                }
            }
            "COMMIT" => {
                self.eat_words(&mut b, &["ONE", "PHASE"]);
            }
            _ => {}
        }
        self.finish(b)
    }

    /// `gtrid [, bqual [, format_id]]`
    fn parse_xid(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::XidSpec)?;
        let gtrid = self.parse_xid_part()?;
        b.push_node(gtrid);
        if self.eat(&mut b, TokenKind::Comma) {
            let bqual = self.parse_xid_part()?;
            b.push_node(bqual);
            if self.eat(&mut b, TokenKind::Comma) {
                self.expect_integer(&mut b)?;
            }
        }
        self.finish(b)
    }

    fn parse_xid_part(&mut self) -> PResult<ParseNode> {
        match self.peek() {
            TokenKind::String | TokenKind::HexString | TokenKind::BitString | TokenKind::Integer => {
                self.parse_bit_expr()
            }
            _ => Err(self.err_expected("string")),
        }
    }

    /// MySQL `LOCK TABLES t [AS a] READ [LOCAL] | [LOW_PRIORITY] WRITE, ..`;
    /// Oracle `LOCK TABLE t, .. IN mode MODE [NOWAIT | WAIT n]`.
    pub(crate) fn parse_lock(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::LockTablesStmt)?;
        self.expect_word(&mut b, "LOCK")?;
        if self.is_mysql() {
            self.expect_one_of(&mut b, &["TABLES", "TABLE"])?;
            self.parse_comma_sep(&mut b, Self::parse_lock_table_item)?;
            return self.finish(b);
        }
        self.expect_kw(&mut b, Keyword::Table)?;
        self.parse_comma_sep(&mut b, Self::parse_relation)?;
        self.expect_kw(&mut b, Keyword::In)?;
        if self.eat_phrase(&mut b, LOCK_MODES).is_none() {
            return Err(self.err_expected("lock mode"));
        }
        self.expect_kw(&mut b, Keyword::Mode)?;
        if !self.eat_kw(&mut b, Keyword::Nowait) && self.eat_kw(&mut b, Keyword::Wait) {
            self.expect_integer(&mut b)?;
        }
        self.finish(b)
    }

    fn parse_lock_table_item(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::LockTableItem)?;
        let table = self.parse_relation()?;
        b.push_node(table);
        if !self.check_word("READ") && !self.check_word("WRITE") && !self.check_word("LOW_PRIORITY") {
            if let Some(alias) = self.parse_opt_alias(false)? {
                b.push_node(alias);
            }
        }
        if self.eat_kw(&mut b, Keyword::Read) {
            self.eat_kw(&mut b, Keyword::Local);
        } else {
            self.eat_word(&mut b, "LOW_PRIORITY");
            self.expect_word(&mut b, "WRITE")?;
        }
        self.finish(b)
    }

    pub(crate) fn parse_unlock(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::UnlockTablesStmt)?;
        self.expect_word(&mut b, "UNLOCK")?;
        self.expect_one_of(&mut b, &["TABLES", "TABLE"])?;
        self.finish(b)
    }

    // -----------------------------------------------------------------------
    // SET
    // -----------------------------------------------------------------------

    pub(crate) fn parse_set(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::VariableSetStmt)?;
        self.expect_kw(&mut b, Keyword::Set)?;
        let scoped_transaction = ["GLOBAL", "SESSION", "LOCAL"].iter().any(|w| self.word_at(0, w))
            && self.word_at(1, "TRANSACTION");
        if self.word_at(0, "TRANSACTION") || (self.is_mysql() && scoped_transaction) {
            b.retag(RuleKind::SetTransactionStmt);
            if scoped_transaction {
                self.take(&mut b);
            }
            self.expect_word(&mut b, "TRANSACTION")?;
            let count = self.parse_repeated(
                &mut b,
                |p| p.parse_transaction_characteristic(false),
                Some(TokenKind::Comma),
            )?;
            if count == 0 {
                return Err(self.err_expected("ISOLATION"));
            }
            return self.finish(b);
        }
        if self.is_mysql() && self.word_at(0, "NAMES") {
            b.retag(RuleKind::SetNamesStmt);
            self.take(&mut b);
            if !self.eat_kw(&mut b, Keyword::Default) {
                self.parse_charset_name(&mut b)?;
                if self.eat_kw(&mut b, Keyword::Collate) {
                    self.parse_collation_name(&mut b)?;
                }
            }
            return self.finish(b);
        }
        if self.is_mysql() && (self.word_at(0, "CHARSET") || (self.word_at(0, "CHARACTER") && self.word_at(1, "SET"))) {
            b.retag(RuleKind::SetNamesStmt);
            if !self.eat_word(&mut b, "CHARSET") {
                self.take(&mut b);
                self.take(&mut b);
            }
            if !self.eat_kw(&mut b, Keyword::Default) {
                self.parse_charset_name(&mut b)?;
            }
            return self.finish(b);
        }
        if self.is_mysql() && self.word_at(0, "PASSWORD") {
            b.retag(RuleKind::SetPasswordStmt);
            self.take(&mut b);
            if self.eat_kw(&mut b, Keyword::For) {
                let user = self.parse_user_name()?;
                b.push_node(user);
            }
            self.expect(&mut b, TokenKind::Eq)?;
            if self.eat_word(&mut b, "PASSWORD") {
                self.expect(&mut b, TokenKind::LeftParen)?;
                self.expect(&mut b, TokenKind::String)?;
                self.expect(&mut b, TokenKind::RightParen)?;
            } else {
                self.expect(&mut b, TokenKind::String)?;
            }
            return self.finish(b);
        }
        self.parse_comma_sep(&mut b, Self::parse_var_assignment)?;
        self.finish(b)
    }

    fn parse_charset_name(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        match self.peek() {
            TokenKind::String | TokenKind::QuotedIdent => {
                self.take(b);
                Ok(())
            }
            k if k.is_word() => {
                self.take(b);
                Ok(())
            }
            _ => Err(self.err_expected("character set name")),
        }
    }

    /// `[GLOBAL|SESSION|LOCAL|PERSIST] name = value`, `@@scope.name = value`,
    /// `@v := value`.
    fn parse_var_assignment(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::VarAssignment)?;
        match self.peek() {
            TokenKind::UserVariable | TokenKind::SystemVariable => {
                let var = self.parse_variable()?;
                b.push_node(var);
            }
            _ => {
                if self.is_mysql() {
                    self.eat_one_of(&mut b, &["GLOBAL", "SESSION", "LOCAL", "PERSIST"]);
                } else {
                    self.eat_one_of(&mut b, &["GLOBAL", "SESSION"]);
                }
                let name = self.parse_any_word()?;
                b.push_node(name);
            }
        }
        if !self.eat(&mut b, TokenKind::Eq) {
            if self.is_mysql() {
                self.expect(&mut b, TokenKind::Assign)?;
            } else {
                return Err(self.err_expected("'='"));
            }
        }
        // `ON`, `DEFAULT` and similar reserved words are accepted as bare values.
        let bare = self.peek().is_word()
            && !self.is_identifier(self.current())
            && matches!(self.peek_nth(1), TokenKind::Comma | TokenKind::Semicolon | TokenKind::Eof);
        if bare {
            self.take(&mut b);
        } else {
            let value = self.parse_expr()?;
            b.push_node(value);
        }
        self.finish(b)
    }

    // -----------------------------------------------------------------------
    // SHOW
    // -----------------------------------------------------------------------

    pub(crate) fn parse_show(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::ShowStmt)?;
        self.expect_word(&mut b, "SHOW")?;
        if self.eat_kw(&mut b, Keyword::Create) {
            let what = self.expect_one_of(&mut b, SHOW_CREATE_TARGETS)?;
            if matches!(what, "DATABASE" | "SCHEMA" | "TABLEGROUP") {
                self.eat_words(&mut b, &["IF", "NOT", "EXISTS"]);
                let name = self.parse_identifier()?;
                b.push_node(name);
            } else {
                let name = self.parse_relation()?;
                b.push_node(name);
            }
            return self.finish(b);
        }
        self.eat_word(&mut b, "FULL");
        self.eat_one_of(&mut b, &["GLOBAL", "SESSION"]);
        let Some(target) = self.eat_phrase(&mut b, SHOW_TARGETS) else {
            return Err(self.err_expected("TABLES"));
        };
        match target {
            "COLUMNS" | "FIELDS" | "INDEX" | "INDEXES" | "KEYS" => {
                self.expect_one_of(&mut b, &["FROM", "IN"])?;
                let table = self.parse_relation()?;
                b.push_node(table);
                self.parse_show_database(&mut b)?;
            }
            "TABLES" | "TABLE STATUS" | "TRIGGERS" | "EVENTS" => self.parse_show_database(&mut b)?,
            "GRANTS" => {
                if self.eat_kw(&mut b, Keyword::For) {
                    let user = self.parse_user_name()?;
                    b.push_node(user);
                }
            }
            "WARNINGS" | "ERRORS" => {
                if self.check_kw(Keyword::Limit) {
                    let limit = self.parse_limit_clause()?;
                    b.push_node(limit);
                }
                return self.finish(b);
            }
            _ => {}
        }
        if self.check_kw(Keyword::Like) || self.check_kw(Keyword::Where) {
            let filter = self.parse_show_filter()?;
            b.push_node(filter);
        }
        self.finish(b)
    }

    fn parse_show_database(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        if self.eat_one_of(b, &["FROM", "IN"]).is_some() {
            let db = self.parse_identifier()?;
            b.push_node(db);
        }
        Ok(())
    }

    /// `LIKE 'pattern'` or `WHERE expr`.
    fn parse_show_filter(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::ShowFilter)?;
        if self.eat_kw(&mut b, Keyword::Like) {
            let pattern = self.parse_string_literal()?;
            b.push_node(pattern);
        } else {
            self.expect_kw(&mut b, Keyword::Where)?;
            let cond = self.parse_expr()?;
            b.push_node(cond);
        }
        self.finish(b)
    }

    // -----------------------------------------------------------------------
    // EXPLAIN / DESCRIBE
    // -----------------------------------------------------------------------

    /// `EXPLAIN [options] statement`; MySQL `EXPLAIN table` describes the table.
    pub(crate) fn parse_explain(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::ExplainStmt)?;
        self.take(&mut b);
        self.parse_repeated(&mut b, Self::parse_explain_option, None)?;
        if self.is_oracle() && self.eat_word(&mut b, "PLAN") {
            if self.eat_kw(&mut b, Keyword::Set) {
                self.expect_word(&mut b, "STATEMENT_ID")?;
                self.expect(&mut b, TokenKind::Eq)?;
                self.expect(&mut b, TokenKind::String)?;
            }
            if self.eat_kw(&mut b, Keyword::Into) {
                let table = self.parse_relation()?;
                b.push_node(table);
            }
            self.expect_kw(&mut b, Keyword::For)?;
        }
        if self.is_mysql() && !self.starts_explainable() && self.check_ident() {
            b.retag(RuleKind::DescribeStmt);
            self.parse_describe_rest(&mut b)?;
            return self.finish(b);
        }
        let stmt = self.parse_explainable()?;
        b.push_node(stmt);
        self.finish(b)
    }

    fn parse_explain_option(&mut self) -> PResult<Option<ParseNode>> {
        if self.word_at(0, "FORMAT") && self.peek_nth(1) == TokenKind::Eq {
            let mut b = self.begin(RuleKind::ExplainOption)?;
            self.take(&mut b);
            self.take(&mut b);
            self.expect_one_of(&mut b, &["TRADITIONAL", "JSON", "TREE"])?;
            return self.finish(b).map(Some);
        }
        // A flag word directly followed by `;` is a table name, not an option.
        let flag = EXPLAIN_FLAGS.iter().any(|w| self.word_at(0, w))
            && !matches!(self.peek_nth(1), TokenKind::Semicolon | TokenKind::Eof);
        if !flag {
            return Ok(None);
        }
        self.leaf(RuleKind::ExplainOption).map(Some)
    }

    fn starts_explainable(&self) -> bool {
        if self.peek() == TokenKind::LeftParen {
            return true;
        }
        let mut words = vec!["SELECT", "WITH", "INSERT", "UPDATE", "DELETE"];
        if self.is_mysql() {
            words.extend(["REPLACE", "TABLE", "VALUES"]);
        } else {
            words.push("MERGE");
        }
        words.iter().any(|w| self.word_at(0, w))
    }

    fn parse_explainable(&mut self) -> PResult<ParseNode> {
        let word = self.current().text.to_ascii_uppercase();
        match word.as_str() {
            _ if self.peek() == TokenKind::LeftParen => self.parse_select_stmt(),
            "SELECT" | "WITH" => self.parse_select_stmt(),
            "TABLE" | "VALUES" if self.is_mysql() => self.parse_select_stmt(),
            "INSERT" => self.parse_insert(),
            "REPLACE" if self.is_mysql() => self.parse_insert(),
            "UPDATE" => self.parse_update(),
            "DELETE" => self.parse_delete(),
            "MERGE" if self.is_oracle() => self.parse_merge(),
            _ => Err(self.err_expected("SELECT")),
        }
    }

    /// `DESC|DESCRIBE table [column | 'pattern']`, or an EXPLAIN spelled DESC.
    pub(crate) fn parse_describe(&mut self) -> PResult<ParseNode> {
        let explain = {
            let next = self.nth(1);
            next.kind == TokenKind::LeftParen
                || ["SELECT", "WITH", "INSERT", "UPDATE", "DELETE", "REPLACE", "MERGE"]
                    .iter()
                    .any(|w| next.is_word(w))
                || (next.is_word("FORMAT") && self.peek_nth(2) == TokenKind::Eq)
                || (EXPLAIN_FLAGS.iter().any(|w| next.is_word(w))
                    && !matches!(self.peek_nth(2), TokenKind::Semicolon | TokenKind::Eof))
        };
        if explain {
            return self.parse_explain();
        }
        let mut b = self.begin(RuleKind::DescribeStmt)?;
        self.take(&mut b);
        self.parse_describe_rest(&mut b)?;
        self.finish(b)
    }

    fn parse_describe_rest(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        let table = self.parse_relation()?;
        b.push_node(table);
        match self.peek() {
            TokenKind::String => {
                let pattern = self.parse_string_literal()?;
                b.push_node(pattern);
            }
            _ if self.check_ident() => {
                let column = self.parse_identifier()?;
                b.push_node(column);
            }
            _ => {}
        }
        Ok(())
    }

    pub(crate) fn parse_use(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::UseDatabaseStmt)?;
        self.expect_word(&mut b, "USE")?;
        let db = self.parse_identifier()?;
        b.push_node(db);
        self.finish(b)
    }

    // -----------------------------------------------------------------------
    // Privileges
    // -----------------------------------------------------------------------

    /// `GRANT privs ON level TO users [WITH GRANT OPTION]` or
    /// `GRANT roles|system privs TO users [WITH ADMIN OPTION]`.
    pub(crate) fn parse_grant(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::GrantStmt)?;
        self.expect_kw(&mut b, Keyword::Grant)?;
        let privileges = self.parse_privilege_list()?;
        b.push_node(privileges);
        let on_object = self.eat_kw(&mut b, Keyword::On);
        if on_object {
            let level = self.parse_privilege_level()?;
            b.push_node(level);
        }
        self.expect_kw(&mut b, Keyword::To)?;
        if self.is_mysql() {
            self.parse_comma_sep(&mut b, Self::parse_user_spec)?;
        } else {
            self.parse_comma_sep(&mut b, Self::parse_user_name)?;
        }
        if self.eat_kw(&mut b, Keyword::With) {
            if on_object {
                self.expect_kw(&mut b, Keyword::Grant)?;
            } else {
                self.expect_word(&mut b, "ADMIN")?;
            }
            self.expect_kw(&mut b, Keyword::Option)?;
        }
        self.finish(b)
    }

    /// `REVOKE privs [ON level] FROM users`.
    pub(crate) fn parse_revoke(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::RevokeStmt)?;
        self.expect_word(&mut b, "REVOKE")?;
        let privileges = self.parse_privilege_list()?;
        b.push_node(privileges);
        if self.eat_kw(&mut b, Keyword::On) {
            let level = self.parse_privilege_level()?;
            b.push_node(level);
        }
        self.expect_kw(&mut b, Keyword::From)?;
        self.parse_comma_sep(&mut b, Self::parse_user_name)?;
        self.finish(b)
    }

    fn parse_privilege_list(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::PrivilegeList)?;
        self.parse_comma_sep(&mut b, Self::parse_privilege)?;
        self.finish(b)
    }

    /// One privilege or role: a run of words such as `SELECT`, `ALL PRIVILEGES`,
    /// `CREATE ANY TABLE`, optionally followed by a column list.
    fn parse_privilege(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::Privilege)?;
        let at_word = |p: &Self| {
            let tok = p.current();
            (tok.kind.is_word() || tok.kind == TokenKind::QuotedIdent)
                && !["ON", "TO", "FROM"].iter().any(|w| tok.is_word(w))
        };
        if !at_word(self) {
            return Err(self.err_expected("privilege"));
        }
        while at_word(self) {
            self.take(&mut b);
        }
        if self.peek() == TokenKind::LeftParen {
            let cols = self.parse_column_list()?;
            b.push_node(cols);
        }
        self.finish(b)
    }

    /// `*`, `*.*`, `db.*`, `db.tbl`, `tbl`, optionally typed by TABLE|FUNCTION|PROCEDURE.
    fn parse_privilege_level(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::PrivilegeLevel)?;
        if self.is_mysql() {
            self.eat_one_of(&mut b, &["TABLE", "FUNCTION", "PROCEDURE"]);
        }
        if self.eat(&mut b, TokenKind::Star) {
            if self.eat(&mut b, TokenKind::Dot) {
                self.expect(&mut b, TokenKind::Star)?;
            }
            return self.finish(b);
        }
        let first = self.parse_identifier()?;
        b.push_node(first);
        if self.eat(&mut b, TokenKind::Dot) && !self.eat(&mut b, TokenKind::Star) {
            let second = self.parse_any_word()?;
            b.push_node(second);
        }
        self.finish(b)
    }

    // -----------------------------------------------------------------------
    // Sessions and prepared statements
    // -----------------------------------------------------------------------

    /// `KILL [CONNECTION | QUERY] id`
    pub(crate) fn parse_kill(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::KillStmt)?;
        self.expect_word(&mut b, "KILL")?;
        self.eat_one_of(&mut b, &["CONNECTION", "QUERY"]);
        let id = self.parse_bit_expr()?;
        b.push_node(id);
        self.finish(b)
    }

    /// `PREPARE name FROM 'text' | @var`
    pub(crate) fn parse_prepare(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::PrepareStmt)?;
        self.expect_word(&mut b, "PREPARE")?;
        let name = self.parse_identifier()?;
        b.push_node(name);
        self.expect_kw(&mut b, Keyword::From)?;
        let text = match self.peek() {
            TokenKind::UserVariable => self.parse_variable()?,
            _ => self.parse_string_literal()?,
        };
        b.push_node(text);
        self.finish(b)
    }

    /// `EXECUTE name [USING @a, ..]`
    pub(crate) fn parse_execute(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::ExecuteStmt)?;
        self.expect_word(&mut b, "EXECUTE")?;
        let name = self.parse_identifier()?;
        b.push_node(name);
        if self.eat_kw(&mut b, Keyword::Using) {
            self.parse_comma_sep(&mut b, |p| {
                if p.peek() == TokenKind::UserVariable {
                    p.parse_variable()
                } else {
                    Err(p.err_expected("user variable"))
                }
            })?;
        }
        self.finish(b)
    }

    /// `DEALLOCATE PREPARE name`
    pub(crate) fn parse_deallocate(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::DeallocatePrepareStmt)?;
        self.expect_word(&mut b, "DEALLOCATE")?;
        self.expect_word(&mut b, "PREPARE")?;
        let name = self.parse_identifier()?;
        b.push_node(name);
        self.finish(b)
    }

    /// `HELP 'topic'`
    pub(crate) fn parse_help(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::HelpStmt)?;
        self.expect_word(&mut b, "HELP")?;
        let topic = self.parse_string_literal()?;
        b.push_node(topic);
        self.finish(b)
    }
}
