//! INSERT, REPLACE, UPDATE, DELETE, MERGE, LOAD DATA, and CALL.

use obparse_ast::{Keyword, NodeValue, ParseNode, RuleKind, TokenKind};

use super::{NodeBuilder, PResult, Parser};

const INSERT_OPTIONS: &[&str] = &["LOW_PRIORITY", "DELAYED", "HIGH_PRIORITY", "IGNORE"];
const UPDATE_OPTIONS: &[&str] = &["LOW_PRIORITY", "IGNORE"];
const DELETE_OPTIONS: &[&str] = &["LOW_PRIORITY", "QUICK", "IGNORE"];

impl Parser<'_> {
    // -----------------------------------------------------------------------
    // INSERT / REPLACE
    // -----------------------------------------------------------------------

    pub(crate) fn parse_insert(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::InsertStmt)?;
        let replace = self.current().is_word("REPLACE");
        self.take(&mut b);
        self.parse_hints(&mut b)?;
        if self.is_oracle() && (self.check_kw(Keyword::All) || self.check_word("FIRST")) {
            b.retag(RuleKind::MultiTableInsertStmt);
            self.parse_multi_table_insert_rest(&mut b)?;
            return self.finish(b);
        }
        if self.is_mysql() {
            while self.eat_one_of(&mut b, INSERT_OPTIONS).is_some() {}
        }
        if self.is_mysql() {
            self.eat_kw(&mut b, Keyword::Into);
        } else {
            self.expect_kw(&mut b, Keyword::Into)?;
        }
        let table = self.parse_relation()?;
        b.push_node(table);
        if self.is_mysql() && self.check_kw(Keyword::Partition) {
            let mut part = self.begin(RuleKind::UsePartition)?;
            self.take(&mut part);
            self.parse_paren_sep(&mut part, Self::parse_identifier)?;
            self.attach(&mut b, part)?;
        }
        if self.is_oracle() {
            if let Some(alias) = self.parse_opt_alias(false)? {
                b.push_node(alias);
            }
        }
        if self.peek() == TokenKind::LeftParen {
            // `INSERT INTO t (a, b) ..` versus `INSERT INTO t (SELECT ..)`
            if let Some(cols) = self.speculate(Self::parse_insert_column_list)? {
                b.push_node(cols);
            }
        }
        self.parse_insert_source(&mut b)?;
        if self.is_mysql() {
            if self.check_kw(Keyword::As) {
                let alias = self.parse_row_alias()?;
                b.push_node(alias);
            }
            if !replace && self.check_kw(Keyword::On) {
                let dup = self.parse_on_duplicate_key_update()?;
                b.push_node(dup);
            }
        } else if self.check_kw(Keyword::Returning) || self.check_kw(Keyword::Return) {
            let returning = self.parse_returning_clause()?;
            b.push_node(returning);
        }
        self.finish(b)
    }

    fn parse_insert_column_list(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::ColumnList)?;
        self.expect(&mut b, TokenKind::LeftParen)?;
        if self.peek() != TokenKind::RightParen {
            self.parse_comma_sep(&mut b, |p| p.parse_object_name(RuleKind::ColumnRef))?;
        }
        self.expect(&mut b, TokenKind::RightParen)?;
        self.finish(b)
    }

    /// `VALUES (..), (..)`, MySQL `SET a = 1, ..`, or a query.
    fn parse_insert_source(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        if self.check_kw(Keyword::Values) || (self.is_mysql() && self.check_kw(Keyword::Value)) {
            let values = self.parse_values_clause(true)?;
            b.push_node(values);
            return Ok(());
        }
        if self.is_mysql() && self.check_kw(Keyword::Set) {
            let set = self.parse_set_clause()?;
            b.push_node(set);
            return Ok(());
        }
        if self.check_kw(Keyword::Select)
            || self.check_kw(Keyword::With)
            || self.peek() == TokenKind::LeftParen
            || (self.is_mysql() && self.check_kw(Keyword::Table))
        {
            let query = self.parse_select_stmt()?;
            b.push_node(query);
            return Ok(());
        }
        if self.is_mysql() && self.word_at(0, "DEFAULT") && self.word_at(1, "VALUES") {
            self.take(b);
            self.take(b);
            return Ok(());
        }
        Err(self.err_expected("VALUES"))
    }

    fn parse_values_clause(&mut self, multi_row: bool) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::ValuesClause)?;
        self.take(&mut b);
        loop {
            let row = self.parse_values_row()?;
            b.push_node(row);
            if !multi_row || !self.eat(&mut b, TokenKind::Comma) {
                break;
            }
        }
        self.finish(b)
    }

    /// `( expr | DEFAULT, .. )`; MySQL also accepts `()`.
    fn parse_values_row(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::ValuesRow)?;
        if self.is_mysql() && self.check_kw(Keyword::Row) {
            self.take(&mut b);
        }
        self.expect(&mut b, TokenKind::LeftParen)?;
        if !(self.is_mysql() && self.peek() == TokenKind::RightParen) {
            self.parse_comma_sep(&mut b, Self::parse_expr)?;
        }
        self.expect(&mut b, TokenKind::RightParen)?;
        self.finish(b)
    }

    /// `AS new [(a, b)]`
    fn parse_row_alias(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::RowAlias)?;
        self.expect_kw(&mut b, Keyword::As)?;
        let name = self.parse_identifier()?;
        b.push_node(name);
        if self.peek() == TokenKind::LeftParen {
            let cols = self.parse_column_list()?;
            b.push_node(cols);
        }
        self.finish(b)
    }

    fn parse_on_duplicate_key_update(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::OnDuplicateKeyUpdate)?;
        self.expect_kw(&mut b, Keyword::On)?;
        self.expect_kw(&mut b, Keyword::Duplicate)?;
        self.expect_kw(&mut b, Keyword::Key)?;
        self.expect_kw(&mut b, Keyword::Update)?;
        self.parse_comma_sep(&mut b, Self::parse_assignment)?;
        self.finish(b)
    }

    /// `RETURNING expr, .. [INTO target, ..]`
    fn parse_returning_clause(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::ReturningClause)?;
        self.take(&mut b);
        let exprs = self.parse_expr_list()?;
        b.push_node(exprs);
        if self.eat_words(&mut b, &["BULK", "COLLECT"]) {
            self.expect_kw(&mut b, Keyword::Into)?;
            self.parse_comma_sep(&mut b, Self::parse_bind_target)?;
        } else if self.eat_kw(&mut b, Keyword::Into) {
            self.parse_comma_sep(&mut b, Self::parse_bind_target)?;
        }
        self.finish(b)
    }

    fn parse_bind_target(&mut self) -> PResult<ParseNode> {
        match self.peek() {
            TokenKind::NamedParam | TokenKind::QuestionMark => self.leaf(RuleKind::ParamMarker),
            _ => self.parse_object_name(RuleKind::ColumnRef),
        }
    }

    /// Oracle `INSERT ALL|FIRST ... subquery`.
    fn parse_multi_table_insert_rest(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        let first = self.check_word("FIRST");
        self.take(b);
        if self.check_kw(Keyword::When) {
            while self.check_kw(Keyword::When) {
                let mut cond = self.begin(RuleKind::ConditionalInsertClause)?;
                self.take(&mut cond);
                let test = self.parse_expr()?;
                cond.push_node(test);
                self.expect_kw(&mut cond, Keyword::Then)?;
                self.parse_insert_into_clauses(&mut cond)?;
                self.attach(b, cond)?;
            }
            if self.check_kw(Keyword::Else) {
                let mut other = self.begin(RuleKind::ConditionalInsertClause)?;
                self.take(&mut other);
                self.parse_insert_into_clauses(&mut other)?;
                self.attach(b, other)?;
            }
        } else if first {
            return Err(self.err_expected("WHEN"));
        } else {
            self.parse_insert_into_clauses(b)?;
        }
        let query = self.parse_select_stmt()?;
        b.push_node(query);
        Ok(())
    }

    fn parse_insert_into_clauses(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        if !self.check_kw(Keyword::Into) {
            return Err(self.err_expected("INTO"));
        }
        while self.check_kw(Keyword::Into) {
            let mut into = self.begin(RuleKind::InsertIntoClause)?;
            self.take(&mut into);
            let table = self.parse_relation()?;
            into.push_node(table);
            if let Some(alias) = self.parse_opt_alias(false)? {
                into.push_node(alias);
            }
            if self.peek() == TokenKind::LeftParen {
                let cols = self.parse_insert_column_list()?;
                into.push_node(cols);
            }
            if self.check_kw(Keyword::Values) {
                let values = self.parse_values_clause(false)?;
                into.push_node(values);
            }
            self.attach(b, into)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // UPDATE / DELETE
    // -----------------------------------------------------------------------

    /// `SET assignment, ..`
    fn parse_set_clause(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::SetClause)?;
        self.expect_kw(&mut b, Keyword::Set)?;
        self.parse_comma_sep(&mut b, Self::parse_assignment)?;
        self.finish(b)
    }

    /// `col = expr`; Oracle also `(a, b) = (subquery)`.
    pub(crate) fn parse_assignment(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::Assignment)?;
        if self.is_oracle() && self.peek() == TokenKind::LeftParen {
            let cols = self.parse_insert_column_list()?;
            b.push_node(cols);
            self.expect(&mut b, TokenKind::Eq)?;
            let query = self.parse_select_with_parens()?;
            b.push_node(query);
            return self.finish(b);
        }
        let col = self.parse_object_name(RuleKind::ColumnRef)?;
        b.push_node(col);
        self.expect(&mut b, TokenKind::Eq)?;
        let value = self.parse_expr()?;
        b.push_node(value);
        self.finish(b)
    }

    pub(crate) fn parse_update(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::UpdateStmt)?;
        self.expect_kw(&mut b, Keyword::Update)?;
        self.parse_hints(&mut b)?;
        if self.is_mysql() {
            while self.eat_one_of(&mut b, UPDATE_OPTIONS).is_some() {}
            self.parse_comma_sep(&mut b, Self::parse_table_reference)?;
        } else {
            let table = self.parse_table_factor()?;
            b.push_node(table);
        }
        let set = self.parse_set_clause()?;
        b.push_node(set);
        self.parse_dml_tail(&mut b)?;
        self.finish(b)
    }

    pub(crate) fn parse_delete(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::DeleteStmt)?;
        self.expect_kw(&mut b, Keyword::Delete)?;
        self.parse_hints(&mut b)?;
        if self.is_oracle() {
            self.eat_kw(&mut b, Keyword::From);
            let table = self.parse_table_factor()?;
            b.push_node(table);
            self.parse_dml_tail(&mut b)?;
            return self.finish(b);
        }
        while self.eat_one_of(&mut b, DELETE_OPTIONS).is_some() {}
        if !self.check_kw(Keyword::From) {
            // DELETE t1, t2 FROM ..
            self.parse_comma_sep(&mut b, Self::parse_delete_target)?;
        }
        self.expect_kw(&mut b, Keyword::From)?;
        if self.peek_nth(1) == TokenKind::Dot && self.peek_nth(2) == TokenKind::Star {
            // DELETE FROM t1.*, t2.* USING ..
            self.parse_comma_sep(&mut b, Self::parse_delete_target)?;
        } else {
            self.parse_comma_sep(&mut b, Self::parse_table_reference)?;
        }
        if self.eat_kw(&mut b, Keyword::Using) {
            self.parse_comma_sep(&mut b, Self::parse_table_reference)?;
        }
        self.parse_dml_tail(&mut b)?;
        self.finish(b)
    }

    /// `t` or `t.*` naming a multi-table DELETE target.
    fn parse_delete_target(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::RelationFactor)?;
        let name = self.push_name_parts(&mut b, 2)?;
        if self.peek() == TokenKind::Dot && self.peek_nth(1) == TokenKind::Star {
            self.take(&mut b);
            self.take(&mut b);
        }
        b.set_value(NodeValue::Name(name));
        self.finish(b)
    }

    /// `[WHERE ..]`, then MySQL `[ORDER BY ..] [LIMIT ..]` or Oracle `[RETURNING ..]`.
    fn parse_dml_tail(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        if self.check_kw(Keyword::Where) {
            let filter = self.parse_where_clause()?;
            b.push_node(filter);
        }
        if self.is_mysql() {
            if self.check_kw(Keyword::Order) {
                let order = self.parse_order_by_clause()?;
                b.push_node(order);
            }
            if self.check_kw(Keyword::Limit) {
                let limit = self.parse_limit_clause()?;
                b.push_node(limit);
            }
        } else if self.check_kw(Keyword::Returning) || self.check_kw(Keyword::Return) {
            let returning = self.parse_returning_clause()?;
            b.push_node(returning);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // MERGE
    // -----------------------------------------------------------------------

    pub(crate) fn parse_merge(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::MergeStmt)?;
        self.expect_kw(&mut b, Keyword::Merge)?;
        self.parse_hints(&mut b)?;
        self.expect_kw(&mut b, Keyword::Into)?;
        let target = self.parse_table_factor()?;
        b.push_node(target);
        self.expect_kw(&mut b, Keyword::Using)?;
        let source = self.parse_table_factor()?;
        b.push_node(source);
        self.expect_kw(&mut b, Keyword::On)?;
        let cond = self.parse_expr()?;
        b.push_node(cond);
        let mut matched = false;
        let mut not_matched = false;
        while self.check_kw(Keyword::When) {
            if !matched && self.word_at(1, "MATCHED") {
                let clause = self.parse_merge_matched()?;
                b.push_node(clause);
                matched = true;
            } else if !not_matched && self.word_at(1, "NOT") {
                let clause = self.parse_merge_not_matched()?;
                b.push_node(clause);
                not_matched = true;
            } else {
                return Err(self.err_expected("MATCHED"));
            }
        }
        if !matched && !not_matched {
            return Err(self.err_expected("WHEN"));
        }
        self.finish(b)
    }

    fn parse_merge_matched(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::MergeMatchedClause)?;
        self.expect_kw(&mut b, Keyword::When)?;
        self.expect_kw(&mut b, Keyword::Matched)?;
        self.expect_kw(&mut b, Keyword::Then)?;
        self.expect_kw(&mut b, Keyword::Update)?;
        let set = self.parse_set_clause()?;
        b.push_node(set);
        if self.check_kw(Keyword::Where) {
            let filter = self.parse_where_clause()?;
            b.push_node(filter);
        }
        if self.eat_kw(&mut b, Keyword::Delete) {
            let filter = self.parse_where_clause()?;
            b.push_node(filter);
        }
        self.finish(b)
    }

    fn parse_merge_not_matched(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::MergeNotMatchedClause)?;
        self.expect_kw(&mut b, Keyword::When)?;
        self.expect_kw(&mut b, Keyword::Not)?;
        self.expect_kw(&mut b, Keyword::Matched)?;
        self.expect_kw(&mut b, Keyword::Then)?;
        self.expect_kw(&mut b, Keyword::Insert)?;
        if self.peek() == TokenKind::LeftParen {
            let cols = self.parse_insert_column_list()?;
            b.push_node(cols);
        }
        if !self.check_kw(Keyword::Values) {
            return Err(self.err_expected("VALUES"));
        }
        let values = self.parse_values_clause(false)?;
        b.push_node(values);
        if self.check_kw(Keyword::Where) {
            let filter = self.parse_where_clause()?;
            b.push_node(filter);
        }
        self.finish(b)
    }

    // -----------------------------------------------------------------------
    // LOAD DATA
    // -----------------------------------------------------------------------

    pub(crate) fn parse_load_data(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::LoadDataStmt)?;
        self.expect_kw(&mut b, Keyword::Load)?;
        self.parse_hints(&mut b)?;
        self.expect_kw(&mut b, Keyword::Data)?;
        self.eat_one_of(&mut b, &["LOW_PRIORITY", "CONCURRENT"]);
        self.eat_kw(&mut b, Keyword::Local);
        self.expect_kw(&mut b, Keyword::Infile)?;
        self.expect(&mut b, TokenKind::String)?;
        self.eat_one_of(&mut b, &["REPLACE", "IGNORE"]);
        self.expect_kw(&mut b, Keyword::Into)?;
        self.expect_kw(&mut b, Keyword::Table)?;
        let table = self.parse_relation()?;
        b.push_node(table);
        if self.check_kw(Keyword::Partition) {
            let mut part = self.begin(RuleKind::UsePartition)?;
            self.take(&mut part);
            self.parse_paren_sep(&mut part, Self::parse_identifier)?;
            self.attach(&mut b, part)?;
        }
        if self.eat_words(&mut b, &["CHARACTER", "SET"]) || self.eat_kw(&mut b, Keyword::Charset) {
            self.parse_collation_name(&mut b)?;
        }
        self.parse_field_line_options(&mut b)?;
        if self.eat_kw(&mut b, Keyword::Ignore) {
            self.expect_integer(&mut b)?;
            self.expect_one_of(&mut b, &["LINES", "ROWS"])?;
        }
        if self.peek() == TokenKind::LeftParen {
            let mut cols = self.begin(RuleKind::ColumnList)?;
            self.parse_paren_sep(&mut cols, |p| {
                if p.peek() == TokenKind::UserVariable {
                    p.parse_variable()
                } else {
                    p.parse_identifier()
                }
            })?;
            self.attach(&mut b, cols)?;
        }
        if self.check_kw(Keyword::Set) {
            let set = self.parse_set_clause()?;
            b.push_node(set);
        }
        self.finish(b)
    }

    /// `FIELDS|COLUMNS [TERMINATED BY s] [[OPTIONALLY] ENCLOSED BY s] [ESCAPED BY s]`
    /// and `LINES [STARTING BY s] [TERMINATED BY s]`, shared with `INTO OUTFILE`.
    pub(crate) fn parse_field_line_options(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        if self.check_kw(Keyword::Fields) || self.check_kw(Keyword::Columns) {
            let mut opt = self.begin(RuleKind::LoadDataOption)?;
            self.take(&mut opt);
            let mut any = false;
            loop {
                if self.eat_kw(&mut opt, Keyword::Terminated) {
                    self.expect_kw(&mut opt, Keyword::By)?;
                    self.expect(&mut opt, TokenKind::String)?;
                } else if self.eat_kw(&mut opt, Keyword::Optionally) || self.check_kw(Keyword::Enclosed) {
                    self.expect_kw(&mut opt, Keyword::Enclosed)?;
                    self.expect_kw(&mut opt, Keyword::By)?;
                    self.expect(&mut opt, TokenKind::String)?;
                } else if self.eat_kw(&mut opt, Keyword::Escaped) {
                    self.expect_kw(&mut opt, Keyword::By)?;
                    self.expect(&mut opt, TokenKind::String)?;
                } else {
                    break;
                }
                any = true;
            }
            if !any {
                return Err(self.err_expected("TERMINATED"));
            }
            self.attach(b, opt)?;
        }
        if self.check_kw(Keyword::Lines) {
            let mut opt = self.begin(RuleKind::LoadDataOption)?;
            self.take(&mut opt);
            let mut any = false;
            loop {
                if self.eat_kw(&mut opt, Keyword::Starting) || self.eat_kw(&mut opt, Keyword::Terminated) {
                    self.expect_kw(&mut opt, Keyword::By)?;
                    self.expect(&mut opt, TokenKind::String)?;
                    any = true;
                } else {
                    break;
                }
            }
            if !any {
                return Err(self.err_expected("TERMINATED"));
            }
            self.attach(b, opt)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // CALL
    // -----------------------------------------------------------------------

    pub(crate) fn parse_call(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::CallStmt)?;
        self.expect_kw(&mut b, Keyword::Call)?;
        let mut call = self.begin(RuleKind::FunctionCall)?;
        let name = self.push_name_parts(&mut call, 3)?;
        call.set_value(NodeValue::Name(name));
        if self.peek() == TokenKind::LeftParen {
            self.parse_call_args(&mut call)?;
        }
        self.attach(&mut b, call)?;
        self.finish(b)
    }
}
