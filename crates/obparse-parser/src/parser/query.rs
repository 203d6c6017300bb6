//! SELECT statements, set operations, and table references.

use obparse_ast::{
    Identifier, JoinKind, Keyword, NodeValue, ParseNode, QualifiedName, RuleKind, SetOperation,
    SetOperator, TokenKind,
};

use super::{NodeBuilder, PResult, Parser};
use crate::keywords::DialectFeatures;
use crate::literal;

/// Unreserved words that still end an expression instead of becoming its
/// implicit alias.
const ALIAS_STOP_WORDS: &[&str] = &[
    "JOIN",
    "INNER",
    "LEFT",
    "RIGHT",
    "FULL",
    "CROSS",
    "NATURAL",
    "OUTER",
    "STRAIGHT_JOIN",
    "USING",
    "ON",
    "RETURNING",
    "RETURN",
    "OFFSET",
    "FETCH",
    "SAMPLE",
    "PARTITION",
    "SUBPARTITION",
    "CONNECT",
    "START",
    "LOG",
    "WINDOW",
    "USE",
    "FORCE",
    "IGNORE",
    "LIMIT",
    "LOCK",
    "UNION",
    "INTERSECT",
    "EXCEPT",
    "MINUS",
    "SET",
    "VALUES",
    "WHEN",
];

const SELECT_OPTIONS_MYSQL: &[&str] = &[
    "ALL",
    "DISTINCT",
    "DISTINCTROW",
    "HIGH_PRIORITY",
    "STRAIGHT_JOIN",
    "SQL_SMALL_RESULT",
    "SQL_BIG_RESULT",
    "SQL_BUFFER_RESULT",
    "SQL_NO_CACHE",
    "SQL_CACHE",
    "SQL_CALC_FOUND_ROWS",
];

const SELECT_OPTIONS_ORACLE: &[&str] = &["ALL", "DISTINCT", "UNIQUE"];

impl Parser<'_> {
    // -----------------------------------------------------------------------
    // Query expressions
    // -----------------------------------------------------------------------

    pub(crate) fn parse_select_stmt(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::SelectStmt)?;
        self.parse_query_into(&mut b)?;
        self.finish(b)
    }

    /// `[WITH ..] set_expr [ORDER BY ..] [LIMIT | FETCH ..] [FOR UPDATE ..]`
    fn parse_query_into(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        if self.check_kw(Keyword::With) {
            let with = self.parse_with_clause()?;
            b.push_node(with);
        }
        let body = self.parse_set_expr(0)?;
        b.push_node(body);
        if self.check_kw(Keyword::Order) {
            let order = self.parse_order_by_clause()?;
            b.push_node(order);
        }
        if self.is_mysql() && self.check_kw(Keyword::Limit) {
            let limit = self.parse_limit_clause()?;
            b.push_node(limit);
        }
        if self.has(DialectFeatures::FETCH_CLAUSE)
            && (self.check_kw(Keyword::Offset) || self.check_kw(Keyword::Fetch))
        {
            let fetch = self.parse_fetch_clause()?;
            b.push_node(fetch);
        }
        if self.at_locking_clause() {
            let locking = self.parse_locking_clause()?;
            b.push_node(locking);
        }
        if self.is_mysql() && self.check_kw(Keyword::Into) {
            let into = self.parse_into_clause()?;
            b.push_node(into);
        }
        Ok(())
    }

    fn parse_with_clause(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::WithClause)?;
        self.expect_kw(&mut b, Keyword::With)?;
        self.eat_kw(&mut b, Keyword::Recursive);
        self.parse_comma_sep(&mut b, Self::parse_common_table_expr)?;
        self.finish(b)
    }

    fn parse_common_table_expr(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::CommonTableExpr)?;
        let name = self.parse_identifier()?;
        b.push_node(name);
        if self.peek() == TokenKind::LeftParen {
            let cols = self.parse_column_list()?;
            b.push_node(cols);
        }
        self.expect_kw(&mut b, Keyword::As)?;
        let body = self.parse_select_with_parens()?;
        b.push_node(body);
        self.finish(b)
    }

    fn peek_set_op(&self) -> Option<(SetOperator, u8)> {
        let tok = self.current();
        let intersect_prec = if self.has(DialectFeatures::INTERSECT_BINDS_TIGHTER) {
            2
        } else {
            1
        };
        if tok.is_word("UNION") {
            Some((SetOperator::Union, 1))
        } else if tok.is_word("INTERSECT") {
            Some((SetOperator::Intersect, intersect_prec))
        } else if self.is_mysql() && tok.is_word("EXCEPT") {
            Some((SetOperator::Except, 1))
        } else if self.is_oracle() && tok.is_word("MINUS") {
            Some((SetOperator::Minus, 1))
        } else {
            None
        }
    }

    fn parse_set_expr(&mut self, min_prec: u8) -> PResult<ParseNode> {
        let mut lhs = self.parse_query_primary()?;
        while let Some((op, prec)) = self.peek_set_op() {
            if prec < min_prec {
                break;
            }
            let mut b = self.begin_with(RuleKind::SetExpression, lhs)?;
            self.take(&mut b);
            let all = self.eat_kw(&mut b, Keyword::All);
            if !all {
                self.eat_kw(&mut b, Keyword::Distinct);
            }
            let rhs = self.parse_set_expr(prec + 1)?;
            b.push_node(rhs);
            b.set_value(NodeValue::SetOp(SetOperation { op, all }));
            lhs = self.finish(b)?;
        }
        Ok(lhs)
    }

    fn parse_query_primary(&mut self) -> PResult<ParseNode> {
        if self.peek() == TokenKind::LeftParen {
            return self.parse_select_with_parens();
        }
        if self.check_kw(Keyword::Select) {
            return self.parse_simple_select();
        }
        if self.is_mysql() && self.check_kw(Keyword::Values) {
            return self.parse_table_value_constructor();
        }
        if self.is_mysql() && self.check_kw(Keyword::Table) {
            let mut b = self.begin(RuleKind::SimpleSelect)?;
            self.take(&mut b);
            let rel = self.parse_relation()?;
            b.push_node(rel);
            return self.finish(b);
        }
        Err(self.err_expected("SELECT"))
    }

    /// `( query )`
    pub(crate) fn parse_select_with_parens(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::SelectWithParens)?;
        self.expect(&mut b, TokenKind::LeftParen)?;
        self.parse_query_into(&mut b)?;
        self.expect(&mut b, TokenKind::RightParen)?;
        self.finish(b)
    }

    /// `VALUES ROW(..), ROW(..)`
    fn parse_table_value_constructor(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::TableValueConstructor)?;
        self.expect_kw(&mut b, Keyword::Values)?;
        loop {
            if !self.check_kw(Keyword::Row) {
                return Err(self.err_expected("ROW"));
            }
            let row = self.parse_row_constructor()?;
            b.push_node(row);
            if !self.eat(&mut b, TokenKind::Comma) {
                break;
            }
        }
        self.finish(b)
    }

    fn parse_simple_select(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::SimpleSelect)?;
        self.expect_kw(&mut b, Keyword::Select)?;
        self.parse_hints(&mut b)?;
        let options = if self.is_mysql() {
            SELECT_OPTIONS_MYSQL
        } else {
            SELECT_OPTIONS_ORACLE
        };
        while self.eat_one_of(&mut b, options).is_some() {}
        let projection = self.parse_projection()?;
        b.push_node(projection);
        if self.check_kw(Keyword::Into) {
            let into = self.parse_into_clause()?;
            b.push_node(into);
        }
        if self.check_kw(Keyword::From) {
            let from = self.parse_from_clause()?;
            b.push_node(from);
        }
        if self.check_kw(Keyword::Where) {
            let filter = self.parse_where_clause()?;
            b.push_node(filter);
        }
        if self.is_oracle() && (self.check_kw(Keyword::Start) || self.check_kw(Keyword::Connect)) {
            let hierarchy = self.parse_hierarchical_clause()?;
            b.push_node(hierarchy);
        }
        if self.check_kw(Keyword::Group) {
            let group = self.parse_group_by_clause()?;
            b.push_node(group);
        }
        if self.check_kw(Keyword::Having) {
            let mut having = self.begin(RuleKind::HavingClause)?;
            self.take(&mut having);
            let cond = self.parse_expr()?;
            having.push_node(cond);
            self.attach(&mut b, having)?;
        }
        if self.is_mysql() && self.check_kw(Keyword::Window) {
            let window = self.parse_window_clause()?;
            b.push_node(window);
        }
        self.finish(b)
    }

    // -----------------------------------------------------------------------
    // Projection and aliases
    // -----------------------------------------------------------------------

    fn parse_projection(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::Projection)?;
        self.parse_comma_sep(&mut b, Self::parse_select_item)?;
        self.finish(b)
    }

    fn parse_select_item(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::SelectItem)?;
        if self.peek() == TokenKind::Star {
            self.take(&mut b);
            return self.finish(b);
        }
        let expr = self.parse_expr()?;
        b.push_node(expr);
        if let Some(alias) = self.parse_opt_alias(true)? {
            b.push_node(alias);
        }
        self.finish(b)
    }

    fn at_implicit_alias(&self, allow_string: bool) -> bool {
        let tok = self.current();
        if tok.kind == TokenKind::String {
            return allow_string && self.is_mysql();
        }
        if !self.is_identifier(tok) {
            return false;
        }
        tok.kind == TokenKind::QuotedIdent || !ALIAS_STOP_WORDS.iter().any(|w| tok.is_word(w))
    }

    /// `[AS] alias`. String aliases are accepted where `allow_string` is set.
    pub(crate) fn parse_opt_alias(&mut self, allow_string: bool) -> PResult<Option<ParseNode>> {
        let explicit = self.check_kw(Keyword::As);
        if !explicit && !self.at_implicit_alias(allow_string) {
            return Ok(None);
        }
        let mut b = self.begin(RuleKind::Alias)?;
        if explicit {
            self.take(&mut b);
        }
        let tok = self.current();
        let id = if tok.kind == TokenKind::String && allow_string {
            let name = literal::decode_string(&tok.text, self.grammar());
            Identifier {
                raw: name.clone(),
                name,
                quoted: true,
            }
        } else if self.check_ident() {
            literal::identifier(tok, self.grammar(), self.options())
        } else {
            return Err(self.err_expected("alias"));
        };
        self.take(&mut b);
        b.set_value(NodeValue::Identifier(id));
        self.finish(b).map(Some)
    }

    /// Table aliases: `AS` is MySQL only.
    fn parse_opt_table_alias(&mut self) -> PResult<Option<ParseNode>> {
        if self.is_oracle() && self.check_kw(Keyword::As) {
            return Ok(None);
        }
        self.parse_opt_alias(false)
    }

    // -----------------------------------------------------------------------
    // INTO
    // -----------------------------------------------------------------------

    fn parse_into_clause(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::IntoClause)?;
        self.expect_kw(&mut b, Keyword::Into)?;
        if self.is_mysql() && self.eat_kw(&mut b, Keyword::Outfile) {
            self.expect(&mut b, TokenKind::String)?;
            if self.eat_kw(&mut b, Keyword::Character) {
                self.expect_kw(&mut b, Keyword::Set)?;
                self.parse_collation_name(&mut b)?;
            } else if self.eat_kw(&mut b, Keyword::Charset) {
                self.parse_collation_name(&mut b)?;
            }
            self.parse_field_line_options(&mut b)?;
        } else if self.is_mysql() && self.eat_word(&mut b, "DUMPFILE") {
            self.expect(&mut b, TokenKind::String)?;
        } else {
            self.parse_comma_sep(&mut b, Self::parse_into_target)?;
        }
        self.finish(b)
    }

    fn parse_into_target(&mut self) -> PResult<ParseNode> {
        match self.peek() {
            TokenKind::UserVariable | TokenKind::SystemVariable => self.parse_variable(),
            TokenKind::NamedParam => self.leaf(RuleKind::ParamMarker),
            _ => self.parse_object_name(RuleKind::ColumnRef),
        }
    }

    // -----------------------------------------------------------------------
    // FROM and joins
    // -----------------------------------------------------------------------

    fn parse_from_clause(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::FromClause)?;
        self.expect_kw(&mut b, Keyword::From)?;
        self.parse_comma_sep(&mut b, Self::parse_table_reference)?;
        self.finish(b)
    }

    /// Join operator ahead, with the number of tokens it spans.
    fn join_ahead(&self) -> Option<(JoinKind, usize)> {
        let w = |n: usize, s: &str| self.word_at(n, s);
        let oracle = self.is_oracle();
        // [OUTER] JOIN starting at n
        let outer_join = |n: usize| {
            if w(n, "JOIN") {
                Some(n + 1)
            } else if w(n, "OUTER") && w(n + 1, "JOIN") {
                Some(n + 2)
            } else {
                None
            }
        };
        if w(0, "JOIN") {
            return Some((JoinKind::Inner, 1));
        }
        if w(0, "INNER") && w(1, "JOIN") {
            return Some((JoinKind::Inner, 2));
        }
        if w(0, "CROSS") && w(1, "JOIN") {
            return Some((JoinKind::Cross, 2));
        }
        if self.is_mysql() && w(0, "STRAIGHT_JOIN") {
            return Some((JoinKind::Straight, 1));
        }
        if w(0, "LEFT") {
            return outer_join(1).map(|n| (JoinKind::Left, n));
        }
        if w(0, "RIGHT") {
            return outer_join(1).map(|n| (JoinKind::Right, n));
        }
        if oracle && w(0, "FULL") {
            return outer_join(1).map(|n| (JoinKind::Full, n));
        }
        if w(0, "NATURAL") {
            if w(1, "JOIN") {
                return Some((JoinKind::NaturalInner, 2));
            }
            if w(1, "INNER") && w(2, "JOIN") {
                return Some((JoinKind::NaturalInner, 3));
            }
            if w(1, "LEFT") {
                return outer_join(2).map(|n| (JoinKind::NaturalLeft, n));
            }
            if w(1, "RIGHT") {
                return outer_join(2).map(|n| (JoinKind::NaturalRight, n));
            }
            if oracle && w(1, "FULL") {
                return outer_join(2).map(|n| (JoinKind::NaturalFull, n));
            }
        }
        None
    }

    /// A table factor followed by any number of joins, nested to the left.
    pub(crate) fn parse_table_reference(&mut self) -> PResult<ParseNode> {
        let mut lhs = self.parse_table_factor()?;
        while let Some((kind, len)) = self.join_ahead() {
            let mut b = self.begin_with(RuleKind::JoinedTable, lhs)?;
            for _ in 0..len {
                self.take(&mut b);
            }
            let rhs = self.parse_table_factor()?;
            b.push_node(rhs);
            let needs_condition = matches!(kind, JoinKind::Left | JoinKind::Right | JoinKind::Full);
            let takes_condition = !matches!(
                kind,
                JoinKind::Cross
                    | JoinKind::NaturalInner
                    | JoinKind::NaturalLeft
                    | JoinKind::NaturalRight
                    | JoinKind::NaturalFull
            );
            if takes_condition && (self.check_kw(Keyword::On) || self.check_kw(Keyword::Using)) {
                let cond = self.parse_join_condition()?;
                b.push_node(cond);
            } else if needs_condition {
                return Err(self.err_expected("ON"));
            }
            b.set_value(NodeValue::Join(kind));
            lhs = self.finish(b)?;
        }
        Ok(lhs)
    }

    fn parse_join_condition(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::JoinCondition)?;
        if self.eat_kw(&mut b, Keyword::On) {
            let cond = self.parse_expr()?;
            b.push_node(cond);
        } else {
            self.expect_kw(&mut b, Keyword::Using)?;
            let cols = self.parse_column_list()?;
            b.push_node(cols);
        }
        self.finish(b)
    }

    pub(crate) fn parse_table_factor(&mut self) -> PResult<ParseNode> {
        if self.peek() == TokenKind::LeftParen {
            // `((SELECT ..) UNION ..) d` is a derived table, `((SELECT ..) d JOIN t)` is not.
            if self.starts_query_at(1) {
                if let Some(derived) = self.speculate(Self::parse_derived_table)? {
                    return Ok(derived);
                }
            }
            return self.parse_paren_table_reference();
        }
        if self.is_mysql() && self.check_kw(Keyword::Lateral) && self.peek_nth(1) == TokenKind::LeftParen {
            return self.parse_derived_table();
        }
        let mut b = self.begin(RuleKind::TableFactor)?;
        let relation = if self.check_kw(Keyword::Dual)
            && !matches!(self.peek_nth(1), TokenKind::Dot | TokenKind::UserVariable)
        {
            self.parse_dual()?
        } else {
            self.parse_relation()?
        };
        b.push_node(relation);
        if self.check_kw(Keyword::Partition) || self.check_kw(Keyword::Subpartition) {
            let part = self.parse_use_partition()?;
            b.push_node(part);
        }
        if self.is_oracle() && self.word_at(0, "AS") && self.word_at(1, "OF") {
            let flashback = self.parse_flashback_query()?;
            b.push_node(flashback);
        }
        if self.is_oracle() && self.check_word("SAMPLE") {
            let sample = self.parse_sample_clause()?;
            b.push_node(sample);
        }
        if let Some(alias) = self.parse_opt_table_alias()? {
            b.push_node(alias);
        }
        if self.is_mysql() {
            while self.at_index_hint() {
                let hint = self.parse_index_hint()?;
                b.push_node(hint);
            }
        }
        self.finish(b)
    }

    fn parse_dual(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::RelationFactor)?;
        let tok = self.advance();
        let name = literal::identifier(&tok, self.grammar(), self.options()).name;
        b.push_token(tok);
        b.set_value(NodeValue::Name(QualifiedName {
            parts: vec![name],
            dblink: None,
        }));
        self.finish(b)
    }

    fn parse_derived_table(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::DerivedTable)?;
        self.eat_kw(&mut b, Keyword::Lateral);
        let query = self.parse_select_with_parens()?;
        b.push_node(query);
        if let Some(alias) = self.parse_opt_table_alias()? {
            b.push_node(alias);
            if self.is_mysql() && self.peek() == TokenKind::LeftParen {
                let cols = self.parse_column_list()?;
                b.push_node(cols);
            }
        }
        self.finish(b)
    }

    fn parse_paren_table_reference(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::ParenTableReference)?;
        self.parse_paren_sep(&mut b, Self::parse_table_reference)?;
        self.finish(b)
    }

    /// `PARTITION (p0, p1)`, `SUBPARTITION (sp0)`.
    fn parse_use_partition(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::UsePartition)?;
        self.take(&mut b);
        self.parse_paren_sep(&mut b, Self::parse_identifier)?;
        self.finish(b)
    }

    /// `AS OF SCN expr`, `AS OF TIMESTAMP expr`.
    fn parse_flashback_query(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::FlashbackQuery)?;
        self.take(&mut b);
        self.take(&mut b);
        self.expect_one_of(&mut b, &["SCN", "TIMESTAMP"])?;
        let point = self.parse_bit_expr()?;
        b.push_node(point);
        self.finish(b)
    }

    /// `SAMPLE [BLOCK] [ALL | BASE | INCR] (percent) [SEED (n)]`
    fn parse_sample_clause(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::SampleClause)?;
        self.expect_word(&mut b, "SAMPLE")?;
        self.eat_word(&mut b, "BLOCK");
        self.eat_one_of(&mut b, &["ALL", "BASE", "INCR"]);
        self.expect(&mut b, TokenKind::LeftParen)?;
        let percent = self.parse_bit_expr()?;
        b.push_node(percent);
        self.expect(&mut b, TokenKind::RightParen)?;
        if self.eat_word(&mut b, "SEED") {
            self.expect(&mut b, TokenKind::LeftParen)?;
            let seed = self.parse_bit_expr()?;
            b.push_node(seed);
            self.expect(&mut b, TokenKind::RightParen)?;
        }
        self.finish(b)
    }

    fn at_index_hint(&self) -> bool {
        (self.word_at(0, "USE") || self.word_at(0, "FORCE") || self.word_at(0, "IGNORE"))
            && (self.word_at(1, "INDEX") || self.word_at(1, "KEY"))
    }

    /// `USE|FORCE|IGNORE INDEX|KEY [FOR JOIN|ORDER BY|GROUP BY] ([name, ..])`
    fn parse_index_hint(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::IndexHint)?;
        self.take(&mut b);
        self.take(&mut b);
        if self.eat_kw(&mut b, Keyword::For) {
            if !self.eat_kw(&mut b, Keyword::Join) {
                self.expect_one_of(&mut b, &["ORDER", "GROUP"])?;
                self.expect_kw(&mut b, Keyword::By)?;
            }
        }
        self.expect(&mut b, TokenKind::LeftParen)?;
        if self.peek() != TokenKind::RightParen {
            self.parse_comma_sep(&mut b, Self::parse_any_word)?;
        }
        self.expect(&mut b, TokenKind::RightParen)?;
        self.finish(b)
    }

    // -----------------------------------------------------------------------
    // Filtering and grouping
    // -----------------------------------------------------------------------

    pub(crate) fn parse_where_clause(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::WhereClause)?;
        self.expect_kw(&mut b, Keyword::Where)?;
        let cond = self.parse_expr()?;
        b.push_node(cond);
        self.finish(b)
    }

    /// `[START WITH cond] CONNECT BY [NOCYCLE] cond`, in either order.
    fn parse_hierarchical_clause(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::HierarchicalClause)?;
        let mut connect = false;
        let mut start = false;
        loop {
            if !start && self.eat_words(&mut b, &["START", "WITH"]) {
                let cond = self.parse_expr()?;
                b.push_node(cond);
                start = true;
            } else if !connect && self.eat_words(&mut b, &["CONNECT", "BY"]) {
                self.eat_kw(&mut b, Keyword::Nocycle);
                let cond = self.parse_expr()?;
                b.push_node(cond);
                connect = true;
            } else {
                break;
            }
        }
        if !connect {
            return Err(self.err_expected("CONNECT"));
        }
        self.finish(b)
    }

    fn parse_group_by_clause(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::GroupByClause)?;
        self.expect_kw(&mut b, Keyword::Group)?;
        self.expect_kw(&mut b, Keyword::By)?;
        loop {
            let item = self.parse_grouping_item()?;
            b.push_node(item);
            if self.is_mysql() {
                self.eat_one_of(&mut b, &["ASC", "DESC"]);
            }
            if !self.eat(&mut b, TokenKind::Comma) {
                break;
            }
        }
        if self.is_mysql() {
            self.eat_words(&mut b, &["WITH", "ROLLUP"]);
        }
        self.finish(b)
    }

    /// Oracle `ROLLUP (..)`, `CUBE (..)`, `GROUPING SETS (..)`, `()`, or an expression.
    fn parse_grouping_item(&mut self) -> PResult<ParseNode> {
        if self.is_oracle() {
            let open = self.peek_nth(1) == TokenKind::LeftParen;
            if open && (self.word_at(0, "ROLLUP") || self.word_at(0, "CUBE")) {
                let mut b = self.begin(RuleKind::GroupingElement)?;
                self.take(&mut b);
                self.parse_paren_sep(&mut b, Self::parse_expr)?;
                return self.finish(b);
            }
            if self.word_at(0, "GROUPING") && self.word_at(1, "SETS") {
                let mut b = self.begin(RuleKind::GroupingElement)?;
                self.take(&mut b);
                self.take(&mut b);
                self.parse_paren_sep(&mut b, Self::parse_grouping_item)?;
                return self.finish(b);
            }
            if self.peek() == TokenKind::LeftParen && self.peek_nth(1) == TokenKind::RightParen {
                let mut b = self.begin(RuleKind::GroupingElement)?;
                self.take(&mut b);
                self.take(&mut b);
                return self.finish(b);
            }
        }
        self.parse_expr()
    }

    fn parse_window_clause(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::WindowClause)?;
        self.expect_kw(&mut b, Keyword::Window)?;
        self.parse_comma_sep(&mut b, |p| {
            let mut w = p.begin(RuleKind::NamedWindow)?;
            let name = p.parse_identifier()?;
            w.push_node(name);
            p.expect_kw(&mut w, Keyword::As)?;
            let spec = p.parse_window_spec()?;
            w.push_node(spec);
            p.finish(w)
        })?;
        self.finish(b)
    }

    // -----------------------------------------------------------------------
    // Ordering, limits, locking
    // -----------------------------------------------------------------------

    /// `ORDER [SIBLINGS] BY key [ASC|DESC] [NULLS FIRST|LAST], ...`
    pub(crate) fn parse_order_by_clause(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::OrderByClause)?;
        self.expect_kw(&mut b, Keyword::Order)?;
        if self.is_oracle() {
            self.eat_kw(&mut b, Keyword::Siblings);
        }
        self.expect_kw(&mut b, Keyword::By)?;
        self.parse_comma_sep(&mut b, Self::parse_sort_key)?;
        self.finish(b)
    }

    fn parse_sort_key(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::SortKey)?;
        let key = self.parse_expr()?;
        b.push_node(key);
        self.eat_one_of(&mut b, &["ASC", "DESC"]);
        if self.is_oracle() && self.eat_kw(&mut b, Keyword::Nulls) {
            self.expect_one_of(&mut b, &["FIRST", "LAST"])?;
        }
        self.finish(b)
    }

    /// `LIMIT n`, `LIMIT offset, n`, `LIMIT n OFFSET offset`.
    pub(crate) fn parse_limit_clause(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::LimitClause)?;
        self.expect_kw(&mut b, Keyword::Limit)?;
        let first = self.parse_bit_expr()?;
        b.push_node(first);
        if self.eat(&mut b, TokenKind::Comma) || self.eat_kw(&mut b, Keyword::Offset) {
            let second = self.parse_bit_expr()?;
            b.push_node(second);
        }
        self.finish(b)
    }

    /// `[OFFSET n ROW[S]] [FETCH FIRST|NEXT [n [PERCENT]] ROW[S] ONLY|WITH TIES]`
    fn parse_fetch_clause(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::FetchClause)?;
        if self.eat_kw(&mut b, Keyword::Offset) {
            let offset = self.parse_bit_expr()?;
            b.push_node(offset);
            self.expect_one_of(&mut b, &["ROWS", "ROW"])?;
        }
        if self.eat_kw(&mut b, Keyword::Fetch) {
            self.expect_one_of(&mut b, &["FIRST", "NEXT"])?;
            if !self.check_kw(Keyword::Row) && !self.check_kw(Keyword::Rows) {
                let count = self.parse_bit_expr()?;
                b.push_node(count);
                self.eat_kw(&mut b, Keyword::Percent);
            }
            self.expect_one_of(&mut b, &["ROWS", "ROW"])?;
            if !self.eat_kw(&mut b, Keyword::Only) {
                self.expect_kw(&mut b, Keyword::With)?;
                self.expect_kw(&mut b, Keyword::Ties)?;
            }
        }
        self.finish(b)
    }

    fn at_locking_clause(&self) -> bool {
        (self.word_at(0, "FOR") && (self.word_at(1, "UPDATE") || (self.is_mysql() && self.word_at(1, "SHARE"))))
            || (self.is_mysql() && self.word_at(0, "LOCK") && self.word_at(1, "IN"))
    }

    /// `FOR UPDATE [OF ..] [NOWAIT | WAIT n | SKIP LOCKED]`, MySQL `FOR SHARE`
    /// and `LOCK IN SHARE MODE`.
    fn parse_locking_clause(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::LockingClause)?;
        if self.eat_kw(&mut b, Keyword::Lock) {
            self.expect_kw(&mut b, Keyword::In)?;
            self.expect_kw(&mut b, Keyword::Share)?;
            self.expect_kw(&mut b, Keyword::Mode)?;
            return self.finish(b);
        }
        self.expect_kw(&mut b, Keyword::For)?;
        self.expect_one_of(&mut b, &["UPDATE", "SHARE"])?;
        if self.eat_kw(&mut b, Keyword::Of) {
            self.parse_comma_sep(&mut b, |p| p.parse_object_name(RuleKind::ColumnRef))?;
        }
        if self.eat_kw(&mut b, Keyword::Wait) {
            self.expect_integer(&mut b)?;
        } else if !self.eat_kw(&mut b, Keyword::Nowait) && self.eat_kw(&mut b, Keyword::Skip) {
            self.expect_kw(&mut b, Keyword::Locked)?;
        }
        self.finish(b)
    }
}
