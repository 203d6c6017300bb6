//! Expression parsing.
//!
//! Precedence climbing over per-dialect binding levels. Each level only
//! recurses into tighter levels, so binary operators associate left except
//! MySQL `:=`, which associates right. Every recursion opens a rule first,
//! which keeps nesting inside the configured depth budget.

use obparse_ast::{
    Keyword, LiteralValue, NodeValue, Operator, ParseNode, RuleKind, StringLiteral, TemporalKind,
    TokenKind, Variable, VariableScope,
};
use obparse_types::Charset;

use super::{NodeBuilder, PResult, Parser};
use crate::keywords::DialectFeatures;
use crate::literal;

// Binding levels, loosest first.
const PREC_ASSIGN: u8 = 1;
const PREC_OR: u8 = 2;
const PREC_XOR: u8 = 3;
const PREC_AND: u8 = 4;
const PREC_NOT: u8 = 5;
const PREC_BETWEEN: u8 = 6;
const PREC_COMPARE: u8 = 7;
const PREC_BIT_OR: u8 = 8;
const PREC_BIT_AND: u8 = 9;
const PREC_SHIFT: u8 = 10;
const PREC_ADD: u8 = 11;
const PREC_MUL: u8 = 12;
const PREC_BIT_XOR: u8 = 13;
const PREC_UNARY: u8 = 14;
const PREC_BANG: u8 = 15;
const PREC_COLLATE: u8 = 16;

/// Operand level for the bounds of BETWEEN and the right side of LIKE:
/// anything tighter than comparison.
const PREC_PREDICATE_OPERAND: u8 = PREC_BIT_OR;

#[derive(Debug, Clone, Copy)]
enum Infix {
    Binary(RuleKind, Operator),
    Assign,
    Comparison(Operator),
    Is,
    In,
    Between,
    Like,
    Regexp,
    MemberOf,
    SoundsLike,
    Collate,
}

/// Units accepted after `INTERVAL expr` in MySQL and around `TO` in Oracle.
const INTERVAL_UNITS: &[&str] = &[
    "MICROSECOND",
    "SECOND",
    "MINUTE",
    "HOUR",
    "DAY",
    "WEEK",
    "MONTH",
    "QUARTER",
    "YEAR",
    "SECOND_MICROSECOND",
    "MINUTE_MICROSECOND",
    "MINUTE_SECOND",
    "HOUR_MICROSECOND",
    "HOUR_SECOND",
    "HOUR_MINUTE",
    "DAY_MICROSECOND",
    "DAY_SECOND",
    "DAY_MINUTE",
    "DAY_HOUR",
    "YEAR_MONTH",
];

const MYSQL_NILADIC: &[&str] = &[
    "CURRENT_TIMESTAMP",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_USER",
    "LOCALTIME",
    "LOCALTIMESTAMP",
    "UTC_DATE",
    "UTC_TIME",
    "UTC_TIMESTAMP",
];

const ORACLE_NILADIC: &[&str] = &[
    "CURRENT_DATE",
    "CURRENT_TIMESTAMP",
    "LOCALTIMESTAMP",
    "SYSDATE",
    "SYSTIMESTAMP",
    "SESSIONTIMEZONE",
    "DBTIMEZONE",
    "USER",
    "UID",
];

const ORACLE_PSEUDO_COLUMNS: &[&str] = &[
    "ROWNUM",
    "ROWID",
    "LEVEL",
    "CONNECT_BY_ISLEAF",
    "CONNECT_BY_ISCYCLE",
    "ORA_ROWSCN",
];

/// Reserved words that never name a function, even when `(` follows them.
const NOT_FUNCTION_NAMES: &[&str] = &[
    "NOT", "EXISTS", "CASE", "CAST", "CONVERT", "INTERVAL", "ROW", "BINARY", "PRIOR", "DISTINCT",
    "ALL", "ANY", "SOME", "SELECT", "FROM", "WHERE", "GROUP", "HAVING", "ORDER", "UNION",
    "INTERSECT", "EXCEPT", "MINUS", "ON", "USING", "AS", "INTO", "WITH", "AND", "OR", "XOR", "IN",
    "IS", "LIKE", "BETWEEN", "WHEN", "THEN", "ELSE", "END", "SET",
];

impl Parser<'_> {
    /// Parse a full expression.
    pub(crate) fn parse_expr(&mut self) -> PResult<ParseNode> {
        self.parse_expr_prec(PREC_ASSIGN)
    }

    /// An expression that binds tighter than any comparison.
    pub(crate) fn parse_bit_expr(&mut self) -> PResult<ParseNode> {
        self.parse_expr_prec(PREC_BIT_OR)
    }

    fn parse_expr_prec(&mut self, min_prec: u8) -> PResult<ParseNode> {
        let mut lhs = self.parse_prefix()?;
        while let Some((prec, infix)) = self.peek_infix() {
            if prec < min_prec {
                break;
            }
            lhs = self.parse_infix(lhs, prec, infix)?;
        }
        Ok(lhs)
    }

    fn peek_infix(&self) -> Option<(u8, Infix)> {
        let mysql = self.is_mysql();
        let tok = self.current();
        let binary = |rule, op| Some(Infix::Binary(rule, op));
        let (prec, infix) = match tok.kind {
            TokenKind::Assign => (PREC_ASSIGN, Some(Infix::Assign)),
            TokenKind::DoublePipe if self.has(DialectFeatures::PIPES_CONCAT) => {
                (PREC_ADD, binary(RuleKind::BitExpr, Operator::Concat))
            }
            TokenKind::DoublePipe => (PREC_OR, binary(RuleKind::OrExpr, Operator::Or)),
            TokenKind::DoubleAmp => (PREC_AND, binary(RuleKind::AndExpr, Operator::And)),
            TokenKind::Eq => (PREC_COMPARE, Some(Infix::Comparison(Operator::Eq))),
            TokenKind::NullSafeEq => (PREC_COMPARE, Some(Infix::Comparison(Operator::NullSafeEq))),
            TokenKind::NotEq => (PREC_COMPARE, Some(Infix::Comparison(Operator::NotEq))),
            TokenKind::Lt => (PREC_COMPARE, Some(Infix::Comparison(Operator::Lt))),
            TokenKind::Le => (PREC_COMPARE, Some(Infix::Comparison(Operator::Le))),
            TokenKind::Gt => (PREC_COMPARE, Some(Infix::Comparison(Operator::Gt))),
            TokenKind::Ge => (PREC_COMPARE, Some(Infix::Comparison(Operator::Ge))),
            TokenKind::Pipe => (PREC_BIT_OR, binary(RuleKind::BitExpr, Operator::BitOr)),
            TokenKind::Ampersand if mysql => (PREC_BIT_AND, binary(RuleKind::BitExpr, Operator::BitAnd)),
            TokenKind::ShiftLeft => (PREC_SHIFT, binary(RuleKind::BitExpr, Operator::ShiftLeft)),
            TokenKind::ShiftRight => (PREC_SHIFT, binary(RuleKind::BitExpr, Operator::ShiftRight)),
            TokenKind::Plus => (PREC_ADD, binary(RuleKind::BitExpr, Operator::Add)),
            TokenKind::Minus => (PREC_ADD, binary(RuleKind::BitExpr, Operator::Sub)),
            TokenKind::Star => (PREC_MUL, binary(RuleKind::BitExpr, Operator::Mul)),
            TokenKind::Slash => (PREC_MUL, binary(RuleKind::BitExpr, Operator::Div)),
            TokenKind::Percent if mysql => (PREC_MUL, binary(RuleKind::BitExpr, Operator::Mod)),
            TokenKind::Caret if mysql => (PREC_BIT_XOR, binary(RuleKind::BitExpr, Operator::BitXor)),
            TokenKind::Keyword(_) | TokenKind::Ident => {
                let word = tok.text.to_ascii_uppercase();
                match word.as_str() {
                    "OR" => (PREC_OR, binary(RuleKind::OrExpr, Operator::Or)),
                    "XOR" if mysql => (PREC_XOR, binary(RuleKind::XorExpr, Operator::Xor)),
                    "AND" => (PREC_AND, binary(RuleKind::AndExpr, Operator::And)),
                    "DIV" if mysql => (PREC_MUL, binary(RuleKind::BitExpr, Operator::IntDiv)),
                    "MOD" if mysql => (PREC_MUL, binary(RuleKind::BitExpr, Operator::Mod)),
                    "IS" => (PREC_COMPARE, Some(Infix::Is)),
                    "IN" => (PREC_COMPARE, Some(Infix::In)),
                    "LIKE" => (PREC_COMPARE, Some(Infix::Like)),
                    "REGEXP" | "RLIKE" if mysql => (PREC_COMPARE, Some(Infix::Regexp)),
                    "MEMBER" if mysql && self.word_at(1, "OF") => (PREC_COMPARE, Some(Infix::MemberOf)),
                    "SOUNDS" if mysql && self.word_at(1, "LIKE") => {
                        (PREC_COMPARE, Some(Infix::SoundsLike))
                    }
                    "BETWEEN" => (self.between_prec(), Some(Infix::Between)),
                    "COLLATE" if mysql => (PREC_COLLATE, Some(Infix::Collate)),
                    "NOT" => {
                        let next = self.nth(1);
                        if next.is_word("IN") {
                            (PREC_COMPARE, Some(Infix::In))
                        } else if next.is_word("LIKE") {
                            (PREC_COMPARE, Some(Infix::Like))
                        } else if next.is_word("BETWEEN") {
                            (self.between_prec(), Some(Infix::Between))
                        } else if mysql && (next.is_word("REGEXP") || next.is_word("RLIKE")) {
                            (PREC_COMPARE, Some(Infix::Regexp))
                        } else {
                            return None;
                        }
                    }
                    _ => return None,
                }
            }
            _ => return None,
        };
        infix.map(|i| (prec, i))
    }

    fn between_prec(&self) -> u8 {
        if self.is_mysql() {
            PREC_BETWEEN
        } else {
            PREC_COMPARE
        }
    }

    fn parse_infix(&mut self, lhs: ParseNode, prec: u8, infix: Infix) -> PResult<ParseNode> {
        match infix {
            Infix::Binary(rule, op) => {
                let mut b = self.begin_with(rule, lhs)?;
                self.take(&mut b);
                let rhs = self.parse_expr_prec(prec + 1)?;
                b.push_node(rhs);
                b.set_value(NodeValue::Operator(op));
                self.finish(b)
            }
            Infix::Assign => {
                let mut b = self.begin_with(RuleKind::AssignExpr, lhs)?;
                self.take(&mut b);
                let rhs = self.parse_expr_prec(PREC_ASSIGN)?;
                b.push_node(rhs);
                b.set_value(NodeValue::Operator(Operator::Assign));
                self.finish(b)
            }
            Infix::Comparison(op) => {
                let mut b = self.begin_with(RuleKind::ComparisonExpr, lhs)?;
                self.take(&mut b);
                let quantified = ["ANY", "SOME", "ALL"].iter().any(|w| self.word_at(0, w))
                    && self.peek_nth(1) == TokenKind::LeftParen;
                let rhs = if quantified {
                    self.parse_quantified()?
                } else {
                    self.parse_expr_prec(PREC_COMPARE + 1)?
                };
                b.push_node(rhs);
                b.set_value(NodeValue::Operator(op));
                self.finish(b)
            }
            Infix::Is => {
                let mut b = self.begin_with(RuleKind::IsExpr, lhs)?;
                self.take(&mut b);
                let negated = self.eat_kw(&mut b, Keyword::Not);
                let targets: &[&'static str] = if self.is_mysql() {
                    &["NULL", "TRUE", "FALSE", "UNKNOWN"]
                } else {
                    &["NULL", "NAN", "INFINITE"]
                };
                self.expect_one_of(&mut b, targets)?;
                b.set_value(NodeValue::Operator(if negated {
                    Operator::IsNot
                } else {
                    Operator::Is
                }));
                self.finish(b)
            }
            Infix::In => {
                let mut b = self.begin_with(RuleKind::InExpr, lhs)?;
                let negated = self.eat_kw(&mut b, Keyword::Not);
                self.expect_kw(&mut b, Keyword::In)?;
                let rhs = self.parse_in_list()?;
                b.push_node(rhs);
                b.set_value(NodeValue::Operator(if negated { Operator::NotIn } else { Operator::In }));
                self.finish(b)
            }
            Infix::Between => {
                let mut b = self.begin_with(RuleKind::BetweenExpr, lhs)?;
                let negated = self.eat_kw(&mut b, Keyword::Not);
                self.expect_kw(&mut b, Keyword::Between)?;
                let low = self.parse_expr_prec(PREC_PREDICATE_OPERAND)?;
                b.push_node(low);
                self.expect_kw(&mut b, Keyword::And)?;
                let high = self.parse_expr_prec(PREC_PREDICATE_OPERAND)?;
                b.push_node(high);
                b.set_value(NodeValue::Operator(if negated {
                    Operator::NotBetween
                } else {
                    Operator::Between
                }));
                self.finish(b)
            }
            Infix::Like => {
                let mut b = self.begin_with(RuleKind::LikeExpr, lhs)?;
                let negated = self.eat_kw(&mut b, Keyword::Not);
                self.expect_kw(&mut b, Keyword::Like)?;
                let pattern = self.parse_expr_prec(PREC_PREDICATE_OPERAND)?;
                b.push_node(pattern);
                if self.eat_kw(&mut b, Keyword::Escape) {
                    let escape = self.parse_expr_prec(PREC_PREDICATE_OPERAND)?;
                    b.push_node(escape);
                }
                b.set_value(NodeValue::Operator(if negated { Operator::NotLike } else { Operator::Like }));
                self.finish(b)
            }
            Infix::Regexp => {
                let mut b = self.begin_with(RuleKind::RegexpExpr, lhs)?;
                let negated = self.eat_kw(&mut b, Keyword::Not);
                self.expect_one_of(&mut b, &["REGEXP", "RLIKE"])?;
                let pattern = self.parse_expr_prec(PREC_PREDICATE_OPERAND)?;
                b.push_node(pattern);
                b.set_value(NodeValue::Operator(if negated {
                    Operator::NotRegexp
                } else {
                    Operator::Regexp
                }));
                self.finish(b)
            }
            Infix::MemberOf => {
                let mut b = self.begin_with(RuleKind::MemberOfExpr, lhs)?;
                self.take(&mut b);
                self.expect_kw(&mut b, Keyword::Of)?;
                self.expect(&mut b, TokenKind::LeftParen)?;
                let doc = self.parse_expr()?;
                b.push_node(doc);
                self.expect(&mut b, TokenKind::RightParen)?;
                b.set_value(NodeValue::Operator(Operator::MemberOf));
                self.finish(b)
            }
            Infix::SoundsLike => {
                let mut b = self.begin_with(RuleKind::SoundsLikeExpr, lhs)?;
                self.take(&mut b);
                self.take(&mut b);
                let rhs = self.parse_expr_prec(PREC_PREDICATE_OPERAND)?;
                b.push_node(rhs);
                b.set_value(NodeValue::Operator(Operator::SoundsLike));
                self.finish(b)
            }
            Infix::Collate => {
                let mut b = self.begin_with(RuleKind::CollateExpr, lhs)?;
                self.take(&mut b);
                self.parse_collation_name(&mut b)?;
                self.finish(b)
            }
        }
    }

    /// Collation or charset name: identifier, keyword, or string.
    pub(crate) fn parse_collation_name(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        if self.peek().is_word() || matches!(self.peek(), TokenKind::QuotedIdent | TokenKind::String) {
            self.take(b);
            Ok(())
        } else {
            Err(self.err_expected("collation name"))
        }
    }

    /// `ANY (subquery)`, also `ANY (expr, ...)` in Oracle.
    fn parse_quantified(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::QuantifiedSubquery)?;
        self.take(&mut b);
        if self.starts_query_at(1) {
            let q = self.parse_select_with_parens()?;
            b.push_node(q);
        } else if self.is_oracle() {
            let list = self.parse_paren_expr_list()?;
            b.push_node(list);
        } else {
            return Err(self.err_expected("SELECT"));
        }
        self.finish(b)
    }

    /// Right side of IN: a parenthesised subquery or expression list.
    fn parse_in_list(&mut self) -> PResult<ParseNode> {
        if self.peek() == TokenKind::LeftParen && self.starts_query_at(1) {
            return self.parse_select_with_parens();
        }
        self.parse_paren_expr_list()
    }

    /// True when a query starts `n` tokens ahead, looking through opening parens.
    pub(crate) fn starts_query_at(&self, n: usize) -> bool {
        let mut k = n;
        while self.peek_nth(k) == TokenKind::LeftParen {
            k += 1;
        }
        let tok = self.nth(k);
        tok.is_word("SELECT") || tok.is_word("WITH") || (self.is_mysql() && tok.is_word("VALUES") && k == n)
    }

    /// `( expr, ... )` as an `ExprList`.
    pub(crate) fn parse_paren_expr_list(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::ExprList)?;
        self.parse_paren_sep(&mut b, Self::parse_expr)?;
        self.finish(b)
    }

    /// `expr, ...` as an `ExprList`.
    pub(crate) fn parse_expr_list(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::ExprList)?;
        self.parse_comma_sep(&mut b, Self::parse_expr)?;
        self.finish(b)
    }

    // -----------------------------------------------------------------------
    // Prefix operators
    // -----------------------------------------------------------------------

    fn parse_prefix(&mut self) -> PResult<ParseNode> {
        let tok = self.current();
        let (rule, op, operand_prec) = match tok.kind {
            TokenKind::Minus => (RuleKind::UnaryExpr, Operator::Neg, PREC_UNARY + 1),
            TokenKind::Plus => (RuleKind::UnaryExpr, Operator::Plus, PREC_UNARY + 1),
            TokenKind::Tilde if self.is_mysql() => (RuleKind::UnaryExpr, Operator::BitNot, PREC_UNARY + 1),
            TokenKind::Bang => (RuleKind::UnaryExpr, Operator::LogicalNot, PREC_BANG + 1),
            _ if tok.is_word("NOT") => (RuleKind::NotExpr, Operator::Not, PREC_NOT + 1),
            _ if self.is_mysql() && tok.is_word("BINARY") => {
                (RuleKind::UnaryExpr, Operator::Binary, PREC_COLLATE)
            }
            _ if self.is_oracle() && tok.is_word("PRIOR") => {
                (RuleKind::UnaryExpr, Operator::Prior, PREC_UNARY + 1)
            }
            _ if self.is_oracle() && tok.is_word("CONNECT_BY_ROOT") => {
                (RuleKind::UnaryExpr, Operator::ConnectByRoot, PREC_UNARY + 1)
            }
            _ => return self.parse_primary(),
        };
        let mut b = self.begin(rule)?;
        self.take(&mut b);
        let operand = self.parse_expr_prec(operand_prec)?;
        b.push_node(operand);
        b.set_value(NodeValue::Operator(op));
        self.finish(b)
    }

    // -----------------------------------------------------------------------
    // Primary expressions
    // -----------------------------------------------------------------------

    fn parse_primary(&mut self) -> PResult<ParseNode> {
        match self.peek() {
            TokenKind::Integer | TokenKind::Decimal | TokenKind::Float | TokenKind::BinaryFloat => {
                self.parse_number()
            }
            TokenKind::String | TokenKind::NationalString | TokenKind::CharsetIntroducer => {
                self.parse_string_literal()
            }
            TokenKind::HexString | TokenKind::BitString => self.parse_bits_literal(),
            TokenKind::QuestionMark | TokenKind::NamedParam => self.leaf(RuleKind::ParamMarker),
            TokenKind::UserVariable | TokenKind::SystemVariable => self.parse_variable(),
            TokenKind::LeftParen => self.parse_paren_primary(),
            TokenKind::Keyword(_) | TokenKind::Ident => self.parse_word_primary(),
            TokenKind::QuotedIdent => self.parse_column_or_call(),
            _ => Err(self.err_expected("expression")),
        }
    }

    fn parse_word_primary(&mut self) -> PResult<ParseNode> {
        let word = self.current().text.to_ascii_uppercase();
        let next = self.peek_nth(1);
        let call = next == TokenKind::LeftParen && !self.outer_join_marker_at(1);
        let mysql = self.is_mysql();
        match word.as_str() {
            "NULL" => self.parse_keyword_literal(LiteralValue::Null),
            "TRUE" if self.has(DialectFeatures::BOOLEAN_LITERALS) => {
                self.parse_keyword_literal(LiteralValue::Bool(true))
            }
            "FALSE" if self.has(DialectFeatures::BOOLEAN_LITERALS) => {
                self.parse_keyword_literal(LiteralValue::Bool(false))
            }
            "DATE" | "TIME" | "TIMESTAMP" | "DATETIME" if next == TokenKind::String => {
                self.parse_temporal_literal()
            }
            "INTERVAL" if mysql || next == TokenKind::String => self.parse_interval(),
            "CASE" => self.parse_case(),
            "EXISTS" if call => self.parse_exists(),
            "CAST" if call => self.parse_cast(),
            "CONVERT" if call && mysql => self.parse_convert(),
            "ROW" if call && mysql => self.parse_row_constructor(),
            "DEFAULT" if !call => self.leaf(RuleKind::DefaultExpr),
            "TRIM" | "EXTRACT" if call => self.parse_special_function(),
            "SUBSTRING" | "SUBSTR" | "POSITION" if call && mysql => self.parse_special_function(),
            "MATCH" if call && mysql => self.parse_match_against(),
            w if !call && next != TokenKind::Dot && self.is_niladic(w) => {
                let mut b = self.begin(RuleKind::FunctionCall)?;
                let name = self.push_name_parts_any(&mut b)?;
                b.set_value(NodeValue::Name(name));
                self.finish(b)
            }
            w if self.is_oracle()
                && !call
                && next != TokenKind::Dot
                && ORACLE_PSEUDO_COLUMNS.contains(&w) =>
            {
                self.leaf(RuleKind::PseudoColumn)
            }
            w if NOT_FUNCTION_NAMES.contains(&w) && !self.is_identifier(self.current()) => {
                Err(self.err_expected("expression"))
            }
            _ if call => self.parse_function_call(),
            _ => self.parse_column_or_call(),
        }
    }

    fn is_niladic(&self, word: &str) -> bool {
        if self.is_mysql() {
            MYSQL_NILADIC.contains(&word)
        } else {
            ORACLE_NILADIC.contains(&word)
        }
    }

    /// One name token, reserved or not, as a single-part name.
    fn push_name_parts_any(&mut self, b: &mut NodeBuilder) -> PResult<obparse_ast::QualifiedName> {
        let tok = self.advance();
        let name = literal::identifier(&tok, self.grammar(), self.options()).name;
        b.push_token(tok);
        Ok(obparse_ast::QualifiedName {
            parts: vec![name],
            dblink: None,
        })
    }

    fn parse_keyword_literal(&mut self, value: LiteralValue) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::Literal)?;
        self.take(&mut b);
        b.set_value(NodeValue::Literal(value));
        self.finish(b)
    }

    fn parse_number(&mut self) -> PResult<ParseNode> {
        let tok = self.advance();
        let value = literal::decode_number(tok.kind, &tok.text);
        let mut b = self.begin(RuleKind::Literal)?;
        b.push_token(tok);
        b.set_value(NodeValue::Literal(value));
        self.finish(b)
    }

    fn parse_bits_literal(&mut self) -> PResult<ParseNode> {
        let tok = self.advance();
        let value = if tok.kind == TokenKind::HexString {
            LiteralValue::Hex(literal::decode_hex(&tok.text))
        } else {
            LiteralValue::Bit(literal::decode_bit(&tok.text))
        };
        let mut b = self.begin(RuleKind::Literal)?;
        b.push_token(tok);
        b.set_value(NodeValue::Literal(value));
        self.finish(b)
    }

    /// `[_charset] 'a' ['b' ...]`, `N'a'`.
    pub(crate) fn parse_string_literal(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::Literal)?;
        let mut charset = self.charset().charset;
        let mut introduced = false;
        let mut national = false;
        if self.peek() == TokenKind::CharsetIntroducer {
            let intro = self.advance();
            if let Some(cs) = Charset::from_name(intro.text.trim_start_matches('_')) {
                charset = cs;
            }
            introduced = true;
            b.push_token(intro);
            if self.peek() != TokenKind::String {
                return Err(self.err_expected("string literal"));
            }
        }
        let first = self.advance();
        if first.kind == TokenKind::NationalString {
            national = true;
            if !introduced {
                charset = Charset::Utf8;
            }
        }
        let mut value = literal::decode_string(&first.text, self.grammar());
        b.push_token(first);
        if self.has(DialectFeatures::ADJACENT_STRINGS) {
            while self.peek() == TokenKind::String {
                let next = self.advance();
                value.push_str(&literal::decode_string(&next.text, self.grammar()));
                b.push_token(next);
            }
        }
        b.set_value(NodeValue::Literal(LiteralValue::String(StringLiteral {
            value,
            charset,
            introduced,
            national,
        })));
        self.finish(b)
    }

    fn parse_temporal_literal(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::TypedLiteral)?;
        let kw = self.advance();
        let kind = match kw.text.to_ascii_uppercase().as_str() {
            "DATE" => TemporalKind::Date,
            "TIME" => TemporalKind::Time,
            "DATETIME" => TemporalKind::Datetime,
            _ => TemporalKind::Timestamp,
        };
        b.push_token(kw);
        let text_tok = self.advance();
        let text = literal::decode_string(&text_tok.text, self.grammar());
        b.push_token(text_tok);
        b.set_value(NodeValue::Literal(LiteralValue::Temporal { kind, text }));
        self.finish(b)
    }

    /// MySQL `INTERVAL expr unit`; Oracle `INTERVAL '..' unit [(p)] [TO unit [(p)]]`.
    fn parse_interval(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::IntervalExpr)?;
        self.take(&mut b);
        if self.is_mysql() {
            let amount = self.parse_expr()?;
            b.push_node(amount);
            self.expect_one_of(&mut b, INTERVAL_UNITS)?;
            return self.finish(b);
        }
        let amount = self.parse_string_literal()?;
        b.push_node(amount);
        self.parse_interval_unit(&mut b)?;
        if self.eat_kw(&mut b, Keyword::To) {
            self.parse_interval_unit(&mut b)?;
        }
        self.finish(b)
    }

    fn parse_interval_unit(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        self.expect_one_of(b, &["YEAR", "MONTH", "DAY", "HOUR", "MINUTE", "SECOND"])?;
        if self.eat(b, TokenKind::LeftParen) {
            self.expect_integer(b)?;
            if self.eat(b, TokenKind::Comma) {
                self.expect_integer(b)?;
            }
            self.expect(b, TokenKind::RightParen)?;
        }
        Ok(())
    }

    pub(crate) fn expect_integer(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        self.expect(b, TokenKind::Integer)
    }

    pub(crate) fn parse_variable(&mut self) -> PResult<ParseNode> {
        let tok = self.advance();
        let variable = variable_of(&tok.text);
        let mut b = self.begin(RuleKind::Variable)?;
        b.push_token(tok);
        b.set_value(NodeValue::Variable(variable));
        self.finish(b)
    }

    /// `(`: subquery, parenthesised expression, or row constructor.
    fn parse_paren_primary(&mut self) -> PResult<ParseNode> {
        if self.starts_query_at(1) {
            if self.peek_nth(1) == TokenKind::LeftParen {
                // `((SELECT 1) UNION (SELECT 2))` is a query, `((SELECT 1) + 1)` is not.
                if let Some(q) = self.speculate(Self::parse_subquery_expr)? {
                    return Ok(q);
                }
            } else {
                return self.parse_subquery_expr();
            }
        }
        let mut b = self.begin(RuleKind::ParenExpr)?;
        self.take(&mut b);
        let first = self.parse_expr()?;
        b.push_node(first);
        if self.peek() == TokenKind::Comma {
            b.retag(RuleKind::RowExpr);
            while self.eat(&mut b, TokenKind::Comma) {
                let item = self.parse_expr()?;
                b.push_node(item);
            }
        }
        self.expect(&mut b, TokenKind::RightParen)?;
        self.finish(b)
    }

    fn parse_subquery_expr(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::SubqueryExpr)?;
        let q = self.parse_select_with_parens()?;
        b.push_node(q);
        self.finish(b)
    }

    fn parse_exists(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::ExistsExpr)?;
        self.take(&mut b);
        let q = self.parse_select_with_parens()?;
        b.push_node(q);
        self.finish(b)
    }

    pub(crate) fn parse_row_constructor(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::RowExpr)?;
        self.take(&mut b);
        self.parse_paren_sep(&mut b, Self::parse_expr)?;
        self.finish(b)
    }

    fn parse_case(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::CaseExpr)?;
        self.take(&mut b);
        if !self.check_kw(Keyword::When) {
            let operand = self.parse_expr()?;
            b.push_node(operand);
        }
        loop {
            let mut when = self.begin(RuleKind::WhenClause)?;
            self.expect_kw(&mut when, Keyword::When)?;
            let cond = self.parse_expr()?;
            when.push_node(cond);
            self.expect_kw(&mut when, Keyword::Then)?;
            let result = self.parse_expr()?;
            when.push_node(result);
            self.attach(&mut b, when)?;
            if !self.check_kw(Keyword::When) {
                break;
            }
        }
        if self.check_kw(Keyword::Else) {
            let mut els = self.begin(RuleKind::ElseClause)?;
            self.take(&mut els);
            let result = self.parse_expr()?;
            els.push_node(result);
            self.attach(&mut b, els)?;
        }
        self.expect_kw(&mut b, Keyword::End)?;
        self.finish(b)
    }

    /// `CAST(expr AS type)`.
    fn parse_cast(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::CastExpr)?;
        self.take(&mut b);
        self.expect(&mut b, TokenKind::LeftParen)?;
        let operand = self.parse_expr()?;
        b.push_node(operand);
        self.expect_kw(&mut b, Keyword::As)?;
        let ty = self.parse_cast_type()?;
        b.push_node(ty);
        self.expect(&mut b, TokenKind::RightParen)?;
        self.finish(b)
    }

    /// MySQL `CONVERT(expr, type)` or `CONVERT(expr USING charset)`.
    fn parse_convert(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::ConvertExpr)?;
        self.take(&mut b);
        self.expect(&mut b, TokenKind::LeftParen)?;
        let operand = self.parse_expr()?;
        b.push_node(operand);
        if self.eat_kw(&mut b, Keyword::Using) {
            self.parse_collation_name(&mut b)?;
        } else {
            self.expect(&mut b, TokenKind::Comma)?;
            let ty = self.parse_cast_type()?;
            b.push_node(ty);
        }
        self.expect(&mut b, TokenKind::RightParen)?;
        self.finish(b)
    }

    /// TRIM, EXTRACT, SUBSTRING, POSITION with their keyword-separated forms.
    fn parse_special_function(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::SpecialFunctionCall)?;
        let name_tok = self.advance();
        let name = name_tok.text.to_ascii_uppercase();
        b.set_value(NodeValue::Name(obparse_ast::QualifiedName {
            parts: vec![literal::identifier(&name_tok, self.grammar(), self.options()).name],
            dblink: None,
        }));
        b.push_token(name_tok);
        self.expect(&mut b, TokenKind::LeftParen)?;
        match name.as_str() {
            "TRIM" => {
                let mode = self.eat_one_of(&mut b, &["LEADING", "TRAILING", "BOTH"]);
                if mode.is_some() && self.eat_kw(&mut b, Keyword::From) {
                    let source = self.parse_expr()?;
                    b.push_node(source);
                } else {
                    let first = self.parse_expr()?;
                    b.push_node(first);
                    if self.eat_kw(&mut b, Keyword::From) {
                        let source = self.parse_expr()?;
                        b.push_node(source);
                    } else if mode.is_some() {
                        return Err(self.err_expected("FROM"));
                    }
                }
            }
            "EXTRACT" => {
                if !self.peek().is_word() {
                    return Err(self.err_expected("date part"));
                }
                self.take(&mut b);
                self.expect_kw(&mut b, Keyword::From)?;
                let source = self.parse_expr()?;
                b.push_node(source);
            }
            "POSITION" => {
                let needle = self.parse_bit_expr()?;
                b.push_node(needle);
                self.expect_kw(&mut b, Keyword::In)?;
                let haystack = self.parse_expr()?;
                b.push_node(haystack);
            }
            _ => {
                // SUBSTRING(s, p[, n]) or SUBSTRING(s FROM p [FOR n])
                let source = self.parse_expr()?;
                b.push_node(source);
                if self.eat_kw(&mut b, Keyword::From) {
                    let start = self.parse_expr()?;
                    b.push_node(start);
                    if self.eat_kw(&mut b, Keyword::For) {
                        let len = self.parse_expr()?;
                        b.push_node(len);
                    }
                } else {
                    while self.eat(&mut b, TokenKind::Comma) {
                        let arg = self.parse_expr()?;
                        b.push_node(arg);
                    }
                }
            }
        }
        self.expect(&mut b, TokenKind::RightParen)?;
        self.finish(b)
    }

    /// `MATCH (cols) AGAINST (expr [modifier])`.
    fn parse_match_against(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::SpecialFunctionCall)?;
        let name = self.push_name_parts_any(&mut b)?;
        b.set_value(NodeValue::Name(name));
        self.parse_paren_sep(&mut b, Self::parse_column_or_call)?;
        self.expect_word(&mut b, "AGAINST")?;
        self.expect(&mut b, TokenKind::LeftParen)?;
        let query = self.parse_bit_expr()?;
        b.push_node(query);
        if self.eat_kw(&mut b, Keyword::In) {
            if self.eat_word(&mut b, "NATURAL") {
                self.expect_word(&mut b, "LANGUAGE")?;
            } else {
                self.expect_word(&mut b, "BOOLEAN")?;
            }
            self.expect_kw(&mut b, Keyword::Mode)?;
        }
        if self.eat_kw(&mut b, Keyword::With) {
            self.expect_kw(&mut b, Keyword::Query)?;
            self.expect_word(&mut b, "EXPANSION")?;
        }
        self.expect(&mut b, TokenKind::RightParen)?;
        self.finish(b)
    }

    // -----------------------------------------------------------------------
    // Names: columns and calls
    // -----------------------------------------------------------------------

    /// Column reference (`c`, `t.c`, `s.t.c`, `t.*`) or qualified function call.
    fn parse_column_or_call(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::ColumnRef)?;
        let name = self.push_name_parts(&mut b, 3)?;
        if self.peek() == TokenKind::LeftParen && !self.outer_join_marker_at(0) {
            b.retag(RuleKind::FunctionCall);
            b.set_value(NodeValue::Name(name));
            self.parse_call_args(&mut b)?;
            self.parse_call_suffix(&mut b)?;
            return self.finish(b);
        }
        if self.peek() == TokenKind::Dot && self.peek_nth(1) == TokenKind::Star {
            self.take(&mut b);
            self.take(&mut b);
        }
        b.set_value(NodeValue::Name(name));
        let column = self.finish(b)?;
        self.parse_column_suffix(column)
    }

    /// Oracle `(+)` starting `n` tokens ahead.
    fn outer_join_marker_at(&self, n: usize) -> bool {
        self.is_oracle()
            && self.peek_nth(n) == TokenKind::LeftParen
            && self.peek_nth(n + 1) == TokenKind::Plus
            && self.peek_nth(n + 2) == TokenKind::RightParen
    }

    /// Oracle `(+)` and MySQL `->` / `->>` after a column reference.
    fn parse_column_suffix(&mut self, column: ParseNode) -> PResult<ParseNode> {
        if self.outer_join_marker_at(0) {
            let mut b = self.begin_with(RuleKind::OuterJoinMarker, column)?;
            for _ in 0..3 {
                self.take(&mut b);
            }
            return self.finish(b);
        }
        if matches!(self.peek(), TokenKind::Arrow | TokenKind::DoubleArrow) {
            let op = if self.peek() == TokenKind::Arrow {
                Operator::JsonExtract
            } else {
                Operator::JsonUnquoteExtract
            };
            let mut b = self.begin_with(RuleKind::JsonAccessExpr, column)?;
            self.take(&mut b);
            if self.peek() != TokenKind::String {
                return Err(self.err_expected("string literal"));
            }
            let path = self.parse_string_literal()?;
            b.push_node(path);
            b.set_value(NodeValue::Operator(op));
            return self.finish(b);
        }
        Ok(column)
    }

    /// `name(args) [suffixes]` where `name` may be a keyword.
    fn parse_function_call(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::FunctionCall)?;
        let name = self.push_name_parts_any(&mut b)?;
        b.set_value(NodeValue::Name(name));
        self.parse_call_args(&mut b)?;
        self.parse_call_suffix(&mut b)?;
        self.finish(b)
    }

    pub(crate) fn parse_call_args(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        self.expect(b, TokenKind::LeftParen)?;
        if self.eat(b, TokenKind::RightParen) {
            return Ok(());
        }
        if self.eat(b, TokenKind::Star) {
            return self.expect(b, TokenKind::RightParen);
        }
        self.eat_one_of(b, &["DISTINCT", "ALL", "UNIQUE", "DISTINCTROW"]);
        loop {
            let arg = self.parse_call_arg()?;
            b.push_node(arg);
            if !self.eat(b, TokenKind::Comma) {
                break;
            }
        }
        if self.check_kw(Keyword::Order) {
            let order = self.parse_order_by_clause()?;
            b.push_node(order);
        }
        if self.is_mysql() && self.eat_kw(b, Keyword::Separator) {
            if self.peek() != TokenKind::String {
                return Err(self.err_expected("string literal"));
            }
            let sep = self.parse_string_literal()?;
            b.push_node(sep);
        }
        self.expect(b, TokenKind::RightParen)
    }

    fn parse_call_arg(&mut self) -> PResult<ParseNode> {
        if self.is_oracle() && self.peek_nth(1) == TokenKind::FatArrow && self.check_ident() {
            let mut b = self.begin(RuleKind::NamedArgument)?;
            let name = self.parse_identifier()?;
            b.push_node(name);
            self.take(&mut b);
            let value = self.parse_expr()?;
            b.push_node(value);
            return self.finish(b);
        }
        self.parse_expr()
    }

    /// `WITHIN GROUP (ORDER BY ..)`, `IGNORE|RESPECT NULLS`, `OVER (..)`.
    fn parse_call_suffix(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        if self.eat_words(b, &["WITHIN", "GROUP"]) {
            self.expect(b, TokenKind::LeftParen)?;
            let order = self.parse_order_by_clause()?;
            b.push_node(order);
            self.expect(b, TokenKind::RightParen)?;
        }
        if self.word_at(1, "NULLS") && (self.word_at(0, "IGNORE") || self.word_at(0, "RESPECT")) {
            self.take(b);
            self.take(b);
        }
        if self.check_kw(Keyword::Over) {
            let over = self.parse_over_clause()?;
            b.push_node(over);
        }
        Ok(())
    }

    fn parse_over_clause(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::OverClause)?;
        self.expect_kw(&mut b, Keyword::Over)?;
        if self.peek() == TokenKind::LeftParen {
            let spec = self.parse_window_spec()?;
            b.push_node(spec);
        } else {
            let name = self.parse_identifier()?;
            b.push_node(name);
        }
        self.finish(b)
    }

    /// `( [name] [PARTITION BY ..] [ORDER BY ..] [frame] )`
    pub(crate) fn parse_window_spec(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::WindowSpec)?;
        self.expect(&mut b, TokenKind::LeftParen)?;
        if self.check_ident()
            && !self.check_kw(Keyword::Partition)
            && !self.check_kw(Keyword::Order)
            && !self.check_kw(Keyword::Rows)
            && !self.check_kw(Keyword::Range)
        {
            let base = self.parse_identifier()?;
            b.push_node(base);
        }
        if self.eat_kw(&mut b, Keyword::Partition) {
            self.expect_kw(&mut b, Keyword::By)?;
            let keys = self.parse_expr_list()?;
            b.push_node(keys);
        }
        if self.check_kw(Keyword::Order) {
            let order = self.parse_order_by_clause()?;
            b.push_node(order);
        }
        if self.check_kw(Keyword::Rows) || self.check_kw(Keyword::Range) {
            let frame = self.parse_window_frame()?;
            b.push_node(frame);
        }
        self.expect(&mut b, TokenKind::RightParen)?;
        self.finish(b)
    }

    fn parse_window_frame(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::WindowFrame)?;
        self.take(&mut b);
        if self.eat_kw(&mut b, Keyword::Between) {
            let start = self.parse_frame_bound()?;
            b.push_node(start);
            self.expect_kw(&mut b, Keyword::And)?;
            let end = self.parse_frame_bound()?;
            b.push_node(end);
        } else {
            let start = self.parse_frame_bound()?;
            b.push_node(start);
        }
        self.finish(b)
    }

    fn parse_frame_bound(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::FrameBound)?;
        if self.eat_kw(&mut b, Keyword::Unbounded) {
            self.expect_one_of(&mut b, &["PRECEDING", "FOLLOWING"])?;
        } else if self.eat_kw(&mut b, Keyword::Current) {
            self.expect_kw(&mut b, Keyword::Row)?;
        } else {
            let offset = self.parse_bit_expr()?;
            b.push_node(offset);
            self.expect_one_of(&mut b, &["PRECEDING", "FOLLOWING"])?;
        }
        self.finish(b)
    }
}

/// Scope and name of a `@user` or `@@[scope.]system` variable token.
fn variable_of(text: &str) -> Variable {
    let strip_quotes = |s: &str| {
        let s = s.trim_matches(['\'', '"', '`']);
        s.to_owned()
    };
    if let Some(rest) = text.strip_prefix("@@") {
        if let Some((scope, name)) = rest.split_once('.') {
            let scope = match scope.to_ascii_lowercase().as_str() {
                "global" => Some(VariableScope::Global),
                "session" => Some(VariableScope::Session),
                "local" => Some(VariableScope::Local),
                _ => None,
            };
            if let Some(scope) = scope {
                return Variable {
                    scope,
                    name: name.to_ascii_lowercase(),
                };
            }
        }
        return Variable {
            scope: VariableScope::System,
            name: rest.to_ascii_lowercase(),
        };
    }
    Variable {
        scope: VariableScope::User,
        name: strip_quotes(text.trim_start_matches('@')),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_scopes() {
        assert_eq!(
            variable_of("@@global.Max_Connections"),
            Variable {
                scope: VariableScope::Global,
                name: "max_connections".to_owned()
            }
        );
        assert_eq!(variable_of("@@autocommit").scope, VariableScope::System);
        assert_eq!(variable_of("@'my var'").name, "my var");
        assert_eq!(variable_of("@v").scope, VariableScope::User);
    }

    #[test]
    fn interval_units_are_unique() {
        let mut units = INTERVAL_UNITS.to_vec();
        units.sort_unstable();
        units.dedup();
        assert_eq!(units.len(), INTERVAL_UNITS.len());
    }
}
