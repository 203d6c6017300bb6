//! Dialect-aware SQL lexer.
//!
//! Produces a complete token stream ending in `Eof`. Comments and whitespace
//! are dropped, except `/*+ ... */` directly after a hint-accepting keyword,
//! which becomes a `HintComment` token for the hint sub-parser. Every lexical
//! error is paired with an `Invalid` token covering the offending text, so the
//! parser can tell which statement the error belongs to.

use memchr::{memchr, memchr2, memchr_iter, memmem, memrchr};
use obparse_ast::{Token, TokenKind};
use obparse_error::{LexicalError, LexicalErrorKind};
use obparse_types::{Charset, ParseOptions, SourcePosition, Span};

use crate::keywords::{DialectFeatures, DialectGrammar};

/// Keywords after which a `/*+` comment is a hint rather than a comment.
const HINT_KEYWORDS: &[&str] = &[
    "SELECT", "INSERT", "REPLACE", "UPDATE", "DELETE", "MERGE", "LOAD",
];

/// Tokens plus the lexical errors found while producing them.
#[derive(Debug, Clone)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexicalError>,
}

pub struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: u32,
    col: u32,
    grammar: &'static DialectGrammar,
    options: &'a ParseOptions,
    tokens: Vec<Token>,
    errors: Vec<LexicalError>,
    in_exec_comment: bool,
    halted: bool,
}

#[derive(Clone, Copy)]
struct Mark {
    start: usize,
    line: u32,
    col: u32,
}

fn offset(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn count_chars(bytes: &[u8]) -> u32 {
    offset(bytes.iter().filter(|&&b| (b & 0xC0) != 0x80).count())
}

const fn is_ascii_ident(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(src: &'a str, grammar: &'static DialectGrammar, options: &'a ParseOptions) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
            grammar,
            options,
            tokens: Vec::with_capacity(src.len() / 4 + 1),
            errors: Vec::new(),
            in_exec_comment: false,
            halted: false,
        }
    }

    /// Lex the whole input.
    #[must_use]
    pub fn tokenize(mut self) -> LexOutput {
        loop {
            self.skip_trivia();
            if self.halted || self.pos >= self.bytes.len() {
                break;
            }
            self.lex_token();
            if self.halted {
                break;
            }
        }
        let end = self.bytes.len();
        let mark = Mark {
            start: end,
            line: self.line,
            col: self.col,
        };
        self.pos = end;
        self.push(TokenKind::Eof, mark);
        tracing::trace!(
            target: "obparse::lexer",
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            "tokenized"
        );
        LexOutput {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    // -----------------------------------------------------------------------
    // Cursor
    // -----------------------------------------------------------------------

    fn byte(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    const fn mark(&self) -> Mark {
        Mark {
            start: self.pos,
            line: self.line,
            col: self.col,
        }
    }

    fn bump_to(&mut self, end: usize) {
        let end = end.min(self.bytes.len());
        let slice = &self.bytes[self.pos..end];
        match memrchr(b'\n', slice) {
            Some(last_nl) => {
                self.line += offset(memchr_iter(b'\n', slice).count());
                self.col = 1 + count_chars(&slice[last_nl + 1..]);
            }
            None => self.col += count_chars(slice),
        }
        self.pos = end;
    }

    fn bump(&mut self, n: usize) {
        self.bump_to(self.pos + n);
    }

    fn has(&self, feature: DialectFeatures) -> bool {
        self.grammar.has(feature)
    }

    fn push(&mut self, kind: TokenKind, mark: Mark) {
        self.tokens.push(Token {
            kind,
            text: self.src[mark.start..self.pos].to_owned(),
            span: Span::new(offset(mark.start), offset(self.pos)),
            line: mark.line,
            col: mark.col,
            mode: self.grammar.mode,
        });
    }

    /// Record an error covering `mark..self.pos` and emit the matching invalid token.
    fn fail(&mut self, kind: LexicalErrorKind, message: String, mark: Mark) {
        self.errors.push(LexicalError::new(
            kind,
            message,
            Span::new(offset(mark.start), offset(self.pos)),
            SourcePosition::new(offset(mark.start), mark.line, mark.col),
        ));
        self.push(TokenKind::Invalid, mark);
        if !self.options.error_recovery {
            self.halted = true;
        }
    }

    /// Consume the rest of the input as one invalid token.
    fn fail_to_end(&mut self, kind: LexicalErrorKind, message: &str, mark: Mark) {
        self.bump_to(self.bytes.len());
        self.fail(kind, message.to_owned(), mark);
    }

    // -----------------------------------------------------------------------
    // Trivia
    // -----------------------------------------------------------------------

    fn hint_allowed(&self) -> bool {
        self.tokens.last().is_some_and(|t| {
            t.kind == TokenKind::HintComment
                || (t.kind.is_word() && HINT_KEYWORDS.iter().any(|k| t.is_word(k)))
        })
    }

    fn skip_line(&mut self) {
        let end = memchr(b'\n', &self.bytes[self.pos..]).map_or(self.bytes.len(), |i| self.pos + i);
        self.bump_to(end);
    }

    fn skip_trivia(&mut self) {
        while let Some(b) = self.byte(0) {
            match b {
                b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C => self.bump(1),
                b'-' if self.byte(1) == Some(b'-') => {
                    let needs_space = self.has(DialectFeatures::DASH_COMMENT_NEEDS_SPACE);
                    let follower = self.byte(2);
                    if needs_space && follower.is_some_and(|c| !c.is_ascii_whitespace()) {
                        return;
                    }
                    self.skip_line();
                }
                b'#' if self.has(DialectFeatures::HASH_AND_EXEC_COMMENTS) => self.skip_line(),
                b'/' if self.byte(1) == Some(b'*') => {
                    if self.byte(2) == Some(b'+') && self.hint_allowed() {
                        return;
                    }
                    if self.byte(2) == Some(b'!')
                        && self.has(DialectFeatures::HASH_AND_EXEC_COMMENTS)
                    {
                        // Executable comment: drop the markers and the optional
                        // version number, lex the body as ordinary SQL.
                        self.bump(3);
                        let digits = self.bytes[self.pos..]
                            .iter()
                            .take(6)
                            .take_while(|c| c.is_ascii_digit())
                            .count();
                        self.bump(digits);
                        self.in_exec_comment = true;
                        continue;
                    }
                    let mark = self.mark();
                    match memmem::find(&self.bytes[self.pos + 2..], b"*/") {
                        Some(i) => self.bump(i + 4),
                        None => {
                            self.fail_to_end(
                                LexicalErrorKind::UnterminatedComment,
                                "unterminated block comment",
                                mark,
                            );
                            return;
                        }
                    }
                }
                b'*' if self.in_exec_comment && self.byte(1) == Some(b'/') => {
                    self.bump(2);
                    self.in_exec_comment = false;
                }
                0x80.. => match self.src[self.pos..].chars().next() {
                    Some(c) if c.is_whitespace() => self.bump(c.len_utf8()),
                    _ => return,
                },
                _ => return,
            }
        }
    }

    // -----------------------------------------------------------------------
    // Tokens
    // -----------------------------------------------------------------------

    fn lex_token(&mut self) {
        let mark = self.mark();
        let Some(b) = self.byte(0) else { return };
        let next = self.byte(1);
        match b {
            b'\'' => self.lex_string(TokenKind::String, 0, b'\''),
            b'"' if self.has(DialectFeatures::DOUBLE_QUOTE_STRING) => {
                self.lex_string(TokenKind::String, 0, b'"');
            }
            b'"' if self.has(DialectFeatures::DOUBLE_QUOTE_IDENT) => self.lex_quoted_ident(b'"'),
            b'`' if self.has(DialectFeatures::BACKTICK_IDENT) => self.lex_quoted_ident(b'`'),
            b'N' | b'n' if next == Some(b'\'') => self.lex_string(TokenKind::NationalString, 1, b'\''),
            b'X' | b'x' if next == Some(b'\'') => self.lex_prefixed_literal(TokenKind::HexString),
            b'B' | b'b' if next == Some(b'\'') => self.lex_prefixed_literal(TokenKind::BitString),
            b'Q' | b'q' if next == Some(b'\'') && self.has(DialectFeatures::Q_QUOTE) => {
                self.lex_q_quote();
            }
            b'0'..=b'9' => self.lex_number(),
            b'.' if next.is_some_and(|c| c.is_ascii_digit()) && !self.after_operand() => {
                self.lex_number();
            }
            b'@' => self.lex_variable(),
            b':' if self.has(DialectFeatures::ORACLE_OPERATORS)
                && next.is_some_and(|c| is_ascii_ident(c) || c >= 0x80) =>
            {
                self.bump(1);
                self.scan_ident_tail();
                self.push(TokenKind::NamedParam, mark);
            }
            b'/' if next == Some(b'*') => self.lex_hint(),
            _ if is_ascii_ident(b) || b == b'$' || b >= 0x80 => self.lex_word(),
            _ => self.lex_operator(b, next),
        }
    }

    /// True when the previous token ends an operand, so `.5` must be `.` `5`.
    /// Reserved keywords never name anything, so a decimal may follow them.
    fn after_operand(&self) -> bool {
        self.tokens.last().is_some_and(|t| match t.kind {
            TokenKind::Ident | TokenKind::QuotedIdent | TokenKind::RightParen => true,
            TokenKind::Keyword(kw) => !self.grammar.keywords.is_reserved(kw),
            _ => false,
        })
    }

    fn is_ident_byte(&self, b: u8) -> bool {
        is_ascii_ident(b)
            || b >= 0x80
            || b == b'$'
            || (b == b'#' && self.has(DialectFeatures::DOLLAR_HASH_IN_IDENT))
    }

    fn scan_ident_tail(&mut self) {
        let mut end = self.pos;
        while let Some(&b) = self.bytes.get(end) {
            if b >= 0x80 {
                match self.src[end..].chars().next() {
                    Some(c) if c.is_alphanumeric() => end += c.len_utf8(),
                    _ => break,
                }
            } else if self.is_ident_byte(b) {
                end += 1;
            } else {
                break;
            }
        }
        self.bump_to(end);
    }

    fn lex_word(&mut self) {
        let mark = self.mark();
        if self.byte(0).is_some_and(|b| b >= 0x80)
            && !self.src[self.pos..].chars().next().is_some_and(char::is_alphabetic)
        {
            self.lex_unexpected(mark);
            return;
        }
        self.scan_ident_tail();
        let word = &self.src[mark.start..self.pos];

        if word.starts_with('_')
            && self.has(DialectFeatures::CHARSET_INTRODUCERS)
            && matches!(self.byte(0), Some(b'\'' | b'"'))
        {
            if Charset::from_name(&word[1..]).is_some() {
                self.push(TokenKind::CharsetIntroducer, mark);
            } else {
                let message = format!("unknown character set introducer '{word}'");
                self.fail(LexicalErrorKind::UnknownCharset, message, mark);
            }
            return;
        }

        if let Some((kw, _)) = self.grammar.keywords.classify(word) {
            self.push(TokenKind::Keyword(kw), mark);
            return;
        }
        let len = word.chars().count();
        if len > self.options.max_identifier_length {
            let message = format!(
                "identifier is {len} characters long, maximum is {}",
                self.options.max_identifier_length
            );
            self.fail(LexicalErrorKind::IdentifierTooLong, message, mark);
            return;
        }
        self.push(TokenKind::Ident, mark);
    }

    fn lex_number(&mut self) {
        let mark = self.mark();
        let digits = |bytes: &[u8], from: usize| {
            bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count()
        };

        if self.byte(0) == Some(b'0') {
            let radix = match self.byte(1) {
                Some(b'x' | b'X') => Some((TokenKind::HexString, 16)),
                Some(b'b' | b'B') => Some((TokenKind::BitString, 2)),
                _ => None,
            };
            if let Some((kind, radix)) = radix {
                let body = self.bytes[self.pos + 2..]
                    .iter()
                    .take_while(|b| char::from(**b).is_digit(radix))
                    .count();
                let after = self.byte(2 + body);
                if body > 0 && !after.is_some_and(|b| self.is_ident_byte(b)) {
                    self.bump(2 + body);
                    self.push(kind, mark);
                    return;
                }
            }
        }

        let mut end = self.pos + digits(self.bytes, self.pos);
        let int_end = end;
        let mut kind = TokenKind::Integer;
        if self.bytes.get(end) == Some(&b'.') {
            end += 1;
            end += digits(self.bytes, end);
            kind = TokenKind::Decimal;
        }
        if matches!(self.bytes.get(end), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(self.bytes.get(end + 1), Some(b'+' | b'-')));
            let exp = digits(self.bytes, end + 1 + sign);
            if exp > 0 {
                end += 1 + sign + exp;
                kind = TokenKind::Float;
            }
        }

        let follower = self.bytes.get(end).copied();
        if kind == TokenKind::Integer
            && int_end > self.pos
            && self.has(DialectFeatures::DIGIT_LEADING_IDENT)
            && follower.is_some_and(|b| is_ascii_ident(b) || b == b'$' || b >= 0x80)
        {
            // `1abc` is an identifier in MySQL.
            self.scan_ident_tail();
            self.push(TokenKind::Ident, mark);
            return;
        }
        if self.has(DialectFeatures::BINARY_FLOAT_SUFFIX)
            && matches!(follower, Some(b'f' | b'F' | b'd' | b'D'))
            && !self.bytes.get(end + 1).is_some_and(|&b| self.is_ident_byte(b))
        {
            end += 1;
            kind = TokenKind::BinaryFloat;
        }
        self.bump_to(end);
        self.push(kind, mark);
    }

    /// Scan a quoted body starting at the opening quote at `self.pos + skip`.
    /// Returns the end offset just past the closing quote.
    fn scan_quoted(&self, skip: usize, quote: u8, backslash: bool) -> Option<usize> {
        let mut i = self.pos + skip + 1;
        loop {
            let rest = &self.bytes[i..];
            let hit = if backslash {
                memchr2(quote, b'\\', rest)
            } else {
                memchr(quote, rest)
            }?;
            let at = i + hit;
            if self.bytes[at] == b'\\' {
                i = at + 2;
                if i > self.bytes.len() {
                    return None;
                }
            } else if self.bytes.get(at + 1) == Some(&quote) {
                i = at + 2;
            } else {
                return Some(at + 1);
            }
        }
    }

    fn lex_string(&mut self, kind: TokenKind, skip: usize, quote: u8) {
        let mark = self.mark();
        let backslash = self.has(DialectFeatures::BACKSLASH_ESCAPES);
        match self.scan_quoted(skip, quote, backslash) {
            Some(end) => {
                self.bump_to(end);
                self.push(kind, mark);
            }
            None => self.fail_to_end(
                LexicalErrorKind::UnterminatedString,
                "unterminated string literal",
                mark,
            ),
        }
    }

    fn lex_prefixed_literal(&mut self, kind: TokenKind) {
        let mark = self.mark();
        let Some(end) = self.scan_quoted(1, b'\'', false) else {
            self.fail_to_end(
                LexicalErrorKind::UnterminatedString,
                "unterminated string literal",
                mark,
            );
            return;
        };
        let body = &self.src[self.pos + 2..end - 1];
        let valid = match kind {
            TokenKind::HexString => body.bytes().all(|b| b.is_ascii_hexdigit()),
            _ => body.bytes().all(|b| b == b'0' || b == b'1'),
        };
        self.bump_to(end);
        if valid {
            self.push(kind, mark);
        } else {
            let message = format!("malformed {}", kind.describe());
            self.fail(LexicalErrorKind::MalformedNumber, message, mark);
        }
    }

    fn lex_q_quote(&mut self) {
        let mark = self.mark();
        let Some(open) = self.src[self.pos + 2..].chars().next() else {
            self.fail_to_end(
                LexicalErrorKind::UnterminatedString,
                "unterminated q-quoted string",
                mark,
            );
            return;
        };
        let close = match open {
            '[' => ']',
            '(' => ')',
            '{' => '}',
            '<' => '>',
            c => c,
        };
        let body_start = self.pos + 2 + open.len_utf8();
        let mut needle = [0u8; 5];
        let needle = {
            let n = close.encode_utf8(&mut needle[..4]).len();
            needle[n] = b'\'';
            &needle[..=n]
        };
        match memmem::find(&self.bytes[body_start..], needle) {
            Some(i) => {
                self.bump_to(body_start + i + needle.len());
                self.push(TokenKind::String, mark);
            }
            None => self.fail_to_end(
                LexicalErrorKind::UnterminatedString,
                "unterminated q-quoted string",
                mark,
            ),
        }
    }

    fn lex_quoted_ident(&mut self, quote: u8) {
        let mark = self.mark();
        let Some(end) = self.scan_quoted(0, quote, false) else {
            self.fail_to_end(
                LexicalErrorKind::UnterminatedQuotedIdentifier,
                "unterminated quoted identifier",
                mark,
            );
            return;
        };
        self.bump_to(end);
        let len = self.src[mark.start + 1..end - 1].chars().count();
        if len > self.options.max_identifier_length {
            let message = format!(
                "identifier is {len} characters long, maximum is {}",
                self.options.max_identifier_length
            );
            self.fail(LexicalErrorKind::IdentifierTooLong, message, mark);
            return;
        }
        self.push(TokenKind::QuotedIdent, mark);
    }

    fn lex_variable(&mut self) {
        let mark = self.mark();
        if self.byte(1) == Some(b'@') {
            if !self.has(DialectFeatures::MYSQL_OPERATORS) {
                self.lex_unexpected(mark);
                return;
            }
            // `@@name`, `@@global.name`, `@@session.name`
            self.bump(2);
            self.scan_ident_tail();
            if self.byte(0) == Some(b'.') && self.byte(1).is_some_and(is_ascii_ident) {
                self.bump(1);
                self.scan_ident_tail();
            }
            if self.pos - mark.start == 2 {
                self.lex_unexpected(mark);
                return;
            }
            self.push(TokenKind::SystemVariable, mark);
            return;
        }
        match self.byte(1) {
            Some(q @ (b'\'' | b'"' | b'`')) => match self.scan_quoted(1, q, false) {
                Some(end) => {
                    self.bump_to(end);
                    self.push(TokenKind::UserVariable, mark);
                }
                None => self.fail_to_end(
                    LexicalErrorKind::UnterminatedString,
                    "unterminated variable name",
                    mark,
                ),
            },
            Some(b) if is_ascii_ident(b) || b == b'$' || b >= 0x80 => {
                self.bump(1);
                self.scan_ident_tail();
                // MySQL allows dots inside user variable names.
                while self.has(DialectFeatures::MYSQL_OPERATORS)
                    && self.byte(0) == Some(b'.')
                    && self.byte(1).is_some_and(is_ascii_ident)
                {
                    self.bump(1);
                    self.scan_ident_tail();
                }
                self.push(TokenKind::UserVariable, mark);
            }
            _ => self.lex_unexpected(mark),
        }
    }

    fn lex_hint(&mut self) {
        let mark = self.mark();
        match memmem::find(&self.bytes[self.pos + 3..], b"*/") {
            Some(i) => {
                self.bump(i + 5);
                self.push(TokenKind::HintComment, mark);
            }
            None => self.fail_to_end(
                LexicalErrorKind::UnterminatedHint,
                "unterminated hint comment",
                mark,
            ),
        }
    }

    fn lex_operator(&mut self, b: u8, next: Option<u8>) {
        let mark = self.mark();
        let mysql = self.has(DialectFeatures::MYSQL_OPERATORS);
        let oracle = self.has(DialectFeatures::ORACLE_OPERATORS);
        let (kind, len) = match (b, next) {
            (b'<', Some(b'=')) if mysql && self.byte(2) == Some(b'>') => (TokenKind::NullSafeEq, 3),
            (b'<', Some(b'=')) => (TokenKind::Le, 2),
            (b'<', Some(b'>')) => (TokenKind::NotEq, 2),
            (b'<', Some(b'<')) if mysql => (TokenKind::ShiftLeft, 2),
            (b'<', _) => (TokenKind::Lt, 1),
            (b'>', Some(b'=')) => (TokenKind::Ge, 2),
            (b'>', Some(b'>')) if mysql => (TokenKind::ShiftRight, 2),
            (b'>', _) => (TokenKind::Gt, 1),
            (b'=', Some(b'>')) if oracle => (TokenKind::FatArrow, 2),
            (b'=', _) => (TokenKind::Eq, 1),
            (b'!', Some(b'=')) => (TokenKind::NotEq, 2),
            (b'!', _) if mysql => (TokenKind::Bang, 1),
            (b'^', Some(b'=')) if oracle => (TokenKind::NotEq, 2),
            (b'^', _) => (TokenKind::Caret, 1),
            (b'~', Some(b'=')) if oracle => (TokenKind::NotEq, 2),
            (b'~', _) => (TokenKind::Tilde, 1),
            (b'|', Some(b'|')) => (TokenKind::DoublePipe, 2),
            (b'|', _) => (TokenKind::Pipe, 1),
            (b'&', Some(b'&')) if mysql => (TokenKind::DoubleAmp, 2),
            (b'&', _) => (TokenKind::Ampersand, 1),
            (b'-', Some(b'>')) if mysql && self.byte(2) == Some(b'>') => (TokenKind::DoubleArrow, 3),
            (b'-', Some(b'>')) if mysql => (TokenKind::Arrow, 2),
            (b'-', _) => (TokenKind::Minus, 1),
            (b':', Some(b'=')) if mysql => (TokenKind::Assign, 2),
            (b':', _) => (TokenKind::Colon, 1),
            (b'+', _) => (TokenKind::Plus, 1),
            (b'*', _) => (TokenKind::Star, 1),
            (b'/', _) => (TokenKind::Slash, 1),
            (b'%', _) => (TokenKind::Percent, 1),
            (b'(', _) => (TokenKind::LeftParen, 1),
            (b')', _) => (TokenKind::RightParen, 1),
            (b'[', _) => (TokenKind::LeftBracket, 1),
            (b']', _) => (TokenKind::RightBracket, 1),
            (b',', _) => (TokenKind::Comma, 1),
            (b'.', _) => (TokenKind::Dot, 1),
            (b';', _) => (TokenKind::Semicolon, 1),
            (b'?', _) => (TokenKind::QuestionMark, 1),
            _ => {
                self.lex_unexpected(mark);
                return;
            }
        };
        self.bump(len);
        self.push(kind, mark);
    }

    /// Unrecognized input: one invalid token up to the next whitespace or `;`.
    fn lex_unexpected(&mut self, mark: Mark) {
        let rest = &self.src[self.pos..];
        let len = rest
            .char_indices()
            .find(|&(i, c)| i > 0 && (c.is_whitespace() || c == ';'))
            .map_or(rest.len(), |(i, _)| i);
        let shown: String = rest[..len].chars().take(16).collect();
        self.bump(len);
        self.fail(
            LexicalErrorKind::UnexpectedCharacter,
            format!("unexpected character sequence '{shown}'"),
            mark,
        );
    }
}

/// Tokenize `source` with the grammar profile of `grammar`.
#[must_use]
pub fn tokenize(source: &str, grammar: &'static DialectGrammar, options: &ParseOptions) -> LexOutput {
    Lexer::new(source, grammar, options).tokenize()
}

#[cfg(test)]
mod tests {
    use obparse_ast::Keyword;
    use obparse_types::DialectMode;

    use super::*;
    use crate::keywords::grammar;

    fn lex_in(mode: DialectMode, sql: &str) -> LexOutput {
        let options = ParseOptions::for_dialect(mode);
        tokenize(sql, grammar(mode), &options)
    }

    fn kinds(mode: DialectMode, sql: &str) -> Vec<TokenKind> {
        let out = lex_in(mode, sql);
        assert!(out.errors.is_empty(), "unexpected errors: {:?}", out.errors);
        out.tokens.into_iter().map(|t| t.kind).collect()
    }

    fn texts(mode: DialectMode, sql: &str) -> Vec<String> {
        lex_in(mode, sql).tokens.into_iter().map(|t| t.text).collect()
    }

    const MY: DialectMode = DialectMode::MySqlCompatible;
    const ORA: DialectMode = DialectMode::OracleCompatible;

    #[test]
    fn select_tokens_and_positions() {
        let out = lex_in(MY, "SELECT a,\n  1.5 FROM t;");
        let kinds: Vec<TokenKind> = out.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Ident,
                TokenKind::Comma,
                TokenKind::Decimal,
                TokenKind::Keyword(Keyword::From),
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
        let dec = &out.tokens[3];
        assert_eq!((dec.line, dec.col), (2, 3));
        assert_eq!(dec.span, Span::new(12, 15));
        assert!(out.tokens.iter().all(|t| t.mode == MY));
    }

    #[test]
    fn quoting_differs_by_dialect() {
        assert_eq!(
            kinds(MY, "`a b` \"s\""),
            vec![TokenKind::QuotedIdent, TokenKind::String, TokenKind::Eof]
        );
        assert_eq!(
            kinds(ORA, "\"a b\" 's'"),
            vec![TokenKind::QuotedIdent, TokenKind::String, TokenKind::Eof]
        );
        let out = lex_in(ORA, "`a`");
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].kind, LexicalErrorKind::UnexpectedCharacter);
    }

    #[test]
    fn mysql_backslash_escapes_do_not_end_string() {
        assert_eq!(
            texts(MY, r"'it\'s' 'a''b'"),
            vec![r"'it\'s'", "'a''b'", ""]
        );
        // Oracle has no backslash escapes: the backslash is literal.
        assert_eq!(texts(ORA, r"'a\' x"), vec![r"'a\'", "x", ""]);
    }

    #[test]
    fn comments_by_dialect() {
        assert_eq!(
            kinds(MY, "1 # note\n2 -- note\n3 /* block */ 4"),
            vec![
                TokenKind::Integer,
                TokenKind::Integer,
                TokenKind::Integer,
                TokenKind::Integer,
                TokenKind::Eof
            ]
        );
        // `--x` is not a comment in MySQL: minus minus x.
        assert_eq!(
            kinds(MY, "1--x"),
            vec![
                TokenKind::Integer,
                TokenKind::Minus,
                TokenKind::Minus,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
        assert_eq!(kinds(ORA, "1 --x"), vec![TokenKind::Integer, TokenKind::Eof]);
    }

    #[test]
    fn executable_comment_body_is_lexed() {
        assert_eq!(
            texts(MY, "SELECT /*!40101 SQL_NO_CACHE */ 1"),
            vec!["SELECT", "SQL_NO_CACHE", "1", ""]
        );
    }

    #[test]
    fn hint_only_after_hint_keyword() {
        assert_eq!(
            kinds(MY, "SELECT /*+ INDEX(t i) */ 1"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::HintComment,
                TokenKind::Integer,
                TokenKind::Eof
            ]
        );
        assert_eq!(
            kinds(MY, "COMMIT /*+ INDEX(t i) */"),
            vec![TokenKind::Keyword(Keyword::Commit), TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_constructs_consume_rest() {
        for (sql, kind) in [
            ("SELECT 'abc", LexicalErrorKind::UnterminatedString),
            ("SELECT `abc", LexicalErrorKind::UnterminatedQuotedIdentifier),
            ("SELECT 1 /* abc", LexicalErrorKind::UnterminatedComment),
            ("SELECT /*+ abc", LexicalErrorKind::UnterminatedHint),
        ] {
            let out = lex_in(MY, sql);
            assert_eq!(out.errors.len(), 1, "{sql}");
            assert_eq!(out.errors[0].kind, kind, "{sql}");
            let invalid = &out.tokens[out.tokens.len() - 2];
            assert_eq!(invalid.kind, TokenKind::Invalid);
            assert_eq!(invalid.span.end as usize, sql.len());
        }
    }

    #[test]
    fn unexpected_character_resyncs_at_whitespace() {
        let out = lex_in(MY, "SELECT 1 \\\\x; SELECT 2");
        assert_eq!(out.errors.len(), 1);
        let texts: Vec<&str> = out.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["SELECT", "1", "\\\\x", ";", "SELECT", "2", ""]);
        assert_eq!(out.tokens[2].kind, TokenKind::Invalid);
    }

    #[test]
    fn lexer_halts_without_recovery() {
        let mut options = ParseOptions::for_dialect(MY);
        options.error_recovery = false;
        let out = tokenize("SELECT \\ 1; SELECT 2", grammar(MY), &options);
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        assert_eq!(out.tokens.len(), 3);
    }

    #[test]
    fn numbers() {
        assert_eq!(
            kinds(MY, "42 .5 1. 1e10 2.5E-3 0x1F X'0a' b'01' 0b11"),
            vec![
                TokenKind::Integer,
                TokenKind::Decimal,
                TokenKind::Decimal,
                TokenKind::Float,
                TokenKind::Float,
                TokenKind::HexString,
                TokenKind::HexString,
                TokenKind::BitString,
                TokenKind::BitString,
                TokenKind::Eof
            ]
        );
        assert_eq!(
            kinds(ORA, "1.5f 2d 3"),
            vec![
                TokenKind::BinaryFloat,
                TokenKind::BinaryFloat,
                TokenKind::Integer,
                TokenKind::Eof
            ]
        );
        assert_eq!(kinds(MY, "1abc"), vec![TokenKind::Ident, TokenKind::Eof]);
        let bad = lex_in(MY, "X'0G'");
        assert_eq!(bad.errors[0].kind, LexicalErrorKind::MalformedNumber);
        assert_eq!(bad.errors[0].message, "malformed hex literal");
        let bad = lex_in(MY, "b'012'");
        assert_eq!(bad.errors[0].message, "malformed bit literal");
    }

    #[test]
    fn dotted_decimal_after_identifier_is_member_access() {
        assert_eq!(
            kinds(MY, "t.5"),
            vec![TokenKind::Ident, TokenKind::Dot, TokenKind::Integer, TokenKind::Eof]
        );
    }

    #[test]
    fn dotted_decimal_after_reserved_keyword() {
        for mode in [MY, ORA] {
            assert_eq!(
                kinds(mode, "SELECT .5"),
                vec![TokenKind::Keyword(Keyword::Select), TokenKind::Decimal, TokenKind::Eof]
            );
            let toks = kinds(mode, "a AND .5");
            assert_eq!(toks[2], TokenKind::Decimal);
            assert_eq!(toks.len(), 4);
        }
    }

    #[test]
    fn variables_and_binds() {
        assert_eq!(
            kinds(MY, "@a @'b c' @@global.x ? :="),
            vec![
                TokenKind::UserVariable,
                TokenKind::UserVariable,
                TokenKind::SystemVariable,
                TokenKind::QuestionMark,
                TokenKind::Assign,
                TokenKind::Eof
            ]
        );
        assert_eq!(
            kinds(ORA, ":name :1 => ^= ~= ||"),
            vec![
                TokenKind::NamedParam,
                TokenKind::NamedParam,
                TokenKind::FatArrow,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::DoublePipe,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn mysql_operators() {
        assert_eq!(
            kinds(MY, "<=> -> ->> && << >> !"),
            vec![
                TokenKind::NullSafeEq,
                TokenKind::Arrow,
                TokenKind::DoubleArrow,
                TokenKind::DoubleAmp,
                TokenKind::ShiftLeft,
                TokenKind::ShiftRight,
                TokenKind::Bang,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn charset_introducer() {
        assert_eq!(
            kinds(MY, "_utf8mb4'x' _binary'y'"),
            vec![
                TokenKind::CharsetIntroducer,
                TokenKind::String,
                TokenKind::CharsetIntroducer,
                TokenKind::String,
                TokenKind::Eof
            ]
        );
        let out = lex_in(MY, "_klingon'x'");
        assert_eq!(out.errors[0].kind, LexicalErrorKind::UnknownCharset);
        // Not an introducer without an adjacent quote.
        assert_eq!(kinds(MY, "_col"), vec![TokenKind::Ident, TokenKind::Eof]);
    }

    #[test]
    fn oracle_q_quote_and_identifier_chars() {
        assert_eq!(
            texts(ORA, "q'[it's]' a$b#c"),
            vec!["q'[it's]'", "a$b#c", ""]
        );
        assert_eq!(
            kinds(ORA, "N'x'"),
            vec![TokenKind::NationalString, TokenKind::Eof]
        );
    }

    #[test]
    fn identifier_length_limit() {
        let long = "a".repeat(65);
        let out = lex_in(MY, &long);
        assert_eq!(out.errors[0].kind, LexicalErrorKind::IdentifierTooLong);
        let ok = lex_in(ORA, &long);
        assert!(ok.errors.is_empty());
    }

    #[test]
    fn keyword_classification_follows_dialect() {
        assert_eq!(
            kinds(MY, "limit minus"),
            vec![
                TokenKind::Keyword(Keyword::Limit),
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
        assert_eq!(
            kinds(ORA, "limit minus"),
            vec![
                TokenKind::Ident,
                TokenKind::Keyword(Keyword::Minus),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn multibyte_identifiers_and_columns() {
        let out = lex_in(MY, "SELECT 名前 FROM t");
        assert!(out.errors.is_empty());
        assert_eq!(out.tokens[1].text, "名前");
        assert_eq!(out.tokens[2].col, 11);
    }
}
