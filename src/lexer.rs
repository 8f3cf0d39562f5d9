//! SQL lexer producing a lossless token stream.

mod rules;

use alloc::borrow::Cow;

use crate::keywords::Keywords;
use crate::tokens::{Token, TokenType};

/// Pull-based tokenizer over a SQL source.
///
/// Every byte of the input ends up in exactly one token, so concatenating
/// the values of the produced tokens yields the input again. Characters no
/// rule recognizes become [`TokenType::Error`] tokens instead of failing.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: Cow<'a, str>,
    keywords: Cow<'a, Keywords>,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a lexer with the default keyword table.
    #[must_use]
    pub fn new(input: impl Into<Cow<'a, str>>) -> Self {
        Self {
            input: input.into(),
            keywords: Cow::Owned(Keywords::default()),
            pos: 0,
        }
    }

    /// Create a lexer sharing an existing keyword table.
    #[must_use]
    pub fn with_keywords(input: impl Into<Cow<'a, str>>, keywords: &'a Keywords) -> Self {
        Self {
            input: input.into(),
            keywords: Cow::Borrowed(keywords),
            pos: 0,
        }
    }

    /// Byte offset of the next token.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Rewind to the start of the input.
    pub fn restart(&mut self) {
        self.pos = 0;
    }

    /// The source being tokenized.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.input
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let rest = self.input.get(self.pos..).filter(|rest| !rest.is_empty())?;
        let keywords: &Keywords = &self.keywords;
        let (len, ttype) = rules::RULES
            .iter()
            .find_map(|rule| rule(rest, keywords))
            .unwrap_or_else(|| {
                let len = rest.chars().next().map_or(1, char::len_utf8);
                (len, TokenType::Error)
            });
        let token = Token::new(ttype, &rest[..len], self.pos);
        self.pos += len;
        Some(token)
    }
}

/// Tokenize `sql` with the default keyword table.
#[must_use]
pub fn tokenize(sql: &str) -> Lexer<'_> {
    Lexer::new(sql)
}
