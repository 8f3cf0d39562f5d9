//! Whitespace compaction.

use alloc::boxed::Box;
use core::iter::Peekable;

use super::{TokenFilter, TokenStream};
use crate::tokens::{Token, TokenType};

/// Compacts whitespace to the minimum that keeps tokens apart.
///
/// Leading and trailing whitespace is dropped, every other run of spaces
/// and newlines becomes a single space, and runs next to punctuation or a
/// comparison operator disappear entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripWhitespace;

impl TokenFilter for StripWhitespace {
    fn process<'a>(&'a self, stream: TokenStream<'a>) -> TokenStream<'a> {
        Box::new(Compact {
            tokens: stream.peekable(),
            after_glue: true,
        })
    }
}

/// Whether whitespace next to the token can be removed.
fn is_glue(token: &Token) -> bool {
    token.is_a(TokenType::Punctuation) || token.is_a(TokenType::Comparison)
}

struct Compact<'a> {
    tokens: Peekable<TokenStream<'a>>,
    /// Set at the start and after punctuation or comparisons.
    after_glue: bool,
}

impl Iterator for Compact<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let token = self.tokens.next()?;
            if !token.is_whitespace() {
                self.after_glue = is_glue(&token);
                return Some(token);
            }
            while self.tokens.next_if(Token::is_whitespace).is_some() {}
            let before_glue = self.tokens.peek().is_none_or(is_glue);
            if !self.after_glue && !before_glue {
                return Some(Token::new(TokenType::Whitespace, " ", token.pos()));
            }
        }
    }
}
