//! Filters plugged into a [`FilterStack`](crate::stack::FilterStack).
//!
//! Token filters rewrite the flat token stream before it is split into
//! statements; statement filters transform one split statement at a time
//! and may reject it.

mod strip_whitespace;

use alloc::boxed::Box;

pub use strip_whitespace::StripWhitespace;

use crate::errors::ParseError;
use crate::tokens::Token;
use crate::tree::Statement;

/// A lazy, owned stream of tokens.
pub type TokenStream<'a> = Box<dyn Iterator<Item = Token> + 'a>;

/// Pre-processing filter over the flat token stream.
pub trait TokenFilter: Send + Sync {
    /// Wrap `stream` into the filtered stream.
    fn process<'a>(&'a self, stream: TokenStream<'a>) -> TokenStream<'a>;

    /// Name used in logs and debug output.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Filter applied to each split statement before grouping.
pub trait StatementFilter: Send + Sync {
    /// Transform `statement`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the statement cannot be processed; only
    /// this statement is lost, the stream carries on.
    fn process(&self, statement: Statement) -> Result<Statement, ParseError>;

    /// Name used in logs and debug output.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
