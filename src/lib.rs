#![doc = include_str!("../README.md")]
#![no_std]
#![deny(clippy::mod_module_files)]

extern crate alloc;

pub mod dialects;
pub mod encoding;
pub mod errors;
pub mod filters;
pub mod grouping;
pub mod keywords;
pub mod lexer;
pub mod parsers;
pub mod splitter;
pub mod stack;
#[cfg(feature = "testing")]
pub mod testing;
pub mod tokens;
pub mod tree;

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

// Re-export main types
pub use dialects::mysql::{Column, ColumnAttribute, MysqlCreateTableFilter, TableCatalog};
pub use encoding::Encoding;
pub use errors::{DecodeError, Error, ParseError};
pub use filters::{StatementFilter, StripWhitespace, TokenFilter, TokenStream};
pub use grouping::GroupingPass;
pub use keywords::Keywords;
pub use lexer::{Lexer, tokenize};
pub use parsers::{GenericParser, MysqlParser, Parser, SqlParser, StackRouter, Statements};
pub use splitter::{Splitter, split_statements};
pub use stack::FilterStack;
pub use tokens::{Token, TokenType};
pub use tree::{GroupKind, Node, Statement, StatementType, TokenList};

/// Parse every statement of `sql` with the parser for `dialect`.
///
/// # Errors
///
/// Returns the first [`ParseError`] raised by a statement.
pub fn parse(sql: &str, dialect: Option<&str>) -> Result<Vec<Statement>, ParseError> {
    let parser = Parser::for_dialect(dialect);
    parsestream(&parser, sql).collect()
}

/// Lazily parse the statements of `sql` with `parser`.
///
/// A failing statement yields an `Err` without ending the stream.
pub fn parsestream<'a>(parser: &'a Parser, sql: &'a str) -> Statements<'a> {
    parser.parse(Cow::Borrowed(sql))
}

/// Decode `bytes` and parse every statement with the parser for `dialect`.
///
/// # Errors
///
/// Returns [`Error::Decode`] when the bytes are not valid in `encoding`,
/// otherwise the first statement failure as [`Error::Parse`].
pub fn parse_bytes(
    bytes: &[u8],
    encoding: Encoding,
    dialect: Option<&str>,
) -> Result<Vec<Statement>, Error> {
    let sql = encoding.decode(bytes)?;
    let parser = Parser::for_dialect(dialect);
    let statements: Vec<Statement> = parser.parse(sql).collect::<Result<_, _>>()?;
    Ok(statements)
}

/// Split `sql` into the trimmed text of its statements, without grouping.
///
/// ```
/// assert_eq!(sqlparse_rs::split("select 1;  select ';'\n"), ["select 1;", "select ';'"]);
/// ```
#[must_use]
pub fn split(sql: &str) -> Vec<String> {
    split_statements(tokenize(sql))
        .map(|statement| String::from(statement.value().trim()))
        .collect()
}
