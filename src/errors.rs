//! Submodule defining the errors used across the crate.

use alloc::string::String;

pub use crate::encoding::DecodeError;

/// Structural failures raised while analyzing a statement.
///
/// A failure aborts only the statement it was raised for; the statement
/// stream carries on with the next one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The statement handed to the `CREATE TABLE` analyzer is not one.
    #[error("Statement is not a CREATE TABLE statement")]
    NotCreateTable,
    /// No table name follows `TABLE`.
    #[error("Missing table name after TABLE at position {pos}")]
    MissingTableName {
        /// Byte offset where the name was expected.
        pos: usize,
    },
    /// `LIKE` is not followed by the name of the table to copy.
    #[error("Missing source table name after LIKE in CREATE TABLE `{table}`")]
    MissingLikeTable {
        /// The table being created.
        table: String,
    },
    /// The parenthesized column definitions are absent.
    #[error("Missing column definitions in CREATE TABLE `{table}`")]
    MissingColumnDefinitions {
        /// The table being created.
        table: String,
    },
    /// A clause such as `DEFAULT` or `COLLATE` has no value.
    #[error("Missing value for attribute `{attribute}` of column `{column}`")]
    MissingAttributeValue {
        /// The column being defined.
        column: String,
        /// The attribute keyword, lowercased.
        attribute: String,
    },
    /// A `bit` column default that is neither `b'...'` nor `0b...`.
    #[error("Invalid default `{value}` for bit column `{column}`")]
    InvalidBitDefault {
        /// The column being defined.
        column: String,
        /// The offending default as written.
        value: String,
    },
    /// A column name declared twice.
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),
    /// A type length parameter that is not a valid size.
    #[error("Invalid type length `{value}` for column `{column}`")]
    InvalidTypeLength {
        /// The column being defined.
        column: String,
        /// The offending parameter.
        value: String,
    },
    /// The statement was not rewritten into a column catalog.
    #[error("Statement carries no CREATE TABLE catalog")]
    NotACatalog,
}

/// Errors surfaced by the top-level entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input bytes could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A statement failed structural analysis.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
