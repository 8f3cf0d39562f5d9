//! MySQL `CREATE TABLE` analysis.
//!
//! [`MysqlCreateTableFilter`] rewrites a routed statement into catalog
//! groups, and [`TableCatalog`] reads those groups back as plain data.

mod catalog;
mod create_table;
mod quoting;

pub use catalog::{Column, ColumnAttribute, TableCatalog};
pub use create_table::MysqlCreateTableFilter;
pub use quoting::{clean_quote, unescape_literal};
