//! Property checks shared by the fuzz targets and the regression tests.
//!
//! This module is gated behind the `testing` feature.
//!
//! # Provided helpers
//!
//! - [`test_lossless`]: every statement of the generic parser reproduces its source
//! - [`test_grouping_idempotent`]: grouping an already grouped statement changes nothing
//! - [`test_mysql_parse`]: the MySQL parser never panics and its catalogs are consistent
//! - [`FuzzScript`]: structured SQL-like input built from [`arbitrary`]

use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use arbitrary::Arbitrary;

use crate::grouping::{GroupingPass, group};
use crate::parsers::{Parser, SqlParser};
use crate::{Statement, TableCatalog, tokenize};

/// One piece of a generated script.
#[derive(Debug, Clone, Arbitrary)]
pub enum Fragment {
    /// A keyword from a fixed list.
    Keyword(u8),
    /// A bare or quoted name.
    Name(String),
    /// A single-quoted literal with doubled quotes escaped.
    Literal(String),
    /// An integer literal.
    Number(u32),
    /// `(`
    Open,
    /// `)`
    Close,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `;`
    Semicolon,
    /// A run of spaces and newlines.
    Space(u8),
    /// Raw text.
    Raw(String),
}

const FRAGMENT_KEYWORDS: &[&str] = &[
    "CREATE TABLE",
    "CREATE TEMPORARY TABLE",
    "SELECT",
    "FROM",
    "WHERE",
    "ORDER BY",
    "LIKE",
    "int",
    "varchar",
    "bit",
    "enum",
    "NOT NULL",
    "DEFAULT",
    "PRIMARY KEY",
    "unsigned",
    "collate",
    "b'01'",
    "0b1",
    "-",
];

impl Fragment {
    fn write(&self, sql: &mut String) {
        match self {
            Fragment::Keyword(index) => {
                sql.push_str(FRAGMENT_KEYWORDS[usize::from(*index) % FRAGMENT_KEYWORDS.len()]);
            }
            Fragment::Name(name) => {
                sql.push('`');
                sql.push_str(&name.replace('`', "``"));
                sql.push('`');
            }
            Fragment::Literal(text) => {
                sql.push('\'');
                sql.push_str(&text.replace('\\', "\\\\").replace('\'', "''"));
                sql.push('\'');
            }
            Fragment::Number(number) => {
                sql.push_str(&number.to_string());
            }
            Fragment::Open => sql.push('('),
            Fragment::Close => sql.push(')'),
            Fragment::Comma => sql.push(','),
            Fragment::Dot => sql.push('.'),
            Fragment::Semicolon => sql.push(';'),
            Fragment::Space(width) => {
                for i in 0..=(width % 4) {
                    sql.push(if i % 3 == 2 { '\n' } else { ' ' });
                }
            }
            Fragment::Raw(text) => sql.push_str(text),
        }
    }
}

/// A generated script: fragments joined by single spaces.
#[derive(Debug, Clone, Arbitrary)]
pub struct FuzzScript {
    /// The fragments in order.
    pub fragments: Vec<Fragment>,
}

impl FuzzScript {
    /// Render the script as SQL text.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = String::new();
        for (i, fragment) in self.fragments.iter().enumerate() {
            if i > 0 {
                sql.push(' ');
            }
            fragment.write(&mut sql);
        }
        sql
    }
}

/// Assert that tokenizing, splitting and generic grouping all reproduce `sql`.
///
/// # Panics
///
/// Panics when any stage loses or alters text.
pub fn test_lossless(sql: &str) {
    let tokens: String = tokenize(sql).map(|token| String::from(token.value())).collect();
    assert_eq!(tokens, sql, "tokens do not reproduce the input");

    let parser = Parser::default();
    if sql.chars().all(char::is_whitespace) {
        assert_eq!(parser.parse(Cow::Borrowed(sql)).count(), 0);
        return;
    }
    let mut text = String::with_capacity(sql.len());
    for statement in parser.parse(Cow::Borrowed(sql)) {
        let statement = statement.expect("the generic parser never fails");
        text.push_str(&statement.value());
    }
    assert_eq!(text, sql, "statements do not reproduce the input");
}

/// Assert that running every grouping pass again leaves each statement unchanged.
///
/// # Panics
///
/// Panics when a second grouping run changes a tree.
pub fn test_grouping_idempotent(sql: &str) {
    let parser = Parser::default();
    for statement in parser.parse(Cow::Borrowed(sql)) {
        let statement: Statement = statement.expect("the generic parser never fails");
        let mut regrouped = statement.clone();
        group(&mut regrouped, &GroupingPass::ALL);
        assert_eq!(statement, regrouped, "grouping is not idempotent for {sql:?}");
    }
}

/// Parse `sql` with the MySQL parser and check every produced catalog.
///
/// Statement failures are expected for malformed input; the check is that
/// parsing never panics and that successful `CREATE TABLE` rewrites yield
/// catalogs whose columns all have a name and a type.
///
/// # Panics
///
/// Panics when a catalog is inconsistent.
pub fn test_mysql_parse(sql: &str) {
    let parser = Parser::for_dialect(Some("mysql"));
    for statement in parser.parse(Cow::Borrowed(sql)).flatten() {
        let Ok(catalog) = TableCatalog::try_from(&statement) else {
            continue;
        };
        for (name, column) in &catalog.columns {
            assert_eq!(name, &column.name);
            assert!(!column.column_type.is_empty(), "column {name} has no type");
            assert!(
                column.length.is_none() || column.values.is_none(),
                "column {name} has both sizes and values"
            );
        }
    }
}
