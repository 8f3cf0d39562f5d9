//! Rewriting of `CREATE TABLE` statements into a column catalog.
//!
//! The statement keeps its leaves up to the table name, the name itself is
//! replaced by a [`GroupKind::TableName`] list, and the parenthesized body
//! becomes a [`GroupKind::ColumnsDefinition`] list holding one
//! [`GroupKind::ColumnDefinition`] per column:
//!
//! ```text
//! ColumnDefinition
//! ├── ColumnName        resolved name
//! ├── ColumnType        lowercased type word
//! ├── ColumnTypeLength  integer parameters, when present
//! ├── ColumnTypeValues  unescaped enum/set values, when present
//! └── ColumnAttributes  Attribute lists of one or two lowercased tokens
//! ```
//!
//! Key and constraint clauses are left out of the catalog. Table options
//! after the body are kept as they are.

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use super::quoting::{clean_quote, unescape_literal};
use crate::errors::ParseError;
use crate::filters::StatementFilter;
use crate::grouping::GroupingPass;
use crate::parsers::is_create_table_statement;
use crate::tokens::{Token, TokenType};
use crate::tree::{GroupKind, Node, Statement, TokenList, next_significant};

/// Words opening a key or constraint clause instead of a column.
const CONSTRAINT_WORDS: &[&str] = &[
    "PRIMARY",
    "KEY",
    "INDEX",
    "UNIQUE",
    "CONSTRAINT",
    "FOREIGN",
    "FULLTEXT",
    "SPATIAL",
    "CHECK",
];

/// Attribute names spelled with two words.
const ATTRIBUTE_PHRASES: &[[&str; 2]] = &[
    ["PRIMARY", "KEY"],
    ["UNIQUE", "KEY"],
    ["CHARACTER", "SET"],
    ["ON", "UPDATE"],
];

/// Attributes followed by a value.
const VALUE_ATTRIBUTES: &[&str] = &[
    "default",
    "collate",
    "comment",
    "character set",
    "charset",
    "on update",
    "references",
    "column_format",
    "storage",
    "check",
    "as",
];

/// Types whose parenthesis lists values rather than sizes.
const VALUE_LIST_TYPES: &[&str] = &["enum", "set"];

/// Statement filter rewriting a MySQL `CREATE TABLE` into a column catalog.
///
/// Statements of any other kind are rejected with
/// [`ParseError::NotCreateTable`]; the MySQL parser only routes matching
/// statements here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MysqlCreateTableFilter;

impl StatementFilter for MysqlCreateTableFilter {
    fn process(&self, mut statement: Statement) -> Result<Statement, ParseError> {
        if !is_create_table_statement(&statement) {
            return Err(ParseError::NotCreateTable);
        }
        GroupingPass::Brackets.apply(statement.as_list_mut());
        let mut children = statement.take_children();
        rewrite(&mut children)?;
        Ok(Statement::new(children))
    }
}

fn rewrite(children: &mut Vec<Node>) -> Result<(), ParseError> {
    let table_keyword = children
        .iter()
        .position(|node| node.is_keyword("TABLE"))
        .ok_or(ParseError::NotCreateTable)?;
    let mut cursor = next_significant(children, table_keyword + 1);
    if let Some(after) = cursor.and_then(|start| skip_if_not_exists(children, start)) {
        cursor = next_significant(children, after);
    }

    let Some(span) = cursor.and_then(|start| name_span(children, start)) else {
        let pos = cursor.map_or_else(|| end_pos(children), |at| node_pos(&children[at]));
        tracing::debug!(pos, "CREATE TABLE without a table name");
        return Err(ParseError::MissingTableName { pos });
    };
    let (name_index, table) = replace_with_table_name(children, span);

    let Some(next) = next_significant(children, name_index + 1) else {
        return Err(ParseError::MissingColumnDefinitions { table });
    };

    if children[next].is_keyword("LIKE") {
        let span = next_significant(children, next + 1).and_then(|start| name_span(children, start));
        return match span {
            Some(span) => {
                replace_with_table_name(children, span);
                Ok(())
            }
            None => Err(ParseError::MissingLikeTable { table }),
        };
    }

    let Node::List(body) = &mut children[next] else {
        return Err(ParseError::MissingColumnDefinitions { table });
    };
    if body.kind() != GroupKind::Parenthesis {
        return Err(ParseError::MissingColumnDefinitions { table });
    }

    // `CREATE TABLE t (LIKE other)`
    let inner = body.children_mut();
    if let Some(like) = next_significant(inner, 1).filter(|&at| inner[at].is_keyword("LIKE")) {
        let span = next_significant(inner, like + 1).and_then(|start| name_span(inner, start));
        return match span {
            Some(span) => {
                replace_with_table_name(inner, span);
                Ok(())
            }
            None => Err(ParseError::MissingLikeTable { table }),
        };
    }

    let mut columns = Vec::new();
    for clause in body.inner().split(|node| node.is_punctuation(",")) {
        if let Some(column) = column_definition(clause)? {
            columns.push(Node::List(column));
        }
    }
    tracing::trace!(table = %table, columns = columns.len(), "analyzed CREATE TABLE");
    children[next] = Node::List(TokenList::new(GroupKind::ColumnsDefinition, columns));
    Ok(())
}

/// Position after `IF NOT EXISTS` when it starts at `start`.
fn skip_if_not_exists(nodes: &[Node], start: usize) -> Option<usize> {
    let mut at = start;
    for keyword in ["IF", "NOT", "EXISTS"] {
        if !nodes.get(at)?.is_keyword(keyword) {
            return None;
        }
        at = next_significant(nodes, at + 1).unwrap_or(nodes.len());
    }
    Some(at)
}

/// Whether a node can be one part of a table name.
fn is_name_part(node: &Node) -> bool {
    node.as_token().is_some_and(|token| {
        (token.is_a(TokenType::Name) && !token.is_a(TokenType::Placeholder))
            || token.is_a(TokenType::StringSymbol)
            || (token.is_a(TokenType::Keyword) && !token.is_keyword("LIKE"))
    })
}

/// Span of a possibly qualified name starting at `start`.
fn name_span(nodes: &[Node], start: usize) -> Option<Range<usize>> {
    if !is_name_part(nodes.get(start)?) {
        return None;
    }
    let mut end = start + 1;
    while nodes.get(end).is_some_and(|node| node.is_punctuation("."))
        && nodes.get(end + 1).is_some_and(is_name_part)
    {
        end += 2;
    }
    Some(start..end)
}

/// Replace the name in `span` by a `TableName` list, returning its index and resolved text.
fn replace_with_table_name(nodes: &mut Vec<Node>, span: Range<usize>) -> (usize, String) {
    let start = span.start;
    let parts: Vec<Node> = nodes
        .drain(span)
        .map(|node| match node {
            Node::Token(token) if !token.is_punctuation(".") => {
                Node::Token(Token::new(TokenType::Name, clean_quote(token.value()), token.pos()))
            }
            other => other,
        })
        .collect();
    let table_name = TokenList::new(GroupKind::TableName, parts);
    let text = table_name.value();
    nodes.insert(start, Node::List(table_name));
    (start, text)
}

fn node_pos(node: &Node) -> usize {
    node.flatten().next().map_or(0, Token::pos)
}

fn end_pos(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .flat_map(Node::flatten)
        .last()
        .map_or(0, |token| token.pos() + token.value().len())
}

/// Whether the token is an unquoted word.
fn is_bare_word(token: &Token) -> bool {
    let word = token.is_a(TokenType::Keyword)
        || (token.is_a(TokenType::Name) && !token.is_a(TokenType::Placeholder));
    word && !token.value().starts_with(['`', '@'])
}

/// Build the definition of one column clause, `None` for constraints and
/// clauses that cannot be read as a column.
fn column_definition(clause: &[Node]) -> Result<Option<TokenList>, ParseError> {
    let nodes: Vec<&Node> = clause.iter().filter(|node| node.is_significant()).collect();
    let Some(name) = nodes.first().and_then(|node| node.as_token()) else {
        return Ok(None);
    };
    let quoted = name.value().starts_with('`') || name.is_a(TokenType::StringSymbol);
    if !quoted {
        if !is_bare_word(name) {
            return Ok(None);
        }
        if CONSTRAINT_WORDS.iter().any(|word| name.is_word(word)) {
            tracing::trace!(clause = name.value(), "skipping key clause");
            return Ok(None);
        }
    }
    let column = clean_quote(name.value()).into_owned();

    let Some(type_word) = nodes
        .get(1)
        .and_then(|node| node.as_token())
        .filter(|token| is_bare_word(token))
    else {
        tracing::debug!(column = %column, "skipping column without a type");
        return Ok(None);
    };
    let column_type = type_word.value().to_lowercase();

    let mut children = vec![
        Node::List(TokenList::new(
            GroupKind::ColumnName,
            vec![Node::Token(Token::new(TokenType::Name, column.as_str(), name.pos()))],
        )),
        Node::List(TokenList::new(
            GroupKind::ColumnType,
            vec![Node::Token(Token::new(
                type_word.ttype(),
                column_type.as_str(),
                type_word.pos(),
            ))],
        )),
    ];

    let mut rest = &nodes[2..];
    if let Some(parameters) = rest.first().and_then(|node| node.as_group(GroupKind::Parenthesis)) {
        rest = &rest[1..];
        if VALUE_LIST_TYPES.contains(&column_type.as_str()) {
            children.push(Node::List(type_values(parameters)));
        } else {
            children.push(Node::List(type_length(parameters)));
        }
    }

    let attributes = attributes(rest, &column, &column_type)?;
    children.push(Node::List(TokenList::new(GroupKind::ColumnAttributes, attributes)));
    Ok(Some(TokenList::new(GroupKind::ColumnDefinition, children)))
}

fn type_values(parameters: &TokenList) -> TokenList {
    let values = parameters
        .inner()
        .iter()
        .filter_map(Node::as_token)
        .filter(|token| token.is_a(TokenType::StringSingle))
        .map(|token| {
            Node::Token(Token::new(
                TokenType::StringSingle,
                unescape_literal(token.value()),
                token.pos(),
            ))
        })
        .collect();
    TokenList::new(GroupKind::ColumnTypeValues, values)
}

fn type_length(parameters: &TokenList) -> TokenList {
    let sizes = parameters
        .inner()
        .iter()
        .filter(|node| node.is_a(TokenType::Integer))
        .cloned()
        .collect();
    TokenList::new(GroupKind::ColumnTypeLength, sizes)
}

/// Group the attribute clauses following the column type.
fn attributes(nodes: &[&Node], column: &str, column_type: &str) -> Result<Vec<Node>, ParseError> {
    let mut attributes = Vec::new();
    let mut i = 0;
    while i < nodes.len() {
        let Some(token) = nodes[i].as_token().filter(|token| is_bare_word(token)) else {
            tracing::trace!(column, value = %nodes[i], "ignoring stray attribute token");
            i += 1;
            continue;
        };
        let phrase = ATTRIBUTE_PHRASES.iter().find(|[first, second]| {
            token.is_word(first)
                && nodes
                    .get(i + 1)
                    .and_then(|node| node.as_token())
                    .is_some_and(|next| next.is_word(second))
        });
        let name = match phrase {
            Some([first, second]) => {
                i += 2;
                alloc::format!("{first} {second}").to_lowercase()
            }
            None => {
                i += 1;
                token.normalized().to_lowercase()
            }
        };
        let keyword = Node::Token(Token::new(TokenType::Keyword, name.as_str(), token.pos()));

        if !VALUE_ATTRIBUTES.contains(&name.as_str()) {
            attributes.push(Node::List(TokenList::new(GroupKind::Attribute, vec![keyword])));
            continue;
        }
        let Some((value, consumed)) = attribute_value(&nodes[i..]) else {
            return Err(ParseError::MissingAttributeValue {
                column: column.to_string(),
                attribute: name,
            });
        };
        i += consumed;
        let value = if column_type == "bit" && name == "default" {
            bit_default(value, column)?
        } else {
            value
        };
        attributes.push(Node::List(TokenList::new(
            GroupKind::Attribute,
            vec![keyword, Node::Token(value)],
        )));
    }
    Ok(attributes)
}

/// Read an attribute value, returning the lowercased value token and the
/// number of nodes it spans.
fn attribute_value(nodes: &[&Node]) -> Option<(Token, usize)> {
    let first = *nodes.first()?;
    let Node::Token(token) = first else {
        return Some((Token::new(TokenType::Text, first.value().to_lowercase(), node_pos(first)), 1));
    };
    let second = nodes.get(1).copied();

    // Signed number such as `-1`.
    let is_sign = token.is_a(TokenType::Operator) && matches!(token.value(), "-" | "+");
    let signed = second
        .and_then(Node::as_token)
        .filter(|number| is_sign && number.is_a(TokenType::Number));
    if let Some(number) = signed {
        let value = alloc::format!("{}{}", token.value(), number.value());
        return Some((Token::new(number.ttype(), value.to_lowercase(), token.pos()), 2));
    }
    // Call such as `current_timestamp(6)`.
    let call = second
        .filter(|next| is_bare_word(token) && node_pos(next) == token.pos() + token.value().len())
        .and_then(|next| next.as_group(GroupKind::Parenthesis));
    if let Some(arguments) = call {
        let value = alloc::format!("{}{}", token.value(), arguments.value());
        return Some((Token::new(TokenType::Name, value.to_lowercase(), token.pos()), 2));
    }
    if !token.is_significant() || token.is_a(TokenType::Punctuation) {
        return None;
    }
    let value = if token.is_a(TokenType::String) {
        unescape_literal(token.value()).to_lowercase()
    } else {
        token.normalized().to_lowercase()
    };
    Some((Token::new(token.ttype(), value, token.pos()), 1))
}

/// Reduce a `bit` default to its binary digits.
fn bit_default(value: Token, column: &str) -> Result<Token, ParseError> {
    let text = value.value();
    let digits = if value.is_a(TokenType::Binary) {
        text.strip_prefix("b'")
            .and_then(|rest| rest.strip_suffix('\''))
            .or_else(|| text.strip_prefix("0b"))
            .filter(|digits| !digits.is_empty())
    } else {
        None
    };
    match digits {
        Some(digits) => Ok(Token::new(TokenType::Binary, digits, value.pos())),
        None => {
            tracing::debug!(column, value = text, "invalid bit default");
            Err(ParseError::InvalidBitDefault {
                column: column.to_string(),
                value: text.to_string(),
            })
        }
    }
}
