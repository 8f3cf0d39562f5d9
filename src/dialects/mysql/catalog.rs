//! Typed view over a rewritten `CREATE TABLE` statement.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use indexmap::IndexMap as IndexMapRaw;

use crate::errors::ParseError;
use crate::tokens::TokenType;
use crate::tree::{GroupKind, Node, Statement, TokenList};

/// `IndexMap` alias using hashbrown's default hasher for `no_std` compatibility.
type IndexMap<K, V> = IndexMapRaw<K, V, hashbrown::DefaultHashBuilder>;

/// One attribute clause of a column, e.g. `not null` or `default` `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnAttribute {
    /// Lowercased attribute name.
    pub name: String,
    /// Lowercased value, for attributes taking one.
    pub value: Option<String>,
}

/// One column of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    /// Resolved column name.
    pub name: String,
    /// Lowercased type name.
    pub column_type: String,
    /// Size parameters, e.g. `[8, 2]` for `double(8,2)`.
    pub length: Option<Vec<u32>>,
    /// Allowed values of an `enum` or `set` column.
    pub values: Option<Vec<String>>,
    /// Attribute clauses in declaration order.
    pub attributes: Vec<ColumnAttribute>,
}

impl Column {
    /// The first attribute called `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&ColumnAttribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }

    /// Whether the column is declared `not null` or as part of the primary key.
    #[must_use]
    pub fn is_not_null(&self) -> bool {
        self.attribute("not null").is_some() || self.attribute("primary key").is_some()
    }

    /// The `default` value, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.attribute("default")
            .and_then(|attribute| attribute.value.as_deref())
    }
}

/// Table described by a `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableCatalog {
    /// Resolved name of the created table.
    pub table_name: String,
    /// Table copied by `CREATE TABLE ... LIKE`.
    pub source_table: Option<String>,
    /// Columns keyed by name, in declaration order.
    pub columns: IndexMap<String, Column>,
}

impl TableCatalog {
    /// The column called `name`.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }
}

impl TryFrom<&Statement> for TableCatalog {
    type Error = ParseError;

    fn try_from(statement: &Statement) -> Result<Self, ParseError> {
        let (index, table) = statement
            .token_next_by_instance(0, GroupKind::TableName)
            .ok_or(ParseError::NotACatalog)?;
        let table_name = table.value();
        let source_table = statement
            .token_next_by_instance(index + 1, GroupKind::TableName)
            .map(|(_, source)| source.value());
        let definitions = statement
            .token_next_by_instance(index, GroupKind::ColumnsDefinition)
            .map(|(_, definitions)| definitions);
        if source_table.is_none() && definitions.is_none() {
            return Err(ParseError::NotACatalog);
        }

        let mut columns = IndexMap::default();
        for definition in definitions
            .into_iter()
            .flat_map(|definitions| definitions.groups(GroupKind::ColumnDefinition))
        {
            let column = Column::try_from(definition)?;
            if columns.contains_key(&column.name) {
                return Err(ParseError::DuplicateColumn(column.name));
            }
            columns.insert(column.name.clone(), column);
        }
        Ok(Self {
            table_name,
            source_table,
            columns,
        })
    }
}

impl TryFrom<&TokenList> for Column {
    type Error = ParseError;

    fn try_from(definition: &TokenList) -> Result<Self, ParseError> {
        let part = move |kind| definition.groups(kind).next();
        let name = part(GroupKind::ColumnName)
            .map(TokenList::value)
            .ok_or(ParseError::NotACatalog)?;
        let column_type = part(GroupKind::ColumnType)
            .map(TokenList::value)
            .ok_or(ParseError::NotACatalog)?;
        let length = part(GroupKind::ColumnTypeLength)
            .map(|sizes| {
                sizes
                    .flatten()
                    .filter(|token| token.is_a(TokenType::Integer))
                    .map(|token| {
                        token
                            .value()
                            .parse::<u32>()
                            .map_err(|_| ParseError::InvalidTypeLength {
                                column: name.clone(),
                                value: token.value().to_string(),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        let values = part(GroupKind::ColumnTypeValues).map(|values| {
            values
                .flatten()
                .map(|token| token.value().to_string())
                .collect()
        });
        let attributes = part(GroupKind::ColumnAttributes)
            .map(|attributes| {
                attributes
                    .groups(GroupKind::Attribute)
                    .map(|attribute| {
                        let mut parts = attribute.tokens().iter().map(Node::value);
                        ColumnAttribute {
                            name: parts.next().unwrap_or_default(),
                            value: parts.next(),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            name,
            column_type,
            length,
            values,
            attributes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parser;
    use crate::parsers::SqlParser;
    use alloc::borrow::Cow;

    fn catalog(sql: &str) -> Result<TableCatalog, ParseError> {
        let parser = Parser::for_dialect(Some("mysql"));
        let statement = parser.parse(Cow::Borrowed(sql)).next().unwrap()?;
        TableCatalog::try_from(&statement)
    }

    #[test]
    fn test_columns_in_order() {
        let table = catalog(
            "CREATE TABLE t (b int(11) NOT NULL, a double(8,2) DEFAULT '1.5', c enum('x','y'))",
        )
        .unwrap();
        assert_eq!(table.table_name, "t");
        let names: Vec<&str> = table.columns.keys().map(String::as_str).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert!(table.column("b").unwrap().is_not_null());
        assert_eq!(table.column("a").unwrap().length, Some(alloc::vec![8, 2]));
        assert_eq!(table.column("a").unwrap().default_value(), Some("1.5"));
        assert_eq!(
            table.column("c").unwrap().values,
            Some(alloc::vec![String::from("x"), String::from("y")])
        );
    }

    #[test]
    fn test_like_form() {
        let table = catalog("create table `foo` like `bar`").unwrap();
        assert_eq!(table.source_table.as_deref(), Some("bar"));
        assert!(table.columns.is_empty());
    }

    #[test]
    fn test_duplicate_column() {
        assert_eq!(
            catalog("CREATE TABLE t (a int, `a` text)"),
            Err(ParseError::DuplicateColumn("a".into()))
        );
    }

    #[test]
    fn test_oversized_length() {
        assert!(matches!(
            catalog("CREATE TABLE t (a varchar(99999999999))"),
            Err(ParseError::InvalidTypeLength { .. })
        ));
    }

    #[test]
    fn test_plain_statement_is_not_a_catalog() {
        let parser = Parser::default();
        let statement = parser
            .parse(Cow::Borrowed("select 1"))
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(
            TableCatalog::try_from(&statement),
            Err(ParseError::NotACatalog)
        );
    }
}
