//! Nested token tree: token lists, statements and their accessors.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Display};
use core::ops::Deref;

use crate::tokens::{Token, TokenType};

/// What a [`TokenList`] groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// One complete SQL statement.
    Statement,
    /// `( ... )`, open and close punctuation included.
    Parenthesis,
    /// A possibly qualified name such as `db.table` or `t.*`.
    Identifier,
    /// A name directly followed by a parenthesized argument list.
    Function,
    /// A `WHERE` clause, keyword included.
    Where,
    /// Resolved table name of a `CREATE TABLE`.
    TableName,
    /// All column definitions of a `CREATE TABLE`.
    ColumnsDefinition,
    /// One column definition.
    ColumnDefinition,
    /// Resolved column name.
    ColumnName,
    /// Lowercased column type.
    ColumnType,
    /// Integer size parameters of a column type.
    ColumnTypeLength,
    /// Values of an `enum` or `set` column type.
    ColumnTypeValues,
    /// Attribute clauses of a column.
    ColumnAttributes,
    /// One attribute clause: a flag, or a keyword and its value.
    Attribute,
}

impl GroupKind {
    /// Whether the generic grouping passes descend into lists of this kind.
    #[must_use]
    pub fn is_groupable(self) -> bool {
        matches!(
            self,
            GroupKind::Statement | GroupKind::Parenthesis | GroupKind::Function | GroupKind::Where
        )
    }
}

/// A tree node: a leaf token or a nested list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A lexer token.
    Token(Token),
    /// A group of nodes.
    List(TokenList),
}

impl Node {
    /// The leaf token, if this node is one.
    #[must_use]
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Node::Token(token) => Some(token),
            Node::List(_) => None,
        }
    }

    /// The nested list, if this node is one.
    #[must_use]
    pub fn as_list(&self) -> Option<&TokenList> {
        match self {
            Node::Token(_) => None,
            Node::List(list) => Some(list),
        }
    }

    /// The nested list of the given kind, if this node is one.
    #[must_use]
    pub fn as_group(&self, kind: GroupKind) -> Option<&TokenList> {
        self.as_list().filter(|list| list.kind() == kind)
    }

    /// Whether the node is a leaf token of type `ttype` or a subtype.
    #[must_use]
    pub fn is_a(&self, ttype: TokenType) -> bool {
        self.as_token().is_some_and(|token| token.is_a(ttype))
    }

    /// Whether the node is neither whitespace nor a comment. Lists always are.
    #[must_use]
    pub fn is_significant(&self) -> bool {
        self.as_token().is_none_or(Token::is_significant)
    }

    /// Whether the node is a leaf punctuation token with the given text.
    #[must_use]
    pub fn is_punctuation(&self, text: &str) -> bool {
        self.as_token().is_some_and(|token| token.is_punctuation(text))
    }

    /// Whether the node is a keyword leaf with the given normalized text.
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.as_token().is_some_and(|token| token.is_keyword(keyword))
    }

    /// Concatenated raw text of the node.
    #[must_use]
    pub fn value(&self) -> String {
        self.to_string()
    }

    /// Leaf tokens of the node in document order.
    pub fn flatten(&self) -> Flatten<'_> {
        Flatten {
            stack: alloc::vec![core::slice::from_ref(self)],
        }
    }
}

impl From<Token> for Node {
    fn from(token: Token) -> Self {
        Node::Token(token)
    }
}

impl From<TokenList> for Node {
    fn from(list: TokenList) -> Self {
        Node::List(list)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Token(token) => Display::fmt(token, f),
            Node::List(list) => Display::fmt(list, f),
        }
    }
}

/// Depth-first iterator over leaf tokens.
#[derive(Debug)]
pub struct Flatten<'a> {
    stack: Vec<&'a [Node]>,
}

impl<'a> Iterator for Flatten<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<&'a Token> {
        while let Some(nodes) = self.stack.pop() {
            let Some((first, rest)) = nodes.split_first() else {
                continue;
            };
            self.stack.push(rest);
            match first {
                Node::Token(token) => return Some(token),
                Node::List(list) => self.stack.push(list.children.as_slice()),
            }
        }
        None
    }
}

/// An ordered group of nodes tagged with what it represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenList {
    kind: GroupKind,
    children: Vec<Node>,
}

impl TokenList {
    /// Create a list of the given kind.
    #[must_use]
    pub fn new(kind: GroupKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    /// What this list groups.
    #[must_use]
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// The direct children.
    #[must_use]
    pub fn tokens(&self) -> &[Node] {
        &self.children
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the list has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// The nodes between the opening and closing punctuation of a parenthesis.
    ///
    /// For other kinds this is every child.
    #[must_use]
    pub fn inner(&self) -> &[Node] {
        if self.kind != GroupKind::Parenthesis {
            return &self.children;
        }
        let start = usize::from(self.children.first().is_some_and(|n| n.is_punctuation("(")));
        let closed = self.children.len() > start
            && self.children.last().is_some_and(|n| n.is_punctuation(")"));
        let end = self.children.len() - usize::from(closed);
        &self.children[start..end]
    }

    /// First significant child, skipping whitespace and comments.
    #[must_use]
    pub fn token_first(&self) -> Option<&Node> {
        self.children.iter().find(|node| node.is_significant())
    }

    /// Position of the first significant child at or after `start`.
    #[must_use]
    pub fn token_next(&self, start: usize) -> Option<usize> {
        next_significant(&self.children, start)
    }

    /// Position of `node` among the direct children, compared by identity.
    #[must_use]
    pub fn token_index(&self, node: &Node) -> Option<usize> {
        self.children
            .iter()
            .position(|child| core::ptr::eq(child, node))
    }

    /// First direct leaf child at or after `start` whose type is `ttype` or a subtype.
    #[must_use]
    pub fn token_next_by_type(&self, start: usize, ttype: TokenType) -> Option<(usize, &Token)> {
        self.children
            .iter()
            .enumerate()
            .skip(start)
            .find_map(|(i, node)| node.as_token().filter(|t| t.is_a(ttype)).map(|t| (i, t)))
    }

    /// First list of `kind` found depth-first within the children at or after `start`.
    ///
    /// The returned position is the index of the direct child that is, or
    /// contains, the match.
    #[must_use]
    pub fn token_next_by_instance(
        &self,
        start: usize,
        kind: GroupKind,
    ) -> Option<(usize, &TokenList)> {
        self.children.iter().enumerate().skip(start).find_map(|(i, node)| {
            node.as_list()
                .and_then(|list| list.find_group(kind))
                .map(|found| (i, found))
        })
    }

    fn find_group(&self, kind: GroupKind) -> Option<&TokenList> {
        if self.kind == kind {
            return Some(self);
        }
        self.children
            .iter()
            .filter_map(Node::as_list)
            .find_map(|list| list.find_group(kind))
    }

    /// Direct children that are lists of `kind`.
    pub fn groups(&self, kind: GroupKind) -> impl Iterator<Item = &TokenList> {
        self.children.iter().filter_map(move |node| node.as_group(kind))
    }

    /// Leaf tokens in document order.
    pub fn flatten(&self) -> Flatten<'_> {
        Flatten {
            stack: alloc::vec![self.children.as_slice()],
        }
    }

    /// Concatenated raw text of all leaves.
    #[must_use]
    pub fn value(&self) -> String {
        self.to_string()
    }
}

impl Display for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.flatten().try_for_each(|token| f.write_str(token.value()))
    }
}

/// Position of the first significant node at or after `start`.
pub(crate) fn next_significant(nodes: &[Node], start: usize) -> Option<usize> {
    nodes
        .iter()
        .enumerate()
        .skip(start)
        .find_map(|(i, node)| node.is_significant().then_some(i))
}

/// Coarse statement classification taken from the leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementType {
    /// `SELECT`
    Select,
    /// `INSERT`
    Insert,
    /// `UPDATE`
    Update,
    /// `DELETE`
    Delete,
    /// `REPLACE`
    Replace,
    /// `MERGE`
    Merge,
    /// `CREATE`
    Create,
    /// `DROP`
    Drop,
    /// `ALTER`
    Alter,
    /// Anything not starting with a DML or DDL keyword.
    Unknown,
}

impl StatementType {
    /// The uppercase tag, `UNKNOWN` for [`StatementType::Unknown`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StatementType::Select => "SELECT",
            StatementType::Insert => "INSERT",
            StatementType::Update => "UPDATE",
            StatementType::Delete => "DELETE",
            StatementType::Replace => "REPLACE",
            StatementType::Merge => "MERGE",
            StatementType::Create => "CREATE",
            StatementType::Drop => "DROP",
            StatementType::Alter => "ALTER",
            StatementType::Unknown => "UNKNOWN",
        }
    }

    fn from_keyword(token: &Token) -> Self {
        if !token.is_a(TokenType::Dml) && !token.is_a(TokenType::Ddl) {
            return StatementType::Unknown;
        }
        match token.normalized() {
            "SELECT" => StatementType::Select,
            "INSERT" => StatementType::Insert,
            "UPDATE" => StatementType::Update,
            "DELETE" => StatementType::Delete,
            "REPLACE" => StatementType::Replace,
            "MERGE" => StatementType::Merge,
            "CREATE" => StatementType::Create,
            "DROP" => StatementType::Drop,
            "ALTER" => StatementType::Alter,
            _ => StatementType::Unknown,
        }
    }
}

impl Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One complete SQL statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement(TokenList);

impl Statement {
    /// Build a statement from its flat or grouped children.
    #[must_use]
    pub fn new(children: Vec<Node>) -> Self {
        Self(TokenList::new(GroupKind::Statement, children))
    }

    /// Statement type derived from the first significant token.
    #[must_use]
    pub fn get_type(&self) -> StatementType {
        match self.0.token_first() {
            Some(Node::Token(token)) => StatementType::from_keyword(token),
            _ => StatementType::Unknown,
        }
    }

    /// The underlying token list.
    #[must_use]
    pub fn as_list(&self) -> &TokenList {
        &self.0
    }

    pub(crate) fn as_list_mut(&mut self) -> &mut TokenList {
        &mut self.0
    }

    /// Take the children out, leaving the statement empty.
    pub(crate) fn take_children(&mut self) -> Vec<Node> {
        core::mem::take(self.0.children_mut())
    }
}

impl Deref for Statement {
    type Target = TokenList;

    fn deref(&self) -> &TokenList {
        &self.0
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}
