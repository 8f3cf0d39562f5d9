//! Grouping passes turning a flat statement into a nested tree.
//!
//! Every pass rewrites one level of a list, then descends into the
//! groupable children (statements, parentheses, functions and `WHERE`
//! clauses). Passes never drop or reorder leaves, and running a pass twice
//! gives the same tree as running it once.

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

use crate::tokens::{Token, TokenType};
use crate::tree::{GroupKind, Node, Statement, TokenList};

/// Keywords closing a `WHERE` clause.
const WHERE_END: &[&str] = &[
    "WHERE",
    "ORDER BY",
    "GROUP BY",
    "HAVING",
    "LIMIT",
    "UNION",
    "UNION ALL",
    "EXCEPT",
    "INTERSECT",
    "RETURNING",
];

/// One grouping pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupingPass {
    /// `( ... )` pairs become [`GroupKind::Parenthesis`] lists.
    Brackets,
    /// A name directly followed by a parenthesis becomes a [`GroupKind::Function`].
    Functions,
    /// Names and dotted chains such as `db.t.*` become [`GroupKind::Identifier`] lists.
    Identifiers,
    /// `WHERE` and its condition become a [`GroupKind::Where`] list.
    Where,
}

impl GroupingPass {
    /// Every pass, in the order the default stack runs them.
    pub const ALL: [GroupingPass; 4] = [
        GroupingPass::Brackets,
        GroupingPass::Functions,
        GroupingPass::Identifiers,
        GroupingPass::Where,
    ];

    /// Run the pass over `list` and its groupable descendants.
    pub fn apply(self, list: &mut TokenList) {
        let kind = list.kind();
        let children = list.children_mut();
        if kind != GroupKind::Function {
            let (head, tail) = delimiters(kind, children);
            let end = children.len() - tail;
            let body: Vec<Node> = children.drain(head..end).collect();
            let body = match self {
                GroupingPass::Brackets => group_brackets(body),
                GroupingPass::Functions => group_functions(body),
                GroupingPass::Identifiers => group_identifiers(body),
                GroupingPass::Where => group_where(body),
            };
            children.splice(head..head, body);
        }
        for child in children.iter_mut() {
            if let Node::List(nested) = child {
                if nested.kind().is_groupable() {
                    self.apply(nested);
                }
            }
        }
    }
}

/// Run `passes` in order over a statement.
pub fn group(statement: &mut Statement, passes: &[GroupingPass]) {
    for pass in passes {
        pass.apply(statement.as_list_mut());
    }
}

/// Number of leading and trailing children a pass must leave in place.
fn delimiters(kind: GroupKind, children: &[Node]) -> (usize, usize) {
    let head = match kind {
        GroupKind::Parenthesis => usize::from(children.first().is_some_and(|n| n.is_punctuation("("))),
        GroupKind::Where => usize::from(children.first().is_some_and(|n| n.is_keyword("WHERE"))),
        _ => 0,
    };
    let tail = usize::from(
        kind == GroupKind::Parenthesis
            && children.len() > head
            && children.last().is_some_and(|n| n.is_punctuation(")")),
    );
    (head, tail)
}

fn group_brackets(nodes: Vec<Node>) -> Vec<Node> {
    let mut queue = VecDeque::from(nodes);
    let mut grouped = Vec::with_capacity(queue.len());
    while let Some(node) = queue.pop_front() {
        if !node.is_punctuation("(") {
            grouped.push(node);
            continue;
        }
        let Some(close) = matching_close(&queue) else {
            // Unbalanced: the rest of this list stays flat.
            grouped.push(node);
            grouped.extend(queue);
            break;
        };
        let mut children = Vec::with_capacity(close + 2);
        children.push(node);
        children.extend(queue.drain(..=close));
        grouped.push(Node::List(TokenList::new(GroupKind::Parenthesis, children)));
    }
    grouped
}

/// Index of the `)` closing an already consumed `(`.
fn matching_close(nodes: &VecDeque<Node>) -> Option<usize> {
    let mut depth = 0usize;
    for (i, node) in nodes.iter().enumerate() {
        if node.is_punctuation("(") {
            depth += 1;
        } else if node.is_punctuation(")") {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        }
    }
    None
}

fn group_functions(nodes: Vec<Node>) -> Vec<Node> {
    let mut grouped: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        let is_call = node.as_group(GroupKind::Parenthesis).is_some()
            && grouped.last().is_some_and(is_function_name);
        let name = if is_call { grouped.pop() } else { None };
        match name {
            Some(name) => {
                let name = match name {
                    Node::Token(token) => Node::List(TokenList::new(
                        GroupKind::Identifier,
                        vec![Node::Token(token)],
                    )),
                    list @ Node::List(_) => list,
                };
                grouped.push(Node::List(TokenList::new(
                    GroupKind::Function,
                    vec![name, node],
                )));
            }
            None => grouped.push(node),
        }
    }
    grouped
}

/// Whether `node` can name a call. Leaves must match [`starts_identifier`],
/// otherwise a second run would turn the grouped identifier into a call.
fn is_function_name(node: &Node) -> bool {
    match node {
        Node::Token(token) => starts_identifier(token),
        Node::List(list) => list.kind() == GroupKind::Identifier,
    }
}

fn group_identifiers(nodes: Vec<Node>) -> Vec<Node> {
    let mut queue = VecDeque::from(nodes);
    let mut grouped = Vec::with_capacity(queue.len());
    while let Some(node) = queue.pop_front() {
        if !node.as_token().is_some_and(starts_identifier) {
            grouped.push(node);
            continue;
        }
        let mut parts = vec![node];
        while queue.front().is_some_and(|n| n.is_punctuation("."))
            && queue.get(1).is_some_and(continues_identifier)
        {
            parts.extend(queue.drain(..2));
            if parts.last().is_some_and(|n| n.is_a(TokenType::Wildcard)) {
                break;
            }
        }
        grouped.push(Node::List(TokenList::new(GroupKind::Identifier, parts)));
    }
    grouped
}

fn starts_identifier(token: &Token) -> bool {
    token.ttype() == TokenType::Name || token.is_a(TokenType::StringSymbol)
}

fn continues_identifier(node: &Node) -> bool {
    node.as_token().is_some_and(|token| {
        starts_identifier(token)
            || token.is_a(TokenType::Builtin)
            || token.is_a(TokenType::Keyword)
            || token.is_a(TokenType::Wildcard)
    })
}

fn group_where(nodes: Vec<Node>) -> Vec<Node> {
    let mut queue = VecDeque::from(nodes);
    let mut grouped = Vec::with_capacity(queue.len());
    while let Some(node) = queue.pop_front() {
        if !node.is_keyword("WHERE") {
            grouped.push(node);
            continue;
        }
        let end = queue.iter().position(ends_where).unwrap_or(queue.len());
        let mut children = Vec::with_capacity(end + 1);
        children.push(node);
        children.extend(queue.drain(..end));
        grouped.push(Node::List(TokenList::new(GroupKind::Where, children)));
    }
    grouped
}

fn ends_where(node: &Node) -> bool {
    node.is_punctuation(";")
        || node.as_token().is_some_and(|token| {
            token.is_a(TokenType::Keyword) && WHERE_END.contains(&token.normalized())
        })
}
