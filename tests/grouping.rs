//! Trees produced by the generic parser.

use sqlparse_rs::{
    FilterStack, GenericParser, GroupKind, GroupingPass, Node, SqlParser, Statement, parse,
};

fn parse_one(sql: &str) -> Statement {
    let mut statements = parse(sql, None).unwrap();
    assert_eq!(statements.len(), 1);
    statements.remove(0)
}

#[test]
fn test_select_tree() {
    let statement = parse_one("SELECT count(t.id), db.t.* FROM db.t WHERE t.a = (1 + 2) ORDER BY 1");
    let function = statement.groups(GroupKind::Function).next().unwrap();
    assert_eq!(function.value(), "count(t.id)");
    let arguments = function.groups(GroupKind::Parenthesis).next().unwrap();
    assert_eq!(
        arguments.groups(GroupKind::Identifier).next().unwrap().value(),
        "t.id"
    );

    let identifiers: Vec<String> = statement
        .groups(GroupKind::Identifier)
        .map(|identifier| identifier.value())
        .collect();
    assert_eq!(identifiers, ["db.t.*", "db.t"]);

    let clause = statement.groups(GroupKind::Where).next().unwrap();
    assert_eq!(clause.value(), "WHERE t.a = (1 + 2) ");
    assert_eq!(clause.groups(GroupKind::Parenthesis).count(), 1);
    assert!(statement.tokens().iter().any(|node| node.is_keyword("ORDER BY")));
}

#[test]
fn test_where_ends_at_statement_end() {
    let statement = parse_one("delete from t where a in (select b from u where c = 1);");
    let clause = statement.groups(GroupKind::Where).next().unwrap();
    assert_eq!(clause.value(), "where a in (select b from u where c = 1)");
    let subquery = clause.groups(GroupKind::Parenthesis).next().unwrap();
    assert_eq!(
        subquery.groups(GroupKind::Where).next().unwrap().value(),
        "where c = 1"
    );
    assert!(statement.tokens().last().unwrap().is_punctuation(";"));
}

#[test]
fn test_grouping_is_lossless() {
    let sql = "  select a.b, f( x , (y) ) from t where (a = 'x;y') -- done\n;";
    let statement = parse_one(sql);
    assert_eq!(statement.value(), sql);
    let leaves: String = statement.flatten().map(|token| token.value().to_string()).collect();
    assert_eq!(leaves, sql);
}

#[test]
fn test_unbalanced_parenthesis_stays_flat() {
    let statement = parse_one("select (1, (2) from t");
    assert_eq!(statement.value(), "select (1, (2) from t");
    let parenthesis = statement.groups(GroupKind::Parenthesis).collect::<Vec<_>>();
    assert!(parenthesis.is_empty());
    assert!(
        statement
            .tokens()
            .iter()
            .filter_map(Node::as_list)
            .all(|list| list.kind() != GroupKind::Function)
    );
}

#[test]
fn test_selected_passes_only() {
    let parser = GenericParser::with_stack(
        FilterStack::new().with_grouping_passes(&[GroupingPass::Brackets]),
    );
    let statement = parser
        .parse("select f(a) from t where b".into())
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(statement.groups(GroupKind::Parenthesis).count(), 1);
    assert_eq!(statement.groups(GroupKind::Function).count(), 0);
    assert_eq!(statement.groups(GroupKind::Identifier).count(), 0);
    assert_eq!(statement.groups(GroupKind::Where).count(), 0);
}

#[test]
fn test_grouping_disabled_keeps_statements_flat() {
    let parser = GenericParser::with_stack(FilterStack::new());
    let statement = parser
        .parse("select f(a) from t".into())
        .next()
        .unwrap()
        .unwrap();
    assert!(statement.tokens().iter().all(|node| node.as_token().is_some()));
}
