//! Statement boundaries found by the splitter.

use sqlparse_rs::{Parser, StatementType, parse, split, split_statements, tokenize};

#[test]
fn test_split_semicolons() {
    assert_eq!(
        split("select * from foo; select * from bar;"),
        ["select * from foo;", "select * from bar;"]
    );
}

#[test]
fn test_split_keeps_quoted_semicolons() {
    let sql = "select 'a;b' from t; select \"x;y\" from `u;v`; select 1 -- c;\n;";
    assert_eq!(
        split(sql),
        [
            "select 'a;b' from t;",
            "select \"x;y\" from `u;v`;",
            "select 1 -- c;\n;",
        ]
    );
}

#[test]
fn test_split_ignores_semicolons_in_comments() {
    assert_eq!(
        split("select /* ; */ 1; select 2"),
        ["select /* ; */ 1;", "select 2"]
    );
}

#[test]
fn test_split_reproduces_the_input() {
    let sql = "  select 1;\n\n  update t set a = 1 ;\n-- trailing\n";
    let text: String = split_statements(tokenize(sql))
        .map(|statement| statement.value())
        .collect();
    assert_eq!(text, sql);
}

#[test]
fn test_split_empty_input() {
    assert!(split("").is_empty());
    assert!(split(" \n\t ").is_empty());
}

#[test]
fn test_split_trigger_body() {
    let sql = "CREATE TRIGGER trg BEFORE INSERT ON t FOR EACH ROW BEGIN \
               SET NEW.a = 1; SET NEW.b = 2; END; select 1;";
    let statements = split(sql);
    assert_eq!(statements.len(), 2);
    assert!(statements[0].ends_with("END;"));
    assert_eq!(statements[1], "select 1;");
}

#[test]
fn test_split_column_named_like_compound_objects() {
    let sql = "CREATE TABLE log (event int, begin date); SELECT 1; SELECT 2;";
    assert_eq!(
        split(sql),
        ["CREATE TABLE log (event int, begin date);", "SELECT 1;", "SELECT 2;"]
    );
    let statements = parse(sql, Some("mysql")).unwrap();
    assert_eq!(statements.len(), 3);
    assert_eq!(statements[2].get_type(), StatementType::Select);
}

#[test]
fn test_split_procedure_with_definer() {
    let sql = "CREATE DEFINER = 'admin'@'localhost' PROCEDURE p() \
               BEGIN SELECT 1; SELECT 2; END; SELECT 3;";
    let statements = split(sql);
    assert_eq!(statements.len(), 2);
    assert!(statements[0].ends_with("END;"));
    assert_eq!(statements[1], "SELECT 3;");
}

#[test]
fn test_split_transaction_blocks_are_not_compound() {
    assert_eq!(
        split("BEGIN; select 1; END;"),
        ["BEGIN;", "select 1;", "END;"]
    );
}

#[test]
fn test_statement_types() {
    let statements = parse(
        "select 1; insert into t values (1); update t set a = 2; delete from t; \
         create table t (a int); drop table t; alter table t add b int; grant all on t to u;",
        None,
    )
    .unwrap();
    let types: Vec<StatementType> = statements.iter().map(|s| s.get_type()).collect();
    assert_eq!(
        types,
        [
            StatementType::Select,
            StatementType::Insert,
            StatementType::Update,
            StatementType::Delete,
            StatementType::Create,
            StatementType::Drop,
            StatementType::Alter,
            StatementType::Unknown,
        ]
    );
}

#[test]
fn test_statement_type_skips_leading_comments() {
    let statements = parse("-- note\n/* more */ SELECT 1", None).unwrap();
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].get_type(), StatementType::Select);
}

#[test]
fn test_parsestream_is_lazy() {
    let parser = Parser::default();
    let mut stream = sqlparse_rs::parsestream(&parser, "select 1; select 2; select 3");
    let first = stream.next().unwrap().unwrap();
    assert_eq!(first.value(), "select 1;");
    assert_eq!(stream.count(), 2);
}
