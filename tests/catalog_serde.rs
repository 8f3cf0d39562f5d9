//! Serialization of table catalogs.

#![cfg(feature = "serde")]

use sqlparse_rs::{TableCatalog, parse};

fn catalog(sql: &str) -> TableCatalog {
    let statements = parse(sql, Some("mysql")).unwrap();
    TableCatalog::try_from(&statements[0]).unwrap()
}

#[test]
fn test_catalog_json_round_trip() {
    let table = catalog(
        "CREATE TABLE `abc` (`id` int(11) NOT NULL auto_increment, \
         `size` enum('small','medium') collate utf8_unicode_ci)",
    );
    let json = serde_json::to_string(&table).unwrap();
    let decoded: TableCatalog = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, table);
}

#[test]
fn test_catalog_json_shape() {
    let table = catalog("create table t (b int(11) not null, a varchar(8))");
    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(json["table_name"], "t");
    assert!(json["source_table"].is_null());
    assert_eq!(json["columns"].as_object().unwrap().len(), 2);
    assert_eq!(json["columns"]["b"]["length"][0], 11);
    assert_eq!(json["columns"]["b"]["attributes"][0]["name"], "not null");
    assert!(json["columns"]["a"]["attributes"].as_array().unwrap().is_empty());
}
