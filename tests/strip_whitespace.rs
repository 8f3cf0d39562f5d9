//! Whitespace compaction over complete scripts.

use sqlparse_rs::{StripWhitespace, TokenFilter, tokenize};

const SQL: &str = "INSERT INTO dir_entries(type)VALUES(:type);

            INSERT INTO directories(inode)
                            VALUES(:inode)
            LIMIT 1";

const SQL2: &str = "SELECT child_entry,asdf AS inode, creation
              FROM links
              WHERE parent_dir == :parent_dir AND name == :name
              LIMIT 1";

const SQL3: &str = "SELECT
    0 AS st_dev,
    0 AS st_uid,
    0 AS st_gid,

    dir_entries.type         AS st_mode,
    dir_entries.inode        AS st_ino,
    COUNT(links.child_entry) AS st_nlink,

    :creation                AS st_ctime,
    dir_entries.access       AS st_atime,
    dir_entries.modification AS st_mtime,

    COALESCE(files.size,0) AS st_size,
    COALESCE(files.size,0) AS size

FROM dir_entries
    LEFT JOIN files
        ON dir_entries.inode == files.inode
    LEFT JOIN links
        ON dir_entries.inode == links.child_entry

WHERE dir_entries.inode == :inode

GROUP BY dir_entries.inode
LIMIT 1";

fn strip(sql: &str) -> String {
    StripWhitespace
        .process(Box::new(tokenize(sql)))
        .map(|token| token.value().to_string())
        .collect()
}

#[test]
fn test_strip_statements_with_placeholders() {
    assert_eq!(
        strip(SQL),
        "INSERT INTO dir_entries(type)VALUES(:type);INSERT INTO \
         directories(inode)VALUES(:inode)LIMIT 1"
    );
}

#[test]
fn test_strip_comparisons() {
    assert_eq!(
        strip(SQL2),
        "SELECT child_entry,asdf AS inode,creation FROM links WHERE \
         parent_dir==:parent_dir AND name==:name LIMIT 1"
    );
}

#[test]
fn test_strip_long_query() {
    assert_eq!(
        strip(SQL3),
        "SELECT 0 AS st_dev,0 AS st_uid,0 AS st_gid,dir_entries.type AS \
         st_mode,dir_entries.inode AS st_ino,COUNT(links.child_entry)AS \
         st_nlink,:creation AS st_ctime,dir_entries.access AS st_atime,\
         dir_entries.modification AS st_mtime,COALESCE(files.size,0)AS \
         st_size,COALESCE(files.size,0)AS size FROM dir_entries LEFT JOIN \
         files ON dir_entries.inode==files.inode LEFT JOIN links ON \
         dir_entries.inode==links.child_entry WHERE dir_entries.inode==\
         :inode GROUP BY dir_entries.inode LIMIT 1"
    );
}

#[test]
fn test_strip_inside_a_filter_stack() {
    let parser = sqlparse_rs::GenericParser::with_stack(
        sqlparse_rs::FilterStack::new().with_preprocess(StripWhitespace),
    );
    let statements: Vec<String> = sqlparse_rs::SqlParser::parse(&parser, SQL.into())
        .map(|statement| statement.unwrap().value())
        .collect();
    assert_eq!(
        statements,
        [
            "INSERT INTO dir_entries(type)VALUES(:type);",
            "INSERT INTO directories(inode)VALUES(:inode)LIMIT 1",
        ]
    );
}
