//! Keyword table used by the lexer to classify bare words.

use alloc::string::String;
use hashbrown::HashMap;

use crate::tokens::TokenType;

const DML: &[&str] = &["SELECT", "INSERT", "UPDATE", "DELETE", "REPLACE", "MERGE"];

const DDL: &[&str] = &["CREATE", "DROP", "ALTER"];

const BUILTINS: &[&str] = &[
    "BIGINT", "BINARY", "BIT", "BLOB", "BOOL", "BOOLEAN", "CHAR", "CHARACTER", "DATE",
    "DATETIME", "DEC", "DECIMAL", "DOUBLE", "FLOAT", "INT", "INTEGER", "INTERVAL", "LONG",
    "LONGBLOB", "LONGTEXT", "MEDIUMBLOB", "MEDIUMINT", "MEDIUMTEXT", "NUMERIC", "REAL",
    "SERIAL", "SMALLINT", "TEXT", "TIME", "TIMESTAMP", "TINYBLOB", "TINYINT", "TINYTEXT",
    "VARBINARY", "VARCHAR", "VARCHAR2", "YEAR",
];

const KEYWORDS: &[&str] = &[
    "ACTION", "ADD", "AFTER", "AGAINST", "ALGORITHM", "ALL", "ALWAYS", "AND", "ANY", "AS",
    "ASC", "AUTO_INCREMENT", "AVG_ROW_LENGTH", "BEFORE", "BEGIN", "BETWEEN", "BOTH", "BY",
    "CALL", "CASCADE", "CASE", "CAST", "CHANGE", "CHARSET", "CHECK", "CHECKSUM", "COLLATE",
    "COLUMN", "COLUMNS", "COLUMN_FORMAT", "COMMENT", "COMMIT", "COMPACT", "COMPRESSED",
    "CONSTRAINT", "CROSS", "CURRENT", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP",
    "CURRENT_USER", "CURSOR", "DATA", "DATABASE", "DECLARE", "DEFAULT", "DEFERRABLE",
    "DEFINER", "DELAYED", "DESC", "DESCRIBE", "DISK", "DISTINCT", "DIV", "DO", "DYNAMIC",
    "EACH", "ELSE", "ELSEIF", "ENCLOSED", "END", "ENGINE", "ESCAPE", "ESCAPED", "EXCEPT",
    "EXISTS", "EXPLAIN", "FALSE", "FETCH", "FIRST", "FIXED", "FOR", "FOREIGN", "FROM",
    "FULL", "FULLTEXT", "FUNCTION", "GENERATED", "GRANT", "GROUP", "HANDLER", "HAVING",
    "HIGH_PRIORITY", "IF", "IGNORE", "IN", "INDEX", "INNER", "INOUT", "INSERT_METHOD",
    "INTERSECT", "INTO", "INVOKER", "IS", "ITERATE", "JOIN", "KEY", "KEYS", "KEY_BLOCK_SIZE",
    "LAST", "LEADING", "LEAVE", "LEFT", "LIKE", "LIMIT", "LINES", "LOAD", "LOCAL", "LOCK",
    "LOOP", "LOW_PRIORITY", "MATCH", "MAX_ROWS", "MEMORY", "MIN_ROWS", "MOD", "MODIFY",
    "NATURAL", "NO", "NOT", "NULL", "OFFSET", "ON", "OR", "ORDER", "OUT", "OUTER",
    "OUTFILE", "PACK_KEYS", "PARTIAL", "PARTITION", "PARTITIONS", "PRIMARY", "PROCEDURE",
    "QUICK", "RANGE", "READ", "RECURSIVE", "REDUNDANT", "REFERENCES", "RENAME", "REPEAT",
    "RESTRICT", "RETURN", "RETURNING", "RETURNS", "REVOKE", "RIGHT", "ROLLBACK", "ROW",
    "ROWS", "ROW_FORMAT", "SCHEMA", "SECURITY", "SEPARATOR", "SET", "SHOW", "SIGNED",
    "SIMPLE", "SPATIAL", "SQL", "START", "STARTING", "STATS_PERSISTENT", "STORAGE",
    "STORED", "STRAIGHT_JOIN", "TABLE", "TABLES", "TABLESPACE", "TEMPORARY", "TERMINATED",
    "THEN", "TO", "TRAILING", "TRANSACTION", "TRIGGER", "TRUE", "TRUNCATE", "UNION",
    "UNIQUE", "UNLOCK", "UNSIGNED", "UNTIL", "USE", "USING", "VALUE", "VALUES", "VIEW",
    "VIRTUAL", "WHEN", "WHERE", "WHILE", "WITH", "WORK", "WRITE", "XOR", "ZEROFILL",
];

/// Lookup table from uppercase words to their keyword token type.
///
/// Built once per parser and shared by every lexer it creates.
#[derive(Debug, Clone)]
pub struct Keywords {
    table: HashMap<&'static str, TokenType>,
}

impl Default for Keywords {
    fn default() -> Self {
        let mut table = HashMap::with_capacity(
            DML.len() + DDL.len() + BUILTINS.len() + KEYWORDS.len(),
        );
        for (words, ttype) in [
            (KEYWORDS, TokenType::Keyword),
            (BUILTINS, TokenType::Builtin),
            (DDL, TokenType::Ddl),
            (DML, TokenType::Dml),
        ] {
            for &word in words {
                table.insert(word, ttype);
            }
        }
        Self { table }
    }
}

impl Keywords {
    /// Classify a bare word, falling back to [`TokenType::Name`].
    #[must_use]
    pub fn classify(&self, word: &str) -> TokenType {
        if !word.is_ascii() {
            return TokenType::Name;
        }
        let upper: String = word.to_ascii_uppercase();
        self.table
            .get(upper.as_str())
            .copied()
            .unwrap_or(TokenType::Name)
    }

    /// Number of known words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let keywords = Keywords::default();
        assert_eq!(keywords.classify("select"), TokenType::Dml);
        assert_eq!(keywords.classify("Create"), TokenType::Ddl);
        assert_eq!(keywords.classify("TEMPORARY"), TokenType::Keyword);
        assert_eq!(keywords.classify("varchar"), TokenType::Builtin);
        assert_eq!(keywords.classify("users"), TokenType::Name);
        assert_eq!(keywords.classify("größe"), TokenType::Name);
    }

    #[test]
    fn test_no_word_is_listed_twice() {
        let keywords = Keywords::default();
        assert_eq!(
            keywords.len(),
            DML.len() + DDL.len() + BUILTINS.len() + KEYWORDS.len()
        );
    }
}
