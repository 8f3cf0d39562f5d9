//! Splitting a token stream into statements.

use alloc::vec::Vec;

use crate::tokens::Token;
use crate::tree::{Node, Statement};

/// Words that introduce a compound body after `CREATE`.
const COMPOUND_OBJECTS: &[&str] = &["PROCEDURE", "FUNCTION", "TRIGGER", "EVENT"];

/// Modifiers allowed between `CREATE` and the object word.
const CREATE_MODIFIERS: &[&str] = &["OR", "REPLACE", "AGGREGATE"];

/// Position within the header of a `CREATE` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CreateHeader {
    /// Before the object word.
    Prefix,
    /// After `DEFINER`, before the account.
    Definer,
    /// Inside the account, which ends at the next whitespace.
    Account,
    /// The object word has been read.
    Done,
}

/// Iterator adapter turning tokens into flat [`Statement`]s.
///
/// A statement ends after a `;` punctuation token. Quoted strings, quoted
/// names and comments are single tokens, so a `;` inside them never splits.
/// Inside a `CREATE PROCEDURE`, `FUNCTION`, `TRIGGER` or `EVENT` statement a
/// `BEGIN ... END` body is kept whole.
///
/// Whitespace after the last statement is appended to it rather than
/// emitted as an empty statement, so the statements together still cover
/// the whole input.
#[derive(Debug, Clone)]
pub struct Splitter<I> {
    tokens: I,
    buffer: Vec<Node>,
    pending: Option<Statement>,
    seen_significant: bool,
    header: Option<CreateHeader>,
    compound: bool,
    depth: usize,
}

impl<I: Iterator<Item = Token>> Splitter<I> {
    /// Wrap a token stream.
    #[must_use]
    pub fn new(tokens: I) -> Self {
        Self {
            tokens,
            buffer: Vec::new(),
            pending: None,
            seen_significant: false,
            header: None,
            compound: false,
            depth: 0,
        }
    }

    /// Track block nesting and report whether `token` ends the statement.
    fn observe(&mut self, token: &Token) -> bool {
        if token.is_whitespace() && self.header == Some(CreateHeader::Account) {
            self.header = Some(CreateHeader::Prefix);
        }
        if !token.is_significant() {
            return false;
        }
        if !self.seen_significant {
            self.seen_significant = true;
            self.header = token.is_keyword("CREATE").then_some(CreateHeader::Prefix);
        } else if let Some(header) = self.header {
            self.header = Some(self.read_header(header, token));
            if self.compound && token.is_keyword("BEGIN") {
                self.depth += 1;
            } else if self.compound && token.is_keyword("END") {
                self.depth = self.depth.saturating_sub(1);
            }
        }
        self.depth == 0 && token.is_punctuation(";")
    }

    /// Advance through `CREATE [OR REPLACE] [DEFINER = account] <object>`.
    ///
    /// Only the object word decides whether the statement has a compound
    /// body; words further on, such as column names, never do.
    fn read_header(&mut self, header: CreateHeader, token: &Token) -> CreateHeader {
        match header {
            CreateHeader::Prefix if token.is_word("DEFINER") => CreateHeader::Definer,
            CreateHeader::Prefix if CREATE_MODIFIERS.iter().any(|word| token.is_word(word)) => {
                CreateHeader::Prefix
            }
            CreateHeader::Prefix => {
                self.compound = COMPOUND_OBJECTS.iter().any(|word| token.is_word(word));
                CreateHeader::Done
            }
            CreateHeader::Definer if token.value() == "=" => CreateHeader::Definer,
            CreateHeader::Definer | CreateHeader::Account => CreateHeader::Account,
            CreateHeader::Done => CreateHeader::Done,
        }
    }

    fn push(&mut self, token: Token) {
        let terminates = self.observe(&token);
        self.buffer.push(Node::Token(token));
        if terminates {
            self.pending = Some(Statement::new(core::mem::take(&mut self.buffer)));
            self.seen_significant = false;
            self.header = None;
            self.compound = false;
        }
    }
}

impl<I: Iterator<Item = Token>> Iterator for Splitter<I> {
    type Item = Statement;

    fn next(&mut self) -> Option<Statement> {
        loop {
            let Some(token) = self.tokens.next() else {
                let rest = core::mem::take(&mut self.buffer);
                if let Some(mut statement) = self.pending.take() {
                    statement.as_list_mut().children_mut().extend(rest);
                    return Some(statement);
                }
                if rest
                    .iter()
                    .all(|node| node.as_token().is_some_and(Token::is_whitespace))
                {
                    return None;
                }
                self.seen_significant = false;
                return Some(Statement::new(rest));
            };

            // Anything but whitespace after a finished statement means another
            // statement follows, so the finished one can be released.
            if self.pending.is_some() && !token.is_whitespace() {
                let ready = self.pending.take();
                self.push(token);
                return ready;
            }
            self.push(token);
        }
    }
}

/// Split a token stream into statements.
pub fn split_statements<I: IntoIterator<Item = Token>>(tokens: I) -> Splitter<I::IntoIter> {
    Splitter::new(tokens.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::tree::StatementType;
    use alloc::string::{String, ToString};

    fn split(sql: &str) -> Vec<String> {
        split_statements(tokenize(sql)).map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_three_statements() {
        assert_eq!(split("A; B; C"), ["A;", " B;", " C"]);
    }

    #[test]
    fn test_trailing_whitespace_is_not_a_statement() {
        assert_eq!(split("select 1;\n  \n"), ["select 1;\n  \n"]);
        assert!(split("   \n").is_empty());
        assert!(split("").is_empty());
    }

    #[test]
    fn test_quoted_semicolons_do_not_split() {
        assert_eq!(
            split("select ';', `a;b`, \"c;\" -- x;\n; select 2"),
            ["select ';', `a;b`, \"c;\" -- x;\n;", " select 2"]
        );
    }

    #[test]
    fn test_trailing_comment_is_kept() {
        assert_eq!(split("select 1; -- done"), ["select 1;", " -- done"]);
    }

    #[test]
    fn test_empty_statements() {
        assert_eq!(split("select 1;;"), ["select 1;", ";"]);
    }

    #[test]
    fn test_procedure_body_kept_whole() {
        let sql = "CREATE PROCEDURE p() BEGIN SELECT 1; SELECT 2; END; SELECT 3;";
        let statements: Vec<Statement> = split_statements(tokenize(sql)).collect();
        assert_eq!(statements.len(), 2);
        assert_eq!(
            statements[0].to_string(),
            "CREATE PROCEDURE p() BEGIN SELECT 1; SELECT 2; END;"
        );
        assert_eq!(statements[1].get_type(), StatementType::Select);
    }

    #[test]
    fn test_begin_outside_compound_create() {
        assert_eq!(split("BEGIN; SELECT 1; END;").len(), 3);
        assert_eq!(split("CREATE TABLE begin (a int); SELECT 1;").len(), 2);
    }

    #[test]
    fn test_object_words_in_column_list() {
        assert_eq!(
            split("CREATE TABLE log (event int, begin date); SELECT 1; SELECT 2;"),
            ["CREATE TABLE log (event int, begin date);", " SELECT 1;", " SELECT 2;"]
        );
        assert_eq!(
            split("CREATE TABLE t (function int, begin int, end int); SELECT 1;").len(),
            2
        );
    }

    #[test]
    fn test_definer_and_or_replace() {
        let sql = "CREATE OR REPLACE DEFINER = `root`@`localhost` PROCEDURE p() \
                   BEGIN SELECT 1; END; SELECT 2;";
        assert_eq!(split(sql).len(), 2);
        let sql = "CREATE DEFINER=CURRENT_USER TRIGGER t BEFORE INSERT ON x \
                   FOR EACH ROW BEGIN SET NEW.a = 1; END; SELECT 2;";
        assert_eq!(split(sql).len(), 2);
    }
}
