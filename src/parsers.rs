//! Dialect parsers: lex, split, route and process statements.

use alloc::borrow::Cow;
use alloc::boxed::Box;

use crate::dialects::mysql::MysqlCreateTableFilter;
use crate::errors::ParseError;
use crate::filters::TokenStream;
use crate::grouping::GroupingPass;
use crate::keywords::Keywords;
use crate::lexer::Lexer;
use crate::splitter::Splitter;
use crate::stack::FilterStack;
use crate::tokens::TokenType;
use crate::tree::{Statement, StatementType};

/// Picks the stack a split statement is processed with.
pub trait StackRouter {
    /// The stack for `statement`.
    fn stack_for(&self, statement: &Statement) -> &FilterStack;
}

impl StackRouter for FilterStack {
    fn stack_for(&self, _: &Statement) -> &FilterStack {
        self
    }
}

/// Turns SQL text into a lazy stream of processed statements.
pub trait SqlParser {
    /// Dialect name, `None` for the generic parser.
    fn dialect(&self) -> Option<&'static str>;

    /// Parse `sql` lazily, one statement per iteration.
    fn parse<'a>(&'a self, sql: Cow<'a, str>) -> Statements<'a>;
}

/// Lazy stream of processed statements.
///
/// A failing statement yields an `Err` and the stream carries on with the
/// next statement.
pub struct Statements<'a> {
    statements: Splitter<TokenStream<'a>>,
    router: &'a dyn StackRouter,
}

impl<'a> Statements<'a> {
    /// Split `tokens` and process each statement with the stack `router` picks.
    #[must_use]
    pub fn new(tokens: TokenStream<'a>, router: &'a dyn StackRouter) -> Self {
        Self {
            statements: Splitter::new(tokens),
            router,
        }
    }
}

impl core::fmt::Debug for Statements<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Statements").finish_non_exhaustive()
    }
}

impl Iterator for Statements<'_> {
    type Item = Result<Statement, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let statement = self.statements.next()?;
        Some(self.router.stack_for(&statement).run(statement))
    }
}

/// Parser without dialect-specific analysis: every statement is grouped
/// with all passes.
#[derive(Debug)]
pub struct GenericParser {
    keywords: Keywords,
    stack: FilterStack,
}

impl Default for GenericParser {
    fn default() -> Self {
        Self::with_stack(FilterStack::new().enable_grouping())
    }
}

impl GenericParser {
    /// A parser processing every statement with `stack`.
    #[must_use]
    pub fn with_stack(stack: FilterStack) -> Self {
        Self {
            keywords: Keywords::default(),
            stack,
        }
    }
}

impl SqlParser for GenericParser {
    fn dialect(&self) -> Option<&'static str> {
        None
    }

    fn parse<'a>(&'a self, sql: Cow<'a, str>) -> Statements<'a> {
        let tokens: TokenStream<'a> = Box::new(Lexer::with_keywords(sql, &self.keywords));
        Statements::new(self.stack.preprocess(tokens), &self.stack)
    }
}

/// MySQL parser: `CREATE TABLE` statements are rewritten into a column
/// catalog, everything else is processed like the generic parser does.
#[derive(Debug)]
pub struct MysqlParser {
    keywords: Keywords,
    default_stack: FilterStack,
    create_table_stack: FilterStack,
}

impl Default for MysqlParser {
    fn default() -> Self {
        Self {
            keywords: Keywords::default(),
            default_stack: FilterStack::new().enable_grouping(),
            create_table_stack: FilterStack::new()
                .with_statement_filter(MysqlCreateTableFilter)
                .with_grouping_passes(&[GroupingPass::Brackets]),
        }
    }
}

impl StackRouter for MysqlParser {
    fn stack_for(&self, statement: &Statement) -> &FilterStack {
        if is_create_table_statement(statement) {
            tracing::trace!("routing CREATE TABLE statement to the mysql stack");
            &self.create_table_stack
        } else {
            &self.default_stack
        }
    }
}

impl SqlParser for MysqlParser {
    fn dialect(&self) -> Option<&'static str> {
        Some("mysql")
    }

    fn parse<'a>(&'a self, sql: Cow<'a, str>) -> Statements<'a> {
        let tokens: TokenStream<'a> = Box::new(Lexer::with_keywords(sql, &self.keywords));
        Statements::new(self.default_stack.preprocess(tokens), self)
    }
}

/// The available parsers.
#[derive(Debug)]
pub enum Parser {
    /// See [`GenericParser`].
    Generic(GenericParser),
    /// See [`MysqlParser`].
    Mysql(MysqlParser),
}

impl Default for Parser {
    fn default() -> Self {
        Parser::Generic(GenericParser::default())
    }
}

impl Parser {
    /// The parser for a dialect name, matched case-insensitively.
    ///
    /// `None` and unknown names select the generic parser.
    #[must_use]
    pub fn for_dialect(dialect: Option<&str>) -> Self {
        match dialect {
            None => Parser::default(),
            Some(name) if name.eq_ignore_ascii_case("mysql") => {
                Parser::Mysql(MysqlParser::default())
            }
            Some(name) => {
                tracing::warn!(dialect = name, "unknown dialect, using the generic parser");
                Parser::default()
            }
        }
    }
}

impl SqlParser for Parser {
    fn dialect(&self) -> Option<&'static str> {
        match self {
            Parser::Generic(parser) => parser.dialect(),
            Parser::Mysql(parser) => parser.dialect(),
        }
    }

    fn parse<'a>(&'a self, sql: Cow<'a, str>) -> Statements<'a> {
        match self {
            Parser::Generic(parser) => parser.parse(sql),
            Parser::Mysql(parser) => parser.parse(sql),
        }
    }
}

/// Whether `statement` is `CREATE TABLE` or `CREATE TEMPORARY TABLE`.
#[must_use]
pub fn is_create_table_statement(statement: &Statement) -> bool {
    if statement.get_type() != StatementType::Create {
        return false;
    }
    let Some(first) = statement.token_first().and_then(|first| statement.token_index(first)) else {
        return false;
    };
    match statement.token_next_by_type(first + 1, TokenType::Keyword) {
        Some((_, token)) if token.is_keyword("TABLE") => true,
        Some((index, token)) if token.is_keyword("TEMPORARY") => statement
            .token_next_by_type(index + 1, TokenType::Keyword)
            .is_some_and(|(_, token)| token.is_keyword("TABLE")),
        _ => false,
    }
}
