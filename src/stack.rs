//! The processing pipeline applied to each statement.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::{self, Debug};

use crate::errors::ParseError;
use crate::filters::{StatementFilter, TokenFilter, TokenStream};
use crate::grouping::{GroupingPass, group};
use crate::tree::Statement;

/// Ordered filters and grouping passes.
///
/// A stack is assembled with the builder methods and is not changed
/// afterwards; parsers hold their stacks for their whole lifetime.
///
/// ```
/// use sqlparse_rs::{FilterStack, GroupingPass, StripWhitespace};
///
/// let stack = FilterStack::new()
///     .with_preprocess(StripWhitespace)
///     .with_grouping_passes(&[GroupingPass::Brackets]);
/// assert!(stack.grouping_enabled());
/// ```
#[derive(Default)]
pub struct FilterStack {
    preprocess: Vec<Box<dyn TokenFilter>>,
    stmtprocess: Vec<Box<dyn StatementFilter>>,
    grouping: bool,
    passes: Vec<GroupingPass>,
}

impl FilterStack {
    /// An empty stack: no filters and grouping disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token filter run before splitting.
    #[must_use]
    pub fn with_preprocess(mut self, filter: impl TokenFilter + 'static) -> Self {
        self.preprocess.push(Box::new(filter));
        self
    }

    /// Append a statement filter.
    #[must_use]
    pub fn with_statement_filter(mut self, filter: impl StatementFilter + 'static) -> Self {
        self.stmtprocess.push(Box::new(filter));
        self
    }

    /// Enable grouping with every pass.
    #[must_use]
    pub fn enable_grouping(self) -> Self {
        self.with_grouping_passes(&GroupingPass::ALL)
    }

    /// Enable grouping with the given passes, run in order.
    #[must_use]
    pub fn with_grouping_passes(mut self, passes: &[GroupingPass]) -> Self {
        self.grouping = true;
        self.passes = passes.to_vec();
        self
    }

    /// Whether the stack groups statements.
    #[must_use]
    pub fn grouping_enabled(&self) -> bool {
        self.grouping
    }

    /// The grouping passes, in order.
    #[must_use]
    pub fn passes(&self) -> &[GroupingPass] {
        &self.passes
    }

    /// Chain the pre-processing filters over a token stream.
    pub fn preprocess<'a>(&'a self, stream: TokenStream<'a>) -> TokenStream<'a> {
        self.preprocess
            .iter()
            .fold(stream, |stream, filter| filter.process(stream))
    }

    /// Run the statement filters, then grouping.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] raised by a statement filter.
    pub fn run(&self, statement: Statement) -> Result<Statement, ParseError> {
        let mut statement = self
            .stmtprocess
            .iter()
            .try_fold(statement, |statement, filter| {
                filter.process(statement).inspect_err(|err| {
                    tracing::debug!(filter = filter.name(), %err, "statement rejected");
                })
            })?;
        if self.grouping {
            group(&mut statement, &self.passes);
        }
        Ok(statement)
    }
}

impl Debug for FilterStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preprocess: Vec<&str> = self.preprocess.iter().map(|filter| filter.name()).collect();
        let stmtprocess: Vec<&str> = self.stmtprocess.iter().map(|filter| filter.name()).collect();
        f.debug_struct("FilterStack")
            .field("preprocess", &preprocess)
            .field("stmtprocess", &stmtprocess)
            .field("grouping", &self.grouping)
            .field("passes", &self.passes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::StripWhitespace;
    use crate::lexer::tokenize;
    use crate::splitter::split_statements;
    use crate::tree::{GroupKind, Node};
    use alloc::string::ToString;

    struct Reject;

    impl StatementFilter for Reject {
        fn process(&self, _: Statement) -> Result<Statement, ParseError> {
            Err(ParseError::NotCreateTable)
        }
    }

    struct Count;

    impl StatementFilter for Count {
        fn process(&self, statement: Statement) -> Result<Statement, ParseError> {
            // Filters see the flat statement.
            assert!(statement.tokens().iter().all(|node| node.as_list().is_none()));
            Ok(statement)
        }
    }

    fn flat(sql: &str) -> Statement {
        Statement::new(tokenize(sql).map(Node::from).collect())
    }

    #[test]
    fn test_default_is_inert() {
        let stack = FilterStack::new();
        let statement = stack.run(flat("select (1)")).unwrap();
        assert_eq!(statement.groups(GroupKind::Parenthesis).count(), 0);
    }

    #[test]
    fn test_filters_run_before_grouping() {
        let stack = FilterStack::new().with_statement_filter(Count).enable_grouping();
        let statement = stack.run(flat("select (1)")).unwrap();
        assert_eq!(statement.groups(GroupKind::Parenthesis).count(), 1);
    }

    #[test]
    fn test_failure_stops_the_statement() {
        let stack = FilterStack::new().with_statement_filter(Reject).enable_grouping();
        assert_eq!(stack.run(flat("select 1")), Err(ParseError::NotCreateTable));
    }

    #[test]
    fn test_preprocess_chain() {
        let stack = FilterStack::new().with_preprocess(StripWhitespace);
        let statements: alloc::vec::Vec<_> =
            split_statements(stack.preprocess(Box::new(tokenize(" a ;  b ")))).collect();
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].to_string(), "a;");
        assert_eq!(statements[1].to_string(), "b");
    }

    #[test]
    fn test_debug_lists_filters() {
        let stack = FilterStack::new().with_preprocess(StripWhitespace);
        let debug = alloc::format!("{stack:?}");
        assert!(debug.contains("StripWhitespace"));
    }
}
