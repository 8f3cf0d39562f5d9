//! Token types and the token produced by the lexer.

use alloc::string::String;
use core::fmt::{self, Display};

/// Hierarchical classification of a token.
///
/// Every type has at most one parent, so `Literal.Number.Integer` is a
/// `Literal.Number` which is a `Literal`. Use [`TokenType::is_a`] to test
/// membership in a family instead of comparing variants directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Root of text-like tokens.
    Text,
    /// Spaces and tabs.
    Whitespace,
    /// A line break.
    Newline,
    /// A character the lexer could not classify.
    Error,
    /// Any keyword.
    Keyword,
    /// Data manipulation keyword (`SELECT`, `INSERT`, ...).
    Dml,
    /// Data definition keyword (`CREATE`, `DROP`, `ALTER`).
    Ddl,
    /// A name: identifier, quoted identifier or variable.
    Name,
    /// Builtin type names (`INT`, `VARCHAR`, ...).
    Builtin,
    /// Bind parameters (`?`, `:name`, `%s`, `$1`).
    Placeholder,
    /// Root of literal tokens.
    Literal,
    /// Root of string literals.
    String,
    /// A single-quoted string literal.
    StringSingle,
    /// A double-quoted string (an identifier in ANSI mode).
    StringSymbol,
    /// Root of numeric literals.
    Number,
    /// An integer literal.
    Integer,
    /// A decimal or exponent literal.
    Float,
    /// `0xff` or `x'ff'`.
    Hex,
    /// `0b0101` or `b'0101'`.
    Binary,
    /// Separators: `;`, `,`, `(`, `)`, `.`, ...
    Punctuation,
    /// Arithmetic and bitwise operators.
    Operator,
    /// Comparison operators.
    Comparison,
    /// `:=`
    Assignment,
    /// `*`
    Wildcard,
    /// Root of comments.
    Comment,
    /// `-- ...` or `# ...` comment, newline included.
    CommentSingle,
    /// `/* ... */` comment.
    CommentMultiline,
}

impl TokenType {
    /// Returns the direct parent of this type, if any.
    #[must_use]
    pub fn parent(self) -> Option<TokenType> {
        match self {
            TokenType::Whitespace => Some(TokenType::Text),
            TokenType::Newline => Some(TokenType::Whitespace),
            TokenType::Dml | TokenType::Ddl => Some(TokenType::Keyword),
            TokenType::Builtin | TokenType::Placeholder => Some(TokenType::Name),
            TokenType::String | TokenType::Number => Some(TokenType::Literal),
            TokenType::StringSingle | TokenType::StringSymbol => Some(TokenType::String),
            TokenType::Integer | TokenType::Float | TokenType::Hex | TokenType::Binary => {
                Some(TokenType::Number)
            }
            TokenType::Comparison => Some(TokenType::Operator),
            TokenType::CommentSingle | TokenType::CommentMultiline => Some(TokenType::Comment),
            TokenType::Text
            | TokenType::Error
            | TokenType::Keyword
            | TokenType::Name
            | TokenType::Literal
            | TokenType::Punctuation
            | TokenType::Operator
            | TokenType::Assignment
            | TokenType::Wildcard
            | TokenType::Comment => None,
        }
    }

    /// Whether `self` is `ancestor` or one of its descendants.
    #[must_use]
    pub fn is_a(self, ancestor: TokenType) -> bool {
        let mut current = Some(self);
        while let Some(ttype) = current {
            if ttype == ancestor {
                return true;
            }
            current = ttype.parent();
        }
        false
    }

    /// The dotted path of this type, e.g. `Literal.Number.Integer`.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            TokenType::Text => "Text",
            TokenType::Whitespace => "Text.Whitespace",
            TokenType::Newline => "Text.Whitespace.Newline",
            TokenType::Error => "Error",
            TokenType::Keyword => "Keyword",
            TokenType::Dml => "Keyword.DML",
            TokenType::Ddl => "Keyword.DDL",
            TokenType::Name => "Name",
            TokenType::Builtin => "Name.Builtin",
            TokenType::Placeholder => "Name.Placeholder",
            TokenType::Literal => "Literal",
            TokenType::String => "Literal.String",
            TokenType::StringSingle => "Literal.String.Single",
            TokenType::StringSymbol => "Literal.String.Symbol",
            TokenType::Number => "Literal.Number",
            TokenType::Integer => "Literal.Number.Integer",
            TokenType::Float => "Literal.Number.Float",
            TokenType::Hex => "Literal.Number.Hex",
            TokenType::Binary => "Literal.Number.Binary",
            TokenType::Punctuation => "Punctuation",
            TokenType::Operator => "Operator",
            TokenType::Comparison => "Operator.Comparison",
            TokenType::Assignment => "Assignment",
            TokenType::Wildcard => "Wildcard",
            TokenType::Comment => "Comment",
            TokenType::CommentSingle => "Comment.Single",
            TokenType::CommentMultiline => "Comment.Multiline",
        }
    }
}

impl Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A classified slice of the source text.
///
/// Tokens are never mutated once created: filters that need a different
/// value build a new token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    ttype: TokenType,
    value: String,
    normalized: String,
    pos: usize,
}

impl Token {
    /// Create a token, deriving the normalized form from the type.
    ///
    /// Keywords normalize to uppercase with inner whitespace runs collapsed
    /// to a single space; every other type keeps its raw value.
    #[must_use]
    pub fn new(ttype: TokenType, value: impl Into<String>, pos: usize) -> Self {
        let value = value.into();
        let normalized = if ttype.is_a(TokenType::Keyword) {
            normalize_keyword(&value)
        } else {
            value.clone()
        };
        Self {
            ttype,
            value,
            normalized,
            pos,
        }
    }

    /// The token type.
    #[must_use]
    pub fn ttype(&self) -> TokenType {
        self.ttype
    }

    /// The raw source text of the token.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The normalized text used for case-insensitive matching.
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Byte offset of the token in the decoded source.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Whether the token is of `ttype` or one of its subtypes.
    #[must_use]
    pub fn is_a(&self, ttype: TokenType) -> bool {
        self.ttype.is_a(ttype)
    }

    /// Whether the token is whitespace (including newlines).
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        self.ttype.is_a(TokenType::Whitespace)
    }

    /// Whether the token carries meaning, i.e. is neither whitespace nor a comment.
    #[must_use]
    pub fn is_significant(&self) -> bool {
        !self.is_whitespace() && !self.ttype.is_a(TokenType::Comment)
    }

    /// Whether the token is a keyword whose normalized form equals `keyword`.
    ///
    /// `keyword` must be given in uppercase.
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.ttype.is_a(TokenType::Keyword) && self.normalized == keyword
    }

    /// Whether the token is punctuation with exactly the given text.
    #[must_use]
    pub fn is_punctuation(&self, text: &str) -> bool {
        self.ttype == TokenType::Punctuation && self.value == text
    }

    /// Whether the token is a bare word (keyword or unquoted name) spelling `word`,
    /// compared case-insensitively.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        let bare_name = self.ttype.is_a(TokenType::Name) && !self.value.starts_with('`');
        (self.ttype.is_a(TokenType::Keyword) || bare_name)
            && self.normalized.eq_ignore_ascii_case(word)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

fn normalize_keyword(value: &str) -> String {
    let mut normalized = String::with_capacity(value.len());
    for (i, part) in value.split_whitespace().enumerate() {
        if i > 0 {
            normalized.push(' ');
        }
        normalized.push_str(&part.to_uppercase());
    }
    normalized
}
