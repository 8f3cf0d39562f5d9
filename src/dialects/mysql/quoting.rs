//! MySQL identifier and string literal unquoting.

use alloc::borrow::Cow;
use alloc::string::String;

/// Quote characters accepted around identifiers, with their escaped form.
const IDENTIFIER_QUOTES: [(char, &str); 2] = [('`', "``"), ('"', "\"\"")];

/// Strip one layer of backtick or double quote around an identifier.
///
/// Only the doubled form of the quote actually used is unescaped, so a
/// backtick-quoted name keeps any double quotes it contains verbatim and
/// vice versa. Unquoted input is returned unchanged.
///
/// ```
/// use sqlparse_rs::dialects::mysql::clean_quote;
///
/// assert_eq!(clean_quote("`ab``c`"), "ab`c");
/// assert_eq!(clean_quote("`ab\"\"c`"), "ab\"\"c");
/// ```
#[must_use]
pub fn clean_quote(name: &str) -> Cow<'_, str> {
    for (quote, doubled) in IDENTIFIER_QUOTES {
        let Some(inner) = name
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        else {
            continue;
        };
        if inner.contains(doubled) {
            let mut single = [0u8; 4];
            return Cow::Owned(inner.replace(doubled, quote.encode_utf8(&mut single)));
        }
        return Cow::Borrowed(inner);
    }
    Cow::Borrowed(name)
}

/// Decode a quoted string literal into its text.
///
/// Handles doubled quotes and the MySQL backslash escapes; `\%` and `\_`
/// keep their backslash as MySQL does. Input without surrounding quotes is
/// returned unchanged.
#[must_use]
pub fn unescape_literal(literal: &str) -> Cow<'_, str> {
    let Some(quote) = literal.chars().next().filter(|c| matches!(c, '\'' | '"')) else {
        return Cow::Borrowed(literal);
    };
    let Some(inner) = literal[1..].strip_suffix(quote) else {
        return Cow::Borrowed(literal);
    };
    if !inner.contains(['\\', quote]) {
        return Cow::Borrowed(inner);
    }
    let mut text = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == quote {
            // Doubled quote.
            chars.next();
            text.push(quote);
        } else if c == '\\' {
            match chars.next() {
                Some('n') => text.push('\n'),
                Some('t') => text.push('\t'),
                Some('r') => text.push('\r'),
                Some('0') => text.push('\0'),
                Some('b') => text.push('\u{8}'),
                Some('Z') => text.push('\u{1a}'),
                Some(escaped @ ('%' | '_')) => {
                    text.push('\\');
                    text.push(escaped);
                }
                Some(other) => text.push(other),
                None => text.push('\\'),
            }
        } else {
            text.push(c);
        }
    }
    Cow::Owned(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_quote() {
        assert_eq!(clean_quote("abc"), "abc");
        assert_eq!(clean_quote("\"abc\""), "abc");
        assert_eq!(clean_quote("`ab``c`"), "ab`c");
        assert_eq!(clean_quote("\"ab\"\"c\""), "ab\"c");
        assert_eq!(clean_quote("`ab\"\"c`"), "ab\"\"c");
        assert_eq!(clean_quote("\"ab``c\""), "ab``c");
        assert_eq!(clean_quote("\"ab\"\"c\""), "ab\"c");
        assert_eq!(clean_quote("`\"abc\"`"), "\"abc\"");
        assert_eq!(clean_quote("\"`abc`\""), "`abc`");
        assert_eq!(clean_quote("`\"a\"\"b``c\"`"), "\"a\"\"b`c\"");
        assert_eq!(clean_quote("\"`a``b\"\"c`\""), "`a``b\"c`");
    }

    #[test]
    fn test_clean_quote_edge_cases() {
        assert_eq!(clean_quote("`"), "`");
        assert_eq!(clean_quote("``"), "");
        assert!(matches!(clean_quote("`abc`"), Cow::Borrowed("abc")));
    }

    #[test]
    fn test_unescape_literal() {
        assert_eq!(unescape_literal("'small'"), "small");
        assert_eq!(unescape_literal("'it''s'"), "it's");
        assert_eq!(unescape_literal(r"'it\'s'"), "it's");
        assert_eq!(unescape_literal(r"'a\nb'"), "a\nb");
        assert_eq!(unescape_literal(r"'50\%'"), r"50\%");
        assert_eq!(unescape_literal("\"say \"\"hi\"\"\""), "say \"hi\"");
        assert_eq!(unescape_literal("plain"), "plain");
        assert_eq!(unescape_literal("''"), "");
    }
}
