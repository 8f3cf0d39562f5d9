//! Ordered classification rules.
//!
//! Each rule looks at the remaining input and either declines or returns the
//! byte length of the match and its type. The lexer tries the rules in the
//! order of [`RULES`] and takes the first match.

use crate::keywords::Keywords;
use crate::tokens::TokenType;

pub(super) type Rule = fn(&str, &Keywords) -> Option<(usize, TokenType)>;

pub(super) const RULES: &[Rule] = &[
    comment_single,
    comment_multiline,
    newline,
    whitespace,
    assignment_or_cast,
    wildcard,
    backtick_name,
    double_quoted,
    single_quoted,
    binary_literal,
    hex_literal,
    number,
    placeholder,
    variable,
    multiword_keyword,
    word,
    punctuation,
    comparison,
    operator,
];

/// Multi-word keywords, longest alternatives first.
const KEYWORD_PHRASES: &[&[&str]] = &[
    &["NOT", "NULL"],
    &["ORDER", "BY"],
    &["GROUP", "BY"],
    &["UNION", "ALL"],
    &["END", "IF"],
    &["END", "LOOP"],
    &["LEFT", "OUTER", "JOIN"],
    &["RIGHT", "OUTER", "JOIN"],
    &["FULL", "OUTER", "JOIN"],
    &["LEFT", "INNER", "JOIN"],
    &["LEFT", "JOIN"],
    &["RIGHT", "JOIN"],
    &["FULL", "JOIN"],
    &["INNER", "JOIN"],
    &["CROSS", "JOIN"],
    &["OUTER", "JOIN"],
];

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Byte length of the word-character run at the start of `s`.
fn word_len(s: &str) -> usize {
    s.char_indices()
        .find(|&(_, c)| !is_word_char(c))
        .map_or(s.len(), |(i, _)| i)
}

/// Whether the input at `at` does not continue a word.
fn at_word_boundary(s: &str, at: usize) -> bool {
    s[at..].chars().next().is_none_or(|c| !is_word_char(c))
}

fn comment_single(s: &str, _: &Keywords) -> Option<(usize, TokenType)> {
    let body = if s.starts_with("--") {
        2
    } else if s.starts_with('#') {
        1
    } else {
        return None;
    };
    let len = match s[body..].find(['\r', '\n']) {
        Some(offset) => {
            let end = body + offset;
            if s[end..].starts_with("\r\n") { end + 2 } else { end + 1 }
        }
        None => s.len(),
    };
    Some((len, TokenType::CommentSingle))
}

fn comment_multiline(s: &str, _: &Keywords) -> Option<(usize, TokenType)> {
    if !s.starts_with("/*") {
        return None;
    }
    s[2..]
        .find("*/")
        .map(|offset| (offset + 4, TokenType::CommentMultiline))
}

fn newline(s: &str, _: &Keywords) -> Option<(usize, TokenType)> {
    if s.starts_with("\r\n") {
        Some((2, TokenType::Newline))
    } else if s.starts_with(['\r', '\n']) {
        Some((1, TokenType::Newline))
    } else {
        None
    }
}

fn whitespace(s: &str, _: &Keywords) -> Option<(usize, TokenType)> {
    let len = s
        .char_indices()
        .find(|&(_, c)| !c.is_whitespace() || c == '\r' || c == '\n')
        .map_or(s.len(), |(i, _)| i);
    (len > 0).then_some((len, TokenType::Whitespace))
}

fn assignment_or_cast(s: &str, _: &Keywords) -> Option<(usize, TokenType)> {
    if s.starts_with(":=") {
        Some((2, TokenType::Assignment))
    } else if s.starts_with("::") {
        Some((2, TokenType::Punctuation))
    } else {
        None
    }
}

fn wildcard(s: &str, _: &Keywords) -> Option<(usize, TokenType)> {
    s.starts_with('*').then_some((1, TokenType::Wildcard))
}

/// Length of a quoted run starting at byte 0, honoring doubled quotes and,
/// when allowed, backslash escapes. `None` when unterminated.
fn quoted_len(s: &str, quote: u8, backslash_escapes: bool) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&quote) {
        return None;
    }
    let mut i = 1;
    while i < bytes.len() {
        let b = bytes[i];
        if backslash_escapes && b == b'\\' {
            i += 2;
        } else if b == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
            } else {
                return Some(i + 1);
            }
        } else {
            i += 1;
        }
    }
    None
}

fn backtick_name(s: &str, _: &Keywords) -> Option<(usize, TokenType)> {
    quoted_len(s, b'`', false).map(|len| (len, TokenType::Name))
}

fn double_quoted(s: &str, _: &Keywords) -> Option<(usize, TokenType)> {
    quoted_len(s, b'"', true).map(|len| (len, TokenType::StringSymbol))
}

fn single_quoted(s: &str, _: &Keywords) -> Option<(usize, TokenType)> {
    quoted_len(s, b'\'', true).map(|len| (len, TokenType::StringSingle))
}

/// `<prefix>'<digits>'` or `0<marker><digits>` literals.
fn radix_literal(s: &str, prefix: u8, is_digit: fn(u8) -> bool) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 && bytes[0].eq_ignore_ascii_case(&prefix) && bytes[1] == b'\'' {
        let digits = bytes[2..].iter().take_while(|&&b| is_digit(b)).count();
        return (bytes.get(2 + digits) == Some(&b'\'')).then_some(digits + 3);
    }
    if bytes.len() >= 3 && bytes[0] == b'0' && bytes[1] == prefix {
        let digits = bytes[2..].iter().take_while(|&&b| is_digit(b)).count();
        let len = digits + 2;
        return (digits > 0 && at_word_boundary(s, len)).then_some(len);
    }
    None
}

fn binary_literal(s: &str, _: &Keywords) -> Option<(usize, TokenType)> {
    radix_literal(s, b'b', |b| b == b'0' || b == b'1').map(|len| (len, TokenType::Binary))
}

fn hex_literal(s: &str, _: &Keywords) -> Option<(usize, TokenType)> {
    radix_literal(s, b'x', |b| b.is_ascii_hexdigit()).map(|len| (len, TokenType::Hex))
}

fn number(s: &str, _: &Keywords) -> Option<(usize, TokenType)> {
    let bytes = s.as_bytes();
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut len = digits(0);
    let mut ttype = TokenType::Integer;
    if bytes.get(len) == Some(&b'.') && bytes.get(len + 1).is_some_and(u8::is_ascii_digit) {
        len += 1 + digits(len + 1);
        ttype = TokenType::Float;
    }
    if len == 0 {
        return None;
    }
    if matches!(bytes.get(len), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(len + 1), Some(b'+' | b'-')));
        let exponent = digits(len + 1 + sign);
        if exponent > 0 {
            len += 1 + sign + exponent;
            ttype = TokenType::Float;
        }
    }
    Some((len, ttype))
}

fn placeholder(s: &str, _: &Keywords) -> Option<(usize, TokenType)> {
    let len = if s.starts_with('?') {
        1
    } else if s.starts_with("%s") {
        2
    } else if s.starts_with("%(") {
        let close = s.find(")s")?;
        let name = &s[2..close];
        if name.is_empty() || word_len(name) != name.len() {
            return None;
        }
        close + 2
    } else if let Some(rest) = s.strip_prefix(':').or_else(|| s.strip_prefix('$')) {
        if !rest.starts_with(|c: char| is_word_char(c) && c != '$') {
            return None;
        }
        1 + word_len(rest)
    } else {
        return None;
    };
    Some((len, TokenType::Placeholder))
}

fn variable(s: &str, _: &Keywords) -> Option<(usize, TokenType)> {
    let at = s.bytes().take_while(|&b| b == b'@').count();
    if at == 0 || at > 2 || !s[at..].starts_with(is_word_start) {
        return None;
    }
    Some((at + word_len(&s[at..]), TokenType::Name))
}

/// Match a whitespace-separated sequence of words, case-insensitively.
fn match_phrase(s: &str, phrase: &[&str]) -> Option<usize> {
    let mut pos = 0;
    for (i, expected) in phrase.iter().enumerate() {
        if i > 0 {
            let gap = s[pos..]
                .char_indices()
                .find(|&(_, c)| !c.is_whitespace())
                .map_or(s.len() - pos, |(offset, _)| offset);
            if gap == 0 {
                return None;
            }
            pos += gap;
        }
        let len = word_len(&s[pos..]);
        if !s[pos..pos + len].eq_ignore_ascii_case(expected) {
            return None;
        }
        pos += len;
    }
    Some(pos)
}

fn multiword_keyword(s: &str, _: &Keywords) -> Option<(usize, TokenType)> {
    if !s.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    KEYWORD_PHRASES
        .iter()
        .find_map(|phrase| match_phrase(s, phrase))
        .map(|len| (len, TokenType::Keyword))
}

fn word(s: &str, keywords: &Keywords) -> Option<(usize, TokenType)> {
    if !s.starts_with(is_word_start) {
        return None;
    }
    let len = word_len(s);
    // A word used as a qualifier or called like a function is always a name.
    let ttype = if s[len..].starts_with(['.', '(']) {
        TokenType::Name
    } else {
        keywords.classify(&s[..len])
    };
    Some((len, ttype))
}

fn punctuation(s: &str, _: &Keywords) -> Option<(usize, TokenType)> {
    s.starts_with([';', ':', '(', ')', '[', ']', ',', '.'])
        .then_some((1, TokenType::Punctuation))
}

fn run_of(s: &str, set: &[u8]) -> usize {
    s.bytes().take_while(|b| set.contains(b)).count()
}

fn comparison(s: &str, _: &Keywords) -> Option<(usize, TokenType)> {
    let len = run_of(s, b"<>=~!");
    (len > 0).then_some((len, TokenType::Comparison))
}

fn operator(s: &str, _: &Keywords) -> Option<(usize, TokenType)> {
    let len = run_of(s, b"+-/%^&|@");
    (len > 0).then_some((len, TokenType::Operator))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_match(s: &str) -> Option<(usize, TokenType)> {
        let keywords = Keywords::default();
        RULES.iter().find_map(|rule| rule(s, &keywords))
    }

    #[test]
    fn test_quoted_len() {
        assert_eq!(quoted_len("`ab``c` x", b'`', false), Some(7));
        assert_eq!(quoted_len(r"'it\'s' x", b'\'', true), Some(7));
        assert_eq!(quoted_len("'open", b'\'', true), None);
    }

    #[test]
    fn test_radix_literals() {
        assert_eq!(first_match("b'001'"), Some((6, TokenType::Binary)));
        assert_eq!(first_match("0b001)"), Some((5, TokenType::Binary)));
        assert_eq!(first_match("0b001x"), Some((1, TokenType::Integer)));
        assert_eq!(first_match("X'fF'"), Some((5, TokenType::Hex)));
        assert_eq!(first_match("0x1A "), Some((4, TokenType::Hex)));
        assert_eq!(first_match("b001"), Some((4, TokenType::Name)));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(first_match("42,"), Some((2, TokenType::Integer)));
        assert_eq!(first_match("3.14)"), Some((4, TokenType::Float)));
        assert_eq!(first_match("1e10"), Some((4, TokenType::Float)));
        assert_eq!(first_match("1.e"), Some((1, TokenType::Integer)));
    }

    #[test]
    fn test_phrases_and_words() {
        assert_eq!(first_match("NOT  NULL,"), Some((9, TokenType::Keyword)));
        assert_eq!(first_match("not nullable"), Some((3, TokenType::Keyword)));
        assert_eq!(first_match("left outer join t"), Some((15, TokenType::Keyword)));
        assert_eq!(first_match("count(*)"), Some((5, TokenType::Name)));
        assert_eq!(first_match("int(11)"), Some((3, TokenType::Name)));
        assert_eq!(first_match("int "), Some((3, TokenType::Builtin)));
    }

    #[test]
    fn test_placeholders_and_variables() {
        assert_eq!(first_match(":inode)"), Some((6, TokenType::Placeholder)));
        assert_eq!(first_match("%(name)s"), Some((8, TokenType::Placeholder)));
        assert_eq!(first_match("$1"), Some((2, TokenType::Placeholder)));
        assert_eq!(first_match("@@session"), Some((9, TokenType::Name)));
        assert_eq!(first_match("::int"), Some((2, TokenType::Punctuation)));
    }

    #[test]
    fn test_comments() {
        assert_eq!(first_match("-- hi\r\nx"), Some((7, TokenType::CommentSingle)));
        assert_eq!(first_match("# hi"), Some((4, TokenType::CommentSingle)));
        assert_eq!(first_match("/* a */b"), Some((7, TokenType::CommentMultiline)));
        assert_eq!(first_match("/* open"), Some((1, TokenType::Operator)));
    }
}
