//! Lexical tokens of the PGN format.

use std::{borrow::Cow, fmt};

use crate::{
    ast::Span,
    errors::{Error, ErrorKind, ParseResult},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Period,
    LeftBracket,
    RightBracket,
    LeftParenthesis,
    RightParenthesis,
    String,
    Symbol,
    Integer,
    Comment,
    Annotation,
    GameTermination,
}

impl TokenKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            TokenKind::Period => "period",
            TokenKind::LeftBracket => "left bracket",
            TokenKind::RightBracket => "right bracket",
            TokenKind::LeftParenthesis => "left parenthesis",
            TokenKind::RightParenthesis => "right parenthesis",
            TokenKind::String => "string",
            TokenKind::Symbol => "symbol",
            TokenKind::Integer => "integer",
            TokenKind::Comment => "comment",
            TokenKind::Annotation => "annotation",
            TokenKind::GameTermination => "game termination",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue<'a> {
    None,
    Text(Cow<'a, str>),
    Integer(u32),
}

/// A token and the span it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub span: Span,
    pub value: TokenValue<'a>,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, start: usize, end: usize, value: TokenValue<'a>) -> Token<'a> {
        Token {
            kind,
            span: Span::new(start, end),
            value,
        }
    }

    fn text(kind: TokenKind, start: usize, end: usize, text: impl Into<Cow<'a, str>>) -> Token<'a> {
        Token::new(kind, start, end, TokenValue::Text(text.into()))
    }

    /// The text value of strings, symbols, comments, annotations and game
    /// terminations. Empty for other tokens.
    pub fn as_str(&self) -> &str {
        match &self.value {
            TokenValue::Text(text) => text,
            _ => "",
        }
    }

    pub fn into_string(self) -> String {
        match self.value {
            TokenValue::Text(text) => text.into_owned(),
            TokenValue::Integer(n) => n.to_string(),
            TokenValue::None => String::new(),
        }
    }
}

/// Symbolic annotation glyphs, longest first.
const GLYPHS: [&str; 16] = [
    "+--", "--+", "+/-", "-/+", "!!", "??", "!?", "?!", "+-", "-+", "+=", "=+", "!", "?", "=",
    "~",
];

fn is_symbol_continuation(ch: u8) -> bool {
    matches!(
        ch,
        b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'+' | b'#' | b'=' | b':' | b'/' | b'-'
    )
}

/// Whitespace between tokens, including a byte order mark.
fn is_space(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{feff}'
}

/// Reads the token starting at or after `offset`, skipping whitespace.
///
/// Returns `Ok(None)` at the end of the input.
pub fn read_token(text: &str, offset: usize) -> ParseResult<Option<Token<'_>>> {
    let start = match text[offset..].find(|ch: char| !is_space(ch)) {
        Some(skipped) => offset + skipped,
        None => return Ok(None),
    };

    let bytes = text.as_bytes();
    let token = match bytes[start] {
        b'.' => Token::new(TokenKind::Period, start, start + 1, TokenValue::None),
        b'[' => Token::new(TokenKind::LeftBracket, start, start + 1, TokenValue::None),
        b']' => Token::new(TokenKind::RightBracket, start, start + 1, TokenValue::None),
        b'(' => Token::new(TokenKind::LeftParenthesis, start, start + 1, TokenValue::None),
        b')' => Token::new(TokenKind::RightParenthesis, start, start + 1, TokenValue::None),
        b'{' => read_comment(text, start),
        b'"' => read_string(text, start),
        b'$' => read_nag(text, start),
        b'!' | b'?' | b'=' | b'~' | b'+' | b'-' => read_glyph(text, start)?,
        b'*' => Token::text(TokenKind::GameTermination, start, start + 1, "*"),
        ch if ch.is_ascii_alphanumeric() => read_symbol(text, start),
        _ => {
            let ch = text[start..].chars().next().unwrap_or_default();
            return Err(Error::new(
                ErrorKind::UnknownCharacter(ch),
                Span::new(start, start + ch.len_utf8()),
            ));
        }
    };
    Ok(Some(token))
}

fn read_comment(text: &str, start: usize) -> Token<'_> {
    let content_start = start + 1;
    match text[content_start..].find('}') {
        Some(len) => Token::text(
            TokenKind::Comment,
            start,
            content_start + len + 1,
            &text[content_start..content_start + len],
        ),
        None => Token::text(TokenKind::Comment, start, text.len(), &text[content_start..]),
    }
}

fn read_string(text: &str, start: usize) -> Token<'_> {
    let content_start = start + 1;
    let mut content_end = text.len();
    let mut end = text.len();
    let mut decoded = String::new();
    let mut escaped = false;

    let mut chars = text[content_start..].char_indices();
    while let Some((i, ch)) = chars.next() {
        match ch {
            '"' => {
                content_end = content_start + i;
                end = content_end + 1;
                break;
            }
            '\\' => {
                escaped = true;
                if let Some((_, next)) = chars.next() {
                    decoded.push(next);
                }
            }
            _ => decoded.push(ch),
        }
    }

    if escaped {
        Token::text(TokenKind::String, start, end, decoded)
    } else {
        Token::text(TokenKind::String, start, end, &text[content_start..content_end])
    }
}

/// Reads `$` and the digits after it. A lone `$` is kept as is.
fn read_nag(text: &str, start: usize) -> Token<'_> {
    let digits = text[start + 1..].bytes().take_while(u8::is_ascii_digit).count();
    let end = start + 1 + digits;
    Token::text(TokenKind::Annotation, start, end, &text[start..end])
}

fn read_glyph(text: &str, start: usize) -> ParseResult<Token<'_>> {
    let rest = &text[start..];
    match GLYPHS.iter().find(|glyph| rest.starts_with(**glyph)) {
        Some(glyph) => Ok(Token::text(TokenKind::Annotation, start, start + glyph.len(), *glyph)),
        None => Err(Error::new(ErrorKind::UnknownAnnotation, Span::new(start, start + 1))),
    }
}

fn read_symbol(text: &str, start: usize) -> Token<'_> {
    let len = 1 + text.as_bytes()[start + 1..]
        .iter()
        .take_while(|ch| is_symbol_continuation(**ch))
        .count();
    let end = start + len;
    let symbol = &text[start..end];

    if matches!(symbol, "1-0" | "0-1" | "1/2-1/2") {
        Token::text(TokenKind::GameTermination, start, end, symbol)
    } else if symbol.bytes().all(|ch| ch.is_ascii_digit()) {
        // Move numbers are only labels, so huge ones saturate.
        let n = btoi::btou_saturating(symbol.as_bytes()).unwrap_or(u32::MAX);
        Token::new(TokenKind::Integer, start, end, TokenValue::Integer(n))
    } else {
        Token::text(TokenKind::Symbol, start, end, symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str) -> Token<'_> {
        read_token(text, 0).expect("valid token").expect("token")
    }

    fn error(text: &str) -> Error {
        read_token(text, 0).expect_err("invalid token")
    }

    #[test]
    fn test_empty() {
        assert_eq!(read_token("", 0), Ok(None));
        assert_eq!(read_token(" \n\t ", 0), Ok(None));
        assert_eq!(read_token("1.e4  ", 4), Ok(None));
    }

    #[test]
    fn test_punctuation() {
        for (text, kind) in [
            (".", TokenKind::Period),
            ("[", TokenKind::LeftBracket),
            ("]", TokenKind::RightBracket),
            ("(", TokenKind::LeftParenthesis),
            (")", TokenKind::RightParenthesis),
        ] {
            assert_eq!(token(text), Token::new(kind, 0, 1, TokenValue::None), "{text}");
        }
    }

    #[test]
    fn test_skips_whitespace() {
        let token = read_token("1.e4 \n  e5", 4).unwrap().unwrap();
        assert_eq!(token.kind, TokenKind::Symbol);
        assert_eq!(token.span, Span::new(8, 10));
        assert_eq!(token.as_str(), "e5");
    }

    #[test]
    fn test_string() {
        let t = token("\"hello\"");
        assert_eq!((t.kind, t.span, t.as_str()), (TokenKind::String, Span::new(0, 7), "hello"));
        assert!(matches!(t.value, TokenValue::Text(Cow::Borrowed(_))));

        let t = token("\"hello \\\"quote\\\"\"");
        assert_eq!((t.span, t.as_str()), (Span::new(0, 17), "hello \"quote\""));

        let t = token("\"hello \\\\\"");
        assert_eq!((t.span, t.as_str()), (Span::new(0, 10), "hello \\"));

        let t = token("\"hello \\ \"");
        assert_eq!((t.span, t.as_str()), (Span::new(0, 10), "hello  "));
    }

    #[test]
    fn test_unterminated_string() {
        let t = token("\"hello");
        assert_eq!((t.kind, t.span, t.as_str()), (TokenKind::String, Span::new(0, 6), "hello"));

        let t = token("\"hello \\");
        assert_eq!((t.span, t.as_str()), (Span::new(0, 8), "hello "));

        let t = token("\"a\\\"b");
        assert_eq!((t.span, t.as_str()), (Span::new(0, 5), "a\"b"));

        let t = token("\"");
        assert_eq!((t.span, t.as_str()), (Span::new(0, 1), ""));
    }

    #[test]
    fn test_comment() {
        let t = token("{ The Ruy Lopez } e5");
        assert_eq!(
            (t.kind, t.span, t.as_str()),
            (TokenKind::Comment, Span::new(0, 17), " The Ruy Lopez ")
        );

        let t = token("{unterminated");
        assert_eq!((t.span, t.as_str()), (Span::new(0, 13), "unterminated"));

        let t = token("{}");
        assert_eq!((t.span, t.as_str()), (Span::new(0, 2), ""));
    }

    #[test]
    fn test_annotation() {
        for glyph in GLYPHS {
            let t = token(glyph);
            assert_eq!(t.kind, TokenKind::Annotation, "{glyph}");
            assert_eq!(t.as_str(), glyph);
            assert_eq!(t.span, Span::new(0, glyph.len()));
        }

        let t = token("$14 e5");
        assert_eq!((t.span, t.as_str()), (Span::new(0, 3), "$14"));

        let t = token("!?!");
        assert_eq!(t.as_str(), "!?");

        let t = token("+/-+");
        assert_eq!(t.as_str(), "+/-");
    }

    #[test]
    fn test_invalid_annotation() {
        assert_eq!(*error("-x").kind(), ErrorKind::UnknownAnnotation);
        assert_eq!(error("-x").span(), Span::new(0, 1));
    }

    #[test]
    fn test_lone_dollar() {
        let t = token("$ 1");
        assert_eq!((t.kind, t.span, t.as_str()), (TokenKind::Annotation, Span::new(0, 1), "$"));

        let t = token("$e4");
        assert_eq!((t.span, t.as_str()), (Span::new(0, 1), "$"));
    }

    #[test]
    fn test_byte_order_mark() {
        let t = token("\u{feff}[Event");
        assert_eq!(t.kind, TokenKind::LeftBracket);
        assert_eq!(t.span, Span::new(3, 4));
        assert_eq!(read_token("\u{feff}", 0), Ok(None));
    }

    #[test]
    fn test_symbol() {
        let t = token("Nbd7+ ");
        assert_eq!((t.kind, t.span, t.as_str()), (TokenKind::Symbol, Span::new(0, 5), "Nbd7+"));

        let t = token("O-O-O#");
        assert_eq!(t.as_str(), "O-O-O#");

        let t = token("e8=Q!");
        assert_eq!((t.span, t.as_str()), (Span::new(0, 4), "e8=Q"));

        let t = token("1.");
        assert_eq!(t, Token::new(TokenKind::Integer, 0, 1, TokenValue::Integer(1)));

        let t = token("42...");
        assert_eq!(t.value, TokenValue::Integer(42));
    }

    #[test]
    fn test_game_termination() {
        for termination in ["*", "1-0", "0-1", "1/2-1/2"] {
            let t = token(termination);
            assert_eq!(t.kind, TokenKind::GameTermination);
            assert_eq!(t.as_str(), termination);
        }

        let t = token("**");
        assert_eq!(t.span, Span::new(0, 1));

        let t = token("1-00");
        assert_eq!(t.kind, TokenKind::Symbol);
    }

    #[test]
    fn test_integer_saturates() {
        let t = token("99999999999.");
        assert_eq!(t.kind, TokenKind::Integer);
        assert_eq!(t.span, Span::new(0, 11));
        assert_eq!(t.value, TokenValue::Integer(u32::MAX));
    }

    #[test]
    fn test_unknown_character() {
        let err = error("  %");
        assert_eq!(*err.kind(), ErrorKind::UnknownCharacter('%'));
        assert_eq!(err.span(), Span::new(2, 3));

        let err = error("é");
        assert_eq!(err.span(), Span::new(0, 2));
    }
}
