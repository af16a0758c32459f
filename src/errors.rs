use std::{error::Error as StdError, fmt};

use crate::{
    ast::Span,
    context::{FenError, IllegalMove},
    token::TokenKind,
};

pub type ParseResult<T> = Result<T, Error>;

/// Error when tokenizing or parsing a PGN text.
///
/// Parsing stops at the first error. The span points at the offending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
}

/// The kinds of [`Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A character that cannot start any token.
    UnknownCharacter(char),
    /// A run of punctuation that is not a known annotation glyph.
    UnknownAnnotation,
    /// A required token of another kind was found.
    UnexpectedToken {
        #[allow(missing_docs)]
        found: TokenKind,
        #[allow(missing_docs)]
        expected: TokenKind,
    },
    /// The input ended where a token was required.
    UnexpectedEnd {
        #[allow(missing_docs)]
        expected: TokenKind,
    },
    /// A token remained after the last game.
    TrailingToken(TokenKind),
    /// A move that is not legal in the current position.
    IllegalMove(IllegalMove),
    /// A `FEN` tag pair that does not describe a legal position.
    InvalidFen(FenError),
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, span: Span) -> Error {
        Error { kind, span }
    }

    /// The kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The byte span of the offending input.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Finds the line and column of the error in the text it was produced
    /// from.
    pub fn locate(&self, text: &str) -> Location {
        Location::of(text, self.span.start)
    }

    /// Attaches the line and column of the error, for reporting to users.
    pub fn with_location(self, text: &str) -> LocatedError {
        LocatedError {
            location: self.locate(text),
            error: self,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnknownCharacter(ch) => write!(f, "unknown token type {ch:?}"),
            ErrorKind::UnknownAnnotation => f.write_str("unknown annotation"),
            ErrorKind::UnexpectedToken { found, expected } => {
                write!(f, "unexpected token {found}, was expecting a {expected}")
            }
            ErrorKind::UnexpectedEnd { expected } => {
                write!(f, "unexpected end of file, was expecting a {expected}")
            }
            ErrorKind::TrailingToken(found) => write!(f, "unexpected token {found}"),
            ErrorKind::IllegalMove(err) => err.fmt(f),
            ErrorKind::InvalidFen(err) => err.fmt(f),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.span.start)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::IllegalMove(err) => Some(err),
            ErrorKind::InvalidFen(err) => Some(err),
            _ => None,
        }
    }
}

/// A 1-based line and column.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Counts lines and columns up to `offset`. Columns count characters.
    pub fn of(text: &str, offset: usize) -> Location {
        let mut offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &text[..offset];
        let line_start = before.rfind('\n').map_or(0, |newline| newline + 1);
        Location {
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// An [`Error`] together with its [`Location`] in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedError {
    pub error: Error,
    pub location: Location,
}

impl fmt::Display for LocatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.error.kind, self.location)
    }
}

impl StdError for LocatedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.error)
    }
}
