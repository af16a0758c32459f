use crate::{
    ast::{Comment, Span},
    errors::{Error, ErrorKind, ParseResult},
    token::{read_token, Token, TokenKind},
};

/// Lazily reads tokens from a text, with one token of lookahead.
///
/// Comments are diverted to a side list unless a comment is explicitly
/// asked for. Comments following a move are attached to it by the parser;
/// all others end up on the [`File`](crate::File) node.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    text: &'a str,
    offset: usize,
    buffer: Option<Token<'a>>,
    comments: Vec<Token<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Tokenizer<'a> {
        Tokenizer {
            text,
            offset: 0,
            buffer: None,
            comments: Vec::new(),
        }
    }

    /// Consumes and returns the next token if it is of the given kind.
    pub fn accept(&mut self, kind: TokenKind) -> ParseResult<Option<Token<'a>>> {
        self.fetch(kind != TokenKind::Comment)?;
        Ok(match self.buffer.take() {
            Some(token) if token.kind == kind => Some(token),
            other => {
                self.buffer = other;
                None
            }
        })
    }

    /// Consumes and returns the next token, which must be of the given
    /// kind.
    pub fn expect(&mut self, kind: TokenKind) -> ParseResult<Token<'a>> {
        self.fetch(kind != TokenKind::Comment)?;
        match self.buffer.take() {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => {
                let err = Error::new(
                    ErrorKind::UnexpectedToken {
                        found: token.kind,
                        expected: kind,
                    },
                    token.span,
                );
                self.buffer = Some(token);
                Err(err)
            }
            None => Err(Error::new(
                ErrorKind::UnexpectedEnd { expected: kind },
                Span::point(self.text.len()),
            )),
        }
    }

    /// Fails if any token other than a comment remains.
    pub fn expect_end(&mut self) -> ParseResult<()> {
        self.fetch(true)?;
        match &self.buffer {
            Some(token) => Err(Error::new(
                ErrorKind::TrailingToken(token.kind),
                token.span,
            )),
            None => Ok(()),
        }
    }

    /// The comments skipped so far.
    pub fn into_comments(self) -> Vec<Comment> {
        self.comments
            .into_iter()
            .map(|token| Comment {
                span: token.span,
                value: token.into_string(),
            })
            .collect()
    }

    fn fetch(&mut self, skip_comments: bool) -> ParseResult<()> {
        while self.buffer.is_none() {
            let Some(token) = read_token(self.text, self.offset)? else {
                break;
            };
            self.offset = token.span.end;
            if skip_comments && token.kind == TokenKind::Comment {
                self.comments.push(token);
            } else {
                self.buffer = Some(token);
            }
        }
        Ok(())
    }
}
