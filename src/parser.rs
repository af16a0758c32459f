//! Recursive descent parser.
//!
//! ```text
//! file      = game* EOF
//! game      = tag_pair* move_text?
//! tag_pair  = "[" SYMBOL STRING "]"?
//! move_text = move* GAME_TERMINATION?
//! move      = INTEGER? "."* SYMBOL (ANNOTATION | COMMENT)* variation*
//! variation = "(" move* ")"
//! ```
//!
//! Optional rules return `Ok(None)` when they do not apply. Once a rule has
//! committed, for example after `[` or a move number, a missing token is an
//! error.

use tracing::{debug, trace};

use crate::{
    ast::{
        Annotation, Comment, File, Game, GameTermination, Move, MoveTextSection, Outcome, Span,
        TagPair, TagPairSection, Variation,
    },
    context::MoveContext,
    errors::{Error, ErrorKind, ParseResult},
    token::{Token, TokenKind},
    tokenizer::Tokenizer,
};

pub struct Parser<'a, C> {
    tokens: Tokenizer<'a>,
    _context: std::marker::PhantomData<C>,
}

impl<'a, C: MoveContext> Parser<'a, C> {
    pub fn new(text: &'a str) -> Parser<'a, C> {
        Parser {
            tokens: Tokenizer::new(text),
            _context: std::marker::PhantomData,
        }
    }

    /// Parses all games and asserts that nothing but comments remain.
    pub fn parse_file(mut self) -> ParseResult<File> {
        let mut games = Vec::new();
        while let Some(game) = self.parse_game()? {
            trace!(
                games = games.len() + 1,
                moves = game.move_text_section.moves.len(),
                "parsed game"
            );
            games.push(game);
        }
        self.tokens.expect_end()?;

        let span = match (games.first(), games.last()) {
            (Some(first), Some(last)) => first.span.to(last.span),
            _ => Span::point(0),
        };
        Ok(File {
            games,
            comments: self.tokens.into_comments(),
            span,
        })
    }

    fn parse_game(&mut self) -> ParseResult<Option<Game>> {
        let tag_pair_section = self.parse_tag_pair_section()?;
        let mut context = create_context::<C>(tag_pair_section.as_ref())?;
        let move_text_section = self.parse_move_text_section(&mut context)?;

        Ok(Some(match (tag_pair_section, move_text_section) {
            (None, None) => return Ok(None),
            (Some(tag_pair_section), Some(move_text_section)) => Game {
                span: tag_pair_section.span.to(move_text_section.span),
                tag_pair_section,
                move_text_section,
            },
            (Some(tag_pair_section), None) => {
                let end = Span::point(tag_pair_section.span.end);
                Game {
                    span: tag_pair_section.span,
                    tag_pair_section,
                    move_text_section: MoveTextSection {
                        moves: Vec::new(),
                        game_termination: GameTermination {
                            value: Outcome::Unknown,
                            span: end,
                        },
                        span: end,
                    },
                }
            }
            (None, Some(move_text_section)) => Game {
                span: move_text_section.span,
                tag_pair_section: TagPairSection {
                    tag_pairs: Vec::new(),
                    span: Span::point(move_text_section.span.start),
                },
                move_text_section,
            },
        }))
    }

    fn parse_tag_pair_section(&mut self) -> ParseResult<Option<TagPairSection>> {
        let mut tag_pairs = Vec::new();
        while let Some(tag_pair) = self.parse_tag_pair()? {
            tag_pairs.push(tag_pair);
        }
        Ok(match (tag_pairs.first(), tag_pairs.last()) {
            (Some(first), Some(last)) => Some(TagPairSection {
                span: first.span.to(last.span),
                tag_pairs,
            }),
            _ => None,
        })
    }

    fn parse_tag_pair(&mut self) -> ParseResult<Option<TagPair>> {
        let Some(left_bracket) = self.tokens.accept(TokenKind::LeftBracket)? else {
            return Ok(None);
        };
        let name = self.tokens.expect(TokenKind::Symbol)?;
        let value = self.tokens.expect(TokenKind::String)?;
        let end = match self.tokens.accept(TokenKind::RightBracket)? {
            Some(right_bracket) => right_bracket.span,
            None => value.span,
        };
        Ok(Some(TagPair {
            span: left_bracket.span.to(end),
            name: name.into_string(),
            value: value.into_string(),
        }))
    }

    fn parse_move_text_section(&mut self, context: &mut C) -> ParseResult<Option<MoveTextSection>> {
        let mut moves = Vec::new();
        while let Some(m) = self.parse_move(context)? {
            moves.push(m);
        }
        let termination = self.tokens.accept(TokenKind::GameTermination)?;

        let game_termination = match (termination, moves.last()) {
            (Some(token), _) => GameTermination {
                value: Outcome::from_ascii(token.as_str().as_bytes()).unwrap_or(Outcome::Unknown),
                span: token.span,
            },
            (None, Some(last)) => GameTermination {
                value: Outcome::Unknown,
                span: Span::point(last.span.end),
            },
            (None, None) => return Ok(None),
        };

        let span = match moves.first() {
            Some(first) => first.span.to(game_termination.span),
            None => game_termination.span,
        };
        Ok(Some(MoveTextSection {
            moves,
            game_termination,
            span,
        }))
    }

    fn parse_move(&mut self, context: &mut C) -> ParseResult<Option<Move>> {
        let number = self.tokens.accept(TokenKind::Integer)?;
        let mut first_period = None;
        while let Some(period) = self.tokens.accept(TokenKind::Period)? {
            first_period.get_or_insert(period.span);
        }
        let symbol = if number.is_some() || first_period.is_some() {
            self.tokens.expect(TokenKind::Symbol)?
        } else {
            match self.tokens.accept(TokenKind::Symbol)? {
                Some(symbol) => symbol,
                None => return Ok(None),
            }
        };

        let start = number
            .map(|number| number.span)
            .or(first_period)
            .unwrap_or(symbol.span)
            .start;

        let before = context.clone();
        let move_number = context.move_number();
        let turn = context.turn();
        let value = context
            .play(symbol.as_str())
            .map_err(|err| Error::new(ErrorKind::IllegalMove(err), symbol.span))?;

        let mut suffix_annotation = None;
        let mut annotations = Vec::new();
        let mut comments = Vec::new();
        let mut end = symbol.span.end;
        loop {
            if let Some(comment) = self.tokens.accept(TokenKind::Comment)? {
                end = end.max(comment.span.end);
                comments.push(into_comment(comment));
            } else if let Some(annotation) = self.tokens.accept(TokenKind::Annotation)? {
                end = end.max(annotation.span.end);
                let annotation = into_annotation(annotation);
                if suffix_annotation.is_none() && annotation.is_suffix() {
                    suffix_annotation = Some(annotation);
                } else {
                    annotations.push(annotation);
                }
            } else {
                break;
            }
        }

        let mut variations = Vec::new();
        while let Some(variation) = self.parse_variation(before.clone())? {
            variations.push(variation);
        }
        if let Some(last) = variations.last() {
            end = last.span.end;
        }

        Ok(Some(Move {
            number: move_number,
            turn,
            value,
            suffix_annotation,
            annotations,
            comments,
            variations,
            span: Span::new(start, end),
        }))
    }

    fn parse_variation(&mut self, mut context: C) -> ParseResult<Option<Variation>> {
        let Some(left_parenthesis) = self.tokens.accept(TokenKind::LeftParenthesis)? else {
            return Ok(None);
        };
        let mut moves = Vec::new();
        while let Some(m) = self.parse_move(&mut context)? {
            moves.push(m);
        }
        let right_parenthesis = self.tokens.expect(TokenKind::RightParenthesis)?;
        Ok(Some(Variation {
            moves,
            span: left_parenthesis.span.to(right_parenthesis.span),
        }))
    }
}

fn create_context<C: MoveContext>(tag_pair_section: Option<&TagPairSection>) -> ParseResult<C> {
    let fen = tag_pair_section.and_then(|section| {
        section
            .tag_pairs
            .iter()
            .find(|tag_pair| tag_pair.name == "FEN")
    });
    if let Some(tag_pair) = fen {
        debug!(fen = %tag_pair.value, "game starts from a custom position");
    }
    C::from_fen(fen.map(|tag_pair| tag_pair.value.as_str())).map_err(|err| {
        let span = fen.map_or(Span::point(0), |tag_pair| tag_pair.span);
        Error::new(ErrorKind::InvalidFen(err), span)
    })
}

fn into_comment(token: Token<'_>) -> Comment {
    Comment {
        span: token.span,
        value: token.into_string(),
    }
}

fn into_annotation(token: Token<'_>) -> Annotation {
    Annotation {
        span: token.span,
        value: token.into_string(),
    }
}
