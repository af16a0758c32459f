//! A formatter for chess games in [PGN](https://www.chessclub.com/help/PGN-spec).
//!
//! Parses PGN text into a syntax tree with byte spans on every node,
//! validating moves along the way, and prints the tree back in a canonical,
//! line-wrapped form.
//!
//! # Examples
//!
//! Format a game:
//!
//! ```
//! use pgn_fmt::Config;
//!
//! let pgn = "[Event \"F/S Return Match\"] 1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 *";
//! let formatted = pgn_fmt::format(pgn, &Config::default())?;
//! assert_eq!(formatted, "[Event \"F/S Return Match\"]\n\n1.e4 e5 2.Nf3 Nc6 3.Bb5 a6 *\n");
//! # Ok::<_, pgn_fmt::Error>(())
//! ```
//!
//! Inspect the syntax tree:
//!
//! ```
//! use pgn_fmt::{Span, Turn};
//!
//! let file = pgn_fmt::parse("1.e4 e5 (1...c5) 2.Nf3 *")?;
//! let moves = &file.games[0].move_text_section.moves;
//! assert_eq!(moves[1].value, "e5");
//! assert_eq!(moves[1].variations[0].moves[0].turn, Turn::Black);
//! assert_eq!(moves[2].span, Span::new(17, 22));
//! # Ok::<_, pgn_fmt::Error>(())
//! ```
//!
//! Report errors with line and column:
//!
//! ```
//! let pgn = "[Event \"?\"]\n\n1.e4 e5 e5";
//! let err = pgn_fmt::parse(pgn).unwrap_err();
//! assert_eq!(err.with_location(pgn).to_string(), "illegal move: e5 (3:9)");
//! ```
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   for the syntax tree.

#![doc(html_root_url = "https://docs.rs/pgn-fmt/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod ast;
mod config;
mod context;
mod doc;
mod errors;
mod nag;
mod parser;
mod printer;
mod token;
mod tokenizer;

pub use ast::{
    Annotation, Comment, File, Game, GameTermination, Move, MoveTextSection, Node, Outcome, Span,
    TagPair, TagPairSection, Turn, Variation,
};
pub use config::Config;
pub use context::{ChessContext, FenError, IllegalMove, IllegalMoveReason, MoveContext};
pub use doc::Doc;
pub use errors::{Error, ErrorKind, LocatedError, Location, ParseResult};
pub use nag::{InvalidNag, Nag};
pub use token::{read_token, Token, TokenKind, TokenValue};
pub use tokenizer::Tokenizer;

/// Parses a PGN file, validating moves according to the rules of standard
/// chess.
///
/// # Errors
///
/// Returns the first lexical, syntax or legality error. There is no
/// recovery and no partial result.
pub fn parse(text: &str) -> ParseResult<File> {
    parse_with::<ChessContext>(text)
}

/// Parses a PGN file, validating moves with a custom [`MoveContext`].
///
/// # Errors
///
/// See [`parse()`].
pub fn parse_with<C: MoveContext>(text: &str) -> ParseResult<File> {
    parser::Parser::<C>::new(text).parse_file()
}

/// Builds the layout document for a parsed file.
pub fn print(file: &File) -> Doc {
    printer::print_file(file)
}

/// Parses and prints a PGN file.
///
/// Formatting is idempotent: formatting the output again yields the same
/// text.
///
/// # Errors
///
/// See [`parse()`].
pub fn format(text: &str, config: &Config) -> ParseResult<String> {
    let file = parse(text)?;
    Ok(print(&file).render(config))
}
