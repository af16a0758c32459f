//! Move legality and numbering.
//!
//! The parser threads a [`MoveContext`] through each game. Playing a move
//! validates it against the current position and returns its canonical
//! spelling. Variations are explored on clones, so the main line never
//! observes moves played in a sibling branch.

use std::{error::Error, fmt};

use shakmaty::{
    fen::Fen,
    san::{SanError, SanPlus},
    CastlingMode, Chess, Move, Position, Role, Square,
};

use crate::ast::Turn;

/// Tracks the position of a game while its moves are parsed.
pub trait MoveContext: Clone {
    /// Sets up the starting position, optionally from a FEN.
    ///
    /// # Errors
    ///
    /// Returns [`FenError`] if the FEN is malformed or describes an illegal
    /// position.
    fn from_fen(fen: Option<&str>) -> Result<Self, FenError>;

    /// The side to move.
    fn turn(&self) -> Turn;

    /// The current full move number, starting at 1.
    fn move_number(&self) -> u32;

    /// Validates and plays a move, returning its canonical spelling.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMove`] if the move cannot be played in the current
    /// position. The position is unchanged in that case.
    fn play(&mut self, text: &str) -> Result<String, IllegalMove>;
}

/// Standard chess.
///
/// Accepts Standard Algebraic Notation and a few common deviations from it:
/// castling with zeros (`0-0`, `0-0-0`) and long algebraic notation (`e2e4`,
/// `e2-e4`, `Ng1-f3`, `e7e8Q`, `e7-e8=Q`). Moves are always returned in SAN,
/// including check and checkmate suffixes.
///
/// # Examples
///
/// ```
/// use pgn_fmt::{ChessContext, MoveContext, Turn};
///
/// let mut ctx = ChessContext::from_fen(None)?;
/// assert!(ctx.play("0-0").is_err());
/// assert_eq!(ctx.play("g1f3")?, "Nf3");
/// assert_eq!((ctx.move_number(), ctx.turn()), (1, Turn::Black));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChessContext {
    pos: Chess,
}

impl ChessContext {
    fn find_move(&self, text: &str) -> Result<Move, IllegalMove> {
        let reason = match SanPlus::from_ascii(normalize_castling(text).as_bytes()) {
            Ok(san_plus) => match san_plus.san.to_move(&self.pos) {
                Ok(m) => return Ok(m),
                Err(err) => IllegalMoveReason::from(err),
            },
            Err(_) => IllegalMoveReason::Invalid,
        };
        self.find_long_algebraic(text)
            .ok_or_else(|| IllegalMove::new(text, reason))
    }

    fn find_long_algebraic(&self, text: &str) -> Option<Move> {
        let long = LongAlgebraic::parse(text)?;
        let turn = self.pos.turn();
        self.pos.legal_moves().into_iter().find(|m| {
            let to_matches = match m.castling_side() {
                Some(side) => long.to == side.king_to(turn) || long.to == m.to(),
                None => long.to == m.to(),
            };
            m.from() == Some(long.from)
                && to_matches
                && m.promotion() == long.promotion
                && long.role.is_none_or(|role| role == m.role())
        })
    }
}

impl MoveContext for ChessContext {
    fn from_fen(fen: Option<&str>) -> Result<ChessContext, FenError> {
        let Some(fen) = fen else {
            return Ok(ChessContext::default());
        };
        let pos = Fen::from_ascii(fen.trim().as_bytes())
            .map_err(|err| FenError::new(fen, &err))?
            .into_position(CastlingMode::Standard)
            .map_err(|err| FenError::new(fen, &err))?;
        Ok(ChessContext { pos })
    }

    fn turn(&self) -> Turn {
        Turn::from(self.pos.turn())
    }

    fn move_number(&self) -> u32 {
        self.pos.fullmoves().get()
    }

    fn play(&mut self, text: &str) -> Result<String, IllegalMove> {
        let m = self.find_move(text)?;
        Ok(SanPlus::from_move_and_play_unchecked(&mut self.pos, m).to_string())
    }
}

fn normalize_castling(text: &str) -> String {
    let (body, suffix) = match text.find(['+', '#']) {
        Some(i) => text.split_at(i),
        None => (text, ""),
    };
    match body {
        "0-0" => format!("O-O{suffix}"),
        "0-0-0" => format!("O-O-O{suffix}"),
        _ => text.to_owned(),
    }
}

/// A move like `Ng1-f3` or `e7xd8=Q+`.
#[derive(Debug)]
struct LongAlgebraic {
    role: Option<Role>,
    from: Square,
    to: Square,
    promotion: Option<Role>,
}

impl LongAlgebraic {
    fn parse(text: &str) -> Option<LongAlgebraic> {
        let mut rest = text.trim_end_matches(['+', '#']);

        let role = match rest.chars().next()? {
            ch @ ('N' | 'B' | 'R' | 'Q' | 'K') => {
                rest = &rest[1..];
                Role::from_char(ch)
            }
            _ => None,
        };

        let from = rest.get(..2)?.parse().ok()?;
        rest = &rest[2..];
        rest = rest
            .strip_prefix('-')
            .or_else(|| rest.strip_prefix('x'))
            .unwrap_or(rest);
        let to = rest.get(..2)?.parse().ok()?;
        rest = &rest[2..];

        let mut promotion = rest.strip_prefix('=').unwrap_or(rest).chars();
        let promotion = match (promotion.next(), promotion.next()) {
            (None, _) => None,
            (Some(ch), None) => Some(
                Role::from_char(ch).filter(|role| !matches!(role, Role::Pawn | Role::King))?,
            ),
            (Some(_), Some(_)) => return None,
        };

        Some(LongAlgebraic {
            role,
            from,
            to,
            promotion,
        })
    }
}

/// Why a move was rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IllegalMoveReason {
    /// Not syntactically a move.
    Invalid,
    /// No legal move matches.
    Illegal,
    /// Several legal moves match.
    Ambiguous,
}

impl From<SanError> for IllegalMoveReason {
    fn from(err: SanError) -> IllegalMoveReason {
        match err {
            SanError::IllegalSan => IllegalMoveReason::Illegal,
            SanError::AmbiguousSan => IllegalMoveReason::Ambiguous,
        }
    }
}

/// Error when a move cannot be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IllegalMove {
    text: String,
    reason: IllegalMoveReason,
}

impl IllegalMove {
    pub fn new(text: &str, reason: IllegalMoveReason) -> IllegalMove {
        IllegalMove {
            text: text.to_owned(),
            reason,
        }
    }

    /// The move as written.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn reason(&self) -> IllegalMoveReason {
        self.reason
    }
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let problem = match self.reason {
            IllegalMoveReason::Invalid => "invalid move",
            IllegalMoveReason::Illegal => "illegal move",
            IllegalMoveReason::Ambiguous => "ambiguous move",
        };
        write!(f, "{problem}: {}", self.text)
    }
}

impl Error for IllegalMove {}

/// Error when a starting position cannot be set up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenError {
    fen: String,
    message: String,
}

impl FenError {
    fn new(fen: &str, err: &dyn fmt::Display) -> FenError {
        FenError {
            fen: fen.to_owned(),
            message: err.to_string(),
        }
    }

    pub fn fen(&self) -> &str {
        &self.fen
    }
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid fen {:?}: {}", self.fen, self.message)
    }
}

impl Error for FenError {}
