//! Syntax tree of a PGN file.
//!
//! Every node carries the half-open byte [`Span`] of the input it was parsed
//! from. Sections that are missing from the input are synthesized with an
//! empty span at the boundary of the section that is present.

use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::nag::Nag;

/// A half-open range of byte offsets into the source text.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Span {
        Span { start, end }
    }

    /// An empty span at `offset`.
    pub const fn point(offset: usize) -> Span {
        Span::new(offset, offset)
    }

    /// The smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub const fn len(self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// The side to move.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "lowercase"))]
pub enum Turn {
    White,
    Black,
}

impl From<shakmaty::Color> for Turn {
    fn from(color: shakmaty::Color) -> Turn {
        match color {
            shakmaty::Color::White => Turn::White,
            shakmaty::Color::Black => Turn::Black,
        }
    }
}

/// A game termination marker.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Outcome {
    /// `1-0`
    WhiteWins,
    /// `0-1`
    BlackWins,
    /// `1/2-1/2`
    Draw,
    /// `*`
    Unknown,
}

impl Outcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::WhiteWins => "1-0",
            Outcome::BlackWins => "0-1",
            Outcome::Draw => "1/2-1/2",
            Outcome::Unknown => "*",
        }
    }

    pub fn from_ascii(s: &[u8]) -> Option<Outcome> {
        Some(match s {
            b"1-0" => Outcome::WhiteWins,
            b"0-1" => Outcome::BlackWins,
            b"1/2-1/2" => Outcome::Draw,
            b"*" => Outcome::Unknown,
            _ => return None,
        })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = ();

    fn from_str(s: &str) -> Result<Outcome, ()> {
        Outcome::from_ascii(s.as_bytes()).ok_or(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct File {
    pub games: Vec<Game>,
    /// Comments that are not attached to any move.
    pub comments: Vec<Comment>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Game {
    pub tag_pair_section: TagPairSection,
    pub move_text_section: MoveTextSection,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TagPairSection {
    pub tag_pairs: Vec<TagPair>,
    pub span: Span,
}

impl TagPairSection {
    /// The value of the first tag pair called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.tag_pairs
            .iter()
            .find(|tag_pair| tag_pair.name == name)
            .map(|tag_pair| tag_pair.value.as_str())
    }
}

/// A `[Name "Value"]` entry. The value is stored unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TagPair {
    pub name: String,
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MoveTextSection {
    pub moves: Vec<Move>,
    pub game_termination: GameTermination,
    pub span: Span,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GameTermination {
    pub value: Outcome,
    pub span: Span,
}

/// A half-move, with everything attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Move {
    /// The full move number, starting at 1.
    pub number: u32,
    pub turn: Turn,
    /// The move in canonical SAN, like `Nf3` or `exd8=Q#`.
    pub value: String,
    /// The first move-quality glyph (`!`, `?`, `!!`, `??`, `!?`, `?!`).
    pub suffix_annotation: Option<Annotation>,
    /// All other glyphs, in source order.
    pub annotations: Vec<Annotation>,
    pub comments: Vec<Comment>,
    /// Alternatives to this move, in source order.
    pub variations: Vec<Variation>,
    pub span: Span,
}

impl Move {
    /// Whether the move is followed by something that breaks the flow of
    /// the move sequence.
    pub fn has_comments_or_variations(&self) -> bool {
        !self.comments.is_empty() || !self.variations.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Variation {
    pub moves: Vec<Move>,
    pub span: Span,
}

/// The contents of a `{...}` comment, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Comment {
    pub value: String,
    pub span: Span,
}

impl Comment {
    /// The non-blank lines of the comment, each with its whitespace runs
    /// collapsed to single spaces.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.value
            .lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Annotation {
    pub value: String,
    pub span: Span,
}

impl Annotation {
    /// Checks if the glyph is one of the move-quality suffixes.
    pub fn is_suffix(&self) -> bool {
        matches!(self.value.as_str(), "!" | "?" | "!!" | "??" | "!?" | "?!")
    }

    /// The numeric annotation glyph equivalent.
    pub fn nag(&self) -> Option<Nag> {
        Nag::from_glyph(&self.value)
    }
}

/// A borrowed view of any node in the tree.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Node<'a> {
    File(&'a File),
    Comment(&'a Comment),
    Game(&'a Game),
    TagPairSection(&'a TagPairSection),
    TagPair(&'a TagPair),
    MoveTextSection(&'a MoveTextSection),
    Move(&'a Move),
    Annotation(&'a Annotation),
    Variation(&'a Variation),
    GameTermination(&'a GameTermination),
}

impl<'a> Node<'a> {
    pub fn span(self) -> Span {
        match self {
            Node::File(node) => node.span,
            Node::Comment(node) => node.span,
            Node::Game(node) => node.span,
            Node::TagPairSection(node) => node.span,
            Node::TagPair(node) => node.span,
            Node::MoveTextSection(node) => node.span,
            Node::Move(node) => node.span,
            Node::Annotation(node) => node.span,
            Node::Variation(node) => node.span,
            Node::GameTermination(node) => node.span,
        }
    }

    pub fn location_start(self) -> usize {
        self.span().start
    }

    pub fn location_end(self) -> usize {
        self.span().end
    }

    /// Whether the printer renders the comments owned by this node itself,
    /// so that a host must not attach them elsewhere.
    pub fn prints_own_comments(self) -> bool {
        matches!(self, Node::File(_) | Node::Move(_))
    }

    /// The direct children, in source order.
    pub fn children(self) -> Vec<Node<'a>> {
        match self {
            Node::File(file) => file.games.iter().map(Node::Game).collect(),
            Node::Game(game) => vec![
                Node::TagPairSection(&game.tag_pair_section),
                Node::MoveTextSection(&game.move_text_section),
            ],
            Node::TagPairSection(section) => section.tag_pairs.iter().map(Node::TagPair).collect(),
            Node::MoveTextSection(section) => section
                .moves
                .iter()
                .map(Node::Move)
                .chain(Some(Node::GameTermination(&section.game_termination)))
                .collect(),
            Node::Move(m) => {
                let mut children: Vec<Node<'a>> = m
                    .suffix_annotation
                    .iter()
                    .chain(&m.annotations)
                    .map(Node::Annotation)
                    .chain(m.comments.iter().map(Node::Comment))
                    .collect();
                children.sort_by_key(|child| child.span().start);
                children.extend(m.variations.iter().map(Node::Variation));
                children
            }
            Node::Variation(variation) => variation.moves.iter().map(Node::Move).collect(),
            Node::Comment(_)
            | Node::TagPair(_)
            | Node::Annotation(_)
            | Node::GameTermination(_) => Vec::new(),
        }
    }
}
