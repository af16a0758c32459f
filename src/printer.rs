//! Turns a syntax tree into a layout [`Doc`].

use std::{borrow::Cow, mem};

use crate::{
    ast::{Comment, File, Game, Move, MoveTextSection, TagPair, TagPairSection, Turn, Variation},
    doc::Doc,
};

/// Prints a parsed file.
///
/// Games are separated by blank lines. Comments that are not attached to
/// a move are placed by position: before the first game, between a game's
/// tag pairs and its moves, or after the game that precedes them.
pub fn print_file(file: &File) -> Doc {
    let mut docs = Vec::new();

    if file.games.is_empty() {
        for comment in &file.comments {
            docs.push(print_comment(comment));
            docs.push(Doc::HardLine);
        }
        return Doc::Concat(docs);
    }

    for (i, (game, comments)) in file.games.iter().zip(place_comments(file)).enumerate() {
        if i > 0 {
            docs.push(Doc::HardLine);
            docs.push(Doc::HardLine);
        }
        docs.push(print_game(game, &comments));
    }
    docs.push(Doc::HardLine);
    Doc::Concat(docs)
}

#[derive(Debug, Default)]
struct GameComments<'a> {
    leading: Vec<&'a Comment>,
    before_move_text: Vec<&'a Comment>,
    trailing: Vec<&'a Comment>,
}

fn place_comments(file: &File) -> Vec<GameComments<'_>> {
    let mut placed: Vec<GameComments<'_>> =
        file.games.iter().map(|_| GameComments::default()).collect();

    for comment in &file.comments {
        let owner = file
            .games
            .iter()
            .rposition(|game| game.span.start <= comment.span.start);
        match owner {
            Some(i) => {
                let game = &file.games[i];
                if !game.tag_pair_section.tag_pairs.is_empty()
                    && comment.span.start < game.move_text_section.span.start
                {
                    placed[i].before_move_text.push(comment);
                } else {
                    placed[i].trailing.push(comment);
                }
            }
            None => {
                if let Some(first) = placed.first_mut() {
                    first.leading.push(comment);
                }
            }
        }
    }

    placed
}

fn print_game(game: &Game, comments: &GameComments<'_>) -> Doc {
    let mut docs = Vec::new();
    for comment in &comments.leading {
        docs.push(print_comment(comment));
        docs.push(Doc::HardLine);
    }
    if !game.tag_pair_section.tag_pairs.is_empty() {
        docs.push(print_tag_pair_section(&game.tag_pair_section));
        docs.push(Doc::HardLine);
        docs.push(Doc::HardLine);
    }
    for comment in &comments.before_move_text {
        docs.push(print_comment(comment));
        docs.push(Doc::HardLine);
    }
    docs.push(print_move_text_section(&game.move_text_section));
    for comment in &comments.trailing {
        docs.push(Doc::HardLine);
        docs.push(print_comment(comment));
    }
    Doc::Concat(docs)
}

fn print_tag_pair_section(section: &TagPairSection) -> Doc {
    let mut docs = Vec::new();
    for (i, tag_pair) in section.tag_pairs.iter().enumerate() {
        if i > 0 {
            docs.push(Doc::HardLine);
        }
        docs.push(print_tag_pair(tag_pair));
    }
    Doc::Concat(docs)
}

fn print_tag_pair(tag_pair: &TagPair) -> Doc {
    Doc::text(format!(
        "[{} \"{}\"]",
        tag_pair.name,
        escape(&tag_pair.value)
    ))
}

fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '"']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        if ch == '\\' || ch == '"' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    Cow::Owned(escaped)
}

fn print_move_text_section(section: &MoveTextSection) -> Doc {
    let termination = Doc::text(section.game_termination.value.as_str());
    let Some(last) = section.moves.last() else {
        return termination;
    };

    let mut fill = FillBuilder::default();
    print_moves(&mut fill, &section.moves, false);
    fill.separate(if last.has_comments_or_variations() {
        Doc::HardLine
    } else {
        Doc::Line
    });
    fill.push(termination);
    fill.build()
}

fn print_variation(variation: &Variation) -> Doc {
    let mut fill = FillBuilder::default();
    fill.push(Doc::text("("));
    print_moves(&mut fill, &variation.moves, true);
    fill.push(Doc::text(")"));
    fill.build()
}

fn print_moves(fill: &mut FillBuilder, moves: &[Move], in_variation: bool) {
    let mut previous: Option<&Move> = None;
    for m in moves {
        if let Some(previous) = previous {
            // Comments inside variations are printed inline.
            let breaks = if in_variation {
                !previous.variations.is_empty()
            } else {
                previous.has_comments_or_variations()
            };
            fill.separate(if breaks { Doc::HardLine } else { Doc::Line });
        }
        print_move(fill, m, previous, in_variation);
        previous = Some(m);
    }
}

fn print_move(fill: &mut FillBuilder, m: &Move, previous: Option<&Move>, in_variation: bool) {
    let mut text = match m.turn {
        Turn::White => format!("{}.", m.number),
        Turn::Black if previous.is_none_or(Move::has_comments_or_variations) => {
            format!("{}...", m.number)
        }
        Turn::Black => String::new(),
    };
    text.push_str(&m.value);
    if let Some(suffix) = &m.suffix_annotation {
        text.push_str(&suffix.value);
    }
    fill.push(Doc::Text(text));

    for annotation in &m.annotations {
        fill.separate(Doc::Line);
        fill.push(Doc::text(annotation.value.as_str()));
    }

    for comment in &m.comments {
        if in_variation {
            fill.separate(Doc::Line);
            push_comment(fill, comment);
        } else {
            fill.push(Doc::indent(Doc::Concat(vec![
                Doc::HardLine,
                print_comment(comment),
            ])));
        }
    }

    for variation in &m.variations {
        fill.push(Doc::indent(Doc::Concat(vec![
            Doc::HardLine,
            print_variation(variation),
        ])));
    }
}

/// Prints a comment on its own.
///
/// Each source line of the comment is a unit that is never broken, with
/// whitespace collapsed. Units are packed into lines like words.
fn print_comment(comment: &Comment) -> Doc {
    let mut fill = FillBuilder::default();
    push_comment(&mut fill, comment);
    fill.build()
}

fn push_comment(fill: &mut FillBuilder, comment: &Comment) {
    fill.push(Doc::text("{"));
    for (i, line) in comment.lines().enumerate() {
        if i > 0 {
            fill.separate(Doc::Line);
        }
        fill.push(Doc::Text(line));
    }
    fill.push(Doc::text("}"));
}

/// Collects the parts of a [`Doc::Fill`]. The last content stays open, so
/// that text printed without a separator joins it.
#[derive(Debug, Default)]
struct FillBuilder {
    parts: Vec<Doc>,
    content: Vec<Doc>,
}

impl FillBuilder {
    fn push(&mut self, doc: Doc) {
        self.content.push(doc);
    }

    fn separate(&mut self, separator: Doc) {
        self.parts.push(Doc::Concat(mem::take(&mut self.content)));
        self.parts.push(separator);
    }

    fn build(mut self) -> Doc {
        self.parts.push(Doc::Concat(self.content));
        Doc::Fill(self.parts)
    }
}
