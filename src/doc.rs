//! Layout documents.
//!
//! A [`Doc`] describes text together with the places where it may or must
//! be broken into lines. [`Doc::render`] picks the breaks for a given line
//! width.

use unicode_width::UnicodeWidthStr;

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Doc {
    /// Literal text without newlines.
    Text(String),
    /// A space, or a newline when the enclosing content does not fit.
    Line,
    /// Always a newline.
    HardLine,
    Concat(Vec<Doc>),
    /// Increases the indentation of the lines started inside.
    Indent(Box<Doc>),
    /// Alternating contents and separators. Packs as many contents on each
    /// line as fit, breaking only the separators in between.
    Fill(Vec<Doc>),
}

impl Doc {
    pub fn text(text: impl Into<String>) -> Doc {
        Doc::Text(text.into())
    }

    pub fn indent(doc: Doc) -> Doc {
        Doc::Indent(Box::new(doc))
    }

    /// Renders the document, breaking lines to stay within
    /// [`Config::print_width`] where possible. Trailing spaces are removed
    /// from every line.
    ///
    /// # Examples
    ///
    /// ```
    /// use pgn_fmt::{Config, Doc};
    ///
    /// let doc = Doc::Fill(vec![
    ///     Doc::text("1.e4"),
    ///     Doc::Line,
    ///     Doc::text("e5"),
    ///     Doc::Line,
    ///     Doc::text("2.Nf3"),
    /// ]);
    /// assert_eq!(doc.render(&Config::default()), "1.e4 e5 2.Nf3");
    ///
    /// let narrow = Config { print_width: 8, ..Config::default() };
    /// assert_eq!(doc.render(&narrow), "1.e4 e5\n2.Nf3");
    /// ```
    pub fn render(&self, config: &Config) -> String {
        Renderer::new(config).render(self)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Mode {
    Flat,
    Break,
}

/// A pending piece of a document. Fills are consumed from the front, so
/// they are tracked as slices of their parts.
#[derive(Debug, Copy, Clone)]
enum Part<'a> {
    Doc(&'a Doc),
    Fill(&'a [Doc]),
}

#[derive(Debug, Copy, Clone)]
struct Command<'a> {
    indent: usize,
    mode: Mode,
    part: Part<'a>,
}

struct Renderer<'a> {
    config: &'a Config,
    out: String,
    column: usize,
}

impl<'a> Renderer<'a> {
    fn new(config: &'a Config) -> Renderer<'a> {
        Renderer {
            config,
            out: String::new(),
            column: 0,
        }
    }

    fn render(mut self, doc: &Doc) -> String {
        let mut commands = vec![Command {
            indent: 0,
            mode: Mode::Break,
            part: Part::Doc(doc),
        }];

        while let Some(Command { indent, mode, part }) = commands.pop() {
            let doc = match part {
                Part::Doc(doc) => doc,
                Part::Fill(parts) => {
                    self.fill(&mut commands, indent, mode, parts);
                    continue;
                }
            };
            match doc {
                Doc::Text(text) => {
                    self.out.push_str(text);
                    self.column += text.width();
                }
                Doc::Line if mode == Mode::Flat => {
                    self.out.push(' ');
                    self.column += 1;
                }
                Doc::Line | Doc::HardLine => self.newline(indent),
                Doc::Concat(docs) => {
                    commands.extend(docs.iter().rev().map(|doc| Command {
                        indent,
                        mode,
                        part: Part::Doc(doc),
                    }));
                }
                Doc::Indent(doc) => commands.push(Command {
                    indent: indent + self.config.indent_width,
                    mode,
                    part: Part::Doc(doc),
                }),
                Doc::Fill(parts) => self.fill(&mut commands, indent, mode, parts),
            }
        }

        self.trim_trailing_spaces();
        self.out
    }

    /// Schedules the first content of a fill, the separator after it, and
    /// the rest of the fill.
    fn fill<'d>(
        &self,
        commands: &mut Vec<Command<'d>>,
        indent: usize,
        mode: Mode,
        parts: &'d [Doc],
    ) {
        let remaining = self.config.print_width as isize - self.column as isize;
        let cmd = |mode: Mode, doc: &'d Doc| Command {
            indent,
            mode,
            part: Part::Doc(doc),
        };

        let (content, separator, rest) = match parts {
            [] => return,
            [content] => {
                let fits = fits(&[content], remaining);
                commands.push(cmd(if fits { Mode::Flat } else { Mode::Break }, content));
                return;
            }
            [content, separator, rest @ ..] => (content, separator, rest),
        };

        let content_fits = fits(&[content], remaining);
        let Some(next) = rest.first() else {
            let mode = if content_fits { Mode::Flat } else { Mode::Break };
            commands.push(cmd(mode, separator));
            commands.push(cmd(mode, content));
            return;
        };

        commands.push(Command {
            indent,
            mode,
            part: Part::Fill(rest),
        });
        if fits(&[content, separator, next], remaining) {
            commands.push(cmd(Mode::Flat, separator));
            commands.push(cmd(Mode::Flat, content));
        } else if content_fits {
            commands.push(cmd(Mode::Break, separator));
            commands.push(cmd(Mode::Flat, content));
        } else {
            commands.push(cmd(Mode::Break, separator));
            commands.push(cmd(Mode::Break, content));
        }
    }

    fn newline(&mut self, indent: usize) {
        self.trim_trailing_spaces();
        self.out.push('\n');
        self.out.extend(std::iter::repeat_n(' ', indent));
        self.column = indent;
    }

    fn trim_trailing_spaces(&mut self) {
        let len = self.out.trim_end_matches(' ').len();
        self.out.truncate(len);
    }
}

/// Checks if the docs, printed flat, fit into the remaining width. Measuring
/// stops at the first forced line break.
fn fits(docs: &[&Doc], mut remaining: isize) -> bool {
    let mut stack: Vec<&Doc> = docs.iter().rev().copied().collect();
    while remaining >= 0 {
        let Some(doc) = stack.pop() else {
            return true;
        };
        match doc {
            Doc::Text(text) => remaining -= text.width() as isize,
            Doc::Line => remaining -= 1,
            Doc::HardLine => return true,
            Doc::Concat(docs) | Doc::Fill(docs) => stack.extend(docs.iter().rev()),
            Doc::Indent(doc) => stack.push(doc),
        }
    }
    false
}
