/// Formatting options.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Config {
    /// The line width that the printer aims to stay within. Long words,
    /// comment lines and tag pairs may still exceed it.
    ///
    /// Defaults to `80`.
    pub print_width: usize,
    /// Number of spaces per indentation level, used for comments and
    /// variations below a move.
    ///
    /// Defaults to `2`.
    pub indent_width: usize,
}

impl Config {
    pub const fn new() -> Config {
        Config {
            print_width: 80,
            indent_width: 2,
        }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}
