use std::{error::Error, fmt, str::FromStr};

/// A numeric annotation glyph like `?`, `!!`, `+-` or `$42`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Nag(pub u8);

impl Nag {
    /// Tries to convert a glyph, as produced by the tokenizer, to a NAG.
    ///
    /// # Examples
    ///
    /// ```
    /// use pgn_fmt::Nag;
    ///
    /// assert_eq!(Nag::from_glyph("??"), Some(Nag(4)));
    /// assert_eq!(Nag::from_glyph("+/-"), Some(Nag(16)));
    /// assert_eq!(Nag::from_glyph("$24"), Some(Nag(24)));
    /// assert_eq!(Nag::from_glyph("$"), None);
    /// ```
    pub fn from_glyph(glyph: &str) -> Option<Nag> {
        Some(match glyph {
            "!" => Nag::GOOD_MOVE,
            "?" => Nag::MISTAKE,
            "!!" => Nag::BRILLIANT_MOVE,
            "??" => Nag::BLUNDER,
            "!?" => Nag::SPECULATIVE_MOVE,
            "?!" => Nag::DUBIOUS_MOVE,
            "=" => Nag::DRAWISH,
            "~" => Nag::UNCLEAR,
            "+=" => Nag::WHITE_SLIGHT_ADVANTAGE,
            "=+" => Nag::BLACK_SLIGHT_ADVANTAGE,
            "+/-" => Nag::WHITE_MODERATE_ADVANTAGE,
            "-/+" => Nag::BLACK_MODERATE_ADVANTAGE,
            "+-" => Nag::WHITE_DECISIVE_ADVANTAGE,
            "-+" => Nag::BLACK_DECISIVE_ADVANTAGE,
            "+--" => Nag::WHITE_CRUSHING_ADVANTAGE,
            "--+" => Nag::BLACK_CRUSHING_ADVANTAGE,
            _ => {
                let digits = glyph.strip_prefix('$')?;
                if digits.is_empty() {
                    return None;
                }
                return btoi::btou(digits.as_bytes()).ok().map(Nag);
            }
        })
    }

    /// A good move (`!`).
    pub const GOOD_MOVE: Nag = Nag(1);

    /// A mistake (`?`).
    pub const MISTAKE: Nag = Nag(2);

    /// A brilliant move (`!!`).
    pub const BRILLIANT_MOVE: Nag = Nag(3);

    /// A blunder (`??`).
    pub const BLUNDER: Nag = Nag(4);

    /// A speculative move (`!?`).
    pub const SPECULATIVE_MOVE: Nag = Nag(5);

    /// A dubious move (`?!`).
    pub const DUBIOUS_MOVE: Nag = Nag(6);

    /// A drawish position (`=`).
    pub const DRAWISH: Nag = Nag(10);

    /// An unclear position (`~`).
    pub const UNCLEAR: Nag = Nag(13);

    /// `+=`
    pub const WHITE_SLIGHT_ADVANTAGE: Nag = Nag(14);

    /// `=+`
    pub const BLACK_SLIGHT_ADVANTAGE: Nag = Nag(15);

    /// `+/-`
    pub const WHITE_MODERATE_ADVANTAGE: Nag = Nag(16);

    /// `-/+`
    pub const BLACK_MODERATE_ADVANTAGE: Nag = Nag(17);

    /// `+-`
    pub const WHITE_DECISIVE_ADVANTAGE: Nag = Nag(18);

    /// `-+`
    pub const BLACK_DECISIVE_ADVANTAGE: Nag = Nag(19);

    /// `+--`
    pub const WHITE_CRUSHING_ADVANTAGE: Nag = Nag(20);

    /// `--+`
    pub const BLACK_CRUSHING_ADVANTAGE: Nag = Nag(21);
}

impl fmt::Display for Nag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl From<u8> for Nag {
    fn from(nag: u8) -> Nag {
        Nag(nag)
    }
}

impl From<Nag> for u8 {
    fn from(Nag(nag): Nag) -> u8 {
        nag
    }
}

impl FromStr for Nag {
    type Err = InvalidNag;

    fn from_str(s: &str) -> Result<Nag, InvalidNag> {
        Nag::from_glyph(s).ok_or(InvalidNag)
    }
}

/// Error when parsing an invalid NAG.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct InvalidNag;

impl fmt::Display for InvalidNag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid nag")
    }
}

impl Error for InvalidNag {}
