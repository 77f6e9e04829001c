//! Bidding shorthand to display notation.
//!
//! Stored content writes bids compactly: `1c`, `2h`, `3n`, or a bare `d` for "diamonds".
//! [`convert`] rewrites those tokens into level + suit glyph (`1♣`, `2♥`) and `NT`.
//!
//! Matching is on word boundaries, so ordinary words ("cards", "has") are left alone.
//! The suit patterns are idempotent. The notrump pattern is case-insensitive and would
//! turn a lone `N` into `NT` again, so callers convert raw stored text exactly once.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static CLUBS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([1-7]?)c\b").unwrap());
static DIAMONDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([1-7]?)d\b").unwrap());
static HEARTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([1-7]?)h\b").unwrap());
static SPADES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([1-7]?)s\b").unwrap());
static NOTRUMP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b([1-7]?)n\b").unwrap());

/// Rewrites bidding shorthand into display notation.
pub fn convert(text: &str) -> String {
    let text = CLUBS.replace_all(text, "${1}♣");
    let text = DIAMONDS.replace_all(&text, "${1}♦");
    let text = HEARTS.replace_all(&text, "${1}♥");
    let text = SPADES.replace_all(&text, "${1}♠");
    NOTRUMP.replace_all(&text, "${1}NT").into_owned()
}

/// The symbols offered by the editor's notation buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    NoTrump,
}

impl Suit {
    pub const ALL: [Suit; 5] = [
        Suit::Clubs,
        Suit::Diamonds,
        Suit::Hearts,
        Suit::Spades,
        Suit::NoTrump,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Hearts => "♥",
            Suit::Spades => "♠",
            Suit::NoTrump => "NT",
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Diamonds | Suit::Hearts)
    }

    /// Parses either the shorthand letter or the glyph itself.
    pub fn parse(token: &str) -> Option<Suit> {
        match token.trim().to_lowercase().as_str() {
            "c" | "♣" | "clubs" => Some(Suit::Clubs),
            "d" | "♦" | "diamonds" => Some(Suit::Diamonds),
            "h" | "♥" | "hearts" => Some(Suit::Hearts),
            "s" | "♠" | "spades" => Some(Suit::Spades),
            "n" | "nt" | "notrump" => Some(Suit::NoTrump),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_an_auction() {
        assert_eq!(convert("1c-1d-1n"), "1♣-1♦-1NT");
    }

    #[test]
    fn converts_every_suit() {
        assert_eq!(convert("1c 2d 3h 4s 5n"), "1♣ 2♦ 3♥ 4♠ 5NT");
    }

    #[test]
    fn converts_bare_suit_letters() {
        assert_eq!(convert("4+ h, 5+ s"), "4+ ♥, 5+ ♠");
    }

    #[test]
    fn notrump_is_case_insensitive() {
        assert_eq!(convert("2N and 3n"), "2NT and 3NT");
    }

    #[test]
    fn leaves_words_alone() {
        let text = "Opener has cards in hand, responder shows length";
        assert_eq!(convert(text), text);
    }

    #[test]
    fn ignores_levels_outside_one_to_seven() {
        assert_eq!(convert("8c"), "8c");
        assert_eq!(convert("0h"), "0h");
    }

    #[test]
    fn suit_conversion_is_idempotent() {
        let once = convert("1c 2d 3h 4s");
        assert_eq!(convert(&once), once);
    }

    #[test]
    fn already_converted_notrump_is_stable() {
        let once = convert("1n");
        assert_eq!(once, "1NT");
        assert_eq!(convert(&once), "1NT");
    }

    #[test]
    fn suit_parse_accepts_letters_and_glyphs() {
        assert_eq!(Suit::parse("h"), Some(Suit::Hearts));
        assert_eq!(Suit::parse("♠"), Some(Suit::Spades));
        assert_eq!(Suit::parse("NT"), Some(Suit::NoTrump));
        assert_eq!(Suit::parse("x"), None);
        assert!(Suit::Diamonds.is_red());
        assert!(!Suit::Clubs.is_red());
    }
}
