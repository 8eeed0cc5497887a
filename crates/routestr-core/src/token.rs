// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::parser::{parse_coordinate, parse_speed_altitude};
use regex::Regex;
use std::sync::OnceLock;

pub const DCT: &str = "DCT";
pub const SID: &str = "SID";
pub const STAR: &str = "STAR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Airport, navaid, airway or procedure name. May contain a dot ("ROBUC3.ENE").
    Ident,
    /// "DCT", "SID" or "STAR"
    Keyword,
    /// Cruise speed and level, "N0450F350"
    SpeedAltitude,
    /// Geographic coordinate, "4510N07530W"
    Coordinate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: classify(text),
        }
    }

    pub fn is_ident(&self) -> bool {
        self.kind == TokenKind::Ident
    }
}

fn classify(word: &str) -> TokenKind {
    if word == DCT || word == SID || word == STAR {
        TokenKind::Keyword
    } else if parse_speed_altitude(word).is_some() {
        TokenKind::SpeedAltitude
    } else if parse_coordinate(word).is_some() {
        TokenKind::Coordinate
    } else {
        TokenKind::Ident
    }
}

/// Normalizes raw text into uppercase words: everything that is not a letter,
/// digit, dot, slash or dash separates words. `WPT/N0450F350` becomes two
/// words; other slash suffixes like runways (`KJFK/31L`) are dropped.
pub fn clean_route_string(text: &str) -> Vec<String> {
    static SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();
    let separator_re = SEPARATOR_RE.get_or_init(|| Regex::new(r"[^A-Z0-9./\-]+").unwrap());

    let upper = text.to_uppercase();
    let mut words = Vec::new();
    for raw in separator_re.split(&upper) {
        let mut parts = raw.split('/');
        if let Some(first) = parts.next() {
            push_word(&mut words, first);
        }
        for part in parts {
            if parse_speed_altitude(part.trim_matches('.')).is_some() {
                push_word(&mut words, part);
            }
        }
    }
    words
}

fn push_word(words: &mut Vec<String>, word: &str) {
    let word = word.trim_matches(|c| c == '.' || c == '-');
    if !word.is_empty() {
        words.push(word.to_string());
    }
}

/// Splits a route description into classified tokens. Pure and restartable;
/// empty input gives an empty vector.
pub fn tokenize(text: &str) -> Vec<Token> {
    clean_route_string(text)
        .iter()
        .map(|w| Token::new(w))
        .collect()
}
