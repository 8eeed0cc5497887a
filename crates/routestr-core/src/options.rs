// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

bitflags! {
    /// Flags controlling how route descriptions are written and read.
    ///
    /// Any combination is representable. Contradicting SID/STAR flags are
    /// resolved by [`RouteStringOptions::sid_star_mode`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct RouteStringOptions: u32 {
        /// Write departure and destination airport idents.
        const START_AND_DEST = 1 << 0;
        /// Write "DCT" between waypoints not connected by an airway.
        const DCT = 1 << 1;
        /// Write the cruise speed and altitude tag, e.g. "N0450F350".
        const ALT_AND_SPEED = 1 << 2;
        /// Write every waypoint and no airway names.
        const NO_AIRWAYS = 1 << 3;
        /// Write alternate airports after the destination.
        const ALTERNATES = 1 << 4;
        /// Write SID and STAR names with transitions.
        const SID_STAR = 1 << 5;
        /// Write the words "SID" and "STAR" instead of procedure names.
        const SID_STAR_GENERIC = 1 << 6;
        /// Write no procedures at all.
        const SID_STAR_NONE = 1 << 7;
        /// Write "TRANS.STAR" instead of "STAR.TRANS".
        const STAR_REV_TRANSITION = 1 << 8;
        /// Separate procedure and transition by a space instead of a dot.
        const SID_STAR_SPACE = 1 << 9;

        /// Read trailing airports as alternates.
        const READ_ALTERNATES = 1 << 16;
        /// Do not expect the first and last items to be airports.
        const READ_NO_AIRPORTS = 1 << 17;
        /// Replace coordinates by a navaid if one is close enough.
        const READ_MATCH_WAYPOINTS = 1 << 18;
        /// Add informational messages to the parse report.
        const REPORT = 1 << 19;
    }
}

impl RouteStringOptions {
    pub const DEFAULT_OPTIONS: RouteStringOptions = RouteStringOptions::START_AND_DEST
        .union(RouteStringOptions::DCT)
        .union(RouteStringOptions::ALT_AND_SPEED)
        .union(RouteStringOptions::SID_STAR);

    /// Effective SID/STAR output. The most restrictive flag wins:
    /// `SID_STAR_NONE` > `SID_STAR_GENERIC` > `SID_STAR`.
    pub fn sid_star_mode(&self) -> SidStarMode {
        if self.contains(Self::SID_STAR_NONE) {
            SidStarMode::Omit
        } else if self.contains(Self::SID_STAR_GENERIC) {
            SidStarMode::Generic
        } else if self.contains(Self::SID_STAR) {
            SidStarMode::Named
        } else {
            SidStarMode::Omit
        }
    }
}

impl Default for RouteStringOptions {
    fn default() -> Self {
        Self::DEFAULT_OPTIONS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidStarMode {
    Omit,
    Generic,
    Named,
}

#[derive(Error, Debug, PartialEq)]
pub enum OptionsParseError {
    #[error("Unknown route string option: {0}")]
    UnknownFlag(String),
}

impl FromStr for RouteStringOptions {
    type Err = OptionsParseError;

    /// Accepts flag names separated by `|`, `,` or whitespace, case-insensitive,
    /// with `-` allowed in place of `_`. "DEFAULT" expands to the default set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut options = RouteStringOptions::empty();
        for word in s
            .split(|c: char| c == '|' || c == ',' || c.is_whitespace())
            .filter(|w| !w.is_empty())
        {
            let name = word.to_uppercase().replace('-', "_");
            if name == "DEFAULT" {
                options |= RouteStringOptions::DEFAULT_OPTIONS;
                continue;
            }
            options |= RouteStringOptions::from_name(&name)
                .ok_or_else(|| OptionsParseError::UnknownFlag(word.to_string()))?;
        }
        Ok(options)
    }
}

impl fmt::Display for RouteStringOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter_names().map(|(name, _)| name).collect();
        write!(f, "{}", names.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set() {
        let opts = RouteStringOptions::default();
        assert!(opts.contains(RouteStringOptions::START_AND_DEST));
        assert!(opts.contains(RouteStringOptions::SID_STAR));
        assert!(!opts.contains(RouteStringOptions::READ_NO_AIRPORTS));
        assert!(!opts.contains(RouteStringOptions::REPORT));
    }

    #[test]
    fn test_precedence_most_restrictive_wins() {
        let all = RouteStringOptions::SID_STAR
            | RouteStringOptions::SID_STAR_GENERIC
            | RouteStringOptions::SID_STAR_NONE;
        assert_eq!(all.sid_star_mode(), SidStarMode::Omit);

        let generic = RouteStringOptions::SID_STAR | RouteStringOptions::SID_STAR_GENERIC;
        assert_eq!(generic.sid_star_mode(), SidStarMode::Generic);

        assert_eq!(
            RouteStringOptions::SID_STAR.sid_star_mode(),
            SidStarMode::Named
        );
        assert_eq!(
            RouteStringOptions::empty().sid_star_mode(),
            SidStarMode::Omit
        );
    }

    #[test]
    fn test_set_operations() {
        let a = RouteStringOptions::DCT | RouteStringOptions::ALTERNATES;
        let b = RouteStringOptions::DCT | RouteStringOptions::REPORT;
        assert_eq!(a & b, RouteStringOptions::DCT);
        assert_eq!(a - b, RouteStringOptions::ALTERNATES);
        assert!((a | b).contains(RouteStringOptions::REPORT));
    }

    #[test]
    fn test_parse_and_display() {
        let opts: RouteStringOptions = "dct | sid-star, READ_ALTERNATES".parse().unwrap();
        assert_eq!(
            opts,
            RouteStringOptions::DCT
                | RouteStringOptions::SID_STAR
                | RouteStringOptions::READ_ALTERNATES
        );
        assert_eq!(opts.to_string(), "DCT|SID_STAR|READ_ALTERNATES");

        let reparsed: RouteStringOptions = opts.to_string().parse().unwrap();
        assert_eq!(reparsed, opts);
    }

    #[test]
    fn test_parse_default_keyword() {
        let opts: RouteStringOptions = "default report".parse().unwrap();
        assert_eq!(
            opts,
            RouteStringOptions::DEFAULT_OPTIONS | RouteStringOptions::REPORT
        );
        assert_eq!("".parse::<RouteStringOptions>(), Ok(RouteStringOptions::empty()));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "DCT|BOGUS".parse::<RouteStringOptions>().unwrap_err();
        assert_eq!(err, OptionsParseError::UnknownFlag("BOGUS".to_string()));
    }
}
