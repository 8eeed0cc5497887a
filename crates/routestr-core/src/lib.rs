// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Reading and writing ATC style route descriptions such as
//! `KJFK DCT MERIT J121 BOS KBOS`.
//!
//! [`RouteStringReader`] turns text into a [`Flightplan`] using navigation data
//! behind [`routestr_nav::NavQuery`]. [`RouteStringWriter`] renders a plan back
//! to text. Both are configured by [`RouteStringOptions`].

pub mod airway;
pub mod entity;
pub mod flightplan;
pub mod options;
pub mod parser;
pub mod reader;
pub mod report;
pub mod token;
pub mod writer;

pub use entity::ResolvedEntity;
pub use flightplan::{
    EntryType, Flightplan, FlightplanEntry, FlightplanType, ProcedureRef, RouteType,
};
pub use options::{OptionsParseError, RouteStringOptions, SidStarMode};
pub use reader::RouteStringReader;
pub use report::{Diagnostic, ParseReport, Severity};
pub use token::{clean_route_string, tokenize, Token, TokenKind};
pub use writer::RouteStringWriter;
