// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use routestr_nav::{NavId, Pos, ProcedureKind};
use serde::{Deserialize, Serialize};

/// Cruise altitude at and above which high altitude (jet) airways are used.
pub const HIGH_ALTITUDE_THRESHOLD_FT: i32 = 18_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    Airport,
    Vor,
    Ndb,
    Waypoint,
    /// User defined position, e.g. from a coordinate
    User,
    /// Leg of a SID, STAR or approach
    Procedure,
    /// Not found in the database. Has no position.
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightplanEntry {
    pub ident: String,
    #[serde(default)]
    pub region: String,
    pub entry_type: EntryType,
    pub pos: Option<Pos>,
    /// Airway leading from the previous entry to this one.
    #[serde(default)]
    pub airway: Option<String>,
    #[serde(default)]
    pub nav_id: Option<NavId>,
}

impl FlightplanEntry {
    pub fn new(ident: &str, entry_type: EntryType, pos: Option<Pos>) -> Self {
        Self {
            ident: ident.to_string(),
            region: String::new(),
            entry_type,
            pos,
            airway: None,
            nav_id: None,
        }
    }

    pub fn is_procedure(&self) -> bool {
        self.entry_type == EntryType::Procedure
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlightplanType {
    #[default]
    Ifr,
    Vfr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RouteType {
    #[default]
    Direct,
    LowAltitude,
    HighAltitude,
}

impl RouteType {
    pub fn for_altitude(altitude_ft: i32) -> Self {
        if altitude_ft >= HIGH_ALTITUDE_THRESHOLD_FT {
            RouteType::HighAltitude
        } else {
            RouteType::LowAltitude
        }
    }
}

/// Procedure selected for departure or arrival.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureRef {
    pub kind: ProcedureKind,
    pub name: String,
    #[serde(default)]
    pub transition: Option<String>,
}

/// Ordered flight plan filled by the reader and rendered by the writer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flightplan {
    pub entries: Vec<FlightplanEntry>,
    #[serde(default)]
    pub departure: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub alternates: Vec<FlightplanEntry>,
    #[serde(default)]
    pub cruise_altitude_ft: Option<i32>,
    #[serde(default)]
    pub cruise_speed_kts: Option<f32>,
    #[serde(default)]
    pub flightplan_type: FlightplanType,
    #[serde(default)]
    pub route_type: RouteType,
    #[serde(default)]
    pub departure_procedure: Option<ProcedureRef>,
    #[serde(default)]
    pub arrival_procedure: Option<ProcedureRef>,
}

impl Flightplan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn append(&mut self, entry: FlightplanEntry) {
        self.entries.push(entry);
    }

    pub fn last_entry(&self) -> Option<&FlightplanEntry> {
        self.entries.last()
    }

    /// Entry of the departure airport, if the plan starts at one.
    pub fn departure_entry(&self) -> Option<&FlightplanEntry> {
        let dep = self.departure.as_deref()?;
        self.entries
            .first()
            .filter(|e| e.entry_type == EntryType::Airport && e.ident == dep)
    }

    /// Entry of the destination airport, if the plan ends at one.
    pub fn destination_entry(&self) -> Option<&FlightplanEntry> {
        let dest = self.destination.as_deref()?;
        self.entries
            .last()
            .filter(|e| e.entry_type == EntryType::Airport && e.ident == dest)
    }

    /// Idents of all entries in route order.
    pub fn idents(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.ident.as_str()).collect()
    }

    pub fn alternate_idents(&self) -> Vec<&str> {
        self.alternates.iter().map(|e| e.ident.as_str()).collect()
    }
}
