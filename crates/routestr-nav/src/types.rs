// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::geo::Pos;
use serde::{Deserialize, Serialize};

/// Database id shared by airports, navaids and airway fixes.
pub type NavId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub id: NavId,
    pub ident: String,
    #[serde(default)]
    pub name: String,
    pub pos: Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavaidKind {
    Vor,
    Ndb,
    Waypoint,
}

/// VOR, NDB or named intersection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Navaid {
    pub id: NavId,
    pub ident: String,
    #[serde(default)]
    pub region: String,
    pub kind: NavaidKind,
    pub pos: Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AirwayType {
    /// Low altitude
    Victor,
    /// High altitude
    Jet,
    Both,
}

impl AirwayType {
    /// True if the airway may be flown in the given altitude class.
    pub fn allows(&self, class: AirwayType) -> bool {
        matches!(
            (self, class),
            (AirwayType::Both, _) | (_, AirwayType::Both)
        ) || *self == class
    }
}

/// End point of an airway segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirwayFix {
    pub id: NavId,
    pub ident: String,
    pub pos: Pos,
}

/// One leg of an airway between two fixes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirwaySegment {
    pub id: NavId,
    pub name: String,
    pub airway_type: AirwayType,
    /// Disconnected pieces of an airway with the same name get different fragment numbers.
    #[serde(default)]
    pub fragment: u32,
    #[serde(default)]
    pub sequence: u32,
    pub from: AirwayFix,
    pub to: AirwayFix,
}

impl AirwaySegment {
    pub fn touches(&self, fix_id: NavId) -> bool {
        self.from.id == fix_id || self.to.id == fix_id
    }

    /// Fix at the other end of the segment, if `fix_id` is one of its ends.
    pub fn other_end(&self, fix_id: NavId) -> Option<&AirwayFix> {
        if self.from.id == fix_id {
            Some(&self.to)
        } else if self.to.id == fix_id {
            Some(&self.from)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcedureKind {
    Sid,
    Star,
    Approach,
}

impl ProcedureKind {
    pub fn is_arrival(&self) -> bool {
        matches!(self, ProcedureKind::Star | ProcedureKind::Approach)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureLeg {
    pub ident: String,
    pub pos: Pos,
    #[serde(default)]
    pub nav_id: Option<NavId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub name: String,
    pub legs: Vec<ProcedureLeg>,
}

/// Procedure as stored in the database with all of its transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureRecord {
    pub airport_id: NavId,
    pub kind: ProcedureKind,
    pub name: String,
    pub legs: Vec<ProcedureLeg>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

/// Procedure resolved for a flight plan: one optional transition, legs in flying order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    pub kind: ProcedureKind,
    pub name: String,
    pub transition: Option<String>,
    pub legs: Vec<ProcedureLeg>,
}

impl ProcedureRecord {
    /// Builds the flyable leg list. Departure transitions follow the SID legs,
    /// arrival transitions precede the STAR or approach legs.
    pub fn resolve(&self, transition: Option<&str>) -> Option<Procedure> {
        let trans = match transition {
            Some(name) => Some(
                self.transitions
                    .iter()
                    .find(|t| t.name.eq_ignore_ascii_case(name))?,
            ),
            None => None,
        };

        let mut legs = Vec::with_capacity(
            self.legs.len() + trans.map(|t| t.legs.len()).unwrap_or_default(),
        );
        match (self.kind, trans) {
            (ProcedureKind::Sid, Some(t)) => {
                legs.extend(self.legs.iter().cloned());
                legs.extend(t.legs.iter().cloned());
            }
            (_, Some(t)) => {
                legs.extend(t.legs.iter().cloned());
                legs.extend(self.legs.iter().cloned());
            }
            (_, None) => legs.extend(self.legs.iter().cloned()),
        }

        Some(Procedure {
            kind: self.kind,
            name: self.name.clone(),
            transition: trans.map(|t| t.name.clone()),
            legs,
        })
    }
}
