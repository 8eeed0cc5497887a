// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::flightplan::{EntryType, FlightplanEntry};
use routestr_nav::{Airport, AirwayFix, NavId, Navaid, NavaidKind, Pos, ProcedureLeg};

/// Result of resolving one route item against the navigation data.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedEntity {
    Airport(Airport),
    Vor(Navaid),
    Ndb(Navaid),
    Waypoint(Navaid),
    /// Fix reached along an airway. `kind` is set if the fix is a known navaid.
    AirwayFix {
        fix: AirwayFix,
        airway: String,
        kind: Option<NavaidKind>,
    },
    ProcedureLeg(ProcedureLeg),
    User {
        ident: String,
        pos: Pos,
    },
    Unresolved {
        ident: String,
    },
}

impl ResolvedEntity {
    pub fn from_navaid(navaid: Navaid) -> Self {
        match navaid.kind {
            NavaidKind::Vor => ResolvedEntity::Vor(navaid),
            NavaidKind::Ndb => ResolvedEntity::Ndb(navaid),
            NavaidKind::Waypoint => ResolvedEntity::Waypoint(navaid),
        }
    }

    pub fn ident(&self) -> &str {
        match self {
            ResolvedEntity::Airport(a) => &a.ident,
            ResolvedEntity::Vor(n) | ResolvedEntity::Ndb(n) | ResolvedEntity::Waypoint(n) => {
                &n.ident
            }
            ResolvedEntity::AirwayFix { fix, .. } => &fix.ident,
            ResolvedEntity::ProcedureLeg(leg) => &leg.ident,
            ResolvedEntity::User { ident, .. } | ResolvedEntity::Unresolved { ident } => ident,
        }
    }

    pub fn pos(&self) -> Option<Pos> {
        match self {
            ResolvedEntity::Airport(a) => Some(a.pos),
            ResolvedEntity::Vor(n) | ResolvedEntity::Ndb(n) | ResolvedEntity::Waypoint(n) => {
                Some(n.pos)
            }
            ResolvedEntity::AirwayFix { fix, .. } => Some(fix.pos),
            ResolvedEntity::ProcedureLeg(leg) => Some(leg.pos),
            ResolvedEntity::User { pos, .. } => Some(*pos),
            ResolvedEntity::Unresolved { .. } => None,
        }
    }

    pub fn nav_id(&self) -> Option<NavId> {
        match self {
            ResolvedEntity::Airport(a) => Some(a.id),
            ResolvedEntity::Vor(n) | ResolvedEntity::Ndb(n) | ResolvedEntity::Waypoint(n) => {
                Some(n.id)
            }
            ResolvedEntity::AirwayFix { fix, .. } => Some(fix.id),
            ResolvedEntity::ProcedureLeg(leg) => leg.nav_id,
            ResolvedEntity::User { .. } | ResolvedEntity::Unresolved { .. } => None,
        }
    }

    pub fn entry_type(&self) -> EntryType {
        match self {
            ResolvedEntity::Airport(_) => EntryType::Airport,
            ResolvedEntity::Vor(_) => EntryType::Vor,
            ResolvedEntity::Ndb(_) => EntryType::Ndb,
            ResolvedEntity::Waypoint(_) => EntryType::Waypoint,
            ResolvedEntity::AirwayFix { kind, .. } => match kind {
                Some(NavaidKind::Vor) => EntryType::Vor,
                Some(NavaidKind::Ndb) => EntryType::Ndb,
                _ => EntryType::Waypoint,
            },
            ResolvedEntity::ProcedureLeg(_) => EntryType::Procedure,
            ResolvedEntity::User { .. } => EntryType::User,
            ResolvedEntity::Unresolved { .. } => EntryType::Invalid,
        }
    }

    pub fn into_entry(self) -> FlightplanEntry {
        let mut entry = FlightplanEntry::new(self.ident(), self.entry_type(), self.pos());
        entry.nav_id = self.nav_id();
        match self {
            ResolvedEntity::Vor(n) | ResolvedEntity::Ndb(n) | ResolvedEntity::Waypoint(n) => {
                entry.region = n.region;
            }
            ResolvedEntity::AirwayFix { airway, .. } => entry.airway = Some(airway),
            _ => {}
        }
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navaid(kind: NavaidKind) -> Navaid {
        Navaid {
            id: 11,
            ident: "BOS".to_string(),
            region: "K6".to_string(),
            kind,
            pos: Pos::new(-70.99, 42.36),
        }
    }

    #[test]
    fn test_navaid_entry() {
        let entry = ResolvedEntity::from_navaid(navaid(NavaidKind::Vor)).into_entry();
        assert_eq!(entry.ident, "BOS");
        assert_eq!(entry.entry_type, EntryType::Vor);
        assert_eq!(entry.region, "K6");
        assert_eq!(entry.nav_id, Some(11));
        assert!(entry.airway.is_none());
    }

    #[test]
    fn test_airway_fix_entry() {
        let entity = ResolvedEntity::AirwayFix {
            fix: AirwayFix {
                id: 10,
                ident: "MERIT".to_string(),
                pos: Pos::new(-73.1, 41.38),
            },
            airway: "J121".to_string(),
            kind: None,
        };
        let entry = entity.into_entry();
        assert_eq!(entry.entry_type, EntryType::Waypoint);
        assert_eq!(entry.airway.as_deref(), Some("J121"));
        assert_eq!(entry.nav_id, Some(10));
    }

    #[test]
    fn test_unresolved_entry() {
        let entity = ResolvedEntity::Unresolved {
            ident: "XYZZY".to_string(),
        };
        let entry = entity.into_entry();
        assert_eq!(entry.entry_type, EntryType::Invalid);
        assert!(entry.pos.is_none());
        assert!(entry.nav_id.is_none());
    }
}
