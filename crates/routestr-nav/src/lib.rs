// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Navigation data access for the route string reader and writer.
//!
//! The core never touches a database directly. It goes through [`NavQuery`],
//! which the application implements over its own navdata. [`NavDatabase`] is
//! an in-memory implementation loaded from JSON.

pub mod database;
pub mod geo;
pub mod types;

pub use database::{NavData, NavDataError, NavDatabase};
pub use geo::{BoundingBox, Pos};
pub use types::{
    Airport, AirwayFix, AirwaySegment, AirwayType, NavId, Navaid, NavaidKind, Procedure,
    ProcedureKind, ProcedureLeg, ProcedureRecord, Transition,
};

/// Read-only lookups used while resolving and writing route descriptions.
///
/// Implementations must be safe for concurrent reads; a single parse issues
/// its queries sequentially.
pub trait NavQuery: Send + Sync {
    /// Airport by ICAO ident, case-insensitive.
    fn find_airport(&self, ident: &str) -> Option<Airport>;

    /// Every VOR, NDB or waypoint with this ident, case-insensitive.
    fn find_navaids(&self, ident: &str) -> Vec<Navaid>;

    /// VOR, NDB or waypoint with this ident. Returns the one nearest to `near`
    /// if several share the ident, otherwise the first one found.
    fn find_navaid(&self, ident: &str, near: Option<Pos>) -> Option<Navaid> {
        let navaids = self.find_navaids(ident);
        match near {
            Some(pos) => navaids.into_iter().min_by(|a, b| {
                a.pos
                    .distance_nm(&pos)
                    .total_cmp(&b.pos.distance_nm(&pos))
            }),
            None => navaids.into_iter().next(),
        }
    }

    /// Nearest navaid of any ident within `max_dist_nm` of `pos`.
    fn find_nearest_navaid(&self, pos: Pos, max_dist_nm: f64) -> Option<Navaid>;

    /// All segments of airway `name` that start or end at fix `from_waypoint_id`.
    fn find_airway_segments(&self, name: &str, from_waypoint_id: NavId) -> Vec<AirwaySegment>;

    /// True if any airway with this name exists.
    fn has_airway(&self, name: &str) -> bool;

    /// Procedure of `airport_id` with the given name and optional transition.
    fn find_procedure(
        &self,
        airport_id: NavId,
        name: &str,
        transition: Option<&str>,
    ) -> Option<Procedure>;
}
