// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::airway::connecting_segment;
use crate::flightplan::{Flightplan, FlightplanEntry, FlightplanType, ProcedureRef};
use crate::options::{RouteStringOptions, SidStarMode};
use crate::parser::{format_speed_altitude, format_speed_vfr};
use crate::token::{DCT, SID, STAR};
use log::debug;
use routestr_nav::{AirwaySegment, NavQuery};

/// Renders a [`Flightplan`] as a route description.
pub struct RouteStringWriter<'a> {
    nav: &'a dyn NavQuery,
}

impl<'a> RouteStringWriter<'a> {
    pub fn new(nav: &'a dyn NavQuery) -> Self {
        Self { nav }
    }

    /// Space separated route description. Empty plan gives an empty string.
    pub fn create_string_for_route(
        &self,
        plan: &Flightplan,
        cruise_speed_kts: f32,
        options: RouteStringOptions,
    ) -> String {
        self.create_string_tokens(plan, cruise_speed_kts, options)
            .join(" ")
    }

    pub fn create_string_tokens(
        &self,
        plan: &Flightplan,
        cruise_speed_kts: f32,
        options: RouteStringOptions,
    ) -> Vec<String> {
        let mut out = Vec::new();
        if plan.is_empty() {
            return out;
        }

        let entries = &plan.entries;
        let mode = options.sid_star_mode();
        let write_airports = options.contains(RouteStringOptions::START_AND_DEST);
        let departure = plan.departure_entry();
        let destination = plan.destination_entry();

        if let Some(dep) = departure.filter(|_| write_airports) {
            out.push(dep.ident.clone());
        }
        // IFR plans without a cruise altitude get no tag
        if options.contains(RouteStringOptions::ALT_AND_SPEED) {
            match (plan.cruise_altitude_ft, plan.flightplan_type) {
                (Some(altitude_ft), _) => {
                    out.push(format_speed_altitude(cruise_speed_kts, altitude_ft))
                }
                (None, FlightplanType::Vfr) => out.push(format_speed_vfr(cruise_speed_kts)),
                (None, FlightplanType::Ifr) => {
                    debug!("No cruise altitude, skipping speed and altitude tag")
                }
            }
        }

        let mut walk = EnrouteWalk {
            nav: self.nav,
            options,
            out,
            after_point: write_airports && departure.is_some(),
        };

        if let Some(sid) = &plan.departure_procedure {
            walk.push_procedure(sid, SID, mode, false);
        }

        let star_written = mode != SidStarMode::Omit && plan.arrival_procedure.is_some();
        let start = usize::from(departure.is_some());
        let mut end = entries.len() - usize::from(destination.is_some());
        // Destination is part of the walk when it can close an airway
        if destination.is_some() && write_airports && !star_written {
            end = entries.len();
        }
        walk.write_enroute(entries, start, end, mode);

        if let Some(star) = &plan.arrival_procedure {
            walk.push_procedure(star, STAR, mode, true);
        }
        let mut out = walk.out;
        if let Some(dest) = destination.filter(|_| write_airports && star_written) {
            out.push(dest.ident.clone());
        }

        if options.contains(RouteStringOptions::ALTERNATES) {
            out.extend(plan.alternates.iter().map(|a| a.ident.clone()));
        }
        debug!("Wrote route — tokens={}", out.len());
        out
    }
}

struct EnrouteWalk<'a> {
    nav: &'a dyn NavQuery,
    options: RouteStringOptions,
    out: Vec<String>,
    /// Last written item was a point, so a direct leg to the next one may get "DCT".
    after_point: bool,
}

impl EnrouteWalk<'_> {
    fn push_procedure(
        &mut self,
        proc: &ProcedureRef,
        generic: &str,
        mode: SidStarMode,
        arrival: bool,
    ) {
        match mode {
            SidStarMode::Omit => return,
            SidStarMode::Generic => self.out.push(generic.to_string()),
            SidStarMode::Named => {
                let reversed =
                    arrival && self.options.contains(RouteStringOptions::STAR_REV_TRANSITION);
                let mut parts = vec![proc.name.clone()];
                if let Some(trans) = &proc.transition {
                    if reversed {
                        parts.insert(0, trans.clone());
                    } else {
                        parts.push(trans.clone());
                    }
                }
                if self.options.contains(RouteStringOptions::SID_STAR_SPACE) {
                    self.out.extend(parts);
                } else {
                    self.out.push(parts.join("."));
                }
            }
        }
        self.after_point = false;
    }

    /// Writes entries `start..end`. Procedure legs are only written when an
    /// airway starts at one and the procedure is not written by name.
    fn write_enroute(
        &mut self,
        entries: &[FlightplanEntry],
        start: usize,
        end: usize,
        mode: SidStarMode,
    ) {
        let use_airways = !self.options.contains(RouteStringOptions::NO_AIRWAYS);
        let mut i = start;
        while i < end {
            let entry = &entries[i];
            if entry.is_procedure() {
                if mode != SidStarMode::Omit {
                    self.after_point = false;
                }
                i += 1;
                continue;
            }

            if use_airways {
                if let Some(last) = self.airway_run(entries, i, end) {
                    // Entry fix of the airway is hidden in an unnamed procedure
                    if mode != SidStarMode::Named {
                        if let Some(prev) = entries[..i].last().filter(|e| e.is_procedure()) {
                            debug!(
                                "Writing procedure leg as airway entry — airway={}, fix={}",
                                entries[i].airway.as_deref().unwrap_or_default(),
                                prev.ident
                            );
                            self.push_point(&prev.ident);
                        }
                    }
                    let airway = entries[i].airway.clone().unwrap_or_default();
                    self.out.push(airway);
                    self.out.push(entries[last].ident.clone());
                    self.after_point = true;
                    i = last + 1;
                    continue;
                }
            }

            self.push_point(&entry.ident);
            i += 1;
        }
    }

    /// Direct leg to `ident`.
    fn push_point(&mut self, ident: &str) {
        if self.after_point && self.options.contains(RouteStringOptions::DCT) {
            self.out.push(DCT.to_string());
        }
        self.out.push(ident.to_string());
        self.after_point = true;
    }

    /// Index of the last entry of the airway run starting at `i`. Every hop
    /// has to be a database segment on the same fragment.
    fn airway_run(&self, entries: &[FlightplanEntry], i: usize, end: usize) -> Option<usize> {
        let airway = entries[i].airway.as_deref()?;
        let first = self.hop_segment(entries, i, airway)?;

        let mut last = i;
        while last + 1 < end && entries[last + 1].airway.as_deref() == Some(airway) {
            match self.hop_segment(entries, last + 1, airway) {
                Some(segment) if segment.fragment == first.fragment => last += 1,
                _ => break,
            }
        }
        Some(last)
    }

    /// Segment of `airway` between entry `i` and its predecessor.
    fn hop_segment(
        &self,
        entries: &[FlightplanEntry],
        i: usize,
        airway: &str,
    ) -> Option<AirwaySegment> {
        let from = entries[i.checked_sub(1)?].nav_id?;
        let to = entries[i].nav_id?;
        let segment = connecting_segment(self.nav, airway, from, to);
        if segment.is_none() {
            debug!(
                "Airway hop not in database, writing direct — airway={}, to={}",
                airway, entries[i].ident
            );
        }
        segment
    }
}
