// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Reads a route description into a [`Flightplan`].
//!
//! Reading never fails as a whole. Every problem ends up in the returned
//! [`ParseReport`]; only a missing departure airport is fatal and leaves the
//! plan empty.

use crate::airway::{self, AirwayChain};
use crate::entity::ResolvedEntity;
use crate::flightplan::{
    Flightplan, FlightplanType, ProcedureRef, RouteType, HIGH_ALTITUDE_THRESHOLD_FT,
};
use crate::options::RouteStringOptions;
use crate::parser::{parse_coordinate, parse_speed_altitude, CruiseLevel};
use crate::report::ParseReport;
use crate::token::{tokenize, Token, TokenKind};
use log::{debug, info, warn};
use routestr_nav::{Airport, AirwayFix, AirwayType, NavQuery, Pos, Procedure, ProcedureKind};

/// Maximum distance for replacing a coordinate by a navaid.
const MATCH_WAYPOINT_MAX_NM: f64 = 0.5;

pub struct RouteStringReader<'a> {
    nav: &'a dyn NavQuery,
}

impl<'a> RouteStringReader<'a> {
    pub fn new(nav: &'a dyn NavQuery) -> Self {
        Self { nav }
    }

    /// Reads `text` into a new flight plan.
    pub fn read(&self, text: &str, options: RouteStringOptions) -> (Flightplan, ParseReport) {
        let mut plan = Flightplan::new();
        let report = self.read_into(text, options, &mut plan);
        (plan, report)
    }

    /// Replaces the contents of `plan` with the route read from `text`.
    pub fn read_into(
        &self,
        text: &str,
        options: RouteStringOptions,
        plan: &mut Flightplan,
    ) -> ParseReport {
        plan.clear();
        let tokens = tokenize(text);
        debug!("Reading route — tokens={}, options={}", tokens.len(), options);

        let mut pass = ReadPass {
            nav: self.nav,
            options,
            plan,
            report: ParseReport::new(),
            speed_seen: false,
            airway_types: Vec::new(),
        };
        pass.run(&tokens);

        info!(
            "Read route — entries={}, diagnostics={}, fatal={}",
            pass.plan.entries.len(),
            pass.report.len(),
            pass.report.is_fatal()
        );
        pass.report
    }
}

/// What an airway at the end of the enroute part has to lead to.
enum ChainTarget {
    /// Entry fix of the arrival procedure.
    Fix(String),
    Destination(Airport),
}

impl ChainTarget {
    fn ident(&self) -> &str {
        match self {
            ChainTarget::Fix(ident) => ident,
            ChainTarget::Destination(airport) => &airport.ident,
        }
    }

    fn matches(&self, fix: &AirwayFix) -> bool {
        match self {
            ChainTarget::Fix(ident) => fix.ident == *ident,
            ChainTarget::Destination(airport) => {
                fix.id == airport.id || fix.ident == airport.ident
            }
        }
    }
}

/// State of a single read call.
struct ReadPass<'a, 'p> {
    nav: &'a dyn NavQuery,
    options: RouteStringOptions,
    plan: &'p mut Flightplan,
    report: ParseReport,
    speed_seen: bool,
    airway_types: Vec<AirwayType>,
}

impl ReadPass<'_, '_> {
    fn run(&mut self, tokens: &[Token]) {
        let points: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind != TokenKind::SpeedAltitude)
            .map(|(i, _)| i)
            .collect();
        let with_airports = !self.options.contains(RouteStringOptions::READ_NO_AIRPORTS);

        // Departure
        let mut body_start = 0;
        let mut departure = None;
        if with_airports {
            let Some(&first) = points.first() else {
                self.fatal("Departure airport missing. The route is empty.".to_string());
                return;
            };
            match self.airport_at(tokens, first) {
                Some(airport) => {
                    body_start = first + 1;
                    departure = Some(airport);
                }
                None => {
                    self.fatal(format!(
                        "Departure airport {} not found.",
                        tokens[first].text
                    ));
                    return;
                }
            }
        }

        // Destination and alternates
        let mut body_end = tokens.len();
        let mut destination = None;
        if with_airports {
            let trailing: Vec<usize> = points
                .iter()
                .copied()
                .filter(|&i| i >= body_start)
                .collect();
            let (end, dest, alternates) = self.read_trailing_airports(tokens, &trailing);
            if let Some(end) = end {
                body_end = end;
            }
            destination = dest;
            for alternate in alternates {
                self.plan
                    .alternates
                    .push(ResolvedEntity::Airport(alternate).into_entry());
            }
        }

        if let Some(airport) = &departure {
            self.info(format!("Departure airport {}.", airport.ident));
            self.plan.departure = Some(airport.ident.clone());
            self.append(ResolvedEntity::Airport(airport.clone()));
        }
        self.apply_speeds(&tokens[..body_start]);

        // Procedures
        let mut cursor = body_start;
        if let Some(airport) = &departure {
            if let Some((next, sid)) = self.find_sid(tokens, cursor, body_end, airport) {
                self.apply_speeds(&tokens[cursor..next]);
                self.append_procedure(sid);
                cursor = next;
            }
        }

        let mut star = None;
        let mut enroute_end = body_end;
        if let Some(airport) = &destination {
            if let Some((start, proc)) = self.find_arrival(tokens, cursor, body_end, airport) {
                enroute_end = start;
                star = Some(proc);
            }
        }

        let tail = match (&star, &destination) {
            (Some(proc), _) => proc
                .transition
                .clone()
                .or_else(|| proc.legs.first().map(|l| l.ident.clone()))
                .map(ChainTarget::Fix),
            (None, Some(airport)) => Some(ChainTarget::Destination(airport.clone())),
            (None, None) => None,
        };

        let destination_airway = self.read_enroute(tokens, cursor, enroute_end, tail);

        if let Some(proc) = star {
            self.append_procedure(proc);
        }
        self.apply_speeds(&tokens[enroute_end..]);

        if let Some(airport) = destination {
            self.info(format!("Destination airport {}.", airport.ident));
            self.plan.destination = Some(airport.ident.clone());
            let mut entry = ResolvedEntity::Airport(airport).into_entry();
            entry.airway = destination_airway;
            self.plan.append(entry);
        }
        if !self.plan.alternates.is_empty() {
            let idents = self.plan.alternate_idents().join(" ");
            self.info(format!("Alternate airports {}.", idents));
        }

        self.finish();
    }

    /// Returns the token index where the trailing airports start, the
    /// destination and the alternates in listed order.
    fn read_trailing_airports(
        &mut self,
        tokens: &[Token],
        trailing: &[usize],
    ) -> (Option<usize>, Option<Airport>, Vec<Airport>) {
        let Some(&last) = trailing.last() else {
            self.report.error("Destination airport missing.");
            return (None, None, Vec::new());
        };

        if self.options.contains(RouteStringOptions::READ_ALTERNATES) {
            let mut found = Vec::new();
            for &i in trailing.iter().rev() {
                match self.airport_at(tokens, i) {
                    Some(airport) => found.push((i, airport)),
                    None => break,
                }
            }
            let start = found.last().map(|(i, _)| *i);
            found.reverse();
            let mut airports: Vec<Airport> = found.into_iter().map(|(_, a)| a).collect();
            let destination = airports.pop();
            if destination.is_some() {
                return (start, destination, airports);
            }
        } else if let Some(airport) = self.airport_at(tokens, last) {
            return (Some(last), Some(airport), Vec::new());
        }

        warn!("Last route item is not an airport — token={}", tokens[last].text);
        self.report.error(format!(
            "Destination {} is not an airport. Reading it as a waypoint.",
            tokens[last].text
        ));
        (None, None, Vec::new())
    }

    /// Reads the tokens between the procedures. Returns the airway leading
    /// into the destination, if the last airway ends there.
    fn read_enroute(
        &mut self,
        tokens: &[Token],
        start: usize,
        end: usize,
        tail: Option<ChainTarget>,
    ) -> Option<String> {
        let mut destination_airway = None;
        let mut i = start;
        while i < end {
            let token = &tokens[i];
            match token.kind {
                TokenKind::Keyword => debug!("Skipping keyword — token={}", token.text),
                TokenKind::SpeedAltitude => self.apply_speed(token),
                TokenKind::Coordinate => self.read_coordinate(&token.text),
                TokenKind::Ident => {
                    if self.is_airway_start(token) {
                        if i + 1 < end {
                            i += self.read_airway(&token.text, &tokens[i + 1]);
                            continue;
                        }
                        destination_airway = self.read_airway_to_tail(&token.text, tail.as_ref());
                    } else {
                        self.read_ident(&token.text);
                    }
                }
            }
            i += 1;
        }
        destination_airway
    }

    fn is_airway_start(&self, token: &Token) -> bool {
        !self.plan.is_empty() && self.nav.has_airway(&token.text)
    }

    /// Resolves `airway` up to the fix in `next`. Returns the number of
    /// tokens consumed.
    fn read_airway(&mut self, airway: &str, next: &Token) -> usize {
        if next.kind != TokenKind::Ident {
            self.report.error(format!(
                "Airway {} is not followed by a waypoint. Ignoring it.",
                airway
            ));
            return 1;
        }

        match self.find_chain(airway, |f| f.ident == next.text) {
            Ok(chain) => {
                self.append_chain(chain, true);
                2
            }
            Err(from) => {
                warn!(
                    "Airway does not connect — airway={}, from={}, to={}",
                    airway, from, next.text
                );
                self.report.error(format!(
                    "Airway {} does not connect {} and {}. Using a direct leg.",
                    airway, from, next.text
                ));
                1
            }
        }
    }

    /// Airway written as last enroute item, leading into the arrival
    /// procedure or the destination.
    fn read_airway_to_tail(&mut self, airway: &str, tail: Option<&ChainTarget>) -> Option<String> {
        let Some(target) = tail else {
            self.report.error(format!(
                "Airway {} is not followed by a waypoint. Ignoring it.",
                airway
            ));
            return None;
        };

        match self.find_chain(airway, |f| target.matches(f)) {
            Ok(chain) => match target {
                ChainTarget::Fix(_) => {
                    self.append_chain(chain, true);
                    None
                }
                ChainTarget::Destination(_) => {
                    self.append_chain(chain, false);
                    Some(airway.to_string())
                }
            },
            Err(from) => {
                warn!(
                    "Airway does not connect — airway={}, from={}, to={}",
                    airway,
                    from,
                    target.ident()
                );
                self.report.error(format!(
                    "Airway {} does not connect {} and {}. Using a direct leg.",
                    airway,
                    from,
                    target.ident()
                ));
                None
            }
        }
    }

    /// Chain from the last entry along `airway`. On failure returns the
    /// ident of the last entry.
    fn find_chain<F>(&self, airway: &str, is_target: F) -> Result<AirwayChain, String>
    where
        F: Fn(&AirwayFix) -> bool,
    {
        let (from_ident, from_id) = match self.plan.last_entry() {
            Some(entry) => (entry.ident.clone(), entry.nav_id),
            None => (String::new(), None),
        };
        let from_id = from_id.ok_or_else(|| from_ident.clone())?;
        airway::find_chain(self.nav, airway, from_id, self.altitude_class(), is_target)
            .ok_or(from_ident)
    }

    fn append_chain(&mut self, chain: AirwayChain, include_end: bool) {
        let count = if include_end {
            chain.fixes.len()
        } else {
            chain.fixes.len().saturating_sub(1)
        };
        let from = self.plan.last_entry().map(|e| e.ident.clone());
        if let (Some(from), Some(end)) = (from, chain.end()) {
            let message = format!("Airway {} from {} to {}.", chain.airway, from, end.ident);
            self.info(message);
        }
        self.airway_types.extend(chain.airway_types.iter().copied());

        for fix in chain.fixes.into_iter().take(count) {
            let kind = self
                .nav
                .find_navaid(&fix.ident, Some(fix.pos))
                .filter(|n| n.id == fix.id)
                .map(|n| n.kind);
            self.append(ResolvedEntity::AirwayFix {
                fix,
                airway: chain.airway.clone(),
                kind,
            });
        }
    }

    /// Navaid nearest to the last position, then airport, then unresolved.
    fn read_ident(&mut self, ident: &str) {
        let entity = if let Some(navaid) = self.nav.find_navaid(ident, self.last_pos()) {
            let candidates = self.nav.find_navaids(ident).len();
            if candidates > 1 {
                debug!("Ambiguous route item — ident={}, candidates={}", ident, candidates);
                self.info(format!(
                    "{} is ambiguous, {} found. Using the one at {}.",
                    ident, candidates, navaid.pos
                ));
            }
            ResolvedEntity::from_navaid(navaid)
        } else if let Some(airport) = self.find_enroute_airport(ident) {
            ResolvedEntity::Airport(airport)
        } else {
            warn!("Route item not found — ident={}", ident);
            self.report.error(format!("{} not found.", ident));
            ResolvedEntity::Unresolved {
                ident: ident.to_string(),
            }
        };
        debug!("Resolved route item — ident={}, type={:?}", ident, entity.entry_type());
        self.append(entity);
    }

    fn read_coordinate(&mut self, text: &str) {
        let Some(pos) = parse_coordinate(text) else {
            self.report.error(format!("Invalid coordinate {}.", text));
            self.append(ResolvedEntity::Unresolved {
                ident: text.to_string(),
            });
            return;
        };

        if self.options.contains(RouteStringOptions::READ_MATCH_WAYPOINTS) {
            if let Some(navaid) = self.nav.find_nearest_navaid(pos, MATCH_WAYPOINT_MAX_NM) {
                self.info(format!("Coordinate {} matched to {}.", text, navaid.ident));
                self.append(ResolvedEntity::from_navaid(navaid));
                return;
            }
        }
        self.append(ResolvedEntity::User {
            ident: text.to_string(),
            pos,
        });
    }

    /// SID as first item after the departure: `SID`, `SID.TRANS` or `SID TRANS`.
    /// Returns the token index after the procedure.
    fn find_sid(
        &self,
        tokens: &[Token],
        start: usize,
        end: usize,
        airport: &Airport,
    ) -> Option<(usize, Procedure)> {
        let idx = (start..end).find(|&i| tokens[i].kind == TokenKind::Ident)?;
        if (start..idx).any(|i| tokens[i].kind == TokenKind::Coordinate) {
            return None;
        }
        let text = &tokens[idx].text;

        if let Some((name, trans)) = text.split_once('.') {
            return self
                .procedure(airport, name, Some(trans), false)
                .map(|p| (idx + 1, p));
        }
        if let Some(next) = tokens.get(idx + 1).filter(|t| idx + 1 < end && t.is_ident()) {
            if let Some(p) = self.procedure(airport, text, Some(next.text.as_str()), false) {
                return Some((idx + 2, p));
            }
        }
        self.procedure(airport, text, None, false)
            .map(|p| (idx + 1, p))
    }

    /// STAR or approach as last items before the destination: `STAR`,
    /// `STAR.TRANS`, `TRANS.STAR` or two separate words. Returns the token
    /// index where the procedure starts.
    fn find_arrival(
        &self,
        tokens: &[Token],
        start: usize,
        end: usize,
        airport: &Airport,
    ) -> Option<(usize, Procedure)> {
        let idx = (start..end).rev().find(|&i| tokens[i].kind == TokenKind::Ident)?;
        let text = tokens[idx].text.as_str();
        let reversed = self.options.contains(RouteStringOptions::STAR_REV_TRANSITION);

        if let Some((a, b)) = text.split_once('.') {
            let orders = if reversed {
                [(b, a), (a, b)]
            } else {
                [(a, b), (b, a)]
            };
            return orders
                .iter()
                .find_map(|&(name, trans)| self.procedure(airport, name, Some(trans), true))
                .map(|p| (idx, p));
        }

        // Two words, unless the first one is the end of an airway
        let prev = idx
            .checked_sub(1)
            .filter(|&p| p >= start && tokens[p].is_ident())
            .filter(|&p| {
                p == start || !(tokens[p - 1].is_ident() && self.nav.has_airway(&tokens[p - 1].text))
            });
        if let Some(p) = prev {
            let other = tokens[p].text.as_str();
            let orders = if reversed {
                [(text, other), (other, text)]
            } else {
                [(other, text), (text, other)]
            };
            if let Some(proc) = orders
                .iter()
                .find_map(|&(name, trans)| self.procedure(airport, name, Some(trans), true))
            {
                return Some((p, proc));
            }
        }

        self.procedure(airport, text, None, true)
            .map(|p| (idx, p))
    }

    fn procedure(
        &self,
        airport: &Airport,
        name: &str,
        transition: Option<&str>,
        arrival: bool,
    ) -> Option<Procedure> {
        self.nav
            .find_procedure(airport.id, name, transition)
            .filter(|p| p.kind.is_arrival() == arrival)
    }

    fn append_procedure(&mut self, proc: Procedure) {
        let reference = ProcedureRef {
            kind: proc.kind,
            name: proc.name.clone(),
            transition: proc.transition.clone(),
        };
        let label = match proc.kind {
            ProcedureKind::Sid => "SID",
            ProcedureKind::Star => "STAR",
            ProcedureKind::Approach => "Approach",
        };
        match &proc.transition {
            Some(trans) => self.info(format!("{} {} via {}.", label, proc.name, trans)),
            None => self.info(format!("{} {}.", label, proc.name)),
        }

        for leg in proc.legs {
            self.append(ResolvedEntity::ProcedureLeg(leg));
        }
        if proc.kind == ProcedureKind::Sid {
            self.plan.departure_procedure = Some(reference);
        } else {
            self.plan.arrival_procedure = Some(reference);
        }
    }

    fn apply_speeds(&mut self, tokens: &[Token]) {
        for token in tokens
            .iter()
            .filter(|t| t.kind == TokenKind::SpeedAltitude)
        {
            self.apply_speed(token);
        }
    }

    fn apply_speed(&mut self, token: &Token) {
        let Some(tag) = parse_speed_altitude(&token.text) else {
            return;
        };
        if self.speed_seen {
            self.report.warning(format!(
                "Speed and altitude given more than once. Using {}.",
                token.text
            ));
        }
        self.speed_seen = true;

        let knots = tag.speed.knots();
        self.plan.cruise_speed_kts = Some(knots);
        match tag.level {
            CruiseLevel::Vfr => self.plan.flightplan_type = FlightplanType::Vfr,
            level => {
                self.plan.flightplan_type = FlightplanType::Ifr;
                self.plan.cruise_altitude_ft = level.feet();
            }
        }
        self.info(format!(
            "Cruise speed {:.0} kts, altitude {}.",
            knots,
            self.plan
                .cruise_altitude_ft
                .map_or_else(|| "VFR".to_string(), |ft| format!("{} ft", ft))
        ));
    }

    /// Airway class for the cruise altitude known so far.
    fn altitude_class(&self) -> Option<AirwayType> {
        self.plan.cruise_altitude_ft.map(|ft| {
            if ft >= HIGH_ALTITUDE_THRESHOLD_FT {
                AirwayType::Jet
            } else {
                AirwayType::Victor
            }
        })
    }

    /// Sets the route type. Airways resolved before the final altitude was
    /// known are kept as they are.
    fn finish(&mut self) {
        self.plan.route_type = if self.airway_types.is_empty() {
            RouteType::Direct
        } else if let Some(ft) = self.plan.cruise_altitude_ft {
            RouteType::for_altitude(ft)
        } else if self.airway_types.contains(&AirwayType::Jet) {
            RouteType::HighAltitude
        } else {
            RouteType::LowAltitude
        };

        if let Some(class) = self.altitude_class() {
            if self.airway_types.iter().any(|t| !t.allows(class)) {
                debug!(
                    "Airway class differs from cruise altitude, not re-resolving — class={:?}",
                    class
                );
            }
        }
    }

    fn find_enroute_airport(&self, ident: &str) -> Option<Airport> {
        if self.options.contains(RouteStringOptions::READ_NO_AIRPORTS) {
            None
        } else {
            self.nav.find_airport(ident)
        }
    }

    fn airport_at(&self, tokens: &[Token], idx: usize) -> Option<Airport> {
        let token = &tokens[idx];
        if token.is_ident() {
            self.nav.find_airport(&token.text)
        } else {
            None
        }
    }

    fn last_pos(&self) -> Option<Pos> {
        self.plan.entries.iter().rev().find_map(|e| e.pos)
    }

    fn append(&mut self, entity: ResolvedEntity) {
        self.plan.append(entity.into_entry());
    }

    fn info(&mut self, message: String) {
        if self.options.contains(RouteStringOptions::REPORT) {
            self.report.info(message);
        }
    }

    fn fatal(&mut self, message: String) {
        warn!("Cannot read route — {}", message);
        self.plan.clear();
        self.report.clear();
        self.report.fatal(message);
    }
}
