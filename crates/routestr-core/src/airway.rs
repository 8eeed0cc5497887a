// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Airway chain search over the segment graph exposed by [`NavQuery`].

use log::debug;
use routestr_nav::{AirwayFix, AirwaySegment, AirwayType, NavId, NavQuery};
use std::collections::{HashMap, HashSet, VecDeque};

/// Upper bound of fixes visited in one search.
const MAX_VISITED_FIXES: usize = 2000;

/// Fixes reached along an airway, excluding the start fix and including the end fix.
#[derive(Debug, Clone, PartialEq)]
pub struct AirwayChain {
    pub airway: String,
    pub fixes: Vec<AirwayFix>,
    pub airway_types: Vec<AirwayType>,
}

impl AirwayChain {
    pub fn end(&self) -> Option<&AirwayFix> {
        self.fixes.last()
    }
}

/// Breadth-first search along `airway` from fix `from_id` to the first fix
/// accepted by `is_target`.
///
/// Segments matching `class` are tried first. If no chain exists in that
/// class the search is repeated with all segments.
pub fn find_chain<F>(
    nav: &dyn NavQuery,
    airway: &str,
    from_id: NavId,
    class: Option<AirwayType>,
    is_target: F,
) -> Option<AirwayChain>
where
    F: Fn(&AirwayFix) -> bool,
{
    if let Some(class) = class {
        if let Some(chain) = search(nav, airway, from_id, Some(class), &is_target) {
            return Some(chain);
        }
        debug!(
            "No {:?} chain on airway, retrying with all segments — airway={}",
            class, airway
        );
    }
    search(nav, airway, from_id, None, &is_target)
}

fn search<F>(
    nav: &dyn NavQuery,
    airway: &str,
    from_id: NavId,
    class: Option<AirwayType>,
    is_target: &F,
) -> Option<AirwayChain>
where
    F: Fn(&AirwayFix) -> bool,
{
    // fix id -> (fix, predecessor id, segment type)
    let mut parents: HashMap<NavId, (AirwayFix, NavId, AirwayType)> = HashMap::new();
    let mut visited: HashSet<NavId> = HashSet::from([from_id]);
    let mut queue: VecDeque<NavId> = VecDeque::from([from_id]);

    while let Some(current) = queue.pop_front() {
        if visited.len() > MAX_VISITED_FIXES {
            debug!("Airway search limit reached — airway={}", airway);
            return None;
        }

        for segment in nav.find_airway_segments(airway, current) {
            if let Some(class) = class {
                if !segment.airway_type.allows(class) {
                    continue;
                }
            }
            let Some(next) = segment.other_end(current) else {
                continue;
            };
            if !visited.insert(next.id) {
                continue;
            }
            parents.insert(next.id, (next.clone(), current, segment.airway_type));
            if is_target(next) {
                return Some(build_chain(airway, from_id, next.id, &parents));
            }
            queue.push_back(next.id);
        }
    }
    None
}

fn build_chain(
    airway: &str,
    from_id: NavId,
    end_id: NavId,
    parents: &HashMap<NavId, (AirwayFix, NavId, AirwayType)>,
) -> AirwayChain {
    let mut fixes = Vec::new();
    let mut airway_types = Vec::new();
    let mut id = end_id;
    while id != from_id {
        let Some((fix, parent, airway_type)) = parents.get(&id) else {
            break;
        };
        fixes.push(fix.clone());
        airway_types.push(*airway_type);
        id = *parent;
    }
    fixes.reverse();
    airway_types.reverse();
    AirwayChain {
        airway: airway.to_string(),
        fixes,
        airway_types,
    }
}

/// Segment of `airway` directly connecting the two fixes, if any.
pub fn connecting_segment(
    nav: &dyn NavQuery,
    airway: &str,
    from_id: NavId,
    to_id: NavId,
) -> Option<AirwaySegment> {
    nav.find_airway_segments(airway, from_id)
        .into_iter()
        .find(|s| s.other_end(from_id).map(|f| f.id) == Some(to_id))
}
