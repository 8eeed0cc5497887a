// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::geo::{BoundingBox, Pos};
use crate::types::{Airport, AirwaySegment, NavId, Navaid, Procedure, ProcedureRecord};
use crate::NavQuery;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavDataError {
    #[error("Navdata file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid navdata JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raw navigation data as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavData {
    #[serde(default)]
    pub airports: Vec<Airport>,
    #[serde(default)]
    pub navaids: Vec<Navaid>,
    #[serde(default)]
    pub airways: Vec<AirwaySegment>,
    #[serde(default)]
    pub procedures: Vec<ProcedureRecord>,
}

/// In-memory navigation database with ident indexes for O(1) lookups.
#[derive(Debug, Default)]
pub struct NavDatabase {
    data: NavData,
    airport_index: HashMap<String, usize>,
    navaid_index: HashMap<String, Vec<usize>>,
    airway_index: HashMap<String, Vec<usize>>,
    procedure_index: HashMap<(NavId, String), usize>,
}

impl NavDatabase {
    pub fn new(data: NavData) -> Self {
        let mut db = Self {
            data,
            ..Default::default()
        };

        for (i, airport) in db.data.airports.iter().enumerate() {
            db.airport_index
                .entry(airport.ident.to_uppercase())
                .or_insert(i);
        }
        for (i, navaid) in db.data.navaids.iter().enumerate() {
            db.navaid_index
                .entry(navaid.ident.to_uppercase())
                .or_default()
                .push(i);
        }
        for (i, segment) in db.data.airways.iter().enumerate() {
            db.airway_index
                .entry(segment.name.to_uppercase())
                .or_default()
                .push(i);
        }
        for (i, proc) in db.data.procedures.iter().enumerate() {
            db.procedure_index
                .entry((proc.airport_id, proc.name.to_uppercase()))
                .or_insert(i);
        }

        log::info!(
            "Built navdata index — airports={} navaids={} airway_segments={} procedures={}",
            db.data.airports.len(),
            db.data.navaids.len(),
            db.data.airways.len(),
            db.data.procedures.len()
        );
        db
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, NavDataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(NavDataError::NotFound(path.to_path_buf()));
        }
        log::debug!("Loading navdata from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, NavDataError> {
        let data: NavData = serde_json::from_reader(reader)?;
        Ok(Self::new(data))
    }

    pub fn from_json_str(json: &str) -> Result<Self, NavDataError> {
        let data: NavData = serde_json::from_str(json)?;
        Ok(Self::new(data))
    }

    pub fn data(&self) -> &NavData {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.airports.is_empty()
            && self.data.navaids.is_empty()
            && self.data.airways.is_empty()
    }
}

impl NavQuery for NavDatabase {
    fn find_airport(&self, ident: &str) -> Option<Airport> {
        self.airport_index
            .get(&ident.to_uppercase())
            .map(|&i| self.data.airports[i].clone())
    }

    fn find_navaids(&self, ident: &str) -> Vec<Navaid> {
        self.navaid_index
            .get(&ident.to_uppercase())
            .map(|indexes| {
                indexes
                    .iter()
                    .map(|&i| self.data.navaids[i].clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn find_nearest_navaid(&self, pos: Pos, max_dist_nm: f64) -> Option<Navaid> {
        let bounds = BoundingBox::around(pos, max_dist_nm);
        self.data
            .navaids
            .iter()
            .filter(|n| bounds.contains(&n.pos))
            .map(|n| (n.pos.distance_nm(&pos), n))
            .filter(|(dist, _)| *dist <= max_dist_nm)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, n)| n.clone())
    }

    fn find_airway_segments(&self, name: &str, from_waypoint_id: NavId) -> Vec<AirwaySegment> {
        let Some(indexes) = self.airway_index.get(&name.to_uppercase()) else {
            return Vec::new();
        };
        let mut segments: Vec<AirwaySegment> = indexes
            .iter()
            .map(|&i| &self.data.airways[i])
            .filter(|s| s.touches(from_waypoint_id))
            .cloned()
            .collect();
        segments.sort_by_key(|s| (s.fragment, s.sequence));
        segments
    }

    fn has_airway(&self, name: &str) -> bool {
        self.airway_index.contains_key(&name.to_uppercase())
    }

    fn find_procedure(
        &self,
        airport_id: NavId,
        name: &str,
        transition: Option<&str>,
    ) -> Option<Procedure> {
        let &i = self
            .procedure_index
            .get(&(airport_id, name.to_uppercase()))?;
        self.data.procedures[i].resolve(transition)
    }
}
