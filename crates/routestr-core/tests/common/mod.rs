// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Small navdata set around New York and Boston.
//!
//! J121 is a single high segment MERIT-KBOS. V3 runs MERIT-HFD-PUT-BOS with a
//! second, disconnected fragment CANDR-GREKI. DEEZZ5 departs KJFK, ROBUC3
//! arrives at KBOS. A second HFD, an NDB in Germany, shares the VOR's ident.

#![allow(dead_code)]

use routestr_core::Flightplan;
use routestr_nav::NavDatabase;
use simplelog::{Config, LevelFilter, TestLogger};

pub const NAVDATA: &str = r#"{
  "airports": [
    { "id": 1, "ident": "KJFK", "name": "John F Kennedy Intl", "pos": { "lon": -73.7781, "lat": 40.6413 } },
    { "id": 2, "ident": "KBOS", "name": "General Edward Lawrence Logan Intl", "pos": { "lon": -71.0096, "lat": 42.3656 } },
    { "id": 3, "ident": "KBDL", "name": "Bradley Intl", "pos": { "lon": -72.6832, "lat": 41.9389 } },
    { "id": 4, "ident": "KPVD", "name": "Theodore Francis Green State", "pos": { "lon": -71.4282, "lat": 41.7240 } }
  ],
  "navaids": [
    { "id": 10, "ident": "MERIT", "region": "K6", "kind": "Waypoint", "pos": { "lon": -73.1, "lat": 41.3 } },
    { "id": 11, "ident": "HFD", "region": "K6", "kind": "Vor", "pos": { "lon": -72.6491, "lat": 41.641 } },
    { "id": 12, "ident": "PUT", "region": "K6", "kind": "Vor", "pos": { "lon": -71.9, "lat": 41.95 } },
    { "id": 13, "ident": "BOS", "region": "K6", "kind": "Vor", "pos": { "lon": -70.9897, "lat": 42.3573 } },
    { "id": 14, "ident": "GREKI", "region": "K6", "kind": "Waypoint", "pos": { "lon": -73.5, "lat": 41.5 } },
    { "id": 15, "ident": "ROBUC", "region": "K6", "kind": "Waypoint", "pos": { "lon": -70.55, "lat": 42.85 } },
    { "id": 16, "ident": "CANDR", "region": "K6", "kind": "Waypoint", "pos": { "lon": -73.5, "lat": 40.9 } },
    { "id": 17, "ident": "HFD", "region": "ED", "kind": "Ndb", "pos": { "lon": 8.5, "lat": 50.0 } }
  ],
  "airways": [
    {
      "id": 100, "name": "J121", "airway_type": "Jet", "sequence": 1,
      "from": { "id": 10, "ident": "MERIT", "pos": { "lon": -73.1, "lat": 41.3 } },
      "to": { "id": 2, "ident": "KBOS", "pos": { "lon": -71.0096, "lat": 42.3656 } }
    },
    {
      "id": 200, "name": "V3", "airway_type": "Victor", "sequence": 1,
      "from": { "id": 10, "ident": "MERIT", "pos": { "lon": -73.1, "lat": 41.3 } },
      "to": { "id": 11, "ident": "HFD", "pos": { "lon": -72.6491, "lat": 41.641 } }
    },
    {
      "id": 201, "name": "V3", "airway_type": "Victor", "sequence": 2,
      "from": { "id": 11, "ident": "HFD", "pos": { "lon": -72.6491, "lat": 41.641 } },
      "to": { "id": 12, "ident": "PUT", "pos": { "lon": -71.9, "lat": 41.95 } }
    },
    {
      "id": 202, "name": "V3", "airway_type": "Victor", "sequence": 3,
      "from": { "id": 12, "ident": "PUT", "pos": { "lon": -71.9, "lat": 41.95 } },
      "to": { "id": 13, "ident": "BOS", "pos": { "lon": -70.9897, "lat": 42.3573 } }
    },
    {
      "id": 210, "name": "V3", "airway_type": "Victor", "fragment": 1, "sequence": 1,
      "from": { "id": 16, "ident": "CANDR", "pos": { "lon": -73.5, "lat": 40.9 } },
      "to": { "id": 14, "ident": "GREKI", "pos": { "lon": -73.5, "lat": 41.5 } }
    }
  ],
  "procedures": [
    {
      "airport_id": 1, "kind": "Sid", "name": "DEEZZ5",
      "legs": [
        { "ident": "CANDR", "nav_id": 16, "pos": { "lon": -73.5, "lat": 40.9 } },
        { "ident": "MERIT", "nav_id": 10, "pos": { "lon": -73.1, "lat": 41.3 } }
      ],
      "transitions": [
        { "name": "HFD", "legs": [ { "ident": "HFD", "nav_id": 11, "pos": { "lon": -72.6491, "lat": 41.641 } } ] }
      ]
    },
    {
      "airport_id": 2, "kind": "Star", "name": "ROBUC3",
      "legs": [
        { "ident": "ROBUC", "nav_id": 15, "pos": { "lon": -70.55, "lat": 42.85 } }
      ],
      "transitions": [
        { "name": "PUT", "legs": [ { "ident": "PUT", "nav_id": 12, "pos": { "lon": -71.9, "lat": 41.95 } } ] }
      ]
    }
  ]
}"#;

pub const PROCEDURE_NAMES: [&str; 2] = ["DEEZZ5", "ROBUC3"];

pub fn navdata() -> NavDatabase {
    // Only the first call installs the logger
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
    NavDatabase::from_json_str(NAVDATA).expect("fixture navdata must parse")
}

pub fn idents(plan: &Flightplan) -> Vec<&str> {
    plan.idents()
}
