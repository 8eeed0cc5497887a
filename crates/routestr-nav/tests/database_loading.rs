// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz
//
// Loading navdata JSON from disk and querying it through the NavQuery trait.

use routestr_nav::{NavDatabase, NavQuery, Pos, ProcedureKind};
use std::io::Write;
use tempfile::NamedTempFile;

const NAVDATA: &str = r#"{
  "airports": [
    { "id": 1, "ident": "KJFK", "name": "John F Kennedy Intl", "pos": { "lon": -73.7781, "lat": 40.6413 } },
    { "id": 2, "ident": "KBOS", "pos": { "lon": -71.0096, "lat": 42.3656 } }
  ],
  "navaids": [
    { "id": 10, "ident": "MERIT", "kind": "Waypoint", "pos": { "lon": -73.1, "lat": 41.1 } },
    { "id": 11, "ident": "BOS", "region": "K6", "kind": "Vor", "pos": { "lon": -70.99, "lat": 42.36 } }
  ],
  "airways": [
    {
      "id": 100, "name": "J121", "airway_type": "Jet", "sequence": 1,
      "from": { "id": 10, "ident": "MERIT", "pos": { "lon": -73.1, "lat": 41.1 } },
      "to": { "id": 11, "ident": "BOS", "pos": { "lon": -70.99, "lat": 42.36 } }
    }
  ],
  "procedures": [
    {
      "airport_id": 2, "kind": "Star", "name": "ROBUC3",
      "legs": [ { "ident": "ROBUC", "pos": { "lon": -70.5, "lat": 42.8 } } ],
      "transitions": [
        { "name": "ENE", "legs": [ { "ident": "ENE", "pos": { "lon": -70.0, "lat": 43.4 } } ] }
      ]
    }
  ]
}"#;

#[test]
fn test_load_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{}", NAVDATA)?;

    let db = NavDatabase::from_json_file(file.path())?;
    assert!(!db.is_empty());
    assert_eq!(db.data().airports.len(), 2);

    let jfk = db.find_airport("kjfk").expect("KJFK missing");
    assert_eq!(jfk.name, "John F Kennedy Intl");
    // Name is optional in the file
    assert_eq!(db.find_airport("KBOS").unwrap().name, "");
    Ok(())
}

#[test]
fn test_airway_and_procedure_queries() {
    let db = NavDatabase::from_json_str(NAVDATA).unwrap();

    let segments = db.find_airway_segments("j121", 10);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].other_end(10).unwrap().ident, "BOS");

    let star = db.find_procedure(2, "robuc3", Some("ENE")).unwrap();
    assert_eq!(star.kind, ProcedureKind::Star);
    let legs: Vec<_> = star.legs.iter().map(|l| l.ident.as_str()).collect();
    assert_eq!(legs, vec!["ENE", "ROBUC"]);

    // Procedures are scoped to their airport
    assert!(db.find_procedure(1, "ROBUC3", None).is_none());
}

#[test]
fn test_navaid_lookup_without_reference() {
    let db = NavDatabase::from_json_str(NAVDATA).unwrap();
    let bos = db.find_navaid("BOS", None).unwrap();
    assert_eq!(bos.id, 11);
    assert!(db.find_navaid("NOPE", Some(Pos::new(0.0, 0.0))).is_none());
}
