// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! nom parsers for the numeric items of a route description: the
//! speed/level tag (`N0450F350`) and geographic coordinates (`4510N07530W`).

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while_m_n};
use nom::character::complete::one_of;
use nom::combinator::{all_consuming, map, map_res, value};
use nom::sequence::{pair, preceded, tuple};
use nom::IResult;
use routestr_nav::Pos;

const FEET_PER_METER: f64 = 3.28084;
const KNOTS_PER_KMH: f32 = 1.0 / 1.852;
/// Speed of sound at sea level in standard atmosphere.
const KNOTS_PER_MACH: f32 = 661.47;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CruiseSpeed {
    Knots(u32),
    KmH(u32),
    /// Hundredths of Mach, "M082" = 0.82
    Mach(u32),
}

impl CruiseSpeed {
    pub fn knots(&self) -> f32 {
        match *self {
            CruiseSpeed::Knots(kts) => kts as f32,
            CruiseSpeed::KmH(kmh) => kmh as f32 * KNOTS_PER_KMH,
            CruiseSpeed::Mach(mach) => mach as f32 / 100.0 * KNOTS_PER_MACH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CruiseLevel {
    /// "F350"
    FlightLevel(u32),
    /// Hundreds of feet, "A045"
    Altitude(u32),
    /// Metric flight level in tens of meters, "S1130"
    MetricLevel(u32),
    /// Tens of meters, "M0840"
    MetricAltitude(u32),
    Vfr,
}

impl CruiseLevel {
    /// Level in feet, `None` for VFR.
    pub fn feet(&self) -> Option<i32> {
        match *self {
            CruiseLevel::FlightLevel(v) | CruiseLevel::Altitude(v) => Some(v as i32 * 100),
            CruiseLevel::MetricLevel(v) | CruiseLevel::MetricAltitude(v) => {
                Some((v as f64 * 10.0 * FEET_PER_METER).round() as i32)
            }
            CruiseLevel::Vfr => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedAltitude {
    pub speed: CruiseSpeed,
    pub level: CruiseLevel,
}

fn digits<'a>(count: usize) -> impl FnMut(&'a str) -> IResult<&'a str, u32> {
    map_res(
        take_while_m_n(count, count, |c: char| c.is_ascii_digit()),
        |s: &str| s.parse::<u32>(),
    )
}

fn speed(input: &str) -> IResult<&str, CruiseSpeed> {
    alt((
        map(preceded(tag("N"), digits(4)), CruiseSpeed::Knots),
        map(preceded(tag("K"), digits(4)), CruiseSpeed::KmH),
        map(preceded(tag("M"), digits(3)), CruiseSpeed::Mach),
    ))(input)
}

fn level(input: &str) -> IResult<&str, CruiseLevel> {
    alt((
        map(preceded(tag("F"), digits(3)), CruiseLevel::FlightLevel),
        map(preceded(tag("A"), digits(3)), CruiseLevel::Altitude),
        map(preceded(tag("S"), digits(4)), CruiseLevel::MetricLevel),
        map(preceded(tag("M"), digits(4)), CruiseLevel::MetricAltitude),
        value(CruiseLevel::Vfr, tag("VFR")),
    ))(input)
}

/// Parses an uppercase speed/level tag like "N0450F350" or "M082F390".
pub fn parse_speed_altitude(input: &str) -> Option<SpeedAltitude> {
    all_consuming(pair(speed, level))(input)
        .ok()
        .map(|(_, (speed, level))| SpeedAltitude { speed, level })
}

/// Formats the tag written for a plan: knots and flight level.
pub fn format_speed_altitude(speed_kts: f32, altitude_ft: i32) -> String {
    let kts = speed_kts.round().clamp(0.0, 9999.0) as u32;
    let fl = ((altitude_ft.max(0) as f32) / 100.0).round().clamp(0.0, 999.0) as u32;
    format!("N{:04}F{:03}", kts, fl)
}

/// Tag for a VFR plan without a cruise level, "N0110VFR".
pub fn format_speed_vfr(speed_kts: f32) -> String {
    format!("N{:04}VFR", speed_kts.round().clamp(0.0, 9999.0) as u32)
}

fn hemisphere_sign(c: char) -> f64 {
    if c == 'S' || c == 'W' {
        -1.0
    } else {
        1.0
    }
}

/// "4510N07530W"
fn coord_deg_min(input: &str) -> IResult<&str, Pos> {
    map_res(
        tuple((
            digits(2),
            digits(2),
            one_of("NS"),
            digits(3),
            digits(2),
            one_of("EW"),
        )),
        |(lat_d, lat_m, ns, lon_d, lon_m, ew)| {
            if lat_m >= 60 || lon_m >= 60 {
                return Err("minutes out of range");
            }
            let lat = (lat_d as f64 + lat_m as f64 / 60.0) * hemisphere_sign(ns);
            let lon = (lon_d as f64 + lon_m as f64 / 60.0) * hemisphere_sign(ew);
            Ok(Pos::new(lon, lat))
        },
    )(input)
}

/// "45N075W"
fn coord_deg(input: &str) -> IResult<&str, Pos> {
    map(
        tuple((digits(2), one_of("NS"), digits(3), one_of("EW"))),
        |(lat_d, ns, lon_d, ew)| {
            Pos::new(
                lon_d as f64 * hemisphere_sign(ew),
                lat_d as f64 * hemisphere_sign(ns),
            )
        },
    )(input)
}

/// Parses an uppercase coordinate item. Out of range values yield `None`.
pub fn parse_coordinate(input: &str) -> Option<Pos> {
    all_consuming(alt((coord_deg_min, coord_deg)))(input)
        .ok()
        .map(|(_, pos)| pos)
        .filter(|pos| pos.is_valid())
}
