// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};

/// Mean earth radius in nautical miles.
const EARTH_RADIUS_NM: f64 = 3440.06;

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pos {
    pub lon: f64,
    pub lat: f64,
}

impl Pos {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Great circle distance (haversine).
    pub fn distance_nm(&self, other: &Pos) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_NM * c
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ns = if self.lat < 0.0 { 'S' } else { 'N' };
        let ew = if self.lon < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{}{:.4} {}{:.4}",
            ns,
            self.lat.abs(),
            ew,
            self.lon.abs()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Box enclosing a circle of `radius_nm` around `center`. Used as a cheap
    /// prefilter before the exact distance check.
    pub fn around(center: Pos, radius_nm: f64) -> Self {
        let d_lat = radius_nm / 60.0;
        let cos_lat = center.lat.to_radians().cos().abs().max(0.01);
        let d_lon = (radius_nm / (60.0 * cos_lat)).min(180.0);
        Self {
            min_lat: center.lat - d_lat,
            max_lat: center.lat + d_lat,
            min_lon: center.lon - d_lon,
            max_lon: center.lon + d_lon,
        }
    }

    pub fn contains(&self, pos: &Pos) -> bool {
        pos.lat >= self.min_lat
            && pos.lat <= self.max_lat
            && pos.lon >= self.min_lon
            && pos.lon <= self.max_lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_jfk_bos() {
        let jfk = Pos::new(-73.7781, 40.6413);
        let bos = Pos::new(-71.0096, 42.3656);
        let d = jfk.distance_nm(&bos);
        // Roughly 162 nm
        assert!(d > 155.0 && d < 170.0, "got {}", d);
    }

    #[test]
    fn test_distance_zero() {
        let p = Pos::new(8.5, 50.0);
        assert!(p.distance_nm(&p) < 1e-9);
    }

    #[test]
    fn test_validity() {
        assert!(Pos::new(-71.0, 42.0).is_valid());
        assert!(!Pos::new(-200.0, 42.0).is_valid());
        assert!(!Pos::new(f64::NAN, 42.0).is_valid());
    }

    #[test]
    fn test_bounding_box_around() {
        let center = Pos::new(-71.0, 42.0);
        let b = BoundingBox::around(center, 60.0);
        assert!(b.contains(&center));
        assert!(b.contains(&Pos::new(-71.0, 42.9)));
        assert!(!b.contains(&Pos::new(-71.0, 43.1)));
        // One degree of longitude is shorter than 60 nm at 42N
        assert!(b.contains(&Pos::new(-72.2, 42.0)));
    }
}
