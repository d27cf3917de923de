// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Haversine distance and the unavailable-distance sentinel.

use serde::{Deserialize, Serialize};

use studymatch_core::{Coordinate, Profile};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default radius for "in the same general area" checks.
pub const NEARBY_DEFAULT_KM: f64 = 5.0;

/// A distance between two users.
///
/// `Unavailable` replaces the source's MAX_VALUE sentinel: it cannot be
/// mistaken for a real distance and compares as not-nearby everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Distance {
    /// Great-circle distance in kilometers.
    Km(f64),
    /// At least one side has no coordinate on file.
    Unavailable,
}

impl Distance {
    /// The numeric distance, if known.
    pub fn km(&self) -> Option<f64> {
        match self {
            Distance::Km(km) => Some(*km),
            Distance::Unavailable => None,
        }
    }

    /// True when the distance is known and at most `max_km`.
    /// Unavailable distances are never within any radius.
    pub fn is_within(&self, max_km: f64) -> bool {
        match self {
            Distance::Km(km) => *km <= max_km,
            Distance::Unavailable => false,
        }
    }

    /// Human-readable bucket: unavailable, "very close" under 0.5 km,
    /// one-decimal km under 10 km, rounded integer km beyond.
    pub fn description(&self) -> String {
        match self {
            Distance::Unavailable => "Location not available".to_string(),
            Distance::Km(km) if *km < 0.5 => {
                "Very close (less than 0.5 km)".to_string()
            }
            Distance::Km(km) if *km < 10.0 => format!("{km:.1} km away"),
            Distance::Km(km) => format!("{km:.0} km away"),
        }
    }
}

/// Great-circle distance between two coordinates.
///
/// `a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)`,
/// `d = 2·R·atan2(√a, √(1-a))`.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance between two optional coordinates.
pub fn between(from: Option<Coordinate>, to: Option<Coordinate>) -> Distance {
    match (from, to) {
        (Some(from), Some(to)) => Distance::Km(haversine_km(from, to)),
        _ => Distance::Unavailable,
    }
}

/// Distance between two profiles.
pub fn profile_distance(a: &Profile, b: &Profile) -> Distance {
    between(a.location, b.location)
}

/// True when both profiles have coordinates and are at most `max_km` apart.
pub fn are_nearby(a: &Profile, b: &Profile, max_km: f64) -> bool {
    profile_distance(a, b).is_within(max_km)
}

#[cfg(test)]
mod tests {
    use super::*;
    use studymatch_core::{UserId, WeeklyAvailability};
    use uuid::Uuid;

    fn profile_at(n: u128, location: Option<Coordinate>) -> Profile {
        Profile {
            id: UserId(Uuid::from_u128(n)),
            display_name: format!("user-{n}"),
            major: None,
            study_year: None,
            classes: Default::default(),
            goals: Default::default(),
            study_style: None,
            location,
            availability: WeeklyAvailability::default(),
            prefers_groups: false,
            profile_completed: true,
        }
    }

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate {
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn distance_to_self_is_zero() {
        let c = coord(47.6062, -122.3321);
        assert!(haversine_km(c, c).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = coord(47.6062, -122.3321); // Seattle
        let b = coord(45.5152, -122.6784); // Portland
        let d1 = haversine_km(a, b);
        let d2 = haversine_km(b, a);
        assert!((d1 - d2).abs() < 1e-9);
        // Roughly 235 km between the two cities.
        assert!((200.0..270.0).contains(&d1), "got {d1}");
    }

    #[test]
    fn missing_coordinate_yields_unavailable() {
        let here = profile_at(1, Some(coord(47.0, -122.0)));
        let nowhere = profile_at(2, None);
        assert_eq!(profile_distance(&here, &nowhere), Distance::Unavailable);
        assert_eq!(profile_distance(&nowhere, &here), Distance::Unavailable);
        assert!(!are_nearby(&here, &nowhere, f64::MAX));
    }

    #[test]
    fn unavailable_is_never_within() {
        assert!(!Distance::Unavailable.is_within(10.0));
        assert_eq!(Distance::Unavailable.km(), None);
    }

    #[test]
    fn nearby_respects_threshold() {
        let a = profile_at(1, Some(coord(47.6062, -122.3321)));
        // ~1.1 km north of a.
        let b = profile_at(2, Some(coord(47.6162, -122.3321)));
        assert!(are_nearby(&a, &b, NEARBY_DEFAULT_KM));
        assert!(!are_nearby(&a, &b, 0.5));
    }

    #[test]
    fn description_buckets() {
        assert_eq!(
            Distance::Unavailable.description(),
            "Location not available"
        );
        assert_eq!(
            Distance::Km(0.2).description(),
            "Very close (less than 0.5 km)"
        );
        assert_eq!(Distance::Km(0.74).description(), "0.7 km away");
        assert_eq!(Distance::Km(3.25).description(), "3.2 km away");
        assert_eq!(Distance::Km(9.99).description(), "10.0 km away");
        assert_eq!(Distance::Km(23.4).description(), "23 km away");
        assert_eq!(Distance::Km(23.6).description(), "24 km away");
    }
}
