// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Radius search and center-of-mass over a candidate pool.

use studymatch_core::{Coordinate, Profile};

use crate::distance::profile_distance;

/// Profiles within `radius_km` of `center`, excluding the center itself
/// and anyone without a coordinate. Enumeration order is preserved.
///
/// A center without a coordinate matches nobody.
pub fn within_radius<'a>(
    center: &Profile,
    pool: &'a [Profile],
    radius_km: f64,
) -> Vec<&'a Profile> {
    if center.location.is_none() {
        return Vec::new();
    }

    pool.iter()
        .filter(|p| p.id != center.id)
        .filter(|p| p.location.is_some())
        .filter(|p| profile_distance(center, p).is_within(radius_km))
        .collect()
}

/// Profiles sorted ascending by distance from `center` (center excluded).
///
/// When the center has no coordinate the pool is returned unsorted, minus
/// the center, matching the lenient source behavior.
pub fn sorted_by_distance<'a>(center: &Profile, pool: &'a [Profile]) -> Vec<&'a Profile> {
    if center.location.is_none() {
        return pool.iter().filter(|p| p.id != center.id).collect();
    }

    let mut located: Vec<&Profile> = pool
        .iter()
        .filter(|p| p.id != center.id)
        .filter(|p| p.location.is_some())
        .collect();

    located.sort_by(|a, b| {
        let da = profile_distance(center, a).km().unwrap_or(f64::INFINITY);
        let db = profile_distance(center, b).km().unwrap_or(f64::INFINITY);
        da.total_cmp(&db)
    });

    located
}

/// Arithmetic mean of latitude and longitude over the profiles with a
/// known coordinate. An empty subset yields (0, 0).
pub fn center_point(pool: &[Profile]) -> Coordinate {
    let located: Vec<Coordinate> = pool.iter().filter_map(|p| p.location).collect();

    if located.is_empty() {
        return Coordinate {
            latitude: 0.0,
            longitude: 0.0,
        };
    }

    let n = located.len() as f64;
    Coordinate {
        latitude: located.iter().map(|c| c.latitude).sum::<f64>() / n,
        longitude: located.iter().map(|c| c.longitude).sum::<f64>() / n,
    }
}
