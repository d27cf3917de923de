// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Geospatial proximity math over profile coordinates.
//!
//! Pure functions only: haversine distance, nearby checks with an explicit
//! "unavailable" sentinel, human-readable distance buckets, radius search,
//! and center-of-mass. A missing coordinate is never an error here; it
//! simply yields [`Distance::Unavailable`], which every predicate treats
//! as not nearby.

pub mod distance;
pub mod search;

pub use distance::{
    Distance, EARTH_RADIUS_KM, NEARBY_DEFAULT_KM, are_nearby, between, haversine_km,
    profile_distance,
};
pub use search::{center_point, sorted_by_distance, within_radius};
