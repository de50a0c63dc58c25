//! Geographic primitives used by shelter search.
//!
//! Distances are great-circle distances on a spherical Earth using the
//! haversine formula with the IUGG mean radius.

use std::cmp::Ordering;

use super::shelter::Shelter;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;
/// Search radius used when the caller does not supply one.
pub const DEFAULT_MAX_DISTANCE_METERS: f64 = 5_000.0;
/// Result count used when the caller does not supply one.
pub const DEFAULT_NEARBY_LIMIT: usize = 10;
/// Upper bound applied to caller-supplied limits.
pub const MAX_NEARBY_LIMIT: usize = 100;

/// Errors raised while validating coordinates or search parameters.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeoValidationError {
    #[error("latitude must be a finite value between -90 and 90")]
    LatitudeOutOfRange,
    #[error("longitude must be a finite value between -180 and 180")]
    LongitudeOutOfRange,
    #[error("maxDistance must be a positive, finite number of metres")]
    InvalidMaxDistance,
}

impl GeoValidationError {
    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::LatitudeOutOfRange => "latitude",
            Self::LongitudeOutOfRange => "longitude",
            Self::InvalidMaxDistance => "maxDistance",
        }
    }
}

/// WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validate and construct a coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoValidationError::LatitudeOutOfRange);
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoValidationError::LongitudeOutOfRange);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in metres.
    ///
    /// # Examples
    /// ```
    /// use shelter_backend::domain::Coordinates;
    ///
    /// let seoul = Coordinates::new(37.5665, 126.9780).expect("valid");
    /// assert_eq!(seoul.distance_to(&seoul), 0.0);
    /// ```
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let phi1 = self.latitude.to_radians();
        let phi2 = other.latitude.to_radians();
        let d_phi = (other.latitude - self.latitude).to_radians();
        let d_lambda = (other.longitude - self.longitude).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_METERS * c
    }
}

/// Validated parameters of a nearby-shelter search.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    origin: Coordinates,
    max_distance_meters: f64,
    limit: usize,
    min_capacity: Option<u32>,
    shelter_types: Vec<String>,
}

impl NearbyQuery {
    /// Build a query, applying defaults and clamping `limit` to `1..=100`.
    pub fn new(
        origin: Coordinates,
        max_distance_meters: Option<f64>,
        limit: Option<usize>,
    ) -> Result<Self, GeoValidationError> {
        let max_distance_meters = max_distance_meters.unwrap_or(DEFAULT_MAX_DISTANCE_METERS);
        if !max_distance_meters.is_finite() || max_distance_meters <= 0.0 {
            return Err(GeoValidationError::InvalidMaxDistance);
        }
        let limit = limit
            .unwrap_or(DEFAULT_NEARBY_LIMIT)
            .clamp(1, MAX_NEARBY_LIMIT);
        Ok(Self {
            origin,
            max_distance_meters,
            limit,
            min_capacity: None,
            shelter_types: Vec::new(),
        })
    }

    /// Only return shelters holding at least `capacity` people.
    #[must_use]
    pub fn with_min_capacity(mut self, capacity: Option<u32>) -> Self {
        self.min_capacity = capacity;
        self
    }

    /// Only return shelters whose type matches one of `types`
    /// (case-insensitive). Blank entries are ignored.
    #[must_use]
    pub fn with_shelter_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.shelter_types = types
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    pub fn origin(&self) -> &Coordinates {
        &self.origin
    }

    pub fn max_distance_meters(&self) -> f64 {
        self.max_distance_meters
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn min_capacity(&self) -> Option<u32> {
        self.min_capacity
    }

    pub fn shelter_types(&self) -> &[String] {
        &self.shelter_types
    }

    fn admits(&self, shelter: &Shelter) -> bool {
        if self
            .min_capacity
            .is_some_and(|min| shelter.capacity() < min)
        {
            return false;
        }
        if self.shelter_types.is_empty() {
            return true;
        }
        shelter.shelter_type().is_some_and(|kind| {
            let kind = kind.to_lowercase();
            self.shelter_types.iter().any(|wanted| *wanted == kind)
        })
    }
}

/// Shelter annotated with its distance from the search origin.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyShelter {
    pub shelter: Shelter,
    pub distance_meters: f64,
}

/// Filter `shelters` by the query and order them nearest first.
///
/// Ties on distance fall back to the shelter id so results are stable.
pub fn rank_nearby<I>(shelters: I, query: &NearbyQuery) -> Vec<NearbyShelter>
where
    I: IntoIterator<Item = Shelter>,
{
    let mut ranked: Vec<NearbyShelter> = shelters
        .into_iter()
        .filter(|shelter| query.admits(shelter))
        .map(|shelter| {
            let distance_meters = query.origin.distance_to(shelter.location());
            NearbyShelter {
                shelter,
                distance_meters,
            }
        })
        .filter(|nearby| nearby.distance_meters <= query.max_distance_meters)
        .collect();

    ranked.sort_by(|a, b| {
        a.distance_meters
            .partial_cmp(&b.distance_meters)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.shelter.id().as_uuid().cmp(b.shelter.id().as_uuid()))
    });
    ranked.truncate(query.limit);
    ranked
}
