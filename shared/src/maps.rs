//! Links that open a capture location in an external maps application.

use thiserror::Error;
use url::Url;

use crate::capabilities::Coordinates;
use crate::MAPS_SEARCH_BASE_URL;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MapsLinkError {
    /// A zero latitude or longitude means the fix never arrived.
    #[error("no location data")]
    NoLocationData,

    #[error("coordinates out of range: lat={latitude}, lng={longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Only reachable if `MAPS_SEARCH_BASE_URL` stops being an absolute URL.
    #[error("invalid maps base url: {0}")]
    InvalidBase(#[from] url::ParseError),
}

/// Whether `coords` carry a usable position. Zero in either axis counts as missing.
#[must_use]
pub fn has_location_data(coords: &Coordinates) -> bool {
    coords.latitude != 0.0 && coords.longitude != 0.0
}

/// Builds `<base>?api=1&query=<lat>,<lng>`.
///
/// The coordinates are written with Rust's shortest round-trip float formatting,
/// so `37.7749` stays `37.7749` and the comma is not percent-encoded.
pub fn maps_search_url(coords: &Coordinates) -> Result<Url, MapsLinkError> {
    if !has_location_data(coords) {
        return Err(MapsLinkError::NoLocationData);
    }
    let coords = coords
        .validated()
        .map_err(|_| MapsLinkError::InvalidCoordinates {
            latitude: coords.latitude,
            longitude: coords.longitude,
        })?;

    let mut url = Url::parse(MAPS_SEARCH_BASE_URL)?;
    url.set_query(Some(&format!(
        "api=1&query={},{}",
        coords.latitude, coords.longitude
    )));
    Ok(url)
}
