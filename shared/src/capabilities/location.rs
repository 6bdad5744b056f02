use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PermissionResponse;

pub const DEFAULT_POSITION_TIMEOUT_MS: u64 = 30_000;
pub const MIN_POSITION_TIMEOUT_MS: u64 = 1_000;
pub const MAX_POSITION_TIMEOUT_MS: u64 = 120_000;

#[derive(Clone)]
pub struct Location<E> {
    context: CapabilityContext<LocationOperation, E>,
}

impl<Ev> Capability<Ev> for Location<Ev> {
    type Operation = LocationOperation;
    type MappedSelf<MappedEv> = Location<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Location::new(self.context.map_event(f))
    }
}

impl<E> Location<E>
where
    E: 'static,
{
    pub fn new(context: CapabilityContext<LocationOperation, E>) -> Self {
        Self { context }
    }

    /// Asks for location access while the app is in the foreground only.
    pub fn request_foreground_permission<F>(&self, callback: F)
    where
        F: FnOnce(LocationResult) -> E + Send + 'static,
    {
        self.request(LocationOperation::RequestForegroundPermission, callback);
    }

    pub fn get_current_position<F>(&self, options: PositionOptions, callback: F)
    where
        F: FnOnce(LocationResult) -> E + Send + 'static,
    {
        let options = options.validated();
        self.request(LocationOperation::GetCurrentPosition { options }, callback);
    }

    fn request<F>(&self, operation: LocationOperation, callback: F)
    where
        F: FnOnce(LocationResult) -> E + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let result = context.request_from_shell(operation).await;
            context.update_app(callback(result));
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LocationOperation {
    RequestForegroundPermission,
    GetCurrentPosition { options: PositionOptions },
}

impl Operation for LocationOperation {
    type Output = LocationResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocationAccuracy {
    Lowest,
    Low,
    #[default]
    Balanced,
    High,
    Highest,
    BestForNavigation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PositionOptions {
    pub accuracy: LocationAccuracy,
    /// Accept a cached fix no older than this. `None` always asks for a fresh one.
    pub max_age_ms: Option<u64>,
    pub timeout_ms: u64,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            accuracy: LocationAccuracy::Balanced,
            max_age_ms: None,
            timeout_ms: DEFAULT_POSITION_TIMEOUT_MS,
        }
    }
}

impl PositionOptions {
    #[must_use]
    pub fn with_accuracy(mut self, accuracy: LocationAccuracy) -> Self {
        self.accuracy = accuracy;
        self
    }

    #[must_use]
    pub fn with_max_age_ms(mut self, max_age_ms: u64) -> Self {
        self.max_age_ms = Some(max_age_ms);
        self
    }

    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms.clamp(MIN_POSITION_TIMEOUT_MS, MAX_POSITION_TIMEOUT_MS);
        self
    }

    #[must_use]
    pub fn validated(mut self) -> Self {
        self.timeout_ms = self
            .timeout_ms
            .clamp(MIN_POSITION_TIMEOUT_MS, MAX_POSITION_TIMEOUT_MS);
        self
    }
}

/// A position fix reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accuracy_m: Option<f64>,
    #[serde(default)]
    pub altitude_m: Option<f64>,
    #[serde(default)]
    pub timestamp_ms: Option<u64>,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        let coords = Self {
            latitude,
            longitude,
            accuracy_m: None,
            altitude_m: None,
            timestamp_ms: None,
        };
        coords.validated()
    }

    pub fn validated(self) -> Result<Self, LocationError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(LocationError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude)
        {
            return Err(LocationError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum LocationOutput {
    Permission(PermissionResponse),
    Position(Coordinates),
}

impl LocationOutput {
    #[must_use]
    pub fn permission(&self) -> Option<PermissionResponse> {
        match self {
            Self::Permission(response) => Some(*response),
            Self::Position(_) => None,
        }
    }

    #[must_use]
    pub fn into_position(self) -> Option<Coordinates> {
        match self {
            Self::Position(coords) => Some(coords),
            Self::Permission(_) => None,
        }
    }
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location services are disabled")]
    ServicesDisabled,

    #[error("position unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("position request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("invalid coordinates: lat={latitude}, lng={longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("unexpected location output: {output}")]
    UnexpectedOutput { output: String },
}

impl LocationError {
    #[must_use]
    pub fn is_permission_error(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }
}

pub type LocationResult = Result<LocationOutput, LocationError>;
