mod camera;
mod linking;
mod location;
mod media_library;

use serde::{Deserialize, Serialize};

pub use self::camera::{
    Camera, CameraError, CameraFacing, CameraOperation, CameraOutput, CameraResult, CaptureConfig,
    CapturedPhoto,
};
pub use self::linking::{Linking, LinkingOperation};
pub use self::location::{
    Coordinates, Location, LocationAccuracy, LocationError, LocationOperation, LocationOutput,
    LocationResult, PositionOptions,
};
pub use self::media_library::{
    MediaLibrary, MediaLibraryError, MediaLibraryOperation, MediaLibraryOutput, MediaLibraryResult,
};

// Crux's built-in Render capability covers view updates.
pub use crux_core::render::Render;

use crate::app::App;
use crate::event::Event;

/// Answer to a permission prompt, as reported by the mobile permission APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    #[default]
    Undetermined,
}

impl PermissionStatus {
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionResponse {
    pub status: PermissionStatus,
    /// False once the user has blocked further prompts for this permission.
    #[serde(default = "default_can_ask_again")]
    pub can_ask_again: bool,
}

const fn default_can_ask_again() -> bool {
    true
}

impl PermissionResponse {
    #[must_use]
    pub const fn granted() -> Self {
        Self {
            status: PermissionStatus::Granted,
            can_ask_again: true,
        }
    }

    #[must_use]
    pub const fn denied() -> Self {
        Self {
            status: PermissionStatus::Denied,
            can_ask_again: true,
        }
    }

    #[must_use]
    pub const fn is_granted(&self) -> bool {
        self.status.is_granted()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("Media library error: {0}")]
    MediaLibrary(#[from] MediaLibraryError),
}

impl CapabilityError {
    #[must_use]
    pub fn is_permission_error(&self) -> bool {
        match self {
            Self::Camera(e) => e.is_permission_error(),
            Self::Location(e) => e.is_permission_error(),
            Self::MediaLibrary(e) => e.is_permission_error(),
        }
    }
}

#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub camera: Camera<Event>,
    pub location: Location<Event>,
    pub media_library: MediaLibrary<Event>,
    pub linking: Linking<Event>,
    pub render: Render<Event>,
}
