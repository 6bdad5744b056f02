use serde::{Deserialize, Serialize};

use crate::capabilities::{CameraResult, LocationResult, MediaLibraryResult};
use crate::model::{ScreenConfig, SessionId};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    // --- lifecycle, sent by the shell ---
    Mount {
        #[serde(default)]
        config: ScreenConfig,
    },
    Unmount,
    SurfaceAttached,
    SurfaceDetached,

    // --- user actions ---
    FlipCamera,
    CaptureRequested,
    OpenMapsRequested,

    // --- capability results ---
    #[serde(skip)]
    CameraPermissionResolved {
        session: SessionId,
        result: CameraResult,
    },
    #[serde(skip)]
    PictureTaken {
        session: SessionId,
        result: CameraResult,
    },
    #[serde(skip)]
    SavePermissionResolved {
        session: SessionId,
        uri: String,
        result: MediaLibraryResult,
    },
    #[serde(skip)]
    PhotoSaved {
        session: SessionId,
        result: MediaLibraryResult,
    },
    #[serde(skip)]
    LocationPermissionResolved {
        session: SessionId,
        result: LocationResult,
    },
    #[serde(skip)]
    LocationResolved {
        session: SessionId,
        result: LocationResult,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mount { .. } => "mount",
            Self::Unmount => "unmount",
            Self::SurfaceAttached => "surface_attached",
            Self::SurfaceDetached => "surface_detached",
            Self::FlipCamera => "flip_camera",
            Self::CaptureRequested => "capture_requested",
            Self::OpenMapsRequested => "open_maps_requested",
            Self::CameraPermissionResolved { .. } => "camera_permission_resolved",
            Self::PictureTaken { .. } => "picture_taken",
            Self::SavePermissionResolved { .. } => "save_permission_resolved",
            Self::PhotoSaved { .. } => "photo_saved",
            Self::LocationPermissionResolved { .. } => "location_permission_resolved",
            Self::LocationResolved { .. } => "location_resolved",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::FlipCamera | Self::CaptureRequested | Self::OpenMapsRequested
        )
    }

    /// The mount session a capability result belongs to.
    #[must_use]
    pub const fn session(&self) -> Option<SessionId> {
        match self {
            Self::CameraPermissionResolved { session, .. }
            | Self::PictureTaken { session, .. }
            | Self::SavePermissionResolved { session, .. }
            | Self::PhotoSaved { session, .. }
            | Self::LocationPermissionResolved { session, .. }
            | Self::LocationResolved { session, .. } => Some(*session),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_initiated_events() {
        assert!(Event::FlipCamera.is_user_initiated());
        assert!(Event::CaptureRequested.is_user_initiated());
        assert!(Event::OpenMapsRequested.is_user_initiated());
        assert!(!Event::Unmount.is_user_initiated());
        assert!(!Event::SurfaceAttached.is_user_initiated());
    }

    #[test]
    fn test_session_only_on_capability_results() {
        let session = SessionId::new();
        let event = Event::PhotoSaved {
            session,
            result: Err(crate::capabilities::MediaLibraryError::PermissionDenied),
        };
        assert_eq!(event.session(), Some(session));
        assert_eq!(event.name(), "photo_saved");
        assert_eq!(Event::CaptureRequested.session(), None);
    }

    #[test]
    fn test_mount_deserializes_without_config() {
        let event: Event = serde_json::from_str(r#"{"Mount":{}}"#).unwrap();
        assert_eq!(
            event,
            Event::Mount {
                config: ScreenConfig::default()
            }
        );
    }
}
