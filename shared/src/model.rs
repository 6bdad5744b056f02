use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::capabilities::{
    CameraFacing, CapabilityError, CaptureConfig, CapturedPhoto, Coordinates, PositionOptions,
};

/// Identifies one mounted lifetime of the screen.
///
/// Shell results are tagged with the session that issued the request and are
/// dropped once that session has ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CameraPermission {
    #[default]
    Unknown,
    Granted,
    Denied,
}

impl CameraPermission {
    #[must_use]
    pub const fn from_granted(granted: bool) -> Self {
        if granted {
            Self::Granted
        } else {
            Self::Denied
        }
    }

    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }

    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Result of a side effect the user never sees directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Succeeded,
    Denied,
    Failed { reason: String },
}

impl Outcome {
    pub fn from_error(error: impl Into<CapabilityError>) -> Self {
        let error = error.into();
        if error.is_permission_error() {
            Self::Denied
        } else {
            Self::Failed {
                reason: error.to_string(),
            }
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcomes {
    pub capture: Option<Outcome>,
    pub save: Option<Outcome>,
    pub location: Option<Outcome>,
}

/// Settings the shell supplies when it mounts the screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub location: PositionOptions,
}

impl ScreenConfig {
    #[must_use]
    pub fn validated(self) -> Self {
        Self {
            capture: self.capture.validated(),
            location: self.location.validated(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub session: Option<SessionId>,
    pub config: ScreenConfig,
    pub camera_permission: CameraPermission,
    pub facing: CameraFacing,
    pub captured_photo: Option<CapturedPhoto>,
    pub location: Option<Coordinates>,
    pub camera_enabled: bool,
    pub surface_attached: bool,
    pub outcomes: Outcomes,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            session: None,
            config: ScreenConfig::default(),
            camera_permission: CameraPermission::Unknown,
            facing: CameraFacing::Back,
            captured_photo: None,
            location: None,
            camera_enabled: true,
            surface_attached: false,
            outcomes: Outcomes::default(),
        }
    }
}

impl Model {
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.session.is_some()
    }

    /// True when a result issued under `session` may still touch the model.
    #[must_use]
    pub fn is_current(&self, session: SessionId) -> bool {
        self.session == Some(session)
    }

    #[must_use]
    pub fn can_capture(&self) -> bool {
        self.camera_enabled && self.surface_attached
    }

    #[must_use]
    pub fn capture_config(&self) -> CaptureConfig {
        self.config.capture.clone().with_facing(self.facing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{CameraError, LocationError, MediaLibraryError};

    #[test]
    fn test_default_model() {
        let model = Model::default();
        assert_eq!(model.camera_permission, CameraPermission::Unknown);
        assert_eq!(model.facing, CameraFacing::Back);
        assert!(model.camera_enabled);
        assert!(!model.surface_attached);
        assert!(model.captured_photo.is_none());
        assert!(model.location.is_none());
        assert!(!model.is_mounted());
    }

    #[test]
    fn test_can_capture_requires_enabled_and_surface() {
        let mut model = Model::default();
        assert!(!model.can_capture());

        model.surface_attached = true;
        assert!(model.can_capture());

        model.camera_enabled = false;
        assert!(!model.can_capture());
    }

    #[test]
    fn test_session_matching() {
        let mut model = Model::default();
        let session = SessionId::new();
        assert!(!model.is_current(session));

        model.session = Some(session);
        assert!(model.is_current(session));
        assert!(!model.is_current(SessionId::new()));
    }

    #[test]
    fn test_capture_config_uses_current_facing() {
        let mut model = Model::default();
        model.facing = CameraFacing::Front;
        assert_eq!(model.capture_config().facing, CameraFacing::Front);
    }

    #[test]
    fn test_camera_permission_states() {
        assert_eq!(CameraPermission::from_granted(true), CameraPermission::Granted);
        assert_eq!(CameraPermission::from_granted(false), CameraPermission::Denied);
        assert!(!CameraPermission::Unknown.is_resolved());
        assert!(CameraPermission::Denied.is_resolved());
        assert!(!CameraPermission::Denied.is_granted());
    }

    #[test]
    fn test_outcome_from_error() {
        assert_eq!(Outcome::from_error(LocationError::PermissionDenied), Outcome::Denied);
        assert_eq!(
            Outcome::from_error(MediaLibraryError::SaveFailed {
                reason: "quota".into()
            }),
            Outcome::Failed {
                reason: "Media library error: save failed: quota".into()
            }
        );
        assert!(!Outcome::from_error(CameraError::PermissionDenied).is_success());
    }

    #[test]
    fn test_outcome_serialization_shape() {
        let json = serde_json::to_string(&Outcome::Failed {
            reason: "boom".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"failed","reason":"boom"}"#);
    }

    #[test]
    fn test_screen_config_deserializes_from_empty_object() {
        let config: ScreenConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ScreenConfig::default());
    }
}
