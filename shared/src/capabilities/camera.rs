use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PermissionResponse;

pub const DEFAULT_JPEG_QUALITY: f32 = 1.0;
pub const MAX_PHOTO_URI_LENGTH: usize = 4096;

#[derive(Clone)]
pub struct Camera<E> {
    context: CapabilityContext<CameraOperation, E>,
}

impl<Ev> Capability<Ev> for Camera<Ev> {
    type Operation = CameraOperation;
    type MappedSelf<MappedEv> = Camera<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Camera::new(self.context.map_event(f))
    }
}

impl<E> Camera<E>
where
    E: 'static,
{
    pub fn new(context: CapabilityContext<CameraOperation, E>) -> Self {
        Self { context }
    }

    pub fn request_permission<F>(&self, callback: F)
    where
        F: FnOnce(CameraResult) -> E + Send + 'static,
    {
        self.request(CameraOperation::RequestPermission, callback);
    }

    /// Takes a still image from the live preview the shell has attached.
    pub fn take_picture<F>(&self, config: CaptureConfig, callback: F)
    where
        F: FnOnce(CameraResult) -> E + Send + 'static,
    {
        let config = config.validated();
        self.request(CameraOperation::TakePicture { config }, callback);
    }

    fn request<F>(&self, operation: CameraOperation, callback: F)
    where
        F: FnOnce(CameraResult) -> E + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let result = context.request_from_shell(operation).await;
            context.update_app(callback(result));
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CameraOperation {
    RequestPermission,
    TakePicture { config: CaptureConfig },
}

impl Operation for CameraOperation {
    type Output = CameraResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CameraFacing {
    Front,
    #[default]
    Back,
}

impl CameraFacing {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptureConfig {
    pub facing: CameraFacing,
    /// JPEG compression quality, 0.0 (smallest) to 1.0 (best).
    pub quality: f32,
    pub exif: bool,
    pub skip_processing: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            facing: CameraFacing::Back,
            quality: DEFAULT_JPEG_QUALITY,
            exif: false,
            skip_processing: false,
        }
    }
}

impl CaptureConfig {
    #[must_use]
    pub fn with_facing(mut self, facing: CameraFacing) -> Self {
        self.facing = facing;
        self
    }

    #[must_use]
    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = clamp_quality(quality);
        self
    }

    #[must_use]
    pub fn with_exif(mut self) -> Self {
        self.exif = true;
        self
    }

    #[must_use]
    pub fn skip_processing(mut self) -> Self {
        self.skip_processing = true;
        self
    }

    #[must_use]
    pub fn validated(mut self) -> Self {
        self.quality = clamp_quality(self.quality);
        self
    }
}

fn clamp_quality(quality: f32) -> f32 {
    if quality.is_nan() {
        DEFAULT_JPEG_QUALITY
    } else {
        quality.clamp(0.0, 1.0)
    }
}

/// A still image written by the shell to app-local storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapturedPhoto {
    uri: String,
    width: u32,
    height: u32,
}

impl CapturedPhoto {
    pub fn new(uri: impl Into<String>, width: u32, height: u32) -> Result<Self, CameraError> {
        let uri = uri.into();

        if uri.trim().is_empty() {
            return Err(CameraError::InvalidPhoto {
                reason: "photo uri is empty".to_string(),
            });
        }

        if uri.len() > MAX_PHOTO_URI_LENGTH {
            return Err(CameraError::InvalidPhoto {
                reason: format!("photo uri exceeds {MAX_PHOTO_URI_LENGTH} bytes"),
            });
        }

        if width == 0 || height == 0 {
            return Err(CameraError::InvalidPhoto {
                reason: format!("invalid dimensions {width}x{height}"),
            });
        }

        Ok(Self { uri, width, height })
    }

    /// Re-applies the constructor checks to a value that came over the bridge.
    pub fn validated(self) -> Result<Self, CameraError> {
        Self::new(self.uri, self.width, self.height)
    }

    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum CameraOutput {
    Permission(PermissionResponse),
    Picture(CapturedPhoto),
}

impl CameraOutput {
    #[must_use]
    pub fn into_picture(self) -> Option<CapturedPhoto> {
        match self {
            Self::Picture(photo) => Some(photo),
            Self::Permission(_) => None,
        }
    }

    #[must_use]
    pub fn permission(&self) -> Option<PermissionResponse> {
        match self {
            Self::Permission(response) => Some(*response),
            Self::Picture(_) => None,
        }
    }
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("camera unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("camera {facing:?} not available on this device")]
    CameraNotFound { facing: CameraFacing },

    #[error("capture failed: {reason}")]
    CaptureFailed { reason: String },

    #[error("invalid photo: {reason}")]
    InvalidPhoto { reason: String },

    #[error("unexpected camera output: {output}")]
    UnexpectedOutput { output: String },
}

impl CameraError {
    #[must_use]
    pub fn is_permission_error(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }
}

pub type CameraResult = Result<CameraOutput, CameraError>;
