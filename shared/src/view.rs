use serde::{Deserialize, Serialize};

use crate::capabilities::{CameraFacing, Coordinates};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PreviewView {
    pub facing: CameraFacing,
    pub flip_label: String,
    pub capture_label: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReviewView {
    pub photo_uri: String,
    pub photo_width: u32,
    pub photo_height: u32,
    pub open_maps_label: String,
    pub location: Option<Coordinates>,
    /// What "Open Maps" would hand off right now; `None` until a location is known.
    pub maps_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CaptureScreenView {
    pub preview: Option<PreviewView>,
    pub review: Option<ReviewView>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewState {
    /// Camera permission not yet answered; the shell draws an empty container.
    Pending,
    NoAccess { message: String },
    Capture(CaptureScreenView),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    pub state: ViewState,
}

impl ViewModel {
    #[must_use]
    pub fn capture(&self) -> Option<&CaptureScreenView> {
        match &self.state {
            ViewState::Capture(view) => Some(view),
            _ => None,
        }
    }
}
