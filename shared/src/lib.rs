// lib.rs - Geotagged photo capture screen core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]

pub mod app;
pub mod capabilities;
pub mod event;
pub mod maps;
pub mod model;
pub mod view;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use crux_core::{render::Render, App as CruxApp};
pub use event::Event;
pub use model::{CameraPermission, Model, Outcome, Outcomes, ScreenConfig, SessionId};
pub use view::{CaptureScreenView, PreviewView, ReviewView, ViewModel, ViewState};

pub const MAPS_SEARCH_BASE_URL: &str = "https://www.google.com/maps/search/";
pub const NO_CAMERA_ACCESS_MESSAGE: &str = "No access to camera";
pub const FLIP_LABEL: &str = "Flip";
pub const CAPTURE_LABEL: &str = "Capture";
pub const OPEN_MAPS_LABEL: &str = "Open Maps";
