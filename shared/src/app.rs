use tracing::{debug, info, warn};

use crate::capabilities::{
    CameraError, CameraResult, Capabilities, CapturedPhoto, Coordinates, LocationError,
    LocationResult, MediaLibraryError, MediaLibraryOutput, MediaLibraryResult,
};
use crate::event::Event;
use crate::maps::{maps_search_url, MapsLinkError};
use crate::model::{CameraPermission, Model, Outcome, ScreenConfig, SessionId};
use crate::view::{CaptureScreenView, PreviewView, ReviewView, ViewModel, ViewState};
use crate::{CAPTURE_LABEL, FLIP_LABEL, NO_CAMERA_ACCESS_MESSAGE, OPEN_MAPS_LABEL};

#[derive(Default)]
pub struct App;

impl App {
    fn mount(config: ScreenConfig, model: &mut Model, caps: &Capabilities) {
        if model.is_mounted() {
            warn!("mount ignored: screen is already mounted");
            return;
        }

        let session = SessionId::new();
        *model = Model {
            session: Some(session),
            config: config.validated(),
            ..Model::default()
        };
        debug!(%session, "screen mounted");

        caps.camera
            .request_permission(move |result| Event::CameraPermissionResolved { session, result });
        caps.render.render();
    }

    fn unmount(model: &mut Model, caps: &Capabilities) {
        if let Some(session) = model.session.take() {
            debug!(%session, "screen unmounted");
        }
        model.camera_enabled = false;
        caps.render.render();
    }

    fn camera_permission_resolved(result: CameraResult, model: &mut Model, caps: &Capabilities) {
        if model.camera_permission.is_resolved() {
            debug!("camera permission already resolved for this mount");
            return;
        }

        let granted = match result {
            Ok(output) => match output.permission() {
                Some(response) => response.is_granted(),
                None => {
                    warn!(?output, "unexpected camera output for permission request");
                    false
                }
            },
            Err(e) => {
                warn!(error = %e, "camera permission request failed");
                false
            }
        };

        model.camera_permission = CameraPermission::from_granted(granted);
        info!(granted, "camera permission resolved");
        caps.render.render();
    }

    fn capture(model: &mut Model, caps: &Capabilities) {
        let Some(session) = model.session else {
            warn!("capture ignored: screen is not mounted");
            return;
        };
        if !model.can_capture() {
            warn!(
                camera_enabled = model.camera_enabled,
                surface_attached = model.surface_attached,
                "capture ignored: camera is not ready"
            );
            return;
        }

        caps.camera.take_picture(model.capture_config(), move |result| {
            Event::PictureTaken { session, result }
        });
    }

    fn picture_taken(
        session: SessionId,
        result: CameraResult,
        model: &mut Model,
        caps: &Capabilities,
    ) {
        let photo = match result.and_then(|output| {
            let unexpected = format!("{output:?}");
            output
                .into_picture()
                .ok_or(CameraError::UnexpectedOutput { output: unexpected })
                .and_then(CapturedPhoto::validated)
        }) {
            Ok(photo) => photo,
            Err(e) => {
                warn!(error = %e, "photo capture failed");
                model.outcomes.capture = Some(Outcome::from_error(e));
                return;
            }
        };

        info!(uri = photo.uri(), "photo captured");
        let uri = photo.uri().to_string();
        model.captured_photo = Some(photo);
        model.outcomes.capture = Some(Outcome::Succeeded);
        caps.render.render();

        // Saving and locating are independent; neither result is shown to the user.
        caps.media_library.request_permission(move |result| Event::SavePermissionResolved {
            session,
            uri,
            result,
        });
        caps.location
            .request_foreground_permission(move |result| Event::LocationPermissionResolved {
                session,
                result,
            });
    }

    fn save_permission_resolved(
        session: SessionId,
        uri: String,
        result: MediaLibraryResult,
        model: &mut Model,
        caps: &Capabilities,
    ) {
        let response = match result {
            Ok(output) => match output.permission() {
                Some(response) => response,
                None => {
                    warn!(?output, "unexpected media library output for permission request");
                    model.outcomes.save = Some(Outcome::from_error(
                        MediaLibraryError::UnexpectedOutput {
                            output: format!("{output:?}"),
                        },
                    ));
                    return;
                }
            },
            Err(e) => {
                warn!(error = %e, "media library permission request failed");
                model.outcomes.save = Some(Outcome::from_error(e));
                return;
            }
        };

        if response.is_granted() {
            caps.media_library
                .save_to_library(uri, move |result| Event::PhotoSaved { session, result });
        } else {
            info!(
                can_ask_again = response.can_ask_again,
                "permission denied to save photo to device"
            );
            model.outcomes.save = Some(Outcome::Denied);
        }
    }

    fn photo_saved(result: MediaLibraryResult, model: &mut Model) {
        model.outcomes.save = Some(match result {
            Ok(MediaLibraryOutput::Saved { asset_id }) => {
                info!(?asset_id, "photo saved to library");
                Outcome::Succeeded
            }
            Ok(other) => {
                warn!(?other, "unexpected media library output for save");
                Outcome::from_error(MediaLibraryError::UnexpectedOutput {
                    output: format!("{other:?}"),
                })
            }
            Err(e) => {
                warn!(error = %e, "saving photo to library failed");
                Outcome::from_error(e)
            }
        });
    }

    fn location_permission_resolved(
        session: SessionId,
        result: LocationResult,
        model: &mut Model,
        caps: &Capabilities,
    ) {
        let response = match result {
            Ok(output) => match output.permission() {
                Some(response) => response,
                None => {
                    warn!(?output, "unexpected location output for permission request");
                    model.outcomes.location = Some(Outcome::from_error(
                        LocationError::UnexpectedOutput {
                            output: format!("{output:?}"),
                        },
                    ));
                    return;
                }
            },
            Err(e) => {
                warn!(error = %e, "location permission request failed");
                model.outcomes.location = Some(Outcome::from_error(e));
                return;
            }
        };

        if response.is_granted() {
            caps.location
                .get_current_position(model.config.location.clone(), move |result| {
                    Event::LocationResolved { session, result }
                });
        } else {
            info!(
                status = ?response.status,
                "permission to access location was denied"
            );
            model.outcomes.location = Some(Outcome::Denied);
        }
    }

    fn location_resolved(result: LocationResult, model: &mut Model, caps: &Capabilities) {
        let coords = match result.and_then(|output| {
            let unexpected = format!("{output:?}");
            output
                .into_position()
                .ok_or(LocationError::UnexpectedOutput { output: unexpected })
                .and_then(Coordinates::validated)
        }) {
            Ok(coords) => coords,
            Err(e) => {
                warn!(error = %e, "fetching current position failed");
                model.outcomes.location = Some(Outcome::from_error(e));
                return;
            }
        };

        debug!(
            latitude = coords.latitude,
            longitude = coords.longitude,
            "location updated"
        );
        model.location = Some(coords);
        model.outcomes.location = Some(Outcome::Succeeded);
        caps.render.render();
    }

    fn open_maps(model: &Model, caps: &Capabilities) {
        let Some(coords) = model.location else {
            warn!("no location data");
            return;
        };

        match maps_search_url(&coords) {
            Ok(url) => caps.linking.open_url(&url),
            Err(MapsLinkError::NoLocationData) => warn!("no location data"),
            Err(e) => warn!(error = %e, "cannot build maps link"),
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        debug!(
            event = event.name(),
            user_initiated = event.is_user_initiated(),
            "update"
        );

        if let Some(session) = event.session() {
            if !model.is_current(session) {
                debug!(event = event.name(), %session, "dropping result from ended session");
                return;
            }
        }

        match event {
            Event::Mount { config } => Self::mount(config, model, caps),
            Event::Unmount => Self::unmount(model, caps),

            Event::SurfaceAttached => {
                model.surface_attached = true;
            }
            Event::SurfaceDetached => {
                model.surface_attached = false;
            }

            Event::FlipCamera => {
                model.facing = model.facing.flipped();
                caps.render.render();
            }
            Event::CaptureRequested => Self::capture(model, caps),
            Event::OpenMapsRequested => Self::open_maps(model, caps),

            Event::CameraPermissionResolved { result, .. } => {
                Self::camera_permission_resolved(result, model, caps);
            }
            Event::PictureTaken { session, result } => {
                Self::picture_taken(session, result, model, caps);
            }
            Event::SavePermissionResolved {
                session,
                uri,
                result,
            } => Self::save_permission_resolved(session, uri, result, model, caps),
            Event::PhotoSaved { result, .. } => Self::photo_saved(result, model),
            Event::LocationPermissionResolved { session, result } => {
                Self::location_permission_resolved(session, result, model, caps);
            }
            Event::LocationResolved { result, .. } => {
                Self::location_resolved(result, model, caps);
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        let state = match model.camera_permission {
            CameraPermission::Unknown => ViewState::Pending,
            CameraPermission::Denied => ViewState::NoAccess {
                message: NO_CAMERA_ACCESS_MESSAGE.to_string(),
            },
            CameraPermission::Granted => {
                let preview = model.camera_enabled.then(|| PreviewView {
                    facing: model.facing,
                    flip_label: FLIP_LABEL.to_string(),
                    capture_label: CAPTURE_LABEL.to_string(),
                });

                let review = model.captured_photo.as_ref().map(|photo| ReviewView {
                    photo_uri: photo.uri().to_string(),
                    photo_width: photo.width(),
                    photo_height: photo.height(),
                    open_maps_label: OPEN_MAPS_LABEL.to_string(),
                    location: model.location,
                    maps_url: model
                        .location
                        .as_ref()
                        .and_then(|coords| maps_search_url(coords).ok())
                        .map(String::from),
                });

                ViewState::Capture(CaptureScreenView { preview, review })
            }
        };

        ViewModel { state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::CameraFacing;
    use crux_core::App as _;

    fn granted_model() -> Model {
        Model {
            session: Some(SessionId::new()),
            camera_permission: CameraPermission::Granted,
            ..Model::default()
        }
    }

    #[test]
    fn test_view_pending_when_permission_unknown() {
        let view = App.view(&Model::default());
        assert_eq!(view.state, ViewState::Pending);
    }

    #[test]
    fn test_view_denied_is_only_the_message() {
        let mut model = granted_model();
        model.camera_permission = CameraPermission::Denied;
        model.captured_photo = Some(CapturedPhoto::new("file:///a.jpg", 1, 1).unwrap());
        model.location = Some(Coordinates::new(1.0, 2.0).unwrap());

        let view = App.view(&model);
        assert_eq!(
            view.state,
            ViewState::NoAccess {
                message: "No access to camera".into()
            }
        );
    }

    #[test]
    fn test_view_preview_only_before_capture() {
        let view = App.view(&granted_model());
        let screen = view.capture().unwrap();
        let preview = screen.preview.as_ref().unwrap();
        assert_eq!(preview.facing, CameraFacing::Back);
        assert_eq!(preview.flip_label, "Flip");
        assert_eq!(preview.capture_label, "Capture");
        assert!(screen.review.is_none());
    }

    #[test]
    fn test_view_preview_and_review_coexist() {
        let mut model = granted_model();
        model.captured_photo = Some(CapturedPhoto::new("file:///a.jpg", 640, 480).unwrap());

        let view = App.view(&model);
        let screen = view.capture().unwrap();
        assert!(screen.preview.is_some());

        let review = screen.review.as_ref().unwrap();
        assert_eq!(review.photo_uri, "file:///a.jpg");
        assert_eq!(review.open_maps_label, "Open Maps");
        assert_eq!(review.location, None);
        assert_eq!(review.maps_url, None);
    }

    #[test]
    fn test_view_review_carries_maps_url() {
        let mut model = granted_model();
        model.captured_photo = Some(CapturedPhoto::new("file:///a.jpg", 1, 1).unwrap());
        model.location = Some(Coordinates::new(37.7749, -122.4194).unwrap());

        let view = App.view(&model);
        let review = view.capture().unwrap().review.as_ref().unwrap();
        assert_eq!(
            review.maps_url.as_deref(),
            Some("https://www.google.com/maps/search/?api=1&query=37.7749,-122.4194")
        );
    }

    #[test]
    fn test_view_disabled_camera_hides_preview_keeps_review() {
        let mut model = granted_model();
        model.camera_enabled = false;
        model.captured_photo = Some(CapturedPhoto::new("file:///a.jpg", 1, 1).unwrap());

        let view = App.view(&model);
        let screen = view.capture().unwrap();
        assert!(screen.preview.is_none());
        assert!(screen.review.is_some());
    }

    #[test]
    fn test_view_serializes_with_type_tag() {
        let json = serde_json::to_value(App.view(&Model::default())).unwrap();
        assert_eq!(json["state"]["type"], "pending");
    }
}
