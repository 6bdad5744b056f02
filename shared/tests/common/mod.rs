#![allow(dead_code)]

use crux_core::testing::AppTester;
use crux_core::Request;
use shared::capabilities::{
    CameraOperation, CameraOutput, CapturedPhoto, Coordinates, LinkingOperation,
    LocationOperation, LocationOutput, MediaLibraryOperation, MediaLibraryOutput,
    PermissionResponse,
};
use shared::{App, Effect, Event, Model};

pub type Tester = AppTester<App, Effect>;

pub const PHOTO_URI: &str = "file:///data/cache/Camera/photo-1.jpg";

pub fn photo() -> CapturedPhoto {
    CapturedPhoto::new(PHOTO_URI, 4032, 3024).expect("valid photo")
}

pub fn camera_request(effects: Vec<Effect>) -> Request<CameraOperation> {
    effects
        .into_iter()
        .find_map(|e| match e {
            Effect::Camera(request) => Some(request),
            _ => None,
        })
        .expect("expected a camera request")
}

pub fn location_request(effects: Vec<Effect>) -> Request<LocationOperation> {
    effects
        .into_iter()
        .find_map(|e| match e {
            Effect::Location(request) => Some(request),
            _ => None,
        })
        .expect("expected a location request")
}

pub fn media_request(effects: Vec<Effect>) -> Request<MediaLibraryOperation> {
    effects
        .into_iter()
        .find_map(|e| match e {
            Effect::MediaLibrary(request) => Some(request),
            _ => None,
        })
        .expect("expected a media library request")
}

pub fn linking_operations(effects: &[Effect]) -> Vec<LinkingOperation> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Linking(request) => Some(request.operation.clone()),
            _ => None,
        })
        .collect()
}

pub fn has_render(effects: &[Effect]) -> bool {
    effects.iter().any(|e| matches!(e, Effect::Render(_)))
}

/// Applies every event a resolved request produced and returns the effects they caused.
pub fn apply(app: &Tester, events: Vec<Event>, model: &mut Model) -> Vec<Effect> {
    events
        .into_iter()
        .flat_map(|event| app.update(event, model).effects)
        .collect()
}

pub fn resolve_camera(
    app: &Tester,
    mut request: Request<CameraOperation>,
    output: shared::capabilities::CameraResult,
    model: &mut Model,
) -> Vec<Effect> {
    let update = app.resolve(&mut request, output).expect("camera request resolves");
    apply(app, update.events, model)
}

pub fn resolve_location(
    app: &Tester,
    mut request: Request<LocationOperation>,
    output: shared::capabilities::LocationResult,
    model: &mut Model,
) -> Vec<Effect> {
    let update = app
        .resolve(&mut request, output)
        .expect("location request resolves");
    apply(app, update.events, model)
}

pub fn resolve_media(
    app: &Tester,
    mut request: Request<MediaLibraryOperation>,
    output: shared::capabilities::MediaLibraryResult,
    model: &mut Model,
) -> Vec<Effect> {
    let update = app
        .resolve(&mut request, output)
        .expect("media library request resolves");
    apply(app, update.events, model)
}

/// Mounts the screen and answers the camera prompt.
pub fn mounted(app: &Tester, model: &mut Model, camera_granted: bool) {
    let update = app.update(
        Event::Mount {
            config: Default::default(),
        },
        model,
    );
    let request = camera_request(update.effects);
    assert_eq!(request.operation, CameraOperation::RequestPermission);

    let response = if camera_granted {
        PermissionResponse::granted()
    } else {
        PermissionResponse::denied()
    };
    resolve_camera(app, request, Ok(CameraOutput::Permission(response)), model);
}

/// Mounts with camera access and attaches the preview surface.
pub fn ready(app: &Tester, model: &mut Model) {
    mounted(app, model, true);
    app.update(Event::SurfaceAttached, model);
}

/// Takes a photo and returns the effects that followed the picture result.
pub fn captured(app: &Tester, model: &mut Model) -> Vec<Effect> {
    let update = app.update(Event::CaptureRequested, model);
    let request = camera_request(update.effects);
    resolve_camera(app, request, Ok(CameraOutput::Picture(photo())), model)
}

pub fn location_permission(granted: bool) -> shared::capabilities::LocationResult {
    Ok(LocationOutput::Permission(if granted {
        PermissionResponse::granted()
    } else {
        PermissionResponse::denied()
    }))
}

pub fn media_permission(granted: bool) -> shared::capabilities::MediaLibraryResult {
    Ok(MediaLibraryOutput::Permission(if granted {
        PermissionResponse::granted()
    } else {
        PermissionResponse::denied()
    }))
}

pub fn position(latitude: f64, longitude: f64) -> shared::capabilities::LocationResult {
    Ok(LocationOutput::Position(
        Coordinates::new(latitude, longitude).expect("valid coordinates"),
    ))
}
