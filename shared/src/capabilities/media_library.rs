use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PermissionResponse;

/// Access to the device's shared photo library.
#[derive(Clone)]
pub struct MediaLibrary<E> {
    context: CapabilityContext<MediaLibraryOperation, E>,
}

impl<Ev> Capability<Ev> for MediaLibrary<Ev> {
    type Operation = MediaLibraryOperation;
    type MappedSelf<MappedEv> = MediaLibrary<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        MediaLibrary::new(self.context.map_event(f))
    }
}

impl<E> MediaLibrary<E>
where
    E: 'static,
{
    pub fn new(context: CapabilityContext<MediaLibraryOperation, E>) -> Self {
        Self { context }
    }

    pub fn request_permission<F>(&self, callback: F)
    where
        F: FnOnce(MediaLibraryResult) -> E + Send + 'static,
    {
        self.request(MediaLibraryOperation::RequestPermission, callback);
    }

    pub fn save_to_library<F>(&self, uri: impl Into<String>, callback: F)
    where
        F: FnOnce(MediaLibraryResult) -> E + Send + 'static,
    {
        self.request(
            MediaLibraryOperation::SaveToLibrary { uri: uri.into() },
            callback,
        );
    }

    fn request<F>(&self, operation: MediaLibraryOperation, callback: F)
    where
        F: FnOnce(MediaLibraryResult) -> E + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let result = context.request_from_shell(operation).await;
            context.update_app(callback(result));
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum MediaLibraryOperation {
    RequestPermission,
    SaveToLibrary { uri: String },
}

impl Operation for MediaLibraryOperation {
    type Output = MediaLibraryResult;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum MediaLibraryOutput {
    Permission(PermissionResponse),
    /// `asset_id` is the library's identifier for the new asset, when the platform reports one.
    Saved { asset_id: Option<String> },
}

impl MediaLibraryOutput {
    #[must_use]
    pub fn permission(&self) -> Option<PermissionResponse> {
        match self {
            Self::Permission(response) => Some(*response),
            Self::Saved { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum MediaLibraryError {
    #[error("media library permission denied")]
    PermissionDenied,

    #[error("source file not found: {uri}")]
    SourceNotFound { uri: String },

    #[error("save failed: {reason}")]
    SaveFailed { reason: String },

    #[error("unexpected media library output: {output}")]
    UnexpectedOutput { output: String },
}

impl MediaLibraryError {
    #[must_use]
    pub fn is_permission_error(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }
}

pub type MediaLibraryResult = Result<MediaLibraryOutput, MediaLibraryError>;
