use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

/// Hands URLs to the platform so another app can open them.
#[derive(Clone)]
pub struct Linking<E> {
    context: CapabilityContext<LinkingOperation, E>,
}

impl<Ev> Capability<Ev> for Linking<Ev> {
    type Operation = LinkingOperation;
    type MappedSelf<MappedEv> = Linking<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Linking::new(self.context.map_event(f))
    }
}

impl<E> Linking<E>
where
    E: 'static,
{
    pub fn new(context: CapabilityContext<LinkingOperation, E>) -> Self {
        Self { context }
    }

    /// Fire-and-forget: the shell never reports whether an app handled the URL.
    pub fn open_url(&self, url: &url::Url) {
        let context = self.context.clone();
        let operation = LinkingOperation::OpenUrl {
            url: url.to_string(),
        };
        self.context.spawn(async move {
            context.notify_shell(operation).await;
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LinkingOperation {
    OpenUrl { url: String },
}

impl Operation for LinkingOperation {
    type Output = ();
}
