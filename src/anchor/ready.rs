//! Content-ready signalling between the content renderer and the anchor
//! resolver.

use tokio::sync::oneshot;

/// Creates a connected signal/receiver pair.
///
/// The content renderer keeps the [`ContentReadySignal`] and calls
/// [`notify`](ContentReadySignal::notify) once headings are in the document.
/// Dropping the signal without notifying means the content went away.
#[must_use]
pub fn content_ready() -> (ContentReadySignal, ContentReady) {
    let (sender, receiver) = oneshot::channel();
    (ContentReadySignal(sender), ContentReady(receiver))
}

/// Sending half, owned by the content renderer.
#[derive(Debug)]
pub struct ContentReadySignal(oneshot::Sender<()>);

impl ContentReadySignal {
    /// Marks the content as rendered.
    pub fn notify(self) {
        // The resolver may already be gone; nothing to do then.
        let _ = self.0.send(());
    }
}

/// Receiving half, awaited by
/// [`AnchorResolver::resolve_when_ready`](super::AnchorResolver::resolve_when_ready).
#[derive(Debug)]
pub struct ContentReady(pub(super) oneshot::Receiver<()>);
