use futures::future::BoxFuture;
use std::sync::Arc;
use tweetboard_service::Tweet;

/// Handler attached to a control. Each call starts one activation; the host
/// drives the returned future, and activations may overlap.
pub type ClickHandler = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Append-only view of a container element.
pub trait RenderSink: Send + Sync {
    /// Append `tweets` after the existing content, in the given order.
    /// Existing children are never cleared or reordered.
    fn append_tweets(&self, tweets: &[Tweet]);
}

/// A clickable element.
pub trait Control: Send + Sync {
    /// Register `handler` for every future activation. Hosts keep all
    /// registered handlers and run each of them on every click.
    fn on_click(&self, handler: ClickHandler);
}

/// Element lookup on the host page.
pub trait Document: Send + Sync {
    fn container(&self, id: &str) -> Option<Arc<dyn RenderSink>>;
    fn control(&self, id: &str) -> Option<Arc<dyn Control>>;
}
