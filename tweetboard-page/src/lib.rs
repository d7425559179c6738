//! Page bootstrap for Tweetboard hosts.
//!
//! A host (the terminal UI, the headless dumper, a test fixture) exposes its
//! elements through [`Document`]. On load, [`PageBootstrap`] fetches the
//! tweet list, appends it to the `tweets` container and arms the `tweetbtn`
//! control so each activation posts one tweet and appends it.
//!
//! Failures are never retried or hidden: [`PageBootstrap::initialize`]
//! returns them, and everything else goes to the injected [`ErrorSink`].
pub mod bootstrap;
pub mod document;
pub mod errors;

pub use bootstrap::{PageBootstrap, PageIds, PageState};
pub use document::{ClickHandler, Control, Document, RenderSink};
pub use errors::{ErrorOrigin, ErrorSink, TracingErrorSink};

/// Default id of the container tweets are appended to.
pub const TWEETS_CONTAINER_ID: &str = "tweets";
/// Default id of the control that posts the composed tweet.
pub const SEND_CONTROL_ID: &str = "tweetbtn";
