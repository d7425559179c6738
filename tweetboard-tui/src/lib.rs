//! Terminal host for a Tweetboard page.
//!
//! The terminal plays the page's document: the scrolling tweet pane is the
//! `tweets` container, the compose line plus Enter is the `tweetbtn`
//! control, and the status bar shows the page state and reported failures.
mod command;
mod feed;
mod feeders;
mod host;
mod input;
mod styles;
mod tui;
mod view;

pub use feeders::spawn_tui_feeders;
pub use host::{TuiDocument, TuiErrorSink, TuiSendButton, TuiTweetList};
pub use tui::{TuiActor, TuiHandle, TuiMsg};
