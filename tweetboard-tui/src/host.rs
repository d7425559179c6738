//! The terminal's implementation of the page seams.
use crate::tui::{TuiHandle, TuiMsg};
use std::sync::{Arc, Mutex, PoisonError};
use tweetboard_common::BoardError;
use tweetboard_page::{
    ClickHandler, Control, Document, ErrorOrigin, ErrorSink, PageIds, RenderSink,
    TracingErrorSink,
};
use tweetboard_service::Tweet;

/// The tweet pane. Appends are forwarded to the UI loop in call order.
pub struct TuiTweetList {
    ui: TuiHandle,
}

impl RenderSink for TuiTweetList {
    fn append_tweets(&self, tweets: &[Tweet]) {
        if tweets.is_empty() {
            return;
        }
        self.ui.send(TuiMsg::Append(tweets.to_vec()));
    }
}

/// Enter on the compose line. Every registered handler runs on each click as
/// its own task; the UI hears `PostSettled` when an activation finishes.
pub struct TuiSendButton {
    ui: TuiHandle,
    handlers: Mutex<Vec<ClickHandler>>,
}

impl TuiSendButton {
    pub fn is_armed(&self) -> bool {
        !self
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Start one activation per registered handler and return how many
    /// started. Must be called from within a tokio runtime.
    pub fn click(&self) -> usize {
        let handlers = self
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for handler in &handlers {
            let activation = handler();
            let ui = self.ui.clone();
            tokio::spawn(async move {
                activation.await;
                ui.send(TuiMsg::PostSettled);
            });
        }
        handlers.len()
    }
}

impl Control for TuiSendButton {
    fn on_click(&self, handler: ClickHandler) {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handler);
        tracing::debug!("tui.send_armed");
    }
}

pub struct TuiDocument {
    ids: PageIds,
    list: Arc<TuiTweetList>,
    send: Arc<TuiSendButton>,
}

impl TuiDocument {
    pub fn new(ids: PageIds, ui: TuiHandle) -> Self {
        Self {
            ids,
            list: Arc::new(TuiTweetList { ui: ui.clone() }),
            send: Arc::new(TuiSendButton {
                ui,
                handlers: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn send_button(&self) -> Arc<TuiSendButton> {
        Arc::clone(&self.send)
    }
}

impl Document for TuiDocument {
    fn container(&self, id: &str) -> Option<Arc<dyn RenderSink>> {
        (id == self.ids.container).then(|| Arc::clone(&self.list) as Arc<dyn RenderSink>)
    }

    fn control(&self, id: &str) -> Option<Arc<dyn Control>> {
        (id == self.ids.send_control).then(|| Arc::clone(&self.send) as Arc<dyn Control>)
    }
}

/// Logs like [`TracingErrorSink`] and also shows the failure in the status bar.
pub struct TuiErrorSink {
    ui: TuiHandle,
}

impl TuiErrorSink {
    pub fn new(ui: TuiHandle) -> Self {
        Self { ui }
    }
}

impl ErrorSink for TuiErrorSink {
    fn report(&self, origin: ErrorOrigin, err: &BoardError) {
        TracingErrorSink.report(origin, err);
        self.ui.send(TuiMsg::Reported(format!("{origin} failed: {err}")));
    }
}
