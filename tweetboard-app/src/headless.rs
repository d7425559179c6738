//! Non-interactive host: the container prints each appended tweet as a
//! line, and the send control is clicked once per `--post` message.
use crate::wiring::Wiring;
use anyhow::{Result, bail};
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};
use tweetboard_common::BoardError;
use tweetboard_page::{
    ClickHandler, Control, Document, ErrorOrigin, ErrorSink, PageBootstrap, PageIds, PageState,
    RenderSink, TracingErrorSink,
};
use tweetboard_service::Tweet;

struct PrintSink<W> {
    out: Mutex<W>,
}

fn render_batch(tweets: &[Tweet]) -> String {
    tweets
        .iter()
        .map(|tweet| {
            format!(
                "{}  @{}: {}  ({} likes)\n",
                tweet.created_at.format("%Y-%m-%d %H:%M:%S"),
                tweet.author,
                tweet.message,
                tweet.likes
            )
        })
        .collect()
}

impl<W: Write + Send> RenderSink for PrintSink<W> {
    /// The whole batch goes out in a single write.
    fn append_tweets(&self, tweets: &[Tweet]) {
        if tweets.is_empty() {
            return;
        }
        let batch = render_batch(tweets);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = out.write_all(batch.as_bytes()).and_then(|()| out.flush()) {
            tracing::warn!(error = %e, count = tweets.len(), "dump.write_failed");
        }
    }
}

#[derive(Default)]
struct StoredButton {
    handlers: Mutex<Vec<ClickHandler>>,
}

impl StoredButton {
    /// Run every registered handler to completion, one after another.
    async fn click(&self) -> usize {
        let handlers = self
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for handler in &handlers {
            handler().await;
        }
        handlers.len()
    }
}

impl Control for StoredButton {
    fn on_click(&self, handler: ClickHandler) {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handler);
    }
}

struct ConsoleDocument<W> {
    ids: PageIds,
    sink: Arc<PrintSink<W>>,
    button: Arc<StoredButton>,
}

impl<W: Write + Send + 'static> Document for ConsoleDocument<W> {
    fn container(&self, id: &str) -> Option<Arc<dyn RenderSink>> {
        (id == self.ids.container).then(|| Arc::clone(&self.sink) as Arc<dyn RenderSink>)
    }

    fn control(&self, id: &str) -> Option<Arc<dyn Control>> {
        (id == self.ids.send_control).then(|| Arc::clone(&self.button) as Arc<dyn Control>)
    }
}

/// Logs and echoes failures to stderr.
struct ConsoleErrorSink;

impl ErrorSink for ConsoleErrorSink {
    fn report(&self, origin: ErrorOrigin, err: &BoardError) {
        TracingErrorSink.report(origin, err);
        eprintln!("error: {origin} failed: {err}");
    }
}

/// Load the page into `out`, then post `posts` in order. Fails when the
/// page does not initialize; failed posts are only reported.
pub async fn run_dump<W>(wiring: Wiring, posts: Vec<String>, out: W) -> Result<()>
where
    W: Write + Send + 'static,
{
    let Wiring {
        service,
        compose,
        ids,
    } = wiring;

    let button = Arc::new(StoredButton::default());
    let document = Arc::new(ConsoleDocument {
        ids: ids.clone(),
        sink: Arc::new(PrintSink {
            out: Mutex::new(out),
        }),
        button: Arc::clone(&button),
    });

    let bootstrap =
        PageBootstrap::new(service, document, Arc::new(ConsoleErrorSink)).with_ids(ids);
    let state = bootstrap.load().await;
    if state != PageState::Initialized {
        bail!("page did not initialize ({state:?})");
    }

    for message in posts {
        compose.submit(message);
        button.click().await;
    }
    tracing::info!(pending = compose.pending(), "dump.done");
    Ok(())
}
