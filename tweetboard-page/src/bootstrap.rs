//! The load-time routine of a Tweetboard page.
//!
//! Ordering: the container is looked up first, then the tweet list is
//! fetched and appended, and only then is the send control armed. A click
//! can therefore never observe a page whose initial list is still loading,
//! and a failed fetch leaves the control unarmed.
use crate::document::{ClickHandler, Document, RenderSink};
use crate::errors::{ErrorOrigin, ErrorSink};
use crate::{SEND_CONTROL_ID, TWEETS_CONTAINER_ID};
use futures::FutureExt;
use std::sync::{Arc, Mutex, PoisonError};
use tweetboard_common::{BoardError, Result};
use tweetboard_service::TweetService;

/// Element ids the bootstrap looks up on the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageIds {
    pub container: String,
    pub send_control: String,
}

impl Default for PageIds {
    fn default() -> Self {
        Self {
            container: TWEETS_CONTAINER_ID.to_string(),
            send_control: SEND_CONTROL_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Pending,
    Loading,
    /// Initial list rendered and the send control armed.
    Initialized,
    /// The bootstrap ran and stopped at a failure; nothing is armed.
    Failed,
}

pub struct PageBootstrap {
    service: Arc<dyn TweetService>,
    document: Arc<dyn Document>,
    errors: Arc<dyn ErrorSink>,
    ids: PageIds,
    state: Mutex<PageState>,
}

impl PageBootstrap {
    pub fn new(
        service: Arc<dyn TweetService>,
        document: Arc<dyn Document>,
        errors: Arc<dyn ErrorSink>,
    ) -> Self {
        Self {
            service,
            document,
            errors,
            ids: PageIds::default(),
            state: Mutex::new(PageState::Pending),
        }
    }

    pub fn with_ids(mut self, ids: PageIds) -> Self {
        self.ids = ids;
        self
    }

    pub fn state(&self) -> PageState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load-event entry point: run [`Self::initialize`] and hand any failure
    /// to the error sink. Returns the resulting state.
    pub async fn load(&self) -> PageState {
        if let Err(err) = self.initialize().await {
            self.errors.report(ErrorOrigin::Load, &err);
        }
        self.state()
    }

    /// Render the initial tweet list and arm the send control.
    ///
    /// Runs at most once per bootstrap; later calls fail with
    /// [`BoardError::AlreadyInitialized`] and touch nothing.
    pub async fn initialize(&self) -> Result<()> {
        self.begin()?;
        let outcome = self.run().await;
        let next = match outcome {
            Ok(()) => PageState::Initialized,
            Err(_) => PageState::Failed,
        };
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
        outcome
    }

    fn begin(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state != PageState::Pending {
            return Err(BoardError::AlreadyInitialized);
        }
        *state = PageState::Loading;
        Ok(())
    }

    async fn run(&self) -> Result<()> {
        let container = self
            .document
            .container(&self.ids.container)
            .ok_or_else(|| BoardError::ElementNotFound(self.ids.container.clone()))?;

        tracing::debug!(container = %self.ids.container, "page.initialize.fetch");
        let tweets = self.service.get_tweets().await?;
        container.append_tweets(&tweets);
        tracing::info!(count = tweets.len(), "page.initialize.rendered");

        let send = self
            .document
            .control(&self.ids.send_control)
            .ok_or_else(|| BoardError::ElementNotFound(self.ids.send_control.clone()))?;
        send.on_click(self.post_handler(container));
        tracing::debug!(control = %self.ids.send_control, "page.initialize.armed");
        Ok(())
    }

    fn post_handler(&self, container: Arc<dyn RenderSink>) -> ClickHandler {
        let service = Arc::clone(&self.service);
        let errors = Arc::clone(&self.errors);
        Arc::new(move || {
            let service = Arc::clone(&service);
            let container = Arc::clone(&container);
            let errors = Arc::clone(&errors);
            async move {
                match service.post_tweet().await {
                    Ok(tweet) => {
                        tracing::debug!(id = %tweet.id, "page.post.appended");
                        container.append_tweets(std::slice::from_ref(&tweet));
                    }
                    Err(err) => errors.report(ErrorOrigin::Post, &err),
                }
            }
            .boxed()
        })
    }
}
