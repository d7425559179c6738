#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tweetboard_common::{BoardError, Result};
use tweetboard_page::{
    ClickHandler, Control, Document, ErrorOrigin, ErrorSink, PageBootstrap, RenderSink,
};
use tweetboard_service::{Tweet, TweetService};

pub fn tweet(id: &str) -> Tweet {
    Tweet {
        id: id.to_string(),
        author: "zig".to_string(),
        message: format!("message {id}"),
        created_at: NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        likes: 0,
    }
}

pub fn tweets(ids: &[&str]) -> Vec<Tweet> {
    ids.iter().map(|id| tweet(id)).collect()
}

/// Records every append call.
#[derive(Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<Tweet>>,
    appends: AtomicUsize,
}

impl RecordingSink {
    pub fn ids(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|t| t.id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn append_calls(&self) -> usize {
        self.appends.load(Ordering::SeqCst)
    }
}

impl RenderSink for RecordingSink {
    fn append_tweets(&self, tweets: &[Tweet]) {
        self.appends.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().extend_from_slice(tweets);
    }
}

/// A button that spawns each registered handler per click.
#[derive(Default)]
pub struct FakeButton {
    handlers: Mutex<Vec<ClickHandler>>,
}

impl FakeButton {
    pub fn is_armed(&self) -> bool {
        !self.handlers.lock().unwrap().is_empty()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.lock().unwrap().len()
    }

    pub fn click(&self) -> Vec<JoinHandle<()>> {
        let handlers = self.handlers.lock().unwrap().clone();
        handlers.into_iter().map(|h| tokio::spawn(h())).collect()
    }
}

impl Control for FakeButton {
    fn on_click(&self, handler: ClickHandler) {
        self.handlers.lock().unwrap().push(handler);
    }
}

pub struct FakeDocument {
    pub sink: Option<Arc<RecordingSink>>,
    pub button: Option<Arc<FakeButton>>,
}

impl FakeDocument {
    pub fn complete() -> Self {
        Self {
            sink: Some(Arc::default()),
            button: Some(Arc::default()),
        }
    }

    pub fn sink(&self) -> Arc<RecordingSink> {
        self.sink.clone().expect("document has a container")
    }

    pub fn button(&self) -> Arc<FakeButton> {
        self.button.clone().expect("document has a button")
    }
}

impl Document for FakeDocument {
    fn container(&self, id: &str) -> Option<Arc<dyn RenderSink>> {
        if id != "tweets" {
            return None;
        }
        self.sink.clone().map(|s| s as Arc<dyn RenderSink>)
    }

    fn control(&self, id: &str) -> Option<Arc<dyn Control>> {
        if id != "tweetbtn" {
            return None;
        }
        self.button.clone().map(|b| b as Arc<dyn Control>)
    }
}

#[derive(Default)]
pub struct RecordingErrors {
    reports: Mutex<Vec<(ErrorOrigin, String)>>,
}

impl RecordingErrors {
    pub fn reports(&self) -> Vec<(ErrorOrigin, String)> {
        self.reports.lock().unwrap().clone()
    }
}

impl ErrorSink for RecordingErrors {
    fn report(&self, origin: ErrorOrigin, err: &BoardError) {
        self.reports.lock().unwrap().push((origin, err.to_string()));
    }
}

/// Tweet service whose answers are scripted by the test.
///
/// Each `post_tweet` call takes the oldest queued answer and waits for it,
/// so a test can hold several posts in flight and settle them in any order.
#[derive(Default)]
pub struct ScriptedService {
    list: Mutex<Option<Result<Vec<Tweet>>>>,
    posts: Mutex<VecDeque<oneshot::Receiver<Result<Tweet>>>>,
    list_calls: AtomicUsize,
    posts_started: AtomicUsize,
    like_calls: AtomicUsize,
}

impl ScriptedService {
    pub fn listing(tweets: Vec<Tweet>) -> Self {
        let svc = Self::default();
        *svc.list.lock().unwrap() = Some(Ok(tweets));
        svc
    }

    pub fn failing_list(message: &str) -> Self {
        let svc = Self::default();
        *svc.list.lock().unwrap() = Some(Err(BoardError::Request(message.to_string())));
        svc
    }

    /// Queue an already settled post answer.
    pub fn answer_post(&self, answer: Result<Tweet>) {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(answer);
        self.posts.lock().unwrap().push_back(rx);
    }

    /// Queue a post answer the test settles later through the sender.
    pub fn gate_post(&self) -> oneshot::Sender<Result<Tweet>> {
        let (tx, rx) = oneshot::channel();
        self.posts.lock().unwrap().push_back(rx);
        tx
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn posts_started(&self) -> usize {
        self.posts_started.load(Ordering::SeqCst)
    }

    pub fn like_calls(&self) -> usize {
        self.like_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TweetService for ScriptedService {
    async fn get_tweets(&self) -> Result<Vec<Tweet>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.list.lock().unwrap().take().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn post_tweet(&self) -> Result<Tweet> {
        self.posts_started.fetch_add(1, Ordering::SeqCst);
        let next = self.posts.lock().unwrap().pop_front();
        match next {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(BoardError::Request("post abandoned".into()))),
            None => Err(BoardError::EmptyDraft),
        }
    }

    async fn like_tweet(&self, id: &str) -> Result<Tweet> {
        self.like_calls.fetch_add(1, Ordering::SeqCst);
        Ok(tweet(id))
    }
}

pub struct Page {
    pub bootstrap: PageBootstrap,
    pub service: Arc<ScriptedService>,
    pub document: Arc<FakeDocument>,
    pub errors: Arc<RecordingErrors>,
}

impl Page {
    pub fn new(service: ScriptedService, document: FakeDocument) -> Self {
        let service = Arc::new(service);
        let document = Arc::new(document);
        let errors = Arc::new(RecordingErrors::default());
        let bootstrap = PageBootstrap::new(
            service.clone() as Arc<dyn TweetService>,
            document.clone() as Arc<dyn Document>,
            errors.clone() as Arc<dyn ErrorSink>,
        );
        Self {
            bootstrap,
            service,
            document,
            errors,
        }
    }
}

/// Yield to the runtime until `cond` holds.
pub async fn settle(mut cond: impl FnMut() -> bool) {
    for _ in 0..1_000 {
        if cond() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
