//! In-process tweet backend.
//!
//! Mirrors the HTTP backend: tweets are kept in insertion order, new tweets
//! get a v4 uuid, the current naive UTC time and zero likes.
use crate::compose::ComposeBox;
use crate::traits::TweetService;
use crate::types::{Tweet, TweetRequest};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tweetboard_common::{BoardError, Result};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct TweetStore {
    tweets: Mutex<Vec<Tweet>>,
}

impl TweetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the backend's two greeting tweets.
    ///
    /// ```
    /// use tweetboard_service::TweetStore;
    ///
    /// let store = TweetStore::seeded();
    /// let authors: Vec<_> = store.list().into_iter().map(|t| t.author).collect();
    /// assert_eq!(authors, ["zig", "qwe"]);
    /// ```
    pub fn seeded() -> Self {
        let store = Self::new();
        store.create(TweetRequest {
            author: "zig".into(),
            message: "Hello, world!".into(),
        });
        store.create(TweetRequest {
            author: "qwe".into(),
            message: "Hi !".into(),
        });
        store
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Tweet>> {
        self.tweets.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list(&self) -> Vec<Tweet> {
        self.lock().clone()
    }

    pub fn create(&self, req: TweetRequest) -> Tweet {
        let tweet = Tweet {
            id: Uuid::new_v4().to_string(),
            author: req.author,
            message: req.message,
            created_at: Utc::now().naive_utc(),
            likes: 0,
        };
        self.lock().push(tweet.clone());
        tweet
    }

    /// Increment the like counter; it stops at `u8::MAX`.
    pub fn like(&self, id: &str) -> Result<Tweet> {
        let mut tweets = self.lock();
        let tweet = tweets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| BoardError::TweetNotFound(id.to_string()))?;
        tweet.likes = tweet.likes.saturating_add(1);
        Ok(tweet.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// [`TweetService`] over a shared [`TweetStore`].
#[derive(Clone, Debug)]
pub struct LocalTweetService {
    store: Arc<TweetStore>,
    compose: ComposeBox,
}

impl LocalTweetService {
    pub fn new(store: Arc<TweetStore>, compose: ComposeBox) -> Self {
        Self { store, compose }
    }

    pub fn store(&self) -> &Arc<TweetStore> {
        &self.store
    }
}

#[async_trait]
impl TweetService for LocalTweetService {
    async fn get_tweets(&self) -> Result<Vec<Tweet>> {
        Ok(self.store.list())
    }

    async fn post_tweet(&self) -> Result<Tweet> {
        let draft = self.compose.take_draft()?;
        let tweet = self.store.create(draft);
        tracing::debug!(id = %tweet.id, "tweets.create.local");
        Ok(tweet)
    }

    async fn like_tweet(&self, id: &str) -> Result<Tweet> {
        self.store.like(id)
    }
}
