//! Client for the tweet backend's JSON API.
//!
//! [`TweetApi`] maps one method to each endpoint; [`HttpTweetService`] adds the
//! compose box so it can stand in as a [`TweetService`]. Each request is sent
//! once and failures come back as [`BoardError`]s.
use crate::compose::ComposeBox;
use crate::traits::TweetService;
use crate::types::{Tweet, TweetRequest};
use async_trait::async_trait;
use std::time::Duration;
use tweetboard_common::{BoardError, Result};
use tweetboard_http::{HttpClient, HttpError, RequestOpts};

const TWEETS_PATH: &str = "api/tweets";

#[derive(Clone, Debug)]
pub struct TweetApi {
    http: HttpClient,
}

impl TweetApi {
    /// `base_url` is the backend root, e.g. `http://127.0.0.1:8080/`.
    pub fn new(base_url: &str) -> Result<Self> {
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let http = HttpClient::new(&base)
            .map_err(|e| BoardError::Config(format!("tweet backend url: {e}")))?;
        Ok(Self { http })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    pub async fn list(&self) -> Result<Vec<Tweet>> {
        let tweets: Vec<Tweet> = self
            .http
            .get_json(TWEETS_PATH, RequestOpts::default())
            .await
            .map_err(request_failed)?;
        tracing::debug!(count = tweets.len(), "tweets.list");
        Ok(tweets)
    }

    pub async fn create(&self, req: &TweetRequest) -> Result<Tweet> {
        let tweet: Tweet = self
            .http
            .post_json(TWEETS_PATH, req, RequestOpts::default())
            .await
            .map_err(request_failed)?;
        tracing::debug!(id = %tweet.id, author = %tweet.author, "tweets.create");
        Ok(tweet)
    }

    pub async fn like(&self, id: &str) -> Result<Tweet> {
        let path = format!("{TWEETS_PATH}/{id}/like-tweet");
        self.http
            .post_empty(&path, RequestOpts::default())
            .await
            .map_err(|e| match e.status() {
                Some(status) if status.as_u16() == 404 => BoardError::TweetNotFound(id.to_string()),
                _ => request_failed(e),
            })
    }
}

fn request_failed(e: HttpError) -> BoardError {
    BoardError::Request(e.to_string())
}

/// [`TweetService`] backed by the HTTP API.
#[derive(Clone, Debug)]
pub struct HttpTweetService {
    api: TweetApi,
    compose: ComposeBox,
}

impl HttpTweetService {
    pub fn new(api: TweetApi, compose: ComposeBox) -> Self {
        Self { api, compose }
    }
}

#[async_trait]
impl TweetService for HttpTweetService {
    async fn get_tweets(&self) -> Result<Vec<Tweet>> {
        self.api.list().await
    }

    async fn post_tweet(&self) -> Result<Tweet> {
        let draft = self.compose.take_draft()?;
        self.api.create(&draft).await
    }

    async fn like_tweet(&self, id: &str) -> Result<Tweet> {
        self.api.like(id).await
    }
}
