//! Compose state shared between a host page and the tweet service.
//!
//! The host submits one draft per activation of its send control; each
//! `post_tweet` call consumes exactly one draft, oldest first. Queueing keeps
//! overlapping posts from reading the same text twice.
use crate::types::TweetRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tweetboard_common::{BoardError, Result};

#[derive(Clone, Debug)]
pub struct ComposeBox {
    author: Arc<str>,
    drafts: Arc<Mutex<VecDeque<String>>>,
}

impl ComposeBox {
    /// ```
    /// use tweetboard_service::ComposeBox;
    ///
    /// let compose = ComposeBox::new("zig");
    /// compose.submit("first");
    /// compose.submit("second");
    ///
    /// let draft = compose.take_draft().unwrap();
    /// assert_eq!(draft.author, "zig");
    /// assert_eq!(draft.message, "first");
    /// assert_eq!(compose.pending(), 1);
    /// ```
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            author: Arc::from(author.into()),
            drafts: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Queue `message` as the next draft.
    pub fn submit(&self, message: impl Into<String>) {
        self.drafts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(message.into());
    }

    /// Remove the oldest draft, or fail with [`BoardError::EmptyDraft`].
    pub fn take_draft(&self) -> Result<TweetRequest> {
        let message = self
            .drafts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or(BoardError::EmptyDraft)?;
        Ok(TweetRequest {
            author: self.author.to_string(),
            message,
        })
    }

    pub fn pending(&self) -> usize {
        self.drafts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
