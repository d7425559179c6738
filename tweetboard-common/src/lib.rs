//! Shared types and utilities for the Tweetboard crates.
//!
//! This crate carries the workspace-wide error type and the `tracing`
//! initialiser. It stays dependency-light so every other crate (including
//! the HTTP layer and the page bootstrap) can depend on it.
//!
//! # Overview
//!
//! - [`BoardError`] and [`Result`]: shared error handling
//! - [`observability`]: centralised tracing/logging initialisation
//!
//! # Examples
//!
//! ```rust
//! use tweetboard_common::BoardError;
//!
//! let err = BoardError::ElementNotFound("tweets".into());
//! assert_eq!(err.to_string(), "element not found: #tweets");
//! assert!(!err.is_request_failure());
//! ```

pub mod observability;

/// Error types used across Tweetboard.
#[derive(thiserror::Error, Debug)]
pub enum BoardError {
    /// The host document has no element with the requested id.
    #[error("element not found: #{0}")]
    ElementNotFound(String),

    /// The page bootstrap ran a second time for the same page load.
    #[error("page already initialized")]
    AlreadyInitialized,

    /// A request to the tweet service failed (network, HTTP status or decode).
    #[error("tweet service request failed: {0}")]
    Request(String),

    /// The backend has no tweet with this id.
    #[error("tweet not found: {0}")]
    TweetNotFound(String),

    /// `post_tweet` was called with nothing submitted in the compose box.
    #[error("nothing to post: compose box is empty")]
    EmptyDraft,

    /// Configuration was incomplete or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoardError {
    /// True for failures of the tweet service collaborator itself, as opposed
    /// to problems with the host page or local state.
    pub fn is_request_failure(&self) -> bool {
        matches!(self, Self::Request(_) | Self::TweetNotFound(_))
    }
}

/// Convenient alias for results that use [`BoardError`].
pub type Result<T> = std::result::Result<T, BoardError>;
