//! Tweet data access for Tweetboard.
//!
//! The [`TweetService`] trait is what the page bootstrap talks to. Two
//! implementations ship here:
//!
//! - [`HttpTweetService`]: the JSON API served by the tweet backend
//!   (`/api/tweets`, `/api/tweets/{id}/like-tweet`)
//! - [`LocalTweetService`]: an in-process [`TweetStore`] with the same
//!   semantics, used for local runs and tests
//!
//! Both read new tweets from a shared [`ComposeBox`].
pub mod client;
pub mod compose;
pub mod store;
pub mod traits;
pub mod types;

pub use client::{HttpTweetService, TweetApi};
pub use compose::ComposeBox;
pub use store::{LocalTweetService, TweetStore};
pub use traits::TweetService;
pub use types::{Tweet, TweetRequest};
