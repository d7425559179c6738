use crate::types::Tweet;
use async_trait::async_trait;
use tweetboard_common::Result;

#[async_trait]
pub trait TweetService: Send + Sync {
    /// Current tweets, in the order the backend returns them.
    async fn get_tweets(&self) -> Result<Vec<Tweet>>;

    /// Create a tweet from the next submitted compose draft.
    async fn post_tweet(&self) -> Result<Tweet>;

    /// Add one like to the tweet with `id` and return the updated tweet.
    async fn like_tweet(&self, id: &str) -> Result<Tweet>;
}
