use crate::styles;
use ratatui::style::Style;
use tweetboard_service::Tweet;

#[derive(Clone, Debug)]
pub struct FeedLine {
    pub text: String,
    pub style: Style,
}

impl FeedLine {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One tweet as a header line, its indented message and a spacer.
pub fn tweet_lines(tweet: &Tweet) -> Vec<FeedLine> {
    let mut out = vec![FeedLine::new(
        format!(
            "@{} · {} · ♥ {}",
            tweet.author,
            tweet.created_at.format("%Y-%m-%d %H:%M"),
            tweet.likes
        ),
        styles::author(),
    )];
    out.extend(
        tweet
            .message
            .lines()
            .map(|line| FeedLine::new(format!("  {line}"), styles::message())),
    );
    out.push(FeedLine::new(String::new(), styles::meta()));
    out
}
