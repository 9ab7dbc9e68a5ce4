use std::sync::Arc;

use crate::error::TweetError;
use crate::model::{LikedTweet, Principal, Tweet, TweetId};

/// TweetStore holds tweets and their like-sets.
///
/// Every call is atomic: it either completes or fails with no state change.
/// `update_tweet` and `delete_tweet` are restricted to the tweet's author;
/// anyone may toggle a like. Deleted tweets behave as if they never existed
/// for every operation, but their ids are never handed out again.
pub trait TweetStore: Send + Sync {
    /// Create a tweet authored by `caller`. Returns the new id.
    fn create_tweet(&self, caller: &Principal, text: &str) -> Result<TweetId, TweetError>;

    /// Replace the text of a tweet. Only the author may do this.
    fn update_tweet(&self, caller: &Principal, id: TweetId, text: &str) -> Result<(), TweetError>;

    /// Soft-delete a tweet. Only the author may do this. Irreversible.
    fn delete_tweet(&self, caller: &Principal, id: TweetId) -> Result<(), TweetError>;

    /// Add `caller` to the tweet's like-set, or remove it if already present.
    fn toggle_like_tweet(&self, caller: &Principal, id: TweetId) -> Result<(), TweetError>;

    /// All live tweets, ascending by id.
    fn get_tweets(&self) -> Vec<Tweet>;

    /// All live tweets, ascending by id, each with its current like-set.
    fn get_tweets_with_likes(&self) -> Vec<LikedTweet>;
}

/// Shared handle to a store, as passed around by callers.
pub type SharedTweetStore = Arc<dyn TweetStore>;
