use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Tweet identifier. Allocated by the store in creation order, starting at 0,
/// and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TweetId(pub u64);

impl fmt::Display for TweetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An authenticated identity supplied by the caller (account id, address, ...).
/// The store only compares principals for equality and ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Principal {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A tweet as returned by read operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    pub id: TweetId,
    pub author: Principal,
    pub text: String,
    /// Always equal to the size of the tweet's like-set.
    pub likes_count: usize,
    /// Always false in read results; deleted tweets are never returned.
    pub deleted: bool,
}

/// A tweet paired with the principals currently liking it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedTweet {
    #[serde(flatten)]
    pub tweet: Tweet,
    pub liked_by: BTreeSet<Principal>,
}
