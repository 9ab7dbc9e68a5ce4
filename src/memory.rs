use std::collections::BTreeSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::error::TweetError;
use crate::model::{LikedTweet, Principal, Tweet, TweetId};
use crate::traits::TweetStore;

/// Stored form of a tweet. The like count is not stored; it is the size of
/// `liked_by` at the time a view is built.
struct Record {
    author: Principal,
    text: String,
    liked_by: BTreeSet<Principal>,
    deleted: bool,
}

impl Record {
    fn view(&self, id: TweetId) -> Tweet {
        Tweet {
            id,
            author: self.author.clone(),
            text: self.text.clone(),
            likes_count: self.liked_by.len(),
            deleted: self.deleted,
        }
    }
}

/// Records indexed by id. Ids are positions in `records`, so they are dense,
/// start at 0 and are never reused: deleted records stay in place.
#[derive(Default)]
struct State {
    records: Vec<Record>,
}

impl State {
    fn live_mut(&mut self, id: TweetId) -> Result<&mut Record, TweetError> {
        usize::try_from(id.0)
            .ok()
            .and_then(|idx| self.records.get_mut(idx))
            .filter(|r| !r.deleted)
            .ok_or(TweetError::NotFound(id))
    }

    fn live(&self) -> impl Iterator<Item = (TweetId, &Record)> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.deleted)
            .map(|(idx, r)| (TweetId(idx as u64), r))
    }
}

/// MemTweetStore keeps all tweets in process memory for the lifetime of the
/// store.
///
/// A single `RwLock` guards the whole state. Each mutation holds the write
/// lock from its first check to its last write, so calls are serialized and
/// no caller ever observes a half-applied operation. Every check runs before
/// any write, so a poisoned lock is recovered rather than propagated.
pub struct MemTweetStore {
    config: StoreConfig,
    state: RwLock<State>,
}

impl MemTweetStore {
    /// Create an empty store with the default text limits.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store with the given text limits.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            state: RwLock::new(State::default()),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_author(record: &Record, caller: &Principal, id: TweetId) -> Result<(), TweetError> {
        if record.author != *caller {
            warn!(%id, %caller, author = %record.author, "rejected non-author mutation");
            return Err(TweetError::Unauthorized {
                id,
                caller: caller.clone(),
            });
        }
        Ok(())
    }
}

impl Default for MemTweetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TweetStore for MemTweetStore {
    fn create_tweet(&self, caller: &Principal, text: &str) -> Result<TweetId, TweetError> {
        self.config.validate_text(text)?;

        let mut state = self.write();
        let id = TweetId(state.records.len() as u64);
        state.records.push(Record {
            author: caller.clone(),
            text: text.to_string(),
            liked_by: BTreeSet::new(),
            deleted: false,
        });

        debug!(%id, author = %caller, "tweet created");
        Ok(id)
    }

    fn update_tweet(&self, caller: &Principal, id: TweetId, text: &str) -> Result<(), TweetError> {
        let mut state = self.write();
        let record = state.live_mut(id)?;
        Self::check_author(record, caller, id)?;
        self.config.validate_text(text)?;

        record.text = text.to_string();
        debug!(%id, "tweet updated");
        Ok(())
    }

    fn delete_tweet(&self, caller: &Principal, id: TweetId) -> Result<(), TweetError> {
        let mut state = self.write();
        let record = state.live_mut(id)?;
        Self::check_author(record, caller, id)?;

        record.deleted = true;
        record.liked_by.clear();
        debug!(%id, "tweet deleted");
        Ok(())
    }

    fn toggle_like_tweet(&self, caller: &Principal, id: TweetId) -> Result<(), TweetError> {
        let mut state = self.write();
        let record = state.live_mut(id)?;

        // remove() reports whether caller was present, so exactly one of
        // remove/insert takes effect.
        if record.liked_by.remove(caller) {
            debug!(%id, %caller, likes = record.liked_by.len(), "tweet unliked");
        } else {
            record.liked_by.insert(caller.clone());
            debug!(%id, %caller, likes = record.liked_by.len(), "tweet liked");
        }
        Ok(())
    }

    fn get_tweets(&self) -> Vec<Tweet> {
        self.read().live().map(|(id, r)| r.view(id)).collect()
    }

    fn get_tweets_with_likes(&self) -> Vec<LikedTweet> {
        self.read()
            .live()
            .map(|(id, r)| LikedTweet {
                tweet: r.view(id),
                liked_by: r.liked_by.clone(),
            })
            .collect()
    }
}
