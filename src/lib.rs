pub mod config;
pub mod error;
pub mod memory;
pub mod model;
pub mod traits;

pub use config::StoreConfig;
pub use error::TweetError;
pub use memory::MemTweetStore;
pub use model::{LikedTweet, Principal, Tweet, TweetId};
pub use traits::{SharedTweetStore, TweetStore};
