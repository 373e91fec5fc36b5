pub mod fetch_service;

pub use fetch_service::{FeedFetcher, FetchService, XKCD_RSS_URL};

#[cfg(test)]
pub use fetch_service::MockFeedFetcher;
