pub mod rss_feed;

pub use rss_feed::{items_from_channel, parse_channel, parse_items};
