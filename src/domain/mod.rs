pub mod feed_item;
pub mod options;
pub mod request_result;

pub use feed_item::FeedItem;
pub use options::Options;
pub use request_result::{RequestResult, RequestStatus};
