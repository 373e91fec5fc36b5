use rss::Channel;
use scraper::{Html, Selector};

use crate::domain::FeedItem;
use crate::errors::FeedError;

/// Image attributes carried in an item's description.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Image {
    source: String,
    title: String,
    alt: String,
}

/// Parse raw feed bytes into a channel.
pub fn parse_channel(bytes: &[u8]) -> Result<Channel, FeedError> {
    Channel::read_from(bytes).map_err(|e| FeedError::Parse(e.to_string()))
}

/// Parse raw feed bytes straight into feed items.
pub fn parse_items(bytes: &[u8]) -> Result<Vec<FeedItem>, FeedError> {
    items_from_channel(&parse_channel(bytes)?)
}

/// Extract every `<item>` of the channel, in document order.
///
/// All or nothing: the first item missing a field fails the whole call.
pub fn items_from_channel(channel: &Channel) -> Result<Vec<FeedItem>, FeedError> {
    channel
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| item_from_rss(index, item))
        .collect()
}

fn item_from_rss(index: usize, item: &rss::Item) -> Result<FeedItem, FeedError> {
    let require = |value: Option<&str>, field: &'static str| {
        value
            .map(str::to_string)
            .ok_or(FeedError::MissingField { index, field })
    };

    let title = require(item.title(), "title")?;
    let link = require(item.link(), "link")?;
    let publish_date = require(item.pub_date(), "pubDate")?;
    let guid = require(item.guid().map(|g| g.value()), "guid")?;
    let description = require(item.description(), "description")?;

    // Image data only lives inside the escaped HTML of <description>
    let image = image_from_description(index, &description)?;

    Ok(FeedItem {
        title,
        link,
        image_source: image.source,
        image_title: image.title,
        image_alt_text: image.alt,
        publish_date,
        guid,
    })
}

fn image_from_description(index: usize, description: &str) -> Result<Image, FeedError> {
    let fragment = Html::parse_fragment(description);
    let selector = Selector::parse("img").map_err(|e| FeedError::Parse(e.to_string()))?;

    let img = fragment
        .select(&selector)
        .next()
        .ok_or(FeedError::MissingImage { index })?;

    let attr = |attribute: &'static str| {
        img.value()
            .attr(attribute)
            .map(str::to_string)
            .ok_or(FeedError::MissingImageAttribute { index, attribute })
    };

    Ok(Image {
        source: attr("src")?,
        title: attr("title")?,
        alt: attr("alt")?,
    })
}
