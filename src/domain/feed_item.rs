/// One `<item>` of the feed, with the image fields lifted out of its
/// description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub image_source: String,
    /// Usually identical to the alt text; this is what gets printed.
    pub image_title: String,
    pub image_alt_text: String,
    /// Raw RFC 2822 string, e.g. `Fri, 31 May 2024 04:00:00 -0000`.
    pub publish_date: String,
    /// Usually identical to the link.
    pub guid: String,
}

impl FeedItem {
    /// Format: "{image_title} -- {guid}"
    pub fn one_line(&self) -> String {
        format!("{} -- {}", self.image_title, self.guid)
    }

    /// Fortune-style: wrapped image title, then the attribution on its own line.
    pub fn fortune(&self, width: usize) -> String {
        format!(
            "{}\n\t\t-- {}",
            crate::format::line_wrap(&self.image_title, width),
            self.guid
        )
    }
}
