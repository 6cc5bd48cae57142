use serde::{Deserialize, Serialize};

use crate::image;

pub const NO_TITLE: &str = "No title";
pub const UNKNOWN_AUTHOR: &str = "Unknown author";
pub const NO_DATE: &str = "No date";
pub const UNKNOWN_INSTITUTION: &str = "Unknown institution";

/// One rendered canvas card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryEntry {
    pub thumbnail_url: String,
    /// Deep-zoom descriptor; also what gets exported.
    pub info_url: String,
    pub title: String,
    pub author: String,
    pub date: String,
    pub attribution: String,
}

impl GalleryEntry {
    /// `info_url` is always derived from the thumbnail, never passed in.
    pub fn new(
        thumbnail_url: String,
        title: impl Into<String>,
        author: impl Into<String>,
        date: impl Into<String>,
        attribution: impl Into<String>,
    ) -> Self {
        let info_url = image::info_url_from_thumbnail(&thumbnail_url);

        Self {
            thumbnail_url,
            info_url,
            title: title.into(),
            author: author.into(),
            date: date.into(),
            attribution: attribution.into(),
        }
    }
}
