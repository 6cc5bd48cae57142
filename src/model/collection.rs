use serde::{Deserialize, Serialize};

use super::GalleryEntry;

/// Named list of descriptor URLs, built right before a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    pub title: String,
    pub manifests: Vec<String>,
}

impl Collection {
    pub fn from_entries<'a>(
        name: impl Into<String>,
        title: impl Into<String>,
        entries: impl IntoIterator<Item = &'a GalleryEntry>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            manifests: entries.into_iter().map(|e| e.info_url.clone()).collect(),
        }
    }
}
