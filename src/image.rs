//! IIIF Image API URL convention.
//!
//! `{service}/full/!200,200/0/default.jpg` is the card thumbnail (fit inside 200x200,
//! upright, default quality), `{service}/info.json` the deep-zoom descriptor.

use bytes::Bytes;
use reqwest::{Client, Method};

use crate::{
    model::GalleryEntry,
    network::http::{self, request},
};

pub const THUMBNAIL_SIZE: &str = "!200,200";

const REGION_MARKER: &str = "/full/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Thumbnail,
    Info,
}

pub struct Image {
    url: String,
}

impl Image {
    /// The card's own URLs, without re-deriving them from a service id.
    pub fn of(entry: &GalleryEntry, kind: ImageKind) -> Self {
        let url = match kind {
            ImageKind::Thumbnail => entry.thumbnail_url.clone(),
            ImageKind::Info => entry.info_url.clone(),
        };

        Self { url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn ext(&self) -> Option<&str> {
        self.url.rsplit('/').next()?.rsplit_once('.').map(|(_, ext)| ext)
    }

    pub async fn download(&self, client: &Client) -> crate::Result<Bytes> {
        let resp = request(client, Method::GET, &self.url).await?;
        let resp = http::ensure_success(resp)?;

        Ok(resp.bytes().await?)
    }
}

fn trim_service_id(service_id: &str) -> &str {
    service_id.trim().trim_end_matches('/')
}

pub fn thumbnail_url(service_id: &str) -> String {
    format!(
        "{}/full/{THUMBNAIL_SIZE}/0/default.jpg",
        trim_service_id(service_id)
    )
}

pub fn info_url(service_id: &str) -> String {
    format!("{}/info.json", trim_service_id(service_id))
}

/// Cuts everything from the last `/full/` on and appends `/info.json`.
///
/// Without a `/full/` segment the whole URL is treated as the service id.
pub fn info_url_from_thumbnail(thumbnail_url: &str) -> String {
    let service_id = thumbnail_url
        .rfind(REGION_MARKER)
        .map(|at| &thumbnail_url[..at])
        .unwrap_or(thumbnail_url);

    info_url(service_id)
}
