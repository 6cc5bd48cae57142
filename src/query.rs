//! `?title=..&manifests=a,b` deep links that pre-populate a gallery.

use url::{form_urlencoded, Url};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepLink {
    pub title: Option<String>,
    /// Manifest URLs in link order, still unvalidated.
    pub manifests: Vec<String>,
}

impl DeepLink {
    /// Accepts a whole page URL, `?query` or a bare query string.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        let query = match Url::parse(input) {
            Ok(url) if url.has_host() => url.query().unwrap_or_default().to_owned(),
            _ => input.trim_start_matches('?').to_owned(),
        };

        let mut link = DeepLink::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "title" => link.title = Some(value.into_owned()),
                "manifests" => link.manifests.extend(split_list(&value)),
                _ => {}
            }
        }

        tracing::debug!("deep link: {link:?}");

        link
    }
}

/// Comma separated, trimmed, empties dropped.
pub fn split_list(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(',')
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(str::to_owned)
}
