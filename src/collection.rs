use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};

use crate::{
    model::{Collection, GalleryEntry},
    network::http::{self, request_json},
};

pub const DEFAULT_ENDPOINT: &str = "https://iiif-backend.vercel.app/saveCollection";

const GENERIC_FAILURE: &str = "Failed to save collection";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("please enter a collection name")]
    Validation,

    #[error("{0}")]
    Remote(String),

    #[error("network: {0}")]
    Network(#[from] http::Error),
}

/// Request body shape expected by the save endpoint.
///
/// `flat`: `{collectionName, collection: {title, manifests}}`
/// `nested`: `{collection: {collectionName, title, manifests}}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Envelope {
    #[default]
    Flat,
    Nested,
}

mod sealed {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FlatRequest<'a> {
        pub collection_name: &'a str,
        pub collection: FlatBody<'a>,
    }

    #[derive(Serialize)]
    pub struct FlatBody<'a> {
        pub title: &'a str,
        pub manifests: &'a [String],
    }

    #[derive(Serialize)]
    pub struct NestedRequest<'a> {
        pub collection: NestedBody<'a>,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct NestedBody<'a> {
        pub collection_name: &'a str,
        pub title: &'a str,
        pub manifests: &'a [String],
    }

    #[derive(Serialize)]
    #[serde(untagged)]
    pub enum Payload<'a> {
        Flat(FlatRequest<'a>),
        Nested(NestedRequest<'a>),
    }

    #[derive(Debug, Deserialize)]
    pub struct ErrorBody {
        pub error: Option<String>,
    }
}

impl Envelope {
    pub fn payload<'a>(&self, collection: &'a Collection) -> impl Serialize + 'a {
        use sealed::*;

        match self {
            Envelope::Flat => Payload::Flat(FlatRequest {
                collection_name: &collection.name,
                collection: FlatBody {
                    title: &collection.title,
                    manifests: &collection.manifests,
                },
            }),
            Envelope::Nested => Payload::Nested(NestedRequest {
                collection: NestedBody {
                    collection_name: &collection.name,
                    title: &collection.title,
                    manifests: &collection.manifests,
                },
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Exporter {
    client: Client,
    endpoint: String,
    envelope: Envelope,
}

impl Exporter {
    pub fn new(client: Client, endpoint: impl Into<String>, envelope: Envelope) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            envelope,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `manifests` is every entry's `info_url`, in the order given.
    pub async fn export<'a>(
        &self,
        name: &str,
        title: &str,
        entries: impl IntoIterator<Item = &'a GalleryEntry>,
    ) -> Result<(), Error> {
        if name.trim().is_empty() {
            return Err(Error::Validation);
        }

        let collection = Collection::from_entries(name, title, entries);

        self.save(&collection).await
    }

    /// One POST, no retries. Nothing is kept locally when it fails.
    pub async fn save(&self, collection: &Collection) -> Result<(), Error> {
        if collection.name.trim().is_empty() {
            return Err(Error::Validation);
        }

        let payload = self.envelope.payload(collection);
        let resp = request_json(&self.client, Method::POST, &self.endpoint, &payload).await?;

        let status = resp.status();

        if status.is_success() {
            tracing::info!(
                "saved collection {:?} ({} manifests) to {}",
                collection.name,
                collection.manifests.len(),
                self.endpoint
            );

            Ok(())
        } else {
            let message = resp
                .json::<sealed::ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .filter(|x| !x.trim().is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_owned());

            tracing::warn!("save collection {:?}: {status}: {message}", collection.name);

            Err(Error::Remote(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::{
        gallery::Gallery,
        image,
        test_server::{self, TestServer},
    };

    use super::*;

    fn entry(service: &str) -> GalleryEntry {
        GalleryEntry::new(image::thumbnail_url(service), "t", "a", "d", "i")
    }

    fn exporter(server: &TestServer, envelope: Envelope) -> Exporter {
        Exporter::new(test_server::client(), server.url("/saveCollection"), envelope)
    }

    #[test]
    fn nested_payload_shape() {
        let collection = Collection {
            name: "herbals".to_owned(),
            title: "Herbals".to_owned(),
            manifests: vec!["https://x.org/a/info.json".to_owned()],
        };

        let value = serde_json::to_value(Envelope::Nested.payload(&collection)).unwrap();

        assert_eq!(
            value,
            json!({
                "collection": {
                    "collectionName": "herbals",
                    "title": "Herbals",
                    "manifests": ["https://x.org/a/info.json"],
                }
            })
        );
    }

    #[tokio::test]
    async fn posts_flat_envelope_in_gallery_order() {
        let server = TestServer::start(vec![("/saveCollection", 200, "{\"ok\": true}")]).await;

        let mut gallery = Gallery::new();
        let a = gallery.append(entry("https://x.org/a"));
        gallery.append(entry("https://x.org/b"));
        gallery.append(entry("https://x.org/c"));
        gallery.remove(a, |_| true);
        gallery.append(entry("https://x.org/a"));

        exporter(&server, Envelope::Flat)
            .export("medieval", "Medieval herbals", gallery.entries())
            .await
            .unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");

        let body: Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(
            body,
            json!({
                "collectionName": "medieval",
                "collection": {
                    "title": "Medieval herbals",
                    "manifests": [
                        "https://x.org/b/info.json",
                        "https://x.org/c/info.json",
                        "https://x.org/a/info.json",
                    ],
                }
            })
        );
    }

    #[tokio::test]
    async fn empty_name_is_rejected_before_sending() {
        let server = TestServer::start(vec![("/saveCollection", 200, "{}")]).await;

        let err = exporter(&server, Envelope::Flat)
            .export("  ", "title", [&entry("https://x.org/a")])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation));
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn remote_error_message_from_body() {
        let server = TestServer::start(vec![(
            "/saveCollection",
            409,
            "{\"error\": \"Collection already exists\"}",
        )])
        .await;

        let err = exporter(&server, Envelope::Flat)
            .export("dupe", "", [&entry("https://x.org/a")])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Collection already exists");
    }

    #[tokio::test]
    async fn remote_error_without_body_is_generic() {
        let server = TestServer::start(vec![("/saveCollection", 500, "")]).await;

        let err = exporter(&server, Envelope::Nested)
            .export("c", "", [&entry("https://x.org/a")])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Remote(ref m) if m == GENERIC_FAILURE));
    }
}
