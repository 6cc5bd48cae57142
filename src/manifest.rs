use reqwest::{Client, Method};
use tap::TapFallible;

use crate::{
    model::ManifestReference,
    network::http::{self, request},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("network: {0}")]
    Network(#[from] http::Error),

    #[error("parse: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(http::Error::from(err))
    }
}

pub(crate) mod sealed {
    use either::Either;
    use serde::{de::DeserializeOwned, Deserialize, Deserializer};

    /// IIIF text: a plain string or a language-tagged value list.
    pub type Text = Either<String, Vec<LangString>>;

    #[derive(Debug, Deserialize)]
    pub struct LangString {
        #[serde(rename = "@value", alias = "value")]
        pub value: String,
    }

    pub fn first_text(text: &Text) -> Option<&str> {
        match text {
            Either::Left(s) => Some(s.as_str()),
            Either::Right(values) => values.first().map(|x| x.value.as_str()),
        }
    }

    /// Wrong shapes collapse to the default instead of failing the whole document.
    fn lenient<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + DeserializeOwned,
    {
        let value = Option::<serde_json::Value>::deserialize(d)?;
        let val = value
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        Ok(val)
    }

    fn lenient_text<'de, D>(d: D) -> Result<Option<Text>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<serde_json::Value>::deserialize(d)?;
        let val = value.and_then(|v| either::serde_untagged::deserialize(v).ok());
        Ok(val)
    }

    #[derive(Debug, Deserialize)]
    pub struct Manifest {
        #[serde(default, deserialize_with = "lenient_text")]
        pub label: Option<Text>,
        #[serde(default, deserialize_with = "lenient_text")]
        pub attribution: Option<Text>,
        /// Raw; only the first one is ever looked into.
        #[serde(default, deserialize_with = "lenient")]
        pub sequences: Vec<serde_json::Value>,
    }

    /// Canvases stay raw so one malformed canvas can be skipped on its own.
    pub fn canvases(sequence: &serde_json::Value) -> &[serde_json::Value] {
        sequence
            .get("canvases")
            .and_then(serde_json::Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[derive(Debug, Deserialize)]
    pub struct Canvas {
        #[serde(rename = "@id", alias = "id", default)]
        pub id: Option<String>,
        #[serde(default)]
        pub images: Vec<ImageAnnotation>,
        /// Pairs are parsed one by one in [`Canvas::metadata`].
        #[serde(default, deserialize_with = "lenient")]
        pub metadata: Vec<serde_json::Value>,
    }

    impl Canvas {
        /// Label/value pairs in document order; pairs that don't parse are dropped alone.
        pub fn metadata(&self) -> Vec<Metadata> {
            self.metadata
                .iter()
                .filter_map(|v| Metadata::deserialize(v).ok())
                .collect()
        }
    }

    #[derive(Debug, Deserialize)]
    pub struct ImageAnnotation {
        pub resource: Option<Resource>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Resource {
        #[serde(default, with = "either::serde_untagged_optional")]
        pub service: Option<Either<Service, Vec<Service>>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Service {
        #[serde(rename = "@id", alias = "id", default)]
        pub id: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Metadata {
        #[serde(with = "either::serde_untagged")]
        pub label: Text,
        #[serde(with = "either::serde_untagged")]
        pub value: Text,
    }

    impl Resource {
        pub fn first_service(&self) -> Option<&Service> {
            match self.service.as_ref()? {
                Either::Left(service) => Some(service),
                Either::Right(services) => services.first(),
            }
        }
    }
}

/// A parsed IIIF Presentation manifest, only as deep as extraction needs.
#[derive(Debug)]
pub struct Manifest {
    pub(crate) raw: sealed::Manifest,
}

impl Manifest {
    pub fn from_slice(buf: &[u8]) -> Result<Self, Error> {
        let value = serde_json::from_slice::<serde_json::Value>(buf)?;

        if !value.is_object() {
            return Err(Error::Parse(serde::de::Error::custom(
                "manifest is not a JSON object",
            )));
        }

        let raw = serde_json::from_value::<sealed::Manifest>(value)?;

        Ok(Self { raw })
    }

    pub fn label(&self) -> Option<&str> {
        self.raw.label.as_ref().and_then(sealed::first_text)
    }

    pub fn attribution(&self) -> Option<&str> {
        self.raw.attribution.as_ref().and_then(sealed::first_text)
    }

    /// Canvases of the first sequence; later sequences are never consulted.
    pub fn canvas_count(&self) -> usize {
        self.raw
            .sequences
            .first()
            .map(|s| sealed::canvases(s).len())
            .unwrap_or(0)
    }
}

/// One GET, no retries.
pub async fn fetch(client: &Client, reference: &ManifestReference) -> Result<Manifest, Error> {
    let resp = request(client, Method::GET, reference.as_str()).await?;
    let resp = http::ensure_success(resp)?;

    let buf = resp.bytes().await?;

    Manifest::from_slice(&buf).tap_ok(|manifest| {
        tracing::debug!(
            "manifest {reference}: label = {:?}; canvases = {}",
            manifest.label(),
            manifest.canvas_count()
        )
    })
}
