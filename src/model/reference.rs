use std::fmt::Display;

use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("empty manifest reference")]
    Empty,

    #[error("invalid manifest url: {0:?}: {1}")]
    Invalid(String, url::ParseError),
}

/// URL of a IIIF manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ManifestReference(Url);

impl ManifestReference {
    pub fn parse(s: &str) -> Result<Self, ReferenceError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(ReferenceError::Empty);
        }

        Url::parse(s)
            .map(Self)
            .map_err(|err| ReferenceError::Invalid(s.to_owned(), err))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.0
    }
}

impl Display for ManifestReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ManifestReference {
    type Error = ReferenceError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ManifestReference> for String {
    fn from(r: ManifestReference) -> Self {
        r.0.into()
    }
}
