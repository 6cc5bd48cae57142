use std::{io, path::Path};

use serde::Deserialize;

use crate::collection::{Envelope, DEFAULT_ENDPOINT};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("read {0}: {1}")]
    Read(String, io::Error),

    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
}

/// ```toml
/// save_endpoint = "https://iiif-backend.vercel.app/saveCollection"
/// envelope = "flat" # or "nested"
/// user_agent = "iiif-curator/0.1.0"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub save_endpoint: String,
    pub envelope: Envelope,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_endpoint: DEFAULT_ENDPOINT.to_owned(),
            envelope: Envelope::default(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
                .to_owned(),
        }
    }
}

impl Config {
    pub fn from_toml(s: &str) -> Result<Self, Error> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        let s = std::fs::read_to_string(path)
            .map_err(|err| Error::Read(path.display().to_string(), err))?;

        Self::from_toml(&s)
    }
}
