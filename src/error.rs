use crate::network;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Http: {0}")]
    Http(#[from] network::http::Error),

    #[error("Reference: {0}")]
    Reference(#[from] crate::model::ReferenceError),

    #[error("Manifest: {0}")]
    Manifest(#[from] crate::manifest::Error),

    #[error("Canvas: {0}")]
    Canvas(#[from] crate::canvas::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(network::http::Error::from(err))
    }
}
