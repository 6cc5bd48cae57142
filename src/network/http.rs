use reqwest::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    Client, Method, Response, StatusCode,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Status: {0} {1}")]
    Status(StatusCode, String),

    #[error("Transport: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Builds the client every request of an [`App`](crate::App) goes through.
pub fn client(user_agent: &str) -> reqwest::Result<Client> {
    Client::builder().user_agent(user_agent).build()
}

pub async fn request(client: &Client, method: Method, url: &str) -> Result<Response, Error> {
    request_with_headers(client, method, std::iter::empty(), url).await
}

pub async fn request_with_headers(
    client: &Client,
    method: Method,
    headers: impl Iterator<Item = (HeaderName, HeaderValue)>,
    url: &str,
) -> Result<Response, Error> {
    let resp = client
        .request(method, url)
        .headers(HeaderMap::from_iter(headers))
        .send()
        .await?;

    Ok(resp)
}

pub async fn request_json<T: Serialize + ?Sized>(
    client: &Client,
    method: Method,
    url: &str,
    body: &T,
) -> Result<Response, Error> {
    let resp = client
        .request(method, url)
        .header(header::ACCEPT, "application/json")
        .json(body)
        .send()
        .await?;

    Ok(resp)
}

/// Passes 2xx responses through, everything else becomes [`Error::Status`].
pub fn ensure_success(resp: Response) -> Result<Response, Error> {
    let status = resp.status();

    if status.is_success() {
        Ok(resp)
    } else {
        let text = status.canonical_reason().unwrap_or("Unknown Status").to_owned();
        Err(Error::Status(status, text))
    }
}
