use crate::{errors::RegistryError, storage::FileWriter};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::HeaderMap, StatusCode};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// A layer archive, either saved to disk or left in the response
///
/// A download that gets an HTTP error status is never written to disk. Its
/// buffered response comes back as [Layer::Response] instead.
#[derive(Debug)]
pub enum Layer {
    Saved(PathBuf),
    Response(RawResponse),
}

/// A complete response, as returned by [Transport::get]
#[derive(Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    /// Case-insensitive lookup of a response header as text
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

impl fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// The HTTP GET primitive every registry operation is built on
///
/// Implementations must not treat an HTTP error status as a failure. The
/// status and body are handed back, and callers decide what a non-JSON
/// body means. Only a request that could not complete is an error.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a GET and buffer the whole response
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<RawResponse, RegistryError>;

    /// Perform a GET and stream a successful body into a file at `path`
    ///
    /// An error status leaves `path` untouched and returns the buffered
    /// response. A body that fails partway removes the partial file.
    async fn download(
        &self,
        url: &str,
        headers: HeaderMap,
        path: &Path,
    ) -> Result<Layer, RegistryError>;
}

/// [Transport] over a shared [reqwest::Client]
#[derive(Clone, Debug)]
pub struct HttpTransport {
    req: reqwest::Client,
}

impl HttpTransport {
    pub fn new(req: reqwest::Client) -> Self {
        HttpTransport { req }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<RawResponse, RegistryError> {
        log::debug!("GET <{}>", url);
        let response = self.req.get(url).headers(headers).send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        log::debug!("<{}> {}, {} bytes", url, status, body.len());
        log::trace!("<{}> body, {}", url, String::from_utf8_lossy(&body));
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    async fn download(
        &self,
        url: &str,
        headers: HeaderMap,
        path: &Path,
    ) -> Result<Layer, RegistryError> {
        log::debug!("GET <{}> -> {:?}", url, path);
        let mut response = self.req.get(url).headers(headers).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("<{}> {}, not saving to {:?}", url, status, path);
            let headers = response.headers().clone();
            let body = response.bytes().await?;
            log::trace!("<{}> body, {}", url, String::from_utf8_lossy(&body));
            return Ok(Layer::Response(RawResponse {
                status,
                headers,
                body,
            }));
        }

        let mut writer = FileWriter::begin(path).await?;
        let result: Result<(), RegistryError> = loop {
            match response.chunk().await {
                Err(err) => break Err(err.into()),
                Ok(None) => break Ok(()),
                Ok(Some(chunk)) => match writer.write_all(&chunk).await {
                    Err(err) => break Err(err),
                    Ok(()) => (),
                },
            }
        };

        if let Err(err) = result {
            if let Err(cleanup) = writer.remove_temp().await {
                log::warn!("couldn't remove partial download for {:?}, {}", path, cleanup);
            }
            return Err(err);
        }
        log::debug!("<{}> downloaded {} bytes", url, writer.size());
        Ok(Layer::Saved(writer.commit().await?))
    }
}
