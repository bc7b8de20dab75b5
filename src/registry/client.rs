//! Requests against the Docker Registry v1 API

use crate::{
    errors::RegistryError,
    image::RepositoryRef,
    manifest::{ImageEntry, Manifest, TagEntry, TagLookup},
    registry::{
        token::REQUEST_TOKEN_HEADER,
        urls::{image_url, index_url, Content, Scope},
        Layer, RawResponse, RegistryClientBuilder, RegistryHosts, Token, Transport,
    },
};

use http::header::HeaderValue;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{fmt, path::Path, sync::Arc};

/// Registry clients talk to a v1 index server and its image server
///
/// The client keeps no state between calls beyond its configuration, so it
/// is cheap to clone and every operation is independent.
#[derive(Clone)]
pub struct Client {
    hosts: RegistryHosts,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").field("hosts", &self.hosts).finish()
    }
}

impl Client {
    /// Construct a new registry client with default options
    pub fn new() -> Result<Client, RegistryError> {
        Client::builder().build()
    }

    /// Construct a registry client with custom options, via
    /// [RegistryClientBuilder]
    pub fn builder() -> RegistryClientBuilder {
        RegistryClientBuilder::new()
    }

    pub(crate) fn from_parts(hosts: RegistryHosts, transport: Arc<dyn Transport>) -> Self {
        Client { hosts, transport }
    }

    /// Return the default `User-Agent` that we use if no other is set
    pub fn default_user_agent() -> HeaderValue {
        static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
        HeaderValue::from_static(USER_AGENT)
    }

    /// Servers this client sends requests to
    pub fn hosts(&self) -> &RegistryHosts {
        &self.hosts
    }

    /// List the image layers in a repository
    ///
    /// No authentication is needed. Returns `None` if the answer had an error
    /// status or was not valid JSON. Valid JSON that is not a list of objects
    /// also gives `None`, since there are no image records to return.
    pub async fn list_images(
        &self,
        repo: &RepositoryRef,
    ) -> Result<Option<Vec<ImageEntry>>, RegistryError> {
        let url = index_url(
            self.hosts.index(),
            Scope::Repositories,
            repo,
            Content::Images,
            None,
        );
        let response = self.transport.get(&url, HeaderMap::new()).await?;
        let images: Option<Vec<ImageEntry>> = decode_json(&url, &response);
        if images.is_none() {
            log::warn!("error retrieving images for {}", repo);
        }
        Ok(images)
    }

    /// Look up one tag, or list every tag in a repository
    ///
    /// With no tag, the full tag list is returned in registry order. With a
    /// tag, the tag endpoint's answer is returned as-is.
    ///
    /// When a tag can't be found, the full list is fetched once so the
    /// resulting [RegistryError::TagNotFound] can report the tags that do
    /// exist. A tag list that can't be read at all is
    /// [RegistryError::TagListUnavailable].
    pub async fn get_tags(
        &self,
        repo: &RepositoryRef,
        tag: Option<&str>,
    ) -> Result<TagLookup, RegistryError> {
        let tag = match tag {
            None => return Ok(TagLookup::All(self.list_tags(repo).await?)),
            Some(tag) => tag,
        };

        let url = index_url(
            self.hosts.index(),
            Scope::Repositories,
            repo,
            Content::Tags,
            Some(tag),
        );
        let response = self.transport.get(&url, HeaderMap::new()).await?;
        match decode_json::<Value>(&url, &response) {
            Some(value) => {
                let lookup = TagLookup::Tagged(value);
                log::info!("found {} tags for image {}", lookup.len(), repo);
                Ok(lookup)
            }
            None => {
                log::debug!("tag {:?} not found in {}, listing valid tags", tag, repo);
                let valid_tags = self
                    .list_tags(repo)
                    .await?
                    .into_iter()
                    .map(|entry| entry.name)
                    .collect();
                Err(RegistryError::TagNotFound {
                    tag: tag.to_owned(),
                    namespace: repo.namespace().to_owned(),
                    repo: repo.name().to_owned(),
                    valid_tags,
                })
            }
        }
    }

    async fn list_tags(&self, repo: &RepositoryRef) -> Result<Vec<TagEntry>, RegistryError> {
        let url = index_url(
            self.hosts.index(),
            Scope::Repositories,
            repo,
            Content::Tags,
            None,
        );
        let response = self.transport.get(&url, HeaderMap::new()).await?;
        match decode_json::<Vec<TagEntry>>(&url, &response) {
            Some(tags) => {
                log::info!("found {} tags for image {}", tags.len(), repo);
                Ok(tags)
            }
            None => Err(RegistryError::TagListUnavailable {
                namespace: repo.namespace().to_owned(),
                repo: repo.name().to_owned(),
            }),
        }
    }

    /// Ask the index server for an anonymous pull token
    ///
    /// With `header` set, the token comes back as an `Authorization` header.
    /// Otherwise it is the bare [Token::Raw] value. Returns `None` if the
    /// server did not issue a token.
    pub async fn get_token(
        &self,
        repo: &RepositoryRef,
        header: bool,
    ) -> Result<Option<Token>, RegistryError> {
        let url = index_url(
            self.hosts.index(),
            Scope::Repositories,
            repo,
            Content::Images,
            None,
        );
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_TOKEN_HEADER, HeaderValue::from_static("true"));
        let response = self.transport.get(&url, headers).await?;
        match response.header_str(REQUEST_TOKEN_HEADER) {
            None => {
                log::warn!("no token issued for {} ({})", repo, response.status);
                Ok(None)
            }
            Some(token) => {
                log::debug!("received token for {}", repo);
                Ok(Some(match header {
                    true => Token::authorization(token),
                    false => Token::Raw(token.to_owned()),
                }))
            }
        }
    }

    /// Fetch the JSON metadata for one image layer
    ///
    /// Returns `None` if the image server's answer was not JSON.
    pub async fn get_manifest(
        &self,
        image_id: &str,
        token: &Token,
    ) -> Result<Option<Manifest>, RegistryError> {
        let url = image_url(self.hosts.images(), image_id, Content::Json);
        let response = self.transport.get(&url, token.to_headers()?).await?;
        let manifest: Option<Manifest> = decode_json(&url, &response);
        if manifest.is_none() {
            log::warn!("error retrieving manifest for {}", image_id);
        }
        Ok(manifest)
    }

    /// Download one layer's compressed tar archive
    ///
    /// With a download folder, the archive is streamed to
    /// `<download_folder>/<image_id>.tar.gz` and never held in memory. If the
    /// server answers with an error status nothing is written, and the
    /// response comes back as [Layer::Response].
    /// Without a folder, the whole response is returned and buffering it is up
    /// to the caller, which is not a good idea for large layers.
    pub async fn get_layer(
        &self,
        image_id: &str,
        token: &Token,
        download_folder: Option<&Path>,
    ) -> Result<Layer, RegistryError> {
        let url = image_url(self.hosts.images(), image_id, Content::Layer);
        let headers = token.to_headers()?;
        match download_folder {
            Some(folder) => {
                let path = folder.join(format!("{}.tar.gz", image_id));
                log::info!("downloading layer {}.tar.gz to {:?}", image_id, path);
                let layer = self.transport.download(&url, headers, &path).await?;
                if let Layer::Response(response) = &layer {
                    log::warn!("error retrieving layer {}, {}", image_id, response.status);
                }
                Ok(layer)
            }
            None => Ok(Layer::Response(self.transport.get(&url, headers).await?)),
        }
    }
}

/// Decode a successful JSON response, or log why it can't be used
fn decode_json<T: DeserializeOwned>(url: &str, response: &RawResponse) -> Option<T> {
    if !response.status.is_success() {
        log::debug!("<{}> returned {}", url, response.status);
        return None;
    }
    match serde_json::from_slice(&response.body) {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("<{}> returned unexpected content, {}", url, err);
            None
        }
    }
}
