//! Request paths on the v1 index and image servers
//!
//! Segments are joined with `/` exactly as given, in a fixed order. Nothing
//! is percent-encoded; callers pass identifiers that are already safe.

use crate::image::RepositoryRef;
use std::fmt;

/// Top level collection on the index server
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Scope {
    Repositories,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Repositories => "repositories",
        }
    }
}

/// Which sub-resource a request targets
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Content {
    Images,
    Tags,
    Json,
    Layer,
}

impl Content {
    pub fn as_str(&self) -> &'static str {
        match self {
            Content::Images => "images",
            Content::Tags => "tags",
            Content::Json => "json",
            Content::Layer => "layer",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{base}/{scope}/{namespace}/{name}/{content}[/{tag}]`
pub fn index_url(
    base: &str,
    scope: Scope,
    repo: &RepositoryRef,
    content: Content,
    tag: Option<&str>,
) -> String {
    let mut url = format!(
        "{}/{}/{}/{}/{}",
        base,
        scope,
        repo.namespace(),
        repo.name(),
        content
    );
    if let Some(tag) = tag {
        url.push('/');
        url.push_str(tag);
    }
    url
}

/// `{base}/{image_id}/{content}`
pub fn image_url(base: &str, image_id: &str, content: Content) -> String {
    format!("{}/{}/{}", base, image_id, content)
}
