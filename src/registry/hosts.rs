use url::Url;

/// Base URLs for the two kinds of v1 servers
///
/// The index server answers catalog, tag, and token requests. Image
/// metadata and layer data come from a separate image server, which on
/// Docker Hub was a CDN host.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryHosts {
    index: String,
    images: String,
}

impl Default for RegistryHosts {
    fn default() -> Self {
        RegistryHosts::new()
    }
}

impl RegistryHosts {
    pub const DEFAULT_INDEX: &'static str = "https://registry.hub.docker.com/v1";
    pub const DEFAULT_IMAGES: &'static str = "https://cdn-registry-1.docker.io/v1/images";

    /// Return the built-in Docker Hub defaults
    pub fn new() -> Self {
        RegistryHosts {
            index: RegistryHosts::DEFAULT_INDEX.to_owned(),
            images: RegistryHosts::DEFAULT_IMAGES.to_owned(),
        }
    }

    /// Base for `/repositories/...` requests, without a trailing slash
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Base for `/<image_id>/...` requests, without a trailing slash
    pub fn images(&self) -> &str {
        &self.images
    }

    pub fn set_index(&mut self, url: &Url) {
        self.index = trim_base(url);
    }

    pub fn set_images(&mut self, url: &Url) {
        self.images = trim_base(url);
    }
}

fn trim_base(url: &Url) -> String {
    let s = url.as_str();
    s.strip_suffix('/').unwrap_or(s).to_owned()
}
