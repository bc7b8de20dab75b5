use crate::{
    errors::RegistryError,
    registry::{Client, HttpTransport, RegistryHosts, Transport},
};

use reqwest::{
    header::{HeaderMap, HeaderValue},
    Certificate, ClientBuilder,
};
use std::{convert::TryInto, sync::Arc, time::Duration};
use url::Url;

/// Builder for configuring custom [Client] instances
pub struct RegistryClientBuilder {
    hosts: RegistryHosts,
    network: ClientBuilder,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for RegistryClientBuilder {
    fn default() -> Self {
        RegistryClientBuilder::new()
    }
}

impl RegistryClientBuilder {
    /// Start constructing a custom registry client
    pub fn new() -> Self {
        RegistryClientBuilder {
            hosts: RegistryHosts::new(),
            network: reqwest::Client::builder().user_agent(Client::default_user_agent()),
            transport: None,
        }
    }

    /// Change the index server used for repository, tag, and token requests
    ///
    /// The default is [RegistryHosts::DEFAULT_INDEX]. The URL should include
    /// the API version prefix, for example `https://example.com/v1`.
    pub fn index_server(mut self, url: &Url) -> Self {
        self.hosts.set_index(url);
        self
    }

    /// Change the image server used for manifest and layer requests
    ///
    /// The default is [RegistryHosts::DEFAULT_IMAGES].
    pub fn image_server(mut self, url: &Url) -> Self {
        self.hosts.set_images(url);
        self
    }

    /// Set a timeout for each network request
    ///
    /// This timeout applies from the beginning of a (GET) request until the
    /// last byte has been received. By default there is no timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.network = self.network.timeout(timeout);
        self
    }

    /// Set a timeout for only the initial connect phase of each network request
    ///
    /// By default there is no timeout beyond those built into the networking
    /// stack.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.network = self.network.connect_timeout(timeout);
        self
    }

    /// Sets the `User-Agent` header used by this client
    ///
    /// By default, the value returned by [Client::default_user_agent()] is
    /// used, which identifies the version of `v1reg` acting as a client.
    pub fn user_agent<V>(mut self, value: V) -> Self
    where
        V: TryInto<HeaderValue>,
        V::Error: Into<http::Error>,
    {
        self.network = self.network.user_agent(value);
        self
    }

    /// Bind to a specific local IP address
    pub fn local_address<T>(mut self, addr: T) -> Self
    where
        T: Into<Option<std::net::IpAddr>>,
    {
        self.network = self.network.local_address(addr);
        self
    }

    /// Set the default headers for every HTTP request
    pub fn default_request_headers(mut self, headers: HeaderMap) -> Self {
        self.network = self.network.default_headers(headers);
        self
    }

    /// Connect directly, ignoring proxy settings from the environment
    pub fn no_proxy(mut self) -> Self {
        self.network = self.network.no_proxy();
        self
    }

    /// Trust an additional root certificate
    pub fn add_root_certificate(mut self, certificate: Certificate) -> Self {
        self.network = self.network.add_root_certificate(certificate);
        self
    }

    /// Send requests through a custom [Transport]
    ///
    /// The network settings on this builder only configure the default
    /// [HttpTransport], so they have no effect once a transport is set here.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Construct a Client using the parameters from this Builder
    pub fn build(self) -> Result<Client, RegistryError> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(self.network.build()?)),
        };
        log::debug!(
            "index server <{}>, image server <{}>",
            self.hosts.index(),
            self.hosts.images()
        );
        Ok(Client::from_parts(self.hosts, transport))
    }
}
