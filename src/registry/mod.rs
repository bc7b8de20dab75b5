//! Support for talking to a Docker Registry v1 server


mod builder;
mod client;
mod hosts;
mod token;
mod transport;
pub mod urls;

pub use builder::RegistryClientBuilder;
pub use client::Client;
pub use hosts::RegistryHosts;
pub use token::{Token, AUTHENTICATION, AUTHORIZATION, REQUEST_TOKEN_HEADER};
pub use transport::{HttpTransport, Layer, RawResponse, Transport};
