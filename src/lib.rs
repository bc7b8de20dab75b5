//! Client for the legacy Docker Registry v1 HTTP API
//!
//! The v1 protocol splits a pull across two servers. The index answers
//! questions about repositories (images, tags) and hands out tokens. The
//! image server returns per-layer metadata and the layer archives.
//!
//! ```no_run
//! # async fn pull() -> Result<(), v1reg::errors::RegistryError> {
//! use v1reg::{Client, RepositoryRef};
//! use std::path::Path;
//!
//! let client = Client::new()?;
//! let repo = RepositoryRef::new("ubuntu");
//! let tags = client.get_tags(&repo, Some("latest")).await?;
//! println!("{:?}", tags);
//! if let Some(token) = client.get_token(&repo, true).await? {
//!     client.get_layer("511136ea3c5a", &token, Some(Path::new("/tmp"))).await?;
//! }
//! # Ok(())
//! # }
//! ```

#[macro_use] extern crate lazy_static;

pub mod errors;
pub mod image;
pub mod manifest;
pub mod registry;
pub mod runscript;
pub mod storage;

pub use crate::{
    image::{ImageId, RepositoryRef, Tag},
    manifest::{ImageEntry, Manifest, TagEntry, TagLookup},
    registry::{Client, Layer, Token},
};
