//! Names for repositories, tags, and images on a v1 registry


mod id;
mod repository;
mod tag;

pub use id::ImageId;
pub use repository::RepositoryRef;
pub use tag::Tag;
