use crate::errors::RegistryError;
use regex::Regex;
use std::{fmt, str, str::FromStr};

/// Registry-internal identifier for one filesystem layer
///
/// On the v1 registry these are 64 hex digits, but nothing here depends on
/// that. The parser only rejects values that would not stay a single path
/// segment, or that would turn the downloaded `<id>.tar.gz` into a hidden
/// file.
#[derive(Clone)]
pub struct ImageId {
    serialized: String,
}

impl ImageId {
    /// Returns a reference to the existing string representation of an
    /// [ImageId]
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Parse a [prim@str] as an [ImageId]
    pub fn parse(s: &str) -> Result<Self, RegistryError> {
        lazy_static! {
            static ref RE: Regex = Regex::new("^[a-zA-Z0-9_-][a-zA-Z0-9_.-]*$").unwrap();
        }
        match RE.is_match(s) {
            false => Err(RegistryError::InvalidReferenceFormat(s.to_owned())),
            true => Ok(ImageId {
                serialized: s.to_owned(),
            }),
        }
    }
}

impl FromStr for ImageId {
    type Err = RegistryError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageId::parse(s)
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Debug for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
