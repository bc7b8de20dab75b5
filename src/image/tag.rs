use crate::errors::RegistryError;
use regex::Regex;
use std::str::FromStr;

/// A tag given on the command line, checked before it goes into a URL
///
/// Up to 128 characters from `[a-zA-Z0-9_.-]`, not starting with a dot or
/// a dash.
#[derive(Clone, Debug)]
pub struct Tag(String);

impl Tag {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse(s: &str) -> Result<Self, RegistryError> {
        lazy_static! {
            static ref TAG: Regex = Regex::new("^[a-zA-Z0-9_][a-zA-Z0-9_.-]{0,127}$").unwrap();
        }
        if TAG.is_match(s) {
            Ok(Tag(s.to_owned()))
        } else {
            Err(RegistryError::InvalidReferenceFormat(s.to_owned()))
        }
    }
}

impl FromStr for Tag {
    type Err = RegistryError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::parse(s)
    }
}
