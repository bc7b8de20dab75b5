use crate::errors::RegistryError;
use regex::Regex;
use std::{fmt, str, str::FromStr};

static LIBRARY_STR: &str = "library";

/// A repository on the v1 index, identified by namespace and name
///
/// The namespace is the collection or owner of the repository. Official
/// images live in the `library` namespace, which is the default.
///
/// Values built with [RepositoryRef::new] or [RepositoryRef::with_namespace]
/// are not validated; they are joined into request paths exactly as given.
/// Use [RepositoryRef::parse] to check user input first.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct RepositoryRef {
    namespace: String,
    name: String,
}

impl RepositoryRef {
    /// Refer to a repository in the default `library` namespace
    pub fn new<S: Into<String>>(name: S) -> Self {
        RepositoryRef::with_namespace(LIBRARY_STR, name)
    }

    /// Refer to a repository in a specific namespace
    pub fn with_namespace<N: Into<String>, S: Into<String>>(namespace: N, name: S) -> Self {
        RepositoryRef {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Parse a [prim@str] as a [RepositoryRef]
    ///
    /// Accepts either `name` or `namespace/name`. Each component is made of
    /// lowercase alphanumeric runs joined by single periods, single or double
    /// underscores, or any number of dashes.
    ///
    /// ```
    /// # use v1reg::RepositoryRef;
    /// let repo = RepositoryRef::parse("ubuntu").unwrap();
    /// assert_eq!(repo.namespace(), "library");
    /// assert_eq!(repo.name(), "ubuntu");
    /// ```
    pub fn parse(s: &str) -> Result<Self, RegistryError> {
        lazy_static! {
            static ref RE: Regex = Regex::new(&format!(
                "^(?:(?P<ns>{})/)?(?P<name>{})$",
                RepositoryRef::component_regex_str(),
                RepositoryRef::component_regex_str(),
            ))
            .unwrap();
        }
        match RE.captures(s) {
            None => Err(RegistryError::InvalidReferenceFormat(s.to_owned())),
            Some(captures) => {
                let name = captures.name("name").unwrap().as_str();
                Ok(match captures.name("ns") {
                    Some(ns) => RepositoryRef::with_namespace(ns.as_str(), name),
                    None => RepositoryRef::new(name),
                })
            }
        }
    }

    /// The namespace, `library` unless specified
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The repository name within its namespace
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Is this repository in the default `library` namespace?
    pub fn is_library(&self) -> bool {
        self.namespace == LIBRARY_STR
    }

    fn component_regex_str() -> &'static str {
        concat!(
            "[a-z0-9]+",
            "(?:",
            /* */ "(?:[._]|__|[-]*)", // allowed separators
            /* */ "[a-z0-9]+",
            ")*", // multiple separator groups
        )
    }
}

impl FromStr for RepositoryRef {
    type Err = RegistryError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RepositoryRef::parse(s)
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

impl fmt::Debug for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
