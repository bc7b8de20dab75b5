use crate::errors::RegistryError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::{convert::TryFrom, fmt};

/// Header that asks the index server to issue a token
pub const REQUEST_TOKEN_HEADER: &str = "x-docker-token";

/// Header under which a bare token is sent to the image server
pub const AUTHENTICATION: &str = "Authentication";

/// Header produced by [crate::registry::Client::get_token] in header form
pub const AUTHORIZATION: &str = "Authorization";

/// Pull credential issued by the v1 index
///
/// A token is either the bare value from the `X-Docker-Token` response
/// header, or a complete request header ready to send. Both forms are
/// accepted by the manifest and layer requests.
///
/// Note that the two forms do not use the same header name. A [Token::Raw]
/// is sent as `Authentication: Token <value>`, while the header form built by
/// `get_token` uses `Authorization`.
#[derive(Clone, Eq, PartialEq)]
pub enum Token {
    Raw(String),
    Header { name: String, value: String },
}

impl Token {
    /// Wrap a token value as the `Authorization: Token <value>` header
    pub fn authorization<S: AsRef<str>>(token: S) -> Self {
        Token::Header {
            name: AUTHORIZATION.to_owned(),
            value: format!("Token {}", token.as_ref()),
        }
    }

    /// The single request header this token is sent as
    pub fn normalize(&self) -> (String, String) {
        match self {
            Token::Raw(token) => (AUTHENTICATION.to_owned(), format!("Token {}", token)),
            Token::Header { name, value } => (name.clone(), value.clone()),
        }
    }

    /// Build a one-entry [HeaderMap] from [Token::normalize]
    pub fn to_headers(&self) -> Result<HeaderMap, RegistryError> {
        let (name, value) = self.normalize();
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::try_from(name.as_str())?,
            HeaderValue::try_from(value.as_str())?,
        );
        Ok(headers)
    }
}

impl From<String> for Token {
    fn from(token: String) -> Self {
        Token::Raw(token)
    }
}

impl From<&str> for Token {
    fn from(token: &str) -> Self {
        Token::Raw(token.to_owned())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Raw(token) => write!(f, "{}", token),
            Token::Header { name, value } => write!(f, "{}: {}", name, value),
        }
    }
}

// Keep credentials out of debug logs
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Raw(_) => write!(f, "Token::Raw(..)"),
            Token::Header { name, .. } => write!(f, "Token::Header({}: ..)", name),
        }
    }
}
