//! Resource identifiers naming loggers
//!
//! [`UriComponents`] is the shape identifiers take on the wire; [`ResourceId`] is
//! the validated form used as a registry key. Converting between the two is
//! lossless for every identifier that passes validation.

use crate::{BridgeError, BridgeResult};
use serde::{Deserialize, Serialize};

/// Structured identifier components as transmitted between processes
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UriComponents {
    #[serde(default)]
    pub scheme: String,
    #[serde(default)]
    pub authority: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub fragment: String,
}

impl UriComponents {
    /// Components with only a scheme and path set
    pub fn new(scheme: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = authority.into();
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = fragment.into();
        self
    }
}

/// Validated identifier of a logger
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId {
    scheme: String,
    authority: String,
    path: String,
    query: String,
    fragment: String,
}

impl ResourceId {
    /// Reconstruct an identifier received over the wire
    pub fn revive(components: UriComponents) -> BridgeResult<Self> {
        validate(&components)?;
        let UriComponents {
            scheme,
            authority,
            path,
            query,
            fragment,
        } = components;
        Ok(Self {
            scheme,
            authority,
            path,
            query,
            fragment,
        })
    }

    /// Shorthand for a `file` resource with an absolute path
    pub fn file(path: impl Into<String>) -> BridgeResult<Self> {
        Self::revive(UriComponents::new("file", path))
    }

    /// Parse `scheme://authority/path?query#fragment` or `scheme:path`
    pub fn parse(value: &str) -> BridgeResult<Self> {
        let (scheme, rest) = value
            .split_once(':')
            .ok_or_else(|| BridgeError::InvalidResource(format!("missing scheme in '{value}'")))?;

        let (rest, fragment) = match rest.split_once('#') {
            Some((rest, fragment)) => (rest, fragment),
            None => (rest, ""),
        };
        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, query),
            None => (rest, ""),
        };
        let (authority, path) = match rest.strip_prefix("//") {
            Some(hier) => match hier.find('/') {
                Some(idx) => (&hier[..idx], &hier[idx..]),
                None => (hier, ""),
            },
            None => ("", rest),
        };

        Self::revive(UriComponents {
            scheme: scheme.to_string(),
            authority: authority.to_string(),
            path: path.to_string(),
            query: query.to_string(),
            fragment: fragment.to_string(),
        })
    }

    /// The exact wire shape of this identifier
    pub fn to_components(&self) -> UriComponents {
        UriComponents {
            scheme: self.scheme.clone(),
            authority: self.authority.clone(),
            path: self.path.clone(),
            query: self.query.clone(),
            fragment: self.fragment.clone(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.scheme)?;
        if !self.authority.is_empty() || self.path.starts_with('/') {
            write!(f, "//{}", self.authority)?;
        }
        write!(f, "{}", self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        if !self.fragment.is_empty() {
            write!(f, "#{}", self.fragment)?;
        }
        Ok(())
    }
}

impl From<ResourceId> for UriComponents {
    fn from(id: ResourceId) -> Self {
        UriComponents {
            scheme: id.scheme,
            authority: id.authority,
            path: id.path,
            query: id.query,
            fragment: id.fragment,
        }
    }
}

impl TryFrom<UriComponents> for ResourceId {
    type Error = BridgeError;

    fn try_from(components: UriComponents) -> BridgeResult<Self> {
        Self::revive(components)
    }
}

fn validate(components: &UriComponents) -> BridgeResult<()> {
    let mut chars = components.scheme.chars();
    let valid_scheme = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'));
    if !valid_scheme {
        return Err(BridgeError::InvalidResource(format!(
            "scheme '{}' is empty or contains illegal characters",
            components.scheme
        )));
    }

    if !components.authority.is_empty() {
        if !components.path.is_empty() && !components.path.starts_with('/') {
            return Err(BridgeError::InvalidResource(
                "with an authority the path must be empty or begin with '/'".to_string(),
            ));
        }
    } else if components.path.starts_with("//") {
        return Err(BridgeError::InvalidResource(
            "without an authority the path cannot begin with '//'".to_string(),
        ));
    }

    Ok(())
}
