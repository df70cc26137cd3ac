use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("identifier is empty")]
    Empty,
    #[error("identifier must have the form '<namespace>:<path>'")]
    MissingSeparator,
    #[error("namespace is empty")]
    EmptyNamespace,
    #[error("path is empty")]
    EmptyPath,
    #[error("namespace contains invalid character '{character}'")]
    InvalidNamespaceCharacter { character: char },
    #[error("path contains invalid character '{character}'")]
    InvalidPathCharacter { character: char },
    #[error("path segment '{segment}' is not allowed")]
    InvalidPathSegment { segment: String },
    #[error("mod id must start with a lowercase letter and contain only [a-z0-9_-]")]
    InvalidModId,
}

/// A namespaced identifier such as `mining_demo:ruby_ore`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId {
    namespace: String,
    path: String,
}

impl ContentId {
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        if raw.is_empty() {
            return Err(IdError::Empty);
        }
        let (namespace, path) = raw.split_once(':').ok_or(IdError::MissingSeparator)?;
        Self::new(namespace, path)
    }

    pub fn new(namespace: &str, path: &str) -> Result<Self, IdError> {
        validate_namespace(namespace)?;
        validate_path(path)?;
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for ContentId {
    type Err = IdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

/// The mod id doubles as the resource namespace and the last Java package segment.
pub fn validate_mod_id(mod_id: &str) -> Result<(), IdError> {
    let mut chars = mod_id.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    let rest_ok = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if starts_with_letter && rest_ok {
        Ok(())
    } else {
        Err(IdError::InvalidModId)
    }
}

/// Fabric loader refuses ids outside 2..=64 characters; the generated sources are still valid.
pub(crate) fn within_loader_length(mod_id: &str) -> bool {
    (2..=64).contains(&mod_id.len())
}

fn validate_namespace(namespace: &str) -> Result<(), IdError> {
    if namespace.is_empty() {
        return Err(IdError::EmptyNamespace);
    }
    if let Some(character) = namespace.chars().find(|c| !is_namespace_char(*c)) {
        return Err(IdError::InvalidNamespaceCharacter { character });
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<(), IdError> {
    if path.is_empty() {
        return Err(IdError::EmptyPath);
    }
    if let Some(character) = path.chars().find(|c| !is_namespace_char(*c) && *c != '/') {
        return Err(IdError::InvalidPathCharacter { character });
    }
    for segment in path.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(IdError::InvalidPathSegment {
                segment: segment.to_string(),
            });
        }
    }
    Ok(())
}

fn is_namespace_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.')
}
