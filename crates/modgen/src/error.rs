use std::path::PathBuf;

use thiserror::Error;

use crate::external::SkeletonError;
use crate::ids::IdError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    MalformedId,
    DuplicateId,
    InvalidRecipe,
    InvalidLootPool,
    InvalidEnumValue,
    NamingConflict,
}

impl ValidationErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MalformedId => "malformed_id",
            Self::DuplicateId => "duplicate_id",
            Self::InvalidRecipe => "invalid_recipe",
            Self::InvalidLootPool => "invalid_loot_pool",
            Self::InvalidEnumValue => "invalid_enum_value",
            Self::NamingConflict => "naming_conflict",
        }
    }
}

/// Rejections of the declared content graph. Raised before anything touches the filesystem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("malformed {subject} id '{id}': {source}")]
    MalformedId {
        subject: &'static str,
        id: String,
        #[source]
        source: IdError,
    },
    #[error("duplicate id '{id}': already declared as {existing}, cannot declare it again as {duplicate}")]
    DuplicateId {
        id: String,
        existing: &'static str,
        duplicate: &'static str,
    },
    #[error("item group '{id}' uses the id of a vanilla creative tab")]
    ReservedItemGroup { id: String },
    #[error("item group '{id}' is declared more than once with different title or icon")]
    ConflictingItemGroup { id: String },
    #[error("output path {path} is produced by both {first} and {second}")]
    PathCollision {
        path: String,
        first: String,
        second: String,
    },
    #[error("invalid recipe for '{owner}': {reason}")]
    InvalidRecipe { owner: String, reason: String },
    #[error("invalid loot table '{owner}': pool {pool_index} has no entries")]
    EmptyLootPool { owner: String, pool_index: usize },
    #[error("invalid loot table '{owner}': {reason}")]
    InvalidLootTable { owner: String, reason: String },
    #[error("invalid {field} '{value}', expected one of: {allowed}")]
    InvalidEnumValue {
        field: &'static str,
        value: String,
        allowed: String,
    },
    #[error("generated name {generated} is produced by both '{first}' and '{second}'")]
    NamingConflict {
        generated: String,
        first: String,
        second: String,
    },
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::MalformedId { .. } => ValidationErrorKind::MalformedId,
            Self::DuplicateId { .. }
            | Self::ReservedItemGroup { .. }
            | Self::ConflictingItemGroup { .. }
            | Self::PathCollision { .. } => ValidationErrorKind::DuplicateId,
            Self::InvalidRecipe { .. } => ValidationErrorKind::InvalidRecipe,
            Self::EmptyLootPool { .. } | Self::InvalidLootTable { .. } => {
                ValidationErrorKind::InvalidLootPool
            }
            Self::InvalidEnumValue { .. } => ValidationErrorKind::InvalidEnumValue,
            Self::NamingConflict { .. } => ValidationErrorKind::NamingConflict,
        }
    }

    pub(crate) fn invalid_enum(field: &'static str, value: &str, allowed: &[&str]) -> Self {
        Self::InvalidEnumValue {
            field,
            value: value.to_string(),
            allowed: allowed.join(", "),
        }
    }
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Skeleton(#[from] SkeletonError),
    #[error("i/o failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("project file {path} is not usable: {message}")]
    InvalidProjectFile { path: PathBuf, message: String },
    #[error("failed to encode {path}: {message}")]
    Encode { path: String, message: String },
}

impl CompileError {
    pub fn validation_kind(&self) -> Option<ValidationErrorKind> {
        match self {
            Self::Validation(error) => Some(error.kind()),
            _ => None,
        }
    }
}
