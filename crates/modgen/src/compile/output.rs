use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{CompileError, ValidationError};

/// A file rendered in memory, addressed by its `/`-separated path under the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GeneratedFile {
    pub path: String,
    pub owner: String,
    pub bytes: Vec<u8>,
}

impl GeneratedFile {
    pub(crate) fn text(path: String, owner: impl Into<String>, text: &str) -> Self {
        Self {
            path,
            owner: owner.into(),
            bytes: text.as_bytes().to_vec(),
        }
    }

    pub(crate) fn json(path: String, owner: impl Into<String>, value: &Value) -> Result<Self, CompileError> {
        let mut text = serde_json::to_string_pretty(value).map_err(|error| CompileError::Encode {
            path: path.clone(),
            message: error.to_string(),
        })?;
        text.push('\n');
        Ok(Self::text(path, owner, &text))
    }
}

/// The complete output of one compile. Two producers may never claim the same path.
#[derive(Debug, Default)]
pub(crate) struct OutputSet {
    files: BTreeMap<String, GeneratedFile>,
}

impl OutputSet {
    pub(crate) fn insert(&mut self, file: GeneratedFile) -> Result<(), ValidationError> {
        if let Some(existing) = self.files.get(&file.path) {
            return Err(ValidationError::PathCollision {
                path: file.path,
                first: existing.owner.clone(),
                second: file.owner,
            });
        }
        self.files.insert(file.path.clone(), file);
        Ok(())
    }

    pub(crate) fn extend(&mut self, files: impl IntoIterator<Item = GeneratedFile>) -> Result<(), ValidationError> {
        for file in files {
            self.insert(file)?;
        }
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.files.len()
    }

    pub(crate) fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Files in path order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.values()
    }
}
