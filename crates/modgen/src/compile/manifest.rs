use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::atomic_io::write_bytes_atomic;
use crate::error::CompileError;

pub(crate) const OUTPUT_MANIFEST_FORMAT_VERSION: u16 = 1;
const MANIFEST_RELATIVE_PATH: &str = ".modgen/manifest.json";

/// Record of what the previous compile wrote, used to find files that are no longer generated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct OutputManifestV1 {
    pub manifest_format_version: u16,
    pub generator_version: String,
    pub mod_id: String,
    pub files: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct ManifestEntry {
    pub path: String,
    pub sha256_hex: String,
}

#[derive(Debug, Clone)]
pub(crate) enum ManifestReadState {
    Missing,
    Unreadable,
    Present(OutputManifestV1),
}

pub(crate) fn manifest_path(project_dir: &Path) -> PathBuf {
    project_dir.join(MANIFEST_RELATIVE_PATH)
}

pub(crate) fn read_manifest(path: &Path) -> Result<ManifestReadState, CompileError> {
    if !path.exists() {
        return Ok(ManifestReadState::Missing);
    }

    let raw = fs::read_to_string(path).map_err(|source| CompileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match serde_json::from_str::<OutputManifestV1>(&raw) {
        Ok(manifest) if manifest.manifest_format_version == OUTPUT_MANIFEST_FORMAT_VERSION => {
            Ok(ManifestReadState::Present(manifest))
        }
        _ => Ok(ManifestReadState::Unreadable),
    }
}

pub(crate) fn write_manifest_atomic(path: &Path, manifest: &OutputManifestV1) -> Result<(), CompileError> {
    let mut text = serde_json::to_string_pretty(manifest).map_err(|error| CompileError::Encode {
        path: path.display().to_string(),
        message: format!("failed to encode manifest json: {error}"),
    })?;
    text.push('\n');
    write_bytes_atomic(path, text.as_bytes()).map_err(|source| CompileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Manifest paths come from disk; only plain relative paths inside the project are honoured.
pub(crate) fn is_contained_relative(path: &str) -> bool {
    let path = Path::new(path);
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> OutputManifestV1 {
        OutputManifestV1 {
            manifest_format_version: OUTPUT_MANIFEST_FORMAT_VERSION,
            generator_version: "0.1.0".to_string(),
            mod_id: "m".to_string(),
            files: vec![ManifestEntry {
                path: "src/main/resources/fabric.mod.json".to_string(),
                sha256_hex: "00".repeat(32),
            }],
        }
    }

    #[test]
    fn manifest_states() {
        let dir = TempDir::new().expect("temp dir");
        let path = manifest_path(dir.path());
        assert!(matches!(read_manifest(&path).expect("missing"), ManifestReadState::Missing));

        write_manifest_atomic(&path, &sample()).expect("write");
        match read_manifest(&path).expect("present") {
            ManifestReadState::Present(manifest) => assert_eq!(manifest, sample()),
            other => panic!("unexpected state {other:?}"),
        }

        fs::write(&path, "{\"files\": 3}").expect("corrupt");
        assert!(matches!(read_manifest(&path).expect("unreadable"), ManifestReadState::Unreadable));
    }

    #[test]
    fn only_contained_relative_paths_are_honoured() {
        assert!(is_contained_relative("src/main/java/A.java"));
        assert!(!is_contained_relative("../outside.txt"));
        assert!(!is_contained_relative("src/../../outside.txt"));
        assert!(!is_contained_relative("/etc/passwd"));
        assert!(!is_contained_relative("./a"));
        assert!(!is_contained_relative(""));
    }
}
