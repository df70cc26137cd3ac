use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, warn};

use super::atomic_io::{read_existing, remove_file_pruning, write_bytes_atomic};
use super::hashing::sha256_hex;
use super::manifest::{
    is_contained_relative, manifest_path, read_manifest, write_manifest_atomic, ManifestEntry,
    ManifestReadState, OutputManifestV1, OUTPUT_MANIFEST_FORMAT_VERSION,
};
use super::output::OutputSet;
use super::{FileAction, FileOutcome};
use crate::error::CompileError;

/// Brings the project directory in line with `output`: changed files are rewritten,
/// identical ones left alone, and files the previous compile produced but this one
/// did not are removed.
pub(crate) fn emit(
    project_dir: &Path,
    mod_id: &str,
    generator_version: &str,
    output: &OutputSet,
) -> Result<Vec<FileOutcome>, CompileError> {
    let manifest_file = manifest_path(project_dir);
    let previous = match read_manifest(&manifest_file)? {
        ManifestReadState::Present(manifest) => manifest.files,
        ManifestReadState::Missing => Vec::new(),
        ManifestReadState::Unreadable => {
            warn!(path = %manifest_file.display(), "output_manifest_unreadable_ignored");
            Vec::new()
        }
    };

    let mut outcomes = Vec::with_capacity(output.len());
    let mut entries = Vec::with_capacity(output.len());
    for file in output.iter() {
        let target = project_dir.join(&file.path);
        let existing = read_existing(&target).map_err(|source| io_error(&target, source))?;
        let action = match existing {
            Some(bytes) if bytes == file.bytes => FileAction::Unchanged,
            Some(_) => FileAction::Update,
            None => FileAction::Create,
        };
        if action != FileAction::Unchanged {
            write_bytes_atomic(&target, &file.bytes).map_err(|source| io_error(&target, source))?;
            debug!(path = %file.path, owner = %file.owner, action = action.as_str(), "generated_file_written");
        }
        entries.push(ManifestEntry {
            path: file.path.clone(),
            sha256_hex: sha256_hex(&file.bytes),
        });
        outcomes.push(FileOutcome {
            path: file.path.clone(),
            action,
        });
    }

    let mut seen = BTreeSet::new();
    for stale in previous {
        if output.contains(&stale.path) || !seen.insert(stale.path.clone()) {
            continue;
        }
        if !is_contained_relative(&stale.path) {
            warn!(path = %stale.path, "stale_path_outside_project_ignored");
            continue;
        }
        let target = project_dir.join(&stale.path);
        let Some(bytes) = read_existing(&target).map_err(|source| io_error(&target, source))? else {
            continue;
        };
        if sha256_hex(&bytes) != stale.sha256_hex {
            warn!(path = %stale.path, "stale_file_modified_kept");
            continue;
        }
        remove_file_pruning(project_dir, &target).map_err(|source| io_error(&target, source))?;
        debug!(path = %stale.path, "stale_file_removed");
        outcomes.push(FileOutcome {
            path: stale.path,
            action: FileAction::Remove,
        });
    }

    write_manifest_atomic(
        &manifest_file,
        &OutputManifestV1 {
            manifest_format_version: OUTPUT_MANIFEST_FORMAT_VERSION,
            generator_version: generator_version.to_string(),
            mod_id: mod_id.to_string(),
            files: entries,
        },
    )?;
    Ok(outcomes)
}

fn io_error(path: &Path, source: std::io::Error) -> CompileError {
    CompileError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::output::GeneratedFile;
    use std::fs;
    use tempfile::TempDir;

    fn output(files: &[(&str, &str)]) -> OutputSet {
        let mut set = OutputSet::default();
        for (path, text) in files {
            set.insert(GeneratedFile::text(path.to_string(), "test", text))
                .expect("insert");
        }
        set
    }

    fn actions(outcomes: &[FileOutcome]) -> Vec<(&str, FileAction)> {
        outcomes
            .iter()
            .map(|outcome| (outcome.path.as_str(), outcome.action))
            .collect()
    }

    #[test]
    fn second_emit_is_unchanged_and_updates_are_detected() {
        let dir = TempDir::new().expect("temp dir");
        let first = emit(dir.path(), "m", "0.1.0", &output(&[("a.txt", "1"), ("b/c.txt", "2")]))
            .expect("first");
        assert_eq!(
            actions(&first),
            vec![("a.txt", FileAction::Create), ("b/c.txt", FileAction::Create)]
        );

        let second = emit(dir.path(), "m", "0.1.0", &output(&[("a.txt", "1"), ("b/c.txt", "3")]))
            .expect("second");
        assert_eq!(
            actions(&second),
            vec![("a.txt", FileAction::Unchanged), ("b/c.txt", FileAction::Update)]
        );
        assert_eq!(fs::read_to_string(dir.path().join("b/c.txt")).expect("read"), "3");
    }

    #[test]
    fn stale_files_are_removed_unless_edited_by_hand() {
        let dir = TempDir::new().expect("temp dir");
        emit(
            dir.path(),
            "m",
            "0.1.0",
            &output(&[("keep.txt", "k"), ("old/gone.txt", "g"), ("edited.txt", "e")]),
        )
        .expect("first");
        fs::write(dir.path().join("edited.txt"), "mine").expect("hand edit");

        let second = emit(dir.path(), "m", "0.1.0", &output(&[("keep.txt", "k")])).expect("second");
        assert_eq!(
            actions(&second),
            vec![("keep.txt", FileAction::Unchanged), ("old/gone.txt", FileAction::Remove)]
        );
        assert!(!dir.path().join("old").exists());
        assert_eq!(fs::read_to_string(dir.path().join("edited.txt")).expect("read"), "mine");
    }

    #[test]
    fn manifest_entries_outside_the_project_are_ignored() {
        let root = TempDir::new().expect("temp dir");
        let project = root.path().join("project");
        fs::create_dir_all(project.join(".modgen")).expect("mkdir");
        fs::write(root.path().join("victim.txt"), "v").expect("victim");
        let manifest = OutputManifestV1 {
            manifest_format_version: OUTPUT_MANIFEST_FORMAT_VERSION,
            generator_version: "0.1.0".to_string(),
            mod_id: "m".to_string(),
            files: vec![ManifestEntry {
                path: "../victim.txt".to_string(),
                sha256_hex: sha256_hex(b"v"),
            }],
        };
        write_manifest_atomic(&manifest_path(&project), &manifest).expect("manifest");

        let outcomes = emit(&project, "m", "0.1.0", &output(&[])).expect("emit");
        assert!(outcomes.is_empty());
        assert!(root.path().join("victim.txt").exists());
    }
}
