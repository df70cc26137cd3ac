use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Writes through a sibling temp file so readers never observe a half-written file.
pub(crate) fn write_bytes_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path_for(path);
    if let Err(error) = fs::write(&tmp_path, bytes) {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }
    if let Err(error) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }
    Ok(())
}

/// Contents of `path`, or `None` when it does not exist.
pub(crate) fn read_existing(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error),
    }
}

/// Removes a file and then every parent directory left empty, stopping at `root`.
pub(crate) fn remove_file_pruning(root: &Path, path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(error) => return Err(error),
    }

    let mut current = path.parent();
    while let Some(dir) = current {
        if dir == root || !dir.starts_with(root) {
            break;
        }
        let is_empty = fs::read_dir(dir)?.next().is_none();
        if !is_empty {
            break;
        }
        fs::remove_dir(dir)?;
        current = dir.parent();
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("generated");
    let tmp_name = format!(".{file_name}.modgen-tmp");
    match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_replaces_and_leaves_no_temp_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("a/b/file.json");
        write_bytes_atomic(&path, b"one").expect("first write");
        write_bytes_atomic(&path, b"two").expect("second write");
        assert_eq!(fs::read(&path).expect("read"), b"two");
        let names = fs::read_dir(path.parent().expect("parent"))
            .expect("list")
            .map(|entry| entry.expect("entry").file_name())
            .collect::<Vec<_>>();
        assert_eq!(names, vec![std::ffi::OsString::from("file.json")]);
    }

    #[test]
    fn removal_prunes_empty_directories_up_to_root() {
        let dir = TempDir::new().expect("temp dir");
        let kept = dir.path().join("a/keep.txt");
        let removed = dir.path().join("a/b/c/gone.txt");
        write_bytes_atomic(&kept, b"k").expect("write kept");
        write_bytes_atomic(&removed, b"g").expect("write removed");

        remove_file_pruning(dir.path(), &removed).expect("remove");
        assert!(!dir.path().join("a/b").exists());
        assert!(kept.exists());
        remove_file_pruning(dir.path(), &removed).expect("already gone");
        assert_eq!(read_existing(&removed).expect("read"), None);
    }
}
