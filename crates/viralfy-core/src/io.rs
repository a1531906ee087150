use crate::error::{Result, ViralfyError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// Missing parent directories are created first.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Read a file as UTF-8. A missing file is `FileNotFound`.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| not_found_or_io(path, e))
}

pub fn write_text(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Read and deserialize a JSON document. A missing file is `FileNotFound`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = read_text(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Serialize as 2-space indented JSON with a trailing newline.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut data = serde_json::to_string_pretty(value)?;
    data.push('\n');
    atomic_write(path, data.as_bytes())
}

/// Remove a file or directory tree. Removing something absent is a no-op.
pub fn remove(path: &Path) -> Result<()> {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    if meta.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// Copy a file or a directory tree, creating the destination's parents.
pub fn copy(src: &Path, dest: &Path) -> Result<()> {
    let meta = std::fs::metadata(src).map_err(|e| not_found_or_io(src, e))?;
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if meta.is_dir() {
        copy_dir(src, dest)
    } else {
        std::fs::copy(src, dest)?;
        Ok(())
    }
}

fn copy_dir(src: &Path, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// List file stems in `dir` whose extension is one of `extensions`, sorted.
/// A missing directory yields an empty list.
pub fn list_stems(dir: &Path, extensions: &[&str]) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut stems = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.contains(&ext));
        if !matches {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            stems.push(stem.to_string());
        }
    }
    stems.sort();
    Ok(stems)
}

fn not_found_or_io(path: &Path, e: std::io::Error) -> ViralfyError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ViralfyError::FileNotFound(path.to_path_buf())
    } else {
        ViralfyError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/c/test.json");
        atomic_write(&path, b"{}").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn write_json_uses_two_space_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        write_json(&path, &serde_json::json!({"a": {"b": 1}})).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n  \"a\": {\n    \"b\": 1\n  }\n}\n");
    }

    #[test]
    fn read_missing_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.json");
        match read_json::<serde_json::Value>(&path) {
            Err(ViralfyError::FileNotFound(p)) => assert_eq!(p, path),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
        assert!(matches!(read_text(&path), Err(ViralfyError::FileNotFound(_))));
    }

    #[test]
    fn remove_absent_is_noop() {
        let dir = TempDir::new().unwrap();
        remove(&dir.path().join("ghost")).unwrap();
    }

    #[test]
    fn remove_deletes_directory_tree() {
        let dir = TempDir::new().unwrap();
        let tree = dir.path().join("tree");
        write_text(&tree.join("x/y.md"), "hi").unwrap();
        remove(&tree).unwrap();
        assert!(!tree.exists());
    }

    #[test]
    fn copy_recurses_into_directories() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        write_text(&src.join("one.md"), "1").unwrap();
        write_text(&src.join("nested/two.md"), "2").unwrap();

        let dest = dir.path().join("out/copy");
        copy(&src, &dest).unwrap();
        assert_eq!(read_text(&dest.join("one.md")).unwrap(), "1");
        assert_eq!(read_text(&dest.join("nested/two.md")).unwrap(), "2");
    }

    #[test]
    fn list_stems_filters_extensions() {
        let dir = TempDir::new().unwrap();
        for name in ["b.yaml", "a.yml", "c.json", "d.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        let stems = list_stems(dir.path(), &["yaml", "yml"]).unwrap();
        assert_eq!(stems, vec!["a", "b"]);
        assert!(list_stems(&dir.path().join("missing"), &["yaml"])
            .unwrap()
            .is_empty());
    }
}
