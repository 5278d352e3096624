use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid documents root: {0}")]
    InvalidRoot(String),
}

/// Read a document and return its content
pub fn read_text(relative_path: &RelativePath, root: &Path) -> Result<String, StorageError> {
    let absolute_path = relative_path.to_path(root);
    if !absolute_path.exists() {
        return Err(StorageError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(StorageError::Io)
}

/// Write content to a document, creating parent directories
pub fn write_text(
    relative_path: &RelativePath,
    root: &Path,
    content: &str,
) -> Result<(), StorageError> {
    let absolute_path = relative_path.to_path(root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(StorageError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(StorageError::Io)
}

/// Scan for markdown files below `dir`, returned relative to `root` and sorted
pub fn scan_markdown_files(
    dir: &RelativePath,
    root: &Path,
) -> Result<Vec<RelativePathBuf>, StorageError> {
    let absolute_dir = dir.to_path(root);
    validate_root(&absolute_dir)?;

    let mut files = Vec::new();
    scan_directory_recursive(&absolute_dir, dir, &mut files)?;
    files.sort();
    Ok(files)
}

/// Whether `relative_path` names a directory under `root`
pub fn is_dir(relative_path: &RelativePath, root: &Path) -> bool {
    relative_path.to_path(root).is_dir()
}

/// Converts a command-line path to one relative to `root`.
///
/// Absolute paths below `root` are made relative; other absolute paths and
/// paths that are not valid UTF-8 are rejected.
pub fn relative_to_root(path: &Path, root: &Path) -> Result<RelativePathBuf, StorageError> {
    let path = if path.is_absolute() {
        path.strip_prefix(root).map_err(|_| {
            StorageError::InvalidRoot(format!("{} is outside {}", path.display(), root.display()))
        })?
    } else {
        path
    };
    RelativePathBuf::from_path(path)
        .map_err(|e| StorageError::InvalidRoot(format!("{}: {e}", path.display())))
}

pub fn validate_root(path: &Path) -> Result<(), StorageError> {
    if !path.exists() || !path.is_dir() {
        return Err(StorageError::InvalidRoot(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    Ok(())
}

fn scan_directory_recursive(
    dir: &Path,
    relative_dir: &RelativePath,
    files: &mut Vec<RelativePathBuf>,
) -> Result<(), StorageError> {
    let entries = fs::read_dir(dir).map_err(StorageError::Io)?;

    for entry in entries {
        let entry = entry.map_err(StorageError::Io)?;
        let path = entry.path();
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            log::warn!("skipping non UTF-8 path {}", path.display());
            continue;
        };
        let relative = relative_dir.join(name);

        if path.is_dir() {
            scan_directory_recursive(&path, &relative, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(relative);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_root() -> TempDir {
        TempDir::new().unwrap()
    }

    fn create_test_file(root: &TempDir, filename: &str, content: &str) -> PathBuf {
        let path = root.path().join(filename);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_scan_nested_directories() {
        let root = create_test_root();
        create_test_file(&root, "b.md", "# B");
        create_test_file(&root, "a.md", "# A");
        create_test_file(&root, "sub/c.md", "# C");
        create_test_file(&root, "image.png", "fake image data");

        let files = scan_markdown_files(RelativePath::new(""), root.path()).unwrap();

        assert_eq!(
            files,
            vec![
                RelativePathBuf::from("a.md"),
                RelativePathBuf::from("b.md"),
                RelativePathBuf::from("sub/c.md"),
            ]
        );
    }

    #[test]
    fn test_scan_subdirectory_keeps_prefix() {
        let root = create_test_root();
        create_test_file(&root, "notes/x.md", "x");

        let files = scan_markdown_files(RelativePath::new("notes"), root.path()).unwrap();
        assert_eq!(files, vec![RelativePathBuf::from("notes/x.md")]);
    }

    #[test]
    fn test_scan_invalid_root() {
        let root = create_test_root();
        let result = scan_markdown_files(RelativePath::new("missing"), root.path());
        assert!(matches!(result, Err(StorageError::InvalidRoot(_))));
    }

    #[test]
    fn test_read_text_success() {
        let root = create_test_root();
        create_test_file(&root, "test.md", "# Test Content\n\nParagraph");

        let content = read_text(RelativePath::new("test.md"), root.path()).unwrap();
        assert_eq!(content, "# Test Content\n\nParagraph");
    }

    #[test]
    fn test_read_text_not_found() {
        let root = create_test_root();
        let result = read_text(RelativePath::new("nonexistent.md"), root.path());
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_write_text_creates_parent_directories() {
        let root = create_test_root();
        let relative_path = RelativePath::new("folder/subfolder/new_file.md");

        write_text(relative_path, root.path(), "# Nested").unwrap();

        assert_eq!(read_text(relative_path, root.path()).unwrap(), "# Nested");
        assert!(root.path().join("folder/subfolder").is_dir());
    }

    #[test]
    fn test_write_text_overwrites_existing() {
        let root = create_test_root();
        create_test_file(&root, "existing.md", "# Original");
        let relative_path = RelativePath::new("existing.md");

        write_text(relative_path, root.path(), "# Updated").unwrap();

        assert_eq!(read_text(relative_path, root.path()).unwrap(), "# Updated");
    }

    #[test]
    fn test_relative_to_root() {
        let root = create_test_root();
        let inside = root.path().join("a/b.md");

        assert_eq!(
            relative_to_root(&inside, root.path()).unwrap(),
            RelativePathBuf::from("a/b.md")
        );
        assert_eq!(
            relative_to_root(Path::new("c.md"), root.path()).unwrap(),
            RelativePathBuf::from("c.md")
        );
        assert!(matches!(
            relative_to_root(Path::new("/elsewhere/d.md"), root.path()),
            Err(StorageError::InvalidRoot(_))
        ));
    }
}
