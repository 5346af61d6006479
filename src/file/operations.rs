use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::config::FILE_EXTENSION;
use crate::error::{Result, TransformError};
use crate::types::Direction;

/// Opens the source for reading, folding "missing", "no permission" and
/// "not a regular file" into one validated result.
#[must_use = "the returned BufReader should be used to read the file"]
pub fn open_source(path: &Path) -> Result<(BufReader<File>, u64)> {
    let file = File::open(path).map_err(|e| TransformError::io(format!("failed to open source: {}", path.display()), e))?;

    let meta = file.metadata().map_err(|e| TransformError::io(format!("failed to stat source: {}", path.display()), e))?;

    if !meta.is_file() {
        return Err(TransformError::io(
            format!("source is not a regular file: {}", path.display()),
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }

    Ok((BufReader::new(file), meta.len()))
}

/// True when both paths exist and resolve to the same underlying file.
///
/// Missing paths compare as distinct: the guard only has to catch
/// transforms that would clobber an existing file.
#[must_use]
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;

        match (fs::metadata(a), fs::metadata(b)) {
            (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
            _ => false,
        }
    }

    #[cfg(not(unix))]
    {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(ca), Ok(cb)) => ca == cb,
            _ => false,
        }
    }
}

/// Derives the default output path: encrypt appends the extension, decrypt
/// strips it (falling back to the input path unchanged when absent).
#[inline]
#[must_use]
pub fn get_output_path(input: &Path, direction: Direction) -> PathBuf {
    match direction {
        Direction::Encrypt => {
            let mut name = input.as_os_str().to_os_string();
            name.push(FILE_EXTENSION);
            PathBuf::from(name)
        }
        Direction::Decrypt => input.to_string_lossy().strip_suffix(FILE_EXTENSION).map_or_else(|| input.to_path_buf(), PathBuf::from),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_open_source_missing_file() {
        let err = open_source(Path::new("/nonexistent/input.txt")).unwrap_err();
        assert!(matches!(err, TransformError::Io { .. }));
    }

    #[test]
    fn test_open_source_rejects_directory() {
        let dir = tempdir().unwrap();
        assert!(matches!(open_source(dir.path()), Err(TransformError::Io { .. })));
    }

    #[test]
    fn test_open_source_reports_length() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.txt");
        fs::write(&path, b"12345").unwrap();

        let (_, len) = open_source(&path).unwrap();
        assert_eq!(len, 5);
    }

    #[test]
    fn test_is_same_file() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, b"x").unwrap();
        fs::write(&b, b"x").unwrap();

        assert!(is_same_file(&a, &a));
        assert!(!is_same_file(&a, &b));
        assert!(!is_same_file(&a, &dir.path().join("missing.txt")));
    }

    #[test]
    fn test_get_output_path_encrypt() {
        assert_eq!(get_output_path(Path::new("document.txt"), Direction::Encrypt), PathBuf::from("document.txt.xcr"));
    }

    #[test]
    fn test_get_output_path_decrypt() {
        assert_eq!(get_output_path(Path::new("document.txt.xcr"), Direction::Decrypt), PathBuf::from("document.txt"));
        assert_eq!(get_output_path(Path::new("plain.bin"), Direction::Decrypt), PathBuf::from("plain.bin"));
    }
}
