//! Capability-based file access for MarketView front ends.
//!
//! Paths arrive as UTF-8 [`camino`] paths from the command line or
//! configuration. Each helper resolves an ambient directory once and performs
//! the operation through [`cap_std`], so callers never touch `std::fs`.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io::{self, Read};
use std::path::Component;

/// Read a UTF-8 file such as an analysis request into memory.
pub fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut file = fs_utf8::File::open_ambient(path, ambient_authority())?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Return whether an existing `path` is a regular file.
///
/// A missing path is reported as an [`io::ErrorKind::NotFound`] error so
/// callers can tell it apart from a directory.
pub fn is_regular_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = parent_dir_and_name(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Create every missing directory above `path`, e.g. before opening a
/// saved-search database there.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }
    let (root, relative) = split_root(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    root.create_dir_all(&relative)
}

/// Open the directory containing `path` and return it with the file name.
fn parent_dir_and_name(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Split `dir` into an opened root (filesystem root, drive prefix or the
/// current directory) and the path relative to it.
fn split_root(dir: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_dir = dir.as_std_path();
    let (root, relative) = match std_dir.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            let root = Utf8PathBuf::from(format!("{prefix}{}", std::path::MAIN_SEPARATOR));
            let relative = std_dir
                .strip_prefix(root.as_std_path())
                .map_err(|_| io::Error::other(format!("{dir} is not below {root}")))?;
            (root, relative.to_path_buf())
        }
        Some(Component::RootDir) => {
            let root = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_dir
                .strip_prefix(root.as_std_path())
                .map_err(|_| io::Error::other(format!("{dir} is not absolute")))?;
            (root, relative.to_path_buf())
        }
        _ => (Utf8PathBuf::from("."), std_dir.to_path_buf()),
    };
    let opened = fs_utf8::Dir::open_ambient_dir(&root, ambient_authority())?;
    let relative =
        Utf8PathBuf::from_path_buf(relative).map_err(|_| io::Error::other("non-UTF-8 path"))?;
    Ok((opened, relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().unwrap_or_else(|err| panic!("create temporary directory: {err}"))
    }

    fn utf8(dir: &TempDir, relative: &str) -> Utf8PathBuf {
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .unwrap_or_else(|path| panic!("temporary path {} is not UTF-8", path.display()));
        root.join(relative)
    }

    #[rstest]
    fn reads_request_text(temp_dir: TempDir) {
        let path = utf8(&temp_dir, "request.json");
        std::fs::write(&path, "{\"radius\":10}")
            .unwrap_or_else(|err| panic!("write request: {err}"));

        let text = read_to_string(&path).unwrap_or_else(|err| panic!("read request: {err}"));
        assert_eq!(text, "{\"radius\":10}");
    }

    #[rstest]
    fn reading_a_missing_file_fails(temp_dir: TempDir) {
        let err = read_to_string(&utf8(&temp_dir, "absent.json"))
            .err()
            .unwrap_or_else(|| panic!("missing file should not be readable"));
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn distinguishes_files_from_directories(temp_dir: TempDir) {
        let file = utf8(&temp_dir, "saved.db");
        std::fs::write(&file, b"").unwrap_or_else(|err| panic!("write file: {err}"));
        let dir = utf8(&temp_dir, "nested");
        std::fs::create_dir(&dir).unwrap_or_else(|err| panic!("create dir: {err}"));

        assert!(is_regular_file(&file).unwrap_or(false));
        assert!(!is_regular_file(&dir).unwrap_or(true));
    }

    #[rstest]
    fn missing_paths_report_not_found(temp_dir: TempDir) {
        let err = is_regular_file(&utf8(&temp_dir, "absent.db"))
            .err()
            .unwrap_or_else(|| panic!("missing path should error"));
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn creates_nested_parents(temp_dir: TempDir) {
        let target = utf8(&temp_dir, "state/searches/saved.db");
        ensure_parent_dir(&target).unwrap_or_else(|err| panic!("create parents: {err}"));

        assert!(utf8(&temp_dir, "state/searches").is_dir());
        assert!(!target.exists());
    }

    #[rstest]
    #[case("saved.db")]
    #[case("/")]
    fn paths_without_parents_are_accepted(#[case] path: &str) {
        assert!(ensure_parent_dir(Utf8Path::new(path)).is_ok());
    }
}
