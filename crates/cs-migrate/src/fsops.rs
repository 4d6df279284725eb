//! Filesystem operations used by a migration.
//!
//! Moves try a plain rename first. When source and destination are on
//! different devices (e.g. a project on a local disk and assets on a NAS
//! mount) the tree is copied with [`ignore::WalkBuilder`], filters off, and
//! the source removed afterwards.

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::MigrateError;

/// Lists the immediate entries of `dir`, sorted by name.
pub fn list_entries(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, MigrateError> {
    let read_dir = fs::read_dir(dir).map_err(|e| MigrateError::io("failed to list", dir, e))?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| MigrateError::io("failed to list", dir, e))?;
        let path = Utf8PathBuf::from_path_buf(entry.path()).map_err(MigrateError::NonUtf8Path)?;
        entries.push(path);
    }
    entries.sort();

    Ok(entries)
}

/// Creates `dir` and any missing parents.
pub fn ensure_dir(dir: &Utf8Path) -> Result<(), MigrateError> {
    fs::create_dir_all(dir).map_err(|e| MigrateError::io("failed to create directory", dir, e))
}

/// Moves a file or directory tree from `from` to `to`.
///
/// `to` must not exist; its parent must.
pub fn move_path(from: &Utf8Path, to: &Utf8Path) -> Result<(), MigrateError> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!(%from, %to, "Rename crosses devices, copying instead");
            copy_tree(from, to)?;
            remove_path(from)
        }
        Err(e) => Err(MigrateError::io("failed to move", from, e)),
    }
}

/// Moves every path in `entries` into `destination` in parallel.
///
/// Each entry keeps its file name. All moves are attempted; if any fail the
/// first failure (in entry order) is returned wrapped in
/// [`MigrateError::MoveFailed`].
pub fn move_all_into(entries: &[Utf8PathBuf], destination: &Utf8Path) -> Result<(), MigrateError> {
    let results: Vec<Result<(), MigrateError>> = entries
        .par_iter()
        .map(|entry| {
            let name = entry
                .file_name()
                .ok_or_else(|| MigrateError::io("failed to move", entry, invalid_name()))?;
            move_path(entry, &destination.join(name))
        })
        .collect();

    let total = results.len();
    let mut failures = results.into_iter().filter_map(Result::err);

    let Some(first) = failures.next() else {
        return Ok(());
    };
    warn!(error = %first, "Move failed");

    let mut failed = 1;
    for err in failures {
        warn!(error = %err, "Move failed");
        failed += 1;
    }

    Err(MigrateError::MoveFailed {
        failed,
        total,
        destination: destination.to_owned(),
        first: Box::new(first),
    })
}

/// Copies a single file, overwriting the destination.
pub fn copy_file(from: &Utf8Path, to: &Utf8Path) -> Result<(), MigrateError> {
    fs::copy(from, to)
        .map(drop)
        .map_err(|e| MigrateError::io("failed to copy", from, e))
}

/// Reads a UTF-8 text file.
pub fn read_text(path: &Utf8Path) -> Result<String, MigrateError> {
    fs::read_to_string(path).map_err(|e| MigrateError::io("failed to read", path, e))
}

/// Writes a UTF-8 text file, replacing any existing contents.
pub fn write_text(path: &Utf8Path, contents: &str) -> Result<(), MigrateError> {
    fs::write(path, contents).map_err(|e| MigrateError::io("failed to write", path, e))
}

fn invalid_name() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, "path has no file name")
}

/// Recursively copies `from` to `to`, including hidden files and `.git`.
fn copy_tree(from: &Utf8Path, to: &Utf8Path) -> Result<(), MigrateError> {
    let walker = WalkBuilder::new(from)
        .standard_filters(false)
        .follow_links(false)
        .build();

    for result in walker {
        let entry = result.map_err(|e| MigrateError::io("failed to walk", from, io::Error::other(e)))?;
        let path = Utf8Path::from_path(entry.path())
            .ok_or_else(|| MigrateError::NonUtf8Path(entry.path().to_owned()))?;
        let relative = path
            .strip_prefix(from)
            .map_err(|_| MigrateError::io("failed to copy", path, invalid_name()))?;
        let target = if relative.as_str().is_empty() {
            to.to_owned()
        } else {
            to.join(relative)
        };

        let Some(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            ensure_dir(&target)?;
        } else if file_type.is_symlink() {
            copy_symlink(path, &target)?;
        } else {
            copy_file(path, &target)?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(from: &Utf8Path, to: &Utf8Path) -> Result<(), MigrateError> {
    let link = fs::read_link(from).map_err(|e| MigrateError::io("failed to read link", from, e))?;
    std::os::unix::fs::symlink(link, to).map_err(|e| MigrateError::io("failed to link", to, e))
}

#[cfg(not(unix))]
fn copy_symlink(from: &Utf8Path, to: &Utf8Path) -> Result<(), MigrateError> {
    copy_file(from, to)
}

fn remove_path(path: &Utf8Path) -> Result<(), MigrateError> {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| MigrateError::io("failed to remove", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_list_entries_sorted_non_recursive() {
        let (_guard, root) = temp_dir();
        fs::write(root.join("b.txt"), "b").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::create_dir(root.join("dir")).unwrap();
        fs::write(root.join("dir").join("nested.txt"), "n").unwrap();

        let names: Vec<_> = list_entries(&root)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "dir"]);
    }

    #[test]
    fn test_list_missing_dir_fails() {
        let (_guard, root) = temp_dir();
        let err = list_entries(&root.join("missing")).unwrap_err();
        assert!(matches!(err, MigrateError::Io { .. }));
    }

    #[test]
    fn test_move_path_directory() {
        let (_guard, root) = temp_dir();
        let from = root.join("Content");
        fs::create_dir_all(from.join(".git")).unwrap();
        fs::write(from.join("Hero.uasset"), "bin").unwrap();

        let to = root.join("elsewhere").join("Assets");
        ensure_dir(to.parent().unwrap()).unwrap();
        move_path(&from, &to).unwrap();

        assert!(!from.exists());
        assert!(to.join(".git").is_dir());
        assert_eq!(fs::read_to_string(to.join("Hero.uasset")).unwrap(), "bin");
    }

    #[test]
    fn test_copy_tree_includes_hidden_entries() {
        let (_guard, root) = temp_dir();
        let from = root.join("src");
        fs::create_dir_all(from.join(".git").join("objects")).unwrap();
        fs::write(from.join(".gitattributes"), "*.png filter=lfs").unwrap();
        fs::write(from.join(".git").join("HEAD"), "ref: refs/heads/main").unwrap();
        fs::write(from.join("Maps.umap"), "map").unwrap();

        let to = root.join("dst");
        copy_tree(&from, &to).unwrap();
        remove_path(&from).unwrap();

        assert!(!from.exists());
        assert!(to.join(".git").join("objects").is_dir());
        assert_eq!(
            fs::read_to_string(to.join(".git").join("HEAD")).unwrap(),
            "ref: refs/heads/main"
        );
        assert!(to.join(".gitattributes").is_file());
        assert!(to.join("Maps.umap").is_file());
    }

    #[test]
    fn test_move_all_into() {
        let (_guard, root) = temp_dir();
        for name in ["Config", "Source", "Plugins"] {
            fs::create_dir(root.join(name)).unwrap();
        }
        fs::write(root.join("MyGame.uproject"), "{}").unwrap();
        let entries = list_entries(&root).unwrap();

        let dest = root.join("MyGame");
        ensure_dir(&dest).unwrap();
        move_all_into(&entries, &dest).unwrap();

        let left: Vec<_> = list_entries(&root).unwrap();
        assert_eq!(left, vec![dest.clone()]);
        assert!(dest.join("MyGame.uproject").is_file());
        assert!(dest.join("Config").is_dir());
    }

    #[test]
    fn test_move_all_into_reports_every_failure() {
        let (_guard, root) = temp_dir();
        fs::write(root.join("present.txt"), "x").unwrap();
        let entries = vec![
            root.join("missing-a"),
            root.join("present.txt"),
            root.join("missing-b"),
        ];
        let dest = root.join("dest");
        ensure_dir(&dest).unwrap();

        let err = move_all_into(&entries, &dest).unwrap_err();
        match err {
            MigrateError::MoveFailed { failed, total, first, .. } => {
                assert_eq!(failed, 2);
                assert_eq!(total, 3);
                assert!(first.to_string().contains("missing-a"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(dest.join("present.txt").is_file());
    }

    #[test]
    fn test_text_roundtrip() {
        let (_guard, root) = temp_dir();
        let path = root.join("README.md");
        write_text(&path, "# Hi").unwrap();
        assert_eq!(read_text(&path).unwrap(), "# Hi");
    }
}
