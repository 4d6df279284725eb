//! Lexical path helpers.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Resolves `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root. Symlinks are not followed.
///
/// # Examples
///
/// ```
/// use cs_core::path::normalize;
/// use camino::Utf8Path;
///
/// assert_eq!(normalize(Utf8Path::new("/games/./MyGame/../Other")).as_str(), "/games/Other");
/// ```
#[must_use]
pub fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                let last_is_normal =
                    matches!(out.components().next_back(), Some(Utf8Component::Normal(_)));
                if last_is_normal {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_str()),
        }
    }
    out
}

/// Returns the path that leads from directory `base` to `path`.
///
/// Both inputs should be normalized. Returns `None` when no relative path
/// exists: one is absolute and the other not, the roots or drive prefixes
/// differ, or `base` keeps a `..` past the shared prefix.
///
/// # Examples
///
/// ```
/// use cs_core::path::relative_to;
/// use camino::Utf8Path;
///
/// let link = relative_to(Utf8Path::new("/nas/Assets"), Utf8Path::new("/games/MyGame"));
/// assert_eq!(link.as_deref().map(|p| p.as_str()), Some("../../nas/Assets"));
/// ```
#[must_use]
pub fn relative_to(path: &Utf8Path, base: &Utf8Path) -> Option<Utf8PathBuf> {
    if path.is_absolute() != base.is_absolute() {
        return None;
    }

    let path: Vec<Utf8Component<'_>> = path.components().collect();
    let base: Vec<Utf8Component<'_>> = base.components().collect();

    let shared = path.iter().zip(&base).take_while(|(a, b)| a == b).count();
    let anchored = |c: &Utf8Component<'_>| {
        matches!(c, Utf8Component::Prefix(_) | Utf8Component::RootDir)
    };
    if path[shared..].iter().any(anchored) || base[shared..].iter().any(anchored) {
        return None;
    }
    if base[shared..].contains(&Utf8Component::ParentDir) {
        return None;
    }

    let mut out = Utf8PathBuf::new();
    for _ in &base[shared..] {
        out.push("..");
    }
    for component in &path[shared..] {
        out.push(component.as_str());
    }
    if out.as_str().is_empty() {
        out.push(".");
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_absolute() {
        assert_eq!(normalize(Utf8Path::new("/a/b/../../c/./d")).as_str(), "/c/d");
        assert_eq!(normalize(Utf8Path::new("/../a")).as_str(), "/a");
    }

    #[test]
    fn test_normalize_relative_keeps_leading_parents() {
        assert_eq!(normalize(Utf8Path::new("../a/./b/..")).as_str(), "../a");
        assert_eq!(normalize(Utf8Path::new("../../a")).as_str(), "../../a");
    }

    #[test]
    fn test_relative_to_sibling_and_nested() {
        let rel = |p: &str, b: &str| relative_to(Utf8Path::new(p), Utf8Path::new(b)).map(|r| r.to_string());
        assert_eq!(rel("/a/x", "/a/b/c").as_deref(), Some("../../x"));
        assert_eq!(rel("/a/b/c", "/a").as_deref(), Some("b/c"));
        assert_eq!(rel("/a", "/a").as_deref(), Some("."));
        assert_eq!(rel("/a", "/").as_deref(), Some("a"));
    }

    #[test]
    fn test_relative_to_mismatched_anchors() {
        assert!(relative_to(Utf8Path::new("a/b"), Utf8Path::new("/a")).is_none());
        assert!(relative_to(Utf8Path::new("x"), Utf8Path::new("../y")).is_none());
    }
}
