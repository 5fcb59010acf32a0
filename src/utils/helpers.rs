//! Path helpers for sift.
//!
//! - Resolving the home directory
//! - Displaying home directories as "~" in file paths
//! - Expanding "~" in typed paths
//! - Resolving a typed path against the current directory, lexically normalized

use std::env;
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// Home directory from `HOME`, falling back to the platform lookup.
pub fn get_home() -> Option<PathBuf> {
    env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

pub fn shorten_home_path<P: AsRef<Path>>(path: P, home: Option<&Path>) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = home
        && let Ok(stripped) = path.strip_prefix(home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", MAIN_SEPARATOR, stripped.display());
    }
    path.display().to_string()
}

/// Expands a leading `~` or `~/` to `home`. Other inputs are returned unchanged.
pub fn expand_home_path(input: &str, home: Option<&Path>) -> PathBuf {
    match (input.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(input),
    }
}

/// Resolves a typed path against `base` and normalizes it without touching the filesystem.
///
/// `.` components are dropped, `..` pops one component (never above the root) and trailing
/// separators disappear.
pub fn resolve_path(base: &Path, input: &str, home: Option<&Path>) -> PathBuf {
    let expanded = expand_home_path(input, home);
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };
    normalize(&joined)
}

pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if out.parent().is_some() {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(Component::RootDir.as_os_str());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_absolute_and_home() {
        let base = Path::new("/usr/share");
        let home = Some(Path::new("/home/ana"));

        assert_eq!(resolve_path(base, "doc", home), PathBuf::from("/usr/share/doc"));
        assert_eq!(resolve_path(base, "../lib/", home), PathBuf::from("/usr/lib"));
        assert_eq!(resolve_path(base, "/etc/./ssh", home), PathBuf::from("/etc/ssh"));
        assert_eq!(resolve_path(base, "~", home), PathBuf::from("/home/ana"));
        assert_eq!(resolve_path(base, "~/src", home), PathBuf::from("/home/ana/src"));
        assert_eq!(resolve_path(base, "~other", home), PathBuf::from("/usr/share/~other"));
    }

    #[test]
    fn parent_never_climbs_above_root() {
        assert_eq!(normalize(Path::new("/../..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("/a/b/../../..")), PathBuf::from("/"));
    }

    #[test]
    fn home_is_shortened_in_display() {
        let home = Some(Path::new("/home/ana"));
        assert_eq!(shorten_home_path("/home/ana", home), "~");
        assert_eq!(shorten_home_path("/home/ana/docs", home), "~/docs");
        assert_eq!(shorten_home_path("/home/anabel", home), "/home/anabel");
        assert_eq!(shorten_home_path("/tmp", None), "/tmp");
    }
}
