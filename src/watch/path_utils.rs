// src/watch/path_utils.rs

//! Byte-exact path strings and the two pieces of path algebra the watcher
//! needs: `dirname` and joining a child name onto a container.
//!
//! Nothing here touches the filesystem. Paths are compared exactly as given:
//! `./a`, `a` and `a/` are three different paths.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::Path;

const SEP: u8 = b'/';

/// A path exactly as the user supplied it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WatchPath(Vec<u8>);

impl WatchPath {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_os_str(&self) -> &OsStr {
        OsStr::from_bytes(&self.0)
    }

    pub fn as_path(&self) -> &Path {
        Path::new(self.as_os_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_nul(&self) -> bool {
        self.0.contains(&0)
    }

    /// Containing directory with POSIX `dirname` semantics.
    pub fn dirname(&self) -> WatchPath {
        WatchPath(dirname(&self.0).to_vec())
    }

    /// Full path of `child` inside this container.
    pub fn join_child(&self, child: &[u8]) -> WatchPath {
        WatchPath(join_child(&self.0, child))
    }
}

impl fmt::Debug for WatchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Display for WatchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl From<&str> for WatchPath {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<&[u8]> for WatchPath {
    fn from(b: &[u8]) -> Self {
        Self(b.to_vec())
    }
}

impl From<Vec<u8>> for WatchPath {
    fn from(b: Vec<u8>) -> Self {
        Self(b)
    }
}

impl From<OsString> for WatchPath {
    fn from(s: OsString) -> Self {
        Self(s.into_vec())
    }
}

impl From<&OsStr> for WatchPath {
    fn from(s: &OsStr) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

/// POSIX `dirname` on raw bytes.
///
/// - `""` and names without a separator give `"."`
/// - trailing separators are ignored: `"a/b/"` gives `"a"`
/// - anything rooted directly under `/` gives `"/"`
pub fn dirname(path: &[u8]) -> &[u8] {
    let trimmed = trim_trailing_seps(path);
    if trimmed.is_empty() {
        return if path.is_empty() { b"." } else { b"/" };
    }

    match trimmed.iter().rposition(|&b| b == SEP) {
        None => b".",
        Some(idx) => {
            let parent = trim_trailing_seps(&trimmed[..idx]);
            if parent.is_empty() { b"/" } else { parent }
        }
    }
}

/// Join `child` onto `container`.
///
/// A container of exactly `"."` yields the bare child, so current-directory
/// registrations print `x` rather than `./x`. An empty child yields the
/// container itself.
pub fn join_child(container: &[u8], child: &[u8]) -> Vec<u8> {
    if child.is_empty() {
        return container.to_vec();
    }
    if container == b"." {
        return child.to_vec();
    }

    let mut full = Vec::with_capacity(container.len() + 1 + child.len());
    full.extend_from_slice(container);
    if container.last() != Some(&SEP) {
        full.push(SEP);
    }
    full.extend_from_slice(child);
    full
}

fn trim_trailing_seps(path: &[u8]) -> &[u8] {
    let end = path.iter().rposition(|&b| b != SEP).map_or(0, |i| i + 1);
    &path[..end]
}
