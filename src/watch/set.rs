// src/watch/set.rs

use std::collections::BTreeSet;
use std::collections::btree_set;

use crate::platform::Granularity;
use crate::watch::path_utils::WatchPath;

/// Every path the user asked to hear about, exactly as given.
///
/// Filled during registration and read-only once the event loop starts.
#[derive(Debug, Default, Clone)]
pub struct WatchSet {
    paths: BTreeSet<WatchPath>,
}

impl WatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if `path` was already present.
    pub fn insert(&mut self, path: WatchPath) -> bool {
        self.paths.insert(path)
    }

    pub fn contains(&self, path: &WatchPath) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, WatchPath> {
        self.paths.iter()
    }
}

impl<'a> IntoIterator for &'a WatchSet {
    type Item = &'a WatchPath;
    type IntoIter = btree_set::Iter<'a, WatchPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// What has to be registered with the kernel so that `path` is observable.
///
/// Directory-granularity backends watch directories: a directory watches
/// itself, anything else (including paths that do not exist yet) is watched
/// through its parent. File-granularity backends watch the exact path.
pub fn watch_target(path: &WatchPath, is_dir: bool, granularity: Granularity) -> WatchPath {
    match granularity {
        Granularity::File => path.clone(),
        Granularity::Directory if is_dir => path.clone(),
        Granularity::Directory => path.dirname(),
    }
}
