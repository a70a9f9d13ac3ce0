// src/watch/matcher.rs

//! Decides whether a resolved kernel event is something the user asked for.

use crate::platform::{Resolved, Subject};
use crate::watch::path_utils::WatchPath;
use crate::watch::set::WatchSet;

/// A matched event ready for the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub path: WatchPath,
    pub is_delete: bool,
}

/// Full path an event refers to, before any membership check.
pub fn candidate_path(subject: &Subject) -> WatchPath {
    match subject {
        Subject::Child { container, name } => container.join_child(name),
        Subject::Path(path) => path.clone(),
    }
}

/// Report `resolved` iff its candidate path, or the candidate's containing
/// directory, is in `set`.
///
/// For child events the watched container string is checked too: a
/// registration like `d/` is its own container but never the `dirname` of
/// any child.
pub fn match_event(set: &WatchSet, resolved: &Resolved) -> Option<Change> {
    let candidate = candidate_path(&resolved.subject);

    let hit = set.contains(&candidate)
        || set.contains(&candidate.dirname())
        || matches!(&resolved.subject, Subject::Child { container, .. } if set.contains(container));

    hit.then(|| Change {
        path: candidate,
        is_delete: resolved.is_delete,
    })
}
