use std::path::Path;

/// A path as the string the watcher will see.
pub fn path_str(path: &Path) -> String {
    path.to_str().expect("temp paths are UTF-8").to_string()
}
