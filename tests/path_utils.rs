// tests/path_utils.rs

use proptest::prelude::*;
use pathwatch::watch::{dirname, join_child, WatchPath};

fn d(path: &str) -> String {
    String::from_utf8(dirname(path.as_bytes()).to_vec()).unwrap()
}

fn j(container: &str, child: &str) -> String {
    String::from_utf8(join_child(container.as_bytes(), child.as_bytes())).unwrap()
}

#[test]
fn dirname_follows_posix() {
    assert_eq!(d(""), ".");
    assert_eq!(d("a"), ".");
    assert_eq!(d("."), ".");
    assert_eq!(d("./a"), ".");
    assert_eq!(d("a/b"), "a");
    assert_eq!(d("a/b/"), "a");
    assert_eq!(d("a//b"), "a");
    assert_eq!(d("a/b/c"), "a/b");
    assert_eq!(d("/"), "/");
    assert_eq!(d("//"), "/");
    assert_eq!(d("/a"), "/");
    assert_eq!(d("/a/b"), "/a");
}

#[test]
fn join_strips_current_directory() {
    assert_eq!(j(".", "x"), "x");
    assert_eq!(j("d", "x"), "d/x");
    assert_eq!(j("./d", "x"), "./d/x");
    assert_eq!(j("/", "etc"), "/etc");
    assert_eq!(j("d/", "x"), "d/x");
}

#[test]
fn join_with_empty_child_is_the_container() {
    assert_eq!(j("d", ""), "d");
    assert_eq!(j(".", ""), ".");
}

#[test]
fn watch_path_keeps_bytes_verbatim() {
    let raw = b"caf\xe9/menu".to_vec();
    let path = WatchPath::new(raw.clone());
    assert_eq!(path.as_bytes(), raw.as_slice());
    assert_eq!(path.dirname().as_bytes(), b"caf\xe9");
    assert_ne!(WatchPath::from("./a"), WatchPath::from("a"));
    assert!(WatchPath::new(b"a\0b".to_vec()).contains_nul());
}

fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9_.-]{1,8}".prop_filter("not a dot segment", |s| s != "." && s != "..")
}

proptest! {
    #[test]
    fn dirname_of_joined_child_is_container(
        parts in proptest::collection::vec(segment(), 1..4),
        child in segment(),
    ) {
        let container = parts.join("/");
        let full = j(&container, &child);
        prop_assert_eq!(d(&full), container);
    }

    #[test]
    fn current_directory_children_print_bare(child in segment()) {
        let full = j(".", &child);
        prop_assert_eq!(&full, &child);
        prop_assert_eq!(d(&full), ".");
    }

    #[test]
    fn trailing_separators_do_not_change_dirname(
        parts in proptest::collection::vec(segment(), 1..4),
        slashes in 1usize..4,
    ) {
        let path = parts.join("/");
        let padded = format!("{path}{}", "/".repeat(slashes));
        prop_assert_eq!(d(&padded), d(&path));
    }
}
