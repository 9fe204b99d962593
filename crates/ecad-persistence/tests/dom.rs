//! Tests for the document tree: grammar, structure invariants, lookup
//! and navigation.

use ecad_model::Length;
use ecad_persistence::{DomError, DomTree, is_valid_name};

#[test]
fn name_grammar_is_enforced() {
    for name in ["_ok1", "Foo_Bar2", "pad", "net_1"] {
        assert!(is_valid_name(name), "rejected {name:?}");
    }
    for name in ["", "1abc", "xmlFoo", "XMLFOO", "xMl", "with-dash", "with space"] {
        assert!(!is_valid_name(name), "accepted {name:?}");
    }

    let mut tree = DomTree::new("root").unwrap();
    let root = tree.root();
    assert!(matches!(
        tree.append_new_child(root, "1abc"),
        Err(DomError::InvalidName { .. })
    ));
    assert!(matches!(
        tree.set_attribute(root, "xmlns", 1u32),
        Err(DomError::InvalidName { .. })
    ));
}

#[test]
#[should_panic(expected = "cannot carry text")]
fn setting_text_on_element_with_children_panics() {
    let mut tree = DomTree::new("root").unwrap();
    let root = tree.root();
    tree.append_new_child(root, "child").unwrap();
    tree.set_text(root, String::from("boom"));
}

#[test]
#[should_panic(expected = "cannot have child elements")]
fn appending_child_to_text_element_panics() {
    let mut tree = DomTree::new("root").unwrap();
    let root = tree.root();
    tree.set_text(root, String::from("text"));
    let child = tree.create_element("child").unwrap();
    tree.append_child(root, child);
}

#[test]
#[should_panic(expected = "already owned")]
fn reparenting_an_owned_child_panics() {
    let mut tree = DomTree::new("root").unwrap();
    let root = tree.root();
    let a = tree.append_new_child(root, "a").unwrap();
    let b = tree.append_new_child(root, "b").unwrap();
    let owned = tree.append_new_child(a, "owned").unwrap();
    tree.append_child(b, owned);
}

#[test]
fn reading_text_from_element_with_children_is_an_error() {
    let mut tree = DomTree::new("root").unwrap();
    let root = tree.root();
    tree.append_new_child(root, "child").unwrap();
    assert!(matches!(
        tree.text::<String>(root),
        Err(DomError::NotTextElement { .. })
    ));
    // Also on the opted-in-default path: the structure is still wrong.
    assert!(matches!(
        tree.text_or(root, String::new()),
        Err(DomError::NotTextElement { .. })
    ));
}

#[test]
fn text_accessors_distinguish_empty_and_malformed() {
    let mut tree = DomTree::new("root").unwrap();
    let root = tree.root();
    let empty = tree.append_text_child(root, "empty", String::new()).unwrap();
    let bad = tree
        .append_text_child(root, "bad", String::from("five"))
        .unwrap();
    let good = tree.append_text_child(root, "good", 5i32).unwrap();

    assert!(matches!(
        tree.text::<i32>(empty),
        Err(DomError::EmptyValue { .. })
    ));
    assert_eq!(tree.text_or(empty, 7i32).unwrap(), 7);

    assert!(matches!(
        tree.text::<i32>(bad),
        Err(DomError::InvalidFormat { .. })
    ));
    // A malformed value is never papered over by a default.
    assert!(matches!(
        tree.text_or(bad, 7i32),
        Err(DomError::InvalidFormat { .. })
    ));

    assert_eq!(tree.text::<i32>(good).unwrap(), 5);
}

#[test]
fn attribute_accessors() {
    let mut tree = DomTree::new("root").unwrap();
    let root = tree.root();

    tree.set_attribute(root, "width", Length::from_nm(100_000)).unwrap();
    assert!(tree.has_attribute(root, "width"));
    assert_eq!(
        tree.attribute::<Length>(root, "width").unwrap(),
        Length::from_nm(100_000)
    );

    // Last write wins.
    tree.set_attribute(root, "width", Length::from_nm(200_000)).unwrap();
    assert_eq!(
        tree.attribute::<Length>(root, "width").unwrap(),
        Length::from_nm(200_000)
    );

    assert!(matches!(
        tree.attribute::<Length>(root, "height"),
        Err(DomError::AttributeNotFound { .. })
    ));
    assert_eq!(
        tree.attribute_or(root, "height", Length::ZERO).unwrap(),
        Length::ZERO
    );

    tree.set_attribute(root, "empty", String::new()).unwrap();
    assert!(matches!(
        tree.attribute::<bool>(root, "empty"),
        Err(DomError::EmptyValue { .. })
    ));
    assert!(tree.attribute_or(root, "empty", true).unwrap());

    tree.set_attribute(root, "flag", String::from("yes")).unwrap();
    assert!(matches!(
        tree.attribute_or(root, "flag", false),
        Err(DomError::InvalidFormat { .. })
    ));
}

fn abc_tree() -> DomTree {
    // <a><b><c>5</c></b></a>
    let mut tree = DomTree::new("a").unwrap();
    let a = tree.root();
    let b = tree.append_new_child(a, "b").unwrap();
    tree.append_text_child(b, "c", 5i32).unwrap();
    tree
}

#[test]
fn path_lookup() {
    let tree = abc_tree();
    let a = tree.root();

    let c = tree.child_by_path(a, "b/c").unwrap();
    assert_eq!(tree.text::<i32>(c).unwrap(), 5);

    let first = tree.child_by_path(a, "b/*").unwrap();
    assert_eq!(tree.name(first), "c");

    assert_eq!(tree.find_child_by_path(a, "x/y"), None);
}

#[test]
fn path_lookup_reports_the_failing_segment() {
    let tree = abc_tree();
    let a = tree.root();

    match tree.child_by_path(a, "x/y") {
        Err(DomError::PathNotFound { segment, element, .. }) => {
            assert_eq!(segment, "x");
            assert_eq!(element, "a");
        }
        other => panic!("expected PathNotFound, got {other:?}"),
    }

    match tree.child_by_path(a, "b/missing") {
        Err(DomError::ChildNotFound { child, element, .. }) => {
            assert_eq!(child, "missing");
            assert_eq!(element, "b");
        }
        other => panic!("expected ChildNotFound, got {other:?}"),
    }
}

#[test]
fn sibling_navigation() {
    let mut tree = DomTree::new("list").unwrap();
    let list = tree.root();
    let first = tree.append_new_child(list, "item").unwrap();
    let second = tree.append_new_child(list, "item").unwrap();
    let third = tree.append_new_child(list, "item").unwrap();

    assert_eq!(tree.next_sibling(first), Some(second));
    assert_eq!(tree.next_sibling(second), Some(third));
    assert_eq!(tree.next_sibling(third), None);

    assert_eq!(tree.previous_sibling(third), Some(second));
    assert_eq!(tree.previous_sibling(first), None);

    // The root has no parent, so it has no siblings.
    assert_eq!(tree.next_sibling(list), None);
}

#[test]
fn sibling_navigation_with_name_filter() {
    let mut tree = DomTree::new("list").unwrap();
    let list = tree.root();
    let item = tree.append_new_child(list, "item").unwrap();
    tree.append_new_child(list, "separator").unwrap();
    let other_item = tree.append_new_child(list, "item").unwrap();

    assert_eq!(tree.next_sibling_named(item, "item"), Some(other_item));
    assert_eq!(tree.next_sibling_named(item, "missing"), None);
    assert_eq!(tree.previous_sibling_named(other_item, "item"), Some(item));
}

#[test]
fn detach_and_reattach() {
    let mut tree = DomTree::new("root").unwrap();
    let root = tree.root();
    let a = tree.append_new_child(root, "a").unwrap();
    let b = tree.append_new_child(root, "b").unwrap();
    let movable = tree.append_new_child(a, "movable").unwrap();

    assert!(tree.is_attached(movable));
    tree.remove_child(a, movable, false);
    assert_eq!(tree.parent(movable), None);
    assert!(!tree.is_attached(movable));
    assert_eq!(tree.root_of(movable), movable);

    tree.append_child(b, movable);
    assert_eq!(tree.parent(movable), Some(b));
    assert!(tree.is_attached(movable));
    assert_eq!(tree.root_of(movable), root);
}

#[test]
fn destroy_removes_the_whole_subtree() {
    let mut tree = DomTree::new("root").unwrap();
    let root = tree.root();
    let branch = tree.append_new_child(root, "branch").unwrap();
    tree.append_new_child(branch, "leaf").unwrap();

    tree.destroy(branch);
    assert_eq!(tree.child_count(root), 0);
    assert_eq!(tree.find_child_by_path(root, "branch/leaf"), None);
}

#[test]
#[should_panic(expected = "not a child")]
fn removing_a_non_child_panics() {
    let mut tree = DomTree::new("root").unwrap();
    let root = tree.root();
    let a = tree.append_new_child(root, "a").unwrap();
    let stranger = tree.create_element("stranger").unwrap();
    tree.remove_child(a, stranger, false);
}
