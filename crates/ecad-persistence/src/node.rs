//! Arena-based document tree.
//!
//! All elements of a tree live in one contiguous arena owned by
//! [`DomTree`] and are addressed through stable [`NodeId`] handles.
//! Parent links are plain indices, so ownership stays a strict tree:
//! dropping the arena frees every element at once and cycles cannot be
//! built. Destroyed elements leave a tombstone behind and their ids are
//! never reused, so any use of a stale id is caught immediately.
//!
//! Each element carries a tag name, attributes, and *either* an ordered
//! child list *or* text, never both. Text is tracked with an explicit
//! has-text flag: `None` means "no text at all" (a self-closing element
//! on the wire), `Some("")` means present-but-empty text.

use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use crate::codec::Codec;
use crate::error::{DomError, Result};

/// Stable handle to one element of a [`DomTree`].
///
/// A `NodeId` is a `NonZeroU32` index into the owning arena, so
/// `Option<NodeId>` is free. Ids are only meaningful for the tree that
/// created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index).expect("node arena index overflow");
        Self(NonZeroU32::new(raw).expect("node arena index must be non-zero"))
    }

    fn as_index(self) -> usize {
        self.0.get() as usize
    }
}

/// Check a tag or attribute name against the name grammar.
///
/// Names start with an ASCII letter or underscore, continue with letters,
/// digits or underscores, and must not start with the reserved `xml`
/// prefix in any capitalization.
pub fn is_valid_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    if bytes.len() >= 3 && bytes[..3].eq_ignore_ascii_case(b"xml") {
        return false;
    }
    (bytes[0].is_ascii_alphabetic() || bytes[0] == b'_')
        && bytes[1..]
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || *b == b'_')
}

#[derive(Debug, Clone)]
struct NodeData {
    name: String,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl NodeData {
    fn new(name: &str, text: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            attributes: BTreeMap::new(),
            text,
            children: Vec::new(),
            parent: None,
        }
    }
}

/// A document tree: one root element plus any number of elements created
/// in the same arena, waiting to be attached.
///
/// Querying and mutating always goes through the tree with a [`NodeId`];
/// there is no free-standing element type. The tree also remembers the
/// file it was read from (empty for programmatically built trees), used
/// only to give diagnostics a location.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// Slot 0 is an unused placeholder so ids can be `NonZeroU32`.
    /// Destroyed elements become `None` and the slot is never reused.
    nodes: Vec<Option<NodeData>>,
    root: NodeId,
    file_path: PathBuf,
}

impl DomTree {
    /// Create a tree holding a single root element with the given name.
    pub fn new(root_name: &str) -> Result<Self> {
        if !is_valid_name(root_name) {
            return Err(DomError::InvalidName {
                file: PathBuf::new(),
                name: root_name.to_string(),
            });
        }
        let nodes = vec![None, Some(NodeData::new(root_name, None))];
        Ok(Self {
            nodes,
            root: NodeId::from_index(1),
            file_path: PathBuf::new(),
        })
    }

    /// The root element. Always valid and never replaced.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The file this tree was read from, or an empty path.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub(crate) fn set_file_path(&mut self, path: &Path) {
        self.file_path = path.to_path_buf();
    }

    fn node(&self, id: NodeId) -> &NodeData {
        self.nodes
            .get(id.as_index())
            .and_then(Option::as_ref)
            .expect("use of a destroyed or foreign node id")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        self.nodes
            .get_mut(id.as_index())
            .and_then(Option::as_mut)
            .expect("use of a destroyed or foreign node id")
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Some(data));
        id
    }

    fn check_name(&self, name: &str) -> Result<()> {
        if is_valid_name(name) {
            Ok(())
        } else {
            Err(DomError::InvalidName {
                file: self.file_path.clone(),
                name: name.to_string(),
            })
        }
    }

    /// Spell out where a value lives for diagnostics: the element name,
    /// or `element/@attribute` for attribute values.
    fn location(&self, id: NodeId, attribute: Option<&str>) -> String {
        let element = &self.node(id).name;
        match attribute {
            Some(attribute) => format!("{element}/@{attribute}"),
            None => element.clone(),
        }
    }

    // Element creation

    /// Create a new detached element in this tree's arena.
    pub fn create_element(&mut self, name: &str) -> Result<NodeId> {
        self.check_name(name)?;
        Ok(self.alloc(NodeData::new(name, None)))
    }

    /// Create a new detached text element holding the encoded value.
    pub fn create_text_element<T: Codec>(&mut self, name: &str, value: T) -> Result<NodeId> {
        self.check_name(name)?;
        Ok(self.alloc(NodeData::new(name, Some(value.encode()))))
    }

    // Names

    pub fn name(&self, id: NodeId) -> &str {
        &self.node(id).name
    }

    pub fn set_name(&mut self, id: NodeId, name: &str) -> Result<()> {
        self.check_name(name)?;
        self.node_mut(id).name = name.to_string();
        Ok(())
    }

    // Text

    /// Whether this element carries text (possibly empty).
    pub fn has_text(&self, id: NodeId) -> bool {
        self.node(id).text.is_some()
    }

    /// The raw text of this element; `None` means no text at all.
    pub fn raw_text(&self, id: NodeId) -> Option<&str> {
        self.node(id).text.as_deref()
    }

    /// Set the text of this element, overwriting any previous text.
    ///
    /// # Panics
    ///
    /// Panics if the element has child elements; an element never holds
    /// both. That situation is a bug in the calling code, not bad input.
    pub fn set_text<T: Codec>(&mut self, id: NodeId, value: T) {
        let data = self.node_mut(id);
        assert!(
            data.children.is_empty(),
            "element \"{}\" has child elements and cannot carry text",
            data.name
        );
        data.text = Some(value.encode());
    }

    /// Decode this element's text as `T`. The text must be present and
    /// non-empty.
    pub fn text<T: Codec>(&self, id: NodeId) -> Result<T> {
        let raw = self.text_for_read(id)?;
        if raw.is_empty() {
            return Err(DomError::EmptyValue {
                file: self.file_path.clone(),
                location: self.location(id, None),
            });
        }
        self.decode_value(id, None, raw)
    }

    /// Decode this element's text as `T`, substituting `default` when the
    /// text is absent or empty. A malformed non-empty text still fails.
    pub fn text_or<T: Codec>(&self, id: NodeId, default: T) -> Result<T> {
        let raw = self.text_for_read(id)?;
        if raw.is_empty() {
            return Ok(default);
        }
        self.decode_value(id, None, raw)
    }

    fn text_for_read(&self, id: NodeId) -> Result<&str> {
        let data = self.node(id);
        if !data.children.is_empty() {
            return Err(DomError::NotTextElement {
                file: self.file_path.clone(),
                element: data.name.clone(),
            });
        }
        Ok(data.text.as_deref().unwrap_or(""))
    }

    fn decode_value<T: Codec>(&self, id: NodeId, attribute: Option<&str>, raw: &str) -> Result<T> {
        T::decode(raw).ok_or_else(|| DomError::InvalidFormat {
            file: self.file_path.clone(),
            location: self.location(id, attribute),
            value: raw.to_string(),
            expected: T::TYPE_NAME,
        })
    }

    // Attributes

    /// Set or overwrite an attribute; the last write wins.
    pub fn set_attribute<T: Codec>(&mut self, id: NodeId, name: &str, value: T) -> Result<()> {
        self.check_name(name)?;
        self.node_mut(id)
            .attributes
            .insert(name.to_string(), value.encode());
        Ok(())
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.node(id).attributes.contains_key(name)
    }

    /// All attributes in serialization (sorted) order.
    pub fn attributes(&self, id: NodeId) -> impl Iterator<Item = (&str, &str)> {
        self.node(id)
            .attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Decode an attribute as `T`. The attribute must exist and be
    /// non-empty.
    pub fn attribute<T: Codec>(&self, id: NodeId, name: &str) -> Result<T> {
        let raw = self.attribute_for_read(id, name)?;
        if raw.is_empty() {
            return Err(DomError::EmptyValue {
                file: self.file_path.clone(),
                location: self.location(id, Some(name)),
            });
        }
        self.decode_value(id, Some(name), raw)
    }

    /// Decode an attribute as `T`, substituting `default` when the
    /// attribute is absent or its value empty. A malformed non-empty
    /// value still fails.
    pub fn attribute_or<T: Codec>(&self, id: NodeId, name: &str, default: T) -> Result<T> {
        match self.node(id).attributes.get(name) {
            None => Ok(default),
            Some(raw) if raw.is_empty() => Ok(default),
            Some(raw) => self.decode_value(id, Some(name), raw.as_str()),
        }
    }

    fn attribute_for_read(&self, id: NodeId, name: &str) -> Result<&str> {
        self.node(id)
            .attributes
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| DomError::AttributeNotFound {
                file: self.file_path.clone(),
                element: self.node(id).name.clone(),
                attribute: name.to_string(),
            })
    }

    // Children

    pub fn has_children(&self, id: NodeId) -> bool {
        !self.node(id).children.is_empty()
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.node(id).children.len()
    }

    /// The ordered child list.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Walk parent links up to the ultimate root of the subtree `id`
    /// belongs to. For attached elements this is [`DomTree::root`]; for
    /// elements of a detached subtree it is that subtree's top element.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            current = parent;
        }
        current
    }

    /// Whether this element is reachable from the tree's root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.root_of(id) == self.root
    }

    /// Append a detached element to the end of this element's child list.
    /// Ownership transfers permanently; the child can only be detached
    /// again through [`DomTree::remove_child`].
    ///
    /// # Panics
    ///
    /// Panics if `parent` carries text, if `child` already has a parent,
    /// is the root, or is an ancestor of `parent`. All of these are bugs
    /// in the calling code.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        assert!(
            self.node(child).parent.is_none(),
            "element \"{}\" is already owned by another element",
            self.node(child).name
        );
        assert!(
            child != self.root,
            "the root element cannot become a child"
        );
        assert!(
            self.root_of(parent) != child,
            "appending an ancestor would create a cycle"
        );
        let parent_data = self.node(parent);
        assert!(
            parent_data.text.is_none(),
            "element \"{}\" carries text and cannot have child elements",
            parent_data.name
        );
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// Create a new element and append it in one step.
    pub fn append_new_child(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        let child = self.create_element(name)?;
        self.append_child(parent, child);
        Ok(child)
    }

    /// Create a new text element and append it in one step.
    pub fn append_text_child<T: Codec>(
        &mut self,
        parent: NodeId,
        name: &str,
        value: T,
    ) -> Result<NodeId> {
        let child = self.create_text_element(name, value)?;
        self.append_child(parent, child);
        Ok(child)
    }

    /// Detach `child` from `parent`. With `destroy`, the child and all
    /// its descendants are destroyed as well; otherwise the child stays
    /// alive as a detached subtree and can be appended elsewhere.
    ///
    /// # Panics
    ///
    /// Panics if `child` is not currently a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId, destroy: bool) {
        let position = self
            .node(parent)
            .children
            .iter()
            .position(|c| *c == child)
            .unwrap_or_else(|| {
                panic!(
                    "element \"{}\" is not a child of \"{}\"",
                    self.node(child).name,
                    self.node(parent).name
                )
            });
        self.node_mut(parent).children.remove(position);
        if destroy {
            self.destroy_subtree(child);
        } else {
            self.node_mut(child).parent = None;
        }
    }

    /// Destroy an element, all its descendants, and its link from the
    /// parent (if any). The ids become permanently invalid.
    ///
    /// # Panics
    ///
    /// Panics if `id` is the root; the root lives as long as the tree.
    pub fn destroy(&mut self, id: NodeId) {
        assert!(id != self.root, "the root element cannot be destroyed");
        if let Some(parent) = self.node(id).parent {
            self.remove_child(parent, id, true);
        } else {
            self.destroy_subtree(id);
        }
    }

    fn destroy_subtree(&mut self, id: NodeId) {
        let data = self.nodes[id.as_index()]
            .take()
            .expect("use of a destroyed or foreign node id");
        for child in data.children {
            self.destroy_subtree(child);
        }
    }

    // Lookup

    /// The first child, in document order.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).children.first().copied()
    }

    /// The first child with the given tag name (linear scan).
    pub fn first_child_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.node(id)
            .children
            .iter()
            .copied()
            .find(|child| self.node(*child).name == name)
    }

    /// Resolve a slash-separated path of child names, e.g. `"meta/uuid"`.
    /// A `"*"` segment matches the first child regardless of name.
    ///
    /// Fails with [`DomError::PathNotFound`] when an intermediate segment
    /// is missing and [`DomError::ChildNotFound`] when only the final one
    /// is; both name the exact failing segment.
    pub fn child_by_path(&self, id: NodeId, path: &str) -> Result<NodeId> {
        let mut current = id;
        let mut segments = path.split('/').peekable();
        while let Some(segment) = segments.next() {
            let is_last = segments.peek().is_none();
            let next = if segment == "*" {
                self.first_child(current)
            } else {
                self.first_child_named(current, segment)
            };
            match next {
                Some(next) => current = next,
                None if is_last => {
                    return Err(DomError::ChildNotFound {
                        file: self.file_path.clone(),
                        element: self.node(current).name.clone(),
                        child: segment.to_string(),
                    });
                }
                None => {
                    return Err(DomError::PathNotFound {
                        file: self.file_path.clone(),
                        element: self.node(current).name.clone(),
                        segment: segment.to_string(),
                    });
                }
            }
        }
        Ok(current)
    }

    /// Like [`DomTree::child_by_path`], but `None` on any missing segment.
    pub fn find_child_by_path(&self, id: NodeId, path: &str) -> Option<NodeId> {
        let mut current = id;
        for segment in path.split('/') {
            current = if segment == "*" {
                self.first_child(current)?
            } else {
                self.first_child_named(current, segment)?
            };
        }
        Some(current)
    }

    // Siblings. All of these go through the parent's ordered child list
    // and return `None` for detached elements or past either end.

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.next_sibling_impl(id, None)
    }

    pub fn next_sibling_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.next_sibling_impl(id, Some(name))
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.previous_sibling_impl(id, None)
    }

    pub fn previous_sibling_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.previous_sibling_impl(id, Some(name))
    }

    fn next_sibling_impl(&self, id: NodeId, name: Option<&str>) -> Option<NodeId> {
        let (siblings, position) = self.siblings_of(id)?;
        siblings[position + 1..]
            .iter()
            .copied()
            .find(|sibling| name.is_none_or(|name| self.node(*sibling).name == name))
    }

    fn previous_sibling_impl(&self, id: NodeId, name: Option<&str>) -> Option<NodeId> {
        let (siblings, position) = self.siblings_of(id)?;
        siblings[..position]
            .iter()
            .rev()
            .copied()
            .find(|sibling| name.is_none_or(|name| self.node(*sibling).name == name))
    }

    fn siblings_of(&self, id: NodeId) -> Option<(&[NodeId], usize)> {
        let parent = self.node(id).parent?;
        let siblings = self.node(parent).children.as_slice();
        let position = siblings
            .iter()
            .position(|sibling| *sibling == id)
            .expect("child list out of sync with parent link");
        Some((siblings, position))
    }
}
