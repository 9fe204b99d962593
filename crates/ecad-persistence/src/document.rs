//! Document wrapper: one root element plus file identity and the file
//! format version attribute.

use std::path::Path;

use crate::error::{DomError, Result};
use crate::node::{DomTree, NodeId};
use crate::wire;

/// Root attribute carrying the file format version.
pub const VERSION_ATTRIBUTE: &str = "version";

/// A design file in memory: a [`DomTree`] whose root element is the file's
/// single top-level element.
///
/// The document neither reads nor writes files itself; byte buffers are
/// handed in and out, and the file-level helpers deal with the
/// filesystem.
#[derive(Debug, Clone)]
pub struct Document {
    tree: DomTree,
}

impl Document {
    /// Wrap a finished tree without touching its version attribute.
    pub fn new(tree: DomTree) -> Self {
        Self { tree }
    }

    /// Wrap a finished tree and stamp the root's version attribute with
    /// the writing application's file format version.
    pub fn with_version(mut tree: DomTree, version: u32) -> Self {
        let root = tree.root();
        tree.set_attribute(root, VERSION_ATTRIBUTE, version)
            .expect("the version attribute name is valid");
        Self { tree }
    }

    /// Parse a raw byte buffer. `path` is recorded for diagnostics only.
    ///
    /// Fails with [`DomError::NoRootElement`] unless the buffer holds
    /// exactly one top-level element; nothing of a failed parse survives.
    pub fn from_bytes(bytes: &[u8], path: &Path) -> Result<Self> {
        let tree = wire::parse_tree(bytes, path)?;
        Ok(Self { tree })
    }

    /// Serialize to the canonical byte representation: UTF-8 declaration,
    /// 1-space indentation, stable element order and text.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        wire::write_tree(&self.tree)
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// The file this document was parsed from, or an empty path.
    pub fn file_path(&self) -> &Path {
        self.tree.file_path()
    }

    /// The root element.
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// The root element, checked against the name the caller expects.
    pub fn root_named(&self, expected: &str) -> Result<NodeId> {
        let root = self.tree.root();
        let found = self.tree.name(root);
        if found == expected {
            Ok(root)
        } else {
            Err(DomError::RootNameMismatch {
                file: self.file_path().to_path_buf(),
                found: found.to_string(),
                expected: expected.to_string(),
            })
        }
    }

    pub fn has_file_version(&self) -> bool {
        self.tree.has_attribute(self.tree.root(), VERSION_ATTRIBUTE)
    }

    /// The file format version from the root's version attribute.
    ///
    /// Fails when the attribute is absent, empty, negative or not a plain
    /// base-10 integer.
    pub fn file_version(&self) -> Result<u32> {
        self.tree.attribute(self.tree.root(), VERSION_ATTRIBUTE)
    }

    pub fn set_file_version(&mut self, version: u32) {
        let root = self.tree.root();
        self.tree
            .set_attribute(root, VERSION_ATTRIBUTE, version)
            .expect("the version attribute name is valid");
    }
}
