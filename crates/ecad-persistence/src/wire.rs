//! XML wire format: deterministic writer, strict reader.
//!
//! The on-disk format is a constrained subset of XML 1.0: UTF-8, exactly
//! one root element, data only in attributes and leaf-element text, no
//! mixed content, no CDATA. Comments, processing instructions and
//! doctypes are accepted on input but never round-tripped.
//!
//! Serialization is deterministic so files diff cleanly: a UTF-8
//! declaration, 1-space indentation, children in document order, and
//! attributes in sorted order. A childless element without text writes
//! self-closing (`<a/>`), one with empty text writes `<a></a>`; both
//! shapes parse back to exactly the state they came from.

use std::path::Path;

use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{DomError, Result};
use crate::node::{DomTree, NodeId, is_valid_name};

pub(crate) fn write_tree(tree: &DomTree) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 1);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| write_error(tree, e))?;
    write_element(tree, tree.root(), &mut writer)?;
    Ok(writer.into_inner())
}

fn write_error(tree: &DomTree, source: impl std::fmt::Display) -> DomError {
    DomError::Io {
        operation: "serialize",
        path: tree.file_path().to_path_buf(),
        source: std::io::Error::other(source.to_string()),
    }
}

fn write_element(tree: &DomTree, id: NodeId, writer: &mut Writer<Vec<u8>>) -> Result<()> {
    let name = tree.name(id);
    let mut start = BytesStart::new(name);
    for (key, value) in tree.attributes(id) {
        start.push_attribute((key, value));
    }
    let children = tree.children(id);
    if !children.is_empty() {
        writer
            .write_event(Event::Start(start))
            .map_err(|e| write_error(tree, e))?;
        for child in children {
            write_element(tree, *child, writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(|e| write_error(tree, e))?;
    } else if let Some(text) = tree.raw_text(id) {
        writer
            .write_event(Event::Start(start))
            .map_err(|e| write_error(tree, e))?;
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|e| write_error(tree, e))?;
        writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(|e| write_error(tree, e))?;
    } else {
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| write_error(tree, e))?;
    }
    Ok(())
}

pub(crate) fn parse_tree(bytes: &[u8], path: &Path) -> Result<DomTree> {
    let mut parser = TreeParser {
        reader: Reader::from_reader(bytes),
        tree: None,
        stack: Vec::new(),
        pending_text: String::new(),
        path,
    };
    parser.run()
}

struct TreeParser<'a> {
    reader: Reader<&'a [u8]>,
    tree: Option<DomTree>,
    /// Currently open elements, root first.
    stack: Vec<NodeId>,
    /// Text accumulated for the innermost open element. Entity references
    /// arrive as separate events, so text is collected across events and
    /// consumed when the element closes.
    pending_text: String,
    path: &'a Path,
}

impl TreeParser<'_> {
    fn run(&mut self) -> Result<DomTree> {
        let mut buf = Vec::new();
        loop {
            let event = self
                .reader
                .read_event_into(&mut buf)
                .map_err(|e| DomError::malformed(self.path, e))?;
            match event {
                Event::Start(start) => {
                    let id = self.open_element(&start)?;
                    self.stack.push(id);
                }
                Event::Empty(start) => {
                    self.open_element(&start)?;
                }
                Event::End(_) => self.close_element()?,
                Event::Text(text) => {
                    let chunk = self
                        .reader
                        .decoder()
                        .decode(text.as_ref())
                        .map_err(|e| DomError::malformed(self.path, e))?;
                    self.pending_text.push_str(&chunk);
                }
                Event::GeneralRef(reference) => {
                    let raw = self
                        .reader
                        .decoder()
                        .decode(reference.as_ref())
                        .map_err(|e| DomError::malformed(self.path, e))?;
                    let resolved = self.resolve_entity(&raw)?;
                    self.pending_text.push_str(&resolved);
                }
                Event::CData(_) => {
                    return Err(DomError::malformed(
                        self.path,
                        "CDATA sections are not supported",
                    ));
                }
                // Comments are intentionally not preserved.
                Event::Comment(_) | Event::PI(_) | Event::DocType(_) | Event::Decl(_) => {}
                Event::Eof => break,
            }
            buf.clear();
        }
        if !self.stack.is_empty() {
            return Err(DomError::malformed(self.path, "unexpected end of file"));
        }
        self.flush_pending_whitespace("after the root element")?;
        let mut tree = self.tree.take().ok_or_else(|| DomError::NoRootElement {
            file: self.path.to_path_buf(),
        })?;
        tree.set_file_path(self.path);
        Ok(tree)
    }

    fn open_element(&mut self, start: &BytesStart<'_>) -> Result<NodeId> {
        let context = match self.stack.last() {
            Some(_) => "next to child elements",
            None => "outside the root element",
        };
        self.flush_pending_whitespace(context)?;

        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| DomError::malformed(self.path, e))?
            .to_string();
        if !is_valid_name(&name) {
            return Err(DomError::InvalidName {
                file: self.path.to_path_buf(),
                name,
            });
        }

        let id = if let Some(tree) = self.tree.as_mut() {
            match self.stack.last() {
                Some(parent) => {
                    let id = tree.create_element(&name)?;
                    tree.append_child(*parent, id);
                    id
                }
                // A second top-level element.
                None => {
                    return Err(DomError::NoRootElement {
                        file: self.path.to_path_buf(),
                    });
                }
            }
        } else {
            let tree = DomTree::new(&name)?;
            let root = tree.root();
            self.tree = Some(tree);
            root
        };

        let tree = self.tree.as_mut().expect("tree exists after open");
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| DomError::malformed(self.path, e))?;
            let key = std::str::from_utf8(attribute.key.as_ref())
                .map_err(|e| DomError::malformed(self.path, e))?
                .to_string();
            if !is_valid_name(&key) {
                return Err(DomError::InvalidName {
                    file: self.path.to_path_buf(),
                    name: key,
                });
            }
            let value = attribute
                .unescape_value()
                .map_err(|e| DomError::malformed(self.path, e))?;
            tree.set_attribute(id, &key, value.into_owned())?;
        }
        Ok(id)
    }

    fn close_element(&mut self) -> Result<()> {
        let id = self.stack.pop().ok_or_else(|| {
            DomError::malformed(self.path, "closing tag without matching opening tag")
        })?;
        let tree = self.tree.as_mut().expect("tree exists while stack is open");
        if tree.has_children(id) {
            // Only insignificant whitespace may sit between child elements.
            if !self.pending_text.trim().is_empty() {
                return Err(DomError::malformed(
                    self.path,
                    format!("element \"{}\" mixes text and child elements", tree.name(id)),
                ));
            }
            self.pending_text.clear();
        } else {
            tree.set_text(id, std::mem::take(&mut self.pending_text));
        }
        Ok(())
    }

    /// Discard accumulated whitespace; anything else is mixed or stray
    /// text and therefore malformed.
    fn flush_pending_whitespace(&mut self, context: &str) -> Result<()> {
        if !self.pending_text.trim().is_empty() {
            return Err(DomError::malformed(
                self.path,
                format!("stray text {context}"),
            ));
        }
        self.pending_text.clear();
        Ok(())
    }

    /// Resolve an entity reference event: the five XML predefined
    /// entities plus decimal/hex character references. Anything else is
    /// outside the supported subset.
    fn resolve_entity(&self, raw: &str) -> Result<String> {
        if let Some(resolved) = resolve_xml_entity(raw) {
            return Ok(resolved.to_string());
        }
        if let Some(rest) = raw.strip_prefix('#') {
            let code = if let Some(hex) = rest.strip_prefix('x').or_else(|| rest.strip_prefix('X'))
            {
                u32::from_str_radix(hex, 16).ok()
            } else {
                rest.parse::<u32>().ok()
            };
            if let Some(character) = code.and_then(char::from_u32) {
                return Ok(character.to_string());
            }
        }
        Err(DomError::malformed(
            self.path,
            format!("unknown entity reference \"&{raw};\""),
        ))
    }
}
