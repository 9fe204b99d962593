//! Typed XML document tree and file persistence for ECAD Studio.
//!
//! Every design file (libraries, symbols, footprints, schematics,
//! boards, workspace settings) goes through this crate: an in-memory
//! document tree with typed accessors, a canonical XML wire format, and
//! a version gate that refuses files from newer application versions.
//!
//! # Tree model
//!
//! A [`DomTree`] owns all of its elements in one arena; elements are
//! addressed by stable [`NodeId`] handles. Each element holds a validated
//! tag name, attributes, and *either* ordered child elements *or* text,
//! never both. Typed reads and writes go through the [`Codec`] trait, so
//! a `version` attribute decodes straight to a
//! [`Version`](ecad_model::Version) and a coordinate to a nanometer-exact
//! [`Length`](ecad_model::Length).
//!
//! # File format
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <netclass version="1" uuid="ca34fe75-...">
//!  <name>Default</name>
//!  <trace_width>0.25</trace_width>
//! </netclass>
//! ```
//!
//! Exactly one root element, a `version` attribute on the root for the
//! compatibility gate, all data in attributes or leaf-element text, and
//! deterministic serialization (stable order, 1-space indent) so files
//! diff cleanly under version control.
//!
//! # Architecture
//!
//! - `node.rs` - the arena tree and all element operations
//! - `document.rs` - root wrapper with version accessors and (de)serialization
//! - `codec.rs` - value <-> token conversion (`Codec` trait)
//! - `wire.rs` - the quick-xml reader/writer pair
//! - `convert.rs` - `ToDom`/`FromDom` for domain objects
//! - `io.rs` - file load/save helpers and the version gate
//! - `error.rs` - the `DomError` taxonomy with full location context

mod codec;
mod convert;
mod document;
mod error;
mod io;
mod node;
mod wire;

// Re-export main types
pub use codec::Codec;
pub use convert::{FromDom, ToDom};
pub use document::{Document, VERSION_ATTRIBUTE};
pub use error::{DomError, Result};
pub use io::{FILE_FORMAT_VERSION, load_document, save_document, verify_file_version};
pub use node::{DomTree, NodeId, is_valid_name};
