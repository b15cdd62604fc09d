//! Low-level tag emission over quick-xml.
//!
//! [`XmlEmitter`] writes events straight to the output with no indentation;
//! attribute and text escaping are quick-xml's responsibility, never the
//! caller's. [`AttrList`] carries an element's attributes as an explicit
//! ordered sequence, because attribute order is part of the document
//! contract.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::error::Result;

/// Ordered attribute list for one element.
///
/// Append order is emission order. Conditional attributes are expressed as
/// plain `if` guards around [`push`](Self::push) at the call site, keeping
/// each element's attribute sequence readable top to bottom.
#[derive(Debug, Default)]
pub struct AttrList {
    entries: Vec<(&'static str, String)>,
}

impl AttrList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one attribute.
    pub fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.entries.push((name, value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attributes in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
    }

    fn apply(&self, element: &mut BytesStart<'_>) {
        for (name, value) in self.iter() {
            element.push_attribute((name, value));
        }
    }
}

/// Event writer for one XML document.
pub struct XmlEmitter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Writer::new(writer),
        }
    }

    /// Emits the `<?xml version="1.0" encoding="UTF-8"?>` declaration.
    pub fn declaration(&mut self) -> Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    /// Opens an element. Every `start` must be paired with an
    /// [`end`](Self::end) for the same tag.
    pub fn start(&mut self, tag: &str, attrs: &AttrList) -> Result<()> {
        let mut element = BytesStart::new(tag);
        attrs.apply(&mut element);
        self.writer.write_event(Event::Start(element))?;
        Ok(())
    }

    /// Closes an element previously opened with [`start`](Self::start).
    pub fn end(&mut self, tag: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }

    /// Writes a self-closing element.
    pub fn empty(&mut self, tag: &str, attrs: &AttrList) -> Result<()> {
        let mut element = BytesStart::new(tag);
        attrs.apply(&mut element);
        self.writer.write_event(Event::Empty(element))?;
        Ok(())
    }
}
