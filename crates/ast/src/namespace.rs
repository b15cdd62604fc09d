//! The namespace owning all top-level nodes of one introspected library.

use serde::{Deserialize, Serialize};

use crate::nodes::Node;

/// All top-level constructs of one library, in declaration order.
///
/// Node order is semantically significant: it is the public API ordering
/// downstream consumers rely on, so it is preserved through every
/// rendering of the namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    pub nodes: Vec<Node>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }
}
