//! Type references and the small shared value types threaded through the
//! rest of the model: ownership transfer, parameter direction, deprecation
//! info and GLib runtime type registration.

use serde::{Deserialize, Serialize};

/// Who owns a value after it crosses a call boundary.
///
/// The document encoding uses the ordinal (0/1/2); `None` is the default
/// and is never written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transfer {
    /// The caller keeps ownership.
    #[default]
    None,
    /// The container is transferred but its elements are not.
    Container,
    /// The value and everything it references are transferred.
    Full,
}

impl Transfer {
    /// Ordinal used in the document encoding.
    pub fn ordinal(self) -> u8 {
        match self {
            Transfer::None => 0,
            Transfer::Container => 1,
            Transfer::Full => 2,
        }
    }

    pub fn is_none(self) -> bool {
        matches!(self, Transfer::None)
    }
}

/// Direction a parameter flows through a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Passed into the callee. The default, never written out.
    #[default]
    In,
    /// Returned through the parameter.
    Out,
    /// Passed in and updated in place.
    InOut,
}

impl Direction {
    /// Literal form used in the document encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::InOut => "inout",
        }
    }
}

/// Deprecation notice attached to a node.
///
/// The version is only meaningful alongside the message and is dropped from
/// the output when the message is absent (which here means the whole notice
/// is absent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deprecation {
    pub message: String,
    pub version: Option<String>,
}

impl Deprecation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            version: None,
        }
    }
}

/// GLib runtime type registration carried by GLib-backed nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GTypeInfo {
    /// Name the type is registered under at runtime.
    pub type_name: String,
    /// C function returning the registered `GType`, when one exists.
    pub get_type: Option<String>,
}

impl GTypeInfo {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            get_type: None,
        }
    }
}

/// Reference to a type, either by plain name or as a container
/// parameterized by an element type.
///
/// Containers nest without limit; a list of lists of ints is a `Container`
/// whose element is another `Container` whose element is `Named`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeRef {
    Named {
        /// Display name of the type.
        name: String,
        /// Native C spelling, when known.
        ctype: Option<String>,
    },
    Container {
        /// Display name of the container type.
        name: String,
        element: Box<TypeRef>,
        transfer: Transfer,
    },
}

impl TypeRef {
    /// Plain named type without a native C spelling.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            ctype: None,
        }
    }

    /// Plain named type with its native C spelling.
    pub fn with_ctype(name: impl Into<String>, ctype: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            ctype: Some(ctype.into()),
        }
    }

    /// Container type over an element type.
    pub fn container(name: impl Into<String>, element: TypeRef, transfer: Transfer) -> Self {
        TypeRef::Container {
            name: name.into(),
            element: Box::new(element),
            transfer,
        }
    }

    /// Display name, for either shape.
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Named { name, .. } | TypeRef::Container { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_ordinals() {
        assert_eq!(Transfer::None.ordinal(), 0);
        assert_eq!(Transfer::Container.ordinal(), 1);
        assert_eq!(Transfer::Full.ordinal(), 2);
        assert!(Transfer::None.is_none());
        assert!(!Transfer::Container.is_none());
    }

    #[test]
    fn test_direction_literals() {
        assert_eq!(Direction::In.as_str(), "in");
        assert_eq!(Direction::Out.as_str(), "out");
        assert_eq!(Direction::InOut.as_str(), "inout");
        assert_eq!(Direction::default(), Direction::In);
    }

    #[test]
    fn test_nested_container_names() {
        let ty = TypeRef::container(
            "GList",
            TypeRef::container("GList", TypeRef::named("gint"), Transfer::None),
            Transfer::Container,
        );
        assert_eq!(ty.name(), "GList");
        match ty {
            TypeRef::Container { element, .. } => assert_eq!(element.name(), "GList"),
            TypeRef::Named { .. } => panic!("expected a container"),
        }
    }
}
