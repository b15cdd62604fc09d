//! Top-level node kinds and the structures they carry.
//!
//! Every construct an introspected library exports is one [`Node`] variant.
//! The payload structs are plain data: public fields, cheap to build by
//! hand or from a scanner front-end, and immutable as far as the writer is
//! concerned.

use serde::{Deserialize, Serialize};

use crate::types::{Deprecation, Direction, GTypeInfo, Transfer, TypeRef};

/// A top-level entry of a [`Namespace`](crate::Namespace).
///
/// The set of kinds is closed today but marked non-exhaustive so consumers
/// keep a forward-compatibility arm for kinds added later; a writer treats
/// anything it does not recognize as a non-fatal skip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Node {
    Function(Function),
    Enum(Enum),
    Class(Class),
    Interface(Interface),
    Record(Record),
    Union(Union),
    Boxed(Boxed),
    Callback(Callback),
    Alias(Alias),
    Member(Member),
    Constant(Constant),
}

impl Node {
    /// The name the construct was declared under.
    pub fn name(&self) -> &str {
        match self {
            Node::Function(n) => &n.name,
            Node::Enum(n) => &n.name,
            Node::Class(n) => &n.name,
            Node::Interface(n) => &n.name,
            Node::Record(n) => &n.name,
            Node::Union(n) => &n.name,
            Node::Boxed(n) => &n.name,
            Node::Callback(n) => &n.name,
            Node::Alias(n) => &n.name,
            Node::Member(n) => &n.name,
            Node::Constant(n) => &n.name,
        }
    }
}

/// A callable: free function, method or constructor.
///
/// One shape serves all three; the enclosing scope decides which tag the
/// callable is rendered under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    /// C symbol the callable is exported as.
    pub symbol: String,
    pub deprecation: Option<Deprecation>,
    /// Absent for procedures that return nothing.
    pub ret: Option<ReturnValue>,
    pub parameters: Vec<Parameter>,
}

impl Function {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            deprecation: None,
            ret: None,
            parameters: Vec::new(),
        }
    }
}

/// Value returned by a callable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnValue {
    pub transfer: Transfer,
    pub ty: TypeRef,
}

impl ReturnValue {
    pub fn new(ty: TypeRef) -> Self {
        Self {
            transfer: Transfer::None,
            ty,
        }
    }
}

/// Formal parameter of a callable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name; instance parameters and varargs may not have one.
    pub name: Option<String>,
    pub direction: Direction,
    pub transfer: Transfer,
    /// Whether the argument may be NULL.
    pub allow_none: bool,
    pub ty: TypeRef,
}

impl Parameter {
    pub fn new(ty: TypeRef) -> Self {
        Self {
            name: None,
            direction: Direction::In,
            transfer: Transfer::None,
            allow_none: false,
            ty,
        }
    }
}

/// A function-pointer type with its own name and C spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callback {
    pub name: String,
    pub ctype: String,
    pub deprecation: Option<Deprecation>,
    pub ret: Option<ReturnValue>,
    pub parameters: Vec<Parameter>,
}

impl Callback {
    pub fn new(name: impl Into<String>, ctype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ctype: ctype.into(),
            deprecation: None,
            ret: None,
            parameters: Vec::new(),
        }
    }
}

/// An enumeration, plain C or registered with the GLib type system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    pub ctype: String,
    pub deprecation: Option<Deprecation>,
    pub members: Vec<Member>,
    /// Present on GLib-backed enumerations.
    pub gtype: Option<GTypeInfo>,
    /// Whether the members are combinable bit flags. Only GLib-backed
    /// enumerations render differently for this.
    pub flags: bool,
}

impl Enum {
    pub fn new(name: impl Into<String>, ctype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ctype: ctype.into(),
            deprecation: None,
            members: Vec::new(),
            gtype: None,
            flags: false,
        }
    }
}

/// A single enumeration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub value: i64,
    /// C identifier of the value.
    pub symbol: String,
    /// GLib value nickname, present on members of registered enumerations.
    pub nick: Option<String>,
}

impl Member {
    pub fn new(name: impl Into<String>, value: i64, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            symbol: symbol.into(),
            nick: None,
        }
    }
}

/// An instantiable class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub name: String,
    pub ctype: String,
    pub deprecation: Option<Deprecation>,
    /// Parent class, referenced by name only; the parent's definition is
    /// never inlined.
    pub parent: Option<String>,
    pub gtype: Option<GTypeInfo>,
    /// Names of implemented interfaces; rendered only for GLib-backed
    /// classes.
    pub implements: Vec<String>,
    pub constructors: Vec<Function>,
    pub methods: Vec<Function>,
    pub properties: Vec<Property>,
    pub fields: Vec<Field>,
    pub signals: Vec<Signal>,
}

impl Class {
    pub fn new(name: impl Into<String>, ctype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ctype: ctype.into(),
            deprecation: None,
            parent: None,
            gtype: None,
            implements: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            fields: Vec::new(),
            signals: Vec::new(),
        }
    }
}

/// An interface type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    pub ctype: String,
    pub deprecation: Option<Deprecation>,
    pub gtype: Option<GTypeInfo>,
    pub methods: Vec<Function>,
    pub properties: Vec<Property>,
    pub fields: Vec<Field>,
    pub signals: Vec<Signal>,
}

impl Interface {
    pub fn new(name: impl Into<String>, ctype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ctype: ctype.into(),
            deprecation: None,
            gtype: None,
            methods: Vec::new(),
            properties: Vec::new(),
            fields: Vec::new(),
            signals: Vec::new(),
        }
    }
}

/// An object property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    /// Properties are assumed readable; set to false only for write-only
    /// properties.
    pub readable: bool,
    pub writable: bool,
    pub construct_only: bool,
    pub ty: TypeRef,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            readable: true,
            writable: false,
            construct_only: false,
            ty,
        }
    }
}

/// A structure or union member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Field {
    /// A plain data member.
    Typed { name: String, ty: TypeRef },
    /// A function-pointer member; rendered as a callback in its own right.
    Callback(Callback),
}

impl Field {
    pub fn typed(name: impl Into<String>, ty: TypeRef) -> Self {
        Field::Typed {
            name: name.into(),
            ty,
        }
    }
}

/// A GLib signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub name: String,
    pub ret: Option<ReturnValue>,
    pub parameters: Vec<Parameter>,
}

impl Signal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ret: None,
            parameters: Vec::new(),
        }
    }
}

/// Registration and members a record or union gains when it is also a
/// GLib boxed type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxedInfo {
    pub gtype: GTypeInfo,
    pub constructors: Vec<Function>,
    pub methods: Vec<Function>,
}

impl BoxedInfo {
    pub fn new(gtype: GTypeInfo) -> Self {
        Self {
            gtype,
            constructors: Vec::new(),
            methods: Vec::new(),
        }
    }
}

/// A C struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub ctype: String,
    pub deprecation: Option<Deprecation>,
    pub fields: Vec<Field>,
    /// Present when the record is also registered as a boxed type.
    pub boxed: Option<BoxedInfo>,
}

impl Record {
    pub fn new(name: impl Into<String>, ctype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ctype: ctype.into(),
            deprecation: None,
            fields: Vec::new(),
            boxed: None,
        }
    }
}

/// A C union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Union {
    pub name: String,
    pub ctype: String,
    pub deprecation: Option<Deprecation>,
    pub fields: Vec<Field>,
    /// Present when the union is also registered as a boxed type.
    pub boxed: Option<BoxedInfo>,
}

impl Union {
    pub fn new(name: impl Into<String>, ctype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ctype: ctype.into(),
            deprecation: None,
            fields: Vec::new(),
            boxed: None,
        }
    }
}

/// A boxed value type with copy/free semantics and no wider structure of
/// its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boxed {
    pub name: String,
    pub ctype: String,
    pub gtype: GTypeInfo,
    pub constructors: Vec<Function>,
    pub methods: Vec<Function>,
}

impl Boxed {
    pub fn new(name: impl Into<String>, ctype: impl Into<String>, gtype: GTypeInfo) -> Self {
        Self {
            name: name.into(),
            ctype: ctype.into(),
            gtype,
            constructors: Vec::new(),
            methods: Vec::new(),
        }
    }
}

/// A name standing in for another type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alias {
    pub name: String,
    pub target: String,
    pub ctype: Option<String>,
}

impl Alias {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            ctype: None,
        }
    }
}

/// A compile-time constant.
///
/// Constants have no document representation yet; writers report them
/// through their unhandled-node path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
    /// Literal value in string form.
    pub value: String,
    pub ctype: String,
}

impl Constant {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        ctype: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ctype: ctype.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_name_covers_all_kinds() {
        let nodes = [
            Node::Function(Function::new("f", "f_sym")),
            Node::Enum(Enum::new("E", "E")),
            Node::Class(Class::new("C", "C")),
            Node::Interface(Interface::new("I", "I")),
            Node::Record(Record::new("R", "R")),
            Node::Union(Union::new("U", "U")),
            Node::Boxed(Boxed::new("B", "B", GTypeInfo::new("B"))),
            Node::Callback(Callback::new("Cb", "Cb")),
            Node::Alias(Alias::new("A", "int")),
            Node::Member(Member::new("M", 0, "M_SYM")),
            Node::Constant(Constant::new("K", "1", "int")),
        ];
        let names: Vec<&str> = nodes.iter().map(Node::name).collect();
        assert_eq!(
            names,
            ["f", "E", "C", "I", "R", "U", "B", "Cb", "A", "M", "K"]
        );
    }

    #[test]
    fn test_property_defaults() {
        let prop = Property::new("label", TypeRef::named("utf8"));
        assert!(prop.readable);
        assert!(!prop.writable);
        assert!(!prop.construct_only);
    }
}
