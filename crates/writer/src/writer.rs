//! The GIR document writer: repository orchestration, node dispatch,
//! per-kind element builders and the recursive type encoder.
//!
//! Rendering is one synchronous depth-first traversal of the namespace's
//! node sequence. Recursion only follows container type nesting; class
//! parents stay name references and are never descended into.

use std::io::Write;
use std::path::Path;

use girkit_ast::{
    Alias, Boxed, Callback, Class, Deprecation, Direction, Enum, Field, Function, GTypeInfo,
    Interface, Member, Namespace, Node, Parameter, Property, Record, ReturnValue, Signal, Transfer,
    TypeRef, Union,
};

use crate::diag::{DiagnosticSink, TracingSink};
use crate::error::{Result, WriteError};
use crate::xml::{AttrList, XmlEmitter};

/// XML namespace of the core GIR vocabulary.
const CORE_NS: &str = "http://www.gtk.org/introspection/core/1.0";
/// XML namespace of C-level attributes.
const C_NS: &str = "http://www.gtk.org/introspection/c/1.0";
/// XML namespace of GLib runtime type attributes.
const GLIB_NS: &str = "http://www.gtk.org/introspection/glib/1.0";
/// Format version stamped on the repository root element.
const FORMAT_VERSION: &str = "1.0";

/// Serialize a namespace to a GIR document string.
///
/// # Examples
///
/// ```
/// use girkit_ast::{Function, Namespace, Node};
/// use girkit_writer::to_gir_string;
///
/// let mut namespace = Namespace::new("Foo");
/// namespace.nodes.push(Node::Function(Function::new("init", "foo_init")));
/// let xml = to_gir_string(&namespace, "/usr/lib/libfoo.so", &["GLib".to_string()])?;
/// assert!(xml.contains(r#"shared-library="libfoo.so""#));
/// # Ok::<(), girkit_writer::WriteError>(())
/// ```
pub fn to_gir_string(namespace: &Namespace, shlib: &str, includes: &[String]) -> Result<String> {
    let mut buffer = Vec::new();
    to_gir_writer(namespace, shlib, includes, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| WriteError::Custom(e.to_string()))
}

/// Serialize a namespace to a GIR document byte vector.
pub fn to_gir_vec(namespace: &Namespace, shlib: &str, includes: &[String]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    to_gir_writer(namespace, shlib, includes, &mut buffer)?;
    Ok(buffer)
}

/// Serialize a namespace to a GIR document on an arbitrary writer.
///
/// Unrecognized nodes are reported through the default [`TracingSink`];
/// use [`GirWriter`] directly to supply another sink.
pub fn to_gir_writer<W>(
    namespace: &Namespace,
    shlib: &str,
    includes: &[String],
    writer: W,
) -> Result<()>
where
    W: Write,
{
    let diag = TracingSink;
    GirWriter::new(writer, &diag).write_repository(namespace, shlib, includes)
}

/// Element tag a callable is rendered under, selected by the enclosing
/// scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionTag {
    Function,
    Method,
    Constructor,
}

impl FunctionTag {
    fn as_str(self) -> &'static str {
        match self {
            FunctionTag::Function => "function",
            FunctionTag::Method => "method",
            FunctionTag::Constructor => "constructor",
        }
    }
}

/// Writes one GIR document.
///
/// A writer owns its output stream for the duration of a single
/// [`write_repository`](Self::write_repository) call, which consumes it;
/// a second document needs a second writer. The writer never mutates the
/// model and keeps no state across writes.
pub struct GirWriter<'d, W: Write> {
    xml: XmlEmitter<W>,
    diag: &'d dyn DiagnosticSink,
}

impl<'d, W: Write> GirWriter<'d, W> {
    pub fn new(writer: W, diag: &'d dyn DiagnosticSink) -> Self {
        Self {
            xml: XmlEmitter::new(writer),
            diag,
        }
    }

    /// Writes the complete document: XML declaration, the repository root
    /// with its include list, and the single namespace element holding
    /// every top-level node in declaration order.
    pub fn write_repository(
        mut self,
        namespace: &Namespace,
        shlib: &str,
        includes: &[String],
    ) -> Result<()> {
        self.xml.declaration()?;
        let mut attrs = AttrList::new();
        attrs.push("version", FORMAT_VERSION);
        attrs.push("xmlns", CORE_NS);
        attrs.push("xmlns:c", C_NS);
        attrs.push("xmlns:glib", GLIB_NS);
        self.element("repository", &attrs, |w| {
            for include in includes {
                w.write_include(include)?;
            }
            w.write_namespace(namespace, shlib)
        })
    }

    /// Scoped element emission: opens the element, runs the children
    /// closure, and closes the element on every exit path. When child
    /// emission fails the closing tag still goes out first, so the
    /// document stays balanced up to the failure point; the child error
    /// is then propagated.
    fn element<F>(&mut self, tag: &str, attrs: &AttrList, children: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.xml.start(tag, attrs)?;
        let result = children(self);
        let closed = self.xml.end(tag);
        result?;
        closed
    }

    fn write_include(&mut self, include: &str) -> Result<()> {
        let mut attrs = AttrList::new();
        attrs.push("name", include);
        self.xml.empty("include", &attrs)
    }

    fn write_namespace(&mut self, namespace: &Namespace, shlib: &str) -> Result<()> {
        let name = require_name("namespace", &namespace.name)?;
        let mut attrs = AttrList::new();
        attrs.push("name", name);
        attrs.push("shared-library", shared_library_name(shlib));
        self.element("namespace", &attrs, |w| {
            for node in &namespace.nodes {
                w.write_node(node)?;
            }
            Ok(())
        })
    }

    /// Maps a node to its builder. Unrecognized kinds are reported to the
    /// diagnostic sink and skipped without touching the output, so one
    /// stray node never costs the rest of the document.
    fn write_node(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::Function(func) => self.write_function(func, FunctionTag::Function),
            Node::Enum(enm) => self.write_enum(enm),
            Node::Class(class) => self.write_class(class),
            Node::Interface(iface) => self.write_interface(iface),
            Node::Record(record) => self.write_record(record),
            Node::Union(union) => self.write_union(union),
            Node::Boxed(boxed) => self.write_boxed(boxed),
            Node::Callback(callback) => self.write_callback(callback),
            Node::Alias(alias) => self.write_alias(alias),
            // Singleton instance members have no standalone representation.
            Node::Member(_) => Ok(()),
            other => {
                self.diag
                    .report(&format!("skipping unhandled node `{}`", other.name()));
                Ok(())
            }
        }
    }

    fn write_function(&mut self, func: &Function, tag: FunctionTag) -> Result<()> {
        let name = require_name(tag.as_str(), &func.name)?;
        let mut attrs = AttrList::new();
        attrs.push("name", name);
        attrs.push("c:identifier", &func.symbol);
        append_deprecated(&mut attrs, func.deprecation.as_ref());
        self.element(tag.as_str(), &attrs, |w| {
            w.write_return_value(func.ret.as_ref())?;
            w.write_parameters(&func.parameters)
        })
    }

    fn write_return_value(&mut self, ret: Option<&ReturnValue>) -> Result<()> {
        let Some(ret) = ret else {
            return Ok(());
        };
        let mut attrs = AttrList::new();
        append_transfer(&mut attrs, ret.transfer);
        self.element("return-value", &attrs, |w| w.write_type(&ret.ty, None))
    }

    fn write_parameters(&mut self, parameters: &[Parameter]) -> Result<()> {
        // No wrapper element at all for a parameterless callable.
        if parameters.is_empty() {
            return Ok(());
        }
        self.element("parameters", &AttrList::new(), |w| {
            for parameter in parameters {
                w.write_parameter(parameter)?;
            }
            Ok(())
        })
    }

    fn write_parameter(&mut self, parameter: &Parameter) -> Result<()> {
        let mut attrs = AttrList::new();
        if let Some(name) = &parameter.name {
            attrs.push("name", name);
        }
        if parameter.direction != Direction::In {
            attrs.push("direction", parameter.direction.as_str());
        }
        append_transfer(&mut attrs, parameter.transfer);
        if parameter.allow_none {
            attrs.push("allow-none", "1");
        }
        self.element("parameter", &attrs, |w| w.write_type(&parameter.ty, None))
    }

    /// Renders a type reference. Containers recurse into their element
    /// type with `relation="element"`; nesting depth is unbounded. The
    /// native C spelling is only emitted for non-container types, since a
    /// container's element encoding carries it instead.
    fn write_type(&mut self, ty: &TypeRef, relation: Option<&str>) -> Result<()> {
        match ty {
            TypeRef::Named { name, ctype } => {
                let mut attrs = AttrList::new();
                attrs.push("name", name);
                if let Some(relation) = relation {
                    attrs.push("relation", relation);
                }
                if let Some(ctype) = ctype {
                    attrs.push("c:type", ctype);
                }
                self.xml.empty("type", &attrs)
            }
            TypeRef::Container {
                name,
                element,
                transfer,
            } => {
                let mut attrs = AttrList::new();
                attrs.push("name", name);
                if let Some(relation) = relation {
                    attrs.push("relation", relation);
                }
                append_transfer(&mut attrs, *transfer);
                self.element("type", &attrs, |w| w.write_type(element, Some("element")))
            }
        }
    }

    fn write_enum(&mut self, enm: &Enum) -> Result<()> {
        let name = require_name("enumeration", &enm.name)?;
        let mut attrs = AttrList::new();
        attrs.push("name", name);
        attrs.push("c:type", &enm.ctype);
        append_deprecated(&mut attrs, enm.deprecation.as_ref());
        let mut tag = "enumeration";
        if let Some(gtype) = &enm.gtype {
            append_gtype(&mut attrs, gtype);
            if enm.flags {
                tag = "bitfield";
            }
        }
        self.element(tag, &attrs, |w| {
            for member in &enm.members {
                w.write_member(member)?;
            }
            Ok(())
        })
    }

    fn write_member(&mut self, member: &Member) -> Result<()> {
        let name = require_name("member", &member.name)?;
        let mut attrs = AttrList::new();
        attrs.push("name", name);
        attrs.push("value", member.value.to_string());
        attrs.push("c:identifier", &member.symbol);
        if let Some(nick) = &member.nick {
            attrs.push("glib:nick", nick);
        }
        self.xml.empty("member", &attrs)
    }

    fn write_class(&mut self, class: &Class) -> Result<()> {
        let name = require_name("class", &class.name)?;
        let mut attrs = AttrList::new();
        attrs.push("name", name);
        attrs.push("c:type", &class.ctype);
        append_deprecated(&mut attrs, class.deprecation.as_ref());
        if let Some(parent) = &class.parent {
            attrs.push("parent", parent);
        }
        if let Some(gtype) = &class.gtype {
            append_gtype(&mut attrs, gtype);
        }
        self.element("class", &attrs, |w| {
            if class.gtype.is_some() {
                for iface in &class.implements {
                    let mut attrs = AttrList::new();
                    attrs.push("name", iface);
                    w.xml.empty("implements", &attrs)?;
                }
            }
            for ctor in &class.constructors {
                w.write_function(ctor, FunctionTag::Constructor)?;
            }
            w.write_class_members(&class.methods, &class.properties, &class.fields, &class.signals)
        })
    }

    fn write_interface(&mut self, iface: &Interface) -> Result<()> {
        let name = require_name("interface", &iface.name)?;
        let mut attrs = AttrList::new();
        attrs.push("name", name);
        attrs.push("c:type", &iface.ctype);
        append_deprecated(&mut attrs, iface.deprecation.as_ref());
        if let Some(gtype) = &iface.gtype {
            append_gtype(&mut attrs, gtype);
        }
        self.element("interface", &attrs, |w| {
            w.write_class_members(&iface.methods, &iface.properties, &iface.fields, &iface.signals)
        })
    }

    /// Children shared by classes and interfaces, in the fixed order
    /// methods, properties, fields, signals.
    fn write_class_members(
        &mut self,
        methods: &[Function],
        properties: &[Property],
        fields: &[Field],
        signals: &[Signal],
    ) -> Result<()> {
        for method in methods {
            self.write_function(method, FunctionTag::Method)?;
        }
        for property in properties {
            self.write_property(property)?;
        }
        for field in fields {
            self.write_field(field)?;
        }
        for signal in signals {
            self.write_signal(signal)?;
        }
        Ok(())
    }

    fn write_property(&mut self, property: &Property) -> Result<()> {
        let name = require_name("property", &property.name)?;
        let mut attrs = AttrList::new();
        attrs.push("name", name);
        // Properties are assumed readable.
        if !property.readable {
            attrs.push("readable", "0");
        }
        if property.writable {
            attrs.push("writable", "1");
        }
        if property.construct_only {
            attrs.push("construct-only", "1");
        }
        self.element("property", &attrs, |w| w.write_type(&property.ty, None))
    }

    fn write_field(&mut self, field: &Field) -> Result<()> {
        match field {
            // Function-pointer members render as callbacks, not fields.
            Field::Callback(callback) => self.write_callback(callback),
            Field::Typed { name, ty } => {
                let name = require_name("field", name)?;
                let mut attrs = AttrList::new();
                attrs.push("name", name);
                self.element("field", &attrs, |w| w.write_type(ty, None))
            }
        }
    }

    fn write_signal(&mut self, signal: &Signal) -> Result<()> {
        let name = require_name("signal", &signal.name)?;
        let mut attrs = AttrList::new();
        attrs.push("name", name);
        self.element("glib:signal", &attrs, |w| {
            w.write_return_value(signal.ret.as_ref())?;
            w.write_parameters(&signal.parameters)
        })
    }

    fn write_callback(&mut self, callback: &Callback) -> Result<()> {
        let name = require_name("callback", &callback.name)?;
        let mut attrs = AttrList::new();
        attrs.push("name", name);
        attrs.push("c:type", &callback.ctype);
        append_deprecated(&mut attrs, callback.deprecation.as_ref());
        self.element("callback", &attrs, |w| {
            w.write_return_value(callback.ret.as_ref())?;
            w.write_parameters(&callback.parameters)
        })
    }

    fn write_record(&mut self, record: &Record) -> Result<()> {
        let name = require_name("record", &record.name)?;
        let mut attrs = AttrList::new();
        attrs.push("name", name);
        attrs.push("c:type", &record.ctype);
        append_deprecated(&mut attrs, record.deprecation.as_ref());
        if let Some(boxed) = &record.boxed {
            append_gtype(&mut attrs, &boxed.gtype);
        }
        self.element("record", &attrs, |w| {
            for field in &record.fields {
                w.write_field(field)?;
            }
            if let Some(boxed) = &record.boxed {
                w.write_boxed_ctors_methods(&boxed.constructors, &boxed.methods)?;
            }
            Ok(())
        })
    }

    fn write_union(&mut self, union: &Union) -> Result<()> {
        let name = require_name("union", &union.name)?;
        let mut attrs = AttrList::new();
        attrs.push("name", name);
        attrs.push("c:type", &union.ctype);
        append_deprecated(&mut attrs, union.deprecation.as_ref());
        if let Some(boxed) = &union.boxed {
            append_gtype(&mut attrs, &boxed.gtype);
        }
        self.element("union", &attrs, |w| {
            for field in &union.fields {
                w.write_field(field)?;
            }
            if let Some(boxed) = &union.boxed {
                w.write_boxed_ctors_methods(&boxed.constructors, &boxed.methods)?;
            }
            Ok(())
        })
    }

    fn write_boxed(&mut self, boxed: &Boxed) -> Result<()> {
        let name = require_name("boxed", &boxed.name)?;
        let mut attrs = AttrList::new();
        attrs.push("c:type", &boxed.ctype);
        attrs.push("glib:name", name);
        append_gtype(&mut attrs, &boxed.gtype);
        self.element("glib:boxed", &attrs, |w| {
            w.write_boxed_ctors_methods(&boxed.constructors, &boxed.methods)
        })
    }

    fn write_boxed_ctors_methods(
        &mut self,
        constructors: &[Function],
        methods: &[Function],
    ) -> Result<()> {
        for ctor in constructors {
            self.write_function(ctor, FunctionTag::Constructor)?;
        }
        for method in methods {
            self.write_function(method, FunctionTag::Method)?;
        }
        Ok(())
    }

    fn write_alias(&mut self, alias: &Alias) -> Result<()> {
        let name = require_name("alias", &alias.name)?;
        let mut attrs = AttrList::new();
        attrs.push("name", name);
        attrs.push("target", &alias.target);
        if let Some(ctype) = &alias.ctype {
            attrs.push("c:type", ctype);
        }
        self.xml.empty("alias", &attrs)
    }
}

/// Rejects the empty name every emitted construct is required to carry.
fn require_name<'a>(kind: &str, name: &'a str) -> Result<&'a str> {
    if name.is_empty() {
        return Err(WriteError::InvalidNode(format!(
            "{kind} node with an empty name"
        )));
    }
    Ok(name)
}

/// File name component of the shared library path, directory components
/// stripped. An empty path degrades to an empty attribute value.
fn shared_library_name(shlib: &str) -> &str {
    Path::new(shlib)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("")
}

/// Appends the deprecation message, and the version only alongside a
/// message.
fn append_deprecated(attrs: &mut AttrList, deprecation: Option<&Deprecation>) {
    if let Some(dep) = deprecation {
        attrs.push("deprecated", &dep.message);
        if let Some(version) = &dep.version {
            attrs.push("deprecated-version", version);
        }
    }
}

/// Appends the transfer ordinal unless the value is the `none` default.
fn append_transfer(attrs: &mut AttrList, transfer: Transfer) {
    if !transfer.is_none() {
        attrs.push("transfer-ownership", transfer.ordinal().to_string());
    }
}

/// Appends the runtime type name, and the registration accessor when one
/// exists.
fn append_gtype(attrs: &mut AttrList, gtype: &GTypeInfo) {
    attrs.push("glib:type-name", &gtype.type_name);
    if let Some(get_type) = &gtype.get_type {
        attrs.push("glib:get-type", get_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::CollectingSink;

    #[test]
    fn test_shared_library_name() {
        assert_eq!(shared_library_name("/usr/lib/libfoo.so.1"), "libfoo.so.1");
        assert_eq!(shared_library_name("libbar.so"), "libbar.so");
        assert_eq!(shared_library_name(""), "");
    }

    #[test]
    fn test_require_name_rejects_empty() {
        assert!(require_name("class", "Foo").is_ok());
        assert!(matches!(
            require_name("class", ""),
            Err(WriteError::InvalidNode(_))
        ));
    }

    #[test]
    fn test_deprecated_version_needs_message() {
        let mut attrs = AttrList::new();
        append_deprecated(&mut attrs, None);
        assert!(attrs.is_empty());

        let mut attrs = AttrList::new();
        let dep = Deprecation {
            message: "Use foo_new() instead".to_string(),
            version: Some("2.0".to_string()),
        };
        append_deprecated(&mut attrs, Some(&dep));
        let collected: Vec<_> = attrs.iter().collect();
        assert_eq!(
            collected,
            [
                ("deprecated", "Use foo_new() instead"),
                ("deprecated-version", "2.0"),
            ]
        );
    }

    #[test]
    fn test_transfer_none_is_omitted() {
        let mut attrs = AttrList::new();
        append_transfer(&mut attrs, Transfer::None);
        assert!(attrs.is_empty());

        append_transfer(&mut attrs, Transfer::Full);
        let collected: Vec<_> = attrs.iter().collect();
        assert_eq!(collected, [("transfer-ownership", "2")]);
    }

    #[test]
    fn test_close_tag_survives_child_failure() {
        let sink = CollectingSink::new();
        let mut buffer = Vec::new();
        let mut writer = GirWriter::new(&mut buffer, &sink);
        let result = writer.element("outer", &AttrList::new(), |_| {
            Err(WriteError::InvalidNode("boom".to_string()))
        });
        assert!(result.is_err());
        drop(writer);
        assert_eq!(String::from_utf8(buffer).unwrap(), "<outer></outer>");
    }
}
