//! # Girkit GIR writer
//!
//! This crate renders a `girkit-ast` model into a canonical GIR XML
//! document: one `repository` root carrying the include list and exactly
//! one `namespace` element, whose children are the model's top-level nodes
//! in declaration order.
//!
//! The writer's contract is exactness: each node kind maps to a fixed tag
//! with a fixed attribute order, optional attributes appear if and only if
//! their value differs from its documented default, and container type
//! references nest recursively without a depth limit. Two renderings of
//! the same model are byte-identical.
//!
//! ## Examples
//!
//! ```
//! use girkit_ast::{Function, Namespace, Node, Parameter, TypeRef};
//! use girkit_writer::to_gir_string;
//!
//! let mut func = Function::new("init", "foo_init");
//! func.parameters.push(Parameter {
//!     name: Some("flags".to_string()),
//!     ..Parameter::new(TypeRef::named("int"))
//! });
//!
//! let mut namespace = Namespace::new("Foo");
//! namespace.nodes.push(Node::Function(func));
//!
//! let xml = to_gir_string(&namespace, "/usr/lib/libfoo.so", &["GLib".to_string()])?;
//! assert!(xml.contains(r#"<function name="init" c:identifier="foo_init">"#));
//! # Ok::<(), girkit_writer::WriteError>(())
//! ```
//!
//! Nodes the dispatcher does not recognize are reported to an injected
//! [`DiagnosticSink`] and skipped; the rest of the document is unaffected.
//! Everything else that goes wrong (a missing mandatory name, an emission
//! failure) aborts the write with a [`WriteError`].

pub mod diag;
pub mod error;
pub mod writer;
pub mod xml;

pub use diag::{CollectingSink, DiagnosticSink, TracingSink};
pub use error::{Result, WriteError};
pub use writer::{GirWriter, to_gir_string, to_gir_vec, to_gir_writer};
