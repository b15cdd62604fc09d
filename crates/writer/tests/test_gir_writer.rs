use girkit_ast::{
    Alias, Constant, Enum, Function, GTypeInfo, Member, Namespace, Node, Parameter, TypeRef,
};
use girkit_writer::{CollectingSink, GirWriter, Result, WriteError, to_gir_string};

fn gir_for(node: Node) -> Result<String> {
    let mut namespace = Namespace::new("Test");
    namespace.nodes.push(node);
    to_gir_string(&namespace, "libtest.so", &[])
}

#[test]
fn test_document_prolog_and_root_attributes() -> Result<()> {
    let namespace = Namespace::new("Test");
    let xml = to_gir_string(&namespace, "libtest.so", &[])?;
    assert!(xml.starts_with(concat!(
        r#"<?xml version="1.0" encoding="UTF-8"?>"#,
        r#"<repository version="1.0""#,
        r#" xmlns="http://www.gtk.org/introspection/core/1.0""#,
        r#" xmlns:c="http://www.gtk.org/introspection/c/1.0""#,
        r#" xmlns:glib="http://www.gtk.org/introspection/glib/1.0">"#,
    )));
    assert!(xml.ends_with("</repository>"));
    Ok(())
}

#[test]
fn test_includes_are_written_in_order() -> Result<()> {
    let namespace = Namespace::new("Test");
    let includes = vec!["GLib".to_string(), "Gtk".to_string()];
    let xml = to_gir_string(&namespace, "libtest.so", &includes)?;
    assert!(xml.contains(r#"<include name="GLib"/><include name="Gtk"/>"#));
    Ok(())
}

#[test]
fn test_shared_library_is_basename_only() -> Result<()> {
    let namespace = Namespace::new("Test");
    let xml = to_gir_string(&namespace, "/usr/lib/libfoo.so.1", &[])?;
    assert!(xml.contains(r#"<namespace name="Test" shared-library="libfoo.so.1">"#));
    Ok(())
}

#[test]
fn test_empty_shared_library_path_is_not_an_error() -> Result<()> {
    let namespace = Namespace::new("Test");
    let xml = to_gir_string(&namespace, "", &[])?;
    assert!(xml.contains(r#"shared-library="""#));
    Ok(())
}

#[test]
fn test_function_with_one_parameter() -> Result<()> {
    let mut func = Function::new("foo", "my_foo");
    func.parameters.push(Parameter {
        name: Some("bar".to_string()),
        ..Parameter::new(TypeRef::named("int"))
    });

    let xml = gir_for(Node::Function(func))?;
    assert!(xml.contains(concat!(
        r#"<function name="foo" c:identifier="my_foo">"#,
        r#"<parameters><parameter name="bar"><type name="int"/></parameter></parameters>"#,
        r#"</function>"#,
    )));
    Ok(())
}

#[test]
fn test_alias_without_native_type() -> Result<()> {
    let xml = gir_for(Node::Alias(Alias::new("MyInt", "int")))?;
    assert!(xml.contains(r#"<alias name="MyInt" target="int"/>"#));
    Ok(())
}

#[test]
fn test_alias_with_native_type() -> Result<()> {
    let mut alias = Alias::new("MyInt", "int");
    alias.ctype = Some("MyInt".to_string());
    let xml = gir_for(Node::Alias(alias))?;
    assert!(xml.contains(r#"<alias name="MyInt" target="int" c:type="MyInt"/>"#));
    Ok(())
}

#[test]
fn test_glib_flags_render_as_bitfield() -> Result<()> {
    let mut flags = Enum::new("Flags1", "TestFlags1");
    flags.flags = true;
    flags.gtype = Some(GTypeInfo {
        type_name: "TestFlags1".to_string(),
        get_type: Some("test_flags1_get_type".to_string()),
    });
    flags.members.push(Member::new("A", 1, "TEST_A"));
    flags.members.push(Member::new("B", 2, "TEST_B"));

    let xml = gir_for(Node::Enum(flags))?;
    assert!(xml.contains(concat!(
        r#"<bitfield name="Flags1" c:type="TestFlags1""#,
        r#" glib:type-name="TestFlags1" glib:get-type="test_flags1_get_type">"#,
    )));
    assert!(xml.contains(r#"<member name="A" value="1" c:identifier="TEST_A"/>"#));
    assert!(xml.contains(r#"<member name="B" value="2" c:identifier="TEST_B"/>"#));
    assert!(!xml.contains("<enumeration"));
    Ok(())
}

#[test]
fn test_plain_flags_stay_an_enumeration() -> Result<()> {
    // Only GLib-backed flags switch tags.
    let mut flags = Enum::new("Flags2", "TestFlags2");
    flags.flags = true;
    flags.members.push(Member::new("A", 1, "TEST2_A"));

    let xml = gir_for(Node::Enum(flags))?;
    assert!(xml.contains(r#"<enumeration name="Flags2" c:type="TestFlags2">"#));
    assert!(!xml.contains("<bitfield"));
    Ok(())
}

#[test]
fn test_glib_member_nick() -> Result<()> {
    let mut enm = Enum::new("Status", "TestStatus");
    enm.gtype = Some(GTypeInfo {
        type_name: "TestStatus".to_string(),
        get_type: Some("test_status_get_type".to_string()),
    });
    let mut ok = Member::new("Ok", 0, "TEST_STATUS_OK");
    ok.nick = Some("ok".to_string());
    enm.members.push(ok);

    let xml = gir_for(Node::Enum(enm))?;
    assert!(xml.contains(
        r#"<member name="Ok" value="0" c:identifier="TEST_STATUS_OK" glib:nick="ok"/>"#
    ));
    Ok(())
}

#[test]
fn test_serialization_is_idempotent() -> Result<()> {
    let mut func = Function::new("foo", "my_foo");
    func.parameters.push(Parameter {
        name: Some("bar".to_string()),
        ..Parameter::new(TypeRef::named("int"))
    });
    let mut namespace = Namespace::new("Test");
    namespace.nodes.push(Node::Function(func));

    let includes = vec!["GLib".to_string()];
    let first = to_gir_string(&namespace, "/usr/lib/libtest.so", &includes)?;
    let second = to_gir_string(&namespace, "/usr/lib/libtest.so", &includes)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_unrecognized_node_is_reported_and_skipped() -> Result<()> {
    let mut namespace = Namespace::new("Test");
    namespace
        .nodes
        .push(Node::Function(Function::new("first", "test_first")));
    namespace
        .nodes
        .push(Node::Constant(Constant::new("MAX_VALUE", "255", "guint8")));
    namespace
        .nodes
        .push(Node::Function(Function::new("second", "test_second")));

    let sink = CollectingSink::new();
    let mut buffer = Vec::new();
    GirWriter::new(&mut buffer, &sink).write_repository(&namespace, "libtest.so", &[])?;
    let xml = String::from_utf8(buffer).expect("invalid UTF-8");

    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("MAX_VALUE"));

    // Both siblings survive, the constant leaves no trace in the output.
    assert!(xml.contains(r#"<function name="first" c:identifier="test_first">"#));
    assert!(xml.contains(r#"<function name="second" c:identifier="test_second">"#));
    assert!(!xml.contains("MAX_VALUE"));
    Ok(())
}

#[test]
fn test_top_level_member_is_silently_consumed() -> Result<()> {
    let mut namespace = Namespace::new("Test");
    namespace
        .nodes
        .push(Node::Member(Member::new("instance", 0, "TEST_INSTANCE")));

    let sink = CollectingSink::new();
    let mut buffer = Vec::new();
    GirWriter::new(&mut buffer, &sink).write_repository(&namespace, "libtest.so", &[])?;
    let xml = String::from_utf8(buffer).expect("invalid UTF-8");

    assert!(sink.messages().is_empty());
    assert!(!xml.contains("instance"));
    assert!(xml.contains(r#"<namespace name="Test" shared-library="libtest.so"></namespace>"#));
    Ok(())
}

#[test]
fn test_empty_node_name_aborts_the_write() {
    let result = gir_for(Node::Function(Function::new("", "anon")));
    assert!(matches!(result, Err(WriteError::InvalidNode(_))));
}
