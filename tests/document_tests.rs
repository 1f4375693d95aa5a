use shadebind::tree::{Document, ElementKind, TreeError};

fn doc_with_material(name: &str) -> (Document, shadebind::MaterialId) {
    let mut doc = Document::new();
    let material = doc
        .add_material(Some(name))
        .unwrap_or_else(|err| panic!("adding material `{name}` failed: {err}"));
    (doc, material)
}

#[test]
fn new_document_has_a_document_root() {
    let doc = Document::new();
    assert_eq!(doc.kind(doc.root()), Some(ElementKind::Document));
    assert_eq!(doc.name(doc.root()), Some(""));
    assert_eq!(doc.element_count(), 1, "only the root should exist");
}

#[test]
fn added_children_record_parent_and_kind() {
    let (doc, material) = doc_with_material("plastic");
    assert_eq!(doc.kind(material), Some(ElementKind::Material));
    assert_eq!(doc.name(material), Some("plastic"));
    assert_eq!(doc.parent(material), Some(doc.root()));
    assert_eq!(doc.children(doc.root()), vec![material.element()]);
}

#[test]
fn repeated_add_returns_the_existing_element() {
    let (mut doc, material) = doc_with_material("plastic");
    let again = doc.add_material(Some("plastic")).unwrap();
    assert_eq!(material, again, "same name and kind must reuse the element");
    assert_eq!(doc.materials().len(), 1);
}

#[test]
fn repeated_add_never_rewrites_attributes() {
    let (mut doc, material) = doc_with_material("plastic");
    let sref = material
        .add_shader_ref(&mut doc, Some("surface"), Some("standard_surface"))
        .unwrap();
    let again = material
        .add_shader_ref(&mut doc, Some("surface"), Some("other_family"))
        .unwrap();

    assert_eq!(sref, again);
    assert_eq!(
        sref.node(&doc),
        Some("standard_surface"),
        "the node family must stay as applied on creation"
    );
}

#[test]
fn sibling_names_are_scoped_per_category() {
    let mut doc = Document::new();
    let material = doc.add_material(Some("shared")).unwrap();
    let graph = doc.add_node_graph(Some("shared")).unwrap();

    // Same name, different categories: both live under the root.
    assert_ne!(material.element(), graph.element());
    assert_eq!(doc.material("shared"), Some(material));
    assert_eq!(doc.node_graph("shared"), Some(graph));
}

#[test]
fn omitted_names_generate_category_counters() {
    let mut doc = Document::new();
    let first = doc.add_material(None).unwrap();
    let second = doc.add_material(None).unwrap();
    let graph = doc.add_node_graph(None).unwrap();

    assert_eq!(first.name(&doc), Some("material1"));
    assert_eq!(second.name(&doc), Some("material2"));
    assert_eq!(graph.name(&doc), Some("nodegraph1"));
}

#[test]
fn empty_names_behave_like_omitted_names() {
    let mut doc = Document::new();
    let material = doc.add_material(Some("")).unwrap();
    assert_eq!(material.name(&doc), Some("material1"));
}

#[test]
fn removed_element_ids_are_never_reused() {
    let (mut doc, material) = doc_with_material("plastic");
    let old = material.element();
    doc.remove_material("plastic");
    assert!(!doc.contains(old), "removed id should be dead");

    let replacement = doc.add_material(Some("plastic")).unwrap();
    assert_ne!(
        replacement.element(),
        old,
        "a fresh element must get a fresh id"
    );
    assert!(!doc.contains(old), "the old id must stay dead");
}

#[test]
fn removing_a_material_removes_its_subtree() {
    let (mut doc, material) = doc_with_material("plastic");
    let sref = material
        .add_shader_ref(&mut doc, Some("surface"), None)
        .unwrap();
    let bind = sref.add_bind_input(&mut doc, "base_color").unwrap();

    doc.remove_material("plastic");

    assert!(!doc.contains(material.element()));
    assert!(!doc.contains(sref.element()));
    assert!(!doc.contains(bind.element()));
    assert_eq!(doc.element_count(), 1, "only the root should remain");
}

#[test]
fn mutations_through_stale_ids_are_ignored() {
    let (mut doc, material) = doc_with_material("plastic");
    let stale = material.element();
    doc.remove_material("plastic");

    doc.set_attribute(stale, "node", "standard_surface");
    doc.remove_attribute(stale, "node");

    assert_eq!(doc.attribute(stale, "node"), None);
    assert_eq!(doc.element_count(), 1);
}

#[test]
fn adding_under_a_stale_parent_is_an_error() {
    let (mut doc, material) = doc_with_material("plastic");
    let stale = material.element();
    doc.remove_material("plastic");

    let result = doc.add_child(stale, ElementKind::ShaderRef, Some("surface"));
    assert!(
        matches!(result, Err(TreeError::MissingElement(id)) if id == stale),
        "expected a missing-element error, got {result:?}"
    );
}

#[test]
fn containment_rules_reject_foreign_children() {
    let (mut doc, material) = doc_with_material("plastic");

    let nested = doc.add_child(material, ElementKind::Material, Some("inner"));
    assert!(
        matches!(nested, Err(TreeError::InvalidChild { .. })),
        "materials must not nest, got {nested:?}"
    );

    let graph_in_material = doc.add_child(material, ElementKind::NodeGraph, Some("g"));
    assert!(matches!(
        graph_in_material,
        Err(TreeError::InvalidChild { .. })
    ));
}

#[test]
fn attributes_round_trip() {
    let (mut doc, material) = doc_with_material("plastic");
    assert!(!doc.has_attribute(material, "xpos"));

    doc.set_attribute(material, "xpos", "12.5");
    assert_eq!(doc.attribute(material, "xpos"), Some("12.5"));
    assert!(doc.has_attribute(material, "xpos"));

    doc.set_attribute(material, "xpos", "13.0");
    assert_eq!(doc.attribute(material, "xpos"), Some("13.0"));

    doc.set_attribute(material, "ypos", "4.0");
    let mut attrs: Vec<_> = doc
        .element(material)
        .expect("the material is live")
        .attributes()
        .collect();
    attrs.sort();
    assert_eq!(attrs, vec![("xpos", "13.0"), ("ypos", "4.0")]);

    doc.remove_attribute(material, "xpos");
    assert_eq!(doc.attribute(material, "xpos"), None);
}

#[test]
fn values_carry_a_declared_type() {
    let (mut doc, material) = doc_with_material("plastic");
    let sref = material
        .add_shader_ref(&mut doc, Some("surface"), None)
        .unwrap();
    let bind = sref.add_bind_param(&mut doc, "roughness").unwrap();

    doc.set_value(bind, "0.4", "float");
    assert_eq!(doc.value_str(bind), Some("0.4"));
    assert_eq!(doc.value_type(bind), Some("float"));

    // An empty type on a later write keeps the declared type.
    doc.set_value(bind, "0.8", "");
    assert_eq!(doc.value_str(bind), Some("0.8"));
    assert_eq!(doc.value_type(bind), Some("float"));
}

#[test]
fn find_by_name_visits_in_document_order() {
    let mut doc = Document::new();
    let material = doc.add_material(Some("alpha")).unwrap();
    let over = material.add_override(&mut doc, "shared").unwrap();
    doc.add_node_def(Some("shared"), None).unwrap();

    // Depth-first traversal reaches the override inside the first
    // top-level element before the later node def sibling.
    assert_eq!(doc.find_by_name("shared"), Some(over.element()));
    assert_eq!(doc.find_by_name("missing"), None);
}

#[test]
fn element_paths_are_slash_separated() {
    let mut doc = Document::new();
    let graph = doc.add_node_graph(Some("noise_net")).unwrap();
    let node = graph.add_node(&mut doc, Some("noise1"), Some("noise2d")).unwrap();

    assert_eq!(doc.element_path(doc.root()), "/");
    assert_eq!(doc.element_path(graph), "/noise_net");
    assert_eq!(doc.element_path(node), "/noise_net/noise1");
}

#[test]
fn top_level_queries_filter_by_kind() {
    let mut doc = Document::new();
    doc.add_material(Some("a")).unwrap();
    doc.add_node_def(Some("nd"), None).unwrap();
    doc.add_material(Some("b")).unwrap();

    let names: Vec<_> = doc
        .materials()
        .iter()
        .filter_map(|m| m.name(&doc))
        .collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(doc.node_defs().len(), 1);
}
