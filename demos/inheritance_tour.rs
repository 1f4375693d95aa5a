//! Material inheritance walkthrough
//!
//! This example builds a small material family and walks through chain
//! resolution, shader ref composition, and override receivers.

use shadebind::tree::Document;

fn main() {
    println!("=== Material Inheritance Tour ===\n");

    let mut doc = Document::new();
    doc.add_node_def(Some("ND_standard_surface"), Some("standard_surface"))
        .unwrap();

    // A three-level family: base -> plastic -> shiny_plastic.
    let base = doc.add_material(Some("base")).unwrap();
    let sref = base
        .add_shader_ref(&mut doc, Some("surface1"), Some("standard_surface"))
        .unwrap();
    let param = sref.add_bind_param(&mut doc, "roughness").unwrap();
    doc.set_value(param, "0.5", "float");

    let plastic = doc.add_material(Some("plastic")).unwrap();
    plastic.set_inherits_from(&mut doc, Some(base)).unwrap();
    plastic
        .add_shader_ref(&mut doc, Some("coat"), Some("standard_surface"))
        .unwrap();

    let shiny = doc.add_material(Some("shiny_plastic")).unwrap();
    shiny.set_inherits_from(&mut doc, Some(plastic)).unwrap();
    shiny
        .set_override_value(&mut doc, "roughness", "0.05", "float")
        .unwrap();

    // Walk the chain from the most derived material.
    println!("--- Ancestor Chain ---");
    let chain = shiny.ancestor_chain(&doc).unwrap();
    let names: Vec<_> = chain.iter().filter_map(|m| m.name(&doc)).collect();
    println!("shiny_plastic inherits: {}\n", names.join(" -> "));

    // Shader refs compose additively, own refs first.
    println!("--- Effective Shader Refs ---");
    for sref in shiny.effective_shader_refs(&doc).unwrap() {
        println!("  {}", sref.path(&doc));
    }
    println!();

    // The override re-binds a param declared two levels up.
    println!("--- Override Receiver ---");
    let over = shiny.override_named(&doc, "roughness").unwrap();
    match over.receiver(&doc).unwrap() {
        Some(site) => println!("roughness override lands on {}\n", site.path(&doc)),
        None => println!("roughness override matches nothing\n"),
    }

    // Cycles are rejected before they can corrupt the document.
    println!("--- Cycle Rejection ---");
    match base.set_inherits_from(&mut doc, Some(shiny)) {
        Ok(()) => println!("unexpected: the loop was accepted"),
        Err(err) => println!("✗ rejected: {err}"),
    }

    let mut report = String::new();
    let ok = doc.validate(Some(&mut report));
    println!("\nDocument still validates: {ok}");
    print!("{report}");
}
