//! Material validation demonstration
//!
//! This example shows how to build a shading assembly and run the document
//! validator over it, with and without defects.

use shadebind::diag::convert_diagnostics_to_reports;
use shadebind::tree::Document;
use shadebind::validate::{DocumentValidator, ValidationOutcome};

fn main() {
    println!("=== Material Validation Demo ===\n");

    // Example 1: A clean assembly
    demo_clean_assembly();

    // Example 2: An unresolved shader definition
    demo_unresolved_definition();

    // Example 3: A connection that goes nowhere
    demo_unresolved_connection();

    // Example 4: Warnings and strict mode
    demo_strict_mode();

    // Example 5: Rich miette reports
    demo_rich_reports();
}

fn print_outcome(outcome: &ValidationOutcome) {
    if outcome.is_success() {
        println!("✓ Document is valid");
        for diag in outcome.warnings() {
            println!("  warning: {}", diag.message);
        }
    } else {
        println!("✗ Validation failed:");
        for diag in &outcome.diagnostics {
            println!("  - {}", diag.line());
        }
    }
    println!();
}

/// One definition, one graph, one material binding both.
fn build_assembly() -> Document {
    let mut doc = Document::new();

    let def = doc
        .add_node_def(Some("ND_standard_surface"), Some("standard_surface"))
        .unwrap();
    def.add_parameter(&mut doc, "roughness").unwrap();

    let graph = doc.add_node_graph(Some("texture_net")).unwrap();
    let noise = graph
        .add_node(&mut doc, Some("noise1"), Some("noise2d"))
        .unwrap();
    let out = graph.add_output(&mut doc, Some("out"), "color3").unwrap();
    out.set_connected_node(&mut doc, Some(noise));

    let material = doc.add_material(Some("plastic")).unwrap();
    let sref = material
        .add_shader_ref(&mut doc, Some("surface1"), Some("standard_surface"))
        .unwrap();
    let param = sref.add_bind_param(&mut doc, "roughness").unwrap();
    doc.set_value(param, "0.4", "float");
    let bind = sref.add_bind_input(&mut doc, "base_color").unwrap();
    bind.set_connected_output(&mut doc, Some(out));

    doc
}

fn demo_clean_assembly() {
    println!("--- Example 1: Clean Assembly ---");

    let doc = build_assembly();
    let outcome = DocumentValidator::new().validate_document(&doc);
    print_outcome(&outcome);

    if let Some(resolution) = outcome.resolution {
        let material = doc.material("plastic").unwrap();
        let refs = resolution.effective_refs(material).unwrap_or(&[]);
        println!("  plastic resolves {} shader ref(s)\n", refs.len());
    }
}

fn demo_unresolved_definition() {
    println!("--- Example 2: Unresolved Definition ---");

    let mut doc = build_assembly();
    doc.remove_node_def("ND_standard_surface");

    let outcome = DocumentValidator::new().validate_document(&doc);
    print_outcome(&outcome);
}

fn demo_unresolved_connection() {
    println!("--- Example 3: Unresolved Connection ---");

    let mut doc = build_assembly();
    doc.remove_node_graph("texture_net");

    let outcome = DocumentValidator::new().validate_document(&doc);
    print_outcome(&outcome);
}

fn demo_strict_mode() {
    println!("--- Example 4: Warnings and Strict Mode ---");

    let mut doc = build_assembly();
    // Give the connected input a literal value as well: a dual binding.
    let bind = doc
        .material("plastic")
        .and_then(|m| m.shader_ref(&doc, "surface1"))
        .and_then(|s| s.bind_input(&doc, "base_color"))
        .unwrap();
    doc.set_value(bind, "1, 1, 1", "color3");

    println!("Default configuration:");
    let outcome = DocumentValidator::new().validate_document(&doc);
    print_outcome(&outcome);

    println!("Strict configuration:");
    let outcome = DocumentValidator::new()
        .with_strict(true)
        .validate_document(&doc);
    print_outcome(&outcome);
}

fn demo_rich_reports() {
    println!("--- Example 5: Rich Reports ---");

    let mut doc = build_assembly();
    doc.remove_node_def("ND_standard_surface");
    doc.remove_node_graph("texture_net");

    let outcome = DocumentValidator::new().validate_document(&doc);
    for report in convert_diagnostics_to_reports(&outcome.diagnostics) {
        println!("{report:?}");
    }
}
