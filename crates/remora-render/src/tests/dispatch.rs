use crate::tests::{diagram, sample};
use crate::{DiagramConverter, LayoutMode, OutputFormat};
use serde_json::json;

#[test]
fn format_names_parse_case_insensitively() {
    assert_eq!(
        "MerMaid".parse::<OutputFormat>().unwrap(),
        OutputFormat::Mermaid
    );
    assert_eq!(
        " graphviz ".parse::<OutputFormat>().unwrap(),
        OutputFormat::Graphviz
    );
    assert_eq!(
        "drawio".parse::<OutputFormat>().unwrap(),
        OutputFormat::Drawio
    );
    assert_eq!("SVG".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
}

#[test]
fn unknown_format_is_rejected_at_the_boundary() {
    let err = "png".parse::<OutputFormat>().unwrap_err();
    assert_eq!(err.to_string(), "unsupported output format: png");
}

#[test]
fn extensions_match_their_format() {
    assert_eq!(OutputFormat::Mermaid.extension(), ".mmd");
    assert_eq!(OutputFormat::Graphviz.extension(), ".dot");
    assert_eq!(OutputFormat::Drawio.extension(), ".drawio");
    assert_eq!(OutputFormat::Svg.extension(), ".svg");
}

#[test]
fn layout_defaults_per_format() {
    let d = diagram(json!({}));
    let conv = DiagramConverter::new(&d);
    assert_eq!(conv.layout_for(OutputFormat::Mermaid), LayoutMode::Structure);
    assert_eq!(
        conv.layout_for(OutputFormat::Graphviz),
        LayoutMode::Structure
    );
    assert_eq!(conv.layout_for(OutputFormat::Drawio), LayoutMode::Position);
    assert_eq!(conv.layout_for(OutputFormat::Svg), LayoutMode::Position);
}

#[test]
fn layout_override_applies_to_every_format() {
    let d = diagram(json!({}));
    let conv = DiagramConverter::with_layout(&d, Some(LayoutMode::Position));
    for format in OutputFormat::ALL {
        assert_eq!(conv.layout_for(format), LayoutMode::Position);
    }
}

#[test]
fn unknown_layout_mode_is_rejected() {
    let err = "auto".parse::<LayoutMode>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "unsupported layout mode: auto (expected structure|position)"
    );
}

#[test]
fn rendering_is_deterministic_per_format() {
    let d = sample();
    let conv = DiagramConverter::new(&d);
    for format in OutputFormat::ALL {
        assert_eq!(conv.render(format), conv.render(format));
    }
}

#[test]
fn output_is_independent_of_input_order() {
    let ordered = sample();

    let mut shuffled = sample();
    shuffled.nodes.reverse();
    shuffled.edges.reverse();

    let a = DiagramConverter::new(&ordered);
    let b = DiagramConverter::new(&shuffled);
    for format in OutputFormat::ALL {
        assert_eq!(a.render(format), b.render(format));
    }
}

#[test]
fn fmt_number_trims_trailing_zeros() {
    assert_eq!(crate::fmt_number(120.0), "120");
    assert_eq!(crate::fmt_number(12.5), "12.5");
    assert_eq!(crate::fmt_number(-3.0), "-3");
    assert_eq!(crate::fmt_number(0.0), "0");
    assert_eq!(crate::fmt_number(f64::NAN), "0");
}
