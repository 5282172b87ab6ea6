use crate::excalidraw::import_str;
use crate::*;
use serde_json::json;

fn import(value: serde_json::Value) -> Diagram {
    import_str(&value.to_string(), "scene.excalidraw").unwrap()
}

#[test]
fn diamond_scene_classifies_as_flowchart() {
    let diagram = import(json!({
        "elements": [
            { "id": "d1", "type": "diamond", "text": "OK?", "x": 0, "y": 0 }
        ]
    }));
    assert_eq!(diagram.diagram_type.as_deref(), Some("flowchart"));
    assert_eq!(diagram.source.as_deref(), Some("excalidraw"));
    assert_eq!(diagram.source_file.as_deref(), Some("scene.excalidraw"));
    assert_eq!(diagram.overall_confidence, Some(1.0));
}

#[test]
fn scene_without_diamonds_classifies_as_architecture() {
    let diagram = import(json!({
        "elements": [
            { "id": "r1", "type": "rectangle", "text": "API" }
        ]
    }));
    assert_eq!(diagram.diagram_type.as_deref(), Some("architecture"));
}

#[test]
fn bound_text_wins_over_inline_text() {
    let diagram = import(json!({
        "elements": [
            { "id": "r1", "type": "rectangle", "text": "inline" },
            { "id": "t1", "type": "text", "text": "bound", "containerId": "r1" }
        ]
    }));
    assert_eq!(diagram.nodes.len(), 1);
    assert_eq!(diagram.nodes[0].label.as_deref(), Some("bound"));
    assert_eq!(diagram.nodes[0].id, "bound");
}

#[test]
fn unlabeled_shapes_get_positional_placeholders() {
    let diagram = import(json!({
        "elements": [
            { "id": "r1", "type": "rectangle" },
            { "id": "r2", "type": "ellipse" }
        ]
    }));
    assert_eq!(diagram.nodes[0].label.as_deref(), Some("Shape 1"));
    assert_eq!(diagram.nodes[0].id, "shape_1");
    assert_eq!(diagram.nodes[1].label.as_deref(), Some("Shape 2"));
    assert_eq!(diagram.nodes[1].shape, NodeShape::Ellipse);
}

#[test]
fn colliding_labels_get_numeric_suffixes() {
    let diagram = import(json!({
        "elements": [
            { "id": "r1", "type": "rectangle", "text": "Cache" },
            { "id": "r2", "type": "rectangle", "text": "Cache" },
            { "id": "r3", "type": "rectangle", "text": "cache!" }
        ]
    }));
    let ids: Vec<&str> = diagram.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["cache", "cache_2", "cache_3"]);
}

#[test]
fn deleted_elements_are_ignored() {
    let diagram = import(json!({
        "elements": [
            { "id": "r1", "type": "rectangle", "text": "kept" },
            { "id": "r2", "type": "rectangle", "text": "gone", "isDeleted": true }
        ]
    }));
    assert_eq!(diagram.nodes.len(), 1);
    assert_eq!(diagram.nodes[0].id, "kept");
}

#[test]
fn transparent_background_never_becomes_fill_color() {
    let diagram = import(json!({
        "elements": [
            { "id": "r1", "type": "rectangle", "text": "A",
              "backgroundColor": "transparent", "strokeColor": "#1e1e1e" },
            { "id": "r2", "type": "rectangle", "text": "B",
              "backgroundColor": "#ffec99" }
        ]
    }));
    let a = &diagram.nodes[0];
    let style = a.style.as_ref().unwrap();
    assert_eq!(style.fill_color, None);
    assert_eq!(style.stroke_color.as_deref(), Some("#1e1e1e"));

    let b = &diagram.nodes[1];
    assert_eq!(
        b.style.as_ref().unwrap().fill_color.as_deref(),
        Some("#ffec99")
    );
}

#[test]
fn style_object_is_omitted_when_unstyled() {
    let diagram = import(json!({
        "elements": [
            { "id": "r1", "type": "rectangle", "text": "A",
              "backgroundColor": "transparent" }
        ]
    }));
    assert_eq!(diagram.nodes[0].style, None);
}

#[test]
fn geometry_is_rounded_with_defaults() {
    let diagram = import(json!({
        "elements": [
            { "id": "r1", "type": "rectangle", "text": "A",
              "x": 12.6, "y": -3.4 }
        ]
    }));
    let node = &diagram.nodes[0];
    assert_eq!(node.x, Some(13.0));
    assert_eq!(node.y, Some(-3.0));
    assert_eq!(node.width, Some(100.0));
    assert_eq!(node.height, Some(50.0));
    assert_eq!(node.confidence, Some(1.0));
}

#[test]
fn bound_connectors_become_edges() {
    let diagram = import(json!({
        "elements": [
            { "id": "r1", "type": "rectangle", "text": "Start" },
            { "id": "r2", "type": "diamond", "text": "OK?" },
            { "id": "a1", "type": "arrow", "strokeStyle": "dashed",
              "startBinding": { "elementId": "r1" },
              "endBinding": { "elementId": "r2" } },
            { "id": "t1", "type": "text", "text": "check", "containerId": "a1" }
        ]
    }));
    assert_eq!(diagram.edges.len(), 1);
    let edge = &diagram.edges[0];
    assert_eq!(edge.id, "start_to_ok");
    assert_eq!(edge.from, "start");
    assert_eq!(edge.to, "ok");
    assert_eq!(edge.kind, EdgeKind::Arrow);
    assert_eq!(edge.label.as_deref(), Some("check"));
    assert!(edge.is_dashed());
}

#[test]
fn unbound_connectors_are_dropped() {
    let diagram = import(json!({
        "elements": [
            { "id": "r1", "type": "rectangle", "text": "A" },
            { "id": "a1", "type": "arrow",
              "startBinding": { "elementId": "r1" } },
            { "id": "a2", "type": "arrow",
              "startBinding": { "elementId": "r1" },
              "endBinding": { "elementId": "missing" } }
        ]
    }));
    assert!(diagram.edges.is_empty());
}

#[test]
fn line_connectors_keep_their_kind_and_solid_stroke() {
    let diagram = import(json!({
        "elements": [
            { "id": "r1", "type": "rectangle", "text": "A" },
            { "id": "r2", "type": "rectangle", "text": "B" },
            { "id": "l1", "type": "line", "strokeStyle": "solid",
              "startBinding": { "elementId": "r1" },
              "endBinding": { "elementId": "r2" } }
        ]
    }));
    let edge = &diagram.edges[0];
    assert_eq!(edge.kind, EdgeKind::Line);
    assert_eq!(edge.style, None);
}

#[test]
fn frames_with_members_become_groups() {
    let diagram = import(json!({
        "elements": [
            { "id": "f1", "type": "frame", "name": "Backend" },
            { "id": "f2", "type": "frame", "name": "Empty" },
            { "id": "r1", "type": "rectangle", "text": "API", "frameId": "f1" },
            { "id": "r2", "type": "rectangle", "text": "DB", "frameId": "f1" },
            { "id": "r3", "type": "rectangle", "text": "Lonely" }
        ]
    }));
    // Frames register as shapes too, ahead of the member nodes.
    let ids: Vec<&str> = diagram.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["shape_1", "shape_2", "api", "db", "lonely"]);

    assert_eq!(diagram.groups.len(), 1);
    let group = &diagram.groups[0];
    assert_eq!(group.id, "backend");
    assert_eq!(group.label, "Backend");
    assert_eq!(group.node_ids, ["api", "db"]);
}

#[test]
fn frames_register_as_shapes_and_shift_placeholder_numbering() {
    let diagram = import(json!({
        "elements": [
            { "id": "f1", "type": "frame", "name": "Backend" },
            { "id": "r1", "type": "rectangle" }
        ]
    }));
    // The frame takes "Shape 1", pushing the unlabeled rectangle to "Shape 2".
    assert_eq!(diagram.nodes[0].id, "shape_1");
    assert_eq!(diagram.nodes[0].shape, NodeShape::Rectangle);
    assert_eq!(diagram.nodes[1].id, "shape_2");
    assert_eq!(diagram.nodes[1].label.as_deref(), Some("Shape 2"));
}

#[test]
fn nested_frames_are_members_of_the_enclosing_group() {
    let diagram = import(json!({
        "elements": [
            { "id": "f1", "type": "frame", "name": "Outer" },
            { "id": "f2", "type": "frame", "name": "Inner", "frameId": "f1" },
            { "id": "r1", "type": "rectangle", "text": "A", "frameId": "f2" }
        ]
    }));
    let outer = diagram.groups.iter().find(|g| g.id == "outer").unwrap();
    assert_eq!(outer.node_ids, ["shape_2"]);
    let inner = diagram.groups.iter().find(|g| g.id == "inner").unwrap();
    assert_eq!(inner.node_ids, ["a"]);
}

#[test]
fn unnamed_frames_default_to_group() {
    let diagram = import(json!({
        "elements": [
            { "id": "f1", "type": "frame" },
            { "id": "r1", "type": "rectangle", "text": "A", "frameId": "f1" }
        ]
    }));
    assert_eq!(diagram.groups[0].id, "group");
    assert_eq!(diagram.groups[0].label, "Group");
}

#[test]
fn produced_model_passes_validation() {
    let diagram = import(json!({
        "elements": [
            { "id": "r1", "type": "rectangle", "text": "Same" },
            { "id": "r2", "type": "rectangle", "text": "Same" }
        ]
    }));
    assert!(diagram.validated().is_ok());
}
