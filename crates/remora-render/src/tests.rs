use remora_core::Diagram;

mod dispatch;

fn diagram(value: serde_json::Value) -> Diagram {
    Diagram::from_json_str(&value.to_string()).unwrap()
}

/// Two rectangles and a diamond wired up with labeled/dashed edges; the
/// common fixture most renderer tests start from.
fn sample() -> Diagram {
    diagram(serde_json::json!({
        "title": "Test Flow",
        "nodes": [
            { "id": "start", "type": "rectangle", "label": "Start", "x": 0.0, "y": 0.0 },
            { "id": "work", "type": "rectangle", "label": "Work", "x": 200.0, "y": 0.0 },
            { "id": "check", "type": "diamond", "label": "OK?", "x": 400.0, "y": 0.0 }
        ],
        "edges": [
            { "id": "e1", "from": "start", "to": "work" },
            { "id": "e2", "from": "work", "to": "check", "label": "check",
              "style": { "strokeStyle": "dashed" } }
        ],
        "groups": []
    }))
}
