use serde_json::{Value, json};

use super::*;
use crate::engine::CanvasEngine;
use crate::geom::Offset;

fn sample_document() -> PageDocument {
    let mut engine = CanvasEngine::default();
    engine.set_title("Summer promo").unwrap();
    engine.set_description(Some("Landing page".into())).unwrap();
    let text = engine.add_component("text", None).unwrap();
    engine.update_position(&text, Offset::new(12.0, 8.0)).unwrap();
    let Value::Object(patch) = json!({ "content": "Hi", "shadow": { "blur": 3 } }) else { unreachable!() };
    engine.apply_patch(&text, patch).unwrap();
    engine.add_component("luckyWheel", None).unwrap();
    engine.add_component("image", None).unwrap();
    engine.into_document()
}

fn minimal_blob(components: &Value) -> String {
    json!({
        "title": "t",
        "components": components,
        "canvasSize": { "width": 375, "height": 667 },
        "bgMode": "color",
        "bgColor": "#FFFFFF",
        "layoutMode": "freePosition",
    })
    .to_string()
}

fn decode(blob: &str) -> Result<PageDocument, CodecError> {
    deserialize(blob, Catalog::builtin())
}

// =============================================================
// Encode
// =============================================================

#[test]
fn record_uses_camel_case_wire_names() {
    let value = serde_json::to_value(to_record(&sample_document()).unwrap()).unwrap();
    assert_eq!(value["title"], "Summer promo");
    assert_eq!(value["canvasSize"], json!({ "width": 375, "height": 667 }));
    assert_eq!(value["layoutMode"], "freePosition");
    assert_eq!(value["bgMode"], "color");
    assert_eq!(value["components"][0]["type"], "text");
    assert_eq!(value["components"][0]["props"]["content"], "Hi");
    assert_eq!(value["components"][0]["position"]["top"], 12.0);
    assert!(value["components"][0]["position"].get("zIndex").is_some());
    assert_eq!(value["components"][1]["type"], "luckyWheel");
}

#[test]
fn record_preserves_sequence_order() {
    let doc = sample_document();
    let record = to_record(&doc).unwrap();
    let ids: Vec<_> = record.components.iter().map(|c| c.id.as_str()).collect();
    let expected: Vec<_> = doc.components().iter().map(|c| c.id().as_str()).collect();
    assert_eq!(ids, expected);
}

// =============================================================
// Round trip
// =============================================================

#[test]
fn round_trip_is_lossless() {
    let doc = sample_document();
    let restored = decode(&serialize(&doc).unwrap()).unwrap();
    assert_eq!(restored, doc);
}

#[test]
fn round_trip_keeps_unmodelled_props() {
    let doc = sample_document();
    let restored = decode(&serialize(&doc).unwrap()).unwrap();
    let bag = restored.components()[0].props().to_bag().unwrap();
    assert_eq!(bag["shadow"], json!({ "blur": 3 }));
}

#[test]
fn round_trip_of_empty_auto_flow_document() {
    let doc = PageDocument::new("flow", CanvasSize::new(320, 480), LayoutMode::AutoFlow).unwrap();
    assert_eq!(decode(&serialize(&doc).unwrap()).unwrap(), doc);
}

// =============================================================
// Decode rejections
// =============================================================

#[test]
fn unknown_type_rejects_whole_load() {
    let blob = minimal_blob(&json!([
        { "id": "a", "type": "text", "props": {}, "position": { "top": 0, "left": 0, "width": 10, "height": 10 } },
        { "id": "b", "type": "marquee", "props": {}, "position": { "top": 0, "left": 0, "width": 10, "height": 10 } },
    ]));
    let err = decode(&blob).unwrap_err();
    assert!(matches!(err, CodecError::Validation(EditError::UnknownComponentType(ref t)) if t == "marquee"));
    assert_eq!(err.error_code(), "E_VALIDATION");
}

#[test]
fn duplicate_ids_are_rejected() {
    let pos = json!({ "top": 0, "left": 0, "width": 10, "height": 10 });
    let blob = minimal_blob(&json!([
        { "id": "a", "type": "text", "props": {}, "position": pos },
        { "id": "a", "type": "image", "props": {}, "position": pos },
    ]));
    assert!(matches!(decode(&blob), Err(CodecError::Validation(EditError::DuplicateId(_)))));
}

#[test]
fn missing_position_in_free_layout_is_rejected() {
    let blob = minimal_blob(&json!([{ "id": "a", "type": "text", "props": {} }]));
    assert!(matches!(decode(&blob), Err(CodecError::Validation(EditError::InvalidGeometry(_)))));
}

#[test]
fn negative_geometry_is_rejected() {
    let blob = minimal_blob(&json!([
        { "id": "a", "type": "text", "props": {}, "position": { "top": -4, "left": 0, "width": 10, "height": 10 } },
    ]));
    assert!(matches!(decode(&blob), Err(CodecError::Validation(EditError::InvalidGeometry(_)))));
}

#[test]
fn zero_canvas_is_rejected() {
    let blob = json!({
        "title": "t", "components": [], "canvasSize": { "width": 0, "height": 667 },
        "bgMode": "color", "bgColor": "#FFF", "layoutMode": "autoFlow",
    })
    .to_string();
    assert!(matches!(decode(&blob), Err(CodecError::Validation(EditError::InvalidGeometry(_)))));
}

#[test]
fn missing_field_is_malformed() {
    let blob = json!({ "title": "t", "components": [] }).to_string();
    let err = decode(&blob).unwrap_err();
    assert!(matches!(err, CodecError::Json(_)));
    assert_eq!(err.error_code(), "E_MALFORMED_DOCUMENT");
}

#[test]
fn mistyped_props_are_rejected() {
    let blob = minimal_blob(&json!([
        { "id": "a", "type": "text", "props": { "fontSize": "big" },
          "position": { "top": 0, "left": 0, "width": 10, "height": 10 } },
    ]));
    let err = decode(&blob).unwrap_err();
    assert!(matches!(err, CodecError::Validation(EditError::InvalidProps { .. })));
    assert!(err.to_string().contains("stored props of a"), "{err}");
}

#[test]
fn topmost_z_index_loads_and_stays_on_top() {
    let blob = minimal_blob(&json!([
        { "id": "a", "type": "text", "props": {},
          "position": { "top": 0, "left": 0, "width": 10, "height": 10, "zIndex": i64::MAX } },
    ]));
    let mut engine = CanvasEngine::new(decode(&blob).unwrap());
    let added = engine.add_component("text", None).unwrap();
    let z = engine.component(&added).unwrap().position().unwrap().z_index;
    assert_eq!(z, i64::MAX);
}

#[test]
fn not_json_is_malformed() {
    assert!(matches!(decode("{ nope"), Err(CodecError::Json(_))));
}

#[test]
fn restricted_catalog_rejects_types_it_lacks() {
    let catalog = Catalog::from_definitions([crate::catalog::builtin_definition(crate::props::ComponentKind::Text)]);
    let blob = serialize(&sample_document()).unwrap();
    assert!(matches!(
        deserialize(&blob, &catalog),
        Err(CodecError::Validation(EditError::UnknownComponentType(_)))
    ));
}
