#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn bag(value: Value) -> PropertyBag {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

// =============================================================
// ComponentKind
// =============================================================

#[test]
fn kind_wire_names_round_trip_through_from_str() {
    for kind in ComponentKind::ALL {
        assert_eq!(kind.as_str().parse::<ComponentKind>(), Ok(kind));
    }
}

#[test]
fn kind_serde_matches_as_str() {
    for kind in ComponentKind::ALL {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.as_str()));
    }
}

#[test]
fn kind_from_str_rejects_unknown() {
    let err = "marquee".parse::<ComponentKind>().unwrap_err();
    assert_eq!(err, UnknownKind("marquee".into()));
    assert_eq!(err.to_string(), "unknown component type: marquee");
}

#[test]
fn kind_from_str_is_case_sensitive() {
    assert!("Text".parse::<ComponentKind>().is_err());
    assert!("luckywheel".parse::<ComponentKind>().is_err());
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn defaults_match_requested_kind() {
    for kind in ComponentKind::ALL {
        assert_eq!(ComponentProps::defaults(kind).kind(), kind);
    }
}

#[test]
fn lucky_wheel_defaults_carry_six_prizes() {
    let props = ComponentProps::defaults(ComponentKind::LuckyWheel);
    let wheel = props.as_lucky_wheel().unwrap();
    assert_eq!(wheel.prizes.len(), 6);
    let sum: f64 = wheel.prizes.iter().map(|p| p.probability).sum();
    assert!((sum - 1.0).abs() < 1e-9);
}

#[test]
fn as_lucky_wheel_is_none_for_other_kinds() {
    assert!(ComponentProps::defaults(ComponentKind::Text).as_lucky_wheel().is_none());
}

// =============================================================
// Bag conversion
// =============================================================

#[test]
fn to_bag_uses_camel_case_keys() {
    let bag = ComponentProps::defaults(ComponentKind::Text).to_bag().unwrap();
    assert!(bag.contains_key("fontSize"));
    assert!(bag.contains_key("lineHeight"));
    assert!(!bag.contains_key("font_size"));
}

#[test]
fn to_bag_omits_absent_optionals() {
    let bag = ComponentProps::defaults(ComponentKind::Image).to_bag().unwrap();
    assert!(!bag.contains_key("link"));
}

#[test]
fn video_loop_uses_wire_name() {
    let bag = ComponentProps::defaults(ComponentKind::Video).to_bag().unwrap();
    assert_eq!(bag.get("loop"), Some(&json!(false)));
}

#[test]
fn from_bag_fills_missing_keys_with_defaults() {
    let props = ComponentProps::from_bag(ComponentKind::Text, bag(json!({ "content": "Hi" }))).unwrap();
    let ComponentProps::Text(text) = props else {
        panic!("expected text props");
    };
    assert_eq!(text.content, "Hi");
    assert_eq!(text.font_size, TextProps::default().font_size);
}

#[test]
fn from_bag_keeps_unknown_keys_in_extra() {
    let props = ComponentProps::from_bag(ComponentKind::Button, bag(json!({ "label": "Buy", "shadow": "2px" }))).unwrap();
    let ComponentProps::Button(button) = &props else {
        panic!("expected button props");
    };
    assert_eq!(button.extra.get("shadow"), Some(&json!("2px")));

    let out = props.to_bag().unwrap();
    assert_eq!(out.get("shadow"), Some(&json!("2px")));
    assert_eq!(out.get("label"), Some(&json!("Buy")));
}

#[test]
fn from_bag_rejects_mistyped_field() {
    let result = ComponentProps::from_bag(ComponentKind::Text, bag(json!({ "fontSize": "large" })));
    assert!(result.is_err());
}

#[test]
fn from_bag_rejects_unknown_enum_value() {
    let result = ComponentProps::from_bag(ComponentKind::Divider, bag(json!({ "style": "wavy" })));
    assert!(result.is_err());
}

#[test]
fn integer_json_is_accepted_for_float_fields() {
    let props = ComponentProps::from_bag(ComponentKind::Qrcode, bag(json!({ "size": 200 }))).unwrap();
    let ComponentProps::Qrcode(qr) = props else {
        panic!("expected qrcode props");
    };
    assert_eq!(qr.size, 200.0);
}

#[test]
fn bag_round_trip_is_lossless_for_every_kind() {
    for kind in ComponentKind::ALL {
        let props = ComponentProps::defaults(kind);
        let back = ComponentProps::from_bag(kind, props.to_bag().unwrap()).unwrap();
        assert_eq!(back, props, "round trip changed {kind}");
    }
}

#[test]
fn wheel_prizes_parse_from_bag() {
    let props = ComponentProps::from_bag(
        ComponentKind::LuckyWheel,
        bag(json!({
            "prizes": [
                { "id": "a", "name": "Cup", "probability": 0.25 },
                { "id": "b", "name": "Pen", "probability": 0.75, "color": "#fff" }
            ],
            "extraTurns": 3
        })),
    )
    .unwrap();
    let wheel = props.as_lucky_wheel().unwrap();
    assert_eq!(wheel.prizes.len(), 2);
    assert_eq!(wheel.prizes[1].color.as_deref(), Some("#fff"));
    assert_eq!(wheel.extra_turns, 3);
}
