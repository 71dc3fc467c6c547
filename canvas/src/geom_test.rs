#![allow(clippy::float_cmp)]

use super::*;

fn canvas() -> CanvasSize {
    CanvasSize::new(375, 667)
}

#[test]
fn size_validity() {
    assert!(Size::new(1.0, 1.0).is_valid());
    assert!(!Size::new(0.0, 10.0).is_valid());
    assert!(!Size::new(10.0, -1.0).is_valid());
    assert!(!Size::new(f64::NAN, 10.0).is_valid());
}

#[test]
fn canvas_size_validity() {
    assert!(canvas().is_valid());
    assert!(!CanvasSize::new(0, 667).is_valid());
    assert!(!CanvasSize::new(375, 0).is_valid());
}

#[test]
fn position_rejects_negative_coordinates() {
    let pos = Position { top: -1.0, left: 0.0, width: 10.0, height: 10.0, z_index: 0 };
    assert!(!pos.is_valid());
    let pos = Position { top: 0.0, left: 0.0, width: 10.0, height: 10.0, z_index: 0 };
    assert!(pos.is_valid());
}

#[test]
fn contains_is_half_open() {
    let pos = Position { top: 10.0, left: 10.0, width: 20.0, height: 20.0, z_index: 0 };
    assert!(pos.contains(Offset::new(10.0, 10.0)));
    assert!(pos.contains(Offset::new(29.9, 29.9)));
    assert!(!pos.contains(Offset::new(30.0, 15.0)));
    assert!(!pos.contains(Offset::new(5.0, 15.0)));
}

#[test]
fn clamp_keeps_coordinates_non_negative() {
    let out = Position::clamp_offset(Size::new(100.0, 40.0), Offset::new(-20.0, -5.0), canvas());
    assert_eq!(out, Offset::new(0.0, 0.0));
}

#[test]
fn clamp_keeps_horizontal_axis_inside() {
    let out = Position::clamp_offset(Size::new(100.0, 40.0), Offset::new(10.0, 300.0), canvas());
    assert_eq!(out.left, 275.0);
    assert_eq!(out.top, 10.0);
}

#[test]
fn clamp_allows_vertical_overflow() {
    let out = Position::clamp_offset(Size::new(100.0, 40.0), Offset::new(5000.0, 0.0), canvas());
    assert_eq!(out.top, 5000.0);
}

#[test]
fn clamp_pins_oversized_box_to_left_edge() {
    let out = Position::clamp_offset(Size::new(500.0, 40.0), Offset::new(0.0, 50.0), canvas());
    assert_eq!(out.left, 0.0);
}

#[test]
fn clamp_replaces_non_finite_with_zero() {
    let out = Position::clamp_offset(Size::new(10.0, 10.0), Offset::new(f64::NAN, f64::INFINITY), canvas());
    assert_eq!(out, Offset::new(0.0, 0.0));
}

#[test]
fn position_serializes_camel_case() {
    let pos = Position { top: 1.0, left: 2.0, width: 3.0, height: 4.0, z_index: 5 };
    let json = serde_json::to_value(pos).unwrap();
    assert_eq!(json["zIndex"], 5);
}

#[test]
fn position_z_index_defaults_when_missing() {
    let pos: Position = serde_json::from_str(r#"{"top":1,"left":2,"width":3,"height":4}"#).unwrap();
    assert_eq!(pos.z_index, 0);
}
