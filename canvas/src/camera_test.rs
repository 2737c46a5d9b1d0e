#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_scaled() {
    let p = Point::new(4.0, -2.0).scaled(0.5);
    assert_eq!(p, Point::new(2.0, -1.0));
}

#[test]
fn point_serializes_as_xy_object() {
    let json = serde_json::to_value(Point::new(1.5, 2.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 1.5, "y": 2.0 }));
}

// --- Viewport defaults ---

#[test]
fn viewport_default_offset_is_zero() {
    let vp = Viewport::default();
    assert_eq!(vp.offset(), Point::new(0.0, 0.0));
}

#[test]
fn default_viewport_is_identity() {
    let vp = Viewport::default();
    let p = Point::new(12.0, -7.0);
    assert_eq!(vp.world_to_screen(p), p);
    assert_eq!(vp.screen_to_world(p), p);
}

// --- Conversions ---

#[test]
fn world_to_screen_adds_offset() {
    let vp = Viewport { offset_x: 100.0, offset_y: -50.0 };
    let s = vp.world_to_screen(Point::new(10.0, 10.0));
    assert!(point_approx_eq(s, Point::new(110.0, -40.0)));
}

#[test]
fn screen_to_world_subtracts_offset() {
    let vp = Viewport { offset_x: 100.0, offset_y: -50.0 };
    let w = vp.screen_to_world(Point::new(110.0, -40.0));
    assert!(point_approx_eq(w, Point::new(10.0, 10.0)));
}

#[test]
fn conversions_are_inverse() {
    let vp = Viewport { offset_x: 33.3, offset_y: 71.1 };
    let p = Point::new(-5.5, 800.25);
    assert!(point_approx_eq(vp.screen_to_world(vp.world_to_screen(p)), p));
}

// --- Panning ---

#[test]
fn pan_by_accumulates() {
    let mut vp = Viewport::default();
    vp.pan_by(10.0, 5.0);
    vp.pan_by(-3.0, 2.0);
    assert_eq!(vp.offset(), Point::new(7.0, 7.0));
}

#[test]
fn pan_drag_applies_half_of_movement() {
    let mut vp = Viewport::default();
    vp.pan_drag(Point::new(10.0, -20.0));
    assert_eq!(vp.offset(), Point::new(5.0, -10.0));
}

#[test]
fn scroll_without_shift_subtracts_both_axes() {
    let mut vp = Viewport::default();
    vp.scroll(WheelDelta { dx: 4.0, dy: 30.0 }, false);
    assert_eq!(vp.offset(), Point::new(-4.0, -30.0));
}

#[test]
fn scroll_with_shift_moves_horizontally_by_vertical_delta() {
    let mut vp = Viewport { offset_x: 10.0, offset_y: 10.0 };
    vp.scroll(WheelDelta { dx: 4.0, dy: 30.0 }, true);
    assert_eq!(vp.offset(), Point::new(-20.0, 10.0));
}

// --- Nudge ---

#[test]
fn nudge_moves_five_pixels_per_direction() {
    let mut vp = Viewport::default();
    vp.nudge(Direction::Up);
    assert_eq!(vp.offset(), Point::new(0.0, -5.0));
    vp.nudge(Direction::Down);
    vp.nudge(Direction::Down);
    assert_eq!(vp.offset(), Point::new(0.0, 5.0));
    vp.nudge(Direction::Left);
    assert_eq!(vp.offset(), Point::new(-5.0, 5.0));
    vp.nudge(Direction::Right);
    vp.nudge(Direction::Right);
    assert_eq!(vp.offset(), Point::new(5.0, 5.0));
}
