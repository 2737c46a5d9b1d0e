//! DOM mouse/keyboard event mapping into `canvas::input` types.

use canvas::camera::Point;
use canvas::input::{Button, Key, Modifiers, WheelDelta};

#[cfg(test)]
#[path = "board_input_test.rs"]
mod board_input_test;

pub fn map_modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers { shift, ctrl, alt, meta }
}

/// Map `MouseEvent.button`. Back/forward buttons act as primary.
pub fn map_button(code: i16) -> Button {
    Button::from_dom(code).unwrap_or(Button::Primary)
}

pub fn mouse_modifiers(ev: &leptos::ev::MouseEvent) -> Modifiers {
    map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key())
}

/// `movementX/Y` since the previous mouse event.
pub fn mouse_movement(ev: &leptos::ev::MouseEvent) -> Point {
    Point::new(f64::from(ev.movement_x()), f64::from(ev.movement_y()))
}

/// Pointer position in page coordinates; the board fills the page.
pub fn mouse_page_point(ev: &leptos::ev::MouseEvent) -> Point {
    Point::new(f64::from(ev.page_x()), f64::from(ev.page_y()))
}

pub fn wheel_delta(ev: &leptos::ev::WheelEvent) -> WheelDelta {
    WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() }
}

pub fn wheel_modifiers(ev: &leptos::ev::WheelEvent) -> Modifiers {
    map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key())
}

pub fn key_of(ev: &leptos::ev::KeyboardEvent) -> Key {
    Key(ev.key())
}

/// `(innerWidth, outerWidth)` of the window; their ratio tracks browser zoom.
#[cfg(feature = "csr")]
pub fn window_widths() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (1.0, 1.0);
    };
    let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.map(|v| v.as_f64().unwrap_or(1.0)).unwrap_or(1.0)
    };
    (read(window.inner_width()), read(window.outer_width()))
}

#[cfg(not(feature = "csr"))]
pub fn window_widths() -> (f64, f64) {
    (1.0, 1.0)
}
