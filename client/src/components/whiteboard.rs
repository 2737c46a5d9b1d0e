//! The pannable board surface and its world layer.
//!
//! SYSTEM CONTEXT
//! ==============
//! The board element receives every mouse gesture that card elements let
//! bubble (moves, releases) plus presses on empty space. Cards are laid out
//! inside a world layer translated by the viewport offset.

use canvas::engine::EngineCore;
use canvas::input::Target;
use leptos::prelude::*;

use crate::components::card::{AiCardView, CardView};
use crate::state::board::dispatch;
use crate::util::board_input::{
    map_button, mouse_modifiers, mouse_movement, mouse_page_point, wheel_delta, wheel_modifiers, window_widths,
};
use crate::util::layout::world_style;

#[component]
pub fn Whiteboard() -> impl IntoView {
    let engine = expect_context::<RwSignal<EngineCore>>();

    let on_mouse_down = move |ev: leptos::ev::MouseEvent| {
        let button = map_button(ev.button());
        let modifiers = mouse_modifiers(&ev);
        dispatch(engine, move |e| e.on_pointer_down(&Target::Board, button, modifiers));
    };

    let on_mouse_move = move |ev: leptos::ev::MouseEvent| {
        if engine.with_untracked(|e| e.input.is_idle()) {
            return;
        }
        let movement = mouse_movement(&ev);
        let modifiers = mouse_modifiers(&ev);
        let (inner, outer) = window_widths();
        dispatch(engine, move |e| {
            e.set_window_widths(inner, outer);
            e.on_pointer_move(movement, modifiers)
        });
    };

    let on_mouse_up = move |ev: leptos::ev::MouseEvent| {
        let button = map_button(ev.button());
        let modifiers = mouse_modifiers(&ev);
        dispatch(engine, move |e| e.on_pointer_up(button, modifiers));
    };

    let on_wheel = move |ev: leptos::ev::WheelEvent| {
        let delta = wheel_delta(&ev);
        let modifiers = wheel_modifiers(&ev);
        dispatch(engine, move |e| e.on_wheel(delta, modifiers));
    };

    // Secondary-button drag pans the board, so the browser menu stays closed.
    let on_context_menu = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
    };

    let on_double_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        let point = mouse_page_point(&ev);
        dispatch(engine, move |e| e.on_double_click(&Target::Board, point));
    };

    let card_ids = move || engine.with(|e| e.store.cards().iter().map(|c| c.id.clone()).collect::<Vec<_>>());
    let ai_card_ids = move || engine.with(|e| e.store.ai_cards().iter().map(|c| c.id.clone()).collect::<Vec<_>>());

    view! {
        <div
            class="whiteboard"
            on:mousedown=on_mouse_down
            on:mousemove=on_mouse_move
            on:mouseup=on_mouse_up
            on:wheel=on_wheel
            on:contextmenu=on_context_menu
            on:dblclick=on_double_click
        >
            <div class="whiteboard__world" style=move || world_style(engine.with(EngineCore::viewport))>
                <For each=card_ids key=|id| id.clone() children=move |id| view! { <CardView id=id/> }/>
                <For each=ai_card_ids key=|id| id.clone() children=move |id| view! { <AiCardView id=id/> }/>
            </div>
        </div>
    }
}
