//! Card components: the shared frame plus static and AI card bodies.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every card element reports presses to the engine with its own `Target`
//! and stops propagation; the engine replays the bubbling to the board
//! itself. Moves and releases are left to bubble up to the whiteboard.

use canvas::camera::Point;
use canvas::doc::{AiStatus, CardId};
use canvas::engine::EngineCore;
use canvas::input::Target;
use leptos::prelude::*;

use crate::state::board::dispatch;
use crate::util::board_input::{key_of, map_button, mouse_modifiers};
use crate::util::layout::card_style;
use crate::util::markdown::render_markdown_html;

fn geometry(engine: &EngineCore, id: &str) -> Option<(Point, f64)> {
    if let Some(card) = engine.store.card(id) {
        return Some((card.position, card.width));
    }
    engine.store.ai_card(id).map(|card| (card.position, card.width))
}

/// Positioned frame with the drag strip, resize handle, context menu and
/// the editor area that hosts `children`.
#[component]
fn CardFrame(id: CardId, #[prop(optional)] ai: bool, children: Children) -> impl IntoView {
    let engine = expect_context::<RwSignal<EngineCore>>();

    let style = {
        let id = id.clone();
        move || {
            engine
                .with(|e| geometry(e, &id))
                .map(|(position, width)| card_style(position, width))
                .unwrap_or_default()
        }
    };
    let dragging = {
        let id = id.clone();
        move || engine.with(|e| e.selection() == Some(id.as_str()))
    };

    let on_mouse_down = {
        let id = id.clone();
        move |ev: leptos::ev::MouseEvent| {
            ev.stop_propagation();
            let target = Target::Card(id.clone());
            let button = map_button(ev.button());
            let modifiers = mouse_modifiers(&ev);
            dispatch(engine, move |e| e.on_pointer_down(&target, button, modifiers));
        }
    };
    let on_context_menu = {
        let id = id.clone();
        move |ev: leptos::ev::MouseEvent| {
            ev.prevent_default();
            ev.stop_propagation();
            let target = Target::Card(id.clone());
            dispatch(engine, move |e| e.on_context_menu(&target));
        }
    };
    let on_key_down = {
        let id = id.clone();
        move |ev: leptos::ev::KeyboardEvent| {
            let target = Target::Card(id.clone());
            let key = key_of(&ev);
            dispatch(engine, move |e| e.on_key_down(&target, &key));
        }
    };
    let on_double_click = move |ev: leptos::ev::MouseEvent| ev.stop_propagation();

    let resize_handle = (!ai).then(|| {
        let id = id.clone();
        let on_resize_down = move |ev: leptos::ev::MouseEvent| {
            ev.stop_propagation();
            let target = Target::ResizeHandle(id.clone());
            let button = map_button(ev.button());
            let modifiers = mouse_modifiers(&ev);
            dispatch(engine, move |e| e.on_pointer_down(&target, button, modifiers));
        };
        view! { <div class="card__resize" on:mousedown=on_resize_down></div> }
    });

    let menu = {
        let id = id.clone();
        move || {
            let open = engine.with(|e| e.ui.menu_card_id.as_deref() == Some(id.as_str()));
            open.then(|| view! { <CardMenu id=id.clone() ai=ai/> })
        }
    };

    let on_editor_mouse_down = {
        let id = id.clone();
        move |ev: leptos::ev::MouseEvent| {
            ev.stop_propagation();
            let target = Target::CardEditor(id.clone());
            let button = map_button(ev.button());
            let modifiers = mouse_modifiers(&ev);
            dispatch(engine, move |e| e.on_pointer_down(&target, button, modifiers));
        }
    };
    // Keys typed into the editor never reach the frame's Delete handler.
    let on_editor_key_down = move |ev: leptos::ev::KeyboardEvent| ev.stop_propagation();
    let on_editor_context_menu = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
    };

    view! {
        <div
            class="card"
            class:card--ai=ai
            class:card--dragging=dragging
            tabindex="0"
            style=style
            on:mousedown=on_mouse_down
            on:contextmenu=on_context_menu
            on:keydown=on_key_down
            on:dblclick=on_double_click
        >
            {resize_handle}
            <div class="card__header"></div>
            {menu}
            <div
                class="card__body"
                on:mousedown=on_editor_mouse_down
                on:keydown=on_editor_key_down
                on:contextmenu=on_editor_context_menu
            >
                {children()}
            </div>
        </div>
    }
}

/// Context menu with "Ask AI" and "Delete".
#[component]
fn CardMenu(id: CardId, ai: bool) -> impl IntoView {
    let engine = expect_context::<RwSignal<EngineCore>>();

    let on_mouse_down = {
        let id = id.clone();
        move |ev: leptos::ev::MouseEvent| {
            ev.stop_propagation();
            let target = Target::Menu(id.clone());
            let button = map_button(ev.button());
            let modifiers = mouse_modifiers(&ev);
            dispatch(engine, move |e| e.on_pointer_down(&target, button, modifiers));
        }
    };
    let ask_id = id.clone();
    let on_ask_ai = move |_| dispatch(engine, |e| e.ask_ai(&ask_id));
    let on_delete = move |_| dispatch(engine, |e| e.delete_card(&id));

    view! {
        <div class="card__menu" on:mousedown=on_mouse_down on:click=|ev: leptos::ev::MouseEvent| ev.stop_propagation()>
            <button class="card__menu-item" on:click=on_ask_ai disabled=ai>"Ask AI"</button>
            <button class="card__menu-item" on:click=on_delete>"Delete"</button>
        </div>
    }
}

/// A user-authored card: rendered markdown that turns into a text editor
/// when clicked.
#[component]
pub fn CardView(id: CardId) -> impl IntoView {
    let engine = expect_context::<RwSignal<EngineCore>>();
    let editing = RwSignal::new(false);
    let editor_ref = NodeRef::<leptos::html::Textarea>::new();

    let text = {
        let id = id.clone();
        Memo::new(move |_| {
            engine.with(|e| e.store.card(&id).map(|c| c.text.clone()).unwrap_or_default())
        })
    };

    #[cfg(feature = "csr")]
    Effect::new(move || {
        if editing.get() {
            if let Some(el) = editor_ref.get() {
                let _ = el.focus();
            }
        }
    });

    let on_input = {
        let id = id.clone();
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            let id = id.clone();
            dispatch(engine, move |e| e.set_text(&id, value));
        }
    };

    let body = move || {
        if editing.get() {
            view! {
                <textarea
                    class="card__editor"
                    node_ref=editor_ref
                    prop:value=move || text.get()
                    on:input=on_input.clone()
                    on:blur=move |_| editing.set(false)
                ></textarea>
            }
            .into_any()
        } else {
            view! {
                <div
                    class="card__markdown markdown-body"
                    inner_html=move || render_markdown_html(&text.get())
                    on:click=move |_| editing.set(true)
                ></div>
            }
            .into_any()
        }
    };

    view! { <CardFrame id=id>{body}</CardFrame> }
}

/// An AI card: the streamed response rendered live, with its request status.
#[component]
pub fn AiCardView(id: CardId) -> impl IntoView {
    let engine = expect_context::<RwSignal<EngineCore>>();

    let snapshot = {
        let id = id.clone();
        move || engine.with(|e| e.store.ai_card(&id).map(|c| (c.text.clone(), c.status.clone())))
    };

    let body = move || {
        snapshot().map(|(text, status)| {
            let rendered = render_markdown_html(&text);
            let status_line = match status {
                AiStatus::Pending => Some(("card__status", "Thinking...".to_owned())),
                AiStatus::Streaming => None,
                AiStatus::Failed(message) => Some(("card__status card__status--error", message)),
            };
            view! {
                <div class="card__markdown markdown-body" inner_html=rendered></div>
                {status_line.map(|(class, message)| view! { <p class=class>{message}</p> })}
            }
        })
    };

    view! { <CardFrame id=id ai=true>{body}</CardFrame> }
}
