//! Arrow pad that pans the board in fixed steps.

use canvas::camera::Direction;
use canvas::engine::EngineCore;
use leptos::prelude::*;

use crate::state::board::dispatch;

#[component]
pub fn PositionController() -> impl IntoView {
    let engine = expect_context::<RwSignal<EngineCore>>();
    let nudge = move |direction: Direction| move |_: leptos::ev::MouseEvent| dispatch(engine, move |e| e.nudge(direction));

    view! {
        <nav class="position-controller" aria-label="Pan board">
            <button class="position-controller__up" title="Pan up" on:click=nudge(Direction::Up)>"↑"</button>
            <button class="position-controller__left" title="Pan left" on:click=nudge(Direction::Left)>"←"</button>
            <button class="position-controller__right" title="Pan right" on:click=nudge(Direction::Right)>"→"</button>
            <button class="position-controller__down" title="Pan down" on:click=nudge(Direction::Down)>"↓"</button>
        </nav>
    }
}
