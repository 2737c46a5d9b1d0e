//! Root application component and context providers.

use canvas::engine::EngineCore;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::position_controller::PositionController;
use crate::components::whiteboard::Whiteboard;

/// Root application component.
///
/// Provides the board engine as context and restores persisted cards before
/// the first render.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let engine = RwSignal::new(EngineCore::new());
    provide_context(engine);

    #[cfg(feature = "csr")]
    crate::state::persistence::install(engine);

    view! {
        <Title text="markboard"/>
        <main class="markboard">
            <Whiteboard/>
            <PositionController/>
        </main>
    }
}
