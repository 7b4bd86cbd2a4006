use leptos::prelude::*;

mod actions;
mod api;
mod config;
mod dialog;
mod drag_drop;
mod error;
mod folder_tree;
mod layout;
mod router;
mod selection;
mod state;
mod types;
mod utils;

use config::Config;
use dialog::DestinationPicker;
use state::AppState;

/// Mounted once on `<body>`. The page itself is server rendered; this only
/// installs the delegated listeners and hosts the destination dialog.
#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new(Config::load());

    Effect::new(move |_| {
        router::install(state);
        drag_drop::setup_drag_drop(state);
        layout::init_folder_panels(state);
        web_sys::console::log_1(&"[App] listeners installed".into());
    });

    view! { <DestinationPicker state=state /> }
}
