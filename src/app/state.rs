use leptos::prelude::*;

use crate::app::config::{Config, Endpoints};
use crate::app::dialog::DialogSlot;
use crate::app::layout::DetailRequests;

/// Everything the page-level listeners share. All fields are arena handles,
/// so the struct is `Copy` and moves freely into `'static` closures.
#[derive(Clone, Copy)]
pub struct AppState {
    pub config: StoredValue<Config>,
    /// The single active dialog slot.
    pub dialog: DialogSlot,
    pub detail_requests: DetailRequests,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: StoredValue::new(config),
            dialog: RwSignal::new(None),
            detail_requests: DetailRequests::new(),
        }
    }

    pub fn config(&self) -> Config {
        self.config.get_value()
    }

    pub fn endpoints(&self) -> Endpoints {
        self.config.with_value(|c| c.endpoints.clone())
    }
}
