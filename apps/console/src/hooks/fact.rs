//! Fact card hooks
//!
//! Binds the refresh lifecycle to a Dioxus signal and launches the first request on mount.

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::state::{self, FactState, StateCell};
use crate::FACT_PROVIDER;

impl StateCell for Signal<FactState> {
    fn update<R>(&mut self, f: impl FnOnce(&mut FactState) -> R) -> R {
        let mut guard = self.write();
        f(&mut *guard)
    }
}

/// Handle to the page's single fact controller.
#[derive(Clone, Copy, PartialEq)]
pub struct FactController {
    state: Signal<FactState>,
}

impl FactController {
    pub fn state(&self) -> Signal<FactState> {
        self.state
    }

    /// Starts a new request in the background. Ignored while one is outstanding.
    pub fn refresh(&self) {
        let controller = *self;
        spawn(async move {
            controller.run().await;
        });
    }

    async fn run(self) {
        let mut cell = self.state;
        state::refresh_with(FACT_PROVIDER.get(), &mut cell).await;
    }
}

pub fn use_fact_controller() -> FactController {
    let state = use_signal(FactState::initial);
    let controller = FactController { state };

    use_future(move || async move {
        // Let the first frame paint before the request goes out.
        TimeoutFuture::new(0).await;
        controller.run().await;
    });

    controller
}
