use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, error, info, warn};

use crate::services::fact::{FactProvider, FactResult};

pub const REVEAL_LABEL: &str = "Reveal New Fact";
pub const SUMMONING_LABEL: &str = "Summoning a Fact...";

/// Session state behind the fact card.
///
/// `fact` and `error` are never both set. `is_loading` starts out true because the
/// first request is launched as soon as the page mounts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactState {
    pub fact: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
    in_flight: bool,
}

impl Default for FactState {
    fn default() -> Self {
        Self::initial()
    }
}

/// What the content area renders for a given state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentView {
    Spinner,
    Fact(String),
    Error(String),
}

impl FactState {
    pub fn initial() -> Self {
        Self {
            fact: None,
            is_loading: true,
            error: None,
            in_flight: false,
        }
    }

    /// Marks a request as started. Returns `false` and leaves the state alone when
    /// one is already outstanding.
    pub fn begin_refresh(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        self.is_loading = true;
        self.error = None;
        true
    }

    /// Applies the outcome of the outstanding request in one step.
    pub fn settle(&mut self, outcome: FactResult<String>) {
        match outcome {
            Ok(fact) => {
                self.fact = Some(fact);
                self.error = None;
            }
            Err(err) => {
                self.fact = None;
                self.error = Some(err.to_string());
            }
        }
        self.is_loading = false;
        self.in_flight = false;
    }

    /// True only while the very first request is pending and nothing else can be shown.
    pub fn is_card_loading(&self) -> bool {
        self.is_loading && self.fact.is_none() && self.error.is_none()
    }

    /// Spinner whenever there is neither a fact nor an error to show.
    pub fn view(&self) -> ContentView {
        if self.is_card_loading() {
            ContentView::Spinner
        } else if let Some(error) = self.error.as_ref() {
            ContentView::Error(error.clone())
        } else if let Some(fact) = self.fact.as_ref() {
            ContentView::Fact(fact.clone())
        } else {
            ContentView::Spinner
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_loading {
            SUMMONING_LABEL
        } else {
            REVEAL_LABEL
        }
    }
}

/// Mutable holder of a [`FactState`] that the refresh logic writes through.
pub trait StateCell {
    fn update<R>(&mut self, f: impl FnOnce(&mut FactState) -> R) -> R;
}

impl StateCell for FactState {
    fn update<R>(&mut self, f: impl FnOnce(&mut FactState) -> R) -> R {
        f(self)
    }
}

impl StateCell for Rc<RefCell<FactState>> {
    fn update<R>(&mut self, f: impl FnOnce(&mut FactState) -> R) -> R {
        f(&mut *self.borrow_mut())
    }
}

/// Requests one fact and writes the outcome into `cell`.
///
/// Calls made while another request is outstanding are dropped. Each write is a
/// single `update`, so observers never see a half-applied settlement.
pub async fn refresh<P, C>(provider: &P, cell: &mut C)
where
    P: FactProvider + ?Sized,
    C: StateCell,
{
    if !cell.update(FactState::begin_refresh) {
        debug!("refresh ignored: a fact request is already in flight");
        return;
    }

    debug!("requesting a new fact");
    let outcome = provider.get_fact().await;

    match &outcome {
        Ok(fact) => info!(chars = fact.chars().count(), "fact received"),
        Err(err) => warn!(error = %err, "fact request failed"),
    }

    cell.update(|state| state.settle(outcome));
}

/// Like [`refresh`], but a missing provider is only logged. Startup refuses to
/// render without one, so the state is left untouched.
pub async fn refresh_with<P, C>(provider: Option<&P>, cell: &mut C)
where
    P: FactProvider + ?Sized,
    C: StateCell,
{
    match provider {
        Some(provider) => refresh(provider, cell).await,
        None => error!("fact provider missing at refresh time; refresh skipped"),
    }
}
