//! Async driver for the dashboard state machine.
//!
//! The session owns the source and the current [`DashboardState`]. Commands
//! run a transition, perform any fetch, fold the result back in and publish
//! the new [`DashboardView`] on a watch channel. Renderers subscribe to that
//! channel instead of being called from the command path.
//!
//! The state lock is never held across an await point; overlapping applies
//! are resolved by the ticket sequencing in [`DashboardState`].

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{info, warn};

use super::dashboard::{DashboardCommand, DashboardState};
use crate::api::{DashboardView, FilterOptions, FilterSelection, SortColumn};
use crate::source::UtilizationSource;

pub struct DashboardSession {
    source: Arc<dyn UtilizationSource>,
    state: Mutex<DashboardState>,
    views: watch::Sender<DashboardView>,
}

impl DashboardSession {
    pub fn new(source: Arc<dyn UtilizationSource>) -> Self {
        let state = DashboardState::new();
        let (views, _) = watch::channel(state.view());
        Self {
            source,
            state: Mutex::new(state),
            views,
        }
    }

    /// Receive every published view.
    pub fn subscribe(&self) -> watch::Receiver<DashboardView> {
        self.views.subscribe()
    }

    /// Current view without waiting for anything.
    pub fn view(&self) -> DashboardView {
        self.state.lock().view()
    }

    pub fn filter_options(&self) -> FilterOptions {
        self.state.lock().filter_options.clone()
    }

    /// Initial load: filter options, then a full fetch with empty filters.
    pub async fn start(&self) -> DashboardView {
        info!("Starting dashboard session");
        self.load_filter_options().await;
        self.apply_filters(FilterSelection::default()).await
    }

    /// Fetch systems and departments together.
    ///
    /// If either request fails both lists fall back to the `All` entry alone.
    pub async fn load_filter_options(&self) -> FilterOptions {
        let options = match tokio::try_join!(self.source.systems(), self.source.departments()) {
            Ok((systems, departments)) => {
                info!(
                    systems = systems.len(),
                    departments = departments.len(),
                    "Loaded filter options"
                );
                FilterOptions::from_names(systems, departments)
            }
            Err(err) => {
                warn!(error = %err, "Failed to load filter options, falling back to All");
                FilterOptions::all_only()
            }
        };

        let result = options.clone();
        self.transition(|state| (state.with_filter_options(options), ()));
        result
    }

    pub async fn apply_filters(&self, filters: FilterSelection) -> DashboardView {
        let ticket = self.transition(|state| state.begin_apply(filters));
        let result = self.source.utilization(&ticket.query()).await;
        self.transition(|state| (state.complete_apply(&ticket, result), ()));
        self.view()
    }

    /// Re-sort the held rows. Never fetches.
    pub fn sort_by(&self, column: SortColumn) -> DashboardView {
        self.transition(|state| (state.sort_by(column), ()));
        self.view()
    }

    pub async fn reset(&self) -> DashboardView {
        let ticket = self.transition(|state| state.begin_reset());
        let result = self.source.utilization(&ticket.query()).await;
        self.transition(|state| (state.complete_apply(&ticket, result), ()));
        self.view()
    }

    pub async fn dispatch(&self, command: DashboardCommand) -> DashboardView {
        match command {
            DashboardCommand::ApplyFilters(filters) => self.apply_filters(filters).await,
            DashboardCommand::SortBy(column) => self.sort_by(column),
            DashboardCommand::Reset => self.reset().await,
        }
    }

    /// Run a transition under the lock and publish the resulting view.
    fn transition<T, F>(&self, f: F) -> T
    where
        F: FnOnce(DashboardState) -> (DashboardState, T),
    {
        let mut guard = self.state.lock();
        let (next, out) = f(std::mem::take(&mut *guard));
        *guard = next;
        self.views.send_replace(guard.view());
        out
    }
}
