//! Dashboard state machine.
//!
//! The dashboard moves `Idle → Loading → (Ready | Failed)` and cycles for as
//! long as the user keeps issuing commands. Every transition takes the state
//! by value and returns the next state; fetching is left to the caller, which
//! hands the result back through [`DashboardState::complete_apply`].
//!
//! Each apply/reset issues a [`FetchTicket`]. Only the completion carrying the
//! most recent ticket is applied, so a slow response can never overwrite the
//! result of a newer request.

use tracing::{debug, info, warn};

use crate::api::{
    ChartSeries, DashboardPhase, DashboardView, FilterOptions, FilterSelection, SortColumn,
    SortState, Summary, TableView,
};
use crate::models::{RawRecord, UtilizationRow};
use crate::services::presentation::{
    chart_series, column_headers, failure_table, summary_cards, table_view,
};
use crate::services::summary::compute_summary;
use crate::source::{SourceResult, UtilizationQuery};
use crate::transformations::{count_unparsable, filter_by_date_range, normalize_records, sort_rows};

/// User-level commands understood by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardCommand {
    ApplyFilters(FilterSelection),
    SortBy(SortColumn),
    Reset,
}

/// Handle for one in-flight fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub filters: FilterSelection,
}

impl FetchTicket {
    /// Server-side part of the filters.
    pub fn query(&self) -> UtilizationQuery {
        UtilizationQuery::new(self.filters.system.clone(), self.filters.department.clone())
    }
}

/// Complete dashboard state.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub phase: DashboardPhase,
    pub filters: FilterSelection,
    pub filter_options: FilterOptions,
    pub sort: SortState,
    /// Filtered rows in fetch order.
    pub rows: Vec<UtilizationRow>,
    /// `rows` under the current sort.
    pub sorted_rows: Vec<UtilizationRow>,
    pub summary: Option<Summary>,
    pub chart: ChartSeries,
    pub table: TableView,
    pub unparsable_timestamps: usize,
    pub error: Option<String>,
    latest_seq: u64,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence number of the most recently issued ticket.
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn with_filter_options(mut self, options: FilterOptions) -> Self {
        self.filter_options = options;
        self
    }

    /// Enter `Loading` for `filters` and issue the ticket for the fetch.
    pub fn begin_apply(mut self, filters: FilterSelection) -> (Self, FetchTicket) {
        self.latest_seq += 1;
        self.filters = filters.cleaned();
        self.phase = DashboardPhase::Loading;
        let ticket = FetchTicket {
            seq: self.latest_seq,
            filters: self.filters.clone(),
        };
        debug!(seq = ticket.seq, filters = ?ticket.filters, "Applying filters");
        (self, ticket)
    }

    /// Clear every filter and date bound, then start a fresh cycle.
    pub fn begin_reset(self) -> (Self, FetchTicket) {
        self.begin_apply(FilterSelection::default())
    }

    /// Fold a fetch result into the state.
    ///
    /// Success runs normalize → filter → sort → aggregate → present and ends
    /// in `Ready`. Failure ends in `Failed` with the summary blanked and the
    /// table replaced by a placeholder; the chart keeps its previous series.
    pub fn complete_apply(
        mut self,
        ticket: &FetchTicket,
        result: SourceResult<Vec<RawRecord>>,
    ) -> Self {
        if ticket.seq != self.latest_seq {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "Discarding stale fetch result"
            );
            return self;
        }

        match result {
            Ok(records) => {
                let normalized = normalize_records(&records);
                let rows = filter_by_date_range(&normalized, ticket.filters.from, ticket.filters.to);
                let sorted_rows = sort_rows(&rows, self.sort);

                self.summary = Some(compute_summary(&sorted_rows));
                self.chart = chart_series(&sorted_rows);
                self.table = table_view(&sorted_rows);
                self.unparsable_timestamps = count_unparsable(&rows);
                self.rows = rows;
                self.sorted_rows = sorted_rows;
                self.error = None;
                self.phase = DashboardPhase::Ready;
                info!(
                    fetched = records.len(),
                    displayed = self.rows.len(),
                    "Utilization data refreshed"
                );
            }
            Err(err) => {
                warn!(error = %err, "Utilization fetch failed");
                self.rows.clear();
                self.sorted_rows.clear();
                self.summary = None;
                self.table = failure_table();
                self.unparsable_timestamps = 0;
                self.error = Some(err.to_string());
                self.phase = DashboardPhase::Failed;
            }
        }
        self
    }

    /// Header click on `column`.
    ///
    /// The sort state always toggles; the held rows are re-sorted and
    /// re-presented only when the dashboard is `Ready`. No fetch happens.
    pub fn sort_by(mut self, column: SortColumn) -> Self {
        self.sort = self.sort.toggled(column);
        if self.phase == DashboardPhase::Ready {
            self.sorted_rows = sort_rows(&self.rows, self.sort);
            self.chart = chart_series(&self.sorted_rows);
            self.table = table_view(&self.sorted_rows);
        }
        debug!(column = %self.sort.column, direction = ?self.sort.direction, "Sort changed");
        self
    }

    /// Project the state into what the front-end renders.
    pub fn view(&self) -> DashboardView {
        DashboardView {
            phase: self.phase,
            filters: self.filters.clone(),
            filter_options: self.filter_options.clone(),
            sort: self.sort,
            headers: column_headers(self.sort),
            summary: self.summary,
            cards: summary_cards(self.summary.as_ref()),
            chart: self.chart.clone(),
            table: self.table.clone(),
            unparsable_timestamps: self.unparsable_timestamps,
            error: self.error.clone(),
        }
    }
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod dashboard_tests;
