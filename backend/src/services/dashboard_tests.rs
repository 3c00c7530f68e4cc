use super::*;
use crate::api::SortDirection;
use crate::services::presentation::{BLANK_CARD, FAILURE_PLACEHOLDER};
use crate::source::SourceError;
use chrono::NaiveDate;
use serde_json::json;

fn records(values: Vec<serde_json::Value>) -> Vec<RawRecord> {
    values.into_iter().map(RawRecord::new).collect()
}

fn scenario_a() -> Vec<RawRecord> {
    records(vec![
        json!({"usage_date": "2024-01-02", "utilization_pct": 50, "system_name": "s1", "department_name": "d1"}),
        json!({"usage_date": "2024-01-01", "utilization_pct": 80, "system_name": "s2", "department_name": "d1"}),
    ])
}

fn ready_with(records: Vec<RawRecord>) -> DashboardState {
    let (state, ticket) = DashboardState::new().begin_apply(FilterSelection::default());
    state.complete_apply(&ticket, Ok(records))
}

fn table_dates(state: &DashboardState) -> Vec<String> {
    match &state.table {
        TableView::Rows { rows } => rows.iter().map(|r| r.usage_date.clone()).collect(),
        TableView::Placeholder { .. } => panic!("expected rows"),
    }
}

#[test]
fn test_initial_state_is_idle() {
    let state = DashboardState::new();
    assert_eq!(state.phase, DashboardPhase::Idle);
    assert_eq!(state.sort, SortState::default());
    assert_eq!(state.latest_seq(), 0);
    let view = state.view();
    assert_eq!(view.cards.total, BLANK_CARD);
    assert_eq!(view.filter_options, FilterOptions::all_only());
}

#[test]
fn test_begin_apply_enters_loading() {
    let filters = FilterSelection {
        system: Some("  ".into()),
        department: Some("physics".into()),
        ..Default::default()
    };
    let (state, ticket) = DashboardState::new().begin_apply(filters);
    assert_eq!(state.phase, DashboardPhase::Loading);
    assert_eq!(ticket.seq, 1);
    assert_eq!(ticket.filters.system, None);
    assert_eq!(
        ticket.query(),
        UtilizationQuery::new(None, Some("physics".into()))
    );
}

#[test]
fn test_scenario_a_sort_and_chart() {
    let state = ready_with(scenario_a());
    assert_eq!(state.phase, DashboardPhase::Ready);
    assert_eq!(table_dates(&state), vec!["2024-01-01", "2024-01-02"]);
    assert_eq!(state.chart.labels, vec!["2024-01-01", "2024-01-02"]);

    // Table follows the user sort, chart stays chronological.
    let state = state.sort_by(SortColumn::UsageDate);
    assert_eq!(state.sort.direction, SortDirection::Desc);
    assert_eq!(table_dates(&state), vec!["2024-01-02", "2024-01-01"]);
    assert_eq!(state.chart.labels, vec!["2024-01-01", "2024-01-02"]);

    let state = state.sort_by(SortColumn::UtilizationPct);
    assert_eq!(state.sort, SortState::new(SortColumn::UtilizationPct, SortDirection::Asc));
    assert_eq!(table_dates(&state), vec!["2024-01-02", "2024-01-01"]);
    assert_eq!(state.chart.values, vec![Some(80.0), Some(50.0)]);
}

#[test]
fn test_scenario_b_summary() {
    let state = ready_with(records(vec![
        json!({"usage_date": "2024-01-01", "utilization_pct": 10}),
        json!({"usage_date": "2024-01-02", "utilization_pct": "bad"}),
        json!({"usage_date": "2024-01-03", "utilization_pct": 30}),
    ]));
    let summary = state.summary.unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.avg, 13.33);
    assert_eq!(summary.max, 30.0);
    assert_eq!(summary.min, 10.0);
}

#[test]
fn test_scenario_c_date_filter() {
    let day = NaiveDate::from_ymd_opt(2024, 1, 2);
    let filters = FilterSelection {
        from: day,
        to: day,
        ..Default::default()
    };
    let (state, ticket) = DashboardState::new().begin_apply(filters);
    let state = state.complete_apply(&ticket, Ok(scenario_a()));
    assert_eq!(table_dates(&state), vec!["2024-01-02"]);
    assert_eq!(state.summary.unwrap().total, 1);
}

#[test]
fn test_scenario_d_empty_result_is_success() {
    let state = ready_with(Vec::new());
    assert_eq!(state.phase, DashboardPhase::Ready);
    assert_eq!(state.summary, Some(Summary::default()));
    assert_eq!(table_dates(&state), Vec::<String>::new());
    let cards = state.view().cards;
    assert_eq!(cards.total, "0");
    assert_eq!(cards.avg, "0%");
    assert_eq!(cards.max, "0%");
    assert_eq!(cards.min, "0%");
}

#[test]
fn test_undated_rows_are_dropped_everywhere() {
    let state = ready_with(records(vec![
        json!({"usage_date": "2024-01-01", "utilization_pct": 10}),
        json!({"utilization_pct": 99}),
    ]));
    assert_eq!(state.rows.len(), 1);
    assert_eq!(state.summary.unwrap().total, 1);
    assert_eq!(state.summary.unwrap().max, 10.0);
    assert_eq!(state.chart.len(), 1);
}

#[test]
fn test_failure_blanks_summary_keeps_chart() {
    let state = ready_with(scenario_a());
    let previous_chart = state.chart.clone();

    let (state, ticket) = state.begin_apply(FilterSelection::default());
    let state = state.complete_apply(&ticket, Err(SourceError::status(500, "boom")));

    assert_eq!(state.phase, DashboardPhase::Failed);
    assert_eq!(state.summary, None);
    assert_eq!(
        state.table,
        TableView::Placeholder {
            message: FAILURE_PLACEHOLDER.to_string()
        }
    );
    assert_eq!(state.chart, previous_chart);
    assert!(state.error.as_deref().unwrap().contains("500"));
    assert_eq!(state.view().cards.avg, BLANK_CARD);
}

#[test]
fn test_recovers_after_failure() {
    let (state, ticket) = DashboardState::new().begin_apply(FilterSelection::default());
    let state = state.complete_apply(&ticket, Err(SourceError::connection("refused")));
    assert_eq!(state.phase, DashboardPhase::Failed);

    let (state, ticket) = state.begin_apply(FilterSelection::default());
    let state = state.complete_apply(&ticket, Ok(scenario_a()));
    assert_eq!(state.phase, DashboardPhase::Ready);
    assert!(state.error.is_none());
}

#[test]
fn test_stale_result_is_discarded() {
    let (state, old_ticket) = DashboardState::new().begin_apply(FilterSelection::default());
    let (state, new_ticket) = state.begin_apply(FilterSelection {
        system: Some("s2".into()),
        ..Default::default()
    });

    let newer = records(vec![json!({"usage_date": "2024-02-01", "system_name": "s2"})]);
    let state = state.complete_apply(&new_ticket, Ok(newer));
    let state = state.complete_apply(&old_ticket, Ok(scenario_a()));

    assert_eq!(state.phase, DashboardPhase::Ready);
    assert_eq!(table_dates(&state), vec!["2024-02-01"]);
    assert_eq!(state.filters.system.as_deref(), Some("s2"));
}

#[test]
fn test_stale_failure_is_discarded() {
    let (state, old_ticket) = DashboardState::new().begin_apply(FilterSelection::default());
    let (state, new_ticket) = state.begin_apply(FilterSelection::default());
    let state = state.complete_apply(&new_ticket, Ok(scenario_a()));
    let state = state.complete_apply(&old_ticket, Err(SourceError::connection("late")));
    assert_eq!(state.phase, DashboardPhase::Ready);
    assert!(state.summary.is_some());
}

#[test]
fn test_sort_while_loading_applies_on_completion() {
    let (state, ticket) = DashboardState::new().begin_apply(FilterSelection::default());
    let state = state.sort_by(SortColumn::UtilizationPct).sort_by(SortColumn::UtilizationPct);
    assert_eq!(state.phase, DashboardPhase::Loading);
    let state = state.complete_apply(&ticket, Ok(scenario_a()));
    // Descending utilization: 80 then 50.
    assert_eq!(table_dates(&state), vec!["2024-01-01", "2024-01-02"]);
    assert_eq!(state.sort.direction, SortDirection::Desc);
}

#[test]
fn test_sort_toggle_and_reset_direction() {
    let state = ready_with(scenario_a());
    let state = state.sort_by(SortColumn::SystemName);
    assert_eq!(state.sort.direction, SortDirection::Asc);
    let state = state.sort_by(SortColumn::SystemName);
    assert_eq!(state.sort.direction, SortDirection::Desc);
    let state = state.sort_by(SortColumn::DepartmentName);
    assert_eq!(state.sort, SortState::new(SortColumn::DepartmentName, SortDirection::Asc));

    let headers = state.view().headers;
    let active: Vec<_> = headers.iter().filter(|h| h.indicator.is_some()).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].column, SortColumn::DepartmentName);
}

#[test]
fn test_reset_clears_filters() {
    let filters = FilterSelection {
        system: Some("s1".into()),
        department: Some("d1".into()),
        from: NaiveDate::from_ymd_opt(2024, 1, 1),
        to: NaiveDate::from_ymd_opt(2024, 1, 31),
    };
    let (state, ticket) = DashboardState::new().begin_apply(filters);
    let state = state.complete_apply(&ticket, Ok(scenario_a()));

    let (state, ticket) = state.begin_reset();
    assert_eq!(state.filters, FilterSelection::default());
    assert_eq!(ticket.filters, FilterSelection::default());
    assert_eq!(ticket.seq, 2);
    assert_eq!(state.phase, DashboardPhase::Loading);
}

#[test]
fn test_unparsable_timestamps_are_reported() {
    let state = ready_with(records(vec![
        json!({"usage_date": "2024-01-01"}),
        json!({"usage_date": "someday"}),
    ]));
    assert_eq!(state.unparsable_timestamps, 1);
    // Epoch placement puts the malformed row first in the chart.
    assert_eq!(state.chart.labels[0], "someday");
}
