//! Presentation adapters.
//!
//! Pure projections from rows and summary into the shapes the front-end
//! draws: chart series, table rows, summary cards and column headers.

use std::fmt::Write as _;

use crate::api::{
    ChartSeries, ChartTooltip, ColumnHeader, SortColumn, SortState, Summary, SummaryCards,
    TableRow, TableView,
};
use crate::models::UtilizationRow;
use crate::transformations::sort_chronologically;

/// Text shown on a summary card while it is blanked.
pub const BLANK_CARD: &str = "-";

/// Placeholder shown in the table after a failed fetch.
pub const FAILURE_PLACEHOLDER: &str = "Failed to load utilization data";

/// Build the chart series from the currently sorted rows.
///
/// The rows are re-sorted chronologically first, so the series always runs
/// left to right in time whatever column the table is sorted by.
pub fn chart_series(sorted_rows: &[UtilizationRow]) -> ChartSeries {
    let ordered = sort_chronologically(sorted_rows);

    let mut series = ChartSeries {
        labels: Vec::with_capacity(ordered.len()),
        values: Vec::with_capacity(ordered.len()),
        tooltips: Vec::with_capacity(ordered.len()),
    };
    for row in &ordered {
        series.labels.push(row.timestamp_label());
        series.values.push(row.utilization_pct.value());
        series.tooltips.push(ChartTooltip {
            usage_pct: row.utilization_pct.display(),
            system_name: row.system_name.clone(),
            department_name: row.department_name.clone(),
        });
    }
    series
}

/// One table row per record, in the given order.
pub fn table_rows(sorted_rows: &[UtilizationRow]) -> Vec<TableRow> {
    sorted_rows
        .iter()
        .map(|row| TableRow {
            usage_date: row.usage_date.clone(),
            usage_time: row.usage_time.clone(),
            system_name: row.system_name.clone(),
            department_name: row.department_name.clone(),
            utilization_pct: row.utilization_pct.display(),
        })
        .collect()
}

pub fn table_view(sorted_rows: &[UtilizationRow]) -> TableView {
    TableView::Rows {
        rows: table_rows(sorted_rows),
    }
}

pub fn failure_table() -> TableView {
    TableView::Placeholder {
        message: FAILURE_PLACEHOLDER.to_string(),
    }
}

/// Card strings; `None` blanks every card.
pub fn summary_cards(summary: Option<&Summary>) -> SummaryCards {
    match summary {
        Some(s) => SummaryCards {
            total: s.total.to_string(),
            avg: format!("{}%", s.avg),
            max: format!("{}%", s.max),
            min: format!("{}%", s.min),
            systems_count: s.systems_count.to_string(),
            depts_count: s.depts_count.to_string(),
        },
        None => SummaryCards {
            total: BLANK_CARD.to_string(),
            avg: BLANK_CARD.to_string(),
            max: BLANK_CARD.to_string(),
            min: BLANK_CARD.to_string(),
            systems_count: BLANK_CARD.to_string(),
            depts_count: BLANK_CARD.to_string(),
        },
    }
}

/// The five headers, with an arrow on the active sort column only.
pub fn column_headers(sort: SortState) -> Vec<ColumnHeader> {
    SortColumn::ALL
        .iter()
        .map(|&column| ColumnHeader {
            column,
            label: column.label().to_string(),
            indicator: sort.indicator(column),
        })
        .collect()
}

/// Escape text for inclusion in HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the table body as `<tr>` rows with every field escaped.
pub fn render_table_html(table: &TableView) -> String {
    let mut html = String::new();
    match table {
        TableView::Rows { rows } => {
            for row in rows {
                html.push_str("<tr>");
                for cell in [
                    &row.usage_date,
                    &row.usage_time,
                    &row.system_name,
                    &row.department_name,
                    &row.utilization_pct,
                ] {
                    let _ = write!(html, "<td>{}</td>", escape_html(cell));
                }
                html.push_str("</tr>\n");
            }
        }
        TableView::Placeholder { message } => {
            let _ = writeln!(
                html,
                "<tr><td colspan=\"{}\">{}</td></tr>",
                SortColumn::ALL.len(),
                escape_html(message)
            );
        }
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SortDirection;
    use crate::models::Utilization;
    use crate::transformations::sort_rows;

    fn row(date: &str, time: &str, pct: Utilization) -> UtilizationRow {
        UtilizationRow {
            usage_date: date.to_string(),
            usage_time: time.to_string(),
            utilization_pct: pct,
            system_name: "sys".to_string(),
            department_name: "dept".to_string(),
        }
    }

    #[test]
    fn test_chart_is_chronological_for_any_table_sort() {
        let rows = vec![
            row("2024-01-02", "", Utilization::Valid(50.0)),
            row("2024-01-01", "", Utilization::Valid(80.0)),
        ];
        for column in SortColumn::ALL {
            for direction in [SortDirection::Asc, SortDirection::Desc] {
                let sorted = sort_rows(&rows, SortState::new(column, direction));
                let chart = chart_series(&sorted);
                assert_eq!(chart.labels, vec!["2024-01-01", "2024-01-02"]);
                assert_eq!(chart.values, vec![Some(80.0), Some(50.0)]);
            }
        }
    }

    #[test]
    fn test_chart_series_is_parallel() {
        let rows = vec![
            row("2024-01-01", "10:00", Utilization::Valid(1.0)),
            row("2024-01-01", "09:00", Utilization::Invalid("n/a".into())),
        ];
        let chart = chart_series(&rows);
        assert_eq!(chart.len(), 2);
        assert_eq!(chart.labels, vec!["2024-01-01 09:00", "2024-01-01 10:00"]);
        assert_eq!(chart.values, vec![None, Some(1.0)]);
        assert_eq!(chart.tooltips[0].usage_pct, "n/a");
        assert_eq!(chart.tooltips[1].system_name, "sys");
        assert_eq!(chart.tooltips[1].department_name, "dept");
    }

    #[test]
    fn test_table_keeps_given_order() {
        let rows = vec![
            row("2024-01-02", "", Utilization::Valid(50.0)),
            row("2024-01-01", "", Utilization::Valid(80.0)),
        ];
        let table = table_rows(&rows);
        assert_eq!(table[0].usage_date, "2024-01-02");
        assert_eq!(table[0].utilization_pct, "50");
        assert_eq!(table[1].usage_date, "2024-01-01");
    }

    #[test]
    fn test_summary_cards() {
        let summary = Summary {
            total: 3,
            avg: 13.33,
            max: 30.0,
            min: 10.0,
            systems_count: 2,
            depts_count: 1,
        };
        let cards = summary_cards(Some(&summary));
        assert_eq!(cards.total, "3");
        assert_eq!(cards.avg, "13.33%");
        assert_eq!(cards.max, "30%");
        assert_eq!(cards.min, "10%");

        let empty = summary_cards(Some(&Summary::default()));
        assert_eq!(empty.total, "0");
        assert_eq!(empty.avg, "0%");

        let blank = summary_cards(None);
        assert_eq!(blank.total, BLANK_CARD);
        assert_eq!(blank.depts_count, BLANK_CARD);
    }

    #[test]
    fn test_single_active_header() {
        let headers = column_headers(SortState::new(SortColumn::SystemName, SortDirection::Desc));
        assert_eq!(headers.len(), 5);
        let active: Vec<_> = headers.iter().filter(|h| h.indicator.is_some()).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].column, SortColumn::SystemName);
        assert_eq!(active[0].indicator, Some(SortDirection::Desc));
    }

    #[test]
    fn test_render_table_html_escapes() {
        let table = TableView::Rows {
            rows: vec![TableRow {
                usage_date: "2024-01-01".into(),
                usage_time: String::new(),
                system_name: "<script>alert('x')</script>".into(),
                department_name: "R&D".into(),
                utilization_pct: "5".into(),
            }],
        };
        let html = render_table_html(&table);
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("<td>R&amp;D</td>"));
        assert!(!html.contains("<script>"));

        let placeholder = render_table_html(&failure_table());
        assert!(placeholder.contains("colspan=\"5\""));
        assert!(placeholder.contains(FAILURE_PLACEHOLDER));
    }
}
