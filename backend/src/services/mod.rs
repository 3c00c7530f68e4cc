//! Service layer for dashboard business logic and orchestration.
//!
//! This module sits between the utilization source and the HTTP layer.
//! Services aggregate and present row sets and drive the dashboard state
//! machine.

pub mod dashboard;
pub mod presentation;
pub mod session;
pub mod summary;

pub use dashboard::{DashboardCommand, DashboardState, FetchTicket};
pub use presentation::{chart_series, column_headers, render_table_html, summary_cards, table_rows};
pub use session::DashboardSession;
pub use summary::compute_summary;
