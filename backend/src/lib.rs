//! # Usage Dashboard Backend
//!
//! Data-shaping engine behind the utilization dashboard.
//!
//! This crate fetches utilization records from a remote API, normalizes
//! them into canonical rows, filters them by date range, sorts them and
//! computes summary statistics, then projects the result into the chart,
//! table and summary cards a browser front-end renders.
//!
//! ## Features
//!
//! - **Normalization**: Tolerant conversion of untyped API records
//! - **Filtering**: Inclusive date-range windows over combined date/time
//! - **Sorting**: Single active sort with per-column comparison rules
//! - **Aggregation**: Count, average, extrema and distinct dimensions
//! - **Presentation**: Chronological chart series and user-sorted table rows
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects shared by services and the HTTP layer
//! - [`models`]: Raw records, canonical rows and chronological keys
//! - [`transformations`]: Pure row transformations (normalize, filter, sort)
//! - [`services`]: Aggregation, presentation and the dashboard state machine
//! - [`source`]: The remote API abstraction and its implementations
//! - [`config`]: TOML configuration with environment overrides
//! - [`theme`]: Persisted theme preference
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod source;
pub mod theme;
pub mod transformations;

#[cfg(feature = "http-server")]
pub mod http;
