//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! dashboard session or the theme store.

use axum::{extract::State, response::Html, Json};

use super::dto::{
    ApplyFiltersRequest, DashboardView, FilterOptions, HealthResponse, SortRequest, ThemeBody,
};
use super::error::AppError;
use super::state::AppState;
use crate::services::render_table_html;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check() -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
    }))
}

// =============================================================================
// Dashboard
// =============================================================================

/// GET /v1/dashboard
///
/// Current dashboard view. Never triggers a fetch.
pub async fn get_dashboard(State(state): State<AppState>) -> HandlerResult<DashboardView> {
    Ok(Json(state.session.view()))
}

/// POST /v1/dashboard/filters
///
/// Apply filters and run a full fetch cycle. A failed fetch still answers
/// 200; the returned view is in the `failed` phase.
pub async fn apply_filters(
    State(state): State<AppState>,
    Json(request): Json<ApplyFiltersRequest>,
) -> HandlerResult<DashboardView> {
    let filters = request.into_selection().map_err(AppError::BadRequest)?;
    Ok(Json(state.session.apply_filters(filters).await))
}

/// POST /v1/dashboard/sort
///
/// Header click: re-sorts the held rows.
pub async fn sort_dashboard(
    State(state): State<AppState>,
    Json(request): Json<SortRequest>,
) -> HandlerResult<DashboardView> {
    Ok(Json(state.session.sort_by(request.column)))
}

/// POST /v1/dashboard/reset
pub async fn reset_dashboard(State(state): State<AppState>) -> HandlerResult<DashboardView> {
    Ok(Json(state.session.reset().await))
}

/// GET /v1/dashboard/table.html
///
/// Table body as escaped `<tr>` markup.
pub async fn get_table_html(State(state): State<AppState>) -> Html<String> {
    Html(render_table_html(&state.session.view().table))
}

/// GET /v1/filter-options
pub async fn get_filter_options(State(state): State<AppState>) -> HandlerResult<FilterOptions> {
    Ok(Json(state.session.filter_options()))
}

// =============================================================================
// Theme
// =============================================================================

/// GET /v1/theme
pub async fn get_theme(State(state): State<AppState>) -> HandlerResult<ThemeBody> {
    Ok(Json(ThemeBody {
        theme: state.theme.get(),
    }))
}

/// PUT /v1/theme
pub async fn put_theme(
    State(state): State<AppState>,
    Json(body): Json<ThemeBody>,
) -> HandlerResult<ThemeBody> {
    let store = state.theme.clone();
    let theme = body.theme;
    tokio::task::spawn_blocking(move || store.set(theme))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;
    Ok(Json(ThemeBody { theme }))
}
