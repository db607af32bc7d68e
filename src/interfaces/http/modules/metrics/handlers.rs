//! Prometheus exposition endpoint

use axum::extract::State;

use crate::interfaces::http::AppState;

/// Prometheus text exposition of the process metrics.
pub async fn render_metrics(State(state): State<AppState>) -> String {
    state.prometheus.render()
}
