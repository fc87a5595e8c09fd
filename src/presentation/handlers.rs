// HTTP request handlers
use crate::domain::annotations::Annotations;
use crate::presentation::app_state::AppState;
use crate::presentation::trend_view::TrendView;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct WindowQuery {
    pub days: Option<u32>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current series, optionally after changing the window size.
/// `days` updates the shared session's window, so later requests without
/// `days` see the new size too.
pub async fn get_trend(
    Query(query): Query<WindowQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<TrendView> {
    if let Some(days) = query.days {
        state.controller.set_window_size(days).await;
    }

    let session_state = state.controller.state().await;
    Json(TrendView::from_state(
        session_state,
        &state.entities,
        &state.zone,
    ))
}

/// Start a fresh load of the snapshot source
pub async fn reload(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.controller.start_load().await {
        Some(_) => StatusCode::ACCEPTED,
        None => StatusCode::CONFLICT,
    }
}

pub async fn get_annotations() -> Json<Annotations> {
    Json(Annotations::reference())
}
