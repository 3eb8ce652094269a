use std::{sync::Arc, time::Duration};

use axum::{
    Json,
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::Html,
    routing::get,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    api::entsoe,
    core::aggregate::HourlyAverage,
    dashboard::{Dashboard, Outcome, Report, default_date, page},
    prelude::*,
    render::{layout, svg},
};

pub struct AppState {
    pub dashboard: Dashboard<entsoe::Api>,

    /// Shown on the page.
    pub zone_id: String,
}

impl AppState {
    async fn handle(&self, query: DateQuery) -> Outcome {
        let today = Utc::now().date_naive();
        self.dashboard.handle(query.date.unwrap_or_else(|| default_date(today)), today).await
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_index))
        .route("/heatmap.svg", get(get_heatmap_svg))
        .route("/api/hourly", get(get_hourly))
        .with_state(Arc::new(state))
        .layer((
            TraceLayer::new_for_http(),
            TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, Duration::from_secs(30)),
        ))
}

/// Per <https://github.com/tokio-rs/axum/blob/main/examples/graceful-shutdown/src/main.rs>.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[derive(Deserialize)]
struct DateQuery {
    /// Defaults to tomorrow.
    date: Option<NaiveDate>,
}

#[instrument(skip_all)]
async fn get_index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Html<String> {
    let outcome = state.handle(query).await;
    let chart = match &outcome {
        Outcome::Report(report) => render_chart(report),
        Outcome::NoData(_) => None,
    };
    Html(page::render(&state.zone_id, &outcome, chart.as_deref()))
}

#[instrument(skip_all)]
async fn get_heatmap_svg(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Result<([(header::HeaderName, &'static str); 1], String), StatusCode> {
    match state.handle(query).await {
        Outcome::Report(report) => render_chart(&report)
            .map(|chart| ([(header::CONTENT_TYPE, "image/svg+xml")], chart))
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR),
        Outcome::NoData(_) => Err(StatusCode::NOT_FOUND),
    }
}

#[derive(Serialize)]
struct HourlyResponse {
    requested: NaiveDate,
    date: NaiveDate,
    fell_back: bool,
    hourly: Vec<HourlyAverage>,
}

#[instrument(skip_all)]
async fn get_hourly(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<HourlyResponse>, StatusCode> {
    match state.handle(query).await {
        Outcome::Report(Report { requested, date, fell_back, hourly }) => {
            Ok(Json(HourlyResponse { requested, date, fell_back, hourly }))
        }
        Outcome::NoData(_) => Err(StatusCode::NOT_FOUND),
    }
}

fn render_chart(report: &Report) -> Option<String> {
    svg::render(&layout(&report.hourly), report.date)
        .inspect_err(|error| error!("failed to render the chart: {error:#}"))
        .ok()
}
