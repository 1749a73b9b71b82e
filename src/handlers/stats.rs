// src/handlers/stats.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    common::error::AppError,
    config::AppState,
    models::stats::{GeneralStatistics, LastActivities, Period},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsParams {
    pub period: Option<Period>,
    pub date_start: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct LastActivitiesParams {
    pub limit: Option<i64>,
}

// GET /general-statistics?period=&dateStart=
#[utoipa::path(
    get,
    path = "/general-statistics",
    tag = "Statistics",
    params(
        ("period" = Option<Period>, Query, description = "Janela: day, week, month ou year (padrão month)"),
        ("dateStart" = Option<String>, Query, description = "Âncora da janela (padrão agora, ISO-8601)")
    ),
    responses((status = 200, description = "Agregados do painel", body = GeneralStatistics))
)]
pub async fn general_statistics(
    State(app_state): State<AppState>,
    Query(params): Query<StatisticsParams>,
) -> Result<impl IntoResponse, AppError> {
    let period = params.period.unwrap_or(Period::Month);
    let date_start = params.date_start.unwrap_or_else(Utc::now);

    let stats = app_state
        .stats_service
        .general_statistics(period, date_start)
        .await?;

    Ok((StatusCode::OK, Json(stats)))
}

// GET /last-activities?limit=
#[utoipa::path(
    get,
    path = "/last-activities",
    tag = "Statistics",
    params(("limit" = Option<i64>, Query, description = "Máximo por trilha (padrão 20)")),
    responses((status = 200, description = "Atividades recentes", body = LastActivities))
)]
pub async fn last_activities(
    State(app_state): State<AppState>,
    Query(params): Query<LastActivitiesParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(20).clamp(1, 100);

    let activities = app_state.stats_service.last_activities(limit).await?;

    Ok((StatusCode::OK, Json(activities)))
}
