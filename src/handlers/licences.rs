// src/handlers/licences.rs
//
// Os gatilhos do motor de status: criar, editar e apagar licença passam
// pelo LicenceService, que deriva os efeitos no cliente dentro da transação.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::clients::Status,
    models::licences::Licence,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LicencePayload {
    #[validate(range(min = 1, message = "client_id deve ser positivo"))]
    pub client_id: i32,

    pub status: Status,

    #[schema(value_type = String, format = DateTime)]
    pub date_begin: DateTime<Utc>,

    #[schema(value_type = String, format = DateTime)]
    pub date_end: DateTime<Utc>,

    pub service_id: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchLicencesParams {
    pub client_id: Option<i32>,
    pub status: Option<Status>,
    pub date_end: Option<DateTime<Utc>>,
}

// POST /licences
#[utoipa::path(
    post,
    path = "/licences",
    tag = "Licences",
    request_body = LicencePayload,
    responses(
        (status = 201, description = "Licença criada", body = Licence),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn create_licence(
    State(app_state): State<AppState>,
    Json(payload): Json<LicencePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let licence = app_state
        .licence_service
        .create_licence(
            &app_state.db_pool,
            payload.client_id,
            payload.status,
            payload.date_begin,
            payload.date_end,
            payload.service_id,
        )
        .await?;

    let location = format!("/licences/{}", licence.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(licence),
    ))
}

// GET /licences/{id}
#[utoipa::path(
    get,
    path = "/licences/{id}",
    tag = "Licences",
    params(("id" = i32, Path, description = "ID da licença")),
    responses(
        (status = 200, description = "Licença", body = Licence),
        (status = 404, description = "Licença não encontrada")
    )
)]
pub async fn get_licence(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let licence = app_state.licence_service.get_licence(id).await?;
    Ok((StatusCode::OK, Json(licence)))
}

// PUT /licences/{id}
#[utoipa::path(
    put,
    path = "/licences/{id}",
    tag = "Licences",
    params(("id" = i32, Path, description = "ID da licença")),
    request_body = LicencePayload,
    responses(
        (status = 200, description = "Licença atualizada", body = Licence),
        (status = 404, description = "Licença não encontrada")
    )
)]
pub async fn update_licence(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<LicencePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let licence = app_state
        .licence_service
        .update_licence(
            &app_state.db_pool,
            id,
            payload.client_id,
            payload.status,
            payload.date_begin,
            payload.date_end,
            payload.service_id,
        )
        .await?;

    Ok((StatusCode::OK, Json(licence)))
}

// DELETE /licences/{id}
#[utoipa::path(
    delete,
    path = "/licences/{id}",
    tag = "Licences",
    params(("id" = i32, Path, description = "ID da licença")),
    responses(
        (status = 204, description = "Licença removida"),
        (status = 404, description = "Licença não encontrada")
    )
)]
pub async fn delete_licence(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .licence_service
        .delete_licence(&app_state.db_pool, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /licence (lista tudo; rota legada que os clientes do front ainda usam)
#[utoipa::path(
    get,
    path = "/licence",
    tag = "Licences",
    responses((status = 200, description = "Todas as licenças", body = Vec<Licence>))
)]
pub async fn list_licences(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let licences = app_state.licence_service.list_licences().await?;
    Ok((StatusCode::OK, Json(licences)))
}

// GET /searchLicences?clientId=&status=&dateEnd=
#[utoipa::path(
    get,
    path = "/searchLicences",
    tag = "Licences",
    params(
        ("clientId" = Option<i32>, Query, description = "Filtra pelo cliente dono"),
        ("status" = Option<Status>, Query, description = "Filtra por status"),
        ("dateEnd" = Option<String>, Query, description = "Data de término exata (ISO-8601)")
    ),
    responses((status = 200, description = "Licenças encontradas", body = Vec<Licence>))
)]
pub async fn search_licences(
    State(app_state): State<AppState>,
    Query(params): Query<SearchLicencesParams>,
) -> Result<impl IntoResponse, AppError> {
    let licences = app_state
        .licence_service
        .search_licences(params.client_id, params.status, params.date_end)
        .await?;

    Ok((StatusCode::OK, Json(licences)))
}
