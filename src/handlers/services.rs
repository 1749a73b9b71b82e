// src/handlers/services.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::structure::{Service, ServiceDetail},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório"))]
    #[schema(example = "Videomonitoramento")]
    pub name: String,

    pub object_id: i32,
}

// POST /services
#[utoipa::path(
    post,
    path = "/services",
    tag = "Services",
    request_body = ServicePayload,
    responses(
        (status = 201, description = "Serviço criado", body = Service),
        (status = 404, description = "Objeto não encontrado")
    )
)]
pub async fn create_service(
    State(app_state): State<AppState>,
    Json(payload): Json<ServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let service = app_state
        .structure_service
        .create_service(&app_state.db_pool, &payload.name, payload.object_id)
        .await?;

    let location = format!("/services/{}", service.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(service),
    ))
}

// GET /services
#[utoipa::path(
    get,
    path = "/services",
    tag = "Services",
    responses((status = 200, description = "Lista de serviços", body = Vec<Service>))
)]
pub async fn list_services(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let services = app_state.structure_service.list_services().await?;
    Ok((StatusCode::OK, Json(services)))
}

// GET /services/{id}
#[utoipa::path(
    get,
    path = "/services/{id}",
    tag = "Services",
    params(("id" = i32, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Serviço com licenças", body = ServiceDetail),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn get_service(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.structure_service.get_service(id).await?;
    Ok((StatusCode::OK, Json(detail)))
}

// PUT /services/{id}
#[utoipa::path(
    put,
    path = "/services/{id}",
    tag = "Services",
    params(("id" = i32, Path, description = "ID do serviço")),
    request_body = ServicePayload,
    responses(
        (status = 200, description = "Serviço atualizado", body = Service),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn update_service(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let service = app_state
        .structure_service
        .update_service(&app_state.db_pool, id, &payload.name, payload.object_id)
        .await?;

    Ok((StatusCode::OK, Json(service)))
}

// DELETE /services/{id}
#[utoipa::path(
    delete,
    path = "/services/{id}",
    tag = "Services",
    params(("id" = i32, Path, description = "ID do serviço")),
    responses(
        (status = 204, description = "Serviço removido"),
        (status = 404, description = "Serviço não encontrado"),
        (status = 409, description = "Existem licenças vinculadas")
    )
)]
pub async fn delete_service(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .structure_service
        .delete_service(&app_state.db_pool, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
