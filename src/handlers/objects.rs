// src/handlers/objects.rs

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
    models::structure::{ClientObject, ObjectDetail},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório"))]
    #[schema(example = "Filial Norte")]
    pub name: String,

    pub client_id: i32,
}

// POST /objects
#[utoipa::path(
    post,
    path = "/objects",
    tag = "Objects",
    request_body = ObjectPayload,
    responses(
        (status = 201, description = "Objeto criado", body = ClientObject),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn create_object(
    State(app_state): State<AppState>,
    Json(payload): Json<ObjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let object = app_state
        .structure_service
        .create_object(&app_state.db_pool, &payload.name, payload.client_id)
        .await?;

    let location = format!("/objects/{}", object.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(object),
    ))
}

// GET /objects
#[utoipa::path(
    get,
    path = "/objects",
    tag = "Objects",
    responses((status = 200, description = "Lista de objetos", body = Vec<ClientObject>))
)]
pub async fn list_objects(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let objects = app_state.structure_service.list_objects().await?;
    Ok((StatusCode::OK, Json(objects)))
}

// GET /objects/{id}
#[utoipa::path(
    get,
    path = "/objects/{id}",
    tag = "Objects",
    params(("id" = i32, Path, description = "ID do objeto")),
    responses(
        (status = 200, description = "Objeto com serviços", body = ObjectDetail),
        (status = 404, description = "Objeto não encontrado")
    )
)]
pub async fn get_object(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.structure_service.get_object(id).await?;
    Ok((StatusCode::OK, Json(detail)))
}

// PUT /objects/{id}
#[utoipa::path(
    put,
    path = "/objects/{id}",
    tag = "Objects",
    params(("id" = i32, Path, description = "ID do objeto")),
    request_body = ObjectPayload,
    responses(
        (status = 200, description = "Objeto atualizado", body = ClientObject),
        (status = 404, description = "Objeto não encontrado")
    )
)]
pub async fn update_object(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ObjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let object = app_state
        .structure_service
        .update_object(&app_state.db_pool, id, &payload.name, payload.client_id)
        .await?;

    Ok((StatusCode::OK, Json(object)))
}

// DELETE /objects/{id}
#[utoipa::path(
    delete,
    path = "/objects/{id}",
    tag = "Objects",
    params(("id" = i32, Path, description = "ID do objeto")),
    responses(
        (status = 204, description = "Objeto removido"),
        (status = 404, description = "Objeto não encontrado"),
        (status = 409, description = "Existem licenças vinculadas")
    )
)]
pub async fn delete_object(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .structure_service
        .delete_object(&app_state.db_pool, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
