// src/handlers/clients.rs

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
    models::clients::{Client, ClientDetail, CompanySummary, Note},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[validate(length(min = 1, message = "O nome da empresa é obrigatório"))]
    #[schema(example = "ООО Ромашка")]
    pub name_company: String,

    #[validate(length(equal = 10, message = "O tin deve ter exatamente 10 caracteres"))]
    #[schema(example = "7707083893")]
    pub tin: String,

    #[validate(length(min = 1, message = "O contato é obrigatório"))]
    #[schema(example = "Ivan Petrov")]
    pub contact: String,

    #[validate(email(message = "E-mail inválido"))]
    #[schema(example = "ivan@romashka.ru")]
    pub email: String,

    #[validate(length(min = 11, max = 12, message = "O telefone deve ter entre 11 e 12 caracteres"))]
    #[schema(example = "79161234567")]
    pub num_phone: String,

    #[schema(value_type = String, format = DateTime)]
    pub date_registration: DateTime<Utc>,

    pub description: Option<String>,

    #[schema(example = "administrator")]
    pub role: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientPayload {
    #[validate(length(min = 1, message = "O nome da empresa é obrigatório"))]
    pub name_company: String,

    #[validate(length(equal = 10, message = "O tin deve ter exatamente 10 caracteres"))]
    pub tin: String,

    #[validate(length(min = 1, message = "O contato é obrigatório"))]
    pub contact: String,

    #[validate(email(message = "E-mail inválido"))]
    pub email: String,

    #[validate(length(min = 11, max = 12, message = "O telefone deve ter entre 11 e 12 caracteres"))]
    pub num_phone: String,

    pub description: Option<String>,
    pub role: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotePayload {
    pub client_id: i32,

    #[validate(length(min = 1, message = "O título da anotação é obrigatório"))]
    pub name: String,

    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchClientsParams {
    pub query: String,
}

// POST /clients
#[utoipa::path(
    post,
    path = "/clients",
    tag = "Clients",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Client),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state
        .client_service
        .create_client(
            &app_state.db_pool,
            &payload.name_company,
            &payload.tin,
            &payload.contact,
            &payload.email,
            &payload.num_phone,
            payload.date_registration,
            payload.description.as_deref(),
            &payload.role,
        )
        .await?;

    let location = format!("/clients/{}", client.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(client),
    ))
}

// GET /clients
#[utoipa::path(
    get,
    path = "/clients",
    tag = "Clients",
    responses((status = 200, description = "Lista de clientes", body = Vec<Client>))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.client_service.list_clients().await?;
    Ok((StatusCode::OK, Json(clients)))
}

// GET /clients/{id}
#[utoipa::path(
    get,
    path = "/clients/{id}",
    tag = "Clients",
    params(("id" = i32, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente com objetos", body = ClientDetail),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.client_service.get_client(id).await?;
    Ok((StatusCode::OK, Json(detail)))
}

// PUT /clients/{id}
#[utoipa::path(
    put,
    path = "/clients/{id}",
    tag = "Clients",
    params(("id" = i32, Path, description = "ID do cliente")),
    request_body = UpdateClientPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Client),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state
        .client_service
        .update_client(
            &app_state.db_pool,
            id,
            &payload.name_company,
            &payload.tin,
            &payload.contact,
            &payload.email,
            &payload.num_phone,
            payload.description.as_deref(),
            &payload.role,
        )
        .await?;

    Ok((StatusCode::OK, Json(client)))
}

// DELETE /clients/{id}
#[utoipa::path(
    delete,
    path = "/clients/{id}",
    tag = "Clients",
    params(("id" = i32, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 404, description = "Cliente não encontrado"),
        (status = 409, description = "Existem licenças vinculadas")
    )
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .client_service
        .delete_client(&app_state.db_pool, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /clients/note
#[utoipa::path(
    post,
    path = "/clients/note",
    tag = "Clients",
    request_body = CreateNotePayload,
    responses(
        (status = 201, description = "Anotação criada", body = Note),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn create_note(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateNotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let note = app_state
        .client_service
        .add_note(
            &app_state.db_pool,
            payload.client_id,
            &payload.name,
            &payload.text,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(note)))
}

// GET /companies
#[utoipa::path(
    get,
    path = "/companies",
    tag = "Clients",
    responses((status = 200, description = "Empresas cadastradas", body = Vec<CompanySummary>))
)]
pub async fn list_companies(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let companies = app_state.client_service.list_companies().await?;
    Ok((StatusCode::OK, Json(companies)))
}

// GET /searchClients?query=
#[utoipa::path(
    get,
    path = "/searchClients",
    tag = "Clients",
    params(("query" = String, Query, description = "Trecho de empresa, tin ou contato")),
    responses((status = 200, description = "Clientes encontrados", body = Vec<Client>))
)]
pub async fn search_clients(
    State(app_state): State<AppState>,
    Query(params): Query<SearchClientsParams>,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state
        .client_service
        .search_clients(&params.query)
        .await?;

    Ok((StatusCode::OK, Json(clients)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> CreateClientPayload {
        CreateClientPayload {
            name_company: "ООО Ромашка".into(),
            tin: "7707083893".into(),
            contact: "Ivan Petrov".into(),
            email: "ivan@romashka.ru".into(),
            num_phone: "79161234567".into(),
            date_registration: Utc::now(),
            description: None,
            role: "administrator".into(),
        }
    }

    #[test]
    fn accepts_a_well_formed_client() {
        assert!(valid_payload().validate().is_ok());
    }

    #[test]
    fn rejects_tin_that_is_not_ten_chars() {
        let mut payload = valid_payload();
        payload.tin = "123".into();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("tin"));

        payload.tin = "12345678901".into();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn rejects_phone_outside_11_to_12_chars() {
        let mut payload = valid_payload();
        payload.num_phone = "1234567890".into(); // 10
        assert!(payload.validate().is_err());

        payload.num_phone = "1234567890123".into(); // 13
        assert!(payload.validate().is_err());

        payload.num_phone = "123456789012".into(); // 12
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        let mut payload = valid_payload();
        payload.email = "sem-arroba".into();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
