// src/handlers/notifications.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{common::error::AppError, config::AppState, models::licences::Notification};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotifyExpirationPayload {
    pub licence_id: i32,
}

// POST /notify_expiration/
// O enfileiramento é síncrono: falhou o outbox, o chamador recebe 500.
// Entrega do e-mail é assunto do worker (bin/notifier).
#[utoipa::path(
    post,
    path = "/notify_expiration/",
    tag = "Notifications",
    request_body = NotifyExpirationPayload,
    responses(
        (status = 200, description = "Evento de expiração enfileirado", body = Notification),
        (status = 404, description = "Licença ou cliente não encontrado"),
        (status = 500, description = "Falha ao enfileirar")
    )
)]
pub async fn notify_expiration(
    State(app_state): State<AppState>,
    Json(payload): Json<NotifyExpirationPayload>,
) -> Result<impl IntoResponse, AppError> {
    let notification = app_state
        .notification_service
        .notify_expiration(payload.licence_id)
        .await?;

    Ok((StatusCode::OK, Json(notification)))
}
