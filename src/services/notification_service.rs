// src/services/notification_service.rs

use crate::{
    common::error::AppError,
    db::{ClientRepository, LicenceRepository, NotificationRepository},
    models::licences::Notification,
};

// O emissor: observa uma licença expirando e grava o evento no outbox.
// Fire-and-forget do ponto de vista do request: entrega, retry e e-mail
// são problema do worker (bin/notifier) e do gateway externo.
#[derive(Clone)]
pub struct NotificationService {
    notification_repo: NotificationRepository,
    licence_repo: LicenceRepository,
    client_repo: ClientRepository,
}

impl NotificationService {
    pub fn new(
        notification_repo: NotificationRepository,
        licence_repo: LicenceRepository,
        client_repo: ClientRepository,
    ) -> Self {
        Self {
            notification_repo,
            licence_repo,
            client_repo,
        }
    }

    /// Resolve licença e cliente no servidor; o chamador envia apenas o id.
    pub async fn notify_expiration(&self, licence_id: i32) -> Result<Notification, AppError> {
        let licence = self
            .licence_repo
            .find_by_id(licence_id)
            .await?
            .ok_or(AppError::LicenceNotFound)?;

        let client = self
            .client_repo
            .get(licence.client_id)
            .await?
            .ok_or(AppError::ClientNotFound)?;

        let notification = self
            .notification_repo
            .enqueue(licence.id, client.id, &client.email, licence.date_end)
            .await?;

        tracing::info!(
            licence_id = licence.id,
            client_id = client.id,
            "notificação de expiração enfileirada"
        );

        Ok(notification)
    }
}
