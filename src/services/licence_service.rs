// src/services/licence_service.rs

use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};

use crate::{
    common::error::AppError,
    db::{ClientRepository, LicenceRepository, StructureRepository},
    models::clients::Status,
    models::licences::Licence,
    services::status_rules::{self, CounterOp},
};

// O orquestrador de transições: cada mutação de licença roda numa transação
// só, com a licença e os clientes afetados travados via FOR UPDATE. Cliente
// que não resolve é warn e segue; referência pendurada nunca bloqueia a
// mutação da licença.
#[derive(Clone)]
pub struct LicenceService {
    licence_repo: LicenceRepository,
    client_repo: ClientRepository,
    structure_repo: StructureRepository,
}

impl LicenceService {
    pub fn new(
        licence_repo: LicenceRepository,
        client_repo: ClientRepository,
        structure_repo: StructureRepository,
    ) -> Self {
        Self {
            licence_repo,
            client_repo,
            structure_repo,
        }
    }

    // Trava o cliente, aplica a operação pura e persiste o par derivado.
    // Cliente inexistente: no-op logado, por contrato.
    async fn apply_op(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        op: CounterOp,
        client_id: i32,
    ) -> Result<(), AppError> {
        let client = match self
            .client_repo
            .find_by_id_for_update(&mut **tx, client_id)
            .await?
        {
            Some(client) => client,
            None => {
                tracing::warn!(
                    client_id,
                    ?op,
                    "licença aponta para cliente inexistente; derivação ignorada"
                );
                return Ok(());
            }
        };

        let (count, status) = status_rules::apply(op, client.count_licence, client.status);
        self.client_repo
            .save_derived(&mut **tx, client_id, count, status)
            .await?;

        Ok(())
    }

    // --- CRIAÇÃO ---

    pub async fn create_licence<'e, E>(
        &self,
        executor: E,
        client_id: i32,
        status: Status,
        date_begin: DateTime<Utc>,
        date_end: DateTime<Utc>,
        service_id: i32,
    ) -> Result<Licence, AppError>
    where
        E: sqlx::Acquire<'e, Database = Postgres>,
    {
        // service_id é FK de verdade: 404 antes de abrir a transação.
        if self.structure_repo.find_service(service_id).await?.is_none() {
            return Err(AppError::ServiceNotFound);
        }

        let mut tx = executor.begin().await?;

        let licence = self
            .licence_repo
            .insert(&mut *tx, client_id, status, date_begin, date_end, service_id)
            .await?;

        if let Some(op) = status_rules::on_create(status) {
            self.apply_op(&mut tx, op, client_id).await?;
        }

        tx.commit().await?;
        Ok(licence)
    }

    // --- EDIÇÃO ---

    pub async fn update_licence<'e, E>(
        &self,
        executor: E,
        id: i32,
        client_id: i32,
        status: Status,
        date_begin: DateTime<Utc>,
        date_end: DateTime<Utc>,
        service_id: i32,
    ) -> Result<Licence, AppError>
    where
        E: sqlx::Acquire<'e, Database = Postgres>,
    {
        if self.structure_repo.find_service(service_id).await?.is_none() {
            return Err(AppError::ServiceNotFound);
        }

        let mut tx = executor.begin().await?;

        // Trava a licença primeiro: o par (prev_client, prev_status) é a
        // entrada da tabela de efeitos e não pode mudar embaixo de nós.
        let prev = self
            .licence_repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::LicenceNotFound)?;

        let effects = status_rules::on_edit(prev.client_id, prev.status, client_id, status);

        if effects.log_transition {
            self.licence_repo
                .insert_history(&mut *tx, id, prev.status, status, Utc::now(), client_id)
                .await?;
        }

        // Ordem canônica (id crescente) ao travar os dois clientes de um
        // re-parent; edições simultâneas em sentidos opostos não se cruzam.
        for (affected_client, op) in effects.ops(prev.client_id, client_id) {
            self.apply_op(&mut tx, op, affected_client).await?;
        }

        let updated = self
            .licence_repo
            .update(&mut *tx, id, client_id, status, date_begin, date_end, service_id)
            .await?
            .ok_or(AppError::LicenceNotFound)?;

        tx.commit().await?;
        Ok(updated)
    }

    // --- REMOÇÃO ---

    pub async fn delete_licence<'e, E>(&self, executor: E, id: i32) -> Result<(), AppError>
    where
        E: sqlx::Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let prev = self
            .licence_repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::LicenceNotFound)?;

        if let Some(op) = status_rules::on_delete(prev.status) {
            self.apply_op(&mut tx, op, prev.client_id).await?;
        }

        self.licence_repo.delete(&mut *tx, id).await?;

        tx.commit().await?;
        Ok(())
    }

    // --- LEITURA ---

    pub async fn get_licence(&self, id: i32) -> Result<Licence, AppError> {
        self.licence_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::LicenceNotFound)
    }

    pub async fn list_licences(&self) -> Result<Vec<Licence>, AppError> {
        self.licence_repo.list_all().await
    }

    pub async fn search_licences(
        &self,
        client_id: Option<i32>,
        status: Option<Status>,
        date_end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Licence>, AppError> {
        self.licence_repo.search(client_id, status, date_end).await
    }
}
