// src/services/client_service.rs

use chrono::{DateTime, Utc};
use sqlx::Postgres;

use crate::{
    common::error::AppError,
    db::{ClientRepository, StructureRepository},
    models::clients::{Client, ClientDetail, CompanySummary, Note},
};

#[derive(Clone)]
pub struct ClientService {
    client_repo: ClientRepository,
    structure_repo: StructureRepository,
}

impl ClientService {
    pub fn new(client_repo: ClientRepository, structure_repo: StructureRepository) -> Self {
        Self {
            client_repo,
            structure_repo,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_client<'e, E>(
        &self,
        executor: E,
        name_company: &str,
        tin: &str,
        contact: &str,
        email: &str,
        num_phone: &str,
        date_registration: DateTime<Utc>,
        description: Option<&str>,
        role: &str,
    ) -> Result<Client, AppError>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        self.client_repo
            .create(
                executor,
                name_company,
                tin,
                contact,
                email,
                num_phone,
                date_registration,
                description,
                role,
            )
            .await
    }

    /// Cliente com os objetos carregados (o GET de detalhe).
    pub async fn get_client(&self, id: i32) -> Result<ClientDetail, AppError> {
        let client = self
            .client_repo
            .get(id)
            .await?
            .ok_or(AppError::ClientNotFound)?;

        let objects = self.structure_repo.objects_of_client(id).await?;

        Ok(ClientDetail { client, objects })
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        self.client_repo.list_all().await
    }

    pub async fn list_companies(&self) -> Result<Vec<CompanySummary>, AppError> {
        self.client_repo.list_companies().await
    }

    pub async fn search_clients(&self, query: &str) -> Result<Vec<Client>, AppError> {
        self.client_repo.search(query).await
    }

    /// Atualiza os campos editáveis e grava a linha de 'editions' na mesma
    /// transação; a trilha de auditoria nunca fica órfã do update.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_client<'e, E>(
        &self,
        executor: E,
        id: i32,
        name_company: &str,
        tin: &str,
        contact: &str,
        email: &str,
        num_phone: &str,
        description: Option<&str>,
        role: &str,
    ) -> Result<Client, AppError>
    where
        E: sqlx::Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let client = self
            .client_repo
            .update_fields(
                &mut *tx,
                id,
                name_company,
                tin,
                contact,
                email,
                num_phone,
                description,
                role,
            )
            .await?
            .ok_or(AppError::ClientNotFound)?;

        self.client_repo
            .insert_edition(&mut *tx, id, Utc::now())
            .await?;

        tx.commit().await?;
        Ok(client)
    }

    pub async fn delete_client<'e, E>(&self, executor: E, id: i32) -> Result<(), AppError>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        // O CASCADE clientes -> objetos -> serviços para no RESTRICT das
        // licenças; o banco rejeita e a resposta vira 409.
        let deleted = self
            .client_repo
            .delete(executor, id)
            .await
            .map_err(|e| e.on_fk_violation(AppError::LicencesAttached))?;
        if deleted == 0 {
            return Err(AppError::ClientNotFound);
        }
        Ok(())
    }

    /// Anexa uma Note; o cliente endereçado precisa existir.
    pub async fn add_note<'e, E>(
        &self,
        executor: E,
        client_id: i32,
        name: &str,
        text: &str,
    ) -> Result<Note, AppError>
    where
        E: sqlx::Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        if self
            .client_repo
            .find_by_id(&mut *tx, client_id)
            .await?
            .is_none()
        {
            return Err(AppError::ClientNotFound);
        }

        let note = self
            .client_repo
            .insert_note(&mut *tx, client_id, name, text)
            .await?;

        tx.commit().await?;
        Ok(note)
    }
}
