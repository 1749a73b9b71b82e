// src/db/clients_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::clients::{Client, ClientEdit, CompanySummary, Note, Status},
};

// O repositório de clientes, responsável pelas tabelas 'clients', 'notes'
// e 'editions'. As escritas derivadas (status/count_licence) passam por
// find_by_id_for_update + save_derived, sempre dentro da transação do chamador.
#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CRUD
    // =========================================================================

    // Cliente novo nasce inativo e sem licenças; o motor de status cuida do resto.
    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
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
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (
                name_company, tin, contact, email, num_phone,
                status, count_licence, date_registration, description, role
            )
            VALUES ($1, $2, $3, $4, $5, 'inactive', 0, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(name_company)
        .bind(tin)
        .bind(contact)
        .bind(email)
        .bind(num_phone)
        .bind(date_registration)
        .bind(description)
        .bind(role)
        .fetch_one(executor)
        .await?;

        Ok(client)
    }

    /// Leitura simples fora de transação.
    pub async fn get(&self, id: i32) -> Result<Option<Client>, AppError> {
        self.find_by_id(&self.pool, id).await
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i32) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(client)
    }

    /// Trava a linha do cliente para o read-modify-write dos contadores.
    pub async fn find_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: i32,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(client)
    }

    pub async fn list_all(&self) -> Result<Vec<Client>, AppError> {
        let clients = sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(clients)
    }

    pub async fn list_companies(&self) -> Result<Vec<CompanySummary>, AppError> {
        let companies = sqlx::query_as::<_, CompanySummary>(
            "SELECT id, name_company FROM clients ORDER BY name_company ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }

    /// Busca livre, case-insensitive, sobre empresa / tin / contato.
    pub async fn search(&self, query: &str) -> Result<Vec<Client>, AppError> {
        let term = format!("%{}%", query);

        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT * FROM clients
            WHERE name_company ILIKE $1
               OR tin ILIKE $1
               OR contact ILIKE $1
            ORDER BY name_company ASC
            "#,
        )
        .bind(term)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    // Só os campos editáveis: status e count_licence pertencem ao motor.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_fields<'e, E>(
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
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name_company = $2, tin = $3, contact = $4, email = $5,
                num_phone = $6, description = $7, role = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name_company)
        .bind(tin)
        .bind(contact)
        .bind(email)
        .bind(num_phone)
        .bind(description)
        .bind(role)
        .fetch_optional(executor)
        .await?;

        Ok(client)
    }

    /// Persiste o par derivado (count_licence, status) calculado pelo motor.
    pub async fn save_derived<'e, E>(
        &self,
        executor: E,
        id: i32,
        count_licence: i32,
        status: Status,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE clients SET count_licence = $2, status = $3 WHERE id = $1")
            .bind(id)
            .bind(count_licence)
            .bind(status)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  ANOTAÇÕES E AUDITORIA
    // =========================================================================

    pub async fn insert_note<'e, E>(
        &self,
        executor: E,
        client_id: i32,
        name: &str,
        text: &str,
    ) -> Result<Note, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let note = sqlx::query_as::<_, Note>(
            "INSERT INTO notes (client_id, name, text) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(client_id)
        .bind(name)
        .bind(text)
        .fetch_one(executor)
        .await?;

        Ok(note)
    }

    pub async fn insert_edition<'e, E>(
        &self,
        executor: E,
        client_id: i32,
        date: DateTime<Utc>,
    ) -> Result<ClientEdit, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let edit = sqlx::query_as::<_, ClientEdit>(
            "INSERT INTO editions (client_id, date) VALUES ($1, $2) RETURNING *",
        )
        .bind(client_id)
        .bind(date)
        .fetch_one(executor)
        .await?;

        Ok(edit)
    }

    pub async fn list_recent_editions(&self, limit: i64) -> Result<Vec<ClientEdit>, AppError> {
        let edits = sqlx::query_as::<_, ClientEdit>(
            "SELECT * FROM editions ORDER BY date DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(edits)
    }
}
