// src/db/licences_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::clients::Status,
    models::licences::{History, Licence},
};

// Repositório das tabelas 'licences' e 'history'. As mutações de licença
// passam SEMPRE pelo licence_service, que segura a transação e os locks.
#[derive(Clone)]
pub struct LicenceRepository {
    pool: PgPool,
}

impl LicenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  LICENÇAS
    // =========================================================================

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        client_id: i32,
        status: Status,
        date_begin: DateTime<Utc>,
        date_end: DateTime<Utc>,
        service_id: i32,
    ) -> Result<Licence, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let licence = sqlx::query_as::<_, Licence>(
            r#"
            INSERT INTO licences (client_id, status, date_begin, date_end, service_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(status)
        .bind(date_begin)
        .bind(date_end)
        .bind(service_id)
        .fetch_one(executor)
        .await?;

        Ok(licence)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Licence>, AppError> {
        let licence = sqlx::query_as::<_, Licence>("SELECT * FROM licences WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(licence)
    }

    /// Trava a licença no começo de um edit/delete, antes de derivar efeitos.
    pub async fn find_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: i32,
    ) -> Result<Option<Licence>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let licence = sqlx::query_as::<_, Licence>("SELECT * FROM licences WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(licence)
    }

    pub async fn list_all(&self) -> Result<Vec<Licence>, AppError> {
        let licences = sqlx::query_as::<_, Licence>("SELECT * FROM licences ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(licences)
    }

    /// Filtros opcionais do GET /searchLicences; dateEnd é comparação exata.
    pub async fn search(
        &self,
        client_id: Option<i32>,
        status: Option<Status>,
        date_end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Licence>, AppError> {
        let licences = sqlx::query_as::<_, Licence>(
            r#"
            SELECT * FROM licences
            WHERE ($1::int IS NULL OR client_id = $1)
              AND ($2::status IS NULL OR status = $2)
              AND ($3::timestamptz IS NULL OR date_end = $3)
            ORDER BY id ASC
            "#,
        )
        .bind(client_id)
        .bind(status)
        .bind(date_end)
        .fetch_all(&self.pool)
        .await?;

        Ok(licences)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i32,
        client_id: i32,
        status: Status,
        date_begin: DateTime<Utc>,
        date_end: DateTime<Utc>,
        service_id: i32,
    ) -> Result<Option<Licence>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let licence = sqlx::query_as::<_, Licence>(
            r#"
            UPDATE licences
            SET client_id = $2, status = $3, date_begin = $4, date_end = $5, service_id = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(client_id)
        .bind(status)
        .bind(date_begin)
        .bind(date_end)
        .bind(service_id)
        .fetch_optional(executor)
        .await?;

        Ok(licence)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM licences WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  HISTÓRICO (append-only)
    // =========================================================================

    pub async fn insert_history<'e, E>(
        &self,
        executor: E,
        licence_id: i32,
        prev_status: Status,
        next_status: Status,
        date: DateTime<Utc>,
        client_id: i32,
    ) -> Result<History, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entry = sqlx::query_as::<_, History>(
            r#"
            INSERT INTO history (licence_id, prev_status, next_status, date, client_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(licence_id)
        .bind(prev_status)
        .bind(next_status)
        .bind(date)
        .bind(client_id)
        .fetch_one(executor)
        .await?;

        Ok(entry)
    }

    pub async fn list_recent_history(&self, limit: i64) -> Result<Vec<History>, AppError> {
        let entries =
            sqlx::query_as::<_, History>("SELECT * FROM history ORDER BY date DESC LIMIT $1")
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;

        Ok(entries)
    }
}
