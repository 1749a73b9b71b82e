// src/db/notifications_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::licences::Notification};

// Outbox de expiração. O emissor insere 'pending' na transação do request;
// o worker reivindica lotes com SKIP LOCKED e marca 'sent' depois do envio,
// então uma falha de entrega deixa a linha para a próxima rodada
// (semântica at-least-once).
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn enqueue(
        &self,
        licence_id: i32,
        client_id: i32,
        email: &str,
        expiry_date: DateTime<Utc>,
    ) -> Result<Notification, AppError> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (licence_id, client_id, email, expiry_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(licence_id)
        .bind(client_id)
        .bind(email)
        .bind(expiry_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::NotificationDispatch(e.to_string()))?;

        Ok(notification)
    }

    /// Reivindica um lote de pendentes. Precisa rodar na transação do worker:
    /// o lock some no commit.
    pub async fn claim_pending<'e, E>(
        &self,
        executor: E,
        limit: i64,
    ) -> Result<Vec<Notification>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let batch = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE status = 'pending'
            ORDER BY created_at ASC
            LIMIT $1
            FOR UPDATE SKIP LOCKED
            "#,
        )
        .bind(limit)
        .fetch_all(executor)
        .await?;

        Ok(batch)
    }

    pub async fn mark_sent<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE notifications SET status = 'sent', sent_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}
