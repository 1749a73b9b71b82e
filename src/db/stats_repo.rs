// src/db/stats_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::{
    common::error::AppError,
    models::stats::{ClientStats, LicenceStats},
};

#[derive(FromRow)]
struct LicenceStatsRow {
    total: i64,
    active: i64,
    inactive: i64,
    expiring: i64,
}

#[derive(FromRow)]
struct ClientStatsRow {
    total: i64,
    active: i64,
    inactive: i64,
    registered: i64,
}

// Agregados do dashboard. Só leitura: o estado consistente vem do motor
// de status, aqui a gente apenas conta.
#[derive(Clone)]
pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn licence_stats(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<LicenceStats, AppError> {
        let row = sqlx::query_as::<_, LicenceStatsRow>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'active') AS active,
                COUNT(*) FILTER (WHERE status = 'inactive') AS inactive,
                COUNT(*) FILTER (
                    WHERE status = 'active' AND date_end >= $1 AND date_end < $2
                ) AS expiring
            FROM licences
            "#,
        )
        .bind(window_start)
        .bind(window_end)
        .fetch_one(&self.pool)
        .await?;

        Ok(LicenceStats {
            total: row.total,
            active: row.active,
            inactive: row.inactive,
            expiring: row.expiring,
        })
    }

    pub async fn client_stats(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<ClientStats, AppError> {
        let row = sqlx::query_as::<_, ClientStatsRow>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'active') AS active,
                COUNT(*) FILTER (WHERE status = 'inactive') AS inactive,
                COUNT(*) FILTER (
                    WHERE date_registration >= $1 AND date_registration < $2
                ) AS registered
            FROM clients
            "#,
        )
        .bind(window_start)
        .bind(window_end)
        .fetch_one(&self.pool)
        .await?;

        Ok(ClientStats {
            total: row.total,
            active: row.active,
            inactive: row.inactive,
            registered: row.registered,
        })
    }
}
