// src/models/stats.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::clients::ClientEdit;
use super::licences::History;

/// Janela de agregação do GET /general-statistics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LicenceStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    /// Licenças ativas com date_end dentro da janela.
    pub expiring: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    /// Clientes com date_registration dentro da janela.
    pub registered: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneralStatistics {
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub licences: LicenceStats,
    pub clients: ClientStats,
}

/// Resposta do GET /last-activities: as trilhas recentes, mais novas primeiro.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LastActivities {
    pub licence_transitions: Vec<History>,
    pub client_edits: Vec<ClientEdit>,
}
