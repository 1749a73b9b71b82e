// src/models/clients.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- ENUMS ---

// Mapeia o CREATE TYPE status do banco. Um enum só, em todo lugar:
// nada de comparar status como string solta.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
}

// --- CLIENTE ---

// Invariante mantida pelo motor de status:
// status == Active <=> count_licence > 0, e count_licence nunca negativo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i32,
    pub name_company: String,
    pub tin: String,
    pub contact: String,
    pub email: String,
    pub num_phone: String,
    pub status: Status,
    pub count_licence: i32,
    pub date_registration: DateTime<Utc>,
    pub description: Option<String>,
    pub role: String,
}

/// Cliente com os objetos carregados (GET /clients/{id}).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetail {
    #[serde(flatten)]
    pub client: Client,
    pub objects: Vec<super::structure::ClientObject>,
}

/// Visão enxuta para o GET /companies.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub id: i32,
    pub name_company: String,
}

// --- ANOTAÇÕES E AUDITORIA ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i32,
    pub client_id: i32,
    pub name: String,
    pub text: String,
}

// Registro da tabela 'editions': uma linha por edição de campos do cliente.
// Append-only, gravado na mesma transação do UPDATE.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientEdit {
    pub id: i32,
    pub client_id: i32,
    pub date: DateTime<Utc>,
}
