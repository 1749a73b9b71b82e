// src/models/licences.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::clients::Status;

// client_id aqui NÃO é FK: a licença pode ser re-apontada para um cliente
// que não resolve. O motor de status trata a referência pendurada como no-op.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Licence {
    pub id: i32,
    pub client_id: i32,
    pub status: Status,
    pub date_begin: DateTime<Utc>,
    pub date_end: DateTime<Utc>,
    pub service_id: i32,
}

// Trilha imutável de transições de status. Só o motor escreve aqui, e só
// quando o status muda com o cliente inalterado. Nunca é editada.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct History {
    pub id: i32,
    pub licence_id: i32,
    pub prev_status: Status,
    pub next_status: Status,
    pub date: DateTime<Utc>,
    pub client_id: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "notification_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Pending,
    Sent,
}

/// Linha do outbox de expiração (tabela 'notifications').
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i32,
    pub licence_id: i32,
    pub client_id: i32,
    pub email: String,
    pub expiry_date: DateTime<Utc>,
    pub status: NotificationStatus,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
}

/// Payload entregue ao gateway de e-mail pelo worker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpirationPayload {
    pub client_id: i32,
    pub license_id: i32,
    pub expiry_date: DateTime<Utc>,
    pub email: String,
}

impl From<&Notification> for ExpirationPayload {
    fn from(n: &Notification) -> Self {
        Self {
            client_id: n.client_id,
            license_id: n.licence_id,
            expiry_date: n.expiry_date,
            email: n.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // O consumidor externo espera exatamente estas chaves, com a data em ISO-8601.
    #[test]
    fn expiration_payload_wire_shape() {
        let payload = ExpirationPayload {
            client_id: 7,
            license_id: 42,
            expiry_date: Utc.with_ymd_and_hms(2026, 9, 30, 12, 0, 0).unwrap(),
            email: "contato@empresa.ru".into(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["client_id"], 7);
        assert_eq!(json["license_id"], 42);
        assert_eq!(json["email"], "contato@empresa.ru");
        assert_eq!(json["expiry_date"], "2026-09-30T12:00:00Z");
    }
}
