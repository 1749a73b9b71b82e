// src/models/structure.rs
//
// A hierarquia física: Cliente -> Objeto -> Serviço. As licenças penduram
// no serviço (ver models/licences.rs).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientObject {
    pub id: i32,
    pub name: String,
    pub client_id: i32,
}

/// Objeto com os serviços carregados (GET /objects/{id}).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDetail {
    #[serde(flatten)]
    pub object: ClientObject,
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub object_id: i32,
}

/// Serviço com as licenças carregadas (GET /services/{id}).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetail {
    #[serde(flatten)]
    pub service: Service,
    pub licences: Vec<super::licences::Licence>,
}
