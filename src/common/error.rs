// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Referências penduradas (licence.client_id sem cliente) NÃO viram erro:
// o motor de status engole com um warn e segue (ver licence_service).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Cliente não encontrado")]
    ClientNotFound,

    #[error("Objeto não encontrado")]
    ObjectNotFound,

    #[error("Serviço não encontrado")]
    ServiceNotFound,

    #[error("Licença não encontrada")]
    LicenceNotFound,

    // Exclusão de cliente/objeto/serviço bloqueada pelo RESTRICT do banco:
    // toda remoção de licença passa pelo orquestrador de transições.
    #[error("Existem licenças vinculadas; remova-as primeiro.")]
    LicencesAttached,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Falha ao enfileirar notificação: {0}")]
    NotificationDispatch(String),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Remapeia violação de chave estrangeira do Postgres para o erro de
    /// domínio do chamador; qualquer outro erro passa intacto.
    pub fn on_fk_violation(self, domain: AppError) -> AppError {
        match &self {
            AppError::DatabaseError(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                domain
            }
            _ => self,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::ClientNotFound => (StatusCode::NOT_FOUND, "Cliente não encontrado."),
            AppError::ObjectNotFound => (StatusCode::NOT_FOUND, "Objeto não encontrado."),
            AppError::ServiceNotFound => (StatusCode::NOT_FOUND, "Serviço não encontrado."),
            AppError::LicenceNotFound => (StatusCode::NOT_FOUND, "Licença não encontrada."),
            AppError::LicencesAttached => (
                StatusCode::CONFLICT,
                "Existem licenças vinculadas; remova-as primeiro.",
            ),

            // Todos os outros (DatabaseError, NotificationDispatch, InternalServerError)
            // viram 500. O `tracing` loga a mensagem detalhada do `thiserror`.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn not_found_variants_map_to_404() {
        assert_eq!(status_of(AppError::ClientNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::ObjectNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::ServiceNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::LicenceNotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn attached_licences_block_deletes_with_409() {
        assert_eq!(status_of(AppError::LicencesAttached), StatusCode::CONFLICT);
    }

    #[test]
    fn fk_remap_leaves_non_fk_errors_alone() {
        let err = AppError::DatabaseError(sqlx::Error::RowNotFound)
            .on_fk_violation(AppError::LicencesAttached);
        assert!(matches!(err, AppError::DatabaseError(_)));

        let err = AppError::LicenceNotFound.on_fk_violation(AppError::ClientNotFound);
        assert!(matches!(err, AppError::LicenceNotFound));
    }

    #[test]
    fn validation_errors_map_to_400() {
        let mut errors = validator::ValidationErrors::new();
        let mut field_err = validator::ValidationError::new("length");
        field_err.message = Some("O tin deve ter exatamente 10 caracteres".into());
        errors.add("tin", field_err);

        let response = AppError::ValidationError(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn downstream_failures_map_to_500() {
        assert_eq!(
            status_of(AppError::NotificationDispatch("fila indisponível".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::DatabaseError(sqlx::Error::RowNotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
