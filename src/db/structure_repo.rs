// src/db/structure_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::licences::Licence,
    models::structure::{ClientObject, Service},
};

// Repositório da hierarquia física (objects/services). CRUD puro:
// nenhuma destas tabelas participa da derivação de status.
#[derive(Clone)]
pub struct StructureRepository {
    pool: PgPool,
}

impl StructureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  OBJETOS
    // =========================================================================

    pub async fn create_object<'e, E>(
        &self,
        executor: E,
        name: &str,
        client_id: i32,
    ) -> Result<ClientObject, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let object = sqlx::query_as::<_, ClientObject>(
            "INSERT INTO objects (name, client_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(client_id)
        .fetch_one(executor)
        .await?;

        Ok(object)
    }

    pub async fn find_object(&self, id: i32) -> Result<Option<ClientObject>, AppError> {
        let object = sqlx::query_as::<_, ClientObject>("SELECT * FROM objects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(object)
    }

    pub async fn list_objects(&self) -> Result<Vec<ClientObject>, AppError> {
        let objects = sqlx::query_as::<_, ClientObject>("SELECT * FROM objects ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(objects)
    }

    pub async fn objects_of_client(&self, client_id: i32) -> Result<Vec<ClientObject>, AppError> {
        let objects =
            sqlx::query_as::<_, ClientObject>("SELECT * FROM objects WHERE client_id = $1 ORDER BY id ASC")
                .bind(client_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(objects)
    }

    pub async fn update_object<'e, E>(
        &self,
        executor: E,
        id: i32,
        name: &str,
        client_id: i32,
    ) -> Result<Option<ClientObject>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let object = sqlx::query_as::<_, ClientObject>(
            "UPDATE objects SET name = $2, client_id = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(client_id)
        .fetch_optional(executor)
        .await?;

        Ok(object)
    }

    pub async fn delete_object<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM objects WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  SERVIÇOS
    // =========================================================================

    pub async fn create_service<'e, E>(
        &self,
        executor: E,
        name: &str,
        object_id: i32,
    ) -> Result<Service, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let service = sqlx::query_as::<_, Service>(
            "INSERT INTO services (name, object_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(object_id)
        .fetch_one(executor)
        .await?;

        Ok(service)
    }

    pub async fn find_service(&self, id: i32) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(service)
    }

    pub async fn list_services(&self) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(services)
    }

    pub async fn services_of_object(&self, object_id: i32) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE object_id = $1 ORDER BY id ASC",
        )
        .bind(object_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    pub async fn licences_of_service(&self, service_id: i32) -> Result<Vec<Licence>, AppError> {
        let licences = sqlx::query_as::<_, Licence>(
            "SELECT * FROM licences WHERE service_id = $1 ORDER BY id ASC",
        )
        .bind(service_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(licences)
    }

    pub async fn update_service<'e, E>(
        &self,
        executor: E,
        id: i32,
        name: &str,
        object_id: i32,
    ) -> Result<Option<Service>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let service = sqlx::query_as::<_, Service>(
            "UPDATE services SET name = $2, object_id = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(object_id)
        .fetch_optional(executor)
        .await?;

        Ok(service)
    }

    pub async fn delete_service<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
