// src/services/structure_service.rs
//
// CRUD fino de objetos e serviços, com delegação direta ao repositório.
// A consistência de status não passa por aqui.

use sqlx::Postgres;

use crate::{
    common::error::AppError,
    db::{ClientRepository, StructureRepository},
    models::structure::{ClientObject, ObjectDetail, Service, ServiceDetail},
};

#[derive(Clone)]
pub struct StructureService {
    structure_repo: StructureRepository,
    client_repo: ClientRepository,
}

impl StructureService {
    pub fn new(structure_repo: StructureRepository, client_repo: ClientRepository) -> Self {
        Self {
            structure_repo,
            client_repo,
        }
    }

    // --- OBJETOS ---

    pub async fn create_object<'e, E>(
        &self,
        executor: E,
        name: &str,
        client_id: i32,
    ) -> Result<ClientObject, AppError>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        // client_id de objeto é FK obrigatória: endereçou cliente, ele existe.
        if self.client_repo.get(client_id).await?.is_none() {
            return Err(AppError::ClientNotFound);
        }

        self.structure_repo
            .create_object(executor, name, client_id)
            .await
    }

    pub async fn get_object(&self, id: i32) -> Result<ObjectDetail, AppError> {
        let object = self
            .structure_repo
            .find_object(id)
            .await?
            .ok_or(AppError::ObjectNotFound)?;

        let services = self.structure_repo.services_of_object(id).await?;

        Ok(ObjectDetail { object, services })
    }

    pub async fn list_objects(&self) -> Result<Vec<ClientObject>, AppError> {
        self.structure_repo.list_objects().await
    }

    pub async fn update_object<'e, E>(
        &self,
        executor: E,
        id: i32,
        name: &str,
        client_id: i32,
    ) -> Result<ClientObject, AppError>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        // Mesma checagem do create: client_id novo precisa resolver.
        if self.client_repo.get(client_id).await?.is_none() {
            return Err(AppError::ClientNotFound);
        }

        self.structure_repo
            .update_object(executor, id, name, client_id)
            .await?
            .ok_or(AppError::ObjectNotFound)
    }

    pub async fn delete_object<'e, E>(&self, executor: E, id: i32) -> Result<(), AppError>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        let deleted = self
            .structure_repo
            .delete_object(executor, id)
            .await
            .map_err(|e| e.on_fk_violation(AppError::LicencesAttached))?;
        if deleted == 0 {
            return Err(AppError::ObjectNotFound);
        }
        Ok(())
    }

    // --- SERVIÇOS ---

    pub async fn create_service<'e, E>(
        &self,
        executor: E,
        name: &str,
        object_id: i32,
    ) -> Result<Service, AppError>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        if self.structure_repo.find_object(object_id).await?.is_none() {
            return Err(AppError::ObjectNotFound);
        }

        self.structure_repo
            .create_service(executor, name, object_id)
            .await
    }

    pub async fn get_service(&self, id: i32) -> Result<ServiceDetail, AppError> {
        let service = self
            .structure_repo
            .find_service(id)
            .await?
            .ok_or(AppError::ServiceNotFound)?;

        let licences = self.structure_repo.licences_of_service(id).await?;

        Ok(ServiceDetail { service, licences })
    }

    pub async fn list_services(&self) -> Result<Vec<Service>, AppError> {
        self.structure_repo.list_services().await
    }

    pub async fn update_service<'e, E>(
        &self,
        executor: E,
        id: i32,
        name: &str,
        object_id: i32,
    ) -> Result<Service, AppError>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        // Mesma checagem do create: object_id novo precisa resolver.
        if self.structure_repo.find_object(object_id).await?.is_none() {
            return Err(AppError::ObjectNotFound);
        }

        self.structure_repo
            .update_service(executor, id, name, object_id)
            .await?
            .ok_or(AppError::ServiceNotFound)
    }

    pub async fn delete_service<'e, E>(&self, executor: E, id: i32) -> Result<(), AppError>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        let deleted = self
            .structure_repo
            .delete_service(executor, id)
            .await
            .map_err(|e| e.on_fk_violation(AppError::LicencesAttached))?;
        if deleted == 0 {
            return Err(AppError::ServiceNotFound);
        }
        Ok(())
    }
}
