// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        ClientRepository, LicenceRepository, NotificationRepository, StatsRepository,
        StructureRepository,
    },
    services::{
        ClientService, LicenceService, NotificationService, StatsService, StructureService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub client_service: ClientService,
    pub structure_service: StructureService,
    pub licence_service: LicenceService,
    pub stats_service: StatsService,
    pub notification_service: NotificationService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let client_repo = ClientRepository::new(db_pool.clone());
        let structure_repo = StructureRepository::new(db_pool.clone());
        let licence_repo = LicenceRepository::new(db_pool.clone());
        let stats_repo = StatsRepository::new(db_pool.clone());
        let notification_repo = NotificationRepository::new(db_pool.clone());

        let client_service = ClientService::new(client_repo.clone(), structure_repo.clone());
        let structure_service =
            StructureService::new(structure_repo.clone(), client_repo.clone());
        let licence_service = LicenceService::new(
            licence_repo.clone(),
            client_repo.clone(),
            structure_repo.clone(),
        );
        let stats_service =
            StatsService::new(stats_repo, licence_repo.clone(), client_repo.clone());
        let notification_service =
            NotificationService::new(notification_repo, licence_repo, client_repo);

        Ok(Self {
            db_pool,
            client_service,
            structure_service,
            licence_service,
            stats_service,
            notification_service,
        })
    }
}
