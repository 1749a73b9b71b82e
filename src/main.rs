//src/main.rs

use axum::{
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;

use licence_backoffice::{config::AppState, docs, handlers};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .compact()
        .init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let client_routes = Router::new()
        .route(
            "/clients",
            post(handlers::clients::create_client).get(handlers::clients::list_clients),
        )
        .route("/clients/note", post(handlers::clients::create_note))
        .route(
            "/clients/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
        .route("/companies", get(handlers::clients::list_companies))
        .route("/searchClients", get(handlers::clients::search_clients));

    let structure_routes = Router::new()
        .route(
            "/objects",
            post(handlers::objects::create_object).get(handlers::objects::list_objects),
        )
        .route(
            "/objects/{id}",
            get(handlers::objects::get_object)
                .put(handlers::objects::update_object)
                .delete(handlers::objects::delete_object),
        )
        .route(
            "/services",
            post(handlers::services::create_service).get(handlers::services::list_services),
        )
        .route(
            "/services/{id}",
            get(handlers::services::get_service)
                .put(handlers::services::update_service)
                .delete(handlers::services::delete_service),
        );

    let licence_routes = Router::new()
        .route("/licences", post(handlers::licences::create_licence))
        .route(
            "/licences/{id}",
            get(handlers::licences::get_licence)
                .put(handlers::licences::update_licence)
                .delete(handlers::licences::delete_licence),
        )
        .route("/licence", get(handlers::licences::list_licences))
        .route("/searchLicences", get(handlers::licences::search_licences));

    let dashboard_routes = Router::new()
        .route(
            "/general-statistics",
            get(handlers::stats::general_statistics),
        )
        .route("/last-activities", get(handlers::stats::last_activities))
        .route(
            "/notify_expiration/",
            post(handlers::notifications::notify_expiration),
        );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(docs::ApiDoc::openapi()) }),
        )
        .merge(client_routes)
        .merge(structure_routes)
        .merge(licence_routes)
        .merge(dashboard_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
