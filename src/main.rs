//src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tokio::net::TcpListener;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

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

    // Seed do administrador (idempotente), se as variáveis estiverem definidas
    if let (Ok(email), Ok(password)) = (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD")) {
        let name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin Master".to_string());
        app_state
            .auth_service
            .ensure_admin(&name, &email, &password)
            .await
            .expect("Falha ao criar o administrador inicial.");
    } else {
        tracing::warn!("ADMIN_EMAIL/ADMIN_PASSWORD não definidos; seed do administrador pulado.");
    }

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Documentos: upload e listagem para a sessão; decisão e download
    // protegidos por dentro (papel/posse) nos próprios handlers.
    let document_routes = Router::new()
        .route(
            "/",
            post(handlers::documents::upload_document).get(handlers::documents::list_documents),
        )
        .route("/{id}/file", get(handlers::documents::download_document))
        .route("/{id}/status", patch(handlers::documents::decide_document))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Moderação de cadastros (somente admin, imposto pelo RequireRole)
    let company_routes = Router::new()
        .route("/", get(handlers::companies::list_suppliers))
        .route("/{id}/status", patch(handlers::companies::decide_company))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let navigation_routes = Router::new()
        .route("/", get(handlers::navigation::my_navigation))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/documents", document_routes)
        .nest("/api/companies", company_routes)
        .nest("/api/navigation", navigation_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
