// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{CompanyRepository, DocumentRepository, UserRepository},
    services::{
        auth::AuthService, document_service::DocumentService, review_service::ReviewService,
        storage::FileStorage,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub company_repo: CompanyRepository,
    pub auth_service: AuthService,
    pub document_service: DocumentService,
    pub review_service: ReviewService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let storage_dir = env::var("STORAGE_DIR").unwrap_or_else(|_| "./storage".to_string());

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let storage = FileStorage::new(storage_dir);
        storage
            .init()
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao preparar o armazenamento de arquivos: {}", e))?;

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let company_repo = CompanyRepository::new(db_pool.clone());
        let document_repo = DocumentRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            company_repo.clone(),
            jwt_secret,
            db_pool.clone(),
        );
        let document_service = DocumentService::new(document_repo.clone(), storage);
        let review_service = ReviewService::new(company_repo.clone(), document_repo);

        Ok(Self {
            db_pool,
            company_repo,
            auth_service,
            document_service,
            review_service,
        })
    }
}
