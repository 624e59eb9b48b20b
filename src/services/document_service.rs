// src/services/document_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DocumentRepository,
    models::{
        auth::{User, UserRole},
        document::{Document, FileType},
    },
    services::storage::FileStorage,
};

#[derive(Clone)]
pub struct DocumentService {
    repo: DocumentRepository,
    storage: FileStorage,
}

impl DocumentService {
    pub fn new(repo: DocumentRepository, storage: FileStorage) -> Self {
        Self { repo, storage }
    }

    // Upload do fornecedor. A empresa vem da sessão, nunca do cliente.
    pub async fn upload(
        &self,
        user: &User,
        name: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<Document, AppError> {
        let company_id = user.company_id.ok_or(AppError::NoCompany)?;

        let file_type = FileType::from_file_name(file_name);
        let id = Uuid::new_v4();

        // Ordem importa: o blob é gravado ANTES do metadado. Se o INSERT
        // falhar, sobra um arquivo órfão no disco, o que é aceitável.
        // Metadado apontando para blob inexistente não é.
        let file_url = self.storage.save(id, file_type, bytes).await?;

        let document = self
            .repo
            .create(id, user.id, company_id, name, file_type, &file_url)
            .await?;

        tracing::info!("📄 Documento recebido: {} ({})", document.name, document.id);

        Ok(document)
    }

    // Cada papel enxerga a sua fatia: o administrador tudo, o fornecedor
    // só os documentos da própria empresa.
    pub async fn list_for(&self, user: &User) -> Result<Vec<Document>, AppError> {
        match user.role {
            UserRole::Admin => self.repo.list_all().await,
            UserRole::Supplier => {
                let company_id = user.company_id.ok_or(AppError::NoCompany)?;
                self.repo.list_by_company(company_id).await
            }
        }
    }

    // Blob do documento, com autorização: administrador ou a empresa dona.
    pub async fn load_file(
        &self,
        user: &User,
        document_id: Uuid,
    ) -> Result<(Document, Vec<u8>), AppError> {
        let document = self
            .repo
            .find_by_id(document_id)
            .await?
            .ok_or(AppError::DocumentNotFound)?;

        let allowed = user.role == UserRole::Admin || user.company_id == Some(document.company_id);
        if !allowed {
            return Err(AppError::Forbidden);
        }

        let bytes = self.storage.load(document.id, document.file_type).await?;
        Ok((document, bytes))
    }
}
