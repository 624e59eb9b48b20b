// src/db/document_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::document::{Document, DocumentStatus, FileType},
};

const DOCUMENT_COLUMNS: &str =
    "id, user_id, company_id, name, file_type, file_url, status, rejection_reason, uploaded_at";

// Repositório da tabela 'documents': metadados dos arquivos enviados.
#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Insere o metadado do documento. O id vem do chamador porque o blob
    // já foi gravado com esse nome antes de chegarmos aqui.
    pub async fn create(
        &self,
        id: Uuid,
        user_id: Uuid,
        company_id: Uuid,
        name: &str,
        file_type: FileType,
        file_url: &str,
    ) -> Result<Document, AppError> {
        let document = sqlx::query_as::<_, Document>(&format!(
            "INSERT INTO documents (id, user_id, company_id, name, file_type, file_url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .bind(company_id)
        .bind(name)
        .bind(file_type)
        .bind(file_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(document)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, AppError> {
        let maybe_document = sqlx::query_as::<_, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_document)
    }

    // "Mais recente primeiro" é contrato com a tela, não acidente.
    pub async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents \
             WHERE company_id = $1 ORDER BY uploaded_at DESC"
        ))
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(documents)
    }

    pub async fn list_all(&self) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents ORDER BY uploaded_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(documents)
    }

    // Mesma transição guardada da empresa: só sai de PENDING, uma única vez.
    // O motivo é gravado na recusa e fica NULL na aprovação.
    pub async fn set_status(
        &self,
        id: Uuid,
        new_status: DocumentStatus,
        rejection_reason: Option<&str>,
    ) -> Result<Document, AppError> {
        let updated = sqlx::query_as::<_, Document>(&format!(
            "UPDATE documents SET status = $2, rejection_reason = $3 \
             WHERE id = $1 AND status = 'PENDING' \
             RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(new_status)
        .bind(rejection_reason)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(document) => Ok(document),
            None => match self.find_by_id(id).await? {
                Some(_) => Err(AppError::InvalidTransition),
                None => Err(AppError::DocumentNotFound),
            },
        }
    }
}
