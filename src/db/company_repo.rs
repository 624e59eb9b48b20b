// src/db/company_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::company::{Company, CompanyStatus, RegisterCompanyPayload, SupplierAccountRow},
};

const COMPANY_COLUMNS: &str = "id, cnpj, fantasy_name, social_reason, zip_code, address, \
     number, complement, neighborhood, city, state, phone, status, created_at";

// Repositório da tabela 'companies': o cadastro e o seu ciclo de vida.
#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let maybe_company = sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_company)
    }

    pub async fn find_by_cnpj(&self, cnpj: &str) -> Result<Option<Company>, AppError> {
        let maybe_company = sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE cnpj = $1"
        ))
        .bind(cnpj)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_company)
    }

    // Cria a empresa. O status NÃO aparece na lista de colunas de propósito:
    // o DEFAULT 'PENDING' do banco decide, não o payload do cliente.
    // Recebe o executor para participar da transação de registro.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        data: &RegisterCompanyPayload,
    ) -> Result<Company, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let company = sqlx::query_as::<_, Company>(&format!(
            "INSERT INTO companies \
             (cnpj, fantasy_name, social_reason, zip_code, address, number, \
              complement, neighborhood, city, state, phone) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COMPANY_COLUMNS}"
        ))
        .bind(&data.cnpj)
        .bind(&data.fantasy_name)
        .bind(&data.social_reason)
        .bind(&data.zip_code)
        .bind(&data.address)
        .bind(&data.number)
        .bind(&data.complement)
        .bind(&data.neighborhood)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.phone)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("companies_cnpj_key")
                {
                    return AppError::CnpjAlreadyExists;
                }
            }
            e.into()
        })?;

        Ok(company)
    }

    // Transição de status guardada: o UPDATE só acontece se o status atual
    // ainda é PENDING. Leitura, validação e escrita numa única instrução;
    // duas decisões concorrentes sobre a mesma empresa nunca passam as duas.
    pub async fn set_status(
        &self,
        id: Uuid,
        new_status: CompanyStatus,
    ) -> Result<Company, AppError> {
        let updated = sqlx::query_as::<_, Company>(&format!(
            "UPDATE companies SET status = $2 \
             WHERE id = $1 AND status = 'PENDING' \
             RETURNING {COMPANY_COLUMNS}"
        ))
        .bind(id)
        .bind(new_status)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(company) => Ok(company),
            // Zero linhas: ou a empresa não existe, ou já saiu de PENDING.
            None => match self.find_by_id(id).await? {
                Some(_) => Err(AppError::InvalidTransition),
                None => Err(AppError::CompanyNotFound),
            },
        }
    }

    // Visão de moderação do administrador: cada empresa com o seu
    // fornecedor responsável, da mais recente para a mais antiga.
    pub async fn list_with_responsible(&self) -> Result<Vec<SupplierAccountRow>, AppError> {
        let rows = sqlx::query_as::<_, SupplierAccountRow>(
            "SELECT \
                c.id AS company_id, c.cnpj, c.fantasy_name, c.social_reason, \
                c.zip_code, c.address, c.number, c.complement, c.neighborhood, \
                c.city, c.state, c.phone, c.status, c.created_at AS company_created_at, \
                u.id AS user_id, u.name AS user_name, u.email AS user_email \
             FROM companies c \
             JOIN users u ON u.company_id = c.id AND u.role = 'SUPPLIER' \
             ORDER BY c.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
