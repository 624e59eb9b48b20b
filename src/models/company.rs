// src/models/company.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::auth::validate_cnpj;

// Ciclo de vida do cadastro da empresa. Nasce PENDING; a decisão do
// administrador (ACTIVE ou REJECTED) é terminal. Não existe caminho de volta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "company_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum CompanyStatus {
    Pending,
    Active,
    Rejected,
}

impl CompanyStatus {
    // Só PENDING aceita transição.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CompanyStatus::Pending)
    }
}

// A empresa do fornecedor, como vem do banco
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub cnpj: String,
    pub fantasy_name: String,
    pub social_reason: String,
    pub zip_code: String,
    pub address: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub status: CompanyStatus,
    pub created_at: DateTime<Utc>,
}

// Dados da empresa no registro. O status NÃO é aceito do cliente:
// toda empresa entra PENDING, independente do que o payload diga.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCompanyPayload {
    #[validate(custom(function = "validate_cnpj"))]
    pub cnpj: String,
    #[validate(length(min = 1, message = "Nome fantasia é obrigatório"))]
    pub fantasy_name: String,
    #[validate(length(min = 1, message = "Razão social é obrigatória"))]
    pub social_reason: String,
    #[validate(length(min = 1, message = "CEP é obrigatório"))]
    pub zip_code: String,
    #[validate(length(min = 1, message = "Endereço é obrigatório"))]
    pub address: String,
    #[validate(length(min = 1, message = "Número é obrigatório"))]
    pub number: String,
    pub complement: Option<String>,
    #[validate(length(min = 1, message = "Bairro é obrigatório"))]
    pub neighborhood: String,
    #[validate(length(min = 1, message = "Cidade é obrigatória"))]
    pub city: String,
    #[validate(length(min = 2, max = 2, message = "Estado deve ter 2 caracteres"))]
    pub state: String,
    #[validate(length(min = 1, message = "Telefone é obrigatório"))]
    pub phone: String,
}

// Linha "achatada" do JOIN empresa + usuário responsável (visão do admin).
// Os aliases das colunas resolvem a colisão de nomes entre as tabelas.
#[derive(Debug, FromRow)]
pub struct SupplierAccountRow {
    pub company_id: Uuid,
    pub cnpj: String,
    pub fantasy_name: String,
    pub social_reason: String,
    pub zip_code: String,
    pub address: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub status: CompanyStatus,
    pub company_created_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
}

// Resumo público do responsável (sem hash de senha, por construção).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsibleUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

// Visão de moderação: a empresa e quem responde por ela.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierAccount {
    pub company: Company,
    pub responsible: ResponsibleUser,
}

impl From<SupplierAccountRow> for SupplierAccount {
    fn from(row: SupplierAccountRow) -> Self {
        SupplierAccount {
            company: Company {
                id: row.company_id,
                cnpj: row.cnpj,
                fantasy_name: row.fantasy_name,
                social_reason: row.social_reason,
                zip_code: row.zip_code,
                address: row.address,
                number: row.number,
                complement: row.complement,
                neighborhood: row.neighborhood,
                city: row.city,
                state: row.state,
                phone: row.phone,
                status: row.status,
                created_at: row.company_created_at,
            },
            responsible: ResponsibleUser {
                id: row.user_id,
                name: row.user_name,
                email: row.user_email,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_nao_e_terminal() {
        assert!(!CompanyStatus::Pending.is_terminal());
    }

    #[test]
    fn active_e_rejected_sao_terminais() {
        assert!(CompanyStatus::Active.is_terminal());
        assert!(CompanyStatus::Rejected.is_terminal());
    }

    #[test]
    fn status_serializa_como_o_banco_espera() {
        assert_eq!(
            serde_json::to_string(&CompanyStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(
            serde_json::to_string(&CompanyStatus::Active).unwrap(),
            "\"ACTIVE\""
        );
        assert_eq!(
            serde_json::to_string(&CompanyStatus::Rejected).unwrap(),
            "\"REJECTED\""
        );
    }
}
