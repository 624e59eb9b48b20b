// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::company::RegisterCompanyPayload;

// Papéis do sistema: o administrador modera, o fornecedor envia documentos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    Supplier,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub role: UserRole,
    // Presente se (e somente se) o usuário é SUPPLIER.
    pub company_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

// Dados do usuário responsável durante o registro
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Corpo completo do registro: empresa + usuário responsável, criados juntos.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(nested)]
    pub company: RegisterCompanyPayload,
    #[validate(nested)]
    pub user: RegisterUserPayload,
}

// Dados para login. O role faz parte da credencial: a busca é por (email, role).
#[derive(Debug, Deserialize, Validate)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    pub role: UserRole,
}

// Resposta de autenticação com o token e o perfil (sem a senha)
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub access_token: String,
    pub user: User,
}

// Resposta do registro. Nunca carrega token: a empresa nasce PENDING
// e o fornecedor só loga depois da aprovação do administrador.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub sub: Uuid, // Subject (ID do usuário)
    pub email: String,
    pub role: UserRole,
    pub company_id: Option<Uuid>,
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

// Valida o formato 00.000.000/0000-00 sem depender de regex.
pub fn validate_cnpj(cnpj: &str) -> Result<(), ValidationError> {
    let bytes = cnpj.as_bytes();

    let ok = bytes.len() == 18
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 6 => *b == b'.',
            10 => *b == b'/',
            15 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if ok {
        Ok(())
    } else {
        let mut err = ValidationError::new("cnpj_format");
        err.message = Some("CNPJ deve estar no formato 00.000.000/0000-00".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cnpj_no_formato_oficial_passa() {
        assert!(validate_cnpj("12.345.678/0001-99").is_ok());
        assert!(validate_cnpj("98.765.432/0001-10").is_ok());
    }

    #[test]
    fn cnpj_fora_do_formato_falha() {
        assert!(validate_cnpj("12345678000199").is_err());
        assert!(validate_cnpj("12.345.678/0001-9").is_err());
        assert!(validate_cnpj("12.345.678-0001/99").is_err());
        assert!(validate_cnpj("ab.cde.fgh/ijkl-mn").is_err());
        assert!(validate_cnpj("").is_err());
    }

    #[test]
    fn role_serializa_em_maiusculas() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(
            serde_json::to_string(&UserRole::Supplier).unwrap(),
            "\"SUPPLIER\""
        );
    }
}
