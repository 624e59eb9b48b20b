use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada condição visível ao usuário tem a sua própria variante: nada
// é engolido nem agrupado num "erro genérico".
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("CNPJ já existe")]
    CnpjAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Empresa não encontrada")]
    CompanyNotFound,

    #[error("Documento não encontrado")]
    DocumentNotFound,

    // A máquina de estados: empresa/documento já está em status terminal.
    #[error("Transição de status inválida")]
    InvalidTransition,

    #[error("Motivo da recusa ausente")]
    MissingRejectionReason,

    // Negações de login derivadas do status da empresa (Access Control Policy).
    #[error("Usuário sem empresa vinculada")]
    NoCompany,

    #[error("Cadastro em análise")]
    RegistrationPending,

    #[error("Cadastro recusado")]
    RegistrationRejected,

    #[error("Upload inválido")]
    InvalidUpload,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Falha de E/S no armazenamento de arquivos
    #[error("Erro de armazenamento: {0}")]
    StorageError(#[from] std::io::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo por campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            // As mensagens seguem o que as telas exibem hoje; mudar o texto
            // aqui muda o que o usuário lê.
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este email já está cadastrado no sistema")
            }
            AppError::CnpjAlreadyExists => {
                (StatusCode::CONFLICT, "Este CNPJ já está cadastrado no sistema")
            }
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Email ou senha incorretos"),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Você não tem permissão para acessar este recurso",
            ),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
            AppError::CompanyNotFound => (StatusCode::NOT_FOUND, "Empresa não encontrada."),
            AppError::DocumentNotFound => (StatusCode::NOT_FOUND, "Documento não encontrado."),
            AppError::InvalidTransition => (
                StatusCode::CONFLICT,
                "Esta análise já foi concluída e não pode ser alterada.",
            ),
            AppError::MissingRejectionReason => {
                (StatusCode::BAD_REQUEST, "O motivo da recusa é obrigatório.")
            }
            AppError::NoCompany => (StatusCode::BAD_REQUEST, "Usuário sem empresa vinculada"),
            AppError::RegistrationPending => (
                StatusCode::BAD_REQUEST,
                "Seu cadastro está em análise. Aguarde a aprovação do administrador.",
            ),
            AppError::RegistrationRejected => (
                StatusCode::BAD_REQUEST,
                "Seu cadastro foi recusado. Entre em contato com o administrador.",
            ),
            AppError::InvalidUpload => (
                StatusCode::BAD_REQUEST,
                "Envio inválido: o arquivo e o nome do documento são obrigatórios.",
            ),

            // Todos os outros erros viram 500. O `tracing` loga o detalhe;
            // o cliente recebe só a mensagem genérica.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn conflitos_de_unicidade_viram_409() {
        assert_eq!(status_of(AppError::EmailAlreadyExists), StatusCode::CONFLICT);
        assert_eq!(status_of(AppError::CnpjAlreadyExists), StatusCode::CONFLICT);
    }

    #[test]
    fn violacao_da_maquina_de_estados_vira_409() {
        assert_eq!(status_of(AppError::InvalidTransition), StatusCode::CONFLICT);
    }

    #[test]
    fn negacoes_de_login_viram_400_distintos() {
        assert_eq!(status_of(AppError::NoCompany), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AppError::RegistrationPending), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AppError::RegistrationRejected), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn autenticacao_e_autorizacao_tem_status_proprios() {
        assert_eq!(status_of(AppError::InvalidCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AppError::InvalidToken), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AppError::Forbidden), StatusCode::FORBIDDEN);
    }

    #[test]
    fn ausencia_de_entidade_vira_404() {
        assert_eq!(status_of(AppError::UserNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::CompanyNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::DocumentNotFound), StatusCode::NOT_FOUND);
    }
}
