// src/services/review_service.rs
//
// O motor de aprovação: traduz a decisão do administrador em transição de
// status, na empresa e no documento. As duas análises são deliberadamente
// independentes: aprovar o cadastro não mexe nos documentos e recusar um
// documento não revoga o acesso da empresa.

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, DocumentRepository},
    models::{company::Company, document::Document, review::ReviewDecision},
};

#[derive(Clone)]
pub struct ReviewService {
    company_repo: CompanyRepository,
    document_repo: DocumentRepository,
}

impl ReviewService {
    pub fn new(company_repo: CompanyRepository, document_repo: DocumentRepository) -> Self {
        Self {
            company_repo,
            document_repo,
        }
    }

    // Decisão sobre o cadastro da empresa: PENDING → ACTIVE | REJECTED.
    pub async fn decide_company(
        &self,
        company_id: Uuid,
        decision: ReviewDecision,
    ) -> Result<Company, AppError> {
        let company = self
            .company_repo
            .set_status(company_id, decision.company_status())
            .await?;

        tracing::info!(
            "🏢 Cadastro {} → {:?}",
            company.fantasy_name,
            company.status
        );

        Ok(company)
    }

    // Decisão sobre um documento: PENDING → APPROVED | REJECTED.
    // Recusa exige motivo não-vazio; aprovação descarta qualquer motivo.
    pub async fn decide_document(
        &self,
        document_id: Uuid,
        decision: ReviewDecision,
        reason: Option<&str>,
    ) -> Result<Document, AppError> {
        let reason = normalize_rejection_reason(decision, reason)?;

        let document = self
            .document_repo
            .set_status(document_id, decision.document_status(), reason.as_deref())
            .await?;

        tracing::info!("📄 Documento {} → {:?}", document.name, document.status);

        Ok(document)
    }
}

// Regra do motivo, isolada para ser testável sem banco:
// REJECT sem motivo (ou só com espaços) falha antes de tocar o store;
// APPROVE nunca carrega motivo.
fn normalize_rejection_reason(
    decision: ReviewDecision,
    reason: Option<&str>,
) -> Result<Option<String>, AppError> {
    match decision {
        ReviewDecision::Approve => Ok(None),
        ReviewDecision::Reject => {
            let trimmed = reason.map(str::trim).unwrap_or("");
            if trimmed.is_empty() {
                Err(AppError::MissingRejectionReason)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recusa_sem_motivo_falha() {
        assert!(matches!(
            normalize_rejection_reason(ReviewDecision::Reject, None),
            Err(AppError::MissingRejectionReason)
        ));
        assert!(matches!(
            normalize_rejection_reason(ReviewDecision::Reject, Some("")),
            Err(AppError::MissingRejectionReason)
        ));
        assert!(matches!(
            normalize_rejection_reason(ReviewDecision::Reject, Some("   ")),
            Err(AppError::MissingRejectionReason)
        ));
    }

    #[test]
    fn recusa_com_motivo_preserva_o_texto() {
        let reason = normalize_rejection_reason(ReviewDecision::Reject, Some("ilegível")).unwrap();
        assert_eq!(reason.as_deref(), Some("ilegível"));
    }

    #[test]
    fn motivo_e_aparado() {
        let reason =
            normalize_rejection_reason(ReviewDecision::Reject, Some("  fora do prazo  ")).unwrap();
        assert_eq!(reason.as_deref(), Some("fora do prazo"));
    }

    #[test]
    fn aprovacao_descarta_motivo() {
        let reason =
            normalize_rejection_reason(ReviewDecision::Approve, Some("irrelevante")).unwrap();
        assert_eq!(reason, None);
    }
}
