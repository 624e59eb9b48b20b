// src/models/review.rs
//
// Tipos da decisão do administrador, compartilhados entre a análise
// de cadastro (empresa) e a análise de documentos.

use serde::Deserialize;

use crate::models::{company::CompanyStatus, document::DocumentStatus};

// A decisão em si. O cliente nunca manda o status final direto;
// manda APPROVE/REJECT e o servidor decide o que isso significa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    pub fn company_status(&self) -> CompanyStatus {
        match self {
            ReviewDecision::Approve => CompanyStatus::Active,
            ReviewDecision::Reject => CompanyStatus::Rejected,
        }
    }

    pub fn document_status(&self) -> DocumentStatus {
        match self {
            ReviewDecision::Approve => DocumentStatus::Approved,
            ReviewDecision::Reject => DocumentStatus::Rejected,
        }
    }
}

// PATCH /api/companies/{id}/status
#[derive(Debug, Deserialize)]
pub struct CompanyDecisionPayload {
    pub decision: ReviewDecision,
}

// PATCH /api/documents/{id}/status
#[derive(Debug, Deserialize)]
pub struct DocumentDecisionPayload {
    pub decision: ReviewDecision,
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decisao_mapeia_para_status_terminal() {
        assert_eq!(ReviewDecision::Approve.company_status(), CompanyStatus::Active);
        assert_eq!(ReviewDecision::Reject.company_status(), CompanyStatus::Rejected);
        assert_eq!(
            ReviewDecision::Approve.document_status(),
            DocumentStatus::Approved
        );
        assert_eq!(
            ReviewDecision::Reject.document_status(),
            DocumentStatus::Rejected
        );

        assert!(ReviewDecision::Approve.company_status().is_terminal());
        assert!(ReviewDecision::Reject.document_status().is_terminal());
    }

    #[test]
    fn decisao_desserializa_em_maiusculas() {
        let d: ReviewDecision = serde_json::from_str("\"APPROVE\"").unwrap();
        assert_eq!(d, ReviewDecision::Approve);
        let d: ReviewDecision = serde_json::from_str("\"REJECT\"").unwrap();
        assert_eq!(d, ReviewDecision::Reject);
        assert!(serde_json::from_str::<ReviewDecision>("\"approve\"").is_err());
    }
}
