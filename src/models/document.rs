// src/models/document.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Ciclo de vida da análise de um documento. Igual ao da empresa:
// PENDING aceita uma única decisão, APPROVED/REJECTED são terminais.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "document_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentStatus {
    Pending,
    Approved,
    Rejected,
}

impl DocumentStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DocumentStatus::Pending)
    }
}

// Tipos de arquivo aceitos pelo portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "document_file_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Jpg,
    Png,
}

impl FileType {
    // Infere o tipo pela extensão do nome do arquivo enviado.
    // Extensão ausente ou desconhecida vira 'pdf' de propósito: o portal
    // prefere aceitar o envio com o tipo padrão a recusar o upload.
    pub fn from_file_name(file_name: &str) -> Self {
        let ext = file_name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("jpg") => FileType::Jpg,
            Some("png") => FileType::Png,
            _ => FileType::Pdf,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Jpg => "jpg",
            FileType::Png => "png",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            FileType::Pdf => "application/pdf",
            FileType::Jpg => "image/jpeg",
            FileType::Png => "image/png",
        }
    }
}

// Documento enviado por um fornecedor, como vem do banco
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub file_type: FileType,
    pub file_url: String,
    pub status: DocumentStatus,
    // Presente se (e somente se) o documento foi recusado.
    pub rejection_reason: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infere_tipo_pela_extensao() {
        assert_eq!(FileType::from_file_name("contrato.pdf"), FileType::Pdf);
        assert_eq!(FileType::from_file_name("foto.jpg"), FileType::Jpg);
        assert_eq!(FileType::from_file_name("FOTO.PNG"), FileType::Png);
    }

    #[test]
    fn extensao_desconhecida_ou_ausente_vira_pdf() {
        assert_eq!(FileType::from_file_name("planilha.xlsx"), FileType::Pdf);
        assert_eq!(FileType::from_file_name("sem_extensao"), FileType::Pdf);
        assert_eq!(FileType::from_file_name("foto.jpeg"), FileType::Pdf);
        assert_eq!(FileType::from_file_name(""), FileType::Pdf);
    }

    #[test]
    fn pending_e_o_unico_status_nao_terminal() {
        assert!(!DocumentStatus::Pending.is_terminal());
        assert!(DocumentStatus::Approved.is_terminal());
        assert!(DocumentStatus::Rejected.is_terminal());
    }

    #[test]
    fn mime_acompanha_o_tipo() {
        assert_eq!(FileType::Pdf.mime(), "application/pdf");
        assert_eq!(FileType::Jpg.mime(), "image/jpeg");
        assert_eq!(FileType::Png.mime(), "image/png");
    }
}
