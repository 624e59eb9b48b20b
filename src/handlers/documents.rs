use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{AdminOnly, RequireRole},
    },
    models::{document::Document, review::DocumentDecisionPayload},
};

// Upload de documento (multipart: campo "name" + campo "file").
// A empresa dona vem da sessão do fornecedor, nunca do corpo.
pub async fn upload_document(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Document>), AppError> {
    let mut name: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::InvalidUpload)?
    {
        let field_name = field.name().map(|s| s.to_string());
        match field_name.as_deref() {
            Some("name") => {
                name = Some(field.text().await.map_err(|_| AppError::InvalidUpload)?);
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|_| AppError::InvalidUpload)?;
                file = Some((file_name, bytes.to_vec()));
            }
            _ => {} // Campos desconhecidos são ignorados
        }
    }

    let name = name
        .filter(|n| !n.trim().is_empty())
        .ok_or(AppError::InvalidUpload)?;
    let (file_name, bytes) = file.ok_or(AppError::InvalidUpload)?;

    let document = app_state
        .document_service
        .upload(&user, name.trim(), &file_name, &bytes)
        .await?;

    Ok((StatusCode::CREATED, Json(document)))
}

// Listagem por papel: admin vê tudo, fornecedor vê a própria empresa.
// Sempre do mais recente para o mais antigo.
pub async fn list_documents(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Document>>, AppError> {
    let documents = app_state.document_service.list_for(&user).await?;
    Ok(Json(documents))
}

// Serve o blob do documento com o content-type do tipo inferido no upload.
pub async fn download_document(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (document, bytes) = app_state.document_service.load_file(&user, id).await?;

    let headers = [
        (header::CONTENT_TYPE, document.file_type.mime().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", download_file_name(&document)),
        ),
    ];

    Ok((headers, bytes))
}

// Nome do arquivo baixado: o nome que o fornecedor deu ao documento,
// saneado para caber num header, com a extensão inferida no upload.
// Nome inutilizável cai para o id.
fn download_file_name(document: &Document) -> String {
    let safe: String = document
        .name
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '"' | '\\' | '/' | ';'))
        .collect();
    let safe = safe.trim();

    let ext = document.file_type.extension();
    if safe.is_empty() {
        format!("{}.{}", document.id, ext)
    } else {
        format!("{}.{}", safe.trim_end_matches(&format!(".{ext}")), ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::{DocumentStatus, FileType};
    use chrono::Utc;

    fn documento(name: &str, file_type: FileType) -> Document {
        Document {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            name: name.to_string(),
            file_type,
            file_url: "/api/documents/x/file".to_string(),
            status: DocumentStatus::Pending,
            rejection_reason: None,
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn download_usa_o_nome_do_documento_e_nao_o_id() {
        let doc = documento("Contrato Social", FileType::Pdf);
        assert_eq!(download_file_name(&doc), "Contrato Social.pdf");
    }

    #[test]
    fn extensao_nao_e_duplicada_quando_o_nome_ja_a_tem() {
        let doc = documento("Contrato Social.pdf", FileType::Pdf);
        assert_eq!(download_file_name(&doc), "Contrato Social.pdf");
    }

    #[test]
    fn caracteres_perigosos_para_o_header_sao_removidos() {
        let doc = documento("ata\" de \\reunião;/2026", FileType::Jpg);
        assert_eq!(download_file_name(&doc), "ata de reunião2026.jpg");
    }

    #[test]
    fn nome_inutilizavel_cai_para_o_id() {
        let doc = documento("\"\\;", FileType::Png);
        assert_eq!(download_file_name(&doc), format!("{}.png", doc.id));
    }
}

// Decisão do administrador sobre um documento. O guardião de papel é a
// fronteira de segurança: fornecedor recebe 403 aqui, sempre.
pub async fn decide_document(
    State(app_state): State<AppState>,
    RequireRole(_admin): RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DocumentDecisionPayload>,
) -> Result<Json<Document>, AppError> {
    let document = app_state
        .review_service
        .decide_document(id, payload.decision, payload.reason.as_deref())
        .await?;

    Ok(Json(document))
}
