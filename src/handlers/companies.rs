use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{AdminOnly, RequireRole},
    models::{
        company::{Company, SupplierAccount},
        review::CompanyDecisionPayload,
    },
};

// Visão de moderação: todas as empresas com o fornecedor responsável.
pub async fn list_suppliers(
    State(app_state): State<AppState>,
    RequireRole(_admin): RequireRole<AdminOnly>,
) -> Result<Json<Vec<SupplierAccount>>, AppError> {
    let suppliers: Vec<SupplierAccount> = app_state
        .company_repo
        .list_with_responsible()
        .await?
        .into_iter()
        .map(SupplierAccount::from)
        .collect();

    Ok(Json(suppliers))
}

// Decisão do administrador sobre o cadastro. Não cascateia para os
// documentos já enviados: cada um mantém a própria análise.
pub async fn decide_company(
    State(app_state): State<AppState>,
    RequireRole(_admin): RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CompanyDecisionPayload>,
) -> Result<Json<Company>, AppError> {
    let company = app_state
        .review_service
        .decide_company(id, payload.decision)
        .await?;

    Ok(Json(company))
}
