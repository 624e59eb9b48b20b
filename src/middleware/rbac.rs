// src/middleware/rbac.rs
//
// Autorização por papel no servidor. O front até esconde botões, mas isso
// é UX: a fronteira de segurança é este extrator, em toda rota mutadora
// de moderação.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    models::auth::{User, UserRole},
};

/// O trait que define o papel exigido por uma rota
pub trait RoleDef: Send + Sync + 'static {
    fn role() -> UserRole;
}

/// O extrator (guardião): só deixa passar quem tem o papel exigido.
/// Pressupõe o `auth_guard` antes na cadeia: sem usuário nos extensions,
/// a resposta é 401, não 403.
pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<User>().ok_or(AppError::InvalidToken)?;

        if user.role != T::role() {
            return Err(AppError::Forbidden);
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS PAPÉIS (TIPOS)
// ---

pub struct AdminOnly;
impl RoleDef for AdminOnly {
    fn role() -> UserRole {
        UserRole::Admin
    }
}
