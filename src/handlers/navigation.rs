use axum::Json;
use serde::Serialize;

use crate::{middleware::auth::AuthenticatedUser, services::access_policy};

#[derive(Debug, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

// As rotas visíveis para o papel da sessão. Recalculado a cada chamada,
// direto da política. Nada de cache.
pub async fn my_navigation(AuthenticatedUser(user): AuthenticatedUser) -> Json<Vec<NavItem>> {
    let items = access_policy::navigation_for(user.role)
        .iter()
        .map(|route| NavItem {
            label: route.label(),
            path: route.path(),
        })
        .collect();

    Json(items)
}
