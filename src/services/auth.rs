// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, UserRepository},
    models::auth::{AuthResponse, Claims, LoginUserPayload, RegisterPayload, RegisterResponse, User},
    services::access_policy,
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    company_repo: CompanyRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        company_repo: CompanyRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            company_repo,
            jwt_secret,
            pool,
        }
    }

    // Registro do fornecedor: empresa + usuário responsável.
    // A empresa nasce PENDING e a resposta NUNCA traz token: o acesso
    // só abre quando o administrador aprovar o cadastro.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<RegisterResponse, AppError> {
        // Checagens de duplicidade antes de qualquer escrita. A corrida
        // residual é coberta pelas constraints únicas do banco.
        if self.user_repo.find_by_email(&payload.user.email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }
        if self
            .company_repo
            .find_by_cnpj(&payload.company.cnpj)
            .await?
            .is_some()
        {
            return Err(AppError::CnpjAlreadyExists);
        }

        // Hashing fora da transação (e fora do runtime async), pois não toca no banco.
        let password_clone = payload.user.password.clone();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // Empresa e responsável nascem na MESMA transação: uma empresa sem
        // responsável (ou o contrário) não faz sentido, então é tudo ou nada.
        let mut tx = self.pool.begin().await?;

        let company = self.company_repo.create(&mut *tx, &payload.company).await?;

        let user = self
            .user_repo
            .create_supplier(
                &mut *tx,
                &payload.user.name,
                &payload.user.email,
                &hashed_password,
                company.id,
            )
            .await?; // Se falhar aqui, a empresa criada acima é desfeita no drop do tx

        tx.commit().await?;

        tracing::info!(
            "📝 Novo cadastro de fornecedor: {} ({})",
            company.fantasy_name,
            company.cnpj
        );

        Ok(RegisterResponse {
            message: "Cadastro realizado com sucesso! Aguarde a aprovação do administrador."
                .to_string(),
            user,
        })
    }

    // Login com credencial escopada por papel. Senha correta não basta:
    // a política de acesso ainda pode negar pelo status da empresa.
    pub async fn login(&self, payload: &LoginUserPayload) -> Result<AuthResponse, AppError> {
        let user = self
            .user_repo
            .find_by_email_and_role(&payload.email, payload.role)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = payload.password.clone();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // A decisão final é da política: papel + status da empresa.
        let company_status = match user.company_id {
            Some(company_id) => self
                .company_repo
                .find_by_id(company_id)
                .await?
                .map(|c| c.status),
            None => None,
        };
        access_policy::can_authenticate(user.role, company_status)?;

        let token = self.create_token(&user)?;

        Ok(AuthResponse {
            message: "Login realizado com sucesso".to_string(),
            access_token: token,
            user,
        })
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    // Seed idempotente do administrador na subida do app.
    pub async fn ensure_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AppError> {
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Ok(());
        }

        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.user_repo
            .create_admin(&self.pool, name, email, &hashed_password)
            .await?;

        tracing::info!("👤 Administrador criado: {}", email);
        Ok(())
    }

    fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            company_id: user.company_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use uuid::Uuid;

    // O token preserva sub, papel e vínculo de empresa na ida e na volta.
    #[test]
    fn claims_sobrevivem_ao_round_trip_do_jwt() {
        let secret = "segredo-de-teste";
        let now = Utc::now();
        let user_id = Uuid::new_v4();
        let company_id = Uuid::new_v4();

        let claims = Claims {
            sub: user_id,
            email: "joao@tech.com".to_string(),
            role: UserRole::Supplier,
            company_id: Some(company_id),
            exp: (now + chrono::Duration::days(7)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap();

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, user_id);
        assert_eq!(decoded.claims.role, UserRole::Supplier);
        assert_eq!(decoded.claims.company_id, Some(company_id));
        assert_eq!(decoded.claims.email, "joao@tech.com");
    }

    #[test]
    fn token_com_segredo_errado_e_rejeitado() {
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "admin@docflow.com".to_string(),
            role: UserRole::Admin,
            company_id: None,
            exp: (now + chrono::Duration::days(7)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"segredo-a"),
        )
        .unwrap();

        assert!(
            decode::<Claims>(
                &token,
                &DecodingKey::from_secret(b"segredo-b"),
                &Validation::default(),
            )
            .is_err()
        );
    }
}
