// src/services/access_policy.rs
//
// A política de acesso num único lugar, como função pura: quem pode logar
// e quais rotas cada papel enxerga. Handlers e middleware consultam aqui;
// ninguém reimplementa a regra por conta própria.

use crate::{
    common::error::AppError,
    models::{auth::UserRole, company::CompanyStatus},
};

// Por que o login foi negado. O chamador converte para a mensagem certa;
// cada negação chega distinta na tela.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginDenial {
    NoCompany,
    RegistrationPending,
    RegistrationRejected,
}

impl From<LoginDenial> for AppError {
    fn from(denial: LoginDenial) -> Self {
        match denial {
            LoginDenial::NoCompany => AppError::NoCompany,
            LoginDenial::RegistrationPending => AppError::RegistrationPending,
            LoginDenial::RegistrationRejected => AppError::RegistrationRejected,
        }
    }
}

// Decide se o usuário pode autenticar, em função só do papel e do status
// da empresa (ou da ausência dela). Sem efeito colateral, sem consulta:
// entradas iguais, decisão igual.
pub fn can_authenticate(
    role: UserRole,
    company_status: Option<CompanyStatus>,
) -> Result<(), LoginDenial> {
    match role {
        // Administrador não depende de empresa.
        UserRole::Admin => Ok(()),
        UserRole::Supplier => match company_status {
            None => Err(LoginDenial::NoCompany),
            Some(CompanyStatus::Pending) => Err(LoginDenial::RegistrationPending),
            Some(CompanyStatus::Rejected) => Err(LoginDenial::RegistrationRejected),
            Some(CompanyStatus::Active) => Ok(()),
        },
    }
}

// As rotas que o front conhece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Modules,
    DocumentModeration,
    SupplierDocuments,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Modules => "/modules",
            Route::DocumentModeration => "/documentos",
            Route::SupplierDocuments => "/supplier",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Modules => "Home",
            Route::DocumentModeration => "Gestão de Documentos",
            Route::SupplierDocuments => "Meus Documentos",
        }
    }
}

// Mapa estático papel → rotas. Avaliado a cada chamada, nunca cacheado:
// tem que refletir o papel exatamente, sem visão parcial.
pub fn navigation_for(role: UserRole) -> &'static [Route] {
    match role {
        UserRole::Admin => &[Route::Modules, Route::DocumentModeration],
        UserRole::Supplier => &[Route::Modules, Route::SupplierDocuments],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_sempre_pode_logar() {
        assert!(can_authenticate(UserRole::Admin, None).is_ok());
        assert!(can_authenticate(UserRole::Admin, Some(CompanyStatus::Pending)).is_ok());
        assert!(can_authenticate(UserRole::Admin, Some(CompanyStatus::Rejected)).is_ok());
    }

    #[test]
    fn fornecedor_sem_empresa_e_negado() {
        assert_eq!(
            can_authenticate(UserRole::Supplier, None),
            Err(LoginDenial::NoCompany)
        );
    }

    // Cenário: empresa recém-registrada está PENDING e o responsável
    // ainda não consegue logar.
    #[test]
    fn fornecedor_com_cadastro_em_analise_e_negado() {
        assert_eq!(
            can_authenticate(UserRole::Supplier, Some(CompanyStatus::Pending)),
            Err(LoginDenial::RegistrationPending)
        );
    }

    #[test]
    fn fornecedor_com_cadastro_recusado_e_negado() {
        assert_eq!(
            can_authenticate(UserRole::Supplier, Some(CompanyStatus::Rejected)),
            Err(LoginDenial::RegistrationRejected)
        );
    }

    // Cenário: depois que o administrador aprova a empresa, o mesmo
    // usuário passa a poder autenticar.
    #[test]
    fn fornecedor_com_empresa_ativa_pode_logar() {
        assert!(can_authenticate(UserRole::Supplier, Some(CompanyStatus::Active)).is_ok());
    }

    // A política é função pura: mesma entrada, mesma decisão, sempre.
    #[test]
    fn decisao_e_deterministica() {
        for _ in 0..3 {
            assert_eq!(
                can_authenticate(UserRole::Supplier, Some(CompanyStatus::Pending)),
                Err(LoginDenial::RegistrationPending)
            );
        }
    }

    #[test]
    fn cada_papel_ve_suas_rotas_e_a_raiz_compartilhada() {
        let admin = navigation_for(UserRole::Admin);
        let supplier = navigation_for(UserRole::Supplier);

        assert!(admin.contains(&Route::Modules));
        assert!(supplier.contains(&Route::Modules));

        assert!(admin.contains(&Route::DocumentModeration));
        assert!(!admin.contains(&Route::SupplierDocuments));

        assert!(supplier.contains(&Route::SupplierDocuments));
        assert!(!supplier.contains(&Route::DocumentModeration));
    }

    #[test]
    fn negacao_vira_o_erro_correspondente() {
        assert!(matches!(
            AppError::from(LoginDenial::NoCompany),
            AppError::NoCompany
        ));
        assert!(matches!(
            AppError::from(LoginDenial::RegistrationPending),
            AppError::RegistrationPending
        ));
        assert!(matches!(
            AppError::from(LoginDenial::RegistrationRejected),
            AppError::RegistrationRejected
        ));
    }
}
