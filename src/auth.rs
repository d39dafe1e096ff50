use actix_web::{dev::ServiceRequest, error::ErrorUnauthorized, web, Error, HttpMessage};
use actix_web_httpauth::extractors::basic::BasicAuth;
use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;
use uuid::Uuid;

use crate::{accounts::Account, models::Role, state::AppState};

pub const AUTH_REALM: &str = "MechEase";

/// The authenticated caller, attached to the request by the validators.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub role: Role,
}

impl From<Account> for AuthUser {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            phone: account.phone,
            email: account.email,
            role: account.role,
        }
    }
}

pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(hash) => Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok(),
        Err(_) => false,
    }
}

/// Looks the account up under the lock, then checks the hash without it.
pub fn authenticate_credentials(state: &AppState, name: &str, password: &str) -> Option<AuthUser> {
    let account = state.accounts().get(name).cloned()?;
    if !account.check_password(password) {
        return None;
    }
    Some(AuthUser::from(account))
}

fn authenticate(req: &ServiceRequest, credentials: &BasicAuth) -> Result<AuthUser, Error> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ErrorUnauthorized("Unauthorized"))?;
    let password = credentials.password().unwrap_or_default();
    authenticate_credentials(state, credentials.user_id(), password)
        .ok_or_else(|| ErrorUnauthorized("Unauthorized"))
}

async fn require_role(
    req: ServiceRequest,
    credentials: BasicAuth,
    role: Role,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    match authenticate(&req, &credentials) {
        Ok(user) => {
            if user.role != role {
                let message = match role {
                    Role::Customer => "Customer access required",
                    Role::Mechanic => "Admin access required",
                };
                return Err((ErrorUnauthorized(message), req));
            }
            req.extensions_mut().insert(user);
            Ok(req)
        }
        Err(err) => Err((err, req)),
    }
}

pub async fn customer_validator(
    req: ServiceRequest,
    credentials: BasicAuth,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    require_role(req, credentials, Role::Customer).await
}

pub async fn admin_validator(
    req: ServiceRequest,
    credentials: BasicAuth,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    require_role(req, credentials, Role::Mechanic).await
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("oil-change").unwrap();
        assert!(verify_password("oil-change", &hash));
        assert!(!verify_password("brakes", &hash));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn ids_are_distinct() {
        assert_ne!(new_id(), new_id());
    }
}
