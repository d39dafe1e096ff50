//! In-memory account registry for customers and the workshop mechanic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    auth::{hash_password, new_id, verify_password},
    error::ApiError,
    models::Role,
};

#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub role: Role,
    password_hash: String,
}

impl Account {
    pub fn check_password(&self, password: &str) -> bool {
        verify_password(password, &self.password_hash)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountSummary {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub role: Role,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            name: account.name.clone(),
            phone: account.phone.clone(),
            email: account.email.clone(),
            role: account.role,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("Name is required.".to_string());
        }
        if self.phone.trim().is_empty() {
            errors.push("Phone number is required.".to_string());
        }
        if self.email.trim().is_empty() {
            errors.push("Email is required.".to_string());
        } else if !self.email.contains('@') {
            errors.push("Email address looks invalid.".to_string());
        }
        if self.password.is_empty() {
            errors.push("Password is required.".to_string());
        }
        errors
    }
}

/// Accounts keyed by name. Names are unique so that appointments, which are
/// matched to customers by name, never mix two people.
#[derive(Debug, Default)]
pub struct Accounts {
    by_name: HashMap<String, Account>,
}

impl Accounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        role: Role,
        name: &str,
        phone: &str,
        email: &str,
        password_hash: String,
    ) -> Result<&Account, ApiError> {
        let name = name.trim();
        if self.by_name.contains_key(name) {
            return Err(ApiError::Conflict(format!(
                "an account named {name:?} already exists"
            )));
        }
        let account = Account {
            id: new_id(),
            name: name.to_string(),
            phone: phone.trim().to_string(),
            email: email.trim().to_string(),
            role,
            password_hash,
        };
        Ok(self.by_name.entry(account.name.clone()).or_insert(account))
    }

    pub fn get(&self, name: &str) -> Option<&Account> {
        self.by_name.get(name.trim())
    }

    /// Returns the account only if the password matches its hash.
    #[cfg(test)]
    pub fn verify(&self, name: &str, password: &str) -> Option<Account> {
        let account = self.get(name)?;
        account.check_password(password).then(|| account.clone())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Validates the form and hashes the password before any lock is taken.
pub fn prepare_signup(form: &SignupForm) -> Result<String, ApiError> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    hash_password(&form.password)
        .map_err(|err| ApiError::Internal(format!("password hash failed: {err}")))
}
