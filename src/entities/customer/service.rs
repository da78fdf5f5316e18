//! Customer registration, credential checks and role management

use super::model::{Customer, CustomerProfile, ROLE_ADMIN, ROLE_USER, RegisterCustomer};
use crate::core::{
    DocumentStore, Filter, Page, PageRequest, ServiceError, ServiceResult, ValidationError,
    paginate,
};
use argon2::Argon2;
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

/// Hash a plain password with argon2id.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::PasswordHash(e.to_string()))
}

/// Verify a password against an argon2id hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Run `hash_password` on the blocking pool, off the async workers
async fn hash_off_runtime(password: String) -> ServiceResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ServiceError::PasswordHash(e.to_string()))?
}

/// Run `verify_password` on the blocking pool, off the async workers
async fn verify_off_runtime(password: String, hash: String) -> ServiceResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| ServiceError::PasswordHash(e.to_string()))
}

#[derive(Clone)]
pub struct CustomerService {
    customers: Arc<dyn DocumentStore<Customer>>,
    page_size: u64,
}

impl CustomerService {
    pub fn new(customers: Arc<dyn DocumentStore<Customer>>, page_size: u64) -> Self {
        Self {
            customers,
            page_size,
        }
    }

    pub async fn find_by_username(&self, username: &str) -> ServiceResult<Option<Customer>> {
        Ok(self
            .customers
            .find_one_by(&Filter::new().equals("username", username))
            .await?)
    }

    /// Create an account with a hashed password and no extra roles
    pub async fn register(&self, form: RegisterCustomer) -> ServiceResult<CustomerProfile> {
        form.validate().map_err(ValidationError::from)?;

        if self.find_by_username(&form.username).await?.is_some() {
            warn!(username = %form.username, "registration with taken username");
            return Err(ServiceError::AlreadyExists {
                entity: "Customer",
                key: form.username,
            });
        }

        let password = hash_off_runtime(form.password).await?;
        let customer = Customer {
            customer_code: 0,
            password,
            username: form.username,
            address: form.address,
            mail: Some(form.mail),
            tel: form.tel,
            roles: Vec::new(),
        };
        let customer = self.customers.insert(customer).await?;

        info!(
            customer_code = customer.customer_code,
            username = %customer.username,
            "customer registered"
        );
        Ok(customer.profile())
    }

    /// Check a username/password pair
    ///
    /// Unknown users and wrong passwords fail the same way.
    pub async fn authenticate(&self, username: &str, password: &str) -> ServiceResult<CustomerProfile> {
        let customer = match self.find_by_username(username).await? {
            Some(customer) => customer,
            None => {
                warn!(username, "authentication failed");
                return Err(ServiceError::InvalidCredentials);
            }
        };

        if verify_off_runtime(password.to_string(), customer.password.clone()).await? {
            debug!(username, "customer authenticated");
            Ok(customer.profile())
        } else {
            warn!(username, "authentication failed");
            Err(ServiceError::InvalidCredentials)
        }
    }

    /// Set the roles of `username` to user + admin
    pub async fn promote_to_admin(&self, username: &str) -> ServiceResult<CustomerProfile> {
        let mut customer = self
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found("Customer", username))?;

        customer.roles = vec![ROLE_USER.to_string(), ROLE_ADMIN.to_string()];
        let customer = self
            .customers
            .replace(customer)
            .await?
            .ok_or_else(|| ServiceError::not_found("Customer", username))?;

        info!(username, "customer promoted to admin");
        Ok(customer.profile())
    }

    pub async fn list(&self, page: u64) -> ServiceResult<Page<CustomerProfile>> {
        let request = PageRequest::new(page, self.page_size);
        let page = paginate(self.customers.as_ref(), &Filter::new(), request).await?;
        Ok(page.map(|c| c.profile()))
    }
}
