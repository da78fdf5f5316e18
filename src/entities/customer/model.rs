//! Customer account document

use crate::core::{Document, FieldValue};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const ROLE_USER: &str = "ROLE_USER";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// A registered customer
///
/// `password` holds the argon2id hash. It is stored but never sent to
/// clients; handlers respond with [`CustomerProfile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub customer_code: i64,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub mail: Option<String>,
    #[serde(default)]
    pub tel: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Customer {
    /// Stored roles plus `ROLE_USER`, each listed once
    pub fn roles(&self) -> Vec<String> {
        let mut roles: IndexSet<String> = self.roles.iter().cloned().collect();
        roles.insert(ROLE_USER.to_string());
        roles.into_iter().collect()
    }

    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ROLE_ADMIN)
    }

    pub fn profile(&self) -> CustomerProfile {
        CustomerProfile {
            customer_code: self.customer_code,
            username: self.username.clone(),
            address: self.address.clone(),
            mail: self.mail.clone(),
            tel: self.tel.clone(),
            roles: self.roles(),
        }
    }
}

impl Document for Customer {
    fn collection() -> &'static str {
        "customers"
    }

    fn code_field() -> &'static str {
        "customerCode"
    }

    fn entity_name() -> &'static str {
        "Customer"
    }

    fn code(&self) -> i64 {
        self.customer_code
    }

    fn assign_code(&mut self, code: i64) {
        self.customer_code = code;
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let optional = |value: &Option<String>| {
            value
                .as_ref()
                .map_or(FieldValue::Null, |v| FieldValue::String(v.clone()))
        };

        match field {
            "customerCode" => Some(FieldValue::Integer(self.customer_code)),
            "username" => Some(FieldValue::String(self.username.clone())),
            "mail" => Some(optional(&self.mail)),
            "address" => Some(optional(&self.address)),
            "tel" => Some(optional(&self.tel)),
            _ => None,
        }
    }
}

/// Public view of a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    pub customer_code: i64,
    pub username: String,
    pub address: Option<String>,
    pub mail: Option<String>,
    pub tel: Option<String>,
    pub roles: Vec<String>,
}

/// Registration form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterCustomer {
    #[validate(length(min = 3, max = 50, message = "must be 3 to 50 characters"))]
    pub username: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
    #[validate(email(message = "must be a valid email address"))]
    pub mail: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    pub tel: Option<String>,
}

/// Login form
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
