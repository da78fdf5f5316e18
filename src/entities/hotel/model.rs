//! Hotel document and its create/update payload

use crate::core::validation::PayloadValidator;
use crate::core::validation::validators::{matches, required, string};
use crate::core::{Document, FieldValue, ValidationError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// One or more `*` characters
pub static CATEGORY_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*+$").unwrap());

pub const CATEGORY_HINT: &str = "must contain only asterisks (\"*\", \"**\", \"***\"...)";

/// A hotel
///
/// Rooms are not embedded: they reference the hotel through `hotelCode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub hotel_code: i64,
    pub hotel_name: String,
    pub hotel_address: String,
    pub hotel_category: String,
}

impl Document for Hotel {
    fn collection() -> &'static str {
        "hotels"
    }

    fn code_field() -> &'static str {
        "hotelCode"
    }

    fn entity_name() -> &'static str {
        "Hotel"
    }

    fn code(&self) -> i64 {
        self.hotel_code
    }

    fn assign_code(&mut self, code: i64) {
        self.hotel_code = code;
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "hotelCode" => Some(FieldValue::Integer(self.hotel_code)),
            "hotelName" => Some(FieldValue::String(self.hotel_name.clone())),
            "hotelAddress" => Some(FieldValue::String(self.hotel_address.clone())),
            "hotelCategory" => Some(FieldValue::String(self.hotel_category.clone())),
            _ => None,
        }
    }
}

/// Mutable hotel fields as submitted by a client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotelInput {
    pub hotel_name: Option<String>,
    pub hotel_address: Option<String>,
    pub hotel_category: Option<String>,
}

fn rules() -> PayloadValidator {
    PayloadValidator::new()
        .field("hotelName", vec![Box::new(required()), Box::new(string())])
        .field(
            "hotelAddress",
            vec![Box::new(required()), Box::new(string())],
        )
        .field(
            "hotelCategory",
            vec![
                Box::new(required()),
                Box::new(string()),
                Box::new(matches(&CATEGORY_PATTERN, CATEGORY_HINT)),
            ],
        )
}

impl HotelInput {
    /// Check a raw JSON body and read it as an input
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        rules().validate(payload)?;
        serde_json::from_value(payload.clone()).map_err(|e| {
            let mut err = ValidationError::new();
            err.push("payload", e.to_string());
            err
        })
    }

    /// Validate every field, reporting all failures at once
    pub fn validate(&self) -> Result<(), ValidationError> {
        rules().validate(&json!({
            "hotelName": self.hotel_name,
            "hotelAddress": self.hotel_address,
            "hotelCategory": self.hotel_category,
        }))
    }

    /// Build the hotel stored under `hotel_code` (0 for a new hotel)
    pub fn into_hotel(self, hotel_code: i64) -> Result<Hotel, ValidationError> {
        self.validate()?;

        match (self.hotel_name, self.hotel_address, self.hotel_category) {
            (Some(hotel_name), Some(hotel_address), Some(hotel_category)) => Ok(Hotel {
                hotel_code,
                hotel_name,
                hotel_address,
                hotel_category,
            }),
            (name, address, category) => {
                let mut err = ValidationError::new();
                for (field, value) in [
                    ("hotelName", name),
                    ("hotelAddress", address),
                    ("hotelCategory", category),
                ] {
                    if value.is_none() {
                        err.push(field, "is required");
                    }
                }
                Err(err)
            }
        }
    }
}

impl From<&Hotel> for HotelInput {
    fn from(hotel: &Hotel) -> Self {
        Self {
            hotel_name: Some(hotel.hotel_name.clone()),
            hotel_address: Some(hotel.hotel_address.clone()),
            hotel_category: Some(hotel.hotel_category.clone()),
        }
    }
}
