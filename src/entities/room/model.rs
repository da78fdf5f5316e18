//! Room document and its create/update payload

use crate::core::validation::PayloadValidator;
use crate::core::validation::validators::{integer, positive, required, string};
use crate::core::{Document, FieldValue, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A room, attached to exactly one hotel through `hotel_code`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_code: i64,
    pub floor: i64,
    #[serde(rename = "type")]
    pub room_type: String,
    pub number_of_beds: i64,
    pub hotel_code: i64,
}

impl Document for Room {
    fn collection() -> &'static str {
        "rooms"
    }

    fn code_field() -> &'static str {
        "roomCode"
    }

    fn entity_name() -> &'static str {
        "Room"
    }

    fn code(&self) -> i64 {
        self.room_code
    }

    fn assign_code(&mut self, code: i64) {
        self.room_code = code;
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "roomCode" => Some(FieldValue::Integer(self.room_code)),
            "floor" => Some(FieldValue::Integer(self.floor)),
            "type" => Some(FieldValue::String(self.room_type.clone())),
            "numberOfBeds" => Some(FieldValue::Integer(self.number_of_beds)),
            "hotelCode" => Some(FieldValue::Integer(self.hotel_code)),
            _ => None,
        }
    }
}

/// Mutable room fields as submitted by a client
///
/// The owning hotel is resolved separately and never read from here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomInput {
    pub floor: Option<i64>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub number_of_beds: Option<i64>,
}

fn rules() -> PayloadValidator {
    PayloadValidator::new()
        .field("floor", vec![Box::new(required()), Box::new(integer())])
        .field("type", vec![Box::new(required()), Box::new(string())])
        .field(
            "numberOfBeds",
            vec![
                Box::new(required()),
                Box::new(integer()),
                Box::new(positive()),
            ],
        )
}

impl RoomInput {
    /// Check a raw JSON body and read it as an input
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        rules().validate(payload)?;
        serde_json::from_value(payload.clone()).map_err(|e| {
            let mut err = ValidationError::new();
            err.push("payload", e.to_string());
            err
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        rules().validate(&json!({
            "floor": self.floor,
            "type": self.room_type,
            "numberOfBeds": self.number_of_beds,
        }))
    }

    /// Build the room stored under `room_code` (0 for a new room) inside `hotel_code`
    pub fn into_room(self, room_code: i64, hotel_code: i64) -> Result<Room, ValidationError> {
        self.validate()?;

        match (self.floor, self.room_type, self.number_of_beds) {
            (Some(floor), Some(room_type), Some(number_of_beds)) => Ok(Room {
                room_code,
                floor,
                room_type,
                number_of_beds,
                hotel_code,
            }),
            (floor, room_type, number_of_beds) => {
                let mut err = ValidationError::new();
                if floor.is_none() {
                    err.push("floor", "is required");
                }
                if room_type.is_none() {
                    err.push("type", "is required");
                }
                if number_of_beds.is_none() {
                    err.push("numberOfBeds", "is required");
                }
                Err(err)
            }
        }
    }
}

impl From<&Room> for RoomInput {
    fn from(room: &Room) -> Self {
        Self {
            floor: Some(room.floor),
            room_type: Some(room.room_type.clone()),
            number_of_beds: Some(room.number_of_beds),
        }
    }
}

/// Read the owning hotel's code out of a JSON body
pub fn hotel_code_from_payload(payload: &Value) -> Result<i64, ValidationError> {
    PayloadValidator::new()
        .field("hotelCode", vec![Box::new(required()), Box::new(integer())])
        .validate(payload)?;

    payload
        .get("hotelCode")
        .and_then(Value::as_i64)
        .ok_or_else(|| {
            let mut err = ValidationError::new();
            err.push("hotelCode", "is required");
            err
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suite() -> RoomInput {
        RoomInput {
            floor: Some(2),
            room_type: Some("suite".to_string()),
            number_of_beds: Some(2),
        }
    }

    #[test]
    fn test_room_serializes_type_field() {
        let room = suite().into_room(1, 1).unwrap();
        let value = serde_json::to_value(&room).unwrap();

        assert_eq!(
            value,
            json!({
                "roomCode": 1,
                "floor": 2,
                "type": "suite",
                "numberOfBeds": 2,
                "hotelCode": 1
            })
        );
    }

    #[test]
    fn test_floor_zero_is_allowed() {
        let input = RoomInput {
            floor: Some(0),
            ..suite()
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_beds_must_be_positive() {
        let input = RoomInput {
            number_of_beds: Some(0),
            ..suite()
        };
        assert_eq!(
            input.validate().unwrap_err().field_names(),
            vec!["numberOfBeds"]
        );
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let err = RoomInput::default().into_room(0, 1).unwrap_err();
        assert_eq!(err.field_names(), vec!["floor", "type", "numberOfBeds"]);
    }

    #[test]
    fn test_from_payload_rejects_non_integer_floor() {
        let err = RoomInput::from_payload(&json!({
            "floor": "second",
            "type": "suite",
            "numberOfBeds": 2
        }))
        .unwrap_err();
        assert_eq!(err.field_names(), vec!["floor"]);
    }

    #[test]
    fn test_hotel_code_from_payload() {
        assert_eq!(hotel_code_from_payload(&json!({"hotelCode": 4})), Ok(4));

        let err = hotel_code_from_payload(&json!({"floor": 1})).unwrap_err();
        assert_eq!(err.field_names(), vec!["hotelCode"]);

        let err = hotel_code_from_payload(&json!({"hotelCode": "4"})).unwrap_err();
        assert_eq!(err.field_names(), vec!["hotelCode"]);
    }
}
