//! Room HTTP handlers

use super::model::{Room, RoomInput, hotel_code_from_payload};
use super::service::{RoomFilters, RoomService};
use crate::core::{Page, PageQuery, ServiceError, ServiceResult};
use crate::entities::hotel::handlers::load_hotel;
use crate::server::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};

/// Raw `/room/browse` query string; empty values are ignored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomBrowseQuery {
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub floor: Option<String>,
    #[serde(rename = "numberOfBeds")]
    pub number_of_beds: Option<String>,
    #[serde(rename = "hotelCode")]
    pub hotel_code: Option<String>,
}

fn integer_param(field: &str, raw: Option<&str>) -> ServiceResult<Option<i64>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ServiceError::invalid_filter(field, format!("'{}' is not an integer", value))),
    }
}

impl RoomBrowseQuery {
    pub fn to_filters(&self) -> ServiceResult<RoomFilters> {
        Ok(RoomFilters {
            room_type: self.room_type.clone().filter(|s| !s.is_empty()),
            floor: integer_param("floor", self.floor.as_deref())?,
            number_of_beds: integer_param("numberOfBeds", self.number_of_beds.as_deref())?,
            hotel_code: integer_param("hotelCode", self.hotel_code.as_deref())?,
        })
    }
}

/// Fetch a room or fail with `NotFound`
pub async fn load_room(service: &RoomService, code: i64) -> ServiceResult<Room> {
    service
        .get_by_code(code)
        .await?
        .ok_or_else(|| ServiceError::not_found("Room", code))
}

pub async fn list_rooms(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ServiceResult<Json<Page<Room>>> {
    Ok(Json(state.rooms.list(query.page()).await?))
}

pub async fn browse_rooms(
    State(state): State<AppState>,
    Query(filters): Query<RoomBrowseQuery>,
    Query(query): Query<PageQuery>,
) -> ServiceResult<Json<Page<Room>>> {
    let filters = filters.to_filters()?;
    Ok(Json(state.rooms.browse(&filters, query.page()).await?))
}

pub async fn create_room(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ServiceResult<(StatusCode, Json<Value>)> {
    let hotel_code = hotel_code_from_payload(&payload)?;
    let input = RoomInput::from_payload(&payload)?;
    let hotel = load_hotel(&state.hotels, hotel_code).await?;
    let room = state.rooms.create(input, &hotel).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Room created successfully",
            "room": room
        })),
    ))
}

pub async fn get_room(
    State(state): State<AppState>,
    Path(code): Path<i64>,
) -> ServiceResult<Json<Room>> {
    Ok(Json(load_room(&state.rooms, code).await?))
}

pub async fn update_room(
    State(state): State<AppState>,
    Path(code): Path<i64>,
    Json(payload): Json<Value>,
) -> ServiceResult<Json<Value>> {
    let room = load_room(&state.rooms, code).await?;
    let hotel_code = hotel_code_from_payload(&payload)?;
    let input = RoomInput::from_payload(&payload)?;
    let hotel = load_hotel(&state.hotels, hotel_code).await?;
    let room = state.rooms.update(&room, input, &hotel).await?;

    Ok(Json(json!({
        "message": "Room updated successfully",
        "room": room
    })))
}

pub async fn delete_room(
    State(state): State<AppState>,
    Path(code): Path<i64>,
) -> ServiceResult<Json<Value>> {
    let room = load_room(&state.rooms, code).await?;
    state.rooms.delete(&room).await?;

    Ok(Json(json!({
        "message": "Room deleted successfully"
    })))
}
