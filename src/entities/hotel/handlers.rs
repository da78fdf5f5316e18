//! Hotel HTTP handlers

use super::model::{Hotel, HotelInput};
use super::service::{HotelFilters, HotelService};
use crate::core::{Page, PageQuery, ServiceError, ServiceResult};
use crate::entities::room::model::{Room, RoomInput, hotel_code_from_payload};
use crate::server::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::{Value, json};

/// Fetch a hotel or fail with `NotFound`
pub async fn load_hotel(service: &HotelService, code: i64) -> ServiceResult<Hotel> {
    service
        .get_by_code(code)
        .await?
        .ok_or_else(|| ServiceError::not_found("Hotel", code))
}

pub async fn list_hotels(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ServiceResult<Json<Page<Hotel>>> {
    Ok(Json(state.hotels.list(query.page()).await?))
}

pub async fn browse_hotels(
    State(state): State<AppState>,
    Query(filters): Query<HotelFilters>,
    Query(query): Query<PageQuery>,
) -> ServiceResult<Json<Page<Hotel>>> {
    Ok(Json(state.hotels.browse(&filters, query.page()).await?))
}

pub async fn create_hotel(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ServiceResult<(StatusCode, Json<Value>)> {
    let input = HotelInput::from_payload(&payload)?;
    let hotel = state.hotels.create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Hotel created successfully",
            "hotel": hotel
        })),
    ))
}

pub async fn get_hotel(
    State(state): State<AppState>,
    Path(code): Path<i64>,
) -> ServiceResult<Json<Hotel>> {
    Ok(Json(load_hotel(&state.hotels, code).await?))
}

pub async fn update_hotel(
    State(state): State<AppState>,
    Path(code): Path<i64>,
    Json(payload): Json<Value>,
) -> ServiceResult<Json<Value>> {
    let hotel = load_hotel(&state.hotels, code).await?;
    let input = HotelInput::from_payload(&payload)?;
    let hotel = state.hotels.update(&hotel, input).await?;

    Ok(Json(json!({
        "message": "Hotel updated successfully",
        "hotel": hotel
    })))
}

pub async fn delete_hotel(
    State(state): State<AppState>,
    Path(code): Path<i64>,
) -> ServiceResult<Json<Value>> {
    let hotel = load_hotel(&state.hotels, code).await?;
    let rooms_removed = state.hotels.delete(&hotel).await?;

    Ok(Json(json!({
        "message": "Hotel deleted successfully",
        "roomsRemoved": rooms_removed
    })))
}

/// `POST /hotel/addRoomToHotel`, the hotel code travels in the body
pub async fn add_room_to_hotel(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ServiceResult<(StatusCode, Json<Value>)> {
    let hotel_code = hotel_code_from_payload(&payload)?;
    let input = RoomInput::from_payload(&payload)?;
    let hotel = load_hotel(&state.hotels, hotel_code).await?;
    let room = state.hotels.add_room_to_hotel(&hotel, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Room added to hotel successfully",
            "room": room
        })),
    ))
}

pub async fn remove_room_from_hotel(
    State(state): State<AppState>,
    Path((code, room_code)): Path<(i64, i64)>,
) -> ServiceResult<Json<Value>> {
    let hotel = load_hotel(&state.hotels, code).await?;
    state.hotels.remove_room_from_hotel(&hotel, room_code).await?;

    Ok(Json(json!({
        "message": "Room removed from hotel successfully"
    })))
}

pub async fn hotel_rooms(
    State(state): State<AppState>,
    Path(code): Path<i64>,
) -> ServiceResult<Json<Vec<Room>>> {
    let hotel = load_hotel(&state.hotels, code).await?;
    Ok(Json(state.hotels.rooms_of(&hotel).await?))
}

pub async fn hotel_room_types(
    State(state): State<AppState>,
    Path(code): Path<i64>,
) -> ServiceResult<Json<Vec<String>>> {
    let hotel = load_hotel(&state.hotels, code).await?;
    Ok(Json(state.hotels.room_types_of(&hotel).await?))
}
