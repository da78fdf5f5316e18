//! JSON API routes

use super::state::AppState;
use crate::entities::{customer::handlers as customer, hotel::handlers as hotel, room::handlers as room};
use axum::{
    Json, Router,
    routing::{delete, get, post, put},
};
use serde_json::{Value, json};

/// Build the JSON API:
/// - `/hotel...` hotel CRUD, browse and room attachment
/// - `/room...` room CRUD and browse
/// - `/register`, `/login` customer accounts
/// - `/health`
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/hotel", get(hotel::list_hotels))
        .route("/hotel/browse", get(hotel::browse_hotels))
        .route("/hotel/add", post(hotel::create_hotel))
        .route("/hotel/getByCode/{code}", get(hotel::get_hotel))
        .route("/hotel/update/{code}", put(hotel::update_hotel))
        .route("/hotel/delete/{code}", delete(hotel::delete_hotel))
        .route("/hotel/addRoomToHotel", post(hotel::add_room_to_hotel))
        .route(
            "/hotel/{code}/rooms/{room_code}",
            delete(hotel::remove_room_from_hotel),
        )
        .route("/hotel/{code}/rooms", get(hotel::hotel_rooms))
        .route("/hotel/{code}/roomsType", get(hotel::hotel_room_types))
        .route("/room", get(room::list_rooms))
        .route("/room/browse", get(room::browse_rooms))
        .route("/room/add", post(room::create_room))
        .route("/room/getByCode/{code}", get(room::get_room))
        .route("/room/update/{code}", put(room::update_room))
        .route("/room/delete/{code}", delete(room::delete_room))
        .route("/register", post(customer::register))
        .route("/login", post(customer::login))
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "hotel-booking"
    }))
}
