//! Room pages of the admin panel

use super::hotels::RoomForm;
use super::{AdminResult, AdminState, Flash, Pager, form_value, query_prefix, redirect_or_flash};
use crate::core::{Page, PageQuery, ServiceError, ServiceResult, ValidationError};
use crate::entities::hotel::handlers::load_hotel;
use crate::entities::room::handlers::{RoomBrowseQuery, load_room};
use crate::entities::room::Room;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use serde_json::Value;
use tera::Context;

/// Room fields plus the owning hotel, for the standalone create and edit forms
#[derive(Debug, Deserialize)]
pub struct RoomWithHotelForm {
    #[serde(flatten)]
    pub room: RoomForm,
    #[serde(rename = "hotelCode", default)]
    pub hotel_code: String,
}

impl RoomWithHotelForm {
    fn hotel_code(&self) -> ServiceResult<i64> {
        match form_value(&self.hotel_code) {
            Value::Number(n) => n.as_i64().ok_or_else(|| bad_hotel_code().into()),
            _ => Err(bad_hotel_code().into()),
        }
    }
}

fn bad_hotel_code() -> ValidationError {
    let mut err = ValidationError::new();
    err.push("hotelCode", "must be an integer");
    err
}

pub async fn index(
    State(state): State<AdminState>,
    Query(browse): Query<RoomBrowseQuery>,
    Query(query): Query<PageQuery>,
    Query(flash): Query<Flash>,
) -> AdminResult<Html<String>> {
    let rooms = &state.app.rooms;
    let mut error = flash.error;

    let result = match browse.to_filters() {
        Ok(filters) => rooms.browse(&filters, query.page()).await,
        Err(e) => Err(e),
    };
    let page = match result {
        Ok(page) => page,
        Err(e @ ServiceError::InvalidFilter { .. }) => {
            error = Some(e.to_string());
            Page::empty(rooms.page_size())
        }
        Err(e) => return Err(e.into()),
    };

    let mut context = Context::new();
    context.insert("pager", &Pager::from(&page.pagination));
    context.insert("page", &page);
    context.insert(
        "filters",
        &serde_json::json!({
            "type": browse.room_type,
            "floor": browse.floor,
            "numberOfBeds": browse.number_of_beds,
            "hotelCode": browse.hotel_code,
        }),
    );
    context.insert(
        "query",
        &query_prefix(&[
            ("type", browse.room_type.as_deref()),
            ("floor", browse.floor.as_deref()),
            ("numberOfBeds", browse.number_of_beds.as_deref()),
            ("hotelCode", browse.hotel_code.as_deref()),
        ]),
    );
    context.insert("error", &error);
    state.render("rooms/list.html", &context)
}

pub async fn show(
    State(state): State<AdminState>,
    Path(code): Path<i64>,
    Query(flash): Query<Flash>,
) -> AdminResult<Html<String>> {
    let room = load_room(&state.app.rooms, code).await?;
    let hotel = state.app.hotels.get_by_code(room.hotel_code).await?;

    let mut context = Context::new();
    context.insert("room", &room);
    context.insert("hotel", &hotel);
    context.insert("error", &flash.error);
    state.render("rooms/show.html", &context)
}

pub async fn new_form(
    State(state): State<AdminState>,
    Query(flash): Query<Flash>,
) -> AdminResult<Html<String>> {
    let hotels = state.app.hotels.all().await?;

    let mut context = Context::new();
    context.insert("hotels", &hotels);
    context.insert("error", &flash.error);
    state.render("rooms/new.html", &context)
}

pub async fn create(
    State(state): State<AdminState>,
    Form(form): Form<RoomWithHotelForm>,
) -> AdminResult<Redirect> {
    redirect_or_flash(
        create_room(&state, &form).await,
        |room| format!("/admin/rooms/{}", room.room_code),
        "/admin/rooms/new",
    )
}

async fn create_room(state: &AdminState, form: &RoomWithHotelForm) -> ServiceResult<Room> {
    let input = form.room.to_input()?;
    let hotel = load_hotel(&state.app.hotels, form.hotel_code()?).await?;
    state.app.rooms.create(input, &hotel).await
}

pub async fn edit_form(
    State(state): State<AdminState>,
    Path(code): Path<i64>,
    Query(flash): Query<Flash>,
) -> AdminResult<Html<String>> {
    let room = load_room(&state.app.rooms, code).await?;

    let mut context = Context::new();
    context.insert("action", &format!("/admin/rooms/{}", room.room_code));
    context.insert("room", &Some(room));
    context.insert("error", &flash.error);
    state.render("rooms/form.html", &context)
}

pub async fn update(
    State(state): State<AdminState>,
    Path(code): Path<i64>,
    Form(form): Form<RoomWithHotelForm>,
) -> AdminResult<Redirect> {
    let room = load_room(&state.app.rooms, code).await?;
    redirect_or_flash(
        update_room(&state, &room, &form).await,
        |room| format!("/admin/rooms/{}", room.room_code),
        &format!("/admin/rooms/{}/edit", code),
    )
}

async fn update_room(state: &AdminState, room: &Room, form: &RoomWithHotelForm) -> ServiceResult<Room> {
    let input = form.room.to_input()?;
    let hotel = load_hotel(&state.app.hotels, form.hotel_code()?).await?;
    state.app.rooms.update(room, input, &hotel).await
}

pub async fn delete(
    State(state): State<AdminState>,
    Path(code): Path<i64>,
) -> AdminResult<Redirect> {
    let room = load_room(&state.app.rooms, code).await?;
    state.app.rooms.delete(&room).await?;
    Ok(Redirect::to("/admin/rooms"))
}
