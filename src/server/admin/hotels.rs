//! Hotel pages of the admin panel

use super::{AdminResult, AdminState, Flash, Pager, form_text, form_value, query_prefix, redirect_or_flash};
use crate::core::{Page, PageQuery, ServiceError, ServiceResult};
use crate::entities::hotel::handlers::load_hotel;
use crate::entities::hotel::{Hotel, HotelFilters, HotelInput};
use crate::entities::room::RoomInput;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use serde_json::json;
use tera::Context;

#[derive(Debug, Deserialize)]
pub struct HotelForm {
    #[serde(rename = "hotelName", default)]
    pub hotel_name: String,
    #[serde(rename = "hotelAddress", default)]
    pub hotel_address: String,
    #[serde(rename = "hotelCategory", default)]
    pub hotel_category: String,
}

impl From<HotelForm> for HotelInput {
    fn from(form: HotelForm) -> Self {
        Self {
            hotel_name: Some(form.hotel_name),
            hotel_address: Some(form.hotel_address),
            hotel_category: Some(form.hotel_category),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RoomForm {
    #[serde(default)]
    pub floor: String,
    #[serde(rename = "type", default)]
    pub room_type: String,
    #[serde(rename = "numberOfBeds", default)]
    pub number_of_beds: String,
}

impl RoomForm {
    pub fn to_input(&self) -> ServiceResult<RoomInput> {
        Ok(RoomInput::from_payload(&json!({
            "floor": form_value(&self.floor),
            "type": form_text(&self.room_type),
            "numberOfBeds": form_value(&self.number_of_beds),
        }))?)
    }
}

/// Hotel list with browse filters
pub async fn index(
    State(state): State<AdminState>,
    Query(filters): Query<HotelFilters>,
    Query(query): Query<PageQuery>,
    Query(flash): Query<Flash>,
) -> AdminResult<Html<String>> {
    let hotels = &state.app.hotels;
    let mut error = flash.error;

    // the search form submits every input, blank ones included
    let filters = HotelFilters {
        category: filters.category.filter(|s| !s.is_empty()),
        ..filters
    };

    let page = match hotels.browse(&filters, query.page()).await {
        Ok(page) => page,
        Err(e @ ServiceError::InvalidFilter { .. }) => {
            error = Some(e.to_string());
            Page::empty(hotels.page_size())
        }
        Err(e) => return Err(e.into()),
    };

    let mut context = Context::new();
    context.insert("pager", &Pager::from(&page.pagination));
    context.insert("page", &page);
    context.insert(
        "filters",
        &json!({
            "hotelName": filters.name_contains,
            "hotelAddress": filters.address_contains,
            "hotelCategory": filters.category,
        }),
    );
    context.insert(
        "query",
        &query_prefix(&[
            ("hotelName", filters.name_contains.as_deref()),
            ("hotelAddress", filters.address_contains.as_deref()),
            ("hotelCategory", filters.category.as_deref()),
        ]),
    );
    context.insert("error", &error);
    state.render("hotels/list.html", &context)
}

pub async fn new_form(
    State(state): State<AdminState>,
    Query(flash): Query<Flash>,
) -> AdminResult<Html<String>> {
    let mut context = Context::new();
    context.insert("hotel", &None::<Hotel>);
    context.insert("action", "/admin/hotels");
    context.insert("error", &flash.error);
    state.render("hotels/form.html", &context)
}

pub async fn create(
    State(state): State<AdminState>,
    Form(form): Form<HotelForm>,
) -> AdminResult<Redirect> {
    redirect_or_flash(
        state.app.hotels.create(form.into()).await,
        |hotel| format!("/admin/hotels/{}", hotel.hotel_code),
        "/admin/hotels/new",
    )
}

/// Hotel detail with its rooms and room types
pub async fn show(
    State(state): State<AdminState>,
    Path(code): Path<i64>,
    Query(flash): Query<Flash>,
) -> AdminResult<Html<String>> {
    let hotels = &state.app.hotels;
    let hotel = load_hotel(hotels, code).await?;

    let mut context = Context::new();
    context.insert("rooms", &hotels.rooms_of(&hotel).await?);
    context.insert("room_types", &hotels.room_types_of(&hotel).await?);
    context.insert("hotel", &hotel);
    context.insert("error", &flash.error);
    state.render("hotels/show.html", &context)
}

pub async fn edit_form(
    State(state): State<AdminState>,
    Path(code): Path<i64>,
    Query(flash): Query<Flash>,
) -> AdminResult<Html<String>> {
    let hotel = load_hotel(&state.app.hotels, code).await?;

    let mut context = Context::new();
    context.insert("action", &format!("/admin/hotels/{}", hotel.hotel_code));
    context.insert("hotel", &Some(hotel));
    context.insert("error", &flash.error);
    state.render("hotels/form.html", &context)
}

pub async fn update(
    State(state): State<AdminState>,
    Path(code): Path<i64>,
    Form(form): Form<HotelForm>,
) -> AdminResult<Redirect> {
    let hotels = &state.app.hotels;
    let hotel = load_hotel(hotels, code).await?;

    redirect_or_flash(
        hotels.update(&hotel, form.into()).await,
        |hotel| format!("/admin/hotels/{}", hotel.hotel_code),
        &format!("/admin/hotels/{}/edit", code),
    )
}

pub async fn delete(
    State(state): State<AdminState>,
    Path(code): Path<i64>,
) -> AdminResult<Redirect> {
    let hotels = &state.app.hotels;
    let hotel = load_hotel(hotels, code).await?;
    hotels.delete(&hotel).await?;
    Ok(Redirect::to("/admin/hotels"))
}

pub async fn new_room_form(
    State(state): State<AdminState>,
    Path(code): Path<i64>,
    Query(flash): Query<Flash>,
) -> AdminResult<Html<String>> {
    let hotel = load_hotel(&state.app.hotels, code).await?;

    let mut context = Context::new();
    context.insert("action", &format!("/admin/hotels/{}/rooms", hotel.hotel_code));
    context.insert("hotel", &hotel);
    context.insert("room", &None::<()>);
    context.insert("error", &flash.error);
    state.render("rooms/form.html", &context)
}

pub async fn create_room(
    State(state): State<AdminState>,
    Path(code): Path<i64>,
    Form(form): Form<RoomForm>,
) -> AdminResult<Redirect> {
    let hotels = &state.app.hotels;
    let hotel = load_hotel(hotels, code).await?;

    let result = match form.to_input() {
        Ok(input) => hotels.add_room_to_hotel(&hotel, input).await,
        Err(e) => Err(e),
    };
    redirect_or_flash(
        result,
        |_| format!("/admin/hotels/{}", code),
        &format!("/admin/hotels/{}/rooms/new", code),
    )
}

pub async fn delete_room(
    State(state): State<AdminState>,
    Path((code, room_code)): Path<(i64, i64)>,
) -> AdminResult<Redirect> {
    let hotels = &state.app.hotels;
    let hotel = load_hotel(hotels, code).await?;
    let target = format!("/admin/hotels/{}", code);

    redirect_or_flash(
        hotels.remove_room_from_hotel(&hotel, room_code).await,
        |_| target.clone(),
        &target,
    )
}
