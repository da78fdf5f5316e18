//! Room CRUD and filtered browse

use super::model::{Room, RoomInput};
use crate::core::{
    DocumentStore, Filter, Page, PageRequest, ServiceError, ServiceResult, paginate,
};
use crate::entities::hotel::Hotel;
use std::sync::Arc;
use tracing::{debug, info};

/// Optional browse criteria, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomFilters {
    /// Case-insensitive substring of the room type
    pub room_type: Option<String>,
    pub floor: Option<i64>,
    pub number_of_beds: Option<i64>,
    /// Code of the owning hotel
    pub hotel_code: Option<i64>,
}

/// Service over the `rooms` collection
#[derive(Clone)]
pub struct RoomService {
    rooms: Arc<dyn DocumentStore<Room>>,
    hotels: Arc<dyn DocumentStore<Hotel>>,
    page_size: u64,
}

impl RoomService {
    pub fn new(
        rooms: Arc<dyn DocumentStore<Room>>,
        hotels: Arc<dyn DocumentStore<Hotel>>,
        page_size: u64,
    ) -> Self {
        Self {
            rooms,
            hotels,
            page_size,
        }
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub async fn list(&self, page: u64) -> ServiceResult<Page<Room>> {
        debug!(page, "listing rooms");
        let request = PageRequest::new(page, self.page_size);
        Ok(paginate(self.rooms.as_ref(), &Filter::new(), request).await?)
    }

    /// Filtered listing
    ///
    /// A `hotel_code` that matches no hotel yields an empty first page rather
    /// than an error.
    pub async fn browse(&self, filters: &RoomFilters, page: u64) -> ServiceResult<Page<Room>> {
        let mut filter = Filter::new();

        if let Some(room_type) = filters.room_type.as_deref().filter(|s| !s.is_empty()) {
            filter = filter.contains_ignore_case("type", room_type);
        }
        if let Some(floor) = filters.floor {
            filter = filter.equals("floor", floor);
        }
        if let Some(beds) = filters.number_of_beds {
            filter = filter.equals("numberOfBeds", beds);
        }
        if let Some(hotel_code) = filters.hotel_code {
            match self.hotels.find(hotel_code).await? {
                Some(hotel) => filter = filter.equals("hotelCode", hotel.hotel_code),
                None => {
                    debug!(hotel_code, "room browse on unknown hotel");
                    return Ok(Page::empty(self.page_size));
                }
            }
        }

        debug!(?filters, page, "browsing rooms");
        let request = PageRequest::new(page, self.page_size);
        Ok(paginate(self.rooms.as_ref(), &filter, request).await?)
    }

    /// Persist a new room in `hotel`, which the caller has already resolved
    pub async fn create(&self, input: RoomInput, hotel: &Hotel) -> ServiceResult<Room> {
        let room = input.into_room(0, hotel.hotel_code)?;
        let room = self.rooms.insert(room).await?;

        info!(
            room_code = room.room_code,
            hotel_code = hotel.hotel_code,
            "room created"
        );
        Ok(room)
    }

    pub async fn get_by_code(&self, code: i64) -> ServiceResult<Option<Room>> {
        Ok(self.rooms.find(code).await?)
    }

    /// Replace the room's fields and owning hotel
    pub async fn update(&self, room: &Room, input: RoomInput, hotel: &Hotel) -> ServiceResult<Room> {
        let updated = input.into_room(room.room_code, hotel.hotel_code)?;
        let updated = self
            .rooms
            .replace(updated)
            .await?
            .ok_or_else(|| ServiceError::not_found("Room", room.room_code))?;

        info!(
            room_code = updated.room_code,
            hotel_code = hotel.hotel_code,
            "room updated"
        );
        Ok(updated)
    }

    pub async fn delete(&self, room: &Room) -> ServiceResult<bool> {
        let deleted = self.rooms.delete(room.room_code).await?;
        info!(room_code = room.room_code, deleted, "room deleted");
        Ok(deleted)
    }
}
