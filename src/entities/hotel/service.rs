//! Hotel CRUD, filtered browse and hotel/room relationship maintenance

use super::model::{CATEGORY_HINT, CATEGORY_PATTERN, Hotel, HotelInput};
use crate::core::{
    DocumentStore, Filter, Page, PageRequest, ServiceError, ServiceResult, paginate,
};
use crate::entities::room::{Room, RoomInput};
use indexmap::IndexSet;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Optional browse criteria, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HotelFilters {
    /// Exact category, must match `^\*+$`
    #[serde(rename = "hotelCategory")]
    pub category: Option<String>,
    /// Case-insensitive substring of the name
    #[serde(rename = "hotelName")]
    pub name_contains: Option<String>,
    /// Case-insensitive substring of the address
    #[serde(rename = "hotelAddress")]
    pub address_contains: Option<String>,
}

impl HotelFilters {
    /// Translate into a store filter, rejecting malformed categories
    pub fn to_filter(&self) -> ServiceResult<Filter> {
        let mut filter = Filter::new();

        if let Some(category) = &self.category {
            if !CATEGORY_PATTERN.is_match(category) {
                return Err(ServiceError::invalid_filter("hotelCategory", CATEGORY_HINT));
            }
            filter = filter.equals("hotelCategory", category.as_str());
        }
        if let Some(name) = self.name_contains.as_deref().filter(|s| !s.is_empty()) {
            filter = filter.contains_ignore_case("hotelName", name);
        }
        if let Some(address) = self.address_contains.as_deref().filter(|s| !s.is_empty()) {
            filter = filter.contains_ignore_case("hotelAddress", address);
        }

        Ok(filter)
    }
}

/// Service over the `hotels` collection
///
/// Holds the room store too, since deleting a hotel and attaching or
/// detaching rooms are hotel operations.
#[derive(Clone)]
pub struct HotelService {
    hotels: Arc<dyn DocumentStore<Hotel>>,
    rooms: Arc<dyn DocumentStore<Room>>,
    page_size: u64,
}

impl HotelService {
    pub fn new(
        hotels: Arc<dyn DocumentStore<Hotel>>,
        rooms: Arc<dyn DocumentStore<Room>>,
        page_size: u64,
    ) -> Self {
        Self {
            hotels,
            rooms,
            page_size,
        }
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    fn page_request(&self, page: u64) -> PageRequest {
        PageRequest::new(page, self.page_size)
    }

    fn rooms_filter(hotel: &Hotel) -> Filter {
        Filter::new().equals("hotelCode", hotel.hotel_code)
    }

    /// All hotels, in insertion order
    pub async fn list(&self, page: u64) -> ServiceResult<Page<Hotel>> {
        debug!(page, "listing hotels");
        Ok(paginate(self.hotels.as_ref(), &Filter::new(), self.page_request(page)).await?)
    }

    /// Every hotel, unpaged, for pickers that need the full set
    pub async fn all(&self) -> ServiceResult<Vec<Hotel>> {
        Ok(self.hotels.find_by(&Filter::new()).await?)
    }

    pub async fn browse(&self, filters: &HotelFilters, page: u64) -> ServiceResult<Page<Hotel>> {
        let filter = filters.to_filter().inspect_err(|e| {
            warn!(error = %e, "rejected hotel browse filter");
        })?;

        debug!(?filters, page, "browsing hotels");
        Ok(paginate(self.hotels.as_ref(), &filter, self.page_request(page)).await?)
    }

    pub async fn create(&self, input: HotelInput) -> ServiceResult<Hotel> {
        let hotel = input.into_hotel(0)?;
        let hotel = self.hotels.insert(hotel).await?;

        info!(hotel_code = hotel.hotel_code, name = %hotel.hotel_name, "hotel created");
        Ok(hotel)
    }

    pub async fn get_by_code(&self, code: i64) -> ServiceResult<Option<Hotel>> {
        Ok(self.hotels.find(code).await?)
    }

    /// Replace the name, address and category of an existing hotel
    pub async fn update(&self, hotel: &Hotel, input: HotelInput) -> ServiceResult<Hotel> {
        let updated = input.into_hotel(hotel.hotel_code)?;
        let updated = self
            .hotels
            .replace(updated)
            .await?
            .ok_or_else(|| ServiceError::not_found("Hotel", hotel.hotel_code))?;

        info!(hotel_code = updated.hotel_code, "hotel updated");
        Ok(updated)
    }

    /// Delete a hotel and every room attached to it
    ///
    /// Rooms go first so an interrupted cascade never leaves orphan rooms.
    /// Returns the number of rooms removed.
    pub async fn delete(&self, hotel: &Hotel) -> ServiceResult<u64> {
        let removed = self.rooms.delete_by(&Self::rooms_filter(hotel)).await?;
        self.hotels.delete(hotel.hotel_code).await?;

        info!(
            hotel_code = hotel.hotel_code,
            rooms_removed = removed,
            "hotel deleted"
        );
        Ok(removed)
    }

    pub async fn add_room_to_hotel(&self, hotel: &Hotel, input: RoomInput) -> ServiceResult<Room> {
        let room = input.into_room(0, hotel.hotel_code)?;
        let room = self.rooms.insert(room).await?;

        info!(
            hotel_code = hotel.hotel_code,
            room_code = room.room_code,
            "room added to hotel"
        );
        Ok(room)
    }

    /// Delete a room, provided it belongs to `hotel`
    pub async fn remove_room_from_hotel(&self, hotel: &Hotel, room_code: i64) -> ServiceResult<()> {
        let room = self
            .rooms
            .find(room_code)
            .await?
            .ok_or_else(|| ServiceError::not_found("Room", room_code))?;

        if room.hotel_code != hotel.hotel_code {
            warn!(
                room_code,
                hotel_code = hotel.hotel_code,
                owner = room.hotel_code,
                "refusing to remove room owned by another hotel"
            );
            return Err(ServiceError::NotOwned {
                room_code,
                hotel_code: hotel.hotel_code,
            });
        }

        self.rooms.delete(room_code).await?;
        info!(hotel_code = hotel.hotel_code, room_code, "room removed from hotel");
        Ok(())
    }

    pub async fn rooms_of(&self, hotel: &Hotel) -> ServiceResult<Vec<Room>> {
        Ok(self.rooms.find_by(&Self::rooms_filter(hotel)).await?)
    }

    /// Distinct room types of a hotel, in first-seen order
    pub async fn room_types_of(&self, hotel: &Hotel) -> ServiceResult<Vec<String>> {
        let types: IndexSet<String> = self
            .rooms_of(hotel)
            .await?
            .into_iter()
            .map(|room| room.room_type)
            .collect();

        Ok(types.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    fn service() -> HotelService {
        HotelService::new(
            Arc::new(InMemoryStore::<Hotel>::new()),
            Arc::new(InMemoryStore::<Room>::new()),
            10,
        )
    }

    fn hotel_input(name: &str, address: &str, category: &str) -> HotelInput {
        HotelInput {
            hotel_name: Some(name.to_string()),
            hotel_address: Some(address.to_string()),
            hotel_category: Some(category.to_string()),
        }
    }

    fn room_input(floor: i64, room_type: &str, beds: i64) -> RoomInput {
        RoomInput {
            floor: Some(floor),
            room_type: Some(room_type.to_string()),
            number_of_beds: Some(beds),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_codes() {
        let service = service();

        let first = service
            .create(hotel_input("Ocean View", "1 Beach Rd", "***"))
            .await
            .unwrap();
        let second = service
            .create(hotel_input("Hill Top", "2 Summit Way", "*"))
            .await
            .unwrap();

        assert_eq!(first.hotel_code, 1);
        assert_eq!(first.hotel_name, "Ocean View");
        assert_eq!(first.hotel_address, "1 Beach Rd");
        assert_eq!(first.hotel_category, "***");
        assert_ne!(first.hotel_code, second.hotel_code);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let service = service();

        let err = service
            .create(hotel_input("Ocean View", "", "5 stars"))
            .await
            .unwrap_err();

        match err {
            ServiceError::Validation(e) => {
                assert_eq!(e.field_names(), vec!["hotelAddress", "hotelCategory"])
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(service.list(1).await.unwrap().pagination.total_items, 0);
    }

    #[tokio::test]
    async fn test_list_paginates_in_insertion_order() {
        let service = service();
        for i in 1..=12 {
            service
                .create(hotel_input(&format!("Hotel {}", i), "Main St", "**"))
                .await
                .unwrap();
        }

        let page = service.list(2).await.unwrap();
        let names: Vec<_> = page.data.iter().map(|h| h.hotel_name.as_str()).collect();
        assert_eq!(names, vec!["Hotel 11", "Hotel 12"]);
        assert_eq!(page.pagination.current_page, 2);
        assert_eq!(page.pagination.total_items, 12);
        assert_eq!(page.pagination.items_per_page, 10);

        let past_end = service.list(5).await.unwrap();
        assert!(past_end.data.is_empty());
        assert_eq!(past_end.pagination.total_items, 12);
    }

    #[tokio::test]
    async fn test_list_is_idempotent() {
        let service = service();
        service
            .create(hotel_input("Ocean View", "1 Beach Rd", "***"))
            .await
            .unwrap();

        let first = service.list(1).await.unwrap();
        let second = service.list(1).await.unwrap();
        assert_eq!(first.data, second.data);
        assert_eq!(first.pagination, second.pagination);
    }

    #[tokio::test]
    async fn test_browse_combines_filters() {
        let service = service();
        service
            .create(hotel_input("Ocean View", "1 Beach Rd", "***"))
            .await
            .unwrap();
        service
            .create(hotel_input("OCEAN breeze", "5 Harbour St", "**"))
            .await
            .unwrap();
        service
            .create(hotel_input("City Inn", "9 Beach Rd", "***"))
            .await
            .unwrap();

        let filters = HotelFilters {
            name_contains: Some("ocean".to_string()),
            ..Default::default()
        };
        assert_eq!(service.browse(&filters, 1).await.unwrap().data.len(), 2);

        let filters = HotelFilters {
            category: Some("***".to_string()),
            address_contains: Some("beach".to_string()),
            ..Default::default()
        };
        let page = service.browse(&filters, 1).await.unwrap();
        assert_eq!(page.pagination.total_items, 2);

        let filters = HotelFilters {
            category: Some("***".to_string()),
            name_contains: Some("city".to_string()),
            ..Default::default()
        };
        let page = service.browse(&filters, 1).await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].hotel_name, "City Inn");
    }

    #[tokio::test]
    async fn test_browse_name_is_matched_literally() {
        let service = service();
        service
            .create(hotel_input("Ocean View", "1 Beach Rd", "***"))
            .await
            .unwrap();

        let filters = HotelFilters {
            name_contains: Some("oc.an".to_string()),
            ..Default::default()
        };
        assert!(service.browse(&filters, 1).await.unwrap().data.is_empty());
    }

    #[tokio::test]
    async fn test_browse_rejects_malformed_category() {
        let service = service();

        for category in ["5 stars", "***1", ""] {
            let filters = HotelFilters {
                category: Some(category.to_string()),
                ..Default::default()
            };
            let err = service.browse(&filters, 1).await.unwrap_err();
            assert!(
                matches!(err, ServiceError::InvalidFilter { .. }),
                "{}",
                category
            );
        }
    }

    #[tokio::test]
    async fn test_update_replaces_mutable_fields() {
        let service = service();
        let hotel = service
            .create(hotel_input("Ocean View", "1 Beach Rd", "***"))
            .await
            .unwrap();

        let updated = service
            .update(&hotel, hotel_input("Ocean View Resort", "1 Beach Rd", "****"))
            .await
            .unwrap();

        assert_eq!(updated.hotel_code, hotel.hotel_code);
        assert_eq!(
            service.get_by_code(hotel.hotel_code).await.unwrap(),
            Some(updated)
        );
    }

    #[tokio::test]
    async fn test_update_of_deleted_hotel_is_not_found() {
        let service = service();
        let hotel = service
            .create(hotel_input("Ocean View", "1 Beach Rd", "***"))
            .await
            .unwrap();
        service.delete(&hotel).await.unwrap();

        let err = service
            .update(&hotel, hotel_input("Ocean View Resort", "1 Beach Rd", "****"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "Hotel", .. }));
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
        assert!(service.get_by_code(hotel.hotel_code).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_all_returns_every_hotel_unpaged() {
        let service = service();
        for i in 1..=12 {
            service
                .create(hotel_input(&format!("Hotel {}", i), "street", "*"))
                .await
                .unwrap();
        }

        let all = service.all().await.unwrap();
        assert_eq!(all.len(), 12);
        assert_eq!(all[11].hotel_name, "Hotel 12");
    }

    #[tokio::test]
    async fn test_delete_cascades_to_rooms() {
        let service = service();
        let hotel = service
            .create(hotel_input("Ocean View", "1 Beach Rd", "***"))
            .await
            .unwrap();
        let other = service
            .create(hotel_input("City Inn", "9 Main St", "*"))
            .await
            .unwrap();
        service
            .add_room_to_hotel(&hotel, room_input(1, "single", 1))
            .await
            .unwrap();
        service
            .add_room_to_hotel(&hotel, room_input(2, "suite", 2))
            .await
            .unwrap();
        let kept = service
            .add_room_to_hotel(&other, room_input(1, "double", 2))
            .await
            .unwrap();

        assert_eq!(service.delete(&hotel).await.unwrap(), 2);

        assert!(service.get_by_code(hotel.hotel_code).await.unwrap().is_none());
        assert!(service.rooms_of(&hotel).await.unwrap().is_empty());
        assert_eq!(service.rooms_of(&other).await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn test_remove_room_checks_ownership() {
        let service = service();
        let hotel_a = service
            .create(hotel_input("Ocean View", "1 Beach Rd", "***"))
            .await
            .unwrap();
        let hotel_b = service
            .create(hotel_input("City Inn", "9 Main St", "*"))
            .await
            .unwrap();
        let room_b = service
            .add_room_to_hotel(&hotel_b, room_input(1, "double", 2))
            .await
            .unwrap();

        let err = service
            .remove_room_from_hotel(&hotel_a, room_b.room_code)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotOwned { .. }));
        assert_eq!(service.rooms_of(&hotel_b).await.unwrap().len(), 1);

        let err = service
            .remove_room_from_hotel(&hotel_a, 99)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "Room", .. }));

        service
            .remove_room_from_hotel(&hotel_b, room_b.room_code)
            .await
            .unwrap();
        assert!(service.rooms_of(&hotel_b).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_room_types_are_distinct_in_first_seen_order() {
        let service = service();
        let hotel = service
            .create(hotel_input("Ocean View", "1 Beach Rd", "***"))
            .await
            .unwrap();
        for (floor, room_type) in [(1, "suite"), (1, "double"), (2, "suite"), (3, "single")] {
            service
                .add_room_to_hotel(&hotel, room_input(floor, room_type, 2))
                .await
                .unwrap();
        }

        assert_eq!(
            service.room_types_of(&hotel).await.unwrap(),
            vec!["suite", "double", "single"]
        );
    }

    #[tokio::test]
    async fn test_add_room_validates_input() {
        let service = service();
        let hotel = service
            .create(hotel_input("Ocean View", "1 Beach Rd", "***"))
            .await
            .unwrap();

        let err = service
            .add_room_to_hotel(&hotel, room_input(1, "suite", 0))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(service.rooms_of(&hotel).await.unwrap().is_empty());
    }
}
