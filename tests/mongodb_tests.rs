//! Integration tests for the MongoDB document store.
//!
//! # Requirements
//!
//! - Docker must be running (testcontainers launches a MongoDB container)
//! - Feature flag `mongodb_backend` must be enabled
//!
//! # Running
//!
//! ```sh
//! cargo test --features mongodb_backend --test mongodb_tests
//! ```
//!
//! # Test isolation
//!
//! All tests share a single MongoDB container (via `OnceLock`). Each test
//! gets its own database, so counters start from zero every time.

#![cfg(feature = "mongodb_backend")]

use hotel_booking::prelude::*;
use hotel_booking::storage::mongo::COUNTERS_COLLECTION;
use mongodb::Client;
use mongodb::bson::{Document as BsonDocument, doc};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::mongo::Mongo;

// ---------------------------------------------------------------------------
// Shared test environment (single container, fresh database per test)
// ---------------------------------------------------------------------------

/// Holds the testcontainer handle (keeps it alive) and the connection URL.
struct MongoTestEnv {
    _container: testcontainers::ContainerAsync<Mongo>,
    connection_url: String,
}

static TEST_ENV: OnceLock<MongoTestEnv> = OnceLock::new();

async fn init_mongo_env() -> &'static MongoTestEnv {
    if let Some(env) = TEST_ENV.get() {
        return env;
    }

    let container = Mongo::default()
        .start()
        .await
        .expect("Failed to start MongoDB container, is Docker running?");

    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(27017).await.unwrap();
    let url = format!("mongodb://{}:{}", host, port);

    let env = MongoTestEnv {
        _container: container,
        connection_url: url,
    };

    let _ = TEST_ENV.set(env);
    TEST_ENV.get().unwrap()
}

static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

async fn fresh_database() -> mongodb::Database {
    let env = init_mongo_env().await;
    let client = Client::with_uri_str(&env.connection_url)
        .await
        .expect("Failed to connect to MongoDB");
    let n = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    client.database(&format!("hotel_booking_test_{}", n))
}

async fn fresh_state() -> (AppState, mongodb::Database) {
    let database = fresh_database().await;
    (AppState::new(Stores::mongodb(database.clone()), 10), database)
}

fn hotel(name: &str, address: &str, category: &str) -> HotelInput {
    HotelInput {
        hotel_name: Some(name.to_string()),
        hotel_address: Some(address.to_string()),
        hotel_category: Some(category.to_string()),
    }
}

fn room(floor: i64, room_type: &str, beds: i64) -> RoomInput {
    RoomInput {
        floor: Some(floor),
        room_type: Some(room_type.to_string()),
        number_of_beds: Some(beds),
    }
}

#[tokio::test]
async fn test_codes_are_stored_as_id_and_counted() {
    let (state, database) = fresh_state().await;

    let first = state.hotels.create(hotel("A", "a street", "*")).await.unwrap();
    let second = state.hotels.create(hotel("B", "b street", "**")).await.unwrap();
    assert_eq!(first.hotel_code, 1);
    assert_eq!(second.hotel_code, 2);

    let raw = database
        .collection::<BsonDocument>("hotels")
        .find_one(doc! { "_id": 2_i64 })
        .await
        .unwrap()
        .expect("hotel 2 stored under _id");
    assert_eq!(raw.get_str("hotelName").unwrap(), "B");
    assert!(raw.get("hotelCode").is_none());

    let counter = database
        .collection::<BsonDocument>(COUNTERS_COLLECTION)
        .find_one(doc! { "_id": "hotels" })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(counter.get_i64("seq").unwrap(), 2);
}

#[tokio::test]
async fn test_ocean_view_scenario() {
    let (state, _db) = fresh_state().await;

    let ocean = state
        .hotels
        .create(hotel("Ocean View", "1 Beach Rd", "***"))
        .await
        .unwrap();
    let suite = state
        .hotels
        .add_room_to_hotel(&ocean, room(2, "suite", 2))
        .await
        .unwrap();
    assert_eq!(suite.room_code, 1);
    assert_eq!(suite.hotel_code, ocean.hotel_code);

    assert_eq!(state.hotels.room_types_of(&ocean).await.unwrap(), vec!["suite"]);

    let filters = RoomFilters {
        hotel_code: Some(ocean.hotel_code),
        ..Default::default()
    };
    let page = state.rooms.browse(&filters, 1).await.unwrap();
    assert_eq!(page.data, vec![suite.clone()]);

    assert_eq!(state.hotels.delete(&ocean).await.unwrap(), 1);
    assert!(state.rooms.get_by_code(suite.room_code).await.unwrap().is_none());
    assert!(state.hotels.get_by_code(ocean.hotel_code).await.unwrap().is_none());
}

#[tokio::test]
async fn test_browse_filters_translate_to_queries() {
    let (state, _db) = fresh_state().await;
    state
        .hotels
        .create(hotel("Ocean View", "1 Beach Rd", "***"))
        .await
        .unwrap();
    state
        .hotels
        .create(hotel("Ocean (Breeze)", "2 Harbour St", "**"))
        .await
        .unwrap();
    state
        .hotels
        .create(hotel("Mountain Lodge", "3 BEACH rd", "***"))
        .await
        .unwrap();

    let filters = HotelFilters {
        address_contains: Some("beach".to_string()),
        category: Some("***".to_string()),
        ..Default::default()
    };
    let page = state.hotels.browse(&filters, 1).await.unwrap();
    let names: Vec<_> = page.data.iter().map(|h| h.hotel_name.as_str()).collect();
    assert_eq!(names, vec!["Ocean View", "Mountain Lodge"]);
    assert_eq!(page.pagination.total_items, 2);

    // regex metacharacters are matched literally
    let filters = HotelFilters {
        name_contains: Some("(breeze)".to_string()),
        ..Default::default()
    };
    let page = state.hotels.browse(&filters, 1).await.unwrap();
    assert_eq!(page.pagination.total_items, 1);
    assert_eq!(page.data[0].hotel_name, "Ocean (Breeze)");
}

#[tokio::test]
async fn test_pagination_in_insertion_order() {
    let (state, _db) = fresh_state().await;
    for i in 1..=12 {
        state
            .hotels
            .create(hotel(&format!("Hotel {}", i), "street", "*"))
            .await
            .unwrap();
    }

    let second = state.hotels.list(2).await.unwrap();
    let codes: Vec<_> = second.data.iter().map(|h| h.hotel_code).collect();
    assert_eq!(codes, vec![11, 12]);
    assert_eq!(second.pagination.total_items, 12);
    assert_eq!(second.pagination.current_page, 2);

    let beyond = state.hotels.list(4).await.unwrap();
    assert!(beyond.data.is_empty());
    assert_eq!(beyond.pagination.total_items, 12);
}

#[tokio::test]
async fn test_remove_room_of_other_hotel_keeps_it() {
    let (state, _db) = fresh_state().await;
    let a = state.hotels.create(hotel("A", "a street", "*")).await.unwrap();
    let b = state.hotels.create(hotel("B", "b street", "*")).await.unwrap();
    let room_b = state
        .hotels
        .add_room_to_hotel(&b, room(1, "single", 1))
        .await
        .unwrap();

    let err = state
        .hotels
        .remove_room_from_hotel(&a, room_b.room_code)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotOwned { .. }));
    assert!(state.rooms.get_by_code(room_b.room_code).await.unwrap().is_some());
}

#[tokio::test]
async fn test_room_update_replaces_document() {
    let (state, _db) = fresh_state().await;
    let a = state.hotels.create(hotel("A", "a street", "*")).await.unwrap();
    let b = state.hotels.create(hotel("B", "b street", "*")).await.unwrap();
    let single = state.rooms.create(room(1, "single", 1), &a).await.unwrap();

    let moved = state
        .rooms
        .update(&single, room(4, "suite", 3), &b)
        .await
        .unwrap();
    assert_eq!(moved.room_code, single.room_code);
    assert_eq!(moved.hotel_code, b.hotel_code);

    let stored = state.rooms.get_by_code(single.room_code).await.unwrap().unwrap();
    assert_eq!(stored, moved);
    assert!(state.hotels.rooms_of(&a).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_customer_register_and_promote() {
    let (state, _db) = fresh_state().await;

    let profile = state
        .customers
        .register(RegisterCustomer {
            username: "alice".to_string(),
            password: "correct horse".to_string(),
            mail: "alice@example.com".to_string(),
            address: None,
            tel: None,
        })
        .await
        .unwrap();
    assert_eq!(profile.customer_code, 1);

    let promoted = state.customers.promote_to_admin("alice").await.unwrap();
    assert_eq!(promoted.roles, vec!["ROLE_USER", "ROLE_ADMIN"]);

    let stored = state.customers.find_by_username("alice").await.unwrap().unwrap();
    assert!(stored.is_admin());
    assert!(stored.password.starts_with("$argon2"));

    assert!(state.customers.authenticate("alice", "correct horse").await.is_ok());
}
