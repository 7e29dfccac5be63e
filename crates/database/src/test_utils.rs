//! Shared test fixtures: an in-memory database with the real schema, plus
//! helpers for hotels, rooms and stay ranges with sensible defaults.

use crate::{
    entities::{hotel, room},
    errors::Result,
    services::catalog::{CatalogService, HotelInput, RoomInput},
};
use chrono::NaiveDate;
use migration::MigratorTrait;
use models::{room_type::RoomType, stay::StayRange};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Creates an in-memory SQLite database and runs the full migrator against
/// it. SeaORM pins `sqlite::memory:` to a single pooled connection, which
/// also serializes the concurrency tests deterministically.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn test_hotel_input(name: &str) -> HotelInput {
    HotelInput {
        name: name.to_string(),
        address: "1 Beach Road".to_string(),
        city: "Goa".to_string(),
        contact_no: "9876543210".to_string(),
        rating: 4,
        email: "desk@example.com".to_string(),
    }
}

/// 100/night standard room
pub fn test_room_input(room_no: i32) -> RoomInput {
    RoomInput {
        room_no,
        room_type: RoomType::Standard,
        price_per_night: 100,
    }
}

pub async fn create_test_hotel(db: &DatabaseConnection, name: &str) -> Result<hotel::Model> {
    CatalogService::create_hotel(db, test_hotel_input(name)).await
}

pub async fn create_test_room(
    db: &DatabaseConnection,
    hotel_id: Uuid,
    room_no: i32,
) -> Result<room::Model> {
    CatalogService::add_room(db, hotel_id, test_room_input(room_no)).await
}

/// Sets up a database with one hotel and one 100/night room
pub async fn setup_with_room() -> Result<(DatabaseConnection, hotel::Model, room::Model)> {
    let db = setup_test_db().await?;
    let hotel = create_test_hotel(&db, "Grand Plaza").await?;
    let room = create_test_room(&db, hotel.id, 101).await?;
    Ok((db, hotel, room))
}

/// Stay in June 2030 (far enough ahead for the strict booking path),
/// running from day `from` to day `to` of the month.
pub fn stay(from: u32, to: u32) -> StayRange {
    StayRange::new(
        NaiveDate::from_ymd_opt(2030, 6, from).unwrap(),
        NaiveDate::from_ymd_opt(2030, 6, to).unwrap(),
    )
    .unwrap()
}
