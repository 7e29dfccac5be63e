use crate::{
    entities::{hotel, room},
    errors::{Error, Result},
};
use chrono::Utc;
use models::room_type::RoomType;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    Order, QueryFilter, QueryOrder, SqlErr,
};
use uuid::Uuid;

/// Catalog search parameters; all filters are optional and combined with AND
#[derive(Debug, Default, Clone)]
pub struct HotelFilter {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub rating: Option<i16>,
    /// Comma-separated field names, `-` prefix for descending
    pub ordering: Option<String>,
}

/// Attributes for creating or updating a hotel
#[derive(Debug, Clone)]
pub struct HotelInput {
    pub name: String,
    pub address: String,
    pub city: String,
    pub contact_no: String,
    pub rating: i16,
    pub email: String,
}

/// Attributes for adding a room to a hotel
#[derive(Debug, Clone)]
pub struct RoomInput {
    pub room_no: i32,
    pub room_type: RoomType,
    pub price_per_night: i32,
}

pub struct CatalogService;

impl CatalogService {
    fn validate_hotel(input: &HotelInput) -> Result<()> {
        if input.name.trim().is_empty() {
            return Err(Error::Validation("Hotel name cannot be empty".to_string()));
        }

        if !(1..=5).contains(&input.rating) {
            return Err(Error::Validation(
                "Rating must be between 1 and 5".to_string(),
            ));
        }

        Ok(())
    }

    /// Query hotels with attribute filtering and ordering
    pub async fn list_hotels(
        db: &DatabaseConnection,
        filter: HotelFilter,
    ) -> Result<Vec<hotel::Model>> {
        let mut condition = Condition::all();

        if let Some(name) = filter.name {
            condition = condition.add(hotel::Column::Name.contains(name));
        }

        if let Some(city) = filter.city {
            condition = condition.add(hotel::Column::City.contains(city));
        }

        if let Some(address) = filter.address {
            condition = condition.add(hotel::Column::Address.contains(address));
        }

        if let Some(rating) = filter.rating {
            condition = condition.add(hotel::Column::Rating.eq(rating));
        }

        let mut query = hotel::Entity::find().filter(condition);

        if let Some(ordering) = filter.ordering {
            for field in ordering.split(',') {
                let field = field.trim();
                let (name, order) = match field.strip_prefix('-') {
                    Some(rest) => (rest, Order::Desc),
                    None => (field, Order::Asc),
                };

                // Unknown ordering fields are ignored rather than failing the query
                let column = match name {
                    "name" => Some(hotel::Column::Name),
                    "city" => Some(hotel::Column::City),
                    "rating" => Some(hotel::Column::Rating),
                    _ => None,
                };

                if let Some(column) = column {
                    query = query.order_by(column, order);
                }
            }
        }

        query.all(db).await.map_err(Into::into)
    }

    pub async fn create_hotel(db: &DatabaseConnection, input: HotelInput) -> Result<hotel::Model> {
        Self::validate_hotel(&input)?;

        let now = Utc::now().naive_utc();
        let new_hotel = hotel::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.trim().to_string()),
            address: Set(input.address),
            city: Set(input.city),
            contact_no: Set(input.contact_no),
            rating: Set(input.rating),
            email: Set(input.email),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_hotel.insert(db).await.map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Error::Validation("A hotel with this name already exists".to_string())
            }
            _ => Error::Database(err),
        })
    }

    pub async fn get_hotel(db: &DatabaseConnection, hotel_id: Uuid) -> Result<hotel::Model> {
        hotel::Entity::find_by_id(hotel_id)
            .one(db)
            .await?
            .ok_or(Error::NotFound("Hotel"))
    }

    pub async fn update_hotel(
        db: &DatabaseConnection,
        hotel_id: Uuid,
        input: HotelInput,
    ) -> Result<hotel::Model> {
        Self::validate_hotel(&input)?;

        let existing = Self::get_hotel(db, hotel_id).await?;

        let mut updated: hotel::ActiveModel = existing.into();
        updated.name = Set(input.name.trim().to_string());
        updated.address = Set(input.address);
        updated.city = Set(input.city);
        updated.contact_no = Set(input.contact_no);
        updated.rating = Set(input.rating);
        updated.email = Set(input.email);
        updated.updated_at = Set(Utc::now().naive_utc());

        updated.update(db).await.map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Error::Validation("A hotel with this name already exists".to_string())
            }
            _ => Error::Database(err),
        })
    }

    /// Deletes a hotel; its rooms and their bookings cascade with it
    pub async fn delete_hotel(db: &DatabaseConnection, hotel_id: Uuid) -> Result<()> {
        let deleted = hotel::Entity::delete_by_id(hotel_id).exec(db).await?;

        if deleted.rows_affected == 0 {
            return Err(Error::NotFound("Hotel"));
        }

        Ok(())
    }

    pub async fn add_room(
        db: &DatabaseConnection,
        hotel_id: Uuid,
        input: RoomInput,
    ) -> Result<room::Model> {
        if input.price_per_night <= 0 {
            return Err(Error::Validation(
                "Price per night must be positive".to_string(),
            ));
        }

        // The room must land in an existing hotel
        Self::get_hotel(db, hotel_id).await?;

        let now = Utc::now().naive_utc();
        let new_room = room::ActiveModel {
            id: Set(Uuid::new_v4()),
            hotel_id: Set(hotel_id),
            room_no: Set(input.room_no),
            room_type: Set(input.room_type),
            price_per_night: Set(input.price_per_night),
            is_available: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_room.insert(db).await.map_err(Into::into)
    }

    pub async fn rooms_in_hotel(
        db: &DatabaseConnection,
        hotel_id: Uuid,
    ) -> Result<Vec<room::Model>> {
        Self::get_hotel(db, hotel_id).await?;

        room::Entity::find()
            .filter(room::Column::HotelId.eq(hotel_id))
            .all(db)
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_hotel_validation() {
        let db = setup_test_db().await.unwrap();

        let mut input = test_hotel_input("Grand Plaza");
        input.rating = 6;
        let result = CatalogService::create_hotel(&db, input).await;
        assert!(matches!(result, Err(Error::Validation(_))));

        let mut input = test_hotel_input("Grand Plaza");
        input.rating = 0;
        let result = CatalogService::create_hotel(&db, input).await;
        assert!(matches!(result, Err(Error::Validation(_))));

        let input = test_hotel_input("   ");
        let result = CatalogService::create_hotel(&db, input).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_hotel_name_is_unique() {
        let db = setup_test_db().await.unwrap();

        create_test_hotel(&db, "Grand Plaza").await.unwrap();
        let result = CatalogService::create_hotel(&db, test_hotel_input("Grand Plaza")).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_hotels_filters() {
        let db = setup_test_db().await.unwrap();

        let mut input = test_hotel_input("Grand Plaza");
        input.city = "Mumbai".to_string();
        input.rating = 5;
        CatalogService::create_hotel(&db, input).await.unwrap();

        let mut input = test_hotel_input("Seaside Inn");
        input.city = "Goa".to_string();
        input.rating = 3;
        CatalogService::create_hotel(&db, input).await.unwrap();

        let by_city = CatalogService::list_hotels(
            &db,
            HotelFilter {
                city: Some("Mumbai".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_city.len(), 1);
        assert_eq!(by_city[0].name, "Grand Plaza");

        let by_rating = CatalogService::list_hotels(
            &db,
            HotelFilter {
                rating: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_rating.len(), 1);
        assert_eq!(by_rating[0].name, "Seaside Inn");

        let by_name = CatalogService::list_hotels(
            &db,
            HotelFilter {
                name: Some("Seaside".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_name.len(), 1);
    }

    #[tokio::test]
    async fn test_list_hotels_ordering() {
        let db = setup_test_db().await.unwrap();

        for (name, rating) in [("Alpha", 2), ("Beta", 5), ("Gamma", 4)] {
            let mut input = test_hotel_input(name);
            input.rating = rating;
            CatalogService::create_hotel(&db, input).await.unwrap();
        }

        let hotels = CatalogService::list_hotels(
            &db,
            HotelFilter {
                ordering: Some("-rating".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let ratings: Vec<i16> = hotels.iter().map(|h| h.rating).collect();
        assert_eq!(ratings, vec![5, 4, 2]);

        // Unknown fields are ignored, remaining fields still apply
        let hotels = CatalogService::list_hotels(
            &db,
            HotelFilter {
                ordering: Some("bogus,name".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let names: Vec<&str> = hotels.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_hotel() {
        let db = setup_test_db().await.unwrap();

        let created = create_test_hotel(&db, "Grand Plaza").await.unwrap();

        let mut input = test_hotel_input("Grand Plaza");
        input.rating = 2;
        let updated = CatalogService::update_hotel(&db, created.id, input)
            .await
            .unwrap();
        assert_eq!(updated.rating, 2);
        assert_eq!(updated.id, created.id);

        CatalogService::delete_hotel(&db, created.id).await.unwrap();
        let result = CatalogService::get_hotel(&db, created.id).await;
        assert!(matches!(result, Err(Error::NotFound(_))));

        let result = CatalogService::delete_hotel(&db, created.id).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_add_room_requires_hotel_and_positive_price() {
        let db = setup_test_db().await.unwrap();

        let result = CatalogService::add_room(&db, Uuid::new_v4(), test_room_input(101)).await;
        assert!(matches!(result, Err(Error::NotFound(_))));

        let created = create_test_hotel(&db, "Grand Plaza").await.unwrap();

        let mut input = test_room_input(101);
        input.price_per_night = 0;
        let result = CatalogService::add_room(&db, created.id, input).await;
        assert!(matches!(result, Err(Error::Validation(_))));

        let added = CatalogService::add_room(&db, created.id, test_room_input(101))
            .await
            .unwrap();
        assert_eq!(added.room_no, 101);
        assert!(added.is_available);

        let rooms = CatalogService::rooms_in_hotel(&db, created.id).await.unwrap();
        assert_eq!(rooms.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_hotel_cascades_to_rooms() {
        let db = setup_test_db().await.unwrap();

        let created = create_test_hotel(&db, "Grand Plaza").await.unwrap();
        let added = CatalogService::add_room(&db, created.id, test_room_input(101))
            .await
            .unwrap();

        CatalogService::delete_hotel(&db, created.id).await.unwrap();

        let orphan = room::Entity::find_by_id(added.id).one(&db).await.unwrap();
        assert!(orphan.is_none());
    }
}
