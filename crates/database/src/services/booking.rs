use crate::{
    entities::{booking, hotel, room},
    errors::{Error, Result},
    services::availability::AvailabilityService,
};
use chrono::{NaiveDate, Utc};
use models::stay::{self, StayRange};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

/// Orchestrates booking creation and cancellation as atomic sequences.
///
/// Every write path locks the target room row for the duration of its
/// transaction, so a concurrent check-then-book for the same room cannot
/// interleave with another booking or a cancellation: exactly one of two
/// racing overlapping requests commits.
pub struct BookingService;

impl BookingService {
    /// Hotel-level booking path: the stay must not begin in the past.
    pub async fn book_room_strict(
        db: &DatabaseConnection,
        room_id: Uuid,
        guest_name: &str,
        stay: StayRange,
    ) -> Result<booking::Model> {
        if stay.starts_before(Utc::now().date_naive()) {
            return Err(Error::PastDateNotAllowed);
        }

        Self::book(db, room_id, guest_name, stay).await
    }

    /// Direct single-room booking path: only the range itself is validated.
    pub async fn book_room_basic(
        db: &DatabaseConnection,
        room_id: Uuid,
        guest_name: &str,
        stay: StayRange,
    ) -> Result<booking::Model> {
        Self::book(db, room_id, guest_name, stay).await
    }

    async fn book(
        db: &DatabaseConnection,
        room_id: Uuid,
        guest_name: &str,
        stay: StayRange,
    ) -> Result<booking::Model> {
        if guest_name.trim().is_empty() {
            return Err(Error::Validation("Guest name cannot be empty".to_string()));
        }

        let txn = db.begin().await?;

        // Row lock held to commit; an early return drops the transaction
        // and rolls everything back.
        let target = room::Entity::find_by_id(room_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(Error::NotFound("Room"))?;

        let conflicts = AvailabilityService::overlapping_bookings(&txn, room_id, stay).await?;
        if !conflicts.is_empty() {
            return Err(Error::RoomNotAvailable {
                conflicting: conflicts.into_iter().map(|b| b.id).collect(),
            });
        }

        let total_price = stay::total_price(target.price_per_night, stay);

        let confirmed = booking::ActiveModel {
            id: Set(Uuid::new_v4()),
            room_id: Set(target.id),
            guest_name: Set(guest_name.trim().to_string()),
            check_in_date: Set(stay.check_in()),
            check_out_date: Set(stay.check_out()),
            total_price: Set(total_price),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(&txn)
        .await?;

        let mut occupied: room::ActiveModel = target.into();
        occupied.is_available = Set(false);
        occupied.updated_at = Set(Utc::now().naive_utc());
        occupied.update(&txn).await?;

        txn.commit().await?;

        Ok(confirmed)
    }

    /// Removes a booking and recomputes the room's occupancy flag from the
    /// remaining ledger entries instead of resetting it unconditionally.
    pub async fn cancel_booking(db: &DatabaseConnection, booking_id: Uuid) -> Result<()> {
        let today = Utc::now().date_naive();

        let txn = db.begin().await?;

        let cancelled = booking::Entity::find_by_id(booking_id)
            .one(&txn)
            .await?
            .ok_or(Error::NotFound("Booking"))?;

        // Same lock scope as booking, so the two cannot interleave
        let target = room::Entity::find_by_id(cancelled.room_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(Error::NotFound("Room"))?;

        booking::Entity::delete_by_id(cancelled.id).exec(&txn).await?;

        let still_occupied = Self::room_occupied_on(&txn, target.id, today).await?;

        let mut freed: room::ActiveModel = target.into();
        freed.is_available = Set(!still_occupied);
        freed.updated_at = Set(Utc::now().naive_utc());
        freed.update(&txn).await?;

        txn.commit().await?;

        Ok(())
    }

    /// Whether any booking for the room covers `date`
    async fn room_occupied_on<C: ConnectionTrait>(
        conn: &C,
        room_id: Uuid,
        date: NaiveDate,
    ) -> Result<bool> {
        let covering = booking::Entity::find()
            .filter(booking::Column::RoomId.eq(room_id))
            .filter(booking::Column::CheckInDate.lte(date))
            .filter(booking::Column::CheckOutDate.gt(date))
            .count(conn)
            .await?;

        Ok(covering > 0)
    }

    /// All rooms of the hotel, for the rooms report
    pub async fn rooms_report(db: &DatabaseConnection, hotel_id: Uuid) -> Result<Vec<room::Model>> {
        Self::require_hotel(db, hotel_id).await?;

        room::Entity::find()
            .filter(room::Column::HotelId.eq(hotel_id))
            .all(db)
            .await
            .map_err(Into::into)
    }

    /// Every booking across the hotel's rooms
    pub async fn bookings_report(
        db: &DatabaseConnection,
        hotel_id: Uuid,
    ) -> Result<Vec<booking::Model>> {
        Self::require_hotel(db, hotel_id).await?;

        let with_rooms = booking::Entity::find()
            .find_also_related(room::Entity)
            .filter(room::Column::HotelId.eq(hotel_id))
            .all(db)
            .await?;

        Ok(with_rooms.into_iter().map(|(b, _)| b).collect())
    }

    /// Bookings in the hotel whose stay begins today
    pub async fn todays_check_ins(
        db: &DatabaseConnection,
        hotel_id: Uuid,
    ) -> Result<Vec<booking::Model>> {
        Self::require_hotel(db, hotel_id).await?;

        let today = Utc::now().date_naive();
        let with_rooms = booking::Entity::find()
            .find_also_related(room::Entity)
            .filter(room::Column::HotelId.eq(hotel_id))
            .filter(booking::Column::CheckInDate.eq(today))
            .all(db)
            .await?;

        Ok(with_rooms.into_iter().map(|(b, _)| b).collect())
    }

    async fn require_hotel(db: &DatabaseConnection, hotel_id: Uuid) -> Result<()> {
        hotel::Entity::find_by_id(hotel_id)
            .one(db)
            .await?
            .ok_or(Error::NotFound("Hotel"))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use chrono::Days;

    #[tokio::test]
    async fn test_book_room_computes_price() {
        let (db, _hotel, target) = setup_with_room().await.unwrap();

        // 100/night, 2030-06-01 to 2030-06-04
        let confirmed = BookingService::book_room_basic(&db, target.id, "Alice", stay(1, 4))
            .await
            .unwrap();

        assert_eq!(confirmed.total_price, 300);
        assert_eq!(confirmed.guest_name, "Alice");
        assert_eq!(confirmed.stay().unwrap(), stay(1, 4));

        let reloaded = room::Entity::find_by_id(target.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert!(!reloaded.is_available);
    }

    #[tokio::test]
    async fn test_book_room_rejects_overlap() {
        let (db, _hotel, target) = setup_with_room().await.unwrap();

        let first = BookingService::book_room_basic(&db, target.id, "Alice", stay(1, 4))
            .await
            .unwrap();

        let result = BookingService::book_room_basic(&db, target.id, "Bob", stay(3, 5)).await;
        match result {
            Err(Error::RoomNotAvailable { conflicting }) => {
                assert_eq!(conflicting, vec![first.id]);
            }
            other => panic!("expected RoomNotAvailable, got {other:?}"),
        }

        // No partial state: only the first booking exists
        let count = booking::Entity::find().count(&db).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_back_to_back_booking_succeeds() {
        let (db, _hotel, target) = setup_with_room().await.unwrap();

        BookingService::book_room_basic(&db, target.id, "Alice", stay(1, 4))
            .await
            .unwrap();

        // Checks in the day Alice checks out
        let confirmed = BookingService::book_room_basic(&db, target.id, "Bob", stay(4, 6))
            .await
            .unwrap();
        assert_eq!(confirmed.total_price, 200);
    }

    #[tokio::test]
    async fn test_book_room_unknown_room() {
        let db = setup_test_db().await.unwrap();

        let result = BookingService::book_room_basic(&db, Uuid::new_v4(), "Alice", stay(1, 4)).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_book_room_rejects_blank_guest() {
        let (db, _hotel, target) = setup_with_room().await.unwrap();

        let result = BookingService::book_room_basic(&db, target.id, "   ", stay(1, 4)).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_strict_path_rejects_past_dates() {
        let (db, _hotel, target) = setup_with_room().await.unwrap();

        let today = Utc::now().date_naive();
        let past = StayRange::new(
            today.checked_sub_days(Days::new(10)).unwrap(),
            today.checked_sub_days(Days::new(7)).unwrap(),
        )
        .unwrap();

        let result = BookingService::book_room_strict(&db, target.id, "Alice", past).await;
        assert!(matches!(result, Err(Error::PastDateNotAllowed)));

        // The basic path takes the same stay
        let confirmed = BookingService::book_room_basic(&db, target.id, "Alice", past)
            .await
            .unwrap();
        assert_eq!(confirmed.total_price, 300);

        // And the strict path accepts a future stay
        let future = StayRange::new(
            today.checked_add_days(Days::new(7)).unwrap(),
            today.checked_add_days(Days::new(10)).unwrap(),
        )
        .unwrap();
        BookingService::book_room_strict(&db, target.id, "Bob", future)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_overlapping_bookings_one_wins() {
        let (db, _hotel, target) = setup_with_room().await.unwrap();

        let (first, second) = tokio::join!(
            BookingService::book_room_basic(&db, target.id, "Alice", stay(1, 4)),
            BookingService::book_room_basic(&db, target.id, "Bob", stay(2, 5)),
        );

        let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);

        let loser = if first.is_ok() { second } else { first };
        assert!(matches!(loser, Err(Error::RoomNotAvailable { .. })));

        let count = booking::Entity::find().count(&db).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_cancel_unknown_booking_mutates_nothing() {
        let (db, _hotel, target) = setup_with_room().await.unwrap();

        BookingService::book_room_basic(&db, target.id, "Alice", stay(1, 4))
            .await
            .unwrap();

        let result = BookingService::cancel_booking(&db, Uuid::new_v4()).await;
        assert!(matches!(result, Err(Error::NotFound(_))));

        let count = booking::Entity::find().count(&db).await.unwrap();
        assert_eq!(count, 1);
        let reloaded = room::Entity::find_by_id(target.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert!(!reloaded.is_available);
    }

    #[tokio::test]
    async fn test_cancel_frees_room_and_range() {
        let (db, _hotel, target) = setup_with_room().await.unwrap();

        let confirmed = BookingService::book_room_basic(&db, target.id, "Alice", stay(1, 4))
            .await
            .unwrap();

        BookingService::cancel_booking(&db, confirmed.id).await.unwrap();

        // Future stay gone, nothing covers today: flag resets
        let reloaded = room::Entity::find_by_id(target.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert!(reloaded.is_available);

        // The same range can be booked again
        BookingService::book_room_basic(&db, target.id, "Bob", stay(1, 4))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancel_keeps_flag_while_current_stay_remains() {
        let (db, _hotel, target) = setup_with_room().await.unwrap();

        let today = Utc::now().date_naive();
        let current = StayRange::new(today, today.checked_add_days(Days::new(3)).unwrap()).unwrap();

        BookingService::book_room_basic(&db, target.id, "Alice", current)
            .await
            .unwrap();
        let future = BookingService::book_room_basic(&db, target.id, "Bob", stay(1, 4))
            .await
            .unwrap();

        // Cancelling the future stay leaves today's guest in the room
        BookingService::cancel_booking(&db, future.id).await.unwrap();

        let reloaded = room::Entity::find_by_id(target.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert!(!reloaded.is_available);
    }

    #[tokio::test]
    async fn test_reports() {
        let (db, hotel, target) = setup_with_room().await.unwrap();
        let other_hotel = create_test_hotel(&db, "Seaside Inn").await.unwrap();
        let other_room = create_test_room(&db, other_hotel.id, 201).await.unwrap();

        BookingService::book_room_basic(&db, target.id, "Alice", stay(1, 4))
            .await
            .unwrap();
        BookingService::book_room_basic(&db, other_room.id, "Bob", stay(1, 4))
            .await
            .unwrap();

        let today = Utc::now().date_naive();
        let current = StayRange::new(today, today.checked_add_days(Days::new(2)).unwrap()).unwrap();
        let checking_in = BookingService::book_room_basic(&db, target.id, "Carol", current)
            .await
            .unwrap();

        let rooms = BookingService::rooms_report(&db, hotel.id).await.unwrap();
        assert_eq!(rooms.len(), 1);

        // Scoped to the hotel: Bob's booking elsewhere is not listed
        let bookings = BookingService::bookings_report(&db, hotel.id).await.unwrap();
        assert_eq!(bookings.len(), 2);
        assert!(bookings.iter().all(|b| b.room_id == target.id));

        let arrivals = BookingService::todays_check_ins(&db, hotel.id).await.unwrap();
        assert_eq!(arrivals.len(), 1);
        assert_eq!(arrivals[0].id, checking_in.id);

        let result = BookingService::rooms_report(&db, Uuid::new_v4()).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
