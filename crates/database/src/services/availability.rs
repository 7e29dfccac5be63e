use crate::{
    entities::{booking, hotel, room},
    errors::{Error, Result},
};
use models::stay::StayRange;
use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::collections::HashSet;
use uuid::Uuid;

/// Verdict for a room over a requested stay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub available: bool,
    pub conflicting_booking_ids: Vec<Uuid>,
}

/// Read-only queries over the booking ledger. All booking decisions go
/// through [`overlapping_bookings`](AvailabilityService::overlapping_bookings),
/// so the overlap policy lives in exactly one query.
pub struct AvailabilityService;

impl AvailabilityService {
    /// Bookings for `room_id` sharing at least one night with `stay`.
    ///
    /// Direct SQL translation of the half-open predicate: an existing
    /// booking `[a,b)` conflicts with the request `[c,d)` iff
    /// `a < d AND b > c`. A stay checking in on another's check-out day
    /// is not a conflict.
    pub(crate) async fn overlapping_bookings<C: ConnectionTrait>(
        conn: &C,
        room_id: Uuid,
        stay: StayRange,
    ) -> Result<Vec<booking::Model>> {
        booking::Entity::find()
            .filter(booking::Column::RoomId.eq(room_id))
            .filter(booking::Column::CheckInDate.lt(stay.check_out()))
            .filter(booking::Column::CheckOutDate.gt(stay.check_in()))
            .all(conn)
            .await
            .map_err(Into::into)
    }

    /// Whether the room is free for the whole stay; lists the bookings in
    /// the way when it is not. Pure read, no side effects.
    pub async fn check_availability(
        db: &DatabaseConnection,
        room_id: Uuid,
        stay: StayRange,
    ) -> Result<Availability> {
        let (target, conflicts) = futures::try_join!(
            async {
                room::Entity::find_by_id(room_id)
                    .one(db)
                    .await
                    .map_err(Error::from)
            },
            Self::overlapping_bookings(db, room_id, stay),
        )?;

        target.ok_or(Error::NotFound("Room"))?;

        Ok(Availability {
            available: conflicts.is_empty(),
            conflicting_booking_ids: conflicts.into_iter().map(|b| b.id).collect(),
        })
    }

    /// Rooms of the hotel with zero bookings overlapping the stay
    pub async fn list_available_rooms(
        db: &DatabaseConnection,
        hotel_id: Uuid,
        stay: StayRange,
    ) -> Result<Vec<room::Model>> {
        hotel::Entity::find_by_id(hotel_id)
            .one(db)
            .await?
            .ok_or(Error::NotFound("Hotel"))?;

        let rooms = room::Entity::find()
            .filter(room::Column::HotelId.eq(hotel_id))
            .all(db)
            .await?;

        if rooms.is_empty() {
            return Ok(vec![]);
        }

        // Batch-fetch the rooms that have a conflicting booking; collecting
        // into a set deduplicates rooms with several conflicts
        let room_ids: Vec<Uuid> = rooms.iter().map(|r| r.id).collect();
        let booked: HashSet<Uuid> = booking::Entity::find()
            .filter(booking::Column::RoomId.is_in(room_ids))
            .filter(booking::Column::CheckInDate.lt(stay.check_out()))
            .filter(booking::Column::CheckOutDate.gt(stay.check_in()))
            .all(db)
            .await?
            .into_iter()
            .map(|b| b.room_id)
            .collect();

        Ok(rooms
            .into_iter()
            .filter(|r| !booked.contains(&r.id))
            .collect())
    }
}
