use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on rooms.hotel_id for faster joins
        manager
            .create_index(
                Index::create()
                    .name("idx_rooms_hotel_id")
                    .table(Rooms::Table)
                    .col(Rooms::HotelId)
                    .to_owned(),
            )
            .await?;

        // Covering index for the overlap scan on a room's bookings
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_room_dates")
                    .table(Bookings::Table)
                    .col(Bookings::RoomId)
                    .col(Bookings::CheckInDate)
                    .col(Bookings::CheckOutDate)
                    .to_owned(),
            )
            .await?;

        // Index on bookings.check_in_date for the today's-check-ins report
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_check_in_date")
                    .table(Bookings::Table)
                    .col(Bookings::CheckInDate)
                    .to_owned(),
            )
            .await?;

        // Index on hotels.city for catalog search
        manager
            .create_index(
                Index::create()
                    .name("idx_hotels_city")
                    .table(Hotels::Table)
                    .col(Hotels::City)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        manager
            .drop_index(Index::drop().name("idx_hotels_city").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_bookings_check_in_date").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_bookings_room_dates").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_rooms_hotel_id").to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Rooms {
    Table,
    HotelId,
}

#[derive(Iden)]
enum Bookings {
    Table,
    RoomId,
    CheckInDate,
    CheckOutDate,
}

#[derive(Iden)]
enum Hotels {
    Table,
    City,
}
