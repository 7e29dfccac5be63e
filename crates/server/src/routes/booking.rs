use crate::{
    dtos::{
        auth::MessageResponse,
        booking::{
            BookRequest, BookingConfirmation, BookingReport, BookingReportKind,
            BookingReportParams, BookingResponse, StayRequest,
        },
        hotel::RoomResponse,
    },
    error::{ApiError, ApiJson},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use database::{
    errors::Error,
    services::{availability::AvailabilityService, booking::BookingService},
};
use sea_orm::prelude::Uuid;

/// Rooms of the hotel that are free for the whole requested stay
#[utoipa::path(
    post,
    path = "/hotels/{hotel_id}/rooms",
    params(
        ("hotel_id" = Uuid, Path, description = "Hotel ID")
    ),
    request_body = StayRequest,
    responses(
        (status = 200, description = "Available rooms retrieved", body = [RoomResponse]),
        (status = 400, description = "Missing, malformed, inverted or past dates"),
        (status = 404, description = "Hotel not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Bookings"
)]
pub async fn available_rooms(
    State(state): State<AppState>,
    Path(hotel_id): Path<Uuid>,
    ApiJson(request): ApiJson<StayRequest>,
) -> Result<Json<Vec<RoomResponse>>, ApiError> {
    let stay = request.parse()?;

    // The hotel-level path is strict: no stays beginning in the past
    if stay.starts_before(Utc::now().date_naive()) {
        return Err(Error::PastDateNotAllowed.into());
    }

    let rooms = AvailabilityService::list_available_rooms(&state.db, hotel_id, stay).await?;

    Ok(Json(rooms.into_iter().map(Into::into).collect()))
}

/// Book a specific room for a guest
#[utoipa::path(
    post,
    path = "/hotels/{hotel_id}/{room_id}/book",
    params(
        ("hotel_id" = Uuid, Path, description = "Hotel ID"),
        ("room_id" = Uuid, Path, description = "Room ID")
    ),
    request_body = BookRequest,
    responses(
        (status = 200, description = "Room booked", body = BookingConfirmation),
        (status = 400, description = "Invalid dates, missing data, or room not available"),
        (status = 404, description = "Room not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Bookings"
)]
pub async fn book_room(
    State(state): State<AppState>,
    Path((_hotel_id, room_id)): Path<(Uuid, Uuid)>,
    ApiJson(request): ApiJson<BookRequest>,
) -> Result<Json<BookingConfirmation>, ApiError> {
    let (guest_name, stay) = request.parse()?;

    let confirmed = BookingService::book_room_basic(&state.db, room_id, guest_name, stay).await?;

    Ok(Json(BookingConfirmation {
        message: "Room booked successfully".to_string(),
        booking: confirmed.into(),
    }))
}

/// Cancel a booking by id
#[utoipa::path(
    delete,
    path = "/bookings/{booking_id}",
    params(
        ("booking_id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking cancelled", body = MessageResponse),
        (status = 400, description = "No booking with this id"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Bookings"
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    BookingService::cancel_booking(&state.db, booking_id)
        .await
        .map_err(|err| match err {
            // Documented contract: cancelling an unknown booking is a 400
            Error::NotFound(_) => ApiError::bad_request("There is no booking with this id"),
            other => other.into(),
        })?;

    Ok(Json(MessageResponse::new(
        "Room booking cancelled successfully",
    )))
}

/// Rooms, bookings, or today's check-ins for a hotel, by query flag
#[utoipa::path(
    get,
    path = "/hotels/{hotel_id}/rooms/bookings",
    params(
        ("hotel_id" = Uuid, Path, description = "Hotel ID"),
        BookingReportParams
    ),
    responses(
        (status = 200, description = "Report retrieved", body = BookingReport),
        (status = 400, description = "No report flag provided"),
        (status = 404, description = "Hotel not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Bookings"
)]
pub async fn bookings_report(
    State(state): State<AppState>,
    Path(hotel_id): Path<Uuid>,
    Query(params): Query<BookingReportParams>,
) -> Result<Json<BookingReport>, ApiError> {
    let report = match params.kind()? {
        BookingReportKind::Rooms => {
            let rooms = BookingService::rooms_report(&state.db, hotel_id).await?;
            BookingReport::Rooms(rooms.into_iter().map(Into::into).collect())
        }
        BookingReportKind::Bookings => {
            let bookings = BookingService::bookings_report(&state.db, hotel_id).await?;
            BookingReport::Bookings(bookings.into_iter().map(BookingResponse::from).collect())
        }
        BookingReportKind::TodaysCheckIns => {
            let bookings = BookingService::todays_check_ins(&state.db, hotel_id).await?;
            BookingReport::Bookings(bookings.into_iter().map(BookingResponse::from).collect())
        }
    };

    Ok(Json(report))
}
