use crate::{
    auth::extract::AuthUser,
    dtos::{
        auth::MessageResponse,
        hotel::{HotelQueryParams, HotelRequest, HotelResponse, RoomAddRequest, RoomResponse},
    },
    error::{ApiError, ApiJson},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::catalog::CatalogService;
use models::role::Capability;
use sea_orm::prelude::Uuid;

/// List hotels with attribute filtering and ordering
#[utoipa::path(
    get,
    path = "/hotels",
    params(HotelQueryParams),
    responses(
        (status = 200, description = "Hotels retrieved", body = [HotelResponse]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Hotels"
)]
pub async fn list_hotels(
    State(state): State<AppState>,
    Query(params): Query<HotelQueryParams>,
) -> Result<Json<Vec<HotelResponse>>, ApiError> {
    let hotels = CatalogService::list_hotels(&state.db, params.into()).await?;

    Ok(Json(hotels.into_iter().map(Into::into).collect()))
}

/// Add a hotel to the catalog; requires the write capability
#[utoipa::path(
    post,
    path = "/hotels",
    request_body = HotelRequest,
    responses(
        (status = 201, description = "Hotel created", body = HotelResponse),
        (status = 400, description = "Invalid or duplicate hotel data"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller lacks the write capability"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Hotels"
)]
pub async fn create_hotel(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<HotelRequest>,
) -> Result<(StatusCode, Json<HotelResponse>), ApiError> {
    user.require(Capability::Write)?;

    let hotel = CatalogService::create_hotel(&state.db, request.into()).await?;

    Ok((StatusCode::CREATED, Json(hotel.into())))
}

/// A single hotel by id
#[utoipa::path(
    get,
    path = "/hotels/{hotel_id}",
    params(
        ("hotel_id" = Uuid, Path, description = "Hotel ID")
    ),
    responses(
        (status = 200, description = "Hotel found", body = HotelResponse),
        (status = 404, description = "Hotel not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Hotels"
)]
pub async fn get_hotel(
    State(state): State<AppState>,
    Path(hotel_id): Path<Uuid>,
) -> Result<Json<HotelResponse>, ApiError> {
    let hotel = CatalogService::get_hotel(&state.db, hotel_id).await?;

    Ok(Json(hotel.into()))
}

/// Replace a hotel's attributes; requires the write capability
#[utoipa::path(
    put,
    path = "/hotels/{hotel_id}",
    params(
        ("hotel_id" = Uuid, Path, description = "Hotel ID")
    ),
    request_body = HotelRequest,
    responses(
        (status = 200, description = "Hotel updated", body = HotelResponse),
        (status = 400, description = "Invalid hotel data"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller lacks the write capability"),
        (status = 404, description = "Hotel not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Hotels"
)]
pub async fn update_hotel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(hotel_id): Path<Uuid>,
    ApiJson(request): ApiJson<HotelRequest>,
) -> Result<Json<HotelResponse>, ApiError> {
    user.require(Capability::Write)?;

    let hotel = CatalogService::update_hotel(&state.db, hotel_id, request.into()).await?;

    Ok(Json(hotel.into()))
}

/// Delete a hotel along with its rooms and their bookings
#[utoipa::path(
    delete,
    path = "/hotels/{hotel_id}",
    params(
        ("hotel_id" = Uuid, Path, description = "Hotel ID")
    ),
    responses(
        (status = 200, description = "Hotel deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller lacks the write capability"),
        (status = 404, description = "Hotel not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Hotels"
)]
pub async fn delete_hotel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(hotel_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    user.require(Capability::Write)?;

    CatalogService::delete_hotel(&state.db, hotel_id).await?;

    Ok(Json(MessageResponse::new("Hotel deleted successfully")))
}

/// Add a room to a hotel; requires the write capability
#[utoipa::path(
    post,
    path = "/hotels/{hotel_id}/room/add",
    params(
        ("hotel_id" = Uuid, Path, description = "Hotel ID")
    ),
    request_body = RoomAddRequest,
    responses(
        (status = 201, description = "Room added", body = RoomResponse),
        (status = 400, description = "Invalid room data"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller lacks the write capability"),
        (status = 404, description = "Hotel not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Hotels"
)]
pub async fn add_room(
    State(state): State<AppState>,
    user: AuthUser,
    Path(hotel_id): Path<Uuid>,
    ApiJson(request): ApiJson<RoomAddRequest>,
) -> Result<(StatusCode, Json<RoomResponse>), ApiError> {
    user.require(Capability::Write)?;

    let room = CatalogService::add_room(&state.db, hotel_id, request.parse()?).await?;

    Ok((StatusCode::CREATED, Json(room.into())))
}
