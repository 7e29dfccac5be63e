use crate::error::ApiError;
use database::{
    entities::{hotel, room},
    services::catalog::{HotelFilter, HotelInput, RoomInput},
};
use models::room_type::RoomType;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct HotelRequest {
    pub name: String,
    pub address: String,
    pub city: String,
    pub contact_no: String,
    pub rating: i16,
    pub email: String,
}

impl From<HotelRequest> for HotelInput {
    fn from(request: HotelRequest) -> Self {
        Self {
            name: request.name,
            address: request.address,
            city: request.city,
            contact_no: request.contact_no,
            rating: request.rating,
            email: request.email,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct HotelQueryParams {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub rating: Option<i16>,
    /// Comma-separated field names, `-` prefix for descending
    pub ordering: Option<String>,
}

impl From<HotelQueryParams> for HotelFilter {
    fn from(params: HotelQueryParams) -> Self {
        Self {
            name: params.name,
            city: params.city,
            address: params.address,
            rating: params.rating,
            ordering: params.ordering,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HotelResponse {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub contact_no: String,
    pub rating: i16,
    pub email: String,
}

impl From<hotel::Model> for HotelResponse {
    fn from(hotel: hotel::Model) -> Self {
        Self {
            id: hotel.id.to_string(),
            name: hotel.name,
            address: hotel.address,
            city: hotel.city,
            contact_no: hotel.contact_no,
            rating: hotel.rating,
            email: hotel.email,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RoomAddRequest {
    pub room_no: i32,
    /// One of the catalog room types, e.g. "Deluxe Room"
    pub room_type: String,
    pub price_per_night: i32,
}

impl RoomAddRequest {
    pub fn parse(self) -> Result<RoomInput, ApiError> {
        let room_type: RoomType = self
            .room_type
            .parse()
            .map_err(|err: String| ApiError::bad_request(err))?;

        Ok(RoomInput {
            room_no: self.room_no,
            room_type,
            price_per_night: self.price_per_night,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoomResponse {
    pub id: String,
    pub hotel_id: String,
    pub room_no: i32,
    pub room_type: String,
    pub price_per_night: i32,
    pub is_available: bool,
}

impl From<room::Model> for RoomResponse {
    fn from(room: room::Model) -> Self {
        Self {
            id: room.id.to_string(),
            hotel_id: room.hotel_id.to_string(),
            room_no: room.room_no,
            room_type: room.room_type.to_string(),
            price_per_night: room.price_per_night,
            is_available: room.is_available,
        }
    }
}
