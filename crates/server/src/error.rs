use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::errors::Error;
use serde_json::json;
use uuid::Uuid;

/// Error surfaced to clients as a status code plus `{ "message": … }`.
/// Booking conflicts additionally carry the ids of the bookings in the way.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    conflicting_booking_ids: Option<Vec<Uuid>>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            conflicting_booking_ids: None,
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Authentication credentials were not provided or are invalid".to_string(),
            conflicting_booking_ids: None,
        }
    }

    pub fn forbidden() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: "You do not have permission to perform this action".to_string(),
            conflicting_booking_ids: None,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::InvalidRange | Error::PastDateNotAllowed | Error::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::RoomNotAvailable { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Hash(_) | Error::Database(_) => {
                log::error!("request failed: {err}");
                return Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Internal server error".to_string(),
                    conflicting_booking_ids: None,
                };
            }
        };

        let conflicting_booking_ids = match &err {
            Error::RoomNotAvailable { conflicting } => Some(conflicting.clone()),
            _ => None,
        };

        Self {
            status,
            message: err.to_string(),
            conflicting_booking_ids,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.conflicting_booking_ids {
            Some(ids) => json!({
                "message": self.message,
                "conflicting_booking_ids": ids,
            }),
            None => json!({ "message": self.message }),
        };

        (self.status, Json(body)).into_response()
    }
}

/// `Json` wrapper whose rejection is an [`ApiError`], so malformed payloads
/// come back as `{ "message": … }` instead of a bare rejection body.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        Ok(Self(value))
    }
}
