use models::stay::RangeError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Check-out date should be greater than check-in date")]
    InvalidRange,

    #[error("Booking is strictly for the present and future, not the past")]
    PastDateNotAllowed,

    #[error("Room is not available for the requested dates")]
    RoomNotAvailable { conflicting: Vec<Uuid> },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RangeError> for Error {
    fn from(_: RangeError) -> Self {
        Error::InvalidRange
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
