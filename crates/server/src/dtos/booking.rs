use crate::{dtos::hotel::RoomResponse, error::ApiError};
use chrono::NaiveDate;
use database::entities::booking;
use models::stay::StayRange;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Stay dates cross the wire as `YYYY-MM-DD` strings and are parsed
/// explicitly, so missing or malformed dates come back as a 400 with a
/// readable message instead of a serde rejection.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StayRequest {
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
}

impl StayRequest {
    pub fn parse(&self) -> Result<StayRange, ApiError> {
        let check_in = parse_date("check_in_date", self.check_in_date.as_deref())?;
        let check_out = parse_date("check_out_date", self.check_out_date.as_deref())?;

        StayRange::new(check_in, check_out)
            .map_err(database::errors::Error::from)
            .map_err(Into::into)
    }
}

pub(crate) fn parse_date(field: &str, value: Option<&str>) -> Result<NaiveDate, ApiError> {
    let value = value.ok_or_else(|| ApiError::bad_request("Please enter all data"))?;

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::bad_request(format!("{field} must be a date in YYYY-MM-DD format")))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BookRequest {
    pub guest_name: Option<String>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
}

impl BookRequest {
    pub fn parse(&self) -> Result<(&str, StayRange), ApiError> {
        let stay = StayRequest {
            check_in_date: self.check_in_date.clone(),
            check_out_date: self.check_out_date.clone(),
        }
        .parse()?;

        Ok((self.guest_name.as_deref().unwrap_or_default(), stay))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: String,
    pub room_id: String,
    pub guest_name: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_price: i64,
}

impl From<booking::Model> for BookingResponse {
    fn from(booking: booking::Model) -> Self {
        Self {
            id: booking.id.to_string(),
            room_id: booking.room_id.to_string(),
            guest_name: booking.guest_name,
            check_in_date: booking.check_in_date,
            check_out_date: booking.check_out_date,
            total_price: booking.total_price,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingConfirmation {
    pub message: String,
    pub booking: BookingResponse,
}

/// Query flags selecting the report; precedence `all` > `booking` > `today`
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct BookingReportParams {
    pub all: Option<String>,
    pub booking: Option<String>,
    pub today: Option<String>,
}

/// Which projection of a hotel's rooms and bookings to return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingReportKind {
    Rooms,
    Bookings,
    TodaysCheckIns,
}

impl BookingReportParams {
    pub fn kind(&self) -> Result<BookingReportKind, ApiError> {
        // A flag counts as set when it carries a non-empty value
        let flag = |value: &Option<String>| value.as_deref().is_some_and(|s| !s.is_empty());

        if flag(&self.all) {
            Ok(BookingReportKind::Rooms)
        } else if flag(&self.booking) {
            Ok(BookingReportKind::Bookings)
        } else if flag(&self.today) {
            Ok(BookingReportKind::TodaysCheckIns)
        } else {
            Err(ApiError::bad_request(
                "Provide one of the query flags: all, booking, today",
            ))
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum BookingReport {
    Rooms(Vec<RoomResponse>),
    Bookings(Vec<BookingResponse>),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stay_request(check_in: Option<&str>, check_out: Option<&str>) -> StayRequest {
        StayRequest {
            check_in_date: check_in.map(str::to_string),
            check_out_date: check_out.map(str::to_string),
        }
    }

    #[test]
    fn test_parses_well_formed_dates() {
        let stay = stay_request(Some("2030-06-01"), Some("2030-06-04"))
            .parse()
            .unwrap();
        assert_eq!(stay.nights(), 3);
    }

    #[test]
    fn test_missing_and_malformed_dates_rejected() {
        assert!(stay_request(None, Some("2030-06-04")).parse().is_err());
        assert!(stay_request(Some("2030-06-01"), None).parse().is_err());
        assert!(
            stay_request(Some("01-06-2030"), Some("2030-06-04"))
                .parse()
                .is_err()
        );
        assert!(
            stay_request(Some("2030-06-01"), Some("not-a-date"))
                .parse()
                .is_err()
        );
    }

    #[test]
    fn test_equal_dates_rejected() {
        assert!(
            stay_request(Some("2030-06-01"), Some("2030-06-01"))
                .parse()
                .is_err()
        );
    }

    #[test]
    fn test_report_kind_precedence() {
        let params = BookingReportParams {
            all: Some("true".to_string()),
            booking: Some("true".to_string()),
            today: None,
        };
        assert_eq!(params.kind().unwrap(), BookingReportKind::Rooms);

        let params = BookingReportParams {
            all: Some(String::new()), // ?all= with no value is not set
            booking: None,
            today: Some("1".to_string()),
        };
        assert_eq!(params.kind().unwrap(), BookingReportKind::TodaysCheckIns);

        let params = BookingReportParams {
            all: None,
            booking: None,
            today: None,
        };
        assert!(params.kind().is_err());
    }
}
