use chrono::NaiveDate;
use thiserror::Error;

/// Errors constructing a [`StayRange`]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("check-out date must be after check-in date")]
    Inverted,
}

/// A guest's stay, the half-open interval `[check_in, check_out)`.
///
/// The night of the check-out date itself is not occupied, so a stay
/// ending on a given day and another starting the same day never share
/// a night.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayRange {
    /// Builds a stay range, rejecting empty and inverted ranges.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, RangeError> {
        if check_out <= check_in {
            return Err(RangeError::Inverted);
        }

        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(self) -> NaiveDate {
        self.check_out
    }

    /// Number of whole nights between check-in and check-out.
    /// Always at least 1 for a constructed range.
    pub fn nights(self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Two stays conflict iff they share at least one night:
    /// `a < d && c < b` for `[a,b)` and `[c,d)`.
    pub fn overlaps(self, other: Self) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Whether the stay occupies the room on `date`.
    pub fn covers(self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }

    /// Whether any endpoint of the stay lies before `today`.
    pub fn starts_before(self, today: NaiveDate) -> bool {
        self.check_in < today || self.check_out < today
    }
}

/// Total price of a stay at the given nightly rate. Integer day counts,
/// integer prices; no rounding involved.
pub fn total_price(price_per_night: i32, stay: StayRange) -> i64 {
    stay.nights() * i64::from(price_per_night)
}
