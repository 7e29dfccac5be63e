use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::EnumIter;

#[cfg(feature = "database")]
use sea_orm::Value;

/// Category a room is sold as; stored as its display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
pub enum RoomType {
    Standard,
    Deluxe,
    Suite,
    ExecutiveSuite,
    Poolside,
}

impl FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard room" | "standard" => Ok(Self::Standard),
            "deluxe room" | "deluxe" => Ok(Self::Deluxe),
            "suite" => Ok(Self::Suite),
            "executive suite" => Ok(Self::ExecutiveSuite),
            "poolside room" | "poolside" => Ok(Self::Poolside),
            _ => Err(format!("Unknown room type: {s}")),
        }
    }
}

impl Display for RoomType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Standard => write!(f, "Standard Room"),
            Self::Deluxe => write!(f, "Deluxe Room"),
            Self::Suite => write!(f, "Suite"),
            Self::ExecutiveSuite => write!(f, "Executive Suite"),
            Self::Poolside => write!(f, "Poolside Room"),
        }
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for RoomType {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "RoomType".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::Text
    }
}

#[cfg(feature = "database")]
impl From<RoomType> for Value {
    fn from(room_type: RoomType) -> Self {
        Value::String(Some(Box::new(room_type.to_string())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for RoomType {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: String = res.try_get_by(index)?;

        val.parse().map_err(|e| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Failed to parse RoomType: {e}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for RoomType {
    fn null() -> Value {
        Value::String(None)
    }
}

#[cfg(test)]
mod tests {
    use super::RoomType;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_room_type_parsing() {
        assert_eq!(
            RoomType::from_str("Standard Room").unwrap(),
            RoomType::Standard
        );
        assert_eq!(RoomType::from_str("deluxe").unwrap(), RoomType::Deluxe);
        assert_eq!(
            RoomType::from_str("Executive Suite").unwrap(),
            RoomType::ExecutiveSuite
        );
        assert!(RoomType::from_str("Penthouse").is_err());
    }

    #[test]
    fn test_room_type_round_trip() {
        for room_type in RoomType::iter() {
            let s = room_type.to_string();
            let parsed = RoomType::from_str(&s).unwrap();
            assert_eq!(room_type, parsed);
        }
    }
}
