use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[cfg(feature = "database")]
use sea_orm::Value;

/// What a caller is allowed to do; checked before any service call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Read,
    Write,
    Admin,
}

/// A user's role; stored as its numeric code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Employee,
}

impl Role {
    pub fn code(self) -> i16 {
        match self {
            Self::Admin => 1,
            Self::Manager => 2,
            Self::Employee => 3,
        }
    }

    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(Self::Admin),
            2 => Some(Self::Manager),
            3 => Some(Self::Employee),
            _ => None,
        }
    }

    /// Whether the role carries the given capability. Admins hold every
    /// capability, managers read and write, employees read only.
    pub fn grants(self, capability: Capability) -> bool {
        match capability {
            Capability::Read => true,
            Capability::Write => matches!(self, Self::Admin | Self::Manager),
            Capability::Admin => matches!(self, Self::Admin),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Admin => write!(f, "Admin"),
            Self::Manager => write!(f, "Manager"),
            Self::Employee => write!(f, "Employee"),
        }
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for Role {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::SmallInt(Some(code)) => {
                Role::from_code(code).ok_or(sea_orm::sea_query::ValueTypeErr)
            }
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "Role".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::SmallInt
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::SmallInteger
    }
}

#[cfg(feature = "database")]
impl From<Role> for Value {
    fn from(role: Role) -> Self {
        Value::SmallInt(Some(role.code()))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for Role {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let code: i16 = res.try_get_by(index)?;

        Role::from_code(code).ok_or_else(|| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Unknown role code: {code}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for Role {
    fn null() -> Value {
        Value::SmallInt(None)
    }
}
