use models::stay::{RangeError, StayRange};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub room_id: Uuid,
    pub guest_name: String,
    pub check_in_date: Date,
    pub check_out_date: Date,
    pub total_price: i64,
    pub created_at: DateTime,
}

impl Model {
    /// The stored stay. Rows are validated before insert, so this only
    /// fails on corrupt data.
    pub fn stay(&self) -> Result<StayRange, RangeError> {
        StayRange::new(self.check_in_date, self.check_out_date)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
