use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

/// Row of the `events` table: the validated payload as `jsonb`
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "JsonBinary")]
    pub payload: Json,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn from_payload(payload: Json) -> Self {
        Self {
            id: Set(Uuid::now_v7()),
            payload: Set(payload),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}
