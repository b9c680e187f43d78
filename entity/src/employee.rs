use sea_orm::prelude::{DateTimeWithTimeZone, *};
use uuid::Uuid;

/// Employee row. The manager→reports relation is the `manager_id` adjacency
/// list; the store assumes it stays acyclic.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub department: String,
    #[sea_orm(indexed)]
    pub manager_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Manager,
    Compensation,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Manager => Entity::belongs_to(Entity)
                .from(Column::ManagerId)
                .to(Column::Id)
                .into(),
            Self::Compensation => Entity::has_many(super::compensation::Entity).into(),
        }
    }
}

impl Related<super::compensation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Compensation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
