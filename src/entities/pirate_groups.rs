use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pirate_groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique, indexed)]
    pub name: String,

    pub captain: String,

    pub ship_name: Option<String>,

    /// Free text, e.g. "3,161,000,000 Berries" or "Unknown"
    pub total_bounty: Option<String>,

    pub flag_description: Option<String>,

    pub origin: Option<String>,

    pub member_count: i32,

    pub description: Option<String>,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::crew_members::Entity")]
    CrewMembers,
}

impl Related<super::crew_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CrewMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
