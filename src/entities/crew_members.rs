use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "crew_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub name: String,

    pub role: String,

    pub bounty: String,

    pub image_url: Option<String>,

    pub description: Option<String>,

    pub devil_fruit: Option<String>,

    pub haki_types: Option<String>,

    pub special_skills: Option<String>,

    pub signature_moves: Option<String>,

    pub created_at: String,

    /// Nullable: a member may sail without a group.
    pub pirate_group_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pirate_groups::Entity",
        from = "Column::PirateGroupId",
        to = "super::pirate_groups::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    PirateGroup,
}

impl Related<super::pirate_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PirateGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
