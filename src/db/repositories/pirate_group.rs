use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use tracing::info;

use super::double_option;
use crate::entities::{crew_members, pirate_groups, prelude::*};

/// Creation payload. `name` and `captain` are validated as required by the
/// service before this reaches the repository.
#[derive(Debug, Default, Deserialize)]
pub struct NewPirateGroup {
    pub name: Option<String>,
    pub captain: Option<String>,
    pub ship_name: Option<String>,
    pub total_bounty: Option<String>,
    pub flag_description: Option<String>,
    pub origin: Option<String>,
    pub member_count: Option<i32>,
    pub description: Option<String>,
}

/// Partial patch: only keys present in the payload are applied. An explicit
/// `null` clears a nullable column.
#[derive(Debug, Default, Deserialize)]
pub struct PirateGroupPatch {
    pub name: Option<String>,
    pub captain: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub ship_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub total_bounty: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub flag_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub origin: Option<Option<String>>,
    pub member_count: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

pub struct PirateGroupRepository {
    conn: DatabaseConnection,
}

impl PirateGroupRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<pirate_groups::Model>> {
        let groups = PirateGroups::find()
            .order_by_asc(pirate_groups::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(groups)
    }

    pub async fn get(&self, id: i32) -> Result<Option<pirate_groups::Model>> {
        Ok(PirateGroups::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<pirate_groups::Model>> {
        let group = PirateGroups::find()
            .filter(pirate_groups::Column::Name.eq(name))
            .one(&self.conn)
            .await?;

        Ok(group)
    }

    /// Case-insensitive substring match on name, captain or origin.
    pub async fn search(&self, keyword: &str) -> Result<Vec<pirate_groups::Model>> {
        let groups = PirateGroups::find()
            .filter(
                Condition::any()
                    .add(pirate_groups::Column::Name.contains(keyword))
                    .add(pirate_groups::Column::Captain.contains(keyword))
                    .add(pirate_groups::Column::Origin.contains(keyword)),
            )
            .all(&self.conn)
            .await?;

        Ok(groups)
    }

    pub async fn create(
        &self,
        name: &str,
        captain: &str,
        input: &NewPirateGroup,
    ) -> Result<pirate_groups::Model> {
        let txn = self.conn.begin().await?;

        let now = chrono::Utc::now().to_rfc3339();
        let inserted = PirateGroups::insert(pirate_groups::ActiveModel {
            name: Set(name.to_string()),
            captain: Set(captain.to_string()),
            ship_name: Set(input.ship_name.clone()),
            total_bounty: Set(Some(
                input.total_bounty.clone().unwrap_or_else(|| "0".to_string()),
            )),
            flag_description: Set(input.flag_description.clone()),
            origin: Set(input.origin.clone()),
            member_count: Set(input.member_count.unwrap_or(0)),
            description: Set(input.description.clone()),
            created_at: Set(now),
            ..Default::default()
        })
        .exec(&txn)
        .await?;

        let group = PirateGroups::find_by_id(inserted.last_insert_id)
            .one(&txn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created pirate group"))?;

        txn.commit().await?;
        info!("Created pirate group: {}", group.name);
        Ok(group)
    }

    /// Applies a partial patch. Returns `None` when the group does not exist.
    pub async fn update(
        &self,
        id: i32,
        patch: &PirateGroupPatch,
    ) -> Result<Option<pirate_groups::Model>> {
        let txn = self.conn.begin().await?;

        let Some(group) = PirateGroups::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: pirate_groups::ActiveModel = group.clone().into();
        if let Some(name) = &patch.name {
            active.name = Set(name.clone());
        }
        if let Some(captain) = &patch.captain {
            active.captain = Set(captain.clone());
        }
        if let Some(ship_name) = &patch.ship_name {
            active.ship_name = Set(ship_name.clone());
        }
        if let Some(total_bounty) = &patch.total_bounty {
            active.total_bounty = Set(total_bounty.clone());
        }
        if let Some(flag_description) = &patch.flag_description {
            active.flag_description = Set(flag_description.clone());
        }
        if let Some(origin) = &patch.origin {
            active.origin = Set(origin.clone());
        }
        if let Some(member_count) = patch.member_count {
            active.member_count = Set(member_count);
        }
        if let Some(description) = &patch.description {
            active.description = Set(description.clone());
        }

        // An empty patch is a no-op rather than a zero-column UPDATE.
        let updated = if active.is_changed() {
            active.update(&txn).await?
        } else {
            group
        };
        txn.commit().await?;

        info!("Updated pirate group: {}", updated.name);
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;
        let result = PirateGroups::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_members(&self, id: i32) -> Result<u64> {
        let count = CrewMembers::find()
            .filter(crew_members::Column::PirateGroupId.eq(id))
            .count(&self.conn)
            .await?;

        Ok(count)
    }

    pub async fn members(&self, id: i32) -> Result<Vec<crew_members::Model>> {
        let members = CrewMembers::find()
            .filter(crew_members::Column::PirateGroupId.eq(id))
            .order_by_asc(crew_members::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(members)
    }
}
