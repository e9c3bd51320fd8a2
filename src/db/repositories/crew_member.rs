use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use tracing::info;

use super::double_option;
use crate::entities::{crew_members, pirate_groups, prelude::*};

/// A crew member together with its owning group, when affiliated.
pub type CrewMemberRow = (crew_members::Model, Option<pirate_groups::Model>);

/// Creation payload. `name` and `role` are validated as required by the
/// service before this reaches the repository.
#[derive(Debug, Default, Deserialize)]
pub struct NewCrewMember {
    pub name: Option<String>,
    pub role: Option<String>,
    pub bounty: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub devil_fruit: Option<String>,
    pub haki_types: Option<String>,
    pub special_skills: Option<String>,
    pub signature_moves: Option<String>,
    pub pirate_group_id: Option<i32>,
}

/// Partial patch: only keys present in the payload are applied. An explicit
/// `null` clears a nullable column (detaching the member when applied to
/// `pirate_group_id`).
#[derive(Debug, Default, Deserialize)]
pub struct CrewMemberPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub bounty: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub devil_fruit: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub haki_types: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub special_skills: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub signature_moves: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub pirate_group_id: Option<Option<i32>>,
}

pub struct CrewMemberRepository {
    conn: DatabaseConnection,
}

impl CrewMemberRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, pirate_group_id: Option<i32>) -> Result<Vec<CrewMemberRow>> {
        let mut query = CrewMembers::find().find_also_related(PirateGroups);
        if let Some(group_id) = pirate_group_id {
            query = query.filter(crew_members::Column::PirateGroupId.eq(group_id));
        }

        let rows = query
            .order_by_asc(crew_members::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<CrewMemberRow>> {
        let row = CrewMembers::find_by_id(id)
            .find_also_related(PirateGroups)
            .one(&self.conn)
            .await?;

        Ok(row)
    }

    /// Case-insensitive substring match on name, role or devil fruit.
    pub async fn search(&self, keyword: &str) -> Result<Vec<CrewMemberRow>> {
        let rows = CrewMembers::find()
            .find_also_related(PirateGroups)
            .filter(
                Condition::any()
                    .add(crew_members::Column::Name.contains(keyword))
                    .add(crew_members::Column::Role.contains(keyword))
                    .add(crew_members::Column::DevilFruit.contains(keyword)),
            )
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn create(
        &self,
        name: &str,
        role: &str,
        bounty: &str,
        input: &NewCrewMember,
    ) -> Result<CrewMemberRow> {
        let txn = self.conn.begin().await?;

        let now = chrono::Utc::now().to_rfc3339();
        let inserted = CrewMembers::insert(crew_members::ActiveModel {
            name: Set(name.to_string()),
            role: Set(role.to_string()),
            bounty: Set(bounty.to_string()),
            image_url: Set(input.image_url.clone()),
            description: Set(input.description.clone()),
            devil_fruit: Set(input.devil_fruit.clone()),
            haki_types: Set(input.haki_types.clone()),
            special_skills: Set(input.special_skills.clone()),
            signature_moves: Set(input.signature_moves.clone()),
            pirate_group_id: Set(input.pirate_group_id),
            created_at: Set(now),
            ..Default::default()
        })
        .exec(&txn)
        .await?;

        let member = CrewMembers::find_by_id(inserted.last_insert_id)
            .find_also_related(PirateGroups)
            .one(&txn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created crew member"))?;

        txn.commit().await?;
        info!("Created crew member: {}", member.0.name);
        Ok(member)
    }

    /// Applies a partial patch. Returns `None` when the member does not exist.
    pub async fn update(&self, id: i32, patch: &CrewMemberPatch) -> Result<Option<CrewMemberRow>> {
        let txn = self.conn.begin().await?;

        let Some(member) = CrewMembers::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: crew_members::ActiveModel = member.clone().into();
        if let Some(name) = &patch.name {
            active.name = Set(name.clone());
        }
        if let Some(role) = &patch.role {
            active.role = Set(role.clone());
        }
        if let Some(bounty) = &patch.bounty {
            active.bounty = Set(bounty.clone());
        }
        if let Some(image_url) = &patch.image_url {
            active.image_url = Set(image_url.clone());
        }
        if let Some(description) = &patch.description {
            active.description = Set(description.clone());
        }
        if let Some(devil_fruit) = &patch.devil_fruit {
            active.devil_fruit = Set(devil_fruit.clone());
        }
        if let Some(haki_types) = &patch.haki_types {
            active.haki_types = Set(haki_types.clone());
        }
        if let Some(special_skills) = &patch.special_skills {
            active.special_skills = Set(special_skills.clone());
        }
        if let Some(signature_moves) = &patch.signature_moves {
            active.signature_moves = Set(signature_moves.clone());
        }
        if let Some(pirate_group_id) = patch.pirate_group_id {
            active.pirate_group_id = Set(pirate_group_id);
        }

        // An empty patch is a no-op rather than a zero-column UPDATE.
        let updated = if active.is_changed() {
            active.update(&txn).await?
        } else {
            member
        };
        txn.commit().await?;

        info!("Updated crew member: {}", updated.name);
        self.get(updated.id).await
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;
        let result = CrewMembers::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
