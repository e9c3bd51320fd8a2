//! Domain service for pirate group management.

use serde::Serialize;
use thiserror::Error;

use crate::db::{NewPirateGroup, PirateGroupPatch};
use crate::entities::{crew_members, pirate_groups};
use crate::services::crew_service::{AbilitiesView, CrewMemberView};

/// Errors specific to pirate group operations.
#[derive(Debug, Error)]
pub enum GroupError {
    #[error("Pirate group not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for GroupError {
    fn from(err: anyhow::Error) -> Self {
        // A unique-constraint trip after the name pre-check means a concurrent
        // insert won the race; report it as the same conflict.
        if let Some(db_err) = err.downcast_ref::<sea_orm::DbErr>() {
            if matches!(
                db_err.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ) {
                return Self::Conflict("Pirate group name already exists".to_string());
            }
        }
        Self::Database(err.to_string())
    }
}

/// Pirate group DTO for API responses. `members` is embedded only when the
/// caller asks for it.
#[derive(Debug, Clone, Serialize)]
pub struct PirateGroupView {
    pub id: i32,
    pub name: String,
    pub captain: String,
    pub ship_name: Option<String>,
    pub total_bounty: Option<String>,
    pub flag_description: Option<String>,
    pub origin: Option<String>,
    pub member_count: i32,
    pub description: Option<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<CrewMemberView>>,
}

impl From<pirate_groups::Model> for PirateGroupView {
    fn from(model: pirate_groups::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            captain: model.captain,
            ship_name: model.ship_name,
            total_bounty: model.total_bounty,
            flag_description: model.flag_description,
            origin: model.origin,
            member_count: model.member_count,
            description: model.description,
            created_at: model.created_at,
            members: None,
        }
    }
}

impl PirateGroupView {
    /// Builds a view with the member list embedded. Members of a known group
    /// carry the group name without another join.
    #[must_use]
    pub fn with_members(model: pirate_groups::Model, members: Vec<crew_members::Model>) -> Self {
        let group_name = model.name.clone();
        let mut view = Self::from(model);
        view.members = Some(
            members
                .into_iter()
                .map(|m| CrewMemberView {
                    id: m.id,
                    name: m.name,
                    role: m.role,
                    bounty: m.bounty,
                    image_url: m.image_url,
                    description: m.description,
                    abilities: AbilitiesView {
                        devil_fruit: m.devil_fruit,
                        haki_types: m.haki_types,
                        special_skills: m.special_skills,
                        signature_moves: m.signature_moves,
                    },
                    pirate_group_id: m.pirate_group_id,
                    pirate_group_name: Some(group_name.clone()),
                    created_at: m.created_at,
                })
                .collect(),
        );
        view
    }
}

/// Member listing for a single group, with the group name for the message.
#[derive(Debug, Clone)]
pub struct GroupMembers {
    pub group_name: String,
    pub members: Vec<CrewMemberView>,
}

/// Domain service trait for pirate group CRUD and search.
#[async_trait::async_trait]
pub trait PirateGroupService: Send + Sync {
    /// Lists all groups in insertion order.
    async fn list(&self) -> Result<Vec<PirateGroupView>, GroupError>;

    /// Gets a single group, optionally with its member list embedded.
    async fn get(&self, id: i32, include_members: bool) -> Result<PirateGroupView, GroupError>;

    /// Creates a group.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::Validation`] when `name` or `captain` is missing
    /// and [`GroupError::Conflict`] on a duplicate name.
    async fn create(&self, input: NewPirateGroup) -> Result<PirateGroupView, GroupError>;

    /// Applies a partial update; renaming onto an existing group's name is a
    /// [`GroupError::Conflict`].
    async fn update(&self, id: i32, patch: PirateGroupPatch)
    -> Result<PirateGroupView, GroupError>;

    /// Deletes a group, returning its name for the response message.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::Conflict`] while the group still has members.
    async fn delete(&self, id: i32) -> Result<String, GroupError>;

    /// Case-insensitive substring search over name, captain and origin.
    async fn search(&self, keyword: &str) -> Result<Vec<PirateGroupView>, GroupError>;

    /// Lists the members of one group.
    async fn members(&self, id: i32) -> Result<GroupMembers, GroupError>;
}
