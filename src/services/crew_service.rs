//! Domain service for crew member management.

use serde::Serialize;
use thiserror::Error;

use crate::db::{CrewMemberPatch, CrewMemberRow, NewCrewMember};

/// Errors specific to crew member operations.
#[derive(Debug, Error)]
pub enum CrewError {
    #[error("Crew member not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for CrewError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Special abilities block nested inside a crew member response.
#[derive(Debug, Clone, Serialize)]
pub struct AbilitiesView {
    pub devil_fruit: Option<String>,
    pub haki_types: Option<String>,
    pub special_skills: Option<String>,
    pub signature_moves: Option<String>,
}

/// Crew member DTO for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct CrewMemberView {
    pub id: i32,
    pub name: String,
    pub role: String,
    pub bounty: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub abilities: AbilitiesView,
    pub pirate_group_id: Option<i32>,
    pub pirate_group_name: Option<String>,
    pub created_at: String,
}

impl From<CrewMemberRow> for CrewMemberView {
    fn from((member, group): CrewMemberRow) -> Self {
        Self {
            id: member.id,
            name: member.name,
            role: member.role,
            bounty: member.bounty,
            image_url: member.image_url,
            description: member.description,
            abilities: AbilitiesView {
                devil_fruit: member.devil_fruit,
                haki_types: member.haki_types,
                special_skills: member.special_skills,
                signature_moves: member.signature_moves,
            },
            pirate_group_id: member.pirate_group_id,
            pirate_group_name: group.map(|g| g.name),
            created_at: member.created_at,
        }
    }
}

/// Domain service trait for crew member CRUD and search.
#[async_trait::async_trait]
pub trait CrewService: Send + Sync {
    /// Lists all crew members, optionally filtered by owning group.
    async fn list(&self, pirate_group_id: Option<i32>) -> Result<Vec<CrewMemberView>, CrewError>;

    /// Gets a single crew member.
    ///
    /// # Errors
    ///
    /// Returns [`CrewError::NotFound`] if the id does not exist.
    async fn get(&self, id: i32) -> Result<CrewMemberView, CrewError>;

    /// Creates a crew member.
    ///
    /// # Errors
    ///
    /// Returns [`CrewError::Validation`] when `name` or `role` is missing, or
    /// the referenced group does not exist.
    async fn create(&self, input: NewCrewMember) -> Result<CrewMemberView, CrewError>;

    /// Applies a partial update. Fields absent from the payload are left
    /// untouched; explicit nulls clear nullable fields.
    async fn update(&self, id: i32, patch: CrewMemberPatch) -> Result<CrewMemberView, CrewError>;

    /// Deletes a crew member, returning its name for the response message.
    async fn delete(&self, id: i32) -> Result<String, CrewError>;

    /// Case-insensitive substring search over name, role and devil fruit.
    ///
    /// # Errors
    ///
    /// Returns [`CrewError::Validation`] on an empty keyword.
    async fn search(&self, keyword: &str) -> Result<Vec<CrewMemberView>, CrewError>;
}
