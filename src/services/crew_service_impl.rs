//! `SeaORM` implementation of the `CrewService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::{CrewMemberPatch, NewCrewMember, Store};
use crate::services::crew_service::{CrewError, CrewMemberView, CrewService};

pub struct SeaOrmCrewService {
    store: Store,
}

impl SeaOrmCrewService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn ensure_group_exists(&self, group_id: i32) -> Result<(), CrewError> {
        let exists = self.store.get_pirate_group(group_id).await?.is_some();
        if exists {
            Ok(())
        } else {
            Err(CrewError::Validation(format!(
                "Pirate group {group_id} does not exist"
            )))
        }
    }
}

#[async_trait]
impl CrewService for SeaOrmCrewService {
    async fn list(&self, pirate_group_id: Option<i32>) -> Result<Vec<CrewMemberView>, CrewError> {
        let rows = self.store.list_crew_members(pirate_group_id).await?;
        Ok(rows.into_iter().map(CrewMemberView::from).collect())
    }

    async fn get(&self, id: i32) -> Result<CrewMemberView, CrewError> {
        self.store
            .get_crew_member(id)
            .await?
            .map(CrewMemberView::from)
            .ok_or(CrewError::NotFound)
    }

    async fn create(&self, input: NewCrewMember) -> Result<CrewMemberView, CrewError> {
        let name = input
            .name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CrewError::Validation("Name is required".to_string()))?
            .to_string();
        let role = input
            .role
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CrewError::Validation("Role is required".to_string()))?
            .to_string();
        let bounty = input.bounty.clone().unwrap_or_else(|| "0".to_string());

        if let Some(group_id) = input.pirate_group_id {
            self.ensure_group_exists(group_id).await?;
        }

        let row = self
            .store
            .create_crew_member(&name, &role, &bounty, &input)
            .await?;
        info!("Created crew member '{}' (id {})", name, row.0.id);
        Ok(row.into())
    }

    async fn update(&self, id: i32, patch: CrewMemberPatch) -> Result<CrewMemberView, CrewError> {
        if let Some(Some(group_id)) = patch.pirate_group_id {
            self.ensure_group_exists(group_id).await?;
        }
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(CrewError::Validation("Name cannot be empty".to_string()));
            }
        }
        if let Some(role) = &patch.role {
            if role.trim().is_empty() {
                return Err(CrewError::Validation("Role cannot be empty".to_string()));
            }
        }

        self.store
            .update_crew_member(id, &patch)
            .await?
            .map(CrewMemberView::from)
            .ok_or(CrewError::NotFound)
    }

    async fn delete(&self, id: i32) -> Result<String, CrewError> {
        let (member, _) = self
            .store
            .get_crew_member(id)
            .await?
            .ok_or(CrewError::NotFound)?;

        let deleted = self.store.delete_crew_member(id).await?;
        if !deleted {
            return Err(CrewError::NotFound);
        }
        info!("Deleted crew member '{}' (id {})", member.name, id);
        Ok(member.name)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<CrewMemberView>, CrewError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(CrewError::Validation(
                "Search keyword cannot be empty".to_string(),
            ));
        }
        let rows = self.store.search_crew_members(keyword).await?;
        Ok(rows.into_iter().map(CrewMemberView::from).collect())
    }
}
