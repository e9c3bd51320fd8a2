//! `SeaORM` implementation of the `PirateGroupService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::{NewPirateGroup, PirateGroupPatch, Store};
use crate::services::crew_service::CrewMemberView;
use crate::services::pirate_group_service::{
    GroupError, GroupMembers, PirateGroupService, PirateGroupView,
};

pub struct SeaOrmPirateGroupService {
    store: Store,
}

impl SeaOrmPirateGroupService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PirateGroupService for SeaOrmPirateGroupService {
    async fn list(&self) -> Result<Vec<PirateGroupView>, GroupError> {
        let groups = self.store.list_pirate_groups().await?;
        Ok(groups.into_iter().map(PirateGroupView::from).collect())
    }

    async fn get(&self, id: i32, include_members: bool) -> Result<PirateGroupView, GroupError> {
        let group = self
            .store
            .get_pirate_group(id)
            .await?
            .ok_or(GroupError::NotFound)?;

        if include_members {
            let members = self.store.group_members(id).await?;
            Ok(PirateGroupView::with_members(group, members))
        } else {
            Ok(group.into())
        }
    }

    async fn create(&self, input: NewPirateGroup) -> Result<PirateGroupView, GroupError> {
        let name = input
            .name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| GroupError::Validation("Name is required".to_string()))?
            .to_string();
        let captain = input
            .captain
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| GroupError::Validation("Captain is required".to_string()))?
            .to_string();

        if self.store.find_pirate_group_by_name(&name).await?.is_some() {
            return Err(GroupError::Conflict(format!(
                "Pirate group '{name}' already exists"
            )));
        }

        let group = self.store.create_pirate_group(&name, &captain, &input).await?;
        info!("Created pirate group '{}' (id {})", name, group.id);
        Ok(group.into())
    }

    async fn update(
        &self,
        id: i32,
        patch: PirateGroupPatch,
    ) -> Result<PirateGroupView, GroupError> {
        if let Some(name) = &patch.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(GroupError::Validation("Name cannot be empty".to_string()));
            }
            if let Some(existing) = self.store.find_pirate_group_by_name(name).await? {
                if existing.id != id {
                    return Err(GroupError::Conflict(format!(
                        "Pirate group '{name}' already exists"
                    )));
                }
            }
        }
        if let Some(captain) = &patch.captain {
            if captain.trim().is_empty() {
                return Err(GroupError::Validation(
                    "Captain cannot be empty".to_string(),
                ));
            }
        }

        self.store
            .update_pirate_group(id, &patch)
            .await?
            .map(PirateGroupView::from)
            .ok_or(GroupError::NotFound)
    }

    async fn delete(&self, id: i32) -> Result<String, GroupError> {
        let group = self
            .store
            .get_pirate_group(id)
            .await?
            .ok_or(GroupError::NotFound)?;

        // Count actual rows rather than trusting the denormalized counter.
        let member_count = self.store.count_group_members(id).await?;
        if member_count > 0 {
            return Err(GroupError::Conflict(format!(
                "Cannot delete '{}': it still has {member_count} crew members",
                group.name
            )));
        }

        let deleted = self.store.delete_pirate_group(id).await?;
        if !deleted {
            return Err(GroupError::NotFound);
        }
        info!("Deleted pirate group '{}' (id {})", group.name, id);
        Ok(group.name)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<PirateGroupView>, GroupError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(GroupError::Validation(
                "Search keyword cannot be empty".to_string(),
            ));
        }
        let groups = self.store.search_pirate_groups(keyword).await?;
        Ok(groups.into_iter().map(PirateGroupView::from).collect())
    }

    async fn members(&self, id: i32) -> Result<GroupMembers, GroupError> {
        let group = self
            .store
            .get_pirate_group(id)
            .await?
            .ok_or(GroupError::NotFound)?;
        let group_name = group.name;

        let members = self
            .store
            .group_members(id)
            .await?
            .into_iter()
            .map(|m| {
                let mut view = CrewMemberView::from((m, None));
                view.pirate_group_name = Some(group_name.clone());
                view
            })
            .collect();

        Ok(GroupMembers {
            group_name,
            members,
        })
    }
}
