use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{crew_members, pirate_groups};

pub mod migrator;
pub mod repositories;

pub use repositories::crew_member::{CrewMemberPatch, CrewMemberRow, NewCrewMember};
pub use repositories::pirate_group::{NewPirateGroup, PirateGroupPatch};
pub use repositories::user::User;

/// Connection-pool handle for the relational store. Cheap to clone; injected
/// into each service at construction.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn group_repo(&self) -> repositories::pirate_group::PirateGroupRepository {
        repositories::pirate_group::PirateGroupRepository::new(self.conn.clone())
    }

    fn crew_repo(&self) -> repositories::crew_member::CrewMemberRepository {
        repositories::crew_member::CrewMemberRepository::new(self.conn.clone())
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_with_password(&self, username: &str) -> Result<Option<(User, String)>> {
        self.user_repo()
            .get_by_username_with_password(username)
            .await
    }

    // ------------------------------------------------------------------
    // Pirate groups
    // ------------------------------------------------------------------

    pub async fn list_pirate_groups(&self) -> Result<Vec<pirate_groups::Model>> {
        self.group_repo().list().await
    }

    pub async fn get_pirate_group(&self, id: i32) -> Result<Option<pirate_groups::Model>> {
        self.group_repo().get(id).await
    }

    pub async fn find_pirate_group_by_name(
        &self,
        name: &str,
    ) -> Result<Option<pirate_groups::Model>> {
        self.group_repo().find_by_name(name).await
    }

    pub async fn search_pirate_groups(&self, keyword: &str) -> Result<Vec<pirate_groups::Model>> {
        self.group_repo().search(keyword).await
    }

    pub async fn create_pirate_group(
        &self,
        name: &str,
        captain: &str,
        input: &NewPirateGroup,
    ) -> Result<pirate_groups::Model> {
        self.group_repo().create(name, captain, input).await
    }

    pub async fn update_pirate_group(
        &self,
        id: i32,
        patch: &PirateGroupPatch,
    ) -> Result<Option<pirate_groups::Model>> {
        self.group_repo().update(id, patch).await
    }

    pub async fn delete_pirate_group(&self, id: i32) -> Result<bool> {
        self.group_repo().delete(id).await
    }

    pub async fn count_group_members(&self, id: i32) -> Result<u64> {
        self.group_repo().count_members(id).await
    }

    pub async fn group_members(&self, id: i32) -> Result<Vec<crew_members::Model>> {
        self.group_repo().members(id).await
    }

    // ------------------------------------------------------------------
    // Crew members
    // ------------------------------------------------------------------

    pub async fn list_crew_members(
        &self,
        pirate_group_id: Option<i32>,
    ) -> Result<Vec<CrewMemberRow>> {
        self.crew_repo().list(pirate_group_id).await
    }

    pub async fn get_crew_member(&self, id: i32) -> Result<Option<CrewMemberRow>> {
        self.crew_repo().get(id).await
    }

    pub async fn search_crew_members(&self, keyword: &str) -> Result<Vec<CrewMemberRow>> {
        self.crew_repo().search(keyword).await
    }

    pub async fn create_crew_member(
        &self,
        name: &str,
        role: &str,
        bounty: &str,
        input: &NewCrewMember,
    ) -> Result<CrewMemberRow> {
        self.crew_repo().create(name, role, bounty, input).await
    }

    pub async fn update_crew_member(
        &self,
        id: i32,
        patch: &CrewMemberPatch,
    ) -> Result<Option<CrewMemberRow>> {
        self.crew_repo().update(id, patch).await
    }

    pub async fn delete_crew_member(&self, id: i32) -> Result<bool> {
        self.crew_repo().delete(id).await
    }
}
