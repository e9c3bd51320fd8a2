pub use super::crew_members::Entity as CrewMembers;
pub use super::pirate_groups::Entity as PirateGroups;
pub use super::users::Entity as Users;
