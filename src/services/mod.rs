pub mod auth_service;
pub use auth_service::{AuthError, AuthService, Claims, LoginResult, TokenIdentity, UserView};

pub mod auth_service_impl;
pub use auth_service_impl::JwtAuthService;

pub mod crew_service;
pub use crew_service::{AbilitiesView, CrewError, CrewMemberView, CrewService};

pub mod crew_service_impl;
pub use crew_service_impl::SeaOrmCrewService;

pub mod pirate_group_service;
pub use pirate_group_service::{GroupError, GroupMembers, PirateGroupService, PirateGroupView};

pub mod pirate_group_service_impl;
pub use pirate_group_service_impl::SeaOrmPirateGroupService;
