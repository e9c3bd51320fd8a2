pub mod prelude;

pub mod crew_members;
pub mod pirate_groups;
pub mod users;
