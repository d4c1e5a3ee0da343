pub mod actor;
pub mod error;
pub mod feedback;
pub mod policy;
pub mod reservation;
pub mod restaurant;
pub mod role;
pub mod user;

pub use actor::{Actor, Owned};
pub use error::PolicyError;
pub use role::Role;
