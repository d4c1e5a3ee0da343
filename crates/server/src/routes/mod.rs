pub mod auth;
pub mod feedback;
pub mod health;
pub mod reservation;
pub mod restaurant;
pub mod root;
