pub mod feedback;
pub mod reservation;
pub mod restaurant;
pub mod user;
