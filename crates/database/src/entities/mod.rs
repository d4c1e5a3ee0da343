pub mod feedbacks;
pub mod reservations;
pub mod restaurants;
pub mod users;
