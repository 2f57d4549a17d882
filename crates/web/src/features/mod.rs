pub mod athletes;
pub mod auth;
pub mod categories;
pub mod training_centers;
