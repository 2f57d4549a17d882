pub mod athlete;
pub mod auth;
pub mod category;
pub mod common;
pub mod training_center;
