pub mod handlers;
pub mod routes;
pub mod security;
pub mod services;
