// HTTP API: routers and handlers

pub mod admin;
pub mod ai;
pub mod auth;
pub mod blog;
pub mod dashboard;
pub mod extract;
pub mod health;
pub mod registration;
pub mod routes;

pub use routes::create_routes;
