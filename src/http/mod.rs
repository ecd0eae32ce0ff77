pub mod auth;
pub mod health;
pub mod rankings;
pub mod routes;
pub mod tournaments;
pub mod users;
