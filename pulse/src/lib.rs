pub mod config;
pub mod health;
pub mod router;
pub mod server;
