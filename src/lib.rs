pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod news;
pub mod preferences;
pub mod state;
pub mod users;
pub mod validation;
