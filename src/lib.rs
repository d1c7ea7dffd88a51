pub mod api;
pub mod auth;
pub mod config;
pub mod docs;
pub mod store;
pub mod utils;
