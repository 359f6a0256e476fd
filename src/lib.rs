pub mod auth;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod handlers;
pub mod models;
pub mod validation;

pub use db::create_pool;
