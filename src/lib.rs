//! Essentia storefront backend: products, accounts and per-user carts over
//! actix-web and MongoDB.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod store;
pub mod upload;

mod app_state;
mod handlers;

pub use app_state::AppState;
pub use handlers::configure;
