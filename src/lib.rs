pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod testing;

pub use app::{app, AppOptions, AppState};
