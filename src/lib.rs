pub mod app;
pub mod config;
pub mod models;
pub mod services;

pub use app::AppContext;
