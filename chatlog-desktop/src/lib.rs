pub mod api_client;
pub mod app;
pub mod components;
pub mod config;
pub mod services;
pub mod state;

pub use app::ViewerApp;
