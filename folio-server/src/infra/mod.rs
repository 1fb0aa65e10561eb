pub mod app_state;
pub mod config;
pub mod errors;
pub mod middleware;
pub mod session;
