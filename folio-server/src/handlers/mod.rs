pub mod admin;
pub mod auth;
pub mod health;
pub mod notices;
pub mod page;
pub mod uploads;
