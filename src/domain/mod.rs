pub mod auth;
pub mod client;
pub mod ticket;
pub mod types;
