pub mod auth;
pub mod patch;
pub mod profile;
pub mod stat;
pub mod upload;
