pub mod auth;
pub mod content;
pub mod patch;
pub mod profile;
pub mod shared;
pub mod stat;
pub mod upload;
