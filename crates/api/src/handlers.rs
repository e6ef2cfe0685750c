pub mod auth;
pub mod centres;
pub mod page;
pub mod profile;
pub mod progress;
pub mod schedule;
pub mod upload;
