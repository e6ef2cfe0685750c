pub mod auth;
pub mod centres;
pub mod health;
pub mod profile;
pub mod schedule;
