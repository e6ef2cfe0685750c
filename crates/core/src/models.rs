pub mod access;
pub mod auth;
pub mod centre;
pub mod progress;
pub mod schedule;
