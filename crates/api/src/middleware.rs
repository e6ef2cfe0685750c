/// Session extraction, password hashing and token generation
pub mod auth;
/// Mapping of domain errors to HTTP responses
pub mod error_handling;
