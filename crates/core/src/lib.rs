//! # Portal Core
//!
//! Domain types and the pure logic of the centre portal: schedule filtering,
//! row grouping and rendering, the profile gate, and CSV upload parsing.
//! Nothing in this crate performs I/O.

pub mod errors;
pub mod filter;
pub mod gate;
pub mod models;
pub mod render;
pub mod upload;
pub mod view;
