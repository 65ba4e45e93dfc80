//! folio library
//!
//! Loads the JSON content of a portfolio site through an in-memory cache, with
//! built-in fallback content whenever a document cannot be fetched.

pub mod app;
pub mod cache;
pub mod cli;
pub mod content;
pub mod report;
pub mod telemetry;
pub mod theme;
