//! Core domain entities.
//!
//! - [`UrlMapping`] - A short code and the URL it resolves to
//! - [`MAPPING_TTL`] - Fixed lifetime of every stored mapping

pub mod mapping;

pub use mapping::{MAPPING_TTL, UrlMapping, expires_at};
