//! Forum API client and types.
//!
//! This module provides the interface for communicating with the REST
//! API of a Discourse-style forum.

mod client;
mod types;

pub mod error;

pub use client::ForumClient;
pub use error::ApiError;
pub use types::{Category, Site, TagSearchResponse, TagSearchResult};
