//! User interface components.
//!
//! This module contains all TUI rendering logic and the reusable
//! widgets the application is built from.

mod components;
pub mod theme;

pub use components::{
    SearchDispatch, TagDrop, TagDropAction, TagDropConfig, TagDropItem, TagDropLabels, ValueList,
};
