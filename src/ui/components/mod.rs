//! Reusable UI components.

mod tag_drop;
mod value_list;

pub use tag_drop::{
    SearchDispatch, TagDrop, TagDropAction, TagDropConfig, TagDropItem, TagDropLabels,
};
pub use value_list::ValueList;
