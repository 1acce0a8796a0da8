//! Persistence module split across logical submodules.

mod connection;
mod items;

pub use connection::Store;
pub use items::{delete_items_with_prefix, fetch_item_records, insert_item};
