//! Item lifecycle core for the acetlisto service.
//!
//! # Overview
//! Holds the item records, mints their IDs, and answers the five CRUD and
//! listing operations. Nothing here knows about HTTP; the server crate maps
//! `StoreError` onto status codes.
//!
//! # Design
//! - `ItemStore` is a trait so the router can run over any implementation.
//! - `MemoryItemStore` is volatile and guards its map with one lock.
//! - Request DTOs never carry an ID; the store is the only ID authority.

pub mod error;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use store::{ItemStore, MemoryItemStore};
pub use types::{CreateItemRequest, Item, UpdateItemRequest};
