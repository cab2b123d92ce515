//! Database module: models, schema and the inventory store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: `InventoryStore`, the only code that talks SQL

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Bin, Item, ItemSearchHit};
pub use schema::SQLITE_INIT;
pub use sqlite::{InventoryStore, SqlitePool, connect};
