//! SQL DDL for initializing the inventory storage.

/// SQLite schema with:
/// - `bins.id` / `items.id` INTEGER PRIMARY KEY AUTOINCREMENT (ids never reused)
/// - `bins.number` deliberately not UNIQUE
/// - `bins.qr_code` base64 PNG, nullable for rows written before QR support
/// - `items.bin_id` references `bins(id)`; cascade is done by the store, not the schema
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS bins (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    number TEXT NOT NULL,
    location TEXT NOT NULL,
    qr_code TEXT NULL
);

CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NULL,
    bin_id INTEGER,
    FOREIGN KEY (bin_id) REFERENCES bins (id)
);

CREATE INDEX IF NOT EXISTS idx_items_bin_id ON items(bin_id);
"#;

/// Adds the QR column to a `bins` table created without it.
pub const SQLITE_ADD_QR_COLUMN: &str = "ALTER TABLE bins ADD COLUMN qr_code TEXT NULL";
