use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Bin {
    pub id: i64,
    pub number: String,
    pub location: String,
    /// Base64-encoded PNG of the bin's link.
    pub qr_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub bin_id: i64,
}

/// One row of an item search: the item joined with its owning bin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct ItemSearchHit {
    pub name: String,
    pub bin_number: String,
    pub bin_location: String,
}
