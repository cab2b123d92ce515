use crate::db::{Bin, Item};
use serde::{Deserialize, Serialize};

/// Body of `POST /add_bin` and `POST /edit_bin/{id}`.
/// Absent fields decode as empty so the store reports them as validation errors.
#[derive(Debug, Clone, Deserialize)]
pub struct BinForm {
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub location: String,
}

/// Body of `POST /add_item/{bin_id}` and `POST /edit_item/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
}

/// Response of `GET /bins/{id}` and `GET /bin/{number}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinDetails {
    pub bin: Bin,
    pub items: Vec<Item>,
}
