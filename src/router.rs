use crate::db::InventoryStore;
use crate::handlers::{bins, items, search};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone)]
pub struct InventoryState {
    pub store: InventoryStore,
    body_limit: usize,
}

impl InventoryState {
    pub fn new(store: InventoryStore) -> Self {
        Self {
            store,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }
}

pub fn inventory_router(state: InventoryState) -> Router {
    let body_limit = state.body_limit;
    Router::new()
        .route("/", get(bins::list_bins_handler))
        .route("/bin/{number}", get(bins::bin_by_number_handler))
        .route("/bins/{id}", get(bins::bin_details_handler))
        .route("/bins/{id}/qr.png", get(bins::bin_qr_handler))
        .route("/add_bin", post(bins::add_bin_handler))
        .route("/edit_bin/{id}", post(bins::edit_bin_handler))
        .route("/delete_bin/{id}", post(bins::delete_bin_handler))
        .route("/item/{id}", get(items::get_item_handler))
        .route("/add_item/{bin_id}", post(items::add_item_handler))
        .route("/edit_item/{id}", post(items::edit_item_handler))
        .route("/delete_item/{id}", post(items::delete_item_handler))
        .route("/search", post(search::search_bins_handler))
        .route("/search_item", post(search::search_items_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
