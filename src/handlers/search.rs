use crate::db::{Bin, ItemSearchHit};
use crate::types::forms::SearchForm;
use crate::{InventoryError, router::InventoryState};
use axum::{Form, Json, extract::State};

pub async fn search_bins_handler(
    State(state): State<InventoryState>,
    Form(form): Form<SearchForm>,
) -> Result<Json<Vec<Bin>>, InventoryError> {
    Ok(Json(state.store.search_bins(&form.query).await?))
}

pub async fn search_items_handler(
    State(state): State<InventoryState>,
    Form(form): Form<SearchForm>,
) -> Result<Json<Vec<ItemSearchHit>>, InventoryError> {
    Ok(Json(state.store.search_items(&form.query).await?))
}
