use crate::db::Item;
use crate::types::forms::ItemForm;
use crate::{InventoryError, router::InventoryState};
use axum::{
    Form, Json,
    extract::{Path, State},
    response::Redirect,
};

fn bin_view(bin_id: i64) -> Redirect {
    Redirect::to(&format!("/bins/{bin_id}"))
}

pub async fn get_item_handler(
    State(state): State<InventoryState>,
    Path(id): Path<i64>,
) -> Result<Json<Item>, InventoryError> {
    Ok(Json(state.store.get_item(id).await?))
}

/// POST /add_item/{bin_id} -> back to the bin.
pub async fn add_item_handler(
    State(state): State<InventoryState>,
    Path(bin_id): Path<i64>,
    Form(form): Form<ItemForm>,
) -> Result<Redirect, InventoryError> {
    state
        .store
        .create_item(bin_id, &form.name, form.description.as_deref())
        .await?;
    Ok(bin_view(bin_id))
}

/// POST /edit_item/{id} -> back to the bin the item lives in.
pub async fn edit_item_handler(
    State(state): State<InventoryState>,
    Path(id): Path<i64>,
    Form(form): Form<ItemForm>,
) -> Result<Redirect, InventoryError> {
    let bin_id = state
        .store
        .update_item(id, &form.name, form.description.as_deref())
        .await?;
    Ok(bin_view(bin_id))
}

/// POST /delete_item/{id} -> back to the bin the item lived in.
pub async fn delete_item_handler(
    State(state): State<InventoryState>,
    Path(id): Path<i64>,
) -> Result<Redirect, InventoryError> {
    let bin_id = state.store.delete_item(id).await?;
    Ok(bin_view(bin_id))
}
