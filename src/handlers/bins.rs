use crate::db::Bin;
use crate::types::forms::{BinDetails, BinForm};
use crate::{InventoryError, router::InventoryState};
use axum::{
    Form, Json,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Redirect},
};

/// GET / -> every bin, ordered by number.
pub async fn list_bins_handler(
    State(state): State<InventoryState>,
) -> Result<Json<Vec<Bin>>, InventoryError> {
    Ok(Json(state.store.list_bins().await?))
}

/// GET /bins/{id} -> a bin and its items.
pub async fn bin_details_handler(
    State(state): State<InventoryState>,
    Path(id): Path<i64>,
) -> Result<Json<BinDetails>, InventoryError> {
    let bin = state.store.get_bin(id).await?;
    let items = state.store.list_items_for_bin(bin.id).await?;
    Ok(Json(BinDetails { bin, items }))
}

/// GET /bin/{number} -> the bin a scanned label points at, matched on number only.
pub async fn bin_by_number_handler(
    State(state): State<InventoryState>,
    Path(number): Path<String>,
) -> Result<Json<BinDetails>, InventoryError> {
    let bin = state
        .store
        .find_bin_by_number(&number)
        .await?
        .ok_or_else(|| InventoryError::not_found("bin", &number))?;
    let items = state.store.list_items_for_bin(bin.id).await?;
    Ok(Json(BinDetails { bin, items }))
}

/// GET /bins/{id}/qr.png -> the stored label image.
pub async fn bin_qr_handler(
    State(state): State<InventoryState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, InventoryError> {
    let png = state.store.bin_qr_png(id).await?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

/// POST /add_bin -> back to the bin list.
pub async fn add_bin_handler(
    State(state): State<InventoryState>,
    Form(form): Form<BinForm>,
) -> Result<Redirect, InventoryError> {
    state.store.create_bin(&form.number, &form.location).await?;
    Ok(Redirect::to("/"))
}

/// POST /edit_bin/{id} -> back to the bin list.
pub async fn edit_bin_handler(
    State(state): State<InventoryState>,
    Path(id): Path<i64>,
    Form(form): Form<BinForm>,
) -> Result<Redirect, InventoryError> {
    state
        .store
        .update_bin(id, &form.number, &form.location)
        .await?;
    Ok(Redirect::to("/"))
}

/// POST /delete_bin/{id} -> back to the bin list.
pub async fn delete_bin_handler(
    State(state): State<InventoryState>,
    Path(id): Path<i64>,
) -> Result<Redirect, InventoryError> {
    state.store.delete_bin(id).await?;
    Ok(Redirect::to("/"))
}
