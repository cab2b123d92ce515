use crate::db::models::{Bin, Item, ItemSearchHit};
use crate::db::schema::{SQLITE_ADD_QR_COLUMN, SQLITE_INIT};
use crate::error::InventoryError;
use crate::service::qr::QrRenderer;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub type SqlitePool = Pool<Sqlite>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a pool for `database_url`, creating the database file if missing.
pub async fn connect(database_url: &str) -> Result<SqlitePool, InventoryError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    Ok(pool)
}

/// Bins and the items stored in them.
///
/// Every call checks a connection out of the pool for its own duration only.
/// Operations touching more than one row run inside a single transaction.
#[derive(Clone)]
pub struct InventoryStore {
    pool: SqlitePool,
    base_url: Url,
    qr: Arc<dyn QrRenderer>,
}

impl InventoryStore {
    pub fn new(pool: SqlitePool, base_url: Url, qr: Arc<dyn QrRenderer>) -> Self {
        Self { pool, base_url, qr }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    /// Databases created before QR support get the `qr_code` column added.
    pub async fn init_schema(&self) -> Result<(), InventoryError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }

        let columns: Vec<(String,)> = sqlx::query_as("SELECT name FROM pragma_table_info('bins')")
            .fetch_all(&self.pool)
            .await?;
        if !columns.iter().any(|(name,)| name == "qr_code") {
            info!("bins table has no qr_code column; upgrading schema");
            sqlx::query(SQLITE_ADD_QR_COLUMN).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Link encoded into a bin's label: `{base_url}/bin/{number}`.
    /// Fails for base URLs that cannot take path segments (`mailto:`, `data:`).
    pub fn bin_url(&self, number: &str) -> Result<Url, InventoryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                InventoryError::Validation(format!(
                    "base URL `{}` cannot carry a bin path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push("bin")
            .push(number);
        Ok(url)
    }

    fn render_qr(&self, number: &str) -> Result<String, InventoryError> {
        let png = self.qr.render_png(self.bin_url(number)?.as_str())?;
        Ok(STANDARD.encode(png))
    }

    pub async fn list_bins(&self) -> Result<Vec<Bin>, InventoryError> {
        let bins = sqlx::query_as::<_, Bin>(
            "SELECT id, number, location, qr_code FROM bins ORDER BY number ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(bins)
    }

    pub async fn get_bin(&self, id: i64) -> Result<Bin, InventoryError> {
        sqlx::query_as::<_, Bin>("SELECT id, number, location, qr_code FROM bins WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| InventoryError::bin_not_found(id))
    }

    /// Exact match on the label; the oldest bin wins when labels repeat.
    pub async fn find_bin_by_number(&self, number: &str) -> Result<Option<Bin>, InventoryError> {
        let bin = sqlx::query_as::<_, Bin>(
            "SELECT id, number, location, qr_code FROM bins WHERE number = ? ORDER BY id LIMIT 1",
        )
        .bind(number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(bin)
    }

    pub async fn list_items_for_bin(&self, bin_id: i64) -> Result<Vec<Item>, InventoryError> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, name, description, bin_id FROM items WHERE bin_id = ? ORDER BY id",
        )
        .bind(bin_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn get_item(&self, id: i64) -> Result<Item, InventoryError> {
        sqlx::query_as::<_, Item>(
            "SELECT id, name, description, bin_id FROM items WHERE id = ? AND bin_id IS NOT NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| InventoryError::item_not_found(id))
    }

    /// Insert a bin together with its rendered QR label. Returns the new id.
    pub async fn create_bin(&self, number: &str, location: &str) -> Result<i64, InventoryError> {
        InventoryError::require("number", number)?;
        InventoryError::require("location", location)?;
        let qr_code = self.render_qr(number)?;

        let id = sqlx::query("INSERT INTO bins (number, location, qr_code) VALUES (?, ?, ?)")
            .bind(number)
            .bind(location)
            .bind(qr_code)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        info!(bin_id = id, number, "bin created");
        Ok(id)
    }

    /// Update a bin's fields; the QR label is always re-rendered from the new number.
    pub async fn update_bin(
        &self,
        id: i64,
        number: &str,
        location: &str,
    ) -> Result<(), InventoryError> {
        InventoryError::require("number", number)?;
        InventoryError::require("location", location)?;
        let qr_code = self.render_qr(number)?;

        let res = sqlx::query("UPDATE bins SET number = ?, location = ?, qr_code = ? WHERE id = ?")
            .bind(number)
            .bind(location)
            .bind(qr_code)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(InventoryError::bin_not_found(id));
        }

        info!(bin_id = id, number, "bin updated");
        Ok(())
    }

    /// Delete a bin and every item in it, atomically.
    /// A missing bin is `NotFound` and leaves the database untouched.
    pub async fn delete_bin(&self, id: i64) -> Result<(), InventoryError> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM bins WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(InventoryError::bin_not_found(id));
        }

        let items = sqlx::query("DELETE FROM items WHERE bin_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM bins WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(bin_id = id, items_removed = items, "bin deleted");
        Ok(())
    }

    /// Insert an item into an existing bin. Returns the new id.
    pub async fn create_item(
        &self,
        bin_id: i64,
        name: &str,
        description: Option<&str>,
    ) -> Result<i64, InventoryError> {
        InventoryError::require("name", name)?;
        let description = normalize_description(description);

        let mut tx = self.pool.begin().await?;

        let bin: Option<(i64,)> = sqlx::query_as("SELECT id FROM bins WHERE id = ?")
            .bind(bin_id)
            .fetch_optional(&mut *tx)
            .await?;
        if bin.is_none() {
            return Err(InventoryError::bin_not_found(bin_id));
        }

        let id = sqlx::query("INSERT INTO items (name, description, bin_id) VALUES (?, ?, ?)")
            .bind(name)
            .bind(description)
            .bind(bin_id)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        tx.commit().await?;
        info!(item_id = id, bin_id, "item created");
        Ok(id)
    }

    /// Update an item's name and description. Returns the owning bin id.
    /// Rows without a bin (NULL `bin_id`, legacy data) count as missing here
    /// and in `get_item` / `delete_item`.
    pub async fn update_item(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
    ) -> Result<i64, InventoryError> {
        InventoryError::require("name", name)?;
        let description = normalize_description(description);

        let rec: Option<(i64,)> = sqlx::query_as(
            r#"UPDATE items SET name = ?, description = ?
               WHERE id = ? AND bin_id IS NOT NULL
               RETURNING bin_id"#,
        )
        .bind(name)
        .bind(description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        let (bin_id,) = rec.ok_or_else(|| InventoryError::item_not_found(id))?;

        info!(item_id = id, bin_id, "item updated");
        Ok(bin_id)
    }

    /// Delete an item. Returns the bin it was stored in.
    pub async fn delete_item(&self, id: i64) -> Result<i64, InventoryError> {
        let rec: Option<(i64,)> = sqlx::query_as(
            "DELETE FROM items WHERE id = ? AND bin_id IS NOT NULL RETURNING bin_id",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        let (bin_id,) = rec.ok_or_else(|| InventoryError::item_not_found(id))?;

        info!(item_id = id, bin_id, "item deleted");
        Ok(bin_id)
    }

    /// Bins whose number contains `needle` (ASCII case-insensitive).
    pub async fn search_bins(&self, needle: &str) -> Result<Vec<Bin>, InventoryError> {
        let bins = sqlx::query_as::<_, Bin>(
            r#"SELECT id, number, location, qr_code FROM bins
               WHERE number LIKE ? ESCAPE '\'
               ORDER BY number ASC, id ASC"#,
        )
        .bind(like_pattern(needle))
        .fetch_all(&self.pool)
        .await?;
        debug!(query = needle, hits = bins.len(), "bin search");
        Ok(bins)
    }

    /// Items whose name contains `needle`, with their bin's number and location.
    /// Items pointing at a missing bin are skipped.
    pub async fn search_items(&self, needle: &str) -> Result<Vec<ItemSearchHit>, InventoryError> {
        let hits = sqlx::query_as::<_, ItemSearchHit>(
            r#"SELECT items.name AS name, bins.number AS bin_number, bins.location AS bin_location
               FROM items
               JOIN bins ON items.bin_id = bins.id
               WHERE items.name LIKE ? ESCAPE '\'
               ORDER BY items.id"#,
        )
        .bind(like_pattern(needle))
        .fetch_all(&self.pool)
        .await?;
        debug!(query = needle, hits = hits.len(), "item search");
        Ok(hits)
    }

    /// Raw PNG bytes of a bin's stored label.
    pub async fn bin_qr_png(&self, id: i64) -> Result<Vec<u8>, InventoryError> {
        let bin = self.get_bin(id).await?;
        let encoded = bin.qr_code.ok_or_else(|| InventoryError::bin_not_found(id))?;
        Ok(STANDARD.decode(encoded)?)
    }

    /// Re-render every bin's label against the current base URL.
    pub async fn regenerate_qr_codes(&self) -> Result<usize, InventoryError> {
        let mut tx = self.pool.begin().await?;

        let bins: Vec<(i64, String)> = sqlx::query_as("SELECT id, number FROM bins ORDER BY id")
            .fetch_all(&mut *tx)
            .await?;
        for (id, number) in bins.iter() {
            let qr_code = self.render_qr(number)?;
            sqlx::query("UPDATE bins SET qr_code = ? WHERE id = ?")
                .bind(qr_code)
                .bind(*id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!(count = bins.len(), base_url = %self.base_url, "QR codes regenerated");
        Ok(bins.len())
    }
}

fn normalize_description(description: Option<&str>) -> Option<&str> {
    description.filter(|d| !d.trim().is_empty())
}

/// `%needle%` with LIKE wildcards in `needle` escaped by `\`.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
