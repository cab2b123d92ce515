#![allow(dead_code)]

use bin_inventory::db::{self, InventoryStore};
use bin_inventory::service::QrRenderer;
use bin_inventory::{InventoryError, service::PngQrRenderer};
use std::{
    path::PathBuf,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use url::Url;

/// Writes the encoded link itself instead of an image, so tests can read it back.
pub struct EchoRenderer;

impl QrRenderer for EchoRenderer {
    fn render_png(&self, data: &str) -> Result<Vec<u8>, InventoryError> {
        Ok(data.as_bytes().to_vec())
    }
}

/// A store over a fresh SQLite file; the file is removed on drop.
pub struct TestDb {
    pub store: InventoryStore,
    path: PathBuf,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

pub fn temp_db_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "bin-inventory-{}-{}-{}.sqlite",
        tag,
        std::process::id(),
        nanos
    ));
    temp_path
}

pub async fn open_store(
    path: &PathBuf,
    base_url: &str,
    renderer: Arc<dyn QrRenderer>,
) -> InventoryStore {
    let database_url = format!("sqlite:{}", path.display());
    let pool = db::connect(&database_url)
        .await
        .expect("failed to open test database");
    let store = InventoryStore::new(
        pool,
        Url::parse(base_url).expect("invalid base url"),
        renderer,
    );
    store.init_schema().await.expect("schema init failed");
    store
}

pub async fn echo_db(tag: &str) -> TestDb {
    let path = temp_db_path(tag);
    let store = open_store(&path, "http://localhost:8000", Arc::new(EchoRenderer)).await;
    TestDb { store, path }
}

pub async fn png_db(tag: &str) -> TestDb {
    let path = temp_db_path(tag);
    let store = open_store(
        &path,
        "http://localhost:8000",
        Arc::new(PngQrRenderer::new(100)),
    )
    .await;
    TestDb { store, path }
}

/// Decode a stored payload written by `EchoRenderer` back into its link.
pub fn echoed_link(qr_code: &str) -> String {
    use base64::Engine;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(qr_code)
        .expect("qr payload should be base64");
    String::from_utf8(bytes).expect("echo payload should be utf-8")
}
