pub mod qr;

pub use qr::{PngQrRenderer, QrRenderer};
