//! Favicon loading for the window icon.
//!
//! Icons come either inline as `data:` URLs or from the network. Network
//! fetches run on a small tokio runtime so the event loop never waits on them;
//! the result is handed to a callback that typically posts it back to the loop.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::types::errors::FaviconError;

/// Edge length of the decoded window icon.
pub const ICON_SIZE: u32 = 32;

/// Decoded RGBA icon pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaviconImage {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Extracts the bytes of a base64 `data:` URL.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, FaviconError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| FaviconError::Unsupported(url.to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| FaviconError::Decode("data URL without payload".to_string()))?;
    if !meta.split(';').any(|part| part.eq_ignore_ascii_case("base64")) {
        return Err(FaviconError::Unsupported(format!(
            "non-base64 data URL ({})",
            meta
        )));
    }
    BASE64
        .decode(payload.trim())
        .map_err(|e| FaviconError::Decode(format!("base64 decode error: {}", e)))
}

#[cfg(feature = "gui")]
pub use self::loader::{decode_image, FaviconLoader};

#[cfg(feature = "gui")]
mod loader {
    use std::time::Duration;

    use image::imageops::FilterType;

    use super::{decode_data_url, FaviconImage, ICON_SIZE};
    use crate::types::errors::FaviconError;

    /// Decodes PNG/ICO/JPEG/GIF/BMP bytes and scales them to [`ICON_SIZE`].
    pub fn decode_image(bytes: &[u8]) -> Result<FaviconImage, FaviconError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| FaviconError::Decode(e.to_string()))?
            .resize(ICON_SIZE, ICON_SIZE, FilterType::Triangle)
            .to_rgba8();
        Ok(FaviconImage {
            width: image.width(),
            height: image.height(),
            rgba: image.into_raw(),
        })
    }

    pub struct FaviconLoader {
        runtime: tokio::runtime::Runtime,
        client: reqwest::Client,
    }

    impl FaviconLoader {
        pub fn new() -> Result<Self, FaviconError> {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name("favicon")
                .enable_all()
                .build()
                .map_err(|e| FaviconError::Network(format!("runtime: {}", e)))?;
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .map_err(|e| FaviconError::Network(e.to_string()))?;
            Ok(Self { runtime, client })
        }

        /// Loads `url` in the background and passes the outcome to `on_done`.
        pub fn fetch<C>(&self, url: String, on_done: C)
        where
            C: FnOnce(String, Result<FaviconImage, FaviconError>) + Send + 'static,
        {
            let client = self.client.clone();
            self.runtime.spawn(async move {
                let result = load(&client, &url).await;
                on_done(url, result);
            });
        }
    }

    async fn load(client: &reqwest::Client, url: &str) -> Result<FaviconImage, FaviconError> {
        if url.starts_with("data:") {
            return decode_image(&decode_data_url(url)?);
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FaviconError::Unsupported(url.to_string()));
        }

        let bytes = client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FaviconError::Network(e.to_string()))?
            .bytes()
            .await
            .map_err(|e| FaviconError::Network(e.to_string()))?;
        decode_image(&bytes)
    }
}
