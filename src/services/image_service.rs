// src/services/image_service.rs

use anyhow::anyhow;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage};

use crate::common::error::AppError;

// ---
// Pipeline das fotos dos produtos:
// bytes enviados -> decode -> cabe em max_dimension x max_dimension -> JPEG -> base64
// ---
#[derive(Debug, Clone, Copy)]
pub struct ImageService {
    max_dimension: u32,
    jpeg_quality: u8,
}

impl ImageService {
    pub fn new(max_dimension: u32, jpeg_quality: u8) -> Self {
        Self {
            max_dimension: max_dimension.max(1),
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    /// Decodifica, reduz (nunca amplia, mantendo a proporção) e regrava como JPEG.
    pub fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>, AppError> {
        let decoded = image::load_from_memory(bytes)?;
        let resized = self.fit_in_box(decoded);

        // JPEG não tem canal alfa
        let rgb = resized.to_rgb8();

        let mut buffer = Vec::new();
        {
            let mut encoder = JpegEncoder::new_with_quality(&mut buffer, self.jpeg_quality);
            encoder.encode_image(&rgb)?;
        }

        Ok(buffer)
    }

    fn fit_in_box(&self, img: DynamicImage) -> DynamicImage {
        if img.width() <= self.max_dimension && img.height() <= self.max_dimension {
            return img;
        }
        img.resize(self.max_dimension, self.max_dimension, FilterType::Lanczos3)
    }

    pub fn to_base64(bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    /// Versão assíncrona usada pelos handlers: o trabalho de CPU roda fora do runtime.
    pub async fn encode_for_storage(&self, bytes: Vec<u8>) -> Result<String, AppError> {
        let service = *self;
        let original_len = bytes.len();

        let encoded = tokio::task::spawn_blocking(move || {
            service.compress(&bytes).map(|jpeg| Self::to_base64(&jpeg))
        })
        .await
        .map_err(|e| AppError::InternalServerError(anyhow!("image task failed: {}", e)))??;

        tracing::info!(
            "🖼️ Imagem comprimida: {} bytes -> {} chars base64",
            original_len,
            encoded.len()
        );

        Ok(encoded)
    }
}
