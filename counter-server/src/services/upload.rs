//! Stock image storage
//!
//! Supports PNG, JPEG and WebP input; everything is re-encoded to JPEG and
//! stored under the content hash, so identical uploads share one file.

use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::fs;

use crate::utils::{AppError, AppResult, ErrorCode};

/// Maximum file size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for dish images
const JPEG_QUALITY: u8 = 85;

/// Public URL prefix served by `ServeDir`
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// A stored image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub filename: String,
    /// Value for `StockItem::image_ref`
    pub image_ref: String,
    pub size: usize,
}

/// Calculate SHA256 hash of data
fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Validate size and extension, returns the lowercased extension
fn validate_image(data: &[u8], original_name: &str) -> AppResult<String> {
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }

    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!(
                "File too large. Maximum size is {} bytes ({}MB)",
                MAX_FILE_SIZE,
                MAX_FILE_SIZE / 1024 / 1024
            ),
        ));
    }

    let ext = PathBuf::from(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::UnsupportedFileFormat,
                format!("Invalid file extension for: {}", original_name),
            )
        })?;

    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::UnsupportedFileFormat,
            format!(
                "Unsupported file format '{}'. Supported: {}",
                ext,
                SUPPORTED_FORMATS.join(", ")
            ),
        ));
    }

    Ok(ext)
}

/// Decode and re-encode as JPEG
fn compress_image(data: &[u8], ext: &str) -> AppResult<Vec<u8>> {
    let img = image::load_from_memory(data).map_err(|e| {
        AppError::with_message(
            ErrorCode::InvalidImage,
            format!("Invalid image file ({}): {}", ext, e),
        )
    })?;

    let mut buffer = Vec::new();
    let mut cursor = Cursor::new(&mut buffer);
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
    img.to_rgb8().write_with_encoder(encoder).map_err(|e| {
        AppError::with_message(
            ErrorCode::FileStorageFailed,
            format!("Failed to compress image: {}", e),
        )
    })?;

    Ok(buffer)
}

/// Validate, compress and write an uploaded image into `uploads_dir`
///
/// CPU bound; call from `spawn_blocking` in async code.
pub fn store_image(uploads_dir: &Path, original_name: &str, data: &[u8]) -> AppResult<StoredImage> {
    let ext = validate_image(data, original_name)?;
    let compressed = compress_image(data, &ext)?;

    let hash = calculate_hash(&compressed);
    let filename = format!("{}.jpg", hash);
    let path = uploads_dir.join(&filename);

    if path.exists() {
        tracing::info!(
            original_name = %original_name,
            existing_file = %filename,
            "Duplicate image detected, reusing existing file"
        );
    } else {
        fs::create_dir_all(uploads_dir).map_err(|e| {
            AppError::with_message(
                ErrorCode::FileStorageFailed,
                format!("Failed to create uploads directory: {}", e),
            )
        })?;
        fs::write(&path, &compressed).map_err(|e| {
            AppError::with_message(
                ErrorCode::FileStorageFailed,
                format!("Failed to save file: {}", e),
            )
        })?;
        tracing::info!(
            original_name = %original_name,
            size = compressed.len(),
            hash = %hash,
            "Image uploaded successfully"
        );
    }

    Ok(StoredImage {
        image_ref: format!("{}/{}", UPLOADS_URL_PREFIX, filename),
        size: compressed.len(),
        filename,
    })
}
