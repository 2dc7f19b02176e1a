//! Image Upload Handler
//!
//! Accepts a single multipart field `image`. The file is checked against the
//! configured extensions and size limit, must decode as an image, and is
//! stored under the SHA-256 of its content (same bytes, same name).

use std::path::Path;

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use http::StatusCode;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::auth::CurrentUser;
use crate::core::{ImageConfig, ServerState};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

/// Multipart field carrying the file
pub const FIELD_NAME: &str = "image";

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Public URL: `<prefix>/<save path>/<name>`
    pub image_url: String,
    /// Path relative to the runtime root
    pub image_save_url: String,
}

/// Calculate SHA256 hash of data
fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Lowercase extension with its leading dot
fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
}

fn format_error(msg: impl Into<String>) -> AppError {
    AppError::with_message(ErrorCode::UploadCheckImageFormat, msg)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        format_error(format!("File too large: {}", e.body_text()))
    } else {
        AppError::invalid_params(format!("Invalid multipart request: {}", e.body_text()))
    }
}

/// Validate image file
fn validate_image(data: &[u8], ext: &str, config: &ImageConfig) -> Result<(), AppError> {
    if !config.allow_exts.iter().any(|allowed| allowed == ext) {
        return Err(format_error(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext,
            config.allow_exts.join(", ")
        )));
    }

    if data.len() as u64 > config.max_size_bytes() {
        return Err(format_error(format!(
            "File too large. Maximum size is {}MB",
            config.max_size_mb
        )));
    }

    // Verify it's actually an image by trying to load it
    if let Err(e) = image::load_from_memory(data) {
        return Err(format_error(format!("Invalid image file ({}): {}", ext, e)));
    }

    Ok(())
}

/// POST /api/v1/upload - 上传图片
pub async fn upload(
    State(state): State<ServerState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<UploadResponse>> {
    let config = &state.config.image;

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FIELD_NAME) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(multipart_error)?;
        upload = Some((filename, data.to_vec()));
        break;
    }

    let (filename, data) = upload
        .ok_or_else(|| AppError::invalid_params("No 'image' field found in multipart body"))?;
    if data.is_empty() {
        return Err(AppError::invalid_params("Empty file provided"));
    }

    let ext = extension_of(&filename)
        .ok_or_else(|| format_error(format!("Invalid file extension for: {}", filename)))?;
    validate_image(&data, &ext, config)?;

    let save_dir = config.save_dir();
    tokio::fs::create_dir_all(&save_dir).await.map_err(|e| {
        tracing::error!(dir = %save_dir.display(), error = %e, "Image directory unavailable");
        AppError::new(ErrorCode::UploadCheckImageFailed)
    })?;

    let name = format!("{}{}", calculate_hash(&data), ext);
    let path = save_dir.join(&name);
    tokio::fs::write(&path, &data).await.map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to save image");
        AppError::new(ErrorCode::UploadSaveImageFailed)
    })?;

    tracing::info!(
        file = %name,
        size = data.len(),
        operator = %user.username,
        "Image uploaded"
    );

    Ok(ApiResponse::success(UploadResponse {
        image_url: config.full_url(&name),
        image_save_url: config.save_url(&name),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbImage::new(2, 2);
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("a.PNG").as_deref(), Some(".png"));
        assert_eq!(extension_of("archive.tar.jpg").as_deref(), Some(".jpg"));
        assert_eq!(extension_of("noext"), None);
    }

    #[test]
    fn test_validate_image() {
        let config = Config::with_secret("secret").image;
        let png = png_bytes();
        assert!(validate_image(&png, ".png", &config).is_ok());

        let err = validate_image(&png, ".gif", &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::UploadCheckImageFormat);

        let err = validate_image(b"not an image", ".png", &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::UploadCheckImageFormat);
    }

    #[test]
    fn test_size_limit() {
        let mut config = Config::with_secret("secret").image;
        config.max_size_mb = 0;
        let err = validate_image(&png_bytes(), ".png", &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::UploadCheckImageFormat);
    }

    #[test]
    fn test_hash_is_stable() {
        assert_eq!(calculate_hash(b"abc"), calculate_hash(b"abc"));
        assert_eq!(calculate_hash(b"abc").len(), 64);
    }
}
