//! Upload Routes
//!
//! Image upload for authenticated users. Stored files are not served.

mod handler;

pub use handler::{FIELD_NAME, UploadResponse};

use axum::{Router, extract::DefaultBodyLimit, routing::post};

use crate::core::ServerState;

/// Multipart framing allowance on top of the image size limit
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build upload router
///
/// `max_image_bytes` raises axum's default body limit so the handler can
/// report oversized images with the upload result code.
pub fn router(max_image_bytes: u64) -> Router<ServerState> {
    let limit = usize::try_from(max_image_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/upload", post(handler::upload))
        .layer(DefaultBodyLimit::max(limit))
}
