//! HTTP status code mapping for result codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this result code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 400 Bad Request
            Self::InvalidParams | Self::UploadCheckImageFormat => StatusCode::BAD_REQUEST,

            // 404 Not Found
            Self::TagNotFound | Self::ArticleNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::TagExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::AuthCheckTokenFailed | Self::AuthCheckTokenTimeout | Self::AuthFailed => {
                StatusCode::UNAUTHORIZED
            }

            // 500 Internal Server Error
            Self::Error
            | Self::CheckExistTagFailed
            | Self::GetTagsFailed
            | Self::CountTagFailed
            | Self::AddTagFailed
            | Self::EditTagFailed
            | Self::DeleteTagFailed
            | Self::CleanTagFailed
            | Self::CheckExistArticleFailed
            | Self::AddArticleFailed
            | Self::DeleteArticleFailed
            | Self::EditArticleFailed
            | Self::CountArticleFailed
            | Self::GetArticlesFailed
            | Self::GetArticleFailed
            | Self::CleanArticleFailed
            | Self::AuthTokenFailed
            | Self::UploadSaveImageFailed
            | Self::UploadCheckImageFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
