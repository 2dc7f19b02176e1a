//! Unified result codes for the blog API
//!
//! Every response envelope carries one of these codes in its `code` field.
//! Codes are organized by range:
//! - 200 / 400 / 500: General outcomes (mirror the HTTP family)
//! - 10001-10010: Tag outcomes
//! - 10011-10099: Article outcomes
//! - 2xxxx: Authentication outcomes
//! - 3xxxx: Upload outcomes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message returned for codes outside the registry
pub const UNKNOWN_MESSAGE: &str = "unknown error";

/// Unified result code enum
///
/// All codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== General ====================
    /// Operation completed successfully
    Success = 200,
    /// Request parameters failed validation or could not be parsed
    InvalidParams = 400,
    /// Generic failure
    Error = 500,

    // ==================== 10001-10010: Tag ====================
    /// A live tag already uses this name
    TagExists = 10001,
    /// Tag existence check hit a store failure
    CheckExistTagFailed = 10002,
    /// Tag not found among live rows
    TagNotFound = 10003,
    /// Listing tags failed
    GetTagsFailed = 10004,
    /// Counting tags failed
    CountTagFailed = 10005,
    /// Inserting a tag failed
    AddTagFailed = 10006,
    /// Updating a tag failed
    EditTagFailed = 10007,
    /// Soft-deleting a tag failed
    DeleteTagFailed = 10008,
    /// Purging tags failed
    CleanTagFailed = 10009,

    // ==================== 10011-10099: Article ====================
    /// Article not found among live rows
    ArticleNotFound = 10011,
    /// Article existence check hit a store failure
    CheckExistArticleFailed = 10012,
    /// Inserting an article failed
    AddArticleFailed = 10013,
    /// Soft-deleting an article failed
    DeleteArticleFailed = 10014,
    /// Updating an article failed
    EditArticleFailed = 10015,
    /// Counting articles failed
    CountArticleFailed = 10016,
    /// Listing articles failed
    GetArticlesFailed = 10017,
    /// Reading a single article failed
    GetArticleFailed = 10018,
    /// Purging articles failed
    CleanArticleFailed = 10019,

    // ==================== 2xxxx: Auth ====================
    /// Token missing, malformed or signature mismatch
    AuthCheckTokenFailed = 20001,
    /// Token has expired
    AuthCheckTokenTimeout = 20002,
    /// Token could not be generated
    AuthTokenFailed = 20003,
    /// Username/password rejected
    AuthFailed = 20004,

    // ==================== 3xxxx: Upload ====================
    /// Writing the uploaded image failed
    UploadSaveImageFailed = 30001,
    /// Upload directory check failed
    UploadCheckImageFailed = 30002,
    /// Uploaded file has a bad extension, size or content
    UploadCheckImageFormat = 30003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the message bound to this code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "ok",
            ErrorCode::InvalidParams => "invalid params",
            ErrorCode::Error => "fail",

            // Tag
            ErrorCode::TagExists => "tag name already exists",
            ErrorCode::CheckExistTagFailed => "check tag existence failed",
            ErrorCode::TagNotFound => "tag not found",
            ErrorCode::GetTagsFailed => "get tags failed",
            ErrorCode::CountTagFailed => "count tags failed",
            ErrorCode::AddTagFailed => "add tag failed",
            ErrorCode::EditTagFailed => "edit tag failed",
            ErrorCode::DeleteTagFailed => "delete tag failed",
            ErrorCode::CleanTagFailed => "clean tags failed",

            // Article
            ErrorCode::ArticleNotFound => "article not found",
            ErrorCode::CheckExistArticleFailed => "check article existence failed",
            ErrorCode::AddArticleFailed => "add article failed",
            ErrorCode::DeleteArticleFailed => "delete article failed",
            ErrorCode::EditArticleFailed => "edit article failed",
            ErrorCode::CountArticleFailed => "count articles failed",
            ErrorCode::GetArticlesFailed => "get articles failed",
            ErrorCode::GetArticleFailed => "get article failed",
            ErrorCode::CleanArticleFailed => "clean articles failed",

            // Auth
            ErrorCode::AuthCheckTokenFailed => "token check failed",
            ErrorCode::AuthCheckTokenTimeout => "token expired",
            ErrorCode::AuthTokenFailed => "token generation failed",
            ErrorCode::AuthFailed => "token auth failed",

            // Upload
            ErrorCode::UploadSaveImageFailed => "save image failed",
            ErrorCode::UploadCheckImageFailed => "check image failed",
            ErrorCode::UploadCheckImageFormat => "invalid image format or size",
        }
    }
}

/// Look up the message for a raw code, falling back to [`UNKNOWN_MESSAGE`]
pub fn lookup(code: u16) -> &'static str {
    ErrorCode::try_from(code)
        .map(|c| c.message())
        .unwrap_or(UNKNOWN_MESSAGE)
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, InvalidErrorCode> {
        match value {
            // General
            200 => Ok(ErrorCode::Success),
            400 => Ok(ErrorCode::InvalidParams),
            500 => Ok(ErrorCode::Error),

            // Tag
            10001 => Ok(ErrorCode::TagExists),
            10002 => Ok(ErrorCode::CheckExistTagFailed),
            10003 => Ok(ErrorCode::TagNotFound),
            10004 => Ok(ErrorCode::GetTagsFailed),
            10005 => Ok(ErrorCode::CountTagFailed),
            10006 => Ok(ErrorCode::AddTagFailed),
            10007 => Ok(ErrorCode::EditTagFailed),
            10008 => Ok(ErrorCode::DeleteTagFailed),
            10009 => Ok(ErrorCode::CleanTagFailed),

            // Article
            10011 => Ok(ErrorCode::ArticleNotFound),
            10012 => Ok(ErrorCode::CheckExistArticleFailed),
            10013 => Ok(ErrorCode::AddArticleFailed),
            10014 => Ok(ErrorCode::DeleteArticleFailed),
            10015 => Ok(ErrorCode::EditArticleFailed),
            10016 => Ok(ErrorCode::CountArticleFailed),
            10017 => Ok(ErrorCode::GetArticlesFailed),
            10018 => Ok(ErrorCode::GetArticleFailed),
            10019 => Ok(ErrorCode::CleanArticleFailed),

            // Auth
            20001 => Ok(ErrorCode::AuthCheckTokenFailed),
            20002 => Ok(ErrorCode::AuthCheckTokenTimeout),
            20003 => Ok(ErrorCode::AuthTokenFailed),
            20004 => Ok(ErrorCode::AuthFailed),

            // Upload
            30001 => Ok(ErrorCode::UploadSaveImageFailed),
            30002 => Ok(ErrorCode::UploadCheckImageFailed),
            30003 => Ok(ErrorCode::UploadCheckImageFormat),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 200);
        assert_eq!(ErrorCode::InvalidParams.code(), 400);
        assert_eq!(ErrorCode::Error.code(), 500);

        assert_eq!(ErrorCode::TagExists.code(), 10001);
        assert_eq!(ErrorCode::TagNotFound.code(), 10003);
        assert_eq!(ErrorCode::CleanTagFailed.code(), 10009);

        assert_eq!(ErrorCode::ArticleNotFound.code(), 10011);
        assert_eq!(ErrorCode::CleanArticleFailed.code(), 10019);

        assert_eq!(ErrorCode::AuthCheckTokenFailed.code(), 20001);
        assert_eq!(ErrorCode::AuthFailed.code(), 20004);

        assert_eq!(ErrorCode::UploadSaveImageFailed.code(), 30001);
        assert_eq!(ErrorCode::UploadCheckImageFormat.code(), 30003);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::InvalidParams.is_success());
        assert!(!ErrorCode::TagNotFound.is_success());
    }

    #[test]
    fn test_try_from_covers_registry() {
        for raw in [200u16, 400, 500, 10001, 10005, 10009, 10011, 10019, 20001, 20004, 30001, 30003] {
            let code = ErrorCode::try_from(raw).unwrap();
            assert_eq!(code.code(), raw);
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
        assert_eq!(ErrorCode::try_from(10010), Err(InvalidErrorCode(10010)));
        assert_eq!(ErrorCode::try_from(9999), Err(InvalidErrorCode(9999)));
    }

    #[test]
    fn test_lookup_falls_back_to_unknown() {
        assert_eq!(lookup(200), "ok");
        assert_eq!(lookup(10001), "tag name already exists");
        assert_eq!(lookup(12345), UNKNOWN_MESSAGE);
        assert_eq!(lookup(0), UNKNOWN_MESSAGE);
    }

    #[test]
    fn test_serialize_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::Success).unwrap(), "200");
        assert_eq!(serde_json::to_string(&ErrorCode::TagExists).unwrap(), "10001");
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::ArticleNotFound), "10011");
    }
}
