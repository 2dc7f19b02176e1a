//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on result code ranges
///
/// - 200: Success
/// - other < 1000: General errors (parameter / generic failure)
/// - 10001-10010: Tag
/// - 10011-10099: Article
/// - 2xxxx: Auth
/// - 3xxxx: Upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Successful outcome
    Success,
    /// General errors
    General,
    /// Tag errors
    Tag,
    /// Article errors
    Article,
    /// Authentication errors
    Auth,
    /// Upload errors
    Upload,
}

impl ErrorCategory {
    /// Determine category from code value
    pub fn from_code(code: u16) -> Self {
        match code {
            200 => Self::Success,
            0..10001 => Self::General,
            10001..10011 => Self::Tag,
            10011..20000 => Self::Article,
            20000..30000 => Self::Auth,
            _ => Self::Upload,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::General => "general",
            Self::Tag => "tag",
            Self::Article => "article",
            Self::Auth => "auth",
            Self::Upload => "upload",
        }
    }
}

impl ErrorCode {
    /// Get the category for this code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// Whether this code signals an internal failure (5xx class)
    ///
    /// These are logged when rendered; their cause is never sent to the client.
    pub fn is_system(&self) -> bool {
        self.http_status().is_server_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(200), ErrorCategory::Success);
        assert_eq!(ErrorCategory::from_code(400), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(500), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(10001), ErrorCategory::Tag);
        assert_eq!(ErrorCategory::from_code(10009), ErrorCategory::Tag);
        assert_eq!(ErrorCategory::from_code(10011), ErrorCategory::Article);
        assert_eq!(ErrorCategory::from_code(20004), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(30003), ErrorCategory::Upload);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::TagExists.category(), ErrorCategory::Tag);
        assert_eq!(ErrorCode::GetArticleFailed.category(), ErrorCategory::Article);
        assert_eq!(ErrorCode::AuthFailed.category(), ErrorCategory::Auth);
    }

    #[test]
    fn test_is_system() {
        assert!(ErrorCode::AddTagFailed.is_system());
        assert!(ErrorCode::Error.is_system());
        assert!(!ErrorCode::TagNotFound.is_system());
        assert!(!ErrorCode::InvalidParams.is_system());
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Article).unwrap();
        assert_eq!(json, "\"article\"");
    }
}
