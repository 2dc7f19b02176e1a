//! 业务服务层
//!
//! One generic [`ResourceService`] drives both resource types; each type
//! contributes its rule sets and result codes via [`Resource`].

pub mod article;
pub mod auth;
pub mod resource;
pub mod tag;

pub use article::ArticleService;
pub use auth::{AuthService, Credentials};
pub use resource::{Resource, ResourceService, ResultCodes};
pub use tag::TagService;
