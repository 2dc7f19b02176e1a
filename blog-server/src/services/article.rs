//! Article service: rule sets and result codes

use shared::ErrorCode;
use shared::models::{ArticleCreate, ArticleFilter, ArticleUpdate};

use super::resource::{Resource, ResourceService, ResultCodes};
use crate::db::repository::ArticleStore;
use crate::utils::validation::{FieldValue, Form, Rule, RuleSet};

pub type ArticleService = ResourceService<ArticleStore>;

impl Resource for ArticleStore {
    const KIND: &'static str = "article";

    const CODES: ResultCodes = ResultCodes {
        not_found: ErrorCode::ArticleNotFound,
        exists: None,
        check_exist_failed: ErrorCode::CheckExistArticleFailed,
        list_failed: ErrorCode::GetArticlesFailed,
        count_failed: ErrorCode::CountArticleFailed,
        get_failed: ErrorCode::GetArticleFailed,
        add_failed: ErrorCode::AddArticleFailed,
        edit_failed: ErrorCode::EditArticleFailed,
        delete_failed: ErrorCode::DeleteArticleFailed,
        clean_failed: ErrorCode::CleanArticleFailed,
    };

    const FILTER_RULES: RuleSet = &[
        ("tag_id", &[Rule::Min(1)]),
        ("state", &[Rule::Range(0, 1)]),
    ];

    const CREATE_RULES: RuleSet = &[
        ("tag_id", &[Rule::Required, Rule::Min(1)]),
        ("title", &[Rule::Required, Rule::MaxSize(100)]),
        ("desc", &[Rule::Required, Rule::MaxSize(255)]),
        ("content", &[Rule::Required, Rule::MaxSize(65535)]),
        ("created_by", &[Rule::Required, Rule::MaxSize(100)]),
        ("cover_image_url", &[Rule::Required, Rule::MaxSize(255)]),
        ("state", &[Rule::Range(0, 1)]),
    ];

    const UPDATE_RULES: RuleSet = &[
        ("tag_id", &[Rule::Min(1)]),
        ("title", &[Rule::MaxSize(100)]),
        ("desc", &[Rule::MaxSize(255)]),
        ("content", &[Rule::MaxSize(65535)]),
        ("modified_by", &[Rule::Required, Rule::MaxSize(100)]),
        ("cover_image_url", &[Rule::MaxSize(255)]),
        ("state", &[Rule::Range(0, 1)]),
    ];
}

impl Form for ArticleCreate {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "tag_id" => Some(FieldValue::Int(self.tag_id)),
            "title" => Some(FieldValue::Str(&self.title)),
            "desc" => Some(FieldValue::Str(&self.desc)),
            "content" => Some(FieldValue::Str(&self.content)),
            "created_by" => Some(FieldValue::Str(&self.created_by)),
            "cover_image_url" => Some(FieldValue::Str(&self.cover_image_url)),
            "state" => Some(FieldValue::Int(self.state.into())),
            _ => None,
        }
    }
}

impl Form for ArticleUpdate {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "tag_id" => self.tag_id.map(FieldValue::Int),
            "title" => self.title.as_deref().map(FieldValue::Str),
            "desc" => self.desc.as_deref().map(FieldValue::Str),
            "content" => self.content.as_deref().map(FieldValue::Str),
            "modified_by" => self.modified_by.as_deref().map(FieldValue::Str),
            "cover_image_url" => self.cover_image_url.as_deref().map(FieldValue::Str),
            "state" => self.state.map(|s| FieldValue::Int(s.into())),
            _ => None,
        }
    }
}

impl Form for ArticleFilter {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "tag_id" => self.tag_id.map(FieldValue::Int),
            "state" => self.state.map(|s| FieldValue::Int(s.into())),
            _ => None,
        }
    }
}
