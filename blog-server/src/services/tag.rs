//! Tag service: rule sets, result codes and tag-only operations

use shared::models::{TagCreate, TagFilter, TagUpdate};
use shared::{AppResult, ErrorCode};

use super::resource::{Resource, ResourceService, ResultCodes};
use crate::db::repository::TagStore;
use crate::utils::validation::{FieldValue, Form, Rule, RuleSet};

pub type TagService = ResourceService<TagStore>;

impl Resource for TagStore {
    const KIND: &'static str = "tag";

    const CODES: ResultCodes = ResultCodes {
        not_found: ErrorCode::TagNotFound,
        exists: Some(ErrorCode::TagExists),
        check_exist_failed: ErrorCode::CheckExistTagFailed,
        list_failed: ErrorCode::GetTagsFailed,
        count_failed: ErrorCode::CountTagFailed,
        get_failed: ErrorCode::GetTagsFailed,
        add_failed: ErrorCode::AddTagFailed,
        edit_failed: ErrorCode::EditTagFailed,
        delete_failed: ErrorCode::DeleteTagFailed,
        clean_failed: ErrorCode::CleanTagFailed,
    };

    const FILTER_RULES: RuleSet = &[
        ("name", &[Rule::MaxSize(100)]),
        ("state", &[Rule::Range(0, 1)]),
    ];

    const CREATE_RULES: RuleSet = &[
        ("name", &[Rule::Required, Rule::MaxSize(100)]),
        ("created_by", &[Rule::Required, Rule::MaxSize(100)]),
        ("state", &[Rule::Range(0, 1)]),
    ];

    const UPDATE_RULES: RuleSet = &[
        ("modified_by", &[Rule::Required, Rule::MaxSize(100)]),
        ("name", &[Rule::MaxSize(100)]),
        ("state", &[Rule::Range(0, 1)]),
    ];
}

impl TagService {
    /// Whether a live tag carries this exact name
    pub async fn exist_by_name(&self, name: &str) -> AppResult<bool> {
        self.store().exists_by_name(name).await.map_err(|e| {
            tracing::error!(target: "database", name, error = %e, "Tag name lookup failed");
            shared::AppError::new(ErrorCode::CheckExistTagFailed)
        })
    }
}

impl Form for TagCreate {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Str(&self.name)),
            "created_by" => Some(FieldValue::Str(&self.created_by)),
            "state" => Some(FieldValue::Int(self.state.into())),
            _ => None,
        }
    }
}

impl Form for TagUpdate {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => self.name.as_deref().map(FieldValue::Str),
            "modified_by" => self.modified_by.as_deref().map(FieldValue::Str),
            "state" => self.state.map(|s| FieldValue::Int(s.into())),
            _ => None,
        }
    }
}

impl Form for TagFilter {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => self.name.as_deref().map(FieldValue::Str),
            "state" => self.state.map(|s| FieldValue::Int(s.into())),
            _ => None,
        }
    }
}
