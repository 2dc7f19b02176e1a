//! Declarative input validation
//!
//! Forms expose their fields by name ([`Form`]); rule sets are static tables
//! of `(field, rules)` pairs. Every rule of every field is evaluated in
//! declaration order and every violation is collected.

use serde_json::{Value, json};
use shared::{AppError, Paging};

// ── Rules ───────────────────────────────────────────────────────────

/// A single field rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Non-blank string / non-zero integer / present
    Required,
    /// String length in characters must not exceed the bound
    MaxSize(usize),
    /// Integer must be at least the bound
    Min(i64),
    /// Integer must lie within the inclusive bounds
    Range(i64, i64),
}

/// Static rule table: `(field, rules)` in declaration order
pub type RuleSet = &'static [(&'static str, &'static [Rule])];

/// Field value as seen by the rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Str(&'a str),
    Int(i64),
}

/// A record whose fields can be looked up by name
///
/// Returns `None` for absent optional fields (and unknown names).
pub trait Form {
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

// ── Result ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Append the violations of another form (e.g. path id + body)
    pub fn and(mut self, other: ValidationResult) -> Self {
        self.errors.extend(other.errors);
        self
    }

    /// `{"errors": [{"field": .., "message": ..}]}` payload
    pub fn details(&self) -> Value {
        Value::Array(
            self.errors
                .iter()
                .map(|e| json!({ "field": e.field, "message": e.message }))
                .collect(),
        )
    }

    /// Convert into an `InvalidParams` error when any rule failed
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_valid() {
            return Ok(());
        }
        let message = self
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Err(AppError::invalid_params(message).with_detail("errors", self.details()))
    }
}

// ── Evaluation ──────────────────────────────────────────────────────

/// Run a rule set against a form
pub fn validate<F: Form + ?Sized>(form: &F, rules: RuleSet) -> ValidationResult {
    let mut result = ValidationResult::default();
    for &(field, field_rules) in rules {
        let value = form.field(field);
        for rule in field_rules {
            if let Some(message) = check(*rule, field, value) {
                result.errors.push(FieldError { field, message });
            }
        }
    }
    result
}

fn check(rule: Rule, field: &str, value: Option<FieldValue<'_>>) -> Option<String> {
    match (rule, value) {
        (Rule::Required, None) => Some(format!("{field} can not be empty")),
        (Rule::Required, Some(FieldValue::Str(s))) if s.trim().is_empty() => {
            Some(format!("{field} can not be empty"))
        }
        (Rule::Required, Some(FieldValue::Int(0))) => Some(format!("{field} can not be empty")),
        (Rule::MaxSize(max), Some(FieldValue::Str(s))) if s.chars().count() > max => {
            Some(format!("{field}'s length can not over {max}"))
        }
        (Rule::Min(min), Some(FieldValue::Int(v))) if v < min => {
            Some(format!("{field} must be greater than or equal to {min}"))
        }
        (Rule::Range(0, 1), Some(FieldValue::Int(v))) if !(0..=1).contains(&v) => {
            Some(format!("{field} only can be 0 or 1"))
        }
        (Rule::Range(lo, hi), Some(FieldValue::Int(v))) if v < lo || v > hi => {
            Some(format!("{field} must be between {lo} and {hi}"))
        }
        _ => None,
    }
}

// ── Shared forms ────────────────────────────────────────────────────

pub const ID_RULES: RuleSet = &[("id", &[Rule::Required, Rule::Min(1)])];

pub const PAGING_RULES: RuleSet = &[("page", &[Rule::Min(0)]), ("page_size", &[Rule::Min(0)])];

/// Path id as a form
#[derive(Debug, Clone, Copy)]
pub struct IdForm(pub i64);

impl Form for IdForm {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Int(self.0)),
            _ => None,
        }
    }
}

impl Form for Paging {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "page" => self.page.map(FieldValue::Int),
            "page_size" => self.page_size.map(FieldValue::Int),
            _ => None,
        }
    }
}

/// Validate a path id
pub fn validate_id(id: i64) -> ValidationResult {
    validate(&IdForm(id), ID_RULES)
}
