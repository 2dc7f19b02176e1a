//! Generic resource service
//!
//! Every mutation follows the same protocol:
//!
//! 1. field validation (`InvalidParams`, store untouched)
//! 2. existence / uniqueness checks (resource-specific codes)
//! 3. a single mutation, timestamps assigned here
//!
//! Store failures map to the operation's "failed" code and are logged,
//! never exposed to the client.

use shared::util::now_secs;
use shared::{AppError, AppResult, ErrorCode, PageData, Paging};

use crate::db::repository::{RepoError, ResourceStore};
use crate::utils::validation::{PAGING_RULES, RuleSet, ValidationResult, validate, validate_id};

/// Result codes of one resource type
#[derive(Debug, Clone, Copy)]
pub struct ResultCodes {
    pub not_found: ErrorCode,
    /// Reported when the store rejects a write as a duplicate
    pub exists: Option<ErrorCode>,
    pub check_exist_failed: ErrorCode,
    pub list_failed: ErrorCode,
    pub count_failed: ErrorCode,
    pub get_failed: ErrorCode,
    pub add_failed: ErrorCode,
    pub edit_failed: ErrorCode,
    pub delete_failed: ErrorCode,
    pub clean_failed: ErrorCode,
}

/// Static description of a resource type: name, codes and rule sets
pub trait Resource: ResourceStore {
    /// Used in log fields
    const KIND: &'static str;
    const CODES: ResultCodes;
    const FILTER_RULES: RuleSet;
    const CREATE_RULES: RuleSet;
    const UPDATE_RULES: RuleSet;
}

#[derive(Clone)]
pub struct ResourceService<S> {
    store: S,
    page_size: i64,
}

impl<S: Resource> ResourceService<S> {
    /// `page_size` is the default used when a request does not set one
    pub fn new(store: S, page_size: i64) -> Self {
        Self { store, page_size }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ==================== Reads ====================

    /// Live rows matching the filter, windowed by `paging`
    pub async fn list(&self, filter: &S::Filter, paging: &Paging) -> AppResult<Vec<S::Entity>> {
        self.check(
            validate(filter, S::FILTER_RULES).and(validate(paging, PAGING_RULES)),
            "list",
        )?;
        self.store
            .find(filter, paging.window(self.page_size))
            .await
            .map_err(|e| self.store_failure("list", None, S::CODES.list_failed, e))
    }

    /// Live rows matching the filter (paging ignored)
    pub async fn count(&self, filter: &S::Filter) -> AppResult<i64> {
        self.check(validate(filter, S::FILTER_RULES), "count")?;
        self.store
            .count(filter)
            .await
            .map_err(|e| self.store_failure("count", None, S::CODES.count_failed, e))
    }

    /// `{lists, total}` for list endpoints
    pub async fn list_with_total(
        &self,
        filter: &S::Filter,
        paging: &Paging,
    ) -> AppResult<PageData<S::Entity>> {
        let lists = self.list(filter, paging).await?;
        let total = self.count(filter).await?;
        Ok(PageData::new(lists, total))
    }

    pub async fn get(&self, id: i64) -> AppResult<S::Entity> {
        self.check(validate_id(id), "get")?;
        self.store
            .find_by_id(id)
            .await
            .map_err(|e| self.store_failure("get", Some(id), S::CODES.get_failed, e))?
            .ok_or_else(|| AppError::new(S::CODES.not_found))
    }

    pub async fn exist_by_id(&self, id: i64) -> AppResult<bool> {
        self.store
            .exists_by_id(id)
            .await
            .map_err(|e| self.store_failure("exist", Some(id), S::CODES.check_exist_failed, e))
    }

    // ==================== Mutations ====================

    /// Validate, check conflicts, insert; returns the stored row
    pub async fn add(&self, data: S::Create) -> AppResult<S::Entity> {
        self.check(validate(&data, S::CREATE_RULES), "add")?;

        let conflict = self
            .store
            .add_conflict(&data)
            .await
            .map_err(|e| self.store_failure("add", None, S::CODES.check_exist_failed, e))?;
        if let Some(code) = conflict {
            return Err(AppError::new(code));
        }

        let id = self
            .store
            .create(&data, now_secs())
            .await
            .map_err(|e| self.store_failure("add", None, S::CODES.add_failed, e))?;
        tracing::info!(resource = S::KIND, id, "Resource created");

        self.reload(id, "add", S::CODES.add_failed).await
    }

    /// Validate, require a live row, check conflicts, apply; returns the stored row
    pub async fn edit(&self, id: i64, data: S::Update) -> AppResult<S::Entity> {
        self.check(
            validate_id(id).and(validate(&data, S::UPDATE_RULES)),
            "edit",
        )?;
        self.require_live(id).await?;

        let conflict = self
            .store
            .edit_conflict(id, &data)
            .await
            .map_err(|e| self.store_failure("edit", Some(id), S::CODES.check_exist_failed, e))?;
        if let Some(code) = conflict {
            return Err(AppError::new(code));
        }

        let updated = self
            .store
            .update(id, &data, now_secs())
            .await
            .map_err(|e| self.store_failure("edit", Some(id), S::CODES.edit_failed, e))?;
        if !updated {
            // deleted between the check and the write
            return Err(AppError::new(S::CODES.not_found));
        }
        tracing::info!(resource = S::KIND, id, "Resource updated");

        self.reload(id, "edit", S::CODES.edit_failed).await
    }

    /// Soft-delete a live row
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.check(validate_id(id), "delete")?;
        self.require_live(id).await?;

        let deleted = self
            .store
            .soft_delete(id, now_secs())
            .await
            .map_err(|e| self.store_failure("delete", Some(id), S::CODES.delete_failed, e))?;
        if !deleted {
            return Err(AppError::new(S::CODES.not_found));
        }
        tracing::info!(resource = S::KIND, id, "Resource deleted");
        Ok(())
    }

    /// Physically remove rows per the store's retention rule; irreversible
    pub async fn purge(&self) -> AppResult<u64> {
        let removed = self
            .store
            .purge()
            .await
            .map_err(|e| self.store_failure("purge", None, S::CODES.clean_failed, e))?;
        tracing::info!(resource = S::KIND, removed, "Resource rows purged");
        Ok(removed)
    }

    // ==================== Helpers ====================

    fn check(&self, result: ValidationResult, operation: &str) -> AppResult<()> {
        if !result.is_valid() {
            tracing::info!(
                resource = S::KIND,
                operation,
                errors = %result.details(),
                "Validation failed"
            );
        }
        result.into_result()
    }

    async fn require_live(&self, id: i64) -> AppResult<()> {
        if self.exist_by_id(id).await? {
            Ok(())
        } else {
            Err(AppError::new(S::CODES.not_found))
        }
    }

    async fn reload(&self, id: i64, operation: &str, failed: ErrorCode) -> AppResult<S::Entity> {
        self.store
            .find_by_id(id)
            .await
            .map_err(|e| self.store_failure(operation, Some(id), failed, e))?
            .ok_or_else(|| AppError::new(failed))
    }

    fn store_failure(
        &self,
        operation: &str,
        id: Option<i64>,
        failed: ErrorCode,
        err: RepoError,
    ) -> AppError {
        match (err, S::CODES.exists) {
            (RepoError::Duplicate(_), Some(exists)) => AppError::new(exists),
            (err, _) => {
                tracing::error!(
                    target: "database",
                    resource = S::KIND,
                    operation,
                    id = ?id,
                    error = %err,
                    "Store operation failed"
                );
                AppError::new(failed)
            }
        }
    }
}
