// ============================================================================
// HRIS Core - Employee Service
// File: crates/hris-core/src/services/employee_service.rs
// ============================================================================
//! Role-scoped employee lifecycle: create, read, update, photo, soft delete

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use hris_shared::utils::mask_email;
use hris_shared::{Clock, IdGenerator};

use super::credentials::{PasswordHasher, Principal};
use super::within;
use crate::domain::{Employee, EmployeeProfile, Lifecycle, PhotoRef, PhotoUpload, ProfilePatch};
use crate::error::DomainError;
use crate::repositories::{EmployeeRepository, PhotoStorage};

/// Input for creating an employee.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    /// Caller-chosen id; generated when absent or blank.
    pub id: Option<String>,
    pub profile: EmployeeProfile,
    pub password: String,
}

/// Partial update. Omitted profile fields, password and photo keep their
/// stored values.
#[derive(Debug, Clone)]
pub struct EmployeeUpdate {
    pub id: String,
    pub profile: ProfilePatch,
    pub password: Option<String>,
    pub photo: Option<PhotoUpload>,
}

pub struct EmployeeService {
    repo: Arc<dyn EmployeeRepository>,
    storage: Arc<dyn PhotoStorage>,
    hasher: Arc<dyn PasswordHasher>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl EmployeeService {
    pub fn new(
        repo: Arc<dyn EmployeeRepository>,
        storage: Arc<dyn PhotoStorage>,
        hasher: Arc<dyn PasswordHasher>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        timeout: Duration,
    ) -> Self {
        Self {
            repo,
            storage,
            hasher,
            ids,
            clock,
            timeout,
        }
    }

    /// Create an employee. Privileged callers only. Returns the new id.
    pub async fn create(&self, caller: &Principal, input: NewEmployee) -> Result<String, DomainError> {
        require_privileged(caller, "create employee")?;

        let profile = input.profile.checked()?;
        let password = input.password;
        if password.trim().is_empty() {
            return Err(DomainError::BadRequest(
                "invalid data input, please check: password".into(),
            ));
        }

        let id = input
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| self.ids.new_id());

        within(self.timeout, async move {
            // Fast path only; the unique index is the real guard
            if self.repo.find_by_email(&profile.email).await?.is_some() {
                warn!("Create failed: email already exists: {}", mask_email(&profile.email));
                return Err(DomainError::Duplicate(profile.email));
            }

            let password_hash = self.hasher.hash(&password).await?;
            let employee = Employee::create(id, profile, password_hash, self.clock.now())?;
            self.repo.create(&employee).await?;

            info!(
                employee_id = %employee.id,
                role = employee.role.as_str(),
                "Employee created: {}",
                mask_email(&employee.email)
            );
            Ok(employee.id)
        })
        .await
    }

    /// All live employees. Privileged callers only.
    pub async fn find_all(&self, caller: &Principal) -> Result<Vec<Employee>, DomainError> {
        require_privileged(caller, "list employees")?;
        within(self.timeout, self.repo.find_all()).await
    }

    pub async fn find_by_id(&self, caller: &Principal, id: &str) -> Result<Employee, DomainError> {
        let id = required_id(id)?;
        require_owner_or_privileged(caller, id)?;
        within(self.timeout, self.load_live(id)).await
    }

    /// Merge `input` onto the stored record of `input.id`.
    ///
    /// Staff may only update their own record and may not touch role,
    /// salary, status or position.
    pub async fn update(&self, caller: &Principal, input: EmployeeUpdate) -> Result<Employee, DomainError> {
        let id = required_id(&input.id)?.to_string();
        require_owner_or_privileged(caller, &id)?;

        within(self.timeout, async move {
            let existing = self.load_live(&id).await?;
            let profile = input.profile.apply(existing.profile()).checked()?;

            if !caller.role.is_privileged() && existing.changes_employment_terms(&profile) {
                warn!(
                    employee_id = %id,
                    "Update rejected: staff attempted to change employment terms"
                );
                return Err(DomainError::Forbidden);
            }

            if profile.email != existing.email {
                let taken = self.repo.find_by_email(&profile.email).await?;
                if taken.is_some_and(|other| other.id != id) {
                    warn!("Update failed: email already exists: {}", mask_email(&profile.email));
                    return Err(DomainError::Duplicate(profile.email));
                }
            }

            let now = self.clock.now();
            let mut updated = existing.with_profile(profile, now)?;

            if let Some(password) = input.password.filter(|p| !p.trim().is_empty()) {
                let hash = self.hasher.hash(&password).await?;
                updated = updated.with_password_hash(hash, now)?;
            }

            if let Some(upload) = input.photo {
                let photo = self.store_photo(&id, upload).await?;
                updated = updated.with_photo(photo, now);
            }

            self.persist(&updated).await?;

            info!(employee_id = %id, "Employee updated");
            Ok(updated)
        })
        .await
    }

    /// Replace only the photo of `id`.
    pub async fn update_photo(
        &self,
        caller: &Principal,
        id: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<PhotoRef, DomainError> {
        let id = required_id(id)?;
        require_owner_or_privileged(caller, id)?;
        let upload = PhotoUpload::new(bytes, content_type)?;

        within(self.timeout, async move {
            let existing = self.load_live(id).await?;
            let photo = self.store_photo(id, upload).await?;
            let updated = existing.with_photo(photo.clone(), self.clock.now());
            self.persist(&updated).await?;

            info!(employee_id = %id, mime = photo.mime.as_str(), "Employee photo updated");
            Ok(photo)
        })
        .await
    }

    /// Drop the photo reference of `id`. Same ownership rule as `update_photo`.
    /// A record without a photo is left untouched.
    pub async fn remove_photo(&self, caller: &Principal, id: &str) -> Result<(), DomainError> {
        let id = required_id(id)?;
        require_owner_or_privileged(caller, id)?;

        within(self.timeout, async move {
            let existing = self.load_live(id).await?;
            if existing.photo.is_none() {
                return Ok(());
            }
            self.persist(&existing.without_photo(self.clock.now())).await?;

            info!(employee_id = %id, "Employee photo removed");
            Ok(())
        })
        .await
    }

    /// Soft delete. Privileged callers only.
    pub async fn delete(&self, caller: &Principal, id: &str) -> Result<(), DomainError> {
        require_privileged(caller, "delete employee")?;
        let id = required_id(id)?;

        within(self.timeout, async move {
            let rows = self.repo.soft_delete(id, self.clock.now()).await?;
            if rows == 0 {
                return Err(self.resolve_missing(id).await);
            }

            info!(employee_id = %id, deleted_by = %caller.user_id, "Employee soft-deleted");
            Ok(())
        })
        .await
    }

    async fn load_live(&self, id: &str) -> Result<Employee, DomainError> {
        match self.repo.find_by_id(id).await? {
            Some(employee) => Ok(employee),
            None => Err(self.resolve_missing(id).await),
        }
    }

    async fn persist(&self, employee: &Employee) -> Result<(), DomainError> {
        if self.repo.update(employee).await? == 0 {
            return Err(self.resolve_missing(&employee.id).await);
        }
        Ok(())
    }

    /// Tell a deleted record apart from one that never existed.
    async fn resolve_missing(&self, id: &str) -> DomainError {
        match self.repo.lifecycle(id).await {
            Ok(Some(Lifecycle::Deleted { .. })) => DomainError::Deleted,
            Ok(_) => DomainError::NotFound,
            Err(e) => e,
        }
    }

    async fn store_photo(&self, employee_id: &str, upload: PhotoUpload) -> Result<PhotoRef, DomainError> {
        let mime = upload.mime();
        let key = upload.object_key(employee_id, &self.ids.new_id());
        let url = self
            .storage
            .upload(&key, mime.as_str(), upload.into_bytes())
            .await?;
        Ok(PhotoRef::new(url, mime))
    }
}

fn required_id(id: &str) -> Result<&str, DomainError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(DomainError::BadRequest("employee id is required".into()));
    }
    Ok(id)
}

fn require_privileged(caller: &Principal, action: &str) -> Result<(), DomainError> {
    if caller.role.is_privileged() {
        return Ok(());
    }
    warn!(caller = %caller.user_id, "Forbidden: {} requires a privileged role", action);
    Err(DomainError::Forbidden)
}

fn require_owner_or_privileged(caller: &Principal, target_id: &str) -> Result<(), DomainError> {
    if caller.role.is_privileged() || caller.user_id == target_id {
        return Ok(());
    }
    warn!(caller = %caller.user_id, target = %target_id, "Forbidden: staff may only act on own record");
    Err(DomainError::Forbidden)
}
