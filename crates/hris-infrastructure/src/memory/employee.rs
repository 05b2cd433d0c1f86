use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use hris_core::domain::{Employee, Lifecycle};
use hris_core::error::DomainError;
use hris_core::repositories::EmployeeRepository;

#[derive(Default)]
pub struct InMemoryEmployeeRepository {
    rows: RwLock<HashMap<String, Employee>>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing the uniqueness check.
    pub async fn insert(&self, employee: Employee) {
        self.rows.write().await.insert(employee.id.clone(), employee);
    }
}

fn email_taken(rows: &HashMap<String, Employee>, email: &str, except_id: &str) -> bool {
    rows.values().any(|e| {
        !e.is_deleted() && e.id != except_id && e.email.eq_ignore_ascii_case(email)
    })
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn create(&self, employee: &Employee) -> Result<(), DomainError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&employee.id) {
            return Err(DomainError::DuplicateId(employee.id.clone()));
        }
        if email_taken(&rows, &employee.email, &employee.id) {
            return Err(DomainError::Duplicate(employee.email.clone()));
        }
        rows.insert(employee.id.clone(), employee.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Employee>, DomainError> {
        let rows = self.rows.read().await;
        Ok(rows.get(id).filter(|e| !e.is_deleted()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, DomainError> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .find(|e| !e.is_deleted() && e.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Employee>, DomainError> {
        let rows = self.rows.read().await;
        let mut live: Vec<Employee> = rows.values().filter(|e| !e.is_deleted()).cloned().collect();
        live.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(live)
    }

    async fn lifecycle(&self, id: &str) -> Result<Option<Lifecycle>, DomainError> {
        Ok(self.rows.read().await.get(id).map(|e| e.lifecycle))
    }

    async fn update(&self, employee: &Employee) -> Result<u64, DomainError> {
        let mut rows = self.rows.write().await;
        match rows.get(&employee.id) {
            Some(current) if !current.is_deleted() => {}
            _ => return Ok(0),
        }
        if email_taken(&rows, &employee.email, &employee.id) {
            return Err(DomainError::Duplicate(employee.email.clone()));
        }
        // Lifecycle and creation stamp are owned by the store
        let mut stored = employee.clone();
        if let Some(current) = rows.get(&employee.id) {
            stored.lifecycle = current.lifecycle;
            stored.created_at = current.created_at;
        }
        rows.insert(employee.id.clone(), stored);
        Ok(1)
    }

    async fn soft_delete(&self, id: &str, at: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut rows = self.rows.write().await;
        match rows.remove(id) {
            Some(current) if !current.is_deleted() => {
                rows.insert(id.to_string(), current.deleted(at));
                Ok(1)
            }
            Some(current) => {
                rows.insert(id.to_string(), current);
                Ok(0)
            }
            None => Ok(0),
        }
    }
}
