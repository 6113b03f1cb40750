//! Startup profile storage and investor search.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::entity::EntityContext;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("company store unavailable: {0}")]
    Unavailable(String),
}

/// Exact-match criteria for investment opportunities. Unset criteria match
/// every company.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpportunityFilter {
    pub sector: Option<String>,
    pub funding_range: Option<String>,
    pub employees: Option<String>,
    pub country: Option<String>,
}

impl OpportunityFilter {
    /// Read `sector`, `fundingRange`, `employees` and `country` from a request
    /// mapping. Null, blank, `0` and `false` values leave a criterion unset.
    #[must_use]
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            sector: criterion(fields.get("sector")),
            funding_range: criterion(fields.get("fundingRange")),
            employees: criterion(fields.get("employees")),
            country: criterion(fields.get("country")),
        }
    }

    /// Whether `company` satisfies every set criterion.
    ///
    /// Values compare by their trimmed text, so `50` and `"50"` are equal.
    #[must_use]
    pub fn matches(&self, company: &EntityContext) -> bool {
        let aux = company.auxiliary();
        field_matches(self.sector.as_deref(), company.sector())
            && field_matches(self.country.as_deref(), company.country())
            && field_matches(
                self.funding_range.as_deref(),
                aux.funding_range.as_ref().and_then(value_text).as_deref(),
            )
            && field_matches(
                self.employees.as_deref(),
                aux.employees.as_ref().and_then(value_text).as_deref(),
            )
    }
}

fn criterion(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Bool(false) => None,
        Value::Number(n) if n.as_i64() == Some(0) => None,
        other => value_text(other),
    }
}

fn value_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn field_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    wanted.is_none_or(|w| actual == Some(w))
}

/// Persistence for startup profiles submitted for analysis.
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// Store `company` unless one with the same name is already stored.
    /// Returns whether it was inserted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backing store cannot be reached.
    async fn insert_if_absent(&self, company: &EntityContext) -> Result<bool, StoreError>;

    /// Every stored company matching `filter`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backing store cannot be reached.
    async fn search(&self, filter: &OpportunityFilter) -> Result<Vec<EntityContext>, StoreError>;
}

/// Process-local [`CompanyStore`]. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryCompanyStore {
    companies: RwLock<Vec<EntityContext>>,
}

impl InMemoryCompanyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.companies.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.companies.read().await.is_empty()
    }
}

#[async_trait]
impl CompanyStore for InMemoryCompanyStore {
    async fn insert_if_absent(&self, company: &EntityContext) -> Result<bool, StoreError> {
        let mut companies = self.companies.write().await;
        if companies.iter().any(|c| c.name() == company.name()) {
            return Ok(false);
        }
        companies.push(company.clone());
        Ok(true)
    }

    async fn search(&self, filter: &OpportunityFilter) -> Result<Vec<EntityContext>, StoreError> {
        let companies = self.companies.read().await;
        Ok(companies
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }
}
