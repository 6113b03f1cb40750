//! Normalized profile of the company being analyzed.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Caller input rejected before any analysis work starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("company name is required")]
    MissingName,
}

/// Free-form fields carried through to the report for display only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuxiliaryFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_range: Option<Value>,
}

/// The entity under analysis. Built once per request and never mutated.
///
/// `name` is guaranteed non-empty and trimmed; every downstream matcher relies
/// on that.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityContext {
    #[serde(rename = "companyName")]
    name: String,
    #[serde(rename = "ceo", skip_serializing_if = "Option::is_none")]
    leadership: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    is_public: bool,
    is_startup: bool,
    #[serde(flatten)]
    auxiliary: AuxiliaryFields,
}

impl EntityContext {
    /// Build a context from the raw request mapping.
    ///
    /// Recognised keys: `companyName`, `ceo`, `sector`, `country`, `isPublic`,
    /// `isStartup`, and the display-only `revenue`, `employees`, `year`,
    /// `ticker`, `links`, `fundingRange`. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingName`] when `companyName` is absent,
    /// not a string, or blank after trimming.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, ValidationError> {
        let name = text_field(fields, "companyName").ok_or(ValidationError::MissingName)?;

        Ok(Self {
            name,
            leadership: text_field(fields, "ceo"),
            sector: text_field(fields, "sector"),
            country: text_field(fields, "country"),
            is_public: flag_field(fields, "isPublic"),
            is_startup: flag_field(fields, "isStartup"),
            auxiliary: AuxiliaryFields {
                revenue: passthrough(fields, "revenue"),
                employees: passthrough(fields, "employees"),
                year: passthrough(fields, "year"),
                ticker: passthrough(fields, "ticker"),
                links: passthrough(fields, "links"),
                funding_range: passthrough(fields, "fundingRange"),
            },
        })
    }

    /// Convenience constructor for callers that already hold typed values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingName`] when `name` is blank.
    pub fn new(
        name: &str,
        leadership: Option<&str>,
        sector: Option<&str>,
        country: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let name = non_blank(name).ok_or(ValidationError::MissingName)?;
        Ok(Self {
            name,
            leadership: leadership.and_then(non_blank),
            sector: sector.and_then(non_blank),
            country: country.and_then(non_blank),
            is_public: false,
            is_startup: false,
            auxiliary: AuxiliaryFields::default(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn leadership(&self) -> Option<&str> {
        self.leadership.as_deref()
    }

    #[must_use]
    pub fn sector(&self) -> Option<&str> {
        self.sector.as_deref()
    }

    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    #[must_use]
    pub fn is_public(&self) -> bool {
        self.is_public
    }

    #[must_use]
    pub fn is_startup(&self) -> bool {
        self.is_startup
    }

    #[must_use]
    pub fn auxiliary(&self) -> &AuxiliaryFields {
        &self.auxiliary
    }

    /// Lower-cased name used for case-insensitive matching.
    #[must_use]
    pub fn name_lower(&self) -> String {
        self.name.to_lowercase()
    }

    /// Lower-cased leadership name, if one was supplied.
    #[must_use]
    pub fn leadership_lower(&self) -> Option<String> {
        self.leadership.as_ref().map(|l| l.to_lowercase())
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).and_then(non_blank)
}

fn flag_field(fields: &Map<String, Value>, key: &str) -> bool {
    match fields.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1"),
        Some(Value::Number(n)) => n.as_i64().is_some_and(|v| v != 0),
        _ => false,
    }
}

fn passthrough(fields: &Map<String, Value>, key: &str) -> Option<Value> {
    match fields.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(v) => Some(v.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn builds_context_from_request_keys() {
        let ctx = EntityContext::from_fields(&fields(json!({
            "companyName": "  Acme Corp ",
            "ceo": "Jane Doe",
            "sector": "Technology",
            "country": "US",
            "isPublic": true,
            "isStartup": "false",
            "revenue": 1_200_000,
            "ticker": "ACME",
            "fundingRange": ""
        })))
        .expect("valid context");

        assert_eq!(ctx.name(), "Acme Corp");
        assert_eq!(ctx.leadership(), Some("Jane Doe"));
        assert_eq!(ctx.sector(), Some("Technology"));
        assert_eq!(ctx.country(), Some("US"));
        assert!(ctx.is_public());
        assert!(!ctx.is_startup());
        assert_eq!(ctx.auxiliary().revenue, Some(json!(1_200_000)));
        assert_eq!(ctx.auxiliary().ticker, Some(json!("ACME")));
        assert!(ctx.auxiliary().funding_range.is_none());
    }

    #[test]
    fn missing_name_is_rejected() {
        let err = EntityContext::from_fields(&fields(json!({ "ceo": "Jane Doe" }))).unwrap_err();
        assert_eq!(err, ValidationError::MissingName);
    }

    #[test]
    fn whitespace_name_is_rejected() {
        let err =
            EntityContext::from_fields(&fields(json!({ "companyName": "   \t" }))).unwrap_err();
        assert_eq!(err, ValidationError::MissingName);
    }

    #[test]
    fn non_string_name_is_rejected() {
        let err = EntityContext::from_fields(&fields(json!({ "companyName": 42 }))).unwrap_err();
        assert_eq!(err, ValidationError::MissingName);
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let ctx = EntityContext::from_fields(&fields(json!({
            "companyName": "Acme",
            "ceo": " ",
            "sector": ""
        })))
        .unwrap();
        assert!(ctx.leadership().is_none());
        assert!(ctx.sector().is_none());
        assert!(ctx.leadership_lower().is_none());
    }

    #[test]
    fn lowercase_accessors() {
        let ctx = EntityContext::new("ACME", Some("Jane DOE"), None, None).unwrap();
        assert_eq!(ctx.name_lower(), "acme");
        assert_eq!(ctx.leadership_lower().as_deref(), Some("jane doe"));
    }

    #[test]
    fn serializes_with_display_keys() {
        let ctx = EntityContext::from_fields(&fields(json!({
            "companyName": "Acme",
            "ceo": "Jane Doe",
            "employees": "50-100"
        })))
        .unwrap();
        let value = serde_json::to_value(&ctx).unwrap();
        assert_eq!(value["companyName"], "Acme");
        assert_eq!(value["ceo"], "Jane Doe");
        assert_eq!(value["employees"], "50-100");
        assert_eq!(value["isPublic"], false);
        assert!(value.get("sector").is_none());
    }
}
