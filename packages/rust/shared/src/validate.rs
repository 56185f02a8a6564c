//! Request validation for the speedrun operations.
//!
//! Every input record implements [`ValidatedRequest`], which turns an
//! untrusted JSON body into a trimmed, length-checked value or a
//! [`ValidationErrors`] report with per-field messages. Generation logic
//! only ever sees validated inputs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::types::{
    AnalyzeDocsInput, ClipOutlineInput, GreetInput, SpeedrunPlanInput, SpeedrunWorkflowInput,
};

/// Maximum documentation URL length.
pub const MAX_URL_LEN: usize = 500;
/// Maximum product name length.
pub const MAX_PRODUCT_NAME_LEN: usize = 100;
/// Maximum length for `stack`, `mainWin` and `mainPain`.
pub const MAX_SHORT_TEXT_LEN: usize = 200;
/// Maximum doc summary length.
pub const MAX_DOC_SUMMARY_LEN: usize = 600;
/// Maximum length of a single key concept or focus area.
pub const MAX_CONCEPT_LEN: usize = 160;
/// Maximum length of a single plan step.
pub const MAX_PLAN_STEP_LEN: usize = 240;
/// Maximum number of entries in any list field.
pub const MAX_LIST_LEN: usize = 10;
/// Maximum greeting name length.
pub const MAX_NAME_LEN: usize = 100;

// ---------------------------------------------------------------------------
// ValidationErrors
// ---------------------------------------------------------------------------

/// Flattened validation report: form-level messages plus messages per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }

    /// Record a message against a field.
    pub fn add_field(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Record a message that applies to the whole request.
    pub fn add_form(&mut self, message: impl Into<String>) {
        self.form_errors.push(message.into());
    }

    /// Messages recorded for one field (empty if none).
    pub fn field(&self, field: &str) -> &[String] {
        self.field_errors
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts: Vec<String> = self.form_errors.clone();
        for (field, messages) in &self.field_errors {
            parts.push(format!("{field}: {}", messages.join(", ")));
        }
        write!(f, "{}", parts.join("; "))
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// An input record that can be built from an untrusted JSON body.
pub trait ValidatedRequest: Sized {
    /// Validate `body` and produce the trimmed input record.
    fn from_json(body: &Value) -> Result<Self, ValidationErrors>;
}

impl ValidatedRequest for AnalyzeDocsInput {
    fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut check = Checker::new(body)?;
        let url = check.url("url");
        match url {
            Some(url) if check.ok() => Ok(Self { url }),
            _ => Err(check.errors),
        }
    }
}

impl ValidatedRequest for SpeedrunPlanInput {
    fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut check = Checker::new(body)?;
        let product_name = check.required("productName", MAX_PRODUCT_NAME_LEN);
        let stack = check.required("stack", MAX_SHORT_TEXT_LEN);
        let doc_summary = check.optional("docSummary", MAX_DOC_SUMMARY_LEN);
        let key_concepts = check.optional_list("keyConcepts", "key concept", MAX_CONCEPT_LEN);
        let suggested_focus_areas =
            check.optional_list("suggestedFocusAreas", "focus area", MAX_CONCEPT_LEN);

        match (product_name, stack) {
            (Some(product_name), Some(stack)) if check.ok() => Ok(Self {
                product_name,
                stack,
                doc_summary,
                key_concepts,
                suggested_focus_areas,
            }),
            _ => Err(check.errors),
        }
    }
}

impl ValidatedRequest for ClipOutlineInput {
    fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut check = Checker::new(body)?;
        let product_name = check.required("productName", MAX_PRODUCT_NAME_LEN);
        let main_win = check.required("mainWin", MAX_SHORT_TEXT_LEN);
        let main_pain = check.required("mainPain", MAX_SHORT_TEXT_LEN);
        let plan_steps = check.optional_list("planSteps", "plan step", MAX_PLAN_STEP_LEN);
        let doc_summary = check.optional("docSummary", MAX_DOC_SUMMARY_LEN);

        match (product_name, main_win, main_pain) {
            (Some(product_name), Some(main_win), Some(main_pain)) if check.ok() => Ok(Self {
                product_name,
                main_win,
                main_pain,
                plan_steps,
                doc_summary,
            }),
            _ => Err(check.errors),
        }
    }
}

impl ValidatedRequest for SpeedrunWorkflowInput {
    fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut check = Checker::new(body)?;
        let url = check.url("url");
        let product_name = check.required("productName", MAX_PRODUCT_NAME_LEN);
        let stack = check.required("stack", MAX_SHORT_TEXT_LEN);
        let main_win = check.required("mainWin", MAX_SHORT_TEXT_LEN);
        let main_pain = check.required("mainPain", MAX_SHORT_TEXT_LEN);

        match (url, product_name, stack, main_win, main_pain) {
            (Some(url), Some(product_name), Some(stack), Some(main_win), Some(main_pain))
                if check.ok() =>
            {
                Ok(Self {
                    url,
                    product_name,
                    stack,
                    main_win,
                    main_pain,
                })
            }
            _ => Err(check.errors),
        }
    }
}

impl ValidatedRequest for GreetInput {
    fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut check = Checker::new(body)?;
        let name = check.required("name", MAX_NAME_LEN);
        match name {
            Some(name) if check.ok() => Ok(Self { name }),
            _ => Err(check.errors),
        }
    }
}

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

struct Checker<'a> {
    fields: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> Checker<'a> {
    fn new(body: &'a Value) -> Result<Self, ValidationErrors> {
        match body.as_object() {
            Some(fields) => Ok(Self {
                fields,
                errors: ValidationErrors::default(),
            }),
            None => {
                let mut errors = ValidationErrors::default();
                errors.add_form(format!("Expected object, received {}", type_name(body)));
                Err(errors)
            }
        }
    }

    fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Null is treated the same as an absent key.
    fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    fn required(&mut self, field: &str, max: usize) -> Option<String> {
        match self.get(field) {
            None => {
                self.errors.add_field(field, "Required");
                None
            }
            Some(value) => self.text(field, field, value, max),
        }
    }

    fn optional(&mut self, field: &str, max: usize) -> Option<String> {
        let value = self.get(field)?;
        self.text(field, field, value, max)
    }

    fn optional_list(&mut self, field: &str, item_label: &str, item_max: usize) -> Option<Vec<String>> {
        let value = self.get(field)?;
        let Some(items) = value.as_array() else {
            self.errors.add_field(
                field,
                format!("Expected array, received {}", type_name(value)),
            );
            return None;
        };

        let before = self.error_count();
        let cleaned: Vec<String> = items
            .iter()
            .filter_map(|item| self.text(field, item_label, item, item_max))
            .collect();

        if items.is_empty() {
            self.errors
                .add_field(field, format!("{field} must include at least one entry"));
        }
        if items.len() > MAX_LIST_LEN {
            self.errors.add_field(
                field,
                format!("{field} must include {MAX_LIST_LEN} entries or fewer"),
            );
        }

        (self.error_count() == before).then_some(cleaned)
    }

    fn url(&mut self, field: &str) -> Option<String> {
        let Some(value) = self.get(field) else {
            self.errors.add_field(field, "Required");
            return None;
        };
        let Some(raw) = value.as_str() else {
            self.errors.add_field(
                field,
                format!("Expected string, received {}", type_name(value)),
            );
            return None;
        };

        let trimmed = raw.trim();
        let mut valid = true;
        if Url::parse(trimmed).is_err() {
            self.errors.add_field(field, "Provide a valid documentation URL");
            valid = false;
        }
        if trimmed.chars().count() > MAX_URL_LEN {
            self.errors.add_field(
                field,
                format!("URL must be {MAX_URL_LEN} characters or fewer"),
            );
            valid = false;
        }
        valid.then(|| trimmed.to_string())
    }

    fn text(&mut self, field: &str, label: &str, value: &Value, max: usize) -> Option<String> {
        let Some(raw) = value.as_str() else {
            self.errors.add_field(
                field,
                format!("Expected string, received {}", type_name(value)),
            );
            return None;
        };

        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if len == 0 {
            self.errors.add_field(field, format!("{label} is required"));
            return None;
        }
        if len > max {
            self.errors
                .add_field(field, format!("{label} must be {max} characters or fewer"));
            return None;
        }
        Some(trimmed.to_string())
    }

    fn error_count(&self) -> usize {
        self.errors.field_errors.values().map(Vec::len).sum()
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
