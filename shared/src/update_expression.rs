//! Builds `SET` update expressions without ever inlining attribute names.
//!
//! DynamoDB reserves many common words (`name`, `status`, `date`, ...), so each
//! field goes through a name placeholder (`#f0`) and a value placeholder (`:v0`).
//! Fields are rendered sorted by name, so the same input always produces the
//! same expression.

use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::{BTreeMap, HashMap};

/// One `#name = :value` clause and what its placeholders stand for.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name_placeholder: String,
    pub value_placeholder: String,
    pub field: String,
    pub value: AttributeValue,
}

/// A rendered update: expression string plus its placeholder bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    assignments: Vec<Assignment>,
}

impl UpdateExpression {
    pub fn expression(&self) -> String {
        let clauses: Vec<String> = self
            .assignments
            .iter()
            .map(|a| format!("{} = {}", a.name_placeholder, a.value_placeholder))
            .collect();
        format!("SET {}", clauses.join(", "))
    }

    pub fn attribute_names(&self) -> HashMap<String, String> {
        self.assignments
            .iter()
            .map(|a| (a.name_placeholder.clone(), a.field.clone()))
            .collect()
    }

    pub fn attribute_values(&self) -> HashMap<String, AttributeValue> {
        self.assignments
            .iter()
            .map(|a| (a.value_placeholder.clone(), a.value.clone()))
            .collect()
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }
}

#[derive(Debug, Default)]
pub struct UpdateExpressionBuilder {
    fields: BTreeMap<String, AttributeValue>,
}

impl UpdateExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `field = value`. Setting the same field twice keeps the last value.
    pub fn set(mut self, field: impl Into<String>, value: AttributeValue) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    /// Returns `None` when no field was registered; an empty `SET` is not a valid update.
    pub fn build(self) -> Option<UpdateExpression> {
        if self.fields.is_empty() {
            return None;
        }

        let assignments = self
            .fields
            .into_iter()
            .enumerate()
            .map(|(i, (field, value))| Assignment {
                name_placeholder: format!("#f{i}"),
                value_placeholder: format!(":v{i}"),
                field,
                value,
            })
            .collect();

        Some(UpdateExpression { assignments })
    }
}
