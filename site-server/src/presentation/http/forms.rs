use std::collections::BTreeMap;

use validator::ValidationErrors;

use crate::domain::error::DomainError;

/// Raw submitted form values keyed by field name.
pub(crate) type FormValues = BTreeMap<String, String>;

/// Field-level messages shown next to the offending inputs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub(crate) fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    /// Field errors for a domain validation failure; `None` for every other error.
    pub(crate) fn from_domain(err: &DomainError) -> Option<Self> {
        match err {
            DomainError::Validation { field, message } => Some(Self::single(field, message)),
            _ => None,
        }
    }

    pub(crate) fn push(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub(crate) fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = Self::default();
        for (field, field_errors) in errors.field_errors() {
            for err in field_errors.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                out.push(&field, &message);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use validator::Validate;

    use super::FieldErrors;
    use crate::domain::error::DomainError;

    #[derive(Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "required"))]
        name: String,
    }

    #[test]
    fn collects_validator_messages_per_field() {
        let errors = Sample {
            name: String::new(),
        }
        .validate()
        .expect_err("empty name must fail");

        let fields = FieldErrors::from(&errors);
        assert_eq!(fields.get("name"), ["required".to_string()]);
        assert!(fields.get("other").is_empty());
    }

    #[test]
    fn only_validation_errors_become_field_errors() {
        let err = DomainError::Validation {
            field: "title",
            message: "must be 1..120 chars",
        };
        let fields = FieldErrors::from_domain(&err).expect("validation maps");
        assert_eq!(fields.get("title").len(), 1);

        assert!(FieldErrors::from_domain(&DomainError::NotFound("x".into())).is_none());
    }
}
