//! Request validation from per-DTO rule tables.

use crate::error::{AppError, FieldError, FieldErrors};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Wire format of date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Must fit in a 32-bit signed integer.
    Integer,
    /// `YYYY-MM-DD` string.
    Date,
}

/// Constraints on one field of a request body, keyed by its wire (camelCase) name.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Message reported when the field is absent, null, or a blank string.
    pub required: Option<&'static str>,
    pub max_length: Option<usize>,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
}

impl FieldRule {
    const fn of(name: &'static str, kind: FieldKind) -> Self {
        FieldRule {
            name,
            kind,
            required: None,
            max_length: None,
            minimum: None,
            maximum: None,
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Self::of(name, FieldKind::Text)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::of(name, FieldKind::Integer)
    }

    pub const fn date(name: &'static str) -> Self {
        Self::of(name, FieldKind::Date)
    }

    pub const fn required(mut self, message: &'static str) -> Self {
        self.required = Some(message);
        self
    }

    pub const fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub const fn range(mut self, min: i64, max: i64) -> Self {
        self.minimum = Some(min);
        self.maximum = Some(max);
        self
    }

    pub const fn minimum(mut self, min: i64) -> Self {
        self.minimum = Some(min);
        self
    }
}

/// A transfer object with declared field constraints.
pub trait Validate {
    const RULES: &'static [FieldRule];

    /// Wire names of every field of the shape.
    fn field_names() -> Vec<&'static str> {
        Self::RULES.iter().map(|r| r.name).collect()
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Check `body` against `rules`, collecting every violation. Unknown keys are ignored.
    pub fn validate(body: &Value, rules: &[FieldRule]) -> Result<(), FieldErrors> {
        let Some(obj) = body.as_object() else {
            return Err(FieldError::new("body", "body must be a JSON object").into());
        };
        let mut errors = Vec::new();
        for rule in rules {
            match obj.get(rule.name) {
                None | Some(Value::Null) => {
                    if let Some(msg) = rule.required {
                        errors.push(FieldError::new(rule.name, msg));
                    }
                }
                Some(v) => validate_field(rule, v, &mut errors),
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(FieldErrors(errors))
        }
    }

    /// Validate against `T::RULES`, then deserialize.
    pub fn parse<T>(body: Value) -> Result<T, AppError>
    where
        T: Validate + DeserializeOwned,
    {
        Self::validate(&body, T::RULES)?;
        serde_json::from_value(body)
            .map_err(|e| AppError::Validation(FieldError::new("body", e.to_string()).into()))
    }
}

fn validate_field(rule: &FieldRule, v: &Value, errors: &mut Vec<FieldError>) {
    let col = rule.name;
    match rule.kind {
        FieldKind::Text => {
            let Some(s) = v.as_str() else {
                errors.push(FieldError::new(col, format!("{} must be a string", col)));
                return;
            };
            if s.trim().is_empty() {
                if let Some(msg) = rule.required {
                    errors.push(FieldError::new(col, msg));
                    return;
                }
            }
            if let Some(max) = rule.max_length {
                if s.chars().count() > max {
                    errors.push(FieldError::new(
                        col,
                        format!("{} must be at most {} characters", col, max),
                    ));
                }
            }
        }
        FieldKind::Integer => {
            let Some(n) = v.as_i64().filter(|n| i32::try_from(*n).is_ok()) else {
                errors.push(FieldError::new(col, format!("{} must be an integer", col)));
                return;
            };
            if let Some(min) = rule.minimum {
                if n < min {
                    errors.push(FieldError::new(col, format!("{} must be at least {}", col, min)));
                }
            }
            if let Some(max) = rule.maximum {
                if n > max {
                    errors.push(FieldError::new(col, format!("{} must be at most {}", col, max)));
                }
            }
        }
        FieldKind::Date => {
            let valid = v
                .as_str()
                .map(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).is_ok())
                .unwrap_or(false);
            if !valid {
                errors.push(FieldError::new(col, format!("{} must be a date (YYYY-MM-DD)", col)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RULES: &[FieldRule] = &[
        FieldRule::text("nome").required("O nome é obrigatório").max_length(5),
        FieldRule::integer("duracao").required("A duração é obrigatória").range(70, 600),
        FieldRule::date("dataLancamento"),
    ];

    fn fields(err: FieldErrors) -> Vec<String> {
        err.0.into_iter().map(|e| e.field).collect()
    }

    #[test]
    fn accepts_valid_body_and_ignores_unknown_keys() {
        let body = json!({"nome": "abc", "duracao": 90, "extra": true});
        assert!(RequestValidator::validate(&body, RULES).is_ok());
    }

    #[test]
    fn reports_every_missing_required_field() {
        let err = RequestValidator::validate(&json!({}), RULES).unwrap_err();
        assert_eq!(fields(err.clone()), vec!["nome", "duracao"]);
        assert_eq!(err.0[0].message, "O nome é obrigatório");
    }

    #[test]
    fn null_and_blank_count_as_missing() {
        let err = RequestValidator::validate(&json!({"nome": "  ", "duracao": null}), RULES).unwrap_err();
        assert_eq!(fields(err), vec!["nome", "duracao"]);
    }

    #[test]
    fn type_length_and_range_violations() {
        let body = json!({"nome": "toolong", "duracao": 20, "dataLancamento": "31/12/2020"});
        let err = RequestValidator::validate(&body, RULES).unwrap_err();
        let messages: Vec<String> = err.0.into_iter().map(|e| e.message).collect();
        assert_eq!(
            messages,
            vec![
                "nome must be at most 5 characters",
                "duracao must be at least 70",
                "dataLancamento must be a date (YYYY-MM-DD)",
            ]
        );
    }

    #[test]
    fn integers_must_fit_i32() {
        let err = RequestValidator::validate(&json!({"nome": "a", "duracao": 1_i64 << 40}), RULES).unwrap_err();
        assert_eq!(err.0[0].message, "duracao must be an integer");
        let err = RequestValidator::validate(&json!({"nome": "a", "duracao": "90"}), RULES).unwrap_err();
        assert_eq!(err.0[0].message, "duracao must be an integer");
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = RequestValidator::validate(&json!([1, 2]), RULES).unwrap_err();
        assert_eq!(fields(err), vec!["body"]);
    }
}
