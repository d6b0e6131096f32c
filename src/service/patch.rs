//! JSON Patch (RFC 6902) applied to the JSON form of an update transfer object.
//!
//! The first segment of every path must name a field of the target shape; it is
//! matched case-insensitively and rewritten to the canonical field name. Any failing
//! operation aborts the whole document and the caller's value is left untouched.

use crate::error::{AppError, FieldError, FieldErrors};
use crate::service::validation::{RequestValidator, Validate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test { path: String, value: Value },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatchDocument(pub Vec<PatchOperation>);

impl PatchDocument {
    /// Parse a request body; anything but an array of operations is a bad request.
    pub fn from_value(body: Value) -> Result<Self, AppError> {
        serde_json::from_value(body)
            .map(PatchDocument)
            .map_err(|e| AppError::BadRequest(format!("invalid patch document: {}", e)))
    }

    /// Apply all operations to a copy of `target`; `target` changes only if every operation succeeds.
    pub fn apply(&self, target: &mut Value, fields: &[&str]) -> Result<(), FieldErrors> {
        let mut doc = target.clone();
        for op in &self.0 {
            apply_one(&mut doc, op, fields)?;
        }
        *target = doc;
        Ok(())
    }

    /// Map `current` to JSON, apply the patch, re-validate against `T::RULES` and deserialize.
    pub fn apply_to_dto<T>(&self, current: &T) -> Result<T, AppError>
    where
        T: Serialize + DeserializeOwned + Validate,
    {
        let mut value = serde_json::to_value(current)
            .map_err(|e| AppError::BadRequest(format!("cannot patch resource: {}", e)))?;
        self.apply(&mut value, &T::field_names())?;
        RequestValidator::parse(value)
    }
}

fn apply_one(doc: &mut Value, op: &PatchOperation, fields: &[&str]) -> Result<(), FieldError> {
    match op {
        PatchOperation::Add { path, value } => {
            let tokens = parse_path(path, fields)?;
            add(doc, &tokens, value.clone()).map_err(|m| FieldError::new(path, m))
        }
        PatchOperation::Remove { path } => {
            let tokens = parse_path(path, fields)?;
            remove(doc, &tokens).map(drop).map_err(|m| FieldError::new(path, m))
        }
        PatchOperation::Replace { path, value } => {
            let tokens = parse_path(path, fields)?;
            let slot = get_mut(doc, &tokens).ok_or_else(|| FieldError::new(path, "path does not exist"))?;
            *slot = value.clone();
            Ok(())
        }
        PatchOperation::Move { from, path } => {
            if path.starts_with(&format!("{}/", from)) {
                return Err(FieldError::new(path, "cannot move a value into one of its children"));
            }
            let from_tokens = parse_path(from, fields)?;
            let tokens = parse_path(path, fields)?;
            let value = remove(doc, &from_tokens).map_err(|m| FieldError::new(from, m))?;
            add(doc, &tokens, value).map_err(|m| FieldError::new(path, m))
        }
        PatchOperation::Copy { from, path } => {
            let from_tokens = parse_path(from, fields)?;
            let tokens = parse_path(path, fields)?;
            let value = get_mut(doc, &from_tokens)
                .map(|v| v.clone())
                .ok_or_else(|| FieldError::new(from, "path does not exist"))?;
            add(doc, &tokens, value).map_err(|m| FieldError::new(path, m))
        }
        PatchOperation::Test { path, value } => {
            let tokens = parse_path(path, fields)?;
            match get_mut(doc, &tokens) {
                Some(current) if *current == *value => Ok(()),
                _ => Err(FieldError::new(path, "test failed")),
            }
        }
    }
}

/// Split a JSON pointer into unescaped tokens, canonicalizing the first one against `fields`.
fn parse_path(path: &str, fields: &[&str]) -> Result<Vec<String>, FieldError> {
    let Some(rest) = path.strip_prefix('/') else {
        return Err(FieldError::new(path, "path must start with '/'"));
    };
    let mut tokens: Vec<String> = rest.split('/').map(|t| t.replace("~1", "/").replace("~0", "~")).collect();
    let field = fields
        .iter()
        .find(|f| f.eq_ignore_ascii_case(&tokens[0]))
        .ok_or_else(|| FieldError::new(path, "unknown field"))?;
    tokens[0] = field.to_string();
    Ok(tokens)
}

fn get_mut<'a>(doc: &'a mut Value, tokens: &[String]) -> Option<&'a mut Value> {
    tokens.iter().try_fold(doc, |cur, t| match cur {
        Value::Object(map) => map.get_mut(t),
        Value::Array(arr) => t.parse::<usize>().ok().and_then(move |i| arr.get_mut(i)),
        _ => None,
    })
}

fn split_last(tokens: &[String]) -> Result<(&[String], &String), &'static str> {
    tokens
        .split_last()
        .map(|(last, parent)| (parent, last))
        .ok_or("cannot target the whole document")
}

fn add(doc: &mut Value, tokens: &[String], value: Value) -> Result<(), &'static str> {
    let (parent, last) = split_last(tokens)?;
    match get_mut(doc, parent) {
        Some(Value::Object(map)) => {
            map.insert(last.clone(), value);
            Ok(())
        }
        Some(Value::Array(arr)) => {
            if last == "-" {
                arr.push(value);
                return Ok(());
            }
            match last.parse::<usize>() {
                Ok(i) if i <= arr.len() => {
                    arr.insert(i, value);
                    Ok(())
                }
                _ => Err("array index out of bounds"),
            }
        }
        Some(_) => Err("parent is not a container"),
        None => Err("path does not exist"),
    }
}

fn remove(doc: &mut Value, tokens: &[String]) -> Result<Value, &'static str> {
    let (parent, last) = split_last(tokens)?;
    match get_mut(doc, parent) {
        Some(Value::Object(map)) => map.remove(last).ok_or("path does not exist"),
        Some(Value::Array(arr)) => match last.parse::<usize>() {
            Ok(i) if i < arr.len() => Ok(arr.remove(i)),
            _ => Err("array index out of bounds"),
        },
        _ => Err("path does not exist"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELDS: &[&str] = &["logradouro", "numero"];

    fn doc(ops: Value) -> PatchDocument {
        PatchDocument::from_value(ops).unwrap()
    }

    #[test]
    fn replace_and_case_insensitive_path() {
        let mut v = json!({"logradouro": "Rua A", "numero": 1});
        doc(json!([{"op": "replace", "path": "/Numero", "value": 42}]))
            .apply(&mut v, FIELDS)
            .unwrap();
        assert_eq!(v, json!({"logradouro": "Rua A", "numero": 42}));
    }

    #[test]
    fn remove_then_add() {
        let mut v = json!({"logradouro": "Rua A", "numero": 1});
        doc(json!([
            {"op": "remove", "path": "/logradouro"},
            {"op": "add", "path": "/logradouro", "value": "Rua B"}
        ]))
        .apply(&mut v, FIELDS)
        .unwrap();
        assert_eq!(v["logradouro"], "Rua B");
    }

    #[test]
    fn unknown_field_is_rejected_and_target_untouched() {
        let mut v = json!({"logradouro": "Rua A", "numero": 1});
        let err = doc(json!([
            {"op": "replace", "path": "/numero", "value": 9},
            {"op": "replace", "path": "/cidade", "value": "X"}
        ]))
        .apply(&mut v, FIELDS)
        .unwrap_err();
        assert_eq!(err.0[0].field, "/cidade");
        assert_eq!(err.0[0].message, "unknown field");
        assert_eq!(v["numero"], 1);
    }

    #[test]
    fn failing_test_op_aborts() {
        let mut v = json!({"logradouro": "Rua A", "numero": 1});
        let err = doc(json!([
            {"op": "test", "path": "/numero", "value": 2},
            {"op": "replace", "path": "/numero", "value": 3}
        ]))
        .apply(&mut v, FIELDS)
        .unwrap_err();
        assert_eq!(err.0[0].message, "test failed");
        assert_eq!(v["numero"], 1);
    }

    #[test]
    fn move_and_copy_between_fields() {
        let fields = &["titulo", "genero"];
        let mut v = json!({"titulo": "Alien", "genero": null});
        doc(json!([{"op": "copy", "from": "/titulo", "path": "/genero"}]))
            .apply(&mut v, fields)
            .unwrap();
        assert_eq!(v, json!({"titulo": "Alien", "genero": "Alien"}));
        doc(json!([{"op": "move", "from": "/genero", "path": "/titulo"}]))
            .apply(&mut v, fields)
            .unwrap();
        assert_eq!(v, json!({"titulo": "Alien"}));
    }

    #[test]
    fn replace_missing_location_fails() {
        let mut v = json!({"numero": 1});
        let err = doc(json!([{"op": "replace", "path": "/logradouro", "value": "x"}]))
            .apply(&mut v, FIELDS)
            .unwrap_err();
        assert_eq!(err.0[0].message, "path does not exist");
    }

    #[test]
    fn malformed_document_is_bad_request() {
        assert!(matches!(
            PatchDocument::from_value(json!({"op": "replace"})),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            PatchDocument::from_value(json!([{"op": "upsert", "path": "/a"}])),
            Err(AppError::BadRequest(_))
        ));
    }
}
