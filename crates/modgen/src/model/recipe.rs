use serde_json::Value;
use thiserror::Error;

use crate::ids::ContentId;

const VANILLA_RECIPE_TYPES: &[&str] = &[
    "blasting",
    "campfire_cooking",
    "crafting_decorated_pot",
    "crafting_shaped",
    "crafting_shapeless",
    "crafting_transmute",
    "smelting",
    "smithing_transform",
    "smithing_trim",
    "smoking",
    "stonecutting",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeError {
    #[error("recipe is not valid json: {0}")]
    Json(String),
    #[error("recipe json must be an object")]
    NotAnObject,
    #[error("recipe json must contain a 'type' field")]
    MissingType,
    #[error("recipe 'type' field must be a non-empty string")]
    InvalidType,
}

/// A recipe document. Text given by the caller is written back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    data: Value,
    text: String,
}

impl Recipe {
    pub fn from_json(text: &str) -> Result<Self, RecipeError> {
        let text = text.trim();
        let data = serde_json::from_str::<Value>(text)
            .map_err(|error| RecipeError::Json(error.to_string()))?;
        check_type(&data)?;
        Ok(Self {
            data,
            text: text.to_string(),
        })
    }

    pub fn from_value(data: Value) -> Result<Self, RecipeError> {
        check_type(&data)?;
        let text = serde_json::to_string_pretty(&data)
            .map_err(|error| RecipeError::Json(error.to_string()))?;
        Ok(Self { data, text })
    }

    pub fn recipe_type(&self) -> &str {
        self.data
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// `result` as a plain string, or the `id`/`item` field of a result object.
    pub fn result_id(&self) -> Option<&str> {
        match self.data.get("result")? {
            Value::String(id) => Some(id),
            Value::Object(result) => result
                .get("id")
                .and_then(Value::as_str)
                .or_else(|| result.get("item").and_then(Value::as_str)),
            _ => None,
        }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Checks applied when the owning mod is compiled.
    pub(crate) fn check_compilable(&self) -> Result<(), String> {
        let recipe_type = self.recipe_type();
        let (namespace, path) = recipe_type.split_once(':').unwrap_or(("minecraft", recipe_type));
        if namespace == "minecraft" {
            if !VANILLA_RECIPE_TYPES.contains(&path) {
                return Err(format!("unrecognized recipe type '{recipe_type}'"));
            }
        } else if ContentId::new(namespace, path).is_err() {
            return Err(format!("recipe type '{recipe_type}' is not a valid identifier"));
        }

        if self.data.get("result").is_some() && self.result_id().is_none() {
            return Err("result has no resolvable item id".to_string());
        }
        Ok(())
    }
}

fn check_type(data: &Value) -> Result<(), RecipeError> {
    let object = data.as_object().ok_or(RecipeError::NotAnObject)?;
    match object.get("type") {
        None => Err(RecipeError::MissingType),
        Some(Value::String(kind)) if !kind.trim().is_empty() => Ok(()),
        Some(_) => Err(RecipeError::InvalidType),
    }
}
