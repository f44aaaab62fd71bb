use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Body of `GET /memes/{key}/info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemeInfo {
    pub key: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<Value>,
    pub params: MemeParamSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemeParamSchema {
    pub min_images: usize,
    pub max_images: usize,
    pub min_texts: usize,
    pub max_texts: usize,
    #[serde(default)]
    pub default_texts: Vec<String>,
    #[serde(default)]
    pub args: Vec<MemeArg>,
}

/// A named optional argument. `kind` is advisory; every value is sent as
/// free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemeArg {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default: Option<Value>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("min_{field} ({min}) exceeds max_{field} ({max})")]
    InvertedRange {
        field: &'static str,
        min: usize,
        max: usize,
    },
}

impl MemeParamSchema {
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.min_images > self.max_images {
            return Err(SchemaError::InvertedRange {
                field: "images",
                min: self.min_images,
                max: self.max_images,
            });
        }
        if self.min_texts > self.max_texts {
            return Err(SchemaError::InvertedRange {
                field: "texts",
                min: self.min_texts,
                max: self.max_texts,
            });
        }
        Ok(())
    }

    pub fn optional_images(&self) -> usize {
        self.max_images.saturating_sub(self.min_images)
    }

    pub fn optional_texts(&self) -> usize {
        self.max_texts.saturating_sub(self.min_texts)
    }
}
