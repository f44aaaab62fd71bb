use bytes::Bytes;
use indexmap::IndexMap;
use memegen_core::CommandSpec;
use reqwest::multipart::Form;
use serde::ser::{Serialize, Serializer};

use crate::error::{ClientError, Result};

/// An image returned by the meme service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub bytes: Bytes,
    pub content_type: String,
}

/// Resolved values for a command's named options, in declaration order.
///
/// `None` means the user never supplied the option, which is distinct from
/// supplying an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionValues(IndexMap<String, Option<String>>);

impl OptionValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every option of `spec`, all unset.
    pub fn unset_for(spec: &CommandSpec) -> Self {
        Self(
            spec.options
                .iter()
                .map(|opt| (opt.name.clone(), None))
                .collect(),
        )
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), Some(value.into()));
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any option holds a non-empty value.
    pub fn has_truthy(&self) -> bool {
        self.0
            .values()
            .any(|v| v.as_deref().is_some_and(|v| !v.is_empty()))
    }

    /// The whole map as a JSON object. Unset entries have no JSON form and
    /// are left out; set entries are kept even when empty.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ClientError::Encode(e.to_string()))
    }
}

impl Serialize for OptionValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .filter_map(|(name, value)| value.as_ref().map(|value| (name, value))),
        )
    }
}

/// Multipart payload for `POST /memes/{key}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub texts: Vec<String>,
    pub args: Option<String>,
}

impl RenderRequest {
    /// `args` is attached only when at least one option is truthy, but then
    /// carries the full option map.
    pub fn new(texts: Vec<String>, options: &OptionValues) -> Result<Self> {
        let args = if options.has_truthy() {
            Some(options.to_json()?)
        } else {
            None
        };
        Ok(Self { texts, args })
    }

    pub fn to_form(&self) -> Form {
        let mut form = Form::new();
        for text in &self.texts {
            form = form.text("texts", text.clone());
        }
        if let Some(args) = &self.args {
            form = form.text("args", args.clone());
        }
        form
    }
}
