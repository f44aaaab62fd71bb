//! Derivation of a command surface from a meme's parameter schema.
//!
//! Everything here is a pure function of `(MemeConfig, MemeParamSchema, bot name)`,
//! so the same inputs always produce the same [`CommandSpec`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::MemeConfig;
use crate::schema::{MemeParamSchema, SchemaError};

pub const COMMAND_PREFIX: &str = "memegen-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Image,
    Text,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKind::Image => f.write_str("image"),
            SlotKind::Text => f.write_str("text"),
        }
    }
}

/// One positional input position. `ordinal` is 1-based and counted
/// separately for each (kind, required) group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub kind: SlotKind,
    pub required: bool,
    pub ordinal: usize,
}

impl Slot {
    pub fn label(&self) -> String {
        if self.required {
            format!("{} {}", self.kind, self.ordinal)
        } else {
            format!("optional {} {}", self.kind, self.ordinal)
        }
    }

    pub fn placeholder(&self) -> String {
        if self.required {
            format!("<{}>", self.label())
        } else {
            format!("[{}]", self.label())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    pub name: String,
    pub description: String,
    /// Type advertised by the remote service. Values are passed through as text.
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub name: String,
    pub key: String,
    pub display_name: String,
    pub alias: Option<String>,
    pub description: String,
    pub slots: Vec<Slot>,
    pub options: Vec<OptionSpec>,
    pub example: String,
}

/// `memegen-` followed by the key lower-cased with `_` replaced by `-`.
pub fn command_name(key: &str) -> String {
    format!("{COMMAND_PREFIX}{}", key.to_lowercase().replace('_', "-"))
}

/// `@bot /display "text 1" "text 2"`, each default text quoted and space-joined.
pub fn usage_example(bot_name: &str, display_name: &str, default_texts: &[String]) -> String {
    let texts = default_texts
        .iter()
        .map(|text| format!("\"{text}\""))
        .collect::<Vec<_>>()
        .join(" ");
    format!("@{bot_name} /{display_name} {texts}")
}

/// Required images, required texts, optional images, optional texts.
pub fn derive_slots(schema: &MemeParamSchema) -> Vec<Slot> {
    let group = |kind: SlotKind, required: bool, count: usize| {
        (1..=count).map(move |ordinal| Slot {
            kind,
            required,
            ordinal,
        })
    };
    group(SlotKind::Image, true, schema.min_images)
        .chain(group(SlotKind::Text, true, schema.min_texts))
        .chain(group(SlotKind::Image, false, schema.optional_images()))
        .chain(group(SlotKind::Text, false, schema.optional_texts()))
        .collect()
}

impl CommandSpec {
    pub fn derive(
        meme: &MemeConfig,
        schema: &MemeParamSchema,
        bot_name: &str,
    ) -> Result<Self, SchemaError> {
        schema.validate()?;
        let alias = (meme.key != meme.name).then(|| meme.name.clone());
        let options = schema
            .args
            .iter()
            .map(|arg| OptionSpec {
                name: arg.name.clone(),
                description: arg.description.clone(),
                kind: arg.kind.clone(),
            })
            .collect();
        Ok(Self {
            name: command_name(&meme.key),
            key: meme.key.clone(),
            display_name: meme.name.clone(),
            alias,
            description: format!("Generate {} meme", meme.name),
            slots: derive_slots(schema),
            options,
            example: usage_example(bot_name, &meme.name, &schema.default_texts),
        })
    }

    pub fn required_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|slot| slot.required)
    }

    pub fn optional_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|slot| !slot.required)
    }

    /// True when `name` is the command name or its alias.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.alias.as_deref() == Some(name)
    }

    /// `memegen-x <image 1> <text 1> [optional text 1]`
    pub fn declaration(&self) -> String {
        let mut parts = vec![self.name.clone()];
        parts.extend(self.slots.iter().map(Slot::placeholder));
        parts.join(" ")
    }
}
