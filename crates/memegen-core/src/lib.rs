//! Core types, configuration and schema-driven command derivation for memegen.

pub mod config;
pub mod output;
pub mod paths;
pub mod schema;
pub mod signature;

pub use config::{Config, Endpoint, LoadPolicy, MemeConfig};
pub use schema::{MemeArg, MemeInfo, MemeParamSchema, SchemaError};
pub use signature::{CommandSpec, OptionSpec, Slot, SlotKind};
