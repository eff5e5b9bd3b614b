//! Configuration item types
//!
//! This module contains the building blocks of a configuration item:
//! - `Datatype` - The closed set of declared types
//! - `ConfigValue` / `NewValue` - Typed values and raw update input
//! - `ConfigurationItem` - The self-validating item and its builder
//! - `ItemDefinition` - Serde shape used by loaders

mod checks;
mod definition;
mod item;
mod types;

pub use definition::ItemDefinition;
pub use item::{ConfigurationItem, ConfigurationItemBuilder, DEFAULT_INSTRUCTIONS, DEFAULT_KEY};
pub use types::{ConfigValue, Datatype, NewValue, UpdateOptions};
