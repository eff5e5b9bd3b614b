//! Serializable item definitions
//!
//! `ItemDefinition` is the shape a registry or loader uses to describe an item
//! in JSON (or any serde format). Converting a definition into a
//! [`ConfigurationItem`] runs the full builder, so a loaded item satisfies the
//! same invariants as one built in code.
//!
//! ```rust
//! use cfgitem::ConfigurationItem;
//!
//! let ci = ConfigurationItem::from_json(r#"{
//!     "datatype": "string",
//!     "key": "SSHPORTBANNER",
//!     "default": "Authorized use only",
//!     "pattern": "^[A-Z]",
//!     "simple": true
//! }"#)?;
//!
//! assert_eq!(ci.key(), "SSHPORTBANNER");
//! assert!(ci.in_simple());
//! # Ok::<(), cfgitem::Error>(())
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::checks;
use super::item::ConfigurationItem;
use super::types::{self, ConfigValue, Datatype, NewValue};
use crate::error::{Error, Result};

fn default_max_selections() -> usize {
    1
}

fn is_one(n: &usize) -> bool {
    *n == 1
}

/// Restore a stored value to `datatype`
///
/// Float items read the `"inf"`, `"-inf"` and `"NaN"` spellings back as
/// floats; numbers are widened or truncated to the declared type.
fn decode(datatype: Datatype, value: ConfigValue) -> Result<ConfigValue> {
    if let (Datatype::Float, ConfigValue::String(text)) = (datatype, &value) {
        if let Some(n) = types::parse_non_finite(text) {
            return Ok(ConfigValue::Float(n));
        }
    }
    checks::convert_number(datatype, value)
}

/// Serde representation of a [`ConfigurationItem`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Datatype tag (`bool`, `string`, `int`, `float`, `list`, `dict`)
    pub datatype: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ConfigValue>,

    /// Current value, omitted when it equals the default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ConfigValue>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub simple: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_values: Option<Vec<ConfigValue>>,

    #[serde(default = "default_max_selections", skip_serializing_if = "is_one")]
    pub max_selections: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl ItemDefinition {
    /// Minimal definition for `datatype`
    pub fn new(datatype: Datatype) -> Self {
        Self {
            datatype: datatype.as_str().to_string(),
            key: None,
            default: None,
            value: None,
            comment: String::new(),
            instructions: None,
            simple: false,
            valid_values: None,
            max_selections: default_max_selections(),
            pattern: None,
        }
    }
}

impl TryFrom<ItemDefinition> for ConfigurationItem {
    type Error = Error;

    fn try_from(def: ItemDefinition) -> Result<Self> {
        let datatype: Datatype = def.datatype.parse()?;

        let mut builder = ConfigurationItem::builder(datatype)
            .user_comment(def.comment)
            .simple(def.simple)
            .max_num_selections(def.max_selections);

        if let Some(key) = def.key {
            builder = builder.key(key);
        }
        if let Some(instructions) = def.instructions {
            builder = builder.instructions(instructions);
        }
        if let Some(values) = def.valid_values {
            let element_type = match datatype {
                Datatype::List => Datatype::String,
                other => other,
            };
            let values = values
                .into_iter()
                .map(|v| decode(element_type, v))
                .collect::<Result<Vec<_>>>()?;
            builder = builder.valid_values(values);
        }
        if let Some(pattern) = def.pattern {
            builder = builder.regex_pattern(pattern);
        }
        if let Some(default) = def.default {
            builder = builder.default_value(decode(datatype, default)?);
        }
        if let Some(value) = def.value {
            builder = builder.current_value(NewValue::Typed(decode(datatype, value)?));
        }

        builder.build()
    }
}

impl From<&ConfigurationItem> for ItemDefinition {
    fn from(item: &ConfigurationItem) -> Self {
        Self {
            datatype: item.datatype().as_str().to_string(),
            key: Some(item.key().to_string()),
            default: Some(item.def_value().clone()),
            value: (!item.is_default()).then(|| item.curr_value().clone()),
            comment: item.user_comment().to_string(),
            instructions: Some(item.instructions().to_string()),
            simple: item.in_simple(),
            valid_values: item.valid_value_set().map(<[ConfigValue]>::to_vec),
            max_selections: item.max_num_selections(),
            pattern: item.regex_pattern().map(String::from),
        }
    }
}

impl ConfigurationItem {
    /// Build an item from a definition
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`ConfigurationItemBuilder::build`], plus
    /// [`Error::InvalidDatatype`] for an unknown tag.
    ///
    /// [`ConfigurationItemBuilder::build`]: crate::ConfigurationItemBuilder::build
    pub fn from_definition(def: ItemDefinition) -> Result<Self> {
        Self::try_from(def)
    }

    /// Describe this item as a definition
    pub fn to_definition(&self) -> ItemDefinition {
        ItemDefinition::from(self)
    }

    /// Parse a JSON definition and build the item
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] for malformed JSON and any construction error.
    pub fn from_json(json: &str) -> Result<Self> {
        let def: ItemDefinition = serde_json::from_str(json)?;
        Self::try_from(def)
    }

    /// Serialize this item's definition as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_definition())?)
    }
}

impl Serialize for ConfigurationItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_definition().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ConfigurationItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let def = ItemDefinition::deserialize(deserializer)?;
        ConfigurationItem::try_from(def).map_err(serde::de::Error::custom)
    }
}
