//! Value types for configuration items

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

// =============================================================================
// Datatype
// =============================================================================

/// Declared type of a configuration item
///
/// The set is closed: parsing any other tag fails with
/// [`Error::InvalidDatatype`].
///
/// # Example
/// ```rust
/// use cfgitem::Datatype;
///
/// let datatype: Datatype = "int".parse().unwrap();
/// assert_eq!(datatype, Datatype::Int);
/// assert!("tuple".parse::<Datatype>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Datatype {
    /// Boolean flag
    Bool,
    /// Free text
    String,
    /// Signed integer
    Int,
    /// Floating point number
    Float,
    /// List of strings
    List,
    /// Dictionary (placeholder type, no coercion support)
    Dict,
}

impl Datatype {
    /// All recognized datatypes
    pub const ALL: [Datatype; 6] = [
        Datatype::Bool,
        Datatype::String,
        Datatype::Int,
        Datatype::Float,
        Datatype::List,
        Datatype::Dict,
    ];

    /// Tag used in definitions and error messages
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Datatype::Bool => "bool",
            Datatype::String => "string",
            Datatype::Int => "int",
            Datatype::Float => "float",
            Datatype::List => "list",
            Datatype::Dict => "dict",
        }
    }

    /// Zero value used when an item is built without a default
    #[must_use]
    pub fn zero_value(self) -> ConfigValue {
        match self {
            Datatype::Bool => ConfigValue::Bool(false),
            Datatype::String => ConfigValue::String(String::new()),
            Datatype::Int => ConfigValue::Int(0),
            Datatype::Float => ConfigValue::Float(0.0),
            Datatype::List => ConfigValue::List(Vec::new()),
            Datatype::Dict => ConfigValue::Dict(Map::new()),
        }
    }
}

impl FromStr for Datatype {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        Datatype::ALL
            .into_iter()
            .find(|datatype| datatype.as_str() == tag)
            .ok_or_else(|| Error::InvalidDatatype(tag.to_string()))
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ConfigValue
// =============================================================================

/// A concretely typed configuration value
///
/// Equality is exact: `Int(1)` and `Float(1.0)` are different values.
///
/// Non-finite floats serialize as the strings `"inf"`, `"-inf"` and `"NaN"`
/// since JSON has no representation for them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<String>),
    Dict(Map<String, Value>),
}

impl ConfigValue {
    /// The datatype this value belongs to
    #[must_use]
    pub fn datatype(&self) -> Datatype {
        match self {
            ConfigValue::Bool(_) => Datatype::Bool,
            ConfigValue::String(_) => Datatype::String,
            ConfigValue::Int(_) => Datatype::Int,
            ConfigValue::Float(_) => Datatype::Float,
            ConfigValue::List(_) => Datatype::List,
            ConfigValue::Dict(_) => Datatype::Dict,
        }
    }

    /// Render the value as text, joining list elements with `list_delim`
    ///
    /// The output of a scalar or list value is accepted back by the coercing
    /// update path when the same delimiter is used.
    ///
    /// # Example
    /// ```rust
    /// use cfgitem::ConfigValue;
    ///
    /// let value = ConfigValue::from(vec!["a", "b"]);
    /// assert_eq!(value.to_text(","), "a,b");
    /// assert_eq!(ConfigValue::Bool(true).to_text(","), "true");
    /// ```
    #[must_use]
    pub fn to_text(&self, list_delim: &str) -> String {
        match self {
            ConfigValue::List(entries) => entries.join(list_delim),
            other => other.to_string(),
        }
    }

    /// Borrow the text of a `String` value
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ConfigValue::List(entries) => Some(entries),
            _ => None,
        }
    }
}

/// Text written for a non-finite float
fn non_finite_text(n: f64) -> Option<&'static str> {
    if n.is_nan() {
        Some("NaN")
    } else if n == f64::INFINITY {
        Some("inf")
    } else if n == f64::NEG_INFINITY {
        Some("-inf")
    } else {
        None
    }
}

/// Float spelled by [`non_finite_text`]
pub(crate) fn parse_non_finite(text: &str) -> Option<f64> {
    match text {
        "NaN" => Some(f64::NAN),
        "inf" => Some(f64::INFINITY),
        "-inf" => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Bool(flag) => serializer.serialize_bool(*flag),
            ConfigValue::Int(n) => serializer.serialize_i64(*n),
            ConfigValue::Float(n) => match non_finite_text(*n) {
                Some(text) => serializer.serialize_str(text),
                None => serializer.serialize_f64(*n),
            },
            ConfigValue::String(text) => serializer.serialize_str(text),
            ConfigValue::List(entries) => entries.serialize(serializer),
            ConfigValue::Dict(map) => map.serialize(serializer),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(flag) => write!(f, "{flag}"),
            ConfigValue::String(text) => f.write_str(text),
            ConfigValue::Int(n) => write!(f, "{n}"),
            // Debug keeps the fractional part (`1.0` rather than `1`)
            ConfigValue::Float(n) => write!(f, "{n:?}"),
            ConfigValue::List(entries) => f.write_str(&entries.join(" ")),
            ConfigValue::Dict(map) => {
                let json = serde_json::to_string(map).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Int(i64::from(value))
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(value: Vec<String>) -> Self {
        ConfigValue::List(value)
    }
}

impl From<Vec<&str>> for ConfigValue {
    fn from(value: Vec<&str>) -> Self {
        ConfigValue::List(value.into_iter().map(String::from).collect())
    }
}

impl From<Map<String, Value>> for ConfigValue {
    fn from(value: Map<String, Value>) -> Self {
        ConfigValue::Dict(value)
    }
}

// =============================================================================
// Update Input
// =============================================================================

/// Input accepted by the controlled update path
///
/// Raw text (typically read from a file or typed by a user) is coerced into
/// the item's datatype when coercion is enabled; typed values are validated
/// as they are. `&str` and `String` convert to [`NewValue::Text`], every other
/// supported type converts to [`NewValue::Typed`].
#[derive(Debug, Clone, PartialEq)]
pub enum NewValue {
    /// An already typed value
    Typed(ConfigValue),
    /// Raw text awaiting coercion
    Text(String),
}

impl NewValue {
    /// Take the value without coercion; text becomes a `String` value
    #[must_use]
    pub fn into_value(self) -> ConfigValue {
        match self {
            NewValue::Typed(value) => value,
            NewValue::Text(text) => ConfigValue::String(text),
        }
    }
}

impl From<ConfigValue> for NewValue {
    fn from(value: ConfigValue) -> Self {
        NewValue::Typed(value)
    }
}

impl From<&str> for NewValue {
    fn from(value: &str) -> Self {
        NewValue::Text(value.to_string())
    }
}

impl From<String> for NewValue {
    fn from(value: String) -> Self {
        NewValue::Text(value)
    }
}

macro_rules! typed_new_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for NewValue {
                fn from(value: $ty) -> Self {
                    NewValue::Typed(ConfigValue::from(value))
                }
            }
        )*
    };
}

typed_new_value!(bool, i64, i32, f64, Vec<String>, Vec<&str>, Map<String, Value>);

// =============================================================================
// Update Options
// =============================================================================

/// Options for [`ConfigurationItem::update_curr_value_with`]
///
/// [`ConfigurationItem::update_curr_value_with`]: crate::ConfigurationItem::update_curr_value_with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Attempt to coerce the input into the item's datatype
    pub coerce: bool,

    /// Delimiter used when splitting text into a list
    pub list_delim: String,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            coerce: true,
            list_delim: " ".to_string(),
        }
    }
}

impl UpdateOptions {
    /// Create update options with coercion enabled and a space delimiter
    ///
    /// # Example
    /// ```rust
    /// use cfgitem::UpdateOptions;
    ///
    /// let options = UpdateOptions::new().list_delim(",");
    /// assert!(options.coerce);
    /// assert_eq!(options.list_delim, ",");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable coercion
    #[must_use]
    pub fn coerce(mut self, coerce: bool) -> Self {
        self.coerce = coerce;
        self
    }

    /// Set the list delimiter
    #[must_use]
    pub fn list_delim(mut self, delim: impl Into<String>) -> Self {
        self.list_delim = delim.into();
        self
    }
}
