//! The configuration item and its builder
//!
//! # Lifecycle
//!
//! An item is built once with all structural properties (datatype, key,
//! constraints, default) and then only changes through two paths:
//!
//! - [`ConfigurationItem::update_curr_value`] for the current value
//! - [`ConfigurationItem::set_user_comment`] for the user comment
//!
//! The structural setters are public for use while assembling an item by hand.
//! Each one re-checks the default and current values against the new
//! configuration and refuses any change that would invalidate them.
//!
//! # Example
//!
//! ```rust
//! use cfgitem::{ConfigurationItem, Datatype};
//!
//! let mut ci = ConfigurationItem::builder(Datatype::List)
//!     .key("ENABLEDSERVICES")
//!     .valid_values(["sshd", "ntpd", "cups"])
//!     .default_value(vec!["sshd"])
//!     .instructions("Space separated list of services to leave enabled.")
//!     .build()?;
//!
//! assert!(ci.update_curr_value("sshd ntpd"));
//! assert!(!ci.update_curr_value("sshd telnetd"));
//! assert_eq!(ci.curr_value().as_list(), Some(&["sshd".to_string(), "ntpd".to_string()][..]));
//! # Ok::<(), cfgitem::Error>(())
//! ```

use log::{debug, warn};
use regex::Regex;

use super::checks;
use super::types::{ConfigValue, Datatype, NewValue, UpdateOptions};
use crate::error::{Error, Result};

/// Key used when none is supplied
pub const DEFAULT_KEY: &str = "DefaultKey";

/// Instructions used when none are supplied
pub const DEFAULT_INSTRUCTIONS: &str = "Default instructions: no instructions were provided \
for this key. If you are reading this, please report it as a bug.";

// =============================================================================
// Configuration Item
// =============================================================================

/// A typed, self-validating configuration value
///
/// The default and current values always satisfy [`validate`](Self::validate).
#[derive(Debug, Clone)]
pub struct ConfigurationItem {
    datatype: Datatype,
    key: String,
    def_value: ConfigValue,
    curr_value: ConfigValue,
    user_comment: String,
    instructions: String,
    simple: bool,
    valid_value_set: Option<Vec<ConfigValue>>,
    max_num_selections: usize,
    regex: Option<Regex>,
}

impl PartialEq for ConfigurationItem {
    fn eq(&self, other: &Self) -> bool {
        self.datatype == other.datatype
            && self.key == other.key
            && self.def_value == other.def_value
            && self.curr_value == other.curr_value
            && self.user_comment == other.user_comment
            && self.instructions == other.instructions
            && self.simple == other.simple
            && self.valid_value_set == other.valid_value_set
            && self.max_num_selections == other.max_num_selections
            && self.regex_pattern() == other.regex_pattern()
    }
}

impl ConfigurationItem {
    /// Create an item of `datatype` with every other property left at its default
    ///
    /// # Errors
    ///
    /// Never fails for the bare datatype; the `Result` mirrors [`build`](ConfigurationItemBuilder::build).
    pub fn new(datatype: Datatype) -> Result<Self> {
        Self::builder(datatype).build()
    }

    /// Start building an item of `datatype`
    pub fn builder(datatype: Datatype) -> ConfigurationItemBuilder {
        ConfigurationItemBuilder::new(datatype)
    }

    /// Start building an item from a datatype tag such as `"int"`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDatatype`] for an unrecognized tag.
    pub fn builder_from_tag(tag: &str) -> Result<ConfigurationItemBuilder> {
        Ok(Self::builder(tag.parse()?))
    }

    /// Bare item with zero values, before any constraint is applied
    fn staged(datatype: Datatype) -> Self {
        Self {
            datatype,
            key: DEFAULT_KEY.to_string(),
            def_value: datatype.zero_value(),
            curr_value: datatype.zero_value(),
            user_comment: String::new(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            simple: false,
            valid_value_set: None,
            max_num_selections: 1,
            regex: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Identifier of this item in a config file or UI
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn def_value(&self) -> &ConfigValue {
        &self.def_value
    }

    pub fn datatype(&self) -> Datatype {
        self.datatype
    }

    /// Free-form note entered by the user, possibly empty
    pub fn user_comment(&self) -> &str {
        &self.user_comment
    }

    /// Explanatory text for end users
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Whether this item belongs in the abbreviated ("simple") view
    pub fn in_simple(&self) -> bool {
        self.simple
    }

    pub fn curr_value(&self) -> &ConfigValue {
        &self.curr_value
    }

    pub fn valid_value_set(&self) -> Option<&[ConfigValue]> {
        self.valid_value_set.as_deref()
    }

    /// Maximum number of entries that may be selected from the valid value set
    ///
    /// This is presentation metadata; [`validate`](Self::validate) does not enforce it.
    pub fn max_num_selections(&self) -> usize {
        self.max_num_selections
    }

    pub fn regex_pattern(&self) -> Option<&str> {
        self.regex.as_ref().map(Regex::as_str)
    }

    /// Whether the current value equals the default value
    pub fn is_default(&self) -> bool {
        self.curr_value == self.def_value
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Check a candidate value against the datatype and every configured constraint
    ///
    /// Checks, in order:
    /// - exact datatype
    /// - regex pattern (string items), matched at the start of the text
    /// - valid value set: each element for list items, the value itself otherwise
    pub fn validate(&self, candidate: &ConfigValue) -> bool {
        if !checks::matches_type(self.datatype, candidate) {
            return false;
        }

        if let ConfigValue::String(text) = candidate {
            if !self.validate_against_regex(text) {
                return false;
            }
        }

        match (&self.valid_value_set, candidate) {
            (None, _) => true,
            (Some(_), ConfigValue::List(entries)) => {
                entries.iter().all(|entry| self.contains_text(entry))
            }
            (Some(_), ConfigValue::Dict(_)) => true,
            (Some(_), value) => self.validate_against_list(value),
        }
    }

    /// Check `entry` against the regex pattern
    ///
    /// Returns `true` when no pattern is configured. The pattern must match at
    /// the start of `entry` but need not consume all of it.
    pub fn validate_against_regex(&self, entry: &str) -> bool {
        // The leftmost match starts at 0 whenever any match at 0 exists
        self.regex
            .as_ref()
            .is_none_or(|re| re.find(entry).is_some_and(|m| m.start() == 0))
    }

    /// Exact membership check of `entry` in the valid value set
    ///
    /// Returns `true` when no valid value set is configured.
    pub fn validate_against_list(&self, entry: &ConfigValue) -> bool {
        self.valid_value_set
            .as_ref()
            .is_none_or(|set| set.contains(entry))
    }

    fn contains_text(&self, entry: &str) -> bool {
        self.valid_value_set.as_ref().is_none_or(|set| {
            set.iter()
                .any(|value| matches!(value, ConfigValue::String(text) if text == entry))
        })
    }

    // =========================================================================
    // Runtime updates
    // =========================================================================

    /// Update the current value, coercing text with a space list delimiter
    ///
    /// Returns `true` when the value was accepted and committed. On `false`
    /// the current value is left exactly as it was.
    ///
    /// # Example
    /// ```rust
    /// use cfgitem::{ConfigurationItem, Datatype};
    ///
    /// let mut ci = ConfigurationItem::new(Datatype::Int)?;
    /// assert!(ci.update_curr_value("42"));
    /// assert_eq!(ci.curr_value().as_int(), Some(42));
    ///
    /// assert!(!ci.update_curr_value("abc"));
    /// assert_eq!(ci.curr_value().as_int(), Some(42));
    /// # Ok::<(), cfgitem::Error>(())
    /// ```
    pub fn update_curr_value(&mut self, new_value: impl Into<NewValue>) -> bool {
        self.update_curr_value_with(new_value, &UpdateOptions::default())
    }

    /// Update the current value with explicit coercion options
    pub fn update_curr_value_with(
        &mut self,
        new_value: impl Into<NewValue>,
        options: &UpdateOptions,
    ) -> bool {
        let new_value = new_value.into();
        let candidate = if options.coerce {
            match checks::coerce(self.datatype, new_value, &options.list_delim) {
                Ok(value) => value,
                Err(e) => {
                    debug!("Rejected update for '{}': {e}", self.key);
                    return false;
                }
            }
        } else {
            new_value.into_value()
        };

        if !self.validate(&candidate) {
            debug!(
                "Rejected update for '{}': {:?} is not a valid {} value",
                self.key, candidate, self.datatype
            );
            return false;
        }

        debug!("Updated '{}' to {:?}", self.key, candidate);
        self.curr_value = candidate;
        true
    }

    /// Set the user comment (safe at runtime)
    pub fn set_user_comment(&mut self, comment: impl Into<String>) {
        self.user_comment = comment.into();
    }

    // =========================================================================
    // Structural setters (construction time)
    // =========================================================================

    /// Set the key
    ///
    /// Only safe while assembling the item; registries index items by key.
    /// Keys are stricter than plain strings: an empty or all-whitespace key
    /// cannot address an entry in a config file and is refused.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty or blank key.
    pub fn set_key(&mut self, key: impl Into<String>) -> Result<()> {
        self.apply_key(key.into())
    }

    /// Set the default value
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the value is not of the item's
    /// datatype and [`Error::InvalidArgument`] if it fails the configured
    /// regex pattern or valid value set.
    pub fn set_def_value(&mut self, value: impl Into<ConfigValue>) -> Result<()> {
        self.apply_def_value(value.into())
    }

    /// Set the instructions shown to end users
    pub fn set_instructions(&mut self, instructions: impl Into<String>) {
        self.instructions = instructions.into();
    }

    /// Set whether the item appears in the simple view
    pub fn set_simple(&mut self, simple: bool) {
        self.simple = simple;
    }

    /// Set or clear the valid value set
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for bool and dict items or when an
    /// element has the wrong type (list items take string elements), and
    /// [`Error::InvalidArgument`] if the default or current value would no
    /// longer validate.
    pub fn set_valid_value_set(&mut self, set: Option<Vec<ConfigValue>>) -> Result<()> {
        self.reconfigure("valid value set", |item| item.apply_valid_value_set(set))
    }

    /// Set the maximum number of selections
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `max` is zero.
    pub fn set_max_num_selections(&mut self, max: usize) -> Result<()> {
        self.apply_max_num_selections(max)
    }

    /// Set or clear the regex pattern
    ///
    /// Patterns use the [`regex`] crate syntax. Look-around and backreferences
    /// are not supported and fail with [`Error::InvalidPattern`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for non-string items,
    /// [`Error::InvalidPattern`] if the pattern does not compile, and
    /// [`Error::InvalidArgument`] if the default or current value would no
    /// longer validate.
    pub fn set_regex_pattern(&mut self, pattern: Option<&str>) -> Result<()> {
        self.reconfigure("regex pattern", |item| item.apply_regex_pattern(pattern))
    }

    /// Apply a constraint change and roll it back if it invalidates stored values
    fn reconfigure<F>(&mut self, what: &str, change: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let snapshot = self.clone();
        if let Err(e) = change(self) {
            *self = snapshot;
            return Err(e);
        }

        let stale = if !self.validate(&self.def_value) {
            Some("default")
        } else if !self.validate(&self.curr_value) {
            Some("current")
        } else {
            None
        };

        if let Some(which) = stale {
            *self = snapshot;
            return Err(Error::invalid_argument(
                &self.key,
                format!("new {what} would invalidate the {which} value"),
            ));
        }
        Ok(())
    }

    fn apply_key(&mut self, key: String) -> Result<()> {
        if key.trim().is_empty() {
            return Err(Error::invalid_argument(&self.key, "key must not be empty"));
        }
        self.key = key;
        Ok(())
    }

    fn apply_def_value(&mut self, value: ConfigValue) -> Result<()> {
        if !checks::matches_type(self.datatype, &value) {
            return Err(Error::type_mismatch(
                &self.key,
                self.datatype,
                value.datatype(),
            ));
        }
        if !self.validate(&value) {
            return Err(Error::invalid_argument(
                &self.key,
                format!("default value {value:?} does not satisfy the configured constraints"),
            ));
        }
        self.def_value = value;
        Ok(())
    }

    fn apply_valid_value_set(&mut self, set: Option<Vec<ConfigValue>>) -> Result<()> {
        let Some(set) = set else {
            self.valid_value_set = None;
            return Ok(());
        };

        let element_type = match self.datatype {
            Datatype::Bool | Datatype::Dict => {
                return Err(Error::type_mismatch(
                    &self.key,
                    "a datatype with enumerable values",
                    self.datatype,
                ));
            }
            Datatype::List => Datatype::String,
            other => other,
        };

        if let Some(bad) = set.iter().find(|v| !checks::matches_type(element_type, v)) {
            return Err(Error::type_mismatch(
                &self.key,
                element_type,
                bad.datatype(),
            ));
        }

        self.valid_value_set = Some(set);
        Ok(())
    }

    fn apply_max_num_selections(&mut self, max: usize) -> Result<()> {
        if max == 0 {
            return Err(Error::invalid_argument(
                &self.key,
                "max_num_selections must be a positive integer",
            ));
        }
        self.max_num_selections = max;
        Ok(())
    }

    fn apply_regex_pattern(&mut self, pattern: Option<&str>) -> Result<()> {
        let Some(pattern) = pattern else {
            self.regex = None;
            return Ok(());
        };

        if self.datatype != Datatype::String {
            return Err(Error::type_mismatch(
                &self.key,
                Datatype::String,
                self.datatype,
            ));
        }

        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            key: self.key.clone(),
            source,
        })?;
        self.regex = Some(regex);
        Ok(())
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`ConfigurationItem`]
///
/// Properties are applied in a fixed order when [`build`](Self::build) runs:
/// key, comment, instructions, simple flag, valid value set, max selections,
/// regex pattern, default value, current value. The default is therefore
/// checked against every constraint, and the current value goes through the
/// same coercing update path used at runtime.
#[derive(Debug, Clone)]
pub struct ConfigurationItemBuilder {
    datatype: Datatype,
    key: Option<String>,
    default_value: Option<ConfigValue>,
    user_comment: String,
    instructions: Option<String>,
    current_value: Option<NewValue>,
    simple: bool,
    valid_values: Option<Vec<ConfigValue>>,
    max_num_selections: usize,
    regex_pattern: Option<String>,
}

impl ConfigurationItemBuilder {
    /// Create a builder for an item of `datatype`
    pub fn new(datatype: Datatype) -> Self {
        Self {
            datatype,
            key: None,
            default_value: None,
            user_comment: String::new(),
            instructions: None,
            current_value: None,
            simple: false,
            valid_values: None,
            max_num_selections: 1,
            regex_pattern: None,
        }
    }

    /// Set the key (default: `"DefaultKey"`)
    ///
    /// [`build`](Self::build) refuses an empty or blank key.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the default value
    ///
    /// Without one, the zero value of the datatype is used (`false`, `""`,
    /// `0`, `0.0`, empty list, empty dict).
    #[must_use]
    pub fn default_value(mut self, value: impl Into<ConfigValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn user_comment(mut self, comment: impl Into<String>) -> Self {
        self.user_comment = comment.into();
        self
    }

    #[must_use]
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Set the initial current value
    ///
    /// Text is coerced exactly like a runtime update.
    #[must_use]
    pub fn current_value(mut self, value: impl Into<NewValue>) -> Self {
        self.current_value = Some(value.into());
        self
    }

    /// Include the item in the simple view
    #[must_use]
    pub fn simple(mut self, simple: bool) -> Self {
        self.simple = simple;
        self
    }

    /// Restrict values (or list elements) to the given set
    #[must_use]
    pub fn valid_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ConfigValue>,
    {
        self.valid_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn max_num_selections(mut self, max: usize) -> Self {
        self.max_num_selections = max;
        self
    }

    /// Require string values to match `pattern` at their start
    ///
    /// The pattern is compiled by [`build`](Self::build) with the [`regex`]
    /// crate, which has no look-around or backreferences.
    #[must_use]
    pub fn regex_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.regex_pattern = Some(pattern.into());
        self
    }

    /// Build the item, establishing every invariant
    ///
    /// # Errors
    ///
    /// Returns the error of the first property that fails its check. A current
    /// value rejected by the update path is not an error: the item keeps its
    /// default, as it would after a rejected runtime update.
    pub fn build(self) -> Result<ConfigurationItem> {
        self.assemble()
            .inspect_err(|e| debug!("Failed to build configuration item: {e}"))
    }

    fn assemble(self) -> Result<ConfigurationItem> {
        let mut item = ConfigurationItem::staged(self.datatype);

        if let Some(key) = self.key {
            item.apply_key(key)?;
        }
        item.set_user_comment(self.user_comment);
        if let Some(instructions) = self.instructions {
            item.set_instructions(instructions);
        }
        item.set_simple(self.simple);
        item.apply_valid_value_set(self.valid_values)?;
        item.apply_max_num_selections(self.max_num_selections)?;
        item.apply_regex_pattern(self.regex_pattern.as_deref())?;

        let default = self
            .default_value
            .unwrap_or_else(|| self.datatype.zero_value());
        item.apply_def_value(default)?;
        item.curr_value = item.def_value.clone();

        // A rejected initial value leaves the item on its default
        if let Some(current) = self.current_value {
            if !item.update_curr_value(current) {
                warn!(
                    "Initial value for '{}' was rejected, keeping default {:?}",
                    item.key, item.def_value
                );
            }
        }

        Ok(item)
    }
}
