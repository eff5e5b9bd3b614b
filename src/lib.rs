//! # cfgitem - Typed Configuration Items
//!
//! A configuration item binds a key to a value of a declared type, together
//! with a default, validation rules and user-facing metadata. It is the atomic
//! unit a settings registry, config file reader or GUI builds upon.
//!
//! ## Features
//!
//! - **Closed Datatypes**: `bool`, `string`, `int`, `float`, `list` (of strings) and a `dict` placeholder
//! - **Validation**: Exact type checks, regex patterns anchored at the start, allow-lists
//! - **Coercion**: Text from files or forms is parsed into the declared type before validation
//! - **Safe Updates**: A rejected update never changes the current value
//! - **Serde Support**: Items load from and serialize to `ItemDefinition`
//!
//! ## Quick Start
//!
//! ```rust
//! use cfgitem::{ConfigurationItem, Datatype};
//!
//! let mut ci = ConfigurationItem::builder(Datatype::Bool)
//!     .key("DISABLEIPV6")
//!     .default_value(false)
//!     .instructions("Set to yes to disable IPv6 networking.")
//!     .simple(true)
//!     .build()?;
//!
//! assert!(ci.update_curr_value("YES"));
//! assert_eq!(ci.curr_value().as_bool(), Some(true));
//!
//! // Rejected values leave the item untouched
//! assert!(!ci.update_curr_value("maybe"));
//! assert_eq!(ci.curr_value().as_bool(), Some(true));
//! # Ok::<(), cfgitem::Error>(())
//! ```
//!
//! ## Constraints
//!
//! ```rust
//! use cfgitem::{ConfigurationItem, Datatype, UpdateOptions};
//!
//! // Regex patterns only apply to string items
//! let mut banner = ConfigurationItem::builder(Datatype::String)
//!     .key("BANNERTEXT")
//!     .regex_pattern("^Authorized")
//!     .default_value("Authorized users only")
//!     .build()?;
//! assert!(!banner.update_curr_value("Welcome"));
//!
//! // List items check every element against the valid value set
//! let mut ciphers = ConfigurationItem::builder(Datatype::List)
//!     .key("CIPHERS")
//!     .valid_values(["aes256-ctr", "aes192-ctr", "aes128-ctr"])
//!     .max_num_selections(3)
//!     .build()?;
//! let comma = UpdateOptions::new().list_delim(",");
//! assert!(ciphers.update_curr_value_with("aes256-ctr,aes128-ctr", &comma));
//! assert!(!ciphers.update_curr_value_with("aes256-ctr,3des-cbc", &comma));
//! # Ok::<(), cfgitem::Error>(())
//! ```
//!
//! ## Errors
//!
//! Structural problems (unknown datatype, regex on a non-string item, a valid
//! value set on a bool item, a default that fails its own constraints) are
//! returned as [`Error`] while building. Runtime updates never error: they
//! return `false` and the caller decides how to report it.
//!
//! ## Thread Safety
//!
//! Items are plain values (`Send + Sync`). Share one between threads behind a
//! lock such as `RwLock<ConfigurationItem>`.

mod error;

pub mod config;

pub use error::{Error, Result};

pub use config::{
    ConfigValue, ConfigurationItem, ConfigurationItemBuilder, DEFAULT_INSTRUCTIONS, DEFAULT_KEY,
    Datatype, ItemDefinition, NewValue, UpdateOptions,
};
