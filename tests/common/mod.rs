//! Common test utilities for cfgitem integration tests
//!
//! Provides a set of representative items and helper functions.

#![allow(dead_code)]

use cfgitem::{ConfigValue, ConfigurationItem, Datatype};

// =============================================================================
// Logging
// =============================================================================

/// Install a test logger once so `RUST_LOG=debug` shows rejection reasons
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// =============================================================================
// Test Items
// =============================================================================

/// One item per datatype, each with a type-correct default and no constraints
pub fn plain_items() -> Vec<ConfigurationItem> {
    let mut dict = serde_json::Map::new();
    dict.insert("retries".into(), serde_json::json!(3));

    vec![
        item(Datatype::Bool, "ENABLEAUDIT", ConfigValue::Bool(true)),
        item(Datatype::String, "MOTD", ConfigValue::from("hello")),
        item(Datatype::Int, "MAXLOGINS", ConfigValue::Int(10)),
        item(Datatype::Float, "TIMEOUT", ConfigValue::Float(2.5)),
        item(Datatype::List, "SERVICES", ConfigValue::from(vec!["sshd", "crond"])),
        item(Datatype::Dict, "LIMITS", ConfigValue::Dict(dict)),
    ]
}

fn item(datatype: Datatype, key: &str, default: ConfigValue) -> ConfigurationItem {
    ConfigurationItem::builder(datatype)
        .key(key)
        .default_value(default)
        .build()
        .expect("Failed to build plain item")
}

/// List item restricted to `a`, `b` and `c`
pub fn abc_list_item() -> ConfigurationItem {
    ConfigurationItem::builder(Datatype::List)
        .key("LETTERS")
        .valid_values(["a", "b", "c"])
        .max_num_selections(3)
        .build()
        .expect("Failed to build list item")
}

/// String item whose values must start with `foo`
pub fn foo_string_item() -> ConfigurationItem {
    ConfigurationItem::builder(Datatype::String)
        .key("FOOPREFIX")
        .regex_pattern("^foo")
        .default_value("foo")
        .build()
        .expect("Failed to build regex item")
}

/// Int item with the zero default
pub fn int_item() -> ConfigurationItem {
    ConfigurationItem::builder(Datatype::Int)
        .key("PORT")
        .build()
        .expect("Failed to build int item")
}

/// Bool item with the zero default
pub fn bool_item() -> ConfigurationItem {
    ConfigurationItem::builder(Datatype::Bool)
        .key("ENABLED")
        .build()
        .expect("Failed to build bool item")
}
