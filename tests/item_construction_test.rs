//! Item Construction Integration Tests
//!
//! Tests for building items and the structural invariants:
//! - Defaults for every datatype
//! - Unknown datatype tags
//! - Regex and valid value set restrictions
//! - Construction order (default checked against constraints)
//! - Initial current value through the update path

mod common;

use cfgitem::{ConfigValue, ConfigurationItem, Datatype, Error, DEFAULT_KEY};
use common::{init_logging, plain_items};

// =============================================================================
// Datatypes
// =============================================================================

#[test]
fn test_every_datatype_validates_its_default() {
    init_logging();

    let items = plain_items();
    assert_eq!(items.len(), Datatype::ALL.len());

    for ci in &items {
        assert!(ci.validate(ci.def_value()), "{} default invalid", ci.key());
        assert_eq!(ci.curr_value(), ci.def_value());
        assert_eq!(ci.def_value().datatype(), ci.datatype());
    }
}

#[test]
fn test_zero_defaults_are_synthesized() {
    let expected = [
        (Datatype::Bool, ConfigValue::Bool(false)),
        (Datatype::String, ConfigValue::from("")),
        (Datatype::Int, ConfigValue::Int(0)),
        (Datatype::Float, ConfigValue::Float(0.0)),
        (Datatype::List, ConfigValue::List(vec![])),
        (Datatype::Dict, ConfigValue::Dict(serde_json::Map::new())),
    ];

    for (datatype, zero) in expected {
        let ci = ConfigurationItem::new(datatype).unwrap();
        assert_eq!(ci.def_value(), &zero);
        assert_eq!(ci.curr_value(), &zero);
        assert_eq!(ci.key(), DEFAULT_KEY);
    }
}

#[test]
fn test_unknown_datatype_tag_fails() {
    for tag in ["tuple", "BOOL", "integer", "", "str"] {
        let err = ConfigurationItem::builder_from_tag(tag).unwrap_err();
        assert!(matches!(err, Error::InvalidDatatype(_)), "{tag}");
        assert!(err.is_invalid_argument());
    }

    let ci = ConfigurationItem::builder_from_tag("float")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(ci.datatype(), Datatype::Float);
}

#[test]
fn test_default_of_wrong_type_fails() {
    let err = ConfigurationItem::builder(Datatype::Int)
        .default_value("10")
        .build()
        .unwrap_err();
    assert!(err.is_type_mismatch());

    let err = ConfigurationItem::builder(Datatype::Float)
        .default_value(10i64)
        .build()
        .unwrap_err();
    assert!(err.is_type_mismatch());
}

// =============================================================================
// Regex Pattern
// =============================================================================

#[test]
fn test_regex_on_non_string_always_fails() {
    for datatype in Datatype::ALL {
        if datatype == Datatype::String {
            continue;
        }
        let err = ConfigurationItem::builder(datatype)
            .regex_pattern("^x")
            .build()
            .unwrap_err();
        assert!(err.is_type_mismatch(), "{datatype}");
    }
}

#[test]
fn test_regex_setter_on_non_string_fails() {
    let mut ci = ConfigurationItem::new(Datatype::Int).unwrap();
    assert!(ci.set_regex_pattern(Some("^1")).unwrap_err().is_type_mismatch());
    assert!(ci.regex_pattern().is_none());

    // Clearing is always allowed
    ci.set_regex_pattern(None).unwrap();
}

#[test]
fn test_invalid_regex_fails() {
    let err = ConfigurationItem::builder(Datatype::String)
        .regex_pattern("(unclosed")
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { .. }));
}

#[test]
fn test_unsupported_regex_syntax_fails() {
    for pattern in ["(?=foo)", "(?<!x)y", r"(a)\1"] {
        let err = ConfigurationItem::builder(Datatype::String)
            .regex_pattern(pattern)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }), "{pattern}");
        assert!(err.is_invalid_argument());
    }

    let mut ci = ConfigurationItem::new(Datatype::String).unwrap();
    let err = ci.set_regex_pattern(Some("(?=x)")).unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { .. }));
    assert!(ci.regex_pattern().is_none());
}

#[test]
fn test_default_checked_against_regex() {
    // The empty zero default does not start with "foo"
    let err = ConfigurationItem::builder(Datatype::String)
        .regex_pattern("^foo")
        .build()
        .unwrap_err();
    assert!(err.is_invalid_argument());

    let ci = ConfigurationItem::builder(Datatype::String)
        .regex_pattern("^foo")
        .default_value("food")
        .build()
        .unwrap();
    assert_eq!(ci.regex_pattern(), Some("^foo"));
}

// =============================================================================
// Valid Value Set
// =============================================================================

#[test]
fn test_valid_value_set_on_bool_always_fails() {
    let err = ConfigurationItem::builder(Datatype::Bool)
        .valid_values([true, false])
        .build()
        .unwrap_err();
    assert!(err.is_type_mismatch());

    let mut ci = ConfigurationItem::new(Datatype::Bool).unwrap();
    let err = ci
        .set_valid_value_set(Some(vec![ConfigValue::Bool(true)]))
        .unwrap_err();
    assert!(err.is_type_mismatch());

    // An empty set is still a set
    assert!(ci.set_valid_value_set(Some(vec![])).is_err());
    assert!(ci.set_valid_value_set(None).is_ok());
}

#[test]
fn test_valid_value_set_element_types() {
    // List items take string elements
    let err = ConfigurationItem::builder(Datatype::List)
        .valid_values([1i64, 2])
        .build()
        .unwrap_err();
    assert!(err.is_type_mismatch());

    // Int items take int elements only
    let err = ConfigurationItem::builder(Datatype::Int)
        .valid_values(vec![ConfigValue::Int(1), ConfigValue::from("2")])
        .default_value(1i64)
        .build()
        .unwrap_err();
    assert!(err.is_type_mismatch());
}

#[test]
fn test_default_checked_against_valid_value_set() {
    let err = ConfigurationItem::builder(Datatype::String)
        .valid_values(["low", "high"])
        .default_value("medium")
        .build()
        .unwrap_err();
    assert!(err.is_invalid_argument());

    let ci = ConfigurationItem::builder(Datatype::String)
        .valid_values(["low", "high"])
        .default_value("high")
        .build()
        .unwrap();
    assert_eq!(
        ci.valid_value_set(),
        Some(&[ConfigValue::from("low"), ConfigValue::from("high")][..])
    );
}

#[test]
fn test_max_num_selections_must_be_positive() {
    let err = ConfigurationItem::builder(Datatype::List)
        .max_num_selections(0)
        .build()
        .unwrap_err();
    assert!(err.is_invalid_argument());

    let ci = ConfigurationItem::builder(Datatype::List)
        .max_num_selections(4)
        .build()
        .unwrap();
    assert_eq!(ci.max_num_selections(), 4);
}

// =============================================================================
// Metadata and Current Value
// =============================================================================

#[test]
fn test_metadata_is_stored() {
    let ci = ConfigurationItem::builder(Datatype::Int)
        .key("PASSWORDMINLEN")
        .default_value(14i64)
        .user_comment("raised per audit")
        .instructions("Minimum password length.")
        .simple(true)
        .build()
        .unwrap();

    assert_eq!(ci.key(), "PASSWORDMINLEN");
    assert_eq!(ci.user_comment(), "raised per audit");
    assert_eq!(ci.instructions(), "Minimum password length.");
    assert!(ci.in_simple());
}

#[test]
fn test_current_value_goes_through_update_path() {
    let ci = ConfigurationItem::builder(Datatype::Int)
        .default_value(14i64)
        .current_value("16")
        .build()
        .unwrap();

    assert_eq!(ci.def_value(), &ConfigValue::Int(14));
    assert_eq!(ci.curr_value(), &ConfigValue::Int(16));
    assert!(!ci.is_default());
}

#[test]
fn test_rejected_current_value_keeps_default() {
    let ci = ConfigurationItem::builder(Datatype::List)
        .valid_values(["a", "b"])
        .default_value(vec!["a"])
        .current_value("a z")
        .build()
        .unwrap();
    assert_eq!(ci.curr_value(), &ConfigValue::from(vec!["a"]));
    assert!(ci.is_default());

    let ci = ConfigurationItem::builder(Datatype::Bool)
        .default_value(true)
        .current_value("maybe")
        .build()
        .unwrap();
    assert_eq!(ci.curr_value(), &ConfigValue::Bool(true));
}

#[test]
fn test_empty_key_fails() {
    for key in ["", "   ", "\t"] {
        let err = ConfigurationItem::builder(Datatype::Bool)
            .key(key)
            .build()
            .unwrap_err();
        assert!(err.is_invalid_argument(), "{key:?}");
    }

    let mut ci = ConfigurationItem::new(Datatype::Bool).unwrap();
    assert!(ci.set_key(" ").is_err());
    assert_eq!(ci.key(), DEFAULT_KEY);
}
