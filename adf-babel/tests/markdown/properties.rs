//! Property tests: conversion is total and its output keeps the ADF shape.

use adf_babel::convert;
use adf_babel::formats::adf::to_value;
use adf_babel::formats::markdown::preprocess;
use adf_babel::validate::{StructuralValidator, Validator};
use proptest::prelude::*;
use serde_json::Value;

fn markdownish() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("# ".to_string()),
            Just("####### ".to_string()),
            Just("* ".to_string()),
            Just("  * ".to_string()),
            Just("**".to_string()),
            Just("*".to_string()),
            Just("`".to_string()),
            Just("[".to_string()),
            Just("](".to_string()),
            Just(")".to_string()),
            Just("\n".to_string()),
            Just("\n\n".to_string()),
            Just("\r".to_string()),
            Just("\r\n".to_string()),
            "[a-zé ]{1,6}",
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

fn check_list_items(list: &Value) {
    for item in list["content"].as_array().expect("list content") {
        assert_eq!(item["type"], "listItem");
        let parts = item["content"].as_array().expect("item content");
        assert_eq!(parts[0]["type"], "paragraph");
        if let Some(nested) = parts.get(1) {
            assert_eq!(nested["type"], "bulletList");
            check_list_items(nested);
        }
    }
}

proptest! {
    #[test]
    fn preprocess_is_idempotent(source in markdownish()) {
        let once = preprocess(&source);
        prop_assert_eq!(preprocess(&once), once);
    }

    #[test]
    fn every_output_has_adf_shape(source in markdownish()) {
        let json = to_value(&convert(&source)).unwrap();
        prop_assert!(json["type"] == "doc");
        prop_assert!(json["version"] == 1);
        let content = json["content"].as_array().expect("content array");
        for block in content {
            if block["type"] == "bulletList" {
                check_list_items(block);
            }
        }
    }

    #[test]
    fn converted_documents_validate(source in markdownish()) {
        let report = StructuralValidator.validate(&convert(&source));
        prop_assert!(report.is_valid(), "{:?}", report.errors);
    }
}
