//! Behavioural coverage for `filter_datum` and `FieldFilter`.
//!
//! These tests pin down the laws callers rely on: messages without configured
//! fields pass through, an empty field list changes nothing, values stop at the
//! first separator, and filtering twice equals filtering once.

use filtered_logger::{filter_datum, FieldFilter, PII_FIELDS};

const NO_FIELDS: [&str; 0] = [];

#[test]
fn test_identity_without_configured_fields() {
    let messages = [
        "",
        "plain text with no pairs",
        "id=1;role=admin;",
        "emails=2;phones=3;",
        "=;;;==",
    ];
    for message in messages {
        assert_eq!(filter_datum(&["email", "ssn"], "***", message, ";"), message);
    }
}

#[test]
fn test_empty_field_list_is_noop() {
    for message in ["email=a@b.com;", "ssn=1;name=x;", "garbage"] {
        assert_eq!(filter_datum(&NO_FIELDS, "***", message, ";"), message);
    }
}

#[test]
fn test_single_middle_field() {
    assert_eq!(
        filter_datum(&["b"], "***", "a=1;b=2;c=3;", ";"),
        "a=1;b=***;c=3;"
    );
}

#[test]
fn test_non_greedy_boundary() {
    assert_eq!(
        filter_datum(&["email"], "***", "email=a@b.com;name=Bob;", ";"),
        "email=***;name=Bob;"
    );
}

#[test]
fn test_idempotence() {
    let message = "name=Bob;email=bob@dylan.com;phone=000-000;ssn=111;password=x;ip=1.1.1.1;";
    let once = filter_datum(&PII_FIELDS, "***", message, ";");
    let twice = filter_datum(&PII_FIELDS, "***", &once, ";");
    assert_eq!(once, twice);
    assert_eq!(
        once,
        "name=***;email=***;phone=***;ssn=***;password=***;ip=1.1.1.1;"
    );
}

#[test]
fn test_duplicate_fields_are_harmless() {
    assert_eq!(
        filter_datum(&["ssn", "ssn"], "***", "ssn=1;id=2;", ";"),
        "ssn=***;id=2;"
    );
}

#[test]
fn test_overlapping_field_names_stay_anchored() {
    let message = "username=bob;name=Bob;first_name=Rob;";
    assert_eq!(
        filter_datum(&["name"], "***", message, ";"),
        "username=bob;name=***;first_name=Rob;"
    );
}

#[test]
fn test_value_containing_equals_sign() {
    assert_eq!(
        filter_datum(&["password"], "***", "password=a=b=c;id=1;", ";"),
        "password=***;id=1;"
    );
}

#[test]
fn test_multiline_value_is_redacted() {
    assert_eq!(
        filter_datum(&["name"], "***", "name=Bob\nBobson;id=1;", ";"),
        "name=***;id=1;"
    );
}

#[test]
fn test_unicode_values() {
    assert_eq!(
        filter_datum(&["name"], "[x]", "name=秘密🔒;city=Zürich;", ";"),
        "name=[x];city=Zürich;"
    );
}

#[test]
fn test_compiled_filter_matches_free_function() {
    let filter = FieldFilter::new(PII_FIELDS, "***", ";").unwrap();
    let message = "email=x@y.com;ssn=123-45-6789;id=42;";
    assert_eq!(
        filter.apply(message),
        filter_datum(&PII_FIELDS, "***", message, ";")
    );
}

#[test]
fn test_filter_is_shareable_across_threads() {
    let filter = std::sync::Arc::new(FieldFilter::new(["ssn"], "***", ";").unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let filter = std::sync::Arc::clone(&filter);
            std::thread::spawn(move || filter.apply(&format!("ssn={i};id={i};")))
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("ssn=***;id={i};"));
    }
}
