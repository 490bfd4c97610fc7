//! Integration tests for the generic resource base.
//!
//! These exercise the display form, the identity-aware equality rules, and
//! field access on [`Resource`], plus query-string building.

use distil_api::rest::QueryString;
use distil_api::{Resource, ResourceError};
use serde_json::json;

fn resource(value: serde_json::Value) -> Resource {
    Resource::from_value(value).expect("test value must be a JSON object")
}

// ============================================================================
// Display
// ============================================================================

#[test]
fn test_resource_repr_lists_fields_alphabetically() {
    let r = resource(json!({"foo": "bar", "baz": "spam"}));
    assert_eq!(format!("{r}"), "<Resource baz=spam, foo=bar>");
}

#[test]
fn test_resource_repr_insertion_order_does_not_matter() {
    let r = resource(json!({"zeta": "z", "alpha": "a", "mid": "m"}));
    assert_eq!(format!("{r}"), "<Resource alpha=a, mid=m, zeta=z>");
}

#[test]
fn test_empty_resource_repr() {
    let r = resource(json!({}));
    assert_eq!(format!("{r}"), "<Resource >");
}

// ============================================================================
// Equality
// ============================================================================

#[test]
fn test_eq_same_id_with_differing_fields() {
    // Two resources of the same type with the same id: equal, and the
    // inequality operator must agree.
    let r1 = resource(json!({"id": 1, "name": "hi"}));
    let r2 = resource(json!({"id": 1, "name": "hello"}));
    assert!(r1 == r2);
    assert!(!(r1 != r2));
}

#[test]
fn test_eq_no_ids_with_equal_content() {
    // Two resources with no id: equal iff their content is equal.
    let r1 = resource(json!({"name": "joe", "age": 12}));
    let r2 = resource(json!({"name": "joe", "age": 12}));
    assert!(r1 == r2);
    assert!(!(r1 != r2));
}

#[test]
fn test_eq_no_ids_with_differing_content() {
    let r1 = resource(json!({"name": "joe", "age": 12}));
    let r2 = resource(json!({"name": "joe", "age": 21}));
    assert!(r1 != r2);
    assert!(!(r1 == r2));
}

#[test]
fn test_eq_id_against_no_id_is_unequal() {
    let with_id = resource(json!({"id": 1, "name": "joe"}));
    let without_id = resource(json!({"name": "joe"}));
    assert!(with_id != without_id);
    assert!(without_id != with_id);
}

// ============================================================================
// Field access
// ============================================================================

#[test]
fn test_field_access_by_name() {
    let r = resource(json!({"name": "o1.standard", "rate": 0.049}));
    assert_eq!(r.get_str("name"), Some("o1.standard"));
    assert_eq!(r.get("rate").unwrap(), 0.049);
}

#[test]
fn test_missing_field_is_a_typed_error() {
    let r = resource(json!({"name": "o1.standard"}));
    let error = r.require("unit").unwrap_err();
    assert!(matches!(
        error,
        ResourceError::FieldNotFound { field } if field == "unit"
    ));
}

// ============================================================================
// Query building
// ============================================================================

#[test]
fn test_query_string_comma_joins_in_given_order() {
    let mut query = QueryString::new();
    query.push_list("regions", &["nz-hlz-1", "nz-por-1"]);
    assert_eq!(
        query.append_to("/v2/products"),
        "/v2/products?regions=nz-hlz-1,nz-por-1"
    );
}

#[test]
fn test_query_string_omits_absent_filters() {
    let mut query = QueryString::new();
    query.push_list("regions", &[] as &[&str]);
    query.push_opt("project_id", None::<&str>);
    assert_eq!(query.append_to("/v2/products"), "/v2/products");
}
