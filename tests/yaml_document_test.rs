//! YAML Schema Document Integration Tests
//!
//! Tests for domains declared in YAML:
//! - Nested sections and fields
//! - Unknown type tags surviving the parse
//! - Parse errors

#![cfg(feature = "yaml")]

mod common;

use common::{row, PagesFixture};
use optpage::{DomainDocument, Error, PagesConfig, SchemaRegistry};
use std::sync::Arc;

const SHOP_YAML: &str = r#"
sections:
  - id: general
    label: General
    fields:
      - id: shop_name
        label: Name
      - id: shop_notes
        label: Notes
        type: textarea
        description: Shown on the invoice
      - id: shop_color
        label: Color
        type: colorpicker
"#;

#[test]
fn test_yaml_document_parses() {
    let doc = DomainDocument::from_yaml_str(SHOP_YAML).unwrap();

    let fields = &doc.sections[0].fields;
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0].field_type, None);
    assert_eq!(fields[1].field_type.as_deref(), Some("textarea"));
    assert_eq!(fields[2].field_type.as_deref(), Some("colorpicker"));
}

#[test]
fn test_yaml_domain_renders_with_unknown_type() {
    let registry = Arc::new(SchemaRegistry::new());
    registry.register_document(
        "Shop",
        "shop",
        DomainDocument::from_yaml_str(SHOP_YAML).unwrap(),
    );
    let fixture = PagesFixture::with_registry(registry, PagesConfig::default());

    let output = fixture.view("shop-page");
    assert!(row(&output.markup, "shop_name")
        .unwrap()
        .contains(r#"class="regular-text""#));
    assert!(row(&output.markup, "shop_notes")
        .unwrap()
        .contains("<textarea"));
    assert!(row(&output.markup, "shop_color").is_none());

    assert_eq!(output.field_errors.len(), 1);
    assert!(output.field_errors[0].error.to_string().contains("colorpicker"));
}

#[test]
fn test_yaml_parse_error() {
    let err = DomainDocument::from_yaml_str("sections: [ { label: missing id } ]").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}
