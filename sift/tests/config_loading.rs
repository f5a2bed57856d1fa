use std::io::Write;

use sift::convention::operations;
use sift::{BindingBehavior, ConfigError, DescriptorContext, FieldNaming, FilterInputTypeDescriptor, SiftConfig};
use tempfile::NamedTempFile;

struct Invoice;

const CONFIG: &str = r#"
[options]
default_binding_behavior = "explicit"

[convention]
type_name_suffix = "Filter"

[convention.type_descriptions]
Invoice = "Billing documents"

[[convention.operations]]
id = 0
name = "equals"
description = "Exact match"

[scopes.legacy]
field_naming = "as_declared"
type_name_suffix = "Where"
"#;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

#[test]
fn load_reads_options_and_scopes() {
    let file = write_config(CONFIG);
    let config = SiftConfig::load(file.path()).unwrap();

    assert_eq!(config.options.default_binding_behavior, BindingBehavior::Explicit);
    assert_eq!(config.convention.type_name_suffix, "Filter");
    assert_eq!(config.scopes["legacy"].field_naming, FieldNaming::AsDeclared);
}

#[test]
fn configured_context_drives_descriptors() {
    let file = write_config(CONFIG);
    let context = DescriptorContext::from_config(&SiftConfig::load(file.path()).unwrap());

    let mut descriptor = FilterInputTypeDescriptor::for_entity::<Invoice>(&context, None);
    assert_eq!(descriptor.binding_behavior(), BindingBehavior::Explicit);
    descriptor.operation(operations::EQUALS);
    descriptor.operation(operations::IN);

    let definition = descriptor.create_definition().unwrap();
    assert_eq!(definition.name, "InvoiceFilter");
    assert_eq!(definition.description.as_deref(), Some("Billing documents"));
    assert_eq!(definition.field_names(), ["equals", "in"]);
    assert_eq!(definition.fields[0].description.as_deref(), Some("Exact match"));

    let legacy = FilterInputTypeDescriptor::for_entity::<Invoice>(&context, Some("legacy"));
    assert_eq!(legacy.definition().name, "LegacyInvoiceWhere");
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    match SiftConfig::load(&path) {
        Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn load_reports_parse_and_validation_errors() {
    let malformed = write_config("[options\n");
    assert!(matches!(SiftConfig::load(malformed.path()), Err(ConfigError::Parse(_))));

    let invalid = write_config(
        r#"
        [scopes.audit]
        type_name_suffix = "Filter Input"
        "#,
    );
    let err = SiftConfig::load(invalid.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
    assert!(err.to_string().contains("audit"));
}
