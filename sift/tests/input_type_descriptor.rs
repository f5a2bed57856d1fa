use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;
use sift::convention::operations;
use sift::{
    BindingBehavior, DefaultEntityInspector, DefaultFilterConvention, DescriptorContext, DescriptorError,
    DescriptorOptions, DescriptorResult, Directive, DirectiveArgument, EntityInspector, FieldCandidate, FieldMap,
    FieldOrigin, FilterFieldDefinition, FilterFieldDescriptor, FilterInputTypeDefinition, FilterInputTypeDescriptor,
    FilterOperationFieldDescriptor, MemberRef, StaticFieldProvider, TypeRef,
};

struct Person;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn person_context(behavior: BindingBehavior) -> DescriptorContext {
    let provider = StaticFieldProvider::new().members(TypeRef::of::<Person>(), &["Name", "Age"]);
    DescriptorContext::new()
        .with_options(DescriptorOptions::default().with_binding_behavior(behavior))
        .with_inspector(DefaultEntityInspector::empty().with_provider(provider))
}

fn person(context: &DescriptorContext) -> FilterInputTypeDescriptor {
    FilterInputTypeDescriptor::new(context, None, Some(TypeRef::of::<Person>())).expect("typed descriptor")
}

#[derive(Serialize, Default)]
struct Cost {
    weight: u32,
}

impl Directive for Cost {
    const NAME: &'static str = "cost";
}

// ═══════════════════════════════════════════════════════════════════════════════
// Construction
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn typed_construction_derives_name_and_binding() {
    let context = person_context(BindingBehavior::Explicit);
    let descriptor = person(&context);
    let definition = descriptor.definition();

    assert_eq!(definition.name, "PersonFilterInput");
    assert_eq!(definition.entity_type, TypeRef::of::<Person>());
    assert_eq!(definition.runtime_type, TypeRef::of::<Person>());
    assert_eq!(definition.binding_behavior, BindingBehavior::Explicit);
    assert!(definition.scope.is_none());
}

#[test]
fn typed_construction_uses_scope_convention() {
    let context = person_context(BindingBehavior::Implicit).with_convention(
        "audit",
        DefaultFilterConvention::new(Some("audit")).with_type_description("Person", "Audited people"),
    );
    let descriptor = FilterInputTypeDescriptor::for_entity::<Person>(&context, Some("audit"));

    assert_eq!(descriptor.definition().name, "AuditPersonFilterInput");
    assert_eq!(descriptor.definition().description.as_deref(), Some("Audited people"));
    assert_eq!(descriptor.definition().scope.as_deref(), Some("audit"));
}

#[test]
fn missing_entity_type_fails_before_any_work() {
    struct CountingInspector(Arc<AtomicUsize>);

    impl EntityInspector for CountingInspector {
        fn apply_attributes(
            &self,
            _context: &DescriptorContext,
            _descriptor: &mut FilterInputTypeDescriptor,
            _entity: &TypeRef,
        ) -> DescriptorResult<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    let calls = Arc::new(AtomicUsize::new(0));
    let context = DescriptorContext::new().with_inspector(CountingInspector(Arc::clone(&calls)));

    let err = FilterInputTypeDescriptor::new(&context, None, None).expect_err("entity type is required");
    match err {
        DescriptorError::InvalidArgument { argument, .. } => assert_eq!(argument, "entity_type"),
        other => panic!("expected InvalidArgument, got {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn adopting_requires_a_definition() {
    let context = DescriptorContext::new();
    let err = FilterInputTypeDescriptor::from_definition(&context, None, None).expect_err("definition is required");
    assert!(matches!(err, DescriptorError::InvalidArgument { argument: "definition", .. }));
}

#[test]
fn schema_type_keeps_entity_but_untypes_runtime() {
    let context = person_context(BindingBehavior::Implicit);
    let descriptor = FilterInputTypeDescriptor::from_schema_type(&context, None, TypeRef::of::<Person>());
    assert_eq!(descriptor.definition().entity_type, TypeRef::of::<Person>());
    assert!(descriptor.definition().runtime_type.is_any());

    let definition = descriptor.create_definition().unwrap();
    assert_eq!(definition.field_names(), ["name", "age"]);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Fluent surface
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn fluent_type_configuration() {
    let context = DescriptorContext::new();
    let mut descriptor = FilterInputTypeDescriptor::with_scope(&context, None);
    descriptor
        .name("Custom")
        .unwrap()
        .description("Hand written")
        .allow_or(false)
        .bind_fields_explicitly()
        .directive(Cost { weight: 3 })
        .unwrap()
        .directive_default::<Cost>()
        .unwrap()
        .directive_named("tag", [DirectiveArgument::new("name", "beta")])
        .unwrap();

    let definition = descriptor.create_definition().unwrap();
    assert_eq!(definition.name, "Custom");
    assert_eq!(definition.description.as_deref(), Some("Hand written"));
    assert!(!definition.use_or);
    assert!(definition.use_and);
    assert_eq!(definition.binding_behavior, BindingBehavior::Explicit);
    let names: Vec<_> = definition.directives.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["cost", "cost", "tag"]);
    assert_eq!(definition.directives[0].argument("weight"), Some(&serde_json::json!(3)));
}

#[test]
fn empty_and_invalid_names_fail_at_call_site() {
    let context = DescriptorContext::new();
    let mut descriptor = FilterInputTypeDescriptor::with_scope(&context, None);

    assert!(matches!(descriptor.name(""), Err(DescriptorError::EmptyName { .. })));
    assert!(matches!(descriptor.name("has space"), Err(DescriptorError::InvalidName { .. })));
    assert!(matches!(descriptor.ignore(""), Err(DescriptorError::EmptyName { .. })));
    assert!(descriptor.operation(operations::EQUALS).name("").is_err());
}

#[test]
fn repeated_field_calls_return_the_same_instance() {
    let context = DescriptorContext::new();
    let mut descriptor = FilterInputTypeDescriptor::with_scope(&context, None);

    let first: *const FilterFieldDescriptor = descriptor.field("x").unwrap();
    descriptor.field("x").unwrap().description("second handle");
    let third: *const FilterFieldDescriptor = descriptor.field("x").unwrap();
    assert!(std::ptr::eq(first, third));

    let op_first: *const FilterOperationFieldDescriptor = descriptor.operation(3);
    descriptor.operation(3).description("op");
    let op_second: *const FilterOperationFieldDescriptor = descriptor.operation(3);
    assert!(std::ptr::eq(op_first, op_second));

    assert_eq!(descriptor.fields().len(), 1);
    assert_eq!(descriptor.operations().len(), 1);
    assert_eq!(descriptor.field("x").unwrap().definition().description.as_deref(), Some("second handle"));
}

// ═══════════════════════════════════════════════════════════════════════════════
// Finalization and merge
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn explicit_name_and_ignore_claim_reflected_members() {
    init_logging();
    let context = person_context(BindingBehavior::Implicit);
    let mut descriptor = person(&context);
    descriptor.field("Name").unwrap().description("Full name");
    descriptor.ignore("Age").unwrap();

    let definition = descriptor.create_definition().unwrap();
    assert_eq!(definition.fields.len(), 1);
    let name = &definition.fields[0];
    assert_eq!(name.name, "Name");
    assert_eq!(name.description.as_deref(), Some("Full name"));
    assert_eq!(name.member, Some(MemberRef::new("Person", "Name")));
    assert!(definition.field("Age").is_none());
    assert!(definition.field("age").is_none());
}

#[test]
fn explicit_field_wins_over_inferred_field_with_same_name() {
    init_logging();
    let provider = StaticFieldProvider::new().entity(
        TypeRef::of::<Person>(),
        [FieldCandidate::member(MemberRef::of::<Person>("age")).described("reflected")],
    );
    let context = DescriptorContext::new()
        .with_options(DescriptorOptions::default())
        .with_inspector(DefaultEntityInspector::empty().with_provider(provider));

    let mut descriptor = person(&context);
    descriptor
        .member(MemberRef::of::<Person>("years_alive"))
        .name("age")
        .unwrap()
        .description("explicit")
        .directive_named("internal", [DirectiveArgument::new("audience", "staff")])
        .unwrap();

    let definition = descriptor.create_definition().unwrap();
    assert_eq!(definition.fields.len(), 1);
    let age = definition.field("age").unwrap();
    assert_eq!(age.description.as_deref(), Some("explicit"));
    assert_eq!(age.directives.len(), 1);
    assert_eq!(age.member, Some(MemberRef::of::<Person>("years_alive")));
    assert_eq!(age.origin, FieldOrigin::Explicit);
}

#[test]
fn inferred_duplicates_for_one_member_collapse() {
    let first = StaticFieldProvider::new().entity(
        TypeRef::of::<Person>(),
        [FieldCandidate::member(MemberRef::of::<Person>("email")).described("first")],
    );
    let second = StaticFieldProvider::new().entity(
        TypeRef::of::<Person>(),
        [FieldCandidate::member(MemberRef::of::<Person>("email")).named("mail").described("second")],
    );
    let context = DescriptorContext::new()
        .with_options(DescriptorOptions::default())
        .with_inspector(DefaultEntityInspector::empty().with_provider(first).with_provider(second));

    let definition = person(&context).create_definition().unwrap();
    assert_eq!(definition.field_names(), ["email"]);
    assert_eq!(definition.fields[0].description.as_deref(), Some("first"));
}

#[test]
fn ignore_on_untouched_field_removes_it() {
    let context = DescriptorContext::new();
    let mut descriptor = FilterInputTypeDescriptor::with_scope(&context, None);
    descriptor.name("Manual").unwrap();
    descriptor.field("kept").unwrap();
    descriptor.ignore("x").unwrap();

    assert_eq!(descriptor.fields().len(), 2);
    let definition = descriptor.create_definition().unwrap();
    assert_eq!(definition.field_names(), ["kept"]);
}

#[test]
fn declaration_order_is_preserved() {
    let context = DescriptorContext::new();
    let mut descriptor = FilterInputTypeDescriptor::with_scope(&context, None);
    descriptor.name("Ordered").unwrap();
    descriptor.operation(operations::OR);
    descriptor.field("a").unwrap();
    descriptor.field("b").unwrap();
    descriptor.operation(operations::AND);
    descriptor.field("c").unwrap();

    let definition = descriptor.create_definition().unwrap();
    assert_eq!(definition.field_names(), ["a", "b", "c", "or", "and"]);
    assert!(definition.field("or").unwrap().is_operation());
}

#[test]
fn explicit_binding_skips_undeclared_members() {
    let provider = StaticFieldProvider::new()
        .members(TypeRef::of::<Person>(), &["name", "age"])
        .entity(
            TypeRef::of::<Person>(),
            [FieldCandidate::member(MemberRef::of::<Person>("nickname")).declared()],
        );
    let context = DescriptorContext::new()
        .with_options(DescriptorOptions::default().with_binding_behavior(BindingBehavior::Explicit))
        .with_inspector(DefaultEntityInspector::empty().with_provider(provider.clone()));

    let mut explicit = person(&context);
    explicit.field("name").unwrap();
    let definition = explicit.create_definition().unwrap();
    assert_eq!(definition.field_names(), ["name", "nickname"]);

    let mut implicit = person(&context);
    implicit.bind_fields_implicitly();
    let definition = implicit.create_definition().unwrap();
    assert_eq!(definition.field_names(), ["name", "age", "nickname"]);
}

#[test]
fn inferred_operations_yield_to_explicit_ones() {
    let provider = StaticFieldProvider::new().entity(
        TypeRef::of::<Person>(),
        [
            FieldCandidate::operation(operations::EQUALS).described("inferred"),
            FieldCandidate::operation(operations::IN),
        ],
    );
    let context = DescriptorContext::new()
        .with_options(DescriptorOptions::default())
        .with_inspector(DefaultEntityInspector::empty().with_provider(provider));

    let mut descriptor = person(&context);
    descriptor.operation(operations::EQUALS).description("explicit");
    descriptor.ignore_operation(operations::IN);

    let definition = descriptor.create_definition().unwrap();
    assert_eq!(definition.field_names(), ["eq"]);
    assert_eq!(definition.fields[0].description.as_deref(), Some("explicit"));
}

#[test]
fn operation_names_follow_the_scope_convention() {
    let context = DescriptorContext::new().with_convention(
        "verbose",
        DefaultFilterConvention::new(Some("verbose")).with_operation(operations::EQUALS, "equals"),
    );
    let mut descriptor = FilterInputTypeDescriptor::with_scope(&context, Some("verbose"));
    descriptor.name("Verbose").unwrap();
    descriptor.operation(operations::EQUALS);

    let definition = descriptor.create_definition().unwrap();
    assert_eq!(definition.field_names(), ["equals"]);
}

#[test]
fn unknown_operation_fails_finalization() {
    let context = DescriptorContext::new();
    let mut descriptor = FilterInputTypeDescriptor::with_scope(&context, None);
    descriptor.operation(999);

    let err = descriptor.create_definition().expect_err("operation 999 has no name");
    assert!(matches!(err, DescriptorError::UnknownOperation { operation: 999, .. }));
}

#[test]
fn inspector_errors_propagate_unchanged() {
    struct FailingInspector;

    impl EntityInspector for FailingInspector {
        fn apply_attributes(
            &self,
            _context: &DescriptorContext,
            _descriptor: &mut FilterInputTypeDescriptor,
            entity: &TypeRef,
        ) -> DescriptorResult<()> {
            Err(DescriptorError::Inspector {
                entity: entity.to_string(),
                message: "attribute table unavailable".to_string(),
            })
        }
    }

    let context = DescriptorContext::new().with_inspector(FailingInspector);
    let err = FilterInputTypeDescriptor::for_entity::<Person>(&context, None)
        .create_definition()
        .expect_err("inspector failure");
    match err {
        DescriptorError::Inspector { entity, message } => {
            assert_eq!(entity, "Person");
            assert_eq!(message, "attribute table unavailable");
        }
        other => panic!("expected Inspector error, got {other:?}"),
    }
}

#[test]
fn bare_scope_descriptor_skips_inspection() {
    struct PanickingInspector;

    impl EntityInspector for PanickingInspector {
        fn apply_attributes(
            &self,
            _context: &DescriptorContext,
            _descriptor: &mut FilterInputTypeDescriptor,
            _entity: &TypeRef,
        ) -> DescriptorResult<()> {
            panic!("untyped descriptors must not be inspected");
        }
    }

    let context = DescriptorContext::new().with_inspector(PanickingInspector);
    let mut descriptor = FilterInputTypeDescriptor::with_scope(&context, None);
    descriptor.name("Untyped").unwrap();
    assert!(descriptor.create_definition().unwrap().fields.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════════
// Completion hook and adoption
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn completion_hook_sees_merged_fields_and_handled_members() {
    let context = person_context(BindingBehavior::Implicit);
    let mut descriptor = person(&context);
    descriptor.ignore("Age").unwrap();
    descriptor.with_completion(
        |_: &DescriptorContext,
         definition: &FilterInputTypeDefinition,
         fields: &mut FieldMap,
         handled: &mut HashSet<MemberRef>|
         -> DescriptorResult<()> {
            assert_eq!(definition.name, "PersonFilterInput");
            assert!(handled.contains(&MemberRef::new("Person", "Age")));
            assert!(fields.contains_key("name"));

            let computed = MemberRef::new("Person", "display_label");
            if handled.insert(computed.clone()) {
                fields.insert(FilterFieldDefinition {
                    member: Some(computed),
                    description: Some("computed".to_string()),
                    ..FilterFieldDefinition::new("displayLabel")
                });
            }
            Ok(())
        },
    );

    let definition = descriptor.create_definition().unwrap();
    assert_eq!(definition.field_names(), ["name", "displayLabel"]);
}

#[test]
fn completion_hook_errors_propagate() {
    let context = DescriptorContext::new();
    let mut descriptor = FilterInputTypeDescriptor::with_scope(&context, None);
    descriptor.with_completion(
        |_: &DescriptorContext,
         _: &FilterInputTypeDefinition,
         fields: &mut FieldMap,
         _: &mut HashSet<MemberRef>|
         -> DescriptorResult<()> {
            if fields.is_empty() {
                return Err(DescriptorError::Completion {
                    message: "at least one field required".to_string(),
                });
            }
            Ok(())
        },
    );

    assert!(matches!(
        descriptor.create_definition(),
        Err(DescriptorError::Completion { .. })
    ));
}

#[test]
fn completion_hook_renames_keep_field_names_unique() {
    let context = DescriptorContext::new();
    let mut descriptor = FilterInputTypeDescriptor::with_scope(&context, None);
    descriptor.name("Renamed").unwrap();
    descriptor.field("a").unwrap().description("first");
    descriptor.field("b").unwrap();
    descriptor.with_completion(
        |_: &DescriptorContext,
         _: &FilterInputTypeDefinition,
         fields: &mut FieldMap,
         _: &mut HashSet<MemberRef>|
         -> DescriptorResult<()> {
            assert!(fields.update("a", |field| field.name = "c".to_string()));
            assert!(!fields.contains_key("a"));
            fields.insert(FilterFieldDefinition {
                description: Some("replacement".to_string()),
                ..FilterFieldDefinition::new("c")
            });
            Ok(())
        },
    );

    let definition = descriptor.create_definition().unwrap();
    assert_eq!(definition.field_names(), ["c", "b"]);
    assert_eq!(definition.field("c").unwrap().description.as_deref(), Some("replacement"));
}

#[test]
fn adopted_definition_is_extended_without_duplicates() {
    let context = DescriptorContext::new();
    let mut base = FilterInputTypeDescriptor::with_scope(&context, None);
    base.name("Base").unwrap();
    base.field("a").unwrap().description("base a");
    base.field("b").unwrap();
    let base = base.create_definition().unwrap();

    let mut extended = FilterInputTypeDescriptor::from_definition(&context, Some(base), None).unwrap();
    extended.field("a").unwrap().description("override a");
    extended.ignore("b").unwrap();
    extended.field("c").unwrap();

    let definition = extended.create_definition().unwrap();
    assert_eq!(definition.name, "Base");
    assert_eq!(definition.field_names(), ["a", "c"]);
    assert_eq!(definition.field("a").unwrap().description.as_deref(), Some("override a"));
}

#[test]
fn definition_serializes_for_schema_compiler() {
    let context = person_context(BindingBehavior::Implicit);
    let mut descriptor = person(&context);
    descriptor.allow_and(false);

    let definition = descriptor.create_definition().unwrap();
    let json = serde_json::to_value(&definition).unwrap();
    assert_eq!(json["name"], "PersonFilterInput");
    assert_eq!(json["entity_type"], "Person");
    assert_eq!(json["binding_behavior"], "implicit");
    assert_eq!(json["use_and"], false);
    assert_eq!(json["fields"][0]["name"], "name");
    assert_eq!(json["fields"][0]["member"]["member"], "Name");
    assert!(json["fields"][0].get("ignore").is_none());
}
