use phpantom_codegen::{CodegenError, ErrorKind, TypeAnnotation, TypeKind};

#[test]
fn builtins_are_lower_cased_and_unprefixed() {
    let t = TypeAnnotation::parse("INT").unwrap();
    assert_eq!(t.kind(), TypeKind::Builtin);
    assert_eq!(t.render(), "int");
    assert!(!t.is_nullable());
}

#[test]
fn class_references_get_a_leading_backslash() {
    let t = TypeAnnotation::parse("Foo\\Bar").unwrap();
    assert_eq!(t.kind(), TypeKind::ClassRef);
    assert_eq!(t.name(), "Foo\\Bar");
    assert_eq!(t.render(), "\\Foo\\Bar");

    let already = TypeAnnotation::parse("\\Foo\\Bar").unwrap();
    assert_eq!(already, t);
}

#[test]
fn question_mark_and_null_union_are_the_same_type() {
    let question = TypeAnnotation::parse("?int").unwrap();
    let union = TypeAnnotation::parse("int|null").unwrap();
    let reversed = TypeAnnotation::parse("null|int").unwrap();
    assert_eq!(question, union);
    assert_eq!(question, reversed);
    assert_eq!(question.render(), "?int");
}

#[test]
fn nullable_class_reference() {
    let t = TypeAnnotation::parse("?DateTime").unwrap();
    assert_eq!(t.render(), "?\\DateTime");
}

#[test]
fn special_kinds() {
    assert_eq!(TypeAnnotation::parse("void").unwrap().kind(), TypeKind::Void);
    assert_eq!(TypeAnnotation::parse("iterable").unwrap().kind(), TypeKind::Iterable);
    assert_eq!(TypeAnnotation::parse("callable").unwrap().kind(), TypeKind::Callable);
    let this = TypeAnnotation::parse("self").unwrap();
    assert_eq!(this.kind(), TypeKind::SelfRef);
    assert_eq!(this.render(), "self");
    assert_eq!(TypeAnnotation::parse("?static").unwrap().render(), "?static");
}

#[test]
fn void_cannot_be_nullable() {
    let err = TypeAnnotation::parse("?void").unwrap_err();
    assert!(matches!(err, CodegenError::InvalidTypeSpecification(_)));
    assert_eq!(err.kind(), ErrorKind::MalformedInput);

    assert!(TypeAnnotation::void().into_nullable().is_err());
    assert!(TypeAnnotation::parse("?mixed").is_err());
    assert!(TypeAnnotation::parse("null|never").is_err());
}

#[test]
fn wide_unions_and_garbage_are_rejected() {
    for spec in ["int|string", "int|string|null", "", "?", "Foo Bar", "1abc", "Foo\\\\Bar"] {
        let err = TypeAnnotation::parse(spec).unwrap_err();
        assert!(
            matches!(err, CodegenError::InvalidTypeSpecification(_)),
            "{spec:?} should be rejected, got {err:?}"
        );
    }
}

#[test]
fn explicit_constructors() {
    assert_eq!(TypeAnnotation::builtin("array").unwrap().render(), "array");
    assert!(TypeAnnotation::builtin("Foo").is_err());
    assert_eq!(TypeAnnotation::class("\\Runnable").unwrap().render(), "\\Runnable");
    assert!(TypeAnnotation::class("").is_err());
    let nullable = TypeAnnotation::iterable().into_nullable().unwrap();
    assert_eq!(nullable.to_string(), "?iterable");
    assert_eq!(TypeAnnotation::callable().render(), "callable");
}
