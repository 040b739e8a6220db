use phpantom_codegen::{ArrayStyle, CodegenError, ParameterDeclaration, TypeAnnotation, Value};
use serde_json::json;

#[test]
fn bare_name() {
    let param = ParameterDeclaration::new("foo").unwrap();
    assert_eq!(param.render(), "$foo");
}

#[test]
fn dollar_prefix_is_stripped() {
    let param = ParameterDeclaration::new("$foo").unwrap();
    assert_eq!(param.name(), "foo");
    assert_eq!(param.render(), "$foo");
}

#[test]
fn invalid_names_are_rejected() {
    for name in ["", "$", "1st", "foo-bar", "$$foo"] {
        let err = ParameterDeclaration::new(name).unwrap_err();
        assert!(matches!(err, CodegenError::InvalidArgument(_)), "{name:?}");
    }
}

#[test]
fn type_reference_and_default_in_grammar_order() {
    let param = ParameterDeclaration::new("bar")
        .unwrap()
        .with_type(TypeAnnotation::parse("array").unwrap())
        .passed_by_reference(true)
        .with_default(Value::empty_array());
    assert_eq!(param.render(), "array &$bar = array()");
}

#[test]
fn empty_array_default_has_no_terminator() {
    let param = ParameterDeclaration::new("options")
        .unwrap()
        .with_type(TypeAnnotation::parse("array").unwrap())
        .with_default(Value::empty_array());
    assert_eq!(param.render(), "array $options = array()");
    assert_eq!(param.render_with(ArrayStyle::Short), "array $options = []");
}

#[test]
fn variadic_class_typed() {
    let param = ParameterDeclaration::new("items")
        .unwrap()
        .with_type(TypeAnnotation::parse("Foo\\Item").unwrap())
        .variadic(true);
    assert_eq!(param.render(), "\\Foo\\Item ...$items");
}

#[test]
fn nullable_with_null_default() {
    let param = ParameterDeclaration::new("limit")
        .unwrap()
        .with_type(TypeAnnotation::parse("?int").unwrap())
        .with_default(Value::Null);
    assert_eq!(param.to_string(), "?int $limit = null");
}

#[test]
fn scalar_defaults() {
    let cases = [
        (Value::Bool(false), "$p = false"),
        (Value::Int(-3), "$p = -3"),
        (Value::Float(1.5), "$p = 1.5"),
        (Value::Float(2.0), "$p = 2.0"),
        (Value::from("it's"), "$p = 'it\\'s'"),
        (Value::constant("PHP_EOL"), "$p = PHP_EOL"),
    ];
    for (value, expected) in cases {
        let param = ParameterDeclaration::new("p").unwrap().with_default(value);
        assert_eq!(param.render(), expected);
    }
}

#[test]
fn nested_array_default_stays_on_one_line() {
    let value = Value::map([
        ("a", Value::Int(1)),
        ("b", Value::list([Value::Bool(true), Value::Null])),
    ]);
    let param = ParameterDeclaration::new("map").unwrap().with_default(value);
    assert_eq!(param.render(), "$map = array('a' => 1, 'b' => array(true, null))");
}

#[test]
fn from_json_name_or_record() {
    let by_name = ParameterDeclaration::from_json_value(json!("$one")).unwrap();
    assert_eq!(by_name.render(), "$one");

    let record = ParameterDeclaration::from_json_value(json!({
        "name": "options",
        "type": "array",
        "defaultValue": null,
    }));
    // camelCase is not an accepted spelling
    assert!(record.is_err());

    let record = ParameterDeclaration::from_json_value(json!({
        "name": "options",
        "type": "array",
        "default_value": [],
        "passed_by_reference": true,
    }))
    .unwrap();
    assert_eq!(record.render(), "array &$options = array()");
}

#[test]
fn explicit_null_default_differs_from_none() {
    let with_null =
        ParameterDeclaration::from_json_value(json!({"name": "x", "default_value": null})).unwrap();
    assert_eq!(with_null.render(), "$x = null");

    let without = ParameterDeclaration::from_json_value(json!({"name": "x"})).unwrap();
    assert!(!without.has_default());
    assert_eq!(without.render(), "$x");
}

#[test]
fn from_json_rejects_other_shapes() {
    for value in [json!(42), json!(null), json!(["x"]), json!(true)] {
        let err = ParameterDeclaration::from_json_value(value).unwrap_err();
        assert!(matches!(err, CodegenError::InvalidArgument(_)));
    }
}

#[test]
fn record_with_bad_type_reports_the_type() {
    let err = ParameterDeclaration::from_json_value(json!({"name": "x", "type": "int|string"}))
        .unwrap_err();
    assert!(matches!(err, CodegenError::InvalidTypeSpecification(_)));
}
