use phpantom_codegen::model::{MethodModel, ParameterModel, ParameterRecord};
use phpantom_codegen::{CodegenError, FunctionDeclaration, RenderOptions, Visibility};
use serde_json::json;

#[test]
fn full_model_from_json() {
    let method = FunctionDeclaration::from_json(
        r#"{
            "name": "foo",
            "parameters": ["one", {"name": "two", "type": "?int", "default_value": null}],
            "body": "return $one;",
            "visibility": "protected",
            "static": true,
            "return_type": "string",
            "doc_block": {
                "short_description": "Does foo.",
                "tags": [{"name": "return", "description": "string"}]
            }
        }"#,
    )
    .unwrap();

    assert_eq!(method.name(), "foo");
    assert_eq!(method.visibility(), Visibility::Protected);
    assert!(method.is_static());
    assert_eq!(
        method.render(),
        "    /**
     * Does foo.
     *
     * @return string
     */
    protected static function foo($one, ?int $two = null) : string
    {
        return $one;
    }
"
    );
}

#[test]
fn legacy_lowercase_keys_are_accepted() {
    let method = FunctionDeclaration::from_json_value(json!({
        "name": "bar",
        "returntype": "void",
        "returnsreference": true,
        "docblock": {"shortdescription": "Bar.", "longdescription": "More."},
        "parameters": [{"name": "x", "defaultvalue": 3, "passedbyreference": true}],
    }))
    .unwrap();

    assert!(method.returns_reference());
    assert_eq!(method.return_type().unwrap().render(), "void");
    let doc = method.doc_comment().unwrap();
    assert_eq!(doc.short_description(), "Bar.");
    assert_eq!(doc.long_description(), "More.");
    assert_eq!(method.parameter("x").unwrap().render(), "&$x = 3");
}

#[test]
fn docblock_as_plain_string() {
    let method =
        FunctionDeclaration::from_json_value(json!({"name": "f", "doc_block": "Short only."}))
            .unwrap();
    assert_eq!(method.doc_comment().unwrap().short_description(), "Short only.");
    assert!(method.doc_comment().unwrap().tags().is_empty());
}

#[test]
fn unknown_keys_are_rejected() {
    let err = FunctionDeclaration::from_json_value(json!({"name": "f", "color": "blue"}))
        .unwrap_err();
    assert!(matches!(err, CodegenError::InvalidArgument(_)));

    let err = FunctionDeclaration::from_json_value(json!({
        "name": "f",
        "parameters": [{"name": "x", "nullable": true}],
    }))
    .unwrap_err();
    assert!(matches!(err, CodegenError::InvalidArgument(_)));
}

#[test]
fn mistyped_values_are_rejected() {
    for model in [
        json!({"name": 3}),
        json!({"name": "f", "static": "yes"}),
        json!({"name": "f", "visibility": "internal"}),
        json!({"name": "f", "parameters": "one"}),
        json!({"parameters": []}),
    ] {
        let err = FunctionDeclaration::from_json_value(model.clone()).unwrap_err();
        assert!(matches!(err, CodegenError::InvalidArgument(_)), "{model}");
    }
}

#[test]
fn invalid_return_type_is_a_type_error() {
    let err = FunctionDeclaration::from_json_value(json!({"name": "f", "return_type": "?void"}))
        .unwrap_err();
    assert!(matches!(err, CodegenError::InvalidTypeSpecification(_)));
}

#[test]
fn interface_flag_drops_the_body() {
    let method = FunctionDeclaration::from_json_value(json!({
        "name": "run",
        "interface": true,
        "body": "never rendered",
    }))
    .unwrap();
    assert!(method.is_interface_member());
    assert_eq!(
        method.render_with(&RenderOptions::default().with_indentation("")),
        "public function run();"
    );
}

#[test]
fn typed_model_builds_the_same_declaration() {
    let model = MethodModel {
        name: "foo".to_string(),
        parameters: vec![
            ParameterModel::Name("one".to_string()),
            ParameterModel::Record(ParameterRecord {
                name: "two".to_string(),
                passed_by_reference: true,
                ..ParameterRecord::default()
            }),
        ],
        is_final: true,
        ..MethodModel::default()
    };
    let from_model = FunctionDeclaration::from_model(model).unwrap();
    let from_json = FunctionDeclaration::from_json_value(json!({
        "name": "foo",
        "parameters": ["one", {"name": "two", "passed_by_reference": true}],
        "final": true,
    }))
    .unwrap();
    assert_eq!(from_model, from_json);
}

#[test]
fn set_parameter_value_accepts_loose_json() {
    let mut method = FunctionDeclaration::new("foo");
    method.set_parameter_value(json!("a")).unwrap();
    method
        .set_parameter_value(json!({"name": "b", "type": "array", "default_value": {"k": "v"}}))
        .unwrap();
    assert_eq!(
        method.render_with(&RenderOptions::default().with_indentation("")),
        "public function foo($a, array $b = array('k' => 'v'))\n{\n}\n"
    );
    assert!(method.set_parameter_value(json!(1.5)).is_err());
}

#[test]
fn invalid_function_names_are_rejected() {
    for name in ["", "1x", "foo bar"] {
        let err = FunctionDeclaration::from_json_value(json!({"name": name})).unwrap_err();
        assert!(matches!(err, CodegenError::InvalidArgument(_)), "{name:?}");
    }
}
