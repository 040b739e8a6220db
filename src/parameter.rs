//! Parameter declarations.
//!
//! A [`ParameterDeclaration`] renders in the order the PHP grammar
//! requires: `Type &...$name = default`.  Defaults use the single-line
//! value renderer and are never terminated with `;`.

use std::fmt;

use crate::error::{CodegenError, Result};
use crate::model::{ParameterModel, ParameterRecord};
use crate::types::{TypeAnnotation, is_identifier};
use crate::value::{ArrayStyle, Value};

/// One parameter of a function or method.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDeclaration {
    /// Name without the `$` prefix (e.g. "options").
    name: String,
    type_annotation: Option<TypeAnnotation>,
    default_value: Option<Value>,
    passed_by_reference: bool,
    variadic: bool,
}

impl ParameterDeclaration {
    /// A parameter with no type, default or markers.  The name may carry a
    /// leading `$`.
    pub fn new(name: &str) -> Result<Self> {
        let bare = name.strip_prefix('$').unwrap_or(name);
        if !is_identifier(bare) {
            return Err(CodegenError::invalid_argument(format!(
                "{name:?} is not a valid parameter name"
            )));
        }
        Ok(Self {
            name: bare.to_string(),
            type_annotation: None,
            default_value: None,
            passed_by_reference: false,
            variadic: false,
        })
    }

    /// Build from a parameter record of a model map.
    pub fn from_record(record: ParameterRecord) -> Result<Self> {
        let mut param = Self::new(&record.name)?;
        if let Some(type_hint) = record.type_hint.as_deref() {
            param.type_annotation = Some(TypeAnnotation::parse(type_hint)?);
        }
        param.default_value = record.default_value.map(Value::from);
        param.passed_by_reference = record.passed_by_reference;
        param.variadic = record.variadic;
        Ok(param)
    }

    pub fn from_model(model: ParameterModel) -> Result<Self> {
        match model {
            ParameterModel::Name(name) => Self::new(&name),
            ParameterModel::Record(record) => Self::from_record(record),
        }
    }

    /// Build from loosely typed JSON: a string is a bare name, an object a
    /// parameter record.  Any other shape is rejected.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(name) => Self::new(&name),
            serde_json::Value::Object(_) => {
                let record: ParameterRecord = serde_json::from_value(value)
                    .map_err(|e| CodegenError::invalid_argument(e.to_string()))?;
                Self::from_record(record)
            }
            other => Err(CodegenError::invalid_argument(format!(
                "cannot build a parameter from {}",
                json_shape(&other)
            ))),
        }
    }

    pub fn with_type(mut self, annotation: TypeAnnotation) -> Self {
        self.type_annotation = Some(annotation);
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn passed_by_reference(mut self, by_ref: bool) -> Self {
        self.passed_by_reference = by_ref;
        self
    }

    pub fn variadic(mut self, variadic: bool) -> Self {
        self.variadic = variadic;
        self
    }

    pub fn set_type(&mut self, annotation: Option<TypeAnnotation>) {
        self.type_annotation = annotation;
    }

    pub fn set_default_value(&mut self, value: Option<Value>) {
        self.default_value = value;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_annotation(&self) -> Option<&TypeAnnotation> {
        self.type_annotation.as_ref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }

    pub fn is_passed_by_reference(&self) -> bool {
        self.passed_by_reference
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    /// Self-consistency: a variadic parameter cannot have a default.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.variadic && self.default_value.is_some() {
            return Err(CodegenError::invalid_argument(format!(
                "variadic parameter ${} cannot have a default value",
                self.name
            )));
        }
        Ok(())
    }

    /// Render with long-form array defaults.
    pub fn render(&self) -> String {
        self.render_with(ArrayStyle::default())
    }

    pub fn render_with(&self, array_style: ArrayStyle) -> String {
        let mut out = String::new();
        if let Some(annotation) = &self.type_annotation {
            out.push_str(&annotation.render());
            out.push(' ');
        }
        if self.passed_by_reference {
            out.push('&');
        }
        if self.variadic {
            out.push_str("...");
        }
        out.push('$');
        out.push_str(&self.name);
        if let Some(default) = &self.default_value {
            out.push_str(" = ");
            out.push_str(&default.render(array_style));
        }
        out
    }
}

impl fmt::Display for ParameterDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Every shape a parameter can be supplied in.
#[derive(Debug, Clone)]
pub enum ParameterSpec {
    Name(String),
    Model(ParameterModel),
    Declaration(ParameterDeclaration),
}

impl ParameterSpec {
    pub fn into_declaration(self) -> Result<ParameterDeclaration> {
        match self {
            ParameterSpec::Name(name) => ParameterDeclaration::new(&name),
            ParameterSpec::Model(model) => ParameterDeclaration::from_model(model),
            ParameterSpec::Declaration(decl) => Ok(decl),
        }
    }
}

impl From<&str> for ParameterSpec {
    fn from(name: &str) -> Self {
        ParameterSpec::Name(name.to_string())
    }
}

impl From<String> for ParameterSpec {
    fn from(name: String) -> Self {
        ParameterSpec::Name(name)
    }
}

impl From<ParameterModel> for ParameterSpec {
    fn from(model: ParameterModel) -> Self {
        ParameterSpec::Model(model)
    }
}

impl From<ParameterRecord> for ParameterSpec {
    fn from(record: ParameterRecord) -> Self {
        ParameterSpec::Model(ParameterModel::Record(record))
    }
}

impl From<ParameterDeclaration> for ParameterSpec {
    fn from(decl: ParameterDeclaration) -> Self {
        ParameterSpec::Declaration(decl)
    }
}

fn json_shape(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
