//! Function and method declarations.
//!
//! [`FunctionDeclaration`] is the in-memory form of a method before it is
//! turned into source text.  It owns its parameters and docblock
//! exclusively; rendering (see [`crate::render`]) only borrows it.

use std::fmt;

use tracing::debug;

use crate::config::RenderOptions;
use crate::docblock::DocComment;
use crate::error::{CodegenError, Result};
use crate::model::MethodModel;
use crate::parameter::{ParameterDeclaration, ParameterSpec};
use crate::render;
use crate::types::{ModifierSet, TypeAnnotation, Visibility, is_identifier};

/// A function or method: signature, body and documentation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FunctionDeclaration {
    name: String,
    /// In declaration order; names are unique.
    parameters: Vec<ParameterDeclaration>,
    body: String,
    doc_comment: Option<DocComment>,
    return_type: Option<TypeAnnotation>,
    returns_reference: bool,
    modifiers: ModifierSet,
    is_interface_member: bool,
}

impl FunctionDeclaration {
    /// Start an empty declaration.  The name is taken as given; use
    /// [`FunctionDeclaration::set_name`] or a model map when it comes from
    /// untrusted input and should be checked.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build from a model map.
    ///
    /// Fails with [`CodegenError::InvalidTypeSpecification`] when the
    /// return type does not parse, and with
    /// [`CodegenError::InvalidArgument`] for unusable parameters.
    pub fn from_model(model: MethodModel) -> Result<Self> {
        check_name(&model.name)?;
        let mut decl = Self::new(model.name);
        for param in model.parameters {
            decl.set_parameter(param)?;
        }
        decl.body = model.body;
        decl.doc_comment = model.doc_block.map(DocComment::from_model);
        decl.modifiers = ModifierSet {
            visibility: model.visibility,
            is_static: model.is_static,
            is_abstract: model.is_abstract,
            is_final: model.is_final,
        };
        decl.return_type = model
            .return_type
            .as_deref()
            .map(TypeAnnotation::parse)
            .transpose()?;
        decl.returns_reference = model.returns_reference;
        if model.is_interface {
            decl.set_interface_member(true);
        }
        Ok(decl)
    }

    /// Build from a JSON model map (see [`crate::model::MethodModel`]).
    /// Unknown keys and mistyped values are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let model: MethodModel =
            serde_json::from_str(json).map_err(|e| CodegenError::invalid_argument(e.to_string()))?;
        Self::from_model(model)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        let model: MethodModel = serde_json::from_value(value)
            .map_err(|e| CodegenError::invalid_argument(e.to_string()))?;
        Self::from_model(model)
    }

    // ─── Name ───────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the declaration.  Fails with
    /// [`CodegenError::InvalidArgument`] unless `name` is a PHP identifier.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        let name = name.into();
        check_name(&name)?;
        self.name = name;
        Ok(self)
    }

    // ─── Parameters ─────────────────────────────────────────────────────

    pub fn parameters(&self) -> &[ParameterDeclaration] {
        &self.parameters
    }

    /// Look a parameter up by name (with or without `$`).
    pub fn parameter(&self, name: &str) -> Option<&ParameterDeclaration> {
        let name = name.strip_prefix('$').unwrap_or(name);
        self.parameters.iter().find(|p| p.name() == name)
    }

    /// Replace all parameters.  On error the previous list is kept.
    pub fn set_parameters<I, S>(&mut self, parameters: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<ParameterSpec>,
    {
        let previous = std::mem::take(&mut self.parameters);
        for param in parameters {
            if let Err(e) = self.set_parameter(param) {
                self.parameters = previous;
                return Err(e);
            }
        }
        Ok(self)
    }

    /// Add a parameter, or replace the one with the same name in place.
    ///
    /// A variadic parameter must stay last and carries no default; any
    /// attempt to break that fails with [`CodegenError::InvalidArgument`].
    pub fn set_parameter(&mut self, parameter: impl Into<ParameterSpec>) -> Result<&mut Self> {
        let parameter = parameter.into().into_declaration()?;
        parameter.validate()?;

        let existing = self
            .parameters
            .iter()
            .position(|p| p.name() == parameter.name());
        let last = match existing {
            Some(idx) => idx + 1 == self.parameters.len(),
            None => true,
        };

        if parameter.is_variadic() && !last {
            return Err(CodegenError::invalid_argument(format!(
                "variadic parameter ${} must be the last parameter",
                parameter.name()
            )));
        }
        if existing.is_none()
            && let Some(variadic) = self.parameters.last().filter(|p| p.is_variadic())
        {
            return Err(CodegenError::invalid_argument(format!(
                "parameter ${} cannot follow variadic parameter ${}",
                parameter.name(),
                variadic.name()
            )));
        }

        match existing {
            Some(idx) => {
                debug!("replacing parameter ${} of {}", parameter.name(), self.name);
                self.parameters[idx] = parameter;
            }
            None => self.parameters.push(parameter),
        }
        Ok(self)
    }

    /// Add a parameter given as loosely typed JSON; see
    /// [`ParameterDeclaration::from_json_value`].
    pub fn set_parameter_value(&mut self, value: serde_json::Value) -> Result<&mut Self> {
        let parameter = ParameterDeclaration::from_json_value(value)?;
        self.set_parameter(parameter)
    }

    /// Strict ordering check: once a parameter has a default, every later
    /// non-variadic parameter must have one too.
    ///
    /// Rendering does not call this; PHP accepts (with a deprecation) what
    /// this rejects.
    pub fn validate_parameter_order(&self) -> Result<()> {
        let mut optional: Option<&ParameterDeclaration> = None;
        for param in &self.parameters {
            match optional {
                Some(prev) if !param.has_default() && !param.is_variadic() => {
                    return Err(CodegenError::invalid_argument(format!(
                        "required parameter ${} follows optional parameter ${}",
                        param.name(),
                        prev.name()
                    )));
                }
                None if param.has_default() => optional = Some(param),
                _ => {}
            }
        }
        Ok(())
    }

    // ─── Body & docblock ────────────────────────────────────────────────

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Body text without braces.  Ignored when rendering abstract and
    /// interface members.
    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = body.into();
        self
    }

    pub fn doc_comment(&self) -> Option<&DocComment> {
        self.doc_comment.as_ref()
    }

    pub fn set_doc_comment(&mut self, doc_comment: Option<DocComment>) -> &mut Self {
        self.doc_comment = doc_comment;
        self
    }

    /// Parse `text` (with delimiters) and attach it as the docblock.
    pub fn set_doc_comment_text(&mut self, text: &str) -> Result<&mut Self> {
        self.doc_comment = Some(DocComment::parse(text)?);
        Ok(self)
    }

    // ─── Return type ────────────────────────────────────────────────────

    pub fn return_type(&self) -> Option<&TypeAnnotation> {
        self.return_type.as_ref()
    }

    /// `None` removes the return clause entirely; it is never defaulted.
    pub fn set_return_type(&mut self, return_type: Option<TypeAnnotation>) -> &mut Self {
        self.return_type = return_type;
        self
    }

    pub fn set_return_type_str(&mut self, return_type: Option<&str>) -> Result<&mut Self> {
        self.return_type = return_type.map(TypeAnnotation::parse).transpose()?;
        Ok(self)
    }

    pub fn returns_reference(&self) -> bool {
        self.returns_reference
    }

    pub fn set_returns_reference(&mut self, by_ref: bool) -> &mut Self {
        self.returns_reference = by_ref;
        self
    }

    // ─── Modifiers ──────────────────────────────────────────────────────

    pub fn modifiers(&self) -> ModifierSet {
        self.modifiers
    }

    pub fn set_modifiers(&mut self, modifiers: ModifierSet) -> &mut Self {
        self.modifiers = modifiers;
        self
    }

    pub fn visibility(&self) -> Visibility {
        self.modifiers.visibility
    }

    pub fn set_visibility(&mut self, visibility: Visibility) -> &mut Self {
        self.modifiers.visibility = visibility;
        self
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static
    }

    pub fn set_static(&mut self, is_static: bool) -> &mut Self {
        self.modifiers.is_static = is_static;
        self
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract
    }

    pub fn set_abstract(&mut self, is_abstract: bool) -> &mut Self {
        self.modifiers.is_abstract = is_abstract;
        self
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.is_final
    }

    pub fn set_final(&mut self, is_final: bool) -> &mut Self {
        self.modifiers.is_final = is_final;
        self
    }

    pub fn is_interface_member(&self) -> bool {
        self.is_interface_member
    }

    /// Interface members never have a body; turning the flag on discards
    /// any body text.
    pub fn set_interface_member(&mut self, is_interface_member: bool) -> &mut Self {
        self.is_interface_member = is_interface_member;
        if is_interface_member {
            self.body.clear();
        }
        self
    }

    // ─── Rendering ──────────────────────────────────────────────────────

    /// Render with the default options (four-space indentation, long
    /// array literals).
    pub fn render(&self) -> String {
        render::render_declaration(self, &RenderOptions::default())
    }

    pub fn render_with(&self, options: &RenderOptions) -> String {
        render::render_declaration(self, options)
    }
}

/// Function and method names follow the identifier rules of parameters.
pub(crate) fn check_name(name: &str) -> Result<()> {
    if !is_identifier(name) {
        return Err(CodegenError::invalid_argument(format!(
            "{name:?} is not a valid function name"
        )));
    }
    Ok(())
}

impl fmt::Display for FunctionDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
