//! Typed docblock tags and the name-keyed handler registry.
//!
//! A docblock stores every tag as a plain [`Tag`] (name plus free-form
//! description).  When a caller needs more structure, e.g. the type named
//! by `@return`, it asks a [`TagRegistry`] to build a typed view from the
//! description.  Handlers are plain factory closures keyed by tag name;
//! callers may register their own for any name.

use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::debug;

use crate::error::{CodegenError, Result};
use crate::types::TypeAnnotation;

use super::Tag;

/// The minimal capability every tag handler's product must offer.
pub trait DocTag: fmt::Debug {
    /// Tag name without the leading `@`.
    fn name(&self) -> &str;

    /// Free-form text following whatever the tag itself parsed out.
    fn description(&self) -> &str;

    /// The type string the tag names, for tags that carry one.
    fn type_string(&self) -> Option<&str> {
        None
    }
}

impl DocTag for Tag {
    fn name(&self) -> &str {
        Tag::name(self)
    }

    fn description(&self) -> &str {
        Tag::description(self)
    }
}

/// `@return <type> [description]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnTag {
    type_string: String,
    description: String,
}

impl ReturnTag {
    pub const NAME: &'static str = "return";

    /// Build from the text after `@return`: the leading type expression
    /// is the type, the remainder the description.  The type is kept as
    /// written, so docblock-only forms (`string[]`, `$this`,
    /// `array<int, string>`) survive.
    pub fn parse(text: &str) -> Self {
        let (type_string, description) = split_type_token(text);
        Self {
            type_string: type_string.to_string(),
            description: description.to_string(),
        }
    }

    /// The embedded type string parsed into a signature annotation.  Fails
    /// with [`CodegenError::InvalidTypeSpecification`] for types that only
    /// exist in docblocks.
    pub fn type_annotation(&self) -> Result<TypeAnnotation> {
        TypeAnnotation::parse(&self.type_string)
    }
}

impl DocTag for ReturnTag {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn type_string(&self) -> Option<&str> {
        (!self.type_string.is_empty()).then_some(self.type_string.as_str())
    }
}

/// `@param [type] $variable [description]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTag {
    type_string: Option<String>,
    variable: Option<String>,
    description: String,
}

impl ParamTag {
    pub const NAME: &'static str = "param";

    pub fn parse(text: &str) -> Self {
        let (first, rest) = split_type_token(text);
        let (type_string, rest) = if first.is_empty() || first.starts_with('$') {
            (None, text.trim())
        } else {
            (Some(first.to_string()), rest)
        };
        let (variable, description) = match split_first_token(rest) {
            (var, desc) if var.starts_with('$') => {
                (Some(var.trim_start_matches('$').to_string()), desc)
            }
            _ => (None, rest),
        };
        Self {
            type_string,
            variable,
            description: description.to_string(),
        }
    }

    /// Variable name without the `$` prefix.
    pub fn variable(&self) -> Option<&str> {
        self.variable.as_deref()
    }
}

impl DocTag for ParamTag {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn type_string(&self) -> Option<&str> {
        self.type_string.as_deref()
    }
}

/// Split off a leading type expression.  Whitespace nested inside `<…>`,
/// `{…}` or `(…)` belongs to the type.
fn split_type_token(text: &str) -> (&str, &str) {
    let text = text.trim();
    let mut depth = 0i32;
    for (i, c) in text.char_indices() {
        match c {
            '<' | '{' | '(' => depth += 1,
            '>' | '}' | ')' => depth -= 1,
            c if c.is_whitespace() && depth <= 0 => {
                return (&text[..i], text[i..].trim());
            }
            _ => {}
        }
    }
    (text, "")
}

fn split_first_token(text: &str) -> (&str, &str) {
    let text = text.trim();
    match text.find(char::is_whitespace) {
        Some(idx) => (&text[..idx], text[idx..].trim()),
        None => (text, ""),
    }
}

/// Builds a typed tag from a tag description.
pub type TagFactory = Arc<dyn Fn(&str) -> Box<dyn DocTag> + Send + Sync>;

/// Name-keyed table of tag handlers.
///
/// Names without a handler fall back to a plain [`Tag`].
#[derive(Clone)]
pub struct TagRegistry {
    factories: HashMap<String, TagFactory>,
}

impl TagRegistry {
    /// A registry with no handlers at all.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register `factory` for `name` (without `@`), replacing any earlier
    /// handler.
    ///
    /// The handler is checked immediately by building one tag from an empty
    /// description: it must produce tags that report `name` as their own
    /// name.  A handler that does not, or that panics on empty input, is
    /// rejected with [`CodegenError::InvalidTagHandler`] and the registry
    /// is unchanged.
    pub fn register<F>(&mut self, name: &str, factory: F) -> Result<()>
    where
        F: Fn(&str) -> Box<dyn DocTag> + Send + Sync + 'static,
    {
        let invalid = |reason: String| CodegenError::InvalidTagHandler {
            tag: name.to_string(),
            reason,
        };
        if name.is_empty() || name.starts_with('@') || name.contains(char::is_whitespace) {
            return Err(invalid("tag names must be non-empty, without `@` or whitespace".into()));
        }

        let sample = panic::catch_unwind(AssertUnwindSafe(|| factory("")))
            .map_err(|_| invalid("handler panicked on an empty description".into()))?;
        if sample.name() != name {
            return Err(invalid(format!(
                "handler builds tags named @{}",
                sample.name()
            )));
        }

        debug!("registered docblock tag handler for @{name}");
        self.factories.insert(name.to_string(), Arc::new(factory));
        Ok(())
    }

    pub fn has_handler(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Build a tag named `name` from its description.
    pub fn create(&self, name: &str, description: &str) -> Box<dyn DocTag> {
        match self.factories.get(name) {
            Some(factory) => factory(description),
            None => Box::new(Tag::new(name, description)),
        }
    }

    /// Build a tag from a full tag line such as `@return int|null`.
    pub fn parse_line(&self, line: &str) -> Result<Box<dyn DocTag>> {
        let rest = line.trim().strip_prefix('@').ok_or_else(|| {
            CodegenError::invalid_argument(format!("{line:?} is not a docblock tag line"))
        })?;
        let (name, description) = split_first_token(rest);
        if name.is_empty() {
            return Err(CodegenError::invalid_argument(format!(
                "{line:?} has no tag name"
            )));
        }
        Ok(self.create(name, description))
    }
}

impl Default for TagRegistry {
    /// Handlers for `@return` and `@param`.
    fn default() -> Self {
        let mut factories: HashMap<String, TagFactory> = HashMap::new();
        factories.insert(
            ReturnTag::NAME.to_string(),
            Arc::new(|text: &str| Box::new(ReturnTag::parse(text)) as Box<dyn DocTag>),
        );
        factories.insert(
            ParamTag::NAME.to_string(),
            Arc::new(|text: &str| Box::new(ParamTag::parse(text)) as Box<dyn DocTag>),
        );
        Self { factories }
    }
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("TagRegistry").field("handlers", &names).finish()
    }
}
