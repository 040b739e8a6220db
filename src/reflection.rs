//! Populating declarations from already-loaded code.
//!
//! The [`Extractor`] never touches a concrete reflection API.  It talks to
//! a [`DeclarationProvider`], a narrow read-only view of one compiled
//! function or method (name, line range, source file, docblock text and
//! parameters), and turns what it reports into a [`FunctionDeclaration`].
//!
//! Each step is callable on its own so that callers can pull just the
//! docblock, just the source excerpt, and so on.  The source file is read
//! once per call that needs it; nothing is cached.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::docblock::{DocComment, DocTag, ReturnTag, TagRegistry};
use crate::error::{CodegenError, Result};
use crate::method::{FunctionDeclaration, check_name};
use crate::parameter::ParameterDeclaration;
use crate::render::trim_blank_lines;
use crate::types::{TypeAnnotation, Visibility};
use crate::value::Value;

// ─── Provider contract ──────────────────────────────────────────────────────

/// Read-only facts about one parameter of a compiled declaration.
///
/// Only the name is mandatory; the rest default to "untyped, required,
/// by value".
pub trait ParameterHandle {
    /// Parameter name, with or without the `$` prefix.
    fn name(&self) -> &str;

    fn type_hint(&self) -> Option<String> {
        None
    }

    fn default_value(&self) -> Option<Value> {
        None
    }

    fn is_passed_by_reference(&self) -> bool {
        false
    }

    fn is_variadic(&self) -> bool {
        false
    }
}

/// Read-only facts about a compiled function or method.
///
/// The first group of methods is required.  The modifier and return type
/// queries are optional capabilities with neutral defaults, for runtimes
/// that can report them.
pub trait DeclarationProvider {
    type Parameter: ParameterHandle;

    fn name(&self) -> &str;

    /// Raw docblock text including delimiters.  `None` (or an empty
    /// string) means the declaration has no docblock.
    fn doc_comment(&self) -> Option<String>;

    /// 1-based line of the signature.
    ///
    /// The docblock is located relative to this line: it is taken to end
    /// on the line directly above.  When attributes or blank lines sit
    /// between the docblock and the `function` keyword, report the line of
    /// the first attribute instead, or the docblock's start line will be
    /// off by the lines in between.
    fn start_line(&self) -> usize;

    /// 1-based line of the closing brace (or of the `;` for abstract
    /// members).
    fn end_line(&self) -> usize;

    /// The file the declaration was loaded from, when known.
    fn file_name(&self) -> Option<&Path>;

    /// Parameters in declaration order.
    fn parameters(&self) -> Vec<Self::Parameter>;

    /// Look a parameter up by name.  Providers whose internal storage is
    /// not ordered should override this with a direct lookup.
    fn parameter(&self, name: &str) -> Option<Self::Parameter> {
        self.parameters().into_iter().find(|p| p.name() == name)
    }

    fn visibility(&self) -> Visibility {
        Visibility::Public
    }

    fn is_static(&self) -> bool {
        false
    }

    fn is_abstract(&self) -> bool {
        false
    }

    fn is_final(&self) -> bool {
        false
    }

    fn is_interface_member(&self) -> bool {
        false
    }

    fn returns_reference(&self) -> bool {
        false
    }

    /// The native return type as written, e.g. `?int` or `Foo\Bar`.
    fn return_type(&self) -> Option<String> {
        None
    }
}

/// Builds a [`ParameterDeclaration`] from a provider's parameter handle.
///
/// Closures `Fn(&dyn ParameterHandle) -> Result<ParameterDeclaration>`
/// implement this, so a caller can substitute its own construction.
pub trait ParameterFactory {
    fn build(&self, handle: &dyn ParameterHandle) -> Result<ParameterDeclaration>;
}

impl<F> ParameterFactory for F
where
    F: Fn(&dyn ParameterHandle) -> Result<ParameterDeclaration>,
{
    fn build(&self, handle: &dyn ParameterHandle) -> Result<ParameterDeclaration> {
        self(handle)
    }
}

impl ParameterDeclaration {
    /// Populate a parameter from a provider handle.
    pub fn from_handle(handle: &dyn ParameterHandle) -> Result<Self> {
        let mut param = ParameterDeclaration::new(handle.name())?
            .passed_by_reference(handle.is_passed_by_reference())
            .variadic(handle.is_variadic());
        if let Some(type_hint) = handle.type_hint() {
            param.set_type(Some(TypeAnnotation::parse(&type_hint)?));
        }
        param.set_default_value(handle.default_value());
        Ok(param)
    }
}

// ─── Extractor ──────────────────────────────────────────────────────────────

/// Turns what a [`DeclarationProvider`] reports into declaration parts.
///
/// The provider is only borrowed for the extractor's lifetime.
pub struct Extractor<'p, P: DeclarationProvider + ?Sized> {
    provider: &'p P,
    tags: TagRegistry,
}

impl<'p, P: DeclarationProvider + ?Sized> Extractor<'p, P> {
    pub fn new(provider: &'p P) -> Self {
        Self::with_tag_registry(provider, TagRegistry::default())
    }

    /// Use `tags` instead of the default handlers when typed tags are
    /// needed (see [`Extractor::return_tag`]).
    pub fn with_tag_registry(provider: &'p P, tags: TagRegistry) -> Self {
        Self { provider, tags }
    }

    fn raw_doc_comment(&self) -> Option<String> {
        self.provider
            .doc_comment()
            .filter(|text| !text.trim().is_empty())
    }

    pub fn has_doc_comment(&self) -> bool {
        self.raw_doc_comment().is_some()
    }

    /// Parse the declaration's docblock.
    ///
    /// The block is assumed to end on the line directly above
    /// [`DeclarationProvider::start_line`], which fixes its start line;
    /// nothing in between is accounted for.  Fails with
    /// [`CodegenError::NoDocComment`] when there is none.
    pub fn doc_comment(&self) -> Result<DocComment> {
        let raw = self
            .raw_doc_comment()
            .ok_or_else(|| CodegenError::NoDocComment {
                function: self.provider.name().to_string(),
            })?;
        let newlines = raw.trim().matches('\n').count();
        let start_line = self
            .provider
            .start_line()
            .saturating_sub(newlines + 1)
            .max(1);
        DocComment::parse_at(&raw, start_line)
    }

    /// First source line of the declaration; with `include_doc_comment`
    /// and a docblock present, the docblock's opening line instead.
    pub fn start_line(&self, include_doc_comment: bool) -> Result<usize> {
        if include_doc_comment && self.has_doc_comment() {
            return Ok(self.doc_comment()?.start_line());
        }
        Ok(self.provider.start_line())
    }

    /// Source lines `[start_line(include_doc_comment), end_line)`, joined
    /// with `\n`.
    pub fn source_excerpt(&self, include_doc_comment: bool) -> Result<String> {
        let start = self.start_line(include_doc_comment)?;
        let end = self.provider.end_line();
        let source = self.read_source()?;
        Ok(source
            .lines()
            .skip(start.saturating_sub(1))
            .take(end.saturating_sub(start))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Body text between the declaration's braces, with surrounding blank
    /// lines removed and the common indentation stripped.  Empty for
    /// declarations without a body.
    pub fn body(&self) -> Result<String> {
        let start = self.provider.start_line();
        let end = self.provider.end_line();
        let source = self.read_source()?;
        let declaration = source
            .lines()
            .skip(start.saturating_sub(1))
            .take((end + 1).saturating_sub(start))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(body_of(&declaration))
    }

    /// Build every parameter with [`ParameterDeclaration::from_handle`].
    pub fn parameters(&self) -> Result<Vec<ParameterDeclaration>> {
        self.parameters_with(&ParameterDeclaration::from_handle)
    }

    /// Build every parameter with `factory`.
    ///
    /// Each handle is re-resolved through the provider by name before it is
    /// handed to the factory.  A factory that returns a parameter under a
    /// different name does not honour the contract and fails with
    /// [`CodegenError::InvalidArgument`].
    pub fn parameters_with<F>(&self, factory: &F) -> Result<Vec<ParameterDeclaration>>
    where
        F: ParameterFactory + ?Sized,
    {
        let mut params = Vec::new();
        for handle in self.provider.parameters() {
            let name = handle.name().to_string();
            let resolved = self.provider.parameter(&name).ok_or_else(|| {
                CodegenError::invalid_argument(format!(
                    "{} lists parameter {name} but cannot resolve it by name",
                    self.provider.name()
                ))
            })?;
            let param = factory.build(&resolved)?;
            if param.name() != name.trim_start_matches('$') {
                return Err(CodegenError::invalid_argument(format!(
                    "parameter constructor built ${} for parameter {name}",
                    param.name()
                )));
            }
            trace!("extracted parameter ${}", param.name());
            params.push(param);
        }
        Ok(params)
    }

    pub fn has_return_tag(&self) -> bool {
        self.doc_comment()
            .is_ok_and(|doc| doc.has_tag(ReturnTag::NAME))
    }

    /// The docblock's `@return` tag, built through the tag registry.
    ///
    /// The type is kept as the raw docblock string (`string[]`, `$this`,
    /// `array<int, string>` all pass); use [`ReturnTag::type_annotation`]
    /// or [`TypeAnnotation::parse`] for a signature-level type.  Fails with
    /// [`CodegenError::MissingReturnAnnotation`] when there is no docblock,
    /// no `@return` tag, or the tag names no type.
    pub fn return_tag(&self) -> Result<Box<dyn DocTag>> {
        let missing = || CodegenError::MissingReturnAnnotation {
            function: self.provider.name().to_string(),
        };
        if !self.has_doc_comment() {
            return Err(missing());
        }
        let doc = self.doc_comment()?;
        let tag = doc.tag(ReturnTag::NAME).ok_or_else(missing)?;
        let typed = self
            .tags
            .parse_line(&format!("@{} {}", ReturnTag::NAME, tag.description()))?;
        if typed.type_string().is_none() {
            return Err(missing());
        }
        Ok(typed)
    }

    /// Assemble the full declaration: name, parameters, docblock,
    /// modifiers, return type and, for concrete members, the body.
    pub fn extract_declaration(&self) -> Result<FunctionDeclaration> {
        let provider = self.provider;
        check_name(provider.name())?;
        let mut decl = FunctionDeclaration::new(provider.name());

        for param in self.parameters()? {
            decl.set_parameter(param)?;
        }
        if self.has_doc_comment() {
            decl.set_doc_comment(Some(self.doc_comment()?));
        }
        decl.set_visibility(provider.visibility())
            .set_static(provider.is_static())
            .set_abstract(provider.is_abstract())
            .set_final(provider.is_final())
            .set_returns_reference(provider.returns_reference());
        if let Some(return_type) = provider.return_type() {
            decl.set_return_type(Some(TypeAnnotation::parse(&return_type)?));
        }

        if provider.is_interface_member() {
            decl.set_interface_member(true);
        } else if !provider.is_abstract() {
            decl.set_body(self.body()?);
        }
        Ok(decl)
    }

    fn read_source(&self) -> Result<String> {
        let path = self
            .provider
            .file_name()
            .ok_or_else(|| CodegenError::SourceUnavailable {
                path: PathBuf::new(),
                source: io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} reports no source file", self.provider.name()),
                ),
            })?;
        debug!("reading source of {} from {}", self.provider.name(), path.display());
        std::fs::read_to_string(path).map_err(|source| CodegenError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ─── Body recovery ──────────────────────────────────────────────────────────

/// Text between the `{` that follows the parameter list and the last `}`
/// of `declaration`, dedented.
fn body_of(declaration: &str) -> String {
    let Some(params_end) = parameter_list_end(declaration) else {
        return String::new();
    };
    let rest = &declaration[params_end..];
    let (Some(open), Some(close)) = (rest.find('{'), rest.rfind('}')) else {
        return String::new();
    };
    if close <= open {
        return String::new();
    }
    dedent(trim_blank_lines(&rest[open + 1..close]))
}

/// Byte offset just past the `)` closing the first parameter list, skipping
/// parentheses inside quoted strings.
fn parameter_list_end(text: &str) -> Option<usize> {
    let open = text.find('(')?;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, c) in text[open..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + idx + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Strip the indentation shared by every non-blank line.
fn dedent(text: &str) -> String {
    let common = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                line[common..].trim_end()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
