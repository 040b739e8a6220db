//! Value types shared by every declaration: visibility, the modifier set
//! of a method and the type annotations used for parameters and return
//! values.

use std::fmt;

use serde::Deserialize;

use crate::error::{CodegenError, Result};

/// Type keywords that are emitted verbatim (never prefixed with `\`).
const BUILTIN_TYPES: &[&str] = &[
    "int", "float", "string", "bool", "array", "object", "mixed", "null", "false", "true", "never",
];

/// Keywords that resolve relative to the enclosing class.
const SELF_REFERENCES: &[&str] = &["self", "parent", "static"];

/// Builtins that PHP refuses to combine with the `?` prefix.
const NEVER_NULLABLE: &[&str] = &["mixed", "null", "never"];

/// Visibility of a class member (method, property, or constant).
///
/// In PHP, members without an explicit visibility modifier default to `Public`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// The keyword as it appears in source.
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modifier keywords that govern how a method signature is emitted.
///
/// `final` and `abstract` may both be set; the combination is not an
/// error, `final` is simply never emitted while `abstract` is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierSet {
    /// `public`, `protected` or `private`.
    pub visibility: Visibility,
    /// Whether the method is `static`.
    pub is_static: bool,
    /// Whether the method is `abstract` (no body, terminated by `;`).
    pub is_abstract: bool,
    /// Whether the method is `final`.
    pub is_final: bool,
}

impl ModifierSet {
    /// `final` as it will actually be rendered.
    pub fn emits_final(&self) -> bool {
        self.is_final && !self.is_abstract
    }
}

/// The broad category of a [`TypeAnnotation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A scalar or other builtin keyword (`int`, `string`, `array`, ...).
    Builtin,
    /// A class or interface name.
    ClassRef,
    Iterable,
    Void,
    Callable,
    /// `self`, `parent` or `static`.
    SelfRef,
}

/// A parameter or return type as written in a signature.
///
/// The fields are private so that the one invariant that matters for
/// rendering (`void` and friends are never nullable) is enforced when
/// the annotation is built rather than when it is printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAnnotation {
    kind: TypeKind,
    /// Lower-cased keyword for builtins, or the class name without a
    /// leading `\` for class references.
    name: String,
    nullable: bool,
}

impl TypeAnnotation {
    /// Parse a type string such as `int`, `?\Foo\Bar`, `Foo|null` or
    /// `iterable`.
    ///
    /// Accepts at most one non-null member in a union; anything wider is
    /// rejected with [`CodegenError::InvalidTypeSpecification`].
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = || CodegenError::InvalidTypeSpecification(spec.to_string());
        let trimmed = spec.trim();

        let (nullable, body) = if let Some(rest) = trimmed.strip_prefix('?') {
            (true, rest.trim_start())
        } else if trimmed.contains('|') {
            let parts: Vec<&str> = trimmed.split('|').map(str::trim).collect();
            let non_null: Vec<&str> = parts
                .iter()
                .copied()
                .filter(|p| !p.eq_ignore_ascii_case("null"))
                .collect();
            if parts.len() != 2 || non_null.len() != 1 {
                return Err(invalid());
            }
            (true, non_null[0])
        } else {
            (false, trimmed)
        };

        let annotation = Self::from_name(body).ok_or_else(invalid)?;
        if nullable {
            annotation.into_nullable().map_err(|_| invalid())
        } else {
            Ok(annotation)
        }
    }

    /// Classify a single, non-nullable type name.
    fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        let kind = match lower.as_str() {
            "void" => TypeKind::Void,
            "iterable" => TypeKind::Iterable,
            "callable" => TypeKind::Callable,
            s if SELF_REFERENCES.contains(&s) => TypeKind::SelfRef,
            s if BUILTIN_TYPES.contains(&s) => TypeKind::Builtin,
            _ => {
                let class = name.strip_prefix('\\').unwrap_or(name);
                if !is_qualified_name(class) {
                    return None;
                }
                return Some(Self {
                    kind: TypeKind::ClassRef,
                    name: class.to_string(),
                    nullable: false,
                });
            }
        };
        Some(Self {
            kind,
            name: lower,
            nullable: false,
        })
    }

    /// A builtin keyword such as `int` or `array`.
    pub fn builtin(keyword: &str) -> Result<Self> {
        match Self::from_name(keyword) {
            Some(t) if t.kind != TypeKind::ClassRef => Ok(t),
            _ => Err(CodegenError::InvalidTypeSpecification(keyword.to_string())),
        }
    }

    /// A class or interface reference; a leading `\` is accepted and
    /// dropped.
    pub fn class(name: &str) -> Result<Self> {
        let class = name.strip_prefix('\\').unwrap_or(name);
        if !is_qualified_name(class) {
            return Err(CodegenError::InvalidTypeSpecification(name.to_string()));
        }
        Ok(Self {
            kind: TypeKind::ClassRef,
            name: class.to_string(),
            nullable: false,
        })
    }

    pub fn void() -> Self {
        Self {
            kind: TypeKind::Void,
            name: "void".to_string(),
            nullable: false,
        }
    }

    pub fn iterable() -> Self {
        Self {
            kind: TypeKind::Iterable,
            name: "iterable".to_string(),
            nullable: false,
        }
    }

    pub fn callable() -> Self {
        Self {
            kind: TypeKind::Callable,
            name: "callable".to_string(),
            nullable: false,
        }
    }

    /// Mark the annotation nullable.
    ///
    /// Fails for `void`, `mixed`, `null` and `never`, which cannot carry
    /// the `?` prefix.
    pub fn into_nullable(mut self) -> Result<Self> {
        if !self.can_be_nullable() {
            return Err(CodegenError::InvalidTypeSpecification(format!(
                "?{}",
                self.name
            )));
        }
        self.nullable = true;
        Ok(self)
    }

    fn can_be_nullable(&self) -> bool {
        match self.kind {
            TypeKind::Void => false,
            TypeKind::Builtin => !NEVER_NULLABLE.contains(&self.name.as_str()),
            _ => true,
        }
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Source text for the annotation, e.g. `?int` or `\Foo\Bar`.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            f.write_str("?")?;
        }
        if self.kind == TypeKind::ClassRef {
            f.write_str("\\")?;
        }
        f.write_str(&self.name)
    }
}

/// Whether `name` is a PHP identifier, optionally namespaced with `\`.
pub(crate) fn is_qualified_name(name: &str) -> bool {
    !name.is_empty() && name.split('\\').all(is_identifier)
}

pub(crate) fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() || !c.is_ascii() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric() || !c.is_ascii())
}
