//! PHP method declarations: build them, render them, reflect them.
//!
//! A [`FunctionDeclaration`] describes a function or method (name,
//! [`ParameterDeclaration`]s, [`ModifierSet`], return [`TypeAnnotation`],
//! body and [`DocComment`]).  It renders to byte-stable PHP source via
//! [`FunctionDeclaration::render`], and can be populated programmatically,
//! from a model map ([`FunctionDeclaration::from_json`]), or from an
//! already-loaded declaration through an [`Extractor`] that queries a
//! [`DeclarationProvider`].
//!
//! ```
//! use phpantom_codegen::FunctionDeclaration;
//!
//! let mut method = FunctionDeclaration::new("foo");
//! method.set_parameters(["one"]).unwrap();
//! method.set_static(true);
//!
//! assert_eq!(
//!     method.render(),
//!     "    public static function foo($one)\n    {\n    }\n"
//! );
//! ```

pub mod config;
pub mod docblock;
pub mod error;
pub mod method;
pub mod model;
pub mod parameter;
pub mod reflection;
pub mod render;
pub mod types;
pub mod value;

pub use config::{Config, RenderOptions};
pub use docblock::{DocComment, DocCommentBuilder, DocTag, Tag, TagRegistry};
pub use error::{CodegenError, ErrorKind, Result};
pub use method::FunctionDeclaration;
pub use parameter::{ParameterDeclaration, ParameterSpec};
pub use reflection::{DeclarationProvider, Extractor, ParameterFactory, ParameterHandle};
pub use render::{render_declaration, render_members};
pub use types::{ModifierSet, TypeAnnotation, TypeKind, Visibility};
pub use value::{ArrayStyle, Value};
