//! Declaration → PHP source.
//!
//! Output is built in three stages, each a block of lines:
//!
//! 1. the docblock (omitted when absent), indented one unit;
//! 2. the signature,
//!    `[final|abstract] visibility [static] function [& ]name(params)[ : type]`;
//! 3. for concrete members, `{`, the body two units deep, and `}`.
//!
//! Abstract and interface members stop after the signature with `;`.
//! Nothing here fails: every combination a [`FunctionDeclaration`] can
//! hold has exactly one rendering.

use tracing::trace;

use crate::config::RenderOptions;
use crate::method::FunctionDeclaration;

pub fn render_declaration(decl: &FunctionDeclaration, options: &RenderOptions) -> String {
    let indent = options.indentation.as_str();
    let mut out = String::new();

    if let Some(doc) = decl.doc_comment() {
        out.push_str(&doc.render(indent));
    }

    out.push_str(indent);
    out.push_str(&signature(decl, options));

    if decl.is_interface_member() || decl.is_abstract() {
        out.push(';');
        return out;
    }

    out.push('\n');
    out.push_str(indent);
    out.push_str("{\n");
    let body = trim_blank_lines(decl.body());
    if !body.is_empty() {
        out.push_str(&indent_lines(body, &indent.repeat(2)));
        out.push('\n');
    }
    out.push_str(indent);
    out.push_str("}\n");
    out
}

/// Render several members for inclusion in a class body, each followed by
/// one blank line.
pub fn render_members(decls: &[FunctionDeclaration], options: &RenderOptions) -> String {
    let mut out = String::new();
    for decl in decls {
        let rendered = render_declaration(decl, options);
        out.push_str(&rendered);
        if !rendered.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

fn signature(decl: &FunctionDeclaration, options: &RenderOptions) -> String {
    let mut words: Vec<&str> = Vec::with_capacity(5);
    if decl.is_interface_member() {
        words.push("public");
    } else {
        let modifiers = decl.modifiers();
        if modifiers.emits_final() {
            words.push("final");
        } else if modifiers.is_final {
            trace!("dropping `final` from abstract method {}", decl.name());
        }
        if modifiers.is_abstract {
            words.push("abstract");
        }
        words.push(modifiers.visibility.as_str());
        if modifiers.is_static {
            words.push("static");
        }
    }
    words.push("function");

    let mut sig = words.join(" ");
    sig.push(' ');
    if decl.returns_reference() {
        sig.push_str("& ");
    }
    sig.push_str(decl.name());
    sig.push('(');
    let params: Vec<String> = decl
        .parameters()
        .iter()
        .map(|p| p.render_with(options.array_style))
        .collect();
    sig.push_str(&params.join(", "));
    sig.push(')');

    if let Some(return_type) = decl.return_type() {
        sig.push_str(" : ");
        sig.push_str(&return_type.render());
    }
    sig
}

/// Drop leading and trailing lines that hold only whitespace, and trailing
/// whitespace on the last line.
pub(crate) fn trim_blank_lines(text: &str) -> &str {
    let mut start = 0;
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        start += line.len();
    }
    text[start..].trim_end()
}

/// Prefix every non-blank line with `indent`.  Blank (or whitespace-only)
/// lines become empty so no trailing whitespace is emitted.
pub(crate) fn indent_lines(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
