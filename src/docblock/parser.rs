//! Docblock text → [`DocComment`].
//!
//! The comment is stripped of its `/**` / `*/` delimiters and of the
//! leading ` * ` continuation marker on every line.  What remains is split
//! into a short description (the first paragraph), a long description
//! (every further paragraph up to the first tag) and the tag lines.  Lines
//! following a tag, up to the next tag, continue that tag's description.

use crate::error::{CodegenError, Result};

use super::{DocComment, Tag};

pub(crate) fn parse(text: &str, start_line: usize) -> Result<DocComment> {
    let lines = content_lines(text)?;

    let mut prose: Vec<&str> = Vec::new();
    let mut tags: Vec<Tag> = Vec::new();

    for line in lines {
        if let Some((name, description)) = split_tag_line(line) {
            tags.push(Tag::new(name, description));
        } else if let Some(last) = tags.last_mut() {
            // Blank lines inside the tag section carry no meaning.
            if !line.trim().is_empty() {
                last.append_line(line.trim());
            }
        } else {
            prose.push(line);
        }
    }

    let (short_description, long_description) = split_descriptions(&prose);

    Ok(DocComment {
        short_description,
        long_description,
        tags,
        start_line,
    })
}

/// Strip the delimiters and per-line `*` markers.
fn content_lines(text: &str) -> Result<Vec<&str>> {
    let trimmed = text.trim();
    let inner = trimmed.strip_prefix("/**").ok_or_else(|| {
        CodegenError::MalformedDocComment("missing opening `/**` delimiter".to_string())
    })?;
    let inner = inner.strip_suffix("*/").ok_or_else(|| {
        CodegenError::MalformedDocComment("unterminated docblock, missing `*/`".to_string())
    })?;

    let lines: Vec<&str> = inner
        .lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            let line = line.strip_prefix(' ').unwrap_or(line);
            line.trim_end()
        })
        .collect();

    Ok(trim_blank_edges(&lines).to_vec())
}

/// Recognise `@name rest-of-line`.
fn split_tag_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start().strip_prefix('@')?;
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let name = &rest[..end];
    if name.is_empty() || !name.chars().all(is_tag_name_char) {
        return None;
    }
    Some((name, rest[end..].trim()))
}

fn is_tag_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | ':' | '\\')
}

/// First paragraph is the short description, the rest (blank lines
/// between paragraphs kept) is the long description.
fn split_descriptions(prose: &[&str]) -> (String, String) {
    let prose = trim_blank_edges(prose);
    let split = prose
        .iter()
        .position(|l| l.trim().is_empty())
        .unwrap_or(prose.len());

    let short = prose[..split]
        .iter()
        .map(|l| l.trim())
        .collect::<Vec<_>>()
        .join("\n");
    let long = trim_blank_edges(&prose[split..]).join("\n");

    (short, long)
}

fn trim_blank_edges<'a, 'b>(lines: &'b [&'a str]) -> &'b [&'a str] {
    let start = lines
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(start, |i| i + 1);
    &lines[start..end]
}

// ─── Tests ──────────────────────────────────────────────────────────────────
