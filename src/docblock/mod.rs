//! PHPDoc block model.
//!
//! A [`DocComment`] holds the short description, the long description
//! and the ordered `@tag` lines of a `/** ... */` block, together with the
//! source line of its opening delimiter.  It is either parsed from text
//! ([`DocComment::parse`]) or assembled with [`DocComment::builder`], and
//! renders back to a block indented to the owning declaration's depth.
//!
//! # Submodules
//!
//! - [`parser`]: delimiter stripping and the description / tag split.
//! - [`tags`]: the [`DocTag`] capability, typed tags (`@return`,
//!   `@param`) and the name-keyed [`TagRegistry`].

pub(crate) mod parser;
pub mod tags;

pub use tags::{DocTag, ParamTag, ReturnTag, TagFactory, TagRegistry};

use crate::error::Result;
use crate::model::DocBlockModel;

/// A single `@name description` line, stored verbatim.
///
/// Tags whose name has no registered handler stay in this form; typed
/// views are created on demand through a [`TagRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    description: String,
}

impl Tag {
    /// Create a tag.  A leading `@` on `name` is dropped.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        let name = match name.strip_prefix('@') {
            Some(stripped) => stripped.to_string(),
            None => name,
        };
        Self {
            name,
            description: description.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The tag line without the comment prefix, e.g. `@return bool`.
    pub fn render(&self) -> String {
        if self.description.is_empty() {
            format!("@{}", self.name)
        } else {
            format!("@{} {}", self.name, self.description)
        }
    }

    pub(crate) fn append_line(&mut self, line: &str) {
        if !self.description.is_empty() {
            self.description.push('\n');
        }
        self.description.push_str(line);
    }
}

/// A parsed or built PHPDoc block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocComment {
    short_description: String,
    long_description: String,
    tags: Vec<Tag>,
    start_line: usize,
}

impl DocComment {
    /// Parse raw comment text including its `/**` and `*/` delimiters.
    ///
    /// The start line defaults to `1`; use [`DocComment::parse_at`] when
    /// the block's position in a file is known.
    pub fn parse(text: &str) -> Result<Self> {
        parser::parse(text, 1)
    }

    /// Parse raw comment text whose opening delimiter sits on the 1-based
    /// `start_line`.
    pub fn parse_at(text: &str, start_line: usize) -> Result<Self> {
        parser::parse(text, start_line)
    }

    pub fn builder() -> DocCommentBuilder {
        DocCommentBuilder::default()
    }

    /// Docblock from a model map entry.
    pub fn from_model(model: DocBlockModel) -> Self {
        match model {
            DocBlockModel::ShortDescription(text) => {
                DocComment::builder().short_description(text).build()
            }
            DocBlockModel::Full(record) => record
                .tags
                .into_iter()
                .fold(
                    DocComment::builder()
                        .short_description(record.short_description)
                        .long_description(record.long_description),
                    |builder, tag| builder.tag(tag.name, tag.description),
                )
                .build(),
        }
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn long_description(&self) -> &str {
        &self.long_description
    }

    /// All tags in source order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// The first tag called `name` (without `@`), if any.
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tag(name).is_some()
    }

    /// Every tag called `name`, in source order.
    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
        self.tags.iter().filter(move |t| t.name == name)
    }

    /// The first tag called `name`, built through the handler registered
    /// for it in `registry`.
    pub fn typed_tag(&self, name: &str, registry: &TagRegistry) -> Option<Box<dyn DocTag>> {
        self.tag(name)
            .map(|tag| registry.create(&tag.name, &tag.description))
    }

    /// 1-based line of the opening `/**`.
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// Render the block, prefixing every line with `indentation`.
    ///
    /// The output always ends with a newline so that the signature can
    /// follow directly.
    pub fn render(&self, indentation: &str) -> String {
        let mut content = String::new();
        if !self.short_description.is_empty() {
            content.push_str(&self.short_description);
            content.push_str("\n\n");
        }
        if !self.long_description.is_empty() {
            content.push_str(&self.long_description);
            content.push_str("\n\n");
        }
        for tag in &self.tags {
            content.push_str(&tag.render());
            content.push('\n');
        }

        let mut out = format!("{indentation}/**\n");
        for line in content.trim_end().lines() {
            if line.is_empty() {
                out.push_str(indentation);
                out.push_str(" *\n");
            } else {
                out.push_str(indentation);
                out.push_str(" * ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push_str(indentation);
        out.push_str(" */\n");
        out
    }
}

/// Fluent construction of a [`DocComment`].
#[derive(Debug, Clone, Default)]
pub struct DocCommentBuilder {
    short_description: String,
    long_description: String,
    tags: Vec<Tag>,
    start_line: Option<usize>,
}

impl DocCommentBuilder {
    pub fn short_description(mut self, text: impl Into<String>) -> Self {
        self.short_description = text.into();
        self
    }

    pub fn long_description(mut self, text: impl Into<String>) -> Self {
        self.long_description = text.into();
        self
    }

    pub fn tag(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.tags.push(Tag::new(name, description));
        self
    }

    pub fn start_line(mut self, line: usize) -> Self {
        self.start_line = Some(line);
        self
    }

    pub fn build(self) -> DocComment {
        DocComment {
            short_description: self.short_description.trim().to_string(),
            long_description: self.long_description.trim().to_string(),
            tags: self.tags,
            start_line: self.start_line.unwrap_or(1),
        }
    }
}
