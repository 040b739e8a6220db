//! Rendering configuration.
//!
//! ```toml
//! [render]
//! indentation = "\t"
//! array_style = "short"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{CodegenError, Result};
use crate::value::ArrayStyle;

/// Layout knobs for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// One indentation unit.  Declarations are emitted one unit deep (as
    /// class members), bodies two units deep.
    pub indentation: String,
    /// Literal form for array values in defaults.
    pub array_style: ArrayStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indentation: "    ".to_string(),
            array_style: ArrayStyle::Long,
        }
    }
}

impl RenderOptions {
    pub fn with_indentation(mut self, indentation: impl Into<String>) -> Self {
        self.indentation = indentation.into();
        self
    }

    pub fn with_array_style(mut self, array_style: ArrayStyle) -> Self {
        self.array_style = array_style;
        self
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub render: RenderOptions,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CodegenError::InvalidConfig(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CodegenError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.render, RenderOptions::default());
    }

    #[test]
    fn partial_render_section() {
        let config = Config::from_toml_str("[render]\narray_style = \"short\"\n").unwrap();
        assert_eq!(config.render.array_style, ArrayStyle::Short);
        assert_eq!(config.render.indentation, "    ");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml_str("[render]\nwrap = 80\n").is_err());
        assert!(Config::from_toml_str("[output]\n").is_err());
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, CodegenError::InvalidConfig(_)));
    }
}
