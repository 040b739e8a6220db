//! Declarations described as data.
//!
//! These are the serde shapes behind [`FunctionDeclaration::from_model`]
//! and [`FunctionDeclaration::from_json`]: a closed set of named, typed,
//! optional fields.  Unknown keys are rejected rather than ignored.  The
//! all-lowercase spellings used by older generator configs
//! (`returntype`, `shortdescription`, ...) are accepted as aliases.
//!
//! [`FunctionDeclaration::from_model`]: crate::FunctionDeclaration::from_model
//! [`FunctionDeclaration::from_json`]: crate::FunctionDeclaration::from_json

use serde::{Deserialize, Deserializer};

use crate::types::Visibility;

/// A method or function.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodModel {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterModel>,
    #[serde(default)]
    pub body: String,
    #[serde(default, alias = "docblock")]
    pub doc_block: Option<DocBlockModel>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default, rename = "final")]
    pub is_final: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "interface")]
    pub is_interface: bool,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, alias = "returntype")]
    pub return_type: Option<String>,
    #[serde(default, alias = "returnsreference")]
    pub returns_reference: bool,
}

/// A parameter: either just a name, or a full record.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ParameterModel {
    Name(String),
    Record(ParameterRecord),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterRecord {
    pub name: String,
    #[serde(default, rename = "type")]
    pub type_hint: Option<String>,
    /// `null` here means a `= null` default; leave the key out for none.
    #[serde(default, alias = "defaultvalue", deserialize_with = "present")]
    pub default_value: Option<serde_json::Value>,
    #[serde(default, alias = "passedbyreference")]
    pub passed_by_reference: bool,
    #[serde(default)]
    pub variadic: bool,
}

/// A docblock: a bare string is taken as the short description.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DocBlockModel {
    ShortDescription(String),
    Full(DocBlockRecord),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocBlockRecord {
    #[serde(default, alias = "shortdescription")]
    pub short_description: String,
    #[serde(default, alias = "longdescription")]
    pub long_description: String,
    #[serde(default)]
    pub tags: Vec<TagModel>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagModel {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Keep an explicit JSON `null` as `Some(Null)` instead of folding it
/// into "absent".
fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}
