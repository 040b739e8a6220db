#![allow(dead_code)]

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use phpantom_codegen::{DeclarationProvider, ParameterHandle, Value, Visibility};

/// A parameter as a fake runtime would report it.
#[derive(Debug, Clone, Default)]
pub struct FakeParameter {
    pub name: String,
    pub type_hint: Option<String>,
    pub default: Option<Value>,
    pub by_ref: bool,
    pub variadic: bool,
}

impl FakeParameter {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn typed(name: &str, type_hint: &str) -> Self {
        Self {
            name: name.to_string(),
            type_hint: Some(type_hint.to_string()),
            ..Self::default()
        }
    }
}

impl ParameterHandle for FakeParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_hint(&self) -> Option<String> {
        self.type_hint.clone()
    }

    fn default_value(&self) -> Option<Value> {
        self.default.clone()
    }

    fn is_passed_by_reference(&self) -> bool {
        self.by_ref
    }

    fn is_variadic(&self) -> bool {
        self.variadic
    }
}

/// In-memory stand-in for a runtime's reflection of one method.
#[derive(Debug, Default)]
pub struct FakeProvider {
    pub name: String,
    pub doc_comment: Option<String>,
    pub start_line: usize,
    pub end_line: usize,
    pub file: Option<PathBuf>,
    pub params: Vec<FakeParameter>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_interface: bool,
    pub returns_reference: bool,
    pub return_type: Option<String>,
    /// How many times `parameter(name)` was asked.
    pub lookups: Cell<usize>,
}

impl FakeProvider {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            start_line: 1,
            end_line: 1,
            ..Self::default()
        }
    }
}

impl DeclarationProvider for FakeProvider {
    type Parameter = FakeParameter;

    fn name(&self) -> &str {
        &self.name
    }

    fn doc_comment(&self) -> Option<String> {
        self.doc_comment.clone()
    }

    fn start_line(&self) -> usize {
        self.start_line
    }

    fn end_line(&self) -> usize {
        self.end_line
    }

    fn file_name(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    fn parameters(&self) -> Vec<FakeParameter> {
        self.params.clone()
    }

    fn parameter(&self, name: &str) -> Option<FakeParameter> {
        self.lookups.set(self.lookups.get() + 1);
        self.params.iter().find(|p| p.name == name).cloned()
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn is_static(&self) -> bool {
        self.is_static
    }

    fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    fn is_final(&self) -> bool {
        self.is_final
    }

    fn is_interface_member(&self) -> bool {
        self.is_interface
    }

    fn returns_reference(&self) -> bool {
        self.returns_reference
    }

    fn return_type(&self) -> Option<String> {
        self.return_type.clone()
    }
}

/// Helper: write `content` to a PHP file inside a fresh temp dir.  The
/// dir must be kept alive for as long as the file is needed.
pub fn write_php_file(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("TestSampleSingleClass.php");
    fs::write(&path, content).expect("failed to write PHP file");
    (dir, path)
}

/// A class with one documented method; `someMethod` spans lines 13-16
/// and its docblock lines 8-12.
pub const SINGLE_CLASS: &str = "<?php

namespace ZendTest\\Code\\Generator\\TestAsset;

class TestSampleSingleClass
{

    /**
     * Enter description here...
     *
     * @return bool
     */
    public function someMethod()
    {
        /* test test */
    }

}
";

/// Same layout, body with interior blank lines; `someMethod` spans lines
/// 13-20.
pub const SINGLE_CLASS_MULTI_LINES: &str = "<?php

namespace ZendTest\\Code\\Generator\\TestAsset;

class TestSampleSingleClassMultiLines
{

    /**
     * Enter description here...
     *
     * @return bool
     */
    public function someMethod()
    {
        /* test test */

        /* test test */

        /* test test */
    }

}
";

pub const SOME_METHOD_DOC: &str = "/**
     * Enter description here...
     *
     * @return bool
     */";

/// Provider for `someMethod` in a file written from `source`.
pub fn some_method_provider(path: PathBuf, end_line: usize) -> FakeProvider {
    FakeProvider {
        doc_comment: Some(SOME_METHOD_DOC.to_string()),
        start_line: 13,
        end_line,
        file: Some(path),
        ..FakeProvider::named("someMethod")
    }
}
