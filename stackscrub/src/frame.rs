//! Cleaned stack frame records and their one-line rendering.

use crate::metadata::TypeId;
use serde::Serialize;
use std::fmt;

/// Sentinel shown where the snapshot carried no usable method name.
pub const UNKNOWN_METHOD: &str = "?";

/// Frame location context resolved to plain display strings.
///
/// Carrying the strings (rather than a metadata handle) keeps frames
/// self-contained: rendering and filtering never need the table again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeName {
    /// Simple name without namespace or nesting chain.
    pub name: String,
    /// Namespace of the outermost enclosing declaration, when the host
    /// runtime has such a concept.
    pub namespace: Option<String>,
    /// Dot-qualified name, rendered when the frame has no file path.
    pub full_name: String,
}

/// How a parameter is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgMode {
    Value,
    Out,
    Ref,
}

impl ArgMode {
    #[must_use]
    pub fn is_out(self) -> bool {
        self == ArgMode::Out
    }

    #[must_use]
    pub fn is_ref(self) -> bool {
        self == ArgMode::Ref
    }
}

/// One generic argument or formal parameter of a resolved method.
///
/// Describes the declaration only; no runtime values are captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodArg {
    /// Declared name, or `"?"` when the host stripped it.
    pub name: String,
    /// Display name of the argument's type.
    pub type_name: String,
    /// Handle into the metadata table the frame was resolved against; absent
    /// on hand-built frames.
    #[serde(skip)]
    pub type_id: Option<TypeId>,
    pub mode: ArgMode,
}

impl MethodArg {
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, mode: ArgMode) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            type_id: None,
            mode,
        }
    }
}

impl fmt::Display for MethodArg {
    /// `{out |ref }{type} {name}`, e.g. `out int& parsed`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            ArgMode::Out => f.write_str("out ")?,
            ArgMode::Ref => f.write_str("ref ")?,
            ArgMode::Value => {}
        }
        write!(f, "{} {}", self.type_name, self.name)
    }
}

/// One cleaned, resolved stack frame.
///
/// Produced by [`parse`](crate::parse); every field is already filtered and
/// folded, so rendering is pure formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Source file, with common folder segments already folded away.
    pub file_path: Option<String>,
    /// Type whose code the frame executes. For unwound state-machine steps
    /// this stays the synthesized type the runtime actually reported.
    pub containing_type: Option<TypeName>,
    /// Resolved method name; `"?"` when the snapshot had no metadata.
    pub method_name: String,
    pub generic_arguments: Vec<MethodArg>,
    pub parameters: Vec<MethodArg>,
    /// 1-based line number; 0 means unknown.
    pub line_number: u32,
    /// 1-based column number; 0 means unknown.
    pub column_number: u32,
    /// Index of the raw frame this one was resolved from.
    #[serde(skip)]
    pub raw_index: Option<usize>,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            file_path: None,
            containing_type: None,
            method_name: UNKNOWN_METHOD.to_owned(),
            generic_arguments: Vec::new(),
            parameters: Vec::new(),
            line_number: 0,
            column_number: 0,
            raw_index: None,
        }
    }
}

impl fmt::Display for Frame {
    /// One line per frame, stable across runs:
    ///
    /// `{path}; {method}<{generics}>({params}); Line:{n} (Col:{m})`
    ///
    /// The path prefix falls back to the full type name when no file path is
    /// known, and is omitted entirely when neither exists. Line and column
    /// only appear when non-zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.file_path {
            write!(f, "{path}; ")?;
        } else if let Some(containing) = &self.containing_type {
            write!(f, "{}; ", containing.full_name)?;
        }

        f.write_str(&self.method_name)?;

        if !self.generic_arguments.is_empty() {
            let names: Vec<&str> = self
                .generic_arguments
                .iter()
                .map(|arg| arg.type_name.as_str())
                .collect();
            write!(f, "<{}>", names.join(", "))?;
        }

        f.write_str("(")?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")?;

        if self.line_number != 0 {
            write!(f, "; Line:{}", self.line_number)?;
        }
        if self.column_number != 0 {
            write!(f, " (Col:{})", self.column_number)?;
        }
        Ok(())
    }
}
