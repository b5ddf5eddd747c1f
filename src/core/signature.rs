//! Static parameter signature model for exposed callables.
//!
//! A callable's shape is declared once as ordinary data by whoever
//! registers it. Declaration order and name uniqueness are contract
//! invariants validated here, before any argument parsing happens.

use crate::core::error::ShellbindError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Calling convention of a single parameter.
///
/// Kinds must appear in declaration order: positional-only first,
/// then positional-or-keyword, then keyword-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    PositionalOnly,
    PositionalOrKeyword,
    KeywordOnly,
}

impl ParamKind {
    fn rank(self) -> u8 {
        match self {
            ParamKind::PositionalOnly => 0,
            ParamKind::PositionalOrKeyword => 1,
            ParamKind::KeywordOnly => 2,
        }
    }
}

/// Semantic type hint the coercion service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredType {
    Bool,
    Int,
    Float,
    Str,
    List,
}

impl DeclaredType {
    pub fn name(self) -> &'static str {
        match self {
            DeclaredType::Bool => "bool",
            DeclaredType::Int => "int",
            DeclaredType::Float => "float",
            DeclaredType::Str => "str",
            DeclaredType::List => "list",
        }
    }
}

/// One declared parameter of a callable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub kind: ParamKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<DeclaredType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
}

impl ParameterSpec {
    /// A parameter with no default. Absence of a default marks it required.
    pub fn required(name: &str, kind: ParamKind, declared_type: Option<DeclaredType>) -> Self {
        ParameterSpec {
            name: name.to_string(),
            kind,
            declared_type,
            default: None,
        }
    }

    /// A parameter carrying a stated default.
    pub fn optional(
        name: &str,
        kind: ParamKind,
        declared_type: Option<DeclaredType>,
        default: JsonValue,
    ) -> Self {
        ParameterSpec {
            name: name.to_string(),
            kind,
            declared_type,
            default: Some(default),
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// Boolean-like parameters take a divergent presence/toggle path on
    /// the generated surface and never go through value coercion.
    pub fn is_boolean_like(&self) -> bool {
        matches!(self.declared_type, Some(DeclaredType::Bool))
            || matches!(self.default, Some(JsonValue::Bool(_)))
    }

    /// Long-flag spelling: underscores become dashes.
    pub fn flag_name(&self) -> String {
        self.name.replace('_', "-")
    }
}

/// Names clap claims for itself on every generated surface.
const RESERVED_NAMES: &[&str] = &["help"];

/// A validated, ordered parameter list.
#[derive(Debug, Clone, Serialize)]
pub struct Signature {
    params: Vec<ParameterSpec>,
}

impl Signature {
    /// Validates the parameter list as a whole. Any violation here is a
    /// programming error in the registering collaborator, surfaced long
    /// before argument parsing begins.
    pub fn new(params: Vec<ParameterSpec>) -> Result<Self, ShellbindError> {
        let ident = Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid identifier regex");
        let mut seen: Vec<&str> = Vec::new();
        let mut last_rank = 0u8;
        for param in &params {
            if !ident.is_match(&param.name) {
                return Err(ShellbindError::SignatureContract(format!(
                    "invalid parameter name '{}'",
                    param.name
                )));
            }
            if RESERVED_NAMES.contains(&param.name.as_str()) {
                return Err(ShellbindError::SignatureContract(format!(
                    "parameter name '{}' is reserved",
                    param.name
                )));
            }
            if seen.contains(&param.name.as_str()) {
                return Err(ShellbindError::SignatureContract(format!(
                    "duplicate parameter name '{}'",
                    param.name
                )));
            }
            if param.kind.rank() < last_rank {
                return Err(ShellbindError::SignatureContract(format!(
                    "parameter '{}' appears after a later-binding kind",
                    param.name
                )));
            }
            last_rank = param.kind.rank();
            seen.push(&param.name);
        }
        // Boolean-like parameters grow a no_<name> negation flag on the
        // generated surface; another parameter may not occupy it.
        for param in &params {
            if param.is_boolean_like() {
                let negation = format!("no_{}", param.name);
                if params.iter().any(|p| p.name == negation) {
                    return Err(ShellbindError::SignatureContract(format!(
                        "parameter '{}' collides with the negation flag of '{}'",
                        negation, param.name
                    )));
                }
            }
        }
        Ok(Signature { params })
    }

    /// A callable that takes no arguments.
    pub fn empty() -> Self {
        Signature { params: Vec::new() }
    }

    pub fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    /// Human-readable one-line summary with kind separators, e.g.
    /// `(name, /, greeting=Hello, *, shout: bool=false)`.
    pub fn describe(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        let mut last_kind: Option<ParamKind> = None;
        for param in &self.params {
            if last_kind == Some(ParamKind::PositionalOnly)
                && param.kind != ParamKind::PositionalOnly
            {
                parts.push("/".to_string());
            }
            if param.kind == ParamKind::KeywordOnly && last_kind != Some(ParamKind::KeywordOnly) {
                parts.push("*".to_string());
            }
            let mut rendered = param.name.clone();
            if let Some(ty) = param.declared_type {
                rendered.push_str(": ");
                rendered.push_str(ty.name());
            }
            if let Some(default) = &param.default {
                rendered.push('=');
                rendered.push_str(&display_default(default));
            }
            parts.push(rendered);
            last_kind = Some(param.kind);
        }
        if last_kind == Some(ParamKind::PositionalOnly) {
            parts.push("/".to_string());
        }
        format!("({})", parts.join(", "))
    }
}

/// Defaults render without JSON string quoting in help and summaries.
pub fn display_default(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
