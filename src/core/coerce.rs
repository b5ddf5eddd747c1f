//! Type coercion service: turns raw shell tokens into typed values.
//!
//! A declared type yields a strict coercer that fails the whole parse
//! on a bad token. A type inferred from a default value yields a
//! lenient coercer that falls back to shell-literal inference, then to
//! the raw string. Parameters with neither pass raw strings through.

use serde_json::Value as JsonValue;

use crate::core::error::ShellbindError;
use crate::core::signature::{DeclaredType, ParameterSpec};

/// The value-parsing action registered for one parameter.
#[derive(Debug, Clone, Copy)]
pub struct Coercer {
    ty: DeclaredType,
    strict: bool,
}

impl Coercer {
    /// Name surfaced in generated help text.
    pub fn name(&self) -> &'static str {
        self.ty.name()
    }

    pub fn coerce(&self, param: &str, raw: &str) -> Result<JsonValue, ShellbindError> {
        match cast_typed(self.ty, raw) {
            Some(value) => Ok(value),
            None if self.strict => Err(ShellbindError::CoercionFailure {
                param: param.to_string(),
                value: raw.to_string(),
                expected: self.ty.name().to_string(),
            }),
            None => Ok(cast_loose(raw)),
        }
    }
}

/// Resolve the coercer for a parameter, or `None` for raw pass-through.
/// Boolean-like parameters use presence/toggle conventions instead and
/// never reach this path during parsing.
pub fn coercer_for(param: &ParameterSpec) -> Option<Coercer> {
    if let Some(ty) = param.declared_type {
        return Some(Coercer { ty, strict: true });
    }
    let default = param.default.as_ref()?;
    infer_type(default).map(|ty| Coercer { ty, strict: false })
}

/// Coerce when a coercer applies, otherwise keep the raw string.
pub fn coerce_or_raw(
    coercer: Option<&Coercer>,
    param: &str,
    raw: &str,
) -> Result<JsonValue, ShellbindError> {
    match coercer {
        Some(c) => c.coerce(param, raw),
        None => Ok(JsonValue::String(raw.to_string())),
    }
}

fn infer_type(default: &JsonValue) -> Option<DeclaredType> {
    match default {
        JsonValue::Bool(_) => Some(DeclaredType::Bool),
        JsonValue::Number(n) if n.is_i64() => Some(DeclaredType::Int),
        JsonValue::Number(_) => Some(DeclaredType::Float),
        JsonValue::String(_) => Some(DeclaredType::Str),
        JsonValue::Array(_) => Some(DeclaredType::List),
        _ => None,
    }
}

fn cast_typed(ty: DeclaredType, raw: &str) -> Option<JsonValue> {
    match ty {
        DeclaredType::Bool => {
            if raw.eq_ignore_ascii_case("true") {
                Some(JsonValue::Bool(true))
            } else if raw.eq_ignore_ascii_case("false") {
                Some(JsonValue::Bool(false))
            } else {
                None
            }
        }
        DeclaredType::Int => raw.parse::<i64>().ok().map(JsonValue::from),
        DeclaredType::Float => raw
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(JsonValue::Number),
        DeclaredType::Str => Some(JsonValue::String(raw.to_string())),
        DeclaredType::List => Some(JsonValue::Array(
            raw.split_whitespace()
                .map(|token| JsonValue::String(token.to_string()))
                .collect(),
        )),
    }
}

/// Shell-literal inference for untyped values: `true`/`false` become
/// booleans, bare digit runs become integers, everything else stays a
/// string.
fn cast_loose(raw: &str) -> JsonValue {
    if raw == "true" || raw == "false" {
        return JsonValue::Bool(raw == "true");
    }
    if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = raw.parse::<i64>() {
            return JsonValue::from(n);
        }
    }
    JsonValue::String(raw.to_string())
}
