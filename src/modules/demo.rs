//! Demonstration module exercising every calling convention.

use serde_json::{json, Value as JsonValue};

use crate::core::error::ShellbindError;
use crate::core::registry::SourceModule;
use crate::core::resolve::ResolvedInvocation;
use crate::core::signature::{DeclaredType, ParamKind, ParameterSpec, Signature};

pub fn module() -> Result<SourceModule, ShellbindError> {
    SourceModule::new("demo", "Demonstration callables for shellbind")?
        .function(
            "multiply",
            "Multiply two integers. Incoming values are coerced to ints \
             or the parse fails on invalid input.",
            Signature::new(vec![
                ParameterSpec::required("a", ParamKind::PositionalOrKeyword, Some(DeclaredType::Int)),
                ParameterSpec::required("b", ParamKind::PositionalOrKeyword, Some(DeclaredType::Int)),
            ])?,
            multiply,
        )?
        .function(
            "greet",
            "Compose a greeting. The name is positional-only, the \
             greeting may be given by name or position, and --shout is \
             keyword-only.",
            Signature::new(vec![
                ParameterSpec::required("name", ParamKind::PositionalOnly, Some(DeclaredType::Str)),
                ParameterSpec::optional(
                    "greeting",
                    ParamKind::PositionalOrKeyword,
                    Some(DeclaredType::Str),
                    json!("Hello"),
                ),
                ParameterSpec::optional(
                    "shout",
                    ParamKind::KeywordOnly,
                    Some(DeclaredType::Bool),
                    json!(false),
                ),
            ])?,
            greet,
        )?
        .function(
            "repeat",
            "Repeat a word, one copy per output line.",
            Signature::new(vec![
                ParameterSpec::required("word", ParamKind::PositionalOrKeyword, Some(DeclaredType::Str)),
                ParameterSpec::optional(
                    "times",
                    ParamKind::KeywordOnly,
                    Some(DeclaredType::Int),
                    json!(2),
                ),
            ])?,
            repeat,
        )?
        .constant(
            "DEMO_TAGLINE",
            "Short description exported into the shell.",
            json!("native callables, shell ergonomics"),
        )?
        .constant("DEMO_FACTORS", "Sample integer array.", json!([2, 3, 5]))
}

fn int_arg(inv: &ResolvedInvocation, name: &str) -> Result<i64, ShellbindError> {
    inv.keyword(name)
        .and_then(JsonValue::as_i64)
        .ok_or_else(|| ShellbindError::InvocationError(format!("expected integer for '{name}'")))
}

fn multiply(inv: &ResolvedInvocation) -> Result<Option<JsonValue>, ShellbindError> {
    let a = int_arg(inv, "a")?;
    let b = int_arg(inv, "b")?;
    Ok(Some(json!(a * b)))
}

fn greet(inv: &ResolvedInvocation) -> Result<Option<JsonValue>, ShellbindError> {
    let name = inv
        .positional(0)
        .and_then(JsonValue::as_str)
        .ok_or_else(|| ShellbindError::InvocationError("expected a name".to_string()))?;
    let greeting = inv
        .keyword("greeting")
        .and_then(JsonValue::as_str)
        .unwrap_or("Hello");
    let mut message = format!("{greeting}, {name}!");
    if inv.keyword("shout").and_then(JsonValue::as_bool) == Some(true) {
        message = message.to_uppercase();
    }
    Ok(Some(json!(message)))
}

fn repeat(inv: &ResolvedInvocation) -> Result<Option<JsonValue>, ShellbindError> {
    let word = inv
        .keyword("word")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| ShellbindError::InvocationError("expected a word".to_string()))?;
    let times = inv.keyword("times").and_then(JsonValue::as_i64).unwrap_or(2);
    let lines: Vec<JsonValue> = (0..times.max(0)).map(|_| json!(word)).collect();
    Ok(Some(JsonValue::Array(lines)))
}
