//! Reconstructs a callable invocation from parsed flag values.
//!
//! Three fixed passes in kind order, then a single aggregate check
//! that every required parameter ended up bound. The resolver never
//! invokes anything itself; its output is the `(positional, keyword)`
//! pair handed to the invocation collaborator.

use serde_json::Value as JsonValue;

use crate::core::classify::Classification;
use crate::core::coerce::{coerce_or_raw, coercer_for};
use crate::core::error::ShellbindError;
use crate::core::surface::{FlagValue, ParsedFlagValues};

/// Final output: positional values in declaration order, one per
/// positional-only parameter, plus keyword bindings in declaration
/// order for everything else that was bound.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInvocation {
    pub positional: Vec<JsonValue>,
    pub keyword: Vec<(String, JsonValue)>,
}

impl ResolvedInvocation {
    pub fn positional(&self, index: usize) -> Option<&JsonValue> {
        self.positional.get(index)
    }

    pub fn keyword(&self, name: &str) -> Option<&JsonValue> {
        self.keyword
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

pub fn resolve(
    classification: &Classification,
    mut parsed: ParsedFlagValues,
) -> Result<ResolvedInvocation, ShellbindError> {
    let mut positional: Vec<JsonValue> = Vec::new();
    let mut keyword: Vec<(String, JsonValue)> = Vec::new();
    let mut bound: Vec<String> = Vec::new();

    // Pass 1: positional-only slots, in declaration order. The surface
    // makes non-boolean ones mandatory; boolean-like ones fall back to
    // false when their presence flag was not given.
    for param in classification.positional_only() {
        match parsed.values.get(&param.name) {
            Some(FlagValue::Bound(value)) => {
                positional.push(value.clone());
                bound.push(param.name.clone());
            }
            _ if param.is_boolean_like() => {
                positional.push(JsonValue::Bool(false));
                bound.push(param.name.clone());
            }
            _ => {}
        }
    }

    // Pass 2: positional-or-keyword. Named form wins; otherwise claim
    // one token off the front of the shared catch-all pool. Boolean
    // toggles never touch the pool.
    for param in classification.positional_or_keyword() {
        match parsed.values.get(&param.name) {
            Some(FlagValue::Bound(value)) => {
                keyword.push((param.name.clone(), value.clone()));
                bound.push(param.name.clone());
            }
            _ if param.is_boolean_like() => {}
            _ => {
                if let Some(token) = parsed.catch_all.pop_front() {
                    let coercer = coercer_for(param);
                    let value = coerce_or_raw(coercer.as_ref(), &param.name, &token)?;
                    keyword.push((param.name.clone(), value));
                    bound.push(param.name.clone());
                }
            }
        }
    }

    // Pass 3: keyword-only, named form or nothing.
    for param in classification.keyword_only() {
        if let Some(FlagValue::Bound(value)) = parsed.values.get(&param.name) {
            keyword.push((param.name.clone(), value.clone()));
            bound.push(param.name.clone());
        }
    }

    // Pass 4: every required parameter must be bound by now. All
    // misses are reported together, in declaration order.
    let missing: Vec<String> = classification
        .iter()
        .filter(|param| {
            classification.is_required(&param.name) && !bound.contains(&param.name)
        })
        .map(|param| param.name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(ShellbindError::MissingRequired { names: missing });
    }

    if !parsed.catch_all.is_empty() {
        return Err(ShellbindError::UnclaimedPositional {
            tokens: parsed.catch_all.into_iter().collect(),
        });
    }

    Ok(ResolvedInvocation {
        positional,
        keyword,
    })
}
