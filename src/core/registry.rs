//! Registry of exposed modules and their definitions.
//!
//! There is no runtime signature reflection here: whoever registers a
//! callable already knows its shape and declares it as ordinary data.
//! The registry is assembled once at startup and read-only afterwards.

use regex::Regex;
use serde_json::Value as JsonValue;

use crate::core::error::ShellbindError;
use crate::core::resolve::ResolvedInvocation;
use crate::core::signature::Signature;

/// Invocation handoff boundary: the handler receives exactly the
/// `(positional, keyword)` pair the resolver produced and performs the
/// call itself.
pub type HandlerFn = fn(&ResolvedInvocation) -> Result<Option<JsonValue>, ShellbindError>;

/// A callable definition: validated signature plus handler.
pub struct FunctionDef {
    pub signature: Signature,
    pub handler: HandlerFn,
}

pub enum Payload {
    Function(FunctionDef),
    Constant(JsonValue),
}

/// One named definition inside a module: a function or a constant.
pub struct Definition {
    pub name: String,
    pub doc: String,
    pub payload: Payload,
}

impl Definition {
    pub fn is_function(&self) -> bool {
        matches!(self.payload, Payload::Function(_))
    }
}

/// A named group of definitions, the unit a shell stub is built from.
pub struct SourceModule {
    name: String,
    doc: String,
    definitions: Vec<Definition>,
}

impl SourceModule {
    pub fn new(name: &str, doc: &str) -> Result<Self, ShellbindError> {
        validate_ident(name, "module")?;
        Ok(SourceModule {
            name: name.to_string(),
            doc: doc.to_string(),
            definitions: Vec::new(),
        })
    }

    pub fn function(
        mut self,
        name: &str,
        doc: &str,
        signature: Signature,
        handler: HandlerFn,
    ) -> Result<Self, ShellbindError> {
        self.push(Definition {
            name: name.to_string(),
            doc: doc.to_string(),
            payload: Payload::Function(FunctionDef { signature, handler }),
        })?;
        Ok(self)
    }

    pub fn constant(
        mut self,
        name: &str,
        doc: &str,
        value: JsonValue,
    ) -> Result<Self, ShellbindError> {
        self.push(Definition {
            name: name.to_string(),
            doc: doc.to_string(),
            payload: Payload::Constant(value),
        })?;
        Ok(self)
    }

    fn push(&mut self, definition: Definition) -> Result<(), ShellbindError> {
        validate_ident(&definition.name, "definition")?;
        if self.definitions.iter().any(|d| d.name == definition.name) {
            return Err(ShellbindError::SignatureContract(format!(
                "duplicate definition '{}' in module '{}'",
                definition.name, self.name
            )));
        }
        self.definitions.push(definition);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn get_function(&self, name: &str) -> Option<(&Definition, &FunctionDef)> {
        self.definitions.iter().find_map(|d| match &d.payload {
            Payload::Function(f) if d.name == name => Some((d, f)),
            _ => None,
        })
    }
}

fn validate_ident(name: &str, what: &str) -> Result<(), ShellbindError> {
    let ident = Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid identifier regex");
    if !ident.is_match(name) {
        return Err(ShellbindError::SignatureContract(format!(
            "invalid {what} name '{name}'"
        )));
    }
    Ok(())
}

/// All registered modules, insertion-ordered.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: Vec<SourceModule>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        ModuleRegistry::default()
    }

    pub fn register(&mut self, module: SourceModule) -> Result<(), ShellbindError> {
        if self.modules.iter().any(|m| m.name == module.name) {
            return Err(ShellbindError::SignatureContract(format!(
                "duplicate module '{}'",
                module.name
            )));
        }
        self.modules.push(module);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&SourceModule, ShellbindError> {
        self.modules
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| ShellbindError::NotFound(format!("module '{name}'")))
    }

    pub fn modules(&self) -> &[SourceModule] {
        &self.modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn noop(_inv: &ResolvedInvocation) -> Result<Option<JsonValue>, ShellbindError> {
        Ok(None)
    }

    #[test]
    fn test_duplicate_definition_rejected() {
        let result = SourceModule::new("m", "")
            .unwrap()
            .function("f", "", Signature::empty(), noop)
            .unwrap()
            .function("f", "", Signature::empty(), noop);
        assert!(matches!(
            result,
            Err(ShellbindError::SignatureContract(msg)) if msg.contains("duplicate")
        ));
    }

    #[test]
    fn test_constant_and_function_share_namespace() {
        let result = SourceModule::new("m", "")
            .unwrap()
            .constant("X", "", json!(1))
            .unwrap()
            .function("X", "", Signature::empty(), noop);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_module_is_not_found() {
        let registry = ModuleRegistry::new();
        assert!(matches!(
            registry.get("nope"),
            Err(ShellbindError::NotFound(_))
        ));
    }

    #[test]
    fn test_get_function_skips_constants() {
        let module = SourceModule::new("m", "")
            .unwrap()
            .constant("X", "", json!(1))
            .unwrap()
            .function("f", "", Signature::empty(), noop)
            .unwrap();
        assert!(module.get_function("f").is_some());
        assert!(module.get_function("X").is_none());
    }
}
