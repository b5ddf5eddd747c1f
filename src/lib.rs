//! shellbind: native callables as first-class shell commands.
//!
//! A callable's parameter signature, declared once as ordinary data,
//! is mapped onto a command-line argument surface, and parsed input is
//! mapped back into the positional list and keyword mapping the
//! callable expects. Sourcing a generated stub makes every function of
//! a registered module callable by name in the current shell session,
//! and exports its constants as shell variables.
//!
//! # Calling conventions
//!
//! - **positional-only** parameters are mandatory positional slots
//!   (boolean-like ones become presence flags).
//! - **positional-or-keyword** parameters accept `--name VALUE` or an
//!   unnamed trailing token, claimed front-to-back in declaration
//!   order.
//! - **keyword-only** parameters accept `--name VALUE` only; booleans
//!   become `--name` / `--no-name` toggles.
//!
//! # Examples
//!
//! ```bash
//! # Install and source the demo module's stub
//! source "$(shellbind source demo)"
//!
//! # Functions now behave like shell commands
//! multiply 6 7
//! greet anna --shout
//!
//! # Or drive the runner directly
//! shellbind run demo multiply --a 6 --b 7
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: signature model, classifier, surface generator,
//!   resolver, coercion, registry, stub generation
//! - [`modules`]: built-in source modules shipped with the binary

pub(crate) mod cli;
pub mod core;
pub mod modules;

use core::config::{resolve_home, ShellbindConfig};
use core::error::ShellbindError;
use core::registry::ModuleRegistry;
use core::resolve::resolve;
use core::shell::result_lines;
use core::stub::{build_stub, write_stub, StubConfig};
use core::surface::FunctionCli;

use clap::Parser;
use colored::Colorize;
use serde_json::json;
use std::env;
use std::path::PathBuf;

use cli::{Cli, Command, ListCli, RunCli, SourceCli};

pub fn run() -> Result<(), ShellbindError> {
    let cli = Cli::parse();
    let registry = modules::builtin_registry()?;
    match cli.command {
        Command::Source(args) => source_module(&registry, args),
        Command::Run(args) => run_function(&registry, &args),
        Command::List(args) => list_modules(&registry, &args),
    }
}

fn source_module(registry: &ModuleRegistry, args: SourceCli) -> Result<(), ShellbindError> {
    let module = registry.get(&args.module)?;
    let config = ShellbindConfig::load_optional(args.config.as_deref())?;
    let env_home = env::var_os("SHELLBIND_HOME").map(PathBuf::from);
    let fallback = env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".shellbind");
    let stub_config = StubConfig {
        home: resolve_home(args.home, env_home, &config, fallback),
        exe: env::current_exe()?,
    };
    if args.stdout {
        print!("{}", build_stub(module, &stub_config));
        return Ok(());
    }
    let path = write_stub(module, &stub_config)?;
    println!("{}", path.display());
    Ok(())
}

fn run_function(registry: &ModuleRegistry, args: &RunCli) -> Result<(), ShellbindError> {
    let module = registry.get(&args.module)?;
    let (definition, function) = module.get_function(&args.function).ok_or_else(|| {
        ShellbindError::NotFound(format!(
            "function '{}' in module '{}'",
            args.function, args.module
        ))
    })?;

    let surface = FunctionCli::new(
        &definition.name,
        Some(definition.doc.as_str()),
        &function.signature,
    );
    let Some(parsed) = surface.parse(&args.args)? else {
        // --help was rendered; nothing to invoke.
        return Ok(());
    };
    let invocation = resolve(surface.classification(), parsed)?;
    if let Some(result) = (function.handler)(&invocation)? {
        for line in result_lines(&result) {
            println!("{line}");
        }
    }
    Ok(())
}

fn list_modules(registry: &ModuleRegistry, args: &ListCli) -> Result<(), ShellbindError> {
    let selected: Vec<_> = match &args.module {
        Some(name) => vec![registry.get(name)?],
        None => registry.modules().iter().collect(),
    };
    match args.format.as_str() {
        "json" => {
            let modules: Vec<_> = selected.iter().map(|m| module_view(m)).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "modules": modules }))
                    .map_err(|e| ShellbindError::InvocationError(e.to_string()))?
            );
        }
        "text" => {
            for module in selected {
                println!(
                    "{} {}",
                    module.name().bold(),
                    compact_doc(module.doc(), 60)
                );
                for definition in module.definitions() {
                    match &definition.payload {
                        core::registry::Payload::Function(f) => println!(
                            "  {}{}  {}",
                            definition.name,
                            f.signature.describe(),
                            compact_doc(&definition.doc, 48)
                        ),
                        core::registry::Payload::Constant(value) => println!(
                            "  {} = {}  {}",
                            definition.name,
                            value,
                            compact_doc(&definition.doc, 48)
                        ),
                    }
                }
            }
        }
        other => {
            return Err(ShellbindError::Usage(format!(
                "unknown list format '{other}' (expected 'text' or 'json')"
            )));
        }
    }
    Ok(())
}

fn module_view(module: &core::registry::SourceModule) -> serde_json::Value {
    let definitions: Vec<_> = module
        .definitions()
        .iter()
        .map(|d| match &d.payload {
            core::registry::Payload::Function(f) => json!({
                "name": d.name,
                "kind": "function",
                "doc": d.doc,
                "signature": f.signature.describe(),
                "params": f.signature.params(),
            }),
            core::registry::Payload::Constant(value) => json!({
                "name": d.name,
                "kind": "constant",
                "doc": d.doc,
                "value": value,
            }),
        })
        .collect();
    json!({
        "name": module.name(),
        "doc": module.doc(),
        "definitions": definitions,
    })
}

/// Collapse whitespace and bound length for one-line listing output.
fn compact_doc(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{preview}...")
    } else {
        preview
    }
}
