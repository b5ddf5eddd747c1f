//! Shell stub generation.
//!
//! A stub is the sourceable shell file that makes a module's
//! definitions available in the current session: one hidden runner
//! function delegating to the shellbind binary, one wrapper function
//! per callable, one `declare` per constant.
//!
//! Everything environment-dependent (stub home, executable path)
//! arrives through `StubConfig`; this module reads no ambient process
//! state.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::ShellbindError;
use crate::core::registry::{Payload, SourceModule};
use crate::core::shell::declare_var;

/// Explicit stub-generation inputs, assembled by the CLI layer.
#[derive(Debug, Clone)]
pub struct StubConfig {
    /// Root of the shellbind home; stubs land under `<home>/stubs/`.
    pub home: PathBuf,
    /// Executable the runner function delegates to.
    pub exe: PathBuf,
}

impl StubConfig {
    pub fn stubs_dir(&self) -> PathBuf {
        self.home.join("stubs")
    }
}

fn runner_name(module: &str) -> String {
    format!("_shellbind_run_{module}")
}

fn make_runner(module: &str, exe: &Path) -> String {
    format!(
        "{runner}() {{\n    \"{exe}\" run {module} \"$@\"\n}}\n",
        runner = runner_name(module),
        exe = exe.display(),
    )
}

fn make_fn(name: &str, runner: &str) -> String {
    format!("{name}() {{\n    {runner} {name} \"$@\"\n}}\n")
}

fn banner(module: &SourceModule) -> String {
    let title = format!("shellbind stub for {}", module.name());
    let rule = "#".repeat(title.len());
    format!("######{rule}######\n##### {title} #####\n######{rule}######\n")
}

/// Render the complete stub file contents for one module.
pub fn build_stub(module: &SourceModule, config: &StubConfig) -> String {
    let runner = runner_name(module.name());
    let mut sections: Vec<String> = vec![banner(module)];

    sections.push("# shellbind runner".to_string());
    sections.push(make_runner(module.name(), &config.exe));

    sections.push("\n# Definitions".to_string());
    for definition in module.definitions() {
        match &definition.payload {
            Payload::Function(_) => sections.push(make_fn(&definition.name, &runner)),
            Payload::Constant(value) => sections.push(declare_var(&definition.name, value)),
        }
    }
    sections.join("\n")
}

/// Write the stub under `<home>/stubs/<module>.sh`, creating
/// directories as needed, and return the path.
pub fn write_stub(module: &SourceModule, config: &StubConfig) -> Result<PathBuf, ShellbindError> {
    let contents = build_stub(module, config);
    let stub_file = config.stubs_dir().join(format!("{}.sh", module.name()));
    if let Some(parent) = stub_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&stub_file, contents)?;
    Ok(stub_file)
}
