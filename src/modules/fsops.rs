//! Small filesystem helpers exposed to the shell.

use std::fs;
use std::path::Path;

use serde_json::{json, Value as JsonValue};

use crate::core::error::ShellbindError;
use crate::core::registry::SourceModule;
use crate::core::resolve::ResolvedInvocation;
use crate::core::signature::{DeclaredType, ParamKind, ParameterSpec, Signature};

pub fn module() -> Result<SourceModule, ShellbindError> {
    SourceModule::new("fsops", "Filesystem helpers")?
        .function(
            "file_exists",
            "Report whether a path exists. Booleans print in their \
             shell spellings, so the result works directly in `if`.",
            Signature::new(vec![ParameterSpec::required(
                "path",
                ParamKind::PositionalOnly,
                Some(DeclaredType::Str),
            )])?,
            file_exists,
        )?
        .function(
            "line_count",
            "Count lines in a text file.",
            Signature::new(vec![ParameterSpec::required(
                "path",
                ParamKind::PositionalOnly,
                Some(DeclaredType::Str),
            )])?,
            line_count,
        )?
        .function(
            "head",
            "Print the first lines of a text file.",
            Signature::new(vec![
                ParameterSpec::required("path", ParamKind::PositionalOnly, Some(DeclaredType::Str)),
                ParameterSpec::optional(
                    "count",
                    ParamKind::KeywordOnly,
                    Some(DeclaredType::Int),
                    json!(10),
                ),
            ])?,
            head,
        )
}

fn path_arg<'a>(inv: &'a ResolvedInvocation) -> Result<&'a str, ShellbindError> {
    inv.positional(0)
        .and_then(JsonValue::as_str)
        .ok_or_else(|| ShellbindError::InvocationError("expected a path".to_string()))
}

fn file_exists(inv: &ResolvedInvocation) -> Result<Option<JsonValue>, ShellbindError> {
    let path = path_arg(inv)?;
    Ok(Some(json!(Path::new(path).exists())))
}

fn line_count(inv: &ResolvedInvocation) -> Result<Option<JsonValue>, ShellbindError> {
    let path = path_arg(inv)?;
    let contents = fs::read_to_string(path)?;
    Ok(Some(json!(contents.lines().count())))
}

fn head(inv: &ResolvedInvocation) -> Result<Option<JsonValue>, ShellbindError> {
    let path = path_arg(inv)?;
    let count = inv
        .keyword("count")
        .and_then(JsonValue::as_i64)
        .unwrap_or(10)
        .max(0) as usize;
    let contents = fs::read_to_string(path)?;
    let lines: Vec<JsonValue> = contents.lines().take(count).map(|l| json!(l)).collect();
    Ok(Some(JsonValue::Array(lines)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolve::resolve;
    use crate::core::surface::FunctionCli;
    use std::io::Write;

    fn invoke(function: &str, tokens: &[&str]) -> Result<Option<JsonValue>, ShellbindError> {
        let module = module().unwrap();
        let (_, function_def) = module.get_function(function).unwrap();
        let cli = FunctionCli::new(function, None, &function_def.signature);
        let raw: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        let parsed = cli.parse(&raw)?.expect("help not requested");
        let invocation = resolve(cli.classification(), parsed)?;
        (function_def.handler)(&invocation)
    }

    #[test]
    fn test_file_exists_true_and_false() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_string_lossy().to_string();
        assert_eq!(invoke("file_exists", &[&path]).unwrap(), Some(json!(true)));
        assert_eq!(
            invoke("file_exists", &["/no/such/path"]).unwrap(),
            Some(json!(false))
        );
    }

    #[test]
    fn test_line_count_and_head() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "one\ntwo\nthree").unwrap();
        let path = file.path().to_string_lossy().to_string();
        assert_eq!(invoke("line_count", &[&path]).unwrap(), Some(json!(3)));
        assert_eq!(
            invoke("head", &[&path, "--count", "2"]).unwrap(),
            Some(json!(["one", "two"]))
        );
    }

    #[test]
    fn test_missing_file_propagates_io_error() {
        let err = invoke("line_count", &["/no/such/file"]).unwrap_err();
        assert!(matches!(err, ShellbindError::IoError(_)));
    }
}
