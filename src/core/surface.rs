//! Generated command-line surface for a single callable.
//!
//! One clap argument per parameter, built with the builder API per the
//! parameter's calling convention:
//!
//! - positional-only: mandatory positional slot; boolean-like ones
//!   become a presence-only flag instead (true when given).
//! - positional-or-keyword: `--name` option, plus eligibility for a
//!   single shared hidden catch-all slot that collects unnamed
//!   trailing tokens; boolean-like ones become a `--name`/`--no-name`
//!   toggle pair and are only settable by name.
//! - keyword-only: `--name` option or toggle pair, no positional form.
//!
//! Parsed output records every parameter as `Bound` or explicitly
//! `Unset` so the resolver can tell "omitted" apart from "supplied a
//! value equal to the default".

use std::collections::{HashMap, VecDeque};

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde_json::Value as JsonValue;

use crate::core::classify::Classification;
use crate::core::coerce::{coerce_or_raw, coercer_for};
use crate::core::error::ShellbindError;
use crate::core::signature::{display_default, ParamKind, ParameterSpec, Signature};

/// Arg id of the shared catch-all slot. Contains a dash, which no
/// validated parameter name can, so it never collides.
pub const CATCH_ALL_ID: &str = "trailing-positional";

/// A parsed flag slot: either a concrete value or explicitly unset.
/// The sentinel is structural, so it cannot collide with any
/// legitimately parseable value.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    Bound(JsonValue),
    Unset,
}

impl FlagValue {
    pub fn is_unset(&self) -> bool {
        matches!(self, FlagValue::Unset)
    }
}

/// Output of one parse pass: one entry per parameter (never
/// absence-of-key), plus the ordered leftover unnamed tokens.
#[derive(Debug, Clone)]
pub struct ParsedFlagValues {
    pub values: HashMap<String, FlagValue>,
    pub catch_all: VecDeque<String>,
}

/// The generated surface for one callable signature.
pub struct FunctionCli {
    name: String,
    doc: Option<String>,
    classification: Classification,
}

impl FunctionCli {
    pub fn new(name: &str, doc: Option<&str>, signature: &Signature) -> Self {
        FunctionCli {
            name: name.to_string(),
            doc: doc.map(str::to_string),
            classification: Classification::classify(signature),
        }
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Build the clap command for this signature.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(self.name.clone())
            .no_binary_name(true)
            .disable_version_flag(true);
        if let Some(doc) = &self.doc {
            cmd = cmd.about(doc.clone());
        }

        if !self.classification.positional_only().is_empty() {
            cmd = cmd.next_help_heading("positional only args");
            for param in self.classification.positional_only() {
                cmd = cmd.arg(positional_only_arg(param));
            }
        }

        if !self.classification.positional_or_keyword().is_empty() {
            cmd = cmd.next_help_heading("positional or keyword args");
            cmd = cmd.arg(
                Arg::new(CATCH_ALL_ID)
                    .num_args(0..)
                    .value_name("ARGS")
                    .hide(true),
            );
            for param in self.classification.positional_or_keyword() {
                for arg in named_args(param) {
                    cmd = cmd.arg(arg);
                }
            }
        }

        if !self.classification.keyword_only().is_empty() {
            cmd = cmd.next_help_heading("keyword only args");
            for param in self.classification.keyword_only() {
                for arg in named_args(param) {
                    cmd = cmd.arg(arg);
                }
            }
        }

        cmd
    }

    /// Parse raw tokens into per-parameter flag values.
    ///
    /// Returns `Ok(None)` when clap rendered help and there is nothing
    /// to run. Named values are coerced here, so a bad token surfaces
    /// as `CoercionFailure` at parse time; catch-all tokens are only
    /// coerced when claimed during resolution.
    pub fn parse(&self, raw_args: &[String]) -> Result<Option<ParsedFlagValues>, ShellbindError> {
        let matches = match self.command().try_get_matches_from(raw_args) {
            Ok(matches) => matches,
            Err(err) if err.kind() == ErrorKind::DisplayHelp => {
                err.print()?;
                return Ok(None);
            }
            Err(err) => return Err(ShellbindError::Usage(err.to_string())),
        };
        Ok(Some(self.extract(&matches)?))
    }

    fn extract(&self, matches: &ArgMatches) -> Result<ParsedFlagValues, ShellbindError> {
        let mut values = HashMap::new();
        for param in self.classification.iter() {
            values.insert(param.name.clone(), extract_flag(param, matches)?);
        }

        let catch_all: VecDeque<String> =
            if self.classification.positional_or_keyword().is_empty() {
                VecDeque::new()
            } else {
                matches
                    .get_many::<String>(CATCH_ALL_ID)
                    .map(|tokens| tokens.cloned().collect())
                    .unwrap_or_default()
            };

        Ok(ParsedFlagValues { values, catch_all })
    }
}

fn extract_flag(param: &ParameterSpec, matches: &ArgMatches) -> Result<FlagValue, ShellbindError> {
    if param.is_boolean_like() {
        if matches.get_flag(&param.name) {
            return Ok(FlagValue::Bound(JsonValue::Bool(true)));
        }
        if param.kind != ParamKind::PositionalOnly && matches.get_flag(&negation_id(param))
        {
            return Ok(FlagValue::Bound(JsonValue::Bool(false)));
        }
        return Ok(FlagValue::Unset);
    }
    match matches.get_one::<String>(&param.name) {
        Some(raw) => {
            let coercer = coercer_for(param);
            Ok(FlagValue::Bound(coerce_or_raw(
                coercer.as_ref(),
                &param.name,
                raw,
            )?))
        }
        None => Ok(FlagValue::Unset),
    }
}

fn positional_only_arg(param: &ParameterSpec) -> Arg {
    if param.is_boolean_like() {
        // Presence-only flag: true when given, resolver fills false
        // when absent. No value token is consumed.
        return Arg::new(param.name.clone())
            .long(param.flag_name())
            .action(ArgAction::SetTrue)
            .help(help_text(param));
    }
    Arg::new(param.name.clone())
        .required(true)
        .action(ArgAction::Set)
        .value_name(param.name.to_uppercase())
        .help(help_text(param))
}

fn named_args(param: &ParameterSpec) -> Vec<Arg> {
    if param.is_boolean_like() {
        let negation = negation_id(param);
        return vec![
            Arg::new(param.name.clone())
                .long(param.flag_name())
                .action(ArgAction::SetTrue)
                .overrides_with(negation.clone())
                .help(help_text(param)),
            Arg::new(negation)
                .long(format!("no-{}", param.flag_name()))
                .action(ArgAction::SetTrue)
                .overrides_with(param.name.clone())
                .hide(true),
        ];
    }
    vec![
        Arg::new(param.name.clone())
            .long(param.flag_name())
            .action(ArgAction::Set)
            .value_name(param.name.to_uppercase())
            .help(help_text(param)),
    ]
}

fn negation_id(param: &ParameterSpec) -> String {
    format!("no_{}", param.name)
}

/// Per-option help: the resolved coercion name (type name for
/// toggles), then whether the parameter is required or what default it
/// carries.
fn help_text(param: &ParameterSpec) -> String {
    let mut parts: Vec<String> = Vec::new();
    if param.is_boolean_like() {
        parts.push("bool".to_string());
    } else if let Some(coercer) = coercer_for(param) {
        parts.push(coercer.name().to_string());
    }
    match &param.default {
        Some(default) => parts.push(format!("(default: {})", display_default(default))),
        None => parts.push("(required)".to_string()),
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::signature::{DeclaredType, ParamKind};
    use serde_json::json;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn parse(cli: &FunctionCli, tokens: &[&str]) -> ParsedFlagValues {
        cli.parse(&args(tokens)).unwrap().unwrap()
    }

    fn toggle_signature() -> Signature {
        Signature::new(vec![ParameterSpec::optional(
            "verbose",
            ParamKind::KeywordOnly,
            Some(DeclaredType::Bool),
            json!(false),
        )])
        .unwrap()
    }

    #[test]
    fn test_positional_only_values_are_coerced_in_order() {
        let sig = Signature::new(vec![
            ParameterSpec::required("a", ParamKind::PositionalOnly, Some(DeclaredType::Int)),
            ParameterSpec::required("b", ParamKind::PositionalOnly, Some(DeclaredType::Str)),
        ])
        .unwrap();
        let cli = FunctionCli::new("f", None, &sig);
        let parsed = parse(&cli, &["42", "hello"]);
        assert_eq!(parsed.values["a"], FlagValue::Bound(json!(42)));
        assert_eq!(parsed.values["b"], FlagValue::Bound(json!("hello")));
        assert!(parsed.catch_all.is_empty());
    }

    #[test]
    fn test_toggle_explicit_true_false_and_unset() {
        let cli = FunctionCli::new("f", None, &toggle_signature());
        let on = parse(&cli, &["--verbose"]);
        assert_eq!(on.values["verbose"], FlagValue::Bound(json!(true)));

        let off = parse(&cli, &["--no-verbose"]);
        assert_eq!(off.values["verbose"], FlagValue::Bound(json!(false)));

        let unset = parse(&cli, &[]);
        assert!(unset.values["verbose"].is_unset());
    }

    #[test]
    fn test_last_toggle_wins() {
        let cli = FunctionCli::new("f", None, &toggle_signature());
        let parsed = parse(&cli, &["--verbose", "--no-verbose"]);
        assert_eq!(parsed.values["verbose"], FlagValue::Bound(json!(false)));
    }

    #[test]
    fn test_unnamed_tokens_land_in_catch_all() {
        let sig = Signature::new(vec![
            ParameterSpec::optional("x", ParamKind::PositionalOrKeyword, None, json!("0")),
            ParameterSpec::optional("y", ParamKind::PositionalOrKeyword, None, json!("0")),
        ])
        .unwrap();
        let cli = FunctionCli::new("f", None, &sig);
        let parsed = parse(&cli, &["5", "6"]);
        assert!(parsed.values["x"].is_unset());
        assert!(parsed.values["y"].is_unset());
        assert_eq!(parsed.catch_all, VecDeque::from(vec!["5".to_string(), "6".to_string()]));
    }

    #[test]
    fn test_named_form_coerces_at_parse_time() {
        let sig = Signature::new(vec![ParameterSpec::required(
            "n",
            ParamKind::KeywordOnly,
            Some(DeclaredType::Int),
        )])
        .unwrap();
        let cli = FunctionCli::new("f", None, &sig);
        let err = cli.parse(&args(&["--n", "abc"])).unwrap_err();
        assert!(matches!(
            err,
            ShellbindError::CoercionFailure { param, value, .. }
                if param == "n" && value == "abc"
        ));
    }

    #[test]
    fn test_underscored_names_use_dashed_flags() {
        let sig = Signature::new(vec![ParameterSpec::optional(
            "dry_run",
            ParamKind::KeywordOnly,
            None,
            json!(false),
        )])
        .unwrap();
        let cli = FunctionCli::new("f", None, &sig);
        let parsed = parse(&cli, &["--no-dry-run"]);
        assert_eq!(parsed.values["dry_run"], FlagValue::Bound(json!(false)));
    }

    #[test]
    fn test_unknown_flag_is_a_usage_error() {
        let cli = FunctionCli::new("f", None, &Signature::empty());
        let err = cli.parse(&args(&["--bogus"])).unwrap_err();
        assert!(matches!(err, ShellbindError::Usage(_)));
    }

    #[test]
    fn test_help_text_carries_coercion_name_and_requiredness() {
        let sig = Signature::new(vec![
            ParameterSpec::required("n", ParamKind::PositionalOrKeyword, Some(DeclaredType::Int)),
            ParameterSpec::optional(
                "greeting",
                ParamKind::KeywordOnly,
                Some(DeclaredType::Str),
                json!("Hello"),
            ),
        ])
        .unwrap();
        let cli = FunctionCli::new("f", None, &sig);
        let rendered = cli.command().render_help().to_string();
        assert!(rendered.contains("int (required)"));
        assert!(rendered.contains("str (default: Hello)"));
        assert!(rendered.contains("positional or keyword args"));
        assert!(rendered.contains("keyword only args"));
    }

    #[test]
    fn test_every_parameter_present_even_when_unset() {
        let sig = Signature::new(vec![
            ParameterSpec::optional("a", ParamKind::PositionalOrKeyword, None, json!("x")),
            ParameterSpec::optional("b", ParamKind::KeywordOnly, None, json!("y")),
        ])
        .unwrap();
        let cli = FunctionCli::new("f", None, &sig);
        let parsed = parse(&cli, &[]);
        assert_eq!(parsed.values.len(), 2);
        assert!(parsed.values["a"].is_unset());
        assert!(parsed.values["b"].is_unset());
    }
}
