use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellbindError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("signature contract violation: {0}")]
    SignatureContract(String),
    #[error("argument '{param}': cannot parse {value:?} as {expected}")]
    CoercionFailure {
        param: String,
        value: String,
        expected: String,
    },
    #[error("the following arguments are required: {}", names.join(", "))]
    MissingRequired { names: Vec<String> },
    #[error("unrecognized positional arguments: {}", tokens.join(" "))]
    UnclaimedPositional { tokens: Vec<String> },
    #[error("{0}")]
    Usage(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("config error: {0}")]
    ConfigError(String),
    #[error("invocation error: {0}")]
    InvocationError(String),
}
