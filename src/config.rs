//! Run settings.
//!
//! The bot reads its settings from the process environment in one of two
//! interchangeable ways: the `INPUT_*` variables the actions runner sets
//! for a step's declared inputs, or plain environment variables for runs
//! outside of a workflow (selected with `--from-env`).

use std::fmt;

use secrecy::SecretString;

/// Where [`Inputs::load`] looks for its values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    /// `INPUT_*` variables provided by the actions runner.
    ActionInputs,
    /// Plain environment variables, for local runs.
    Env,
}

pub struct Inputs {
    /// Raw label -> reviewers mapping string. Parsing is deferred to the
    /// `parser` crate so a malformed value is reported as its own
    /// failure stage, not a settings failure.
    pub assign_mappings: String,
    pub github_token: SecretString,
    /// Explicit pull request to operate on when the event carries
    /// several candidates.
    pub pull_request_number: Option<u64>,
}

impl Inputs {
    pub fn load(source: InputSource) -> Result<Inputs, InputError> {
        match source {
            InputSource::ActionInputs => Self::from_vars(
                "INPUT_ASSIGN-MAPPINGS",
                "INPUT_GITHUBTOKEN",
                "INPUT_PULL-REQUEST-NUMBER",
            ),
            InputSource::Env => {
                Self::from_vars("ASSIGN_MAPPINGS", "GITHUB_TOKEN", "PULL_REQUEST_NUMBER")
            }
        }
    }

    fn from_vars(
        mappings: &'static str,
        token: &'static str,
        number: &'static str,
    ) -> Result<Inputs, InputError> {
        Ok(Inputs {
            assign_mappings: required(mappings)?,
            github_token: required(token)?.into(),
            pull_request_number: optional(number)
                .map(|v| v.parse().map_err(|_| InputError::InvalidNumber(number, v)))
                .transpose()?,
        })
    }
}

/// Reads a variable, treating an empty value as unset. The actions runner
/// sets declared-but-unsupplied inputs to the empty string.
fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn required(name: &'static str) -> Result<String, InputError> {
    optional(name).ok_or(InputError::Missing(name))
}

#[derive(Debug, PartialEq, Eq)]
pub enum InputError {
    Missing(&'static str),
    InvalidNumber(&'static str, String),
}

impl std::error::Error for InputError {}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InputError::Missing(name) => write!(f, "`{name}` must be set and non-empty"),
            InputError::InvalidNumber(name, value) => {
                write!(f, "`{name}` must be a pull request number, got `{value}`")
            }
        }
    }
}
