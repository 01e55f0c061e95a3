use miette::Diagnostic;
use thiserror::Error;

/// Errors raised at the edges of the library.
///
/// Parsing itself never fails: unmatched or missing delimiters are tolerated
/// and simply leave elements open in the event log. These variants cover the
/// configuration and input boundary around the parser.
#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum WikitableError {
	#[error(transparent)]
	#[diagnostic(code(wikitable::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file `{path}`: {reason}")]
	#[diagnostic(
		code(wikitable::config_parse),
		help("check that the file is valid TOML with an optional [parser] section")
	)]
	ConfigParse { path: String, reason: String },

	#[error("input `{0}` is not valid UTF-8")]
	#[diagnostic(
		code(wikitable::invalid_input),
		help("wikitext must be UTF-8 encoded")
	)]
	InvalidInput(String),
}

pub type WikitableResult<T> = Result<T, WikitableError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
