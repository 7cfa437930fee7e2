pub mod interpreter;
pub mod parser;
pub mod resolver;
pub mod scanner;

use std::fmt::Display;

use self::{interpreter::RuntimeError, parser::ParseError, resolver::ResolveError, scanner::ScanError};
use crate::scanner::{Token, TokenType};

/// LoxError is the top-level error type for the Lox interpreter.
#[derive(thiserror::Error, Debug)]
pub enum LoxError {
	/// Internal interpreter error or failed I/O, should never come from user code
	#[error("InternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// Lexical and grammar errors encountered during scanning and parsing
	#[error("{}", display_errors(.0))]
	SyntaxErrors(Vec<SyntaxError>),
	/// Errors encountered while resolving variable bindings
	#[error("{}", display_errors(.0))]
	ResolveErrors(Vec<ResolveError>),
	/// Runtime errors encountered during interpretation
	#[error("{0}")]
	RuntimeError(#[from] RuntimeError),
}

impl LoxError {
	/// Process exit code for batch mode, following `sysexits.h`.
	pub fn exit_code(&self) -> u8 {
		match self {
			LoxError::InternalError(_) => 74,
			LoxError::SyntaxErrors(_) | LoxError::ResolveErrors(_) => 65,
			LoxError::RuntimeError(_) => 70,
		}
	}
}

/// A static error from either the scanner or the parser.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
	#[error(transparent)]
	Scan(#[from] ScanError),
	#[error(transparent)]
	Parse(#[from] ParseError),
}

/// Where in the source a static error points, rendered into the diagnostic
/// right after `error`.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
	/// The error is at the end of input.
	End,
	/// The error is at the token with this lexeme.
	Lexeme(String),
}

impl Location {
	/// Point at `token`, or at the end of input for `Eof`.
	pub(crate) fn of(token: &Token) -> Self {
		match token.r#type {
			TokenType::Eof => Location::End,
			_ => Location::Lexeme(token.lexeme.clone()),
		}
	}
}

impl Display for Location {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Location::End => write!(f, " at end"),
			Location::Lexeme(lexeme) => write!(f, " at '{lexeme}'"),
		}
	}
}

fn display_errors<E: Display>(errors: &[E]) -> String {
	errors.iter().map(|e| e.to_string()).collect::<Vec<String>>().join("\n")
}
